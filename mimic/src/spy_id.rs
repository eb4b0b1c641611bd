use std::{fmt, ops::Deref, sync::Arc};

/// Name of a [`Spy`](crate::Spy), used in every diagnostic it produces.
///
/// Usually the name of the substituted method, e.g. `"fetch"` or
/// `"Store::save"`. Derefs to `str`.
///
/// ```
/// use mimic::{Plain, Spy};
///
/// let spy: Spy<(u32,), u32, Plain> = Spy::new("Store::save");
/// assert_eq!(spy.id(), "Store::save");
/// assert!(spy.id().starts_with("Store::"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct SpyId(Arc<str>);

impl SpyId {
    pub fn new(name: impl Into<Arc<str>>) -> Self {
        Self(name.into())
    }
}

impl Deref for SpyId {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SpyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self)
    }
}

impl PartialEq<str> for SpyId {
    fn eq(&self, other: &str) -> bool {
        **self == *other
    }
}

impl PartialEq<&str> for SpyId {
    fn eq(&self, other: &&str) -> bool {
        **self == **other
    }
}

impl From<&str> for SpyId {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for SpyId {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn owned_and_borrowed_names_compare_equal() {
        assert_eq!(SpyId::new("fetch"), SpyId::from("fetch".to_string()));
        assert_ne!(SpyId::new("fetch"), SpyId::new("store"));
        assert_eq!(SpyId::new("fetch"), "fetch");
    }

    #[test]
    fn display_is_the_bare_name() {
        assert_eq!(SpyId::new("Store::save").to_string(), "Store::save");
        assert_eq!(format!("{}(1)", SpyId::new("get")), "get(1)");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serializes_as_string() {
        let json = serde_json::to_string(&SpyId::new("fetch")).unwrap();
        assert_eq!(json, "\"fetch\"");
    }
}
