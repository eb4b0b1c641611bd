use std::sync::Arc;

use crate::SpyId;

/// The single error type for all Mimic operations.
///
/// Stubbed failures and verification failures share this type. Errors a test
/// wants a throwing spy to produce are wrapped with [`Error::external`] and
/// can be recovered with [`Error::downcast_ref`].
#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    /// No registered stub produced a result for the call.
    #[error("no stub matched call {spy}{arguments}")]
    Unstubbed { spy: SpyId, arguments: String },

    /// A count verification failed; carries the observed count.
    #[error("call count not fulfilled: {0} matching calls recorded")]
    UnfulfilledCallCount(usize),

    /// No stub matching the recorded calls produces an error.
    #[error("no stub matching the recorded calls throws")]
    DidNotThrow,

    /// Errors were thrown, but none satisfied the expected error matcher.
    #[error("none of the thrown errors matched: {0:?}")]
    DidNotMatchThrownError(Vec<Error>),

    /// Step `step` (0-based) of an ordering check could not be located after
    /// the calls matched by the previous steps.
    #[error("step {step} `{interaction}` was not called in the expected order")]
    OutOfOrder { step: usize, interaction: String },

    #[error("{0}")]
    External(#[source] Arc<dyn std::error::Error + Send + Sync>),
}

impl Error {
    pub fn external(e: impl std::error::Error + Send + Sync + 'static) -> Self {
        Error::External(Arc::new(e))
    }

    pub(crate) fn unstubbed(spy: &SpyId, arguments: String) -> Self {
        Error::Unstubbed {
            spy: spy.clone(),
            arguments,
        }
    }

    /// Returns true if this is an [`Error::Unstubbed`].
    pub fn is_unstubbed(&self) -> bool {
        matches!(self, Error::Unstubbed { .. })
    }

    /// Returns the wrapped user error if it has type `K`.
    pub fn downcast_ref<K: std::error::Error + 'static>(&self) -> Option<&K> {
        match self {
            Error::External(e) => e.downcast_ref::<K>(),
            _ => None,
        }
    }
}

impl PartialEq for Error {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (
                Self::Unstubbed {
                    spy: s1,
                    arguments: a1,
                },
                Self::Unstubbed {
                    spy: s2,
                    arguments: a2,
                },
            ) => s1 == s2 && a1 == a2,
            (Self::UnfulfilledCallCount(a), Self::UnfulfilledCallCount(b)) => a == b,
            (Self::DidNotThrow, Self::DidNotThrow) => true,
            (Self::DidNotMatchThrownError(a), Self::DidNotMatchThrownError(b)) => a == b,
            (
                Self::OutOfOrder {
                    step: s1,
                    interaction: i1,
                },
                Self::OutOfOrder {
                    step: s2,
                    interaction: i2,
                },
            ) => s1 == s2 && i1 == i2,
            (Self::External(a), Self::External(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl Eq for Error {}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, thiserror::Error)]
    #[error("offline")]
    struct Offline;

    #[derive(Debug, thiserror::Error)]
    #[error("timeout")]
    struct Timeout;

    #[test]
    fn downcast_recovers_user_error() {
        let err = Error::external(Offline);
        assert!(err.downcast_ref::<Offline>().is_some());
        assert!(err.downcast_ref::<Timeout>().is_none());
        assert_eq!(err.to_string(), "offline");
    }

    #[test]
    fn external_errors_compare_by_identity() {
        let a = Error::external(Offline);
        let b = Error::external(Offline);
        assert_eq!(a, a.clone());
        assert_ne!(a, b);
    }

    #[test]
    fn unstubbed_message_names_the_call() {
        let err = Error::unstubbed(&SpyId::new("fetch"), "(\"pear\")".into());
        assert!(err.is_unstubbed());
        assert_eq!(err.to_string(), "no stub matched call fetch(\"pear\")");
    }

    #[test]
    fn count_failure_carries_observed_count() {
        assert_eq!(
            Error::UnfulfilledCallCount(0),
            Error::UnfulfilledCallCount(0)
        );
        assert_ne!(
            Error::UnfulfilledCallCount(0),
            Error::UnfulfilledCallCount(1)
        );
    }
}
