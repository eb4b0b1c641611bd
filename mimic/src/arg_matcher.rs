//! Predicates over a single argument.

use std::any::{Any, type_name};
use std::borrow::{Borrow, Cow};
use std::fmt;
use std::sync::Arc;

use crate::Error;

type MatchFn<T> = Arc<dyn Fn(&T) -> bool + Send + Sync>;

/// A named predicate over one argument value.
///
/// `ArgMatcher` can match values by:
/// - Anything ([`any`](Self::any))
/// - Equality and ordering ([`eq`](Self::eq), [`lt`](Self::lt), [`ge`](Self::ge), ...)
/// - Identity of an `Arc` ([`identical`](Self::identical))
/// - Presence of an `Option` ([`none`](Self::none), [`some`](Self::some))
/// - Runtime type of a `dyn Any` ([`of_type`](Self::of_type))
/// - Kind of a thrown error ([`error_kind`](Self::error_kind))
/// - Custom predicate ([`matching`](Self::matching))
///
/// The name appears in failure messages. Matchers are stateless and cheap to
/// clone.
///
/// # Example
///
/// ```
/// use mimic::ArgMatcher;
///
/// let positive = ArgMatcher::gt(0);
/// assert!(positive.matches(&3));
/// assert!(!positive.matches(&-3));
///
/// let even = ArgMatcher::matching("even", |n: &i32| n % 2 == 0);
/// assert_eq!(even.description(), "even");
///
/// // A plain value converts into an equality matcher
/// let three: ArgMatcher<i32> = 3.into();
/// assert!(three.matches(&3));
/// ```
pub struct ArgMatcher<T> {
    description: Cow<'static, str>,
    matcher: MatchFn<T>,
}

impl<T> Clone for ArgMatcher<T> {
    fn clone(&self) -> Self {
        Self {
            description: self.description.clone(),
            matcher: self.matcher.clone(),
        }
    }
}

impl<T> fmt::Debug for ArgMatcher<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArgMatcher")
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

impl<T: 'static> ArgMatcher<T> {
    /// Match any value.
    pub fn any() -> Self {
        Self::matching("any", |_| true)
    }

    /// Match values using a custom predicate.
    pub fn matching<F>(description: impl Into<Cow<'static, str>>, predicate: F) -> Self
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        Self {
            description: description.into(),
            matcher: Arc::new(predicate),
        }
    }

    /// Returns true if `value` satisfies this matcher.
    #[inline]
    pub fn matches(&self, value: &T) -> bool {
        (self.matcher)(value)
    }

    /// Returns the human-readable name of this matcher.
    pub fn description(&self) -> &str {
        &self.description
    }
}

impl<T> ArgMatcher<T>
where
    T: PartialEq + fmt::Debug + Send + Sync + 'static,
{
    /// Match values equal to `expected`.
    pub fn eq(expected: T) -> Self {
        Self::matching(format!("{expected:?}"), move |value| *value == expected)
    }

    /// Match values not equal to `unexpected`.
    pub fn ne(unexpected: T) -> Self {
        Self::matching(format!("!= {unexpected:?}"), move |value| {
            *value != unexpected
        })
    }
}

impl<T> ArgMatcher<T>
where
    T: PartialOrd + fmt::Debug + Send + Sync + 'static,
{
    /// Match values strictly less than `bound`.
    pub fn lt(bound: T) -> Self {
        Self::matching(format!("< {bound:?}"), move |value| *value < bound)
    }

    /// Match values less than or equal to `bound`.
    pub fn le(bound: T) -> Self {
        Self::matching(format!("<= {bound:?}"), move |value| *value <= bound)
    }

    /// Match values strictly greater than `bound`.
    pub fn gt(bound: T) -> Self {
        Self::matching(format!("> {bound:?}"), move |value| *value > bound)
    }

    /// Match values greater than or equal to `bound`.
    pub fn ge(bound: T) -> Self {
        Self::matching(format!(">= {bound:?}"), move |value| *value >= bound)
    }
}

impl<U: ?Sized + Send + Sync + 'static> ArgMatcher<Arc<U>> {
    /// Match the very same allocation as `target` (reference identity).
    pub fn identical(target: &Arc<U>) -> Self {
        let target = target.clone();
        Self::matching(
            format!("identical to {:p}", Arc::as_ptr(&target)),
            move |value| Arc::ptr_eq(value, &target),
        )
    }
}

impl<U: 'static> ArgMatcher<Option<U>> {
    /// Match `None`.
    pub fn none() -> Self {
        Self::matching("None", Option::is_none)
    }

    /// Match any `Some(_)`.
    pub fn some() -> Self {
        Self::matching("Some(_)", Option::is_some)
    }
}

impl<T> ArgMatcher<T>
where
    T: Borrow<dyn Any + Send + Sync> + 'static,
{
    /// Match type-erased values whose concrete type is `U`.
    ///
    /// Works for `Box<dyn Any + Send + Sync>` and `Arc<dyn Any + Send + Sync>`
    /// arguments.
    pub fn of_type<U: Any>() -> Self {
        Self::matching(format!("of type {}", type_name::<U>()), |value: &T| {
            let value: &(dyn Any + Send + Sync) = value.borrow();
            value.is::<U>()
        })
    }
}

impl ArgMatcher<Error> {
    /// Match errors wrapping a user error of type `K`.
    ///
    /// See [`Error::external`].
    pub fn error_kind<K: std::error::Error + 'static>() -> Self {
        Self::matching(format!("error of kind {}", type_name::<K>()), |error| {
            error.downcast_ref::<K>().is_some()
        })
    }

    /// Match [`Error::Unstubbed`].
    pub fn unstubbed() -> Self {
        Self::matching("unstubbed call", Error::is_unstubbed)
    }
}

impl<T> From<T> for ArgMatcher<T>
where
    T: PartialEq + fmt::Debug + Send + Sync + 'static,
{
    fn from(expected: T) -> Self {
        ArgMatcher::eq(expected)
    }
}

// Allow string literals to match owned `String` arguments
impl From<&str> for ArgMatcher<String> {
    fn from(expected: &str) -> Self {
        ArgMatcher::eq(expected.to_owned())
    }
}
