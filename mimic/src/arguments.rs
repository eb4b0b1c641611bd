//! Argument tuples of any arity.
//!
//! The arguments of a call are captured as a plain tuple: `()` for a method
//! without parameters, `(A,)` for one parameter, `(A, B)` for two and so on
//! up to eight. Matching is positional and fully typed; there is no
//! type-erased argument vector anywhere.

use std::fmt;

use crate::{ArgMatcher, InvocationMatcher};

/// A tuple of call arguments.
///
/// Implemented for tuples of up to eight elements whose element types are
/// `Clone + Debug + Send + Sync + 'static`. Arguments are captured by value,
/// shared with verifying threads and printed in diagnostics, hence the bounds.
pub trait Arguments: Clone + fmt::Debug + Send + Sync + 'static {
    /// Number of parameters.
    const ARITY: usize;

    /// Matcher accepting every call of this shape.
    fn any_matcher() -> InvocationMatcher<Self>;

    /// Renders the arguments as a parameter list, e.g. `("apple", 3)`.
    fn describe(&self) -> String;
}

/// Conversion into an [`InvocationMatcher`].
///
/// Implemented for tuples of the same arity as `A` whose elements convert
/// into the matching [`ArgMatcher`]. A plain value converts into an equality
/// matcher, so `("apple", ArgMatcher::any())` is a valid matcher for
/// `(String, u32)` arguments.
pub trait IntoInvocationMatcher<A: Arguments> {
    fn into_invocation_matcher(self) -> InvocationMatcher<A>;
}

impl<A: Arguments> IntoInvocationMatcher<A> for InvocationMatcher<A> {
    fn into_invocation_matcher(self) -> InvocationMatcher<A> {
        self
    }
}

macro_rules! impl_arguments {
    ($arity:expr; $($idx:tt : $A:ident => $M:ident),*) => {
        impl<$($A),*> Arguments for ($($A,)*)
        where
            $($A: Clone + fmt::Debug + Send + Sync + 'static,)*
        {
            const ARITY: usize = $arity;

            fn any_matcher() -> InvocationMatcher<Self> {
                ($(ArgMatcher::<$A>::any(),)*).into_invocation_matcher()
            }

            #[allow(unused_mut)]
            fn describe(&self) -> String {
                let mut parts: Vec<String> = Vec::with_capacity($arity);
                $(parts.push(format!("{:?}", self.$idx));)*
                format!("({})", parts.join(", "))
            }
        }

        impl<$($A,)* $($M),*> IntoInvocationMatcher<($($A,)*)> for ($($M,)*)
        where
            $($A: Clone + fmt::Debug + Send + Sync + 'static,)*
            $($M: Into<ArgMatcher<$A>>,)*
        {
            #[allow(unused_variables, clippy::unused_unit)]
            fn into_invocation_matcher(self) -> InvocationMatcher<($($A,)*)> {
                let matchers: ($(ArgMatcher<$A>,)*) = ($(self.$idx.into(),)*);
                let descriptions: Vec<String> =
                    vec![$(matchers.$idx.description().to_owned()),*];
                InvocationMatcher::new(descriptions, move |arguments: &($($A,)*)| {
                    true $(&& matchers.$idx.matches(&arguments.$idx))*
                })
            }
        }
    };
}

impl_arguments!(0;);
impl_arguments!(1; 0: A0 => M0);
impl_arguments!(2; 0: A0 => M0, 1: A1 => M1);
impl_arguments!(3; 0: A0 => M0, 1: A1 => M1, 2: A2 => M2);
impl_arguments!(4; 0: A0 => M0, 1: A1 => M1, 2: A2 => M2, 3: A3 => M3);
impl_arguments!(5; 0: A0 => M0, 1: A1 => M1, 2: A2 => M2, 3: A3 => M3, 4: A4 => M4);
impl_arguments!(6; 0: A0 => M0, 1: A1 => M1, 2: A2 => M2, 3: A3 => M3, 4: A4 => M4, 5: A5 => M5);
impl_arguments!(7; 0: A0 => M0, 1: A1 => M1, 2: A2 => M2, 3: A3 => M3, 4: A4 => M4, 5: A5 => M5, 6: A6 => M6);
impl_arguments!(8; 0: A0 => M0, 1: A1 => M1, 2: A2 => M2, 3: A3 => M3, 4: A4 => M4, 5: A5 => M5, 6: A6 => M6, 7: A7 => M7);
