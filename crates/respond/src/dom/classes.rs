//! Apply html classes

use std::borrow::Cow;

use crate::reactivity::state::State;
use crate::type_macros;

/// A trait for converting a value to a class name
///
/// Values containing whitespace add every class in them.
pub trait ToClass<C: State> {
    /// Convert the value to a class name, `None` adds no class
    #[doc(hidden)]
    fn calc_class(self) -> Option<Cow<'static, str>>;
}

/// generate a `ToClass` implementation for a string type
macro_rules! class_string {
    ($t:ty, $cow:expr) => {
        impl<C: State> ToClass<C> for $t {
            #[inline]
            fn calc_class(self) -> Option<Cow<'static, str>> {
                Some(($cow)(self))
            }
        }
    };
}

type_macros::strings_cow!(class_string);

impl<C: State, T: ToClass<C>> ToClass<C> for Option<T> {
    fn calc_class(self) -> Option<Cow<'static, str>> {
        self.and_then(ToClass::<C>::calc_class)
    }
}

impl<C: State, T: ToClass<C>, E: ToClass<C>> ToClass<C> for Result<T, E> {
    fn calc_class(self) -> Option<Cow<'static, str>> {
        match self {
            Ok(inner) => inner.calc_class(),
            Err(inner) => inner.calc_class(),
        }
    }
}
