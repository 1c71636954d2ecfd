//! Convert various values to html attributes

use std::borrow::Cow;

use crate::error_handling::log_or_panic;
use crate::reactivity::render_callbacks::AttributeCallback;
use crate::reactivity::state::{Ctx, State};
use crate::type_macros;

/// The result of apply attribute
pub(crate) enum AttributeResult<C: State> {
    /// The attribute should be set, or left out if `None`
    SetIt(Option<Cow<'static, str>>),
    /// The attribute requires state
    IsDynamic(AttributeCallback<C>),
}

/// A trait for using a arbitrary type as a attribute value.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a valid attribute value.",
    note = "Try converting the value to a string"
)]
pub trait ToAttribute<C: State>: 'static {
    /// Return the attribute value, or a deferred function.
    #[doc(hidden)]
    fn calc_attribute(self) -> AttributeResult<C>;
}

/// generate a `ToAttribute` implementation for a string type
macro_rules! attribute_string {
    ($t:ty, $cow:expr) => {
        impl<C: State> ToAttribute<C> for $t {
            #[inline]
            fn calc_attribute(self) -> AttributeResult<C> {
                AttributeResult::SetIt(Some(($cow)(self)))
            }
        }
    };
}

type_macros::strings_cow!(attribute_string);

/// generate a `ToAttribute` implementation for a numeric type
macro_rules! attribute_numeric {
    ($t:ident, $fmt:ident) => {
        impl<C: State> ToAttribute<C> for $t {
            #[inline]
            fn calc_attribute(self) -> AttributeResult<C> {
                let mut buffer = $fmt::Buffer::new();
                let result = buffer.format(self);
                AttributeResult::SetIt(Some(Cow::Owned(result.to_owned())))
            }
        }
    };
}

type_macros::numerics!(attribute_numeric);

impl<C: State> ToAttribute<C> for char {
    #[inline]
    fn calc_attribute(self) -> AttributeResult<C> {
        AttributeResult::SetIt(Some(Cow::Owned(self.to_string())))
    }
}

/// Boolean attributes are present (with a empty value) when `true` and absent when `false`
impl<C: State> ToAttribute<C> for bool {
    #[inline]
    fn calc_attribute(self) -> AttributeResult<C> {
        AttributeResult::SetIt(self.then_some(Cow::Borrowed("")))
    }
}

impl<C: State, T: ToAttribute<C>> ToAttribute<C> for Option<T> {
    #[inline]
    fn calc_attribute(self) -> AttributeResult<C> {
        match self {
            Some(inner) => inner.calc_attribute(),
            None => AttributeResult::SetIt(None),
        }
    }
}

impl<C: State, T: ToAttribute<C>, E: ToAttribute<C>> ToAttribute<C> for Result<T, E> {
    #[inline]
    fn calc_attribute(self) -> AttributeResult<C> {
        match self {
            Ok(inner) => inner.calc_attribute(),
            Err(inner) => inner.calc_attribute(),
        }
    }
}

impl<F, C, R> ToAttribute<C> for F
where
    F: Fn(&Ctx<C>) -> R + 'static,
    R: ToAttribute<C>,
    C: State,
{
    #[inline]
    fn calc_attribute(self) -> AttributeResult<C> {
        AttributeResult::IsDynamic(Box::new(move |ctx| match self(ctx).calc_attribute() {
            AttributeResult::SetIt(value) => value,
            AttributeResult::IsDynamic(_) => {
                log_or_panic!("Reactive attribute closures can not return another closure");
                None
            }
        }))
    }
}
