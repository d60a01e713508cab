use crate::api::capture::CallbackError;
use crate::model::Arity;

type Setter<'a, V> = Box<dyn FnMut(V) -> Result<(), CallbackError> + 'a>;

/// Behaviour to commit the converted values of a parameter.
///
/// A commit happens at most once per parse of the parameter, and only after every value has converted and validated.
#[doc(hidden)]
pub trait GenericField<T> {
    /// Get the `Arity` for this implementation.
    fn arity(&self) -> Arity;

    /// Commit the values (precisely 1 for a scalar field).
    fn commit(&mut self, values: Vec<T>) -> Result<(), CallbackError>;
}

/// A field that commits a single value.
///
/// ### Example
/// ```
/// # use paramset_builder as paramset;
/// use paramset::{Parameter, ParameterSet, Scalar};
///
/// let mut loops: i64 = 0;
/// let set = ParameterSet::builder()
///     .add(Parameter::new(Scalar::new(&mut loops), "-loops"))
///     .build();
/// set.parse(&["-loops", "3"], 0, &mut std::io::sink()).unwrap();
/// drop(set);
/// assert_eq!(loops, 3);
/// ```
pub struct Scalar<'a, T> {
    setter: Setter<'a, T>,
}

impl<'a, T> Scalar<'a, T> {
    /// Create a scalar field that assigns the committed value to `variable`.
    pub fn new(variable: &'a mut T) -> Self {
        Self::with(move |value| *variable = value)
    }

    /// Create a scalar field that passes the committed value to `setter`.
    pub fn with(mut setter: impl FnMut(T) + 'a) -> Self {
        Self::try_with(move |value| {
            setter(value);
            Ok::<(), CallbackError>(())
        })
    }

    /// Create a scalar field that passes the committed value to a fallible `setter`.
    /// An `Err` from the setter fails the parse with [`ErrorKind::Setter`](crate::ErrorKind::Setter).
    pub fn try_with<E>(mut setter: impl FnMut(T) -> Result<(), E> + 'a) -> Self
    where
        E: Into<CallbackError>,
    {
        Self {
            setter: Box::new(move |value: T| -> Result<(), CallbackError> {
                setter(value).map_err(Into::into)
            }),
        }
    }
}

impl<'a, T> GenericField<T> for Scalar<'a, T> {
    fn arity(&self) -> Arity {
        Arity::Scalar
    }

    fn commit(&mut self, mut values: Vec<T>) -> Result<(), CallbackError> {
        match (values.pop(), values.is_empty()) {
            (Some(value), true) => (self.setter)(value),
            _ => unreachable!("internal error - a scalar commit must receive precisely 1 value"),
        }
    }
}

/// A field that commits the whole collection of values at once.
///
/// The committed collection replaces any previous contents; it may be empty.
pub struct Array<'a, T> {
    setter: Setter<'a, Vec<T>>,
}

impl<'a, T> Array<'a, T> {
    /// Create an array field that replaces the contents of `variable` with the committed values.
    pub fn new(variable: &'a mut Vec<T>) -> Self {
        Self::with(move |values| *variable = values)
    }

    /// Create an array field that passes the committed values to `setter`.
    pub fn with(mut setter: impl FnMut(Vec<T>) + 'a) -> Self {
        Self::try_with(move |values| {
            setter(values);
            Ok::<(), CallbackError>(())
        })
    }

    /// Create an array field that passes the committed values to a fallible `setter`.
    pub fn try_with<E>(mut setter: impl FnMut(Vec<T>) -> Result<(), E> + 'a) -> Self
    where
        E: Into<CallbackError>,
    {
        Self {
            setter: Box::new(move |values: Vec<T>| -> Result<(), CallbackError> {
                setter(values).map_err(Into::into)
            }),
        }
    }
}

impl<'a, T> GenericField<T> for Array<'a, T> {
    fn arity(&self) -> Arity {
        Arity::Array
    }

    fn commit(&mut self, values: Vec<T>) -> Result<(), CallbackError> {
        (self.setter)(values)
    }
}
