mod capture;
mod core;
mod field;
mod parameter;

pub use self::core::ParameterSetBuilder;
#[doc(hidden)]
pub use capture::{InvalidConversion, Primitive};
pub use capture::CallbackError;
#[doc(hidden)]
pub use field::GenericField;
pub use field::{Array, Scalar};
pub use parameter::{HelpParameter, Parameter, ParameterDefinition};
