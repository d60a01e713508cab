mod registry;
mod segment;

pub use registry::{ParameterId, Registry};
pub use segment::{CompletionMap, Segmenter, Slice};
