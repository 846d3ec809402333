//! The pixel-transform engine: operation families, the registry, and the
//! decode -> transform -> encode pipeline.

pub mod color;
pub mod convolution;
pub mod geometric;
mod lut;
pub mod pipeline;
pub mod quantization;
pub mod registry;

pub use pipeline::{StageTimings, TransformOutput};
pub use registry::{OperationDescriptor, ParamSpec, ResolvedParams};
