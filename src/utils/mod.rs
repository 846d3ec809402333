pub mod error;

pub use error::{TransformError, TransformResult};
