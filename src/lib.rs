// Module declarations in dependency order
pub mod utils;
pub mod core;
pub mod codec;
pub mod processing;
pub mod server;

// Public exports for external consumers
pub use self::core::PixelBuffer;
pub use self::processing::{StageTimings, TransformOutput, pipeline, registry};
pub use self::utils::{TransformError, TransformResult};

// This library file is used as a public API for consuming this crate as a library.
// The actual server entry point is in main.rs.
