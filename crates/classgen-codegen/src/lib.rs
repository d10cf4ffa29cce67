pub mod error;
pub mod generator;
pub mod indent;
pub mod traits;

mod members;

// Per-language node families
pub mod backends;

// Re-exports
pub use backends::create_factory;
pub use error::CodegenError;
pub use generator::CodeGenerator;
pub use traits::{BackendFactory, Node, NodeKind};
