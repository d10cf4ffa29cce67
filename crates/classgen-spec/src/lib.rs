//! Shared types and class description files for classgen.
//!
//! `types::common` holds the vocabulary every backend speaks (backends,
//! access levels, modifier flags); the rest of the crate reads
//! `*.class.json` descriptions into [`ClassSpec`] values.

pub mod loader;
pub mod parser;
pub mod schema_def;

pub mod types {
    pub mod class;
    pub mod common;
    pub mod error;
}

pub use loader::{load_class, LoadError};
pub use parser::parse_class;
pub use types::class::{ClassSpec, MethodSpec, StatementSpec};
pub use types::common::{AccessLevel, Backend, Modifier, Modifiers};
pub use types::error::ErrorEntry;
