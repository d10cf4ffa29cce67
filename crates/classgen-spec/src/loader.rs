use std::path::Path;

use tracing::debug;

use crate::parser;
use crate::types::class::ClassSpec;
use crate::types::error::ErrorEntry;

/// Read and parse a class description file.
#[allow(clippy::result_large_err)]
pub fn load_class(path: &Path) -> Result<ClassSpec, LoadError> {
    if !path.is_file() {
        return Err(LoadError::FileNotFound(path.to_string_lossy().into_owned()));
    }

    let file = path.to_string_lossy().into_owned();
    let content =
        std::fs::read_to_string(path).map_err(|e| LoadError::IoError(file.clone(), e))?;

    let spec = parser::parse_class(&content, &file).map_err(LoadError::ParseError)?;
    debug!(
        file = %path.display(),
        class = %spec.name,
        methods = spec.methods.len(),
        "loaded class description"
    );
    Ok(spec)
}

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("Class description not found: {0}")]
    FileNotFound(String),

    #[error("Failed to parse class description: {0}")]
    ParseError(ErrorEntry),

    #[error("I/O error reading {0}: {1}")]
    IoError(String, std::io::Error),
}
