use std::path::Path;

use crate::infrastructure::{InfraError, InfraResult};

pub fn ensure_file_exists(path: &Path) -> InfraResult<()> {
    if !path.exists() {
        Err(InfraError::FileNotFound(path.to_path_buf()))
    } else if !path.is_file() {
        Err(InfraError::schema(path.display().to_string(), "not a file"))
    } else {
        Ok(())
    }
}

// Helper function for cross-platform path comparison
pub fn normalize_path_separator(s: &str) -> String {
    s.replace('\\', "/")
}
