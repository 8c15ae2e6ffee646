//! Error types for moduledoc.
//!
//! Library crates use [`ModuleDocError`] via `thiserror`.
//! The CLI wraps this with `color-eyre` for rich diagnostics.

use std::path::PathBuf;

/// Top-level error type for all moduledoc operations.
#[derive(Debug, thiserror::Error)]
pub enum ModuleDocError {
    /// A category has no `""` (uncategorized) subcategory key.
    #[error("category '{category}' has no uncategorized (\"\") subcategory")]
    MissingSubcategory { category: String },

    /// Two pages resolved to the same page id.
    #[error("page id '{id}' would be rendered twice")]
    DuplicatePage { id: String },

    /// Configuration loading or validation error.
    #[error("config error: {message}")]
    Config { message: String },

    /// The module groups document could not be read as JSON.
    #[error("input error: {message}")]
    Input { message: String },

    /// Filesystem I/O error.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, ModuleDocError>;

impl ModuleDocError {
    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Create an input error from any displayable message.
    pub fn input(msg: impl Into<String>) -> Self {
        Self::Input {
            message: msg.into(),
        }
    }

    pub fn missing_subcategory(category: impl Into<String>) -> Self {
        Self::MissingSubcategory {
            category: category.into(),
        }
    }

    pub fn duplicate_page(id: impl Into<String>) -> Self {
        Self::DuplicatePage { id: id.into() }
    }

    /// Wrap a `std::io::Error` with a path for context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_formatting() {
        let err = ModuleDocError::config("branch must not be empty");
        assert_eq!(err.to_string(), "config error: branch must not be empty");

        let err = ModuleDocError::missing_subcategory("driver");
        assert!(err.to_string().contains("'driver'"));
    }

    #[test]
    fn io_error_names_path() {
        let source = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = ModuleDocError::io("/out/modules_main.md", source);
        assert!(err.to_string().contains("modules_main.md"));
    }
}
