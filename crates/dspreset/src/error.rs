//! Error types for import, export, mapping and settings operations.

use std::path::PathBuf;
use thiserror::Error;

use crate::validation::ValidationError;

/// Errors that can occur while importing a `.dspreset` document.
#[derive(Debug, Error)]
pub enum ParseError {
    /// Failed to read the preset file
    #[error("failed to read file '{path}': {source}")]
    ReadFile {
        /// Path of the file that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The document is not well-formed XML
    #[error("malformed XML at byte {position}: {message}")]
    Xml {
        /// Byte offset reported by the reader.
        position: u64,
        /// Reader error message.
        message: String,
    },

    /// The document is well-formed but structurally unusable
    #[error("malformed document: {0}")]
    Malformed(String),

    /// An attribute is present but its value cannot be interpreted
    #[error("invalid value '{value}' for attribute '{attribute}' on <{element}>")]
    InvalidAttribute {
        /// Element carrying the attribute.
        element: String,
        /// Attribute name.
        attribute: String,
        /// Raw attribute value.
        value: String,
    },
}

impl ParseError {
    /// Create a read file error.
    pub fn read_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ParseError::ReadFile {
            path: path.into(),
            source,
        }
    }

    /// Create an invalid attribute error.
    pub fn invalid_attribute(
        element: impl Into<String>,
        attribute: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        ParseError::InvalidAttribute {
            element: element.into(),
            attribute: attribute.into(),
            value: value.into(),
        }
    }
}

/// Errors that can occur while exporting a preset.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Pre-export validation failed; nothing was written
    #[error("validation failed: {}", .0.iter().map(|e| e.to_string()).collect::<Vec<_>>().join("; "))]
    Validation(Vec<ValidationError>),

    /// A zone references a sample file that does not exist
    #[error("sample file not found: '{path}'")]
    MissingSampleFile {
        /// Resolved path of the missing sample.
        path: PathBuf,
    },

    /// Failed to create a directory
    #[error("failed to create directory '{path}': {source}")]
    CreateDir {
        /// Path of the directory that could not be created.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to copy a sample into the samples directory
    #[error("failed to copy sample '{from}' to '{to}': {source}")]
    CopySample {
        /// Source sample path.
        from: PathBuf,
        /// Destination path.
        to: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to write the preset file
    #[error("failed to write file '{path}': {source}")]
    WriteFile {
        /// Path of the file that could not be written.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to serialize the document
    #[error("failed to serialize XML: {0}")]
    Serialize(String),
}

impl ExportError {
    /// Create a create directory error.
    pub fn create_dir(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ExportError::CreateDir {
            path: path.into(),
            source,
        }
    }

    /// Create a copy sample error.
    pub fn copy_sample(
        from: impl Into<PathBuf>,
        to: impl Into<PathBuf>,
        source: std::io::Error,
    ) -> Self {
        ExportError::CopySample {
            from: from.into(),
            to: to.into(),
            source,
        }
    }

    /// Create a write file error.
    pub fn write_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ExportError::WriteFile {
            path: path.into(),
            source,
        }
    }

    /// Validation errors, if this export was rejected before any I/O.
    pub fn validation_errors(&self) -> Option<&[ValidationError]> {
        match self {
            ExportError::Validation(errors) => Some(errors),
            _ => None,
        }
    }
}

/// Errors raised by the auto-mapper.
#[derive(Debug, Error)]
pub enum MapError {
    /// The sample folder is missing or unreadable
    #[error("failed to read directory '{path}': {source}")]
    ReadDir {
        /// Folder that could not be listed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

impl MapError {
    /// Create a read directory error.
    pub fn read_dir(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        MapError::ReadDir {
            path: path.into(),
            source,
        }
    }
}

/// Errors that can occur while loading or saving settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read a file
    #[error("failed to read file '{path}': {source}")]
    ReadFile {
        /// Path of the file that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to write a file
    #[error("failed to write file '{path}': {source}")]
    WriteFile {
        /// Path of the file that could not be written.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse TOML
    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Failed to serialize TOML
    #[error("failed to serialize TOML: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// Failed to create directory
    #[error("failed to create directory '{path}': {source}")]
    CreateDir {
        /// Path of the directory that could not be created.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

impl ConfigError {
    /// Create a read file error.
    pub fn read_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConfigError::ReadFile {
            path: path.into(),
            source,
        }
    }

    /// Create a write file error.
    pub fn write_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConfigError::WriteFile {
            path: path.into(),
            source,
        }
    }

    /// Create a create directory error.
    pub fn create_dir(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConfigError::CreateDir {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    fn mock_io_err() -> std::io::Error {
        std::io::Error::new(std::io::ErrorKind::NotFound, "mock")
    }

    // --- factory methods ---

    #[test]
    fn read_file_factory_produces_correct_variant() {
        let err = ParseError::read_file("/some/path", mock_io_err());
        assert!(
            matches!(err, ParseError::ReadFile { ref path, .. } if path == std::path::Path::new("/some/path"))
        );
    }

    #[test]
    fn copy_sample_factory_produces_correct_variant() {
        let err = ExportError::copy_sample("/a.wav", "/out/samples/a.wav", mock_io_err());
        assert!(matches!(
            err,
            ExportError::CopySample { ref from, ref to, .. }
                if from == std::path::Path::new("/a.wav")
                    && to == std::path::Path::new("/out/samples/a.wav")
        ));
    }

    // --- Display formatting ---

    #[test]
    fn invalid_attribute_display() {
        let err = ParseError::invalid_attribute("sample", "rootNote", "C4");
        assert_eq!(
            err.to_string(),
            "invalid value 'C4' for attribute 'rootNote' on <sample>"
        );
    }

    #[test]
    fn missing_sample_display() {
        let err = ExportError::MissingSampleFile {
            path: PathBuf::from("/lib/piano/C4.wav"),
        };
        let msg = err.to_string();
        assert!(msg.contains("sample file not found"), "got: {msg}");
        assert!(msg.contains("/lib/piano/C4.wav"), "got: {msg}");
    }

    #[test]
    fn validation_display_joins_all_errors() {
        let err = ExportError::Validation(vec![
            ValidationError::NoSamples,
            ValidationError::NoControls,
        ]);
        let msg = err.to_string();
        assert!(msg.starts_with("validation failed: "), "got: {msg}");
        assert!(msg.contains("; "), "got: {msg}");
        assert_eq!(err.validation_errors().map(<[_]>::len), Some(2));
    }

    #[test]
    fn read_dir_display() {
        let err = MapError::read_dir("/no/such/folder", mock_io_err());
        let msg = err.to_string();
        assert!(msg.contains("failed to read directory"), "got: {msg}");
        assert!(msg.contains("/no/such/folder"), "got: {msg}");
    }

    #[test]
    fn config_write_file_display() {
        let err = ConfigError::write_file("/a/settings.toml", mock_io_err());
        let msg = err.to_string();
        assert!(msg.contains("failed to write file"), "got: {msg}");
        assert!(msg.contains("/a/settings.toml"), "got: {msg}");
    }

    // --- Error::source() chain for I/O-wrapping variants ---

    #[test]
    fn io_variants_expose_source() {
        assert!(ParseError::read_file("/x", mock_io_err()).source().is_some());
        assert!(ExportError::write_file("/x", mock_io_err()).source().is_some());
        assert!(ExportError::create_dir("/x", mock_io_err()).source().is_some());
        assert!(MapError::read_dir("/x", mock_io_err()).source().is_some());
        assert!(ConfigError::create_dir("/x", mock_io_err()).source().is_some());
    }

    #[test]
    fn non_io_variants_have_no_source() {
        assert!(ParseError::Malformed("m".to_string()).source().is_none());
        assert!(ExportError::Serialize("s".to_string()).source().is_none());
        assert!(ExportError::Validation(vec![]).source().is_none());
    }
}
