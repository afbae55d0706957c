//! Error types for mesh I/O operations.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for mesh I/O operations.
pub type IoResult<T> = Result<T, IoError>;

/// Errors that can occur while reading or writing meshes.
///
/// Every decoding error is terminal: no partial mesh is returned. Variants
/// carry a token index, byte offset or line number so the caller can locate
/// the malformed region.
#[derive(Debug, Error)]
pub enum IoError {
    /// The input contained no tokens at all.
    #[error("empty input")]
    EmptyInput,

    /// A numeric field after `normal`/`vertex` is not a valid float.
    #[error("malformed number `{text}` at token {token_index} (byte offset {offset})")]
    MalformedNumber {
        /// Index the number would have had in the token stream.
        token_index: usize,
        /// Byte offset of the field in the source text.
        offset: usize,
        /// The offending field.
        text: String,
    },

    /// A `normal`/`vertex` record ended before all coordinates were read.
    #[error("truncated record at token {token_index}: expected {expected} numbers, found {found}")]
    TruncatedRecord {
        /// Index of the `normal`/`vertex` keyword token.
        token_index: usize,
        /// Number of coordinates the record needs.
        expected: usize,
        /// Number of coordinates actually present.
        found: usize,
    },

    /// The number of `facet`, `normal` and `vertex` keywords disagree.
    #[error(
        "inconsistent facet count: {facets} facets, {normals} normals, {vertices} vertices \
         (expected {facets} normals and {} vertices)",
        .facets * 3
    )]
    InconsistentFacetCount {
        /// Number of `facet` keywords.
        facets: usize,
        /// Number of `normal` keywords.
        normals: usize,
        /// Number of `vertex` keywords.
        vertices: usize,
    },

    /// Binary STL size does not match `84 + 50 * count`.
    #[error("truncated binary STL: expected {expected} bytes, got {actual}")]
    TruncatedFile {
        /// Size implied by the header's triangle count.
        expected: u64,
        /// Actual size of the input.
        actual: u64,
    },

    /// An OBJ face references a vertex that does not exist.
    #[error("invalid face index {index} on line {line} (file has {vertex_count} vertices)")]
    InvalidFaceIndex {
        /// 1-based line number of the face record.
        line: usize,
        /// The index as written in the file.
        index: i64,
        /// Number of vertices available.
        vertex_count: usize,
    },

    /// An OBJ record could not be parsed.
    #[error("malformed OBJ line {line}: {reason}")]
    MalformedObjLine {
        /// 1-based line number.
        line: usize,
        /// What was wrong with it.
        reason: String,
    },

    /// Triangles and normals have different lengths.
    #[error("inconsistent mesh: {triangles} triangles but {normals} normals")]
    InconsistentMesh {
        /// Number of triangles.
        triangles: usize,
        /// Number of normals.
        normals: usize,
    },

    /// A solid name that cannot be written as a single non-keyword token.
    #[error("invalid solid name `{name}`: {reason}")]
    InvalidSolidName {
        /// The rejected name.
        name: String,
        /// Why it was rejected.
        reason: &'static str,
    },

    /// File not found.
    #[error("file not found: {path}")]
    FileNotFound {
        /// Path that was not found.
        path: PathBuf,
    },

    /// Unknown file format (unrecognized extension).
    #[error("unknown file format: .{extension}")]
    UnknownFormat {
        /// The unrecognized extension.
        extension: String,
    },

    /// Recognized format that this crate cannot read or write.
    #[error("unsupported format: {format}")]
    UnsupportedFormat {
        /// Name of the format.
        format: &'static str,
    },

    /// Invalid file content that fits no more specific variant.
    #[error("invalid file content: {message}")]
    InvalidContent {
        /// Description of what was invalid.
        message: String,
    },

    /// I/O error from the standard library.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// UTF-8 decoding error.
    #[error("UTF-8 decoding error: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    /// String conversion error.
    #[error("string conversion error: {0}")]
    FromUtf8(#[from] std::string::FromUtf8Error),
}

impl IoError {
    /// Create an `InvalidContent` error with the given message.
    #[must_use]
    pub fn invalid_content(message: impl Into<String>) -> Self {
        Self::InvalidContent {
            message: message.into(),
        }
    }

    /// Create a `MalformedObjLine` error.
    #[must_use]
    pub fn malformed_obj(line: usize, reason: impl Into<String>) -> Self {
        Self::MalformedObjLine {
            line,
            reason: reason.into(),
        }
    }

    /// Map an `open`/`read` failure to `FileNotFound` when appropriate.
    pub(crate) fn from_open(err: std::io::Error, path: &std::path::Path) -> Self {
        if err.kind() == std::io::ErrorKind::NotFound {
            Self::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            Self::Io(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_carry_location() {
        let err = IoError::MalformedNumber {
            token_index: 7,
            offset: 42,
            text: "1.0x".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("1.0x"));
        assert!(msg.contains("token 7"));
        assert!(msg.contains("byte offset 42"));
    }

    #[test]
    fn facet_count_message_shows_expectation() {
        let err = IoError::InconsistentFacetCount {
            facets: 2,
            normals: 2,
            vertices: 5,
        };
        assert!(err.to_string().contains("expected 2 normals and 6 vertices"));
    }

    #[test]
    fn solid_name_message_quotes_name() {
        let err = IoError::InvalidSolidName {
            name: "my part".to_string(),
            reason: "contains whitespace",
        };
        assert_eq!(
            err.to_string(),
            "invalid solid name `my part`: contains whitespace"
        );
    }

    #[test]
    fn not_found_maps_to_file_not_found() {
        let io = std::io::Error::from(std::io::ErrorKind::NotFound);
        let err = IoError::from_open(io, std::path::Path::new("missing.stl"));
        assert!(matches!(err, IoError::FileNotFound { .. }));

        let io = std::io::Error::from(std::io::ErrorKind::PermissionDenied);
        let err = IoError::from_open(io, std::path::Path::new("locked.stl"));
        assert!(matches!(err, IoError::Io(_)));
    }
}
