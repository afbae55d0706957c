//! Mesh file I/O.
//!
//! This crate converts triangle meshes between interchange formats:
//!
//! - **STL** (Stereolithography) - ASCII and binary, read and write
//! - **OBJ** (Wavefront) - read only, polygons are fan-triangulated
//! - **JCAD** - recognised by extension, not supported
//!
//! Every decoder produces the same [`Mesh`] value, so any reader can be
//! paired with any writer.
//!
//! # Layer 0 Crate
//!
//! This crate has no GUI or rendering dependencies. A viewer receives the
//! decoded [`Mesh`] and draws it.
//!
//! # Example
//!
//! ```
//! use mesh_io::stl::{parse, serialize, tokenize};
//! use mesh_types::unit_square;
//!
//! let square = unit_square();
//! let text = serialize(&square.triangles, None, "square").unwrap();
//!
//! let mesh = parse(&tokenize(&text).unwrap()).unwrap();
//! assert_eq!(mesh, square);
//! ```
//!
//! # Format Detection
//!
//! The crate can automatically detect file format from extension:
//!
//! ```no_run
//! use mesh_io::{load_mesh, save_mesh};
//!
//! // Format detected from .obj extension
//! let mesh = load_mesh("model.obj").unwrap();
//!
//! // Written as ASCII STL
//! save_mesh(&mesh, "model.stl").unwrap();
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod error;
mod obj;
pub mod stl;

pub use error::{IoError, IoResult};
pub use obj::{load_obj, obj_to_mesh, obj_to_stl};
pub use stl::{load_stl, save_stl, stl_binary_to_text};

use std::path::Path;

use mesh_types::Mesh;

/// Supported mesh file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MeshFormat {
    /// STL (Stereolithography) format.
    /// Supports binary and ASCII variants.
    Stl,
    /// OBJ (Wavefront) format.
    /// Read only; vertices and faces.
    Obj,
    /// JupyterCAD document.
    /// Recognised so callers get a clear error; not readable or writable.
    Jcad,
}

impl MeshFormat {
    /// Detect format from file extension (case-insensitive).
    ///
    /// Returns `None` if the extension is not recognized.
    #[must_use]
    pub fn from_path<P: AsRef<Path>>(path: P) -> Option<Self> {
        let ext = path.as_ref().extension()?.to_str()?.to_lowercase();
        match ext.as_str() {
            "stl" => Some(Self::Stl),
            "obj" => Some(Self::Obj),
            "jcad" => Some(Self::Jcad),
            _ => None,
        }
    }

    /// Get the canonical file extension for this format.
    #[must_use]
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Stl => "stl",
            Self::Obj => "obj",
            Self::Jcad => "jcad",
        }
    }

    /// Human-readable format name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Stl => "STL",
            Self::Obj => "OBJ",
            Self::Jcad => "JCAD",
        }
    }

    fn from_path_or_err(path: &Path) -> IoResult<Self> {
        Self::from_path(path).ok_or_else(|| IoError::UnknownFormat {
            extension: path
                .extension()
                .and_then(|e| e.to_str())
                .unwrap_or("(none)")
                .to_string(),
        })
    }
}

/// Load a mesh from a file, detecting format from extension.
///
/// # Errors
///
/// Returns an error if:
/// - The file format cannot be determined from the extension
/// - The format is recognised but unsupported (JCAD)
/// - The file cannot be read
/// - The file content is invalid for the detected format
///
/// # Example
///
/// ```no_run
/// use mesh_io::load_mesh;
///
/// let mesh = load_mesh("model.stl").unwrap();
/// ```
pub fn load_mesh<P: AsRef<Path>>(path: P) -> IoResult<Mesh> {
    let path = path.as_ref();
    match MeshFormat::from_path_or_err(path)? {
        MeshFormat::Stl => load_stl(path),
        MeshFormat::Obj => load_obj(path),
        format @ MeshFormat::Jcad => Err(IoError::UnsupportedFormat {
            format: format.name(),
        }),
    }
}

/// Save a mesh to a file, detecting format from extension.
///
/// STL output is ASCII; use [`save_stl`] to choose the binary variant.
///
/// # Errors
///
/// Returns an error if:
/// - The file format cannot be determined from the extension
/// - The format cannot be written (OBJ, JCAD)
/// - The file cannot be written
///
/// # Example
///
/// ```no_run
/// use mesh_io::{save_mesh, load_mesh};
///
/// let mesh = load_mesh("input.obj").unwrap();
/// save_mesh(&mesh, "output.stl").unwrap();
/// ```
pub fn save_mesh<P: AsRef<Path>>(mesh: &Mesh, path: P) -> IoResult<()> {
    let path = path.as_ref();
    match MeshFormat::from_path_or_err(path)? {
        MeshFormat::Stl => save_stl(mesh, path, false),
        format @ (MeshFormat::Obj | MeshFormat::Jcad) => Err(IoError::UnsupportedFormat {
            format: format.name(),
        }),
    }
}
