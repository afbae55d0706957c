//! STL ASCII serializer.
//!
//! Coordinates are written with Rust's shortest round-trip representation
//! for `f32` (`{:?}`), so tokenizing the output reproduces the exact same
//! bit patterns.

use std::io::Write;

use mesh_types::{derive_normals, Mesh, Triangle, Vector3};

use super::Keyword;
use crate::error::{IoError, IoResult};

/// Layout options for STL ASCII output.
///
/// # Example
///
/// ```
/// use mesh_io::stl::StlWriteOptions;
///
/// let options = StlWriteOptions::default().indent(4);
/// assert_eq!(options.indent_width, 4);
/// assert!(options.trailing_newline);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StlWriteOptions {
    /// Spaces per nesting level (`facet` is one level deep, `vertex` three).
    pub indent_width: usize,

    /// Whether to terminate the `endsolid` line with a newline.
    pub trailing_newline: bool,
}

impl Default for StlWriteOptions {
    fn default() -> Self {
        Self {
            indent_width: 2,
            trailing_newline: true,
        }
    }
}

impl StlWriteOptions {
    /// Set the indent width.
    #[must_use]
    pub const fn indent(mut self, width: usize) -> Self {
        self.indent_width = width;
        self
    }

    /// Set whether the output ends with a newline.
    #[must_use]
    pub const fn trailing_newline(mut self, enabled: bool) -> Self {
        self.trailing_newline = enabled;
        self
    }
}

/// Render triangles as STL ASCII text.
///
/// When `normals` is `None`, each normal is derived as
/// `(v1 - v0) × (v2 - v0)` and is **not** normalized to unit length.
///
/// # Errors
///
/// Returns [`IoError::InconsistentMesh`] if `normals` is given with a length
/// different from `triangles`, or [`IoError::InvalidSolidName`] if `name`
/// contains whitespace or is a keyword.
///
/// # Example
///
/// ```
/// use mesh_io::stl::serialize;
/// use mesh_types::unit_square;
///
/// let square = unit_square();
/// let text = serialize(&square.triangles, None, "square").unwrap();
///
/// assert!(text.starts_with("solid square\n  facet normal 0.0 0.0 1.0\n    outer loop\n"));
/// assert!(text.ends_with("  endfacet\nendsolid square\n"));
/// ```
pub fn serialize(
    triangles: &[Triangle],
    normals: Option<&[Vector3<f32>]>,
    name: &str,
) -> IoResult<String> {
    serialize_with_options(triangles, normals, name, &StlWriteOptions::default())
}

/// Render a [`Mesh`] as STL ASCII text using its stored normals and name.
///
/// # Errors
///
/// Returns [`IoError::InconsistentMesh`] if the mesh has mismatched
/// triangle and normal counts.
pub fn serialize_mesh(mesh: &Mesh) -> IoResult<String> {
    serialize(&mesh.triangles, Some(&mesh.normals), &mesh.name)
}

/// Render triangles as STL ASCII text with custom layout.
///
/// # Errors
///
/// Same as [`serialize`].
pub fn serialize_with_options(
    triangles: &[Triangle],
    normals: Option<&[Vector3<f32>]>,
    name: &str,
    options: &StlWriteOptions,
) -> IoResult<String> {
    // ~200 bytes per facet with short coordinates
    let mut buf = Vec::with_capacity(64 + triangles.len() * 200);
    write_ascii(&mut buf, triangles, normals, name, options)?;
    Ok(String::from_utf8(buf)?)
}

/// Check that `name` can follow `solid`/`endsolid` and be read back.
///
/// The empty name is valid. Any other name must be a single
/// whitespace-free field that is not an STL keyword.
///
/// # Errors
///
/// Returns [`IoError::InvalidSolidName`] otherwise.
///
/// # Example
///
/// ```
/// use mesh_io::stl::check_solid_name;
///
/// assert!(check_solid_name("bracket_v2").is_ok());
/// assert!(check_solid_name("my part").is_err());
/// assert!(check_solid_name("facet").is_err());
/// ```
pub fn check_solid_name(name: &str) -> IoResult<()> {
    let reason = if name.chars().any(char::is_whitespace) {
        "contains whitespace"
    } else if Keyword::from_field(name).is_some() {
        "is an STL keyword"
    } else {
        return Ok(());
    };
    Err(IoError::InvalidSolidName {
        name: name.to_string(),
        reason,
    })
}

/// Stream STL ASCII text into any writer.
///
/// Nothing is written if the inputs are rejected.
///
/// # Errors
///
/// Returns [`IoError::InconsistentMesh`] for mismatched normals,
/// [`IoError::InvalidSolidName`] if [`check_solid_name`] rejects `name`, or
/// [`IoError::Io`] if the writer fails.
pub fn write_ascii<W: Write>(
    mut writer: W,
    triangles: &[Triangle],
    normals: Option<&[Vector3<f32>]>,
    name: &str,
    options: &StlWriteOptions,
) -> IoResult<()> {
    check_solid_name(name)?;

    let derived;
    let normals = match normals {
        Some(given) if given.len() != triangles.len() => {
            return Err(IoError::InconsistentMesh {
                triangles: triangles.len(),
                normals: given.len(),
            });
        }
        Some(given) => given,
        None => {
            derived = derive_normals(triangles);
            derived.as_slice()
        }
    };

    let pad1 = " ".repeat(options.indent_width);
    let pad2 = pad1.repeat(2);
    let pad3 = pad1.repeat(3);

    write_label(&mut writer, "solid", name)?;
    writeln!(writer)?;

    for (triangle, n) in triangles.iter().zip(normals) {
        writeln!(writer, "{pad1}facet normal {:?} {:?} {:?}", n.x, n.y, n.z)?;
        writeln!(writer, "{pad2}outer loop")?;
        for v in triangle.vertices() {
            writeln!(writer, "{pad3}vertex {:?} {:?} {:?}", v.x, v.y, v.z)?;
        }
        writeln!(writer, "{pad2}endloop")?;
        writeln!(writer, "{pad1}endfacet")?;
    }

    write_label(&mut writer, "endsolid", name)?;
    if options.trailing_newline {
        writeln!(writer)?;
    }
    writer.flush()?;

    Ok(())
}

fn write_label<W: Write>(writer: &mut W, keyword: &str, name: &str) -> IoResult<()> {
    if name.is_empty() {
        write!(writer, "{keyword}")?;
    } else {
        write!(writer, "{keyword} {name}")?;
    }
    Ok(())
}
