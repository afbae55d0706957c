//! STL (Stereolithography) file format support.
//!
//! Supports both ASCII and binary STL formats. Both decode into the same
//! [`Mesh`], so `decode_binary` followed by `serialize_mesh` converts binary
//! files to text.
//!
//! # Format Detection
//!
//! [`detect_encoding`] decides between the two variants:
//! - binary if the byte length is exactly `84 + 50 * count` for the count
//!   stored after the 80-byte header
//! - otherwise ASCII if the text starts with `solid` (after optional
//!   whitespace)
//! - otherwise binary, so the decoder reports the size mismatch
//!
//! # ASCII Format
//!
//! ```text
//! solid name
//!   facet normal ni nj nk
//!     outer loop
//!       vertex v1x v1y v1z
//!       vertex v2x v2y v2z
//!       vertex v3x v3y v3z
//!     endloop
//!   endfacet
//!   ...
//! endsolid name
//! ```
//!
//! The ASCII path is split into [`tokenize`], [`parse`] and [`serialize`];
//! see [`binary`] for the binary layout.

pub mod binary;
mod parse;
mod token;
mod write;

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use mesh_types::Mesh;

use crate::error::{IoError, IoResult};

pub use binary::{decode_binary, encode_binary, write_binary};
pub use parse::{parse, VertexTriples};
pub use token::{tokenize, Keyword, Token};
pub use write::{
    check_solid_name, serialize, serialize_mesh, serialize_with_options, write_ascii,
    StlWriteOptions,
};

/// The two STL encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StlEncoding {
    /// Whitespace-delimited text starting with `solid`.
    Ascii,
    /// 80-byte header, `u32` count and 50-byte records.
    Binary,
}

/// Guess the encoding of raw STL bytes.
///
/// A binary file whose header happens to start with `solid` is still
/// detected as binary as long as its size matches the stored count.
///
/// # Example
///
/// ```
/// use mesh_io::stl::{detect_encoding, StlEncoding};
///
/// assert_eq!(detect_encoding(b"solid cube\nendsolid cube\n"), StlEncoding::Ascii);
/// assert_eq!(detect_encoding(&[0u8; 84]), StlEncoding::Binary);
/// ```
#[must_use]
pub fn detect_encoding(bytes: &[u8]) -> StlEncoding {
    if let Some(count) = binary::declared_count(bytes) {
        if binary::expected_len(count) == bytes.len() as u64 {
            return StlEncoding::Binary;
        }
    }

    let start = bytes
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .unwrap_or(bytes.len());
    if bytes[start..].starts_with(b"solid") {
        StlEncoding::Ascii
    } else {
        StlEncoding::Binary
    }
}

/// Tokenize and parse STL ASCII text in one step.
///
/// # Errors
///
/// Any error from [`tokenize`] or [`parse`].
pub fn parse_ascii(text: &str) -> IoResult<Mesh> {
    parse(&tokenize(text)?)
}

/// Decode STL bytes of either encoding.
///
/// # Errors
///
/// Returns the decoder's error for the detected encoding, or
/// [`IoError::Utf8`] if ASCII-looking input is not valid UTF-8.
pub fn decode_stl(bytes: &[u8]) -> IoResult<Mesh> {
    match detect_encoding(bytes) {
        StlEncoding::Binary => decode_binary(bytes),
        StlEncoding::Ascii => parse_ascii(std::str::from_utf8(bytes)?),
    }
}

/// Load a mesh from an STL file.
///
/// Automatically detects ASCII vs binary format. The file is read into
/// memory in one pass before decoding.
///
/// # Errors
///
/// Returns an error if:
/// - The file cannot be read ([`IoError::FileNotFound`] if it is missing)
/// - The file content is not valid STL
///
/// # Example
///
/// ```no_run
/// use mesh_io::load_stl;
///
/// let mesh = load_stl("model.stl").unwrap();
/// println!("Loaded {} triangles", mesh.triangle_count());
/// ```
pub fn load_stl<P: AsRef<Path>>(path: P) -> IoResult<Mesh> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|e| IoError::from_open(e, path))?;
    let encoding = detect_encoding(&bytes);

    let mesh = match encoding {
        StlEncoding::Binary => decode_binary(&bytes)?,
        StlEncoding::Ascii => parse_ascii(std::str::from_utf8(&bytes)?)?,
    };

    tracing::info!(
        path = %path.display(),
        ?encoding,
        triangles = mesh.triangle_count(),
        "loaded STL"
    );
    Ok(mesh)
}

/// Save a mesh to an STL file.
///
/// The ASCII variant uses the default [`StlWriteOptions`] and the mesh's
/// stored normals and name; the binary variant drops the name.
///
/// # Errors
///
/// Returns an error if the mesh has mismatched normals, the ASCII variant
/// is given a name [`check_solid_name`] rejects, or the file cannot be
/// written. Invalid names are rejected before the file is created.
pub fn save_stl<P: AsRef<Path>>(mesh: &Mesh, path: P, binary: bool) -> IoResult<()> {
    let path = path.as_ref();
    if !binary {
        check_solid_name(&mesh.name)?;
    }
    let file = File::create(path)?;
    let writer = BufWriter::new(file);

    if binary {
        write_binary(writer, mesh)?;
    } else {
        write_ascii(
            writer,
            &mesh.triangles,
            Some(&mesh.normals),
            &mesh.name,
            &StlWriteOptions::default(),
        )?;
    }

    tracing::info!(
        path = %path.display(),
        binary,
        triangles = mesh.triangle_count(),
        "saved STL"
    );
    Ok(())
}

/// Convert a binary STL file into an ASCII STL file.
///
/// Normals are copied from the binary records unchanged and the output solid
/// is unnamed. Returns the decoded mesh.
///
/// # Errors
///
/// Returns [`IoError::TruncatedFile`] if the input is not a well-sized
/// binary STL, or an I/O error if either file cannot be accessed.
///
/// # Example
///
/// ```no_run
/// use mesh_io::stl::stl_binary_to_text;
///
/// let mesh = stl_binary_to_text("dragon.stl", "dragon-ascii.stl").unwrap();
/// println!("converted {} triangles", mesh.triangle_count());
/// ```
pub fn stl_binary_to_text<P, Q>(input: P, output: Q) -> IoResult<Mesh>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let input = input.as_ref();
    let bytes = std::fs::read(input).map_err(|e| IoError::from_open(e, input))?;
    let mesh = decode_binary(&bytes)?;
    save_stl(&mesh, output, false)?;
    Ok(mesh)
}
