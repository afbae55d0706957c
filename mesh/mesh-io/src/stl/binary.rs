//! Binary STL codec.
//!
//! ```text
//! UINT8[80]    – Header (ignored on read)
//! UINT32       – Number of triangles (little-endian)
//! foreach triangle
//!     REAL32[3] – Normal vector
//!     REAL32[3] – Vertex 1
//!     REAL32[3] – Vertex 2
//!     REAL32[3] – Vertex 3
//!     UINT16    – Attribute byte count (discarded on read, 0 on write)
//! end
//! ```
//!
//! The total size must be exactly `84 + 50 * count` bytes.

use std::io::Write;

use mesh_types::{Mesh, Point3, Triangle, Vector3};

use crate::error::{IoError, IoResult};

/// STL binary header size in bytes.
pub const HEADER_SIZE: usize = 80;

/// Header plus the triangle count.
pub const PREAMBLE_SIZE: usize = HEADER_SIZE + 4;

/// Size of one triangle record (normal + 3 vertices + attribute).
pub const RECORD_SIZE: usize = 50;

const HEADER_TEXT: &[u8] = b"binary STL written by mesh-io";

/// Byte length a binary STL with `count` triangles must have.
#[inline]
#[must_use]
pub fn expected_len(count: u32) -> u64 {
    PREAMBLE_SIZE as u64 + RECORD_SIZE as u64 * u64::from(count)
}

/// Read the triangle count stored after the header, if the input is long
/// enough to hold one.
#[must_use]
pub fn declared_count(bytes: &[u8]) -> Option<u32> {
    let raw = bytes.get(HEADER_SIZE..PREAMBLE_SIZE)?;
    Some(u32::from_le_bytes([raw[0], raw[1], raw[2], raw[3]]))
}

/// Decode a binary STL buffer into a [`Mesh`].
///
/// The header is discarded and the mesh is unnamed.
///
/// # Errors
///
/// Returns [`IoError::TruncatedFile`] if the buffer is shorter than the
/// preamble or its size differs from `84 + 50 * count`.
///
/// # Example
///
/// ```
/// use mesh_io::stl::{decode_binary, encode_binary};
/// use mesh_types::unit_square;
///
/// let bytes = encode_binary(&unit_square()).unwrap();
/// assert_eq!(bytes.len(), 84 + 2 * 50);
///
/// let mesh = decode_binary(&bytes).unwrap();
/// assert_eq!(mesh.triangle_count(), 2);
/// ```
pub fn decode_binary(bytes: &[u8]) -> IoResult<Mesh> {
    let actual = bytes.len() as u64;
    let Some(count) = declared_count(bytes) else {
        return Err(IoError::TruncatedFile {
            expected: PREAMBLE_SIZE as u64,
            actual,
        });
    };

    let expected = expected_len(count);
    if expected != actual {
        return Err(IoError::TruncatedFile { expected, actual });
    }

    let mut mesh = Mesh::with_capacity(count as usize);
    for record in bytes[PREAMBLE_SIZE..].chunks_exact(RECORD_SIZE) {
        let normal = Vector3::from(read_f32x3(&record[0..12]));
        let triangle = Triangle::new(
            Point3::from(read_f32x3(&record[12..24])),
            Point3::from(read_f32x3(&record[24..36])),
            Point3::from(read_f32x3(&record[36..48])),
        );
        mesh.push(triangle, normal);
    }

    tracing::debug!(triangles = count, bytes = actual, "decoded binary STL");
    Ok(mesh)
}

/// Read 3 little-endian `f32`s from 12 bytes.
fn read_f32x3(buf: &[u8]) -> [f32; 3] {
    let x = f32::from_le_bytes([buf[0], buf[1], buf[2], buf[3]]);
    let y = f32::from_le_bytes([buf[4], buf[5], buf[6], buf[7]]);
    let z = f32::from_le_bytes([buf[8], buf[9], buf[10], buf[11]]);
    [x, y, z]
}

/// Encode a [`Mesh`] as binary STL, keeping its stored normals.
///
/// # Errors
///
/// Returns [`IoError::InconsistentMesh`] for mismatched normals, or
/// [`IoError::InvalidContent`] if the mesh has more than `u32::MAX`
/// triangles.
pub fn encode_binary(mesh: &Mesh) -> IoResult<Vec<u8>> {
    let mut buf = Vec::with_capacity(PREAMBLE_SIZE + RECORD_SIZE * mesh.triangle_count());
    write_binary(&mut buf, mesh)?;
    Ok(buf)
}

/// Stream a [`Mesh`] as binary STL into any writer.
///
/// # Errors
///
/// Same as [`encode_binary`], plus [`IoError::Io`] if the writer fails.
pub fn write_binary<W: Write>(mut writer: W, mesh: &Mesh) -> IoResult<()> {
    if !mesh.has_consistent_normals() {
        return Err(IoError::InconsistentMesh {
            triangles: mesh.triangles.len(),
            normals: mesh.normals.len(),
        });
    }
    let count = u32::try_from(mesh.triangle_count()).map_err(|_| {
        IoError::invalid_content(format!(
            "{} triangles exceed the binary STL limit",
            mesh.triangle_count()
        ))
    })?;

    // Write 80-byte header (padded with spaces)
    let mut header = [b' '; HEADER_SIZE];
    header[..HEADER_TEXT.len()].copy_from_slice(HEADER_TEXT);
    writer.write_all(&header)?;
    writer.write_all(&count.to_le_bytes())?;

    for (triangle, normal) in mesh.facets() {
        write_f32x3(&mut writer, [normal.x, normal.y, normal.z])?;
        for v in triangle.vertices() {
            write_f32x3(&mut writer, [v.x, v.y, v.z])?;
        }
        writer.write_all(&0u16.to_le_bytes())?;
    }
    writer.flush()?;

    Ok(())
}

fn write_f32x3<W: Write>(writer: &mut W, values: [f32; 3]) -> IoResult<()> {
    for value in values {
        writer.write_all(&value.to_le_bytes())?;
    }
    Ok(())
}
