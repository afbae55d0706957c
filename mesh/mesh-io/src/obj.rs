//! Wavefront OBJ import.
//!
//! Only geometry is read: `v` positions and `f` faces. Polygons with more
//! than three corners are fan-triangulated around their first corner, and
//! normals are derived with the same cross-product rule as the STL
//! serializer. Texture coordinates, normals, groups and materials are
//! skipped.
//!
//! # Format
//!
//! ```text
//! # comment
//! o name
//! v x y z [w]
//! f i1 i2 i3 [i4 ...]        (i, i/t, i//n or i/t/n)
//! ```
//!
//! Positive indices are 1-based over all vertices in the file; negative
//! indices count back from the last vertex defined before the face.

use std::path::Path;

use mesh_types::{Mesh, Point3, Triangle};

use crate::error::{IoError, IoResult};
use crate::stl;

/// Records that are valid OBJ but carry nothing this importer reads.
const IGNORED_RECORDS: &[&str] = &[
    "vn", "vt", "vp", "g", "s", "l", "p", "usemtl", "mtllib", "cstype", "deg", "curv", "surf",
];

/// A face whose indices are resolved once every vertex is known.
struct PendingFace {
    line: usize,
    indices: Vec<i64>,
    /// Vertices defined before this face, the base for negative indices.
    defined: usize,
}

/// Convert OBJ text into a [`Mesh`].
///
/// The mesh name is taken from the first `o` record that is a valid solid
/// name (see [`stl::check_solid_name`]), if any.
///
/// # Errors
///
/// - [`IoError::MalformedObjLine`] for a `v` record without three numbers or
///   an `f` record with fewer than three corners or a non-integer index
/// - [`IoError::InvalidFaceIndex`] for index `0` or an index outside the
///   vertex table
///
/// # Example
///
/// ```
/// use mesh_io::obj_to_mesh;
///
/// let obj = "v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nf 1 2 3 4\n";
/// let mesh = obj_to_mesh(obj).unwrap();
///
/// // quad -> (v1, v2, v3) and (v1, v3, v4)
/// assert_eq!(mesh.triangle_count(), 2);
/// ```
pub fn obj_to_mesh(text: &str) -> IoResult<Mesh> {
    let mut positions: Vec<Point3<f32>> = Vec::new();
    let mut faces: Vec<PendingFace> = Vec::new();
    let mut name: Option<String> = None;
    let mut skipped = 0usize;

    for (line_index, raw) in text.lines().enumerate() {
        let line = line_index + 1;
        let mut fields = raw.split_whitespace();
        let Some(tag) = fields.next() else {
            continue;
        };
        if tag.starts_with('#') {
            continue;
        }

        match tag {
            "v" => positions.push(parse_position(line, fields)?),
            "f" => {
                let indices = fields
                    .map(|corner| parse_corner(line, corner))
                    .collect::<IoResult<Vec<_>>>()?;
                if indices.len() < 3 {
                    return Err(IoError::malformed_obj(
                        line,
                        format!("face needs at least 3 corners, found {}", indices.len()),
                    ));
                }
                faces.push(PendingFace {
                    line,
                    indices,
                    defined: positions.len(),
                });
            }
            "o" => match fields.next() {
                Some(object) if name.is_none() => {
                    if stl::check_solid_name(object).is_ok() {
                        name = Some(object.to_string());
                    } else {
                        tracing::warn!(
                            line,
                            object,
                            "OBJ object name is not usable as a solid name"
                        );
                    }
                }
                _ => {}
            },
            other => {
                if !IGNORED_RECORDS.contains(&other) {
                    tracing::warn!(line, record = other, "skipping unknown OBJ record");
                }
                tracing::trace!(line, record = other, "skipped OBJ record");
                skipped += 1;
            }
        }
    }

    let mut triangles = Vec::with_capacity(faces.iter().map(|f| f.indices.len() - 2).sum());
    for face in &faces {
        let corners = face
            .indices
            .iter()
            .map(|&index| resolve_index(face, index, &positions))
            .collect::<IoResult<Vec<_>>>()?;

        // fan around the first corner
        for pair in corners[1..].windows(2) {
            triangles.push(Triangle::new(corners[0], pair[0], pair[1]));
        }
    }

    let mesh = Mesh::from_triangles(triangles, name.unwrap_or_default());
    tracing::debug!(
        vertices = positions.len(),
        faces = faces.len(),
        triangles = mesh.triangle_count(),
        skipped,
        "converted OBJ"
    );
    Ok(mesh)
}

/// Convert OBJ text straight into STL ASCII text.
///
/// `name` overrides the solid name; `None` keeps the OBJ object name.
///
/// # Errors
///
/// Any error from [`obj_to_mesh`].
pub fn obj_to_stl(text: &str, name: Option<&str>) -> IoResult<String> {
    let mesh = obj_to_mesh(text)?;
    let name = name.unwrap_or(&mesh.name);
    stl::serialize(&mesh.triangles, Some(&mesh.normals), name)
}

/// Load a mesh from an OBJ file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not valid OBJ.
///
/// # Example
///
/// ```no_run
/// use mesh_io::load_obj;
///
/// let mesh = load_obj("model.obj").unwrap();
/// println!("Loaded {} triangles", mesh.triangle_count());
/// ```
pub fn load_obj<P: AsRef<Path>>(path: P) -> IoResult<Mesh> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|e| IoError::from_open(e, path))?;
    let mesh = obj_to_mesh(&text)?;
    tracing::info!(
        path = %path.display(),
        triangles = mesh.triangle_count(),
        "loaded OBJ"
    );
    Ok(mesh)
}

fn parse_position<'a>(line: usize, mut fields: impl Iterator<Item = &'a str>) -> IoResult<Point3<f32>> {
    let mut coords = [0.0f32; 3];
    for (axis, slot) in coords.iter_mut().enumerate() {
        let field = fields.next().ok_or_else(|| {
            IoError::malformed_obj(line, format!("vertex needs 3 coordinates, found {axis}"))
        })?;
        *slot = field
            .parse()
            .map_err(|_| IoError::malformed_obj(line, format!("invalid coordinate `{field}`")))?;
    }
    Ok(Point3::from(coords))
}

/// The position index of a face corner (`i`, `i/t`, `i//n` or `i/t/n`).
fn parse_corner(line: usize, corner: &str) -> IoResult<i64> {
    let position = corner.split('/').next().unwrap_or(corner);
    position
        .parse()
        .map_err(|_| IoError::malformed_obj(line, format!("invalid face index `{corner}`")))
}

fn resolve_index(face: &PendingFace, index: i64, positions: &[Point3<f32>]) -> IoResult<Point3<f32>> {
    let resolved = match index {
        1.. => usize::try_from(index - 1).ok(),
        0 => None,
        _ => usize::try_from(index.unsigned_abs())
            .ok()
            .and_then(|back| face.defined.checked_sub(back)),
    };

    resolved
        .and_then(|i| positions.get(i).copied())
        .ok_or(IoError::InvalidFaceIndex {
            line: face.line,
            index,
            vertex_count: positions.len(),
        })
}
