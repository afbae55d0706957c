//! The four diagnostic rules.
//!
//! Every check is a pure function of an immutable [`Mesh`] returning a
//! violation percentage in `[0, 100]`. An empty mesh scores `0.0` on every
//! rule. A mesh whose normal count differs from its triangle count is
//! rejected before anything is computed.

use mesh_types::{Mesh, Triangle, Vector3};
use rayon::prelude::*;

use crate::edges::EdgeCounts;
use crate::error::{ValidateError, ValidateResult};
use crate::params::ValidationParams;

/// `100 * count / total`, or `0.0` when there is nothing to measure.
#[allow(clippy::cast_precision_loss)]
pub(crate) fn percent(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        100.0 * count as f64 / total as f64
    }
}

/// Sum `per_facet` over all facet indices, on the thread pool if requested.
fn sum_facets<F>(n: usize, parallel: bool, per_facet: F) -> usize
where
    F: Fn(usize) -> usize + Sync + Send,
{
    if parallel {
        (0..n).into_par_iter().map(per_facet).sum()
    } else {
        (0..n).map(per_facet).sum()
    }
}

/// Positive-octant rule: every vertex coordinate should be non-negative.
///
/// Each triangle contributes three vertex slots, `3n` in total; a slot is a
/// violation when any of its coordinates is negative. `-0.0` is not
/// negative.
///
/// # Errors
///
/// Returns [`ValidateError::InconsistentMesh`] for mismatched normals.
///
/// # Example
///
/// ```
/// use mesh_validate::{positive_octant, ValidationParams};
/// use mesh_types::{Mesh, Triangle};
///
/// let tri = Triangle::from_arrays([0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, -1.0, 0.0]);
/// let mesh = Mesh::from_triangles(vec![tri], "");
///
/// let pct = positive_octant(&mesh, &ValidationParams::default()).unwrap();
/// assert!((pct - 100.0 / 3.0).abs() < 1e-9);
/// ```
pub fn positive_octant(mesh: &Mesh, params: &ValidationParams) -> ValidateResult<f64> {
    ValidateError::check_consistent(mesh)?;
    let n = mesh.triangle_count();

    let negative = sum_facets(n, params.parallel, |i| {
        mesh.triangles[i]
            .vertices()
            .iter()
            .filter(|v| v.x < 0.0 || v.y < 0.0 || v.z < 0.0)
            .count()
    });

    Ok(percent(negative, 3 * n))
}

/// Orientation rule: stored normals are unit length and follow the
/// right-hand rule.
///
/// A facet passes when both hold, computed in `f64`:
/// - `| |s| - 1 | <= normal_length_tolerance`
/// - `s · g >= (1 - parallel_tolerance) |s| |g|`, where `g` is the
///   geometric normal `(v1 - v0) × (v2 - v0)`
///
/// A facet with `|g|² <= degenerate_epsilon · |v1 - v0|² · |v2 - v0|²`
/// (squared sine of the corner angle at `v0`) cannot be oriented and counts
/// as a violation. The test is relative, so it does not depend on the
/// triangle's scale.
///
/// # Errors
///
/// Returns [`ValidateError::InconsistentMesh`] for mismatched normals.
pub fn orientation(mesh: &Mesh, params: &ValidationParams) -> ValidateResult<f64> {
    ValidateError::check_consistent(mesh)?;
    let n = mesh.triangle_count();

    let failing = sum_facets(n, params.parallel, |i| {
        usize::from(!facet_is_oriented(&mesh.triangles[i], &mesh.normals[i], params))
    });

    Ok(percent(failing, n))
}

fn facet_is_oriented(triangle: &Triangle, normal: &Vector3<f32>, params: &ValidationParams) -> bool {
    let stored: Vector3<f64> = normal.cast();
    let stored_len = stored.norm();
    // NaN lengths fail both comparisons
    let length_ok = (stored_len - 1.0).abs() <= params.normal_length_tolerance;
    if !length_ok {
        return false;
    }

    let [v0, v1, v2] = triangle.vertices().map(|v| v.cast::<f64>());
    let (e1, e2) = (v1 - v0, v2 - v0);
    let geometric = e1.cross(&e2);
    let geometric_sq = geometric.norm_squared();
    let non_degenerate =
        geometric_sq > params.degenerate_epsilon * e1.norm_squared() * e2.norm_squared();
    if !non_degenerate {
        return false;
    }

    stored.dot(&geometric) >= (1.0 - params.parallel_tolerance) * stored_len * geometric_sq.sqrt()
}

/// Shared-edge rule: every undirected edge belongs to exactly two triangles.
///
/// Returns the percentage of distinct edges whose occurrence count is not
/// two. Edges are matched by endpoint position, independent of direction.
///
/// # Errors
///
/// Returns [`ValidateError::InconsistentMesh`] for mismatched normals.
///
/// `params` is unused; it keeps the signature the same as the other three
/// checks so [`Rule::evaluate`](crate::Rule::evaluate) can dispatch uniformly.
///
/// # Example
///
/// ```
/// use mesh_validate::{shared_edge, ValidationParams};
/// use mesh_types::tetrahedron;
///
/// let params = ValidationParams::default();
/// assert_eq!(shared_edge(&tetrahedron(), &params).unwrap(), 0.0);
/// ```
pub fn shared_edge(mesh: &Mesh, _params: &ValidationParams) -> ValidateResult<f64> {
    ValidateError::check_consistent(mesh)?;

    let counts = EdgeCounts::build(&mesh.triangles);
    tracing::debug!(
        edges = counts.edge_count(),
        boundary = counts.boundary_edge_count(),
        non_manifold = counts.non_manifold_edge_count(),
        "counted edges"
    );

    Ok(percent(counts.violation_count(), counts.edge_count()))
}

/// Ascending rule: barycenter heights never decrease in facet order.
///
/// Counts adjacent pairs `(i, i + 1)` with `z[i] > z[i + 1]` over the
/// `n - 1` pairs compared. Meshes with fewer than two triangles score
/// `0.0`.
///
/// # Errors
///
/// Returns [`ValidateError::InconsistentMesh`] for mismatched normals.
pub fn ascending_barycenter(mesh: &Mesh, params: &ValidationParams) -> ValidateResult<f64> {
    ValidateError::check_consistent(mesh)?;
    let n = mesh.triangle_count();
    if n < 2 {
        return Ok(0.0);
    }

    let heights: Vec<f64> = mesh.triangles.iter().map(Triangle::barycenter_z).collect();
    let descending = if params.parallel {
        heights.par_windows(2).filter(|w| w[0] > w[1]).count()
    } else {
        heights.windows(2).filter(|w| w[0] > w[1]).count()
    };

    Ok(percent(descending, n - 1))
}
