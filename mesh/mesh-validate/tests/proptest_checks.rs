//! Property-based tests for the diagnostic rules.
//!
//! Run with: cargo test -p mesh-validate -- proptest

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]

use mesh_types::{tetrahedron, Mesh, Triangle, Vector3};
use mesh_validate::{diagnose, positive_octant, shared_edge, Rule, ValidationParams};
use proptest::prelude::*;

// =============================================================================
// Strategies
// =============================================================================

fn arb_triangle() -> impl Strategy<Value = Triangle> {
    prop::array::uniform3(prop::array::uniform3(-100.0f32..100.0))
        .prop_map(|[a, b, c]| Triangle::from_arrays(a, b, c))
}

/// Meshes with arbitrary (not necessarily unit or consistent) normals.
fn arb_mesh(max_triangles: usize) -> impl Strategy<Value = Mesh> {
    prop::collection::vec(arb_triangle(), 0..=max_triangles).prop_flat_map(|triangles| {
        let n = triangles.len();
        prop::collection::vec(prop::array::uniform3(-2.0f32..2.0), n).prop_map(move |normals| {
            Mesh::from_parts(
                triangles.clone(),
                normals.into_iter().map(Vector3::from).collect(),
                "random",
            )
        })
    })
}

// =============================================================================
// Property Tests: Bounds
// =============================================================================

proptest! {
    /// Every rule scores within [0, 100].
    #[test]
    fn percentages_are_bounded(mesh in arb_mesh(40)) {
        let report = diagnose(&mesh, &ValidationParams::default()).unwrap();
        for rule in Rule::ALL {
            let pct = report.get(rule);
            prop_assert!((0.0..=100.0).contains(&pct), "{} = {}", rule, pct);
        }
    }

    /// Serial and parallel evaluation agree exactly.
    #[test]
    fn evaluation_mode_does_not_matter(mesh in arb_mesh(40)) {
        let parallel = diagnose(&mesh, &ValidationParams::default()).unwrap();
        let serial = diagnose(&mesh, &ValidationParams::default().with_parallel(false)).unwrap();
        prop_assert_eq!(parallel, serial);
    }

    /// Reversing every triangle's winding keeps edge sharing unchanged.
    #[test]
    fn shared_edge_ignores_direction(mesh in arb_mesh(30)) {
        let params = ValidationParams::default();
        let mut flipped = mesh.clone();
        for t in &mut flipped.triangles {
            *t = t.reversed();
        }
        prop_assert_eq!(
            shared_edge(&mesh, &params).unwrap(),
            shared_edge(&flipped, &params).unwrap()
        );
    }

    /// Shifting a mesh into the positive octant clears that rule.
    #[test]
    fn translated_mesh_is_in_positive_octant(mesh in arb_mesh(30)) {
        let mut shifted = mesh.clone();
        for t in &mut shifted.triangles {
            for v in [&mut t.v0, &mut t.v1, &mut t.v2] {
                v.x += 100.0;
                v.y += 100.0;
                v.z += 100.0;
            }
        }
        prop_assert_eq!(positive_octant(&shifted, &ValidationParams::default()).unwrap(), 0.0);
    }

    /// Exactly one negative scalar among 3n vertex slots scores 100 / (3n).
    #[test]
    fn single_negative_coordinate(n in 1usize..50, pick in any::<prop::sample::Index>()) {
        let mut triangles: Vec<Triangle> = (0..n)
            .map(|_| Triangle::from_arrays([0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]))
            .collect();
        let slot = pick.index(3 * n);
        let t = &mut triangles[slot / 3];
        match slot % 3 {
            0 => t.v0.z = -1.0,
            1 => t.v1.z = -1.0,
            _ => t.v2.z = -1.0,
        }
        let mesh = Mesh::from_triangles(triangles, "");

        let pct = positive_octant(&mesh, &ValidationParams::default()).unwrap();
        #[allow(clippy::cast_precision_loss)]
        let expected = 100.0 / (3 * n) as f64;
        prop_assert!((pct - expected).abs() < 1e-9);
    }
}

// =============================================================================
// Fixed meshes
// =============================================================================

#[test]
fn closed_tetrahedron_has_no_shared_edge_violation() {
    let params = ValidationParams::default();
    assert_eq!(shared_edge(&tetrahedron(), &params).unwrap(), 0.0);
}

#[test]
fn removing_any_face_breaks_shared_edges() {
    let params = ValidationParams::default();
    for removed in 0..4 {
        let mut mesh = tetrahedron();
        mesh.triangles.remove(removed);
        mesh.normals.remove(removed);
        assert!(shared_edge(&mesh, &params).unwrap() > 0.0, "removed face {removed}");
    }
}
