//! Edge occurrence counting over facet lists.
//!
//! A facet list has no vertex indices, so an edge is identified by the
//! positions of its endpoints. Positions are compared by bit pattern after
//! folding `-0.0` into `0.0`, and the endpoint pair is sorted so that the
//! edge `(a, b)` and its reverse `(b, a)` share one key.

use hashbrown::HashMap;
use mesh_types::{Point3, Triangle};

/// Bit-exact vertex position usable as a hash key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PositionKey([u32; 3]);

impl PositionKey {
    /// Canonical key for a position.
    #[must_use]
    pub fn new(p: &Point3<f32>) -> Self {
        Self([canonical_bits(p.x), canonical_bits(p.y), canonical_bits(p.z)])
    }
}

fn canonical_bits(v: f32) -> u32 {
    // -0.0 == 0.0 geometrically
    if v == 0.0 {
        0
    } else {
        v.to_bits()
    }
}

/// Undirected edge between two positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EdgeKey(PositionKey, PositionKey);

impl EdgeKey {
    /// Build the direction-independent key for the edge `a`-`b`.
    ///
    /// ```
    /// use mesh_validate::EdgeKey;
    /// use mesh_types::Point3;
    ///
    /// let a = Point3::new(0.0, 0.0, 0.0);
    /// let b = Point3::new(1.0, 0.0, 0.0);
    /// assert_eq!(EdgeKey::new(&a, &b), EdgeKey::new(&b, &a));
    /// ```
    #[must_use]
    pub fn new(a: &Point3<f32>, b: &Point3<f32>) -> Self {
        let (ka, kb) = (PositionKey::new(a), PositionKey::new(b));
        if ka <= kb {
            Self(ka, kb)
        } else {
            Self(kb, ka)
        }
    }
}

/// How many times each undirected edge occurs across a set of triangles.
///
/// In a closed, non-degenerate surface every edge occurs exactly twice.
#[derive(Debug, Clone, Default)]
pub struct EdgeCounts {
    counts: HashMap<EdgeKey, u32>,
}

impl EdgeCounts {
    /// Count the three edges of every triangle.
    ///
    /// # Example
    ///
    /// ```
    /// use mesh_validate::EdgeCounts;
    /// use mesh_types::unit_square;
    ///
    /// let counts = EdgeCounts::build(&unit_square().triangles);
    /// assert_eq!(counts.edge_count(), 5); // 4 sides + shared diagonal
    /// assert_eq!(counts.shared_twice_count(), 1);
    /// ```
    #[must_use]
    pub fn build(triangles: &[Triangle]) -> Self {
        let mut counts: HashMap<EdgeKey, u32> = HashMap::with_capacity(triangles.len() * 3 / 2);

        for triangle in triangles {
            for (a, b) in triangle.edges() {
                *counts.entry(EdgeKey::new(&a, &b)).or_default() += 1;
            }
        }

        Self { counts }
    }

    /// Occurrences of the edge `a`-`b` in either direction.
    #[must_use]
    pub fn count(&self, a: &Point3<f32>, b: &Point3<f32>) -> u32 {
        self.counts.get(&EdgeKey::new(a, b)).copied().unwrap_or(0)
    }

    /// Number of distinct edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.counts.len()
    }

    /// Edges shared by exactly two triangles.
    #[must_use]
    pub fn shared_twice_count(&self) -> usize {
        self.counts.values().filter(|&&c| c == 2).count()
    }

    /// Edges used by a single triangle (holes).
    #[must_use]
    pub fn boundary_edge_count(&self) -> usize {
        self.counts.values().filter(|&&c| c == 1).count()
    }

    /// Edges used by more than two triangles.
    #[must_use]
    pub fn non_manifold_edge_count(&self) -> usize {
        self.counts.values().filter(|&&c| c > 2).count()
    }

    /// Edges whose count differs from two.
    #[must_use]
    pub fn violation_count(&self) -> usize {
        self.edge_count() - self.shared_twice_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mesh_types::tetrahedron;

    #[test]
    fn signed_zero_is_one_position() {
        let a = Point3::new(0.0, -0.0, 1.0);
        let b = Point3::new(-0.0, 0.0, 1.0);
        assert_eq!(PositionKey::new(&a), PositionKey::new(&b));
    }

    #[test]
    fn tetrahedron_edges_are_all_shared_twice() {
        let counts = EdgeCounts::build(&tetrahedron().triangles);
        assert_eq!(counts.edge_count(), 6);
        assert_eq!(counts.shared_twice_count(), 6);
        assert_eq!(counts.violation_count(), 0);
    }

    #[test]
    fn open_tetrahedron_has_boundary() {
        let mut triangles = tetrahedron().triangles;
        triangles.pop();
        let counts = EdgeCounts::build(&triangles);

        assert_eq!(counts.edge_count(), 6);
        assert_eq!(counts.boundary_edge_count(), 3);
        assert_eq!(counts.violation_count(), 3);
    }

    #[test]
    fn reversed_edge_is_the_same_edge() {
        let tri = Triangle::from_arrays([0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]);
        let counts = EdgeCounts::build(&[tri, tri.reversed()]);

        assert_eq!(counts.edge_count(), 3);
        assert_eq!(counts.count(&tri.v1, &tri.v0), 2);
    }

    #[test]
    fn non_manifold_edge() {
        let a = [0.0, 0.0, 0.0];
        let b = [1.0, 0.0, 0.0];
        let fan = [
            Triangle::from_arrays(a, b, [0.0, 1.0, 0.0]),
            Triangle::from_arrays(b, a, [0.0, -1.0, 0.0]),
            Triangle::from_arrays(a, b, [0.0, 0.0, 1.0]),
        ];
        let counts = EdgeCounts::build(&fan);
        assert_eq!(counts.non_manifold_edge_count(), 1);
        assert_eq!(counts.count(&Point3::from(a), &Point3::from(b)), 3);
    }

    #[test]
    fn missing_edge_counts_zero() {
        let counts = EdgeCounts::default();
        assert_eq!(counts.count(&Point3::origin(), &Point3::new(1.0, 1.0, 1.0)), 0);
    }
}
