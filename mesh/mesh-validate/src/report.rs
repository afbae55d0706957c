//! Combined diagnostics over all four rules.

use std::fmt;

use mesh_types::Mesh;

use crate::checks::{ascending_barycenter, orientation, positive_octant, shared_edge};
use crate::error::{ValidateError, ValidateResult};
use crate::params::ValidationParams;

/// One of the diagnostic rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rule {
    /// All vertex coordinates are non-negative.
    PositiveOctant,
    /// Normals are unit length and follow the right-hand rule.
    Orientation,
    /// Every edge is shared by exactly two triangles.
    SharedEdge,
    /// Barycenter heights are non-decreasing in facet order.
    AscendingBarycenter,
}

impl Rule {
    /// Every rule, in report order.
    pub const ALL: [Self; 4] = [
        Self::PositiveOctant,
        Self::Orientation,
        Self::SharedEdge,
        Self::AscendingBarycenter,
    ];

    /// Short human-readable name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::PositiveOctant => "positive octant",
            Self::Orientation => "orientation",
            Self::SharedEdge => "shared edge",
            Self::AscendingBarycenter => "ascending",
        }
    }

    /// Run this rule's check.
    ///
    /// # Errors
    ///
    /// Returns [`ValidateError::InconsistentMesh`] for mismatched normals.
    pub fn evaluate(self, mesh: &Mesh, params: &ValidationParams) -> ValidateResult<f64> {
        match self {
            Self::PositiveOctant => positive_octant(mesh, params),
            Self::Orientation => orientation(mesh, params),
            Self::SharedEdge => shared_edge(mesh, params),
            Self::AscendingBarycenter => ascending_barycenter(mesh, params),
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Violation percentages for every rule.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DiagnosticReport {
    /// Solid name of the checked mesh.
    pub name: String,
    /// Number of triangles checked.
    pub triangle_count: usize,
    /// Positive-octant violation percentage.
    pub positive_octant: f64,
    /// Orientation violation percentage.
    pub orientation: f64,
    /// Shared-edge violation percentage.
    pub shared_edge: f64,
    /// Ascending-barycenter violation percentage.
    pub ascending_barycenter: f64,
}

impl DiagnosticReport {
    /// Violation percentage for one rule.
    #[must_use]
    pub const fn get(&self, rule: Rule) -> f64 {
        match rule {
            Rule::PositiveOctant => self.positive_octant,
            Rule::Orientation => self.orientation,
            Rule::SharedEdge => self.shared_edge,
            Rule::AscendingBarycenter => self.ascending_barycenter,
        }
    }

    /// Rules with a non-zero violation percentage.
    pub fn violations(&self) -> impl Iterator<Item = (Rule, f64)> + '_ {
        Rule::ALL
            .into_iter()
            .map(|rule| (rule, self.get(rule)))
            .filter(|&(_, pct)| pct > 0.0)
    }

    /// Whether every rule is fully satisfied.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.violations().next().is_none()
    }
}

impl fmt::Display for DiagnosticReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = if self.name.is_empty() {
            "(unnamed)"
        } else {
            self.name.as_str()
        };
        writeln!(f, "Diagnostic Report: {name} ({} triangles)", self.triangle_count)?;
        for rule in Rule::ALL {
            writeln!(f, "  {:<16} rule % = {:.3}", rule.name(), self.get(rule))?;
        }
        Ok(())
    }
}

/// Run all four rules over a mesh.
///
/// With `params.parallel` the rules run concurrently on the rayon pool; the
/// mesh is only read.
///
/// # Errors
///
/// Returns [`ValidateError::InconsistentMesh`] for mismatched normals.
///
/// # Example
///
/// ```
/// use mesh_validate::{diagnose, Rule, ValidationParams};
/// use mesh_types::unit_square;
///
/// let report = diagnose(&unit_square(), &ValidationParams::default()).unwrap();
/// assert_eq!(report.get(Rule::PositiveOctant), 0.0);
/// assert_eq!(report.get(Rule::SharedEdge), 80.0); // open surface
/// assert!(!report.is_clean());
/// ```
pub fn diagnose(mesh: &Mesh, params: &ValidationParams) -> ValidateResult<DiagnosticReport> {
    ValidateError::check_consistent(mesh)?;

    let ((positive_octant, orientation), (shared_edge, ascending_barycenter)) = if params.parallel {
        rayon::join(
            || {
                rayon::join(
                    || Rule::PositiveOctant.evaluate(mesh, params),
                    || Rule::Orientation.evaluate(mesh, params),
                )
            },
            || {
                rayon::join(
                    || Rule::SharedEdge.evaluate(mesh, params),
                    || Rule::AscendingBarycenter.evaluate(mesh, params),
                )
            },
        )
    } else {
        (
            (
                Rule::PositiveOctant.evaluate(mesh, params),
                Rule::Orientation.evaluate(mesh, params),
            ),
            (
                Rule::SharedEdge.evaluate(mesh, params),
                Rule::AscendingBarycenter.evaluate(mesh, params),
            ),
        )
    };

    let report = DiagnosticReport {
        name: mesh.name.clone(),
        triangle_count: mesh.triangle_count(),
        positive_octant: positive_octant?,
        orientation: orientation?,
        shared_edge: shared_edge?,
        ascending_barycenter: ascending_barycenter?,
    };

    tracing::info!(
        name = %report.name,
        triangles = report.triangle_count,
        positive_octant = report.positive_octant,
        orientation = report.orientation,
        shared_edge = report.shared_edge,
        ascending = report.ascending_barycenter,
        "diagnosed mesh"
    );
    Ok(report)
}
