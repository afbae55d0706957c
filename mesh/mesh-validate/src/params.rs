//! Tolerances for the diagnostic checks.

/// Parameters for mesh validation.
///
/// # Example
///
/// ```
/// use mesh_validate::ValidationParams;
///
/// // Default: 10% normal length slack, 1e-3 cosine deficit
/// let params = ValidationParams::default();
/// assert!((params.normal_length_tolerance - 0.1).abs() < 1e-12);
///
/// // Tighter tolerances for freshly exported files
/// let strict = ValidationParams::strict();
/// assert!(strict.parallel_tolerance < params.parallel_tolerance);
///
/// // Builder style
/// let serial = ValidationParams::default().with_parallel(false);
/// assert!(!serial.parallel);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationParams {
    /// Allowed deviation of a stored normal's length from 1.
    pub normal_length_tolerance: f64,

    /// Allowed cosine deficit between the stored and geometric normal.
    /// A facet passes when `cos(angle) >= 1 - parallel_tolerance`.
    pub parallel_tolerance: f64,

    /// Relative degeneracy threshold: a facet is degenerate when
    /// `|e1 × e2|² <= degenerate_epsilon · |e1|² · |e2|²`, i.e. the squared
    /// sine of its corner angle is at most this value.
    pub degenerate_epsilon: f64,

    /// Evaluate checks on the rayon thread pool.
    pub parallel: bool,
}

impl Default for ValidationParams {
    fn default() -> Self {
        Self {
            normal_length_tolerance: 0.1,
            parallel_tolerance: 1e-3,
            degenerate_epsilon: f64::EPSILON,
            parallel: true,
        }
    }
}

impl ValidationParams {
    /// Tight tolerances: 1% length slack and ~0.8° angular slack.
    #[must_use]
    pub const fn strict() -> Self {
        Self {
            normal_length_tolerance: 0.01,
            parallel_tolerance: 1e-5,
            degenerate_epsilon: f64::EPSILON,
            parallel: true,
        }
    }

    /// Loose tolerances for scanned or hand-edited meshes.
    #[must_use]
    pub const fn lenient() -> Self {
        Self {
            normal_length_tolerance: 0.25,
            parallel_tolerance: 1e-2,
            degenerate_epsilon: 1e-12,
            parallel: true,
        }
    }

    /// Set the normal length tolerance.
    #[must_use]
    pub const fn with_normal_length_tolerance(mut self, tolerance: f64) -> Self {
        self.normal_length_tolerance = tolerance;
        self
    }

    /// Set the parallel (cosine deficit) tolerance.
    #[must_use]
    pub const fn with_parallel_tolerance(mut self, tolerance: f64) -> Self {
        self.parallel_tolerance = tolerance;
        self
    }

    /// Set the degenerate-normal threshold.
    #[must_use]
    pub const fn with_degenerate_epsilon(mut self, epsilon: f64) -> Self {
        self.degenerate_epsilon = epsilon;
        self
    }

    /// Enable or disable parallel evaluation.
    #[must_use]
    pub const fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}
