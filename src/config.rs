//! Voronoi Diagram Configuration and Builder
//!
//! This module provides configuration types for deterministic diagram generation.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Result, VoronoiError};
use crate::generation::DEFAULT_IN_CIRCLE_EPSILON;
use crate::geometry::Rect;

/// Largest accepted site count
pub const MAX_SITE_COUNT: usize = 1_000_000;

/// Largest accepted number of Lloyd iterations
pub const MAX_LLOYD_ITERATIONS: usize = 50;

/// Largest accepted in-circle tolerance
pub const MAX_IN_CIRCLE_EPSILON: f64 = 1e-3;

/// How generated sites are spread over the bounds
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SiteDistribution {
    /// Uniform random positions (irregular cells)
    #[default]
    Random,
    /// One jittered site per grid cell (even coverage, organic look)
    JitteredGrid,
}

impl SiteDistribution {
    /// Get a human-readable name for this distribution
    pub fn name(self) -> &'static str {
        match self {
            SiteDistribution::Random => "Random",
            SiteDistribution::JitteredGrid => "Jittered grid",
        }
    }
}

/// Configuration for deterministic diagram generation
///
/// The same configuration will always produce the identical diagram.
///
/// # Example
///
/// ```rust
/// use rust_voronoi_plane::*;
///
/// let config = DiagramConfigBuilder::new()
///     .seed(42)
///     .site_count(500)
///     .unwrap()
///     .build()
///     .unwrap();
///
/// # #[cfg(feature = "serde")]
/// # {
/// let json = serde_json::to_string(&config).unwrap();
/// let restored: DiagramConfig = serde_json::from_str(&json).unwrap();
/// assert_eq!(config, restored);
/// # }
/// ```
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiagramConfig {
    /// Random seed for site placement
    pub seed: u64,

    /// Number of sites to generate
    pub site_count: usize,

    /// Site placement strategy
    pub distribution: SiteDistribution,

    /// Clip rectangle; generated sites lie inside it
    pub bounds: Rect,

    /// Number of Lloyd's Relaxation iterations
    ///
    /// - 0: Raw distribution (irregular for `Random`)
    /// - 2-3: Decent uniformity
    /// - 10+: Diminishing returns, slower generation
    pub lloyd_iterations: usize,

    /// Convergence threshold for Lloyd's relaxation (fraction of the bounds
    /// diagonal). 0.0 disables early termination.
    pub lloyd_convergence: f64,

    /// Relative tolerance of the in-circle test during triangulation
    pub in_circle_epsilon: f64,
}

impl Default for DiagramConfig {
    fn default() -> Self {
        DiagramConfigBuilder::new().into_config(rand::random())
    }
}

/// Builder for creating DiagramConfig with validation
///
/// # Example
///
/// ```rust
/// use rust_voronoi_plane::*;
///
/// let config = DiagramConfigBuilder::new()
///     .seed(12345)
///     .distribution(SiteDistribution::JitteredGrid)
///     .bounds(Rect::new(0.0, 0.0, 800.0, 600.0))
///     .unwrap()
///     .lloyd_iterations(3)
///     .unwrap()
///     .build()
///     .unwrap();
/// assert_eq!(config.seed, 12345);
/// ```
#[derive(Debug, Clone)]
pub struct DiagramConfigBuilder {
    seed: Option<u64>,
    site_count: usize,
    distribution: SiteDistribution,
    bounds: Rect,
    lloyd_iterations: usize,
    lloyd_convergence: f64,
    in_circle_epsilon: f64,
}

impl DiagramConfigBuilder {
    /// Create a new builder with default values
    ///
    /// Defaults:
    /// - seed: Random
    /// - site_count: 1000
    /// - distribution: Random
    /// - bounds: 1000 × 1000 at the origin
    /// - lloyd_iterations: 2
    /// - lloyd_convergence: 0.001
    /// - in_circle_epsilon: 1e-10
    pub fn new() -> Self {
        Self {
            seed: None,
            site_count: 1000,
            distribution: SiteDistribution::default(),
            bounds: Rect::new(0.0, 0.0, 1000.0, 1000.0),
            lloyd_iterations: 2,
            lloyd_convergence: 0.001,
            in_circle_epsilon: DEFAULT_IN_CIRCLE_EPSILON,
        }
    }

    /// Set the random seed for site generation
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the number of sites
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if count > [`MAX_SITE_COUNT`]
    pub fn site_count(mut self, count: usize) -> Result<Self> {
        if count > MAX_SITE_COUNT {
            return Err(VoronoiError::InvalidConfig(format!(
                "site count must be <= {} (got {})",
                MAX_SITE_COUNT, count
            )));
        }
        self.site_count = count;
        Ok(self)
    }

    pub fn distribution(mut self, distribution: SiteDistribution) -> Self {
        self.distribution = distribution;
        self
    }

    /// Set the clip rectangle
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` unless the rectangle is finite with positive
    /// width and height
    pub fn bounds(mut self, bounds: Rect) -> Result<Self> {
        if !bounds.is_valid() {
            return Err(VoronoiError::InvalidConfig(format!(
                "bounds must be finite with positive extent (got {:?})",
                bounds
            )));
        }
        self.bounds = bounds;
        Ok(self)
    }

    /// Set the number of Lloyd's Relaxation iterations
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if iterations > [`MAX_LLOYD_ITERATIONS`]
    pub fn lloyd_iterations(mut self, iterations: usize) -> Result<Self> {
        if iterations > MAX_LLOYD_ITERATIONS {
            return Err(VoronoiError::InvalidConfig(format!(
                "Lloyd iterations must be <= {} (got {})",
                MAX_LLOYD_ITERATIONS, iterations
            )));
        }
        self.lloyd_iterations = iterations;
        Ok(self)
    }

    /// Set the convergence threshold for Lloyd's relaxation
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if threshold is negative or not finite
    pub fn lloyd_convergence(mut self, threshold: f64) -> Result<Self> {
        if !(threshold >= 0.0 && threshold.is_finite()) {
            return Err(VoronoiError::InvalidConfig(format!(
                "Lloyd convergence threshold must be >= 0 (got {})",
                threshold
            )));
        }
        self.lloyd_convergence = threshold;
        Ok(self)
    }

    /// Set the relative in-circle tolerance
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` unless 0 <= epsilon <= [`MAX_IN_CIRCLE_EPSILON`]
    pub fn in_circle_epsilon(mut self, epsilon: f64) -> Result<Self> {
        if !(0.0..=MAX_IN_CIRCLE_EPSILON).contains(&epsilon) {
            return Err(VoronoiError::InvalidConfig(format!(
                "in-circle epsilon must be in [0, {}] (got {})",
                MAX_IN_CIRCLE_EPSILON, epsilon
            )));
        }
        self.in_circle_epsilon = epsilon;
        Ok(self)
    }

    /// Build the configuration
    ///
    /// If no seed was provided, a random one is drawn.
    pub fn build(self) -> Result<DiagramConfig> {
        let seed = self.seed.unwrap_or_else(rand::random);
        Ok(self.into_config(seed))
    }

    fn into_config(self, seed: u64) -> DiagramConfig {
        DiagramConfig {
            seed,
            site_count: self.site_count,
            distribution: self.distribution,
            bounds: self.bounds,
            lloyd_iterations: self.lloyd_iterations,
            lloyd_convergence: self.lloyd_convergence,
            in_circle_epsilon: self.in_circle_epsilon,
        }
    }
}

impl Default for DiagramConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
