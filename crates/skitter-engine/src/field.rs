#![forbid(unsafe_code)]

//! Distance-driven transform fields.
//!
//! Both fields are pure: they read a pointer position and an element's
//! *initial* box (captured once at setup) and return a proposed transform.
//! Neither consults current transforms; the repulsion output in particular
//! is a proposal that the collision resolver may still correct.
//!
//! # Invariants
//!
//! 1. Repulsion displacement is exactly zero at or beyond the activation
//!    radius, and its magnitude never exceeds the configured maximum push.
//! 2. Repulsion never divides by a near-zero distance: a pointer within
//!    epsilon of the element center produces zero displacement.
//! 3. The scale factor is always within the configured `[min, max]` range,
//!    and is exactly `1.0` when the pointer sits at the base distance.

use skitter_core::geometry::{Point, Rect, Vec2};

/// Distance below which the pointer is treated as sitting on the element
/// center, short-circuiting to zero displacement instead of normalizing a
/// degenerate direction vector.
const DISTANCE_EPSILON: f64 = 1e-6;

// ---------------------------------------------------------------------------
// Repulsion
// ---------------------------------------------------------------------------

/// Tuning for the repulsion field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RepulsionConfig {
    /// Distance within which the field produces nonzero displacement.
    pub activation_radius: f64,
    /// Displacement magnitude as the pointer approaches the center.
    pub max_push: f64,
}

impl Default for RepulsionConfig {
    fn default() -> Self {
        Self {
            activation_radius: 360.0,
            max_push: 540.0,
        }
    }
}

/// Displaces an element away from the pointer, decaying linearly to zero at
/// the activation radius.
#[derive(Debug, Clone, Copy)]
pub struct RepulsionField {
    config: RepulsionConfig,
}

impl RepulsionField {
    /// Create a field with the given tuning.
    #[must_use]
    pub const fn new(config: RepulsionConfig) -> Self {
        Self { config }
    }

    /// Current tuning.
    #[must_use]
    pub const fn config(&self) -> &RepulsionConfig {
        &self.config
    }

    /// Proposed displacement for an element whose rest box is `initial_box`.
    ///
    /// Zero when the pointer is at/beyond the activation radius from the box
    /// center, or within epsilon of it. A non-positive radius disables the
    /// field entirely rather than panicking or dividing by zero.
    #[must_use]
    pub fn displacement(&self, pointer: Point, initial_box: &Rect) -> Vec2 {
        let radius = self.config.activation_radius;
        if radius <= 0.0 {
            return Vec2::ZERO;
        }

        let to_pointer = pointer - initial_box.center();
        let distance = to_pointer.length();
        if distance >= radius || distance <= DISTANCE_EPSILON {
            return Vec2::ZERO;
        }

        let intensity = (radius - distance) / radius;
        let direction = to_pointer.scaled(1.0 / distance);
        direction.scaled(-intensity * self.config.max_push)
    }
}

// ---------------------------------------------------------------------------
// Scale
// ---------------------------------------------------------------------------

/// Tuning for the scale field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleConfig {
    /// Lower clamp for the scale factor.
    pub min_scale: f64,
    /// Upper clamp for the scale factor.
    pub max_scale: f64,
    /// Pointer distance at which the scale is exactly 1.0.
    pub base_distance: f64,
    /// Scale change per unit of distance beyond the base.
    pub sensitivity: f64,
}

impl Default for ScaleConfig {
    fn default() -> Self {
        Self {
            min_scale: 0.7,
            max_scale: 2.5,
            base_distance: 100.0,
            sensitivity: 0.005,
        }
    }
}

impl ScaleConfig {
    /// Clamp a raw factor to the configured range. Bounds are ordered
    /// defensively so a misconfigured `min > max` cannot panic.
    #[must_use]
    pub fn clamped(&self, scale: f64) -> f64 {
        let lo = self.min_scale.min(self.max_scale);
        let hi = self.min_scale.max(self.max_scale);
        scale.clamp(lo, hi)
    }
}

/// Resizes an element by pointer distance: farther pointer, larger element.
#[derive(Debug, Clone, Copy)]
pub struct ScaleField {
    config: ScaleConfig,
}

impl ScaleField {
    /// Create a field with the given tuning.
    #[must_use]
    pub const fn new(config: ScaleConfig) -> Self {
        Self { config }
    }

    /// Current tuning.
    #[must_use]
    pub const fn config(&self) -> &ScaleConfig {
        &self.config
    }

    /// Uniform scale factor for an element whose rest box is `initial_box`.
    ///
    /// Monotonically non-decreasing in pointer distance until clamped.
    #[must_use]
    pub fn scale_for(&self, pointer: Point, initial_box: &Rect) -> f64 {
        let distance = pointer.distance_to(initial_box.center());
        let raw = 1.0 + (distance - self.config.base_distance) * self.config.sensitivity;
        self.config.clamped(raw)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
