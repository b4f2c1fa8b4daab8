// Imports
use serde::{Deserialize, Serialize};

/// Constraints.
///
/// Carries the constrain-modifier flag together with the constraint tuning values.
/// It is handed by value into every builder and session call, single writer is the
/// key tracker of the consuming engine.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default, rename = "constraints")]
pub struct Constraints {
    /// Whether constraints are enabled, i.e. the constrain modifier is held.
    #[serde(rename = "enabled")]
    pub enabled: bool,
    /// The angle snapping step in degrees.
    #[serde(rename = "angle_step_deg")]
    pub angle_step_deg: f64,
    /// The minimum offset magnitude that establishes a direction for the axis lock.
    #[serde(rename = "axis_lock_threshold")]
    pub axis_lock_threshold: f64,
}

impl Default for Constraints {
    fn default() -> Self {
        Self {
            enabled: false,
            angle_step_deg: Self::ANGLE_STEP_DEG_DEFAULT,
            axis_lock_threshold: Self::AXIS_LOCK_THRESHOLD_DEFAULT,
        }
    }
}

impl Constraints {
    /// The default angle snapping step in degrees.
    pub const ANGLE_STEP_DEG_DEFAULT: f64 = 45.0;
    /// The default axis lock threshold.
    pub const AXIS_LOCK_THRESHOLD_DEFAULT: f64 = 5.0;

    /// New constraints with the given enabled state and default tuning.
    pub fn new_w_enabled(enabled: bool) -> Self {
        Self {
            enabled,
            ..Self::default()
        }
    }

    /// Constrain the cursor to an equal-extents position w.r.t. the anchor.
    ///
    /// Passes the cursor through unchanged when disabled.
    pub fn constrain_square(
        &self,
        anchor: na::Vector2<f64>,
        cursor: na::Vector2<f64>,
    ) -> na::Vector2<f64> {
        if !self.enabled {
            return cursor;
        }
        square_constraint(anchor, cursor)
    }

    /// Constrain the cursor to the nearest angle step around the origin.
    ///
    /// Passes the cursor through unchanged when disabled.
    pub fn constrain_angle(
        &self,
        origin: na::Vector2<f64>,
        cursor: na::Vector2<f64>,
    ) -> na::Vector2<f64> {
        if !self.enabled {
            return cursor;
        }
        angle_constraint(origin, cursor, self.angle_step_deg)
    }

    /// Constrain a translation offset to a single axis.
    ///
    /// Passes the offset through unchanged when disabled.
    pub fn constrain_axis_lock(&self, offset: na::Vector2<f64>) -> na::Vector2<f64> {
        if !self.enabled {
            return offset;
        }
        axis_lock_constraint(offset, self.axis_lock_threshold)
    }
}

/// Constrain the cursor so that it spans a square with the anchor.
///
/// The side length is the larger of the two axis deltas, the sign of each axis is preserved
/// independently. `f64::signum()` maps a +0.0 delta to 1.0, so a cursor straight above or besides
/// the anchor still receives the full side length on both axes.
///
/// A zero delta on both axes returns the anchor unchanged, zero-size shapes are rejected by the
/// builders downstream.
pub fn square_constraint(
    anchor: na::Vector2<f64>,
    cursor: na::Vector2<f64>,
) -> na::Vector2<f64> {
    let delta = cursor - anchor;
    if delta[0] == 0.0 && delta[1] == 0.0 {
        return anchor;
    }
    let side = delta[0].abs().max(delta[1].abs());

    anchor + na::vector![side * delta[0].signum(), side * delta[1].signum()]
}

/// Constrain the cursor to the nearest multiple of the given angle step around the origin,
/// preserving the distance between origin and cursor.
///
/// A non-positive or non-finite step, or a cursor equal to the origin, passes the cursor through
/// unchanged.
pub fn angle_constraint(
    origin: na::Vector2<f64>,
    cursor: na::Vector2<f64>,
    step_deg: f64,
) -> na::Vector2<f64> {
    if !step_deg.is_finite() || step_deg <= 0.0 {
        return cursor;
    }
    let delta = cursor - origin;
    let distance = delta.magnitude();
    if distance == 0.0 {
        return cursor;
    }
    let angle_deg = delta[1].atan2(delta[0]).to_degrees();
    let rounded = round_to_nearest_angle(angle_deg, step_deg).to_radians();

    origin + na::vector![rounded.cos(), rounded.sin()] * distance
}

/// Round an angle in degrees to the nearest multiple of the given step.
///
/// The input is normalized into [0, 360) first, a result of 360 wraps to 0. Idempotent.
pub fn round_to_nearest_angle(angle_deg: f64, step_deg: f64) -> f64 {
    let normalized = angle_deg.rem_euclid(360.0);
    let rounded = (normalized / step_deg).round() * step_deg;
    if rounded >= 360.0 {
        0.0
    } else {
        rounded
    }
}

/// Lock a translation offset to the dominant axis.
///
/// While both axis magnitudes are below the threshold no direction is established yet and the
/// offset is returned unchanged. Ties between equal magnitudes lock to the horizontal axis,
/// deterministically.
pub fn axis_lock_constraint(offset: na::Vector2<f64>, threshold: f64) -> na::Vector2<f64> {
    if offset[0].abs() < threshold && offset[1].abs() < threshold {
        return offset;
    }
    if offset[0].abs() >= offset[1].abs() {
        na::vector![offset[0], 0.0]
    } else {
        na::vector![0.0, offset[1]]
    }
}

/// Pull a candidate to an exact distance from the origin, along the direction established by the
/// candidate itself.
///
/// A candidate equal to the origin has no direction and is returned unchanged.
pub fn override_distance(
    origin: na::Vector2<f64>,
    candidate: na::Vector2<f64>,
    distance: f64,
) -> na::Vector2<f64> {
    let delta = candidate - origin;
    let magnitude = delta.magnitude();
    if magnitude == 0.0 {
        return candidate;
    }

    origin + delta * (distance / magnitude)
}
