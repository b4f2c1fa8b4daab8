//! The snap resolution adapter.
//!
//! Snap resolution is an upstream stage owned by a collaborator and treated as opaque here. The
//! engine resolves every raw cursor position through it *before* the geometric constraints are
//! applied, and never re-runs it on a constrained position.

/// An upstream snap resolution stage.
pub trait SnapResolve: std::fmt::Debug {
    /// Resolve a raw cursor position to a candidate position, possibly unchanged.
    fn resolve(&self, pos: na::Vector2<f64>) -> na::Vector2<f64>;
}

/// The identity resolution. No snapping.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSnap;

impl SnapResolve for NoSnap {
    fn resolve(&self, pos: na::Vector2<f64>) -> na::Vector2<f64> {
        pos
    }
}

/// Snaps to the nearest crossing of a square grid.
#[derive(Debug, Clone, Copy)]
pub struct GridSnap {
    /// The grid spacing.
    pub spacing: f64,
}

impl GridSnap {
    /// A new grid snapper with the given spacing.
    pub fn new(spacing: f64) -> Self {
        Self { spacing }
    }
}

impl SnapResolve for GridSnap {
    fn resolve(&self, pos: na::Vector2<f64>) -> na::Vector2<f64> {
        if !self.spacing.is_finite() || self.spacing <= 0.0 {
            return pos;
        }
        na::vector![
            (pos[0] / self.spacing).round() * self.spacing,
            (pos[1] / self.spacing).round() * self.spacing
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn grid_snap_rounds_to_nearest_crossing() {
        let snapper = GridSnap::new(10.0);
        assert_relative_eq!(
            snapper.resolve(na::vector![23.0, 14.9]),
            na::vector![20.0, 10.0]
        );
        assert_relative_eq!(
            snapper.resolve(na::vector![-7.0, 5.0]),
            na::vector![-10.0, 10.0]
        );
    }

    #[test]
    fn invalid_spacing_is_identity() {
        let snapper = GridSnap::new(0.0);
        assert_relative_eq!(
            snapper.resolve(na::vector![23.0, 14.9]),
            na::vector![23.0, 14.9]
        );
    }
}
