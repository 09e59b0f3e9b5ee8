//! Shape averaging and min-max normalization.
//!
//! Reduces a role-labeled trajectory to one average point per role slot,
//! then rescales each axis independently into [0, 1] so shapes of different
//! pitch extents become comparable to the template library.
//!
//! Normalization is an explicit two-pass operation: first the per-axis
//! statistics over the currently valid points, then the scaling, and only
//! then are still-missing rows dropped. A zero-variance axis (all points
//! collapsed) produces non-finite coordinates; the kernel propagates these
//! so the caller can treat the phase as unrankable.

use crate::pitch::PitchPos;
use crate::trajectory::Trajectory;

/// Average role shape: per-slot mean over the solved trajectory, ignoring
/// missing samples. A role with zero observations yields `None`.
pub fn average_shape(solved: &Trajectory) -> Vec<Option<PitchPos>> {
    solved.column_means()
}

/// Min-max rescaling of each axis to [0, 1] over the non-missing points.
///
/// Missing rows stay missing and keep their slot position. If an axis has
/// min == max the scaled values on that axis are non-finite (NaN or ±inf)
/// by design; see the module docs.
pub fn normalize_shape(shape: &[Option<PitchPos>]) -> Vec<Option<PitchPos>> {
    // Pass 1: statistics over valid points only.
    let mut min_x = f32::INFINITY;
    let mut max_x = f32::NEG_INFINITY;
    let mut min_y = f32::INFINITY;
    let mut max_y = f32::NEG_INFINITY;
    for (x, y) in shape.iter().flatten() {
        min_x = min_x.min(*x);
        max_x = max_x.max(*x);
        min_y = min_y.min(*y);
        max_y = max_y.max(*y);
    }

    // Pass 2: apply the scaling; rows are dropped separately by the caller
    // via `drop_missing`, never interleaved with the scaling itself.
    shape
        .iter()
        .map(|point| {
            point.map(|(x, y)| ((x - min_x) / (max_x - min_x), (y - min_y) / (max_y - min_y)))
        })
        .collect()
}

/// Drops missing rows, keeping the remaining points in role-slot order.
/// Non-finite coordinates are kept: they mark a degenerate shape and must
/// reach the matcher to be flagged as unrankable.
pub fn drop_missing(shape: &[Option<PitchPos>]) -> Vec<PitchPos> {
    shape.iter().flatten().copied().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_average_shape_skips_missing_frames() {
        let solved = Trajectory::from_rows(vec![
            vec![Some((10.0, 20.0)), None],
            vec![Some((30.0, 40.0)), None],
        ])
        .unwrap();
        let shape = average_shape(&solved);
        assert_eq!(shape, vec![Some((20.0, 30.0)), None]);
    }

    #[test]
    fn test_normalize_maps_extremes_to_unit_corners() {
        let shape = vec![Some((0.0, -10.0)), Some((50.0, 10.0)), Some((25.0, 0.0))];
        let scaled = normalize_shape(&shape);
        assert_eq!(scaled[0], Some((0.0, 0.0)));
        assert_eq!(scaled[1], Some((1.0, 1.0)));
        assert_eq!(scaled[2], Some((0.5, 0.5)));
    }

    #[test]
    fn test_normalize_preserves_missing_rows() {
        let shape = vec![Some((0.0, 0.0)), None, Some((10.0, 4.0))];
        let scaled = normalize_shape(&shape);
        assert_eq!(scaled[1], None);
        assert_eq!(drop_missing(&scaled).len(), 2);
    }

    #[test]
    fn test_zero_variance_axis_goes_non_finite() {
        let shape = vec![Some((5.0, 1.0)), Some((5.0, 3.0))];
        let scaled = normalize_shape(&shape);
        let (x0, y0) = scaled[0].unwrap();
        assert!(!x0.is_finite());
        assert_eq!(y0, 0.0);
        // Degenerate rows are still present for the matcher to flag.
        assert_eq!(drop_missing(&scaled).len(), 2);
    }

    #[test]
    fn test_fully_collapsed_shape_goes_non_finite_on_both_axes() {
        let shape = vec![Some((7.0, 7.0)); 4];
        for (x, y) in drop_missing(&normalize_shape(&shape)) {
            assert!(!x.is_finite());
            assert!(!y.is_finite());
        }
    }

    proptest! {
        /// Property: with at least two distinct values per axis, every
        /// scaled coordinate lies in [0, 1].
        #[test]
        fn prop_normalized_coordinates_in_unit_interval(
            points in proptest::collection::vec((-60.0f32..60.0, -40.0f32..40.0), 2..12)
        ) {
            let distinct_x = points.iter().any(|p| p.0 != points[0].0);
            let distinct_y = points.iter().any(|p| p.1 != points[0].1);
            prop_assume!(distinct_x && distinct_y);

            let shape: Vec<Option<(f32, f32)>> = points.into_iter().map(Some).collect();
            for (x, y) in drop_missing(&normalize_shape(&shape)) {
                prop_assert!((0.0..=1.0).contains(&x));
                prop_assert!((0.0..=1.0).contains(&y));
            }
        }
    }
}
