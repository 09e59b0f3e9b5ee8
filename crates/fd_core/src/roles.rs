//! Per-frame role assignment (Bialkowski-style role recovery).
//!
//! Raw tracking columns have no tactical meaning: column 3 is whichever
//! player the feed put there, and noise or occlusion makes columns swap
//! around. This stage re-labels every frame against a reference shape (the
//! per-column temporal mean) so that slot *i* of the output always means
//! "the player currently occupying reference position *i*". The same raw
//! player may drift between role slots across frames; that is accepted
//! behavior, not a defect.

use tracing::debug;

use crate::assignment::{solve_min_cost, SENTINEL_COST};
use crate::pitch::{distance, PitchPos};
use crate::trajectory::{Frame, Trajectory};

/// Reference shape for role assignment: the per-column temporal mean of the
/// raw trajectory, ignoring missing samples.
pub fn reference_shape(trajectory: &Trajectory) -> Vec<Option<PitchPos>> {
    trajectory.column_means()
}

/// Re-labels every frame of `trajectory` into role-slot order against
/// `reference`, minimizing total positional displacement per frame.
///
/// Columns that are missing in every frame, or that have no reference
/// point, are structurally excluded: their slots stay missing in every
/// output frame. Momentarily occluded positions enter the matching at
/// sentinel cost and come out as missing slots. Output slot *i* corresponds
/// to reference point *i* for the whole trajectory.
///
/// Degenerate input (fewer than 2 usable reference points) yields an
/// entirely missing trajectory of the same shape; tolerated, never fatal.
pub fn assign_roles(trajectory: &Trajectory, reference: &[Option<PitchPos>]) -> Trajectory {
    let columns = trajectory.columns();
    let absent = trajectory.structurally_missing();

    // Columns usable as role slots: present somewhere and with a reference.
    let active: Vec<usize> = (0..columns)
        .filter(|&c| !absent[c] && reference.get(c).copied().flatten().is_some())
        .collect();

    let blank: Vec<Frame> = (0..trajectory.len()).map(|_| Frame::empty(columns)).collect();
    if active.len() < 2 {
        debug!(
            usable = active.len(),
            columns, "degenerate role assignment input, emitting missing trajectory"
        );
        return Trajectory::new(blank).expect("blank trajectory matches input length");
    }

    let targets: Vec<PitchPos> = active
        .iter()
        .map(|&c| reference[c].expect("active columns have a reference point"))
        .collect();

    // Result buffer sized upfront; each frame is solved independently.
    let mut solved = blank;
    for (t, frame) in trajectory.frames().iter().enumerate() {
        let costs: Vec<Vec<f32>> = targets
            .iter()
            .map(|&target| {
                active
                    .iter()
                    .map(|&c| match frame.get(c) {
                        Some(pos) => distance(pos, target),
                        None => SENTINEL_COST,
                    })
                    .collect()
            })
            .collect();

        let mut positions = vec![None; columns];
        for pair in solve_min_cost(&costs).iter().filter(|pair| pair.is_valid()) {
            // Row = role slot (reference point), column = raw player column.
            positions[active[pair.source]] = frame.get(active[pair.target]);
        }
        solved[t] = Frame::new(positions);
    }

    Trajectory::new(solved).expect("solved trajectory matches input length")
}
