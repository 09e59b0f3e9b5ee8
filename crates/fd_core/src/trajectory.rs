//! Frame/trajectory data model for one team over one labeled phase.
//!
//! A trajectory is a T×N grid: T chronologically ordered frames, each with N
//! player columns. A column holds either a valid pitch position or `None`
//! (occluded this frame, or absent from the tracking feed entirely). The
//! goalkeeper is excluded upstream, so N is typically 10 outfield players.
//!
//! Frame order is fixed and never reordered; only the per-frame column
//! assignment changes when frames are re-labeled into role-slot order.

use serde::{Deserialize, Serialize};

use crate::error::{DetectionError, Result};
use crate::pitch::PitchPos;

/// One sampled frame: up to N player positions, missing entries are `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    positions: Vec<Option<PitchPos>>,
}

impl Frame {
    pub fn new(positions: Vec<Option<PitchPos>>) -> Self {
        Self { positions }
    }

    /// Frame with `columns` missing entries.
    pub fn empty(columns: usize) -> Self {
        Self { positions: vec![None; columns] }
    }

    pub fn positions(&self) -> &[Option<PitchPos>] {
        &self.positions
    }

    pub fn get(&self, column: usize) -> Option<PitchPos> {
        self.positions.get(column).copied().flatten()
    }

    pub fn columns(&self) -> usize {
        self.positions.len()
    }

    /// Number of columns with a valid position this frame.
    pub fn present_count(&self) -> usize {
        self.positions.iter().filter(|p| p.is_some()).count()
    }
}

/// Ordered sequence of frames with a uniform column count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trajectory {
    frames: Vec<Frame>,
    columns: usize,
}

impl Trajectory {
    /// Validates that the trajectory is non-empty and every frame has the
    /// same column count.
    pub fn new(frames: Vec<Frame>) -> Result<Self> {
        let columns = frames.first().map(Frame::columns).ok_or(DetectionError::EmptyTrajectory)?;
        for (t, frame) in frames.iter().enumerate() {
            if frame.columns() != columns {
                return Err(DetectionError::RaggedFrame {
                    frame: t,
                    expected: columns,
                    found: frame.columns(),
                });
            }
        }
        Ok(Self { frames, columns })
    }

    /// Convenience constructor from raw rows of optional positions.
    pub fn from_rows(rows: Vec<Vec<Option<PitchPos>>>) -> Result<Self> {
        Self::new(rows.into_iter().map(Frame::new).collect())
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn frame(&self, t: usize) -> &Frame {
        &self.frames[t]
    }

    /// Per-column temporal mean, ignoring missing samples. A column with no
    /// valid sample anywhere yields `None`.
    ///
    /// This is both the reference shape for role assignment (computed over
    /// raw columns) and the average role shape (computed over a solved,
    /// role-ordered trajectory).
    pub fn column_means(&self) -> Vec<Option<PitchPos>> {
        let mut sums = vec![(0.0f64, 0.0f64, 0usize); self.columns];
        for frame in &self.frames {
            for (col, pos) in frame.positions().iter().enumerate() {
                if let Some((x, y)) = pos {
                    sums[col].0 += f64::from(*x);
                    sums[col].1 += f64::from(*y);
                    sums[col].2 += 1;
                }
            }
        }
        sums.into_iter()
            .map(|(sx, sy, n)| {
                if n == 0 {
                    None
                } else {
                    Some(((sx / n as f64) as f32, (sy / n as f64) as f32))
                }
            })
            .collect()
    }

    /// True per column if the column is missing in every frame.
    pub fn structurally_missing(&self) -> Vec<bool> {
        let mut missing = vec![true; self.columns];
        for frame in &self.frames {
            for (col, pos) in frame.positions().iter().enumerate() {
                if pos.is_some() {
                    missing[col] = false;
                }
            }
        }
        missing
    }

    /// Copy of the frame range `[start, end)`, clamped to the trajectory.
    pub fn slice(&self, start: usize, end: usize) -> Result<Trajectory> {
        let end = end.min(self.frames.len());
        let start = start.min(end);
        Trajectory::new(self.frames[start..end].to_vec())
    }

    /// Trajectory rotated by `quarter_turns` right angles around the pitch
    /// center (counter-clockwise for positive turns).
    ///
    /// Used to normalize play direction before detection; tracking feeds
    /// orient teams by half and home/away, so a right-to-left team is
    /// brought to the canonical left-to-right orientation with a half or
    /// quarter turn.
    pub fn rotated(&self, quarter_turns: i32) -> Trajectory {
        let turns = quarter_turns.rem_euclid(4);
        let rotate = |(x, y): PitchPos| -> PitchPos {
            match turns {
                1 => (-y, x),
                2 => (-x, -y),
                3 => (y, -x),
                _ => (x, y),
            }
        };
        let frames = self
            .frames
            .iter()
            .map(|frame| Frame::new(frame.positions().iter().map(|p| p.map(rotate)).collect()))
            .collect();
        Trajectory { frames, columns: self.columns }
    }
}

/// Labeled phase boundaries in match seconds, converted to frame indices
/// with `frame = seconds * framerate + kickoff_offset`, clamped to the
/// available frame range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhaseWindow {
    start_seconds: f32,
    end_seconds: f32,
}

impl PhaseWindow {
    pub fn new(start_seconds: f32, end_seconds: f32) -> Result<Self> {
        if !(start_seconds >= 0.0 && end_seconds > start_seconds) {
            return Err(DetectionError::InvalidPhaseWindow {
                start: start_seconds,
                end: end_seconds,
            });
        }
        Ok(Self { start_seconds, end_seconds })
    }

    pub fn start_seconds(&self) -> f32 {
        self.start_seconds
    }

    pub fn end_seconds(&self) -> f32 {
        self.end_seconds
    }

    /// Frame index range for this window, given the feed framerate, the
    /// kickoff alignment offset (may be negative) and the number of frames
    /// available in the half.
    pub fn frame_range(
        &self,
        framerate: f32,
        kickoff_offset: i64,
        available_frames: usize,
    ) -> std::ops::Range<usize> {
        let to_frame = |seconds: f32| -> usize {
            let frame = (seconds * framerate) as i64 + kickoff_offset;
            frame.clamp(0, available_frames as i64) as usize
        };
        let start = to_frame(self.start_seconds);
        let end = to_frame(self.end_seconds).max(start);
        start..end
    }
}
