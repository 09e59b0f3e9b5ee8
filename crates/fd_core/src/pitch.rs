//! Pitch coordinate types and distance helpers.
//!
//! All kernel inputs are pitch-relative meters with the pitch center at the
//! origin, x along the length of the pitch (negative = own half) and y along
//! the width. Play direction is expected to be normalized to left-to-right
//! by the caller (or via [`crate::Trajectory::rotated`]) before detection.

/// Position in pitch-relative meters.
/// - `.0` = x, along the pitch length
/// - `.1` = y, along the pitch width
pub type PitchPos = (f32, f32);

/// Standard pitch dimensions in meters.
pub mod field {
    pub const LENGTH_M: f32 = 105.0;
    pub const WIDTH_M: f32 = 68.0;
}

/// Euclidean distance between two positions.
pub fn distance(a: PitchPos, b: PitchPos) -> f32 {
    squared_distance(a, b).sqrt()
}

/// Squared Euclidean distance between two positions.
pub fn squared_distance(a: PitchPos, b: PitchPos) -> f32 {
    let dx = b.0 - a.0;
    let dy = b.1 - a.1;
    dx * dx + dy * dy
}
