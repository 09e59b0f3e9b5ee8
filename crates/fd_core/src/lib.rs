//! # fd_core - Formation-Detection Kernel
//!
//! Classifies a team's on-pitch formation (e.g. "4-2-3-1") from noisy,
//! partially occluded player-tracking coordinates over one labeled phase of
//! continuous play.
//!
//! ## Pipeline
//! - [`roles`]: per-frame role assignment against a time-averaged reference
//!   shape via minimum-cost bipartite matching
//! - [`shape`]: average role shape + per-axis min-max normalization
//! - [`matcher`]: optimal-matching comparison against a formation template
//!   library
//! - [`detector`]: orchestration and top-K candidate ranking
//!
//! The kernel is a pure function of (trajectory, template library) → ranked
//! candidates: single-threaded, no I/O, no cross-phase state. Upstream
//! collaborators handle ingestion, homography, visibility masks, and export;
//! trajectories arrive goalkeeper-excluded and play-direction-corrected
//! (see [`Trajectory::rotated`] and [`PhaseWindow`] for the slicing
//! helpers).

pub mod assignment;
pub mod detector;
pub mod error;
pub mod matcher;
pub mod pitch;
pub mod roles;
pub mod shape;
pub mod templates;
pub mod trajectory;

pub use assignment::{solve_min_cost, MatchedPair, SENTINEL_COST};
pub use detector::{FormationCandidate, FormationDetector, DEFAULT_TOP_K};
pub use error::{DetectionError, Result};
pub use matcher::{TemplateMatcher, DEFAULT_SCORE_SCALE};
pub use pitch::PitchPos;
pub use roles::{assign_roles, reference_shape};
pub use shape::{average_shape, drop_missing, normalize_shape};
pub use templates::{Template, TemplateLibrary};
pub use trajectory::{Frame, PhaseWindow, Trajectory};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
