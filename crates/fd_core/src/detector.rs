//! Phase-level formation detection orchestrator.
//!
//! Drives the full kernel for one team over one labeled phase:
//! reference shape → per-frame role assignment → shape averaging and
//! normalization → template matching → ranked top-K candidates. Holds no
//! cross-phase state; every phase is evaluated independently.

use std::cmp::Ordering;

use serde::Serialize;
use tracing::{debug, trace};

use crate::matcher::TemplateMatcher;
use crate::roles::{assign_roles, reference_shape};
use crate::shape::{average_shape, drop_missing, normalize_shape};
use crate::templates::TemplateLibrary;
use crate::trajectory::Trajectory;

/// Default number of ranked candidates returned per phase.
pub const DEFAULT_TOP_K: usize = 5;

/// One ranked formation candidate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormationCandidate {
    pub name: String,
    pub score: f32,
}

impl FormationCandidate {
    /// Degenerate phases produce non-finite scores; those candidates are
    /// ranked last and must not be read as real similarities.
    pub fn is_rankable(&self) -> bool {
        self.score.is_finite()
    }
}

/// Formation detector for play-direction-corrected, goalkeeper-excluded
/// phase trajectories.
#[derive(Debug, Clone)]
pub struct FormationDetector {
    library: TemplateLibrary,
    matcher: TemplateMatcher,
    top_k: usize,
}

impl Default for FormationDetector {
    fn default() -> Self {
        Self::new(TemplateLibrary::builtin().clone())
    }
}

impl FormationDetector {
    pub fn new(library: TemplateLibrary) -> Self {
        Self { library, matcher: TemplateMatcher::default(), top_k: DEFAULT_TOP_K }
    }

    /// Number of candidates to return (default 5).
    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    /// Overrides the empirical similarity scale (default 3.0).
    pub fn with_score_scale(mut self, score_scale: f32) -> Self {
        self.matcher = TemplateMatcher::new(score_scale);
        self
    }

    pub fn library(&self) -> &TemplateLibrary {
        &self.library
    }

    /// Ranks the template library against one phase trajectory.
    ///
    /// Candidates are sorted by descending score with ties broken by
    /// ascending template name; non-finite (unrankable) scores sort after
    /// every finite score, also by name. The list is truncated to top-K but
    /// unrankable entries are kept visible rather than silently dropped.
    pub fn detect(&self, trajectory: &Trajectory) -> Vec<FormationCandidate> {
        let reference = reference_shape(trajectory);
        let solved = assign_roles(trajectory, &reference);
        let scaled = normalize_shape(&average_shape(&solved));
        let query = drop_missing(&scaled);
        debug!(
            frames = trajectory.len(),
            columns = trajectory.columns(),
            query_points = query.len(),
            "detecting formation for phase"
        );

        let mut candidates: Vec<FormationCandidate> = self
            .matcher
            .score_all(&query, &self.library)
            .into_iter()
            .map(|(name, score)| FormationCandidate { name, score })
            .collect();
        for candidate in &candidates {
            trace!(name = %candidate.name, score = candidate.score, "template scored");
        }

        candidates.sort_by(rank_order);
        candidates.truncate(self.top_k);
        candidates
    }
}

/// Descending score, name-ascending tiebreak, non-finite scores last.
fn rank_order(a: &FormationCandidate, b: &FormationCandidate) -> Ordering {
    match (a.is_rankable(), b.is_rankable()) {
        (true, true) => b
            .score
            .partial_cmp(&a.score)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.name.cmp(&b.name)),
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (false, false) => a.name.cmp(&b.name),
    }
}
