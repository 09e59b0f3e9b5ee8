//! Template matching (Müller-Budack-style shape comparison).
//!
//! Scores a normalized query shape against each template through a second
//! optimal matching: the template is min-max normalized stage-locally, a
//! squared-Euclidean cost matrix pairs query points to template points, and
//! the mean matched cost maps to a similarity score. Point-count mismatches
//! degrade gracefully to min(sizes) pairs; the mean keeps the score
//! insensitive to how many pairs were matched.

use crate::assignment::solve_min_cost;
use crate::pitch::{squared_distance, PitchPos};
use crate::shape::{drop_missing, normalize_shape};
use crate::templates::{Template, TemplateLibrary};

/// Default factor of the `score = 1 - scale * mean_cost` transform.
///
/// Empirical constant inherited from the shape-matching literature; the
/// score is not a probability and may go negative for poor fits.
pub const DEFAULT_SCORE_SCALE: f32 = 3.0;

/// Compares normalized query shapes against formation templates.
#[derive(Debug, Clone, Copy)]
pub struct TemplateMatcher {
    score_scale: f32,
}

impl Default for TemplateMatcher {
    fn default() -> Self {
        Self { score_scale: DEFAULT_SCORE_SCALE }
    }
}

impl TemplateMatcher {
    pub fn new(score_scale: f32) -> Self {
        Self { score_scale }
    }

    pub fn score_scale(&self) -> f32 {
        self.score_scale
    }

    /// Similarity of `query` (already normalized to [0,1] per axis, order
    /// irrelevant) to one template. An identical shape scores 1.0.
    ///
    /// Returns `f32::NAN` when the query is empty or when any query or
    /// normalized-template coordinate is non-finite (degenerate shape);
    /// callers treat NaN as unrankable.
    pub fn score(&self, query: &[PitchPos], template: &Template) -> f32 {
        // Stage-local template normalization; deliberately not cached.
        let wrapped: Vec<Option<PitchPos>> = template.points().iter().copied().map(Some).collect();
        let scaled_template = drop_missing(&normalize_shape(&wrapped));

        let finite = |p: &PitchPos| p.0.is_finite() && p.1.is_finite();
        if query.is_empty()
            || scaled_template.is_empty()
            || !query.iter().all(finite)
            || !scaled_template.iter().all(finite)
        {
            return f32::NAN;
        }

        let costs: Vec<Vec<f32>> = query
            .iter()
            .map(|&q| scaled_template.iter().map(|&t| squared_distance(q, t)).collect())
            .collect();
        let pairs = solve_min_cost(&costs);
        if pairs.is_empty() {
            return f32::NAN;
        }

        let mean_cost: f32 = pairs.iter().map(|p| p.cost).sum::<f32>() / pairs.len() as f32;
        1.0 - self.score_scale * mean_cost
    }

    /// Scores `query` against every template, in library order.
    pub fn score_all(&self, query: &[PitchPos], library: &TemplateLibrary) -> Vec<(String, f32)> {
        library.iter().map(|t| (t.name().to_string(), self.score(query, t))).collect()
    }
}
