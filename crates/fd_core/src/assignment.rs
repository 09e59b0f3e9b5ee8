//! Minimum-cost bipartite matching shared by role assignment and template
//! matching.
//!
//! Thin wrapper over the Hungarian algorithm (`kuhn_munkres_min`). The
//! algorithm needs `Ord` costs, so float costs are scaled to integer
//! micro-units; the final pair costs are reported in the original float
//! scale. Impossible pairings (missing data) must be encoded by the caller
//! as [`SENTINEL_COST`] — a large finite cost, never infinity or NaN — so
//! the matching always completes with min(M, K) pairs. Callers detect
//! meaningless pairs by comparing the pair cost against the sentinel.

use pathfinding::kuhn_munkres::kuhn_munkres_min;
use pathfinding::matrix::Matrix;

/// Large finite cost marking an impossible pairing.
///
/// Far above any real pitch distance (or squared normalized distance), but
/// small enough that a full row of sentinels cannot overflow the scaled
/// integer arithmetic.
pub const SENTINEL_COST: f32 = 1.0e6;

/// Micro-unit scaling applied before integer matching.
const COST_SCALE: f64 = 1.0e6;

/// One matched (source, target) pair with its original float cost.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchedPair {
    pub source: usize,
    pub target: usize,
    pub cost: f32,
}

impl MatchedPair {
    /// Whether this pair carries a real cost rather than the sentinel.
    pub fn is_valid(&self) -> bool {
        self.cost < SENTINEL_COST
    }
}

/// Minimum-total-cost one-to-one matching over an M×K cost matrix.
///
/// Returns min(M, K) pairs, each source and target used at most once,
/// sorted by source index. Non-finite entries are treated as the sentinel.
/// Deterministic for a given matrix; ties between equal-cost matchings are
/// broken by the underlying algorithm and are not guaranteed stable.
pub fn solve_min_cost(costs: &[Vec<f32>]) -> Vec<MatchedPair> {
    let rows = costs.len();
    let cols = costs.first().map_or(0, Vec::len);
    if rows == 0 || cols == 0 {
        return Vec::new();
    }

    let sanitized = |i: usize, j: usize| -> f32 {
        let c = costs[i][j];
        if c.is_finite() {
            c.min(SENTINEL_COST)
        } else {
            SENTINEL_COST
        }
    };

    // kuhn_munkres requires rows <= columns; transpose wide matrices.
    let transposed = rows > cols;
    let (m, k) = if transposed { (cols, rows) } else { (rows, cols) };
    let weights = Matrix::from_fn(m, k, |(i, j)| {
        let c = if transposed { sanitized(j, i) } else { sanitized(i, j) };
        (f64::from(c) * COST_SCALE) as i64
    });

    let (_, targets) = kuhn_munkres_min(&weights);

    let mut pairs: Vec<MatchedPair> = targets
        .into_iter()
        .enumerate()
        .map(|(row, col)| {
            let (source, target) = if transposed { (col, row) } else { (row, col) };
            MatchedPair { source, target, cost: sanitized(source, target) }
        })
        .collect();
    pairs.sort_by_key(|pair| pair.source);
    pairs
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn total_cost(pairs: &[MatchedPair]) -> f32 {
        pairs.iter().map(|p| p.cost).sum()
    }

    /// Exhaustive minimum over all one-to-one matchings of a square matrix.
    fn brute_force_min(costs: &[Vec<f32>]) -> f32 {
        fn recurse(costs: &[Vec<f32>], row: usize, used: &mut Vec<bool>) -> f32 {
            if row == costs.len() {
                return 0.0;
            }
            let mut best = f32::INFINITY;
            for col in 0..used.len() {
                if !used[col] {
                    used[col] = true;
                    best = best.min(costs[row][col] + recurse(costs, row + 1, used));
                    used[col] = false;
                }
            }
            best
        }
        recurse(costs, 0, &mut vec![false; costs[0].len()])
    }

    #[test]
    fn test_simple_diagonal_matching() {
        let costs = vec![
            vec![1.0, 10.0, 10.0],
            vec![10.0, 1.0, 10.0],
            vec![10.0, 10.0, 1.0],
        ];
        let pairs = solve_min_cost(&costs);
        assert_eq!(pairs.len(), 3);
        for pair in &pairs {
            assert_eq!(pair.source, pair.target);
            assert_eq!(pair.cost, 1.0);
        }
    }

    #[test]
    fn test_crossed_costs_force_swap() {
        let costs = vec![vec![10.0, 1.0], vec![1.0, 10.0]];
        let pairs = solve_min_cost(&costs);
        assert_eq!(pairs[0].target, 1);
        assert_eq!(pairs[1].target, 0);
        assert_eq!(total_cost(&pairs), 2.0);
    }

    #[test]
    fn test_wide_matrix_covers_all_sources() {
        let costs = vec![vec![5.0, 1.0, 9.0, 2.0], vec![1.0, 5.0, 9.0, 2.0]];
        let pairs = solve_min_cost(&costs);
        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[0].source, 0);
        assert_eq!(pairs[1].source, 1);
        assert_eq!(total_cost(&pairs), 2.0);
    }

    #[test]
    fn test_tall_matrix_covers_all_targets() {
        let costs = vec![
            vec![8.0, 3.0],
            vec![1.0, 7.0],
            vec![4.0, 4.0],
        ];
        let pairs = solve_min_cost(&costs);
        assert_eq!(pairs.len(), 2);
        let mut targets: Vec<usize> = pairs.iter().map(|p| p.target).collect();
        targets.sort_unstable();
        assert_eq!(targets, vec![0, 1]);
        assert_eq!(total_cost(&pairs), 4.0);
    }

    #[test]
    fn test_sentinel_entries_still_matched_but_flagged() {
        let costs = vec![
            vec![SENTINEL_COST, SENTINEL_COST],
            vec![2.0, 1.0],
        ];
        let pairs = solve_min_cost(&costs);
        assert_eq!(pairs.len(), 2);
        assert!(!pairs[0].is_valid());
        assert!(pairs[1].is_valid());
    }

    #[test]
    fn test_non_finite_entries_treated_as_sentinel() {
        let costs = vec![vec![f32::NAN, 1.0], vec![1.0, f32::INFINITY]];
        let pairs = solve_min_cost(&costs);
        assert_eq!(total_cost(&pairs), 2.0);
        assert!(pairs.iter().all(MatchedPair::is_valid));
    }

    #[test]
    fn test_empty_matrix() {
        assert!(solve_min_cost(&[]).is_empty());
        assert!(solve_min_cost(&[vec![], vec![]]).is_empty());
    }

    proptest! {
        /// Property: the solver never beats nor loses to exhaustive search
        /// on small square matrices.
        #[test]
        fn prop_matches_brute_force_on_3x3(
            flat in proptest::collection::vec(0.0f32..100.0, 9)
        ) {
            let costs: Vec<Vec<f32>> =
                flat.chunks(3).map(<[f32]>::to_vec).collect();
            let pairs = solve_min_cost(&costs);
            prop_assert_eq!(pairs.len(), 3);
            let best = brute_force_min(&costs);
            prop_assert!((total_cost(&pairs) - best).abs() < 1e-2);
        }

        /// Property: each source and target is used at most once.
        #[test]
        fn prop_matching_is_one_to_one(
            rows in 1usize..5,
            cols in 1usize..5,
            seed in proptest::collection::vec(0.0f32..50.0, 25)
        ) {
            let costs: Vec<Vec<f32>> = (0..rows)
                .map(|i| (0..cols).map(|j| seed[i * 5 + j]).collect())
                .collect();
            let pairs = solve_min_cost(&costs);
            prop_assert_eq!(pairs.len(), rows.min(cols));
            let mut sources: Vec<usize> = pairs.iter().map(|p| p.source).collect();
            let mut targets: Vec<usize> = pairs.iter().map(|p| p.target).collect();
            sources.sort_unstable();
            sources.dedup();
            targets.sort_unstable();
            targets.dedup();
            prop_assert_eq!(sources.len(), pairs.len());
            prop_assert_eq!(targets.len(), pairs.len());
        }
    }
}
