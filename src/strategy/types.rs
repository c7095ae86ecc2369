//! Strategy identities, results and selection.

use crate::tour::Tour;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Identity of a tour-construction strategy.
///
/// Declaration order is the fixed priority used to break cost ties:
/// `Exact` beats `Metaheuristic` beats `Greedy`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum StrategyKind {
    /// Brute-force permutation search. Optimal, factorial time.
    Exact,
    /// Time-bounded construction + local-search metaheuristic.
    Metaheuristic,
    /// Nearest-neighbour construction. Always succeeds.
    Greedy,
}

impl StrategyKind {
    /// All strategies in priority order.
    pub const ALL: [StrategyKind; 3] = [
        StrategyKind::Exact,
        StrategyKind::Metaheuristic,
        StrategyKind::Greedy,
    ];

    pub fn name(self) -> &'static str {
        match self {
            StrategyKind::Exact => "exact",
            StrategyKind::Metaheuristic => "metaheuristic",
            StrategyKind::Greedy => "greedy",
        }
    }

    /// Tie-break rank; lower wins.
    pub fn priority(self) -> usize {
        self as usize
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error for unrecognised strategy names.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown strategy `{0}` (expected exact, metaheuristic, greedy or all)")]
pub struct UnknownStrategy(pub String);

impl FromStr for StrategyKind {
    type Err = UnknownStrategy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "exact" | "brute_force" => Ok(StrategyKind::Exact),
            "metaheuristic" | "meta" => Ok(StrategyKind::Metaheuristic),
            "greedy" | "nearest_neighbor" | "nearest_neighbour" => Ok(StrategyKind::Greedy),
            _ => Err(UnknownStrategy(s.to_string())),
        }
    }
}

/// Which strategies a request runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Selection {
    /// Exactly one strategy. Degrades to greedy if it cannot run.
    Single(StrategyKind),
    /// Every strategy whose preconditions hold for the instance.
    #[default]
    AllApplicable,
}

impl From<StrategyKind> for Selection {
    fn from(kind: StrategyKind) -> Self {
        Selection::Single(kind)
    }
}

impl FromStr for Selection {
    type Err = UnknownStrategy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(Selection::AllApplicable);
        }
        s.parse().map(Selection::Single)
    }
}

/// The outcome of one successful strategy invocation.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StrategyResult {
    pub tour: Tour,
    /// Tour cost at the matrix's native precision.
    pub total_cost: f64,
    /// Wall-clock time spent inside the strategy.
    pub elapsed: Duration,
    /// Number of legs in the closed tour (`N`).
    pub stop_count: usize,
}

impl StrategyResult {
    pub fn new(tour: Tour, total_cost: f64, elapsed: Duration) -> Self {
        let stop_count = tour.leg_count();
        Self {
            tour,
            total_cost,
            elapsed,
            stop_count,
        }
    }
}
