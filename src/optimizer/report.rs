//! Comparison reports.

use crate::error::SolveError;
use crate::strategy::{StrategyKind, StrategyResult};
use crate::tour::Tour;
use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

/// One requested strategy and what actually produced its result.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StrategyRun {
    pub requested: StrategyKind,
    /// Equal to `requested` unless the run degraded.
    pub used: StrategyKind,
    /// For a substituted run, `result.elapsed` spans the failed attempt
    /// and the fallback together.
    pub result: StrategyResult,
    /// Why `requested` did not produce `result`, if it didn't.
    pub degradation: Option<SolveError>,
}

impl StrategyRun {
    /// Returns `true` if another strategy answered in place of the requested one.
    pub fn is_substituted(&self) -> bool {
        self.requested != self.used
    }
}

/// A strategy that was not attempted because its preconditions failed.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkippedStrategy {
    pub strategy: StrategyKind,
    pub reason: SolveError,
}

/// Savings of the best tour against the naive index-order tour.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SavingsSummary {
    pub naive_cost: f64,
    pub best_cost: f64,
    /// `naive_cost - best_cost`.
    pub absolute_saving: f64,
    /// `absolute_saving / naive_cost * 100`.
    pub percentage_saving: f64,
}

impl SavingsSummary {
    /// Returns `None` when the naive tour costs nothing.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_tour::optimizer::SavingsSummary;
    ///
    /// let s = SavingsSummary::compute(20.0, 15.0).unwrap();
    /// assert_eq!(s.absolute_saving, 5.0);
    /// assert_eq!(s.percentage_saving, 25.0);
    /// assert!(SavingsSummary::compute(0.0, 0.0).is_none());
    /// ```
    pub fn compute(naive_cost: f64, best_cost: f64) -> Option<Self> {
        if naive_cost <= 0.0 {
            return None;
        }
        let absolute_saving = naive_cost - best_cost;
        Some(Self {
            naive_cost,
            best_cost,
            absolute_saving,
            percentage_saving: absolute_saving / naive_cost * 100.0,
        })
    }
}

/// Everything one optimization request produced.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ComparisonReport {
    /// Runs keyed by the requested strategy.
    pub runs: BTreeMap<StrategyKind, StrategyRun>,
    /// Strategies left out of an all-applicable request.
    pub skipped: Vec<SkippedStrategy>,
    /// Key into `runs` of the lowest-cost run.
    pub best: StrategyKind,
    /// The index-order reference tour.
    pub naive_tour: Tour,
    /// Absent when the naive tour costs nothing.
    pub savings: Option<SavingsSummary>,
    /// Wall-clock time for the whole request.
    pub elapsed: Duration,
}

impl ComparisonReport {
    /// The winning run.
    pub fn best_run(&self) -> &StrategyRun {
        &self.runs[&self.best]
    }

    pub fn best_result(&self) -> &StrategyResult {
        &self.best_run().result
    }

    pub fn best_tour(&self) -> &Tour {
        &self.best_result().tour
    }

    pub fn best_cost(&self) -> f64 {
        self.best_result().total_cost
    }

    pub fn get(&self, strategy: StrategyKind) -> Option<&StrategyRun> {
        self.runs.get(&strategy)
    }

    /// Runs answered by a different strategy than requested.
    pub fn substitutions(&self) -> impl Iterator<Item = &StrategyRun> {
        self.runs.values().filter(|run| run.is_substituted())
    }
}

/// Selects the winning key: lowest cost, then genuine over substituted
/// runs, then fixed strategy priority.
pub(crate) fn select_best(runs: &BTreeMap<StrategyKind, StrategyRun>) -> Option<StrategyKind> {
    runs.values()
        .min_by(|a, b| {
            a.result
                .total_cost
                .total_cmp(&b.result.total_cost)
                .then(a.is_substituted().cmp(&b.is_substituted()))
                .then(a.used.priority().cmp(&b.used.priority()))
                .then(a.requested.priority().cmp(&b.requested.priority()))
        })
        .map(|run| run.requested)
}

impl fmt::Display for ComparisonReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let best = self.best_run();
        writeln!(f, "Route optimization summary")?;
        writeln!(f, "  stops:          {}", self.naive_tour.point_count() - 1)?;
        writeln!(f, "  best strategy:  {}", best.used)?;
        writeln!(f, "  total cost:     {:.2}", best.result.total_cost)?;
        writeln!(f, "  compute time:   {:.2}s", best.result.elapsed.as_secs_f64())?;
        writeln!(f, "  stop count:     {}", best.result.stop_count)?;
        writeln!(f, "  tour:           {}", best.result.tour)?;

        if let Some(s) = &self.savings {
            writeln!(f, "Savings")?;
            writeln!(f, "  naive tour:     {:.2}", s.naive_cost)?;
            writeln!(f, "  optimized tour: {:.2}", s.best_cost)?;
            writeln!(
                f,
                "  saving:         {:.2} ({:.2}%)",
                s.absolute_saving, s.percentage_saving
            )?;
        }

        writeln!(f, "Strategies")?;
        for run in self.runs.values() {
            write!(f, "  {:<14} {:.2}", run.requested.name(), run.result.total_cost)?;
            if let Some(reason) = &run.degradation {
                write!(f, " (answered by {}: {reason})", run.used)?;
            }
            writeln!(f)?;
        }
        for skipped in &self.skipped {
            writeln!(f, "  {:<14} skipped: {}", skipped.strategy.name(), skipped.reason)?;
        }
        Ok(())
    }
}
