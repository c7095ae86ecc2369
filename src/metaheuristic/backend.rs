//! Backend capability contract.
//!
//! A backend is any general-purpose combinatorial solver able to minimise
//! route cost given a transition-cost callback over integer costs and a
//! wall-clock budget. The engine only ever asks for one vehicle starting
//! and ending at the depot.

use std::fmt;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::time::Duration;

/// Integer arc cost between two node indices.
pub type CostCallback<'a> = dyn Fn(usize, usize) -> i64 + Send + Sync + 'a;

/// Everything a backend needs to search for a route.
///
/// The request owns its data so the search can run on a worker thread
/// that the caller abandons once the budget expires.
#[derive(Clone)]
pub struct RoutingRequest {
    /// Number of nodes, depot included.
    pub nodes: usize,
    /// Always 1 for this engine.
    pub vehicles: usize,
    pub depot: usize,
    /// Transition cost in the backend's integer domain.
    pub cost: Arc<CostCallback<'static>>,
    /// Hard wall-clock budget for the whole search.
    pub time_limit: Duration,
    /// Upper bound on improvement iterations. 0 = no limit.
    pub max_iterations: usize,
    pub seed: Option<u64>,
    /// Raised by the caller when the budget expires.
    pub cancel: Arc<AtomicBool>,
}

impl fmt::Debug for RoutingRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RoutingRequest")
            .field("nodes", &self.nodes)
            .field("vehicles", &self.vehicles)
            .field("depot", &self.depot)
            .field("time_limit", &self.time_limit)
            .field("max_iterations", &self.max_iterations)
            .field("seed", &self.seed)
            .finish_non_exhaustive()
    }
}

/// A feasible route found by a backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutingSolution {
    /// Node sequence starting and ending at the depot.
    pub route: Vec<usize>,
    /// Route cost in the integer domain.
    pub objective: i64,
}

/// A pluggable combinatorial optimisation backend.
///
/// Returning `None` means no feasible solution was found within the
/// budget; the caller degrades to another strategy. A backend that
/// overruns its budget is abandoned: its late answer is discarded.
pub trait RoutingBackend: Send + Sync + fmt::Debug {
    /// Short identifier used in logs.
    fn name(&self) -> &str;

    fn solve(&self, request: &RoutingRequest) -> Option<RoutingSolution>;
}

/// The backend compiled into this build, if any.
///
/// Called once when an [`Optimizer`](crate::optimizer::Optimizer) is
/// constructed; the answer is passed down rather than re-queried.
pub fn default_backend() -> Option<Arc<dyn RoutingBackend>> {
    #[cfg(feature = "annealing")]
    {
        Some(Arc::new(super::AnnealingBackend::default()))
    }
    #[cfg(not(feature = "annealing"))]
    {
        None
    }
}
