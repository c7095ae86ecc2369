//! Greedy nearest-neighbour solver.
//!
//! Starts at the depot, repeatedly moves to the cheapest unvisited stop
//! and finally returns to the depot. O(N²), deterministic, and never
//! fails, which makes it the fallback for every other strategy.
//!
//! # Reference
//!
//! Rosenkrantz, Stearns & Lewis (1977), "An Analysis of Several Heuristics
//! for the Traveling Salesman Problem", *SIAM J. Computing* 6(3), 563-581.

mod runner;

pub use runner::{nearest_neighbor_order, GreedySolver};
