//! Closed tours.
//!
//! A [`Tour`] over `N` points is a sequence of `N + 1` point indices that
//! starts and ends at the depot (index `0`) and visits every stop
//! `1..N` exactly once in between. For `N == 1` the tour is `[0, 0]`.

use crate::error::TourError;
use crate::matrix::ValidatedMatrix;

/// The depot index.
pub const DEPOT: usize = 0;

/// A validated closed tour.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "Vec<usize>", into = "Vec<usize>"))]
pub struct Tour {
    order: Vec<usize>,
}

/// One edge of a tour with its cost.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Leg {
    /// 1-based position of the destination in the visiting order.
    pub order: usize,
    pub from: usize,
    pub to: usize,
    pub cost: f64,
}

impl Tour {
    /// Validates a closed visiting sequence.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_tour::tour::Tour;
    ///
    /// let tour = Tour::new(vec![0, 2, 1, 0]).unwrap();
    /// assert_eq!(tour.point_count(), 3);
    /// assert_eq!(tour.stops(), &[2, 1]);
    /// assert!(Tour::new(vec![0, 1, 1, 0]).is_err());
    /// ```
    pub fn new(order: Vec<usize>) -> Result<Self, TourError> {
        let len = order.len();
        if len < 2 {
            return Err(TourError::Length {
                points: len.saturating_sub(1),
                expected: len.saturating_sub(1) + 1,
                len,
            });
        }
        let points = len - 1;
        if order[0] != DEPOT || order[points] != DEPOT {
            return Err(TourError::Depot);
        }

        let mut seen = vec![false; points];
        for &stop in &order[1..points] {
            if stop == DEPOT || stop >= points || seen[stop] {
                return Err(TourError::Stop(stop));
            }
            seen[stop] = true;
        }
        Ok(Self { order })
    }

    /// Builds the closed tour `[0, stops..., 0]`.
    pub fn from_stops(stops: &[usize]) -> Result<Self, TourError> {
        let mut order = Vec::with_capacity(stops.len() + 2);
        order.push(DEPOT);
        order.extend_from_slice(stops);
        order.push(DEPOT);
        Self::new(order)
    }

    /// The unoptimized reference tour `[0, 1, ..., N-1, 0]`.
    ///
    /// # Panics
    ///
    /// Panics if `points == 0`.
    pub fn naive(points: usize) -> Self {
        assert!(points > 0, "a tour needs at least the depot");
        let mut order: Vec<usize> = (0..points).collect();
        order.push(DEPOT);
        Self { order }
    }

    /// The full visiting sequence, depot at both ends.
    pub fn order(&self) -> &[usize] {
        &self.order
    }

    /// Stops between the two depot visits.
    pub fn stops(&self) -> &[usize] {
        &self.order[1..self.order.len() - 1]
    }

    /// Number of points covered, depot included.
    pub fn point_count(&self) -> usize {
        self.order.len() - 1
    }

    /// Number of legs in the closed tour.
    pub fn leg_count(&self) -> usize {
        self.order.len() - 1
    }

    /// Total cost under `matrix`.
    pub fn cost(&self, matrix: &ValidatedMatrix) -> f64 {
        matrix.path_cost(&self.order)
    }

    /// Per-edge breakdown under `matrix`.
    pub fn legs(&self, matrix: &ValidatedMatrix) -> Vec<Leg> {
        self.order
            .windows(2)
            .enumerate()
            .map(|(i, w)| Leg {
                order: i + 1,
                from: w[0],
                to: w[1],
                cost: matrix.get(w[0], w[1]),
            })
            .collect()
    }

    pub fn into_vec(self) -> Vec<usize> {
        self.order
    }
}

impl TryFrom<Vec<usize>> for Tour {
    type Error = TourError;

    fn try_from(order: Vec<usize>) -> Result<Self, Self::Error> {
        Tour::new(order)
    }
}

impl From<Tour> for Vec<usize> {
    fn from(tour: Tour) -> Self {
        tour.order
    }
}

impl std::fmt::Display for Tour {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, p) in self.order.iter().enumerate() {
            if i > 0 {
                f.write_str(" -> ")?;
            }
            write!(f, "{p}")?;
        }
        Ok(())
    }
}
