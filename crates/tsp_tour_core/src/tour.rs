use crate::{DistanceMatrix, Error, Point, Result};

/// Visiting order over point indices, read as a cycle: the edge from the last
/// index back to the first is implicit. Every index `0..n` appears exactly once.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Tour {
    order: Vec<usize>,
}

impl Tour {
    pub fn identity(n: usize) -> Self {
        Self {
            order: (0..n).collect(),
        }
    }

    /// Checks that `order` is a permutation of `0..order.len()`.
    pub fn from_order(order: Vec<usize>) -> Result<Self> {
        let n = order.len();
        let mut seen = vec![false; n];
        for (pos, &idx) in order.iter().enumerate() {
            if idx >= n {
                return Err(Error::invalid_data(format!(
                    "tour position {pos} refers to index {idx} but only {n} points exist"
                )));
            }
            if seen[idx] {
                return Err(Error::invalid_data(format!(
                    "tour visits index {idx} more than once"
                )));
            }
            seen[idx] = true;
        }
        Ok(Self { order })
    }

    pub(crate) fn from_order_unchecked(order: Vec<usize>) -> Self {
        debug_assert!(Self::from_order(order.clone()).is_ok());
        Self { order }
    }

    pub fn order(&self) -> &[usize] {
        &self.order
    }

    pub(crate) fn order_mut(&mut self) -> &mut [usize] {
        &mut self.order
    }

    /// Rotates the cycle so `idx` is visited first. Edges and length are unchanged.
    pub fn rotate_to_front(&mut self, idx: usize) {
        if let Some(pos) = self.order.iter().position(|&v| v == idx) {
            self.order.rotate_left(pos);
        }
    }

    pub fn into_order(self) -> Vec<usize> {
        self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn length(&self, matrix: &DistanceMatrix) -> f64 {
        matrix.tour_length(&self.order)
    }

    /// Points in visiting order.
    pub fn points(&self, points: &[Point]) -> Vec<Point> {
        self.order.iter().map(|&idx| points[idx]).collect()
    }

    pub fn metrics(&self, matrix: &DistanceMatrix) -> TourMetrics {
        let n = self.len();

        if n < 2 {
            log::info!("metrics: n={n} nothing to report");
            return TourMetrics::default();
        }

        let edges: Vec<f64> = (0..n)
            .map(|i| matrix.get(self.order[i], self.order[(i + 1) % n]))
            .collect();
        let total: f64 = edges.iter().sum();
        let longest = edges.iter().copied().fold(0.0_f64, f64::max);
        let average = total / (n as f64);

        log::info!("metrics: n={n} total={total:.3} longest={longest:.3} avg={average:.3}");

        TourMetrics {
            total,
            longest,
            average,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TourMetrics {
    pub total: f64,
    pub longest: f64,
    pub average: f64,
}
