use crate::Point;

/// Dense symmetric table of pairwise Euclidean distances, stored row-major in
/// one flat buffer. Built once per solve and never mutated afterwards.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DistanceMatrix {
    n: usize,
    data: Vec<f64>,
}

impl DistanceMatrix {
    pub fn new(points: &[Point]) -> Self {
        let n = points.len();
        let mut data = vec![0.0; n * n];

        for i in 0..n {
            for j in (i + 1)..n {
                let d = points[i].dist(&points[j]);
                data[i * n + j] = d;
                data[j * n + i] = d;
            }
        }

        Self { n, data }
    }

    pub fn len(&self) -> usize {
        self.n
    }

    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.data[i * self.n + j]
    }

    /// Length of `order` treated as a closed cycle.
    pub fn tour_length(&self, order: &[usize]) -> f64 {
        let n = order.len();
        if n < 2 {
            return 0.0;
        }
        (0..n)
            .map(|i| self.get(order[i], order[(i + 1) % n]))
            .sum()
    }

    pub fn row(&self, i: usize) -> &[f64] {
        &self.data[i * self.n..(i + 1) * self.n]
    }
}

#[cfg(test)]
mod tests {
    use super::DistanceMatrix;
    use crate::Point;

    fn square() -> Vec<Point> {
        vec![
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(1.0, 1.0),
            Point::new(0.0, 1.0),
        ]
    }

    #[test]
    fn empty_and_single_point_sets_are_valid() {
        let empty = DistanceMatrix::new(&[]);
        assert!(empty.is_empty());
        assert_eq!(empty.tour_length(&[]), 0.0);

        let single = DistanceMatrix::new(&[Point::new(3.0, 4.0)]);
        assert_eq!(single.len(), 1);
        assert_eq!(single.get(0, 0), 0.0);
        assert_eq!(single.tour_length(&[0]), 0.0);
    }

    #[test]
    fn entries_are_symmetric_with_zero_diagonal() {
        let points = vec![
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(0.0, 10.0),
            Point::new(-3.5, 7.25),
        ];
        let matrix = DistanceMatrix::new(&points);

        for i in 0..points.len() {
            assert_eq!(matrix.get(i, i), 0.0);
            for j in 0..points.len() {
                assert_eq!(matrix.get(i, j), matrix.get(j, i));
                assert!((matrix.get(i, j) - points[i].dist(&points[j])).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn tour_length_closes_cycle() {
        let matrix = DistanceMatrix::new(&square());
        assert!((matrix.tour_length(&[0, 1, 2, 3]) - 4.0).abs() < 1e-12);
        let crossed = 2.0 + 2.0 * 2f64.sqrt();
        assert!((matrix.tour_length(&[0, 2, 1, 3]) - crossed).abs() < 1e-12);
    }

    #[test]
    fn two_point_tour_counts_both_directions() {
        let matrix = DistanceMatrix::new(&[Point::new(0.0, 0.0), Point::new(0.0, 2.0)]);
        assert!((matrix.tour_length(&[0, 1]) - 4.0).abs() < 1e-12);
    }

    #[test]
    fn row_matches_get() {
        let matrix = DistanceMatrix::new(&square());
        let row = matrix.row(2);
        assert_eq!(row.len(), 4);
        assert!((row[0] - 2f64.sqrt()).abs() < 1e-12);
        assert_eq!(row[2], 0.0);
    }
}
