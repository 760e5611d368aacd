use std::fmt;

/// Planar point. Two points with equal coordinates are interchangeable for
/// distance purposes but may both appear in a point set.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance.
    #[inline]
    pub fn dist(self, rhs: &Self) -> f64 {
        (self.x - rhs.x).hypot(self.y - rhs.y)
    }

    pub(crate) fn is_valid(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut b1 = ryu::Buffer::new();
        let mut b2 = ryu::Buffer::new();
        write!(f, "{},{}", b1.format(self.x), b2.format(self.y))
    }
}

#[cfg(test)]
mod tests {
    use super::Point;

    #[test]
    fn dist_is_euclidean() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(3.0, 4.0);
        assert!((a.dist(&b) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn dist_is_symmetric_and_zero_for_same_point() {
        let a = Point::new(12.5, -3.25);
        let b = Point::new(-7.0, 40.0);

        assert_eq!(a.dist(&b), b.dist(&a));
        assert_eq!(a.dist(&a), 0.0);
    }

    #[test]
    fn coincident_points_have_zero_distance() {
        let a = Point::new(5.0, 5.0);
        let b = Point::new(5.0, 5.0);
        assert_eq!(a.dist(&b), 0.0);
    }

    #[test]
    fn finite_points_are_valid() {
        assert!(Point::new(-1e9, 1e9).is_valid());
        assert!(Point::new(0.0, 0.0).is_valid());
    }

    #[test]
    fn non_finite_points_are_rejected() {
        assert!(!Point::new(f64::NAN, 0.0).is_valid());
        assert!(!Point::new(0.0, f64::INFINITY).is_valid());
        assert!(!Point::new(f64::NEG_INFINITY, 1.0).is_valid());
    }

    #[test]
    fn display_formats_as_x_comma_y() {
        assert_eq!(Point::new(1.5, -2.25).to_string(), "1.5,-2.25");
        assert_eq!(Point::from((10.0, 0.0)).to_string(), "10.0,0.0");
    }
}
