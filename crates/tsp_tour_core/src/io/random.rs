use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::{Error, Point, Result, options::SolverOptions};

/// Seeded generator of integer-valued points inside a square canvas, keeping
/// `border` units clear on every side.
#[derive(Debug)]
pub struct RandomPoints {
    low: u32,
    high: u32,
    rng: StdRng,
}

impl RandomPoints {
    pub fn new(canvas_size: u32, border: u32, seed: u64) -> Result<Self> {
        let low = border;
        let high = canvas_size
            .checked_sub(1)
            .and_then(|last| last.checked_sub(border))
            .filter(|&high| high >= low)
            .ok_or_else(|| {
                Error::invalid_input(format!(
                    "canvas size {canvas_size} leaves no room inside a border of {border}"
                ))
            })?;

        Ok(Self {
            low,
            high,
            rng: StdRng::seed_from_u64(seed),
        })
    }

    pub fn from_options(options: &SolverOptions) -> Result<Self> {
        Self::new(options.canvas_size, options.canvas_border, options.seed)
    }

    pub fn next_point(&mut self) -> Point {
        let x = self.rng.random_range(self.low..=self.high);
        let y = self.rng.random_range(self.low..=self.high);
        Point::new(f64::from(x), f64::from(y))
    }

    pub fn generate(&mut self, count: usize) -> Vec<Point> {
        (0..count).map(|_| self.next_point()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::RandomPoints;

    #[test]
    fn points_stay_inside_the_bordered_canvas() {
        let mut generator = RandomPoints::new(400, 5, 1).expect("valid canvas");
        for p in generator.generate(500) {
            assert!((5.0..=394.0).contains(&p.x), "x={}", p.x);
            assert!((5.0..=394.0).contains(&p.y), "y={}", p.y);
            assert_eq!(p.x.fract(), 0.0);
            assert_eq!(p.y.fract(), 0.0);
        }
    }

    #[test]
    fn same_seed_gives_same_points() {
        let a = RandomPoints::new(400, 5, 9).expect("valid").generate(20);
        let b = RandomPoints::new(400, 5, 9).expect("valid").generate(20);
        let c = RandomPoints::new(400, 5, 10).expect("valid").generate(20);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn single_cell_canvas_is_allowed() {
        let mut generator = RandomPoints::new(11, 5, 0).expect("one usable cell");
        assert_eq!(generator.next_point().x, 5.0);
    }

    #[test]
    fn border_wider_than_canvas_is_rejected() {
        let err = RandomPoints::new(10, 5, 0).expect_err("no room");
        assert!(err.to_string().contains("leaves no room"));
        assert!(RandomPoints::new(0, 0, 0).is_err());
    }
}
