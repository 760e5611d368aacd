use tsp_tour_derive::CliValue;

use crate::{
    DistanceMatrix, Error, Point, Result, Tour,
    algo::{
        exact::solve_exact,
        mst::construct_mst_tour,
        two_opt::{self, TwoOptStats},
    },
};

/// Which engine builds the tour.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, CliValue)]
#[cli_value(option = "mode")]
pub enum SolveMode {
    /// Held-Karp, provably optimal, exponential.
    #[default]
    Exact,
    /// MST preorder refined by 2-opt.
    #[cli(alias = "approx")]
    Approximate,
}

impl SolveMode {
    pub fn from_flag(use_approximate: bool) -> Self {
        if use_approximate {
            Self::Approximate
        } else {
            Self::Exact
        }
    }
}

/// A solved tour with the numbers the caller usually wants to log.
#[derive(Clone, Debug)]
pub struct PlannedTour {
    pub mode: SolveMode,
    pub tour: Tour,
    pub points: Vec<Point>,
    pub length: f64,
    /// Length of the MST preorder before 2-opt; `None` for exact solves.
    pub seed_length: Option<f64>,
    pub two_opt: Option<TwoOptStats>,
}

pub(crate) fn validate_points(points: &[Point]) -> Result<()> {
    if let Some((idx, p)) = points.iter().enumerate().find(|(_, p)| !p.is_valid()) {
        return Err(Error::invalid_input(format!(
            "point {idx} has a non-finite coordinate ({}, {})",
            p.x, p.y
        )));
    }
    Ok(())
}

/// Builds a closed tour over `points`. Index 0 is always the start.
///
/// No size limit is applied here: routing large inputs away from
/// [`SolveMode::Exact`] is the caller's job.
#[tsp_tour_derive::timer("planner")]
pub fn plan_tour(points: &[Point], mode: SolveMode) -> Result<PlannedTour> {
    validate_points(points)?;

    let n = points.len();
    let matrix = DistanceMatrix::new(points);

    if n <= 2 {
        let tour = Tour::identity(n);
        return Ok(PlannedTour {
            mode,
            length: tour.length(&matrix),
            points: points.to_vec(),
            tour,
            seed_length: None,
            two_opt: None,
        });
    }

    log::info!("planner: start n={n} mode={mode}");

    let (tour, seed_length, two_opt) = match mode {
        SolveMode::Exact => (solve_exact(&matrix)?, None, None),
        SolveMode::Approximate => {
            let mut tour = construct_mst_tour(&matrix);
            let seed_length = tour.length(&matrix);
            let stats = two_opt::improve(&matrix, &mut tour);
            tour.rotate_to_front(0);
            (tour, Some(seed_length), Some(stats))
        }
    };

    let length = tour.length(&matrix);
    log::info!("planner: complete n={n} mode={mode} length={length:.3}");

    Ok(PlannedTour {
        mode,
        points: tour.points(points),
        tour,
        length,
        seed_length,
        two_opt,
    })
}

/// Points in visiting order; connect the last back to the first to close it.
pub fn solve(points: &[Point], mode: SolveMode) -> Result<Vec<Point>> {
    plan_tour(points, mode).map(|planned| planned.points)
}

pub fn solve_with_flag(points: &[Point], use_approximate: bool) -> Result<Vec<Point>> {
    solve(points, SolveMode::from_flag(use_approximate))
}
