//! Closed-tour planning over small 2-D point sets.
//! Exact mode runs the Held-Karp subset DP; approximate mode walks a Prim MST
//! in preorder and tightens the result with 2-opt.

mod algo;
mod error;
mod geo;
mod io;
pub mod logging;
mod planner;
mod point;
mod tour;

pub(crate) use io::{options, random};

pub use algo::exact::solve_exact;
pub use algo::mst::{SpanningTree, construct_mst_tour};
pub use algo::two_opt::{TWO_OPT_IMPROVEMENT_EPSILON, TwoOptStats, improve, improve_points};
pub use geo::distance::DistanceMatrix;
pub use error::{Error, Result};
pub use io::input::{load_points, parse_points};
pub use io::options::{LogFormat, LogLevel, SolverOptions};
pub use io::random::RandomPoints;
pub use planner::{PlannedTour, SolveMode, plan_tour, solve, solve_with_flag};
pub use point::Point;
pub use tour::{Tour, TourMetrics};
