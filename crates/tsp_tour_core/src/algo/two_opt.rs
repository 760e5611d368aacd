use crate::{DistanceMatrix, Point, Tour};

/// Minimum gain for a reversal to count. Keeps near-equal swaps from
/// flipping back and forth forever.
pub const TWO_OPT_IMPROVEMENT_EPSILON: f64 = 1e-8;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TwoOptStats {
    pub passes: usize,
    pub swaps: usize,
}

/// Every segment `[start, end)` of length `n - 2` down to 2, shortest starts
/// first within a length. Longer segments only swap an edge with itself.
fn segments(n: usize) -> impl Iterator<Item = (usize, usize)> {
    (2..=n.saturating_sub(2))
        .rev()
        .flat_map(move |len| (0..=n - len).map(move |start| (start, start + len)))
}

/// For tour `[.., A, B, .., C, D, ..]` with `B..=C` at positions `start..end`,
/// reverse `B..=C` when `AC + BD` beats `AB + CD` by more than epsilon.
fn try_reverse_segment(
    matrix: &DistanceMatrix,
    tour: &mut [usize],
    start: usize,
    end: usize,
) -> bool {
    let n = tour.len();
    let a = tour[(start + n - 1) % n];
    let b = tour[start];
    let c = tour[end - 1];
    let d = tour[end % n];

    let current = matrix.get(a, b) + matrix.get(c, d);
    let proposal = matrix.get(a, c) + matrix.get(b, d);
    if current > proposal + TWO_OPT_IMPROVEMENT_EPSILON {
        tour[start..end].reverse();
        return true;
    }
    false
}

/// Full first-improvement sweeps until a sweep applies no reversal. The result
/// is 2-opt optimal: no single segment reversal shortens it further.
#[tsp_tour_derive::timer("2opt")]
pub fn improve(matrix: &DistanceMatrix, tour: &mut Tour) -> TwoOptStats {
    let order = tour.order_mut();
    let n = order.len();
    let mut stats = TwoOptStats::default();

    if n < 4 {
        log::debug!("2opt: skip n={n} reason=no_segments");
        return stats;
    }

    loop {
        stats.passes += 1;
        let mut pass_swaps = 0usize;

        for (start, end) in segments(n) {
            if try_reverse_segment(matrix, order, start, end) {
                pass_swaps += 1;
            }
        }

        stats.swaps += pass_swaps;
        log::debug!("2opt: pass={} swaps={pass_swaps}", stats.passes);

        if pass_swaps == 0 {
            break;
        }
    }

    log::info!(
        "2opt: complete n={n} passes={} swaps={}",
        stats.passes,
        stats.swaps
    );
    stats
}

/// Point-level convenience: 2-opt a visiting order given as points.
pub fn improve_points(points: &[Point]) -> Vec<Point> {
    let matrix = DistanceMatrix::new(points);
    let mut tour = Tour::identity(points.len());
    improve(&matrix, &mut tour);
    tour.rotate_to_front(0);
    tour.points(points)
}
