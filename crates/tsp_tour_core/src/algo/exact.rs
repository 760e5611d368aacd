use crate::{DistanceMatrix, Error, Result, Tour};

const NO_PARENT: usize = usize::MAX;

/// Held-Karp subset DP. Point 0 is the fixed start; every other point `v` owns
/// bit `v - 1` of the subset mask, so a table slot is `mask * (n - 1) + (v - 1)`
/// and holds the cheapest path `0 -> ... -> v` visiting exactly `mask`.
///
/// Subsets are processed by increasing size. Predecessors are scanned in
/// ascending index and only a strictly smaller cost replaces the incumbent,
/// so the first minimum wins.
///
/// O(n^2 * 2^n) time, O(n * 2^n) memory. The caller decides whether `n` is
/// small enough; a table that cannot be addressed or allocated is reported as
/// an error instead of aborting.
#[tsp_tour_derive::timer("exact")]
pub fn solve_exact(matrix: &DistanceMatrix) -> Result<Tour> {
    let n = matrix.len();
    if n <= 2 {
        return Ok(Tour::identity(n));
    }

    let k = n - 1;
    let subsets = u32::try_from(k)
        .ok()
        .and_then(|bits| 1usize.checked_shl(bits))
        .ok_or_else(|| too_large(n))?;
    let slots = subsets.checked_mul(k).ok_or_else(|| too_large(n))?;

    log::info!("exact: start n={n} states={slots}");

    let mut cost = alloc_table(slots, f64::INFINITY, n)?;
    let mut parent = alloc_table(slots, NO_PARENT, n)?;

    for v in 0..k {
        let slot = (1usize << v) * k + v;
        cost[slot] = matrix.get(0, v + 1);
        parent[slot] = 0;
    }

    for size in 2..=k {
        let mut mask = (1usize << size) - 1;
        while mask < subsets {
            for j in 0..k {
                let bit_j = 1usize << j;
                if mask & bit_j == 0 {
                    continue;
                }
                let prev = mask ^ bit_j;

                let mut best = f64::INFINITY;
                let mut best_p = NO_PARENT;
                for p in 0..k {
                    if prev & (1usize << p) == 0 {
                        continue;
                    }
                    let candidate = cost[prev * k + p] + matrix.get(p + 1, j + 1);
                    if candidate < best {
                        best = candidate;
                        best_p = p + 1;
                    }
                }

                cost[mask * k + j] = best;
                parent[mask * k + j] = best_p;
            }
            mask = next_subset_same_size(mask);
        }
        log::debug!("exact: layer size={size} done");
    }

    let full = subsets - 1;
    let mut best = f64::INFINITY;
    let mut last = NO_PARENT;
    for j in 0..k {
        let closed = cost[full * k + j] + matrix.get(j + 1, 0);
        if closed < best {
            best = closed;
            last = j + 1;
        }
    }
    if last == NO_PARENT {
        return Err(Error::invalid_input(
            "exact solver found no finite tour; distances must be finite",
        ));
    }

    let mut order = Vec::with_capacity(n);
    let mut mask = full;
    let mut v = last;
    while v != 0 {
        order.push(v);
        let p = parent[mask * k + (v - 1)];
        mask ^= 1usize << (v - 1);
        v = p;
    }
    order.push(0);
    order.reverse();

    log::info!("exact: complete n={n} length={best:.3}");

    Ok(Tour::from_order_unchecked(order))
}

/// Gosper's hack: the next larger integer with the same number of set bits.
#[inline]
fn next_subset_same_size(mask: usize) -> usize {
    let lowest = mask & mask.wrapping_neg();
    let ripple = mask + lowest;
    (((ripple ^ mask) >> 2) / lowest) | ripple
}

fn alloc_table<T: Clone>(slots: usize, fill: T, n: usize) -> Result<Vec<T>> {
    let mut table = Vec::new();
    table
        .try_reserve_exact(slots)
        .map_err(|e| Error::invalid_input(format!("{}: {e}", too_large(n))))?;
    table.resize(slots, fill);
    Ok(table)
}

fn too_large(n: usize) -> Error {
    Error::invalid_input(format!(
        "exact solve over {n} points needs a table larger than this machine can address"
    ))
}
