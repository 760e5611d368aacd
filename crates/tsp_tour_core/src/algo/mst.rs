use std::{
    cmp::Ordering,
    collections::{BTreeSet, BinaryHeap},
};

use crate::{DistanceMatrix, Tour};

/// Frontier edge from a tree vertex to a vertex that was outside the tree
/// when the edge was pushed.
#[derive(Clone, Copy, Debug)]
struct Candidate {
    dist: f64,
    from: usize,
    to: usize,
}

impl Eq for Candidate {}

impl PartialEq for Candidate {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

// `BinaryHeap` is a max-heap; reversing every key makes it pop the shortest
// edge first, ties going to the smaller `from` and then the smaller `to`.
impl Ord for Candidate {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .dist
            .total_cmp(&self.dist)
            .then_with(|| other.from.cmp(&self.from))
            .then_with(|| other.to.cmp(&self.to))
    }
}

impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Undirected minimum spanning tree stored as per-vertex neighbor sets.
#[derive(Clone, Debug, Default)]
pub struct SpanningTree {
    adjacency: Vec<BTreeSet<usize>>,
}

impl SpanningTree {
    /// Prim's algorithm over the complete distance graph, rooted at 0.
    pub fn prim(matrix: &DistanceMatrix) -> Self {
        let n = matrix.len();
        let mut adjacency = vec![BTreeSet::new(); n];
        if n < 2 {
            return Self { adjacency };
        }

        let mut visited = vec![false; n];
        let mut heap = BinaryHeap::with_capacity(n);
        let mut remaining = n - 1;

        visited[0] = true;
        push_frontier(&mut heap, matrix, &visited, 0);

        while remaining > 0 {
            let Some(edge) = heap.pop() else {
                break;
            };
            if visited[edge.to] {
                continue;
            }

            adjacency[edge.from].insert(edge.to);
            adjacency[edge.to].insert(edge.from);
            visited[edge.to] = true;
            remaining -= 1;

            push_frontier(&mut heap, matrix, &visited, edge.to);
        }

        Self { adjacency }
    }

    pub fn len(&self) -> usize {
        self.adjacency.len()
    }

    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    pub fn neighbors(&self, v: usize) -> impl DoubleEndedIterator<Item = usize> + '_ {
        self.adjacency[v].iter().copied()
    }

    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().map(BTreeSet::len).sum::<usize>() / 2
    }

    pub fn total_weight(&self, matrix: &DistanceMatrix) -> f64 {
        self.adjacency
            .iter()
            .enumerate()
            .flat_map(|(v, ns)| ns.iter().filter(move |&&u| u > v).map(move |&u| (v, u)))
            .map(|(v, u)| matrix.get(v, u))
            .sum()
    }

    /// Depth-first preorder from `root` with an explicit stack. Neighbors are
    /// pushed in descending order so the smallest index is explored first.
    pub fn preorder(&self, root: usize) -> Vec<usize> {
        let n = self.len();
        let mut order = Vec::with_capacity(n);
        if n == 0 {
            return order;
        }

        let mut visited = vec![false; n];
        let mut stack = vec![root];

        while let Some(v) = stack.pop() {
            if visited[v] {
                continue;
            }
            visited[v] = true;
            order.push(v);
            stack.extend(self.neighbors(v).rev().filter(|&u| !visited[u]));
        }

        order
    }
}

fn push_frontier(
    heap: &mut BinaryHeap<Candidate>,
    matrix: &DistanceMatrix,
    visited: &[bool],
    from: usize,
) {
    heap.extend(
        matrix
            .row(from)
            .iter()
            .enumerate()
            .filter(|&(to, _)| !visited[to])
            .map(|(to, &dist)| Candidate { dist, from, to }),
    );
}

/// MST-preorder tour: a cheap 2-approximation used to seed 2-opt.
#[tsp_tour_derive::timer("mst")]
pub fn construct_mst_tour(matrix: &DistanceMatrix) -> Tour {
    let n = matrix.len();
    if n <= 2 {
        return Tour::identity(n);
    }

    let tree = SpanningTree::prim(matrix);
    log::debug!(
        "mst: n={n} edges={} weight={:.3}",
        tree.edge_count(),
        tree.total_weight(matrix)
    );

    Tour::from_order_unchecked(tree.preorder(0))
}
