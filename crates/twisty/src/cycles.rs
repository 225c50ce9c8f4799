//! Decomposition of a successor map into disjoint directed cycles.
//!
//! Purpose
//! - Rebuild closed boundary loops from a flat edge set. Each node must have
//!   exactly one outgoing edge once mutually opposite pairs are removed.
//!
//! Notes
//! - Output order follows the first appearance of each cycle's first node in
//!   the input, so results are deterministic for a deterministic input.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::hash::Hash;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleError {
    /// A node has more than one outgoing edge.
    Branching(String),
    /// Following edges from a node leads to a node without an outgoing edge.
    Dangling(String),
}

impl fmt::Display for CycleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CycleError::Branching(n) => write!(f, "node {n} has several successors"),
            CycleError::Dangling(n) => write!(f, "walk from node {n} does not close"),
        }
    }
}

impl std::error::Error for CycleError {}

/// Split the directed edges `(from, to)` into cycles.
///
/// With `cancel_pairs`, every pair `a→b`, `b→a` is removed first (one pair per
/// matching couple of edges).
pub fn decompose_cycles<N>(edges: &[(N, N)], cancel_pairs: bool) -> Result<Vec<Vec<N>>, CycleError>
where
    N: Copy + Eq + Hash + fmt::Debug,
{
    let kept: Vec<(N, N)> = if cancel_pairs {
        cancel_opposite(edges)
    } else {
        edges.to_vec()
    };

    let mut succ: HashMap<N, N> = HashMap::with_capacity(kept.len());
    let mut order: Vec<N> = Vec::with_capacity(kept.len());
    for &(a, b) in &kept {
        if succ.insert(a, b).is_some() {
            return Err(CycleError::Branching(format!("{a:?}")));
        }
        order.push(a);
    }

    let mut seen: HashSet<N> = HashSet::with_capacity(order.len());
    let mut out = Vec::new();
    for &start in &order {
        if seen.contains(&start) {
            continue;
        }
        let mut cycle = vec![start];
        seen.insert(start);
        let mut cur = start;
        loop {
            let nxt = *succ
                .get(&cur)
                .ok_or_else(|| CycleError::Dangling(format!("{start:?}")))?;
            if nxt == start {
                break;
            }
            if !seen.insert(nxt) {
                // joins a cycle through a node already used: two predecessors
                return Err(CycleError::Branching(format!("{nxt:?}")));
            }
            cycle.push(nxt);
            cur = nxt;
        }
        out.push(cycle);
    }
    Ok(out)
}

fn cancel_opposite<N>(edges: &[(N, N)]) -> Vec<(N, N)>
where
    N: Copy + Eq + Hash,
{
    let mut count: HashMap<(N, N), usize> = HashMap::new();
    for &e in edges {
        *count.entry(e).or_insert(0) += 1;
    }
    let mut cancel: HashMap<(N, N), usize> = HashMap::new();
    for (&(a, b), &n) in &count {
        let m = count.get(&(b, a)).copied().unwrap_or(0);
        if a != b {
            cancel.insert((a, b), n.min(m));
        }
    }
    let mut out = Vec::with_capacity(edges.len());
    for &e in edges {
        match cancel.get_mut(&e) {
            Some(k) if *k > 0 => *k -= 1,
            _ => out.push(e),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_cycles_in_input_order() {
        let edges = [(1, 2), (5, 6), (2, 3), (6, 5), (3, 1)];
        let cyc = decompose_cycles(&edges, false).unwrap();
        assert_eq!(cyc, vec![vec![1, 2, 3], vec![5, 6]]);
    }

    #[test]
    fn opposite_pairs_cancel() {
        // square 1-2-3-4 with a spurious back-and-forth 2<->7
        let edges = [(1, 2), (2, 7), (7, 2), (2, 3), (3, 4), (4, 1)];
        let cyc = decompose_cycles(&edges, true).unwrap();
        assert_eq!(cyc, vec![vec![1, 2, 3, 4]]);
    }

    #[test]
    fn self_loop_is_a_cycle() {
        let cyc = decompose_cycles(&[(9, 9)], true).unwrap();
        assert_eq!(cyc, vec![vec![9]]);
    }

    #[test]
    fn branching_and_dangling_are_errors() {
        assert!(matches!(
            decompose_cycles(&[(1, 2), (1, 3), (2, 1), (3, 1)], false),
            Err(CycleError::Branching(_))
        ));
        assert!(matches!(
            decompose_cycles(&[(1, 2), (2, 3)], false),
            Err(CycleError::Dangling(_))
        ));
    }
}
