//! Cycle finding over the trimmed edge set (spec.md §4.F): insert edges
//! one at a time into a `cuckoo: node -> node` forest, path-walking
//! from each new edge's endpoints and splicing whenever the edge
//! extends the forest rather than closing a cycle.
//!
//! A naive walk that requires every node in a connected component to
//! have exactly degree 2 fails on real post-trim residue: the 2-core
//! left after trimming is not generally a clean disjoint union of
//! cycles, it is a graph that may still have nodes of degree > 2 (the
//! teacher's own `cpp_cycle_finder.rs` backtracks through a node's
//! *entire* connection list for exactly this reason). The incremental
//! path-walk-and-splice algorithm below tolerates that: a node with
//! extra incident edges just means more than one forest edge touches
//! it, which the forest representation (each node points to at most
//! one "parent") handles without assuming 2-regularity up front. Only
//! the final reported cycle needs to be 2-regular.
//!
//! The forest is a sparse `HashMap` rather than a dense array sized to
//! the whole node space (spec.md §9's design note): after trimming,
//! only a small fraction of the node space is still referenced, so a
//! dense table would be almost entirely wasted allocation.

use std::collections::{HashMap, HashSet};

use crate::constants::PROOF_SIZE;
use crate::types::{Node, PackedEdge};

/// Attempt to find a [`PROOF_SIZE`]-length simple cycle in `edges`.
/// Returns the indices (into `edges`) of the edges forming the cycle,
/// or `None` if no such cycle exists in this edge set.
pub fn find_cycle(edges: &[PackedEdge]) -> Option<Vec<u32>> {
    // Maps an (even, odd) node pair back to one edge index that
    // produced it, so the forest's node-to-node links (which don't
    // carry edge identity) can be translated back into edge indices
    // once a cycle is found.
    let mut edge_of_pair: HashMap<(Node, Node), u32> = HashMap::with_capacity(edges.len());
    for (index, edge) in edges.iter().enumerate() {
        let unpacked = edge.unpack();
        edge_of_pair
            .entry((unpacked.even, unpacked.odd))
            .or_insert(index as u32);
    }

    let mut cuckoo: HashMap<Node, Node> = HashMap::new();

    for (index, edge) in edges.iter().enumerate() {
        let unpacked = edge.unpack();
        let u = unpacked.even;
        let v = unpacked.odd;

        let path_u = walk_path(u, &cuckoo);
        let path_v = walk_path(v, &cuckoo);

        if path_u.len() > PROOF_SIZE || path_v.len() > PROOF_SIZE {
            // Path too long to possibly close a PROOF_SIZE-length
            // cycle through this edge; leave the forest untouched
            // rather than splice a path we've truncated.
            continue;
        }

        if path_u[path_u.len() - 1] == path_v[path_v.len() - 1] {
            // Same tree: this edge would close a cycle. Find exactly
            // where the two paths converge (they may reach the common
            // root at different depths) and measure its length.
            let min_len = path_u.len().min(path_v.len());
            let mut i = path_u.len() - min_len;
            let mut j = path_v.len() - min_len;
            while path_u[i] != path_v[j] {
                i += 1;
                j += 1;
            }

            if i + j + 1 == PROOF_SIZE {
                return Some(extract_cycle(index, &path_u[..=i], &path_v[..=j], &edge_of_pair));
            }
            // A cycle of the wrong length: drop this edge rather than
            // splice it, since splicing would graft a real loop into
            // the forest and break the "each node has one parent"
            // invariant the next path-walk relies on.
        } else {
            splice(u, v, &path_u, &path_v, &mut cuckoo);
        }
    }

    None
}

/// Follow `cuckoo` from `start` until a node with no entry is reached
/// (the root of its tree) or [`PROOF_SIZE`] hops have elapsed.
/// `path[0] == start`; `path.last()` is the terminal node reached.
fn walk_path(start: Node, cuckoo: &HashMap<Node, Node>) -> Vec<Node> {
    let mut path = vec![start];
    let mut current = start;
    while let Some(&next) = cuckoo.get(&current) {
        path.push(next);
        current = next;
        if path.len() > PROOF_SIZE {
            break;
        }
    }
    path
}

/// Graft the new edge `(u, v)` into the forest by reversing whichever
/// of the two paths is shorter, so it now points out through the new
/// edge instead of toward its old root. The longer path's root is left
/// as the merged tree's root.
fn splice(u: Node, v: Node, path_u: &[Node], path_v: &[Node], cuckoo: &mut HashMap<Node, Node>) {
    if path_u.len() < path_v.len() {
        for i in (1..path_u.len()).rev() {
            cuckoo.insert(path_u[i], path_u[i - 1]);
        }
        cuckoo.insert(path_u[0], v);
    } else {
        for i in (1..path_v.len()).rev() {
            cuckoo.insert(path_v[i], path_v[i - 1]);
        }
        cuckoo.insert(path_v[0], u);
    }
}

/// Translate the closing edge plus the two converging path segments
/// back into the set of edge indices that make up the cycle. Nodes
/// alternate side along each path (forest edges always connect an even
/// node to an odd one), starting from `path_u[0]` (even) and
/// `path_v[0]` (odd) respectively, so the side of each hop is known
/// from its position alone.
fn extract_cycle(
    new_edge_index: usize,
    path_u: &[Node],
    path_v: &[Node],
    edge_of_pair: &HashMap<(Node, Node), u32>,
) -> Vec<u32> {
    let mut cycle: HashSet<u32> = HashSet::new();
    cycle.insert(new_edge_index as u32);

    for k in 0..path_u.len().saturating_sub(1) {
        let pair = if k % 2 == 0 {
            (path_u[k], path_u[k + 1])
        } else {
            (path_u[k + 1], path_u[k])
        };
        if let Some(&idx) = edge_of_pair.get(&pair) {
            cycle.insert(idx);
        }
    }
    for k in 0..path_v.len().saturating_sub(1) {
        let pair = if k % 2 == 0 {
            (path_v[k + 1], path_v[k])
        } else {
            (path_v[k], path_v[k + 1])
        };
        if let Some(&idx) = edge_of_pair.get(&pair) {
            cycle.insert(idx);
        }
    }

    cycle.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::UnpackedEdge;

    fn edge(even: u64, odd: u64) -> PackedEdge {
        UnpackedEdge {
            even: Node(even),
            odd: Node(odd),
        }
        .pack()
    }

    /// Build a clean simple cycle of `PROOF_SIZE` edges: nodes
    /// alternate even/odd by construction, node `k` wired to node
    /// `(k+1) % PROOF_SIZE`.
    fn clean_cycle() -> Vec<PackedEdge> {
        let node = |k: usize| -> Node {
            if k % 2 == 0 {
                Node((k as u64) * 2)
            } else {
                Node((k as u64) * 2 + 1)
            }
        };
        (0..PROOF_SIZE)
            .map(|k| {
                let a = node(k);
                let b = node((k + 1) % PROOF_SIZE);
                if a.is_even() {
                    UnpackedEdge { even: a, odd: b }.pack()
                } else {
                    UnpackedEdge { even: b, odd: a }.pack()
                }
            })
            .collect()
    }

    #[test]
    fn finds_a_clean_42_cycle() {
        let edges = clean_cycle();
        let cycle = find_cycle(&edges).expect("a 42-cycle is present");
        assert_eq!(cycle.len(), PROOF_SIZE);
    }

    #[test]
    fn no_cycle_among_disconnected_edges() {
        let edges = vec![edge(0, 1), edge(2, 3), edge(4, 5)];
        assert!(find_cycle(&edges).is_none());
    }

    #[test]
    fn finds_42_cycle_even_with_a_degree_3_hub_node() {
        // The same clean 42-cycle, plus one extra edge dangling off an
        // existing cycle node into a brand-new node. That node now has
        // degree 3 — exactly the shape a naive "every node must be
        // degree 2" walk cannot handle, but splicing can.
        let mut edges = clean_cycle();
        let hub = edges[0].unpack().even;
        edges.insert(3, UnpackedEdge { even: hub, odd: Node(9_999) }.pack());

        let cycle = find_cycle(&edges).expect("a 42-cycle still exists despite the branch");
        assert_eq!(cycle.len(), PROOF_SIZE);
    }

    #[test]
    fn wrong_length_cycle_is_not_reported() {
        // A clean 4-cycle: too short to be a valid proof, so this
        // edge set must never report a "cycle" at all.
        let edges = vec![edge(0, 1), edge(2, 1), edge(2, 3), edge(0, 3)];
        assert!(find_cycle(&edges).is_none());
    }

    #[test]
    fn finding_a_cycle_does_not_depend_on_edge_order() {
        // Spec.md §5: the cycle finder's result is independent of edge
        // ordering. Feeding the same cycle's edges in reverse order
        // must still close the same 42-cycle.
        let mut edges = clean_cycle();
        edges.reverse();
        let cycle = find_cycle(&edges).expect("cycle exists regardless of edge order");
        assert_eq!(cycle.len(), PROOF_SIZE);
    }
}
