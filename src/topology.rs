//! Construction of well-known lattices, in particular the Chimera graph.

use rand::Rng;

use crate::error::Result;
use crate::graph::{Coupling, Graph, Node, NodeId};

/// Builds an n×n Chimera lattice with random ±1 bond signs.
///
/// Each cell holds a left node and a right node, added in that order, so the
/// dense IDs run left, right, left, right, … row-major: left IDs are even,
/// right IDs odd. The left sublattice couples vertically, the right
/// sublattice horizontally, and the two nodes of a cell couple to each
/// other. 2n² nodes, 2n(n−1) + n² bonds.
pub fn chimera(n: usize, rng: &mut impl Rng) -> Result<Graph> {
    let mut graph = Graph::new();

    let mut left: Vec<Vec<NodeId>> = Vec::with_capacity(n);
    let mut right: Vec<Vec<NodeId>> = Vec::with_capacity(n);

    for _ in 0..n {
        let mut left_row = Vec::with_capacity(n);
        let mut right_row = Vec::with_capacity(n);
        for _ in 0..n {
            left_row.push(graph.add(Node::random(rng)));
            right_row.push(graph.add(Node::random(rng)));
        }
        left.push(left_row);
        right.push(right_row);
    }

    // Vertical bonds on the left sublattice.
    for j in 0..n {
        for i in 1..n {
            graph.connect(left[i - 1][j], left[i][j], Coupling::random(rng))?;
        }
    }

    // Horizontal bonds on the right sublattice.
    for i in 0..n {
        for j in 1..n {
            graph.connect(right[i][j - 1], right[i][j], Coupling::random(rng))?;
        }
    }

    // Intra-cell bonds.
    for i in 0..n {
        for j in 0..n {
            graph.connect(left[i][j], right[i][j], Coupling::random(rng))?;
        }
    }

    Ok(graph)
}
