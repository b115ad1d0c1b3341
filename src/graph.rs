//! Spin-network graph: nodes carrying continuous phases, coupled by ±1 bonds.
//!
//! A graph is fully defined by its node set, the symmetric adjacency built
//! from `connect` calls, and the bond couplings. Topology is built once and
//! then frozen while a `Problem` anneals it.

use std::f64::consts::TAU;
use std::fmt;

use rand::Rng;

use crate::error::{GraphError, Result};

/// Handle for a node, minted by [`Graph::add`].
///
/// IDs are dense `0..N-1` in insertion order; external layout code derives
/// spatial positions purely from them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// The dense insertion-order index.
    #[inline(always)]
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single spin unit holding a phase in `[0, 2π)`.
#[derive(Debug, Clone)]
pub struct Node {
    phase: f64,
}

impl Node {
    /// New node with a uniform-random phase.
    pub fn random(rng: &mut impl Rng) -> Self {
        Self { phase: rng.gen_range(0.0..TAU) }
    }

    /// New node with a given phase. Mostly useful for fixtures.
    pub fn with_phase(phase: f64) -> Self {
        Self { phase }
    }

    /// Current phase.
    #[inline(always)]
    pub fn phase(&self) -> f64 {
        self.phase
    }
}

/// Sign of the bond between two coupled spins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Coupling {
    /// +1: the interaction term rewards aligned spins.
    Ferro,
    /// −1: the interaction term rewards opposed spins.
    Anti,
}

impl Coupling {
    /// The weight as it enters the energy formulas.
    #[inline(always)]
    pub fn value(self) -> f64 {
        match self {
            Coupling::Ferro => 1.0,
            Coupling::Anti => -1.0,
        }
    }

    /// Fair draw between the two signs.
    pub fn random(rng: &mut impl Rng) -> Self {
        if rng.gen_bool(0.5) {
            Coupling::Ferro
        } else {
            Coupling::Anti
        }
    }
}

/// An undirected bond, stored in the orientation it was connected with.
#[derive(Debug, Clone, Copy)]
pub struct Edge {
    pub a: NodeId,
    pub b: NodeId,
    pub coupling: Coupling,
}

/// The spin network.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    nodes: Vec<Node>,
    /// adjacency[i] lists (neighbor, coupling) pairs; symmetric by construction.
    adjacency: Vec<Vec<(NodeId, Coupling)>>,
    /// One entry per bond, in insertion order.
    edges: Vec<Edge>,
}

impl Graph {
    /// Empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a node, assigning it the next dense ID.
    pub fn add(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        self.adjacency.push(Vec::new());
        id
    }

    /// Couples two member nodes with a ±1 bond.
    ///
    /// Fails without mutating anything on a self-loop, on a bond that already
    /// exists in either orientation, or on a non-member endpoint.
    pub fn connect(&mut self, a: NodeId, b: NodeId, coupling: Coupling) -> Result<()> {
        self.check_member(a)?;
        self.check_member(b)?;
        if a == b {
            return Err(GraphError::SelfLoop(a));
        }
        // Adjacency is symmetric, so one side suffices for the duplicate check.
        if self.adjacency[a.0].iter().any(|&(n, _)| n == b) {
            return Err(GraphError::DuplicateEdge(a, b));
        }

        self.adjacency[a.0].push((b, coupling));
        self.adjacency[b.0].push((a, coupling));
        self.edges.push(Edge { a, b, coupling });
        Ok(())
    }

    /// The coupling between two member nodes, whichever orientation the bond
    /// was stored with. `Ok(None)` means no bond.
    pub fn get_coupling(&self, a: NodeId, b: NodeId) -> Result<Option<Coupling>> {
        self.check_member(a)?;
        self.check_member(b)?;
        Ok(self.adjacency[a.0].iter().find(|&&(n, _)| n == b).map(|&(_, c)| c))
    }

    /// Dense insertion-order ID of a member node.
    pub fn get_id(&self, node: NodeId) -> Result<usize> {
        self.check_member(node)?;
        Ok(node.0)
    }

    /// All nodes in insertion order.
    pub fn all_nodes(&self) -> impl Iterator<Item = NodeId> {
        (0..self.nodes.len()).map(NodeId)
    }

    /// All bonds in insertion order.
    pub fn all_edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Neighbors of a member node, in the order they were connected.
    pub fn neighbors(&self, node: NodeId) -> Result<impl Iterator<Item = NodeId> + '_> {
        self.check_member(node)?;
        Ok(self.adjacency[node.0].iter().map(|&(n, _)| n))
    }

    /// Neighbors of a member node together with their bond couplings.
    pub fn couplings(&self, node: NodeId) -> Result<&[(NodeId, Coupling)]> {
        self.check_member(node)?;
        Ok(&self.adjacency[node.0])
    }

    /// Current phase of a member node.
    pub fn phase(&self, node: NodeId) -> Result<f64> {
        self.check_member(node)?;
        Ok(self.nodes[node.0].phase)
    }

    /// Overwrites the phase of a member node.
    ///
    /// Used by the simulator's accept path; also available to external
    /// display-refresh hooks.
    pub fn set_phase(&mut self, node: NodeId, phase: f64) -> Result<()> {
        self.check_member(node)?;
        self.nodes[node.0].phase = phase;
        Ok(())
    }

    /// Read access to the node storage, indexed by dense ID.
    #[inline(always)]
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Number of nodes.
    #[inline(always)]
    pub fn n(&self) -> usize {
        self.nodes.len()
    }

    /// Number of bonds.
    #[inline(always)]
    pub fn m(&self) -> usize {
        self.edges.len()
    }

    fn check_member(&self, node: NodeId) -> Result<()> {
        if node.0 < self.nodes.len() {
            Ok(())
        } else {
            Err(GraphError::UnknownNode(node))
        }
    }
}
