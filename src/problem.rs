//! The annealing problem: a spin graph driven through the schedule by
//! Metropolis kicks.

use std::f64::consts::TAU;

use rand::Rng;

use crate::error::Result;
use crate::graph::{Graph, NodeId};
use crate::schedule;

/// Returned by [`Problem::iterate`], lets drivers track acceptance rates
/// without rescanning the graph.
#[derive(Debug, Clone, Copy)]
pub struct SweepInfo {
    /// Kicks applied this sweep.
    pub accepted: usize,
    /// Kicks proposed this sweep (one per node).
    pub attempted: usize,
}

/// Simulation state: the graph being annealed, the bath temperature, and the
/// position in the schedule.
#[derive(Debug, Clone)]
pub struct Problem {
    graph: Graph,
    temp: f64,
    sweeps: u64,
}

impl Problem {
    /// Sweeps spanning the full [0, 1] schedule.
    pub const SWEEPS: u64 = 150_000;

    /// Schedule time advanced per sweep.
    pub const TIMESTEP: f64 = 1.0 / Self::SWEEPS as f64;

    /// Wraps a fully built graph. `temp` is the bath temperature in the same
    /// frequency units as the schedule coefficients and must be positive.
    pub fn new(graph: Graph, temp: f64) -> Self {
        Self { graph, temp, sweeps: 0 }
    }

    /// The graph under simulation.
    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Releases the graph, e.g. to inspect the final configuration.
    pub fn into_graph(self) -> Graph {
        self.graph
    }

    /// Current schedule time in [0, 1]. Monotone, reaches exactly 1.0.
    pub fn time(&self) -> f64 {
        self.sweeps as f64 / Self::SWEEPS as f64
    }

    /// Bath temperature.
    pub fn temperature(&self) -> f64 {
        self.temp
    }

    /// A(t) at the current schedule time.
    pub fn kinetic_factor(&self) -> f64 {
        schedule::kinetic_factor(self.time())
    }

    /// B(t) at the current schedule time.
    pub fn interaction_factor(&self) -> f64 {
        schedule::interaction_factor(self.time())
    }

    /// Total energy under the end-of-schedule coefficients:
    ///
    /// ```text
    /// H = −A(1) Σ_i sin θ_i  −  B(1) Σ_{bonds (i,j)} w_ij cos θ_i cos θ_j
    /// ```
    ///
    /// Always weighted at t = 1 regardless of the current time, so a mid-run
    /// sample reports the energy under the final schedule. Each node and each
    /// stored bond enters exactly once. Pure; no side effects.
    pub fn hamiltonian(&self) -> f64 {
        let a = schedule::kinetic_factor(1.0);
        let b = schedule::interaction_factor(1.0);
        let nodes = self.graph.nodes();

        let kinetic: f64 = nodes.iter().map(|n| n.phase().sin()).sum();
        let interaction: f64 = self
            .graph
            .all_edges()
            .iter()
            .map(|e| {
                e.coupling.value()
                    * nodes[e.a.index()].phase().cos()
                    * nodes[e.b.index()].phase().cos()
            })
            .sum();

        -a * kinetic - b * interaction
    }

    /// Probability of kicking `node` from its current phase to `proposed`,
    /// at the current schedule time.
    ///
    /// The energy delta sums a kinetic term against the external field and an
    /// interaction term against the node's coupled neighbors; acceptance is
    /// `exp(−ΔE / temp)` clamped to [0, 1], so improving and neutral moves
    /// always pass and an overflowing exponential degenerates safely.
    pub fn kick_probability(&self, node: NodeId, proposed: f64) -> Result<f64> {
        let theta = self.graph.phase(node)?;
        let nodes = self.graph.nodes();

        let kinetic = -self.kinetic_factor() * (proposed.sin() - theta.sin());

        let mut field = 0.0;
        for &(other, coupling) in self.graph.couplings(node)? {
            field += coupling.value() * nodes[other.index()].phase().cos();
        }
        let interaction = -self.interaction_factor() * (proposed.cos() - theta.cos()) * field;

        let energy_delta = kinetic + interaction;
        Ok((-energy_delta / self.temp).exp().clamp(0.0, 1.0))
    }

    /// One synchronous Metropolis sweep over the whole graph.
    ///
    /// For every node in insertion order: draw a proposed phase uniform in
    /// [0, 2π), then one uniform accept draw against `kick_probability`. All
    /// decisions are made against the pre-sweep phases before any node is
    /// written, so one node's decision never sees another's update from the
    /// same sweep. Accepted proposals are applied afterwards, then the
    /// schedule advances one timestep.
    pub fn iterate(&mut self, rng: &mut impl Rng) -> Result<SweepInfo> {
        let mut kicks: Vec<Option<f64>> = Vec::with_capacity(self.graph.n());

        for node in self.graph.all_nodes() {
            let proposed = rng.gen_range(0.0..TAU);
            let prob = self.kick_probability(node, proposed)?;
            let accepted = rng.gen::<f64>() < prob;
            kicks.push(if accepted { Some(proposed) } else { None });
        }

        let mut accepted = 0;
        for (node, kick) in self.graph.all_nodes().zip(&kicks) {
            if let Some(phase) = *kick {
                self.graph.set_phase(node, phase)?;
                accepted += 1;
            }
        }

        self.sweeps += 1;
        Ok(SweepInfo { accepted, attempted: kicks.len() })
    }

    /// True once the schedule time has reached 1.
    pub fn is_finished(&self) -> bool {
        self.sweeps >= Self::SWEEPS
    }

    /// Runs [`Problem::iterate`] until the schedule completes.
    pub fn solve(&mut self, rng: &mut impl Rng) -> Result<()> {
        while !self.is_finished() {
            self.iterate(rng)?;
        }
        Ok(())
    }
}
