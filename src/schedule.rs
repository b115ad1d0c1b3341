//! Annealing-schedule coefficients.
//!
//! The anneal moves from a kinetic-dominated (exploratory) regime to an
//! interaction-dominated (optimizing) regime as t runs from 0 to 1. These
//! two functions are the single source of truth for the schedule shape;
//! nothing else hard-codes the constants.

/// Kinetic amplitude at t = 0.
pub const KINETIC_SCALE: f64 = 3.0;
/// Kinetic decay rate.
pub const KINETIC_DECAY: f64 = 7.0;
/// Interaction amplitude at t = 0.
pub const INTERACTION_SCALE: f64 = 0.1;
/// Interaction growth rate.
pub const INTERACTION_GROWTH: f64 = 4.0;

/// A(t) = 3·e^(−7t), monotonically decreasing over the schedule.
#[inline(always)]
pub fn kinetic_factor(t: f64) -> f64 {
    KINETIC_SCALE * (-KINETIC_DECAY * t).exp()
}

/// B(t) = 0.1·e^(4t), monotonically increasing over the schedule.
#[inline(always)]
pub fn interaction_factor(t: f64) -> f64 {
    INTERACTION_SCALE * (INTERACTION_GROWTH * t).exp()
}
