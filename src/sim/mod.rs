//! Deterministic simulation module
//!
//! All lab logic lives here. This module must be pure and deterministic:
//! - Transitions are plain functions over plain state
//! - Seeded RNG only
//! - No rendering, scheduling, or platform dependencies

pub mod circuit;
pub mod defense;
pub mod molecule;
pub mod neural;
pub mod physics;
pub mod sorting;

pub use circuit::{CircuitError, GateKind, GateNetwork, NetworkSpec, Signal};
pub use defense::{DefenseState, Packet, Threat};
pub use molecule::{Atom, Bond, Element, Molecule};
pub use neural::{Connection, NeuralNet, Neuron};
pub use physics::{step_body, Body, PhysicsState, ShapeKind};
pub use sorting::{SortState, DEMO_ARRAY};
