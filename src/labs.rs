//! Lab catalog and unified dispatch
//!
//! One exhaustive enum of lab modules replaces the source of truth that used
//! to be a string switch; unknown slugs are an explicit error. `LabState`
//! owns one lab's state and routes ticks, inputs, and scene snapshots.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::SORT_TICK_MS;
use crate::runner::IntervalTimer;
use crate::scene::{self, Scene};
use crate::sim::circuit::GateNetwork;
use crate::sim::defense::DefenseState;
use crate::sim::molecule::Molecule;
use crate::sim::neural::NeuralNet;
use crate::sim::physics::{PhysicsState, ShapeKind};
use crate::sim::sorting::SortState;

/// Every lab module the platform ships
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LabId {
    NetworkDefense,
    NeuralNetwork,
    CircuitLogic,
    SortingAlgo,
    Physics,
    Chemistry,
}

/// Errors from the lab catalog
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LabError {
    #[error("lab module not found: {0}")]
    UnknownLab(String),
}

impl LabId {
    pub const ALL: [LabId; 6] = [
        LabId::NetworkDefense,
        LabId::NeuralNetwork,
        LabId::CircuitLogic,
        LabId::SortingAlgo,
        LabId::Physics,
        LabId::Chemistry,
    ];

    /// Route slug, as used by the shell's URLs
    pub fn slug(&self) -> &'static str {
        match self {
            LabId::NetworkDefense => "network-defense",
            LabId::NeuralNetwork => "neural-network",
            LabId::CircuitLogic => "circuit-logic",
            LabId::SortingAlgo => "sorting-algo",
            LabId::Physics => "physics",
            LabId::Chemistry => "chemistry",
        }
    }

    pub fn from_slug(slug: &str) -> Result<Self, LabError> {
        Self::ALL
            .iter()
            .copied()
            .find(|lab| lab.slug() == slug)
            .ok_or_else(|| LabError::UnknownLab(slug.to_string()))
    }

    /// Header title shown above the lab
    pub fn title(&self) -> &'static str {
        match self {
            LabId::NetworkDefense => "Network Defense Lab: Packet Filtering",
            LabId::NeuralNetwork => "Neural Network Visualizer",
            LabId::CircuitLogic => "Circuit Logic Lab",
            LabId::SortingAlgo => "Sorting Visualizer",
            LabId::Physics => "Physics Lab: Gravity Simulation",
            LabId::Chemistry => "Chemistry Lab: Molecular Viewer",
        }
    }
}

/// Input commands for a single tick; one-shot fields are cleared by the
/// session once a tick has consumed them
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Drop a new body (physics lab)
    pub spawn: Option<ShapeKind>,
    /// Remove all bodies (physics lab)
    pub clear: bool,
    /// Begin stepping the sort (sorting lab)
    pub start_sort: bool,
    /// Back to the initial array (sorting lab)
    pub reset_sort: bool,
    /// Flip a named raw input (circuit lab)
    pub toggle_signal: Option<String>,
    /// Flip the firewall (defense lab)
    pub toggle_firewall: bool,
}

/// State of one live lab
#[derive(Debug, Clone)]
pub enum LabState {
    Physics(PhysicsState),
    Sorting {
        state: SortState,
        timer: IntervalTimer,
    },
    Circuit(GateNetwork),
    Defense(DefenseState),
    Neural { net: NeuralNet, elapsed: f32 },
    Molecule { molecule: Molecule, elapsed: f32 },
}

impl LabState {
    /// Fresh state for a lab; `seed` only matters where spawning does
    pub fn new(id: LabId, seed: u64) -> Self {
        match id {
            LabId::Physics => LabState::Physics(PhysicsState::new(seed)),
            LabId::SortingAlgo => LabState::Sorting {
                state: SortState::demo(),
                timer: IntervalTimer::from_millis(SORT_TICK_MS),
            },
            LabId::CircuitLogic => LabState::Circuit(GateNetwork::demo()),
            LabId::NetworkDefense => LabState::Defense(DefenseState::demo()),
            LabId::NeuralNetwork => LabState::Neural {
                net: NeuralNet::demo(),
                elapsed: 0.0,
            },
            LabId::Chemistry => LabState::Molecule {
                molecule: Molecule::water(),
                elapsed: 0.0,
            },
        }
    }

    /// Apply one tick's input and advance by `dt` seconds
    pub fn tick(&mut self, input: &TickInput, dt: f32) {
        match self {
            LabState::Physics(state) => {
                if input.clear {
                    state.clear();
                }
                if let Some(shape) = input.spawn {
                    state.spawn(shape);
                }
                state.step(dt);
            }
            LabState::Sorting { state, timer } => {
                if input.reset_sort {
                    *state = SortState::demo();
                    timer.stop();
                }
                if input.start_sort && !state.is_done() {
                    timer.start();
                }
                for _ in 0..timer.advance(dt) {
                    *state = state.step();
                }
                if state.is_done() {
                    timer.stop();
                }
            }
            LabState::Circuit(network) => {
                if let Some(name) = &input.toggle_signal {
                    if network.toggle(name).is_none() {
                        log::warn!("ignoring toggle for unknown signal {name}");
                    }
                }
            }
            LabState::Defense(state) => {
                if input.toggle_firewall {
                    state.toggle_firewall();
                }
                state.step(dt);
            }
            LabState::Neural { elapsed, .. } => {
                *elapsed += dt;
            }
            LabState::Molecule { elapsed, .. } => {
                *elapsed += dt;
            }
        }
    }

    /// Snapshot the lab as plain primitives
    pub fn scene(&self) -> Scene {
        match self {
            LabState::Physics(state) => scene::physics_scene(state),
            LabState::Sorting { state, .. } => scene::sorting_scene(state),
            LabState::Circuit(network) => scene::circuit_scene(network),
            LabState::Defense(state) => scene::defense_scene(state),
            LabState::Neural { net, elapsed } => scene::neural_scene(net, *elapsed),
            LabState::Molecule { molecule, elapsed } => scene::molecule_scene(molecule, *elapsed),
        }
    }
}
