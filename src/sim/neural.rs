//! Neural-net diagram layout and pulse animation
//!
//! The network never trains; it is a layout plus a clock. Neuron positions
//! and connections are pure functions of the layer sizes, and the "activity"
//! pulse is a pure function of elapsed time, so the diagram renders
//! identically for any harness given the same clock.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::consts::PULSE_RATE;

/// Demo topology: 4 inputs, 5 hidden, 3 outputs
pub const DEMO_LAYERS: [usize; 3] = [4, 5, 3];
/// Horizontal distance between layers
pub const LAYER_SPACING: f32 = 3.0;
/// Vertical distance between neurons within a layer
pub const NEURON_SPACING: f32 = 1.5;

/// A positioned neuron
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Neuron {
    pub layer: usize,
    pub index: usize,
    pub pos: Vec3,
}

/// A directed edge between neurons in adjacent layers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Connection {
    /// Index into the neuron list
    pub from: usize,
    pub to: usize,
}

/// Laid-out network diagram
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NeuralNet {
    pub layer_count: usize,
    pub neurons: Vec<Neuron>,
    pub connections: Vec<Connection>,
}

impl NeuralNet {
    /// Lay out a fully-connected feed-forward diagram.
    ///
    /// Layers are centered on the origin along both axes.
    pub fn new(layers: &[usize]) -> Self {
        let layer_count = layers.len();
        let mut neurons = Vec::new();

        for (layer, &count) in layers.iter().enumerate() {
            let x = (layer as f32 - (layer_count as f32 - 1.0) / 2.0) * LAYER_SPACING;
            for index in 0..count {
                let y = (index as f32 - (count as f32 - 1.0) / 2.0) * NEURON_SPACING;
                neurons.push(Neuron {
                    layer,
                    index,
                    pos: Vec3::new(x, y, 0.0),
                });
            }
        }

        let mut connections = Vec::new();
        for (src, a) in neurons.iter().enumerate() {
            for (dst, b) in neurons.iter().enumerate() {
                if a.layer + 1 == b.layer {
                    connections.push(Connection { from: src, to: dst });
                }
            }
        }

        Self {
            layer_count,
            neurons,
            connections,
        }
    }

    /// The demo network
    pub fn demo() -> Self {
        Self::new(&DEMO_LAYERS)
    }

    /// Connections lit at `elapsed` seconds: the pulse index and its
    /// successor. `None` when the diagram has no connections.
    pub fn active_pair(&self, elapsed: f32) -> Option<(usize, usize)> {
        let n = self.connections.len();
        if n == 0 {
            return None;
        }
        let pulse = (elapsed * PULSE_RATE).floor().max(0.0) as usize % n;
        Some((pulse, (pulse + 1) % n))
    }

    /// Whether a connection is lit at `elapsed` seconds
    pub fn is_active(&self, connection: usize, elapsed: f32) -> bool {
        match self.active_pair(elapsed) {
            Some((a, b)) => connection == a || connection == b,
            None => false,
        }
    }
}
