//! Render adapter
//!
//! Maps lab state to plain visual primitives (positions, sizes, colors) so
//! any scene-graph harness can draw a lab without linking simulation types.
//! Nothing here mutates state; every builder is a pure snapshot function.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::sim::circuit::{GateKind, GateNetwork, Signal};
use crate::sim::defense::{DefenseState, Threat};
use crate::sim::molecule::{Element, Molecule};
use crate::sim::neural::NeuralNet;
use crate::sim::physics::{PhysicsState, ShapeKind};
use crate::sim::sorting::SortState;

/// sRGB color with alpha
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// From a 0xRRGGBB literal
    pub const fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xff) as f32 / 255.0,
            g: ((hex >> 8) & 0xff) as f32 / 255.0,
            b: (hex & 0xff) as f32 / 255.0,
            a: 1.0,
        }
    }

    pub const fn with_alpha(mut self, a: f32) -> Self {
        self.a = a;
        self
    }

    /// HSL to RGB, hue in degrees
    pub fn from_hsl(h: f32, s: f32, l: f32) -> Self {
        let h = h.rem_euclid(360.0) / 60.0;
        let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
        let x = c * (1.0 - (h % 2.0 - 1.0).abs());
        let (r, g, b) = match h as u32 {
            0 => (c, x, 0.0),
            1 => (x, c, 0.0),
            2 => (0.0, c, x),
            3 => (0.0, x, c),
            4 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };
        let m = l - c / 2.0;
        Self::rgb(r + m, g + m, b + m)
    }
}

/// Palette shared by the labs
pub mod palette {
    use super::Color;

    pub const BAR_DEFAULT: Color = Color::from_hex(0x3b82f6);
    pub const BAR_ACTIVE: Color = Color::from_hex(0xef4444);
    pub const BAR_SORTED: Color = Color::from_hex(0x4ade80);

    pub const SIGNAL_ON: Color = Color::from_hex(0x4ade80);
    pub const SIGNAL_OFF: Color = Color::from_hex(0xef4444);
    pub const GATE_AND: Color = Color::from_hex(0xef4444);
    pub const GATE_OR: Color = Color::from_hex(0x3b82f6);
    pub const GATE_NOT: Color = Color::from_hex(0xeab308);
    pub const WIRE_OFF: Color = Color::from_hex(0x334155);

    pub const NEURON_INPUT: Color = Color::from_hex(0x4ade80);
    pub const NEURON_HIDDEN: Color = Color::from_hex(0x60a5fa);
    pub const NEURON_OUTPUT: Color = Color::from_hex(0xf472b6);
    pub const CONN_ACTIVE: Color = Color::rgb(0.0, 1.0, 1.0);
    pub const CONN_IDLE: Color = Color::from_hex(0x1e293b);

    pub const PACKET_MALICIOUS: Color = Color::from_hex(0xff0000);
    pub const PACKET_SUSPICIOUS: Color = Color::from_hex(0xffa500);
    pub const PACKET_BENIGN: Color = Color::from_hex(0x4ade80);
    pub const FIREWALL_UP: Color = Color::from_hex(0x008000);
    pub const FIREWALL_DOWN: Color = Color::from_hex(0xff0000);

    pub const ATOM_OXYGEN: Color = Color::from_hex(0xff0000);
    pub const ATOM_HYDROGEN: Color = Color::from_hex(0xffffff);
    pub const BOND: Color = Color::from_hex(0x888888);

    pub const TEXT: Color = Color::from_hex(0xffffff);
}

/// A drawable primitive; all coordinates are world-space
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Primitive {
    Sphere {
        pos: Vec3,
        radius: f32,
        color: Color,
    },
    Cuboid {
        pos: Vec3,
        size: Vec3,
        rotation: Vec3,
        color: Color,
    },
    Line {
        start: Vec3,
        end: Vec3,
        width: f32,
        color: Color,
    },
    Label {
        pos: Vec3,
        text: String,
        size: f32,
        color: Color,
    },
}

/// One frame's worth of primitives
pub type Scene = Vec<Primitive>;

/// Gravity sandbox: one mesh per body, tinted by its spawn hue
pub fn physics_scene(state: &PhysicsState) -> Scene {
    state
        .bodies
        .iter()
        .map(|body| {
            let color = Color::from_hsl(body.hue, 0.7, 0.5);
            match body.shape {
                ShapeKind::Sphere => Primitive::Sphere {
                    pos: body.pos,
                    radius: 0.5,
                    color,
                },
                ShapeKind::Cube => Primitive::Cuboid {
                    pos: body.pos,
                    size: Vec3::ONE,
                    rotation: body.spin,
                    color,
                },
            }
        })
        .collect()
}

/// Bar chart of the sort array: red while compared, green once finalized
pub fn sorting_scene(state: &SortState) -> Scene {
    let n = state.values.len();
    let origin_x = -(n as f32) / 2.0;
    let mut scene = Vec::with_capacity(n * 2);

    for (idx, &value) in state.values.iter().enumerate() {
        let mut color = palette::BAR_DEFAULT;
        if state.active.is_some_and(|(a, b)| idx == a || idx == b) {
            color = palette::BAR_ACTIVE;
        }
        if state.sorted.contains(&idx) {
            color = palette::BAR_SORTED;
        }

        let height = value as f32;
        let x = origin_x + idx as f32 * 0.8;
        scene.push(Primitive::Cuboid {
            pos: Vec3::new(x, height / 2.0 - 2.0, 0.0),
            size: Vec3::new(0.5, height, 0.5),
            rotation: Vec3::ZERO,
            color,
        });
        scene.push(Primitive::Label {
            pos: Vec3::new(x, -2.5, 0.0),
            text: value.to_string(),
            size: 0.3,
            color: palette::TEXT,
        });
    }
    scene
}

/// Clickable raw-input anchor in the circuit scene
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToggleAnchor {
    pub name: String,
    pub pos: Vec3,
    pub value: bool,
}

/// Computed circuit geometry: gate centers by dependency depth plus the
/// toggle anchors the shell needs for hit-testing
#[derive(Debug, Clone)]
pub struct CircuitLayout {
    /// Gate body centers, aligned with `network.gates()`
    pub gate_pos: Vec<Vec3>,
    pub toggles: Vec<ToggleAnchor>,
}

/// Lay the network out in dependency columns, first column at x = -2
pub fn circuit_layout(network: &GateNetwork) -> CircuitLayout {
    let gates = network.gates();

    // Dependency depth: 1 + deepest feeding gate (raw inputs count 0)
    let mut depth = vec![0usize; gates.len()];
    let mut remaining: Vec<usize> = (0..gates.len()).collect();
    while !remaining.is_empty() {
        let mut progressed = false;
        remaining.retain(|&g| {
            let mut max_in = 0;
            for signal in &gates[g].inputs {
                if let Signal::Gate(src) = signal {
                    if depth[*src] == 0 {
                        return true; // not resolved yet
                    }
                    max_in = max_in.max(depth[*src]);
                }
            }
            depth[g] = max_in + 1;
            progressed = true;
            false
        });
        if !progressed {
            break; // unreachable for validated (acyclic) networks
        }
    }

    // Row index within each column, in declaration order
    let max_depth = depth.iter().copied().max().unwrap_or(1);
    let mut column_counts = vec![0usize; max_depth + 1];
    let mut rows = vec![0usize; gates.len()];
    for (g, &d) in depth.iter().enumerate() {
        rows[g] = column_counts[d];
        column_counts[d] += 1;
    }

    let gate_pos: Vec<Vec3> = (0..gates.len())
        .map(|g| {
            let d = depth[g];
            let count = column_counts[d] as f32;
            let x = -2.0 + (d as f32 - 1.0) * 4.0;
            let y = ((count - 1.0) / 2.0 - rows[g] as f32) * 2.0;
            Vec3::new(x, y, 0.0)
        })
        .collect();

    let mut toggles = Vec::new();
    for (g, gate) in gates.iter().enumerate() {
        for (slot, signal) in gate.inputs.iter().enumerate() {
            if let Signal::Input(i) = signal {
                toggles.push(ToggleAnchor {
                    name: network.input_names()[*i].clone(),
                    pos: gate_pos[g] + input_node_offset(slot),
                    value: network.input_values()[*i],
                });
            }
        }
    }

    CircuitLayout { gate_pos, toggles }
}

fn input_node_offset(slot: usize) -> Vec3 {
    let y = if slot == 0 { 0.3 } else { -0.3 };
    Vec3::new(-0.8, y, 0.0)
}

fn output_node_offset() -> Vec3 {
    Vec3::new(0.8, 0.0, 0.0)
}

fn gate_color(kind: GateKind) -> Color {
    match kind {
        GateKind::And => palette::GATE_AND,
        GateKind::Or => palette::GATE_OR,
        GateKind::Not => palette::GATE_NOT,
    }
}

fn signal_color(value: bool) -> Color {
    if value {
        palette::SIGNAL_ON
    } else {
        palette::SIGNAL_OFF
    }
}

/// Gate bodies with live input/output nodes and wires between gates
pub fn circuit_scene(network: &GateNetwork) -> Scene {
    let layout = circuit_layout(network);
    let values = network.evaluate();
    let mut scene = Vec::new();

    for (g, gate) in network.gates().iter().enumerate() {
        let center = layout.gate_pos[g];

        scene.push(Primitive::Cuboid {
            pos: center,
            size: Vec3::new(1.5, 1.0, 0.2),
            rotation: Vec3::ZERO,
            color: gate_color(gate.kind),
        });
        scene.push(Primitive::Label {
            pos: center + Vec3::new(0.0, 0.2, 0.11),
            text: gate.kind.as_str().to_string(),
            size: 0.3,
            color: palette::TEXT,
        });

        for (slot, signal) in gate.inputs.iter().enumerate() {
            let value = network.resolve(*signal, &values);
            let node = center + input_node_offset(slot);
            scene.push(Primitive::Sphere {
                pos: node,
                radius: 0.15,
                color: signal_color(value),
            });

            // Wire from the feeding gate's output node
            if let Signal::Gate(src) = signal {
                let from = layout.gate_pos[*src] + output_node_offset();
                scene.push(Primitive::Line {
                    start: from,
                    end: node,
                    width: 0.1,
                    color: if value {
                        palette::SIGNAL_ON
                    } else {
                        palette::WIRE_OFF
                    },
                });
            }
        }

        scene.push(Primitive::Sphere {
            pos: center + output_node_offset(),
            radius: 0.15,
            color: signal_color(values[g]),
        });
    }
    scene
}

fn threat_color(threat: Threat) -> Color {
    match threat {
        Threat::Malicious => palette::PACKET_MALICIOUS,
        Threat::Suspicious => palette::PACKET_SUSPICIOUS,
        Threat::Benign => palette::PACKET_BENIGN,
    }
}

/// Firewall plane, traffic spheres, and the zone captions
pub fn defense_scene(state: &DefenseState) -> Scene {
    let mut scene = vec![
        Primitive::Label {
            pos: Vec3::new(-4.0, 2.0, 0.0),
            text: "Internet".to_string(),
            size: 0.5,
            color: palette::TEXT,
        },
        Primitive::Label {
            pos: Vec3::new(4.0, 2.0, 0.0),
            text: "Local Network".to_string(),
            size: 0.5,
            color: palette::TEXT,
        },
        Primitive::Cuboid {
            pos: Vec3::ZERO,
            size: Vec3::new(1.0, 3.0, 3.0),
            rotation: Vec3::ZERO,
            color: if state.firewall_active {
                palette::FIREWALL_UP.with_alpha(0.5)
            } else {
                palette::FIREWALL_DOWN.with_alpha(0.5)
            },
        },
        Primitive::Label {
            pos: Vec3::new(0.0, 2.0, 0.0),
            text: format!(
                "Firewall: {}",
                if state.firewall_active { "Active" } else { "Disabled" }
            ),
            size: 0.3,
            color: palette::TEXT,
        },
    ];

    for packet in &state.packets {
        scene.push(Primitive::Sphere {
            pos: packet.pos,
            radius: 0.2,
            color: threat_color(packet.threat),
        });
    }
    scene
}

/// Neuron spheres colored by layer role plus pulsing connection lines
pub fn neural_scene(net: &NeuralNet, elapsed: f32) -> Scene {
    let mut scene = Vec::with_capacity(net.neurons.len() + net.connections.len());

    for neuron in &net.neurons {
        let color = if neuron.layer == 0 {
            palette::NEURON_INPUT
        } else if neuron.layer == net.layer_count - 1 {
            palette::NEURON_OUTPUT
        } else {
            palette::NEURON_HIDDEN
        };
        scene.push(Primitive::Sphere {
            pos: neuron.pos,
            radius: 0.3,
            color,
        });
    }

    for (idx, conn) in net.connections.iter().enumerate() {
        let active = net.is_active(idx, elapsed);
        scene.push(Primitive::Line {
            start: net.neurons[conn.from].pos,
            end: net.neurons[conn.to].pos,
            width: if active { 2.0 } else { 1.0 },
            color: if active {
                palette::CONN_ACTIVE.with_alpha(0.5)
            } else {
                palette::CONN_IDLE.with_alpha(0.5)
            },
        });
    }
    scene
}

fn element_color(element: Element) -> Color {
    match element {
        Element::Oxygen => palette::ATOM_OXYGEN,
        Element::Hydrogen => palette::ATOM_HYDROGEN,
    }
}

/// Ball-and-stick molecule with a gentle bob applied from the clock
pub fn molecule_scene(molecule: &Molecule, elapsed: f32) -> Scene {
    let bob = Vec3::new(0.0, Molecule::bob_offset(elapsed), 0.0);
    let mut scene = Vec::new();

    for atom in &molecule.atoms {
        let r = atom.element.radius();
        scene.push(Primitive::Sphere {
            pos: atom.pos + bob,
            radius: r,
            color: element_color(atom.element),
        });
        scene.push(Primitive::Label {
            pos: atom.pos + bob + Vec3::new(0.0, 0.0, r + 0.1),
            text: atom.element.symbol().to_string(),
            size: r / 1.5,
            color: palette::TEXT,
        });
    }

    for bond in &molecule.bonds {
        scene.push(Primitive::Line {
            start: molecule.atoms[bond.from].pos + bob,
            end: molecule.atoms[bond.to].pos + bob,
            width: 0.1,
            color: palette::BOND,
        });
    }
    scene
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_colors_decode() {
        let c = Color::from_hex(0x3b82f6);
        assert!((c.r - 0x3b as f32 / 255.0).abs() < 1e-6);
        assert!((c.b - 0xf6 as f32 / 255.0).abs() < 1e-6);
        assert_eq!(c.a, 1.0);
    }

    #[test]
    fn test_hsl_primaries() {
        let red = Color::from_hsl(0.0, 1.0, 0.5);
        assert!((red.r - 1.0).abs() < 1e-5 && red.g.abs() < 1e-5);

        let green = Color::from_hsl(120.0, 1.0, 0.5);
        assert!((green.g - 1.0).abs() < 1e-5 && green.r.abs() < 1e-5);
    }

    #[test]
    fn test_physics_scene_mirrors_bodies() {
        let mut state = PhysicsState::new(3);
        state.spawn(ShapeKind::Sphere);
        state.spawn(ShapeKind::Cube);

        let scene = physics_scene(&state);
        assert_eq!(scene.len(), 2);
        assert!(matches!(scene[0], Primitive::Sphere { radius, .. } if radius == 0.5));
        assert!(matches!(scene[1], Primitive::Cuboid { .. }));
    }

    #[test]
    fn test_sorting_scene_color_precedence() {
        let mut state = SortState::demo().step(); // active = (0, 1)
        state.sorted.push(1);
        let scene = sorting_scene(&state);

        // Bar and label per element
        assert_eq!(scene.len(), 18);
        let bar_color = |idx: usize| match &scene[idx * 2] {
            Primitive::Cuboid { color, .. } => *color,
            other => panic!("expected bar, got {other:?}"),
        };
        assert_eq!(bar_color(0), palette::BAR_ACTIVE);
        // Sorted wins over active
        assert_eq!(bar_color(1), palette::BAR_SORTED);
        assert_eq!(bar_color(2), palette::BAR_DEFAULT);
    }

    #[test]
    fn test_circuit_layout_columns() {
        let net = GateNetwork::demo();
        let layout = circuit_layout(&net);

        // and/or in the first column, not_or second, main_out third
        assert_eq!(layout.gate_pos[0].x, -2.0);
        assert_eq!(layout.gate_pos[1].x, -2.0);
        assert_eq!(layout.gate_pos[2].x, 2.0);
        assert_eq!(layout.gate_pos[3].x, 6.0);
        // First-column gates stack symmetrically
        assert_eq!(layout.gate_pos[0].y, 1.0);
        assert_eq!(layout.gate_pos[1].y, -1.0);
        // One anchor per raw-input slot
        assert_eq!(layout.toggles.len(), 4);
    }

    #[test]
    fn test_circuit_scene_reflects_toggles() {
        let mut net = GateNetwork::demo();
        net.set_input("or_a", true);
        let scene = circuit_scene(&net);

        let on = scene
            .iter()
            .filter(|p| matches!(p, Primitive::Sphere { color, .. } if *color == palette::SIGNAL_ON))
            .count();
        // or_a's anchor, the or gate's output node, and not_or's fed input
        assert_eq!(on, 3);
    }

    #[test]
    fn test_defense_scene_firewall_color() {
        let mut state = DefenseState::demo();
        let color_of = |scene: &Scene| match &scene[2] {
            Primitive::Cuboid { color, .. } => *color,
            other => panic!("expected firewall cuboid, got {other:?}"),
        };

        assert_eq!(color_of(&defense_scene(&state)), palette::FIREWALL_UP.with_alpha(0.5));
        state.toggle_firewall();
        assert_eq!(color_of(&defense_scene(&state)), palette::FIREWALL_DOWN.with_alpha(0.5));
    }

    #[test]
    fn test_neural_scene_counts_and_roles() {
        let net = NeuralNet::demo();
        let scene = neural_scene(&net, 0.0);
        assert_eq!(scene.len(), 12 + 35);

        let inputs = scene
            .iter()
            .filter(|p| matches!(p, Primitive::Sphere { color, .. } if *color == palette::NEURON_INPUT))
            .count();
        assert_eq!(inputs, 4);
    }

    #[test]
    fn test_molecule_scene_bobs() {
        let water = Molecule::water();
        let still = molecule_scene(&water, 0.0);
        let later = molecule_scene(&water, 0.5);

        let y_of = |scene: &Scene| match scene[0] {
            Primitive::Sphere { pos, .. } => pos.y,
            _ => unreachable!(),
        };
        assert_eq!(y_of(&still), 0.0);
        assert!(y_of(&later) > 0.0);
    }
}
