//! Gate-network evaluator
//!
//! Named boolean inputs feed a DAG of AND/OR/NOT gates. Construction
//! validates the wiring (duplicate names, unknown signals, wrong arity, and
//! feedback cycles are all explicit errors) and fixes a topological
//! evaluation order. Evaluation recomputes every output from the current
//! inputs; nothing is cached between calls.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// Gate primitives supported by the lab
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum GateKind {
    And,
    Or,
    Not,
}

impl GateKind {
    /// Number of inputs the gate takes
    pub fn arity(&self) -> usize {
        match self {
            GateKind::And | GateKind::Or => 2,
            GateKind::Not => 1,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GateKind::And => "AND",
            GateKind::Or => "OR",
            GateKind::Not => "NOT",
        }
    }
}

/// Reference to a signal source: a raw input toggle or another gate's output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    Input(usize),
    Gate(usize),
}

/// A wired gate
#[derive(Debug, Clone)]
pub struct Gate {
    pub name: String,
    pub kind: GateKind,
    pub inputs: Vec<Signal>,
}

/// Errors raised while building a network from a spec
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CircuitError {
    #[error("duplicate signal name: {0}")]
    DuplicateSignal(String),
    #[error("gate {gate} references unknown signal {signal}")]
    UnknownSignal { gate: String, signal: String },
    #[error("gate {gate} ({kind}) takes {expected} inputs, got {got}")]
    BadArity {
        gate: String,
        kind: &'static str,
        expected: usize,
        got: usize,
    },
    #[error("feedback cycle through gate {0}")]
    Cycle(String),
}

/// Declarative network description, deserializable from lesson content
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkSpec {
    pub inputs: Vec<String>,
    pub gates: Vec<GateSpec>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GateSpec {
    pub name: String,
    pub kind: GateKind,
    pub inputs: Vec<String>,
}

/// A validated gate network with toggleable inputs
#[derive(Debug, Clone)]
pub struct GateNetwork {
    input_names: Vec<String>,
    input_values: Vec<bool>,
    gates: Vec<Gate>,
    /// Gate indices in dependency order
    eval_order: Vec<usize>,
    index: HashMap<String, Signal>,
}

impl GateNetwork {
    /// Build and validate a network from its spec
    pub fn from_spec(spec: &NetworkSpec) -> Result<Self, CircuitError> {
        let mut index: HashMap<String, Signal> = HashMap::new();

        for (i, name) in spec.inputs.iter().enumerate() {
            if index.insert(name.clone(), Signal::Input(i)).is_some() {
                return Err(CircuitError::DuplicateSignal(name.clone()));
            }
        }
        for (g, gate) in spec.gates.iter().enumerate() {
            if index.insert(gate.name.clone(), Signal::Gate(g)).is_some() {
                return Err(CircuitError::DuplicateSignal(gate.name.clone()));
            }
        }

        let mut gates = Vec::with_capacity(spec.gates.len());
        for gate in &spec.gates {
            if gate.inputs.len() != gate.kind.arity() {
                return Err(CircuitError::BadArity {
                    gate: gate.name.clone(),
                    kind: gate.kind.as_str(),
                    expected: gate.kind.arity(),
                    got: gate.inputs.len(),
                });
            }
            let mut wired = Vec::with_capacity(gate.inputs.len());
            for source in &gate.inputs {
                let signal =
                    index
                        .get(source)
                        .copied()
                        .ok_or_else(|| CircuitError::UnknownSignal {
                            gate: gate.name.clone(),
                            signal: source.clone(),
                        })?;
                wired.push(signal);
            }
            gates.push(Gate {
                name: gate.name.clone(),
                kind: gate.kind,
                inputs: wired,
            });
        }

        let eval_order = topological_order(&gates)?;

        Ok(Self {
            input_names: spec.inputs.clone(),
            input_values: vec![false; spec.inputs.len()],
            gates,
            eval_order,
            index,
        })
    }

    /// The lab's fixed demo circuit: two first-layer gates feeding a NOT and
    /// a final AND, so toggles visibly propagate two levels deep.
    pub fn demo() -> Self {
        let spec = NetworkSpec {
            inputs: ["and_a", "and_b", "or_a", "or_b"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            gates: vec![
                GateSpec {
                    name: "and".into(),
                    kind: GateKind::And,
                    inputs: vec!["and_a".into(), "and_b".into()],
                },
                GateSpec {
                    name: "or".into(),
                    kind: GateKind::Or,
                    inputs: vec!["or_a".into(), "or_b".into()],
                },
                GateSpec {
                    name: "not_or".into(),
                    kind: GateKind::Not,
                    inputs: vec!["or".into()],
                },
                GateSpec {
                    name: "main_out".into(),
                    kind: GateKind::And,
                    inputs: vec!["and".into(), "not_or".into()],
                },
            ],
        };
        // The demo wiring is known-good
        Self::from_spec(&spec).expect("demo circuit is acyclic")
    }

    /// Raw input names in declaration order
    pub fn input_names(&self) -> &[String] {
        &self.input_names
    }

    /// Current raw input values, aligned with `input_names`
    pub fn input_values(&self) -> &[bool] {
        &self.input_values
    }

    /// Wired gates in declaration order
    pub fn gates(&self) -> &[Gate] {
        &self.gates
    }

    /// Flip a raw input; returns the new value, or `None` for unknown names
    /// or gate outputs (which cannot be driven directly).
    pub fn toggle(&mut self, name: &str) -> Option<bool> {
        match self.index.get(name) {
            Some(Signal::Input(i)) => {
                self.input_values[*i] = !self.input_values[*i];
                Some(self.input_values[*i])
            }
            _ => None,
        }
    }

    /// Set a raw input to an explicit value
    pub fn set_input(&mut self, name: &str, value: bool) -> Option<bool> {
        match self.index.get(name) {
            Some(Signal::Input(i)) => {
                self.input_values[*i] = value;
                Some(value)
            }
            _ => None,
        }
    }

    /// Recompute every gate output from the current inputs.
    ///
    /// Returns values aligned with `gates()`. Always a full recomputation.
    pub fn evaluate(&self) -> Vec<bool> {
        let mut values = vec![false; self.gates.len()];
        for &g in &self.eval_order {
            let gate = &self.gates[g];
            values[g] = match gate.kind {
                GateKind::Not => !self.resolve(gate.inputs[0], &values),
                GateKind::And => {
                    self.resolve(gate.inputs[0], &values) && self.resolve(gate.inputs[1], &values)
                }
                GateKind::Or => {
                    self.resolve(gate.inputs[0], &values) || self.resolve(gate.inputs[1], &values)
                }
            };
        }
        values
    }

    /// Value of a named signal after a full re-evaluation
    pub fn output(&self, name: &str) -> Option<bool> {
        let signal = *self.index.get(name)?;
        let values = self.evaluate();
        Some(self.resolve(signal, &values))
    }

    /// Resolve a signal against raw inputs and already-evaluated gate values
    pub fn resolve(&self, signal: Signal, gate_values: &[bool]) -> bool {
        match signal {
            Signal::Input(i) => self.input_values[i],
            Signal::Gate(g) => gate_values[g],
        }
    }
}

/// Kahn's algorithm over gate→gate edges; leftovers mean a feedback cycle
fn topological_order(gates: &[Gate]) -> Result<Vec<usize>, CircuitError> {
    let n = gates.len();
    let mut indegree = vec![0usize; n];
    let mut dependents: Vec<Vec<usize>> = vec![Vec::new(); n];

    for (g, gate) in gates.iter().enumerate() {
        for signal in &gate.inputs {
            if let Signal::Gate(src) = signal {
                indegree[g] += 1;
                dependents[*src].push(g);
            }
        }
    }

    let mut ready: Vec<usize> = (0..n).filter(|&g| indegree[g] == 0).collect();
    let mut order = Vec::with_capacity(n);
    while let Some(g) = ready.pop() {
        order.push(g);
        for &dep in &dependents[g] {
            indegree[dep] -= 1;
            if indegree[dep] == 0 {
                ready.push(dep);
            }
        }
    }

    if order.len() < n {
        let stuck = (0..n)
            .find(|&g| indegree[g] > 0)
            .map(|g| gates[g].name.clone())
            .unwrap_or_default();
        return Err(CircuitError::Cycle(stuck));
    }
    Ok(order)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_gate_spec() -> NetworkSpec {
        NetworkSpec {
            inputs: vec!["a".into(), "b".into()],
            gates: vec![
                GateSpec {
                    name: "or".into(),
                    kind: GateKind::Or,
                    inputs: vec!["a".into(), "b".into()],
                },
                GateSpec {
                    name: "nor".into(),
                    kind: GateKind::Not,
                    inputs: vec!["or".into()],
                },
            ],
        }
    }

    #[test]
    fn test_and_truth_table() {
        let spec = NetworkSpec {
            inputs: vec!["a".into(), "b".into()],
            gates: vec![GateSpec {
                name: "out".into(),
                kind: GateKind::And,
                inputs: vec!["a".into(), "b".into()],
            }],
        };
        let mut net = GateNetwork::from_spec(&spec).unwrap();

        net.set_input("a", true);
        net.set_input("b", true);
        assert_eq!(net.output("out"), Some(true));

        net.set_input("b", false);
        assert_eq!(net.output("out"), Some(false));
    }

    #[test]
    fn test_de_morgan_exhaustive() {
        // NOT(OR(a, b)) == !a && !b over all four input combinations
        let mut net = GateNetwork::from_spec(&two_gate_spec()).unwrap();
        for (a, b) in [(false, false), (false, true), (true, false), (true, true)] {
            net.set_input("a", a);
            net.set_input("b", b);
            assert_eq!(net.output("nor"), Some(!a && !b), "a={a} b={b}");
        }
    }

    #[test]
    fn test_no_stale_cache_after_toggle() {
        let mut net = GateNetwork::from_spec(&two_gate_spec()).unwrap();
        assert_eq!(net.output("nor"), Some(true));
        net.toggle("a");
        assert_eq!(net.output("nor"), Some(false));
        net.toggle("a");
        assert_eq!(net.output("nor"), Some(true));
    }

    #[test]
    fn test_demo_circuit_propagates_two_layers() {
        let mut net = GateNetwork::demo();
        assert_eq!(net.output("main_out"), Some(false));

        net.set_input("and_a", true);
        net.set_input("and_b", true);
        // or_a/or_b still low, so NOT(or) is high
        assert_eq!(net.output("main_out"), Some(true));

        net.set_input("or_a", true);
        assert_eq!(net.output("main_out"), Some(false));
    }

    #[test]
    fn test_forward_references_are_allowed() {
        // Gate declared before the gate it reads from
        let spec = NetworkSpec {
            inputs: vec!["a".into()],
            gates: vec![
                GateSpec {
                    name: "second".into(),
                    kind: GateKind::Not,
                    inputs: vec!["first".into()],
                },
                GateSpec {
                    name: "first".into(),
                    kind: GateKind::Not,
                    inputs: vec!["a".into()],
                },
            ],
        };
        let net = GateNetwork::from_spec(&spec).unwrap();
        assert_eq!(net.output("second"), Some(false));
    }

    #[test]
    fn test_cycle_is_an_error() {
        let spec = NetworkSpec {
            inputs: vec!["a".into()],
            gates: vec![
                GateSpec {
                    name: "x".into(),
                    kind: GateKind::And,
                    inputs: vec!["a".into(), "y".into()],
                },
                GateSpec {
                    name: "y".into(),
                    kind: GateKind::Not,
                    inputs: vec!["x".into()],
                },
            ],
        };
        assert!(matches!(
            GateNetwork::from_spec(&spec),
            Err(CircuitError::Cycle(_))
        ));
    }

    #[test]
    fn test_unknown_signal_is_an_error() {
        let spec = NetworkSpec {
            inputs: vec!["a".into()],
            gates: vec![GateSpec {
                name: "x".into(),
                kind: GateKind::Not,
                inputs: vec!["ghost".into()],
            }],
        };
        assert_eq!(
            GateNetwork::from_spec(&spec).unwrap_err(),
            CircuitError::UnknownSignal {
                gate: "x".into(),
                signal: "ghost".into(),
            }
        );
    }

    #[test]
    fn test_bad_arity_is_an_error() {
        let spec = NetworkSpec {
            inputs: vec!["a".into()],
            gates: vec![GateSpec {
                name: "x".into(),
                kind: GateKind::And,
                inputs: vec!["a".into()],
            }],
        };
        assert!(matches!(
            GateNetwork::from_spec(&spec),
            Err(CircuitError::BadArity { expected: 2, got: 1, .. })
        ));
    }

    #[test]
    fn test_duplicate_name_is_an_error() {
        let spec = NetworkSpec {
            inputs: vec!["a".into(), "a".into()],
            gates: Vec::new(),
        };
        assert_eq!(
            GateNetwork::from_spec(&spec).unwrap_err(),
            CircuitError::DuplicateSignal("a".into())
        );
    }

    #[test]
    fn test_toggle_rejects_gate_outputs() {
        let mut net = GateNetwork::from_spec(&two_gate_spec()).unwrap();
        assert_eq!(net.toggle("or"), None);
        assert_eq!(net.toggle("missing"), None);
        assert_eq!(net.toggle("a"), Some(true));
    }

    #[test]
    fn test_spec_round_trips_through_json() {
        let json = r#"{
            "inputs": ["a", "b"],
            "gates": [{"name": "out", "kind": "AND", "inputs": ["a", "b"]}]
        }"#;
        let spec: NetworkSpec = serde_json::from_str(json).unwrap();
        assert_eq!(spec.gates[0].kind, GateKind::And);
        assert!(GateNetwork::from_spec(&spec).is_ok());
    }
}
