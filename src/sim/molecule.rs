//! Molecule viewer model
//!
//! Static ball-and-stick geometry; the only motion is a gentle bob the
//! render adapter applies from the elapsed clock.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Chemical elements used by the viewer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Element {
    Hydrogen,
    Oxygen,
}

impl Element {
    pub fn symbol(&self) -> &'static str {
        match self {
            Element::Hydrogen => "H",
            Element::Oxygen => "O",
        }
    }

    /// Display radius of the atom sphere
    pub fn radius(&self) -> f32 {
        match self {
            Element::Hydrogen => 0.3,
            Element::Oxygen => 0.5,
        }
    }
}

/// A positioned atom
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Atom {
    pub element: Element,
    pub pos: Vec3,
}

/// A stick bond between two atoms (indices into the atom list)
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Bond {
    pub from: usize,
    pub to: usize,
}

/// Ball-and-stick molecule model
#[derive(Debug, Clone, Serialize)]
pub struct Molecule {
    pub name: &'static str,
    pub atoms: Vec<Atom>,
    pub bonds: Vec<Bond>,
}

impl Molecule {
    /// Water: oxygen at the origin, hydrogens above at ±0.8 on x
    pub fn water() -> Self {
        Self {
            name: "H2O",
            atoms: vec![
                Atom {
                    element: Element::Oxygen,
                    pos: Vec3::ZERO,
                },
                Atom {
                    element: Element::Hydrogen,
                    pos: Vec3::new(0.8, 0.6, 0.0),
                },
                Atom {
                    element: Element::Hydrogen,
                    pos: Vec3::new(-0.8, 0.6, 0.0),
                },
            ],
            bonds: vec![Bond { from: 0, to: 1 }, Bond { from: 0, to: 2 }],
        }
    }

    /// Vertical bob offset at `elapsed` seconds
    #[inline]
    pub fn bob_offset(elapsed: f32) -> f32 {
        (elapsed * 2.0).sin() * 0.1
    }
}
