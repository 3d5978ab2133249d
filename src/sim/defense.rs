//! Network-defense lab stepper
//!
//! Packets stream from the internet side toward the local network and wrap
//! around; a firewall plane at x = 0 can be toggled, holding hostile traffic
//! at the boundary while benign traffic passes.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::consts::{PACKET_BOUND, PACKET_SPEED};

/// Traffic classification of a packet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Threat {
    Benign,
    Suspicious,
    Malicious,
}

impl Threat {
    /// Whether the firewall stops this traffic when active
    #[inline]
    pub fn is_filtered(&self) -> bool {
        !matches!(self, Threat::Benign)
    }
}

/// A packet traveling left to right across the scene
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Packet {
    pub id: u32,
    pub pos: Vec3,
    pub threat: Threat,
    /// Held at the firewall plane
    pub blocked: bool,
}

/// Network-defense lab state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefenseState {
    pub firewall_active: bool,
    pub packets: Vec<Packet>,
    /// Packets stopped at the plane since the lab started
    pub blocked_count: u64,
}

impl DefenseState {
    pub fn new() -> Self {
        Self {
            firewall_active: true,
            packets: Vec::new(),
            blocked_count: 0,
        }
    }

    /// The lab's demo traffic: two threats and one benign packet on
    /// staggered lanes
    pub fn demo() -> Self {
        let mut state = Self::new();
        state.packets = vec![
            Packet {
                id: 1,
                pos: Vec3::new(-4.0, 0.0, 0.0),
                threat: Threat::Malicious,
                blocked: false,
            },
            Packet {
                id: 2,
                pos: Vec3::new(-2.0, 0.5, 0.0),
                threat: Threat::Suspicious,
                blocked: false,
            },
            Packet {
                id: 3,
                pos: Vec3::new(-3.0, -0.5, 0.0),
                threat: Threat::Benign,
                blocked: false,
            },
        ];
        state
    }

    /// Flip the firewall; held packets are released when it goes down
    pub fn toggle_firewall(&mut self) -> bool {
        self.firewall_active = !self.firewall_active;
        if !self.firewall_active {
            for packet in &mut self.packets {
                packet.blocked = false;
            }
        }
        self.firewall_active
    }

    /// Advance all packets by `dt` seconds
    pub fn step(&mut self, dt: f32) {
        for packet in &mut self.packets {
            if packet.blocked {
                continue;
            }

            let next_x = packet.pos.x + PACKET_SPEED * dt;

            // Filtered traffic stops exactly at the plane instead of crossing
            if self.firewall_active
                && packet.threat.is_filtered()
                && packet.pos.x < 0.0
                && next_x >= 0.0
            {
                packet.pos.x = 0.0;
                packet.blocked = true;
                self.blocked_count += 1;
                continue;
            }

            packet.pos.x = next_x;
            if packet.pos.x > PACKET_BOUND {
                packet.pos.x = -PACKET_BOUND;
            }
        }
    }
}

impl Default for DefenseState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(state: &mut DefenseState, seconds: f32) {
        let dt = 1.0 / 60.0;
        let steps = (seconds / dt).round() as usize;
        for _ in 0..steps {
            state.step(dt);
        }
    }

    #[test]
    fn test_packets_wrap_at_bound() {
        let mut state = DefenseState::new();
        state.firewall_active = false;
        state.packets.push(Packet {
            id: 1,
            pos: Vec3::new(3.9, 0.0, 0.0),
            threat: Threat::Benign,
            blocked: false,
        });

        run(&mut state, 0.1);
        assert!(state.packets[0].pos.x < -3.0, "packet should wrap to the far side");
    }

    #[test]
    fn test_active_firewall_holds_threats_at_plane() {
        let mut state = DefenseState::demo();
        run(&mut state, 3.0);

        let malicious = &state.packets[0];
        assert!(malicious.blocked);
        assert_eq!(malicious.pos.x, 0.0);
        assert_eq!(state.blocked_count, 2);
    }

    #[test]
    fn test_benign_traffic_passes_through() {
        let mut state = DefenseState::demo();
        run(&mut state, 1.5);

        let benign = &state.packets[2];
        assert!(!benign.blocked);
        assert!(benign.pos.x > 0.0);
    }

    #[test]
    fn test_disabling_firewall_releases_held_packets() {
        let mut state = DefenseState::demo();
        run(&mut state, 3.0);
        assert!(state.packets[0].blocked);

        state.toggle_firewall();
        assert!(!state.firewall_active);
        run(&mut state, 0.5);
        assert!(state.packets[0].pos.x > 0.0);
    }

    #[test]
    fn test_zero_delta_is_noop() {
        let mut state = DefenseState::demo();
        let before = state.packets[0].pos;
        state.step(0.0);
        assert_eq!(state.packets[0].pos, before);
    }
}
