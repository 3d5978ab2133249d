//! edusim - interactive learning-lab simulation core
//!
//! Core modules:
//! - `sim`: Deterministic lab steppers (physics, sorting, circuit, defense, neural, molecule)
//! - `scene`: Render adapter mapping lab state to plain visual primitives
//! - `labs`: Lab catalog and unified state dispatch
//! - `runner`: Tick scheduling, decoupled from the transitions it drives
//! - `quiz`: Quiz content parsing and scoring
//! - `progress` / `settings`: LocalStorage-backed local state

pub mod labs;
pub mod progress;
pub mod quiz;
pub mod runner;
pub mod scene;
pub mod settings;
pub mod sim;
#[cfg(target_arch = "wasm32")]
pub mod wasm;

pub use labs::{LabError, LabId, LabState, TickInput};
pub use progress::Progress;
pub use settings::{QualityPreset, Settings};

/// Simulation configuration constants
pub mod consts {
    /// Fixed simulation timestep (120 Hz for smooth stepping)
    pub const SIM_DT: f32 = 1.0 / 120.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Gravity acceleration (units/s², downward)
    pub const GRAVITY: f32 = 9.8;
    /// Resting height of body centers on the floor
    pub const FLOOR_OFFSET: f32 = 0.5;
    /// Bound on |x| and |z| before a sphere reflects off a wall
    pub const WALL_BOUND: f32 = 10.0;
    /// Velocity retained (sign-inverted) on a wall reflection
    pub const WALL_DAMPING: f32 = 0.9;
    /// Floor bounce velocity retained by spheres
    pub const RESTITUTION_SPHERE: f32 = 0.8;
    /// Floor bounce velocity retained by cubes
    pub const RESTITUTION_CUBE: f32 = 0.6;
    /// Height new bodies drop from
    pub const SPAWN_HEIGHT: f32 = 8.0;
    /// Horizontal spread of spawn positions (centered on the origin)
    pub const SPAWN_SPREAD: f32 = 5.0;
    /// Cap on live bodies in the physics lab (oldest are recycled)
    pub const MAX_BODIES: usize = 64;

    /// Sorting lab tick interval
    pub const SORT_TICK_MS: u32 = 300;

    /// Packet speed in the defense lab (0.05/frame at 60 fps, in units/s)
    pub const PACKET_SPEED: f32 = 3.0;
    /// Packets wrap from +PACKET_BOUND back to -PACKET_BOUND
    pub const PACKET_BOUND: f32 = 4.0;

    /// Neural pulse rate: the lit connection advances this many times per second
    pub const PULSE_RATE: f32 = 5.0;
}
