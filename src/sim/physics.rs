//! Gravity sandbox stepper
//!
//! Explicit Euler integration over free-falling bodies with a floor clamp and
//! damped wall reflection. Everything here is a plain function over plain
//! state so the render harness only ever hands in a frame delta.

use glam::Vec3;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Body shape; also selects the floor restitution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShapeKind {
    Sphere,
    Cube,
}

impl ShapeKind {
    /// Fraction of vertical velocity retained (sign-inverted) on a floor bounce
    #[inline]
    pub fn restitution(&self) -> f32 {
        match self {
            ShapeKind::Sphere => RESTITUTION_SPHERE,
            ShapeKind::Cube => RESTITUTION_CUBE,
        }
    }
}

/// A falling body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Body {
    pub id: u32,
    pub shape: ShapeKind,
    pub pos: Vec3,
    pub vel: Vec3,
    /// Accumulated rotation for rendering (spheres roll, cubes tumble)
    pub spin: Vec3,
    /// Hue in degrees, picked at spawn
    pub hue: f32,
}

/// Advance a single body by `dt` seconds.
///
/// Total over its numeric domain: `dt = 0.0` is a no-op and NaN/Infinity
/// inputs propagate unchanged rather than being rejected. A large `dt` can
/// carry a fast body through the floor in a single update, since the clamp
/// only fires when the new `y` lands below the floor offset; callers wanting
/// stability should substep with `consts::SIM_DT`.
pub fn step_body(body: &mut Body, dt: f32) {
    body.vel.y -= GRAVITY * dt;
    body.pos += body.vel * dt;

    // Floor clamp with per-shape damped bounce
    if body.pos.y < FLOOR_OFFSET {
        body.pos.y = FLOOR_OFFSET;
        body.vel.y = -body.vel.y * body.shape.restitution();
    }

    // Only spheres reflect off the walls; cubes keep their heading
    if body.shape == ShapeKind::Sphere {
        if body.pos.x.abs() > WALL_BOUND {
            body.vel.x = -body.vel.x * WALL_DAMPING;
        }
        if body.pos.z.abs() > WALL_BOUND {
            body.vel.z = -body.vel.z * WALL_DAMPING;
        }
    }

    match body.shape {
        ShapeKind::Sphere => {
            body.spin.x += body.vel.x * dt;
            body.spin.z -= body.vel.z * dt;
        }
        ShapeKind::Cube => {
            body.spin.x += body.vel.x * dt;
            body.spin.y += body.vel.y * dt;
        }
    }
}

/// Gravity sandbox state: the bodies dropped so far plus the spawn RNG seed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhysicsState {
    /// Run seed for reproducible spawn positions
    pub seed: u64,
    /// Live bodies, oldest first
    pub bodies: Vec<Body>,
    next_id: u32,
}

impl PhysicsState {
    /// Create an empty sandbox with the given spawn seed
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            bodies: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Drop a new body from above the floor at a seeded-random spot.
    ///
    /// Position and hue derive from the run seed and the entity ID, so a
    /// replayed spawn sequence lands identically. Past `MAX_BODIES` the
    /// oldest body is recycled to make room.
    pub fn spawn(&mut self, shape: ShapeKind) -> u32 {
        let id = self.next_entity_id();
        let mut rng = Pcg32::seed_from_u64(
            self.seed ^ (id as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15),
        );

        let x = (rng.random::<f32>() - 0.5) * SPAWN_SPREAD;
        let z = (rng.random::<f32>() - 0.5) * SPAWN_SPREAD;
        let hue = rng.random::<f32>() * 360.0;

        if self.bodies.len() >= MAX_BODIES {
            self.bodies.remove(0);
        }
        self.bodies.push(Body {
            id,
            shape,
            pos: Vec3::new(x, SPAWN_HEIGHT, z),
            vel: Vec3::ZERO,
            spin: Vec3::ZERO,
            hue,
        });
        id
    }

    /// Remove every body
    pub fn clear(&mut self) {
        self.bodies.clear();
    }

    /// Advance all bodies by `dt`
    pub fn step(&mut self, dt: f32) {
        for body in &mut self.bodies {
            step_body(body, dt);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn sphere_at(y: f32) -> Body {
        Body {
            id: 1,
            shape: ShapeKind::Sphere,
            pos: Vec3::new(0.0, y, 0.0),
            vel: Vec3::ZERO,
            spin: Vec3::ZERO,
            hue: 0.0,
        }
    }

    #[test]
    fn test_zero_delta_is_noop() {
        let mut body = sphere_at(3.0);
        body.vel = Vec3::new(1.0, -2.0, 0.5);
        let before = body.clone();

        step_body(&mut body, 0.0);
        assert_eq!(body.pos, before.pos);
        assert_eq!(body.vel, before.vel);
    }

    #[test]
    fn test_gravity_applies_before_position_update() {
        let mut body = sphere_at(5.0);
        step_body(&mut body, 0.1);

        // vy = -9.8 * 0.1, then y += vy * 0.1
        assert!((body.vel.y - (-0.98)).abs() < 1e-5);
        assert!((body.pos.y - (5.0 - 0.098)).abs() < 1e-5);
    }

    #[test]
    fn test_floor_bounce_restitution_per_shape() {
        // vy becomes -4.98 after gravity; the step lands below the floor
        let mut sphere = sphere_at(0.6);
        sphere.vel.y = -4.0;
        step_body(&mut sphere, 0.1);
        assert_eq!(sphere.pos.y, FLOOR_OFFSET);
        assert!((sphere.vel.y - 4.98 * RESTITUTION_SPHERE).abs() < 1e-4);

        let mut cube = sphere_at(0.6);
        cube.shape = ShapeKind::Cube;
        cube.vel.y = -4.0;
        step_body(&mut cube, 0.1);
        assert_eq!(cube.pos.y, FLOOR_OFFSET);
        assert!((cube.vel.y - 4.98 * RESTITUTION_CUBE).abs() < 1e-4);
    }

    #[test]
    fn test_wall_reflection_spheres_only() {
        let mut sphere = sphere_at(2.0);
        sphere.pos.x = 10.5;
        sphere.vel.x = 3.0;
        step_body(&mut sphere, 0.016);
        assert!((sphere.vel.x - (-3.0 * WALL_DAMPING)).abs() < 1e-5);

        let mut cube = sphere_at(2.0);
        cube.shape = ShapeKind::Cube;
        cube.pos.x = 10.5;
        cube.vel.x = 3.0;
        step_body(&mut cube, 0.016);
        assert!(cube.vel.x > 0.0, "cubes never wall-bounce");
    }

    #[test]
    fn test_nan_propagates_unguarded() {
        let mut body = sphere_at(f32::NAN);
        step_body(&mut body, 0.016);
        assert!(body.pos.y.is_nan());
    }

    #[test]
    fn test_drop_bounces_then_settles_on_floor() {
        // Body at (0, 8, 0), zero velocity, 0.016 s steps: must bounce at
        // least twice and end up resting within epsilon of the floor.
        let mut body = sphere_at(8.0);
        let mut bounces = 0;

        for _ in 0..20_000 {
            let falling = body.vel.y < 0.0;
            step_body(&mut body, 0.016);
            if falling && body.vel.y > 0.0 && body.pos.y == FLOOR_OFFSET {
                bounces += 1;
            }
        }

        assert!(bounces >= 2, "expected at least 2 bounces, got {bounces}");
        assert!((body.pos.y - FLOOR_OFFSET).abs() < 0.05);
        assert!(body.vel.y.abs() < 1.0);
    }

    #[test]
    fn test_spawn_is_seed_deterministic() {
        let mut a = PhysicsState::new(7);
        let mut b = PhysicsState::new(7);
        a.spawn(ShapeKind::Sphere);
        b.spawn(ShapeKind::Sphere);

        assert_eq!(a.bodies[0].pos, b.bodies[0].pos);
        assert_eq!(a.bodies[0].hue, b.bodies[0].hue);
        assert_eq!(a.bodies[0].pos.y, SPAWN_HEIGHT);
        assert!(a.bodies[0].pos.x.abs() <= SPAWN_SPREAD / 2.0);
    }

    #[test]
    fn test_spawn_recycles_oldest_at_cap() {
        let mut state = PhysicsState::new(1);
        for _ in 0..MAX_BODIES + 3 {
            state.spawn(ShapeKind::Cube);
        }
        assert_eq!(state.bodies.len(), MAX_BODIES);
        // Oldest three were recycled
        assert_eq!(state.bodies[0].id, 4);
    }

    proptest! {
        #[test]
        fn prop_floor_clamp_holds(start_y in 0.6f32..20.0, dt in 0.001f32..0.05) {
            let mut body = sphere_at(start_y);
            for _ in 0..2_000 {
                step_body(&mut body, dt);
                prop_assert!(body.pos.y >= FLOOR_OFFSET);
            }
        }
    }
}
