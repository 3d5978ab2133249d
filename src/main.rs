//! edusim entry point
//!
//! Native builds run a short headless demo of each lab stepper; the browser
//! shell drives the wasm API in `edusim::wasm` instead.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("edusim (native) starting headless demo...");

    demo_sort();
    demo_physics();
    demo_circuit();
    demo_catalog();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is edusim::wasm::init, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn demo_sort() {
    use edusim::sim::sorting::SortState;

    let mut state = SortState::demo();
    let mut ticks = 0u32;
    while !state.is_done() {
        state = state.step();
        ticks += 1;
    }
    log::info!("sorting: {:?} in {ticks} ticks", state.values);
}

#[cfg(not(target_arch = "wasm32"))]
fn demo_physics() {
    use edusim::consts::SIM_DT;
    use edusim::sim::physics::{step_body, PhysicsState, ShapeKind};

    let mut state = PhysicsState::new(42);
    state.spawn(ShapeKind::Sphere);

    let mut bounces = 0u32;
    for _ in 0..2_000 {
        let body = &mut state.bodies[0];
        let falling = body.vel.y < 0.0;
        step_body(body, SIM_DT);
        if falling && body.vel.y > 0.0 {
            bounces += 1;
        }
    }
    log::info!(
        "physics: sphere settled at y={:.3} after {bounces} bounces",
        state.bodies[0].pos.y
    );
}

#[cfg(not(target_arch = "wasm32"))]
fn demo_circuit() {
    use edusim::sim::circuit::GateNetwork;

    let mut net = GateNetwork::demo();
    net.set_input("and_a", true);
    net.set_input("and_b", true);
    log::info!(
        "circuit: main_out={} with both AND inputs high",
        net.output("main_out").unwrap_or(false)
    );
}

#[cfg(not(target_arch = "wasm32"))]
fn demo_catalog() {
    use edusim::consts::SIM_DT;
    use edusim::labs::{LabId, LabState, TickInput};

    for lab in LabId::ALL {
        let mut state = LabState::new(lab, 7);
        state.tick(&TickInput::default(), SIM_DT);
        log::info!("{}: {} primitives", lab.slug(), state.scene().len());
    }
}
