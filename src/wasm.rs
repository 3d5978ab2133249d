//! Browser session boundary
//!
//! Thin wasm-bindgen wrapper the view shell drives: construct a lab by slug,
//! feed frame deltas, read scenes back as JSON, and push input events. All
//! simulation state stays on this side; the shell only ever sees plain data.

use wasm_bindgen::prelude::*;

use crate::consts::SIM_DT;
use crate::labs::{LabId, LabState, TickInput};
use crate::progress::Progress;
use crate::quiz::{QuizSession, QuizSpec};
use crate::runner::{FixedStepper, IntervalTimer};
use crate::scene::circuit_layout;
use crate::settings::Settings;
use crate::sim::physics::ShapeKind;

#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
}

fn to_js_err(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// One live lab owned by the shell between navigations
#[wasm_bindgen]
pub struct LabSession {
    lab: LabId,
    state: LabState,
    stepper: FixedStepper,
    input: TickInput,
    settings: Settings,
}

#[wasm_bindgen]
impl LabSession {
    /// Create a session for a lab slug; unknown slugs are an error
    #[wasm_bindgen(constructor)]
    pub fn new(slug: &str, seed: u64) -> Result<LabSession, JsValue> {
        let lab = LabId::from_slug(slug).map_err(to_js_err)?;
        log::info!("Starting lab {} (seed {seed})", lab.slug());

        let mut progress = Progress::load();
        progress.record_visit(lab);
        progress.save();

        let settings = Settings::load();
        let mut state = LabState::new(lab, seed);
        if let LabState::Sorting { timer, .. } = &mut state {
            *timer = IntervalTimer::from_millis(settings.effective_sort_interval_ms());
        }

        Ok(LabSession {
            lab,
            state,
            stepper: FixedStepper::new(SIM_DT),
            input: TickInput::default(),
            settings,
        })
    }

    pub fn title(&self) -> String {
        self.lab.title().to_string()
    }

    pub fn slug(&self) -> String {
        self.lab.slug().to_string()
    }

    /// Feed one frame's delta (seconds); runs fixed steps and clears
    /// one-shot inputs once a step has consumed them
    pub fn frame(&mut self, dt: f32) {
        for _ in 0..self.stepper.advance(dt) {
            self.state.tick(&self.input, SIM_DT);
            self.input = TickInput::default();
        }
    }

    /// Current scene as a JSON array of primitives
    pub fn scene_json(&self) -> String {
        serde_json::to_string(&self.state.scene()).unwrap_or_else(|_| "[]".to_string())
    }

    /// Circuit toggle anchors as JSON (empty outside the circuit lab)
    pub fn toggles_json(&self) -> String {
        let LabState::Circuit(network) = &self.state else {
            return "[]".to_string();
        };
        serde_json::to_string(&circuit_layout(network).toggles)
            .unwrap_or_else(|_| "[]".to_string())
    }

    /// Pause ticking (navigation away, tab hidden). Idempotent.
    pub fn pause(&mut self) {
        self.stepper.stop();
    }

    /// Resume ticking. Idempotent.
    pub fn resume(&mut self) {
        self.stepper.start();
    }

    // === Input events (one-shot, consumed by the next tick) ===

    /// Drop a body in the physics lab: "sphere" or "box"
    pub fn spawn(&mut self, shape: &str) {
        self.input.spawn = match shape {
            "box" | "cube" => Some(ShapeKind::Cube),
            _ => Some(ShapeKind::Sphere),
        };
    }

    pub fn clear_bodies(&mut self) {
        self.input.clear = true;
    }

    pub fn start_sort(&mut self) {
        self.input.start_sort = true;
    }

    pub fn reset_sort(&mut self) {
        self.input.reset_sort = true;
    }

    pub fn toggle_signal(&mut self, name: &str) {
        self.input.toggle_signal = Some(name.to_string());
    }

    pub fn toggle_firewall(&mut self) {
        self.input.toggle_firewall = true;
    }

    /// Animations preference from saved settings
    pub fn animations_enabled(&self) -> bool {
        self.settings.animations_enabled()
    }
}

/// One attempt at a lesson quiz
#[wasm_bindgen]
pub struct QuizHandle {
    session: QuizSession,
    lab: Option<LabId>,
}

#[wasm_bindgen]
impl QuizHandle {
    /// Parse quiz JSON; malformed content is an error, not a crash
    #[wasm_bindgen(constructor)]
    pub fn new(json: &str, lab_slug: Option<String>) -> Result<QuizHandle, JsValue> {
        let spec = QuizSpec::parse(json).map_err(to_js_err)?;
        let lab = match lab_slug.as_deref() {
            Some(slug) => Some(LabId::from_slug(slug).map_err(to_js_err)?),
            None => None,
        };
        Ok(QuizHandle {
            session: QuizSession::new(spec),
            lab,
        })
    }

    pub fn question_count(&self) -> usize {
        self.session.question_count()
    }

    pub fn current_index(&self) -> usize {
        self.session.current_index()
    }

    /// Current question as JSON, or null when finished
    pub fn current_question_json(&self) -> String {
        match self.session.current_question() {
            Some(question) => {
                serde_json::to_string(question).unwrap_or_else(|_| "null".to_string())
            }
            None => "null".to_string(),
        }
    }

    /// Answer by option index; returns `{correct, finished}` as JSON.
    /// Records progress against the linked lab once finished.
    pub fn answer(&mut self, option: usize) -> String {
        let result = self.session.answer(option);

        if result.finished {
            if let Some(lab) = self.lab {
                let mut progress = Progress::load();
                if progress.record_quiz(lab, self.session.percent()) {
                    log::info!(
                        "New best for {}: {}%",
                        lab.slug(),
                        self.session.percent()
                    );
                }
                progress.save();
            }
        }

        serde_json::to_string(&result).unwrap_or_else(|_| "{}".to_string())
    }

    pub fn percent(&self) -> u32 {
        self.session.percent()
    }

    pub fn passed(&self) -> bool {
        self.session.passed()
    }
}
