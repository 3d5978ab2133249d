//! Local learner progress
//!
//! Persisted to LocalStorage; tracks per-lab visits and best quiz scores.
//! Purely local convenience state: the backend owns the real course
//! progress, this is only what the labs show between navigations.

use serde::{Deserialize, Serialize};

use crate::labs::LabId;
use crate::quiz::PASS_PERCENT;

/// Progress for one lab
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabRecord {
    pub lab: LabId,
    pub visits: u32,
    pub best_quiz_percent: Option<u32>,
    /// Set once a quiz for this lab has been passed
    pub completed: bool,
}

/// All locally tracked progress
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Progress {
    pub records: Vec<LabRecord>,
}

impl Progress {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "edusim_progress";

    pub fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    fn record_mut(&mut self, lab: LabId) -> &mut LabRecord {
        if let Some(i) = self.records.iter().position(|r| r.lab == lab) {
            return &mut self.records[i];
        }
        self.records.push(LabRecord {
            lab,
            visits: 0,
            best_quiz_percent: None,
            completed: false,
        });
        self.records.last_mut().unwrap()
    }

    pub fn record(&self, lab: LabId) -> Option<&LabRecord> {
        self.records.iter().find(|r| r.lab == lab)
    }

    /// Count a lab visit
    pub fn record_visit(&mut self, lab: LabId) {
        self.record_mut(lab).visits += 1;
    }

    /// Record a quiz result; returns true if it set a new best
    pub fn record_quiz(&mut self, lab: LabId, percent: u32) -> bool {
        let record = self.record_mut(lab);
        if percent >= PASS_PERCENT {
            record.completed = true;
        }

        let improved = record.best_quiz_percent.is_none_or(|best| percent > best);
        if improved {
            record.best_quiz_percent = Some(percent);
        }
        improved
    }

    pub fn best(&self, lab: LabId) -> Option<u32> {
        self.record(lab).and_then(|r| r.best_quiz_percent)
    }

    /// Labs with a passed quiz
    pub fn completed_count(&self) -> usize {
        self.records.iter().filter(|r| r.completed).count()
    }

    /// Load progress from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Ok(progress) = serde_json::from_str::<Progress>(&json) {
                    log::info!("Loaded progress for {} labs", progress.records.len());
                    return progress;
                }
            }
        }

        log::info!("No saved progress, starting fresh");
        Self::new()
    }

    /// Save progress to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Progress saved ({} labs)", self.records.len());
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::new()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}
