// SPDX-License-Identifier: MIT OR Apache-2.0
//! Slot-indexed playback progress tracking.
//!
//! One hub serves every bot in a scene. Each bot registers a slot and its
//! player pushes progress/completion reports into it; scrub bars or logs
//! read the hub instead of poking at player internals.

use parking_lot::Mutex;
use roverplay_timeline::ProgressSink;
use std::sync::Arc;

#[derive(Debug, Clone, Default)]
struct SlotState {
    name: String,
    latest: f64,
    completions: u64,
}

/// Progress recorder shared by all players in a scene
#[derive(Debug, Default)]
pub struct ProgressHub {
    slots: Vec<SlotState>,
}

#[allow(dead_code)] // Intentionally kept for API completeness
impl ProgressHub {
    /// Create an empty hub
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a hub behind the shared handle players expect
    pub fn shared() -> Arc<Mutex<ProgressHub>> {
        Arc::new(Mutex::new(Self::new()))
    }

    /// Register a named slot; the returned index tags future reports
    pub fn register(&mut self, name: impl Into<String>) -> usize {
        self.slots.push(SlotState {
            name: name.into(),
            latest: 0.0,
            completions: 0,
        });
        self.slots.len() - 1
    }

    /// Latest reported elapsed time for a slot
    pub fn latest(&self, slot: usize) -> Option<f64> {
        self.slots.get(slot).map(|s| s.latest)
    }

    /// Number of completed playback cycles for a slot
    pub fn completions(&self, slot: usize) -> u64 {
        self.slots.get(slot).map_or(0, |s| s.completions)
    }

    /// Registered slot count
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether no slot has been registered
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl ProgressSink for ProgressHub {
    fn report_progress(&mut self, slot: usize, elapsed: f64) {
        if let Some(state) = self.slots.get_mut(slot) {
            state.latest = elapsed;
        }
    }

    fn report_done(&mut self, slot: usize) {
        if let Some(state) = self.slots.get_mut(slot) {
            state.completions += 1;
            state.latest = 0.0;
            tracing::debug!(bot = %state.name, cycles = state.completions, "playback cycle finished");
        }
    }
}
