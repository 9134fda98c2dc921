// SPDX-License-Identifier: MIT OR Apache-2.0
//! The simulation scene.
//!
//! Bots register in an ordered registry. Additions and removals requested
//! while a tick is in flight queue up and apply at the start of the next
//! tick, so the registry never mutates while it is being iterated.

use crate::bot::BotEntity;
use crate::config::SimConfig;
use crate::progress::ProgressHub;
use indexmap::IndexMap;
use parking_lot::Mutex;
use roverplay_timeline::SharedProgressSink;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

/// Unique identifier for a scene entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityId(pub Uuid);

impl EntityId {
    /// Create a new random entity ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for EntityId {
    fn default() -> Self {
        Self::new()
    }
}

/// Scene holding every simulated bot
pub struct Scene {
    config: SimConfig,
    hub: Arc<Mutex<ProgressHub>>,
    bots: IndexMap<EntityId, BotEntity>,
    requested_add: Vec<BotEntity>,
    requested_remove: Vec<EntityId>,
    dirty: bool,
}

#[allow(dead_code)] // Intentionally kept for API completeness
impl Scene {
    /// Create an empty scene
    pub fn new(config: SimConfig) -> Self {
        Self {
            config,
            hub: ProgressHub::shared(),
            bots: IndexMap::new(),
            requested_add: Vec::new(),
            requested_remove: Vec::new(),
            dirty: false,
        }
    }

    /// Simulation parameters
    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Shared progress hub fed by every bot's player
    pub fn hub(&self) -> &Arc<Mutex<ProgressHub>> {
        &self.hub
    }

    /// Add a bot immediately; wires it into the progress hub
    pub fn add_bot(&mut self, mut bot: BotEntity) -> EntityId {
        let id = bot.id();
        let slot = self.hub.lock().register(bot.name());
        let sink: SharedProgressSink = self.hub.clone();
        bot.attach_progress_sink(sink, slot);
        tracing::info!(bot = %bot.name(), slot, "bot added");
        self.bots.insert(id, bot);
        id
    }

    /// Queue a bot for addition at the start of the next tick
    pub fn request_add_bot(&mut self, bot: BotEntity) -> EntityId {
        let id = bot.id();
        self.requested_add.push(bot);
        self.dirty = true;
        id
    }

    /// Queue a bot for removal at the start of the next tick
    pub fn request_remove_bot(&mut self, id: EntityId) {
        self.requested_remove.push(id);
        self.dirty = true;
    }

    /// Restart playback on every bot
    pub fn start_all(&mut self) {
        for bot in self.bots.values_mut() {
            bot.start();
        }
    }

    /// Advance every bot one tick, applying queued mutations first
    pub fn tick(&mut self, dt: f64) {
        if self.dirty {
            self.apply_requests();
        }
        for bot in self.bots.values_mut() {
            bot.update(dt);
        }
    }

    fn apply_requests(&mut self) {
        for id in self.requested_remove.drain(..) {
            self.bots.shift_remove(&id);
            // A removal also cancels a still-pending addition.
            self.requested_add.retain(|bot| bot.id() != id);
        }
        let pending: Vec<BotEntity> = self.requested_add.drain(..).collect();
        for bot in pending {
            self.add_bot(bot);
        }
        self.dirty = false;
    }

    /// Look up a bot
    pub fn bot(&self, id: EntityId) -> Option<&BotEntity> {
        self.bots.get(&id)
    }

    /// Look up a bot mutably
    pub fn bot_mut(&mut self, id: EntityId) -> Option<&mut BotEntity> {
        self.bots.get_mut(&id)
    }

    /// All bots in insertion order
    pub fn bots(&self) -> impl Iterator<Item = &BotEntity> {
        self.bots.values()
    }

    /// Number of active bots
    pub fn bot_count(&self) -> usize {
        self.bots.len()
    }
}
