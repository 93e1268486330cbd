//! The engine controller: one owner for the progression state, the frame
//! clock and the bonus spawner.
//!
//! All mutation goes through the methods here and runs to completion
//! before the next call — no ambient statics, no interior mutability.
//! The UI layer only ever sees `&ClimberState` snapshots and forwards
//! user intents; every ineligible intent is a silent no-op.

use crate::bonus::{ActiveBonus, BonusSpawner};
use crate::clock::FrameClock;
use crate::logic;
use crate::offline::{resolve_offline, OfflineGains};
use crate::save;
use crate::state::{ClimberState, UpgradeKind};

/// Result of restoring a persisted snapshot.
#[derive(Debug)]
pub enum LoadOutcome {
    /// Snapshot applied; gains cover the time away.
    Restored { offline: OfflineGains },
    /// Data was unreadable; a fresh game was started. Non-fatal, but the
    /// caller should tell the player.
    CorruptDiscarded,
    /// Data predates `MIN_COMPATIBLE_VERSION`; a fresh game was started.
    IncompatibleDiscarded,
}

pub struct ClimberEngine {
    state: ClimberState,
    clock: FrameClock,
    spawner: BonusSpawner,
}

impl ClimberEngine {
    pub fn new(seed: u32) -> Self {
        Self {
            state: ClimberState::new(),
            clock: FrameClock::new(),
            spawner: BonusSpawner::new(seed),
        }
    }

    /// Read-only snapshot for display.
    pub fn state(&self) -> &ClimberState {
        &self.state
    }

    /// The bonus currently on offer, if any.
    pub fn active_bonus(&self) -> Option<&ActiveBonus> {
        self.spawner.active()
    }

    /// Regular frame tick: advances the simulation by the real time since
    /// the previous tick and drives bonus spawning.
    pub fn tick(&mut self, now_ms: f64) -> &ClimberState {
        let delta = self.clock.update(now_ms);
        logic::advance(&mut self.state, delta);
        if self.spawner.update(now_ms) {
            self.state.add_log("A floating gift drifts by!", true);
        }
        &self.state
    }

    /// Advance by an explicit duration (tests, headless hosts).
    pub fn advance(&mut self, delta_seconds: f64) -> &ClimberState {
        logic::advance(&mut self.state, delta_seconds);
        &self.state
    }

    pub fn click(&mut self) -> &ClimberState {
        logic::click(&mut self.state);
        &self.state
    }

    pub fn purchase_speed_upgrade(&mut self) -> &ClimberState {
        logic::purchase_upgrade(&mut self.state, UpgradeKind::Speed);
        &self.state
    }

    pub fn purchase_shoe_upgrade(&mut self) -> &ClimberState {
        logic::purchase_upgrade(&mut self.state, UpgradeKind::Shoe);
        &self.state
    }

    pub fn purchase_clicker_upgrade(&mut self) -> &ClimberState {
        logic::purchase_upgrade(&mut self.state, UpgradeKind::Clicker);
        &self.state
    }

    pub fn claim_trophy(&mut self) -> &ClimberState {
        logic::claim_trophy(&mut self.state);
        &self.state
    }

    pub fn unlock_next_tower(&mut self) -> &ClimberState {
        logic::unlock_next_tower(&mut self.state);
        &self.state
    }

    pub fn select_tower(&mut self, level: u32) -> &ClimberState {
        logic::select_tower(&mut self.state, level);
        &self.state
    }

    pub fn toggle_auto_claim(&mut self) -> &ClimberState {
        logic::toggle_auto_claim(&mut self.state);
        &self.state
    }

    pub fn toggle_auto_next_tower(&mut self) -> &ClimberState {
        logic::toggle_auto_next_tower(&mut self.state);
        &self.state
    }

    /// Collect the active floating bonus, applying its numeric effect.
    /// No-op when nothing is active or it already expired.
    pub fn collect_bonus(&mut self, now_ms: f64) -> &ClimberState {
        if let Some(kind) = self.spawner.collect(now_ms) {
            logic::apply_bonus(&mut self.state, &kind);
        }
        &self.state
    }

    /// Snapshot the current state as a JSON save payload.
    pub fn save_payload(&self, now_ms: f64) -> Result<String, serde_json::Error> {
        save::to_json(&save::extract_save(&self.state, now_ms))
    }

    /// Restore from a JSON save payload, crediting offline progress for
    /// the wall-clock gap since the snapshot was taken.
    pub fn restore(&mut self, json: &str, now_ms: f64) -> LoadOutcome {
        let data = match save::from_json(json) {
            Ok(d) => d,
            Err(_) => {
                self.state = ClimberState::new();
                self.clock.reset();
                return LoadOutcome::CorruptDiscarded;
            }
        };
        if data.version < save::MIN_COMPATIBLE_VERSION {
            self.state = ClimberState::new();
            self.clock.reset();
            return LoadOutcome::IncompatibleDiscarded;
        }

        let mut state = ClimberState::new();
        save::apply_save(&mut state, &data);
        self.state = state;
        let elapsed_seconds = (now_ms - data.save_time_ms) / 1000.0;
        let offline = resolve_offline(&mut self.state, elapsed_seconds);
        self.clock.reset();
        LoadOutcome::Restored { offline }
    }

    /// Explicit full reset to a fresh game.
    pub fn reset(&mut self) {
        self.state = ClimberState::new();
        self.clock.reset();
        self.spawner.cancel();
    }

    /// Drop scheduled bonus work on shutdown so nothing outlives the host.
    pub fn shutdown(&mut self) {
        self.spawner.cancel();
    }
}
