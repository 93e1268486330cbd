//! Save/load for the climbing game.
//!
//! ## Versioning policy
//!
//! - `SAVE_VERSION`: the current save format version. Increment when
//!   adding fields.
//! - `MIN_COMPATIBLE_VERSION`: the oldest version that can still be
//!   loaded. Field additions alone do not bump it (missing fields fill
//!   in with defaults); only a breaking change to the meaning of an
//!   existing field does.
//!
//! Currency fields are arbitrary-precision and stored as `"<digits>n"`
//! strings so that no magnitude ever loses precision in JSON.

use num_bigint::BigUint;
use serde::{Deserialize, Serialize};

use crate::format::bigint_str;
use crate::state::{max_towers, ClimberState, UpgradeKind};

/// Current save format version.
pub const SAVE_VERSION: u32 = 1;

/// Oldest save format version still accepted.
pub const MIN_COMPATIBLE_VERSION: u32 = 1;

/// Suggested interval between periodic snapshots, in seconds.
pub const AUTOSAVE_INTERVAL_SECONDS: f64 = 30.0;

/// localStorage key.
#[cfg(target_arch = "wasm32")]
const STORAGE_KEY: &str = "idle_climber_save";

/// A persisted snapshot: the game state plus the wall-clock time it was
/// taken, which the loader uses to credit offline progress.
#[derive(Serialize, Deserialize)]
pub struct SaveData {
    pub version: u32,
    pub save_time_ms: f64,
    game: GameSave,
}

/// Serialized form of `ClimberState`. Transient UI state (the message
/// log) is not persisted. Missing fields load as the fresh-game defaults,
/// so saves written before a field existed stay valid.
#[derive(Serialize, Deserialize)]
#[serde(default)]
struct GameSave {
    height: f64,
    #[serde(with = "bigint_str")]
    coins: BigUint,
    #[serde(with = "bigint_str")]
    trophies: BigUint,
    speed_level: u32,
    shoe_level: u32,
    clicker_level: u32,
    #[serde(with = "bigint_str")]
    upgrade_cost: BigUint,
    #[serde(with = "bigint_str")]
    shoe_upgrade_cost: BigUint,
    #[serde(with = "bigint_str")]
    clicker_upgrade_cost: BigUint,
    tower_level: u32,
    highest_tower_unlocked: u32,
    is_at_top: bool,
    auto_claim_enabled: bool,
    auto_next_tower_enabled: bool,
    total_clicks: u64,
    bonuses_collected: u32,
}

impl Default for GameSave {
    fn default() -> Self {
        game_save_of(&ClimberState::new())
    }
}

fn game_save_of(state: &ClimberState) -> GameSave {
    GameSave {
        height: state.height,
        coins: state.coins.clone(),
        trophies: state.trophies.clone(),
        speed_level: state.speed_level,
        shoe_level: state.shoe_level,
        clicker_level: state.clicker_level,
        upgrade_cost: state.upgrade_cost.clone(),
        shoe_upgrade_cost: state.shoe_upgrade_cost.clone(),
        clicker_upgrade_cost: state.clicker_upgrade_cost.clone(),
        tower_level: state.tower_level,
        highest_tower_unlocked: state.highest_tower_unlocked,
        is_at_top: state.is_at_top,
        auto_claim_enabled: state.auto_claim_enabled,
        auto_next_tower_enabled: state.auto_next_tower_enabled,
        total_clicks: state.total_clicks,
        bonuses_collected: state.bonuses_collected,
    }
}

/// Snapshot the state for persistence.
pub fn extract_save(state: &ClimberState, save_time_ms: f64) -> SaveData {
    SaveData {
        version: SAVE_VERSION,
        save_time_ms,
        game: game_save_of(state),
    }
}

/// Restore a snapshot over `state` (normally a fresh default), repairing
/// any invariants a hand-edited or stale save might violate.
pub fn apply_save(state: &mut ClimberState, save: &SaveData) {
    let game = &save.game;
    state.coins = game.coins.clone();
    state.trophies = game.trophies.clone();
    state.speed_level = game.speed_level.max(1);
    state.shoe_level = game.shoe_level;
    state.clicker_level = game.clicker_level.max(1);
    state.upgrade_cost = repaired_cost(&game.upgrade_cost, UpgradeKind::Speed);
    state.shoe_upgrade_cost = repaired_cost(&game.shoe_upgrade_cost, UpgradeKind::Shoe);
    state.clicker_upgrade_cost = repaired_cost(&game.clicker_upgrade_cost, UpgradeKind::Clicker);
    state.highest_tower_unlocked = game.highest_tower_unlocked.clamp(1, max_towers());
    state.tower_level = game.tower_level.clamp(1, state.highest_tower_unlocked);
    state.auto_claim_enabled = game.auto_claim_enabled;
    state.auto_next_tower_enabled = game.auto_next_tower_enabled;
    state.total_clicks = game.total_clicks;
    state.bonuses_collected = game.bonuses_collected;

    let target = state.current_tower_height();
    let height = if game.height.is_finite() {
        game.height.clamp(0.0, target)
    } else {
        0.0
    };
    state.height = height;
    // At the top exactly when parked at the target awaiting a claim.
    state.is_at_top = game.is_at_top || height >= target;
    if state.is_at_top {
        state.height = target;
    }
}

/// A saved cost below the initial price would make the cost curve
/// collapse (`ceil(0 * m) = 0`, every later purchase free). Floor it.
fn repaired_cost(saved: &BigUint, kind: UpgradeKind) -> BigUint {
    let floor = BigUint::from(kind.initial_cost());
    if saved < &floor {
        floor
    } else {
        saved.clone()
    }
}

/// Serialize a snapshot to JSON.
pub fn to_json(data: &SaveData) -> Result<String, serde_json::Error> {
    serde_json::to_string(data)
}

/// Parse a snapshot from JSON. Any structural error means the save is
/// corrupt; the caller falls back to a fresh state.
pub fn from_json(json: &str) -> Result<SaveData, serde_json::Error> {
    serde_json::from_str(json)
}

/// Access localStorage. WASM only.
#[cfg(target_arch = "wasm32")]
fn get_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok()?
}

/// Persist the game to localStorage. Failures are logged to the console
/// and swallowed.
#[cfg(target_arch = "wasm32")]
pub fn save_game(state: &ClimberState, now_ms: f64) {
    let data = extract_save(state, now_ms);
    let json = match to_json(&data) {
        Ok(j) => j,
        Err(e) => {
            web_sys::console::warn_1(&format!("idle-climber: save serialization failed: {e}").into());
            return;
        }
    };
    if let Some(storage) = get_storage() {
        if let Err(e) = storage.set_item(STORAGE_KEY, &json) {
            web_sys::console::warn_1(
                &format!("idle-climber: localStorage write failed: {e:?}").into(),
            );
        }
    }
}

/// Read the raw stored snapshot, if any. Parsing and version policy are
/// the engine's call.
#[cfg(target_arch = "wasm32")]
pub fn load_raw() -> Option<String> {
    let storage = get_storage()?;
    storage.get_item(STORAGE_KEY).ok().flatten()
}

/// Remove the stored snapshot.
#[cfg(target_arch = "wasm32")]
pub fn delete_save() {
    if let Some(storage) = get_storage() {
        let _ = storage.remove_item(STORAGE_KEY);
    }
}
