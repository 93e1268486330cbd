//! Progression engine for an idle tower-climbing game.
//!
//! Everything that decides how the game evolves lives here: the climb
//! simulation, the upgrade economy, tower milestones, floating bonuses,
//! offline catch-up and versioned saves. Rendering and input are the
//! host's problem; it drives [`ClimberEngine`] with wall-clock
//! timestamps and reads [`ClimberState`] snapshots back.
//!
//! All currencies are arbitrary-precision integers, so late-game
//! balances never saturate or lose precision in saves.

pub mod bonus;
pub mod clock;
pub mod engine;
pub mod format;
pub mod logic;
pub mod offline;
pub mod save;
pub mod state;

mod simulator;

pub use bonus::{ActiveBonus, BonusKind};
pub use clock::FrameClock;
pub use engine::{ClimberEngine, LoadOutcome};
pub use format::format_number;
pub use offline::{OfflineGains, MAX_OFFLINE_SECONDS};
pub use save::{SaveData, AUTOSAVE_INTERVAL_SECONDS, MIN_COMPATIBLE_VERSION, SAVE_VERSION};
pub use state::{ClimberState, LogEntry, UpgradeKind};
