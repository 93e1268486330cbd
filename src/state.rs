/// Tower climber progression state definitions.
use num_bigint::BigUint;

/// Target height in meters for each tower tier, in unlock order.
/// Climbing past the last entry is allowed: the final height repeats.
pub const TOWER_HEIGHTS: [u64; 17] = [
    1, 5, 10, 50, 100, 250, 500, 1_000, 2_500, 5_000, 10_000, 25_000, 50_000, 100_000, 250_000,
    500_000, 1_000_000,
];

/// Meters per second at speed level 1, shoe level 0.
pub const BASE_SPEED_PER_SECOND: f64 = 1.0;

/// Multiplicative climb-speed bonus per shoe level (10%).
pub const SHOE_BONUS_PER_LEVEL: f64 = 0.1;

/// Number of tower tiers.
pub fn max_towers() -> u32 {
    TOWER_HEIGHTS.len() as u32
}

/// Kinds of purchasable stat upgrades.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UpgradeKind {
    /// Raises climb speed and coins per click.
    Speed,
    /// Multiplicative climb-speed bonus.
    Shoe,
    /// Raises coins per click.
    Clicker,
}

impl UpgradeKind {
    /// Display name.
    pub fn name(&self) -> &str {
        match self {
            UpgradeKind::Speed => "Speed",
            UpgradeKind::Shoe => "Shoes",
            UpgradeKind::Clicker => "Clicker",
        }
    }

    /// Cost of the first purchase, in coins.
    pub fn initial_cost(&self) -> u64 {
        match self {
            UpgradeKind::Speed => 10,
            UpgradeKind::Shoe => 100,
            UpgradeKind::Clicker => 25,
        }
    }

    /// Starting level for a fresh game.
    pub fn initial_level(&self) -> u32 {
        match self {
            UpgradeKind::Speed => 1,
            UpgradeKind::Shoe => 0,
            UpgradeKind::Clicker => 1,
        }
    }

    /// Cost growth multiplier as an exact rational (numerator, denominator).
    /// Speed 1.15, Shoes 1.8, Clicker 1.2. The next cost is the ceiling of
    /// `cost * multiplier`, computed in integer arithmetic.
    pub fn cost_multiplier(&self) -> (u32, u32) {
        match self {
            UpgradeKind::Speed => (23, 20),
            UpgradeKind::Shoe => (9, 5),
            UpgradeKind::Clicker => (6, 5),
        }
    }
}

/// Message log entry surfaced to the UI.
#[derive(Clone, Debug)]
pub struct LogEntry {
    pub text: String,
    pub is_important: bool,
}

/// Full mutable state of a climbing game. Owned exclusively by the engine;
/// callers only ever see a shared reference.
#[derive(Clone, Debug)]
pub struct ClimberState {
    /// Meters climbed in the current ascent. `0 <= height <= tower target`.
    pub height: f64,
    /// Spendable currency, earned per whole meter climbed.
    pub coins: BigUint,
    /// Milestone currency, earned by claiming completed ascents.
    pub trophies: BigUint,
    pub speed_level: u32,
    pub shoe_level: u32,
    pub clicker_level: u32,
    pub upgrade_cost: BigUint,
    pub shoe_upgrade_cost: BigUint,
    pub clicker_upgrade_cost: BigUint,
    /// Currently selected tower tier (1-based).
    pub tower_level: u32,
    /// Highest tier ever unlocked. Never decreases.
    pub highest_tower_unlocked: u32,
    /// True while parked at the top awaiting a trophy claim.
    pub is_at_top: bool,
    pub auto_claim_enabled: bool,
    pub auto_next_tower_enabled: bool,
    /// Lifetime manual clicks.
    pub total_clicks: u64,
    /// Lifetime floating bonuses collected.
    pub bonuses_collected: u32,
    /// Message log.
    pub log: Vec<LogEntry>,
}

impl ClimberState {
    pub fn new() -> Self {
        Self {
            height: 0.0,
            coins: BigUint::from(0u32),
            trophies: BigUint::from(0u32),
            speed_level: UpgradeKind::Speed.initial_level(),
            shoe_level: UpgradeKind::Shoe.initial_level(),
            clicker_level: UpgradeKind::Clicker.initial_level(),
            upgrade_cost: BigUint::from(UpgradeKind::Speed.initial_cost()),
            shoe_upgrade_cost: BigUint::from(UpgradeKind::Shoe.initial_cost()),
            clicker_upgrade_cost: BigUint::from(UpgradeKind::Clicker.initial_cost()),
            tower_level: 1,
            highest_tower_unlocked: 1,
            is_at_top: false,
            auto_claim_enabled: false,
            auto_next_tower_enabled: true,
            total_clicks: 0,
            bonuses_collected: 0,
            log: Vec::new(),
        }
    }

    /// Target height for a tier, clamped to the table bounds.
    pub fn tower_height(level: u32) -> f64 {
        let idx = (level.max(1) as usize - 1).min(TOWER_HEIGHTS.len() - 1);
        TOWER_HEIGHTS[idx] as f64
    }

    /// Target height of the currently selected tower.
    pub fn current_tower_height(&self) -> f64 {
        Self::tower_height(self.tower_level)
    }

    /// Effective climb speed in meters per second.
    pub fn climb_speed(&self) -> f64 {
        let shoe_bonus = 1.0 + SHOE_BONUS_PER_LEVEL * self.shoe_level as f64;
        BASE_SPEED_PER_SECOND * self.speed_level as f64 * shoe_bonus
    }

    /// Coins earned per whole meter climbed. Higher towers pay more.
    pub fn coins_per_meter(&self) -> BigUint {
        BigUint::from(self.tower_level)
    }

    /// Coins earned per manual click.
    pub fn coins_per_click(&self) -> BigUint {
        BigUint::from(self.clicker_level) * BigUint::from(self.speed_level)
    }

    /// Trophy cost to unlock the next tier: `5 * 10^highest_unlocked`.
    pub fn unlock_cost(&self) -> BigUint {
        BigUint::from(5u32) * BigUint::from(10u32).pow(self.highest_tower_unlocked)
    }

    /// Trophy reward for claiming the current tower: `5 * 10^(tier-1)`.
    pub fn claim_reward(&self) -> BigUint {
        BigUint::from(5u32) * BigUint::from(10u32).pow(self.tower_level - 1)
    }

    /// Whether every tier has been unlocked.
    pub fn is_final_tower_unlocked(&self) -> bool {
        self.highest_tower_unlocked >= max_towers()
    }

    /// Current cost of an upgrade kind.
    pub fn cost_of(&self, kind: UpgradeKind) -> &BigUint {
        match kind {
            UpgradeKind::Speed => &self.upgrade_cost,
            UpgradeKind::Shoe => &self.shoe_upgrade_cost,
            UpgradeKind::Clicker => &self.clicker_upgrade_cost,
        }
    }

    /// Current level of an upgrade kind.
    pub fn level_of(&self, kind: UpgradeKind) -> u32 {
        match kind {
            UpgradeKind::Speed => self.speed_level,
            UpgradeKind::Shoe => self.shoe_level,
            UpgradeKind::Clicker => self.clicker_level,
        }
    }

    pub fn add_log(&mut self, text: &str, is_important: bool) {
        self.log.push(LogEntry {
            text: text.to_string(),
            is_important,
        });
        if self.log.len() > 50 {
            self.log.remove(0);
        }
    }
}

impl Default for ClimberState {
    fn default() -> Self {
        Self::new()
    }
}
