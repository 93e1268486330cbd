//! Offline catch-up: converts a long absence into the same net state
//! change that continuous ticking would have produced, using closed-form
//! math instead of replaying ticks.

use num_bigint::BigUint;

use crate::format::format_number;
use crate::logic;
use crate::state::ClimberState;

/// Longest absence credited on resume (8 hours).
pub const MAX_OFFLINE_SECONDS: f64 = 8.0 * 60.0 * 60.0;

/// What the climber earned while the player was away, for the
/// "welcome back" summary.
#[derive(Clone, Debug, PartialEq)]
pub struct OfflineGains {
    pub coins: BigUint,
    pub trophies: BigUint,
}

impl OfflineGains {
    pub fn is_empty(&self) -> bool {
        self.coins == BigUint::from(0u32) && self.trophies == BigUint::from(0u32)
    }
}

/// Apply up to `elapsed_seconds` of absence to `state` and report the gains.
///
/// Elapsed time is clamped to `[0, MAX_OFFLINE_SECONDS]`; malformed input
/// counts as zero. With auto-claim enabled, whole ascents are granted in
/// closed form and the remainder simulated as a partial climb, leaving the
/// tower mid-climb. With auto-claim disabled, the climber lands exactly at
/// the top if reachable and waits there; surplus time is discarded.
///
/// Offline resolution never unlocks towers; auto-next chaining resumes on
/// the next live tick.
pub fn resolve_offline(state: &mut ClimberState, elapsed_seconds: f64) -> OfflineGains {
    let elapsed = if elapsed_seconds.is_finite() {
        elapsed_seconds.clamp(0.0, MAX_OFFLINE_SECONDS)
    } else {
        0.0
    };

    let coins_before = state.coins.clone();
    let trophies_before = state.trophies.clone();

    if state.auto_claim_enabled {
        catch_up_auto(state, elapsed);
    } else {
        catch_up_manual(state, elapsed);
    }

    let gains = OfflineGains {
        coins: &state.coins - coins_before,
        trophies: &state.trophies - trophies_before,
    };
    if !gains.is_empty() {
        state.add_log(
            &format!(
                "While away: +{} coins, +{} trophies",
                format_number(&gains.coins),
                format_number(&gains.trophies)
            ),
            true,
        );
    }
    gains
}

fn catch_up_auto(state: &mut ClimberState, mut elapsed: f64) {
    let speed = state.climb_speed();
    let target = state.current_tower_height();

    // A claim pending from before the absence.
    if state.is_at_top {
        claim_silent(state);
    }

    // Finish the ascent that was in progress.
    if state.height > 0.0 {
        let time_to_top = (target - state.height) / speed;
        if elapsed < time_to_top {
            logic::climb_to(state, state.height + speed * elapsed);
            return;
        }
        logic::climb_to(state, target);
        claim_silent(state);
        elapsed -= time_to_top;
    }

    // Whole ascents, closed form.
    let seconds_per_climb = target / speed;
    let full_climbs = (elapsed / seconds_per_climb) as u64;
    if full_climbs > 0 {
        let count = BigUint::from(full_climbs);
        state.coins += &count * BigUint::from(target as u64) * state.coins_per_meter();
        state.trophies += count * state.claim_reward();
        // The division above can round up to a whole climb, leaving the
        // subtraction a hair below zero.
        elapsed = (elapsed - full_climbs as f64 * seconds_per_climb).max(0.0);
    }

    // Fractional remainder: left mid-climb.
    logic::climb_to(state, (speed * elapsed).min(target));
    state.is_at_top = state.height >= target;
    if state.is_at_top {
        claim_silent(state);
    }
}

fn catch_up_manual(state: &mut ClimberState, elapsed: f64) {
    if state.is_at_top {
        return;
    }
    let speed = state.climb_speed();
    let target = state.current_tower_height();
    let time_to_top = (target - state.height) / speed;
    if elapsed >= time_to_top {
        logic::climb_to(state, target);
        state.is_at_top = true;
    } else {
        logic::climb_to(state, state.height + speed * elapsed);
    }
}

/// Claim without the per-claim log entry; offline logs one summary line.
fn claim_silent(state: &mut ClimberState) {
    state.trophies += state.claim_reward();
    state.height = 0.0;
    state.is_at_top = false;
}
