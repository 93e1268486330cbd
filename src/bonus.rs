//! Floating bonus scheduler.
//!
//! Spawns and expiry are plain deadlines against the host-supplied
//! wall clock, checked from the regular tick. No host timers are
//! registered, so cancelling or rescheduling can never race a callback.

/// Earliest delay before the next bonus appears (1 minute).
pub const SPAWN_MIN_MS: f64 = 60.0 * 1000.0;
/// Latest delay before the next bonus appears (10 minutes).
pub const SPAWN_MAX_MS: f64 = 600.0 * 1000.0;
/// How long an uncollected bonus stays available (1 minute).
pub const LIFESPAN_MS: f64 = 60.0 * 1000.0;

const COIN_BONUS_MIN_SECONDS: u32 = 30;
const COIN_BONUS_MAX_SECONDS: u32 = 120;
const TROPHY_BONUS_MIN: u32 = 1;
const TROPHY_BONUS_MAX: u32 = 3;

/// The numeric payload of a floating bonus.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BonusKind {
    /// A lump worth this many seconds of current coin production.
    Coins { production_seconds: u32 },
    /// A flat trophy grant.
    Trophies { amount: u32 },
}

/// A bonus currently on screen, waiting to be collected.
#[derive(Clone, Debug)]
pub struct ActiveBonus {
    pub kind: BonusKind,
    pub expires_at_ms: f64,
}

/// Deadline-based spawner. `update` drives it; `collect` consumes the
/// active bonus; `cancel` clears everything on shutdown.
pub struct BonusSpawner {
    rng_state: u32,
    next_spawn_at_ms: Option<f64>,
    active: Option<ActiveBonus>,
}

impl BonusSpawner {
    pub fn new(seed: u32) -> Self {
        Self {
            // xorshift32 has a fixed point at zero.
            rng_state: if seed == 0 { 0x9E37_79B9 } else { seed },
            next_spawn_at_ms: None,
            active: None,
        }
    }

    fn next_random(&mut self) -> u32 {
        let mut x = self.rng_state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.rng_state = x;
        x
    }

    /// Uniform in `[lo, hi]` inclusive.
    fn random_range(&mut self, lo: u32, hi: u32) -> u32 {
        lo + self.next_random() % (hi - lo + 1)
    }

    fn schedule_next(&mut self, now_ms: f64) {
        let delay = self.random_range(SPAWN_MIN_MS as u32, SPAWN_MAX_MS as u32) as f64;
        self.next_spawn_at_ms = Some(now_ms + delay);
    }

    fn roll_kind(&mut self) -> BonusKind {
        // 70% coins, 30% trophies.
        if self.next_random() % 100 < 70 {
            BonusKind::Coins {
                production_seconds: self
                    .random_range(COIN_BONUS_MIN_SECONDS, COIN_BONUS_MAX_SECONDS),
            }
        } else {
            BonusKind::Trophies {
                amount: self.random_range(TROPHY_BONUS_MIN, TROPHY_BONUS_MAX),
            }
        }
    }

    /// Advance the spawner to `now_ms`. Returns true when a new bonus
    /// appeared during this update.
    pub fn update(&mut self, now_ms: f64) -> bool {
        if !now_ms.is_finite() {
            return false;
        }

        if let Some(active) = &self.active {
            if now_ms >= active.expires_at_ms {
                // Expired uncollected.
                self.active = None;
                self.schedule_next(now_ms);
            }
            return false;
        }

        match self.next_spawn_at_ms {
            None => {
                self.schedule_next(now_ms);
                false
            }
            Some(at) if now_ms >= at => {
                let kind = self.roll_kind();
                self.active = Some(ActiveBonus {
                    kind,
                    expires_at_ms: now_ms + LIFESPAN_MS,
                });
                self.next_spawn_at_ms = None;
                true
            }
            Some(_) => false,
        }
    }

    /// The bonus currently available, if any.
    pub fn active(&self) -> Option<&ActiveBonus> {
        self.active.as_ref()
    }

    /// Take the active bonus if it has not expired, and schedule the next
    /// spawn. Returns None when nothing is collectable.
    pub fn collect(&mut self, now_ms: f64) -> Option<BonusKind> {
        let active = self.active.take()?;
        if now_ms.is_finite() && now_ms < active.expires_at_ms {
            self.schedule_next(now_ms);
            Some(active.kind)
        } else {
            // Too late; treat like expiry.
            self.schedule_next(active.expires_at_ms);
            None
        }
    }

    /// Drop any pending schedule and active bonus (process shutdown).
    pub fn cancel(&mut self) {
        self.next_spawn_at_ms = None;
        self.active = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_update_only_schedules() {
        let mut spawner = BonusSpawner::new(1);
        assert!(!spawner.update(0.0));
        assert!(spawner.active().is_none());
    }

    #[test]
    fn spawns_within_the_configured_window() {
        let mut spawner = BonusSpawner::new(7);
        spawner.update(0.0);
        // Nothing can appear before the minimum delay.
        assert!(!spawner.update(SPAWN_MIN_MS - 1.0));
        // By the maximum delay a bonus must have appeared.
        let spawned = spawner.update(SPAWN_MAX_MS + 1.0);
        assert!(spawned);
        assert!(spawner.active().is_some());
    }

    #[test]
    fn collect_consumes_and_reschedules() {
        let mut spawner = BonusSpawner::new(7);
        spawner.update(0.0);
        spawner.update(SPAWN_MAX_MS + 1.0);
        let kind = spawner.collect(SPAWN_MAX_MS + 2.0);
        assert!(kind.is_some());
        assert!(spawner.active().is_none());
        // The next one cannot appear before another minimum delay.
        assert!(!spawner.update(SPAWN_MAX_MS + 2.0 + SPAWN_MIN_MS - 1.0));
    }

    #[test]
    fn uncollected_bonus_expires() {
        let mut spawner = BonusSpawner::new(3);
        spawner.update(0.0);
        spawner.update(SPAWN_MAX_MS + 1.0);
        let expiry = spawner.active().unwrap().expires_at_ms;
        assert!(!spawner.update(expiry + 1.0));
        assert!(spawner.active().is_none());
        assert!(spawner.collect(expiry + 2.0).is_none());
    }

    #[test]
    fn collect_after_expiry_yields_nothing() {
        let mut spawner = BonusSpawner::new(3);
        spawner.update(0.0);
        spawner.update(SPAWN_MAX_MS + 1.0);
        let expiry = spawner.active().unwrap().expires_at_ms;
        assert!(spawner.collect(expiry + 100.0).is_none());
    }

    #[test]
    fn cancel_clears_everything() {
        let mut spawner = BonusSpawner::new(3);
        spawner.update(0.0);
        spawner.update(SPAWN_MAX_MS + 1.0);
        spawner.cancel();
        assert!(spawner.active().is_none());
        assert!(spawner.collect(SPAWN_MAX_MS + 2.0).is_none());
    }

    #[test]
    fn rolled_payloads_stay_in_range() {
        let mut spawner = BonusSpawner::new(42);
        for _ in 0..200 {
            match spawner.roll_kind() {
                BonusKind::Coins { production_seconds } => {
                    assert!((COIN_BONUS_MIN_SECONDS..=COIN_BONUS_MAX_SECONDS)
                        .contains(&production_seconds));
                }
                BonusKind::Trophies { amount } => {
                    assert!((TROPHY_BONUS_MIN..=TROPHY_BONUS_MAX).contains(&amount));
                }
            }
        }
    }

    #[test]
    fn nonfinite_clock_is_ignored() {
        let mut spawner = BonusSpawner::new(9);
        assert!(!spawner.update(f64::NAN));
        spawner.update(0.0);
        assert!(!spawner.update(f64::INFINITY));
    }
}
