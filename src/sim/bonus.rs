//! Bonus round: a chance-based score doubler
//!
//! Opens when the score enters a new tier, waits for the player to spin,
//! shows the result for a moment, then hands over to a short countdown
//! before play resumes. The session stays suspended the whole time.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

/// Reel faces, in the fixed cyclic order used to break ties
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReelSymbol {
    Gift,
    Bell,
    Star,
    Tree,
    Candy,
    Snowflake,
}

impl ReelSymbol {
    pub const ALL: [ReelSymbol; 6] = [
        ReelSymbol::Gift,
        ReelSymbol::Bell,
        ReelSymbol::Star,
        ReelSymbol::Tree,
        ReelSymbol::Candy,
        ReelSymbol::Snowflake,
    ];

    /// Following symbol in cyclic order
    pub fn next(self) -> Self {
        Self::ALL[(self as usize + 1) % Self::ALL.len()]
    }

    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BonusOutcome {
    Win,
    Lose,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum BonusPhase {
    Closed,
    /// Waiting for the player to spin
    Idle,
    Spinning { elapsed: f32, shuffle_timer: f32 },
    /// Result on screen for `display_left` more seconds
    Resolved { outcome: BonusOutcome, display_left: f32 },
}

/// What `BonusRound::advance` did this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BonusStep {
    Nothing,
    Resolved(BonusOutcome),
    Closed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BonusRound {
    pub phase: BonusPhase,
    pub reels: [ReelSymbol; 3],
    /// Spin already taken for the current trigger
    pub used_this_trigger: bool,
    /// Highest score tier already consumed
    pub trigger_tier: u64,
}

impl Default for BonusRound {
    fn default() -> Self {
        Self {
            phase: BonusPhase::Closed,
            reels: [ReelSymbol::Gift, ReelSymbol::Bell, ReelSymbol::Star],
            used_this_trigger: false,
            trigger_tier: 0,
        }
    }
}

/// Score tier; a zero tier size disables the bonus round
pub fn tier_for(score: u64, tier_size: u64) -> u64 {
    score.checked_div(tier_size).unwrap_or(0)
}

/// Make three reels pairwise distinct. A symbol that collides with an
/// earlier reel is advanced in cyclic order until it is free, so this
/// always terminates.
pub fn distinct_reels(mut reels: [ReelSymbol; 3]) -> [ReelSymbol; 3] {
    for i in 1..reels.len() {
        while reels[..i].contains(&reels[i]) {
            reels[i] = reels[i].next();
        }
    }
    reels
}

/// Final reel faces for an outcome
pub fn final_reels<R: Rng + ?Sized>(outcome: BonusOutcome, rng: &mut R) -> [ReelSymbol; 3] {
    match outcome {
        BonusOutcome::Win => {
            let symbol = ReelSymbol::random(rng);
            [symbol; 3]
        }
        BonusOutcome::Lose => distinct_reels([
            ReelSymbol::random(rng),
            ReelSymbol::random(rng),
            ReelSymbol::random(rng),
        ]),
    }
}

impl BonusRound {
    pub fn is_open(&self) -> bool {
        self.phase != BonusPhase::Closed
    }

    /// Open the round if `score` reached a tier above the last consumed one.
    /// Returns the new tier when it opened.
    pub fn try_open(&mut self, score: u64, tier_size: u64) -> Option<u64> {
        if self.is_open() {
            return None;
        }
        let tier = tier_for(score, tier_size);
        if tier <= self.trigger_tier {
            return None;
        }
        self.trigger_tier = tier;
        self.used_this_trigger = false;
        self.phase = BonusPhase::Idle;
        Some(tier)
    }

    /// Start spinning. No-op unless idle with the spin still unused.
    pub fn spin(&mut self) -> bool {
        if self.phase != BonusPhase::Idle || self.used_this_trigger {
            return false;
        }
        self.used_this_trigger = true;
        self.phase = BonusPhase::Spinning {
            elapsed: 0.0,
            shuffle_timer: 0.0,
        };
        true
    }

    /// Close an idle round without spinning
    pub fn dismiss(&mut self) -> bool {
        if self.phase != BonusPhase::Idle {
            return false;
        }
        self.used_this_trigger = true;
        self.phase = BonusPhase::Closed;
        true
    }

    /// Advance the round's own timers
    pub fn advance<R: Rng + ?Sized>(&mut self, dt: f32, rng: &mut R, tuning: &Tuning) -> BonusStep {
        match self.phase {
            BonusPhase::Closed | BonusPhase::Idle => BonusStep::Nothing,
            BonusPhase::Spinning {
                elapsed,
                shuffle_timer,
            } => {
                let elapsed = elapsed + dt;
                let mut shuffle_timer = shuffle_timer + dt;
                if tuning.bonus_shuffle_interval > 0.0 {
                    while shuffle_timer >= tuning.bonus_shuffle_interval {
                        shuffle_timer -= tuning.bonus_shuffle_interval;
                        self.reels = [
                            ReelSymbol::random(rng),
                            ReelSymbol::random(rng),
                            ReelSymbol::random(rng),
                        ];
                    }
                }

                if elapsed < tuning.bonus_spin_duration {
                    self.phase = BonusPhase::Spinning {
                        elapsed,
                        shuffle_timer,
                    };
                    return BonusStep::Nothing;
                }

                let outcome = if rng.random::<f32>() < tuning.bonus_win_chance {
                    BonusOutcome::Win
                } else {
                    BonusOutcome::Lose
                };
                self.reels = final_reels(outcome, rng);
                self.phase = BonusPhase::Resolved {
                    outcome,
                    display_left: tuning.bonus_display_delay,
                };
                BonusStep::Resolved(outcome)
            }
            BonusPhase::Resolved {
                outcome,
                display_left,
            } => {
                let display_left = display_left - dt;
                if display_left > 0.0 {
                    self.phase = BonusPhase::Resolved {
                        outcome,
                        display_left,
                    };
                    BonusStep::Nothing
                } else {
                    self.phase = BonusPhase::Closed;
                    BonusStep::Closed
                }
            }
        }
    }
}

/// What `Countdown::advance` did this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownStep {
    Waiting,
    Ticked(u32),
    Finished,
}

/// Whole-second countdown shown before play resumes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Countdown {
    pub remaining: u32,
    timer: f32,
}

impl Countdown {
    pub fn new(seconds: u32) -> Self {
        Self {
            remaining: seconds,
            timer: 0.0,
        }
    }

    pub fn advance(&mut self, dt: f32) -> CountdownStep {
        self.timer += dt;
        let mut ticked = false;
        while self.remaining > 0 && self.timer >= 1.0 {
            self.timer -= 1.0;
            self.remaining -= 1;
            ticked = true;
        }
        if self.remaining == 0 {
            CountdownStep::Finished
        } else if ticked {
            CountdownStep::Ticked(self.remaining)
        } else {
            CountdownStep::Waiting
        }
    }
}
