use palabras_types::{CelebrationEffect, CelebrationStep, MilestoneTier, StreakMilestone};
use std::time::Duration;

use crate::config::GameConfig;

const TIERS: [MilestoneTier; 4] = [
    MilestoneTier::Super,
    MilestoneTier::Amazing,
    MilestoneTier::Legendary,
    MilestoneTier::Unicorn,
];

/// Milestone reached by exactly this streak, if any. Thresholds map onto the
/// tiers in order; the last configured threshold is always the unicorn tier.
pub fn check_milestone(streak: u32, config: &GameConfig) -> Option<StreakMilestone> {
    let thresholds = &config.streaks.milestones;
    let position = thresholds.iter().position(|&t| t == streak)?;

    let tier = if position + 1 == thresholds.len() {
        MilestoneTier::Unicorn
    } else {
        TIERS[position.min(TIERS.len() - 2)]
    };

    Some(StreakMilestone {
        tier,
        streak,
        message: milestone_message(tier, streak, &config.player_name),
    })
}

fn milestone_message(tier: MilestoneTier, streak: u32, name: &str) -> String {
    match tier {
        MilestoneTier::Super => format!("¡Súper {}! {} seguidos! 🌈", name, streak),
        MilestoneTier::Amazing => {
            format!("¡INCREÍBLE {}! ¡{} PERFECTOS! 🎊✨", name.to_uppercase(), streak)
        }
        MilestoneTier::Legendary => format!("¡{} es imparable! ¡{} seguidos! 🔥", name, streak),
        MilestoneTier::Unicorn => {
            format!("¡NIVEL UNICORNIO, {}! ¡{} seguidos! 🦄✨", name.to_uppercase(), streak)
        }
    }
}

/// Strip emoji and decoration so the speech engine reads only words
fn spoken(message: &str) -> String {
    message
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace() || "¡!¿?,.".contains(*c))
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Ordered `(delay, effect)` steps the presentation layer plays for a milestone
#[derive(Debug, Clone, PartialEq)]
pub struct CelebrationPlan {
    pub steps: Vec<CelebrationStep>,
}

impl CelebrationPlan {
    pub fn for_milestone(milestone: &StreakMilestone, config: &GameConfig) -> Self {
        let timers = &config.timers;
        let start = timers.milestone_delay_ms;
        let mut steps = vec![
            CelebrationStep {
                delay_ms: start,
                effect: CelebrationEffect::ShowMessage {
                    text: milestone.message.clone(),
                },
            },
            CelebrationStep {
                delay_ms: start,
                effect: CelebrationEffect::Speak {
                    text: spoken(&milestone.message),
                },
            },
        ];

        if milestone.tier != MilestoneTier::Super {
            steps.push(CelebrationStep {
                delay_ms: start,
                effect: CelebrationEffect::Confetti {
                    duration_ms: timers.confetti_ms,
                },
            });
        }

        if milestone.tier == MilestoneTier::Unicorn {
            steps.push(CelebrationStep {
                delay_ms: start,
                effect: CelebrationEffect::Unicorn,
            });
            if config.streaks.reset_after_unicorn {
                steps.push(CelebrationStep {
                    delay_ms: start + timers.unicorn_reset_ms,
                    effect: CelebrationEffect::ResetStreak,
                });
            }
        }

        Self { steps }
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Delay after which the streak has to be reset, when the plan asks for it
    pub fn streak_reset_delay(&self) -> Option<Duration> {
        self.steps
            .iter()
            .find(|step| step.effect == CelebrationEffect::ResetStreak)
            .map(|step| Duration::from_millis(step.delay_ms))
    }
}
