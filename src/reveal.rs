//! One-shot reveal bookkeeping; reversible profiles replay after leaving the viewport.

use std::collections::HashMap;
use std::hash::Hash;

pub const EASE_OUT_EXPO: &str = "cubic-bezier(0.16, 1, 0.3, 1)";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RevealEffect {
    AddClass(&'static str),
    Keyframe(&'static str),
    /// Collapses a progress bar, then restores its width after `delay_ms`.
    ProgressFill { delay_ms: u32 },
    Stagger { per_item_ms: u32 },
    /// Adds `class` with a `transition-delay` of `index * per_item_ms`.
    StaggeredClass { class: &'static str, per_item_ms: u32 },
}

impl RevealEffect {
    pub fn initial_style(self) -> Option<&'static str> {
        match self {
            Self::Stagger { .. } => Some(
                "opacity: 0; transform: translateY(30px); transition: all 0.5s cubic-bezier(0.16, 1, 0.3, 1);",
            ),
            Self::AddClass(_)
            | Self::Keyframe(_)
            | Self::ProgressFill { .. }
            | Self::StaggeredClass { .. } => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RevealProfile {
    pub threshold: f64,
    pub root_margin: &'static str,
    pub effect: RevealEffect,
    pub reversible: bool,
}

pub const FADE_UP: RevealProfile = RevealProfile {
    threshold: 0.1,
    root_margin: "0px 0px -50px 0px",
    effect: RevealEffect::AddClass("visible"),
    reversible: false,
};

pub const PROFILE_PHOTO: RevealProfile = RevealProfile {
    threshold: 0.3,
    root_margin: "0px",
    effect: RevealEffect::Keyframe("fadeInScale 0.8s cubic-bezier(0.16, 1, 0.3, 1) forwards"),
    reversible: false,
};

pub const SKILL_BAR: RevealProfile = RevealProfile {
    threshold: 0.5,
    root_margin: "0px",
    effect: RevealEffect::ProgressFill { delay_ms: 100 },
    reversible: false,
};

pub const CARD_GRID: RevealProfile = RevealProfile {
    threshold: 0.2,
    root_margin: "0px",
    effect: RevealEffect::Stagger { per_item_ms: 100 },
    reversible: false,
};

/// Scroll-linked fade that plays on entry and reverses on exit.
pub const SCROLL_LINKED: RevealProfile = RevealProfile {
    threshold: 0.15,
    root_margin: "0px",
    effect: RevealEffect::AddClass("in-view"),
    reversible: true,
};

/// Reversible cascade for the academic project grid.
pub const GRID_CASCADE: RevealProfile = RevealProfile {
    threshold: 0.15,
    root_margin: "0px",
    effect: RevealEffect::StaggeredClass {
        class: "in-view",
        per_item_ms: 200,
    },
    reversible: true,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum RevealPhase {
    Pending,
    Fired,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RevealCommand {
    Reveal { delay_ms: u32 },
    Conceal,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RevealOutcome {
    pub command: Option<RevealCommand>,
    /// The element no longer needs observing.
    pub unobserve: bool,
}

impl RevealOutcome {
    const NOTHING: Self = Self {
        command: None,
        unobserve: false,
    };
}

pub struct RevealTracker<K> {
    profile: RevealProfile,
    phases: HashMap<K, RevealPhase>,
}

impl<K: Eq + Hash> RevealTracker<K> {
    pub fn new(profile: RevealProfile) -> Self {
        Self {
            profile,
            phases: HashMap::new(),
        }
    }

    pub fn observe(&mut self, key: K) {
        self.phases.entry(key).or_insert(RevealPhase::Pending);
    }

    /// `index` is the element's position within the batch.
    pub fn on_visibility(&mut self, key: &K, intersecting: bool, index: usize) -> RevealOutcome {
        let Some(phase) = self.phases.get_mut(key) else {
            return RevealOutcome::NOTHING;
        };

        match (*phase, intersecting) {
            (RevealPhase::Pending, true) => {
                *phase = RevealPhase::Fired;
                RevealOutcome {
                    command: Some(RevealCommand::Reveal {
                        delay_ms: reveal_delay(self.profile.effect, index),
                    }),
                    unobserve: !self.profile.reversible,
                }
            }
            (RevealPhase::Fired, false) if self.profile.reversible => {
                *phase = RevealPhase::Pending;
                RevealOutcome {
                    command: Some(RevealCommand::Conceal),
                    unobserve: false,
                }
            }
            _ => RevealOutcome::NOTHING,
        }
    }
}

fn reveal_delay(effect: RevealEffect, index: usize) -> u32 {
    match effect {
        RevealEffect::ProgressFill { delay_ms } => delay_ms,
        RevealEffect::Stagger { per_item_ms } | RevealEffect::StaggeredClass { per_item_ms, .. } => {
            per_item_ms.saturating_mul(u32::try_from(index).unwrap_or(u32::MAX))
        }
        RevealEffect::AddClass(_) | RevealEffect::Keyframe(_) => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_once_then_ignores_repeat_entries() {
        let mut tracker = RevealTracker::new(FADE_UP);
        tracker.observe("intro");

        let first = tracker.on_visibility(&"intro", true, 0);
        assert_eq!(first.command, Some(RevealCommand::Reveal { delay_ms: 0 }));
        assert!(first.unobserve);

        let second = tracker.on_visibility(&"intro", true, 0);
        assert_eq!(second, RevealOutcome::NOTHING);
        assert_eq!(tracker.on_visibility(&"intro", false, 0), RevealOutcome::NOTHING);
    }

    #[test]
    fn leaving_before_entering_does_nothing() {
        let mut tracker = RevealTracker::new(PROFILE_PHOTO);
        tracker.observe(1);
        assert_eq!(tracker.on_visibility(&1, false, 0), RevealOutcome::NOTHING);
        assert_eq!(
            tracker.on_visibility(&1, true, 0).command,
            Some(RevealCommand::Reveal { delay_ms: 0 })
        );
    }

    #[test]
    fn unknown_elements_are_ignored() {
        let mut tracker: RevealTracker<u32> = RevealTracker::new(FADE_UP);
        assert_eq!(tracker.on_visibility(&7, true, 0), RevealOutcome::NOTHING);
    }

    #[test]
    fn reobserving_a_fired_element_does_not_rearm_it() {
        let mut tracker = RevealTracker::new(FADE_UP);
        tracker.observe("card");
        tracker.on_visibility(&"card", true, 0);
        tracker.observe("card");
        assert_eq!(tracker.on_visibility(&"card", true, 0).command, None);
    }

    #[test]
    fn staggered_cards_wait_by_index() {
        let mut tracker = RevealTracker::new(CARD_GRID);
        for key in 0..3 {
            tracker.observe(key);
        }
        let delays: Vec<_> = (0..3)
            .map(|key| tracker.on_visibility(&key, true, key).command)
            .collect();

        assert_eq!(
            delays,
            vec![
                Some(RevealCommand::Reveal { delay_ms: 0 }),
                Some(RevealCommand::Reveal { delay_ms: 100 }),
                Some(RevealCommand::Reveal { delay_ms: 200 }),
            ]
        );
    }

    #[test]
    fn progress_bars_refill_after_a_short_delay() {
        let mut tracker = RevealTracker::new(SKILL_BAR);
        tracker.observe("rust");
        assert_eq!(
            tracker.on_visibility(&"rust", true, 4).command,
            Some(RevealCommand::Reveal { delay_ms: 100 })
        );
    }

    #[test]
    fn reversible_profile_conceals_on_exit_and_replays() {
        let mut tracker = RevealTracker::new(SCROLL_LINKED);
        tracker.observe("featured");

        let enter = tracker.on_visibility(&"featured", true, 0);
        assert!(!enter.unobserve);
        assert_eq!(
            tracker.on_visibility(&"featured", false, 0).command,
            Some(RevealCommand::Conceal)
        );
        assert_eq!(
            tracker.on_visibility(&"featured", true, 0).command,
            Some(RevealCommand::Reveal { delay_ms: 0 })
        );
    }

    #[test]
    fn grid_cards_cascade_and_replay_after_leaving() {
        let mut tracker = RevealTracker::new(GRID_CASCADE);
        for key in 0..3 {
            tracker.observe(key);
        }
        let expected = vec![
            Some(RevealCommand::Reveal { delay_ms: 0 }),
            Some(RevealCommand::Reveal { delay_ms: 200 }),
            Some(RevealCommand::Reveal { delay_ms: 400 }),
        ];

        let entered: Vec<_> = (0..3)
            .map(|key| tracker.on_visibility(&key, true, key).command)
            .collect();
        assert_eq!(entered, expected);

        for key in 0..3 {
            let left = tracker.on_visibility(&key, false, key);
            assert_eq!(left.command, Some(RevealCommand::Conceal));
            assert!(!left.unobserve);
        }

        let replayed: Vec<_> = (0..3)
            .map(|key| tracker.on_visibility(&key, true, key).command)
            .collect();
        assert_eq!(replayed, expected);
    }

    #[test]
    fn grid_cascade_starts_without_inline_style() {
        assert_eq!(GRID_CASCADE.effect.initial_style(), None);
    }
}
