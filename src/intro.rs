//! The load-time intro: loader exit, glass panel, title and subtitle. Page
//! scrolling is held stopped from the moment the intro begins until it
//! completes (or the page is torn down).

use crate::smooth_scroll::SmoothScroll;
use crate::timeline::{Easing, Props, Step, TargetFrame, Timeline};

pub const LOADER_TEXT: &str = "loader-text";
pub const LOADER: &str = "loader";
pub const GLASS_PANEL: &str = "glass-panel";
pub const TITLE_LINE: &str = "reveal-text";
pub const SUBTITLE: &str = "hero-subtitle";

pub fn intro_timeline(title_lines: usize) -> Timeline {
    Timeline::new(vec![
        Step::new(
            LOADER_TEXT,
            Props {
                opacity: Some(1.0),
                y_px: Some(0.0),
                ..Props::default()
            },
            Props {
                opacity: Some(0.0),
                y_px: Some(-20.0),
                ..Props::default()
            },
            0.8,
            Easing::Power2InOut,
        )
        .delay(0.4),
        Step::new(
            LOADER,
            Props {
                y_percent: Some(0.0),
                ..Props::default()
            },
            Props {
                y_percent: Some(-100.0),
                ..Props::default()
            },
            1.2,
            Easing::ExpoInOut,
        ),
        Step::new(
            GLASS_PANEL,
            Props {
                opacity: Some(0.0),
                backdrop_blur_px: Some(0.0),
                scale: Some(0.95),
                ..Props::default()
            },
            Props {
                opacity: Some(1.0),
                backdrop_blur_px: Some(12.0),
                scale: Some(1.0),
                ..Props::default()
            },
            1.2,
            Easing::Power2Out,
        )
        .overlap(0.4),
        Step::new(
            TITLE_LINE,
            Props {
                y_percent: Some(100.0),
                ..Props::default()
            },
            Props {
                y_percent: Some(0.0),
                ..Props::default()
            },
            1.4,
            Easing::Power4Out,
        )
        .stagger(0.15, title_lines)
        .overlap(0.8),
        Step::new(
            SUBTITLE,
            Props {
                opacity: Some(0.0),
                y_px: Some(20.0),
                blur_px: Some(5.0),
                ..Props::default()
            },
            Props {
                opacity: Some(1.0),
                y_px: Some(0.0),
                blur_px: Some(0.0),
                ..Props::default()
            },
            1.2,
            Easing::Power3Out,
        )
        .overlap(1.0),
    ])
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum IntroPhase {
    Waiting,
    Running { started_at: f64 },
    Complete,
}

#[derive(Clone, Debug, PartialEq)]
pub struct IntroFrame {
    pub targets: Vec<TargetFrame>,
    /// Set on the single frame where the intro finishes.
    pub just_completed: bool,
}

impl IntroFrame {
    pub fn style_for(&self, target: &str, index: usize) -> String {
        self.targets
            .iter()
            .find(|frame| frame.target == target && frame.index == index)
            .map(|frame| frame.props.to_css())
            .unwrap_or_default()
    }
}

pub struct IntroSequencer {
    timeline: Timeline,
    phase: IntroPhase,
}

impl IntroSequencer {
    pub fn new(title_lines: usize) -> Self {
        Self {
            timeline: intro_timeline(title_lines),
            phase: IntroPhase::Waiting,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.phase == IntroPhase::Complete
    }

    /// Starts the intro once; later calls are ignored.
    pub fn begin(&mut self, now: f64, scroll: &mut SmoothScroll) {
        if self.phase != IntroPhase::Waiting {
            return;
        }
        scroll.stop();
        self.phase = IntroPhase::Running { started_at: now };
    }

    /// Samples the intro at `now` (seconds) and releases scrolling when it ends.
    pub fn tick(&mut self, now: f64, scroll: &mut SmoothScroll) -> IntroFrame {
        let elapsed = match self.phase {
            IntroPhase::Waiting => 0.0,
            IntroPhase::Running { started_at } => (now - started_at).max(0.0),
            IntroPhase::Complete => self.timeline.duration(),
        };

        let just_completed = matches!(self.phase, IntroPhase::Running { .. })
            && elapsed >= self.timeline.duration();
        if just_completed {
            self.phase = IntroPhase::Complete;
            scroll.start();
        }

        IntroFrame {
            targets: self.timeline.sample(elapsed),
            just_completed,
        }
    }

    /// Jumps straight to the end state, e.g. for reduced motion.
    pub fn skip(&mut self, scroll: &mut SmoothScroll) -> IntroFrame {
        let was_complete = self.is_complete();
        self.phase = IntroPhase::Complete;
        scroll.start();
        IntroFrame {
            targets: self.timeline.sample(self.timeline.duration()),
            just_completed: !was_complete,
        }
    }

    /// Releases the scroll lock when the page goes away mid-intro.
    pub fn teardown(&mut self, scroll: &mut SmoothScroll) {
        if matches!(self.phase, IntroPhase::Running { .. }) {
            scroll.start();
        }
    }

    pub fn duration(&self) -> f64 {
        self.timeline.duration()
    }
}
