//! Eased page scrolling in the style of Lenis: input moves a target, the
//! rendered position glides toward it over a fixed duration. While stopped,
//! input is swallowed.

pub const DURATION_SECONDS: f64 = 1.2;
pub const WHEEL_MULTIPLIER: f64 = 1.0;
pub const TOUCH_MULTIPLIER: f64 = 2.0;

/// `min(1, 1.001 - 2^(-10t))`
pub fn ease(t: f64) -> f64 {
    (1.001 - 2f64.powf(-10.0 * t.max(0.0))).min(1.0)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputKind {
    Wheel,
    Touch,
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Glide {
    from: f64,
    to: f64,
    started_at: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SmoothScroll {
    position: f64,
    target: f64,
    max_scroll: f64,
    stopped: bool,
    glide: Option<Glide>,
}

impl SmoothScroll {
    pub fn new(position: f64, max_scroll: f64) -> Self {
        let max_scroll = max_scroll.max(0.0);
        let position = position.clamp(0.0, max_scroll);
        Self {
            position,
            target: position,
            max_scroll,
            stopped: false,
            glide: None,
        }
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    pub fn is_animating(&self) -> bool {
        self.glide.is_some()
    }

    pub fn stop(&mut self) {
        self.stopped = true;
        self.target = self.position;
        self.glide = None;
    }

    pub fn start(&mut self) {
        self.stopped = false;
    }

    pub fn set_max_scroll(&mut self, max_scroll: f64) {
        self.max_scroll = max_scroll.max(0.0);
        self.target = self.target.clamp(0.0, self.max_scroll);
        self.position = self.position.clamp(0.0, self.max_scroll);
    }

    /// Keeps in sync with scrolls that happened outside this animator.
    pub fn sync_position(&mut self, position: f64) {
        if self.glide.is_none() {
            self.position = position.clamp(0.0, self.max_scroll);
            self.target = self.position;
        }
    }

    /// Applies wheel or touch input. Returns `false` when the input was
    /// swallowed because scrolling is stopped.
    pub fn input(&mut self, delta: f64, kind: InputKind, now: f64) -> bool {
        if self.stopped {
            return false;
        }
        let multiplier = match kind {
            InputKind::Wheel => WHEEL_MULTIPLIER,
            InputKind::Touch => TOUCH_MULTIPLIER,
        };
        self.scroll_to(self.target + delta * multiplier, now)
    }

    /// Glides to an absolute offset, e.g. a nav anchor.
    pub fn scroll_to(&mut self, offset: f64, now: f64) -> bool {
        if self.stopped {
            return false;
        }
        self.target = offset.clamp(0.0, self.max_scroll);
        self.glide = Some(Glide {
            from: self.position,
            to: self.target,
            started_at: now,
        });
        true
    }

    /// Advances to `now` (seconds). Returns the position to render.
    pub fn tick(&mut self, now: f64) -> f64 {
        let Some(glide) = self.glide else {
            return self.position;
        };

        let progress = (now - glide.started_at) / DURATION_SECONDS;
        if progress >= 1.0 {
            self.position = glide.to;
            self.glide = None;
        } else {
            self.position = glide.from + (glide.to - glide.from) * ease(progress);
        }
        self.position
    }
}
