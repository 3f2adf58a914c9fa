
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Easing {
    Linear,
    Power2Out,
    Power2InOut,
    Power3Out,
    Power4Out,
    ExpoInOut,
}

impl Easing {
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::Power2Out => 1.0 - (1.0 - t).powi(3),
            Self::Power3Out => 1.0 - (1.0 - t).powi(4),
            Self::Power4Out => 1.0 - (1.0 - t).powi(5),
            Self::Power2InOut => {
                if t < 0.5 {
                    4.0 * t.powi(3)
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
            Self::ExpoInOut => {
                if t <= 0.0 {
                    0.0
                } else if t >= 1.0 {
                    1.0
                } else if t < 0.5 {
                    2f64.powf(20.0 * t - 10.0) / 2.0
                } else {
                    (2.0 - 2f64.powf(-20.0 * t + 10.0)) / 2.0
                }
            }
        }
    }
}

/// Animatable properties. `None` leaves the property untouched.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Props {
    pub opacity: Option<f64>,
    pub y_px: Option<f64>,
    pub y_percent: Option<f64>,
    pub scale: Option<f64>,
    pub blur_px: Option<f64>,
    pub backdrop_blur_px: Option<f64>,
}

impl Props {
    fn lerp(from: &Props, to: &Props, t: f64) -> Props {
        fn mix(from: Option<f64>, to: Option<f64>, t: f64) -> Option<f64> {
            match (from, to) {
                (Some(a), Some(b)) => Some(a + (b - a) * t),
                (None, Some(b)) => Some(b),
                (a, None) => a,
            }
        }

        Props {
            opacity: mix(from.opacity, to.opacity, t),
            y_px: mix(from.y_px, to.y_px, t),
            y_percent: mix(from.y_percent, to.y_percent, t),
            scale: mix(from.scale, to.scale, t),
            blur_px: mix(from.blur_px, to.blur_px, t),
            backdrop_blur_px: mix(from.backdrop_blur_px, to.backdrop_blur_px, t),
        }
    }

    /// Inline CSS for the set properties.
    pub fn to_css(&self) -> String {
        let mut declarations = Vec::new();
        if let Some(opacity) = self.opacity {
            declarations.push(format!("opacity: {opacity:.3};"));
        }

        let mut transforms = Vec::new();
        if let Some(y) = self.y_px {
            transforms.push(format!("translateY({y:.2}px)"));
        }
        if let Some(y) = self.y_percent {
            transforms.push(format!("translateY({y:.2}%)"));
        }
        if let Some(scale) = self.scale {
            transforms.push(format!("scale({scale:.4})"));
        }
        if !transforms.is_empty() {
            declarations.push(format!("transform: {};", transforms.join(" ")));
        }

        if let Some(blur) = self.blur_px {
            declarations.push(format!("filter: blur({blur:.2}px);"));
        }
        if let Some(blur) = self.backdrop_blur_px {
            declarations.push(format!("backdrop-filter: blur({blur:.2}px);"));
        }
        declarations.join(" ")
    }
}

/// Where a step starts relative to the end of the timeline so far.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Position {
    AfterPrevious,
    /// Starts this many seconds before the previous end.
    Overlap(f64),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Step {
    pub target: &'static str,
    pub from: Props,
    pub to: Props,
    pub duration: f64,
    pub delay: f64,
    pub easing: Easing,
    pub position: Position,
    /// Seconds between consecutive elements of the target.
    pub stagger: f64,
    pub count: usize,
}

impl Step {
    pub fn new(target: &'static str, from: Props, to: Props, duration: f64, easing: Easing) -> Self {
        Self {
            target,
            from,
            to,
            duration,
            delay: 0.0,
            easing,
            position: Position::AfterPrevious,
            stagger: 0.0,
            count: 1,
        }
    }

    pub fn delay(mut self, seconds: f64) -> Self {
        self.delay = seconds;
        self
    }

    pub fn overlap(mut self, seconds: f64) -> Self {
        self.position = Position::Overlap(seconds);
        self
    }

    pub fn stagger(mut self, seconds: f64, count: usize) -> Self {
        self.stagger = seconds;
        self.count = count.max(1);
        self
    }

    fn span(&self) -> f64 {
        self.duration + self.stagger * (self.count.saturating_sub(1)) as f64
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ScheduledStep {
    pub step: Step,
    pub start: f64,
    pub end: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Timeline {
    steps: Vec<ScheduledStep>,
    duration: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TargetFrame {
    pub target: &'static str,
    pub index: usize,
    pub props: Props,
}

impl Timeline {
    pub fn new(steps: Vec<Step>) -> Self {
        let mut scheduled = Vec::with_capacity(steps.len());
        let mut end = 0.0_f64;
        for step in steps {
            let anchor = match step.position {
                Position::AfterPrevious => end,
                Position::Overlap(seconds) => (end - seconds).max(0.0),
            };
            let start = anchor + step.delay.max(0.0);
            let step_end = start + step.span();
            end = end.max(step_end);
            scheduled.push(ScheduledStep {
                step,
                start,
                end: step_end,
            });
        }

        Self {
            steps: scheduled,
            duration: end,
        }
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn steps(&self) -> &[ScheduledStep] {
        &self.steps
    }

    /// Resolved properties of every target element at `time` seconds.
    pub fn sample(&self, time: f64) -> Vec<TargetFrame> {
        let mut frames = Vec::new();
        for scheduled in &self.steps {
            let step = &scheduled.step;
            for index in 0..step.count {
                let element_start = scheduled.start + step.stagger * index as f64;
                let progress = if step.duration <= 0.0 {
                    if time >= element_start { 1.0 } else { 0.0 }
                } else {
                    (time - element_start) / step.duration
                };
                let eased = step.easing.apply(progress);
                frames.push(TargetFrame {
                    target: step.target,
                    index,
                    props: Props::lerp(&step.from, &step.to, eased),
                });
            }
        }
        frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fade(target: &'static str, duration: f64) -> Step {
        Step::new(
            target,
            Props {
                opacity: Some(0.0),
                ..Props::default()
            },
            Props {
                opacity: Some(1.0),
                ..Props::default()
            },
            duration,
            Easing::Linear,
        )
    }

    #[test]
    fn easings_start_at_zero_and_end_at_one() {
        for easing in [
            Easing::Linear,
            Easing::Power2Out,
            Easing::Power2InOut,
            Easing::Power3Out,
            Easing::Power4Out,
            Easing::ExpoInOut,
        ] {
            assert!(easing.apply(0.0).abs() < 1e-9, "{easing:?}");
            assert!((easing.apply(1.0) - 1.0).abs() < 1e-9, "{easing:?}");
            assert!((easing.apply(0.5) - 0.5).abs() < 0.5, "{easing:?}");
        }
    }

    #[test]
    fn in_out_easings_are_symmetric_at_midpoint() {
        assert!((Easing::Power2InOut.apply(0.5) - 0.5).abs() < 1e-9);
        assert!((Easing::ExpoInOut.apply(0.5) - 0.5).abs() < 1e-9);
    }

    #[test]
    fn steps_append_and_overlap() {
        let timeline = Timeline::new(vec![
            fade("a", 1.0).delay(0.5),
            fade("b", 2.0),
            fade("c", 1.0).overlap(0.5),
            fade("d", 1.0).stagger(0.25, 3).overlap(0.2),
        ]);

        let expected = [(0.5, 1.5), (1.5, 3.5), (3.0, 4.0), (3.8, 5.3)];
        for (scheduled, (start, end)) in timeline.steps().iter().zip(expected) {
            assert!((scheduled.start - start).abs() < 1e-9, "{}", scheduled.step.target);
            assert!((scheduled.end - end).abs() < 1e-9, "{}", scheduled.step.target);
        }
        assert!((timeline.duration() - 5.3).abs() < 1e-9);
    }

    #[test]
    fn overlap_is_measured_from_the_furthest_end() {
        let timeline = Timeline::new(vec![fade("long", 3.0), fade("short", 0.5).overlap(3.0), fade("next", 1.0)]);
        assert_eq!(timeline.steps()[2].start, 3.0);
    }

    #[test]
    fn sampling_holds_from_values_until_start() {
        let timeline = Timeline::new(vec![fade("a", 1.0).delay(1.0)]);
        assert_eq!(timeline.sample(0.0)[0].props.opacity, Some(0.0));
        assert_eq!(timeline.sample(1.5)[0].props.opacity, Some(0.5));
        assert_eq!(timeline.sample(10.0)[0].props.opacity, Some(1.0));
    }

    #[test]
    fn stagger_offsets_each_element() {
        let timeline = Timeline::new(vec![fade("line", 1.0).stagger(0.5, 2)]);
        let frames = timeline.sample(0.5);
        assert_eq!(frames.len(), 2);
        assert_eq!(frames[0].props.opacity, Some(0.5));
        assert_eq!(frames[1].props.opacity, Some(0.0));
    }

    #[test]
    fn css_lists_only_set_properties() {
        let props = Props {
            opacity: Some(1.0),
            y_percent: Some(-100.0),
            scale: Some(0.95),
            ..Props::default()
        };
        assert_eq!(
            props.to_css(),
            "opacity: 1.000; transform: translateY(-100.00%) scale(0.9500);"
        );
        assert_eq!(Props::default().to_css(), "");
    }
}
