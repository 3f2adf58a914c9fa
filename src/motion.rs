//! Per-frame easing of room objects toward the pose implied by the
//! interaction state.

use crate::interaction::InteractionState;
use crate::section::Section;

pub const ACTIVE_SCALE: f32 = 1.05;
pub const HOVER_SCALE: f32 = 1.02;
pub const REST_SCALE: f32 = 1.0;
pub const HOVER_LIFT: f32 = 0.1;

pub const LABEL_COLOR_ACTIVE: &str = "#2C2B2A";
pub const LABEL_COLOR_IDLE: &str = "#8B7355";

const SETTLE_EPSILON: f32 = 1.0e-4;

/// One exponential smoothing step: moves `factor` of the remaining distance.
pub fn approach(current: f32, target: f32, factor: f32) -> f32 {
    current + (target - current) * factor.clamp(0.0, 1.0)
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ObjectTransform {
    pub scale: f32,
    pub y: f32,
}

impl ObjectTransform {
    pub fn at_rest(base_y: f32) -> Self {
        Self {
            scale: REST_SCALE,
            y: base_y,
        }
    }

    pub fn step_toward(self, target: ObjectTransform, factor: f32) -> Self {
        Self {
            scale: approach(self.scale, target.scale, factor),
            y: approach(self.y, target.y, factor),
        }
    }

    pub fn is_settled_at(&self, target: &ObjectTransform) -> bool {
        (self.scale - target.scale).abs() < SETTLE_EPSILON && (self.y - target.y).abs() < SETTLE_EPSILON
    }
}

pub fn target_transform(section: Section, base_y: f32, state: &InteractionState) -> ObjectTransform {
    let active = state.is_active(section);
    let hovered = state.is_hovered(section);

    let scale = if active {
        ACTIVE_SCALE
    } else if hovered {
        HOVER_SCALE
    } else {
        REST_SCALE
    };
    let y = if hovered && !active { base_y + HOVER_LIFT } else { base_y };

    ObjectTransform { scale, y }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LabelStyle {
    pub opacity: f32,
    pub color: &'static str,
}

pub fn label_style(section: Section, state: &InteractionState) -> LabelStyle {
    let active = state.is_active(section);
    LabelStyle {
        opacity: if active || state.is_hovered(section) { 1.0 } else { 0.0 },
        color: if active { LABEL_COLOR_ACTIVE } else { LABEL_COLOR_IDLE },
    }
}

pub fn cursor_for(state: &InteractionState) -> &'static str {
    if state.hovered.is_some() {
        "pointer"
    } else {
        "auto"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(hovered: Option<Section>, active: Option<Section>) -> InteractionState {
        InteractionState { hovered, active }
    }

    #[test]
    fn approach_moves_a_fixed_fraction_of_the_gap() {
        assert!((approach(0.0, 1.0, 0.1) - 0.1).abs() < 1e-6);
        assert!((approach(0.9, 1.0, 0.1) - 0.91).abs() < 1e-6);
        assert_eq!(approach(2.0, 2.0, 0.1), 2.0);
    }

    #[test]
    fn approach_never_overshoots() {
        let mut value = 1.0;
        for _ in 0..200 {
            let next = approach(value, 1.05, 0.1);
            assert!(next >= value && next <= 1.05);
            value = next;
        }
        assert!((value - 1.05).abs() < 1e-4);
    }

    #[test]
    fn active_beats_hover_for_scale_and_cancels_lift() {
        let target = target_transform(
            Section::Works,
            0.0,
            &state(Some(Section::Works), Some(Section::Works)),
        );
        assert_eq!(target, ObjectTransform { scale: ACTIVE_SCALE, y: 0.0 });
    }

    #[test]
    fn hovered_object_lifts_and_grows_slightly() {
        let target = target_transform(Section::Vision, 2.5, &state(Some(Section::Vision), None));
        assert_eq!(target.scale, HOVER_SCALE);
        assert!((target.y - 2.6).abs() < 1e-6);
    }

    #[test]
    fn other_objects_rest_at_base() {
        let target = target_transform(
            Section::About,
            0.0,
            &state(Some(Section::Works), Some(Section::Skills)),
        );
        assert_eq!(target, ObjectTransform::at_rest(0.0));
    }

    #[test]
    fn transform_settles_after_enough_frames() {
        let target = ObjectTransform { scale: HOVER_SCALE, y: 0.1 };
        let mut current = ObjectTransform::at_rest(0.0);
        for _ in 0..120 {
            current = current.step_toward(target, 0.1);
        }
        assert!(current.is_settled_at(&target));
    }

    #[test]
    fn label_is_visible_only_when_hovered_or_active() {
        let idle = label_style(Section::Skills, &state(None, None));
        assert_eq!(idle.opacity, 0.0);
        assert_eq!(idle.color, LABEL_COLOR_IDLE);

        let hovered = label_style(Section::Skills, &state(Some(Section::Skills), None));
        assert_eq!(hovered.opacity, 1.0);
        assert_eq!(hovered.color, LABEL_COLOR_IDLE);

        let active = label_style(Section::Skills, &state(None, Some(Section::Skills)));
        assert_eq!(active.opacity, 1.0);
        assert_eq!(active.color, LABEL_COLOR_ACTIVE);
    }
}
