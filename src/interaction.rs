//! Hover and selection state shared by the room objects and the content panel.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::section::Section;

pub type InteractionSubscriber = Rc<dyn Fn(InteractionState)>;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InteractionState {
    pub hovered: Option<Section>,
    pub active: Option<Section>,
}

impl InteractionState {
    pub fn is_hovered(&self, section: Section) -> bool {
        self.hovered == Some(section)
    }

    pub fn is_active(&self, section: Section) -> bool {
        self.active == Some(section)
    }
}

pub struct InteractionStore {
    state: Cell<InteractionState>,
    subscribers: Rc<RefCell<Vec<(u64, InteractionSubscriber)>>>,
    next_subscriber_id: Cell<u64>,
}

impl InteractionStore {
    pub fn new() -> Rc<Self> {
        Rc::new(Self {
            state: Cell::new(InteractionState::default()),
            subscribers: Rc::new(RefCell::new(Vec::new())),
            next_subscriber_id: Cell::new(0),
        })
    }

    pub fn state(&self) -> InteractionState {
        self.state.get()
    }

    pub fn set_hovered(&self, hovered: Option<Section>) {
        let mut next = self.state.get();
        next.hovered = hovered;
        self.replace(next);
    }

    pub fn set_active(&self, active: Option<Section>) {
        let mut next = self.state.get();
        next.active = active;
        self.replace(next);
    }

    pub fn pointer_enter(&self, section: Section) {
        self.set_hovered(Some(section));
    }

    /// Clears `hovered` only if it still points at `section`, so a late leave
    /// from one object cannot undo an enter on another.
    pub fn pointer_leave(&self, section: Section) {
        if self.state.get().is_hovered(section) {
            self.set_hovered(None);
        }
    }

    pub fn click(&self, section: Section) {
        if self.state.get().is_active(section) {
            self.set_active(None);
        } else {
            self.set_active(Some(section));
        }
    }

    pub fn dismiss(&self) {
        self.set_active(None);
    }

    /// Returns the section whose panel opened (`true`) or closed (`false`).
    pub fn apply_click(&self, action: ClickAction) -> Option<(Section, bool)> {
        match action {
            ClickAction::Ignore => None,
            ClickAction::Toggle(section) => {
                self.click(section);
                Some((section, self.state().is_active(section)))
            }
            ClickAction::Deselect => {
                let active = self.state().active?;
                self.dismiss();
                Some((active, false))
            }
        }
    }

    pub fn subscribe(&self, subscriber: InteractionSubscriber) -> InteractionSubscription {
        let id = self.next_subscriber_id.get();
        self.next_subscriber_id.set(id + 1);
        self.subscribers.borrow_mut().push((id, subscriber));
        InteractionSubscription {
            id,
            subscribers: Rc::clone(&self.subscribers),
        }
    }

    fn replace(&self, next: InteractionState) {
        if self.state.replace(next) == next {
            return;
        }

        let subscribers: Vec<InteractionSubscriber> = self
            .subscribers
            .borrow()
            .iter()
            .map(|(_, subscriber)| subscriber.clone())
            .collect();
        for subscriber in subscribers {
            (subscriber)(next);
        }
    }
}

/// Unsubscribes on drop.
pub struct InteractionSubscription {
    id: u64,
    subscribers: Rc<RefCell<Vec<(u64, InteractionSubscriber)>>>,
}

impl Drop for InteractionSubscription {
    fn drop(&mut self) {
        self.subscribers
            .borrow_mut()
            .retain(|(id, _)| *id != self.id);
    }
}

/// Pointer travel below which a press counts as a click rather than a drag.
const CLICK_SLOP_PX: i32 = 4;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClickAction {
    Ignore,
    Toggle(Section),
    Deselect,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Drag {
    origin: (i32, i32),
    last: (i32, i32),
    pressed: bool,
    moved: bool,
}

/// One press-move-release on the room canvas. The click that ends a drag is
/// swallowed, and an object click claims the gesture so the background click
/// bubbling after it does nothing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PointerGesture {
    drag: Option<Drag>,
    claimed: bool,
}

impl PointerGesture {
    pub fn press(&mut self, x: i32, y: i32) {
        self.drag = Some(Drag {
            origin: (x, y),
            last: (x, y),
            pressed: true,
            moved: false,
        });
        self.claimed = false;
    }

    /// Orbit delta to apply, once the pointer has left the click slop.
    pub fn move_to(&mut self, x: i32, y: i32) -> Option<(i32, i32)> {
        let drag = self.drag.as_mut().filter(|drag| drag.pressed)?;
        let delta = (x - drag.last.0, y - drag.last.1);
        drag.last = (x, y);
        if (x - drag.origin.0).abs() > CLICK_SLOP_PX || (y - drag.origin.1).abs() > CLICK_SLOP_PX {
            drag.moved = true;
        }
        drag.moved.then_some(delta)
    }

    pub fn release(&mut self) {
        if let Some(drag) = self.drag.as_mut() {
            drag.pressed = false;
        }
    }

    pub fn cancel(&mut self) {
        self.drag = None;
    }

    /// Resolves a click on `target` (`None` for empty space).
    pub fn resolve_click(&mut self, target: Option<Section>) -> ClickAction {
        if self.claimed {
            self.claimed = false;
            return ClickAction::Ignore;
        }
        let dragged = self.drag.take().is_some_and(|drag| drag.moved);
        match target {
            Some(_) if dragged => {
                self.claimed = true;
                ClickAction::Ignore
            }
            Some(section) => {
                self.claimed = true;
                ClickAction::Toggle(section)
            }
            None if dragged => ClickAction::Ignore,
            None => ClickAction::Deselect,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_with_nothing_hovered_or_active() {
        let store = InteractionStore::new();
        assert_eq!(store.state(), InteractionState::default());
    }

    #[test]
    fn two_clicks_toggle_active_back_to_none() {
        for section in Section::ALL {
            let store = InteractionStore::new();
            store.click(section);
            assert_eq!(store.state().active, Some(section));
            store.click(section);
            assert_eq!(store.state().active, None);
        }
    }

    #[test]
    fn clicking_another_object_moves_the_selection() {
        let store = InteractionStore::new();
        store.click(Section::About);
        store.click(Section::Vision);
        assert_eq!(store.state().active, Some(Section::Vision));
    }

    #[test]
    fn hover_then_leave_clears_hovered_regardless_of_active() {
        for section in Section::ALL {
            for active in [None, Some(section), Some(Section::Works)] {
                let store = InteractionStore::new();
                store.set_active(active);
                store.pointer_enter(section);
                assert_eq!(store.state().hovered, Some(section));
                store.pointer_leave(section);
                assert_eq!(store.state().hovered, None);
                assert_eq!(store.state().active, active);
            }
        }
    }

    #[test]
    fn stale_leave_does_not_clear_a_newer_hover() {
        let store = InteractionStore::new();
        store.pointer_enter(Section::About);
        store.pointer_enter(Section::Works);
        store.pointer_leave(Section::About);
        assert_eq!(store.state().hovered, Some(Section::Works));
    }

    #[test]
    fn dismiss_clears_active_but_keeps_hover() {
        let store = InteractionStore::new();
        store.pointer_enter(Section::Skills);
        store.click(Section::Skills);
        store.dismiss();
        assert_eq!(
            store.state(),
            InteractionState {
                hovered: Some(Section::Skills),
                active: None,
            }
        );
    }

    #[test]
    fn subscribers_see_changes_and_stop_after_drop() {
        let store = InteractionStore::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let subscription = {
            let seen = Rc::clone(&seen);
            store.subscribe(Rc::new(move |state| seen.borrow_mut().push(state)))
        };

        store.pointer_enter(Section::About);
        store.pointer_enter(Section::About);
        store.click(Section::About);
        drop(subscription);
        store.dismiss();

        let seen = seen.borrow();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[1].active, Some(Section::About));
    }

    #[test]
    fn object_click_is_not_undone_by_the_background_click_after_it() {
        let store = InteractionStore::new();
        let mut gesture = PointerGesture::default();

        gesture.press(10, 10);
        gesture.release();
        let opened = store.apply_click(gesture.resolve_click(Some(Section::Works)));
        let bubbled = store.apply_click(gesture.resolve_click(None));

        assert_eq!(opened, Some((Section::Works, true)));
        assert_eq!(bubbled, None);
        assert_eq!(store.state().active, Some(Section::Works));
    }

    #[test]
    fn background_click_deselects() {
        let store = InteractionStore::new();
        store.click(Section::Skills);
        let mut gesture = PointerGesture::default();

        gesture.press(0, 0);
        gesture.release();
        assert_eq!(gesture.resolve_click(None), ClickAction::Deselect);
        store.apply_click(ClickAction::Deselect);
        assert_eq!(store.state().active, None);
        assert_eq!(store.apply_click(ClickAction::Deselect), None);
    }

    #[test]
    fn drag_past_the_slop_is_never_a_click() {
        let store = InteractionStore::new();
        store.click(Section::About);
        store.pointer_enter(Section::About);
        let before = store.state();

        for (dx, dy) in [(5, 0), (0, 5), (-5, -5)] {
            let mut gesture = PointerGesture::default();
            gesture.press(100, 100);
            assert!(gesture.move_to(100 + dx, 100 + dy).is_some());
            gesture.release();
            store.apply_click(gesture.resolve_click(Some(Section::Vision)));
            store.apply_click(gesture.resolve_click(None));
        }

        let mut gesture = PointerGesture::default();
        gesture.press(100, 100);
        gesture.move_to(105, 100);
        gesture.release();
        store.apply_click(gesture.resolve_click(None));

        assert_eq!(store.state(), before);
    }

    #[test]
    fn small_jitter_still_counts_as_a_click() {
        let mut gesture = PointerGesture::default();
        gesture.press(50, 50);
        assert_eq!(gesture.move_to(53, 46), None);
        gesture.release();
        assert_eq!(gesture.resolve_click(Some(Section::Vision)), ClickAction::Toggle(Section::Vision));
    }

    #[test]
    fn moves_without_a_press_do_not_orbit() {
        let mut gesture = PointerGesture::default();
        assert_eq!(gesture.move_to(40, 40), None);
        gesture.press(0, 0);
        gesture.release();
        assert_eq!(gesture.move_to(40, 40), None);
    }
}
