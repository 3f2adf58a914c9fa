use gloo::events::{EventListener, EventListenerOptions};
use gloo::render::{request_animation_frame, AnimationFrame};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys::{window, Event, TouchEvent, WheelEvent};

use super::{current_scroll_y, document, now_seconds, viewport_height};
use crate::smooth_scroll::{InputKind, SmoothScroll};

/// Set on `<html>` while scrolling is stopped; the stylesheet hides overflow.
const LOCK_ATTRIBUTE: &str = "data-scroll-locked";
const LINE_HEIGHT_PX: f64 = 16.0;

/// Owns the page's [`SmoothScroll`] and pumps it from wheel/touch input into
/// `window.scrollTo` on animation frames.
pub(crate) struct ScrollDriver {
    scroll: RefCell<SmoothScroll>,
    frame: RefCell<Option<AnimationFrame>>,
    touch_y: Cell<Option<f64>>,
}

impl ScrollDriver {
    pub fn new() -> Rc<Self> {
        Rc::new(Self {
            scroll: RefCell::new(SmoothScroll::new(current_scroll_y(), max_scroll())),
            frame: RefCell::new(None),
            touch_y: Cell::new(None),
        })
    }

    /// Runs `f` against the scroller, then mirrors its stopped state onto the
    /// document.
    pub fn with_scroll<R>(&self, f: impl FnOnce(&mut SmoothScroll) -> R) -> R {
        let result = f(&mut self.scroll.borrow_mut());
        self.sync_lock_attribute();
        result
    }

    pub fn scroll_to(self: &Rc<Self>, offset: f64) {
        let accepted = {
            let mut scroll = self.scroll.borrow_mut();
            scroll.set_max_scroll(max_scroll());
            scroll.scroll_to(offset, now_seconds())
        };
        if accepted {
            self.ensure_frame();
        }
    }

    fn input(self: &Rc<Self>, delta: f64, kind: InputKind) {
        let accepted = {
            let mut scroll = self.scroll.borrow_mut();
            scroll.set_max_scroll(max_scroll());
            scroll.input(delta, kind, now_seconds())
        };
        if accepted {
            self.ensure_frame();
        }
    }

    fn sync_lock_attribute(&self) {
        let Some(root) = document().and_then(|d| d.document_element()) else {
            return;
        };
        if self.scroll.borrow().is_stopped() {
            let _ = root.set_attribute(LOCK_ATTRIBUTE, "true");
        } else {
            let _ = root.remove_attribute(LOCK_ATTRIBUTE);
        }
    }

    fn ensure_frame(self: &Rc<Self>) {
        if self.frame.borrow().is_some() {
            return;
        }
        let driver = Rc::clone(self);
        let handle = request_animation_frame(move |_| {
            driver.frame.borrow_mut().take();
            driver.advance();
        });
        *self.frame.borrow_mut() = Some(handle);
    }

    fn advance(self: &Rc<Self>) {
        let (position, animating) = {
            let mut scroll = self.scroll.borrow_mut();
            let position = scroll.tick(now_seconds());
            (position, scroll.is_animating())
        };
        if let Some(window) = window() {
            window.scroll_to_with_x_and_y(0.0, position);
        }
        if animating {
            self.ensure_frame();
        }
    }

    /// Hooks wheel and touch input plus native scroll/resize bookkeeping.
    /// Dropping the returned listeners detaches everything.
    pub fn install(self: &Rc<Self>) -> Vec<EventListener> {
        let Some(window) = window() else {
            return Vec::new();
        };
        let active = EventListenerOptions::enable_prevent_default();
        let mut listeners = Vec::with_capacity(5);

        let driver = Rc::clone(self);
        listeners.push(EventListener::new_with_options(
            &window,
            "wheel",
            active,
            move |event: &Event| {
                let Some(wheel) = event.dyn_ref::<WheelEvent>() else {
                    return;
                };
                // pinch-zoom arrives as ctrl+wheel
                if wheel.ctrl_key() {
                    return;
                }
                event.prevent_default();
                driver.input(wheel_delta_px(wheel), InputKind::Wheel);
            },
        ));

        let driver = Rc::clone(self);
        listeners.push(EventListener::new(&window, "touchstart", move |event: &Event| {
            driver.touch_y.set(first_touch_y(event));
        }));

        let driver = Rc::clone(self);
        listeners.push(EventListener::new_with_options(
            &window,
            "touchmove",
            active,
            move |event: &Event| {
                let Some(y) = first_touch_y(event) else {
                    return;
                };
                let Some(previous) = driver.touch_y.replace(Some(y)) else {
                    return;
                };
                event.prevent_default();
                driver.input(previous - y, InputKind::Touch);
            },
        ));

        let driver = Rc::clone(self);
        listeners.push(EventListener::new(&window, "scroll", move |_event: &Event| {
            driver.scroll.borrow_mut().sync_position(current_scroll_y());
        }));

        let driver = Rc::clone(self);
        listeners.push(EventListener::new(&window, "resize", move |_event: &Event| {
            driver.scroll.borrow_mut().set_max_scroll(max_scroll());
        }));

        listeners
    }
}

fn max_scroll() -> f64 {
    let content = document()
        .and_then(|d| d.document_element())
        .map(|root| f64::from(root.scroll_height()))
        .unwrap_or(0.0);
    (content - viewport_height()).max(0.0)
}

fn wheel_delta_px(wheel: &WheelEvent) -> f64 {
    match wheel.delta_mode() {
        WheelEvent::DOM_DELTA_LINE => wheel.delta_y() * LINE_HEIGHT_PX,
        WheelEvent::DOM_DELTA_PAGE => wheel.delta_y() * viewport_height(),
        _ => wheel.delta_y(),
    }
}

fn first_touch_y(event: &Event) -> Option<f64> {
    let touch = event.dyn_ref::<TouchEvent>()?.touches().get(0)?;
    Some(f64::from(touch.client_y()))
}
