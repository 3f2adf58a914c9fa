use gloo::timers::callback::Timeout;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{Element, HtmlElement, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};
use yew::prelude::*;

use crate::reveal::{RevealCommand, RevealEffect, RevealProfile, RevealTracker};

type ObserverCallback = Closure<dyn FnMut(js_sys::Array, IntersectionObserver)>;

/// Live observer for one profile. Disconnects when dropped.
struct RevealBinding {
    observer: IntersectionObserver,
    _callback: ObserverCallback,
}

impl Drop for RevealBinding {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

impl RevealBinding {
    fn attach(root: &Element, selector: &str, profile: RevealProfile) -> Option<Self> {
        let nodes = root.query_selector_all(selector).ok()?;
        let elements: Vec<Element> = (0..nodes.length())
            .filter_map(|index| nodes.item(index))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect();
        if elements.is_empty() {
            return None;
        }

        let mut tracker = RevealTracker::new(profile);
        for (key, element) in elements.iter().enumerate() {
            tracker.observe(key);
            if let Some(style) = profile.effect.initial_style() {
                let _ = element.set_attribute("style", style);
            }
        }

        let tracker = Rc::new(RefCell::new(tracker));
        let observed = elements.clone();
        let callback: ObserverCallback = Closure::new(move |entries: js_sys::Array, observer: IntersectionObserver| {
            for (index, entry) in entries.iter().enumerate() {
                let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                    continue;
                };
                let target = entry.target();
                let Some(key) = observed.iter().position(|element| *element == target) else {
                    continue;
                };
                let outcome = tracker
                    .borrow_mut()
                    .on_visibility(&key, entry.is_intersecting(), index);
                if let Some(command) = outcome.command {
                    apply(&target, profile.effect, command);
                }
                if outcome.unobserve {
                    observer.unobserve(&target);
                }
            }
        });

        let options = IntersectionObserverInit::new();
        options.set_threshold(&JsValue::from_f64(profile.threshold));
        options.set_root_margin(profile.root_margin);
        let observer =
            IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options).ok()?;
        for element in &elements {
            observer.observe(element);
        }

        Some(Self {
            observer,
            _callback: callback,
        })
    }
}

fn apply(target: &Element, effect: RevealEffect, command: RevealCommand) {
    match (effect, command) {
        (RevealEffect::AddClass(class), RevealCommand::Reveal { .. }) => {
            let _ = target.class_list().add_1(class);
        }
        (RevealEffect::AddClass(class), RevealCommand::Conceal) => {
            let _ = target.class_list().remove_1(class);
        }
        (RevealEffect::Keyframe(animation), RevealCommand::Reveal { .. }) => {
            set_style(target, "animation", animation);
        }
        (RevealEffect::ProgressFill { .. }, RevealCommand::Reveal { delay_ms }) => {
            let Some(bar) = target.dyn_ref::<HtmlElement>() else {
                return;
            };
            let width = bar.style().get_property_value("width").unwrap_or_default();
            let _ = bar.style().set_property("width", "0");
            let bar = bar.clone();
            Timeout::new(delay_ms, move || {
                let _ = bar.style().set_property("width", &width);
            })
            .forget();
        }
        (RevealEffect::Stagger { .. }, RevealCommand::Reveal { delay_ms }) => {
            let card = target.clone();
            Timeout::new(delay_ms, move || {
                set_style(&card, "opacity", "1");
                set_style(&card, "transform", "translateY(0)");
            })
            .forget();
        }
        (RevealEffect::Stagger { .. }, RevealCommand::Conceal) => {
            set_style(target, "opacity", "0");
            set_style(target, "transform", "translateY(30px)");
        }
        (RevealEffect::Keyframe(_), RevealCommand::Conceal) => {
            set_style(target, "animation", "none");
        }
        (RevealEffect::StaggeredClass { class, .. }, RevealCommand::Reveal { delay_ms }) => {
            set_style(target, "transition-delay", &format!("{delay_ms}ms"));
            let _ = target.class_list().add_1(class);
        }
        (RevealEffect::StaggeredClass { class, .. }, RevealCommand::Conceal) => {
            set_style(target, "transition-delay", "0ms");
            let _ = target.class_list().remove_1(class);
        }
        (RevealEffect::ProgressFill { .. }, RevealCommand::Conceal) => {}
    }
}

fn set_style(target: &Element, property: &str, value: &str) {
    if let Some(element) = target.dyn_ref::<HtmlElement>() {
        let _ = element.style().set_property(property, value);
    }
}

/// Observes every `selector` match under `container` with `profile` for the
/// lifetime of the calling component.
#[hook]
pub(crate) fn use_reveal(container: NodeRef, selector: &'static str, profile: RevealProfile) {
    use_effect_with((), move |_| {
        let binding = container
            .cast::<Element>()
            .and_then(|root| RevealBinding::attach(&root, selector, profile));
        move || drop(binding)
    });
}
