mod contact_form;
mod header;
mod intro;
mod reveals;
mod room;
mod scrolling;
mod sections;

use serde_json::json;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys::{window, Document, HtmlElement, MouseEvent};
use yew::prelude::*;

use crate::config::SiteConfig;
use crate::interaction::InteractionStore;
use crate::nav;
use crate::telemetry::{log_event, LogLevel};

use scrolling::ScrollDriver;

/// Handles every component of the page shares. Compared by identity.
#[derive(Clone)]
pub(crate) struct PageHandles {
    pub config: Rc<SiteConfig>,
    pub scroll: Rc<ScrollDriver>,
    pub interaction: Rc<InteractionStore>,
}

impl PartialEq for PageHandles {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.config, &other.config)
            && Rc::ptr_eq(&self.scroll, &other.scroll)
            && Rc::ptr_eq(&self.interaction, &other.interaction)
    }
}

impl PageHandles {
    fn new() -> Self {
        Self {
            config: Rc::new(SiteConfig::from_build_env()),
            scroll: ScrollDriver::new(),
            interaction: InteractionStore::new(),
        }
    }

    pub fn log(&self, level: LogLevel, event: &str, fields: serde_json::Value) {
        log_event(self.config.log_level, level, event, fields);
    }
}

#[derive(Properties, PartialEq)]
pub(crate) struct PageProps {
    pub handles: PageHandles,
}

pub(crate) fn document() -> Option<Document> {
    window()?.document()
}

pub(crate) fn prefers_reduced_motion() -> bool {
    window()
        .and_then(|w| {
            w.match_media("(prefers-reduced-motion: reduce)")
                .ok()
                .flatten()
        })
        .map(|mq| mq.matches())
        .unwrap_or(false)
}

pub(crate) fn viewport_height() -> f64 {
    window()
        .and_then(|w| w.inner_height().ok())
        .and_then(|value| value.as_f64())
        .unwrap_or(720.0)
}

pub(crate) fn current_scroll_y() -> f64 {
    window().and_then(|w| w.scroll_y().ok()).unwrap_or(0.0)
}

/// Wall-clock seconds; every animation clock on the page reads this.
pub(crate) fn now_seconds() -> f64 {
    js_sys::Date::now() / 1000.0
}

fn html_element_by_id(id: &str) -> Option<HtmlElement> {
    document()?
        .get_element_by_id(id)?
        .dyn_into::<HtmlElement>()
        .ok()
}

/// Smooth-scrolls in-page `#id` links to just under the fixed header. Links
/// without a matching element keep their default behaviour.
pub(crate) fn on_anchor(handles: &PageHandles, href: &str) -> Callback<MouseEvent> {
    let scroll = handles.scroll.clone();
    let target = nav::anchor_id(href).map(str::to_string);
    Callback::from(move |event: MouseEvent| {
        let Some(id) = target.as_deref() else {
            return;
        };
        let Some(section) = html_element_by_id(id) else {
            return;
        };
        event.prevent_default();
        let header_height = html_element_by_id("header")
            .map(|header| f64::from(header.offset_height()))
            .unwrap_or(0.0);
        scroll.scroll_to(nav::scroll_target(f64::from(section.offset_top()), header_height));
    })
}

#[function_component(App)]
fn app() -> Html {
    let handles = use_memo((), |_| PageHandles::new());

    {
        let handles = (*handles).clone();
        use_effect_with((), move |_| {
            let listeners = handles.scroll.install();
            handles.log(
                LogLevel::Info,
                "page_ready",
                json!({ "reduced_motion": prefers_reduced_motion() }),
            );
            move || drop(listeners)
        });
    }

    let handles = (*handles).clone();

    html! {
        <>
            <a class="skip-link" href="#content">{"Aller au contenu"}</a>
            <header::Header handles={handles.clone()} />
            <main id="content" class="main">
                <intro::Hero handles={handles.clone()} />
                <sections::About handles={handles.clone()} />
                <room::RoomSection handles={handles.clone()} />
                <sections::Skills handles={handles.clone()} />
                <sections::Projects handles={handles.clone()} />
                <contact_form::Contact handles={handles.clone()} />
            </main>
            <sections::Footer handles={handles} />
        </>
    }
}

pub fn run() {
    yew::Renderer::<App>::with_root(
        window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id("app"))
            .expect("missing #app mount point"),
    )
    .render();
}
