use gloo::events::EventListener;
use serde_json::json;
use wasm_bindgen::JsCast;
use web_sys::{window, Event, HtmlElement, MouseEvent};
use yew::prelude::*;

use super::{current_scroll_y, document, on_anchor, PageProps};
use crate::nav::MenuState;
use crate::scroll::{ScrollSnapshot, ScrollTracker, SectionBounds};
use crate::telemetry::LogLevel;

const NAV_LINKS: [(&str, &str); 6] = [
    ("#home", "Accueil"),
    ("#about", "Parcours"),
    ("#room", "Univers"),
    ("#skills", "Compétences"),
    ("#projects", "Projets"),
    ("#contact", "Contact"),
];

fn section_bounds() -> Vec<SectionBounds> {
    let Some(nodes) = document().and_then(|d| d.query_selector_all("section[id]").ok()) else {
        return Vec::new();
    };
    (0..nodes.length())
        .filter_map(|index| nodes.item(index))
        .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
        .map(|section| {
            SectionBounds::new(
                section.id(),
                f64::from(section.offset_top()),
                f64::from(section.offset_height()),
            )
        })
        .collect()
}

#[function_component(Header)]
pub(crate) fn header(props: &PageProps) -> Html {
    let handles = &props.handles;
    let menu = use_state_eq(MenuState::default);
    let snapshot = use_state_eq(ScrollSnapshot::default);

    {
        let snapshot = snapshot.clone();
        let config = handles.config.clone();
        use_effect_with((), move |_| {
            let tracker = ScrollTracker::new(config.nav_offset_px, config.header_threshold_px);
            let refresh = move || snapshot.set(tracker.evaluate(current_scroll_y(), &section_bounds()));
            refresh();
            let listener = window()
                .map(|window| EventListener::new(&window, "scroll", move |_event: &Event| refresh()));
            move || drop(listener)
        });
    }

    let on_toggle = {
        let menu = menu.clone();
        let handles = handles.clone();
        Callback::from(move |_: MouseEvent| {
            let next = (*menu).toggle();
            handles.log(LogLevel::Debug, "nav_menu", json!({ "open": next.is_open() }));
            menu.set(next);
        })
    };

    let on_close = {
        let menu = menu.clone();
        Callback::from(move |_: MouseEvent| menu.set((*menu).close()))
    };

    let links = NAV_LINKS.iter().map(|(href, label)| {
        let scroll_to = on_anchor(handles, href);
        let menu = menu.clone();
        let onclick = Callback::from(move |event: MouseEvent| {
            menu.set((*menu).close());
            scroll_to.emit(event);
        });
        let lit = href
            .strip_prefix('#')
            .is_some_and(|id| snapshot.is_active(id));

        html! {
            <li class="nav__item">
                <a href={*href} class={classes!("nav__link", lit.then_some("active-link"))} {onclick}>
                    {*label}
                </a>
            </li>
        }
    });

    html! {
        <header
            id="header"
            class={classes!("header", snapshot.header_scrolled.then_some("scroll-header"))}
        >
            <nav class="nav container">
                <a href="#home" class="nav__logo" onclick={on_anchor(handles, "#home")}>{"Barry Bailo"}</a>
                <div id="nav-menu" class={menu.menu_class()}>
                    <ul class="nav__list">
                        { for links }
                    </ul>
                    <button
                        id="nav-close"
                        class="nav__close"
                        type="button"
                        aria-label="Fermer le menu"
                        onclick={on_close}
                    >
                        {"✕"}
                    </button>
                </div>
                <button
                    id="nav-toggle"
                    class="nav__toggle"
                    type="button"
                    aria-label="Ouvrir le menu"
                    aria-expanded={menu.is_open().to_string()}
                    onclick={on_toggle}
                >
                    {"☰"}
                </button>
            </nav>
        </header>
    }
}
