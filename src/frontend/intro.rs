use gloo::events::EventListener;
use gloo::render::{request_animation_frame, AnimationFrame};
use serde_json::json;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use web_sys::{window, Event, HtmlElement};
use yew::prelude::*;

use super::{current_scroll_y, now_seconds, on_anchor, prefers_reduced_motion, viewport_height, PageHandles, PageProps};
use crate::intro::{IntroFrame, IntroSequencer, GLASS_PANEL, LOADER, LOADER_TEXT, SUBTITLE, TITLE_LINE};
use crate::scroll::hero_parallax;
use crate::telemetry::LogLevel;

const TITLE_LINES: [&str; 2] = ["BARRY", "BAILO"];

type PendingFrame = Rc<RefCell<Option<AnimationFrame>>>;

fn schedule_intro_frame(
    sequencer: Rc<RefCell<IntroSequencer>>,
    pending: PendingFrame,
    handles: PageHandles,
    frame_state: UseStateHandle<Option<IntroFrame>>,
) {
    let next = Rc::clone(&pending);
    let handle = request_animation_frame(move |_| {
        let frame = handles
            .scroll
            .with_scroll(|scroll| sequencer.borrow_mut().tick(now_seconds(), scroll));
        let finished = frame.just_completed;
        frame_state.set(Some(frame));

        if finished {
            next.borrow_mut().take();
            handles.log(LogLevel::Info, "intro_complete", json!({}));
        } else {
            schedule_intro_frame(sequencer, next, handles, frame_state);
        }
    });
    *pending.borrow_mut() = Some(handle);
}

/// Loader overlay plus the hero panel it uncovers.
#[function_component(Hero)]
pub(crate) fn hero(props: &PageProps) -> Html {
    let handles = &props.handles;
    let frame = use_state(|| None::<IntroFrame>);
    let hero_ref = use_node_ref();

    {
        let frame_state = frame.clone();
        let handles = handles.clone();
        use_effect_with((), move |_| {
            let sequencer = Rc::new(RefCell::new(IntroSequencer::new(TITLE_LINES.len())));
            let pending: PendingFrame = Rc::new(RefCell::new(None));

            if prefers_reduced_motion() {
                let skipped = handles
                    .scroll
                    .with_scroll(|scroll| sequencer.borrow_mut().skip(scroll));
                frame_state.set(Some(skipped));
                handles.log(LogLevel::Info, "intro_skipped", json!({ "reason": "reduced_motion" }));
            } else {
                handles
                    .scroll
                    .with_scroll(|scroll| sequencer.borrow_mut().begin(now_seconds(), scroll));
                handles.log(
                    LogLevel::Debug,
                    "intro_started",
                    json!({ "duration_s": sequencer.borrow().duration() }),
                );
                schedule_intro_frame(
                    Rc::clone(&sequencer),
                    Rc::clone(&pending),
                    handles.clone(),
                    frame_state,
                );
            }

            move || {
                pending.borrow_mut().take();
                handles
                    .scroll
                    .with_scroll(|scroll| sequencer.borrow_mut().teardown(scroll));
            }
        });
    }

    {
        let hero_ref = hero_ref.clone();
        use_effect_with((), move |_| {
            let offset = Cell::new(0.0);
            let apply = move || {
                let Some(hero) = hero_ref.cast::<HtmlElement>() else {
                    return;
                };
                offset.set(hero_parallax(current_scroll_y(), viewport_height(), offset.get()));
                let _ = hero
                    .style()
                    .set_property("background-position-y", &format!("{:.1}px", offset.get()));
            };
            apply();
            let listener = window().map(|window| EventListener::new(&window, "scroll", move |_event: &Event| apply()));
            move || drop(listener)
        });
    }

    let style = |target: &str, index: usize| -> String {
        (*frame)
            .as_ref()
            .map(|frame| frame.style_for(target, index))
            .unwrap_or_default()
    };

    html! {
        <>
            <div class="loader" style={style(LOADER, 0)} aria-hidden="true">
                <p class="loader-text" style={style(LOADER_TEXT, 0)}>{"INITIALIZING..."}</p>
            </div>
            <section id="home" class="hero" ref={hero_ref}>
                <div class="glass-panel" style={style(GLASS_PANEL, 0)}>
                    <h1 class="hero-title">
                        { for TITLE_LINES.iter().enumerate().map(|(index, line)| html! {
                            <span class="reveal-line">
                                <span class="reveal-text" style={style(TITLE_LINE, index)}>{*line}</span>
                            </span>
                        }) }
                    </h1>
                    <p class="hero-subtitle" style={style(SUBTITLE, 0)}>
                        {"Étudiant en BUT Informatique · Futur ingénieur en IA"}
                    </p>
                    <div class="hero__buttons">
                        <a href="#room" class="button" onclick={on_anchor(handles, "#room")}>{"Explorer l'univers"}</a>
                        <a href="#contact" class="button button--ghost" onclick={on_anchor(handles, "#contact")}>
                            {"Me contacter"}
                        </a>
                    </div>
                </div>
            </section>
        </>
    }
}
