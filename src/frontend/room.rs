use glam::Vec3;
use gloo::render::{request_animation_frame, AnimationFrame};
use serde_json::json;
use std::cell::RefCell;
use std::rc::Rc;
use yew::prelude::*;

use super::reveals::use_reveal;
use super::{PageHandles, PageProps};
use crate::content::{panel_view, ContentBlock, ContentItem, PanelView, DISMISS_LABEL};
use crate::interaction::{InteractionState, InteractionStore, PointerGesture};
use crate::motion::{cursor_for, label_style, target_transform, ObjectTransform};
use crate::projection::{project_scene, Camera, Face, Primitive, ProjectedGroup, Viewport};
use crate::reveal::FADE_UP;
use crate::scene::{interactive_objects, InteractiveObject, Orbit, OrbitConstraints};
use crate::section::Section;
use crate::telemetry::LogLevel;

const CAMERA_START: Vec3 = Vec3::new(0.0, 4.0, 8.0);
const VIEWPORT: Viewport = Viewport {
    width: 960.0,
    height: 640.0,
};

/// Per-frame easing of object poses and the camera orbit. Frames are only
/// requested while something is still moving.
struct RoomAnimator {
    objects: [InteractiveObject; 4],
    transforms: RefCell<[ObjectTransform; 4]>,
    orbit: RefCell<Orbit>,
    smoothing: f32,
    interaction: Rc<InteractionStore>,
    frame: RefCell<Option<AnimationFrame>>,
    redraw: UseForceUpdateHandle,
}

impl RoomAnimator {
    fn new(handles: &PageHandles, redraw: UseForceUpdateHandle) -> Rc<Self> {
        let objects = interactive_objects();
        let transforms = objects.map(|object| ObjectTransform::at_rest(object.base_position.y));
        Rc::new(Self {
            objects,
            transforms: RefCell::new(transforms),
            orbit: RefCell::new(Orbit::from_camera_position(CAMERA_START, OrbitConstraints::default())),
            smoothing: handles.config.smoothing,
            interaction: handles.interaction.clone(),
            frame: RefCell::new(None),
            redraw,
        })
    }

    fn kick(self: &Rc<Self>) {
        if self.frame.borrow().is_some() {
            return;
        }
        let animator = Rc::clone(self);
        let handle = request_animation_frame(move |_| {
            animator.frame.borrow_mut().take();
            let moving = animator.step();
            animator.redraw.force_update();
            if moving {
                animator.kick();
            }
        });
        *self.frame.borrow_mut() = Some(handle);
    }

    fn step(&self) -> bool {
        let state = self.interaction.state();
        let mut moving = false;
        for (object, transform) in self.objects.iter().zip(self.transforms.borrow_mut().iter_mut()) {
            let target = target_transform(object.section, object.base_position.y, &state);
            if transform.is_settled_at(&target) {
                *transform = target;
            } else {
                *transform = transform.step_toward(target, self.smoothing);
                moving = true;
            }
        }
        let orbiting = self.orbit.borrow_mut().tick();
        moving || orbiting
    }

    fn drag(self: &Rc<Self>, dx: i32, dy: i32) {
        self.orbit.borrow_mut().drag(dx as f32, dy as f32);
        self.kick();
    }

    fn posed(&self) -> Vec<(InteractiveObject, ObjectTransform)> {
        self.objects
            .iter()
            .copied()
            .zip(self.transforms.borrow().iter().copied())
            .collect()
    }

    fn camera(&self) -> Camera {
        Camera::looking_at_origin(self.orbit.borrow().camera_position())
    }
}

fn render_face(face: &Face) -> Html {
    match &face.primitive {
        Primitive::Polygon { .. } => html! {
            <polygon
                points={face.primitive.svg_points().unwrap_or_default()}
                fill={face.fill.clone()}
                stroke={face.fill.clone()}
                stroke-width="0.6"
                stroke-linejoin="round"
            />
        },
        Primitive::Circle { center, radius } => html! {
            <circle
                cx={format!("{:.1}", center.x)}
                cy={format!("{:.1}", center.y)}
                r={format!("{:.1}", radius)}
                fill={face.fill.clone()}
            />
        },
    }
}

fn render_label(section: Section, group: &ProjectedGroup, state: &InteractionState) -> Html {
    let Some(anchor) = group.label_anchor else {
        return html! {};
    };
    let style = label_style(section, state);
    html! {
        <text
            class="room__label"
            x={format!("{:.1}", anchor.x)}
            y={format!("{:.1}", anchor.y)}
            fill={style.color}
            opacity={format!("{:.2}", style.opacity)}
            text-anchor="middle"
        >
            {section.label()}
        </text>
    }
}

#[function_component(RoomScene)]
fn room_scene(props: &PageProps) -> Html {
    let handles = &props.handles;
    let redraw = use_force_update();
    let animator = {
        let handles = handles.clone();
        use_memo((), move |_| RoomAnimator::new(&handles, redraw))
    };
    let gesture = use_mut_ref(PointerGesture::default);

    {
        let animator = (*animator).clone();
        let interaction = handles.interaction.clone();
        use_effect_with((), move |_| {
            let subscription = interaction.subscribe(Rc::new(move |_: InteractionState| animator.kick()));
            move || drop(subscription)
        });
    }

    let onmousedown = {
        let gesture = gesture.clone();
        Callback::from(move |event: MouseEvent| {
            gesture.borrow_mut().press(event.client_x(), event.client_y());
        })
    };

    let onmousemove = {
        let gesture = gesture.clone();
        let animator = (*animator).clone();
        Callback::from(move |event: MouseEvent| {
            let delta = gesture.borrow_mut().move_to(event.client_x(), event.client_y());
            if let Some((dx, dy)) = delta {
                animator.drag(dx, dy);
            }
        })
    };

    let onmouseup = {
        let gesture = gesture.clone();
        Callback::from(move |_: MouseEvent| gesture.borrow_mut().release())
    };

    let onmouseleave = {
        let gesture = gesture.clone();
        Callback::from(move |_: MouseEvent| gesture.borrow_mut().cancel())
    };

    // Background clicks land here; object clicks stop propagation first.
    let on_background_click = {
        let gesture = gesture.clone();
        let handles = handles.clone();
        Callback::from(move |_: MouseEvent| {
            let action = gesture.borrow_mut().resolve_click(None);
            if let Some((section, _)) = handles.interaction.apply_click(action) {
                handles.log(LogLevel::Info, "section_closed", json!({ "section": section.as_str(), "via": "background" }));
            }
        })
    };

    let state = handles.interaction.state();
    let scene = project_scene(&animator.camera(), VIEWPORT, &animator.posed());

    let objects = scene.objects.iter().filter_map(|group| {
        let section = group.owner?;
        let interaction = handles.interaction.clone();
        let onmouseenter = {
            let interaction = interaction.clone();
            Callback::from(move |_: MouseEvent| interaction.pointer_enter(section))
        };
        let onmouseleave = {
            let interaction = interaction.clone();
            Callback::from(move |_: MouseEvent| interaction.pointer_leave(section))
        };
        let onclick = {
            let handles = handles.clone();
            let gesture = gesture.clone();
            Callback::from(move |event: MouseEvent| {
                event.stop_propagation();
                let action = gesture.borrow_mut().resolve_click(Some(section));
                if let Some((section, opened)) = handles.interaction.apply_click(action) {
                    handles.log(
                        LogLevel::Info,
                        if opened { "section_opened" } else { "section_closed" },
                        json!({ "section": section.as_str(), "via": "object" }),
                    );
                }
            })
        };

        Some(html! {
            <g
                key={section.as_str()}
                class={classes!("room__object", state.is_active(section).then_some("is-active"))}
                data-section={section.as_str()}
                {onmouseenter}
                {onmouseleave}
                {onclick}
            >
                { for group.faces.iter().map(render_face) }
            </g>
        })
    });

    let labels = scene
        .objects
        .iter()
        .filter_map(|group| Some(render_label(group.owner?, group, &state)));

    html! {
        <svg
            class="room__canvas"
            viewBox={format!("0 0 {} {}", VIEWPORT.width, VIEWPORT.height)}
            preserveAspectRatio="xMidYMid slice"
            style={format!("cursor: {};", cursor_for(&state))}
            role="img"
            aria-label="Chambre interactive : cliquez sur un meuble pour ouvrir une section"
            {onmousedown}
            {onmousemove}
            {onmouseup}
            {onmouseleave}
            onclick={on_background_click}
        >
            <g class="room__backdrop">
                { for scene.backdrop.faces.iter().map(render_face) }
            </g>
            { for objects }
            <g class="room__labels" pointer-events="none">
                { for labels }
            </g>
        </svg>
    }
}

fn render_item(item: &ContentItem) -> Html {
    match item {
        ContentItem::Paragraph(text) => html! { <p class="panel__text">{*text}</p> },
        ContentItem::Quote(text) => html! { <blockquote class="panel__quote">{*text}</blockquote> },
        ContentItem::Heading(text) => html! { <h3 class="panel__heading">{*text}</h3> },
        ContentItem::Tags(tags) => html! {
            <ul class="panel__tags">
                { for tags.iter().map(|tag| html! { <li class="panel__tag">{*tag}</li> }) }
            </ul>
        },
        ContentItem::Bullets(items) => html! {
            <ul class="panel__bullets">
                { for items.iter().map(|item| html! { <li>{*item}</li> }) }
            </ul>
        },
        ContentItem::Projects(rows) => html! {
            <ul class="panel__projects">
                { for rows.iter().map(|row| html! {
                    <li class={classes!("panel__project", row.featured.then_some("panel__project--featured"))}>
                        <span class="panel__project-tag">{row.tag}</span>
                        <span class="panel__project-title">{row.title}</span>
                        <span class={if row.featured { "panel__badge" } else { "panel__project-tech" }}>{row.tech}</span>
                    </li>
                }) }
            </ul>
        },
    }
}

fn render_detail(block: &ContentBlock, on_dismiss: Callback<MouseEvent>) -> Html {
    html! {
        <article class="panel panel--detail" data-section={block.section.as_str()}>
            <p class="panel__subtitle">{block.subtitle}</p>
            <h2 class="panel__title">{block.title}</h2>
            { for block.body.iter().map(render_item) }
            <button class="panel__dismiss" type="button" onclick={on_dismiss}>{DISMISS_LABEL}</button>
        </article>
    }
}

#[function_component(ContentPanel)]
fn content_panel(props: &PageProps) -> Html {
    let handles = &props.handles;
    let initial = handles.interaction.state();
    let state = use_state_eq(move || initial);

    {
        let state = state.clone();
        let interaction = handles.interaction.clone();
        use_effect_with((), move |_| {
            state.set(interaction.state());
            let subscription = interaction.subscribe(Rc::new(move |next: InteractionState| state.set(next)));
            move || drop(subscription)
        });
    }

    let on_dismiss = {
        let handles = handles.clone();
        Callback::from(move |_: MouseEvent| {
            let closed = handles.interaction.state().active;
            handles.interaction.set_active(None);
            if let Some(section) = closed {
                handles.log(LogLevel::Info, "section_closed", json!({ "section": section.as_str(), "via": "dismiss" }));
            }
        })
    };

    match panel_view(&state) {
        PanelView::Idle { headline, prompt } => html! {
            <div class="panel panel--idle" aria-live="polite">
                <p class="panel__headline">{headline}</p>
                <p class="panel__prompt">{prompt}</p>
            </div>
        },
        PanelView::Detail(block) => render_detail(block, on_dismiss),
        PanelView::Empty => html! {},
    }
}

#[function_component(RoomSection)]
pub(crate) fn room_section(props: &PageProps) -> Html {
    let section_ref = use_node_ref();
    use_reveal(section_ref.clone(), ".fade-in-up", FADE_UP);

    html! {
        <section id="room" class="room section" ref={section_ref}>
            <h2 class="section__title fade-in-up">{"Mon univers"}</h2>
            <div class="room__stage">
                <RoomScene handles={props.handles.clone()} />
                <ContentPanel handles={props.handles.clone()} />
            </div>
        </section>
    }
}
