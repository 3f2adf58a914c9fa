use gloo::timers::callback::Timeout;
use gloo_net::http::Request;
use serde_json::json;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlFormElement, HtmlInputElement, HtmlTextAreaElement, SubmitEvent};
use yew::prelude::*;

use super::reveals::use_reveal;
use super::PageProps;
use crate::contact::{validate, ContactForm, FormStatus, MessageKind, SEND_FAILED_MESSAGE};
use crate::reveal::FADE_UP;
use crate::telemetry::LogLevel;

async fn deliver(endpoint: &str, form: &ContactForm) -> Option<()> {
    let response = Request::post(endpoint).json(form).ok()?.send().await.ok()?;
    response.ok().then_some(())
}

/// Re-renders now and again once `serial` has had its display time.
fn schedule_expiry(status: &Rc<RefCell<FormStatus>>, redraw: &UseForceUpdateHandle, serial: u64, ms: u32) {
    redraw.force_update();
    let status = Rc::clone(status);
    let redraw = redraw.clone();
    Timeout::new(ms, move || {
        status.borrow_mut().expire(serial);
        redraw.force_update();
    })
    .forget();
}

#[function_component(Contact)]
pub(crate) fn contact(props: &PageProps) -> Html {
    let handles = &props.handles;
    let section_ref = use_node_ref();
    let form_ref = use_node_ref();
    let name_ref = use_node_ref();
    let email_ref = use_node_ref();
    let message_ref = use_node_ref();
    let status = use_mut_ref(FormStatus::default);
    let redraw = use_force_update();

    use_reveal(section_ref.clone(), ".fade-in-up", FADE_UP);

    let onsubmit = {
        let handles = handles.clone();
        let form_ref = form_ref.clone();
        let name_ref = name_ref.clone();
        let email_ref = email_ref.clone();
        let message_ref = message_ref.clone();
        let status = status.clone();
        let redraw = redraw.clone();
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();

            let input = |node: &NodeRef| {
                node.cast::<HtmlInputElement>()
                    .map(|field| field.value())
                    .unwrap_or_default()
            };
            let message = message_ref
                .cast::<HtmlTextAreaElement>()
                .map(|field| field.value())
                .unwrap_or_default();
            let result = validate(&input(&name_ref), &input(&email_ref), &message);

            let display_ms = handles.config.form_message_ms;
            let serial = status.borrow_mut().show_result(&result);
            schedule_expiry(&status, &redraw, serial, display_ms);

            let form = match result {
                Ok(form) => form,
                Err(err) => {
                    handles.log(LogLevel::Warn, "contact_invalid", json!({ "reason": err.to_string() }));
                    return;
                }
            };

            if let Some(element) = form_ref.cast::<HtmlFormElement>() {
                element.reset();
            }
            handles.log(
                LogLevel::Info,
                "contact_submitted",
                json!({ "message_chars": form.message.chars().count() }),
            );

            let Some(endpoint) = handles.config.contact_endpoint.clone() else {
                return;
            };
            let handles = handles.clone();
            let status = status.clone();
            let redraw = redraw.clone();
            spawn_local(async move {
                if deliver(&endpoint, &form).await.is_some() {
                    handles.log(LogLevel::Debug, "contact_delivered", json!({ "endpoint": endpoint }));
                    return;
                }
                handles.log(LogLevel::Warn, "contact_delivery_failed", json!({ "endpoint": endpoint }));
                let serial = status.borrow_mut().show(SEND_FAILED_MESSAGE, MessageKind::Error);
                schedule_expiry(&status, &redraw, serial, display_ms);
            });
        })
    };

    let current = status.borrow().current().cloned();
    let message_class = classes!(
        "form-message",
        current.as_ref().map(|message| message.kind.class()),
        current.is_some().then_some("show"),
    );

    html! {
        <section id="contact" class="contact section" ref={section_ref}>
            <h2 class="section__title fade-in-up">{"Contact"}</h2>
            <span class="section__subtitle fade-in-up">{"Discutons de votre projet"}</span>
            <form
                id="contact-form"
                class="contact__form container fade-in-up"
                ref={form_ref}
                novalidate=true
                {onsubmit}
            >
                <label class="contact__field">
                    <span>{"Nom"}</span>
                    <input ref={name_ref} type="text" name="name" autocomplete="name" />
                </label>
                <label class="contact__field">
                    <span>{"Email"}</span>
                    <input ref={email_ref} type="email" name="email" autocomplete="email" />
                </label>
                <label class="contact__field">
                    <span>{"Message"}</span>
                    <textarea ref={message_ref} name="message" rows="6"></textarea>
                </label>
                <button type="submit" class="button">{"Envoyer"}</button>
                <p id="form-message" class={message_class} role="status" aria-live="polite">
                    { current.map(|message| message.text).unwrap_or_default() }
                </p>
            </form>
        </section>
    }
}
