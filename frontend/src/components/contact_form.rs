use gloo_timers::callback::Timeout;
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, HtmlTextAreaElement};
use yew::prelude::*;
use yew_hooks::prelude::*;

use crate::config;
use crate::contact::attachments::human_size;
use crate::contact::{
    Attachment, AttachmentPolicy, ContactFormState, Field, FormAction, SubmitGate, SubmitStatus,
    SubmitterHandle,
};

#[derive(Properties, PartialEq)]
pub struct ContactFormProps {
    pub submitter: SubmitterHandle,
}

#[function_component]
pub fn ContactForm(props: &ContactFormProps) -> Html {
    let form = use_reducer(ContactFormState::default);
    let mounted = use_mut_ref(|| true);
    let policy = use_memo(|_| AttachmentPolicy::default(), ());
    let gate = use_memo(|_| SubmitGate::default(), ());

    {
        let mounted = mounted.clone();
        use_unmount(move || {
            *mounted.borrow_mut() = false;
        });
    }

    // Success banner goes away on its own, failures stay until the next attempt
    {
        let showing_success = form.status.as_ref().map_or(false, SubmitStatus::is_success);
        let form = form.clone();
        use_effect_with_deps(
            move |showing_success| {
                let timeout = showing_success.then(|| {
                    Timeout::new(config::SUCCESS_BANNER_MS, move || {
                        form.dispatch(FormAction::DismissStatus);
                    })
                });
                move || drop(timeout)
            },
            showing_success,
        );
    }

    let on_input = |field: Field| {
        let form = form.clone();
        Callback::from(move |e: InputEvent| {
            let value = match field {
                Field::Message => e.target_unchecked_into::<HtmlTextAreaElement>().value(),
                _ => e.target_unchecked_into::<HtmlInputElement>().value(),
            };
            form.dispatch(FormAction::Edit(field, value));
        })
    };

    let on_focus = |field: Option<Field>| {
        let form = form.clone();
        Callback::from(move |_: FocusEvent| {
            form.dispatch(FormAction::Focus(field));
        })
    };

    let on_files = {
        let form = form.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            if let Some(files) = input.files() {
                let picked = (0..files.length())
                    .filter_map(|i| files.get(i))
                    .map(Attachment::from_file)
                    .collect::<Vec<_>>();
                form.dispatch(FormAction::SelectAttachments(picked));
            }
            // Lets the same file be picked again after removing it
            input.set_value("");
        })
    };

    let on_submit = {
        let form = form.clone();
        let submitter = props.submitter.clone();
        let mounted = mounted.clone();
        let gate = gate.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if gate.is_busy() {
                return;
            }
            let outgoing = form.claim_submission(&gate);
            form.dispatch(FormAction::SubmitRequested);
            let Some(submission) = outgoing else {
                return;
            };

            let form = form.clone();
            let submitter = submitter.clone();
            let mounted = mounted.clone();
            let gate = gate.clone();
            spawn_local(async move {
                let result = submitter.0.submit(&submission).await;
                gate.release();
                if *mounted.borrow() {
                    form.dispatch(FormAction::SubmitFinished(result));
                } else {
                    gloo_console::log!("Contact form was closed before the request finished");
                }
            });
        })
    };

    let render_field = |field: Field| {
        let error = form.errors.get(field).map(str::to_string);
        let is_active = form.active_field == Some(field);
        let class = classes!(
            "contact-input",
            is_active.then(|| "active"),
            (!is_active && error.is_some()).then(|| "invalid"),
        );
        let value = form.submission.value(field).to_string();
        let placeholder = format!("Your {}", field.label());

        html! {
            <div class="contact-field">
                <label for={field.as_str()}>{field.label()}</label>
                if field == Field::Message {
                    <textarea
                        id={field.as_str()}
                        name={field.as_str()}
                        rows="4"
                        class={class.clone()}
                        value={value.clone()}
                        placeholder={placeholder.clone()}
                        oninput={on_input(field)}
                        onfocus={on_focus(Some(field))}
                        onblur={on_focus(None)}
                    />
                } else {
                    <input
                        id={field.as_str()}
                        name={field.as_str()}
                        type={if field == Field::Email { "email" } else { "text" }}
                        class={class.clone()}
                        value={value.clone()}
                        placeholder={placeholder.clone()}
                        oninput={on_input(field)}
                        onfocus={on_focus(Some(field))}
                        onblur={on_focus(None)}
                    />
                }
                if let Some(error) = error {
                    <p class="field-error">{error}</p>
                }
            </div>
        }
    };

    let attachments = form
        .submission
        .attachments
        .iter()
        .enumerate()
        .map(|(index, attachment)| {
            let on_remove = {
                let form = form.clone();
                Callback::from(move |_: MouseEvent| {
                    form.dispatch(FormAction::RemoveAttachment(index));
                })
            };
            html! {
                <li key={format!("{}-{}", index, attachment.name)} class="attachment-item">
                    <span>{attachment.name.clone()}</span>
                    <span class="attachment-size">{human_size(attachment.size)}</span>
                    <button type="button" class="attachment-remove" onclick={on_remove}>
                        {"Remove"}
                    </button>
                </li>
            }
        })
        .collect::<Html>();

    html! {
        <div class="contact-form-card">
            <style>
                {r#"
                .contact-form-card {
                    background: white;
                    border-top: 4px solid #22c55e;
                    border-radius: 16px;
                    padding: 2rem;
                    box-shadow: 0 20px 40px rgba(0, 0, 0, 0.12);
                }
                .contact-form-card h2 {
                    font-size: 1.8rem;
                    color: #1f2937;
                    margin-bottom: 1.5rem;
                }
                .contact-field {
                    margin-bottom: 1.25rem;
                }
                .contact-field label {
                    display: block;
                    margin-bottom: 0.5rem;
                    color: #374151;
                }
                .contact-input {
                    width: 100%;
                    padding: 0.75rem 1rem;
                    border: 1px solid #d1d5db;
                    border-radius: 8px;
                    transition: all 0.3s ease;
                }
                .contact-input.active {
                    border-color: #3b82f6;
                    box-shadow: 0 0 0 2px #bfdbfe;
                }
                .contact-input.invalid {
                    border-color: #ef4444;
                }
                .field-error {
                    color: #ef4444;
                    font-size: 0.85rem;
                    margin-top: 0.25rem;
                }
                .attachment-list {
                    list-style: none;
                    padding: 0;
                    margin: 0.5rem 0 0;
                }
                .attachment-item {
                    display: flex;
                    gap: 0.75rem;
                    align-items: center;
                    padding: 0.25rem 0;
                }
                .attachment-size {
                    color: #6b7280;
                    font-size: 0.85rem;
                }
                .attachment-remove {
                    margin-left: auto;
                    background: none;
                    border: none;
                    color: #dc2626;
                    cursor: pointer;
                }
                .attachment-notices {
                    color: #b45309;
                    font-size: 0.85rem;
                    padding-left: 1rem;
                }
                .contact-submit {
                    width: 100%;
                    background: linear-gradient(90deg, #22c55e, #2563eb);
                    color: white;
                    border: none;
                    padding: 0.8rem;
                    border-radius: 8px;
                    font-size: 1rem;
                    cursor: pointer;
                    display: flex;
                    align-items: center;
                    justify-content: center;
                    gap: 0.5rem;
                }
                .contact-submit:disabled {
                    opacity: 0.7;
                    cursor: not-allowed;
                }
                .loading-spinner {
                    display: inline-block;
                    width: 18px;
                    height: 18px;
                    border: 3px solid rgba(255,255,255,.3);
                    border-radius: 50%;
                    border-top-color: #fff;
                    animation: spin 1s ease-in-out infinite;
                }
                @keyframes spin { to { transform: rotate(360deg); } }
                .contact-banner {
                    margin-top: 1rem;
                    padding: 0.75rem 1rem;
                    border-radius: 6px;
                    border: 1px solid;
                }
                .contact-banner.success {
                    background: #dcfce7;
                    border-color: #4ade80;
                    color: #15803d;
                }
                .contact-banner.error {
                    background: #fee2e2;
                    border-color: #f87171;
                    color: #b91c1c;
                }
                "#}
            </style>
            <h2>{"Send a Message"}</h2>
            <form onsubmit={on_submit} novalidate=true>
                { for Field::ALL.into_iter().map(render_field) }

                <div class="contact-field">
                    <label for="attachments">{"Attachments (optional)"}</label>
                    <input
                        id="attachments"
                        type="file"
                        multiple=true
                        accept={policy.accept_attr()}
                        onchange={on_files}
                    />
                    if !form.submission.attachments.is_empty() {
                        <ul class="attachment-list">{attachments}</ul>
                    }
                    if !form.attachment_notices.is_empty() {
                        <ul class="attachment-notices">
                            { for form.attachment_notices.iter().map(|notice| html! { <li>{notice.clone()}</li> }) }
                        </ul>
                    }
                </div>

                <button type="submit" class="contact-submit" disabled={form.pending}>
                    if form.pending {
                        <span class="loading-spinner"></span>
                    }
                    { if form.pending { "Sending..." } else { "Send Message" } }
                </button>

                if let Some(status) = form.status.as_ref() {
                    <div class={classes!("contact-banner", if status.is_success() { "success" } else { "error" })}>
                        {status.banner_text()}
                    </div>
                }
            </form>
        </div>
    }
}
