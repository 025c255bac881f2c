use yew::prelude::*;

use crate::components::contact_form::ContactForm;
use crate::config;
use crate::contact::SubmitterHandle;

const MAP_EMBED_URL: &str = "https://www.google.com/maps/embed?pb=!1m18!1m12!1m3!1d12345.67890!2d-74.006!3d40.7128!2m3!1f0!2f0!3f0!3m2!1i1024!2i768!4f13.1!3m3!1m2!1s0x0%3A0x0!2zNDDCsDQyJzQ2LjEiTiA3NMKwMDAnMjAuNCJX!5e0!3m2!1sen!2sus!4v1234567890";

struct ContactDetail {
    title: &'static str,
    description: &'static str,
}

const CONTACT_DETAILS: [ContactDetail; 3] = [
    ContactDetail {
        title: "Address",
        description: "123 Tech Street, Innovation City, Digital State 54321",
    },
    ContactDetail {
        title: "Phone",
        description: "+1 (555) 123-4567",
    },
    ContactDetail {
        title: "Email",
        description: config::CONTACT_RECIPIENT,
    },
];

#[function_component]
pub fn ContactPage() -> Html {
    let submitter = use_state(SubmitterHandle::http);

    html! {
        <div class="contact-page">
            <style>
                {r#"
                .contact-page {
                    min-height: 100vh;
                    background: linear-gradient(135deg, #f9fafb, #eff6ff);
                }
                .contact-hero {
                    background: linear-gradient(90deg, #4f46e5, #7e22ce);
                    color: white;
                    border-radius: 0 0 24px 24px;
                    padding: 5rem 1rem;
                    text-align: center;
                    animation: dropIn 0.8s ease-out;
                }
                .contact-hero h1 {
                    font-size: 3rem;
                    font-weight: 800;
                    margin-bottom: 1.5rem;
                }
                .contact-hero p {
                    font-size: 1.25rem;
                    opacity: 0.8;
                }
                @keyframes dropIn {
                    from { opacity: 0; transform: translateY(-50px); }
                    to { opacity: 1; transform: translateY(0); }
                }
                .contact-grid {
                    max-width: 72rem;
                    margin: 0 auto;
                    padding: 4rem 1rem;
                    display: grid;
                    grid-template-columns: repeat(auto-fit, minmax(320px, 1fr));
                    gap: 3rem;
                }
                .contact-details {
                    background: white;
                    border-top: 4px solid #4f46e5;
                    border-radius: 16px;
                    padding: 2rem;
                    box-shadow: 0 20px 40px rgba(0, 0, 0, 0.12);
                }
                .contact-detail {
                    padding: 1rem;
                    margin-bottom: 1.5rem;
                    background: #eff6ff;
                    border-radius: 8px;
                    transition: background 0.3s ease;
                }
                .contact-detail:hover {
                    background: #dbeafe;
                }
                .contact-detail h3 {
                    font-weight: 600;
                    color: #1f2937;
                }
                .contact-detail p {
                    color: #4b5563;
                }
                .contact-map {
                    width: 100%;
                    height: 24rem;
                    padding: 0 1rem 4rem;
                    box-sizing: border-box;
                }
                .contact-map iframe {
                    width: 100%;
                    height: 100%;
                    border: 0;
                    border-radius: 1rem;
                }
                @media (max-width: 768px) {
                    .contact-hero h1 {
                        font-size: 2.2rem;
                    }
                }
                "#}
            </style>
            <div class="contact-hero">
                <h1>{"Connect With Bliss Technologies"}</h1>
                <p>{"Lets transform your digital vision into reality"}</p>
            </div>

            <div class="contact-grid">
                <div class="contact-details">
                    <h2>{"Contact Details"}</h2>
                    {
                        CONTACT_DETAILS.iter().map(|detail| html! {
                            <div class="contact-detail" key={detail.title}>
                                <h3>{detail.title}</h3>
                                <p>{detail.description}</p>
                            </div>
                        }).collect::<Html>()
                    }
                </div>
                <ContactForm submitter={(*submitter).clone()} />
            </div>

            <div class="contact-map">
                <iframe src={MAP_EMBED_URL} loading="lazy" allowfullscreen=true title="Office location"></iframe>
            </div>
        </div>
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use gloo_timers::future::TimeoutFuture;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    async fn renders_form_and_fullscreen_map() {
        let document = web_sys::window().unwrap().document().unwrap();
        let root = document.create_element("div").unwrap();
        document.body().unwrap().append_child(&root).unwrap();

        yew::Renderer::<ContactPage>::with_root(root.clone()).render();
        TimeoutFuture::new(10).await;

        let map = root.query_selector("iframe").unwrap().unwrap();
        assert!(map.has_attribute("allowfullscreen"));
        for field in ["name", "email", "subject", "message"] {
            let selector = format!("[name=\"{}\"]", field);
            assert!(root.query_selector(&selector).unwrap().is_some(), "missing {field}");
        }
        let submit = root.query_selector("button[type=\"submit\"]").unwrap().unwrap();
        assert!(!submit.has_attribute("disabled"));
    }
}
