//! Waitlist modal
//!
//! Floating signup form. Closes on the close button, on Escape, on any
//! mousedown outside the panel, and shortly after a successful submission.

use leptos::html;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::core::waitlist::{WAITLIST_ENDPOINT, WaitlistRequest, WaitlistResponse};
use crate::ui::notifications::ToastManager;

/// Delay between a successful submission and closing the modal
#[cfg_attr(feature = "ssr", allow(dead_code))]
const CLOSE_AFTER_SUCCESS_MS: u32 = 1000;

/// POST the signup to the server
#[cfg(not(feature = "ssr"))]
pub async fn submit_waitlist(request: &WaitlistRequest) -> Result<WaitlistResponse, String> {
    use crate::core::waitlist::WaitlistErrorResponse;
    use wasm_bindgen::JsCast;
    use wasm_bindgen_futures::JsFuture;
    use web_sys::{Request, RequestInit, Response};

    let window = web_sys::window().ok_or("No window")?;

    let opts = RequestInit::new();
    opts.set_method("POST");
    opts.set_body(
        &serde_json::to_string(request)
            .map_err(|e| e.to_string())?
            .into(),
    );

    let req = Request::new_with_str_and_init(WAITLIST_ENDPOINT, &opts)
        .map_err(|e| format!("{:?}", e))?;

    req.headers()
        .set("Content-Type", "application/json")
        .map_err(|e| format!("{:?}", e))?;

    let resp_value = JsFuture::from(window.fetch_with_request(&req))
        .await
        .map_err(|e| format!("{:?}", e))?;

    let resp: Response = resp_value.dyn_into().map_err(|e| format!("{:?}", e))?;

    let json = JsFuture::from(resp.json().map_err(|e| format!("{:?}", e))?)
        .await
        .map_err(|e| format!("{:?}", e))?;

    if resp.ok() {
        serde_wasm_bindgen::from_value(json).map_err(|e| e.to_string())
    } else {
        let err: WaitlistErrorResponse = serde_wasm_bindgen::from_value(json)
            .map_err(|_| "Failed to submit form".to_string())?;
        Err(err.error)
    }
}

#[cfg(feature = "ssr")]
pub async fn submit_waitlist(_request: &WaitlistRequest) -> Result<WaitlistResponse, String> {
    Err(format!(
        "{} is only reachable from the browser",
        WAITLIST_ENDPOINT
    ))
}

/// Success toast text
pub fn thanks_message(name: &str, email: &str) -> String {
    format!("Thanks, {}! We'll notify you at {} when we launch.", name, email)
}

/// Waitlist modal component
#[component]
pub fn WaitlistModal(
    /// Whether the modal is shown
    open: RwSignal<bool>,
    toasts: ToastManager,
) -> impl IntoView {
    let modal_ref = NodeRef::<html::Div>::new();

    // Form state
    let name = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let phone = RwSignal::new(String::new());
    let owns_meta_quest = RwSignal::new(false);
    let owns_vision_pro = RwSignal::new(false);
    let is_submitting = RwSignal::new(false);

    // Device choices reset every time the modal closes
    let close = move || {
        open.set(false);
        owns_meta_quest.set(false);
        owns_vision_pro.set(false);
    };

    #[cfg(not(feature = "ssr"))]
    {
        use wasm_bindgen::JsCast;

        let handle = window_event_listener(leptos::ev::mousedown, move |ev| {
            if !open.get_untracked() {
                return;
            }
            let Some(modal) = modal_ref.get_untracked() else {
                return;
            };
            let inside = ev
                .target()
                .and_then(|t| t.dyn_into::<web_sys::Node>().ok())
                .is_some_and(|node| modal.contains(Some(&node)));
            if !inside {
                close();
            }
        });
        let handle_keydown = window_event_listener(leptos::ev::keydown, move |ev| {
            if ev.key() == "Escape" && open.get_untracked() {
                close();
            }
        });

        on_cleanup(move || {
            handle.remove();
            handle_keydown.remove();
        });
    }

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();

        if is_submitting.get_untracked() {
            return;
        }

        let request = WaitlistRequest {
            name: Some(name.get_untracked()),
            email: Some(email.get_untracked()),
            phone: Some(phone.get_untracked()),
            owns_meta_quest: Some(owns_meta_quest.get_untracked()),
            owns_vision_pro: Some(owns_vision_pro.get_untracked()),
        };

        // Same rules as the server, so obvious mistakes skip the round trip
        let entry = match request.clone().validate() {
            Ok(entry) => entry,
            Err(e) => {
                toasts.error(e.to_string());
                return;
            }
        };

        is_submitting.set(true);

        spawn_local(async move {
            match submit_waitlist(&request).await {
                Ok(_) => {
                    toasts.success(thanks_message(&entry.name, &entry.email));
                    name.set(String::new());
                    email.set(String::new());
                    phone.set(String::new());

                    #[cfg(not(feature = "ssr"))]
                    {
                        gloo_timers::future::TimeoutFuture::new(CLOSE_AFTER_SUCCESS_MS).await;
                        close();
                    }
                }
                Err(error) => {
                    leptos::logging::warn!("Waitlist submission failed: {}", error);
                    toasts.error(error);
                }
            }
            is_submitting.set(false);
        });
    };

    view! {
        <Show when=move || open.get()>
            <div
                node_ref=modal_ref
                class="fixed left-1/2 top-1/2 -translate-x-1/2 -translate-y-1/2 z-20 pointer-events-auto w-[90%] max-w-md"
                role="dialog"
                aria-modal="true"
                aria-labelledby="waitlist-title"
            >
                <div class="relative bg-black/80 backdrop-blur-md p-10 rounded-3xl w-full shadow-2xl border border-indigo-500/40 overflow-y-auto max-h-[90vh]">
                    <button
                        type="button"
                        class="absolute top-6 right-6 text-gray-400 hover:text-white transition-colors z-10"
                        aria-label="Close"
                        on:click=move |_| close()
                    >
                        <svg xmlns="http://www.w3.org/2000/svg" width="24" height="24" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round">
                            <line x1="18" y1="6" x2="6" y2="18" />
                            <line x1="6" y1="6" x2="18" y2="18" />
                        </svg>
                    </button>

                    // Glow
                    <div class="absolute -inset-0.5 bg-gradient-to-r from-indigo-500 via-purple-500 to-pink-500 rounded-3xl opacity-20 blur-md -z-10"></div>

                    <div class="mb-6 text-center">
                        <h2
                            id="waitlist-title"
                            class="text-2xl font-bold mb-2 bg-clip-text text-transparent bg-gradient-to-r from-indigo-300 via-purple-300 to-pink-300"
                        >
                            "Join Our Waitlist"
                        </h2>
                        <p class="text-gray-300 text-sm">
                            "Be the first to experience the future of music creation in MuseRoom"
                        </p>
                    </div>

                    <form class="space-y-6" on:submit=on_submit novalidate=true>
                        <div class="space-y-4">
                            <TextField id="name" label="Your name" input_type="text" placeholder="John Doe" value=name required=true />
                            <TextField id="email" label="Email address" input_type="email" placeholder="you@example.com" value=email required=true />
                            <TextField id="phone" label="Phone number" input_type="tel" placeholder="(123) 456-7890" value=phone required=false />
                        </div>

                        <div class="mt-6 pt-4 border-t border-gray-800">
                            <p class="text-base font-medium text-white mb-3">"Device ownership (optional)"</p>
                            <div class="grid grid-cols-2 gap-3">
                                <DeviceToggle name="meta_quest" label="Meta Quest" accent=Accent::Purple checked=owns_meta_quest />
                                <DeviceToggle name="vision_pro" label="Apple Vision Pro" accent=Accent::Pink checked=owns_vision_pro />
                            </div>
                        </div>

                        <button
                            type="submit"
                            disabled=move || is_submitting.get()
                            class="relative w-full rounded-2xl px-6 py-3.5 mt-6 text-lg font-medium text-white bg-gradient-to-r from-indigo-500 via-purple-500 to-pink-500 transition-all duration-200 shadow-lg shadow-purple-500/20 hover:shadow-purple-500/30"
                            class:opacity-70=move || is_submitting.get()
                            class:cursor-not-allowed=move || is_submitting.get()
                        >
                            {move || if is_submitting.get() { "Processing..." } else { "Join the Waitlist" }}
                        </button>
                    </form>
                </div>
            </div>
        </Show>
    }
}

#[component]
fn TextField(
    id: &'static str,
    label: &'static str,
    input_type: &'static str,
    placeholder: &'static str,
    value: RwSignal<String>,
    required: bool,
) -> impl IntoView {
    view! {
        <div>
            <label for=id class="block text-sm font-medium text-gray-200 mb-2">{label}</label>
            <input
                type=input_type
                id=id
                name=id
                placeholder=placeholder
                required=required
                class="w-full px-4 py-3 rounded-2xl bg-gray-900 border border-gray-700 text-white focus:outline-none focus:ring-2 focus:ring-purple-500 focus:border-transparent transition-colors"
                prop:value=move || value.get()
                on:input=move |ev| value.set(event_target_value(&ev))
            />
        </div>
    }
}

/// Highlight color of a selected device card
#[derive(Clone, Copy, PartialEq)]
pub enum Accent {
    Purple,
    Pink,
}

impl Accent {
    fn card_class(&self) -> &'static str {
        match self {
            Accent::Purple => "bg-purple-900/30 border-purple-500",
            Accent::Pink => "bg-pink-900/30 border-pink-500",
        }
    }

    fn dot_class(&self, checked: bool) -> &'static str {
        match (self, checked) {
            (Accent::Purple, true) => "bg-purple-600 scale-110",
            (Accent::Purple, false) => "bg-purple-600/20",
            (Accent::Pink, true) => "bg-pink-600 scale-110",
            (Accent::Pink, false) => "bg-pink-600/20",
        }
    }
}

/// Checkbox rendered as a selectable card
#[component]
fn DeviceToggle(
    name: &'static str,
    label: &'static str,
    accent: Accent,
    checked: RwSignal<bool>,
) -> impl IntoView {
    let card_class = move || {
        if checked.get() {
            accent.card_class()
        } else {
            "bg-gray-900/70 hover:bg-gray-900 border-gray-800"
        }
    };
    let dot_class = move || accent.dot_class(checked.get());

    view! {
        <label class=move || format!(
            "flex items-center justify-center text-sm border rounded-xl p-3 cursor-pointer transition-all duration-200 {}",
            card_class()
        )>
            <input
                type="checkbox"
                name=name
                class="sr-only"
                prop:checked=move || checked.get()
                on:change=move |ev| checked.set(event_target_checked(&ev))
            />
            <div class="relative flex flex-col items-center gap-2">
                <span class=move || format!(
                    "h-6 w-6 rounded-full flex items-center justify-center transition-all duration-200 {}",
                    dot_class()
                )>
                    <svg class="h-4 w-4 text-white" fill="none" viewBox="0 0 24 24" stroke="currentColor">
                        <path stroke-linecap="round" stroke-linejoin="round" stroke-width="2" d="M9 12l2 2 4-4m6 2a9 9 0 11-18 0 9 9 0 0118 0z" />
                    </svg>
                </span>
                <span class:text-white=move || checked.get() class:text-gray-300=move || !checked.get()>
                    {label}
                </span>
            </div>
        </label>
    }
}
