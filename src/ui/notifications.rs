//! Toast notifications
//!
//! Success and error toasts shown at the top of the page. Each toast
//! auto-dismisses, playing a short exit animation before it is removed.

use leptos::prelude::*;
use std::collections::VecDeque;

/// Maximum number of toasts to show at once
const MAX_TOASTS: usize = 3;

/// Exit animation length
#[cfg_attr(feature = "ssr", allow(dead_code))]
const EXIT_ANIMATION_MS: u32 = 300;

/// Default display time
pub const DEFAULT_TOAST_MS: u32 = 4000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Toast {
    pub kind: ToastKind,
    pub message: String,
    /// `None` keeps the toast until closed
    pub auto_dismiss_ms: Option<u32>,
}

impl Toast {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: ToastKind::Success,
            message: message.into(),
            auto_dismiss_ms: Some(DEFAULT_TOAST_MS),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: ToastKind::Error,
            message: message.into(),
            auto_dismiss_ms: Some(DEFAULT_TOAST_MS),
        }
    }

    pub fn with_duration(mut self, ms: u32) -> Self {
        self.auto_dismiss_ms = Some(ms);
        self
    }
}

/// Toast with unique ID for tracking
#[derive(Clone, Debug)]
pub struct ToastItem {
    pub id: u64,
    pub toast: Toast,
}

/// Append a toast, dropping the oldest ones past the limit
fn push_bounded(queue: &mut VecDeque<ToastItem>, item: ToastItem) {
    queue.push_back(item);
    while queue.len() > MAX_TOASTS {
        queue.pop_front();
    }
}

/// Toast container, placed once per page
#[component]
pub fn ToastContainer(toasts: RwSignal<VecDeque<ToastItem>>) -> impl IntoView {
    view! {
        <div class="fixed top-4 sm:top-6 left-1/2 -translate-x-1/2 z-50 w-[90%] max-w-md flex flex-col gap-2">
            <For
                each=move || toasts.get()
                key=|item| item.id
                children=move |item| {
                    view! { <ToastView toast=item.toast id=item.id toasts=toasts /> }
                }
            />
        </div>
    }
}

#[component]
fn ToastView(toast: Toast, id: u64, toasts: RwSignal<VecDeque<ToastItem>>) -> impl IntoView {
    let (is_exiting, set_is_exiting) = signal(false);

    let dismiss = move || {
        set_is_exiting.set(true);
        #[cfg(not(feature = "ssr"))]
        {
            use gloo_timers::future::TimeoutFuture;
            use wasm_bindgen_futures::spawn_local;

            spawn_local(async move {
                TimeoutFuture::new(EXIT_ANIMATION_MS).await;
                toasts.update(|t| t.retain(|i| i.id != id));
            });
        }
        #[cfg(feature = "ssr")]
        toasts.update(|t| t.retain(|i| i.id != id));
    };

    if let Some(_ms) = toast.auto_dismiss_ms {
        #[cfg(not(feature = "ssr"))]
        {
            use gloo_timers::future::TimeoutFuture;
            use wasm_bindgen_futures::spawn_local;

            spawn_local(async move {
                TimeoutFuture::new(_ms).await;
                dismiss();
            });
        }
    }

    let (border_class, badge_class, icon_class, icon_path) = match toast.kind {
        ToastKind::Success => (
            "border-green-500/40",
            "bg-green-500/20",
            "text-green-500",
            "M5 13l4 4L19 7",
        ),
        ToastKind::Error => (
            "border-red-500/40",
            "bg-red-500/20",
            "text-red-500",
            "M6 18L18 6M6 6l12 12",
        ),
    };

    let container_class = format!(
        "px-4 sm:px-6 py-3 sm:py-4 rounded-xl sm:rounded-2xl shadow-xl backdrop-blur-md border bg-black/80 text-white transition-all duration-200 {}",
        border_class
    );
    let badge_class = format!(
        "flex-shrink-0 w-6 h-6 sm:w-8 sm:h-8 rounded-full flex items-center justify-center {}",
        badge_class
    );
    let icon_class = format!("w-4 h-4 sm:w-5 sm:h-5 {}", icon_class);

    view! {
        <div
            class=container_class
            role="status"
            style=move || {
                if is_exiting.get() {
                    "opacity: 0; transform: translateY(-20px);"
                } else {
                    "opacity: 1; transform: translateY(0);"
                }
            }
        >
            <div class="flex items-center space-x-2 sm:space-x-3">
                <div class=badge_class>
                    <svg class=icon_class fill="none" viewBox="0 0 24 24" stroke="currentColor">
                        <path stroke-linecap="round" stroke-linejoin="round" stroke-width="2" d=icon_path />
                    </svg>
                </div>
                <p class="text-xs sm:text-sm font-medium flex-1">{toast.message}</p>
                <button
                    class="ml-1 -mr-1 sm:-mr-2 text-white/70 hover:text-white transition-colors"
                    aria-label="Dismiss"
                    on:click=move |_| dismiss()
                >
                    <svg class="w-4 h-4 sm:w-5 sm:h-5" fill="none" viewBox="0 0 24 24" stroke="currentColor">
                        <path stroke-linecap="round" stroke-linejoin="round" stroke-width="2" d="M6 18L18 6M6 6l12 12" />
                    </svg>
                </button>
            </div>
        </div>
    }
}

/// Handle for pushing toasts from anywhere on the page
#[derive(Clone, Copy)]
pub struct ToastManager {
    toasts: RwSignal<VecDeque<ToastItem>>,
    next_id: StoredValue<u64>,
}

impl ToastManager {
    pub fn new() -> Self {
        Self {
            toasts: RwSignal::new(VecDeque::new()),
            next_id: StoredValue::new(0),
        }
    }

    /// Get the toasts signal for the container
    pub fn toasts(&self) -> RwSignal<VecDeque<ToastItem>> {
        self.toasts
    }

    pub fn notify(&self, toast: Toast) {
        let id = self.next_id.get_value();
        self.next_id.set_value(id + 1);

        self.toasts
            .update(|t| push_bounded(t, ToastItem { id, toast }));
    }

    pub fn success(&self, message: impl Into<String>) {
        self.notify(Toast::success(message));
    }

    pub fn error(&self, message: impl Into<String>) {
        self.notify(Toast::error(message));
    }

    pub fn clear(&self) {
        self.toasts.set(VecDeque::new());
    }

    /// Create a callback for use with other components
    pub fn callback(&self) -> Callback<Toast> {
        let manager = *self;
        Callback::new(move |toast: Toast| manager.notify(toast))
    }
}

impl Default for ToastManager {
    fn default() -> Self {
        Self::new()
    }
}
