//! Not found page component

use leptos::prelude::*;
use leptos_meta::Title;
use leptos_router::components::A;

use crate::core::site::SITE;

/// Not found (404) page component
#[component]
pub fn NotFoundPage() -> impl IntoView {
    view! {
        <Title text=format!("Page Not Found | {}", SITE.name) />

        <div class="flex flex-col items-center justify-center min-h-screen p-5 text-center bg-[#070B34] text-white">
            <h1 class="text-4xl font-bold mb-4">"404 - Page Not Found"</h1>
            <p class="text-xl mb-8">"Sorry, the page you're looking for doesn't exist."</p>
            <A
                href="/"
                attr:class="px-6 py-3 rounded-lg bg-blue-600 text-white hover:bg-blue-700 transition-colors"
            >
                "Return Home"
            </A>
        </div>
    }
}
