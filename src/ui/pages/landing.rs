//! Landing page component
//!
//! Full-screen hero over the interactive background:
//! - SEO meta tags from the site information
//! - Headline and rainbow "Join the Waitlist" call to action
//! - Waitlist modal and toast notifications

use leptos::prelude::*;
use leptos_meta::{Link, Meta, Title};

use crate::core::site::SITE;
use crate::ui::background_boxes::BackgroundBoxes;
use crate::ui::notifications::{ToastContainer, ToastManager};
use crate::ui::rainbow_button::{RainbowButton, RainbowSize};
use crate::ui::waitlist_form::WaitlistModal;

/// Landing page component
#[component]
pub fn LandingPage() -> impl IntoView {
    let show_waitlist = RwSignal::new(false);
    let toasts = ToastManager::new();

    view! {
        <SeoMeta />

        <div class="relative min-h-screen w-full bg-gradient-to-b from-[#070B34] to-[#0D1339] overflow-hidden">
            // Background stays interactive while the modal is open
            <BackgroundBoxes class="absolute inset-0" />

            <Hero waitlist_open=show_waitlist />

            <WaitlistModal open=show_waitlist toasts=toasts />
        </div>

        <ToastContainer toasts=toasts.toasts() />
    }
}

/// Headline and call to action; fades out while the waitlist is open
#[component]
fn Hero(waitlist_open: RwSignal<bool>) -> impl IntoView {
    let open = Callback::new(move |_: ()| waitlist_open.set(true));

    view! {
        <div
            class="absolute inset-0 flex flex-col items-center justify-start pt-32 pointer-events-none z-10 transition-opacity duration-300"
            class:opacity-0=move || waitlist_open.get()
        >
            <h1 class="text-5xl md:text-7xl lg:text-8xl font-bold text-white text-center tracking-tight max-w-5xl leading-tight pointer-events-none">
                <div class="bg-clip-text text-transparent bg-gradient-to-b from-white to-white/50 [text-shadow:0_4px_8px_rgba(0,0,0,0.3)]">
                    "The Future of Music"
                </div>
                <div>
                    <span class="bg-clip-text text-transparent bg-gradient-to-b from-white to-white/50 [text-shadow:0_4px_8px_rgba(0,0,0,0.3)]">
                        "Creation is "
                    </span>
                    <span class="relative inline-block ml-2 bg-clip-text text-transparent bg-gradient-to-b from-blue-300 to-blue-600 animate-pulse">
                        "Here"
                        <span class="absolute inset-0 bg-blue-500/20 blur-xl rounded-full -z-10"></span>
                        <span class="absolute -inset-1 bg-gradient-to-r from-blue-600/40 to-cyan-400/40 blur-md rounded-lg -z-10"></span>
                    </span>
                </div>
            </h1>

            <div class="mt-8 z-10" class:pointer-events-auto=move || !waitlist_open.get()>
                <RainbowButton
                    on_click=open
                    size=RainbowSize::Large
                    class="font-bold text-xl relative z-10"
                >
                    "Join the Waitlist"
                </RainbowButton>
            </div>
        </div>
    }
}

/// SEO meta tags component
#[component]
fn SeoMeta() -> impl IntoView {
    let title = SITE.title();
    let canonical = SITE.absolute("/");

    view! {
        // Page title
        <Title text=title.clone() />

        // Basic meta tags
        <Meta name="description" content=SITE.description />

        // Open Graph
        <Meta property="og:type" content="website" />
        <Meta property="og:url" content=canonical.clone() />
        <Meta property="og:title" content=title.clone() />
        <Meta property="og:description" content=SITE.description />
        <Meta property="og:site_name" content=SITE.name />

        // Twitter
        <Meta property="twitter:card" content="summary" />
        <Meta property="twitter:title" content=title />
        <Meta property="twitter:description" content=SITE.description />
        <Meta property="twitter:site" content=SITE.socials.twitter />

        // Canonical URL
        <Link rel="canonical" href=canonical />
    }
}
