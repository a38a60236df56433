use leptos::prelude::*;

/// Rainbow button size options
#[derive(Clone, Copy, PartialEq, Default)]
pub enum RainbowSize {
    #[default]
    Default,
    Large,
}

impl RainbowSize {
    fn class(&self) -> &'static str {
        match self {
            RainbowSize::Default => "px-6 py-3 text-base",
            RainbowSize::Large => "px-8 py-4 text-lg",
        }
    }
}

/// Pill button wrapped in an animated gradient glow
#[component]
pub fn RainbowButton(
    /// Click handler
    on_click: Callback<()>,
    #[prop(optional)]
    size: RainbowSize,
    /// Additional CSS classes for the button itself
    #[prop(optional, into)]
    class: String,
    children: Children,
) -> impl IntoView {
    let button_class = format!(
        "relative rounded-full flex items-center justify-center bg-black text-white font-medium \
         border-0 outline-none focus:ring-2 focus:ring-blue-500/50 transition-all duration-300 {} {}",
        size.class(),
        class
    );

    view! {
        <div class="relative group inline-block">
            <div class="absolute -inset-0.5 rounded-full opacity-70 bg-gradient-to-r from-indigo-500 via-purple-500 to-pink-500 blur-sm group-hover:opacity-100 transition duration-1000 group-hover:duration-200 animate-gradient-x"></div>
            <button class=button_class on:click=move |_| on_click.run(())>
                {children()}
            </button>
        </div>
    }
}
