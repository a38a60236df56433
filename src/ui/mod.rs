pub mod background_boxes;
pub mod notifications;
pub mod pages;
pub mod rainbow_button;
pub mod waitlist_form;

pub use background_boxes::BackgroundBoxes;
pub use notifications::{Toast, ToastContainer, ToastKind, ToastManager};
pub use pages::{LandingPage, NotFoundPage};
pub use rainbow_button::{RainbowButton, RainbowSize};
pub use waitlist_form::WaitlistModal;
