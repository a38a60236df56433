//! Waitlist signup
//!
//! The request model and validation are shared with the browser form. The
//! store seam and HTTP endpoint only exist on the server.

pub mod model;

#[cfg(feature = "ssr")]
pub mod api;
#[cfg(feature = "ssr")]
pub mod notion;

pub use model::{
    WaitlistEntry, WaitlistError, WaitlistErrorResponse, WaitlistRequest, WaitlistResponse,
    is_valid_email,
};

#[cfg(feature = "ssr")]
pub use api::waitlist_router;
#[cfg(feature = "ssr")]
pub use notion::NotionStore;

/// Path of the signup endpoint
pub const WAITLIST_ENDPOINT: &str = "/api/waitlist";

/// Persistence backend for validated entries
pub trait WaitlistStore: Send + Sync + 'static {
    fn add_entry(
        &self,
        entry: &WaitlistEntry,
    ) -> impl std::future::Future<Output = Result<(), WaitlistError>> + Send;
}
