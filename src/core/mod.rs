//! Core models and server logic for the MuseRoom landing site

pub mod background;
#[cfg(feature = "ssr")]
pub mod config;
pub mod site;
pub mod waitlist;
