//! Domain layer containing business entities and logic.
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Data access trait definitions
//! - [`click_event`] - Click tracking event model
//! - [`click_worker`] - Asynchronous click processing worker
//!
//! # Click Processing Flow
//!
//! 1. [`crate::application::services::UrlService`] resolves a short code
//! 2. [`click_event::ClickEvent`] is sent to the async channel (non-blocking)
//! 3. [`click_worker::run_click_worker`] applies it via [`repositories::UrlRepository::record_access`]

pub mod click_event;
pub mod click_worker;
pub mod entities;
pub mod repositories;
