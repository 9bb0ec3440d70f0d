//! Posterforge - movie poster enrichment for Plex/Jellyfin style libraries
//!
//! This library crate exposes the core functionality for integration testing.

pub mod config;
pub mod error;
pub mod http;
pub mod images;
pub mod metadata;
pub mod notifications;
pub mod overlay;
pub mod processor;
pub mod restore;
pub mod scanner;
