//! Movie metadata lookup.
//!
//! - [`provider`] -- the [`MetadataProvider`] trait and the [`MovieMetadata`] record.
//! - [`providers`] -- concrete implementations (TMDB).

pub mod provider;
pub mod providers;

pub use provider::{MetadataProvider, MovieMetadata};
pub use providers::TmdbClient;
