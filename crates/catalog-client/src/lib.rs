// SPDX-License-Identifier: GPL-3.0-or-later

//! Client for the catalog metadata web service.
//!
//! Provides search (tracks, albums, artists) and lookup by resource
//! identifier, decoding the JSON responses into typed records.

pub mod client;
pub mod error;
pub mod models;

pub use client::{CatalogClient, CatalogClientBuilder, RequestOptions};
pub use error::{BuildError, CatalogError, Operation, Result};
pub use models::{
    Album, AlbumSearchResult, Artist, ArtistSearchResult, Availability, ExternalId, SearchInfo,
    SearchResponse, Track, TrackSearchResult,
};
