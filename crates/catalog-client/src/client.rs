// SPDX-License-Identifier: GPL-3.0-or-later

use crate::error::{BuildError, CatalogError, Operation, Result};
use crate::models::{
    Album, AlbumEnvelope, AlbumSearchResult, Artist, ArtistEnvelope, ArtistSearchResult,
    SearchResponse, Track, TrackEnvelope, TrackSearchResult,
};
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, instrument, trace};
use url::Url;

pub const SEARCH_API_BASE: &str = "http://ws.spotify.com/search/1";
pub const LOOKUP_API_BASE: &str = "http://ws.spotify.com/lookup/1";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
const USER_AGENT: &str = concat!("catalog-client/", env!("CARGO_PKG_VERSION"));

/// Entity type searched for; selects the search endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SearchKind {
    Track,
    Album,
    Artist,
}

impl SearchKind {
    fn endpoint(self) -> &'static str {
        match self {
            SearchKind::Track => "track.json",
            SearchKind::Album => "album.json",
            SearchKind::Artist => "artist.json",
        }
    }
}

/// Per-call request settings.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    /// Overrides the client-wide timeout for this call only.
    pub timeout: Option<Duration>,
}

impl RequestOptions {
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// Client for the catalog search and lookup web service.
///
/// Holds no mutable state: clones share the underlying connection pool and
/// can be used from any number of tasks at once.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    client: Client,
    search_base: Url,
    lookup_base: Url,
}

impl CatalogClient {
    /// Create a new client against the public service with default settings.
    pub fn new() -> std::result::Result<Self, BuildError> {
        Self::builder().build()
    }

    /// Create a client builder for custom configuration.
    pub fn builder() -> CatalogClientBuilder {
        CatalogClientBuilder::default()
    }

    /// Search for tracks matching free text.
    ///
    /// # Example
    /// ```no_run
    /// # use catalog_client::CatalogClient;
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let client = CatalogClient::new()?;
    /// let response = client.search_tracks("paranoid android", 0).await?;
    /// for track in &response.results.tracks {
    ///     println!("{} ({})", track.name, track.album.name);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn search_tracks(
        &self,
        query: &str,
        page: u32,
    ) -> Result<SearchResponse<TrackSearchResult>> {
        self.search_tracks_with(query, page, &RequestOptions::default())
            .await
    }

    #[instrument(skip(self, options), level = "debug")]
    pub async fn search_tracks_with(
        &self,
        query: &str,
        page: u32,
        options: &RequestOptions,
    ) -> Result<SearchResponse<TrackSearchResult>> {
        let url = self.search_url(SearchKind::Track, query, page);
        let response: SearchResponse<TrackSearchResult> =
            self.get(url, Operation::Search, options).await?;
        debug!(target: "catalog", results = response.results.tracks.len(), "track search decoded");
        Ok(response)
    }

    /// Search for albums matching free text.
    pub async fn search_albums(
        &self,
        query: &str,
        page: u32,
    ) -> Result<SearchResponse<AlbumSearchResult>> {
        self.search_albums_with(query, page, &RequestOptions::default())
            .await
    }

    #[instrument(skip(self, options), level = "debug")]
    pub async fn search_albums_with(
        &self,
        query: &str,
        page: u32,
        options: &RequestOptions,
    ) -> Result<SearchResponse<AlbumSearchResult>> {
        let url = self.search_url(SearchKind::Album, query, page);
        let response: SearchResponse<AlbumSearchResult> =
            self.get(url, Operation::Search, options).await?;
        debug!(target: "catalog", results = response.results.albums.len(), "album search decoded");
        Ok(response)
    }

    /// Search for artists matching free text.
    ///
    /// # Example
    /// ```no_run
    /// # use catalog_client::CatalogClient;
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let client = CatalogClient::new()?;
    /// let response = client.search_artists("radiohead", 0).await?;
    /// println!("{} artists in total", response.info.total_results);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn search_artists(
        &self,
        query: &str,
        page: u32,
    ) -> Result<SearchResponse<ArtistSearchResult>> {
        self.search_artists_with(query, page, &RequestOptions::default())
            .await
    }

    #[instrument(skip(self, options), level = "debug")]
    pub async fn search_artists_with(
        &self,
        query: &str,
        page: u32,
        options: &RequestOptions,
    ) -> Result<SearchResponse<ArtistSearchResult>> {
        let url = self.search_url(SearchKind::Artist, query, page);
        let response: SearchResponse<ArtistSearchResult> =
            self.get(url, Operation::Search, options).await?;
        debug!(target: "catalog", results = response.results.artists.len(), "artist search decoded");
        Ok(response)
    }

    /// Look up a track by resource identifier.
    ///
    /// # Example
    /// ```no_run
    /// # use catalog_client::CatalogClient;
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let client = CatalogClient::new()?;
    /// let track = client.lookup_track("spotify:track:6NmXV4o6bmp704aPGyTVVG").await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn lookup_track(&self, uri: &str) -> Result<Track> {
        self.lookup_track_with(uri, &RequestOptions::default())
            .await
    }

    #[instrument(skip(self, options), level = "debug")]
    pub async fn lookup_track_with(&self, uri: &str, options: &RequestOptions) -> Result<Track> {
        let envelope: TrackEnvelope = self
            .get(self.lookup_url(uri), Operation::Lookup, options)
            .await?;
        debug!(target: "catalog", name = %envelope.track.name, "track lookup decoded");
        Ok(envelope.track)
    }

    /// Look up an album by resource identifier.
    pub async fn lookup_album(&self, uri: &str) -> Result<Album> {
        self.lookup_album_with(uri, &RequestOptions::default())
            .await
    }

    #[instrument(skip(self, options), level = "debug")]
    pub async fn lookup_album_with(&self, uri: &str, options: &RequestOptions) -> Result<Album> {
        let envelope: AlbumEnvelope = self
            .get(self.lookup_url(uri), Operation::Lookup, options)
            .await?;
        debug!(target: "catalog", name = %envelope.album.name, "album lookup decoded");
        Ok(envelope.album)
    }

    /// Look up an artist by resource identifier.
    pub async fn lookup_artist(&self, uri: &str) -> Result<Artist> {
        self.lookup_artist_with(uri, &RequestOptions::default())
            .await
    }

    #[instrument(skip(self, options), level = "debug")]
    pub async fn lookup_artist_with(
        &self,
        uri: &str,
        options: &RequestOptions,
    ) -> Result<Artist> {
        let envelope: ArtistEnvelope = self
            .get(self.lookup_url(uri), Operation::Lookup, options)
            .await?;
        debug!(target: "catalog", name = %envelope.artist.name, "artist lookup decoded");
        Ok(envelope.artist)
    }

    /// `<search-base>/<kind>.json?q=<query>&page=<page>`
    pub(crate) fn search_url(&self, kind: SearchKind, query: &str, page: u32) -> Url {
        let mut url = self.search_base.clone();
        // Base URLs are checked to be hierarchical when the client is built.
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(kind.endpoint());
        }
        url.query_pairs_mut()
            .append_pair("q", query)
            .append_pair("page", &page.to_string());
        url
    }

    /// `<lookup-base>/.json?uri=<uri>`
    pub(crate) fn lookup_url(&self, uri: &str) -> Url {
        let mut url = self.lookup_base.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(".json");
        }
        url.query_pairs_mut().append_pair("uri", uri);
        url
    }

    /// Internal method to perform a GET and decode the body.
    ///
    /// The status code is not inspected: error pages fail to decode instead.
    async fn get<T: DeserializeOwned>(
        &self,
        url: Url,
        operation: Operation,
        options: &RequestOptions,
    ) -> Result<T> {
        trace!(target: "catalog", "GET {}", url);

        let mut request = self.client.get(url);
        if let Some(timeout) = options.timeout {
            request = request.timeout(timeout);
        }

        let response = request
            .send()
            .await
            .map_err(|source| CatalogError::Transport { operation, source })?;

        let status = response.status();
        debug!(target: "catalog", %operation, "response status: {}", status);

        let body = response
            .bytes()
            .await
            .map_err(|source| CatalogError::Transport { operation, source })?;
        trace!(target: "catalog", "response body: {}", String::from_utf8_lossy(&body));

        serde_json::from_slice(&body).map_err(|source| CatalogError::Decode { operation, source })
    }
}

/// Builder for configuring a catalog client.
#[derive(Debug)]
pub struct CatalogClientBuilder {
    search_base_url: String,
    lookup_base_url: String,
    timeout: Duration,
    user_agent: String,
    http_client: Option<Client>,
}

impl Default for CatalogClientBuilder {
    fn default() -> Self {
        Self {
            search_base_url: SEARCH_API_BASE.to_string(),
            lookup_base_url: LOOKUP_API_BASE.to_string(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: USER_AGENT.to_string(),
            http_client: None,
        }
    }
}

impl CatalogClientBuilder {
    /// Set the base URL search endpoints hang off (useful for testing with mock servers).
    pub fn search_base_url(mut self, url: impl Into<String>) -> Self {
        self.search_base_url = url.into();
        self
    }

    /// Set the base URL of the lookup endpoint.
    pub fn lookup_base_url(mut self, url: impl Into<String>) -> Self {
        self.lookup_base_url = url.into();
        self
    }

    /// Set request timeout duration.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Use an existing HTTP client; `timeout` and `user_agent` are then ignored.
    pub fn http_client(mut self, client: Client) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Build the catalog client.
    pub fn build(self) -> std::result::Result<CatalogClient, BuildError> {
        let search_base = parse_base_url(&self.search_base_url)?;
        let lookup_base = parse_base_url(&self.lookup_base_url)?;

        let client = match self.http_client {
            Some(client) => client,
            None => Client::builder()
                .timeout(self.timeout)
                .user_agent(self.user_agent)
                .build()?,
        };

        Ok(CatalogClient {
            client,
            search_base,
            lookup_base,
        })
    }
}

fn parse_base_url(raw: &str) -> std::result::Result<Url, BuildError> {
    let url = Url::parse(raw).map_err(|e| BuildError::InvalidBaseUrl {
        url: raw.to_string(),
        reason: e.to_string(),
    })?;

    if url.cannot_be_a_base() {
        return Err(BuildError::InvalidBaseUrl {
            url: raw.to_string(),
            reason: "URL cannot be a base".to_string(),
        });
    }

    Ok(url)
}
