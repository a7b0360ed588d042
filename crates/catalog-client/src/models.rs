// SPDX-License-Identifier: GPL-3.0-or-later

use serde::{Deserialize, Deserializer, Serialize};

/// Decodes an explicit `null` as the type's default value.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Track information from the catalog.
///
/// Fields missing from the response keep their default value.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Track {
    /// Track title.
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    /// Popularity as reported by the service (e.g. "0.54321"), kept verbatim.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub popularity: Option<String>,
    /// Duration in seconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub length: Option<f64>,
    /// Resource identifier (e.g. "spotify:track:...").
    #[serde(rename = "href", skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
    #[serde(rename = "track-number", skip_serializing_if = "Option::is_none")]
    pub track_number: Option<String>,
    #[serde(rename = "disc-number", skip_serializing_if = "Option::is_none")]
    pub disc_number: Option<String>,
    /// Album the track appears on.
    #[serde(deserialize_with = "null_as_default")]
    pub album: Album,
    /// Credited artists, in response order.
    #[serde(deserialize_with = "null_as_default")]
    pub artists: Vec<Artist>,
    /// Whether the track is playable.
    #[serde(deserialize_with = "null_as_default")]
    pub available: bool,
    /// External identifiers such as ISRC codes.
    #[serde(rename = "external-ids", deserialize_with = "null_as_default")]
    pub external_ids: Vec<ExternalId>,
}

/// Album information from the catalog.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Album {
    /// Album title.
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    /// Release year or date as reported by the service.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub released: Option<String>,
    /// Duration in seconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub length: Option<f64>,
    /// Resource identifier (e.g. "spotify:album:...").
    #[serde(rename = "href", skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
    /// Territories the album is available in.
    #[serde(deserialize_with = "null_as_default")]
    pub availability: Availability,
    /// Credited artists, in response order.
    #[serde(deserialize_with = "null_as_default")]
    pub artists: Vec<Artist>,
    /// Denormalized name of the main artist.
    #[serde(deserialize_with = "null_as_default")]
    pub artist: String,
    /// External identifiers such as UPC codes.
    #[serde(rename = "external-ids", deserialize_with = "null_as_default")]
    pub external_ids: Vec<ExternalId>,
}

/// Artist information from the catalog.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Artist {
    /// Artist name.
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    /// Popularity as reported by the service, kept verbatim.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub popularity: Option<String>,
    /// Resource identifier (e.g. "spotify:artist:...").
    #[serde(rename = "href", skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
}

/// Availability of an album.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Availability {
    /// Space separated ISO 3166-1 alpha-2 country codes, or "worldwide".
    #[serde(deserialize_with = "null_as_default")]
    pub territories: String,
}

/// Identifier of a record in another scheme (ISRC, UPC, ...).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ExternalId {
    /// Scheme tag (e.g. "isrc").
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    pub id_type: String,
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
}

/// Pagination metadata returned with every search.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SearchInfo {
    /// Total number of matches across all pages.
    #[serde(rename = "num_results", deserialize_with = "null_as_default")]
    pub total_results: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub limit: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub offset: u64,
    /// Query string echoed back by the service.
    #[serde(deserialize_with = "null_as_default")]
    pub query: String,
    /// Result type tag ("track", "album" or "artist").
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    pub result_type: String,
    #[serde(deserialize_with = "null_as_default")]
    pub page: u64,
}

/// Generic search response wrapper.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SearchResponse<T> {
    #[serde(default, deserialize_with = "null_as_default")]
    pub info: SearchInfo,
    /// Results for this page.
    #[serde(flatten)]
    pub results: T,
}

/// Track search results.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TrackSearchResult {
    #[serde(deserialize_with = "null_as_default")]
    pub tracks: Vec<Track>,
}

/// Album search results.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AlbumSearchResult {
    #[serde(deserialize_with = "null_as_default")]
    pub albums: Vec<Album>,
}

/// Artist search results.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ArtistSearchResult {
    #[serde(deserialize_with = "null_as_default")]
    pub artists: Vec<Artist>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct TrackEnvelope {
    #[serde(deserialize_with = "null_as_default")]
    pub track: Track,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct AlbumEnvelope {
    #[serde(deserialize_with = "null_as_default")]
    pub album: Album,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct ArtistEnvelope {
    #[serde(deserialize_with = "null_as_default")]
    pub artist: Artist,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_track_missing_fields_default() {
        let track: Track = serde_json::from_value(json!({ "name": "X" })).unwrap();

        assert_eq!(track.name, "X");
        assert_eq!(track, Track { name: "X".to_string(), ..Track::default() });
        assert!(track.popularity.is_none());
        assert!(track.artists.is_empty());
        assert!(!track.available);
    }

    #[test]
    fn test_string_typed_numbers_preserved() {
        let track: Track = serde_json::from_value(json!({
            "name": "Paranoid Android",
            "popularity": "0.71",
            "track-number": "2",
            "disc-number": "1",
            "length": 383.493
        }))
        .unwrap();

        assert_eq!(track.popularity.as_deref(), Some("0.71"));
        assert_eq!(track.track_number.as_deref(), Some("2"));
        assert_eq!(track.disc_number.as_deref(), Some("1"));
        assert_eq!(track.length, Some(383.493));
    }

    #[test]
    fn test_album_wire_names() {
        let album: Album = serde_json::from_value(json!({
            "name": "OK Computer",
            "released": "1997",
            "href": "spotify:album:6dVIqQ8qmQ5GBnJ9shOYGE",
            "availability": { "territories": "GB US" },
            "artist": "Radiohead",
            "artists": [{ "name": "Radiohead", "href": "spotify:artist:4Z8W4fKeB5YxbusRsdQVPb" }],
            "external-ids": [{ "type": "upc", "id": "724385522925" }],
            "unexpected": { "nested": true }
        }))
        .unwrap();

        assert_eq!(album.released.as_deref(), Some("1997"));
        assert_eq!(album.availability.territories, "GB US");
        assert_eq!(album.artists.len(), 1);
        assert_eq!(album.external_ids[0].id_type, "upc");
        assert_eq!(album.external_ids[0].id, "724385522925");
    }

    #[test]
    fn test_search_response_flattened_results() {
        let response: SearchResponse<ArtistSearchResult> = serde_json::from_value(json!({
            "info": { "num_results": 3, "limit": 100, "offset": 0, "query": "foo", "type": "artist", "page": 1 },
            "artists": [{ "name": "Foo Fighters" }, { "name": "Foals" }]
        }))
        .unwrap();

        assert_eq!(response.info.total_results, 3);
        assert_eq!(response.info.result_type, "artist");
        assert_eq!(response.info.page, 1);
        let names: Vec<_> = response.results.artists.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, ["Foo Fighters", "Foals"]);
    }

    #[test]
    fn test_serialize_uses_wire_names() {
        let artist = Artist {
            name: "Radiohead".to_string(),
            popularity: None,
            uri: Some("spotify:artist:4Z8W4fKeB5YxbusRsdQVPb".to_string()),
        };

        let value = serde_json::to_value(&artist).unwrap();
        assert_eq!(
            value,
            json!({ "name": "Radiohead", "href": "spotify:artist:4Z8W4fKeB5YxbusRsdQVPb" })
        );
    }

    #[test]
    fn test_empty_lookup_envelope_is_zero_valued() {
        let envelope: TrackEnvelope = serde_json::from_value(json!({})).unwrap();
        assert_eq!(envelope.track, Track::default());
    }

    #[test]
    fn test_null_fields_decode_as_zero_value() {
        let envelope: TrackEnvelope = serde_json::from_value(json!({
            "track": {
                "name": "X",
                "popularity": null,
                "album": null,
                "artists": null,
                "available": null,
                "external-ids": null
            }
        }))
        .unwrap();
        assert_eq!(envelope.track, Track { name: "X".to_string(), ..Track::default() });

        let envelope: TrackEnvelope = serde_json::from_value(json!({ "track": { "name": null } })).unwrap();
        assert_eq!(envelope.track, Track::default());

        let envelope: TrackEnvelope = serde_json::from_value(json!({ "track": null })).unwrap();
        assert_eq!(envelope.track, Track::default());
    }

    #[test]
    fn test_null_album_fields() {
        let album: Album = serde_json::from_value(json!({
            "name": "OK Computer",
            "availability": null,
            "artists": null,
            "artist": null,
            "external-ids": [{ "type": null, "id": "724385522925" }]
        }))
        .unwrap();

        assert_eq!(album.name, "OK Computer");
        assert_eq!(album.availability, Availability::default());
        assert!(album.artists.is_empty());
        assert_eq!(album.artist, "");
        assert_eq!(album.external_ids[0].id_type, "");
        assert_eq!(album.external_ids[0].id, "724385522925");

        let availability: Availability =
            serde_json::from_value(json!({ "territories": null })).unwrap();
        assert_eq!(availability.territories, "");

        let envelope: AlbumEnvelope = serde_json::from_value(json!({ "album": null })).unwrap();
        assert_eq!(envelope.album, Album::default());
    }

    #[test]
    fn test_null_artist_fields() {
        let envelope: ArtistEnvelope = serde_json::from_value(json!({
            "artist": { "name": null, "popularity": null, "href": "spotify:artist:4Z8W4fKeB5YxbusRsdQVPb" }
        }))
        .unwrap();

        assert_eq!(envelope.artist.name, "");
        assert_eq!(envelope.artist.popularity, None);
        assert_eq!(
            envelope.artist.uri.as_deref(),
            Some("spotify:artist:4Z8W4fKeB5YxbusRsdQVPb")
        );

        let envelope: ArtistEnvelope = serde_json::from_value(json!({ "artist": null })).unwrap();
        assert_eq!(envelope.artist, Artist::default());
    }

    #[test]
    fn test_null_search_fields() {
        let response: SearchResponse<TrackSearchResult> = serde_json::from_value(json!({
            "info": { "num_results": null, "limit": 10, "offset": null, "query": null, "type": "track", "page": null },
            "tracks": null
        }))
        .unwrap();
        assert_eq!(response.info.total_results, 0);
        assert_eq!(response.info.limit, 10);
        assert_eq!(response.info.query, "");
        assert!(response.results.tracks.is_empty());

        let response: SearchResponse<AlbumSearchResult> =
            serde_json::from_value(json!({ "info": null, "albums": null })).unwrap();
        assert_eq!(response.info, SearchInfo::default());
        assert!(response.results.albums.is_empty());

        let response: SearchResponse<ArtistSearchResult> =
            serde_json::from_value(json!({ "artists": null })).unwrap();
        assert!(response.results.artists.is_empty());
    }
}
