use crate::ordering::natural_cmp;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use std::cmp::Ordering;

/// Kind of a catalog record, as reported by the `kind` field of the search API.
#[derive(Eq, PartialEq, Clone, Copy, Hash, Debug)]
pub enum ItemKind {
    Album,
    Audiobook,
    Book,
    Ebook,
    FeatureMovie,
    MusicVideo,
    Podcast,
    Software,
    Song,
    TvEpisode,
    Unknown,
}

impl ItemKind {
    /// A record without `kind` is labelled as an audiobook.
    pub fn from_kind(kind: Option<&str>) -> Self {
        match kind.unwrap_or("audiobook") {
            "album" => ItemKind::Album,
            "audiobook" => ItemKind::Audiobook,
            "book" => ItemKind::Book,
            "ebook" => ItemKind::Ebook,
            "feature-movie" => ItemKind::FeatureMovie,
            "music-video" => ItemKind::MusicVideo,
            "podcast" => ItemKind::Podcast,
            "software" => ItemKind::Software,
            "song" => ItemKind::Song,
            "tv-episode" => ItemKind::TvEpisode,
            _ => ItemKind::Unknown,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ItemKind::Album => "Album",
            ItemKind::Audiobook => "Audio Book",
            ItemKind::Book => "Book",
            ItemKind::Ebook => "E-Book",
            ItemKind::FeatureMovie => "Movie",
            ItemKind::MusicVideo => "Music Video",
            ItemKind::Podcast => "Podcast",
            ItemKind::Software => "App",
            ItemKind::Song => "Song",
            ItemKind::TvEpisode => "TV Episode",
            ItemKind::Unknown => "Unknown",
        }
    }
}

impl std::fmt::Display for ItemKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One search result as returned by the catalog.
///
/// Tracks, albums, apps, books and podcasts all share this record. Which raw
/// fields are filled depends on the kind of the result, so every display field
/// is derived through a fallback chain instead of being read directly.
#[derive(Default, Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogItem {
    #[serde(default, deserialize_with = "lenient")]
    pub track_name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub artist_name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub kind: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub track_price: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub currency: Option<String>,
    #[serde(rename = "artworkUrl60", default, deserialize_with = "lenient")]
    pub image_small: Option<String>,
    #[serde(rename = "artworkUrl100", default, deserialize_with = "lenient")]
    pub image_large: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub track_view_url: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub collection_name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub collection_view_url: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub collection_price: Option<f64>,
    #[serde(rename = "price", default, deserialize_with = "lenient")]
    pub item_price: Option<f64>,
    #[serde(rename = "primaryGenreName", default, deserialize_with = "lenient")]
    pub item_genre: Option<String>,
    #[serde(rename = "genres", default, deserialize_with = "lenient")]
    pub book_genre: Option<Vec<String>>,
}

// A field holding a value of the wrong JSON type decodes as absent.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;

    Ok(serde_json::from_value(value).ok())
}

impl CatalogItem {
    pub fn name(&self) -> &str {
        match self.track_name.as_deref() {
            Some(track_name) if !track_name.is_empty() => track_name,
            _ => self.collection_name.as_deref().unwrap_or_default(),
        }
    }

    pub fn artist(&self) -> &str {
        self.artist_name.as_deref().unwrap_or_default()
    }

    pub fn store_url(&self) -> &str {
        self.track_view_url
            .as_deref()
            .or(self.collection_view_url.as_deref())
            .unwrap_or_default()
    }

    pub fn price(&self) -> f64 {
        self.track_price
            .or(self.collection_price)
            .or(self.item_price)
            .unwrap_or(0.0)
    }

    pub fn genre(&self) -> String {
        match (&self.item_genre, &self.book_genre) {
            (Some(genre), _) => genre.clone(),
            (None, Some(genres)) => genres.join(", "),
            (None, None) => String::new(),
        }
    }

    pub fn item_kind(&self) -> ItemKind {
        ItemKind::from_kind(self.kind.as_deref())
    }

    /// Human readable label of the item kind, e.g. "Music Video".
    pub fn type_label(&self) -> &'static str {
        self.item_kind().label()
    }

    pub fn currency(&self) -> &str {
        self.currency.as_deref().unwrap_or_default()
    }

    pub fn image_small(&self) -> &str {
        self.image_small.as_deref().unwrap_or_default()
    }

    pub fn image_large(&self) -> &str {
        self.image_large.as_deref().unwrap_or_default()
    }

    /// Compares two items by display name in natural order.
    pub fn cmp_by_name(&self, other: &Self) -> Ordering {
        natural_cmp(self.name(), other.name())
    }
}

impl std::fmt::Display for CatalogItem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Result - Kind: {}, Track Name: {}, Artist Name: {}",
            self.kind.as_deref().unwrap_or("None"),
            self.name(),
            self.artist_name.as_deref().unwrap_or("None"),
        )
    }
}

/// Sorts items by display name, keeping the API order of equal names.
pub fn sort_by_name(items: &mut [CatalogItem]) {
    items.sort_by(CatalogItem::cmp_by_name);
}
