use super::fields;
use super::movie::{require_id, require_title};
use crate::movies::Result;
use reqwest::Url;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

const YOUTUBE_THUMBNAIL_BASE: &str = "https://img.youtube.com/vi";
const YOUTUBE_WATCH_URL: &str = "https://www.youtube.com/watch?v=";

const OVERVIEW_KEYS: &[&str] = &["description", "overview"];
const YEAR_KEYS: &[&str] = &["year"];
const RATING_KEYS: &[&str] = &["imdb_rating", "rating"];
const GENRE_KEYS: &[&str] = &["genres"];
const POSTER_KEYS: &[&str] = &["image_url", "poster_path", "poster"];
const RELEASE_DATE_KEYS: &[&str] = &["release_date"];
const RUNTIME_KEYS: &[&str] = &["runtime"];
const DIRECTOR_KEYS: &[&str] = &["director"];
const CAST_KEYS: &[&str] = &["stars", "cast"];
const TRAILER_KEYS: &[&str] = &["youtube_trailer_key"];

/// Full movie record shown on the detail screen
#[derive(Debug, Clone, PartialEq)]
pub struct MovieDetail {
    pub id: String,
    pub title: String,
    pub overview: Option<String>,
    pub year: Option<String>,
    pub rating: Option<f64>,
    pub genres: Vec<String>,
    pub poster: Option<Url>,
    pub release_date: Option<String>,
    pub runtime: Option<String>,
    pub director: Option<String>,
    pub cast: Vec<String>,
    pub youtube_trailer_key: Option<String>,
}

impl MovieDetail {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            overview: None,
            year: None,
            rating: None,
            genres: Vec::new(),
            poster: None,
            release_date: None,
            runtime: None,
            director: None,
            cast: Vec::new(),
            youtube_trailer_key: None,
        }
    }

    pub fn from_value(value: &Value) -> Result<Self> {
        let obj = fields::object(value, "movie detail")?;

        Ok(Self {
            id: require_id(obj)?,
            title: require_title(obj)?,
            overview: fields::first_string(obj, OVERVIEW_KEYS),
            year: fields::first_text(obj, YEAR_KEYS),
            rating: fields::first_number(obj, RATING_KEYS),
            genres: fields::first_list(obj, GENRE_KEYS).unwrap_or_default(),
            poster: fields::first_string(obj, POSTER_KEYS).and_then(|s| Url::parse(&s).ok()),
            release_date: fields::first_string(obj, RELEASE_DATE_KEYS),
            runtime: fields::runtime(obj, RUNTIME_KEYS),
            director: fields::first_string(obj, DIRECTOR_KEYS),
            cast: fields::first_list(obj, CAST_KEYS).unwrap_or_default(),
            youtube_trailer_key: fields::first_string(obj, TRAILER_KEYS),
        })
    }

    fn trailer_key(&self) -> Option<&str> {
        self.youtube_trailer_key
            .as_deref()
            .filter(|key| !key.is_empty())
    }

    pub fn has_trailer(&self) -> bool {
        self.trailer_key().is_some()
    }

    /// Max-resolution trailer thumbnail
    pub fn thumbnail_url(&self) -> Option<Url> {
        self.trailer_key().and_then(|key| {
            Url::parse(&format!("{YOUTUBE_THUMBNAIL_BASE}/{key}/maxresdefault.jpg")).ok()
        })
    }

    /// High-quality thumbnail, available for every uploaded trailer
    pub fn thumbnail_hq_url(&self) -> Option<Url> {
        self.trailer_key().and_then(|key| {
            Url::parse(&format!("{YOUTUBE_THUMBNAIL_BASE}/{key}/hqdefault.jpg")).ok()
        })
    }

    pub fn trailer_url(&self) -> Option<Url> {
        self.trailer_key()
            .and_then(|key| Url::parse(&format!("{YOUTUBE_WATCH_URL}{key}")).ok())
    }
}

impl<'de> Deserialize<'de> for MovieDetail {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Self::from_value(&value).map_err(serde::de::Error::custom)
    }
}
