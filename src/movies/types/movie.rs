use super::fields::{self, Object};
use crate::movies::{MoviesError, Result};
use reqwest::Url;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::hash::{Hash, Hasher};

/// Candidate keys, highest priority first
const ID_KEYS: &[&str] = &["imdb_id", "id"];
const YEAR_KEYS: &[&str] = &["year"];
const RATING_KEYS: &[&str] = &["imdb_rating", "rating"];
const POSTER_KEYS: &[&str] = &["image_url", "poster_path", "poster"];

/// A movie as listed by any feed endpoint
#[derive(Debug, Clone)]
pub struct Movie {
    id: String,
    title: String,
    year: Option<String>,
    rating: Option<f64>,
    poster: Option<Url>,
}

impl Movie {
    /// Create a new Movie with required fields
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            year: None,
            rating: None,
            poster: None,
        }
    }

    #[must_use]
    pub fn with_year(mut self, year: impl Into<String>) -> Self {
        self.year = Some(year.into());
        self
    }

    #[must_use]
    pub fn with_rating(mut self, rating: f64) -> Self {
        self.rating = Some(rating).filter(|r| r.is_finite());
        self
    }

    #[must_use]
    pub fn with_poster(mut self, poster: Url) -> Self {
        self.poster = Some(poster);
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn year(&self) -> Option<&str> {
        self.year.as_deref()
    }

    pub fn rating(&self) -> Option<f64> {
        self.rating
    }

    pub fn poster(&self) -> Option<&Url> {
        self.poster.as_ref()
    }

    /// Decode one list item
    pub fn from_value(value: &Value) -> Result<Self> {
        Self::from_object(fields::object(value, "movie")?)
    }

    pub(crate) fn from_object(obj: &Object) -> Result<Self> {
        let id = require_id(obj)?;
        let title = require_title(obj)?;

        Ok(Self {
            id,
            title,
            year: fields::first_text(obj, YEAR_KEYS),
            rating: fields::first_number(obj, RATING_KEYS),
            poster: fields::first_string(obj, POSTER_KEYS).and_then(|s| Url::parse(&s).ok()),
        })
    }
}

pub(crate) fn require_id(obj: &Object) -> Result<String> {
    fields::first_string(obj, ID_KEYS)
        .ok_or_else(|| MoviesError::Decoding(format!("no id found (tried {ID_KEYS:?})")))
}

pub(crate) fn require_title(obj: &Object) -> Result<String> {
    obj.get("title")
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| MoviesError::Decoding("missing field `title`".to_string()))
}

// Ratings compare bitwise so equality stays consistent with hashing.
impl PartialEq for Movie {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.title == other.title
            && self.year == other.year
            && self.rating.map(f64::to_bits) == other.rating.map(f64::to_bits)
            && self.poster == other.poster
    }
}

impl Eq for Movie {}

impl Hash for Movie {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
        self.title.hash(state);
        self.year.hash(state);
        self.rating.map(f64::to_bits).hash(state);
        self.poster.hash(state);
    }
}

impl<'de> Deserialize<'de> for Movie {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Self::from_value(&value).map_err(serde::de::Error::custom)
    }
}
