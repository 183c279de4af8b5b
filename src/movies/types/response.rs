use super::fields::{self, Object};
use super::movie::Movie;
use crate::movies::Result;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

const MOVIE_LIST_KEYS: &[&str] = &["movie_results", "results"];
const IMAGE_KEYS: &[&str] = &["image_urls", "images"];
const ALIAS_KEYS: &[&str] = &["aliases", "titles"];

/// Wrapped list payload.
///
/// Decoding only fails when the root is not an object; an object without a
/// usable movie array yields an empty list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MoviesResponse {
    pub movies: Vec<Movie>,
    pub total_results: Option<u64>,
    pub total_pages: Option<u64>,
    pub page: Option<u64>,
}

impl MoviesResponse {
    pub fn from_value(value: &Value) -> Result<Self> {
        let obj = fields::object(value, "movies response")?;

        let movies = MOVIE_LIST_KEYS
            .iter()
            .find_map(|key| obj.get(*key).and_then(movie_array))
            .unwrap_or_default();

        Ok(Self {
            movies,
            total_results: obj.get("total_results").and_then(Value::as_u64),
            total_pages: obj.get("total_pages").and_then(Value::as_u64),
            page: obj.get("page").and_then(Value::as_u64),
        })
    }
}

/// All-or-nothing: one bad item rejects the whole array
fn movie_array(value: &Value) -> Option<Vec<Movie>> {
    value
        .as_array()?
        .iter()
        .map(|item| Movie::from_value(item).ok())
        .collect()
}

/// Still images for a movie, looked up by IMDb id
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MovieImages {
    pub images: Vec<String>,
}

impl MovieImages {
    pub fn from_value(value: &Value) -> Result<Self> {
        let obj = fields::object(value, "movie images")?;
        Ok(Self {
            images: string_array(obj, IMAGE_KEYS),
        })
    }
}

/// Alternative titles for a movie, looked up by IMDb id
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MovieAliases {
    pub aliases: Vec<String>,
}

impl MovieAliases {
    pub fn from_value(value: &Value) -> Result<Self> {
        let obj = fields::object(value, "movie aliases")?;
        Ok(Self {
            aliases: string_array(obj, ALIAS_KEYS),
        })
    }
}

fn string_array(obj: &Object, keys: &[&str]) -> Vec<String> {
    keys.iter()
        .find_map(|key| {
            obj.get(*key)?
                .as_array()?
                .iter()
                .map(|item| item.as_str().map(str::to_string))
                .collect::<Option<Vec<_>>>()
        })
        .unwrap_or_default()
}

macro_rules! deserialize_via_value {
    ($($ty:ty),*) => {
        $(
            impl<'de> Deserialize<'de> for $ty {
                fn deserialize<D: Deserializer<'de>>(
                    deserializer: D,
                ) -> std::result::Result<Self, D::Error> {
                    let value = Value::deserialize(deserializer)?;
                    Self::from_value(&value).map_err(serde::de::Error::custom)
                }
            }
        )*
    };
}

deserialize_via_value!(MoviesResponse, MovieImages, MovieAliases);
