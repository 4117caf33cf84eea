/// Shared data structures for the application state
///
/// These structs mirror the records returned by TheCatAPI and flow
/// unchanged from the HTTP layer into the UI layer.

use serde::{Deserialize, Deserializer};
use std::fmt;

/// A single cat picture returned by `/images/search`
///
/// Missing and `null` fields both decode to their default, so one sparse
/// entry never fails the page it arrived in.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CatImage {
    /// API identifier (may be empty for malformed entries)
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    /// Public URL of the full-size picture
    #[serde(default, deserialize_with = "null_as_default")]
    pub url: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub width: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub height: u32,
    /// Breeds attached to the picture, only present on some entries
    #[serde(default)]
    pub breeds: Option<Vec<Breed>>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl CatImage {
    /// Only images with a non-empty url are ever displayed
    pub fn has_url(&self) -> bool {
        !self.url.trim().is_empty()
    }

    /// Stable key for the grid tile at `index`
    pub fn tile_key(&self, index: usize) -> String {
        if self.id.is_empty() {
            format!("cat-{}", index)
        } else {
            self.id.clone()
        }
    }
}

/// A cat breed returned by `/breeds`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Breed {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub temperament: Option<String>,
    #[serde(default)]
    pub origin: Option<String>,
}

/// Breed constraint applied to image searches
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum BreedFilter {
    /// No filter ("All Breeds")
    #[default]
    All,
    /// Restrict results to one breed id
    Breed(String),
}

impl BreedFilter {
    /// Reserved value meaning "no filter"
    pub const ALL: &'static str = "all";

    /// The `breed_ids` query value, if any
    pub fn breed_id(&self) -> Option<&str> {
        match self {
            BreedFilter::All => None,
            BreedFilter::Breed(id) => Some(id),
        }
    }
}

impl fmt::Display for BreedFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BreedFilter::All => write!(f, "{}", Self::ALL),
            BreedFilter::Breed(id) => write!(f, "{}", id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_without_url_field_deserializes_empty() {
        let image: CatImage = serde_json::from_str(r#"{"id":"abc","width":10,"height":20}"#).unwrap();

        assert_eq!(image.url, "");
        assert!(!image.has_url());
        assert!(image.breeds.is_none());
    }

    #[test]
    fn test_null_fields_keep_the_rest_of_the_page() {
        let json = r#"[
            {"id":"a","url":"https://cdn/a.jpg","width":100,"height":80},
            {"id":"b","url":null,"width":null,"height":80},
            {"id":null,"url":"https://cdn/c.jpg","width":100,"height":null}
        ]"#;
        let images: Vec<CatImage> = serde_json::from_str(json).unwrap();

        assert_eq!(images.len(), 3);
        assert!(images[0].has_url());
        assert!(!images[1].has_url());
        assert_eq!(images[1].width, 0);
        assert_eq!(images[2].id, "");
        assert_eq!(images[2].tile_key(2), "cat-2");
        assert_eq!(images[2].height, 0);
    }

    #[test]
    fn test_image_with_breeds() {
        let json = r#"{
            "id": "0XYvRd7oD",
            "url": "https://cdn2.thecatapi.com/images/0XYvRd7oD.jpg",
            "width": 1204,
            "height": 1445,
            "breeds": [{"id": "abys", "name": "Abyssinian", "origin": "Egypt"}]
        }"#;
        let image: CatImage = serde_json::from_str(json).unwrap();

        assert!(image.has_url());
        let breeds = image.breeds.unwrap();
        assert_eq!(breeds[0].id, "abys");
        assert_eq!(breeds[0].origin.as_deref(), Some("Egypt"));
        assert!(breeds[0].temperament.is_none());
    }

    #[test]
    fn test_tile_key_falls_back_to_index() {
        let mut image: CatImage = serde_json::from_str(r#"{"url":"https://x/y.jpg"}"#).unwrap();
        assert_eq!(image.tile_key(3), "cat-3");

        image.id = "beng1".to_string();
        assert_eq!(image.tile_key(3), "beng1");
    }

    #[test]
    fn test_breed_filter_query_value() {
        let bengal = BreedFilter::Breed("beng".to_string());
        assert_eq!(bengal.breed_id(), Some("beng"));
        assert_eq!(bengal.to_string(), "beng");
        assert_eq!(BreedFilter::All.breed_id(), None);
        assert_eq!(BreedFilter::All.to_string(), "all");
    }
}
