use reqwest::{Client, RequestBuilder, Url};
use serde::de::DeserializeOwned;

use super::error::ApiError;
use crate::config::Config;
use crate::state::data::{Breed, CatImage};
use crate::state::gallery::FetchRequest;

/// Header carrying the TheCatAPI key
const API_KEY_HEADER: &str = "x-api-key";

const USER_AGENT: &str = concat!("cat-gallery/", env!("CARGO_PKG_VERSION"));

/// Client for TheCatAPI
///
/// Cheap to clone: the underlying `reqwest::Client` shares its connection
/// pool, so each background task gets its own copy.
#[derive(Debug, Clone)]
pub struct CatApi {
    client: Client,
    base_url: String,
    api_key: String,
}

impl CatApi {
    /// Create a client for the API rooted at `base_url` (e.g. `https://api.thecatapi.com/v1`)
    pub fn new(base_url: &str, api_key: &str) -> Result<Self, ApiError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| ApiError::Client(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, ApiError> {
        Self::new(&config.api_base_url, &config.api_key)
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    /// Query parameters for one page of `/images/search`
    pub fn search_params(request: &FetchRequest) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("limit", request.limit.to_string()),
            ("page", request.page.to_string()),
        ];
        if let Some(breed_id) = request.filter.breed_id() {
            params.push(("breed_ids", breed_id.to_string()));
        }
        params
    }

    /// Fetch one page of images, unfiltered
    ///
    /// Entries without a url are returned as-is; dropping them is the
    /// gallery state's job.
    pub async fn search_images(&self, request: &FetchRequest) -> Result<Vec<CatImage>, ApiError> {
        let builder = self
            .client
            .get(self.endpoint("images/search"))
            .query(&Self::search_params(request));

        self.get_json(builder).await
    }

    /// Fetch the full breed list
    pub async fn list_breeds(&self) -> Result<Vec<Breed>, ApiError> {
        let builder = self.client.get(self.endpoint("breeds"));
        self.get_json(builder).await
    }

    /// Download the raw bytes behind an image url
    ///
    /// Image CDNs don't need the API key, so it is not sent here.
    pub async fn download(&self, url: &str) -> Result<Vec<u8>, ApiError> {
        let url = Url::parse(url).map_err(|e| ApiError::InvalidUrl(format!("{}: {}", url, e)))?;

        let response = self.client.get(url).send().await?;
        if !response.status().is_success() {
            return Err(ApiError::Status(response.status()));
        }

        let bytes = response.bytes().await?;
        Ok(bytes.to_vec())
    }

    async fn get_json<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, ApiError> {
        let response = builder.header(API_KEY_HEADER, &self.api_key).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status(status));
        }

        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}
