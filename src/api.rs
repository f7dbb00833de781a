//! PokeAPI catalog client

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::config::CatalogConfig;
use crate::state::{PokemonDetail, PokemonSummary};

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("request failed: {0}")]
    Request(String),
    #[error("response parse error: {0}")]
    Parse(String),
}

/// Network access to the creature catalog.
///
/// Implementations map remote payloads to domain records; list entries whose
/// id cannot be parsed are dropped rather than failing the page.
#[async_trait]
pub trait CatalogClient: Send + Sync {
    async fn fetch_page(&self, limit: u32, offset: u32)
        -> Result<Vec<PokemonSummary>, CatalogError>;

    async fn fetch_detail(&self, key: &str) -> Result<PokemonDetail, CatalogError>;

    /// Raw image bytes behind a sprite URL
    async fn fetch_sprite(&self, url: &str) -> Result<Vec<u8>, CatalogError>;
}

// ============================================================================
// Remote schema
// ============================================================================

#[derive(Clone, Debug, Deserialize)]
struct NamedResource {
    name: String,
    url: String,
}

#[derive(Clone, Debug, Deserialize)]
struct ListResponse {
    #[serde(default)]
    results: Vec<NamedResource>,
}

#[derive(Clone, Debug, Deserialize)]
struct PokemonResponse {
    id: u32,
    name: String,
    height: u32,
    weight: u32,
    types: Vec<PokemonTypeSlot>,
    #[serde(default)]
    sprites: SpriteSet,
}

#[derive(Clone, Debug, Deserialize)]
struct PokemonTypeSlot {
    slot: u32,
    #[serde(rename = "type")]
    type_info: NamedResource,
}

#[derive(Clone, Debug, Default, Deserialize)]
struct SpriteSet {
    front_default: Option<String>,
}

// ============================================================================
// HTTP client
// ============================================================================

pub struct PokeApiClient {
    client: reqwest::Client,
    config: CatalogConfig,
}

impl PokeApiClient {
    pub fn new(config: CatalogConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.config.base_url.trim_end_matches('/'), path)
    }

    async fn get_bytes(&self, url: &str) -> Result<Vec<u8>, CatalogError> {
        tracing::debug!(%url, "GET");
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|err| CatalogError::Request(err.to_string()))?;
        tracing::debug!(%url, status = %response.status(), "response");

        let bytes = response
            .error_for_status()
            .map_err(|err| CatalogError::Request(err.to_string()))?
            .bytes()
            .await
            .map_err(|err| CatalogError::Request(err.to_string()))?;
        Ok(bytes.to_vec())
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, CatalogError> {
        let bytes = self.get_bytes(url).await?;
        serde_json::from_slice(&bytes).map_err(|err| CatalogError::Parse(err.to_string()))
    }
}

#[async_trait]
impl CatalogClient for PokeApiClient {
    async fn fetch_page(
        &self,
        limit: u32,
        offset: u32,
    ) -> Result<Vec<PokemonSummary>, CatalogError> {
        let url = self.endpoint(&format!("pokemon?limit={limit}&offset={offset}"));
        let response: ListResponse = self.get_json(&url).await?;
        Ok(summaries_from_list(response, &self.config.sprite_base))
    }

    async fn fetch_detail(&self, key: &str) -> Result<PokemonDetail, CatalogError> {
        let url = self.endpoint(&detail_path(key));
        let response: PokemonResponse = self.get_json(&url).await?;
        Ok(detail_from_response(response, &self.config.sprite_base))
    }

    async fn fetch_sprite(&self, url: &str) -> Result<Vec<u8>, CatalogError> {
        self.get_bytes(url).await
    }
}

/// Path for one pokemon; the key is a single percent-encoded segment
fn detail_path(key: &str) -> String {
    format!("pokemon/{}", urlencoding::encode(&key.to_lowercase()))
}

// ============================================================================
// Mapping
// ============================================================================

fn summaries_from_list(response: ListResponse, sprite_base: &str) -> Vec<PokemonSummary> {
    let total = response.results.len();
    let entries: Vec<PokemonSummary> = response
        .results
        .into_iter()
        .filter_map(|resource| summary_from_resource(resource, sprite_base))
        .collect();
    if entries.len() < total {
        tracing::debug!(dropped = total - entries.len(), "skipped list entries without an id");
    }
    entries
}

fn summary_from_resource(resource: NamedResource, sprite_base: &str) -> Option<PokemonSummary> {
    let id = parse_id_from_url(&resource.url)?;
    Some(PokemonSummary {
        id,
        name: display_name(&resource.name),
        image_url: sprite_url_for(sprite_base, id),
    })
}

fn detail_from_response(response: PokemonResponse, sprite_base: &str) -> PokemonDetail {
    let mut slots = response.types;
    slots.sort_by_key(|slot| slot.slot);

    let sprite_url = response
        .sprites
        .front_default
        .filter(|url| !url.is_empty())
        .unwrap_or_else(|| sprite_url_for(sprite_base, response.id));

    PokemonDetail {
        id: response.id,
        name: display_name(&response.name),
        height: response.height,
        weight: response.weight,
        types: slots.into_iter().map(|slot| slot.type_info.name).collect(),
        sprite_url,
    }
}

/// `.../pokemon/25/` -> 25
fn parse_id_from_url(url: &str) -> Option<u32> {
    url.trim_end_matches('/')
        .rsplit('/')
        .next()?
        .parse::<u32>()
        .ok()
        .filter(|id| *id > 0)
}

/// Upper-cases the first character: `pikachu` -> `Pikachu`
pub fn display_name(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn sprite_url_for(sprite_base: &str, id: u32) -> String {
    format!("{}/{id}.png", sprite_base.trim_end_matches('/'))
}
