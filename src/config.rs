//! Catalog endpoints and paging defaults

pub const API_BASE: &str = "https://pokeapi.co/api/v2";
pub const SPRITE_BASE: &str =
    "https://raw.githubusercontent.com/PokeAPI/sprites/master/sprites/pokemon";

pub const DEFAULT_PAGE_LIMIT: u32 = 50;

/// Where the catalog client sends requests
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CatalogConfig {
    pub base_url: String,
    /// Prefix for `<id>.png` sprites when the API gives none
    pub sprite_base: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: API_BASE.to_string(),
            sprite_base: SPRITE_BASE.to_string(),
        }
    }
}

/// Which list page a refresh loads
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageRequest {
    pub limit: u32,
    pub offset: u32,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            limit: DEFAULT_PAGE_LIMIT,
            offset: 0,
        }
    }
}
