//! Actions - intents from the view and results from async fetches

use serde::{Deserialize, Serialize};

use crate::sprite::SpriteImage;
use crate::state::{PokemonDetail, PokemonSummary};

/// Application actions with category inference
#[derive(tui_dispatch::Action, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[action(infer_categories)]
pub enum Action {
    // ===== Pokedex category =====
    /// Intent: reload the list page (triggers async task)
    PokedexFetch,

    /// Result: page loaded
    PokedexDidLoad(Vec<PokemonSummary>),

    /// Result: page fetch failed
    PokedexDidError(String),

    // ===== Search category =====
    /// Query text changed; recomputes the filtered list
    SearchQueryChange(String),

    // ===== Detail category =====
    /// Intent: load detail for a name or id (triggers async task)
    DetailFetch(String),

    /// Result: detail loaded
    DetailDidLoad(PokemonDetail),

    /// Result: detail fetch failed
    DetailDidError(String),

    // ===== Sprite category =====
    /// Result: sprite for pokemon `id` downloaded and decoded
    SpriteDidLoad { id: u32, sprite: SpriteImage },

    /// Result: sprite for pokemon `id` unavailable
    SpriteDidError { id: u32, error: String },

    // ===== Uncategorized (global) =====
    /// Exit the application
    Quit,
}
