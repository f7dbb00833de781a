//! Application state - single source of truth

use serde::{Deserialize, Serialize};
use tui_dispatch_debug::debug::{ron_string, DebugSection, DebugState};

use crate::sprite::SpriteImage;

/// Lightweight catalog list entry
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PokemonSummary {
    pub id: u32,
    pub name: String,
    pub image_url: String,
}

/// Full catalog entry for one pokemon
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PokemonDetail {
    pub id: u32,
    pub name: String,
    pub height: u32,
    pub weight: u32,
    /// Type names ordered by slot
    pub types: Vec<String>,
    pub sprite_url: String,
}

/// Snapshot of everything the UI needs to render.
///
/// Only the reducer writes to it. `filtered_items` is derived from `items`
/// and `query` and is recomputed whenever either changes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppState {
    /// Page fetch in flight
    pub is_loading: bool,
    /// Detail fetch in flight
    pub is_detail_loading: bool,
    pub query: String,
    /// Last loaded page, sorted by id
    pub items: Vec<PokemonSummary>,
    pub filtered_items: Vec<PokemonSummary>,
    pub selected: Option<PokemonDetail>,
    pub error_message: Option<String>,
    /// Decoded sprite for `selected`
    pub sprite: Option<SpriteImage>,
    /// Sprite download in flight for `selected`
    pub is_sprite_loading: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            // The store dispatches a refresh as soon as it is created.
            is_loading: true,
            is_detail_loading: false,
            query: String::new(),
            items: Vec::new(),
            filtered_items: Vec::new(),
            selected: None,
            error_message: None,
            sprite: None,
            is_sprite_loading: false,
        }
    }
}

impl AppState {
    pub fn is_busy(&self) -> bool {
        self.is_loading || self.is_detail_loading || self.is_sprite_loading
    }

    /// Drop the selection together with its sprite
    pub fn clear_selection(&mut self) {
        self.selected = None;
        self.sprite = None;
        self.is_sprite_loading = false;
    }
}

impl DebugState for AppState {
    fn debug_sections(&self) -> Vec<DebugSection> {
        vec![
            DebugSection::new("Dex")
                .entry("total", ron_string(&self.items.len()))
                .entry("filtered", ron_string(&self.filtered_items.len()))
                .entry("query", ron_string(&self.query))
                .entry(
                    "selected",
                    ron_string(&self.selected.as_ref().map(|detail| detail.name.clone())),
                ),
            DebugSection::new("Status")
                .entry("list_loading", ron_string(&self.is_loading))
                .entry("detail_loading", ron_string(&self.is_detail_loading))
                .entry("sprite_loading", ron_string(&self.is_sprite_loading))
                .entry(
                    "sprite",
                    ron_string(&self.sprite.as_ref().map(|sprite| (sprite.width, sprite.height))),
                )
                .entry("error", ron_string(&self.error_message)),
        ]
    }
}
