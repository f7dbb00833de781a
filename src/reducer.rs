//! Reducer - pure function: (state, action) -> DispatchResult

use tui_dispatch::DispatchResult;

use crate::action::Action;
use crate::effect::Effect;
use crate::filter::filter_summaries;
use crate::state::AppState;

pub const DEFAULT_POKEDEX_ERROR: &str = "Unable to load Pokemon right now.";
pub const DEFAULT_DETAIL_ERROR: &str = "Unable to load that Pokemon.";

/// The reducer handles all state transitions
pub fn reducer(state: &mut AppState, action: Action) -> DispatchResult<Effect> {
    match action {
        // ===== Pokedex actions =====
        Action::PokedexFetch => {
            state.is_loading = true;
            state.error_message = None;
            state.clear_selection();
            DispatchResult::changed_with(Effect::LoadPokedex)
        }

        Action::PokedexDidLoad(mut entries) => {
            entries.sort_by_key(|entry| entry.id);
            state.filtered_items = filter_summaries(&entries, &state.query);
            state.items = entries;
            state.is_loading = false;
            state.error_message = None;
            state.clear_selection();
            DispatchResult::changed()
        }

        Action::PokedexDidError(error) => {
            state.is_loading = false;
            state.items.clear();
            state.filtered_items.clear();
            state.error_message = Some(error_or_default(error, DEFAULT_POKEDEX_ERROR));
            DispatchResult::changed()
        }

        // ===== Search actions =====
        Action::SearchQueryChange(query) => {
            if state.query == query {
                return DispatchResult::unchanged();
            }
            state.filtered_items = filter_summaries(&state.items, &query);
            state.query = query;
            DispatchResult::changed()
        }

        // ===== Detail actions =====
        Action::DetailFetch(identifier) => {
            state.is_detail_loading = true;
            state.error_message = None;
            DispatchResult::changed_with(Effect::LoadDetail {
                key: normalize_key(&identifier),
            })
        }

        Action::DetailDidLoad(detail) => {
            state.is_detail_loading = false;
            state.error_message = None;
            state.sprite = None;
            let sprite = (!detail.sprite_url.is_empty()).then(|| Effect::LoadSprite {
                id: detail.id,
                url: detail.sprite_url.clone(),
            });
            state.is_sprite_loading = sprite.is_some();
            state.selected = Some(detail);
            match sprite {
                Some(effect) => DispatchResult::changed_with(effect),
                None => DispatchResult::changed(),
            }
        }

        Action::DetailDidError(error) => {
            state.is_detail_loading = false;
            state.clear_selection();
            state.error_message = Some(error_or_default(error, DEFAULT_DETAIL_ERROR));
            DispatchResult::changed()
        }

        // ===== Sprite actions =====
        // Results for anything but the current selection are stale.
        Action::SpriteDidLoad { id, sprite } => {
            if !is_selected(state, id) {
                return DispatchResult::unchanged();
            }
            state.is_sprite_loading = false;
            state.sprite = Some(sprite);
            DispatchResult::changed()
        }

        Action::SpriteDidError { id, .. } => {
            if !is_selected(state, id) {
                return DispatchResult::unchanged();
            }
            state.is_sprite_loading = false;
            state.sprite = None;
            DispatchResult::changed()
        }

        // ===== Global actions =====
        Action::Quit => DispatchResult::unchanged(),
    }
}

/// Lookup key for a name or id typed by the user
pub fn normalize_key(identifier: &str) -> String {
    identifier.trim().to_lowercase()
}

fn is_selected(state: &AppState, id: u32) -> bool {
    state.selected.as_ref().is_some_and(|detail| detail.id == id)
}

fn error_or_default(error: String, default: &str) -> String {
    if error.trim().is_empty() {
        default.to_string()
    } else {
        error
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sprite::SpriteImage;
    use crate::state::{PokemonDetail, PokemonSummary};

    fn pixel() -> SpriteImage {
        SpriteImage {
            payload: "iVBORw0KGgo=".into(),
            width: 1,
            height: 1,
        }
    }

    fn entry(id: u32, name: &str) -> PokemonSummary {
        PokemonSummary {
            id,
            name: name.to_string(),
            image_url: name.to_lowercase(),
        }
    }

    fn bulbasaur() -> PokemonDetail {
        PokemonDetail {
            id: 1,
            name: "Bulbasaur".into(),
            height: 7,
            weight: 69,
            types: vec!["grass".into(), "poison".into()],
            sprite_url: "sprite".into(),
        }
    }

    #[test]
    fn test_pokedex_fetch_sets_loading() {
        let mut state = AppState {
            is_loading: false,
            error_message: Some("old".into()),
            selected: Some(bulbasaur()),
            items: vec![entry(1, "Mew")],
            ..Default::default()
        };

        let result = reducer(&mut state, Action::PokedexFetch);

        assert!(result.changed);
        assert!(state.is_loading);
        assert_eq!(state.error_message, None);
        assert_eq!(state.selected, None);
        // Previous page stays visible until the fetch settles.
        assert_eq!(state.items.len(), 1);
        assert_eq!(result.effects, vec![Effect::LoadPokedex]);
    }

    #[test]
    fn test_pokedex_did_load_sorts_by_id() {
        let mut state = AppState::default();

        let result = reducer(
            &mut state,
            Action::PokedexDidLoad(vec![entry(3, "Zubat"), entry(2, "Abra"), entry(1, "Mew")]),
        );

        assert!(result.changed);
        assert!(result.effects.is_empty());
        assert!(!state.is_loading);
        let names: Vec<_> = state.items.iter().map(|entry| entry.name.as_str()).collect();
        assert_eq!(names, ["Mew", "Abra", "Zubat"]);
        assert_eq!(state.filtered_items, state.items);
    }

    #[test]
    fn test_pokedex_did_load_reapplies_query() {
        let page = vec![entry(25, "Pikachu"), entry(4, "Charmander")];
        let mut state = AppState {
            query: "2".into(),
            ..Default::default()
        };

        reducer(&mut state, Action::PokedexDidLoad(page.clone()));

        // Ids match whole, so "2" is not a prefix of 25
        assert_eq!(state.items.len(), 2);
        assert_eq!(state.filtered_items, Vec::<PokemonSummary>::new());

        let mut state = AppState {
            query: "25".into(),
            ..Default::default()
        };

        reducer(&mut state, Action::PokedexDidLoad(page));

        assert_eq!(state.filtered_items, vec![entry(25, "Pikachu")]);
    }

    #[test]
    fn test_pokedex_did_load_clears_selection_and_error() {
        let mut state = AppState {
            selected: Some(bulbasaur()),
            error_message: Some("stale".into()),
            ..Default::default()
        };

        reducer(&mut state, Action::PokedexDidLoad(vec![entry(1, "Bulbasaur")]));

        assert_eq!(state.selected, None);
        assert_eq!(state.error_message, None);
    }

    #[test]
    fn test_pokedex_did_error_clears_lists() {
        let mut state = AppState {
            items: vec![entry(1, "Mew")],
            filtered_items: vec![entry(1, "Mew")],
            ..Default::default()
        };

        let result = reducer(&mut state, Action::PokedexDidError("network down".into()));

        assert!(result.changed);
        assert!(!state.is_loading);
        assert!(state.items.is_empty());
        assert!(state.filtered_items.is_empty());
        assert_eq!(state.error_message.as_deref(), Some("network down"));
    }

    #[test]
    fn test_blank_errors_use_default_message() {
        let mut state = AppState::default();

        reducer(&mut state, Action::PokedexDidError("  ".into()));
        assert_eq!(state.error_message.as_deref(), Some(DEFAULT_POKEDEX_ERROR));

        reducer(&mut state, Action::DetailDidError(String::new()));
        assert_eq!(state.error_message.as_deref(), Some(DEFAULT_DETAIL_ERROR));
    }

    #[test]
    fn test_query_change_recomputes_filter() {
        let mut state = AppState {
            is_loading: false,
            items: vec![entry(4, "Charmander"), entry(25, "Pikachu")],
            filtered_items: vec![entry(4, "Charmander"), entry(25, "Pikachu")],
            ..Default::default()
        };

        let result = reducer(&mut state, Action::SearchQueryChange("pika".into()));
        assert!(result.changed);
        assert!(result.effects.is_empty());
        assert_eq!(state.query, "pika");
        assert_eq!(state.filtered_items, vec![entry(25, "Pikachu")]);

        let result = reducer(&mut state, Action::SearchQueryChange(" ".into()));
        assert!(result.changed);
        assert_eq!(state.filtered_items, state.items);
    }

    #[test]
    fn test_same_query_is_unchanged() {
        let mut state = AppState {
            query: "mew".into(),
            ..Default::default()
        };

        let result = reducer(&mut state, Action::SearchQueryChange("mew".into()));
        assert!(!result.changed);
    }

    #[test]
    fn test_detail_fetch_normalizes_key() {
        let mut state = AppState {
            error_message: Some("old".into()),
            ..Default::default()
        };

        let result = reducer(&mut state, Action::DetailFetch("  Bulbasaur ".into()));

        assert!(result.changed);
        assert!(state.is_detail_loading);
        assert_eq!(state.error_message, None);
        assert_eq!(
            result.effects,
            vec![Effect::LoadDetail {
                key: "bulbasaur".into()
            }]
        );
    }

    #[test]
    fn test_detail_fetch_keeps_loading_flags_independent() {
        let mut state = AppState::default();
        assert!(state.is_loading);

        reducer(&mut state, Action::DetailFetch("mew".into()));

        assert!(state.is_loading);
        assert!(state.is_detail_loading);
        assert!(state.is_busy());
    }

    #[test]
    fn test_detail_did_load_sets_selection() {
        let mut state = AppState {
            is_detail_loading: true,
            ..Default::default()
        };

        let result = reducer(&mut state, Action::DetailDidLoad(bulbasaur()));

        assert!(!state.is_detail_loading);
        assert_eq!(state.selected, Some(bulbasaur()));
        assert!(state.is_sprite_loading);
        assert_eq!(
            result.effects,
            vec![Effect::LoadSprite {
                id: 1,
                url: "sprite".into()
            }]
        );
    }

    #[test]
    fn test_detail_without_sprite_url_skips_download() {
        let mut state = AppState {
            sprite: Some(pixel()),
            ..Default::default()
        };
        let detail = PokemonDetail {
            sprite_url: String::new(),
            ..bulbasaur()
        };

        let result = reducer(&mut state, Action::DetailDidLoad(detail));

        assert!(result.effects.is_empty());
        assert!(!state.is_sprite_loading);
        assert_eq!(state.sprite, None);
    }

    #[test]
    fn test_sprite_result_applies_to_current_selection() {
        let mut state = AppState::default();
        reducer(&mut state, Action::DetailDidLoad(bulbasaur()));

        let result = reducer(
            &mut state,
            Action::SpriteDidLoad {
                id: 1,
                sprite: pixel(),
            },
        );

        assert!(result.changed);
        assert!(!state.is_sprite_loading);
        assert_eq!(state.sprite, Some(pixel()));
    }

    #[test]
    fn test_stale_sprite_results_are_ignored() {
        let mut state = AppState::default();
        reducer(&mut state, Action::DetailDidLoad(bulbasaur()));

        let result = reducer(
            &mut state,
            Action::SpriteDidLoad {
                id: 25,
                sprite: pixel(),
            },
        );
        assert!(!result.changed);
        assert!(state.is_sprite_loading);

        let result = reducer(
            &mut state,
            Action::SpriteDidError {
                id: 25,
                error: "404".into(),
            },
        );
        assert!(!result.changed);
    }

    #[test]
    fn test_sprite_error_is_not_a_catalog_error() {
        let mut state = AppState::default();
        reducer(&mut state, Action::DetailDidLoad(bulbasaur()));

        reducer(
            &mut state,
            Action::SpriteDidError {
                id: 1,
                error: "404".into(),
            },
        );

        assert!(!state.is_sprite_loading);
        assert_eq!(state.sprite, None);
        assert_eq!(state.error_message, None);
        assert_eq!(state.selected, Some(bulbasaur()));
    }

    #[test]
    fn test_refresh_drops_sprite_with_selection() {
        let mut state = AppState {
            selected: Some(bulbasaur()),
            sprite: Some(pixel()),
            is_sprite_loading: true,
            ..Default::default()
        };

        reducer(&mut state, Action::PokedexFetch);

        assert_eq!(state.selected, None);
        assert_eq!(state.sprite, None);
        assert!(!state.is_sprite_loading);
    }

    #[test]
    fn test_detail_did_error_clears_selection() {
        let mut state = AppState {
            selected: Some(bulbasaur()),
            is_detail_loading: true,
            ..Default::default()
        };

        let result = reducer(&mut state, Action::DetailDidError("boom".into()));

        assert!(result.changed);
        assert!(!state.is_detail_loading);
        assert_eq!(state.selected, None);
        assert_eq!(state.error_message.as_deref(), Some("boom"));
    }

    #[test]
    fn test_quit_is_unchanged() {
        let mut state = AppState::default();
        let result = reducer(&mut state, Action::Quit);
        assert!(!result.changed);
        assert!(result.effects.is_empty());
    }
}
