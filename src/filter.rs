//! Client-side list filtering

use crate::state::PokemonSummary;

/// Filter `items` by a search query.
///
/// A blank query returns the list unchanged. Otherwise an entry matches when
/// its lower-cased name contains the trimmed, lower-cased query, or when its id
/// is exactly the query. Order is preserved.
pub fn filter_summaries(items: &[PokemonSummary], query: &str) -> Vec<PokemonSummary> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return items.to_vec();
    }

    items
        .iter()
        .filter(|entry| entry.name.to_lowercase().contains(&query) || entry.id.to_string() == query)
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: u32, name: &str) -> PokemonSummary {
        PokemonSummary {
            id,
            name: name.to_string(),
            image_url: format!("{id}.png"),
        }
    }

    fn names(items: &[PokemonSummary]) -> Vec<&str> {
        items.iter().map(|entry| entry.name.as_str()).collect()
    }

    fn sample() -> Vec<PokemonSummary> {
        vec![
            entry(1, "Bulbasaur"),
            entry(4, "Charmander"),
            entry(5, "Charmeleon"),
            entry(25, "Pikachu"),
            entry(52, "Meowth"),
        ]
    }

    #[test]
    fn test_blank_query_returns_items_unchanged() {
        let items = sample();
        assert_eq!(filter_summaries(&items, ""), items);
        assert_eq!(filter_summaries(&items, "   "), items);
        assert_eq!(filter_summaries(&items, "\t\n"), items);
    }

    #[test]
    fn test_name_substring_is_case_insensitive() {
        let items = sample();
        assert_eq!(
            names(&filter_summaries(&items, "CHAR")),
            ["Charmander", "Charmeleon"]
        );
        assert_eq!(names(&filter_summaries(&items, "  meow ")), ["Meowth"]);
        assert!(filter_summaries(&items, "mewtwo").is_empty());
    }

    #[test]
    fn test_id_requires_exact_match() {
        let items = sample();
        assert_eq!(names(&filter_summaries(&items, "25")), ["Pikachu"]);
        assert!(filter_summaries(&items, "2").is_empty());
        assert_eq!(names(&filter_summaries(&items, " 5 ")), ["Charmeleon"]);
    }

    #[test]
    fn test_exact_id_ignores_prefix() {
        let items = vec![entry(25, "Pikachu"), entry(4, "Charmander")];
        assert_eq!(names(&filter_summaries(&items, "2")), Vec::<&str>::new());
        assert_eq!(names(&filter_summaries(&items, "4")), ["Charmander"]);
    }

    #[test]
    fn test_preserves_input_order() {
        let items = vec![entry(151, "Mew"), entry(1, "Bulbasaur"), entry(150, "Mewtwo")];
        assert_eq!(
            filter_summaries(&items, "mew")
                .iter()
                .map(|entry| entry.id)
                .collect::<Vec<_>>(),
            vec![151, 150]
        );
    }

    #[test]
    fn test_name_or_id_either_matches() {
        let items = vec![entry(1, "Abra1"), entry(2, "Kadabra")];
        // "1" matches entry 1 by id and by name
        assert_eq!(names(&filter_summaries(&items, "1")), ["Abra1"]);
    }
}
