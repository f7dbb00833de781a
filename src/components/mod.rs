pub mod detail_card;
pub mod dex_list;
pub mod pokedex_screen;
pub mod search_bar;

use ratatui::style::Color;

// Re-export core Component trait
pub use tui_dispatch::Component;

pub use detail_card::{DetailCard, DetailCardProps};
pub use dex_list::{DexList, DexListProps};
pub use pokedex_screen::{PokedexScreen, PokedexScreenProps};
pub use search_bar::{SearchBar, SearchBarProps};

pub const TEXT_MAIN: Color = Color::Rgb(232, 242, 244);
pub const TEXT_DIM: Color = Color::Rgb(176, 195, 207);
pub const ACCENT_TEAL: Color = Color::Rgb(72, 204, 184);
pub const ACCENT_GOLD: Color = Color::Rgb(228, 176, 88);
pub const ACCENT_RED: Color = Color::Rgb(226, 96, 96);
pub const BG_HIGHLIGHT: Color = Color::Rgb(28, 92, 110);
