use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::layout::{Constraint, Layout};
use ratatui::prelude::{Frame, Rect};
use ratatui::style::Style;
use ratatui::text::Span;
use tui_dispatch::EventKind;
use tui_dispatch_components::{
    StatusBar, StatusBarHint, StatusBarItem, StatusBarProps, StatusBarSection, StatusBarStyle,
};

use super::{
    Component, DetailCard, DetailCardProps, DexList, DexListProps, SearchBar, SearchBarProps,
    ACCENT_GOLD,
};
use crate::action::Action;
use crate::sprite_backend::SpriteOverlay;
use crate::state::AppState;

/// Props for PokedexScreen - read-only view of state
pub struct PokedexScreenProps<'a> {
    pub state: &'a AppState,
}

/// Top-level screen: search bar, list, detail card and key hints.
///
/// Search mode and the list cursor are view-local; everything else comes from
/// the snapshot.
#[derive(Default)]
pub struct PokedexScreen {
    search: SearchBar,
    list: DexList,
    detail: DetailCard,
    searching: bool,
}

impl PokedexScreen {
    pub fn new() -> Self {
        Self::default()
    }

    /// Screen whose detail card publishes sprites to `overlay`
    pub fn with_overlay(overlay: SpriteOverlay) -> Self {
        Self {
            detail: DetailCard::with_overlay(overlay),
            ..Self::default()
        }
    }

    pub fn is_searching(&self) -> bool {
        self.searching
    }

    fn handle_search_key(&mut self, event: &EventKind, state: &AppState) -> Vec<Action> {
        let EventKind::Key(key) = event else {
            return Vec::new();
        };
        match key.code {
            KeyCode::Enter => {
                self.searching = false;
                Vec::new()
            }
            KeyCode::Esc => {
                self.searching = false;
                if state.query.is_empty() {
                    Vec::new()
                } else {
                    vec![Action::SearchQueryChange(String::new())]
                }
            }
            _ => {
                let props = SearchBarProps {
                    query: &state.query,
                    is_editing: true,
                    on_change: Action::SearchQueryChange,
                };
                self.search.handle_event(event, props).into_iter().collect()
            }
        }
    }
}

impl Component<Action> for PokedexScreen {
    type Props<'a> = PokedexScreenProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        let EventKind::Key(key) = event else {
            return Vec::new();
        };

        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return vec![Action::Quit];
        }

        if self.searching {
            return self.handle_search_key(event, props.state);
        }

        match key.code {
            KeyCode::Char('/') => {
                self.searching = true;
                Vec::new()
            }
            KeyCode::Char('r') | KeyCode::F(5) => vec![Action::PokedexFetch],
            KeyCode::Char('q') | KeyCode::Esc => vec![Action::Quit],
            _ => {
                let props = DexListProps {
                    state: props.state,
                    is_focused: true,
                };
                self.list.handle_event(event, props).into_iter().collect()
            }
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: PokedexScreenProps<'_>) {
        let state = props.state;
        let rows = Layout::vertical([
            Constraint::Length(3), // Search
            Constraint::Min(3),    // List + detail
            Constraint::Length(1), // Help bar
        ])
        .split(area);
        let columns =
            Layout::horizontal([Constraint::Percentage(45), Constraint::Percentage(55)])
                .split(rows[1]);

        self.search.render(
            frame,
            rows[0],
            SearchBarProps {
                query: &state.query,
                is_editing: self.searching,
                on_change: Action::SearchQueryChange,
            },
        );
        self.list.render(
            frame,
            columns[0],
            DexListProps {
                state,
                is_focused: !self.searching,
            },
        );
        self.detail.render(
            frame,
            columns[1],
            DetailCardProps {
                detail: state.selected.as_ref(),
                is_loading: state.is_detail_loading,
                sprite: state.sprite.as_ref(),
                is_sprite_loading: state.is_sprite_loading,
            },
        );

        let hints = if self.searching {
            vec![
                StatusBarHint::new("Enter", "apply"),
                StatusBarHint::new("Esc", "clear"),
                StatusBarHint::new("Bksp", "delete"),
            ]
        } else {
            vec![
                StatusBarHint::new("j/k", "move"),
                StatusBarHint::new("Enter", "details"),
                StatusBarHint::new("/", "search"),
                StatusBarHint::new("r", "refresh"),
                StatusBarHint::new("q", "quit"),
            ]
        };
        let status = if state.is_busy() { "Fetching..." } else { "" };
        let status_items = [StatusBarItem::span(Span::styled(
            status,
            Style::default().fg(ACCENT_GOLD),
        ))];

        let mut status_bar = StatusBar::new();
        <StatusBar as Component<Action>>::render(
            &mut status_bar,
            frame,
            rows[2],
            StatusBarProps {
                left: StatusBarSection::empty(),
                center: StatusBarSection::hints(&hints),
                right: StatusBarSection::items(&status_items),
                style: StatusBarStyle::default(),
                is_focused: false,
            },
        );
    }
}
