use crossterm::event::KeyCode;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};
use tui_dispatch::EventKind;

use super::{Component, ACCENT_GOLD, ACCENT_RED, ACCENT_TEAL, BG_HIGHLIGHT, TEXT_DIM, TEXT_MAIN};
use crate::action::Action;
use crate::state::{AppState, PokemonSummary};

/// Filtered pokemon list with a local cursor.
///
/// Shows the loading or error panel instead of the list while either applies.
#[derive(Default)]
pub struct DexList {
    cursor: usize,
}

pub struct DexListProps<'a> {
    pub state: &'a AppState,
    pub is_focused: bool,
}

impl DexList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cursor position, clamped to the number of visible entries
    pub fn cursor(&self, len: usize) -> usize {
        self.cursor.min(len.saturating_sub(1))
    }

    fn move_cursor(&mut self, delta: isize, len: usize) {
        let current = self.cursor(len) as isize;
        let max = len.saturating_sub(1) as isize;
        self.cursor = (current + delta).clamp(0, max) as usize;
    }
}

impl Component<Action> for DexList {
    type Props<'a> = DexListProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused || showing_status(props.state) {
            return None;
        }

        let EventKind::Key(key) = event else {
            return None;
        };

        let entries = &props.state.filtered_items;
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.move_cursor(-1, entries.len());
                None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.move_cursor(1, entries.len());
                None
            }
            KeyCode::PageUp => {
                self.move_cursor(-10, entries.len());
                None
            }
            KeyCode::PageDown => {
                self.move_cursor(10, entries.len());
                None
            }
            KeyCode::Home | KeyCode::Char('g') => {
                self.cursor = 0;
                None
            }
            KeyCode::End | KeyCode::Char('G') => {
                self.cursor = entries.len().saturating_sub(1);
                None
            }
            KeyCode::Enter => entries
                .get(self.cursor(entries.len()))
                .map(|entry| Action::DetailFetch(entry.name.clone())),
            _ => None,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let state = props.state;
        let border = if props.is_focused { ACCENT_TEAL } else { TEXT_DIM };
        let title = format!("DEX {}/{}", state.filtered_items.len(), state.items.len());
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border))
            .title(title);

        if state.is_loading {
            let paragraph = Paragraph::new("Loading Pokemon...")
                .style(Style::default().fg(ACCENT_GOLD))
                .block(block);
            frame.render_widget(paragraph, area);
            return;
        }

        if let Some(message) = &state.error_message {
            let text = vec![
                Line::styled(message.clone(), Style::default().fg(ACCENT_RED)),
                Line::raw(""),
                Line::styled("Press r to try again", Style::default().fg(TEXT_DIM)),
            ];
            let paragraph = Paragraph::new(text)
                .block(block)
                .wrap(Wrap { trim: true });
            frame.render_widget(paragraph, area);
            return;
        }

        if state.filtered_items.is_empty() {
            let message = if state.query.trim().is_empty() {
                "No Pokemon loaded.".to_string()
            } else {
                format!("No Pokemon match \"{}\".", state.query.trim())
            };
            let paragraph = Paragraph::new(message)
                .style(Style::default().fg(TEXT_DIM))
                .block(block);
            frame.render_widget(paragraph, area);
            return;
        }

        let items: Vec<ListItem> = state.filtered_items.iter().map(dex_item).collect();
        let list = List::new(items)
            .block(block)
            .style(Style::default().fg(TEXT_MAIN))
            .highlight_style(
                Style::default()
                    .bg(BG_HIGHLIGHT)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("> ");
        let mut list_state =
            ListState::default().with_selected(Some(self.cursor(state.filtered_items.len())));
        frame.render_stateful_widget(list, area, &mut list_state);
    }
}

fn showing_status(state: &AppState) -> bool {
    state.is_loading || state.error_message.is_some()
}

fn dex_item(entry: &PokemonSummary) -> ListItem<'static> {
    ListItem::new(format!("#{:03} {}", entry.id, entry.name))
}
