use crossterm::event::KeyCode;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use tui_dispatch::EventKind;

use super::{Component, ACCENT_GOLD, ACCENT_TEAL, TEXT_DIM, TEXT_MAIN};
use crate::action::Action;

const PLACEHOLDER: &str = "Search by name or id";

/// Query input; emits the full new query on every edit
#[derive(Default)]
pub struct SearchBar;

pub struct SearchBarProps<'a> {
    pub query: &'a str,
    pub is_editing: bool,
    pub on_change: fn(String) -> Action,
}

impl Component<Action> for SearchBar {
    type Props<'a> = SearchBarProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_editing {
            return None;
        }

        let EventKind::Key(key) = event else {
            return None;
        };

        match key.code {
            KeyCode::Char(ch) => {
                let mut query = props.query.to_string();
                query.push(ch);
                Some((props.on_change)(query))
            }
            KeyCode::Backspace => {
                let mut query = props.query.to_string();
                match query.pop() {
                    Some(_) => Some((props.on_change)(query)),
                    None => None,
                }
            }
            _ => None,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let title_style = Style::default()
            .fg(ACCENT_TEAL)
            .add_modifier(Modifier::BOLD);

        let input = if props.is_editing {
            Span::styled(format!("{}_", props.query), Style::default().fg(ACCENT_GOLD))
        } else if props.query.is_empty() {
            Span::styled(PLACEHOLDER, Style::default().fg(TEXT_DIM))
        } else {
            Span::styled(props.query.to_string(), Style::default().fg(TEXT_MAIN))
        };

        let border = if props.is_editing { ACCENT_GOLD } else { TEXT_DIM };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border))
            .title(Span::styled("POKEDEX", title_style));
        let paragraph = Paragraph::new(Line::from(vec![Span::raw("/ "), input])).block(block);
        frame.render_widget(paragraph, area);
    }
}
