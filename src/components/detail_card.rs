use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use tui_dispatch::EventKind;

use super::{Component, ACCENT_GOLD, ACCENT_TEAL, TEXT_DIM, TEXT_MAIN};
use crate::action::Action;
use crate::sprite::{SpriteImage, DETAIL_IMAGE_ID};
use crate::sprite_backend::{Placement, SpriteOverlay};
use crate::state::PokemonDetail;

/// Columns reserved for the sprite
const SPRITE_COLS: u16 = 18;
/// Narrower panels show text only
const MIN_WIDTH_FOR_SPRITE: u16 = 40;

/// Detail panel for the selected pokemon (render only).
///
/// The sprite itself is drawn by the terminal backend; the card only decides
/// where it goes and publishes that on its [`SpriteOverlay`].
#[derive(Default)]
pub struct DetailCard {
    overlay: SpriteOverlay,
}

#[derive(Clone, Copy)]
pub struct DetailCardProps<'a> {
    pub detail: Option<&'a PokemonDetail>,
    pub is_loading: bool,
    pub sprite: Option<&'a SpriteImage>,
    pub is_sprite_loading: bool,
}

impl DetailCard {
    pub fn with_overlay(overlay: SpriteOverlay) -> Self {
        Self { overlay }
    }

    pub fn overlay(&self) -> &SpriteOverlay {
        &self.overlay
    }

    fn render_sprite(&self, frame: &mut Frame, area: Rect, props: DetailCardProps<'_>) {
        if let Some(sprite) = props.sprite {
            let (cols, rows) = sprite.fit(area.width, area.height);
            self.overlay.place(Placement {
                x: area.x + area.width.saturating_sub(cols) / 2,
                y: area.y,
                sequence: sprite.kitty_sequence(cols, rows, DETAIL_IMAGE_ID),
            });
            return;
        }

        self.overlay.clear();
        let label = if props.is_sprite_loading {
            "[loading sprite]"
        } else {
            "[no sprite]"
        };
        frame.render_widget(
            Paragraph::new(label)
                .alignment(Alignment::Center)
                .style(Style::default().fg(TEXT_DIM)),
            area,
        );
    }
}

impl Component<Action> for DetailCard {
    type Props<'a> = DetailCardProps<'a>;

    fn handle_event(
        &mut self,
        _event: &EventKind,
        _props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        None::<Action>
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(TEXT_DIM))
            .title("DATA");
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let detail = match props.detail {
            Some(detail) if !props.is_loading => detail,
            _ => {
                self.overlay.clear();
                let text = if props.is_loading {
                    Text::styled("Loading details...", Style::default().fg(ACCENT_GOLD))
                } else {
                    Text::styled(
                        "Select a Pokemon to view details.",
                        Style::default().fg(TEXT_DIM),
                    )
                };
                frame.render_widget(Paragraph::new(text).wrap(Wrap { trim: true }), inner);
                return;
            }
        };

        let text_area = if inner.width >= MIN_WIDTH_FOR_SPRITE {
            let [sprite_area, text_area] =
                Layout::horizontal([Constraint::Length(SPRITE_COLS), Constraint::Min(0)])
                    .spacing(1)
                    .areas(inner);
            self.render_sprite(frame, sprite_area, props);
            text_area
        } else {
            self.overlay.clear();
            inner
        };

        frame.render_widget(
            Paragraph::new(detail_text(detail)).wrap(Wrap { trim: true }),
            text_area,
        );
    }
}

fn detail_text(detail: &PokemonDetail) -> Text<'static> {
    let label = Style::default().fg(TEXT_DIM);
    let value = Style::default().fg(TEXT_MAIN);
    let types = if detail.types.is_empty() {
        "-".to_string()
    } else {
        detail.types.join(", ")
    };

    Text::from(vec![
        Line::from(vec![
            Span::styled(
                detail.name.clone(),
                Style::default()
                    .fg(ACCENT_TEAL)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::styled(format!("#{:03}", detail.id), Style::default().fg(ACCENT_GOLD)),
        ]),
        Line::raw(""),
        Line::from(vec![
            Span::styled("Height: ", label),
            Span::styled(detail.height.to_string(), value),
            Span::styled(" | Weight: ", label),
            Span::styled(detail.weight.to_string(), value),
        ]),
        Line::from(vec![Span::styled("Types: ", label), Span::styled(types, value)]),
        Line::raw(""),
        Line::from(vec![
            Span::styled("Sprite: ", label),
            Span::styled(detail.sprite_url.clone(), value),
        ]),
    ])
}
