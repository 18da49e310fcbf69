use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::theme::Theme;

const BINDINGS: &[(&str, &str)] = &[
    ("j / k", "scroll"),
    ("ctrl-d / ctrl-u", "half page"),
    ("gg / G", "top / bottom"),
    ("h / l", "previous / next slide"),
    ("1-9", "go to slide"),
    ("tab / shift-tab", "select nav link"),
    ("enter", "follow nav link"),
    ("space", "pause clock"),
    ("q", "quit"),
];

pub struct PopupWidget;

impl PopupWidget {
    /// Key binding reference
    pub fn render_help(frame: &mut Frame, theme: &Theme) {
        let area = frame.area();

        let popup_width = 44u16.min(area.width.saturating_sub(4));
        let popup_height = (BINDINGS.len() as u16 + 2).min(area.height.saturating_sub(2));
        let popup_area = centered_rect(popup_width, popup_height, area);

        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title(" Keys ")
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.accent))
            .style(Style::default().bg(theme.bg1));

        let lines: Vec<Line> = BINDINGS
            .iter()
            .map(|(keys, what)| {
                Line::from(vec![
                    Span::styled(
                        format!("{:>16}", keys),
                        Style::default().fg(theme.gold).add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(format!("  {}", what), Style::default().fg(theme.fg0)),
                ])
            })
            .collect();

        frame.render_widget(Paragraph::new(lines).block(block), popup_area);
    }
}

/// Helper function to create a centered rect
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}
