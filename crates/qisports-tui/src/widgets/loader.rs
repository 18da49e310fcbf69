use qisports_core::dom::Property;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Clear, Paragraph},
    Frame,
};

use crate::app::App;

/// Full-screen page transition overlay
pub struct LoaderWidget;

impl LoaderWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let doc = app.site.document();
        let theme = &app.theme;
        let loader = app.site.shell().loader;

        let scalar = |id, property| {
            doc.value(id, property)
                .and_then(|v| v.as_scalar())
                .unwrap_or(0.0)
        };
        let overlay = scalar(loader.overlay, Property::Opacity);
        if overlay <= 0.0 {
            return;
        }
        let logo = scalar(loader.logo, Property::Opacity);
        let caption = scalar(loader.caption, Property::Opacity);
        // caption y is in document pixels; one row per px_per_row
        let caption_shift = (scalar(loader.caption, Property::Y) / app.px_per_row()).round() as i32;

        let background = theme.fade(theme.navy, overlay);
        let brand = doc
            .get(loader.logo)
            .and_then(|el| el.text.clone())
            .unwrap_or_default();
        let loading = doc
            .get(loader.caption)
            .and_then(|el| el.text.clone())
            .unwrap_or_default();

        let middle = area.height / 2;
        let mut lines = vec![Line::default(); area.height as usize];
        if let Some(line) = lines.get_mut(middle.saturating_sub(1) as usize) {
            *line = Line::from(Span::styled(
                brand,
                Style::default()
                    .fg(theme.fade(theme.gold, logo * overlay))
                    .add_modifier(Modifier::BOLD),
            ));
        }
        let caption_row = (middle as i32 + 1 + caption_shift).max(0) as usize;
        if let Some(line) = lines.get_mut(caption_row) {
            *line = Line::from(Span::styled(
                loading,
                Style::default().fg(theme.fade(theme.fg1, caption * overlay)),
            ));
        }

        frame.render_widget(Clear, area);
        let paragraph = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::default().style(Style::default().bg(background)));
        frame.render_widget(paragraph, area);
    }
}
