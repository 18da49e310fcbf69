use qisports_core::anim::Rgba;
use qisports_core::dom::{ElementKind, Property};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::App;
use crate::theme::Theme;

/// Sticky header bar, colored from the header's animated style
pub struct HeaderWidget;

impl HeaderWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let doc = app.site.document();
        let theme = &app.theme;
        let header = app.site.shell().header;

        let background = doc
            .value(header, Property::Background)
            .and_then(|v| v.as_color())
            .map(|c| Theme::over(theme.bg0, c))
            .unwrap_or(theme.bg0);
        let shadow = doc
            .value(header, Property::ShadowAlpha)
            .and_then(|v| v.as_scalar())
            .unwrap_or(0.0);

        let mut spans = vec![Span::raw(" ")];
        let mut link_index = 0;
        for id in doc.children(header) {
            let Some(el) = doc.get(*id) else {
                continue;
            };
            let color = Theme::over(background, el.style.color);
            let text = el.text.clone().unwrap_or_default();
            match el.kind {
                ElementKind::LogoText => {
                    spans.push(Span::styled(
                        text,
                        Style::default().fg(color).add_modifier(Modifier::BOLD),
                    ));
                    spans.push(Span::raw("    "));
                }
                ElementKind::NavLink { .. } => {
                    let mut style = Style::default().fg(color);
                    if link_index == app.selected_link {
                        style = style.add_modifier(Modifier::REVERSED);
                    }
                    spans.push(Span::styled(format!(" {} ", text), style));
                    spans.push(Span::raw(" "));
                    link_index += 1;
                }
                _ => {}
            }
        }

        // shadow shows as a rule under the bar once mostly opaque
        let borders = if shadow >= 0.5 { Borders::BOTTOM } else { Borders::NONE };
        let block = Block::default()
            .borders(borders)
            .border_style(Style::default().fg(Theme::over(background, Rgba::new(0, 0, 0, 0.3))))
            .style(Style::default().bg(background));

        let paragraph = Paragraph::new(Line::from(spans)).block(block);
        frame.render_widget(paragraph, area);
    }
}
