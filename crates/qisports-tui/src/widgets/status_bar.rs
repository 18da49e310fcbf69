use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::app::App;

pub struct StatusBarWidget;

impl StatusBarWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;
        let status_text = status_text(app);

        let help_hint = " q:quit j/k:scroll h/l:slide tab/enter:links space:pause ?:help ";
        let padding_len = (area.width as usize)
            .saturating_sub(status_text.width() + help_hint.width());

        let line = Line::from(vec![
            Span::styled(status_text, Style::default().fg(theme.fg0).bg(theme.bg2)),
            Span::styled(" ".repeat(padding_len), Style::default().bg(theme.bg2)),
            Span::styled(help_hint, Style::default().fg(theme.grey1).bg(theme.bg2)),
        ]);

        frame.render_widget(Paragraph::new(line), area);
    }
}

pub fn status_text(app: &App) -> String {
    if let Some(msg) = &app.status_message {
        return format!(" {}", msg);
    }
    let site = &app.site;
    let slide = site
        .carousel()
        .map(|(current, total)| format!(" | Slide {}/{}", current + 1, total))
        .unwrap_or_default();
    format!(
        " {}{} | {} | {:.0}/{:.0}px{} | Header: {:?} | Loader: {:?} | {:.1}s",
        if app.paused { "PAUSED | " } else { "" },
        site.page().title(),
        site.location(),
        site.scroll_y(),
        site.max_scroll(),
        slide,
        site.header_state(),
        site.loader_phase(),
        site.now().as_secs_f64(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Action;
    use crate::theme::Theme;
    use qisports_core::{AppConfig, Site, SiteContent};

    #[test]
    fn test_status_text() {
        let site = Site::new(AppConfig::default(), SiteContent::default()).unwrap();
        let mut app = App::new(site, Theme::default());
        let text = status_text(&app);
        assert!(text.contains("Slide 1/3"));
        assert!(text.contains("Loader: Hidden"));

        app.apply(Action::TogglePause).unwrap();
        assert_eq!(status_text(&app), " Paused");
        app.apply(Action::ScrollDown).unwrap();
        assert!(status_text(&app).contains("PAUSED"));
    }
}
