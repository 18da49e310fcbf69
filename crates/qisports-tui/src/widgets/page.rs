use qisports_core::dom::{ArrowDirection, Document, ElementId, ElementKind, HeadingLevel, Property};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::app::App;
use crate::theme::Theme;

/// Scrolling document view below the header bar
pub struct PageWidget;

impl PageWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let lines = page_lines(app, area.height, area.width);
        let paragraph = Paragraph::new(lines).style(Style::default().bg(app.theme.bg0));
        frame.render_widget(paragraph, area);
    }
}

/// Opacity and vertical offset inherited from an element and its ancestors
fn transform(doc: &Document, id: ElementId) -> (f64, f64) {
    let mut opacity = 1.0;
    let mut dy = 0.0;
    let mut cursor = Some(id);
    while let Some(current) = cursor {
        let Some(el) = doc.get(current) else {
            break;
        };
        if el.kind == ElementKind::Window {
            break;
        }
        opacity *= el.style.opacity;
        dy += el.style.y;
        cursor = el.parent;
    }
    (opacity, dy)
}

/// Rows of text for the visible part of the page
pub fn page_lines(app: &App, rows: u16, width: u16) -> Vec<Line<'static>> {
    let site = &app.site;
    let doc = site.document();
    let theme = &app.theme;
    let px = app.px_per_row();
    let scroll = site.scroll_y();

    let mut grid: Vec<Vec<Span<'static>>> = vec![Vec::new(); rows as usize];
    let mut place = |top: f64, spans: Vec<Span<'static>>| {
        let row = ((top - scroll) / px).floor();
        if row < 0.0 || row >= rows as f64 || spans.is_empty() {
            return;
        }
        let line = &mut grid[row as usize];
        if !line.is_empty() {
            line.push(Span::styled("  │  ", Style::default().fg(theme.grey0)));
        }
        line.extend(spans);
    };

    let mut dots_drawn = false;
    for id in doc.descendants(site.shell().main) {
        let Some(el) = doc.get(id) else {
            continue;
        };
        let (opacity, dy) = transform(doc, id);
        if opacity <= 0.02 {
            continue;
        }
        let top = el.layout.top + dy;
        let text = el.text.clone().unwrap_or_default();

        match &el.kind {
            ElementKind::Heading(level) => {
                let color = match level {
                    HeadingLevel::H1 => theme.fg0,
                    _ => theme.heading,
                };
                let style = Style::default().fg(theme.fade(color, opacity)).add_modifier(Modifier::BOLD);
                let words = doc.kind_in(id, &ElementKind::Word);
                if words.is_empty() {
                    place(top, vec![Span::styled(text, style)]);
                } else {
                    place(top, word_spans(doc, &words, style, theme, opacity));
                }
            }
            ElementKind::Paragraph => {
                place(top, vec![Span::styled(text, Style::default().fg(theme.fade(theme.fg1, opacity)))]);
            }
            ElementKind::Link { .. } => {
                let style = Style::default()
                    .fg(theme.fade(theme.link, opacity))
                    .add_modifier(Modifier::UNDERLINED);
                place(top, vec![Span::styled(format!("→ {}", text), style)]);
            }
            ElementKind::Footer => {
                place(top, vec![Span::styled(text, Style::default().fg(theme.fade(theme.grey1, opacity)))]);
            }
            ElementKind::CarouselStrip => {
                place(top + 2.0 * px, slide_spans(app, id, opacity));
            }
            ElementKind::CarouselDot { .. } if !dots_drawn => {
                dots_drawn = true;
                if let Some(parent) = el.parent {
                    place(top, dot_spans(doc, parent, theme));
                }
            }
            _ => {}
        }
    }

    grid.into_iter().map(|spans| truncate_line(spans, width as usize)).collect()
}

/// Heading words, each faded by how far its mask has revealed it
fn word_spans(
    doc: &Document,
    words: &[ElementId],
    style: Style,
    theme: &Theme,
    opacity: f64,
) -> Vec<Span<'static>> {
    words
        .iter()
        .filter_map(|w| {
            let el = doc.get(*w)?;
            let text = el.text.clone().unwrap_or_default();
            let hidden = doc
                .value(*w, Property::YPercent)
                .and_then(|v| v.as_scalar())
                .unwrap_or(0.0)
                .clamp(0.0, 100.0)
                / 100.0;
            if hidden >= 0.99 {
                return Some(Span::raw(" ".repeat(text.width())));
            }
            let fg = match style.fg {
                Some(color) => theme.fade(color, (1.0 - hidden) * opacity),
                None => theme.fg0,
            };
            Some(Span::styled(text, style.fg(fg)))
        })
        .collect()
}

/// The slide the strip currently shows, with a marker while it is moving
fn slide_spans(app: &App, strip: ElementId, opacity: f64) -> Vec<Span<'static>> {
    let doc = app.site.document();
    let theme = &app.theme;
    let slides: Vec<String> = doc
        .children(strip)
        .iter()
        .filter_map(|id| match doc.get(*id).map(|el| &el.kind) {
            Some(ElementKind::Slide { source }) => Some(source.clone()),
            _ => None,
        })
        .collect();
    if slides.is_empty() {
        return Vec::new();
    }

    let width = app.site.runtime().viewport().width.max(1.0);
    let x = doc.value(strip, Property::X).and_then(|v| v.as_scalar()).unwrap_or(0.0);
    let position = (-x / width).clamp(0.0, (slides.len() - 1) as f64);
    let index = position.round() as usize;
    let moving = (position - position.round()).abs() > 0.01;

    let style = Style::default().fg(theme.fade(theme.grey1, opacity));
    let mut spans = vec![Span::styled(
        format!("[ slide {}/{}: {} ]", index + 1, slides.len(), slides[index]),
        style,
    )];
    if moving {
        spans.push(Span::styled(" ⇄", Style::default().fg(theme.accent)));
    }
    spans
}

/// Carousel controls laid out as left arrow, dots by slide index, right arrow
fn dot_spans(doc: &Document, hero: ElementId, theme: &Theme) -> Vec<Span<'static>> {
    let mut left = false;
    let mut right = false;
    let mut dots: Vec<(usize, bool)> = Vec::new();
    for el in doc.children(hero).iter().filter_map(|id| doc.get(*id)) {
        match el.kind {
            ElementKind::CarouselArrow(ArrowDirection::Left) => left = true,
            ElementKind::CarouselArrow(ArrowDirection::Right) => right = true,
            ElementKind::CarouselDot { index } => dots.push((index, el.active)),
            _ => {}
        }
    }
    dots.sort_by_key(|(index, _)| *index);

    let mut spans = Vec::with_capacity(dots.len() + 2);
    if left {
        spans.push(Span::styled("‹ ", Style::default().fg(theme.grey1)));
    }
    for (_, active) in dots {
        if active {
            spans.push(Span::styled("● ", Style::default().fg(theme.active_dot)));
        } else {
            spans.push(Span::styled("○ ", Style::default().fg(theme.grey0)));
        }
    }
    if right {
        spans.push(Span::styled("›", Style::default().fg(theme.grey1)));
    }
    spans
}

fn truncate_line(spans: Vec<Span<'static>>, width: usize) -> Line<'static> {
    let mut used = 0;
    let mut out = Vec::with_capacity(spans.len());
    for span in spans {
        let w = span.content.width();
        if used + w <= width {
            used += w;
            out.push(span);
            continue;
        }
        let mut text = String::new();
        for c in span.content.chars() {
            let cw = c.to_string().width();
            if used + cw > width {
                break;
            }
            used += cw;
            text.push(c);
        }
        out.push(Span::styled(text, span.style));
        break;
    }
    Line::from(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use qisports_core::{AppConfig, Site, SiteContent};
    use std::time::Duration;

    fn app() -> App {
        let site = Site::new(AppConfig::default(), SiteContent::default()).unwrap();
        App::new(site, Theme::default())
    }

    fn text(lines: &[Line<'static>]) -> String {
        lines
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_hero_fades_in() {
        let mut app = app();
        let before = text(&page_lines(&app, 40, 120));
        assert!(!before.contains("MANAGEMENT"));
        assert!(before.contains("[ slide 1/3"));

        app.tick(Duration::from_millis(2500));
        let after = text(&page_lines(&app, 40, 120));
        assert!(after.contains("MANAGEMENT"));
        assert!(after.contains("● ○ ○"));
    }

    #[test]
    fn test_slide_label_follows_strip() {
        let mut app = app();
        app.site.next_slide();
        app.tick(Duration::from_millis(1000));
        assert!(text(&page_lines(&app, 40, 120)).contains("[ slide 2/3"));
    }

    #[test]
    fn test_heading_words_revealed_on_scroll() {
        let mut app = app();
        app.site.navigate("#services").unwrap();
        app.tick(Duration::from_millis(3000));
        assert!(text(&page_lines(&app, 40, 120)).contains("Our Services"));
    }

    #[test]
    fn test_dot_row_ignores_child_order() {
        let theme = Theme::default();
        let mut doc = Document::new();
        let hero = doc.append(doc.window(), ElementKind::Section);
        doc.append(hero, ElementKind::CarouselArrow(ArrowDirection::Right));
        doc.append(hero, ElementKind::CarouselDot { index: 2 });
        doc.append(hero, ElementKind::CarouselArrow(ArrowDirection::Left));
        let active = doc.append(hero, ElementKind::CarouselDot { index: 1 });
        doc.append(hero, ElementKind::CarouselDot { index: 0 });
        if let Some(el) = doc.get_mut(active) {
            el.active = true;
        }

        let row: String = dot_spans(&doc, hero, &theme)
            .iter()
            .map(|s| s.content.as_ref())
            .collect();
        assert_eq!(row, "‹ ○ ● ○ ›");
    }

    #[test]
    fn test_lines_fit_width() {
        let mut app = app();
        app.tick(Duration::from_millis(2500));
        for line in page_lines(&app, 40, 30) {
            assert!(line.width() <= 30);
        }
    }
}
