//! Page builders
//!
//! Turn `SiteContent` into document elements with layout boxes. Layout is a
//! simple block flow: elements stack vertically inside sections, cards form
//! a grid whose column count follows the viewport width, and text height is
//! estimated from its length.

use serde::Serialize;

use crate::content::SiteContent;
use crate::dom::{ArrowDirection, Document, ElementId, ElementKind, HeadingLevel, Rect};
use crate::runtime::Viewport;

const SECTION_PADDING: f64 = 96.0;
const HEADING_HEIGHT: f64 = 64.0;
const LINE_HEIGHT: f64 = 28.0;
const CHAR_WIDTH: f64 = 9.0;
const GAP: f64 = 24.0;
const CARD_PADDING: f64 = 24.0;
const CARD_IMAGE_HEIGHT: f64 = 224.0;
const MAX_CONTENT_WIDTH: f64 = 1152.0;
const FOOTER_HEIGHT: f64 = 120.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Page {
    Home,
    About,
    Contact,
}

impl Page {
    /// Page for a route path; `None` for unknown paths
    pub fn from_path(path: &str) -> Option<Page> {
        match path.trim_end_matches('/') {
            "" => Some(Page::Home),
            "/about" => Some(Page::About),
            "/contact" => Some(Page::Contact),
            _ => None,
        }
    }

    pub fn path(&self) -> &'static str {
        match self {
            Page::Home => "/",
            Page::About => "/about",
            Page::Contact => "/contact",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Page::Home => "Home",
            Page::About => "About",
            Page::Contact => "Contact",
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct LoaderElements {
    pub overlay: ElementId,
    pub logo: ElementId,
    pub caption: ElementId,
}

/// Elements that live for the whole session
#[derive(Debug, Clone, Copy)]
pub struct Shell {
    pub header: ElementId,
    pub main: ElementId,
    pub loader: LoaderElements,
}

/// Header, an empty main element and the hidden loader overlay
pub fn build_shell(
    doc: &mut Document,
    content: &SiteContent,
    viewport: Viewport,
    header_height: f64,
) -> Shell {
    let window = doc.window();

    let header = doc.append(window, ElementKind::Header);
    doc.set_layout(header, Rect::new(0.0, header_height));
    let logo = doc.append(header, ElementKind::LogoText);
    doc.set_text(logo, content.brand.clone());
    doc.set_layout(logo, Rect::new(0.0, header_height));
    for nav in &content.nav_links {
        let link = doc.append(header, ElementKind::NavLink { href: nav.href.clone() });
        doc.set_text(link, nav.name.clone());
        doc.set_layout(link, Rect::new(0.0, header_height));
    }

    let main = doc.append(window, ElementKind::Main);

    let overlay = doc.append(window, ElementKind::LoaderOverlay);
    doc.set_layout(overlay, Rect::new(0.0, viewport.height));
    let logo = doc.append(overlay, ElementKind::LoaderLogo);
    doc.set_text(logo, content.brand.clone());
    doc.set_layout(logo, Rect::new(viewport.height / 2.0 - 80.0, 80.0));
    let caption = doc.append(overlay, ElementKind::LoaderCaption);
    doc.set_text(caption, "Loading...");
    doc.set_layout(caption, Rect::new(viewport.height / 2.0 + 24.0, LINE_HEIGHT));

    // hidden until the first route change
    for id in [overlay, logo, caption] {
        if let Some(el) = doc.get_mut(id) {
            el.style.opacity = 0.0;
        }
    }

    Shell {
        header,
        main,
        loader: LoaderElements { overlay, logo, caption },
    }
}

/// Replace the contents of `main` with a page
///
/// Returns the page height.
pub fn build_page(
    doc: &mut Document,
    main: ElementId,
    page: Page,
    content: &SiteContent,
    viewport: Viewport,
    header_height: f64,
) -> f64 {
    doc.clear_children(main);

    let mut flow = Flow::new(viewport);
    match page {
        Page::Home => build_home(doc, main, &mut flow, content, viewport),
        Page::About => {
            flow.cursor = header_height + 48.0;
            build_about(doc, main, &mut flow, content);
        }
        Page::Contact => {
            flow.cursor = header_height + 48.0;
            build_contact(doc, main, &mut flow, content);
        }
    }

    let footer = doc.append(main, ElementKind::Footer);
    doc.set_text(footer, content.footer.clone());
    doc.set_layout(footer, Rect::new(flow.cursor, FOOTER_HEIGHT));
    let height = flow.cursor + FOOTER_HEIGHT;
    doc.set_layout(main, Rect::new(0.0, height));
    height
}

/// Vertical layout cursor
#[derive(Debug, Clone, Copy)]
struct Flow {
    cursor: f64,
    width: f64,
    columns: usize,
}

impl Flow {
    fn new(viewport: Viewport) -> Self {
        let width = (viewport.width - 32.0).clamp(CHAR_WIDTH, MAX_CONTENT_WIDTH);
        let columns = if viewport.width >= 1024.0 {
            3
        } else if viewport.width >= 768.0 {
            2
        } else {
            1
        };
        Self { cursor: 0.0, width, columns }
    }

    fn inner(&self, top: f64, width: f64) -> Self {
        Self { cursor: top, width, columns: 1 }
    }

    fn block(
        &mut self,
        doc: &mut Document,
        parent: ElementId,
        kind: ElementKind,
        text: &str,
        height: f64,
    ) -> ElementId {
        let id = doc.append(parent, kind);
        doc.set_text(id, text);
        doc.set_layout(id, Rect::new(self.cursor, height));
        self.cursor += height + GAP;
        id
    }

    fn heading(&mut self, doc: &mut Document, parent: ElementId, level: HeadingLevel, text: &str) -> ElementId {
        self.block(doc, parent, ElementKind::Heading(level), text, HEADING_HEIGHT)
    }

    fn paragraph(&mut self, doc: &mut Document, parent: ElementId, text: &str) -> ElementId {
        let height = text_height(text, self.width);
        self.block(doc, parent, ElementKind::Paragraph, text, height)
    }

    fn link(&mut self, doc: &mut Document, parent: ElementId, name: &str, href: &str) -> ElementId {
        let kind = ElementKind::Link { href: href.to_string() };
        self.block(doc, parent, kind, name, 48.0)
    }

    /// Open a section at the cursor; `fill` adds its children
    fn section(
        &mut self,
        doc: &mut Document,
        parent: ElementId,
        dom_id: &str,
        fill: impl FnOnce(&mut Flow, &mut Document, ElementId),
    ) -> ElementId {
        let section = doc.append(parent, ElementKind::Section);
        doc.set_dom_id(section, dom_id);
        let top = self.cursor;
        self.cursor += SECTION_PADDING;
        fill(self, doc, section);
        self.cursor = self.cursor - GAP + SECTION_PADDING;
        doc.set_layout(section, Rect::new(top, self.cursor - top));
        section
    }

    /// Grid of cards; `fill` lays out one card's children in its own flow
    fn cards<T>(
        &mut self,
        doc: &mut Document,
        parent: ElementId,
        items: &[T],
        fill: impl Fn(&mut Flow, &mut Document, ElementId, &T),
    ) -> Vec<ElementId> {
        let columns = self.columns.max(1);
        let card_width = (self.width - GAP * (columns - 1) as f64) / columns as f64;
        let mut cards = Vec::with_capacity(items.len());

        for row in items.chunks(columns) {
            let row_top = self.cursor;
            let mut row_height: f64 = 0.0;
            let mut row_cards = Vec::with_capacity(row.len());
            for item in row {
                let card = doc.append(parent, ElementKind::Card);
                let mut inner = self.inner(row_top + CARD_PADDING, card_width - 2.0 * CARD_PADDING);
                fill(&mut inner, doc, card, item);
                row_height = row_height.max(inner.cursor - GAP + CARD_PADDING - row_top);
                row_cards.push(card);
            }
            for card in &row_cards {
                doc.set_layout(*card, Rect::new(row_top, row_height));
            }
            cards.extend(row_cards);
            self.cursor = row_top + row_height + GAP;
        }
        cards
    }
}

fn text_height(text: &str, width: f64) -> f64 {
    let per_line = (width / CHAR_WIDTH).floor().max(1.0);
    let lines = (text.chars().count() as f64 / per_line).ceil().max(1.0);
    lines * LINE_HEIGHT
}

fn build_home(doc: &mut Document, main: ElementId, flow: &mut Flow, content: &SiteContent, viewport: Viewport) {
    let vh = viewport.height;

    let hero = doc.append(main, ElementKind::Section);
    doc.set_dom_id(hero, "home");
    doc.set_layout(hero, Rect::new(0.0, vh));

    let strip = doc.append(hero, ElementKind::CarouselStrip);
    doc.set_layout(strip, Rect::new(0.0, vh));
    for source in &content.hero_slides {
        let slide = doc.append(strip, ElementKind::Slide { source: source.clone() });
        doc.set_layout(slide, Rect::new(0.0, vh));
    }

    let hero_content = doc.append(hero, ElementKind::HeroContent);
    let mut inner = flow.inner(vh * 0.25, flow.width);
    inner.paragraph(doc, hero_content, &content.hero.kicker);
    for line in &content.hero.title_lines {
        inner.heading(doc, hero_content, HeadingLevel::H1, line);
    }
    inner.paragraph(doc, hero_content, &content.hero.tagline);
    inner.link(doc, hero_content, &content.hero.cta.name, &content.hero.cta.href);
    doc.set_layout(hero_content, Rect::new(vh * 0.25, inner.cursor - vh * 0.25));

    if content.hero_slides.len() > 1 {
        for index in 0..content.hero_slides.len() {
            let dot = doc.append(hero, ElementKind::CarouselDot { index });
            doc.set_layout(dot, Rect::new(vh - 44.0, 12.0));
        }
        for direction in [ArrowDirection::Left, ArrowDirection::Right] {
            let arrow = doc.append(hero, ElementKind::CarouselArrow(direction));
            doc.set_layout(arrow, Rect::new(vh / 2.0 - 20.0, 40.0));
        }
    }
    flow.cursor = vh;

    flow.section(doc, main, "services", |flow, doc, section| {
        flow.heading(doc, section, HeadingLevel::H2, "Our Services");
        flow.cards(doc, section, &content.services, |card_flow, doc, card, service| {
            card_flow.heading(doc, card, HeadingLevel::H3, &service.title);
            card_flow.paragraph(doc, card, &service.description);
        });
    });

    flow.section(doc, main, "work", |flow, doc, section| {
        flow.heading(doc, section, HeadingLevel::H2, "Our Work");
        flow.cards(doc, section, &content.work, |card_flow, doc, card, work| {
            card_flow.cursor += CARD_IMAGE_HEIGHT - CARD_PADDING;
            card_flow.heading(doc, card, HeadingLevel::H3, &work.category);
            for project in &work.projects {
                card_flow.paragraph(doc, card, project);
            }
        });
    });

    flow.section(doc, main, "csr", |flow, doc, section| {
        flow.heading(doc, section, HeadingLevel::H2, "Community Impact");
        for paragraph in &content.community {
            flow.paragraph(doc, section, paragraph);
        }
        flow.link(doc, section, &content.community_cta.name, &content.community_cta.href);
    });
}

fn build_about(doc: &mut Document, main: ElementId, flow: &mut Flow, content: &SiteContent) {
    let about = &content.about;
    flow.section(doc, main, "about-content", |flow, doc, section| {
        flow.heading(doc, section, HeadingLevel::H2, &about.heading);
        if let Some((first, rest)) = about.paragraphs.split_first() {
            flow.paragraph(doc, section, first);
            flow.paragraph(doc, section, &about.registration);
            for paragraph in rest {
                flow.paragraph(doc, section, paragraph);
            }
        }

        flow.heading(doc, section, HeadingLevel::H3, "What We Do");
        let columns = flow.columns;
        flow.columns = 1;
        flow.cards(doc, section, &about.what_we_do, |card_flow, doc, card, audience| {
            card_flow.paragraph(doc, card, &format!("{}: {}", audience.label, audience.text));
        });
        flow.columns = columns;

        flow.heading(doc, section, HeadingLevel::H3, "Sponsorship Management Highlights");
        flow.cards(doc, section, &about.highlights, |card_flow, doc, card, name| {
            card_flow.paragraph(doc, card, name);
        });
    });
}

fn build_contact(doc: &mut Document, main: ElementId, flow: &mut Flow, content: &SiteContent) {
    let contact = &content.contact;
    flow.section(doc, main, "contact", |flow, doc, section| {
        flow.heading(doc, section, HeadingLevel::H2, "Get In Touch");
        flow.heading(doc, section, HeadingLevel::H3, "Contact Information");
        flow.paragraph(doc, section, &format!("Email: {}", contact.email));
        flow.paragraph(doc, section, &format!("Phone: {}", contact.phone));
        flow.paragraph(doc, section, &format!("Address: {}", contact.address));
    });
}

/// Runtime over a freshly built page at a 1280x800 viewport
#[cfg(test)]
pub(crate) fn test_runtime(page: Page, content: &SiteContent) -> (crate::runtime::Runtime, Shell) {
    let viewport = Viewport { width: 1280.0, height: 800.0 };
    let mut doc = Document::new();
    let shell = build_shell(&mut doc, content, viewport, 80.0);
    build_page(&mut doc, shell.main, page, content, viewport, 80.0);
    (crate::runtime::Runtime::new(doc, viewport), shell)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport() -> Viewport {
        Viewport { width: 1280.0, height: 800.0 }
    }

    fn home() -> (Document, Shell) {
        let mut doc = Document::new();
        let content = SiteContent::default();
        let shell = build_shell(&mut doc, &content, viewport(), 80.0);
        build_page(&mut doc, shell.main, Page::Home, &content, viewport(), 80.0);
        (doc, shell)
    }

    #[test]
    fn test_page_from_path() {
        assert_eq!(Page::from_path("/"), Some(Page::Home));
        assert_eq!(Page::from_path(""), Some(Page::Home));
        assert_eq!(Page::from_path("/about/"), Some(Page::About));
        assert_eq!(Page::from_path("/contact"), Some(Page::Contact));
        assert_eq!(Page::from_path("/blog"), None);
    }

    #[test]
    fn test_home_sections_stack() {
        let (doc, _) = home();
        let ids: Vec<_> = doc
            .sections()
            .into_iter()
            .filter_map(|s| doc.get(s).and_then(|el| el.dom_id.clone()))
            .collect();
        assert_eq!(ids, vec!["home", "services", "work", "csr"]);

        let mut previous_bottom = 0.0;
        for section in doc.sections() {
            let rect = doc.layout(section).unwrap();
            assert!(rect.top >= previous_bottom);
            assert!(rect.height > 0.0);
            previous_bottom = rect.bottom();
        }
        assert!(doc.height() > 800.0 * 3.0);
    }

    #[test]
    fn test_cards_laid_out_in_rows() {
        let (doc, _) = home();
        let services = doc.find_by_dom_id("services").unwrap();
        let cards = doc.kind_in(services, &ElementKind::Card);
        assert_eq!(cards.len(), 6);
        let tops: Vec<f64> = cards.iter().map(|c| doc.layout(*c).unwrap().top).collect();
        assert_eq!(tops[0], tops[2]);
        assert!(tops[3] > tops[0]);
        let section = doc.layout(services).unwrap();
        assert!(doc.layout(cards[5]).unwrap().bottom() <= section.bottom());
    }

    #[test]
    fn test_single_slide_has_no_controls() {
        let mut doc = Document::new();
        let content = SiteContent::default().with_hero_slides(vec!["/only.jpg".to_string()]);
        let shell = build_shell(&mut doc, &content, viewport(), 80.0);
        build_page(&mut doc, shell.main, Page::Home, &content, viewport(), 80.0);
        assert!(doc.first(|el| matches!(el.kind, ElementKind::CarouselDot { .. })).is_none());
        assert!(doc.first(|el| matches!(el.kind, ElementKind::CarouselArrow(_))).is_none());
    }

    #[test]
    fn test_rebuild_replaces_main() {
        let (mut doc, shell) = home();
        let content = SiteContent::default();
        build_page(&mut doc, shell.main, Page::About, &content, viewport(), 80.0);
        assert!(doc.find_by_dom_id("services").is_none());
        assert!(doc.find_by_dom_id("about-content").is_some());
        assert!(doc.header().is_some());
        assert_eq!(doc.header_height(), 80.0);
    }

    #[test]
    fn test_loader_starts_hidden() {
        let (doc, shell) = home();
        let overlay = doc.style(shell.loader.overlay).unwrap();
        assert!(!overlay.is_visible());
    }
}
