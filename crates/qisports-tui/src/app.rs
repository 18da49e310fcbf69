use std::time::Duration;

use anyhow::Result;
use qisports_core::content::NavLink;
use qisports_core::Site;
use tracing::debug;

use crate::input::Action;
use crate::theme::Theme;

/// Application mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Normal browsing mode
    Normal,
    /// Help overlay
    Help,
}

/// Preview state around a running site
pub struct App {
    pub site: Site,
    pub theme: Theme,
    pub mode: Mode,
    /// Nav link highlighted in the header bar
    pub selected_link: usize,
    /// Pending key for multi-key sequences (e.g., 'gg')
    pub pending_key: Option<char>,
    /// Clock frozen; input still applies
    pub paused: bool,
    pub should_quit: bool,
    pub status_message: Option<String>,
}

impl App {
    pub fn new(site: Site, theme: Theme) -> Self {
        Self {
            site,
            theme,
            mode: Mode::Normal,
            selected_link: 0,
            pending_key: None,
            paused: false,
            should_quit: false,
            status_message: None,
        }
    }

    /// Document pixels per terminal row
    pub fn px_per_row(&self) -> f64 {
        self.site.config().ui.px_per_row.max(1.0)
    }

    pub fn nav_links(&self) -> &[NavLink] {
        &self.site.content().nav_links
    }

    /// Advance the site by real elapsed time
    pub fn tick(&mut self, elapsed: Duration) {
        if !self.paused {
            self.site.advance(elapsed);
        }
    }

    /// True while frames should be drawn at the animation rate
    pub fn needs_fast_update(&self) -> bool {
        !self.paused && self.site.is_animating()
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    pub fn apply(&mut self, action: Action) -> Result<()> {
        if action != Action::PendingG {
            self.pending_key = None;
        }
        if action != Action::None {
            self.status_message = None;
        }

        let line = 3.0 * self.px_per_row();
        let page = self.site.runtime().viewport().height;

        match action {
            Action::Quit => self.should_quit = true,
            Action::ScrollDown => self.site.scroll_by(line),
            Action::ScrollUp => self.site.scroll_by(-line),
            Action::ScrollHalfPageDown => self.site.scroll_by(page / 2.0),
            Action::ScrollHalfPageUp => self.site.scroll_by(-page / 2.0),
            Action::ScrollPageDown => self.site.scroll_by(page),
            Action::ScrollPageUp => self.site.scroll_by(-page),
            Action::JumpToTop => self.site.scroll_to(0.0),
            Action::JumpToBottom => {
                let bottom = self.site.max_scroll();
                self.site.scroll_to(bottom);
            }
            Action::PendingG => self.pending_key = Some('g'),
            Action::NextSlide => self.site.next_slide(),
            Action::PrevSlide => self.site.previous_slide(),
            Action::GoToSlide(index) => {
                if self.site.carousel().is_some_and(|(_, total)| index < total) {
                    self.site.go_to_slide(index);
                }
            }
            Action::NextLink => {
                let count = self.nav_links().len();
                if count > 0 {
                    self.selected_link = (self.selected_link + 1) % count;
                }
            }
            Action::PrevLink => {
                let count = self.nav_links().len();
                if count > 0 {
                    self.selected_link = (self.selected_link + count - 1) % count;
                }
            }
            Action::FollowLink => self.follow_selected()?,
            Action::TogglePause => {
                self.paused = !self.paused;
                self.set_status(if self.paused { "Paused" } else { "Running" });
            }
            Action::ToggleHelp => {
                self.mode = match self.mode {
                    Mode::Help => Mode::Normal,
                    Mode::Normal => Mode::Help,
                };
            }
            Action::ExitMode => self.mode = Mode::Normal,
            Action::None => {}
        }
        Ok(())
    }

    fn follow_selected(&mut self) -> Result<()> {
        let Some(link) = self.nav_links().get(self.selected_link).cloned() else {
            return Ok(());
        };
        let change = self.site.navigate(&link.href)?;
        debug!(href = %link.href, ?change, "Followed nav link");
        self.set_status(format!("{} -> {}", link.name, self.site.location()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qisports_core::controllers::LoaderPhase;
    use qisports_core::{AppConfig, Page, SiteContent};

    fn app() -> App {
        let site = Site::new(AppConfig::default(), SiteContent::default()).unwrap();
        App::new(site, Theme::default())
    }

    #[test]
    fn test_scroll_actions() {
        let mut app = app();
        app.apply(Action::ScrollDown).unwrap();
        assert_eq!(app.site.scroll_y(), 60.0);
        app.apply(Action::ScrollPageDown).unwrap();
        assert_eq!(app.site.scroll_y(), 860.0);
        app.apply(Action::JumpToTop).unwrap();
        assert_eq!(app.site.scroll_y(), 0.0);
        app.apply(Action::JumpToBottom).unwrap();
        assert_eq!(app.site.scroll_y(), app.site.max_scroll());
    }

    #[test]
    fn test_link_cycle_and_follow() {
        let mut app = app();
        app.apply(Action::PrevLink).unwrap();
        assert_eq!(app.selected_link, app.nav_links().len() - 1);
        app.apply(Action::NextLink).unwrap();
        app.apply(Action::NextLink).unwrap();
        assert_eq!(app.nav_links()[app.selected_link].href, "/about");

        app.apply(Action::FollowLink).unwrap();
        assert_eq!(app.site.page(), Page::About);
        assert_eq!(app.site.loader_phase(), LoaderPhase::Showing);
        assert!(app.status_message.is_some());
    }

    #[test]
    fn test_slide_actions() {
        let mut app = app();
        app.apply(Action::PrevSlide).unwrap();
        assert_eq!(app.site.carousel(), Some((2, 3)));
        app.apply(Action::GoToSlide(1)).unwrap();
        assert_eq!(app.site.carousel(), Some((1, 3)));
        app.apply(Action::GoToSlide(7)).unwrap();
        assert_eq!(app.site.carousel(), Some((1, 3)));
    }

    #[test]
    fn test_pause_freezes_clock() {
        let mut app = app();
        app.apply(Action::TogglePause).unwrap();
        app.tick(Duration::from_secs(6));
        assert_eq!(app.site.now(), Duration::ZERO);
        app.apply(Action::TogglePause).unwrap();
        app.tick(Duration::from_secs(6));
        assert_eq!(app.site.carousel(), Some((1, 3)));
    }

    #[test]
    fn test_pending_g_clears() {
        let mut app = app();
        app.apply(Action::PendingG).unwrap();
        assert_eq!(app.pending_key, Some('g'));
        app.apply(Action::ScrollDown).unwrap();
        assert_eq!(app.pending_key, None);
    }
}
