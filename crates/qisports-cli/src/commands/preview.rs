use std::io;

use anyhow::Result;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Direction, Layout},
    Terminal,
};
use tokio::time::Instant;
use tracing::info;

use qisports_core::{AppConfig, Site, SiteContent};
use qisports_tui::{
    app::{App, Mode},
    event::{AppEvent, EventHandler},
    input::handle_key_event,
    widgets::{HeaderWidget, LoaderWidget, PageWidget, PopupWidget, StatusBarWidget},
    Theme,
};

pub async fn run(config: AppConfig, route: &str) -> Result<()> {
    let event_handler = EventHandler::with_animation_fps(config.ui.tick_rate_ms, config.ui.animation_fps);
    let site = Site::open(config, SiteContent::default(), route)?;
    let mut app = App::new(site, Theme::default());

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, SetTitle("QI Sports"))?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = main_loop(&mut terminal, &mut app, &event_handler);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    app.site.teardown();
    info!(elapsed_ms = app.site.now().as_millis() as u64, "Preview closed");
    result
}

fn main_loop<B: Backend>(terminal: &mut Terminal<B>, app: &mut App, events: &EventHandler) -> Result<()> {
    let mut last_frame = Instant::now();

    loop {
        let now = Instant::now();
        app.tick(now - last_frame);
        last_frame = now;

        terminal.draw(|frame| {
            let size = frame.area();

            // Main layout: header + page + status bar
            let layout = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Length(2), Constraint::Min(1), Constraint::Length(1)])
                .split(size);

            HeaderWidget::render(frame, layout[0], app);
            PageWidget::render(frame, layout[1], app);
            StatusBarWidget::render(frame, layout[2], app);

            // The loader covers everything but the status bar
            let covered = layout[0].union(layout[1]);
            LoaderWidget::render(frame, covered, app);

            if app.mode == Mode::Help {
                PopupWidget::render_help(frame, &app.theme);
            }
        })?;

        // Faster polling while something is moving
        let event = if app.needs_fast_update() {
            events.next_animation()?
        } else {
            events.next()?
        };
        if let Some(AppEvent::Key(key)) = event {
            let action = handle_key_event(key, app);
            app.apply(action)?;
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
