//! Interactive terminal host for the range slider.
//!
//! The terminal plays the host UI layer: it paints the gradient track,
//! places thumbs and tints their labels, and forwards mouse down, drag and
//! up events to the engine. Mouse capture makes drags outside the track
//! (and the release) reach the component.

mod components;
mod event;

use std::io::{Stdout, stdout};
use std::time::Duration;

use color_eyre::eyre::Result;
use ratatui::{
    Terminal,
    crossterm::ExecutableCommand,
    crossterm::event::{DisableMouseCapture, EnableMouseCapture},
    crossterm::terminal::{
        EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
    },
    layout::{Constraint, Direction, Layout, Rect},
    prelude::CrosstermBackend,
    style::{Modifier, Style},
    widgets::{Block, Borders, Paragraph},
};
use tracing::{debug, info};
use tuirealm::{Application, EventListenerCfg, PollStrategy, Update};

use crate::slider::{RangeSlider, SliderSnapshot};
use components::GradientRange;
use event::UserEvent;

/// Component identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Id {
    Range,
}

/// Messages emitted by components.
#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    Quit,
    /// Thumbs moved or a drag ended
    Changed(SliderSnapshot),
}

/// Host-side model: what the status line shows.
struct Model {
    status: String,
    quit: bool,
}

impl Model {
    fn new(snapshot: &SliderSnapshot) -> Self {
        Self {
            status: format_status(snapshot),
            quit: false,
        }
    }
}

impl Update<Msg> for Model {
    fn update(&mut self, msg: Option<Msg>) -> Option<Msg> {
        match msg? {
            Msg::Quit => self.quit = true,
            Msg::Changed(snapshot) => self.status = format_status(&snapshot),
        }
        None
    }
}

fn format_status(snapshot: &SliderSnapshot) -> String {
    let thumbs: Vec<String> = snapshot
        .thumbs
        .iter()
        .map(|t| format!("{} {}", t.value, t.hex))
        .collect();
    format!(
        " {}  |  drag a thumb with the mouse, Esc to undo a drag, q to quit",
        thumbs.join("  ")
    )
}

/// Run the interactive slider until the user quits.
pub fn run(slider: RangeSlider) -> Result<()> {
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    stdout().execute(EnableMouseCapture)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    let result = event_loop(&mut terminal, slider);

    stdout().execute(DisableMouseCapture)?;
    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;

    result
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    slider: RangeSlider,
) -> Result<()> {
    let mut model = Model::new(&slider.snapshot());
    let background = slider.background_css();

    let mut app: Application<Id, Msg, UserEvent> = Application::init(
        EventListenerCfg::default()
            .crossterm_input_listener(Duration::from_millis(20), 10)
            .poll_timeout(Duration::from_millis(50)),
    );
    app.mount(Id::Range, Box::new(GradientRange::new(slider)), vec![])?;
    app.active(&Id::Range)?;
    info!("interactive slider started");

    while !model.quit {
        terminal.draw(|frame| {
            let rows = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Length(1), // Title
                    Constraint::Length(5), // Slider block
                    Constraint::Min(0),
                    Constraint::Length(1), // Status
                ])
                .split(frame.area());

            let title = Paragraph::new(format!(" {} ", background))
                .style(Style::default().add_modifier(Modifier::DIM));
            frame.render_widget(title, rows[0]);

            let block = Block::default().title(" Range ").borders(Borders::ALL);
            let inner = block.inner(rows[1]);
            frame.render_widget(block, rows[1]);
            // Leave a margin so end thumbs' labels have room.
            let slider_area = Rect {
                x: inner.x + 1,
                width: inner.width.saturating_sub(2),
                ..inner
            };
            app.view(&Id::Range, frame, slider_area);

            let status = Paragraph::new(model.status.clone())
                .style(Style::default().add_modifier(Modifier::DIM));
            frame.render_widget(status, rows[3]);
        })?;

        // Timeouts surface as errors; nothing to do but poll again.
        if let Ok(messages) = app.tick(PollStrategy::Once) {
            for msg in messages {
                debug!(?msg, "message");
                let mut current = Some(msg);
                while let Some(m) = current {
                    current = model.update(Some(m));
                }
            }
        }
    }

    info!("interactive slider closed");
    Ok(())
}
