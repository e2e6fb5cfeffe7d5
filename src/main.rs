use std::io;

use clap::Parser;
use crossterm::event::{Event, KeyCode, KeyEventKind};
use indoc::indoc;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::Paragraph;

use term_dock::config::{ChromeCli, ChromeConfig};
use term_dock::drivers::OutputDriver;
use term_dock::drivers::console::{ConsoleInputDriver, ConsoleOutputDriver};
use term_dock::event_loop::{ControlFlow, EventLoop};
use term_dock::theme;
use term_dock::window::TextContent;
use term_dock::{Desktop, WindowSpec, tracing_sub};

const HELP: &str = indoc! {"
    Drag a title bar to move a window.
    Drop it on the dock column to dock it.
    Drag a docked title bar to float it again.
    Drag the bottom row to resize.
    [x] closes. q or Ctrl-Q quits.
"};

fn main() -> io::Result<()> {
    let cli = ChromeCli::parse();
    let config = ChromeConfig::try_from(&cli)
        .map_err(|msg| io::Error::new(io::ErrorKind::InvalidInput, msg))?;
    tracing_sub::init(config.log_file.as_deref())?;

    let (width, height) = crossterm::terminal::size()?;
    let mut desktop = Desktop::new(Rect::new(0, 0, width, height), config.dock_width_percent);
    populate(&mut desktop, &config);

    let mut output = ConsoleOutputDriver::new()?;
    output.enter()?;
    let mut event_loop = EventLoop::new(ConsoleInputDriver::new(), config.tick);
    let result = event_loop.run(|_, event| {
        // Events only mutate; the frame is drawn once the burst is drained.
        if let Some(event) = &event {
            if is_quit(event) {
                return Ok(ControlFlow::Quit);
            }
            desktop.handle_event(event);
            for id in desktop.take_closed_windows() {
                tracing::info!(window = %id, "window closed");
            }
            return Ok(ControlFlow::Continue);
        }
        output.draw(|mut frame| {
            let area = frame.area();
            frame.render_widget(
                Paragraph::new(" term-dock ").style(Style::default().fg(theme::accent())),
                Rect::new(area.right().saturating_sub(11), area.y, 11, 1),
            );
            desktop.render(&mut frame);
        })?;
        Ok(ControlFlow::Continue)
    });
    output.exit()?;
    result
}

fn populate(desktop: &mut Desktop, config: &ChromeConfig) {
    let area = desktop.area();
    for n in 0..config.windows {
        let offset = 3.0 * n as f32;
        let mut spec = WindowSpec::new(format!("Window {}", n + 1))
            .size(36.0, 25.0)
            .at(area.width as f32 / 3.0 + offset, 1.0 + offset)
            .content(TextContent::new(
                format!("Window {}", n + 1),
                HELP.lines().map(str::to_string),
            ));
        if n == 0 && config.start_docked {
            spec = spec.docked_in(desktop.docks().root());
        }
        if let Err(err) = desktop.open_window(spec) {
            tracing::warn!(error = %err, "could not open demo window");
        }
    }
}

/// `q`, with or without Ctrl.
fn is_quit(event: &Event) -> bool {
    matches!(
        event,
        Event::Key(key)
            if key.kind == KeyEventKind::Press && key.code == KeyCode::Char('q')
    )
}
