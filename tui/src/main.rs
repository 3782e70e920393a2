use std::time::Duration;

use crossterm::event::{self, Event, KeyEventKind};
use ratatui::DefaultTerminal;
use tracing_subscriber::EnvFilter;

use biblioteca_tui::app::{App, DEFAULT_API_URL};
use biblioteca_tui::transport::HttpTransport;
use biblioteca_tui::ui;

const TICK: Duration = Duration::from_millis(250);

fn main() -> anyhow::Result<()> {
    let base_url =
        std::env::var("BIBLIOTECA_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());

    // The terminal owns stdout, so logs go to a file next to the binary.
    let appender = tracing_appender::rolling::never(".", "biblioteca-tui.log");
    let (writer, _guard) = tracing_appender::non_blocking(appender);
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(writer)
        .with_ansi(false)
        .init();

    let mut terminal = ratatui::init();
    let mut app = App::new(HttpTransport::new(), base_url);
    app.startup();
    let result = run(&mut terminal, &mut app);
    ratatui::restore();
    result
}

fn run(terminal: &mut DefaultTerminal, app: &mut App<HttpTransport>) -> anyhow::Result<()> {
    while app.running {
        terminal.draw(|frame| ui::draw(frame, app))?;
        if event::poll(TICK)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.on_key(key);
                }
            }
        }
        app.tick();
    }
    Ok(())
}
