mod app;
mod config;
mod menu;
mod ui;

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use app::App;
use config::AppConfig;
use menu::MenuListController;

#[derive(Parser, Debug)]
#[command(name = "sidemenu")]
#[command(version)]
#[command(about = "A terminal sidebar menu with add and regex filter inputs")]
struct Args {
    /// Initial menu items (overrides `initial_items` from the config file)
    items: Vec<String>,

    /// Path to the config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Initial filter pattern (case-insensitive regex)
    #[arg(short, long)]
    filter: Option<String>,

    /// Print the visible items as JSON and exit
    #[arg(short, long)]
    list: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let fallback_filter = default_log_filter(args.list);
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| fallback_filter.into()))
        .init();

    let mut config = AppConfig::load(args.config.as_deref())?;
    if !args.items.is_empty() {
        config.initial_items = args.items.clone();
    }

    if args.list {
        let mut menu = MenuListController::with_policy(&config.initial_items, config.invalid_filter);
        if let Some(filter) = args.filter {
            menu.set_filter(filter);
        }
        if !menu.filter_is_valid() {
            tracing::warn!("Filter {:?} is not a valid pattern", menu.filter_text());
        }
        return print_visible(&menu);
    }

    let mut app = App::new(&config);
    if let Some(filter) = args.filter {
        app.menu.set_filter(filter);
    }

    run_tui(&mut app)
}

/// Log filter used when RUST_LOG is unset.
///
/// The TUI shares stderr with the logs, so it stays silent; `--list` owns no
/// terminal and shows warnings.
fn default_log_filter(list: bool) -> &'static str {
    if list {
        "warn"
    } else {
        "off"
    }
}

fn print_visible(menu: &MenuListController) -> Result<()> {
    let visible = menu.visible_items();
    println!("{}", serde_json::to_string(&visible)?);
    Ok(())
}

fn run_tui(app: &mut App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    tracing::info!("Starting sidemenu with {} items", app.menu.len());

    // Main loop
    let result = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        if event::poll(std::time::Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    match key.code {
                        KeyCode::Char('q') if app.can_quit() => return Ok(()),
                        KeyCode::Char('c') if key.modifiers.contains(event::KeyModifiers::CONTROL) => {
                            return Ok(())
                        }
                        _ => {
                            // Handle key and catch any errors to prevent crashes
                            if let Err(e) = app.handle_key(key) {
                                app.status_message = Some(format!("Error: {}", e));
                            }
                        }
                    }
                }
            }
        }

        // Periodic refresh
        app.tick();
    }
}
