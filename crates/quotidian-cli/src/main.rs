//! Terminal random quote browser

use std::io;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use clap::Parser;
use crossbeam_channel::bounded;

use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::ExecutableCommand;
use ratatui::prelude::*;
use ratatui::widgets::*;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "quotidian", about = "Terminal random quote browser", version)]
struct Cli {
    /// Quote category to start in ("life" or "dev"; default: last used)
    #[arg(long)]
    mode: Option<QuoteMode>,
}

use quotidian::app::{AppCommand, AppController, AppSnapshot, FetchPhase};
use quotidian::data::types::QuoteMode;

/// Which screen is on display
#[derive(Clone, Copy, PartialEq, Eq)]
enum View {
    Quote,
    Favourites,
}

struct App {
    view: View,
    snapshot: AppSnapshot,
    selected: usize,
    running: bool,
}

impl App {
    fn new() -> Self {
        Self {
            view: View::Quote,
            snapshot: AppSnapshot::default(),
            selected: 0,
            running: true,
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logging goes to stderr so it never corrupts the display; silent
    // unless RUST_LOG is set.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let (cmd_tx, cmd_rx) = bounded(64);
    let shared_state = Arc::new(Mutex::new(AppSnapshot::default()));

    // Build the controller before entering the TUI (prints to stderr on failure)
    let mut controller = match AppController::new(cmd_rx, cmd_tx.clone(), shared_state.clone()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };
    let startup_mode = cli.mode.unwrap_or_else(|| controller.startup_mode());

    let _controller_handle = std::thread::Builder::new()
        .name("controller".into())
        .spawn(move || controller.run())
        .expect("Failed to spawn controller thread");

    // The quote view loads as soon as the app opens
    let _ = cmd_tx.send(AppCommand::Fetch(startup_mode));

    // Enter TUI
    terminal::enable_raw_mode()?;
    io::stdout().execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new();
    let tick_rate = Duration::from_millis(100);
    let mut last_tick = Instant::now();

    while app.running {
        // Draw
        terminal.draw(|f| draw_ui(f, &app))?;

        // Poll input
        let timeout = tick_rate.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    match app.view {
                        View::Quote => match key.code {
                            KeyCode::Char('q') | KeyCode::Esc => {
                                app.running = false;
                            }
                            KeyCode::Char('n') | KeyCode::Char('r') => {
                                if app.snapshot.phase != FetchPhase::Loading {
                                    let _ = cmd_tx.send(AppCommand::Fetch(app.snapshot.mode));
                                }
                            }
                            KeyCode::Char('m') | KeyCode::Tab => {
                                let _ =
                                    cmd_tx.send(AppCommand::Fetch(app.snapshot.mode.toggled()));
                            }
                            KeyCode::Char('s') => {
                                if app.snapshot.phase != FetchPhase::Loading {
                                    let _ = cmd_tx.send(AppCommand::SaveFavorite);
                                }
                            }
                            KeyCode::Char('f') => {
                                app.view = View::Favourites;
                            }
                            _ => {}
                        },
                        View::Favourites => match key.code {
                            KeyCode::Char('q') => {
                                app.running = false;
                            }
                            KeyCode::Char('f') | KeyCode::Esc => {
                                app.view = View::Quote;
                            }
                            KeyCode::Up | KeyCode::Char('k') => {
                                app.selected = app.selected.saturating_sub(1);
                            }
                            KeyCode::Down | KeyCode::Char('j') => {
                                if app.selected + 1 < app.snapshot.favorites.len() {
                                    app.selected += 1;
                                }
                            }
                            KeyCode::Char('d') | KeyCode::Delete => {
                                if let Some(record) = app.snapshot.favorites.get(app.selected) {
                                    let _ = cmd_tx
                                        .send(AppCommand::RemoveFavorite(record.quote.clone()));
                                }
                            }
                            _ => {}
                        },
                    }
                }
            }
        }

        if last_tick.elapsed() >= tick_rate {
            last_tick = Instant::now();
            update_snapshot(&shared_state, &mut app);
        }
    }

    let _ = cmd_tx.send(AppCommand::Shutdown);

    // Restore terminal
    terminal::disable_raw_mode()?;
    io::stdout().execute(LeaveAlternateScreen)?;

    Ok(())
}

fn update_snapshot(shared_state: &Arc<Mutex<AppSnapshot>>, app: &mut App) {
    if let Ok(snapshot) = shared_state.lock() {
        app.snapshot = snapshot.clone();
    }
    // Keep the selection in range as favourites come and go
    if app.selected >= app.snapshot.favorites.len() {
        app.selected = app.snapshot.favorites.len().saturating_sub(1);
    }
}

fn draw_ui(f: &mut Frame, app: &App) {
    let area = f.area();

    let outer = Block::default()
        .title(format!(" Quotidian v{} ", env!("CARGO_PKG_VERSION")))
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded);
    let inner = outer.inner(area);
    f.render_widget(outer, area);

    let chunks = Layout::vertical([
        Constraint::Min(7),    // quote card or favourites list
        Constraint::Length(1), // notice line
        Constraint::Length(1), // help bar
    ])
    .split(inner);

    match app.view {
        View::Quote => draw_quote(f, app, chunks[0]),
        View::Favourites => draw_favourites(f, app, chunks[0]),
    }
    draw_notice(f, app, chunks[1]);
    draw_help(f, app, chunks[2]);
}

fn draw_quote(f: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .title(format!(" Random Quote ({}) ", app.snapshot.mode))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::DarkGray));

    let lines = match app.snapshot.phase {
        FetchPhase::Idle | FetchPhase::Loading => vec![
            Line::from(""),
            Line::from(Span::styled(
                "Loading...",
                Style::default().fg(Color::Yellow),
            )),
        ],
        FetchPhase::Loaded => match &app.snapshot.quote {
            Some(record) if record.is_failed() => vec![
                Line::from(""),
                Line::from(Span::styled(
                    record.quote.clone(),
                    Style::default().fg(Color::Red),
                )),
            ],
            Some(record) => vec![
                Line::from(""),
                Line::from(Span::styled(
                    format!("\u{201c}{}\u{201d}", record.quote),
                    Style::default().fg(Color::White).bold(),
                )),
                Line::from(""),
                Line::from(Span::styled(
                    format!("— {}", record.author),
                    Style::default().fg(Color::Yellow),
                )),
            ],
            None => vec![Line::from("")],
        },
    };

    let card = Paragraph::new(lines)
        .block(block)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    f.render_widget(card, area);
}

fn draw_favourites(f: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .title(format!(" Favourites ({}) ", app.snapshot.favorites.len()))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::DarkGray));

    if app.snapshot.favorites.is_empty() {
        let empty = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                "No favourites yet",
                Style::default().fg(Color::DarkGray),
            )),
        ])
        .block(block)
        .alignment(Alignment::Center);
        f.render_widget(empty, area);
        return;
    }

    let max_line = area.width.saturating_sub(6) as usize;
    let items: Vec<ListItem> = app
        .snapshot
        .favorites
        .iter()
        .map(|record| {
            ListItem::new(vec![
                Line::from(Span::styled(
                    truncate_str(&format!("\u{201c}{}\u{201d}", record.quote), max_line),
                    Style::default().fg(Color::White),
                )),
                Line::from(Span::styled(
                    truncate_str(&format!("    — {}", record.author), max_line),
                    Style::default().fg(Color::DarkGray),
                )),
            ])
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().fg(Color::Yellow).bold())
        .highlight_symbol("> ");

    let mut state = ListState::default();
    state.select(Some(app.selected));
    f.render_stateful_widget(list, area, &mut state);
}

fn draw_notice(f: &mut Frame, app: &App, area: Rect) {
    if let Some(ref notice) = app.snapshot.notice {
        let line = Line::from(Span::styled(
            format!("  {}", notice),
            Style::default().fg(Color::Cyan),
        ));
        f.render_widget(Paragraph::new(line), area);
    }
}

fn draw_help(f: &mut Frame, app: &App, area: Rect) {
    let key = Style::default().fg(Color::Yellow);
    let dim = Style::default().fg(Color::DarkGray);
    let loading = app.snapshot.phase == FetchPhase::Loading;

    let help = match app.view {
        View::Quote => Line::from(vec![
            Span::styled("  'n' ", if loading { dim } else { key }),
            Span::raw("new quote  |  "),
            Span::styled("'m' ", key),
            Span::raw("switch mode  |  "),
            Span::styled("'s' ", if loading { dim } else { key }),
            Span::raw("save  |  "),
            Span::styled("'f' ", key),
            Span::raw("favourites  |  "),
            Span::styled("'q' ", key),
            Span::raw("quit"),
        ]),
        View::Favourites => Line::from(vec![
            Span::styled("  'k'/'j' ", key),
            Span::raw("select  |  "),
            Span::styled("'d' ", key),
            Span::raw("remove  |  "),
            Span::styled("'f' ", key),
            Span::raw("back  |  "),
            Span::styled("'q' ", key),
            Span::raw("quit"),
        ]),
    };

    f.render_widget(Paragraph::new(help).alignment(Alignment::Left), area);
}

fn truncate_str(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}
