use std::io;
use std::time::Instant;

use anyhow::Result;
use clap::Parser;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Clear, Paragraph, Widget};
use tracing::{info, warn};

use numdr::app::{App, AppScreen, SettingsField};
use numdr::config::Config;
use numdr::event::{AppEvent, EventHandler};
use numdr::logging;
use numdr::session::problem::Operation;
use numdr::store::json_store::JsonStore;
use numdr::store::settings_store::SettingsStore;
use numdr::store::{MemoryBackend, SettingsBackend};
use numdr::timer::format_clock;
use numdr::ui::components::confetti::Confetti;
use numdr::ui::components::dashboard::Dashboard;
use numdr::ui::components::menu::MenuAction;
use numdr::ui::components::number_pad::NumberPad;
use numdr::ui::components::problem_card::ProblemCard;
use numdr::ui::components::progress_bar::ProgressBar;
use numdr::ui::layout::{GameLayout, centered_rect, pack_hint_lines};
use numdr::ui::theme::Theme;

#[derive(Parser)]
#[command(name = "numdr", version, about = "Arithmetic practice for kids, in the terminal")]
struct Cli {
    #[arg(short, long, help = "Grade level (4-8)")]
    grade: Option<u8>,

    #[arg(short, long, help = "Number of problems per game (1-50)")]
    problems: Option<usize>,

    #[arg(long, help = "Seconds per problem, 0 turns the timer off")]
    timer: Option<u32>,

    #[arg(short, long, help = "Theme name")]
    theme: Option<String>,

    #[arg(long, help = "Log filter, e.g. numdr=debug (overrides NUMDR_LOG)")]
    log_level: Option<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load().unwrap_or_default();
    if let Some(theme) = &cli.theme {
        config.theme = theme.clone();
    }
    config.validate(&Theme::available_themes());

    let json_store = JsonStore::new();
    let log_dir = match &json_store {
        Ok(store) => store.base_dir().to_path_buf(),
        Err(_) => std::env::temp_dir().join("numdr"),
    };
    if let Err(err) = logging::init(&log_dir, cli.log_level.as_deref()) {
        eprintln!("numdr: logging disabled: {err}");
    }
    info!(version = env!("CARGO_PKG_VERSION"), theme = %config.theme, "starting");
    if !Config::config_path().exists()
        && let Err(err) = config.save()
    {
        warn!(error = %err, "could not write default config");
    }

    let backend: Box<dyn SettingsBackend> = match json_store {
        Ok(store) => Box::new(store),
        Err(err) => {
            warn!(error = %err, "data directory unavailable, settings will not persist");
            Box::new(MemoryBackend::new())
        }
    };
    let mut settings_store = SettingsStore::load(backend);
    apply_cli_overrides(&mut settings_store, &cli);

    let theme: &'static Theme =
        Box::leak(Box::new(Theme::load(&config.theme).unwrap_or_default()));
    let tick_rate = config.tick_rate();
    let mut app = App::new(config, theme, settings_store, SmallRng::from_entropy());

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let events = EventHandler::new(tick_rate);

    let result = run_app(&mut terminal, &mut app, &events);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        warn!(error = %err, "exited with error");
        eprintln!("Error: {err:?}");
    }
    info!("bye");

    Ok(())
}

/// Command-line game options go through the store, so they stick for later
/// runs just like changes made on the settings screen.
fn apply_cli_overrides(store: &mut SettingsStore, cli: &Cli) {
    if cli.grade.is_none() && cli.problems.is_none() && cli.timer.is_none() {
        return;
    }
    let result = store.update(|s| {
        if let Some(grade) = cli.grade {
            s.grade_level = grade;
        }
        if let Some(problems) = cli.problems {
            s.problem_count = problems;
        }
        if let Some(timer) = cli.timer {
            s.time_per_problem_secs = timer;
        }
    });
    if let Err(err) = result {
        warn!(error = %err, "could not save command-line settings");
    }
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &EventHandler,
) -> Result<()> {
    let mut last = Instant::now();
    loop {
        let completed = terminal.draw(|frame| render(frame, app))?;
        app.set_review_viewport(Dashboard::review_height(results_area(completed.area)));

        let event = events.next()?;
        let now = Instant::now();
        app.tick(now.duration_since(last));
        last = now;

        match event {
            AppEvent::Key(key) => handle_key(app, key),
            AppEvent::Tick | AppEvent::Resize => {}
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return;
    }

    match app.screen {
        AppScreen::Welcome => handle_welcome_key(app, key),
        AppScreen::Settings => handle_settings_key(app, key),
        AppScreen::Game => handle_game_key(app, key),
        AppScreen::Results => handle_results_key(app, key),
    }
}

fn handle_welcome_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,
        KeyCode::Char('s') => app.go_to_settings(),
        KeyCode::Up | KeyCode::Char('k') => app.menu.prev(),
        KeyCode::Down | KeyCode::Char('j') => app.menu.next(),
        KeyCode::Enter => match app.menu.selected_action() {
            MenuAction::Start => app.go_to_settings(),
            MenuAction::Quit => app.should_quit = true,
        },
        _ => {}
    }
}

fn handle_settings_key(app: &mut App, key: KeyEvent) {
    let on_operations = app.settings_field == SettingsField::Operations;
    match key.code {
        KeyCode::Esc => app.go_to_welcome(),
        KeyCode::Enter => {
            app.start_game();
        }
        KeyCode::Up | KeyCode::Char('k') => app.settings_prev_field(),
        KeyCode::Down | KeyCode::Char('j') => app.settings_next_field(),
        KeyCode::Right | KeyCode::Char('l') => app.settings_cycle_forward(),
        KeyCode::Left | KeyCode::Char('h') => app.settings_cycle_backward(),
        KeyCode::Char(' ') if on_operations => app.toggle_operation_at_cursor(),
        KeyCode::Char(ch @ '1'..='4') if on_operations => {
            let index = ch as usize - '1' as usize;
            app.operation_cursor = index;
            app.toggle_operation(Operation::ALL[index]);
        }
        _ => {}
    }
}

fn handle_game_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.quit_game(),
        KeyCode::Enter => app.submit_answer(),
        KeyCode::Backspace | KeyCode::Delete => app.backspace(),
        KeyCode::Char(ch) if ch.is_ascii_digit() => app.type_digit(ch),
        KeyCode::Char('-') => app.toggle_sign(),
        KeyCode::Char('.') => app.type_decimal_point(),
        KeyCode::Char('c') => app.clear_input(),
        _ => {}
    }
}

fn handle_results_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('r') | KeyCode::Enter => app.play_again(),
        KeyCode::Char('c') => app.change_settings(),
        KeyCode::Char('q') | KeyCode::Esc => app.go_to_welcome(),
        KeyCode::Up | KeyCode::Char('k') => app.scroll_review_up(),
        KeyCode::Down | KeyCode::Char('j') => app.scroll_review_down(),
        _ => {}
    }
}

fn render(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let colors = &app.theme.colors;

    let bg = Block::default().style(Style::default().bg(colors.bg()));
    frame.render_widget(bg, area);

    match app.screen {
        AppScreen::Welcome => render_welcome(frame, app),
        AppScreen::Settings => render_settings(frame, app),
        AppScreen::Game => render_game(frame, app),
        AppScreen::Results => render_results(frame, app),
    }
}

fn render_header(frame: &mut ratatui::Frame, app: &App, area: Rect, info: &str) {
    let colors = &app.theme.colors;
    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            " numdr ",
            Style::default()
                .fg(colors.header_fg())
                .bg(colors.header_bg())
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            info.to_string(),
            Style::default()
                .fg(colors.text_muted())
                .bg(colors.header_bg()),
        ),
    ]))
    .style(Style::default().bg(colors.header_bg()));
    frame.render_widget(header, area);
}

fn render_hints(frame: &mut ratatui::Frame, app: &App, area: Rect, hints: &[&str]) {
    let lines: Vec<Line> = pack_hint_lines(hints, area.width as usize)
        .into_iter()
        .take(area.height as usize)
        .map(|l| {
            Line::from(Span::styled(
                l,
                Style::default().fg(app.theme.colors.text_muted()),
            ))
        })
        .collect();
    frame.render_widget(Paragraph::new(lines), area);
}

fn render_welcome(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(area);

    let settings = app.settings();
    let info = format!(
        " Grade {} | {} problems",
        settings.grade_level, settings.problem_count
    );
    render_header(frame, app, layout[0], &info);

    let menu_area = centered_rect(50, 60, layout[1]);
    frame.render_widget(&app.menu, menu_area);

    render_hints(
        frame,
        app,
        layout[2],
        &["[Enter/s] Start", "[\u{2191}\u{2193}] Select", "[q] Quit"],
    );
}

fn render_settings(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let colors = &app.theme.colors;
    let settings = app.settings();

    let centered = centered_rect(60, 80, area);

    let block = Block::bordered()
        .title(" Game Settings ")
        .border_style(Style::default().fg(colors.accent()))
        .style(Style::default().bg(colors.bg()));
    let inner = block.inner(centered);
    block.render(centered, frame.buffer_mut());

    let field_height = |field: SettingsField| match field {
        SettingsField::Operations => Operation::ALL.len() as u16 + 2,
        _ => 3,
    };

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(
                SettingsField::ALL
                    .iter()
                    .map(|f| field_height(*f))
                    .sum(),
            ),
            Constraint::Min(0),
            Constraint::Length(2),
        ])
        .split(inner);

    let header = Paragraph::new(Line::from(Span::styled(
        "  \u{2191}\u{2193} choose a setting, \u{2190}\u{2192} change it, Enter to play",
        Style::default().fg(colors.text_muted()),
    )));
    header.render(layout[0], frame.buffer_mut());

    let field_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            SettingsField::ALL
                .iter()
                .map(|f| Constraint::Length(field_height(*f)))
                .collect::<Vec<_>>(),
        )
        .split(layout[1]);

    for (i, field) in SettingsField::ALL.iter().enumerate() {
        let is_selected = *field == app.settings_field;
        let indicator = if is_selected { " > " } else { "   " };

        let label_style = Style::default()
            .fg(if is_selected {
                colors.accent()
            } else {
                colors.fg()
            })
            .add_modifier(if is_selected {
                Modifier::BOLD
            } else {
                Modifier::empty()
            });
        let value_style = Style::default().fg(if is_selected {
            colors.highlight()
        } else {
            colors.text_muted()
        });

        let mut lines = vec![Line::from(Span::styled(
            format!("{indicator}{}:", field.label()),
            label_style,
        ))];

        match field {
            SettingsField::Grade => lines.push(Line::from(Span::styled(
                format!("  < Grade {} >", settings.grade_level),
                value_style,
            ))),
            SettingsField::Operations => {
                for (n, op) in Operation::ALL.iter().enumerate() {
                    let enabled = settings.operations.contains(*op);
                    let mark = if enabled { "x" } else { " " };
                    let cursor = is_selected && n == app.operation_cursor;
                    let style = if cursor {
                        value_style.add_modifier(Modifier::REVERSED)
                    } else if enabled {
                        Style::default().fg(colors.success())
                    } else {
                        Style::default().fg(colors.text_muted())
                    };
                    lines.push(Line::from(Span::styled(
                        format!("  [{mark}] {} {} {}", n + 1, op.symbol(), op.label()),
                        style,
                    )));
                }
            }
            SettingsField::Problems => lines.push(Line::from(Span::styled(
                format!("  < {} >", settings.problem_count),
                value_style,
            ))),
            SettingsField::Timer => {
                let value = if settings.has_time_limit() {
                    format!("{} seconds", settings.time_per_problem_secs)
                } else {
                    "No timer".to_string()
                };
                lines.push(Line::from(Span::styled(
                    format!("  < {value} >"),
                    value_style,
                )));
            }
        }
        Paragraph::new(lines).render(field_layout[i], frame.buffer_mut());
    }

    let footer_line = if let Some(status) = &app.status {
        Line::from(Span::styled(
            format!("  {status}"),
            Style::default().fg(colors.warning()),
        ))
    } else if !settings.can_start() {
        Line::from(Span::styled(
            "  Pick at least one operation to start.",
            Style::default().fg(colors.warning()),
        ))
    } else {
        Line::from(Span::styled(
            "  [Enter] Start game  [1-4/Space] Toggle operation  [ESC] Back",
            Style::default().fg(colors.accent()),
        ))
    };
    Paragraph::new(footer_line).render(layout[3], frame.buffer_mut());
}

fn render_game(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let colors = &app.theme.colors;

    let Some(problem) = app.game.current_problem() else {
        return;
    };
    let layout = GameLayout::new(area);
    let total = app.game.problems().len();
    let number = app.game.current_index() + 1;
    let score = app.game.score();

    let info = format!(
        " Grade {} | Score {}/{}",
        app.displayed_grade(),
        score.correct,
        score.total
    );
    render_header(frame, app, layout.header, &info);

    let progress = if app.countdown.is_enabled() {
        ProgressBar::new(
            "Time",
            app.countdown.percent_remaining() / 100.0,
            app.theme,
        )
        .fill(colors.time_band(app.countdown.band()))
        .caption(if app.countdown.is_expired() {
            "Time's up!".to_string()
        } else {
            format_clock(app.countdown.remaining_secs())
        })
    } else {
        ProgressBar::new("Progress", number as f64 / total as f64, app.theme)
            .caption(format!("{number} / {total}"))
    };
    frame.render_widget(progress, layout.progress);

    let card = ProblemCard::new(
        problem,
        number,
        total,
        app.input.as_str(),
        app.feedback,
        app.theme,
    );
    frame.render_widget(card, layout.problem);

    if let Some(pad_area) = layout.pad {
        frame.render_widget(NumberPad::new(!app.is_input_locked(), app.theme), pad_area);
    }

    render_hints(
        frame,
        app,
        layout.footer,
        &[
            "[0-9] Type",
            "[-] Sign",
            if app.game.is_last_problem() {
                "[Enter] Finish"
            } else {
                "[Enter] Submit"
            },
            "[Backspace] Delete",
            "[c] Clear",
            "[ESC] End game",
        ],
    );
}

fn render_results(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();

    if let Some(ref summary) = app.summary {
        if summary.celebrate {
            let confetti = Confetti::new(app.celebration_frame, app.celebration_seed, app.theme);
            frame.render_widget(confetti, area);
        }
        let centered = results_area(area);
        frame.render_widget(Clear, centered);
        let dashboard = Dashboard::new(summary, app.review_scroll, app.theme);
        frame.render_widget(dashboard, centered);
    }
}

fn results_area(area: Rect) -> Rect {
    centered_rect(60, 80, area)
}
