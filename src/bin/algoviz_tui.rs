//! algoviz playback - Terminal User Interface
//!
//! Plays any catalogued algorithm in the terminal using ratatui.
//! App logic lives in `algoviz::tui::app`.

#![forbid(unsafe_code)]

#[cfg(feature = "tui")]
fn main() -> std::io::Result<()> {
    use algoviz::config::VizConfig;
    use algoviz::tui::VizApp;

    const DEFAULT_ALGORITHM: &str = "hanoi";

    let args: Vec<String> = std::env::args().collect();
    let algorithm = args.get(1).map_or(DEFAULT_ALGORITHM, String::as_str);
    let config = match args.get(2) {
        Some(path) => match VizConfig::load(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error loading '{path}': {e}");
                std::process::exit(1);
            }
        },
        None => VizConfig::default(),
    };

    let app = match VizApp::new(algorithm, config) {
        Ok(app) => app,
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!("Usage: algoviz-tui [algorithm] [config.yaml]");
            std::process::exit(1);
        }
    };

    tui::run(app)
}

#[cfg(not(feature = "tui"))]
fn main() {
    eprintln!("TUI feature not enabled. Run with: cargo run --bin algoviz-tui --features tui");
    std::process::exit(1);
}

#[cfg(feature = "tui")]
mod tui {
    use algoviz::tui::VizApp;
    use crossterm::{
        event::{self, Event, KeyEventKind},
        execute,
        terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    };
    use ratatui::{
        backend::CrosstermBackend,
        layout::{Constraint, Direction, Layout, Rect},
        style::{Color, Modifier, Style},
        text::{Line, Span},
        widgets::{Block, Borders, Gauge, Paragraph, Wrap},
        Frame, Terminal,
    };
    use std::io;
    use std::time::{Duration, Instant};

    pub fn run(mut app: VizApp) -> io::Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, crossterm::cursor::Hide)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        terminal.clear()?;

        let tick_rate = Duration::from_millis(20);
        let result = run_main_loop(&mut terminal, &mut app, tick_rate);

        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            crossterm::cursor::Show
        )?;

        result
    }

    fn run_main_loop(
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
        app: &mut VizApp,
        tick_rate: Duration,
    ) -> io::Result<()> {
        let mut last_tick = Instant::now();

        loop {
            terminal.draw(|f| ui(f, app))?;

            let timeout = tick_rate.saturating_sub(last_tick.elapsed());
            if crossterm::event::poll(timeout)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        app.handle_key(key.code);
                    }
                }
            }

            let elapsed = last_tick.elapsed();
            if elapsed >= tick_rate {
                app.tick(u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX));
                last_tick = Instant::now();
            }

            if app.should_quit() {
                break;
            }
        }

        Ok(())
    }

    fn ui(f: &mut Frame, app: &VizApp) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(4),
                Constraint::Min(8),
                Constraint::Length(3),
            ])
            .split(f.area());

        render_title(f, chunks[0], app);
        render_message(f, chunks[1], app);

        let main_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
            .split(chunks[2]);

        render_frame(f, main_chunks[0], app);
        render_controls(f, main_chunks[1], app);

        render_progress(f, chunks[3], app);
    }

    fn render_title(f: &mut Frame, area: Rect, app: &VizApp) {
        let info = app.viz.info();
        let title = Paragraph::new(vec![Line::from(vec![
            Span::styled(
                format!(" {} ", info.name),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(format!("- {} ", info.summary)),
            Span::styled(
                format!("[{}]", info.category),
                Style::default().fg(Color::Gray),
            ),
        ])])
        .block(Block::default().borders(Borders::ALL).title("algoviz"));
        f.render_widget(title, area);
    }

    fn render_message(f: &mut Frame, area: Rect, app: &VizApp) {
        let mut lines = vec![Line::from(app.viz.message().to_string())];
        if let Some(result) = app.viz.result() {
            lines.push(Line::from(vec![
                Span::styled("Result: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    result.to_string(),
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
            ]));
        }
        let message = Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::ALL).title("Step"));
        f.render_widget(message, area);
    }

    fn render_frame(f: &mut Frame, area: Rect, app: &VizApp) {
        let lines: Vec<Line> = app.viz.render_lines().into_iter().map(Line::from).collect();
        let frame = Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL).title("State"));
        f.render_widget(frame, area);
    }

    fn render_controls(f: &mut Frame, area: Rect, app: &VizApp) {
        let status = app.status();
        let status_color = match status {
            "RUNNING" => Color::Green,
            "DONE" => Color::Cyan,
            _ => Color::Yellow,
        };

        let controls_text = vec![
            Line::from(vec![
                Span::raw("Status: "),
                Span::styled(status, Style::default().fg(status_color)),
            ]),
            Line::from(format!("Speed: {}", app.viz.speed())),
            Line::from(""),
            Line::from(Span::styled(
                "Controls:",
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(" Space  - Play / pause"),
            Line::from(" ←/→    - Step back / forward"),
            Line::from(" Home/End - First / last step"),
            Line::from(" +/-    - Adjust speed"),
            Line::from(" R      - Reset"),
            Line::from(" Tab    - Next algorithm"),
            Line::from(" Q      - Quit"),
        ];

        let controls = Paragraph::new(controls_text)
            .block(Block::default().borders(Borders::ALL).title("Controls"));

        f.render_widget(controls, area);
    }

    fn render_progress(f: &mut Frame, area: Rect, app: &VizApp) {
        let gauge = Gauge::default()
            .block(Block::default().borders(Borders::ALL))
            .gauge_style(Style::default().fg(Color::Cyan))
            .percent(app.progress_percent())
            .label(format!(
                "Step {}/{} | Frame: {}",
                app.viz.cursor() + 1,
                app.viz.trace_len(),
                app.frame_count
            ));
        f.render_widget(gauge, area);
    }

}
