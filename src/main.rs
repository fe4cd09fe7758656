//! Curvy - A terminal-based line and curve plotter.

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use curvy::app::{App, PromptKind};
use curvy::curve::{Frame, InterpolationKind, PlotConfiguration, PlotStyle};
use curvy::data::{normalize, Column, Normalized, TableReader};
use curvy::export::{export_frame, ExportStyle};
use curvy::labels::{resolve_labels, NoMath};
use curvy::ui::{self, format_range};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Instant;
use tracing::Level;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser, Debug)]
#[command(name = "curvy")]
#[command(about = "A terminal-based line and curve plotter", long_about = None)]
struct Args {
    /// Two-column CSV/TSV file to load at startup
    file: Option<PathBuf>,

    /// Plot style: lines, smooth or poly
    #[arg(long, default_value = "lines")]
    style: PlotStyle,

    /// Interpolation for smooth curves: linear, quadratic or cubic
    #[arg(long, default_value = "linear")]
    interpolation: InterpolationKind,

    /// Samples drawn along a smooth curve (100-10000)
    #[arg(long, default_value_t = 500)]
    samples: usize,

    /// Polynomial fit degree (1-10)
    #[arg(long, default_value_t = 2)]
    degree: usize,

    /// Request LaTeX math-mode labels
    #[arg(long)]
    latex: bool,

    /// Animation frame interval in milliseconds (50-2000)
    #[arg(long, default_value_t = 500)]
    interval: u64,

    /// Graph title
    #[arg(long, default_value = "Line Plot")]
    title: String,

    /// X axis label
    #[arg(long)]
    x_label: Option<String>,

    /// Y axis label
    #[arg(long)]
    y_label: Option<String>,

    /// Enable logging to specified file
    #[arg(long)]
    log: Option<PathBuf>,

    /// Print the plot summary and exit without opening the UI
    #[arg(long)]
    print: bool,

    /// Export the plot to a PNG or SVG file and exit
    #[arg(long)]
    export: Option<PathBuf>,

    /// Log to stderr in headless mode
    #[arg(long, short)]
    verbose: bool,
}

impl Args {
    fn headless(&self) -> bool {
        self.print || self.export.is_some()
    }

    fn plot_configuration(&self) -> PlotConfiguration {
        let mut config = PlotConfiguration::default()
            .with_style(self.style)
            .with_interpolation(self.interpolation)
            .with_sample_count(self.samples)
            .with_polynomial_degree(self.degree);
        config.use_latex = self.latex;
        config.title = self.title.clone();
        config.axis_labels = (
            self.x_label.clone().unwrap_or_default(),
            self.y_label.clone().unwrap_or_default(),
        );
        config
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(&args)?;

    // Validate path if provided
    if let Some(ref path) = args.file {
        if !path.is_file() {
            eprintln!("Error: File not found: {}", path.display());
            std::process::exit(1);
        }
    }

    if args.headless() {
        return run_headless(&args);
    }

    let mut app = App::new(args.plot_configuration(), args.interval);
    if let Some(ref path) = args.file {
        app.import(path);
        // Labels given on the command line win over a header row
        if let Some(x) = &args.x_label {
            app.set_axis_label(Column::X, x);
        }
        if let Some(y) = &args.y_label {
            app.set_axis_label(Column::Y, y);
        }
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app
    let res = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {}", err);
    }

    tracing::info!("Curvy exited");
    Ok(())
}

fn init_logging(args: &Args) -> Result<()> {
    if let Some(log_path) = &args.log {
        let file = std::fs::File::create(log_path)
            .with_context(|| format!("Failed to open log file {}", log_path.display()))?;
        let subscriber = FmtSubscriber::builder()
            .with_max_level(Level::DEBUG)
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .finish();
        tracing::subscriber::set_global_default(subscriber)?;
        tracing::info!("Starting Curvy");
    } else if args.verbose && args.headless() {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("curvy=debug"));
        let subscriber = FmtSubscriber::builder()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .finish();
        tracing::subscriber::set_global_default(subscriber)?;
    }
    Ok(())
}

/// Plot the data file without a terminal UI.
fn run_headless(args: &Args) -> Result<()> {
    let path = args
        .file
        .as_deref()
        .context("--print and --export need a data file")?;
    let table = TableReader::read_file(path)?;

    let mut config = args.plot_configuration();
    if let Some((x, y)) = table.header {
        if args.x_label.is_none() {
            config.axis_labels.0 = x;
        }
        if args.y_label.is_none() {
            config.axis_labels.1 = y;
        }
    }

    let Normalized { points, rejected } =
        normalize(table.rows.iter().map(|(x, y)| (x.as_str(), y.as_str())));
    for issue in &rejected {
        eprintln!("Skipped row {}: {}", issue.row, issue.problem);
    }

    let frame = Frame::plot(&points, &config)?;
    let labels = resolve_labels(&config, &NoMath);

    if args.print {
        println!("{}: {} points ({})", labels.title, points.len(), config.style);
        if let (Some((x0, x1)), Some((y0, y1))) = (points.x_range(), points.y_range()) {
            println!(
                "{}: {}  {}: {}",
                labels.x,
                format_range(x0, x1),
                labels.y,
                format_range(y0, y1)
            );
        }
        if let Some(fit) = &frame.curve.fit {
            println!("{}", fit.equation());
            println!("{}", fit.r_squared_text());
        }
        if let Some(fallback) = frame.curve.fallback {
            println!("Fallback: {}", fallback.describe());
        }
        if labels.fallback {
            println!("LaTeX unavailable, labels use superscripts");
        }
    }

    if let Some(out) = &args.export {
        export_frame(out, Some(&frame), &labels, &ExportStyle::default())?;
        println!("Exported {}", out.display());
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, mut app: App) -> Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, &mut app))?;

        if event::poll(app.poll_timeout(Instant::now()))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }

                // Prompt mode - handle separately
                if app.prompt.is_some() {
                    match key.code {
                        KeyCode::Enter => app.submit_prompt(),
                        KeyCode::Esc => app.cancel_prompt(),
                        KeyCode::Backspace => app.prompt_backspace(),
                        KeyCode::Char(c) => app.prompt_input(c),
                        _ => {}
                    }
                    continue;
                }

                // Help panel - any key closes it
                if app.show_help {
                    app.show_help = false;
                    if key.code == KeyCode::Char('q') {
                        return Ok(());
                    }
                    continue;
                }

                match (key.modifiers, key.code) {
                    // Quit
                    (KeyModifiers::NONE, KeyCode::Char('q')) => return Ok(()),

                    // Grid navigation
                    (KeyModifiers::NONE, KeyCode::Up)
                    | (KeyModifiers::NONE, KeyCode::Char('k')) => app.grid.cursor_up(),
                    (KeyModifiers::NONE, KeyCode::Down)
                    | (KeyModifiers::NONE, KeyCode::Char('j')) => app.grid.cursor_down(),
                    (KeyModifiers::NONE, KeyCode::Tab)
                    | (KeyModifiers::NONE, KeyCode::Left)
                    | (KeyModifiers::NONE, KeyCode::Right) => app.grid.toggle_column(),

                    // Grid editing
                    (KeyModifiers::NONE, KeyCode::Enter) => app.open_prompt(PromptKind::Cell),
                    (KeyModifiers::NONE, KeyCode::Char('a')) => app.add_row(),
                    (KeyModifiers::NONE, KeyCode::Char('d'))
                    | (KeyModifiers::NONE, KeyCode::Delete) => app.delete_row(),

                    // Plotting
                    (KeyModifiers::NONE, KeyCode::Char('p')) => app.plot(),
                    (KeyModifiers::NONE, KeyCode::Char(' ')) => {
                        app.toggle_animation(Instant::now());
                    }
                    (_, KeyCode::Char('+')) | (_, KeyCode::Char('=')) => app.speed_up(),
                    (KeyModifiers::NONE, KeyCode::Char('-')) => app.slow_down(),
                    (KeyModifiers::NONE, KeyCode::Esc) => app.stop_animation(),

                    // Configuration
                    (KeyModifiers::NONE, KeyCode::Char('s')) => app.cycle_style(),
                    (KeyModifiers::NONE, KeyCode::Char('i')) => app.cycle_interpolation(),
                    (KeyModifiers::NONE, KeyCode::Char('[')) => app.adjust_samples(-1),
                    (KeyModifiers::NONE, KeyCode::Char(']')) => app.adjust_samples(1),
                    (_, KeyCode::Char('<')) => app.adjust_degree(-1),
                    (_, KeyCode::Char('>')) => app.adjust_degree(1),
                    (_, KeyCode::Char('L')) => app.toggle_latex(),

                    // Labels
                    (KeyModifiers::NONE, KeyCode::Char('t')) => app.open_prompt(PromptKind::Title),
                    (KeyModifiers::NONE, KeyCode::Char('x')) => {
                        app.open_prompt(PromptKind::AxisLabel(Column::X));
                    }
                    (KeyModifiers::NONE, KeyCode::Char('y')) => {
                        app.open_prompt(PromptKind::AxisLabel(Column::Y));
                    }

                    // Files and clipboard
                    (KeyModifiers::NONE, KeyCode::Char('o')) => app.open_prompt(PromptKind::Import),
                    (KeyModifiers::NONE, KeyCode::Char('e')) => app.open_prompt(PromptKind::Export),
                    (KeyModifiers::NONE, KeyCode::Char('c')) => app.copy_equation(),

                    // Features
                    (_, KeyCode::Char('T')) => app.cycle_theme(),
                    (_, KeyCode::Char('?')) => app.show_help = true,

                    _ => {}
                }
            }
        }

        app.on_tick(Instant::now());
    }
}
