//! Application state and logic.
//!
//! Every user action goes through [`App`], so the whole interaction model can
//! be exercised without a terminal.

use std::path::Path;
use std::time::{Duration, Instant};

use crate::animation::Sequencer;
use crate::clipboard::copy_to_clipboard;
use crate::curve::{Frame, PlotConfiguration};
use crate::data::{normalize, Column, EntryGrid, Normalized, RowIssue, TableReader};
use crate::export::{export_frame, ExportStyle};
use crate::labels::{resolve_labels, Labels, NoMath};
use crate::util::layout_config::ControlConfig;

/// Application theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    /// Gruvbox dark theme.
    GruvboxDark,
    /// Gruvbox light theme.
    GruvboxLight,
}

impl Theme {
    /// Get the next theme in the cycle.
    pub fn next(self) -> Self {
        match self {
            Theme::GruvboxDark => Theme::GruvboxLight,
            Theme::GruvboxLight => Theme::GruvboxDark,
        }
    }

    /// Get the theme name.
    pub fn name(self) -> &'static str {
        match self {
            Theme::GruvboxDark => "Gruvbox Dark",
            Theme::GruvboxLight => "Gruvbox Light",
        }
    }
}

/// What a text prompt is collecting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    /// Value of the grid cell under the cursor.
    Cell,
    /// Graph title.
    Title,
    /// An axis label.
    AxisLabel(Column),
    /// Path of a table to import.
    Import,
    /// Path to export the plot to.
    Export,
}

impl PromptKind {
    /// Prompt caption.
    pub fn caption(self) -> &'static str {
        match self {
            PromptKind::Cell => "Value",
            PromptKind::Title => "Title",
            PromptKind::AxisLabel(Column::X) => "X label",
            PromptKind::AxisLabel(Column::Y) => "Y label",
            PromptKind::Import => "Import file",
            PromptKind::Export => "Export to",
        }
    }
}

/// An open single-line text prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    /// What is being entered.
    pub kind: PromptKind,
    /// Text typed so far.
    pub buffer: String,
}

/// Application state.
#[derive(Debug)]
pub struct App {
    /// Typed or imported data rows.
    pub grid: EntryGrid,
    /// Current plot settings.
    pub config: PlotConfiguration,
    /// Animation state machine.
    pub sequencer: Sequencer,
    /// What the chart currently shows.
    pub frame: Option<Frame>,
    /// Labels the chart is drawn with.
    pub labels: Labels,
    /// Rows left out of the last plot.
    pub rejected: Vec<RowIssue>,
    /// Open text prompt.
    pub prompt: Option<Prompt>,
    /// Status message.
    pub status: String,
    /// Current theme.
    pub theme: Theme,
    /// Show the key help panel.
    pub show_help: bool,
    controls: ControlConfig,
}

impl App {
    /// Create a new application instance.
    pub fn new(config: PlotConfiguration, interval_ms: u64) -> Self {
        let labels = resolve_labels(&config, &NoMath);
        Self {
            grid: EntryGrid::new(),
            config,
            sequencer: Sequencer::new(interval_ms),
            frame: None,
            labels,
            rejected: Vec::new(),
            prompt: None,
            status: "Ready".to_string(),
            theme: Theme::GruvboxDark,
            show_help: false,
            controls: ControlConfig::default(),
        }
    }

    /// Normalize the grid into a point set.
    pub fn points(&self) -> Normalized {
        normalize(self.grid.rows().iter().map(|(x, y)| (x.as_str(), y.as_str())))
    }

    /// Build the full curve from the grid.
    ///
    /// Stops any running animation. On failure the status explains why and
    /// the chart keeps what it was showing.
    pub fn plot(&mut self) {
        self.sequencer.stop();
        let Normalized { points, rejected } = self.points();
        self.rejected = rejected;

        match Frame::plot(&points, &self.config) {
            Ok(frame) => {
                self.labels = resolve_labels(&self.config, &NoMath);
                self.status = self.plot_summary(points.len(), &frame);
                self.frame = Some(frame);
            }
            Err(e) => {
                tracing::warn!("Plot refused: {}", e);
                self.status = e.to_string();
            }
        }
    }

    fn plot_summary(&self, count: usize, frame: &Frame) -> String {
        let mut summary = format!("Plotted {} points ({})", count, self.config.style);
        if let Some(fallback) = frame.curve.fallback {
            summary.push_str(&format!("; {}", fallback.describe()));
        }
        if self.labels.fallback {
            summary.push_str("; LaTeX unavailable, using superscript labels");
        }
        if !self.rejected.is_empty() {
            let rows: Vec<String> = self.rejected.iter().map(|r| r.row.to_string()).collect();
            summary.push_str(&format!("; skipped rows {}", rows.join(", ")));
        }
        summary
    }

    /// Stop animating if needed and replot when something was on screen.
    fn refresh(&mut self) {
        let was_running = self.sequencer.stop();
        if was_running || self.frame.is_some() {
            self.plot();
        } else {
            self.labels = resolve_labels(&self.config, &NoMath);
        }
    }

    /// Start animating, or stop if already running.
    pub fn toggle_animation(&mut self, now: Instant) {
        if self.sequencer.is_running() {
            self.stop_animation();
            return;
        }

        let Normalized { points, rejected } = self.points();
        self.rejected = rejected;
        match self.sequencer.start(&points, now) {
            Ok(()) => {
                self.labels = resolve_labels(&self.config, &NoMath);
                self.status = format!("Animating ({} ms per frame)", self.sequencer.interval_ms());
            }
            Err(e) => {
                tracing::warn!("Animation refused: {}", e);
                self.status = e.to_string();
            }
        }
    }

    /// Stop animating and show the full curve.
    pub fn stop_animation(&mut self) {
        if self.sequencer.stop() {
            self.plot();
        }
    }

    /// Advance the animation if a frame is due. Returns whether the chart changed.
    pub fn on_tick(&mut self, now: Instant) -> bool {
        if !self.sequencer.is_running() {
            return false;
        }
        let points = self.points().points;
        match self.sequencer.tick(&points, &self.config, now) {
            Some(Ok(frame)) => {
                self.frame = Some(frame);
                true
            }
            Some(Err(e)) => {
                tracing::warn!("Animation frame failed: {}", e);
                self.status = e.to_string();
                true
            }
            None => false,
        }
    }

    /// How long the event loop may block waiting for input.
    pub fn poll_timeout(&self, now: Instant) -> Duration {
        let idle = Duration::from_millis(self.controls.poll_interval_ms);
        self.sequencer
            .time_until_tick(now)
            .map_or(idle, |due| due.min(idle))
    }

    /// Next plot style.
    pub fn cycle_style(&mut self) {
        self.config.style = self.config.style.next();
        self.refresh();
        self.status = format!("Style: {}", self.config.style);
    }

    /// Next interpolation kind.
    pub fn cycle_interpolation(&mut self) {
        self.config.interpolation = self.config.interpolation.next();
        self.refresh();
        self.status = format!("Interpolation: {}", self.config.interpolation);
    }

    /// Change the smooth curve sample count by `steps` increments.
    pub fn adjust_samples(&mut self, steps: isize) {
        let delta = steps.saturating_mul(self.controls.sample_step as isize);
        let count = self.config.sample_count().saturating_add_signed(delta);
        self.config.set_sample_count(count);
        self.refresh();
        self.status = format!("Samples: {}", self.config.sample_count());
    }

    /// Change the polynomial degree.
    pub fn adjust_degree(&mut self, delta: isize) {
        let degree = self.config.polynomial_degree().saturating_add_signed(delta);
        self.config.set_polynomial_degree(degree);
        self.refresh();
        self.status = format!("Polynomial degree: {}", self.config.polynomial_degree());
    }

    /// Toggle math-mode labels.
    pub fn toggle_latex(&mut self) {
        self.config.use_latex = !self.config.use_latex;
        self.refresh();
        self.status = if self.labels.fallback {
            "LaTeX: ON (unavailable here, using superscript labels)".to_string()
        } else if self.config.use_latex {
            "LaTeX: ON".to_string()
        } else {
            "LaTeX: OFF".to_string()
        };
    }

    /// Set the graph title.
    pub fn set_title(&mut self, title: &str) {
        self.config.title = title.to_string();
        self.refresh();
    }

    /// Set one axis label.
    pub fn set_axis_label(&mut self, column: Column, text: &str) {
        match column {
            Column::X => self.config.axis_labels.0 = text.to_string(),
            Column::Y => self.config.axis_labels.1 = text.to_string(),
        }
        self.refresh();
    }

    /// Overwrite the cell under the cursor.
    pub fn edit_cell(&mut self, text: &str) {
        self.grid.set_current_cell(text.trim());
        self.refresh();
    }

    /// Append an empty row and move onto it.
    pub fn add_row(&mut self) {
        self.grid.add_row();
        self.refresh();
        self.status = format!("{} rows", self.grid.len());
    }

    /// Delete the row under the cursor.
    pub fn delete_row(&mut self) {
        if self.grid.delete_row() {
            self.refresh();
        } else {
            self.status = "No row to delete".to_string();
        }
    }

    /// Replace the grid with a two-column table from disk.
    ///
    /// A header row becomes the axis labels. On any error nothing changes.
    pub fn import(&mut self, path: &Path) {
        match TableReader::read_file(path) {
            Ok(table) => {
                let count = table.rows.len();
                if let Some(header) = table.header {
                    self.config.axis_labels = header;
                }
                self.grid.replace(table.rows);
                self.sequencer.stop();
                self.plot();
                if self.frame.is_some() {
                    self.status = format!("Imported {} rows from {}", count, path.display());
                }
            }
            Err(e) => {
                tracing::error!("Import failed: {}", e);
                self.status = e.to_string();
            }
        }
    }

    /// Write the current chart to an image file.
    pub fn export(&mut self, path: &Path) {
        let style = ExportStyle::new(self.theme == Theme::GruvboxDark);
        match export_frame(path, self.frame.as_ref(), &self.labels, &style) {
            Ok(()) => self.status = format!("Exported {}", path.display()),
            Err(e) => {
                tracing::error!("{}", e);
                self.status = e.to_string();
            }
        }
    }

    /// Equation and R² of the current polynomial fit.
    pub fn equation_text(&self) -> Option<String> {
        let fit = self.frame.as_ref()?.curve.fit.as_ref()?;
        Some(format!("{}\n{}", fit.equation(), fit.r_squared_text()))
    }

    /// Copy the fitted equation to the clipboard.
    pub fn copy_equation(&mut self) {
        let Some(text) = self.equation_text() else {
            self.status = "No polynomial fit to copy".to_string();
            return;
        };
        match copy_to_clipboard(&text) {
            Ok(()) => self.status = "Equation copied!".to_string(),
            Err(e) => self.status = format!("Copy failed: {}", e),
        }
    }

    /// Shorten the animation interval.
    pub fn speed_up(&mut self) {
        let ms = self.sequencer.interval_ms();
        let ms = self
            .sequencer
            .set_interval_ms(ms.saturating_sub(self.controls.interval_step_ms));
        self.status = format!("Animation interval: {} ms", ms);
    }

    /// Lengthen the animation interval.
    pub fn slow_down(&mut self) {
        let ms = self.sequencer.interval_ms();
        let ms = self
            .sequencer
            .set_interval_ms(ms + self.controls.interval_step_ms);
        self.status = format!("Animation interval: {} ms", ms);
    }

    /// Cycle to the next theme.
    pub fn cycle_theme(&mut self) {
        self.theme = self.theme.next();
        self.status = format!("Theme: {}", self.theme.name());
    }

    /// Open a text prompt, pre-filled with the current value where there is one.
    pub fn open_prompt(&mut self, kind: PromptKind) {
        let buffer = match kind {
            PromptKind::Cell => self.grid.current_cell().unwrap_or_default().to_string(),
            PromptKind::Title => self.config.title.clone(),
            PromptKind::AxisLabel(Column::X) => self.config.axis_labels.0.clone(),
            PromptKind::AxisLabel(Column::Y) => self.config.axis_labels.1.clone(),
            PromptKind::Import | PromptKind::Export => String::new(),
        };
        self.prompt = Some(Prompt { kind, buffer });
    }

    /// Type a character into the prompt.
    pub fn prompt_input(&mut self, c: char) {
        if let Some(prompt) = self.prompt.as_mut() {
            prompt.buffer.push(c);
        }
    }

    /// Delete the last prompt character.
    pub fn prompt_backspace(&mut self) {
        if let Some(prompt) = self.prompt.as_mut() {
            prompt.buffer.pop();
        }
    }

    /// Close the prompt without applying it.
    pub fn cancel_prompt(&mut self) {
        self.prompt = None;
    }

    /// Apply the prompt's text.
    pub fn submit_prompt(&mut self) {
        let Some(Prompt { kind, buffer }) = self.prompt.take() else {
            return;
        };
        match kind {
            PromptKind::Cell => self.edit_cell(&buffer),
            PromptKind::Title => self.set_title(&buffer),
            PromptKind::AxisLabel(column) => self.set_axis_label(column, &buffer),
            PromptKind::Import | PromptKind::Export if buffer.trim().is_empty() => {
                self.status = "No file given".to_string();
            }
            PromptKind::Import => self.import(Path::new(buffer.trim())),
            PromptKind::Export => self.export(Path::new(buffer.trim())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::DEFAULT_INTERVAL_MS;
    use crate::curve::PlotStyle;
    use std::io::Write;

    fn app_with(rows: &[(&str, &str)]) -> App {
        let mut app = App::new(PlotConfiguration::default(), DEFAULT_INTERVAL_MS);
        app.grid = EntryGrid::from_rows(
            rows.iter()
                .map(|(x, y)| (x.to_string(), y.to_string()))
                .collect(),
        );
        app
    }

    fn sample() -> App {
        app_with(&[("0", "1"), ("2", "5"), ("1", "2"), ("3", "3")])
    }

    #[test]
    fn plot_reports_skipped_rows() {
        let mut app = app_with(&[("0", "1"), ("abc", "2"), ("", ""), ("2", "")]);
        app.plot();
        // Only one valid point: nothing is drawn.
        assert!(app.frame.is_none());
        assert!(app.status.contains("at least two"));
        assert_eq!(app.rejected.len(), 2);
        assert_eq!(app.rejected[0].row, 2);
    }

    #[test]
    fn insufficient_data_keeps_previous_frame() {
        let mut app = sample();
        app.plot();
        let before = app.frame.clone();
        assert!(before.is_some());

        app.grid = EntryGrid::from_rows(vec![("1".into(), "1".into())]);
        app.plot();
        assert_eq!(app.frame, before);
        assert!(app.status.contains("at least two"));
    }

    #[test]
    fn animation_round_trip_matches_manual_plot() {
        let mut app = sample();
        app.config.style = PlotStyle::SmoothCurve;
        app.plot();
        let manual = app.frame.clone();

        let now = Instant::now();
        app.toggle_animation(now);
        assert!(app.sequencer.is_running());
        assert!(app.on_tick(now));
        assert_ne!(app.frame, manual);

        app.toggle_animation(now);
        assert!(!app.sequencer.is_running());
        assert_eq!(app.frame, manual);
    }

    #[test]
    fn add_row_during_animation_restores_manual_plot() {
        let mut app = sample();
        app.plot();
        let manual = app.frame.clone();

        let now = Instant::now();
        app.toggle_animation(now);
        assert!(app.on_tick(now));
        assert_ne!(app.frame, manual);

        app.add_row();
        assert!(!app.sequencer.is_running());
        assert_eq!(app.frame, manual);
        assert_eq!(app.grid.len(), 5);
        assert_eq!(app.status, "5 rows");
    }

    #[test]
    fn animation_refused_with_one_point() {
        let mut app = app_with(&[("1", "1")]);
        app.toggle_animation(Instant::now());
        assert!(!app.sequencer.is_running());
        assert!(app.frame.is_none());
    }

    #[test]
    fn edits_stop_animation_and_replot() {
        let mut app = sample();
        let now = Instant::now();
        app.toggle_animation(now);
        app.on_tick(now);

        app.edit_cell("10");
        assert!(!app.sequencer.is_running());
        let bounds = app.frame.as_ref().unwrap().bounds;
        assert_eq!(bounds.x, [1.0, 10.0]);

        app.toggle_animation(now);
        app.cycle_style();
        assert!(!app.sequencer.is_running());
        assert_eq!(app.config.style, PlotStyle::SmoothCurve);
    }

    #[test]
    fn poll_timeout_follows_next_tick() {
        let mut app = sample();
        let now = Instant::now();
        assert_eq!(app.poll_timeout(now), Duration::from_millis(100));
        app.toggle_animation(now);
        assert_eq!(app.poll_timeout(now), Duration::ZERO);
        app.on_tick(now);
        assert_eq!(app.poll_timeout(now), Duration::from_millis(100));
    }

    #[test]
    fn speed_changes_are_clamped() {
        let mut app = sample();
        for _ in 0..20 {
            app.speed_up();
        }
        assert_eq!(app.sequencer.interval_ms(), 50);
        for _ in 0..100 {
            app.slow_down();
        }
        assert_eq!(app.sequencer.interval_ms(), 2000);
    }

    #[test]
    fn settings_are_clamped() {
        let mut app = sample();
        app.adjust_samples(-10);
        assert_eq!(app.config.sample_count(), 100);
        app.adjust_degree(-5);
        assert_eq!(app.config.polynomial_degree(), 1);
        app.adjust_degree(3);
        assert_eq!(app.config.polynomial_degree(), 4);
    }

    #[test]
    fn import_uses_header_for_labels() {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(file, "time,distance").unwrap();
        writeln!(file, "0,0").unwrap();
        writeln!(file, "1,2").unwrap();
        writeln!(file, "2,8").unwrap();

        let mut app = App::new(PlotConfiguration::default(), DEFAULT_INTERVAL_MS);
        app.import(file.path());
        assert_eq!(app.grid.len(), 3);
        assert_eq!(app.labels.x, "time");
        assert_eq!(app.labels.y, "distance");
        assert!(app.frame.is_some());
    }

    #[test]
    fn bad_import_changes_nothing() {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(file, "0,0").unwrap();
        writeln!(file, "1,2,3").unwrap();

        let mut app = sample();
        app.import(file.path());
        assert_eq!(app.grid.len(), 4);
        assert!(app.status.contains("expected 2 columns"));
    }

    #[test]
    fn equation_only_for_polynomial_fit() {
        let mut app = app_with(&[("0", "0"), ("1", "1"), ("2", "2")]);
        app.plot();
        assert_eq!(app.equation_text(), None);

        app.config.style = PlotStyle::PolynomialFit;
        app.adjust_degree(-1);
        let text = app.equation_text().unwrap();
        assert!(text.starts_with("y = 1.0000x"));
        assert!(text.ends_with("R² = 1.0000"));
    }

    #[test]
    fn prompts_apply_on_submit() {
        let mut app = sample();
        app.open_prompt(PromptKind::AxisLabel(Column::X));
        for c in "t^2".chars() {
            app.prompt_input(c);
        }
        app.submit_prompt();
        assert!(app.prompt.is_none());
        assert_eq!(app.labels.x, "t²");

        app.open_prompt(PromptKind::Title);
        app.prompt_backspace();
        app.cancel_prompt();
        assert_eq!(app.config.title, "Line Plot");
    }

    #[test]
    fn latex_toggle_falls_back_in_the_terminal() {
        let mut app = sample();
        app.plot();
        app.toggle_latex();
        assert!(app.labels.fallback);
        assert!(app.status.contains("superscript"));
    }
}
