//! Layout and control constants for the terminal UI.

/// Configuration for the entry grid panel.
#[derive(Debug, Clone)]
pub struct GridLayoutConfig {
    /// Total panel width in characters, borders included.
    pub panel_width: u16,
    /// Width of each value column.
    pub column_width: u16,
    /// Width of the row number column.
    pub row_header_width: u16,
    /// Rows taken by the border and the header line.
    pub border_padding: usize,
}

impl Default for GridLayoutConfig {
    fn default() -> Self {
        Self {
            panel_width: 34,
            column_width: 12,
            row_header_width: 5,
            border_padding: 3,
        }
    }
}

/// Configuration for the chart panel.
#[derive(Debug, Clone)]
pub struct ChartLayoutConfig {
    /// Padding factor applied to both axes (0.05 = 5% margin).
    pub axis_padding_factor: f64,
    /// Height of the fit info panel under the chart.
    pub info_height: u16,
}

impl Default for ChartLayoutConfig {
    fn default() -> Self {
        Self {
            axis_padding_factor: 0.05,
            info_height: 6,
        }
    }
}

/// Step sizes and timing for keyboard controls.
#[derive(Debug, Clone)]
pub struct ControlConfig {
    /// Longest time the event loop blocks waiting for input.
    pub poll_interval_ms: u64,
    /// Sample count change per key press.
    pub sample_step: usize,
    /// Animation interval change per key press.
    pub interval_step_ms: u64,
}

impl Default for ControlConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: 100,
            sample_step: 100,
            interval_step_ms: 50,
        }
    }
}

/// Combined layout configuration.
#[derive(Debug, Clone, Default)]
pub struct LayoutConfig {
    /// Entry grid panel.
    pub grid: GridLayoutConfig,
    /// Chart panel.
    pub chart: ChartLayoutConfig,
}
