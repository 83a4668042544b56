//! Envelope widget - the current table of each channel over one cycle

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    symbols,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType},
    Frame,
};

/// Points plotted per table
const PLOT_POINTS: usize = 256;

/// Render the left/right tables, x normalized to one cycle
pub fn render_envelope(frame: &mut Frame, area: Rect, left: &[f32], right: &[f32]) {
    let block = Block::default()
        .title(" Envelope ")
        .borders(Borders::ALL);

    let left_data = plot_points(left);
    let right_data = plot_points(right);

    let datasets = vec![
        Dataset::default()
            .name("L")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::Cyan))
            .data(&left_data),
        Dataset::default()
            .name("R")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::Magenta))
            .data(&right_data),
    ];

    let chart = Chart::new(datasets)
        .block(block)
        .x_axis(
            Axis::default()
                .bounds([0.0, 1.0])
                .style(Style::default().fg(Color::DarkGray)),
        )
        .y_axis(
            Axis::default()
                .bounds([0.0, 1.0])
                .labels(["0", "0.5", "1"])
                .style(Style::default().fg(Color::DarkGray)),
        );

    frame.render_widget(chart, area);
}

fn plot_points(table: &[f32]) -> Vec<(f64, f64)> {
    if table.is_empty() {
        return Vec::new();
    }
    let step = (table.len() / PLOT_POINTS).max(1);
    table
        .iter()
        .enumerate()
        .step_by(step)
        .map(|(i, &value)| (i as f64 / table.len() as f64, value as f64))
        .collect()
}
