//! Output scope - decimated stereo output from the render thread

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    symbols,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType},
    Frame,
};

use super::state::OutputFrame;

/// Render the scrolling output
pub fn render_scope(frame: &mut Frame, area: Rect, output: &[OutputFrame]) {
    let block = Block::default()
        .title(" Output ")
        .borders(Borders::ALL);

    let len = output.len().max(1) as f64;
    let left: Vec<(f64, f64)> = output
        .iter()
        .enumerate()
        .map(|(i, f)| (i as f64 / len, f.left as f64))
        .collect();
    let right: Vec<(f64, f64)> = output
        .iter()
        .enumerate()
        .map(|(i, f)| (i as f64 / len, f.right as f64))
        .collect();

    let datasets = vec![
        Dataset::default()
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::Cyan))
            .data(&left),
        Dataset::default()
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::Magenta))
            .data(&right),
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
                .bounds([-1.0, 1.0])
                .style(Style::default().fg(Color::DarkGray)),
        );

    frame.render_widget(chart, area);
}
