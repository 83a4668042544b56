//! Parameter panel - one column per channel, selected field highlighted

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use wavegain::engine::{
    params::{DEPTH_DB, PEAK_TIME, SPEED_BPM},
    ChannelMode, ChannelParams, WaveParams,
};

use super::state::Field;

/// Render both channel columns
pub fn render_params(
    frame: &mut Frame,
    area: Rect,
    params: &WaveParams,
    channel: usize,
    field: Field,
) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let linked = params.mode == ChannelMode::Mono;
    for (index, column) in columns.iter().enumerate() {
        let title = match (index, linked) {
            (0, _) => " Left ".to_string(),
            (_, true) => " Right (linked) ".to_string(),
            (_, false) => " Right ".to_string(),
        };
        let selected = index == channel && !(linked && index > 0);
        let block = Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(if selected {
                Color::Cyan
            } else {
                Color::DarkGray
            }));

        let lines = channel_lines(params.for_channel(index), selected.then_some(field));
        frame.render_widget(Paragraph::new(lines).block(block), *column);
    }
}

fn channel_lines(params: &ChannelParams, selected: Option<Field>) -> Vec<Line<'static>> {
    Field::ALL
        .iter()
        .map(|&field| {
            let value = match field {
                Field::Depth => DEPTH_DB.display(params.depth_db),
                Field::Speed => SPEED_BPM.display(params.speed_bpm),
                Field::Peak => PEAK_TIME.display(params.peak_fraction),
                Field::First => params.first.name().to_string(),
                Field::Second => params.second.name().to_string(),
            };
            let style = if selected == Some(field) {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            Line::from(vec![
                Span::styled(format!(" {:<10}", field.label()), Style::default().fg(Color::DarkGray)),
                Span::styled(value, style),
            ])
        })
        .collect()
}
