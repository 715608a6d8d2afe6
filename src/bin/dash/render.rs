//! Rendering - chart/table descriptions to ratatui widgets
//!
//! The engine publishes renderer-agnostic descriptions; this module maps
//! them onto terminal widgets. Bars are drawn as unicode block lines,
//! tables with the ratatui table widget, line series with stacked charts.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{Axis, Block, Borders, Cell, Chart, Dataset as ChartDataset, GraphType, Paragraph, Row, Table},
    Frame,
};
use talkboard_core::view::{abbreviate_count, BarChart, LineChart, ScatterChart, TableSpec};
use talkboard_core::{ChartSpec, ViewResult};

/// Series colors, in declaration order
const SERIES_COLORS: [Color; 4] = [Color::Red, Color::LightRed, Color::Yellow, Color::Cyan];

const LABEL_WIDTH: usize = 26;

/// Render one panel's latest result inside a titled block
pub fn render_panel(f: &mut Frame, area: Rect, title: &str, focused: bool, result: &ViewResult) {
    let border_style = if focused {
        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(title.to_string());

    if result.is_empty() {
        let empty = Paragraph::new("no data in range").style(Style::default().fg(Color::DarkGray));
        f.render_widget(empty.block(block), area);
        return;
    }

    match result {
        ViewResult::Chart(ChartSpec::Bars(bars)) => render_bars(f, area, block, bars),
        ViewResult::Chart(ChartSpec::Scatter(scatter)) => render_scatter(f, area, block, scatter),
        ViewResult::Chart(ChartSpec::Lines(lines)) => render_lines(f, area, block, lines),
        ViewResult::Table(table) => render_table(f, area, block, table),
    }
}

/// Stacked horizontal unicode bars, largest at the top
fn render_bars(f: &mut Frame, area: Rect, block: Block, bars: &BarChart) {
    let inner_width = area.width.saturating_sub(2) as usize;
    let bar_space = inner_width.saturating_sub(LABEL_WIDTH + 10).max(8);

    let totals: Vec<f64> = (0..bars.categories.len())
        .map(|i| bars.series.iter().map(|s| s.values[i]).sum())
        .collect();
    let max_total = totals.iter().cloned().fold(0.0_f64, f64::max).max(1.0);

    let mut lines = Vec::new();
    // The engine emits ascending order; draw the largest first
    for i in (0..bars.categories.len()).rev() {
        let mut spans = vec![Span::raw(format!(
            "{:<width$} ",
            truncate(&bars.categories[i], LABEL_WIDTH),
            width = LABEL_WIDTH
        ))];
        for (s, series) in bars.series.iter().enumerate() {
            let cells = (series.values[i] / max_total * bar_space as f64).round() as usize;
            spans.push(Span::styled(
                "█".repeat(cells),
                Style::default().fg(SERIES_COLORS[s % SERIES_COLORS.len()]),
            ));
        }
        spans.push(Span::styled(
            format!(" {}", format_value(totals[i])),
            Style::default().fg(Color::Gray),
        ));
        lines.push(Line::from(spans));
    }

    // Legend line naming each series in its color
    let mut legend = vec![Span::raw(format!("{:<width$} ", "", width = LABEL_WIDTH))];
    for (s, series) in bars.series.iter().enumerate() {
        legend.push(Span::styled(
            format!("■ {}  ", series.name),
            Style::default().fg(SERIES_COLORS[s % SERIES_COLORS.len()]),
        ));
    }
    lines.push(Line::from(legend));

    f.render_widget(Paragraph::new(lines).block(block), area);
}

/// Scatter as one row per point: bubble sized by the size channel
fn render_scatter(f: &mut Frame, area: Rect, block: Block, scatter: &ScatterChart) {
    let mut lines = Vec::new();
    for point in scatter.points.iter().rev() {
        let bubbles = "●".repeat((point.size as usize).clamp(1, 8));
        lines.push(Line::from(vec![
            Span::raw(format!(
                "{:<width$} ",
                truncate(&point.label, LABEL_WIDTH),
                width = LABEL_WIDTH
            )),
            Span::styled(format!("{bubbles:<9}"), Style::default().fg(Color::Red)),
            Span::styled(
                format!("{} views  ", format_value(point.x)),
                Style::default().fg(Color::Gray),
            ),
            Span::styled(
                format!("{} likes", format_value(point.color)),
                Style::default().fg(Color::LightRed),
            ),
        ]));
    }
    lines.push(Line::from(Span::styled(
        "bubble size = video count",
        Style::default().fg(Color::DarkGray),
    )));
    f.render_widget(Paragraph::new(lines).block(block), area);
}

/// Stacked line charts sharing the x domain
fn render_lines(f: &mut Frame, area: Rect, block: Block, chart: &LineChart) {
    let inner = block.inner(area);
    f.render_widget(block, area);

    let constraints: Vec<Constraint> = chart
        .series
        .iter()
        .map(|_| Constraint::Ratio(1, chart.series.len().max(1) as u32))
        .collect();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(inner);

    let (x_min, x_max) = chart
        .series
        .iter()
        .flat_map(|s| s.points.iter())
        .fold((f64::MAX, f64::MIN), |(lo, hi), p| (lo.min(p.0), hi.max(p.0)));

    for (i, series) in chart.series.iter().enumerate() {
        let y_max = series
            .points
            .iter()
            .map(|p| p.1)
            .fold(0.0_f64, f64::max)
            .max(1.0);
        let dataset = ChartDataset::default()
            .name(series.name.clone())
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(SERIES_COLORS[i % SERIES_COLORS.len()]))
            .data(&series.points);
        let widget = Chart::new(vec![dataset])
            .block(Block::default().title(series.title.clone()))
            .x_axis(
                Axis::default()
                    .title(chart.x_title.clone())
                    .style(Style::default().fg(Color::DarkGray))
                    .bounds([x_min, x_max])
                    .labels([format!("{x_min:.0}"), format!("{x_max:.0}")]),
            )
            .y_axis(
                Axis::default()
                    .style(Style::default().fg(Color::DarkGray))
                    .bounds([0.0, y_max])
                    .labels(["0".to_string(), format_value(y_max)]),
            );
        f.render_widget(widget, chunks[i]);
    }
}

/// Table with the linked title column first
fn render_table(f: &mut Frame, area: Rect, block: Block, table: &TableSpec) {
    let header = Row::new(
        table
            .columns
            .iter()
            .map(|c| Cell::from(c.clone()).style(Style::default().add_modifier(Modifier::BOLD))),
    )
    .style(Style::default().fg(Color::Red));

    let rows: Vec<Row> = table
        .rows
        .iter()
        .map(|row| {
            let mut cells = vec![Cell::from(row.title.clone()).style(
                Style::default()
                    .fg(Color::LightBlue)
                    .add_modifier(Modifier::UNDERLINED),
            )];
            cells.extend(row.cells.iter().map(|c| Cell::from(c.clone())));
            Row::new(cells)
        })
        .collect();

    let widths = [
        Constraint::Percentage(40),
        Constraint::Percentage(20),
        Constraint::Percentage(14),
        Constraint::Percentage(13),
        Constraint::Percentage(13),
    ];
    f.render_widget(Table::new(rows, widths).header(header).block(block), area);
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        text.to_string()
    } else {
        let cut: String = text.chars().take(width.saturating_sub(1)).collect();
        format!("{cut}…")
    }
}

fn format_value(value: f64) -> String {
    if value >= 1000.0 {
        abbreviate_count(value.round() as u64)
    } else if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.2}")
    }
}
