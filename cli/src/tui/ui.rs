use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{
        Axis, Bar, BarChart, BarGroup, Block, BorderType, Borders, Chart, Dataset, Gauge,
        GraphType, List, ListItem, Paragraph, Row, Table, Tabs, Wrap,
    },
    Frame,
};

use crate::tui::app::{App, View};

// --- THEME ---
struct Theme {
    primary: Color,
    muted: Color,
    text: Color,
    warn: Color,
}

const THEME: Theme = Theme {
    primary: Color::Cyan,
    muted: Color::DarkGray,
    text: Color::White,
    warn: Color::Red,
};

const PALETTE: [Color; 6] = [
    Color::Cyan,
    Color::Green,
    Color::Yellow,
    Color::Magenta,
    Color::Blue,
    Color::Red,
];

pub fn draw(f: &mut Frame, app: &mut App) {
    let size = f.area();

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header / view tabs
            Constraint::Min(10),   // Content
            Constraint::Length(1), // Footer/Help
        ])
        .split(size);

    draw_header(f, app, main_chunks[0]);

    // A fatal load/schema error replaces the whole dashboard; nothing
    // partial is shown next to it.
    if let Some(err) = app.error.clone() {
        let error = Paragraph::new(err)
            .style(Style::default().fg(THEME.warn))
            .wrap(Wrap { trim: false })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(Style::default().fg(THEME.warn))
                    .title(" Error "),
            );
        f.render_widget(error, main_chunks[1]);
    } else {
        let content_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(26), // Date multi-select
                Constraint::Min(1),     // Active view
            ])
            .split(main_chunks[1]);

        draw_date_sidebar(f, app, content_chunks[0]);

        if app.show_raw {
            draw_raw_rows(f, app, content_chunks[1]);
        } else {
            match app.view {
                View::Summary => draw_summary(f, app, content_chunks[1]),
                View::ActivityShare => draw_activity_share(f, app, content_chunks[1]),
                View::Trend => draw_trend(f, app, content_chunks[1]),
                View::DailyTotals => draw_daily_totals(f, app, content_chunks[1]),
                View::Imbalance => draw_imbalance(f, app, content_chunks[1]),
            }
        }
    }

    draw_footer(f, app, main_chunks[2]);
}

fn draw_header(f: &mut Frame, app: &App, area: Rect) {
    let header_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(12), Constraint::Min(1)])
        .split(area);

    let title = Paragraph::new(Span::styled(
        "ROUTINELY",
        Style::default()
            .fg(THEME.primary)
            .add_modifier(Modifier::BOLD),
    ))
    .block(Block::default().borders(Borders::BOTTOM))
    .alignment(Alignment::Left);
    f.render_widget(title, header_chunks[0]);

    let titles: Vec<Line> = View::ALL
        .iter()
        .enumerate()
        .map(|(i, v)| Line::from(format!("{} {}", i + 1, v.title())))
        .collect();
    let tabs = Tabs::new(titles)
        .select(app.view.index())
        .style(Style::default().fg(THEME.muted))
        .highlight_style(
            Style::default()
                .fg(THEME.text)
                .add_modifier(Modifier::BOLD),
        )
        .block(Block::default().borders(Borders::BOTTOM));
    f.render_widget(tabs, header_chunks[1]);
}

fn draw_date_sidebar(f: &mut Frame, app: &mut App, area: Rect) {
    let items: Vec<ListItem> = app
        .date_options
        .iter()
        .map(|date| {
            let checked = app.selected.contains(date);
            let mark = if checked { "[x]" } else { "[ ]" };
            let style = if checked {
                Style::default().fg(THEME.text)
            } else {
                Style::default().fg(THEME.muted)
            };
            ListItem::new(Span::styled(
                format!("{} {}", mark, date.format("%Y-%m-%d")),
                style,
            ))
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(THEME.muted))
                .title(" Dates "),
        )
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol(">> ");

    f.render_stateful_widget(list, area, &mut app.cursor);
}

fn view_block(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(THEME.muted))
        .title(format!(" {} ", title))
}

fn draw_empty(f: &mut Frame, title: &str, area: Rect) {
    let empty = Paragraph::new("No data for the selected dates")
        .style(Style::default().fg(THEME.muted))
        .alignment(Alignment::Center)
        .block(view_block(title));
    f.render_widget(empty, area);
}

fn draw_summary(f: &mut Frame, app: &App, area: Rect) {
    let pivot = &app.dashboard.pivot;
    if pivot.is_empty() {
        return draw_empty(f, "Summary", area);
    }

    let mut header = vec!["Date".to_string()];
    header.extend(pivot.activities.iter().cloned());

    let rows: Vec<Row> = pivot
        .dates
        .iter()
        .enumerate()
        .map(|(i, date)| {
            let mut cells = vec![date.format("%Y-%m-%d").to_string()];
            cells.extend(pivot.cells[i].iter().map(|h| format!("{:.1}", h)));
            Row::new(cells)
        })
        .collect();

    let mut widths = vec![Constraint::Length(12)];
    widths.extend(pivot.activities.iter().map(|_| Constraint::Min(8)));

    let table = Table::new(rows, widths)
        .header(Row::new(header).style(Style::default().fg(THEME.primary)))
        .block(view_block("Summary (hours)"));

    f.render_widget(table, area);
}

fn draw_activity_share(f: &mut Frame, app: &App, area: Rect) {
    let totals = &app.dashboard.activity_totals;
    let grand_total: f64 = totals.iter().map(|t| t.hours).sum();
    if totals.is_empty() || grand_total <= 0.0 {
        return draw_empty(f, "Total Time by Activity", area);
    }

    let block = view_block("Total Time by Activity");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let mut constraints = vec![Constraint::Length(2); totals.len()];
    constraints.push(Constraint::Min(0));
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(inner);

    for (i, total) in totals.iter().enumerate() {
        let share = total.hours / grand_total;
        let gauge = Gauge::default()
            .block(Block::default().title(total.activity.clone()))
            .gauge_style(Style::default().fg(PALETTE[i % PALETTE.len()]))
            .ratio(share.clamp(0.0, 1.0))
            .label(format!("{:.1}h ({:.1}%)", total.hours, share * 100.0));
        f.render_widget(gauge, rows[i]);
    }
}

fn draw_trend(f: &mut Frame, app: &App, area: Rect) {
    let series = &app.dashboard.time_series;
    if series.is_empty() {
        return draw_empty(f, "Activity Trend", area);
    }

    let points: Vec<Vec<(f64, f64)>> = (0..series.activities.len())
        .map(|col| {
            series
                .cells
                .iter()
                .enumerate()
                .map(|(row, cells)| (row as f64, cells[col]))
                .collect()
        })
        .collect();

    let datasets: Vec<Dataset> = series
        .activities
        .iter()
        .zip(points.iter())
        .enumerate()
        .map(|(i, (activity, data))| {
            Dataset::default()
                .name(activity.clone())
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(PALETTE[i % PALETTE.len()]))
                .data(data)
        })
        .collect();

    let max_hours = series
        .cells
        .iter()
        .flatten()
        .fold(0.0_f64, |acc, h| acc.max(*h));
    let y_max = if max_hours <= 0.0 { 1.0 } else { max_hours * 1.1 };
    let x_max = (series.dates.len().saturating_sub(1)).max(1) as f64;

    let x_labels: Vec<Line> = [
        series.dates.first(),
        series.dates.get(series.dates.len() / 2),
        series.dates.last(),
    ]
    .iter()
    .flatten()
    .map(|d| Line::from(d.format("%m-%d").to_string()))
    .collect();

    let chart = Chart::new(datasets)
        .block(view_block("Activity Trend"))
        .x_axis(
            Axis::default()
                .style(Style::default().fg(THEME.muted))
                .bounds([0.0, x_max])
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .style(Style::default().fg(THEME.muted))
                .bounds([0.0, y_max])
                .labels(vec![
                    Line::from("0"),
                    Line::from(format!("{:.1}", y_max / 2.0)),
                    Line::from(format!("{:.1}", y_max)),
                ]),
        );

    f.render_widget(chart, area);
}

fn draw_daily_totals(f: &mut Frame, app: &App, area: Rect) {
    let daily = &app.dashboard.daily_totals;
    if daily.is_empty() {
        return draw_empty(f, "Daily Hours Balance", area);
    }

    // Values are scaled by 10 so one decimal survives the u64 bar heights;
    // text_value shows the real total.
    let bars: Vec<Bar> = daily
        .iter()
        .map(|day| {
            let color = if day.hours != 24.0 {
                THEME.warn
            } else {
                PALETTE[1]
            };
            Bar::default()
                .label(day.date.format("%m-%d").to_string())
                .value((day.hours * 10.0).round() as u64)
                .style(Style::default().fg(color))
                .text_value(format!("{:.1}", day.hours))
        })
        .collect();

    let chart = BarChart::default()
        .block(view_block("Daily Hours Balance"))
        .bar_width(7)
        .bar_gap(2)
        .data(BarGroup::default().bars(&bars))
        .max(240); // 24h * 10

    f.render_widget(chart, area);
}

fn draw_imbalance(f: &mut Frame, app: &App, area: Rect) {
    let imbalanced = &app.dashboard.imbalanced;
    if imbalanced.is_empty() {
        let all_good = Paragraph::new("Every selected day sums to 24 hours")
            .style(Style::default().fg(PALETTE[1]))
            .alignment(Alignment::Center)
            .block(view_block("Days with <24 or >24 hours"));
        f.render_widget(all_good, area);
        return;
    }

    let rows: Vec<Row> = imbalanced
        .iter()
        .map(|day| {
            Row::new(vec![
                day.date.format("%Y-%m-%d").to_string(),
                format!("{:.1}", day.hours),
            ])
            .style(Style::default().fg(THEME.warn))
        })
        .collect();

    let table = Table::new(rows, [Constraint::Length(12), Constraint::Length(10)])
        .header(Row::new(vec!["Date", "Total (h)"]).style(Style::default().fg(THEME.primary)))
        .block(view_block("Days with <24 or >24 hours"));

    f.render_widget(table, area);
}

fn draw_raw_rows(f: &mut Frame, app: &App, area: Rect) {
    let text = app.raw_rows.join("\n");
    let raw = Paragraph::new(text)
        .style(Style::default().fg(THEME.text))
        .block(view_block("Raw CSV Rows"));
    f.render_widget(raw, area);
}

fn draw_footer(f: &mut Frame, app: &App, area: Rect) {
    let mut spans = vec![
        Span::styled("j/k", Style::default().fg(THEME.text)),
        Span::styled(" dates  ", Style::default().fg(THEME.muted)),
        Span::styled("space", Style::default().fg(THEME.text)),
        Span::styled(" toggle  ", Style::default().fg(THEME.muted)),
        Span::styled("a/n", Style::default().fg(THEME.text)),
        Span::styled(" all/none  ", Style::default().fg(THEME.muted)),
        Span::styled("tab/1-5", Style::default().fg(THEME.text)),
        Span::styled(" view  ", Style::default().fg(THEME.muted)),
        Span::styled("r", Style::default().fg(THEME.text)),
        Span::styled(" raw  ", Style::default().fg(THEME.muted)),
        Span::styled("q", Style::default().fg(THEME.text)),
        Span::styled(" quit", Style::default().fg(THEME.muted)),
    ];
    if app.created_notice {
        spans.push(Span::styled(
            "   sample data file created",
            Style::default().fg(PALETTE[1]),
        ));
    }
    let footer = Paragraph::new(Line::from(spans)).alignment(Alignment::Center);
    f.render_widget(footer, area);
}
