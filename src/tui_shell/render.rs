use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph, Wrap};

use crate::model::ExpandPhase;
use crate::sink::LogLevel;

use super::app::App;

const LOG_HEIGHT: u16 = 8;

pub(super) fn draw(frame: &mut ratatui::Frame, app: &mut App) {
    let area = frame.area();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(LOG_HEIGHT),
            Constraint::Length(1),
        ])
        .split(area);

    draw_header(frame, app, chunks[0]);

    let main = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(chunks[1]);
    draw_tree(frame, app, main[0]);
    draw_details(frame, app, main[1]);
    draw_log(frame, app, chunks[2]);

    let hints = "+/→ expand  -/← collapse  ↑/↓ move  r refresh  s path  c clear  q quit";
    frame.render_widget(
        Paragraph::new(Span::styled(hints, Style::default().fg(Color::Gray))),
        chunks[3],
    );
}

fn draw_header(frame: &mut ratatui::Frame, app: &App, area: Rect) {
    let mut spans = vec![
        Span::styled(
            "lazytree",
            Style::default().fg(Color::Black).bg(Color::White),
        ),
        Span::raw("  "),
        Span::styled(app.title.as_str(), Style::default().fg(Color::Cyan)),
    ];
    let in_flight = app.controller.in_flight();
    if in_flight > 0 {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            format!("loading {in_flight}…"),
            Style::default().fg(Color::Yellow),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn draw_tree(frame: &mut ratatui::Frame, app: &mut App, area: Rect) {
    app.controller
        .set_page_rows(area.height.saturating_sub(2) as usize);

    let items: Vec<ListItem> = app
        .controller
        .view()
        .items()
        .iter()
        .map(|row| ListItem::new(row.clone()))
        .collect();
    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(Span::styled(
                    " Tree ",
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                )),
        )
        .style(Style::default().fg(Color::Green))
        .highlight_style(
            Style::default()
                .bg(Color::Blue)
                .add_modifier(Modifier::BOLD),
        );
    frame.render_stateful_widget(list, area, app.controller.view_mut().state_mut());
}

fn draw_details(frame: &mut ratatui::Frame, app: &App, area: Rect) {
    let lines = match &app.details {
        None => vec![Line::from("(no selection)")],
        Some(d) => {
            let phase = match d.phase {
                ExpandPhase::Collapsed => "collapsed",
                ExpandPhase::Expanding => "expanding",
                ExpandPhase::Expanded => "expanded",
            };
            let children = d
                .children
                .map(|n| n.to_string())
                .unwrap_or_else(|| "(not fetched)".to_string());
            vec![
                Line::from(format!("label: {}", d.label)),
                Line::from(format!("identity: {}", d.identity)),
                Line::from(format!("path: {}", d.path)),
                Line::from(format!("depth: {}", d.depth)),
                Line::from(format!("state: {phase}")),
                Line::from(format!("children: {children}")),
            ]
        }
    };
    frame.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(Block::default().borders(Borders::ALL).title(" Details ")),
        area,
    );
}

fn draw_log(frame: &mut ratatui::Frame, app: &App, area: Rect) {
    let visible = area.height.saturating_sub(2) as usize;
    let pane = app.controller.sink();
    let skip = pane.len().saturating_sub(visible);
    let lines: Vec<Line> = pane
        .entries()
        .skip(skip)
        .map(|e| {
            let style = match e.level {
                LogLevel::Info => Style::default().fg(Color::White),
                LogLevel::Error => Style::default().fg(Color::Red),
            };
            Line::from(vec![
                Span::styled(format!("{} ", e.ts), Style::default().fg(Color::Gray)),
                Span::styled(e.message.as_str(), style),
            ])
        })
        .collect();
    frame.render_widget(
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(" Info ")),
        area,
    );
}
