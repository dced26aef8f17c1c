use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use crate::model::snapshot::Snapshot;

/// Live market tile: symbol, latest price, and the RSI reading with
/// overbought/oversold coloring.
pub struct PriceTile<'a> {
    snapshot: Option<&'a Snapshot>,
}

impl<'a> PriceTile<'a> {
    pub fn new(snapshot: Option<&'a Snapshot>) -> Self {
        Self { snapshot }
    }
}

impl Widget for PriceTile<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(" Market ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray));

        let lines = match self.snapshot {
            Some(snapshot) => {
                let (reading, reading_color) = match snapshot.indicator {
                    Some(v) if v > 70.0 => (format!("{:.1} overbought", v), Color::Red),
                    Some(v) if v < 30.0 => (format!("{:.1} oversold", v), Color::Green),
                    Some(v) => (format!("{:.1}", v), Color::White),
                    None => ("--- (warming up)".to_string(), Color::DarkGray),
                };
                let trend = match snapshot.indicator {
                    Some(v) if v > 50.0 => Span::styled("▲", Style::default().fg(Color::Green)),
                    Some(_) => Span::styled("▼", Style::default().fg(Color::Red)),
                    None => Span::raw(" "),
                };
                vec![
                    Line::from(Span::styled(
                        snapshot.symbol.clone(),
                        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                    )),
                    Line::from(vec![
                        Span::styled(
                            format!("$ {:.2} ", snapshot.price),
                            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
                        ),
                        trend,
                    ]),
                    Line::from(vec![
                        Span::styled("RSI: ", Style::default().fg(Color::DarkGray)),
                        Span::styled(reading, Style::default().fg(reading_color)),
                    ]),
                ]
            }
            None => vec![Line::from(Span::styled(
                "Loading...",
                Style::default().fg(Color::DarkGray),
            ))],
        };

        Paragraph::new(lines).block(block).render(area, buf);
    }
}

pub struct StatusBar<'a> {
    pub endpoint: &'a str,
    pub polling: bool,
    pub fetch_count: u64,
    pub failure_count: u64,
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let poll_status = if self.polling {
            Span::styled(" POLLING ", Style::default().fg(Color::Green))
        } else {
            Span::styled(" STOPPED ", Style::default().fg(Color::Yellow))
        };

        let line = Line::from(vec![
            Span::styled(
                " lushfin-monitor ",
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            ),
            Span::styled("| ", Style::default().fg(Color::DarkGray)),
            Span::styled(self.endpoint, Style::default().fg(Color::Cyan)),
            Span::styled(" |", Style::default().fg(Color::DarkGray)),
            poll_status,
            Span::styled("| ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("ok: {}", self.fetch_count),
                Style::default().fg(Color::DarkGray),
            ),
            Span::styled(
                format!("  err: {}", self.failure_count),
                Style::default().fg(if self.failure_count > 0 {
                    Color::Red
                } else {
                    Color::DarkGray
                }),
            ),
        ]);

        buf.set_line(area.x, area.y, &line, area.width);
    }
}

pub struct LogPanel<'a> {
    messages: &'a [String],
}

impl<'a> LogPanel<'a> {
    pub fn new(messages: &'a [String]) -> Self {
        Self { messages }
    }
}

impl Widget for LogPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(" Log ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray));
        let inner = block.inner(area);
        block.render(area, buf);

        let visible = inner.height as usize;
        let start = self.messages.len().saturating_sub(visible);
        let lines: Vec<Line> = self.messages[start..]
            .iter()
            .map(|msg| {
                let color = if msg.starts_with("[ERR]") {
                    Color::Red
                } else {
                    Color::DarkGray
                };
                Line::from(Span::styled(msg.as_str(), Style::default().fg(color)))
            })
            .collect();

        Paragraph::new(lines).render(inner, buf);
    }
}

pub struct KeybindBar;

impl Widget for KeybindBar {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let line = Line::from(vec![
            Span::styled(" [Q]", Style::default().fg(Color::Yellow)),
            Span::styled("uit  ", Style::default().fg(Color::DarkGray)),
        ]);

        buf.set_line(area.x, area.y, &line, area.width);
    }
}
