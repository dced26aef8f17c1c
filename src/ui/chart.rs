use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, Borders, Widget},
};

use crate::model::snapshot::HistoryPoint;

/// Rolling RSI chart on a fixed 0-100 domain, with overbought/oversold
/// guides at 70/30.
pub struct IndicatorChart<'a> {
    points: &'a [HistoryPoint],
}

impl<'a> IndicatorChart<'a> {
    pub fn new(points: &'a [HistoryPoint]) -> Self {
        Self { points }
    }
}

impl Widget for IndicatorChart<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(" Relative Strength Index (RSI) ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray));
        let inner = block.inner(area);
        block.render(area, buf);

        if self.points.is_empty() || inner.height < 4 || inner.width < 8 {
            return;
        }

        let chart_height = inner.height.saturating_sub(1) as usize; // bottom row for time labels
        let chart_width = inner.width as usize;

        // One column per point, latest on the right.
        let visible: &[HistoryPoint] = if self.points.len() > chart_width {
            &self.points[self.points.len() - chart_width..]
        } else {
            self.points
        };

        let y_for = |value: f64| -> u16 {
            let normalized = value.clamp(0.0, 100.0) / 100.0;
            let offset =
                ((normalized * (chart_height - 1) as f64).round() as usize).min(chart_height - 1);
            inner.y + (chart_height - 1 - offset) as u16
        };

        // Guide lines at the overbought/oversold thresholds.
        let overbought_y = y_for(70.0);
        let oversold_y = y_for(30.0);
        for x in inner.x..inner.x + inner.width {
            if (x - inner.x) % 2 == 0 {
                buf.set_string(x, overbought_y, "-", Style::default().fg(Color::Red));
                buf.set_string(x, oversold_y, "-", Style::default().fg(Color::Green));
            }
        }
        buf.set_string(inner.x, overbought_y, "70", Style::default().fg(Color::Red));
        buf.set_string(inner.x, oversold_y, "30", Style::default().fg(Color::Green));

        for (i, point) in visible.iter().enumerate() {
            let x = inner.x + i as u16;
            if x >= inner.x + inner.width {
                break;
            }
            buf.set_string(x, y_for(point.value), "●", Style::default().fg(Color::Cyan));
        }

        // Time labels: oldest visible on the left, newest on the right.
        let label_y = inner.y + inner.height - 1;
        if let Some(first) = visible.first() {
            buf.set_string(
                inner.x,
                label_y,
                &first.label,
                Style::default().fg(Color::DarkGray),
            );
        }
        if visible.len() > 1 {
            if let Some(last) = visible.last() {
                let width = last.label.len() as u16;
                if inner.width > width {
                    buf.set_string(
                        inner.x + inner.width - width,
                        label_y,
                        &last.label,
                        Style::default().fg(Color::DarkGray),
                    );
                }
            }
        }
    }
}
