//! Scheduler visualizer tab — the Gantt timeline and the metrics panel.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Paragraph, Widget},
};

use crate::core::sched::{avg_turnaround, avg_waiting, total_span, SchedState, PROCESSES};

use super::theme::Theme;

/// Width reserved for the process-name gutter on the left of each bar.
const NAME_COL: u16 = 5;

/// The Gantt chart: one labelled bar per schedule entry, scaled to the
/// schedule span, with a moving clock cursor.
pub struct GanttWidget<'a> {
    pub sched: &'a SchedState,
}

impl<'a> GanttWidget<'a> {
    fn scale(span: u32, width: u16) -> f64 {
        if span == 0 {
            0.0
        } else {
            width as f64 / span as f64
        }
    }
}

impl<'a> Widget for GanttWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered()
            .title(format!(" {} ", self.sched.policy.label()))
            .title_style(Theme::title_style())
            .border_style(Theme::border_style());
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.width <= NAME_COL + 2 || inner.height < 2 {
            return;
        }
        let chart_x = inner.x + NAME_COL;
        let chart_w = inner.width - NAME_COL;
        let span = total_span(&self.sched.schedule);
        let scale = Self::scale(span, chart_w);

        // One row per schedule entry, in CPU order.
        for (row, entry) in self.sched.schedule.iter().enumerate() {
            let y = inner.y + row as u16;
            if y >= inner.y + inner.height.saturating_sub(1) {
                break;
            }
            let name = PROCESSES
                .iter()
                .find(|p| p.id == entry.pid)
                .map_or("?", |p| p.name);
            buf.set_line(
                inner.x,
                y,
                &Line::styled(format!("{name:<4}"), Theme::file_style()),
                NAME_COL,
            );

            let x0 = chart_x + (entry.start as f64 * scale) as u16;
            let x1 = chart_x + (entry.end as f64 * scale) as u16;
            let bar_w = (x1.saturating_sub(x0)).max(1);
            let bar: String = "█".repeat(bar_w as usize);
            buf.set_line(
                x0,
                y,
                &Line::styled(bar, Style::default().fg(Theme::process_color(entry.pid))),
                bar_w,
            );
        }

        // Time axis along the bottom row.
        let axis_y = inner.y + inner.height - 1;
        buf.set_line(
            chart_x,
            axis_y,
            &Line::styled(format!("0{:>width$}", span, width = chart_w as usize - 1),
                Theme::dim_style()),
            chart_w,
        );

        // Clock cursor, drawn over the bars.
        let cursor_x = chart_x + (self.sched.clock * scale) as u16;
        if cursor_x < chart_x + chart_w {
            for y in inner.y..axis_y {
                buf.set_line(
                    cursor_x,
                    y,
                    &Line::styled("│", Theme::clock_cursor_style()),
                    1,
                );
            }
        }
    }
}

/// The metrics panel: per-policy averages and the live clock.
pub struct SchedMetrics<'a> {
    pub sched: &'a SchedState,
}

impl<'a> Widget for SchedMetrics<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered()
            .title(" metrics ")
            .title_style(Theme::title_style())
            .border_style(Theme::border_style());
        let inner = block.inner(area);
        block.render(area, buf);

        let waiting = avg_waiting(PROCESSES, &self.sched.schedule);
        let turnaround = avg_turnaround(PROCESSES, &self.sched.schedule);

        let play = if self.sched.playing {
            Span::styled("▶ playing", Theme::title_style())
        } else {
            Span::styled("⏸ paused", Theme::dim_style())
        };

        let lines = vec![
            Line::from(vec![
                Span::styled(" clock          ", Theme::dim_style()),
                Span::styled(
                    format!("{:.2}", self.sched.clock),
                    Theme::clock_cursor_style(),
                ),
                Span::raw("  "),
                play,
            ]),
            Line::from(vec![
                Span::styled(" avg waiting    ", Theme::dim_style()),
                Span::raw(format!("{waiting:.2}")),
            ]),
            Line::from(vec![
                Span::styled(" avg turnaround ", Theme::dim_style()),
                Span::raw(format!("{turnaround:.2}")),
            ]),
            Line::from(Span::styled(
                " Space play  p policy  r reset",
                Theme::dim_style(),
            )),
        ];

        Paragraph::new(lines).render(inner, buf);
    }
}
