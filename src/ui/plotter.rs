//! Growth-rate plotter tab — the chart and the live readout column.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    symbols,
    text::{Line, Span},
    widgets::{Axis, Block, Chart, Dataset, GraphType, Paragraph, Widget},
};

use crate::core::growth::{PlotterState, N_MAX, N_MIN, PLOT_CLAMP, SERIES};

use super::theme::Theme;

/// The chart pane: one static line per series, plus a moving marker set at
/// the live `n`.
pub struct PlotterChart<'a> {
    pub plotter: &'a PlotterState,
}

impl<'a> Widget for PlotterChart<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // The marker points move with `n`; everything else is precomputed.
        let markers: Vec<(f64, f64)> = SERIES
            .iter()
            .map(|s| s.marker(self.plotter.n))
            .collect();

        let mut datasets: Vec<Dataset> = SERIES
            .iter()
            .zip(&self.plotter.curves)
            .map(|(series, curve)| {
                Dataset::default()
                    .name(series.label)
                    .marker(symbols::Marker::Braille)
                    .graph_type(GraphType::Line)
                    .style(Style::default().fg(Theme::series_color(series.id)))
                    .data(curve)
            })
            .collect();
        datasets.push(
            Dataset::default()
                .marker(symbols::Marker::Dot)
                .graph_type(GraphType::Scatter)
                .style(Theme::marker_style())
                .data(&markers),
        );

        Chart::new(datasets)
            .block(
                Block::bordered()
                    .title(" growth curves ")
                    .title_style(Theme::title_style())
                    .border_style(Theme::border_style()),
            )
            .x_axis(
                Axis::default()
                    .title("n")
                    .style(Theme::axis_style())
                    .bounds([N_MIN, N_MAX])
                    .labels(["1", "25", "50"]),
            )
            .y_axis(
                Axis::default()
                    .title("f(n)")
                    .style(Theme::axis_style())
                    .bounds([0.0, PLOT_CLAMP])
                    .labels(["0", "1250", "2500"]),
            )
            .render(area, buf);
    }
}

/// The readout column: live `round(f(n))` per series, plus the play state.
pub struct PlotterReadout<'a> {
    pub plotter: &'a PlotterState,
}

impl<'a> Widget for PlotterReadout<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered()
            .title(format!(" n = {:.1} ", self.plotter.n))
            .title_style(Theme::title_style())
            .border_style(Theme::border_style());
        let inner = block.inner(area);
        block.render(area, buf);

        let mut lines = vec![Line::raw("")];
        for series in SERIES {
            let color = Theme::series_color(series.id);
            lines.push(Line::from(vec![
                Span::styled(
                    format!(" {:<8}", series.label),
                    Style::default().fg(color),
                ),
                Span::styled(
                    format!("{:>12}", series.readout(self.plotter.n).to_string()),
                    Style::default().fg(color),
                ),
            ]));
        }

        lines.push(Line::raw(""));
        let state = if self.plotter.playing {
            Span::styled(" ▶ playing", Theme::title_style())
        } else {
            Span::styled(" ⏸ paused", Theme::dim_style())
        };
        lines.push(Line::from(state));
        lines.push(Line::from(Span::styled(
            " ←/→ slide  Space play",
            Theme::dim_style(),
        )));

        Paragraph::new(lines).render(inner, buf);
    }
}
