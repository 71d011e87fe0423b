//! Help popup overlay listing global and per-tab key bindings.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Widget},
};

use crate::app::state::ActiveTab;

/// `(key, action)` rows shown in the help overlay.
const GLOBAL_KEYS: &[(&str, &str)] = &[
    ("Tab / 1-3", "switch simulation"),
    ("o", "toggle system offline / restore"),
    ("?", "toggle this help"),
    ("q / Ctrl+c", "quit"),
];

const PLOTTER_KEYS: &[(&str, &str)] = &[
    ("Space", "play / pause the sweep"),
    ("← / →", "slide n manually (pauses)"),
    ("r", "reset n to 1"),
];

const FILESYSTEM_KEYS: &[(&str, &str)] = &[
    ("↑ / ↓", "select entry"),
    ("Enter", "expand / collapse directory"),
    ("c", "create demo file (1024 B)"),
    ("m", "create demo directory"),
    ("w", "write +256 B to selected file"),
    ("x", "delete selected file"),
    ("v", "read selected file"),
    ("r", "reset to the seeded disk"),
];

const SCHEDULER_KEYS: &[(&str, &str)] = &[
    ("Space", "play / pause the clock"),
    ("p", "cycle scheduling policy"),
    ("r", "reset the clock"),
];

/// Help overlay for the active tab.
pub struct HelpPopup {
    pub tab: ActiveTab,
}

impl Widget for HelpPopup {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let tab_keys = match self.tab {
            ActiveTab::Plotter => PLOTTER_KEYS,
            ActiveTab::Filesystem => FILESYSTEM_KEYS,
            ActiveTab::Scheduler => SCHEDULER_KEYS,
        };

        let height = (GLOBAL_KEYS.len() + tab_keys.len()) as u16 + 8;
        let popup = centered_fixed(46, height, area);
        Clear.render(popup, buf);

        let block = Block::default()
            .title(" Help ")
            .title_style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::DarkGray));

        let inner = block.inner(popup);
        block.render(popup, buf);

        let dim = Style::default().fg(Color::DarkGray);
        let key_style = Style::default().fg(Color::Yellow);

        let mut lines = vec![Line::raw("")];
        let mut section = |title: &'static str, keys: &[(&str, &str)], lines: &mut Vec<Line>| {
            lines.push(Line::from(Span::styled(
                format!("  {title}"),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            )));
            for &(key, action) in keys {
                lines.push(Line::from(vec![
                    Span::styled(format!("   {key:<12}"), key_style),
                    Span::styled(action.to_string(), Style::default().fg(Color::White)),
                ]));
            }
            lines.push(Line::raw(""));
        };
        section("Global", GLOBAL_KEYS, &mut lines);
        section(self.tab.label(), tab_keys, &mut lines);

        lines.push(Line::from(Span::styled("  Esc: close", dim)));

        Paragraph::new(lines).render(inner, buf);
    }
}

/// Create a centered rectangle with fixed dimensions, clamped to the available area.
fn centered_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(w)) / 2;
    let y = area.y + (area.height.saturating_sub(h)) / 2;
    Rect::new(x, y, w, h)
}
