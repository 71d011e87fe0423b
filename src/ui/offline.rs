//! Offline indicator — a small blinking badge rendered in the top-right
//! corner of the body area while the session is offline.

use chrono::{DateTime, Local};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::Widget,
};

use super::theme::Theme;

/// Ticks per blink phase.
const BLINK_PERIOD: u64 = 10;

/// A "system offline" badge.
///
/// Render this on top of the body area's border.  It picks its own position
/// (top-right of `area`) and is invisible while the session is online.
pub struct OfflineIndicator {
    /// Whether to show the badge at all.
    pub visible: bool,
    /// Monotonically increasing tick counter (drives the blink).
    pub tick: u64,
    /// When the session went offline.
    pub since: DateTime<Local>,
}

impl Widget for OfflineIndicator {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if !self.visible || area.width < 30 || area.height == 0 {
            return;
        }

        let glyph = if (self.tick / BLINK_PERIOD) % 2 == 0 {
            "⏻"
        } else {
            " "
        };
        let label = format!(" {glyph} OFFLINE since {} ", self.since.format("%H:%M:%S"));

        let label_width = label.chars().count() as u16;
        let x = area.x + area.width.saturating_sub(label_width + 2);
        let y = area.y;

        let line = Line::from(Span::styled(label, Theme::offline_style()));
        buf.set_line(x, y, &line, label_width);
    }
}
