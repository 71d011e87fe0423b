//! Layout helpers — split the terminal area into regions.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Primary screen layout: tab bar, simulation body, bottom status bar.
pub struct AppLayout {
    pub tabs_area: Rect,
    pub body_area: Rect,
    pub status_area: Rect,
}

impl AppLayout {
    /// Compute the layout from the full terminal area.
    pub fn from_area(area: Rect) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // tab bar
                Constraint::Min(3),    // simulation body
                Constraint::Length(1), // status bar
            ])
            .split(area);

        Self {
            tabs_area: chunks[0],
            body_area: chunks[1],
            status_area: chunks[2],
        }
    }
}

/// Plotter tab: chart on the left, readout column on the right.
pub fn split_plotter(body: Rect) -> (Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(40), Constraint::Length(26)])
        .split(body);
    (chunks[0], chunks[1])
}

/// Filesystem tab: tree pane on the left; detail, block map and op log
/// stacked on the right.
pub fn split_fs(body: Rect) -> (Rect, Rect, Rect, Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(body);
    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(8), // node detail
            Constraint::Length(6), // block map
            Constraint::Min(5),    // op log
        ])
        .split(columns[1]);
    (columns[0], right[0], right[1], right[2])
}

/// Scheduler tab: Gantt chart on top, metrics panel below.
pub fn split_sched(body: Rect) -> (Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(8), Constraint::Length(6)])
        .split(body);
    (chunks[0], chunks[1])
}
