//! Central application state.
//!
//! All mutable state lives here so that the rest of the app can be pure
//! functions over `&AppState` (rendering) or `&mut AppState` (event handling).

use ratatui::layout::Rect;

use crate::config::AppConfig;
use crate::core::{fsim::FsState, growth::PlotterState, sched::SchedState};
use crate::ui::fs_widget::FsTreeState;

use super::session::Session;

/// Which simulation tab is currently shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActiveTab {
    #[default]
    Plotter,
    Filesystem,
    Scheduler,
}

impl ActiveTab {
    /// Ordered list of all tabs (used for the tab bar).
    pub const ALL: &[ActiveTab] = &[
        ActiveTab::Plotter,
        ActiveTab::Filesystem,
        ActiveTab::Scheduler,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ActiveTab::Plotter => "Growth Plotter",
            ActiveTab::Filesystem => "Filesystem",
            ActiveTab::Scheduler => "Scheduler",
        }
    }

    pub fn index(self) -> usize {
        Self::ALL.iter().position(|&t| t == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    /// Key used in the config file and the `--view` CLI flag.
    pub fn config_key(self) -> &'static str {
        match self {
            ActiveTab::Plotter => "plotter",
            ActiveTab::Filesystem => "filesystem",
            ActiveTab::Scheduler => "scheduler",
        }
    }

    pub fn from_config_key(s: &str) -> Option<Self> {
        match s {
            "plotter" => Some(ActiveTab::Plotter),
            "filesystem" => Some(ActiveTab::Filesystem),
            "scheduler" => Some(ActiveTab::Scheduler),
            _ => None,
        }
    }
}

/// Which overlay is currently shown on top of the active tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActiveOverlay {
    #[default]
    None,
    Help,
}

/// Top-level application state.
pub struct AppState {
    pub tab: ActiveTab,
    pub overlay: ActiveOverlay,
    /// Simulated system session (online/offline).  While offline, timer
    /// ticks do not advance any simulation.
    pub session: Session,
    /// Growth-rate plotter state.
    pub plotter: PlotterState,
    /// Filesystem simulator state.  Replaced wholesale on each operation.
    pub fsim: FsState,
    /// Widget-level state for the filesystem tree pane (selection, scroll).
    pub fs_view: FsTreeState,
    /// Scheduler visualizer state.
    pub sched: SchedState,
    pub config: AppConfig,
    /// Controls the main event loop.
    pub should_quit: bool,
    /// An optional status message shown in the bottom bar.
    pub status_message: Option<String>,
    /// Monotonic tick counter (drives blinking indicators).
    pub tick: u64,
    /// Sequence numbers for generated demo names (`file<N>.txt`, `dir<N>`).
    pub file_seq: u32,
    pub dir_seq: u32,
    /// Last known terminal area, for mouse hit-testing.
    pub terminal_area: Rect,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        Self {
            tab: config.start_view,
            overlay: ActiveOverlay::default(),
            session: Session::new(),
            plotter: PlotterState::new(),
            fsim: FsState::seeded(),
            fs_view: FsTreeState::default(),
            sched: SchedState::new(),
            config,
            should_quit: false,
            status_message: None,
            tick: 0,
            file_seq: 1,
            dir_seq: 1,
            terminal_area: Rect::default(),
        }
    }

    /// One timer tick: advance every playing simulation.  Frozen while the
    /// session is offline.
    pub fn on_tick(&mut self) {
        self.tick = self.tick.wrapping_add(1);
        if !self.session.is_online() {
            return;
        }
        self.plotter.tick();
        self.sched.tick();
    }
}
