//! A terminal deck of interactive CS toy simulations.
//!
//! Three tabs: a growth-rate plotter, a toy block filesystem, and a toy CPU
//! scheduler, all advanced by one cooperative timer tick.

mod app;
mod config;
mod core;
mod ui;

use std::io::{self, stdout};
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    widgets::{Block, Borders, Paragraph, Tabs},
    Terminal,
};

use crate::app::{
    event::{spawn_event_reader, AppEvent},
    handler,
    state::{ActiveOverlay, ActiveTab, AppState},
};
use crate::ui::{
    fs_widget::{BlockMapWidget, DetailWidget, FsTreeWidget, OpLogWidget},
    gantt::{GanttWidget, SchedMetrics},
    layout::{self, AppLayout},
    offline::OfflineIndicator,
    plotter::{PlotterChart, PlotterReadout},
    popup::HelpPopup,
    theme::Theme,
};

// ───────────────────────────────────────── CLI ───────────────

#[derive(Parser, Debug)]
#[command(name = env!("CARGO_PKG_NAME"), about = "Interactive CS toy simulations in the terminal")]
struct Cli {
    /// Tab to open first: plotter, filesystem, or scheduler.
    #[arg(long)]
    view: Option<String>,

    /// Timer tick interval in milliseconds (50-500).
    #[arg(long = "tick-rate")]
    tick_rate: Option<u64>,
}

// ───────────────────────────────────────── rendering ─────────

fn status_hint(tab: ActiveTab) -> &'static str {
    match tab {
        ActiveTab::Plotter => "Space: play | ←/→: slide n | r: reset | ?: help | q: quit",
        ActiveTab::Filesystem => {
            "↑/↓: select | c/m: create | w: write | x: delete | v: read | r: reset | ?: help"
        }
        ActiveTab::Scheduler => "Space: play | p: policy | r: reset | ?: help | q: quit",
    }
}

fn draw(frame: &mut ratatui::Frame, state: &mut AppState) {
    state.terminal_area = frame.area();
    let layout = AppLayout::from_area(frame.area());

    // ── tab bar ───────────────────────────────────────────────
    let tabs = Tabs::new(ActiveTab::ALL.iter().map(|t| t.label()))
        .select(state.tab.index())
        .style(Theme::tab_style())
        .highlight_style(Theme::tab_selected_style())
        .divider("│");
    frame.render_widget(tabs, layout.tabs_area);

    // ── body ──────────────────────────────────────────────────
    match state.tab {
        ActiveTab::Plotter => {
            let (chart_area, readout_area) = layout::split_plotter(layout.body_area);
            frame.render_widget(
                PlotterChart {
                    plotter: &state.plotter,
                },
                chart_area,
            );
            frame.render_widget(
                PlotterReadout {
                    plotter: &state.plotter,
                },
                readout_area,
            );
        }
        ActiveTab::Filesystem => {
            let (tree_area, detail_area, blocks_area, log_area) =
                layout::split_fs(layout.body_area);

            let tree_block = Block::default()
                .title(" disk tree ")
                .title_style(Theme::title_style())
                .borders(Borders::ALL)
                .border_style(Theme::border_style());
            let tree_widget = FsTreeWidget::new(&state.fsim).block(tree_block);
            frame.render_stateful_widget(tree_widget, tree_area, &mut state.fs_view);

            frame.render_widget(
                DetailWidget {
                    fsim: &state.fsim,
                    selected: state.fsim.selected,
                },
                detail_area,
            );
            frame.render_widget(
                BlockMapWidget {
                    alloc: &state.fsim.alloc,
                },
                blocks_area,
            );
            frame.render_widget(OpLogWidget { fsim: &state.fsim }, log_area);
        }
        ActiveTab::Scheduler => {
            let (gantt_area, metrics_area) = layout::split_sched(layout.body_area);
            frame.render_widget(GanttWidget { sched: &state.sched }, gantt_area);
            frame.render_widget(SchedMetrics { sched: &state.sched }, metrics_area);
        }
    }

    // ── offline badge ─────────────────────────────────────────
    frame.render_widget(
        OfflineIndicator {
            visible: !state.session.is_online(),
            tick: state.tick,
            since: state.session.since,
        },
        layout.body_area,
    );

    // ── status bar ────────────────────────────────────────────
    let hint = status_hint(state.tab);
    let status_text = state.status_message.as_deref().unwrap_or(hint);
    let status = Paragraph::new(status_text).style(Theme::status_bar_style());
    frame.render_widget(status, layout.status_area);

    // ── overlay ───────────────────────────────────────────────
    if state.overlay == ActiveOverlay::Help {
        frame.render_widget(HelpPopup { tab: state.tab }, frame.area());
    }
}

// ───────────────────────────────────────── main ──────────────

#[tokio::main]
async fn main() -> Result<()> {
    // Initialise tracing (only active when RUST_LOG is set).  Writes to
    // stderr so the TUI on stdout is never polluted.
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    // ── config (file, then CLI overrides) ─────────────────────
    let mut config = config::AppConfig::load();
    // Write the file back so a first run leaves a template to edit.
    let _ = config.save();
    if let Some(ms) = cli.tick_rate {
        config.tick_rate_ms = ms.clamp(50, 500);
    }
    if let Some(ref view) = cli.view {
        match ActiveTab::from_config_key(view) {
            Some(tab) => config.start_view = tab,
            None => anyhow::bail!(
                "unknown view {view:?} (expected plotter, filesystem, or scheduler)"
            ),
        }
    }

    let tick_rate = Duration::from_millis(config.tick_rate_ms);
    let mut state = AppState::new(config);

    // ── terminal setup ────────────────────────────────────────
    enable_raw_mode()?;
    execute!(stdout(), EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout());
    let mut terminal = Terminal::new(backend)?;

    // ── event loop ────────────────────────────────────────────
    let mut events = spawn_event_reader(tick_rate);

    loop {
        terminal.draw(|frame| draw(frame, &mut state))?;

        if let Some(event) = events.recv().await {
            match event {
                AppEvent::Key(k) => {
                    // Any keypress clears a stale status message.
                    state.status_message = None;
                    handler::handle_key(&mut state, k);
                }
                AppEvent::Mouse(m) => handler::handle_mouse(&mut state, m),
                AppEvent::Resize(_, _) => {}
                AppEvent::Tick => state.on_tick(),
            }
        } else {
            break; // event reader gone
        }

        if state.should_quit {
            break;
        }
    }

    // ── teardown ──────────────────────────────────────────────
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    Ok(())
}
