//! Input handling — maps key/mouse events to state mutations.
//!
//! Filesystem operations funnel through [`apply_fs_op`], the one place that
//! replaces `state.fsim`; everything upstream of it builds an [`FsOp`] value.

use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use crate::core::fsim::FsOp;
use crate::core::fstree::{FsTree, NodeId};
use crate::ui::layout::AppLayout;

use super::state::{ActiveOverlay, ActiveTab, AppState};

/// Process a key event, dispatching based on the active tab and overlay.
pub fn handle_key(state: &mut AppState, key: KeyEvent) {
    // Some terminals report key releases too; only act on presses.
    if key.kind != KeyEventKind::Press {
        return;
    }

    // Ctrl+c always quits, regardless of view.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        state.should_quit = true;
        return;
    }

    if state.overlay == ActiveOverlay::Help {
        if matches!(key.code, KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?')) {
            state.overlay = ActiveOverlay::None;
        }
        return;
    }

    // Global keys.
    match key.code {
        KeyCode::Char('q') => {
            state.should_quit = true;
            return;
        }
        KeyCode::Char('?') => {
            state.overlay = ActiveOverlay::Help;
            return;
        }
        KeyCode::Tab => {
            state.tab = state.tab.next();
            return;
        }
        KeyCode::BackTab => {
            state.tab = state.tab.prev();
            return;
        }
        KeyCode::Char('1') => {
            state.tab = ActiveTab::Plotter;
            return;
        }
        KeyCode::Char('2') => {
            state.tab = ActiveTab::Filesystem;
            return;
        }
        KeyCode::Char('3') => {
            state.tab = ActiveTab::Scheduler;
            return;
        }
        KeyCode::Char('o') => {
            toggle_session(state);
            return;
        }
        _ => {}
    }

    match state.tab {
        ActiveTab::Plotter => handle_plotter_key(state, key),
        ActiveTab::Filesystem => handle_fs_key(state, key),
        ActiveTab::Scheduler => handle_sched_key(state, key),
    }
}

fn toggle_session(state: &mut AppState) {
    if state.session.is_online() {
        state.session.set_offline();
        state.status_message = Some("System offline — simulations frozen".to_string());
    } else {
        state.session.restore();
        state.status_message = Some("System restored".to_string());
    }
    tracing::debug!(online = state.session.is_online(), "session toggled");
}

// ── Growth plotter ──────────────────────────────────────────────

/// How far one slider keypress moves `n`.
const SLIDER_STEP: f64 = 1.0;

fn handle_plotter_key(state: &mut AppState, key: KeyEvent) {
    let plotter = &mut state.plotter;
    match key.code {
        KeyCode::Char(' ') => plotter.toggle_play(),
        KeyCode::Left | KeyCode::Char('h') => plotter.set_n(plotter.n - SLIDER_STEP),
        KeyCode::Right | KeyCode::Char('l') => plotter.set_n(plotter.n + SLIDER_STEP),
        KeyCode::Char('r') => plotter.reset(),
        _ => {}
    }
}

// ── Filesystem simulator ────────────────────────────────────────

/// Byte sizes for the canned demo operations.
const DEMO_FILE_SIZE: u64 = 1024;
const DEMO_WRITE_DELTA: u64 = 256;

fn handle_fs_key(state: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => {
            state.fs_view.select_prev();
            sync_fs_selection(state);
        }
        KeyCode::Down | KeyCode::Char('j') => {
            let count = state.fsim.tree.visible_nodes().len();
            state.fs_view.select_next(count);
            sync_fs_selection(state);
        }
        KeyCode::Enter => {
            if let Some(id) = selected_node(state) {
                state.fsim.tree.toggle_expand(id);
                sync_fs_selection(state);
            }
        }
        KeyCode::Char('c') => {
            let parent = target_dir_components(state);
            let name = format!("file{}.txt", state.file_seq);
            state.file_seq += 1;
            apply_fs_op(
                state,
                FsOp::CreateFile {
                    parent,
                    name,
                    size: DEMO_FILE_SIZE,
                },
            );
        }
        KeyCode::Char('m') => {
            let parent = target_dir_components(state);
            let name = format!("dir{}", state.dir_seq);
            state.dir_seq += 1;
            apply_fs_op(state, FsOp::CreateDir { parent, name });
        }
        KeyCode::Char('w') => {
            if let Some((parent, name)) = selected_file(state) {
                apply_fs_op(
                    state,
                    FsOp::WriteFile {
                        parent,
                        name,
                        delta: DEMO_WRITE_DELTA,
                    },
                );
            }
        }
        KeyCode::Char('x') => {
            if let Some((parent, name)) = selected_file(state) {
                apply_fs_op(state, FsOp::DeleteFile { parent, name });
            }
        }
        KeyCode::Char('v') => {
            if let Some((parent, name)) = selected_file(state) {
                apply_fs_op(state, FsOp::ReadFile { parent, name });
            }
        }
        KeyCode::Char('r') => {
            state.fsim = crate::core::fsim::FsState::reset();
            state.fs_view.selected = 0;
            state.fs_view.offset = 0;
            state.file_seq = 1;
            state.dir_seq = 1;
            state.status_message = Some("Filesystem reset to seeded disk".to_string());
        }
        _ => {}
    }
}

/// The single call site that replaces the filesystem state.
fn apply_fs_op(state: &mut AppState, op: FsOp) {
    tracing::debug!(?op, "fs op");
    state.fsim = state.fsim.apply(&op);
    sync_fs_selection(state);
}

/// Node id under the tree cursor, if any.
fn selected_node(state: &AppState) -> Option<NodeId> {
    state
        .fsim
        .tree
        .visible_nodes()
        .get(state.fs_view.selected)
        .copied()
}

/// Keep `fsim.selected` (the detail-panel node) in step with the cursor.
fn sync_fs_selection(state: &mut AppState) {
    let rows = state.fsim.tree.visible_nodes();
    if state.fs_view.selected >= rows.len() && !rows.is_empty() {
        state.fs_view.selected = rows.len() - 1;
    }
    state.fsim.selected = rows.get(state.fs_view.selected).copied();
}

/// Component path of a directory node, relative to the root.
fn dir_components(tree: &FsTree, id: NodeId) -> Vec<String> {
    let mut parts = Vec::new();
    let mut cur = id;
    while cur != tree.root {
        parts.push(tree.get(cur).name.clone());
        match tree.get(cur).parent {
            Some(p) => cur = p,
            None => break,
        }
    }
    parts.reverse();
    parts
}

/// Directory that create operations target: the selected directory, or the
/// selection's parent, or the root.
fn target_dir_components(state: &AppState) -> Vec<String> {
    let tree = &state.fsim.tree;
    match selected_node(state) {
        Some(id) if tree.get(id).is_dir() => dir_components(tree, id),
        Some(id) => match tree.get(id).parent {
            Some(p) => dir_components(tree, p),
            None => Vec::new(),
        },
        None => Vec::new(),
    }
}

/// `(parent_path, name)` of the selected file; posts a status message and
/// returns `None` when the selection is not a file.
fn selected_file(state: &mut AppState) -> Option<(Vec<String>, String)> {
    let id = selected_node(state)?;
    let tree = &state.fsim.tree;
    if tree.get(id).is_dir() {
        state.status_message = Some("Select a file for this operation".to_string());
        return None;
    }
    let parent = tree.get(id).parent.unwrap_or(tree.root);
    Some((dir_components(tree, parent), tree.get(id).name.clone()))
}

// ── Scheduler ───────────────────────────────────────────────────

fn handle_sched_key(state: &mut AppState, key: KeyEvent) {
    let sched = &mut state.sched;
    match key.code {
        KeyCode::Char(' ') => sched.toggle_play(),
        KeyCode::Char('p') => {
            sched.cycle_policy();
            state.status_message = Some(format!("Policy: {}", sched.policy.label()));
        }
        KeyCode::Char('r') => sched.reset(),
        _ => {}
    }
}

// ── Mouse ───────────────────────────────────────────────────────

/// Process a mouse event.
pub fn handle_mouse(state: &mut AppState, mouse: MouseEvent) {
    if state.overlay != ActiveOverlay::None {
        return;
    }

    let layout = AppLayout::from_area(state.terminal_area);

    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            if mouse.row == layout.tabs_area.y {
                if let Some(tab) = tab_at(mouse.column.saturating_sub(layout.tabs_area.x)) {
                    state.tab = tab;
                }
            }
        }
        MouseEventKind::ScrollUp if state.tab == ActiveTab::Filesystem => {
            state.fs_view.select_prev();
            sync_fs_selection(state);
        }
        MouseEventKind::ScrollDown if state.tab == ActiveTab::Filesystem => {
            let count = state.fsim.tree.visible_nodes().len();
            state.fs_view.select_next(count);
            sync_fs_selection(state);
        }
        _ => {}
    }
}

/// Map a column in the tab bar to a tab.  Mirrors the rendering: each title
/// is padded with one space either side and separated by a one-column divider.
fn tab_at(col: u16) -> Option<ActiveTab> {
    let mut x = 0u16;
    for &tab in ActiveTab::ALL {
        let width = tab.label().chars().count() as u16 + 2;
        if col >= x && col < x + width {
            return Some(tab);
        }
        x += width + 1;
    }
    None
}
