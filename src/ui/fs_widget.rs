//! Widgets for the filesystem simulator tab — the collapsible tree pane,
//! the node detail panel, the block map, and the bounded operation log.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Paragraph, StatefulWidget, Widget},
};

use crate::core::alloc::{BlockAllocator, TOTAL_BLOCKS};
use crate::core::fsim::FsState;
use crate::core::fstree::NodeId;

use super::theme::Theme;

// ───────────────────────────────────────── tree state ────────

/// Persistent state for the tree pane (selected row, scroll offset).
#[derive(Debug, Default)]
pub struct FsTreeState {
    /// Index into the *visible* flat list that is currently highlighted.
    pub selected: usize,
    /// Vertical scroll offset (first visible row).
    pub offset: usize,
}

impl FsTreeState {
    pub fn select_next(&mut self, max: usize) {
        if max > 0 && self.selected < max - 1 {
            self.selected += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Ensure the selected row is visible within the viewport of `height` rows.
    pub fn clamp_scroll(&mut self, height: usize) {
        if height == 0 {
            return;
        }
        if self.selected < self.offset {
            self.offset = self.selected;
        } else if self.selected >= self.offset + height {
            self.offset = self.selected - height + 1;
        }
    }
}

// ───────────────────────────────────────── tree widget ───────

/// The tree pane — created fresh each frame over the current [`FsState`].
pub struct FsTreeWidget<'a> {
    fsim: &'a FsState,
    block: Option<Block<'a>>,
}

impl<'a> FsTreeWidget<'a> {
    pub fn new(fsim: &'a FsState) -> Self {
        Self { fsim, block: None }
    }

    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }
}

impl<'a> StatefulWidget for FsTreeWidget<'a> {
    type State = FsTreeState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let inner = if let Some(ref block) = self.block {
            let inner = block.inner(area);
            block.clone().render(area, buf);
            inner
        } else {
            area
        };

        let tree = &self.fsim.tree;
        let rows = tree.visible_nodes();
        if state.selected >= rows.len() && !rows.is_empty() {
            state.selected = rows.len() - 1;
        }
        state.clamp_scroll(inner.height as usize);

        let visible = rows
            .iter()
            .enumerate()
            .skip(state.offset)
            .take(inner.height as usize);

        for (i, (row_idx, &id)) in visible.enumerate() {
            let y = inner.y + i as u16;
            let node = tree.get(id);
            let is_selected = row_idx == state.selected;

            let indent = "  ".repeat(tree.depth_of(id));
            let icon = if node.is_dir() {
                if node.expanded {
                    "▼ "
                } else {
                    "▶ "
                }
            } else {
                "  "
            };

            let style = if is_selected {
                Theme::selected_style()
            } else if node.is_dir() {
                Theme::dir_style()
            } else {
                Theme::file_style()
            };

            let mut spans = vec![
                Span::raw(indent),
                Span::styled(format!("{icon}{}", node.name), style),
            ];
            if let Some(size) = node.size() {
                spans.push(Span::styled(
                    format!(" {size} B"),
                    if is_selected {
                        Theme::selected_style()
                    } else {
                        Theme::inode_style()
                    },
                ));
            }
            spans.push(Span::styled(
                format!(" #{}", node.inode),
                if is_selected {
                    Theme::selected_style()
                } else {
                    Theme::inode_style()
                },
            ));

            let line = Line::from(spans);
            buf.set_line(inner.x, y, &line, inner.width);
        }
    }
}

// ───────────────────────────────────────── detail panel ──────

/// Metadata card for the currently selected node.
pub struct DetailWidget<'a> {
    pub fsim: &'a FsState,
    pub selected: Option<NodeId>,
}

impl<'a> Widget for DetailWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered()
            .title(" details ")
            .title_style(Theme::title_style())
            .border_style(Theme::border_style());
        let inner = block.inner(area);
        block.render(area, buf);

        let Some(id) = self.selected else {
            Paragraph::new(Line::styled("nothing selected", Theme::dim_style()))
                .render(inner, buf);
            return;
        };

        let tree = &self.fsim.tree;
        let node = tree.get(id);
        let mut lines = vec![
            Line::from(vec![
                Span::styled("path   ", Theme::dim_style()),
                Span::styled(tree.path_of(id), Theme::file_style()),
            ]),
            Line::from(vec![
                Span::styled("inode  ", Theme::dim_style()),
                Span::raw(node.inode.to_string()),
            ]),
            Line::from(vec![
                Span::styled("perms  ", Theme::dim_style()),
                Span::raw(node.permissions),
            ]),
            Line::from(vec![
                Span::styled("created", Theme::dim_style()),
                Span::raw(format!(" {}", node.created_at.format("%H:%M:%S"))),
            ]),
        ];
        if let Some(size) = node.size() {
            lines.push(Line::from(vec![
                Span::styled("size   ", Theme::dim_style()),
                Span::raw(format!("{size} B")),
            ]));
            lines.push(Line::from(vec![
                Span::styled("blocks ", Theme::dim_style()),
                Span::styled(format!("{:?}", node.blocks()), Theme::block_used_style()),
            ]));
        }

        Paragraph::new(lines).render(inner, buf);
    }
}

// ───────────────────────────────────────── block map ─────────

/// Width of one block-map row, in cells.
const MAP_ROW: usize = 16;

/// The 64-cell disk map — used blocks lit, free blocks dim.
pub struct BlockMapWidget<'a> {
    pub alloc: &'a BlockAllocator,
}

impl<'a> Widget for BlockMapWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered()
            .title(format!(
                " blocks ({} used / {} free) ",
                self.alloc.used_count(),
                self.alloc.free_count()
            ))
            .title_style(Theme::title_style())
            .border_style(Theme::border_style());
        let inner = block.inner(area);
        block.render(area, buf);

        let mut lines = Vec::new();
        for row in 0..TOTAL_BLOCKS / MAP_ROW {
            let mut spans = Vec::with_capacity(MAP_ROW);
            for col in 0..MAP_ROW {
                let idx = row * MAP_ROW + col;
                if self.alloc.is_used(idx) {
                    spans.push(Span::styled("■ ", Theme::block_used_style()));
                } else {
                    spans.push(Span::styled("· ", Theme::block_free_style()));
                }
            }
            lines.push(Line::from(spans));
        }

        Paragraph::new(lines).render(inner, buf);
    }
}

// ───────────────────────────────────────── op log ────────────

/// The bounded operation log, most-recent-first.
pub struct OpLogWidget<'a> {
    pub fsim: &'a FsState,
}

impl<'a> Widget for OpLogWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered()
            .title(" log ")
            .title_style(Theme::title_style())
            .border_style(Theme::border_style());
        let inner = block.inner(area);
        block.render(area, buf);

        let lines: Vec<Line> = self
            .fsim
            .log
            .iter()
            .take(inner.height as usize)
            .map(|entry| {
                Line::from(vec![
                    Span::styled(
                        format!("{} ", entry.at.format("%H:%M:%S")),
                        Theme::dim_style(),
                    ),
                    Span::styled(entry.message.clone(), Theme::log_style(entry.kind)),
                ])
            })
            .collect();

        Paragraph::new(lines).render(inner, buf);
    }
}
