//! Colour palette and text styles used across the UI.

use ratatui::style::{Color, Modifier, Style};

use crate::core::fsim::LogKind;
use crate::core::growth::SeriesId;

/// Central theme — change colours here and they propagate everywhere.
pub struct Theme;

impl Theme {
    // ── chrome ─────────────────────────────────────────────────
    pub fn border_style() -> Style {
        Style::default().fg(Color::Gray)
    }

    pub fn title_style() -> Style {
        Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD)
    }

    pub fn tab_style() -> Style {
        Style::default().fg(Color::Gray)
    }

    pub fn tab_selected_style() -> Style {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    }

    pub fn status_bar_style() -> Style {
        Style::default().bg(Color::DarkGray).fg(Color::White)
    }

    pub fn selected_style() -> Style {
        Style::default()
            .bg(Color::DarkGray)
            .add_modifier(Modifier::BOLD)
    }

    pub fn dim_style() -> Style {
        Style::default().fg(Color::DarkGray)
    }

    // ── growth plotter ─────────────────────────────────────────
    pub fn series_color(id: SeriesId) -> Color {
        match id {
            SeriesId::LogN => Color::Green,
            SeriesId::Linear => Color::Cyan,
            SeriesId::NLogN => Color::Yellow,
            SeriesId::Quadratic => Color::Magenta,
            SeriesId::Exponential => Color::Red,
        }
    }

    pub fn axis_style() -> Style {
        Style::default().fg(Color::Gray)
    }

    pub fn marker_style() -> Style {
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD)
    }

    // ── filesystem simulator ───────────────────────────────────
    pub fn dir_style() -> Style {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    }

    pub fn file_style() -> Style {
        Style::default().fg(Color::White)
    }

    pub fn inode_style() -> Style {
        Style::default().fg(Color::DarkGray)
    }

    pub fn block_used_style() -> Style {
        Style::default().fg(Color::Yellow)
    }

    pub fn block_free_style() -> Style {
        Style::default().fg(Color::DarkGray)
    }

    pub fn log_style(kind: LogKind) -> Style {
        match kind {
            LogKind::Error => Style::default().fg(Color::Red),
            LogKind::Delete => Style::default().fg(Color::Magenta),
            LogKind::Read => Style::default().fg(Color::Gray),
            LogKind::Create | LogKind::Mkdir | LogKind::Write => {
                Style::default().fg(Color::Green)
            }
        }
    }

    // ── scheduler ──────────────────────────────────────────────
    pub fn process_color(pid: u32) -> Color {
        match pid {
            1 => Color::Cyan,
            2 => Color::Green,
            3 => Color::Magenta,
            4 => Color::Yellow,
            _ => Color::White,
        }
    }

    pub fn clock_cursor_style() -> Style {
        Style::default()
            .fg(Color::Red)
            .add_modifier(Modifier::BOLD)
    }

    // ── session ────────────────────────────────────────────────
    pub fn offline_style() -> Style {
        Style::default()
            .fg(Color::Red)
            .add_modifier(Modifier::BOLD)
    }
}
