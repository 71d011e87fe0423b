//! Rendering — widgets for the three simulation tabs plus shared chrome.

pub mod fs_widget;
pub mod gantt;
pub mod layout;
pub mod offline;
pub mod plotter;
pub mod popup;
pub mod theme;
