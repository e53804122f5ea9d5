//! brief-tui: Terminal UI components
//!
//! Widgets for rendering an intake conversation with ratatui and crossterm.

pub mod format;
pub mod input;
pub mod theme;
pub mod widgets;

pub use theme::Theme;
