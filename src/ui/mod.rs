//! UI modules for the chapter dashboard
//!
//! Rendering code organized by layout region. Each function takes the app
//! and draws one part of the frame.

mod chapter_card;
pub mod components;
mod desktop;
mod filter_bar;
mod header;
mod mobile;
mod sidebar;
pub mod theme;

pub use desktop::render_desktop;
pub use mobile::render_mobile;
