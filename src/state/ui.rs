//! UI-related application state

use egui_commonmark::CommonMarkCache;

use crate::config::{DisplayConfig, LayoutMode};
use crate::ui::theme::Theme;
use crate::view::SortOrder;

/// Which of the two dashboard layouts is on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// Sidebar, fixed header and one-line chapter cards
    Desktop,
    /// Stacked header, subject tabs and two-line chapter cards
    Mobile,
}

impl Layout {
    /// Resolve the layout for the current window width
    pub fn resolve(mode: LayoutMode, width: f32, breakpoint: f32) -> Self {
        match mode {
            LayoutMode::Desktop => Layout::Desktop,
            LayoutMode::Mobile => Layout::Mobile,
            LayoutMode::Auto if width <= breakpoint => Layout::Mobile,
            LayoutMode::Auto => Layout::Desktop,
        }
    }
}

/// UI-related state. Lives for the session only.
pub struct UiState {
    /// Cache for markdown rendering of notes
    pub markdown_cache: CommonMarkCache,
    /// Current theme colors
    pub current_theme: Theme,
    /// Whether the dark palette is active
    pub dark_mode: bool,
    /// Set once the user flips the header toggle; stops following the system
    dark_mode_pinned: bool,
    /// Whether theme needs to be applied
    pub theme_dirty: bool,
    /// Client-side sort order of the chapter list
    pub sort_order: SortOrder,
    /// Layout drawn on the last frame
    pub layout: Layout,
    /// Whether to show the About dialog
    pub show_about_dialog: bool,
}

impl UiState {
    /// Create UI state from display settings
    pub fn new(display: &DisplayConfig) -> Self {
        let dark_mode = display.dark_mode.unwrap_or(false);
        Self {
            markdown_cache: CommonMarkCache::default(),
            current_theme: Theme::for_mode(dark_mode),
            dark_mode,
            dark_mode_pinned: display.dark_mode.is_some(),
            theme_dirty: true, // Apply theme on first frame
            sort_order: display.default_sort,
            layout: Layout::Desktop,
            show_about_dialog: false,
        }
    }

    /// Follow the operating system theme unless the user or config pinned one
    pub fn follow_system(&mut self, system_dark: Option<bool>) {
        if self.dark_mode_pinned {
            return;
        }
        if let Some(dark) = system_dark {
            if dark != self.dark_mode {
                tracing::debug!("System theme changed, dark mode = {}", dark);
                self.set_dark_mode(dark);
            }
        }
    }

    /// Flip between light and dark from the header toggle
    pub fn toggle_dark_mode(&mut self) {
        self.dark_mode_pinned = true;
        self.set_dark_mode(!self.dark_mode);
    }

    pub fn toggle_sort(&mut self) {
        self.sort_order = self.sort_order.toggled();
    }

    fn set_dark_mode(&mut self, dark: bool) {
        self.dark_mode = dark;
        self.current_theme = Theme::for_mode(dark);
        self.theme_dirty = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_resolve() {
        assert_eq!(Layout::resolve(LayoutMode::Auto, 768.0, 768.0), Layout::Mobile);
        assert_eq!(Layout::resolve(LayoutMode::Auto, 769.0, 768.0), Layout::Desktop);
        assert_eq!(Layout::resolve(LayoutMode::Desktop, 300.0, 768.0), Layout::Desktop);
        assert_eq!(Layout::resolve(LayoutMode::Mobile, 1600.0, 768.0), Layout::Mobile);
    }

    #[test]
    fn test_follows_system_until_toggled() {
        let mut ui = UiState::new(&DisplayConfig::default());
        assert!(!ui.dark_mode);

        ui.follow_system(Some(true));
        assert!(ui.dark_mode);
        assert!(ui.theme_dirty);

        ui.toggle_dark_mode();
        assert!(!ui.dark_mode);

        // Pinned now: system changes are ignored
        ui.follow_system(Some(true));
        assert!(!ui.dark_mode);
    }

    #[test]
    fn test_config_pins_dark_mode() {
        let display = DisplayConfig {
            dark_mode: Some(true),
            ..DisplayConfig::default()
        };
        let mut ui = UiState::new(&display);
        assert!(ui.dark_mode);
        ui.follow_system(Some(false));
        assert!(ui.dark_mode);
    }

    #[test]
    fn test_sort_toggle() {
        let mut ui = UiState::new(&DisplayConfig::default());
        assert_eq!(ui.sort_order, SortOrder::Desc);
        ui.toggle_sort();
        assert_eq!(ui.sort_order, SortOrder::Asc);
    }
}
