use eframe::egui;
use std::sync::Arc;

use crate::catalog::{self, EmbeddedCatalog};
use crate::chapter::{Status, Subject};
use crate::config::Config;
use crate::filter::{FilterField, Selection};
use crate::state::{Layout, NotesState, UiState};
use crate::store::{ChaptersStore, StoreEvent};
use crate::ui;

/// Main application state
pub struct DashboardApp {
    /// Application configuration
    pub config: Config,
    /// Chapter catalog, filters and the filtered view
    pub store: ChaptersStore,
    /// UI-related state (theme, sort order, layout, dialogs)
    pub ui: UiState,
    /// Session notes attached to chapter cards
    pub notes: NotesState,
    /// Status message for the status bar
    pub status_message: String,
}

impl DashboardApp {
    /// Create a new application instance and start loading chapters
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        // Load configuration
        let config = Config::load_or_default();

        let store = ChaptersStore::new(catalog::source_from_config(&config));
        let ui = UiState::new(&config.display);

        let mut app = Self {
            config,
            store,
            ui,
            notes: NotesState::default(),
            status_message: "Ready".to_string(),
        };

        app.reload();
        app
    }

    /// Fetch the catalog again
    pub fn reload(&mut self) {
        self.store.load();
        self.status_message = self.store.status().description().to_string();
    }

    /// Switch subject from the sidebar or subject tabs. Clicking the active
    /// subject still clears the other filters.
    pub fn select_subject(&mut self, subject: Subject) {
        self.store.set_filter(FilterField::Subject, subject.as_str());
    }

    /// Check or uncheck one option of a multi-select menu
    pub fn toggle_option(&mut self, field: FilterField, value: &str, checked: bool) {
        let selection = self.store.filters().get(field).toggled(value, checked);
        self.store.set_selection(field, selection);
    }

    /// Reset a filter to "all" from a menu's "Clear All"
    pub fn clear_filter(&mut self, field: FilterField) {
        self.store.set_selection(field, Selection::All);
    }

    /// "Not Started" chip: on filters by status, off shows every status
    pub fn toggle_not_started(&mut self) {
        let value = if self.store.filters().status.contains(Status::NotStarted.as_str()) {
            "all"
        } else {
            Status::NotStarted.as_str()
        };
        self.store.set_filter(FilterField::Status, value);
    }

    /// "Weak Chapters" chip
    pub fn toggle_weak(&mut self) {
        let value = if self.store.filters().weak.contains("true") {
            "all"
        } else {
            "true"
        };
        self.store.set_filter(FilterField::Weak, value);
    }

    /// Pick a JSON catalog file and load from it
    pub fn browse_for_catalog(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .set_title("Select Chapter Catalog")
            .add_filter("JSON", &["json"])
            .pick_file()
        {
            self.config.catalog.file = Some(path.to_string_lossy().to_string());
            self.save_config();
            self.store.set_source(catalog::source_from_config(&self.config));
            self.reload();
        }
    }

    /// Go back to the built-in catalog
    pub fn use_embedded_catalog(&mut self) {
        self.config.catalog.file = None;
        self.save_config();
        let delay = std::time::Duration::from_millis(self.config.catalog.fetch_delay_ms);
        self.store.set_source(Arc::new(EmbeddedCatalog::new(delay)));
        self.reload();
    }

    /// Save configuration to disk
    pub fn save_config(&self) {
        if let Err(e) = self.config.save() {
            tracing::error!("Failed to save config: {}", e);
        }
    }

    /// Apply finished loads and keep repainting while one is in flight
    fn poll_store(&mut self, ctx: &egui::Context) {
        for event in self.store.poll() {
            self.status_message = match event {
                StoreEvent::Loaded { total, .. } => format!("Loaded {} chapters", total),
                StoreEvent::LoadFailed(message) => format!("Error: {}", message),
            };
        }

        if self.store.is_busy() {
            ctx.request_repaint();
        }
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Poll async tasks
        self.poll_store(ctx);

        let system_dark = ctx.system_theme().map(|theme| theme == egui::Theme::Dark);
        self.ui.follow_system(system_dark);

        if self.ui.theme_dirty {
            self.ui.current_theme.apply(ctx);
            self.ui.theme_dirty = false;
        }

        let width = ctx.input(|i| i.screen_rect().width());
        self.ui.layout = Layout::resolve(
            self.config.display.layout,
            width,
            self.config.display.mobile_breakpoint,
        );

        match self.ui.layout {
            Layout::Desktop => ui::render_desktop(self, ctx),
            Layout::Mobile => ui::render_mobile(self, ctx),
        }

        ui::components::render_about_dialog(self, ctx);
    }
}
