//! Dashboard header: subject title and dark mode toggle

use eframe::egui::{self, RichText};

use crate::app::DashboardApp;
use crate::ui::components::render_catalog_menu;
use crate::view;

/// Render the title block with the theme toggle on the right
pub fn render_header(app: &mut DashboardApp, ui: &mut egui::Ui, compact: bool) {
    let theme = app.ui.current_theme.clone();
    let subject = view::dashboard_subject(app.store.filters());
    let (title_size, subtitle_size) = if compact { (18.0, 12.0) } else { (22.0, 13.0) };

    ui.horizontal(|ui| {
        ui.vertical(|ui| {
            ui.label(
                RichText::new(view::header_title(subject))
                    .size(title_size)
                    .strong()
                    .color(theme.text_primary),
            );
            ui.label(
                RichText::new(view::header_subtitle(subject))
                    .size(subtitle_size)
                    .color(theme.text_secondary),
            );
        });

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if compact {
                render_catalog_menu(app, ui);
            }
            let (icon, hover) = if app.ui.dark_mode {
                ("☀", "Switch to light mode")
            } else {
                ("🌙", "Switch to dark mode")
            };
            if ui
                .add(egui::Button::new(RichText::new(icon).size(18.0)).frame(false))
                .on_hover_text(hover)
                .clicked()
            {
                app.ui.toggle_dark_mode();
            }
        });
    });
}
