//! Desktop sidebar: exam info and subject list

use eframe::egui::{self, Color32, RichText, Stroke, Vec2};

use crate::app::DashboardApp;
use crate::app_data::syllabus;
use crate::chapter::Subject;
use crate::ui::components::render_catalog_menu;

/// Icon shown next to each subject
pub fn subject_icon(subject: Subject) -> &'static str {
    match subject {
        Subject::Physics => "⚛",
        Subject::Chemistry => "🧪",
        Subject::Mathematics => "📐",
    }
}

/// Render the sidebar panel
pub fn render_sidebar(app: &mut DashboardApp, ctx: &egui::Context) {
    let theme = app.ui.current_theme.clone();
    let exam = &syllabus().exam;

    egui::SidePanel::left("sidebar")
        .resizable(false)
        .exact_width(240.0)
        .frame(
            egui::Frame::new()
                .fill(theme.bg_menu)
                .inner_margin(16.0)
                .stroke(Stroke::new(1.0, theme.divider)),
        )
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(
                    RichText::new(format!("{} PYQs", exam.name))
                        .size(18.0)
                        .strong()
                        .color(theme.text_primary),
                );
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    render_catalog_menu(app, ui);
                });
            });
            ui.label(RichText::new(&exam.summary).size(12.0).color(theme.text_secondary));

            ui.add_space(16.0);

            let selected = app.store.filters().selected_subject();
            for &subject in Subject::all() {
                let active = selected == Some(subject);
                let (fill, text_color) = if active {
                    (theme.bg_active, Color32::WHITE)
                } else {
                    (Color32::TRANSPARENT, theme.text_primary)
                };

                let label = format!("{}  {} PYQs", subject_icon(subject), subject);
                let button = egui::Button::new(RichText::new(label).color(text_color).size(14.0))
                    .fill(fill)
                    .corner_radius(6.0)
                    .min_size(Vec2::new(ui.available_width(), 36.0));

                if ui.add(button).clicked() {
                    app.select_subject(subject);
                }
                ui.add_space(4.0);
            }
        });
}
