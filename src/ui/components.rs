//! Shared UI components for the dashboard

use eframe::egui::{self, Color32, RichText, Stroke, Vec2};

use crate::app::DashboardApp;
use crate::app_data::syllabus;
use crate::state::Layout;
use crate::ui::theme::Theme;

/// Icons cycled over chapter cards, picked by `Chapter::icon_index`
pub const CHAPTER_ICONS: &[&str] = &["📖", "🔬", "📐", "⚛", "🔥", "💡", "🧲", "🧪"];

/// Render a pill-shaped toggle button. Returns true when clicked.
pub fn toggle_chip(ui: &mut egui::Ui, theme: &Theme, label: &str, active: bool) -> bool {
    let (fill, text_color, stroke) = if active {
        (theme.bg_active, Color32::WHITE, Stroke::new(1.0, theme.bg_active))
    } else {
        (Color32::TRANSPARENT, theme.text_primary, Stroke::new(1.0, theme.border))
    };

    let button = egui::Button::new(RichText::new(label).color(text_color).size(13.0))
        .fill(fill)
        .stroke(stroke)
        .corner_radius(16.0)
        .min_size(Vec2::new(0.0, 28.0));

    ui.add(button).clicked()
}

/// Render a bordered card frame
pub fn card_frame<R>(
    ui: &mut egui::Ui,
    theme: &Theme,
    content: impl FnOnce(&mut egui::Ui) -> R,
) -> R {
    egui::Frame::new()
        .fill(theme.bg_card)
        .corner_radius(8.0)
        .inner_margin(12.0)
        .stroke(Stroke::new(1.0, theme.border))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            content(ui)
        })
        .inner
}

/// Render placeholder cards while chapters load
pub fn render_skeleton_cards(ui: &mut egui::Ui, theme: &Theme, layout: Layout, count: usize) {
    // Pulse between two shades
    let time = ui.input(|i| i.time);
    let pulse = 0.7 + 0.3 * (time * 3.0).sin().abs() as f32;
    let fill = theme.skeleton.gamma_multiply(pulse);

    let line_height = match layout {
        Layout::Desktop => 14.0,
        Layout::Mobile => 12.0,
    };

    for _ in 0..count {
        card_frame(ui, theme, |ui| {
            ui.horizontal(|ui| {
                let (icon_rect, _) = ui.allocate_exact_size(Vec2::splat(24.0), egui::Sense::hover());
                ui.painter().rect_filled(icon_rect, 4.0, fill);

                ui.vertical(|ui| {
                    let width = ui.available_width();
                    let (title, _) = ui.allocate_exact_size(
                        Vec2::new(width * 0.5, line_height),
                        egui::Sense::hover(),
                    );
                    ui.painter().rect_filled(title, 4.0, fill);

                    if layout == Layout::Mobile {
                        ui.add_space(6.0);
                        let (detail, _) = ui.allocate_exact_size(
                            Vec2::new(width * 0.8, line_height),
                            egui::Sense::hover(),
                        );
                        ui.painter().rect_filled(detail, 4.0, fill);
                    }
                });
            });
        });
        ui.add_space(8.0);
    }
}

/// Render the load error panel. Shows the message exactly as stored.
/// Returns true when "Retry" was clicked.
pub fn render_error_panel(ui: &mut egui::Ui, theme: &Theme, message: &str) -> bool {
    let mut retry = false;

    egui::Frame::new()
        .fill(theme.error.gamma_multiply(0.1))
        .corner_radius(8.0)
        .inner_margin(16.0)
        .stroke(Stroke::new(1.0, theme.error))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.label(RichText::new(message).color(theme.error).size(14.0));
            ui.add_space(8.0);
            if ui.button("Retry").clicked() {
                retry = true;
            }
        });

    retry
}

/// Render the status bar at the bottom of the window
pub fn render_status_bar(app: &DashboardApp, ctx: &egui::Context) {
    let theme = &app.ui.current_theme;

    egui::TopBottomPanel::bottom("status_bar")
        .frame(
            egui::Frame::new()
                .fill(theme.bg_menu)
                .inner_margin(egui::Margin::symmetric(12, 4))
                .stroke(Stroke::new(1.0, theme.divider)),
        )
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(RichText::new(&app.status_message).color(theme.text_muted).size(11.0));
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(
                        RichText::new(app.store.source_description())
                            .color(theme.text_muted)
                            .size(11.0),
                    );
                    let notes = app.notes.count();
                    if notes > 0 {
                        ui.label(
                            RichText::new(format!("{} notes", notes))
                                .color(theme.text_muted)
                                .size(11.0),
                        );
                    }
                });
            });
        });
}

/// Render the catalog menu shared by both layouts
pub fn render_catalog_menu(app: &mut DashboardApp, ui: &mut egui::Ui) {
    ui.menu_button("☰", |ui| {
        if ui.button("Reload").clicked() {
            app.reload();
            ui.close();
        }
        if ui.button("Open catalog file...").clicked() {
            app.browse_for_catalog();
            ui.close();
        }
        let has_file = app.config.catalog.file.is_some();
        if ui
            .add_enabled(has_file, egui::Button::new("Use built-in catalog"))
            .clicked()
        {
            app.use_embedded_catalog();
            ui.close();
        }
        ui.separator();
        if ui.button("About").clicked() {
            app.ui.show_about_dialog = true;
            ui.close();
        }
    });
}

/// Render the About dialog
pub fn render_about_dialog(app: &mut DashboardApp, ctx: &egui::Context) {
    if !app.ui.show_about_dialog {
        return;
    }

    let theme = app.ui.current_theme.clone();
    let exam = &syllabus().exam;

    egui::Window::new("About")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .fixed_size([300.0, 220.0])
        .show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(8.0);

                ui.label(
                    RichText::new("PYQ Chapters")
                        .size(24.0)
                        .strong()
                        .color(theme.accent),
                );

                ui.add_space(4.0);
                ui.label(
                    RichText::new(format!("{} previous year questions", exam.name))
                        .size(14.0)
                        .color(theme.text_secondary),
                );

                ui.add_space(12.0);

                ui.label(
                    RichText::new(format!("Version {}", env!("CARGO_PKG_VERSION")))
                        .color(theme.text_muted),
                );

                ui.add_space(12.0);

                ui.label(RichText::new(&exam.summary).color(theme.text_secondary));

                ui.add_space(12.0);

                ui.label(
                    RichText::new("Built with Rust + egui")
                        .size(11.0)
                        .color(theme.text_muted),
                );

                ui.add_space(12.0);

                if ui.button("Close").clicked() {
                    app.ui.show_about_dialog = false;
                }

                ui.add_space(8.0);
            });
        });
}
