//! Mobile layout: stacked header, subject tabs and two-line cards

use eframe::egui::{self, Color32, RichText, Stroke, Vec2};

use crate::app::DashboardApp;
use crate::chapter::Subject;
use crate::state::Layout;
use crate::ui::desktop::render_chapter_list;
use crate::ui::filter_bar::{render_count_row, render_filter_bar};
use crate::ui::header::render_header;
use crate::ui::sidebar::subject_icon;

const SKELETON_CARDS: usize = 6;

/// Render the mobile dashboard
pub fn render_mobile(app: &mut DashboardApp, ctx: &egui::Context) {
    let theme = app.ui.current_theme.clone();

    egui::TopBottomPanel::top("mobile_header")
        .frame(
            egui::Frame::new()
                .fill(theme.bg_page)
                .inner_margin(12.0)
                .stroke(Stroke::new(1.0, theme.divider)),
        )
        .show(ctx, |ui| {
            render_header(app, ui, true);
            ui.add_space(8.0);
            render_subject_tabs(app, ui);
            ui.add_space(8.0);
            render_filter_bar(app, ui);
            ui.add_space(4.0);
            render_count_row(app, ui);
        });

    egui::CentralPanel::default()
        .frame(egui::Frame::new().fill(theme.bg_page).inner_margin(12.0))
        .show(ctx, |ui| {
            render_chapter_list(app, ui, Layout::Mobile, SKELETON_CARDS);
        });
}

/// Horizontal subject tabs replacing the sidebar
fn render_subject_tabs(app: &mut DashboardApp, ui: &mut egui::Ui) {
    let theme = app.ui.current_theme.clone();
    let selected = app.store.filters().selected_subject();

    ui.horizontal(|ui| {
        let width = (ui.available_width() - 8.0) / Subject::all().len() as f32;
        for &subject in Subject::all() {
            let active = selected == Some(subject);
            let (fill, text_color) = if active {
                (theme.bg_active, Color32::WHITE)
            } else {
                (Color32::TRANSPARENT, theme.text_secondary)
            };

            let label = format!("{} {}", subject_icon(subject), subject);
            let button = egui::Button::new(RichText::new(label).color(text_color).size(12.0))
                .fill(fill)
                .stroke(Stroke::new(1.0, theme.border))
                .corner_radius(6.0)
                .min_size(Vec2::new(width, 32.0));

            if ui.add(button).clicked() {
                app.select_subject(subject);
            }
        }
    });
}
