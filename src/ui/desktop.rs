//! Desktop layout: sidebar, fixed header and a scrolling card list

use eframe::egui::{self, Stroke};

use crate::app::DashboardApp;
use crate::state::Layout;
use crate::ui::chapter_card::render_chapter_card;
use crate::ui::components::{render_error_panel, render_skeleton_cards, render_status_bar};
use crate::ui::filter_bar::{render_count_row, render_filter_bar};
use crate::ui::header::render_header;
use crate::ui::sidebar::render_sidebar;
use crate::view;

const SKELETON_CARDS: usize = 8;

/// Render the desktop dashboard
pub fn render_desktop(app: &mut DashboardApp, ctx: &egui::Context) {
    let theme = app.ui.current_theme.clone();

    render_sidebar(app, ctx);
    render_status_bar(app, ctx);

    egui::TopBottomPanel::top("desktop_header")
        .frame(
            egui::Frame::new()
                .fill(theme.bg_page)
                .inner_margin(16.0)
                .stroke(Stroke::new(1.0, theme.divider)),
        )
        .show(ctx, |ui| {
            render_header(app, ui, false);
            ui.add_space(12.0);
            render_filter_bar(app, ui);
            ui.add_space(8.0);
            render_count_row(app, ui);
        });

    egui::CentralPanel::default()
        .frame(egui::Frame::new().fill(theme.bg_page).inner_margin(16.0))
        .show(ctx, |ui| {
            render_chapter_list(app, ui, Layout::Desktop, SKELETON_CARDS);
        });
}

/// Cards, skeletons or the error panel, whichever applies.
/// Shared with the mobile layout.
pub fn render_chapter_list(app: &mut DashboardApp, ui: &mut egui::Ui, layout: Layout, skeletons: usize) {
    let theme = app.ui.current_theme.clone();

    egui::ScrollArea::vertical()
        .auto_shrink([false; 2])
        .show(ui, |ui| {
            if let Some(message) = app.store.error().map(str::to_string) {
                if render_error_panel(ui, &theme, &message) {
                    app.reload();
                }
                return;
            }

            if app.store.loading() {
                render_skeleton_cards(ui, &theme, layout, skeletons);
                return;
            }

            let chapters = view::sorted(app.store.filtered_chapters(), app.ui.sort_order);
            for chapter in chapters {
                render_chapter_card(
                    ui,
                    &theme,
                    layout,
                    chapter,
                    &mut app.notes,
                    &mut app.ui.markdown_cache,
                );
                ui.add_space(8.0);
            }
        });
}
