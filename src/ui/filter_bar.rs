//! Filter bar: option menus, toggle chips, count and sort

use eframe::egui::{self, RichText};

use crate::app::DashboardApp;
use crate::chapter::{CLASS_PREFIX, Status};
use crate::filter::{FilterField, Selection};
use crate::ui::components::toggle_chip;
use crate::view::{self, SortOrder};

/// Render the filter chips row
pub fn render_filter_bar(app: &mut DashboardApp, ui: &mut egui::Ui) {
    let theme = app.ui.current_theme.clone();
    let subject = view::dashboard_subject(app.store.filters());

    ui.horizontal_wrapped(|ui| {
        ui.label(RichText::new("Filters:").color(theme.text_secondary));

        let classes: Vec<(String, String)> = view::class_options()
            .iter()
            .map(|class| (class.clone(), format!("{}{}", CLASS_PREFIX, class)))
            .collect();
        render_option_menu(app, ui, FilterField::Class, "Class", &classes);

        let units: Vec<(String, String)> = view::unit_options(subject)
            .iter()
            .map(|unit| (unit.clone(), unit.clone()))
            .collect();
        render_option_menu(app, ui, FilterField::Unit, "Units", &units);

        ui.separator();

        let not_started = app.store.filters().status.contains(Status::NotStarted.as_str());
        if toggle_chip(ui, &theme, "Not Started", not_started) {
            app.toggle_not_started();
        }

        let weak = app.store.filters().weak.contains("true");
        if toggle_chip(ui, &theme, "Weak Chapters", weak) {
            app.toggle_weak();
        }
    });
}

/// Render the "Showing all chapters (N)" line with the sort toggle
pub fn render_count_row(app: &mut DashboardApp, ui: &mut egui::Ui) {
    let theme = app.ui.current_theme.clone();
    let count = app.store.filtered_chapters().len();

    ui.horizontal(|ui| {
        ui.label(RichText::new(view::count_label(count)).color(theme.text_secondary));
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let label = match app.ui.sort_order {
                SortOrder::Desc => "⬇ Sort",
                SortOrder::Asc => "⬆ Sort",
            };
            let hover = format!("Total questions, {}", app.ui.sort_order.as_str());
            if ui
                .add(egui::Button::new(RichText::new(label).color(theme.link)).frame(false))
                .on_hover_text(hover)
                .clicked()
            {
                app.ui.toggle_sort();
            }
        });
    });
}

/// Multi-select dropdown with one checkbox per option and "Clear All".
/// Options are (filter value, display label) pairs.
fn render_option_menu(
    app: &mut DashboardApp,
    ui: &mut egui::Ui,
    field: FilterField,
    title: &str,
    options: &[(String, String)],
) {
    let selection = app.store.filters().get(field).clone();
    let button_text = menu_title(title, &selection);

    ui.menu_button(button_text, |ui| {
        ui.set_min_width(180.0);
        for (value, label) in options {
            let mut checked = selection.contains(value);
            if ui.checkbox(&mut checked, label).changed() {
                app.toggle_option(field, value, checked);
            }
        }
        ui.separator();
        if ui
            .add_enabled(!selection.is_all(), egui::Button::new("Clear All"))
            .clicked()
        {
            app.clear_filter(field);
            ui.close();
        }
    });
}

/// "Units" or "Units (2)"
fn menu_title(title: &str, selection: &Selection) -> String {
    match selection {
        Selection::All => format!("{} ⏷", title),
        Selection::Values(values) => format!("{} ({}) ⏷", title, values.len()),
    }
}
