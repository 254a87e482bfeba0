//! Chapter card rendering
//!
//! Desktop cards put everything on one line. Mobile cards stack the title
//! above a details line. Both share the notes editor.

use eframe::egui::{self, RichText, Vec2};
use egui_commonmark::{CommonMarkCache, CommonMarkViewer};

use crate::chapter::Chapter;
use crate::state::{Layout, NoteKey, NotesState};
use crate::ui::components::{CHAPTER_ICONS, card_frame};
use crate::ui::theme::Theme;
use crate::view::CardSummary;

/// Render one chapter card
pub fn render_chapter_card(
    ui: &mut egui::Ui,
    theme: &Theme,
    layout: Layout,
    chapter: &Chapter,
    notes: &mut NotesState,
    markdown_cache: &mut CommonMarkCache,
) {
    let summary = CardSummary::from_chapter(chapter);
    let icon = CHAPTER_ICONS[chapter.icon_index(CHAPTER_ICONS.len())];
    let key = NoteKey::for_chapter(chapter);

    card_frame(ui, theme, |ui| {
        match layout {
            Layout::Desktop => render_desktop_row(ui, theme, icon, &summary, notes, &key),
            Layout::Mobile => render_mobile_rows(ui, theme, icon, &summary, notes, &key),
        }
        render_note(ui, theme, notes, markdown_cache, &key);
    });
}

fn render_desktop_row(
    ui: &mut egui::Ui,
    theme: &Theme,
    icon: &str,
    summary: &CardSummary,
    notes: &mut NotesState,
    key: &NoteKey,
) {
    ui.horizontal(|ui| {
        ui.label(RichText::new(icon).size(18.0).color(theme.icon));
        ui.add_space(4.0);
        ui.label(
            RichText::new(&summary.title)
                .size(14.0)
                .strong()
                .color(theme.text_primary),
        );
        if summary.weak {
            weak_badge(ui, theme);
        }

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            note_button(ui, notes, key);
            ui.label(RichText::new(summary.solved_label()).color(theme.text_secondary));
            divider(ui, theme);
            ui.label(RichText::new(summary.previous_label()).color(theme.text_secondary));
            divider(ui, theme);
            latest_label(ui, theme, summary);
        });
    });
}

fn render_mobile_rows(
    ui: &mut egui::Ui,
    theme: &Theme,
    icon: &str,
    summary: &CardSummary,
    notes: &mut NotesState,
    key: &NoteKey,
) {
    ui.horizontal(|ui| {
        ui.label(RichText::new(icon).size(16.0).color(theme.icon));
        ui.label(
            RichText::new(&summary.title)
                .size(13.0)
                .strong()
                .color(theme.text_primary),
        );
        if summary.weak {
            weak_badge(ui, theme);
        }
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            note_button(ui, notes, key);
        });
    });

    ui.horizontal_wrapped(|ui| {
        ui.spacing_mut().item_spacing = Vec2::new(6.0, 2.0);
        latest_label(ui, theme, summary);
        divider(ui, theme);
        ui.label(
            RichText::new(summary.previous_label())
                .size(12.0)
                .color(theme.text_secondary),
        );
        divider(ui, theme);
        ui.label(
            RichText::new(summary.solved_label())
                .size(12.0)
                .color(theme.text_secondary),
        );
    });
}

/// Latest year count with its trend arrow
fn latest_label(ui: &mut egui::Ui, theme: &Theme, summary: &CardSummary) {
    if let Some(arrow) = summary.trend_arrow() {
        let color = if summary.trend_up == Some(true) {
            theme.trend_up
        } else {
            theme.trend_down
        };
        ui.label(RichText::new(arrow).color(color));
    }
    ui.label(RichText::new(summary.latest_label()).color(theme.text_secondary));
}

fn weak_badge(ui: &mut egui::Ui, theme: &Theme) {
    ui.label(
        RichText::new("Weak")
            .size(10.0)
            .color(theme.trend_down)
            .background_color(theme.trend_down.gamma_multiply(0.12)),
    );
}

fn divider(ui: &mut egui::Ui, theme: &Theme) {
    ui.label(RichText::new("|").color(theme.divider));
}

fn note_button(ui: &mut egui::Ui, notes: &mut NotesState, key: &NoteKey) {
    let label = if notes.note(key).is_some() { "📝" } else { "✏" };
    let response = ui.small_button(label).on_hover_text("Notes");
    if response.clicked() && !notes.is_editing(key) {
        notes.start_editing(key.clone());
    }
}

/// Notes editor or rendered note under the card content
fn render_note(
    ui: &mut egui::Ui,
    theme: &Theme,
    notes: &mut NotesState,
    markdown_cache: &mut CommonMarkCache,
    key: &NoteKey,
) {
    if notes.is_editing(key) {
        ui.add_space(8.0);
        ui.add(
            egui::TextEdit::multiline(&mut notes.draft)
                .hint_text("Add a note (markdown supported)")
                .desired_rows(3)
                .desired_width(f32::INFINITY),
        );
        ui.horizontal(|ui| {
            if ui.button("Save").clicked() {
                notes.save();
            }
            if ui.button("Cancel").clicked() {
                notes.cancel();
            }
            if notes.note(key).is_some() && ui.button("Delete").clicked() {
                notes.delete(key);
            }
        });
    } else if let Some(text) = notes.note(key) {
        ui.add_space(6.0);
        egui::Frame::new()
            .fill(theme.divider.gamma_multiply(0.5))
            .corner_radius(4.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                CommonMarkViewer::new().show(ui, markdown_cache, text);
            });
    }
}
