use eframe::egui::{self, Color32, Stroke, Visuals};

/// Theme color definitions
#[derive(Debug, Clone)]
pub struct Theme {
    pub dark: bool,

    // Base colors
    pub bg_page: Color32,
    pub bg_card: Color32,
    pub bg_menu: Color32,
    pub bg_active: Color32,

    // Text colors
    pub text_primary: Color32,
    pub text_secondary: Color32,
    pub text_muted: Color32,

    // Accent colors
    pub accent: Color32,
    pub link: Color32,
    pub icon: Color32,

    // Semantic colors
    pub trend_up: Color32,
    pub trend_down: Color32,
    pub error: Color32,

    // UI element colors
    pub border: Color32,
    pub divider: Color32,
    pub skeleton: Color32,
}

impl Theme {
    pub fn for_mode(dark: bool) -> Self {
        if dark { Self::dark() } else { Self::light() }
    }

    /// Light palette
    pub fn light() -> Self {
        Self {
            dark: false,

            bg_page: Color32::from_rgb(255, 255, 255),
            bg_card: Color32::from_rgb(255, 255, 255),
            bg_menu: Color32::from_rgb(255, 255, 255),
            bg_active: Color32::from_rgb(29, 41, 51), // #1D2933

            text_primary: Color32::from_rgb(16, 19, 25),   // #101319
            text_secondary: Color32::from_rgb(80, 93, 121), // #505D79
            text_muted: Color32::from_rgb(130, 140, 160),

            accent: Color32::from_rgb(255, 136, 31), // #FF881F
            link: Color32::from_rgb(0, 101, 222),    // #0065DE
            icon: Color32::from_rgb(249, 115, 22),   // Orange-500

            trend_up: Color32::from_rgb(0, 127, 66),   // #007F42
            trend_down: Color32::from_rgb(224, 42, 47), // #E02A2F
            error: Color32::from_rgb(220, 38, 38),

            border: Color32::from_rgb(209, 216, 224), // #D1D8E0
            divider: Color32::from_rgb(234, 237, 241), // #EAEDF1
            skeleton: Color32::from_rgb(229, 231, 235),
        }
    }

    /// Dark palette
    pub fn dark() -> Self {
        Self {
            dark: true,

            bg_page: Color32::from_rgb(34, 46, 63), // #222E3F
            bg_card: Color32::from_rgb(34, 46, 63),
            bg_menu: Color32::from_rgb(30, 42, 56), // #1E2A38
            bg_active: Color32::from_rgb(29, 41, 51),

            text_primary: Color32::from_rgb(255, 255, 255),
            text_secondary: Color32::from_rgb(185, 191, 208), // #B9BFD0
            text_muted: Color32::from_rgb(140, 150, 170),

            accent: Color32::from_rgb(255, 136, 31),
            link: Color32::from_rgb(111, 187, 252), // #6FBBFC
            icon: Color32::from_rgb(249, 115, 22),

            trend_up: Color32::from_rgb(86, 238, 176),  // #56EEB0
            trend_down: Color32::from_rgb(251, 72, 77), // #FB484D
            error: Color32::from_rgb(248, 113, 113),

            border: Color32::from_rgb(62, 85, 116),  // #3E5574
            divider: Color32::from_rgb(48, 67, 90),  // #30435A
            skeleton: Color32::from_rgb(55, 70, 92),
        }
    }

    /// Apply this theme to egui's visuals
    pub fn apply(&self, ctx: &egui::Context) {
        let mut visuals = if self.dark { Visuals::dark() } else { Visuals::light() };

        // Window and panel backgrounds
        visuals.window_fill = self.bg_menu;
        visuals.panel_fill = self.bg_page;
        visuals.faint_bg_color = self.bg_card;
        visuals.extreme_bg_color = self.bg_menu;

        visuals.widgets.noninteractive.bg_stroke = Stroke::new(1.0, self.border);
        visuals.widgets.noninteractive.fg_stroke = Stroke::new(1.0, self.text_secondary);

        visuals.widgets.inactive.weak_bg_fill = self.bg_card;
        visuals.widgets.inactive.bg_stroke = Stroke::new(1.0, self.border);
        visuals.widgets.inactive.fg_stroke = Stroke::new(1.0, self.text_primary);

        visuals.widgets.hovered.bg_stroke = Stroke::new(1.0, self.link);
        visuals.widgets.hovered.fg_stroke = Stroke::new(1.0, self.text_primary);

        visuals.widgets.open.bg_stroke = Stroke::new(1.0, self.accent);

        visuals.selection.bg_fill = self.link.gamma_multiply(0.3);
        visuals.selection.stroke = Stroke::new(1.0, self.link);
        visuals.hyperlink_color = self.link;

        visuals.window_stroke = Stroke::new(1.0, self.border);
        visuals.window_shadow = egui::epaint::Shadow::NONE;
        visuals.popup_shadow = egui::epaint::Shadow::NONE;

        ctx.set_visuals(visuals);
    }
}
