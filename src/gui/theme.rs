//! Terminal-style theme for the console
//!
//! Black background, bright green text, red for errors and magenta record tags.

use eframe::egui;

#[derive(Clone, Copy)]
pub struct AppTheme {
    // Base colors
    pub background: egui::Color32,
    pub surface: egui::Color32,
    pub surface_hover: egui::Color32,
    pub surface_active: egui::Color32,
    pub text_primary: egui::Color32,
    pub text_secondary: egui::Color32,

    // Semantic colors
    pub primary: egui::Color32,
    pub primary_hover: egui::Color32,
    pub error: egui::Color32,
    pub warning: egui::Color32,
    pub tag: egui::Color32,

    pub spacing_xs: f32,
    pub spacing_sm: f32,
    pub spacing_md: f32,

    pub button_large: egui::Vec2,
}

impl Default for AppTheme {
    fn default() -> Self {
        Self {
            background: egui::Color32::BLACK,
            surface: egui::Color32::from_rgb(8, 8, 8),
            surface_hover: egui::Color32::from_rgb(0, 60, 0),
            surface_active: egui::Color32::from_rgb(0, 90, 0),
            text_primary: egui::Color32::from_rgb(74, 222, 128),    // #4ade80
            text_secondary: egui::Color32::from_rgb(34, 197, 94),   // #22c55e

            primary: egui::Color32::from_rgb(0, 255, 0),
            primary_hover: egui::Color32::from_rgb(120, 255, 120),
            error: egui::Color32::from_rgb(239, 68, 68),            // #ef4444
            warning: egui::Color32::from_rgb(255, 170, 0),
            tag: egui::Color32::from_rgb(168, 85, 247),             // #a855f7

            spacing_xs: 4.0,
            spacing_sm: 8.0,
            spacing_md: 16.0,

            button_large: egui::vec2(220.0, 44.0),
        }
    }
}

impl AppTheme {
    /// The glowing send button
    pub fn button_send(&self, text: &str) -> egui::Button<'_> {
        egui::Button::new(
            egui::RichText::new(text)
                .color(self.text_primary)
                .strong()
                .size(16.0),
        )
        .fill(self.background)
        .stroke(egui::Stroke::new(2.0, self.text_primary))
        .min_size(self.button_large)
    }

    /// Bordered panel used for the preview and the feed
    pub fn frame_panel(&self) -> egui::Frame {
        egui::Frame::none()
            .fill(self.background)
            .rounding(0.0)
            .inner_margin(self.spacing_md)
            .stroke(egui::Stroke::new(1.0, self.text_primary))
    }

    pub fn section_header_text(&self, title: &str) -> egui::RichText {
        egui::RichText::new(title)
            .size(18.0)
            .color(self.text_primary)
            .strong()
    }
}

/// Configure the egui context style with the given theme
pub fn configure_style(ctx: &egui::Context, theme: &AppTheme) {
    let mut visuals = egui::Visuals::dark();
    visuals.window_fill = theme.background;
    visuals.panel_fill = theme.background;
    visuals.extreme_bg_color = theme.background;
    visuals.override_text_color = Some(theme.text_primary);

    visuals.widgets.noninteractive.bg_fill = theme.surface;
    visuals.widgets.inactive.bg_fill = theme.background;
    visuals.widgets.hovered.bg_fill = theme.surface_hover;
    visuals.widgets.active.bg_fill = theme.surface_active;

    visuals.widgets.inactive.bg_stroke = egui::Stroke::new(2.0, theme.text_primary);
    visuals.widgets.hovered.bg_stroke = egui::Stroke::new(2.0, theme.primary_hover);
    visuals.widgets.active.bg_stroke = egui::Stroke::new(3.0, theme.primary);

    ctx.set_visuals(visuals);

    let mut style = (*ctx.style()).clone();
    style.spacing.item_spacing = egui::vec2(8.0, 6.0);
    style.spacing.button_padding = egui::vec2(20.0, 12.0);

    // Everything monospace
    for (text_style, size) in [
        (egui::TextStyle::Heading, 20.0),
        (egui::TextStyle::Body, 14.0),
        (egui::TextStyle::Button, 16.0),
        (egui::TextStyle::Monospace, 13.0),
        (egui::TextStyle::Small, 11.0),
    ] {
        style
            .text_styles
            .insert(text_style, egui::FontId::new(size, egui::FontFamily::Monospace));
    }

    ctx.set_style(style);
}
