use crate::gui::theme::AppTheme;
use crate::transaction::RawTransaction;
use eframe::egui::{self, RichText};

/// Render the pending transaction as a two-column grid
pub fn show_preview(ui: &mut egui::Ui, theme: &AppTheme, preview: Option<&RawTransaction>) {
    ui.label(theme.section_header_text("PREVIEW"));
    ui.add_space(theme.spacing_xs);

    let Some(tx) = preview else {
        ui.label(RichText::new("generating...").color(theme.text_secondary));
        return;
    };

    let chain_id = tx.chain_id.to_string();
    let l1_block = tx.l1_block_number.to_string();
    let rows: [(&str, &str); 10] = [
        ("nonce", &tx.nonce),
        ("from", &tx.from),
        ("to", &tx.to),
        ("value", &tx.value),
        ("data", &tx.data),
        ("gas_limit", &tx.gas_limit),
        ("gas_price", &tx.gas_price),
        ("chain_id", &chain_id),
        ("l1_block_number", &l1_block),
        ("submission_fee", &tx.submission_fee),
    ];

    egui::Grid::new("preview_grid")
        .num_columns(2)
        .spacing([theme.spacing_md, theme.spacing_xs])
        .show(ui, |ui| {
            for (name, value) in rows {
                ui.label(RichText::new(name).color(theme.text_secondary));
                ui.add(egui::Label::new(RichText::new(value).monospace()).wrap(true));
                ui.end_row();
            }
        });
}
