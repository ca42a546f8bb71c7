//! Main GUI application module
//!
//! Contains the GuiApp struct: the send button with its preview, and the feed.

use crate::{
    config::Config,
    controller::{SubmissionController, SubmitOutcome},
    error::SubmitError,
    submission_log,
    submit::SubmissionClient,
    transaction::RawTransaction,
};
use anyhow::{anyhow, Result};
use eframe::{egui, egui::RichText, App, Frame, NativeOptions};
use std::collections::VecDeque;
use std::path::PathBuf;
use std::time::Duration;

use super::async_job::AsyncJob;
use super::notifications::{push_notification, NotificationEntry};
use super::theme::{configure_style, AppTheme};
use super::widgets::{show_preview, FeedView};

/// How often the UI wakes up to poll jobs and the feed
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// The request currently outstanding, with the transaction it carries
struct PendingSubmission {
    tx: RawTransaction,
    job: AsyncJob<Result<String, SubmitError>>,
}

pub struct GuiApp {
    pub(crate) theme: AppTheme,
    pub(crate) controller: SubmissionController,
    pub(crate) client: std::result::Result<SubmissionClient, String>,
    pending: Option<PendingSubmission>,
    pub(crate) feed: FeedView,
    pub(crate) notifications: VecDeque<NotificationEntry>,
    log_path: PathBuf,
}

impl GuiApp {
    fn new(config: Config, ctx: &egui::Context) -> Self {
        let theme = AppTheme::default();
        configure_style(ctx, &theme);
        Self::with_config(config)
    }

    /// Build and mount the widget without touching an egui context
    pub fn with_config(config: Config) -> Self {
        let client = SubmissionClient::new(&config).map_err(|e| {
            tracing::error!("Failed to create HTTP client: {}", e);
            e.to_string()
        });

        let mut controller = SubmissionController::new();
        controller.mount();

        Self {
            theme: AppTheme::default(),
            controller,
            client,
            pending: None,
            feed: FeedView::connect(config.feed_url.clone(), config.feed_capacity),
            notifications: VecDeque::with_capacity(20),
            log_path: config.log_path,
        }
    }

    pub fn controller(&self) -> &SubmissionController {
        &self.controller
    }

    /// Handle a click on the send button
    pub(crate) fn start_submit(&mut self) {
        let Some(tx) = self.controller.begin_submit() else {
            return;
        };

        let client = match &self.client {
            Ok(client) => client.clone(),
            Err(e) => {
                let outcome = self.controller.finish_submit(Err(SubmitError::Worker(e.clone())));
                self.record_outcome(&tx, &outcome);
                return;
            }
        };

        tracing::info!("Submitting transaction with nonce {} to {}", tx.nonce, client.endpoint());
        let payload = tx.clone();
        let job = AsyncJob::spawn(move || async move { client.submit(&payload).await });
        self.pending = Some(PendingSubmission { tx, job });
    }

    fn poll_jobs(&mut self) {
        if let Some(pending) = &mut self.pending {
            if let Some(res) = pending.job.poll() {
                let result = res.unwrap_or_else(|e| Err(SubmitError::Worker(e.to_string())));
                let outcome = self.controller.finish_submit(result);
                if let Some(pending) = self.pending.take() {
                    self.record_outcome(&pending.tx, &outcome);
                }
            }
        }

        self.feed.poll();
        for message in self.feed.take_notifications() {
            push_notification(&mut self.notifications, message);
        }
    }

    fn record_outcome(&mut self, tx: &RawTransaction, outcome: &SubmitOutcome) {
        let message = match outcome {
            SubmitOutcome::Accepted { nonce, status } => format!("[OK] Tx nonce {} {}", nonce, status),
            SubmitOutcome::Failed { nonce, error } => format!("[!!] Tx nonce {} failed: {}", nonce, error),
        };
        push_notification(&mut self.notifications, message);

        if let Err(e) = submission_log::record_outcome(&self.log_path, tx, outcome) {
            tracing::warn!("Failed to write submission log: {}", e);
        }
    }

    fn render_submit_section(&mut self, ui: &mut egui::Ui) {
        let button = self.theme.button_send("SEND_TRANSACTION");
        let hover = if self.controller.is_in_flight() {
            "Waiting for the sequencer to answer"
        } else {
            "Submit the previewed transaction"
        };
        if ui
            .add_enabled(self.controller.can_submit(), button)
            .on_hover_text(hover)
            .on_disabled_hover_text(hover)
            .clicked()
        {
            self.start_submit();
        }

        // Fixed-height line so the layout does not jump
        ui.allocate_ui(egui::vec2(ui.available_width(), 24.0), |ui| {
            if self.controller.is_in_flight() {
                ui.add(egui::Spinner::new());
            } else if !self.controller.status().is_empty() {
                ui.label(
                    RichText::new(format!("[STATUS]::{}", self.controller.status()))
                        .color(self.theme.text_primary),
                );
            } else if !self.controller.error().is_empty() {
                ui.label(
                    RichText::new(format!("[ERROR]::{}", self.controller.error()))
                        .color(self.theme.error),
                );
            }
        });
    }

    fn render_notifications(&self, ui: &mut egui::Ui) {
        if self.notifications.is_empty() {
            return;
        }
        ui.collapsing("LOG", |ui| {
            for entry in self.notifications.iter().rev() {
                ui.horizontal_wrapped(|ui| {
                    ui.label(RichText::new(entry.time_ago()).small().color(self.theme.text_secondary));
                    ui.label(RichText::new(&entry.message).small());
                });
            }
            ui.label(
                RichText::new(format!("history: {}", self.log_path.display()))
                    .small()
                    .color(self.theme.text_secondary),
            );
        });
    }
}

impl App for GuiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        self.poll_jobs();

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.vertical_centered(|ui| {
                    ui.add_space(self.theme.spacing_md);
                    self.render_submit_section(ui);
                });

                ui.add_space(self.theme.spacing_sm);
                self.theme.frame_panel().show(ui, |ui| {
                    ui.set_width(ui.available_width());
                    show_preview(ui, &self.theme, self.controller.preview());
                });

                ui.add_space(self.theme.spacing_md);
                self.theme.frame_panel().show(ui, |ui| {
                    ui.set_width(ui.available_width());
                    self.feed.show(ui, &self.theme);
                });

                ui.add_space(self.theme.spacing_sm);
                self.render_notifications(ui);
            });
        });

        ctx.request_repaint_after(POLL_INTERVAL);
    }
}

impl Drop for GuiApp {
    fn drop(&mut self) {
        // Any in-flight submission finishes into a closed channel
        self.feed.close();
        if self.pending.is_some() {
            tracing::debug!("Dropping console with a submission still in flight");
        }
    }
}

pub fn launch(config: Config) -> Result<()> {
    let app_creator = move |cc: &eframe::CreationContext<'_>| {
        Box::new(GuiApp::new(config.clone(), &cc.egui_ctx)) as Box<dyn App>
    };

    let viewport = egui::ViewportBuilder::default()
        .with_inner_size([720.0, 820.0])
        .with_min_inner_size([480.0, 480.0]);

    let native_options = NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native("Seqfeed - Sequencer Console", native_options, Box::new(app_creator))
        .map_err(|e| anyhow!("Failed to start GUI: {}", e))
}
