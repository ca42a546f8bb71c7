//! Feed view component for the GUI
//! Owns the feed connection and renders the newest-first record list

use crate::feed::{FeedConnection, FeedEvent, FeedState, FeedSubscriber};
use crate::gui::theme::AppTheme;
use eframe::egui::{self, RichText};
use std::collections::VecDeque;
use url::Url;

/// State for the feed widget
pub struct FeedView {
    subscriber: FeedSubscriber,
    /// `None` once the widget is torn down
    connection: Option<FeedConnection>,
    url: Url,
    /// Pending notifications to be collected by the GUI
    pending_notifications: VecDeque<String>,
}

impl FeedView {
    /// Open the feed connection and start in `Connecting`
    pub fn connect(url: Url, capacity: usize) -> Self {
        tracing::info!("Connecting to transaction feed at {}", url);
        Self {
            subscriber: FeedSubscriber::new(capacity),
            connection: Some(FeedConnection::spawn(url.clone())),
            url,
            pending_notifications: VecDeque::new(),
        }
    }

    pub fn subscriber(&self) -> &FeedSubscriber {
        &self.subscriber
    }

    /// Drain every event that arrived since the last frame
    pub fn poll(&mut self) {
        let Some(connection) = self.connection.as_mut() else {
            return;
        };
        while let Some(event) = connection.try_next() {
            let notification = match &event {
                FeedEvent::Opened => Some(format!("Connected to transaction feed ({})", self.url)),
                FeedEvent::Errored(e) => Some(format!("Feed error: {}", e)),
                FeedEvent::Closed => Some("Disconnected from transaction feed".to_string()),
                FeedEvent::Record(_) => None,
            };
            if let Some(message) = notification {
                self.pending_notifications.push_back(message);
            }
            self.subscriber.apply(event);
        }
    }

    /// Take all pending notifications (moves them out, leaving the queue empty)
    pub fn take_notifications(&mut self) -> Vec<String> {
        self.pending_notifications.drain(..).collect()
    }

    /// Close the socket; the list stays visible but stops updating
    pub fn close(&mut self) {
        if let Some(mut connection) = self.connection.take() {
            connection.close();
        }
    }

    /// Render the feed
    pub fn show(&self, ui: &mut egui::Ui, theme: &AppTheme) {
        ui.horizontal(|ui| {
            ui.label(theme.section_header_text("TRANSACTION_FEED"));
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let state = self.subscriber.state();
                let color = match state {
                    FeedState::Open | FeedState::Receiving => theme.text_primary,
                    FeedState::Connecting => theme.warning,
                    FeedState::Errored | FeedState::Closed => theme.error,
                };
                ui.label(RichText::new(format!("[{}]", state.label())).small().color(color));
            });
        });

        let list = self.subscriber.list();
        if list.is_empty() {
            ui.label(RichText::new("waiting for transactions...").color(theme.text_secondary));
            return;
        }

        ui.add_space(theme.spacing_xs);
        for (index, record) in list.iter().enumerate() {
            ui.horizontal_wrapped(|ui| {
                ui.spacing_mut().item_spacing.x = 4.0;
                ui.label(RichText::new(format!("[TX#{}]", index)).color(theme.tag));
                ui.label(format!(
                    "FROM:{} | TO:{} | VAL:{}",
                    record.from_display(),
                    record.to_display(),
                    record.value_display()
                ));
            });
        }
    }
}
