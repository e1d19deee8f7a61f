//! Alert presentation
//!
//! The gallery workflow reports errors through an injected `ErrorPresenter`
//! instead of a global UI shell. An alert is modal: the workflow awaits
//! `present` before it continues.

use crate::core::config::AlertStyle;
use crossbeam_channel::{unbounded, Receiver, Sender};
use log::{error, warn};
use rfd::{AsyncMessageDialog, MessageButtons, MessageLevel};

/// Default alert title
pub const ERROR_TITLE: &str = "Error";

/// Default dismiss button label
pub const DISMISS_LABEL: &str = "OK";

/// A modal message with a title, a message and a single dismiss action
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub title: String,
    pub message: String,
    pub dismiss: String,
}

impl Alert {
    /// Create an alert
    pub fn new(title: &str, message: &str, dismiss: &str) -> Self {
        Self {
            title: title.to_string(),
            message: message.to_string(),
            dismiss: dismiss.to_string(),
        }
    }

    /// Create an "Error" alert with an "OK" button
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            title: ERROR_TITLE.to_string(),
            message: message.into(),
            dismiss: DISMISS_LABEL.to_string(),
        }
    }
}

impl std::fmt::Display for Alert {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.title, self.message)
    }
}

/// Shows alerts to the user
#[allow(async_fn_in_trait)]
pub trait ErrorPresenter {
    /// Show `alert` and return once it is dismissed
    async fn present(&self, alert: Alert);
}

/// Logs alerts and prints them on stderr
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsolePresenter;

impl ErrorPresenter for ConsolePresenter {
    async fn present(&self, alert: Alert) {
        error!("{}", alert);
        eprintln!("  ✗ {}: {}", alert.title, alert.message);
    }
}

/// Shows alerts in a native message dialog
#[derive(Debug, Clone, Copy, Default)]
pub struct DialogPresenter;

impl ErrorPresenter for DialogPresenter {
    async fn present(&self, alert: Alert) {
        warn!("{}", alert);
        AsyncMessageDialog::new()
            .set_level(MessageLevel::Error)
            .set_title(alert.title.as_str())
            .set_description(alert.message.as_str())
            .set_buttons(MessageButtons::OkCustom(alert.dismiss.clone()))
            .show()
            .await;
    }
}

/// Forwards alerts to a channel for a UI (or a test) to display
#[derive(Debug, Clone)]
pub struct ChannelPresenter {
    tx: Sender<Alert>,
}

impl ChannelPresenter {
    /// Create a presenter and the receiver its alerts arrive on
    pub fn channel() -> (Self, Receiver<Alert>) {
        let (tx, rx) = unbounded();
        (Self { tx }, rx)
    }
}

impl ErrorPresenter for ChannelPresenter {
    async fn present(&self, alert: Alert) {
        if let Err(e) = self.tx.send(alert) {
            // Nobody is listening; keep the message in the log.
            warn!("Alert dropped: {}", e.into_inner());
        }
    }
}

/// Presenter selected by the `[alerts]` config section
#[derive(Debug, Clone, Copy)]
pub enum ConfiguredPresenter {
    Console(ConsolePresenter),
    Dialog(DialogPresenter),
}

impl ConfiguredPresenter {
    /// Build the presenter for `style`
    pub fn from_style(style: AlertStyle) -> Self {
        match style {
            AlertStyle::Console => ConfiguredPresenter::Console(ConsolePresenter),
            AlertStyle::Dialog => ConfiguredPresenter::Dialog(DialogPresenter),
        }
    }
}

impl ErrorPresenter for ConfiguredPresenter {
    async fn present(&self, alert: Alert) {
        match self {
            ConfiguredPresenter::Console(p) => p.present(alert).await,
            ConfiguredPresenter::Dialog(p) => p.present(alert).await,
        }
    }
}
