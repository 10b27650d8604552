//! Surfacing failed calls to the user.
//!
//! The gateway never shows anything itself; it formats a message and hands
//! it to an [`AlertPresenter`] supplied by the application.

use crate::errors::GatewayError;
use crate::model::ErrorItem;

/// Dialog-like sink for user-visible messages.
pub trait AlertPresenter: Send + Sync {
    fn alert(&self, title: &str, message: &str);
}

/// Presenter that only writes to the log. Used when no UI is attached.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogAlertPresenter;

impl AlertPresenter for LogAlertPresenter {
    fn alert(&self, title: &str, message: &str) {
        log::warn!("{title}: {message}");
    }
}

/// Builds the display text for a structured server error.
///
/// Starts from the error's own message (or `fallback` when it has none) and
/// appends every sub-error message separated by a single space.
pub fn compose_error_message(item: &ErrorItem, fallback: &str) -> String {
    let mut message = item
        .message
        .as_deref()
        .filter(|m| !m.is_empty())
        .unwrap_or(fallback)
        .to_string();

    for sub in &item.errors {
        if let Some(sub_message) = sub.message.as_deref() {
            message.push(' ');
            message.push_str(sub_message);
        }
    }
    message
}

/// Shows a structured server error.
pub fn report_typed_error(
    presenter: &dyn AlertPresenter,
    item: &ErrorItem,
    title: &str,
    fallback: &str,
) {
    presenter.alert(title, &compose_error_message(item, fallback));
}

/// Shows any gateway error.
///
/// Errors carrying a server error envelope are shown with its details,
/// everything else gets the generic `fallback` text.
pub fn report_error(
    presenter: &dyn AlertPresenter,
    error: &GatewayError,
    title: &str,
    fallback: &str,
) {
    log::debug!("Reporting error '{title}': {error}");
    match error.error_envelope().and_then(|envelope| envelope.error) {
        Some(item) => report_typed_error(presenter, &item, title, fallback),
        None => presenter.alert(title, fallback),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingPresenter {
        shown: Mutex<Vec<(String, String)>>,
    }

    impl AlertPresenter for RecordingPresenter {
        fn alert(&self, title: &str, message: &str) {
            self.shown
                .lock()
                .unwrap()
                .push((title.to_string(), message.to_string()));
        }
    }

    fn item(message: Option<&str>, subs: &[&str]) -> ErrorItem {
        ErrorItem {
            code: None,
            message: message.map(str::to_string),
            errors: subs
                .iter()
                .map(|m| ErrorItem {
                    message: Some(m.to_string()),
                    ..ErrorItem::default()
                })
                .collect(),
        }
    }

    #[test]
    fn sub_errors_are_space_separated() {
        assert_eq!(compose_error_message(&item(Some("M"), &["a", "b"]), "F"), "M a b");
    }

    #[test]
    fn fallback_replaces_missing_or_empty_message() {
        assert_eq!(compose_error_message(&item(None, &["x"]), "Failed"), "Failed x");
        assert_eq!(compose_error_message(&item(Some(""), &[]), "Failed"), "Failed");
    }

    #[test]
    fn status_error_with_envelope_is_reported_typed() {
        let presenter = RecordingPresenter::default();
        let error = GatewayError::Status {
            url: "http://x.test/business/accounts".to_string(),
            status: 400,
            body: r#"{"success":false,"error":{"message":"Invalid","errors":[{"message":"name"}]}}"#
                .to_string(),
        };

        report_error(&presenter, &error, "Save failed", "Could not save");

        let shown = presenter.shown.lock().unwrap();
        assert_eq!(
            shown.as_slice(),
            &[("Save failed".to_string(), "Invalid name".to_string())]
        );
    }

    #[test]
    fn transport_error_gets_fallback() {
        let presenter = RecordingPresenter::default();
        let error = GatewayError::Transport {
            url: "http://x.test/".to_string(),
            reason: "refused".to_string(),
        };

        report_error(&presenter, &error, "Offline", "Server unreachable");

        let shown = presenter.shown.lock().unwrap();
        assert_eq!(shown[0].1, "Server unreachable");
    }

    #[test]
    fn status_error_without_error_body_gets_fallback() {
        let presenter = RecordingPresenter::default();
        let error = GatewayError::Status {
            url: "http://x.test/".to_string(),
            status: 500,
            body: r#"{"success":false}"#.to_string(),
        };

        report_error(&presenter, &error, "Oops", "Try again");
        assert_eq!(presenter.shown.lock().unwrap()[0].1, "Try again");
    }
}
