use chatadmin_client::alerts::AlertPresenter;
use std::io::Write;

/// Shows alerts on standard error.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalAlertPresenter;

impl AlertPresenter for TerminalAlertPresenter {
    fn alert(&self, title: &str, message: &str) {
        log::debug!("Alert shown: {title}");
        let mut stderr = std::io::stderr().lock();
        // Nothing sensible to do if the terminal is gone
        let _ = writeln!(stderr, "{}", render_alert(title, message));
    }
}

/// Text block printed for an alert.
pub fn render_alert(title: &str, message: &str) -> String {
    format!("[{title}]\n  {message}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alert_has_title_line_and_indented_message() {
        assert_eq!(
            render_alert("Login failed", "Bad credentials"),
            "[Login failed]\n  Bad credentials"
        );
    }
}
