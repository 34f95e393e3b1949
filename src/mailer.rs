// src/mailer.rs

use maud::{html, PreEscaped};
use reqwest::blocking::Client;
use serde::Serialize;
use std::error::Error;
use std::fmt;

#[derive(Debug)]
pub enum MailerError {
    RequestFailed(String),
    ApiError(String),
}

impl fmt::Display for MailerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MailerError::RequestFailed(msg) => write!(f, "Request failed: {}", msg),
            MailerError::ApiError(msg) => write!(f, "API error: {}", msg),
        }
    }
}

impl Error for MailerError {}

/// Notification sink. The rest of the program only ever hands it a title
/// and a plain-text body; delivery mechanics live here.
pub struct BrevoMailer {
    api_key: String,
    sender_email: String,
    sender_name: String,
    client: Client,
}

#[derive(Serialize)]
struct BrevoSender<'a> {
    name: &'a str,
    email: &'a str,
}

#[derive(Serialize)]
struct BrevoRecipient<'a> {
    email: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct BrevoPayload<'a> {
    sender: BrevoSender<'a>,
    to: Vec<BrevoRecipient<'a>>,
    subject: &'a str,
    html_content: String,
}

impl BrevoMailer {
    pub fn new(api_key: String, sender_email: String, sender_name: String) -> Self {
        Self {
            api_key,
            sender_email,
            sender_name,
            client: Client::new(),
        }
    }

    /// Sends the change report. The tab-indented text body is converted to
    /// an HTML rendering that keeps the indentation readable in a mail
    /// client.
    pub fn send_report(
        &self,
        recipient_email: &str,
        title: &str,
        report: &str,
    ) -> Result<(), MailerError> {
        let payload = BrevoPayload {
            sender: BrevoSender {
                name: &self.sender_name,
                email: &self.sender_email,
            },
            to: vec![BrevoRecipient {
                email: recipient_email,
            }],
            subject: title,
            html_content: render_report_html(report),
        };

        let resp = self
            .client
            .post("https://api.brevo.com/v3/smtp/email")
            .header("api-key", &self.api_key)
            .header("Content-Type", "application/json")
            .json(&payload)
            .send()
            .map_err(|e| MailerError::RequestFailed(e.to_string()))?;

        if !resp.status().is_success() {
            let error_body = resp.text().unwrap_or_else(|_| "Unknown error".to_string());
            return Err(MailerError::ApiError(format!(
                "Failed to send report: {}",
                error_body
            )));
        }

        Ok(())
    }
}

/// Newlines become `<br>`, tabs become a run of `&nbsp;` so nested report
/// sections stay visually indented.
pub fn format_text_for_mail_html(s: &str) -> String {
    s.replace('\n', "<br>")
        .replace('\t', "&nbsp;&nbsp;&nbsp;&nbsp;&nbsp;&nbsp;&nbsp;")
}

fn render_report_html(report: &str) -> String {
    let body = PreEscaped(format_text_for_mail_html(report));
    html! {
        div style="font-family: monospace; font-size: 13px;" {
            (body)
        }
    }
    .into_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_report_converts_to_mail_html() {
        let text = "Header\n\tline one\n\t\tline two";
        let html = format_text_for_mail_html(text);
        assert_eq!(
            html,
            "Header<br>&nbsp;&nbsp;&nbsp;&nbsp;&nbsp;&nbsp;&nbsp;line one<br>\
             &nbsp;&nbsp;&nbsp;&nbsp;&nbsp;&nbsp;&nbsp;&nbsp;&nbsp;&nbsp;&nbsp;&nbsp;&nbsp;&nbsp;line two"
        );
    }

    #[test]
    fn rendered_body_is_wrapped_in_monospace_div() {
        let html = render_report_html("a\nb");
        assert!(html.starts_with("<div"));
        assert!(html.contains("a<br>b"));
        assert!(html.ends_with("</div>"));
    }
}
