//! HTTP webhook sink

use super::{Message, Notifier, WebhookPayload};
use crate::config::WebhookConfig;
use crate::error::CliError;
use reqwest::blocking::Client;
use reqwest::StatusCode;
use std::time::Duration;

/// Posts messages to a chat webhook with a single bounded attempt
pub struct WebhookNotifier {
    client: Client,
    url: String,
    webhook: WebhookConfig,
}

impl WebhookNotifier {
    /// Create a notifier for `url`
    pub fn new(url: impl Into<String>, webhook: WebhookConfig) -> Result<Self, CliError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(webhook.timeout_secs))
            .build()
            .map_err(|e| CliError::Configuration(format!("HTTP client: {e}")))?;

        Ok(Self {
            client,
            url: url.into(),
            webhook,
        })
    }
}

impl Notifier for WebhookNotifier {
    fn notify(&self, message: &Message) -> Result<(), CliError> {
        let payload = WebhookPayload::build(message, &self.webhook);

        let response = self
            .client
            .post(&self.url)
            .json(&payload)
            .send()
            .map_err(|e| CliError::Delivery(format!("request failed: {e}")))?;

        let status = response.status();
        let body = match response.text() {
            Ok(body) => body,
            Err(_) if status == StatusCode::NO_CONTENT => String::new(),
            Err(e) => {
                return Err(CliError::Delivery(format!(
                    "HTTP {status}: failed to read response: {e}"
                )))
            }
        };
        if is_acknowledged(status, &body) {
            log::info!("Webhook acknowledged with {status}");
            Ok(())
        } else {
            Err(CliError::Delivery(format!("HTTP {status}: {}", body.trim())))
        }
    }
}

/// Success means 204, or any other 2xx with an empty body
fn is_acknowledged(status: StatusCode, body: &str) -> bool {
    status == StatusCode::NO_CONTENT || (status.is_success() && body.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{BufRead, BufReader, Read, Write};
    use std::net::{TcpListener, TcpStream};
    use std::sync::mpsc;
    use std::thread;
    use std::time::Instant;

    #[test]
    fn test_acknowledgement() {
        assert!(is_acknowledged(StatusCode::NO_CONTENT, ""));
        assert!(is_acknowledged(StatusCode::OK, ""));
        assert!(!is_acknowledged(StatusCode::OK, "{\"id\": 1}"));
        assert!(!is_acknowledged(StatusCode::INTERNAL_SERVER_ERROR, ""));
        assert!(!is_acknowledged(StatusCode::BAD_REQUEST, "{\"message\": \"bad\"}"));
    }

    /// Accepts one connection, reads the request, then runs `respond`
    fn serve_once<F>(respond: F) -> (String, thread::JoinHandle<()>)
    where
        F: FnOnce(TcpStream) + Send + 'static,
    {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = thread::spawn(move || {
            let (stream, _) = listener.accept().unwrap();
            let mut reader = BufReader::new(stream.try_clone().unwrap());
            let mut content_length = 0;
            loop {
                let mut line = String::new();
                if reader.read_line(&mut line).unwrap_or(0) == 0 || line.trim_end().is_empty() {
                    break;
                }
                if let Some((name, value)) = line.split_once(':') {
                    if name.eq_ignore_ascii_case("content-length") {
                        content_length = value.trim().parse().unwrap_or(0);
                    }
                }
            }
            let mut body = vec![0; content_length];
            reader.read_exact(&mut body).unwrap();
            respond(stream);
        });
        (format!("http://{addr}/hook"), handle)
    }

    fn short_timeout() -> WebhookConfig {
        WebhookConfig {
            timeout_secs: 1,
            ..WebhookConfig::default()
        }
    }

    #[test]
    fn test_truncated_success_body_is_delivery_error() {
        let (url, server) = serve_once(|mut stream| {
            stream
                .write_all(b"HTTP/1.1 200 OK\r\nContent-Length: 40\r\n\r\n{\"id\": 1")
                .unwrap();
            stream.flush().unwrap();
        });

        let notifier = WebhookNotifier::new(url, short_timeout()).unwrap();
        let result = notifier.notify(&Message::new("A sentence cut off halfway.", 1, 14));
        server.join().unwrap();

        assert!(
            matches!(&result, Err(CliError::Delivery(msg)) if msg.contains("200")),
            "unexpected result {result:?}"
        );
    }

    #[test]
    fn test_no_content_is_success() {
        let (url, server) = serve_once(|mut stream| {
            stream
                .write_all(b"HTTP/1.1 204 No Content\r\nConnection: close\r\n\r\n")
                .unwrap();
            stream.flush().unwrap();
        });

        let notifier = WebhookNotifier::new(url, short_timeout()).unwrap();
        let result = notifier.notify(&Message::new("A sentence that arrives safely.", 1, 14));
        server.join().unwrap();

        assert!(result.is_ok(), "unexpected result {result:?}");
    }

    #[test]
    fn test_silent_endpoint_times_out() {
        let (release, wait) = mpsc::channel::<()>();
        let (url, server) = serve_once(move |_stream| {
            // Hold the connection open without answering
            let _ = wait.recv_timeout(Duration::from_secs(10));
        });

        let notifier = WebhookNotifier::new(url, short_timeout()).unwrap();
        let started = Instant::now();
        let result = notifier.notify(&Message::new("A sentence nobody answers.", 1, 14));
        let elapsed = started.elapsed();
        let _ = release.send(());
        server.join().unwrap();

        assert!(matches!(result, Err(CliError::Delivery(_))));
        assert!(elapsed < Duration::from_secs(5), "took {elapsed:?}");
    }

    #[test]
    fn test_unreachable_endpoint_is_delivery_error() {
        let webhook = WebhookConfig {
            timeout_secs: 2,
            ..WebhookConfig::default()
        };
        // Port 1 on loopback is closed in any sane test environment
        let notifier = WebhookNotifier::new("http://127.0.0.1:1/hook", webhook).unwrap();
        let result = notifier.notify(&Message::new("A sentence that never arrives.", 1, 14));
        assert!(matches!(result, Err(CliError::Delivery(_))));
    }
}
