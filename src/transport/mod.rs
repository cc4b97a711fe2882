//! Blocking HTTP plumbing behind [`LedgerClient`](crate::client::LedgerClient).
//!
//! Timeouts and identity headers are a transport concern and are configured
//! here; the client only sees status, reason phrase and body text.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, CONTENT_TYPE};

use crate::config::ClientConfig;
use crate::error::TransportError;

/// A fully read HTTP response.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    /// Reason phrase from the status line. Falls back to the standard phrase
    /// for `status`, and is empty when the code has none.
    pub reason: String,
    pub body: String,
}

/// Minimal blocking transport: one call, one fully read response.
pub trait HttpTransport: Send + Sync {
    fn get(&self, url: &str) -> Result<HttpResponse, TransportError>;
    fn post(&self, url: &str, json_body: &str) -> Result<HttpResponse, TransportError>;
}

/// `reqwest` blocking client.
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new(timeout: Duration, user_agent: &str) -> Result<Self, TransportError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .map_err(TransportError::Build)?;
        Ok(Self { client })
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self, TransportError> {
        Self::new(Duration::from_secs(config.timeout_secs), &config.user_agent)
    }

    fn read(response: reqwest::blocking::Response) -> Result<HttpResponse, TransportError> {
        let status = response.status();
        let reason = reason_phrase(&response);
        let body = response.text().map_err(TransportError::Request)?;
        Ok(HttpResponse {
            status: status.as_u16(),
            reason,
            body,
        })
    }
}

/// hyper only records the phrase when it differs from the standard one.
fn reason_phrase(response: &reqwest::blocking::Response) -> String {
    match response.extensions().get::<hyper::ext::ReasonPhrase>() {
        Some(phrase) => String::from_utf8_lossy(phrase.as_bytes()).into_owned(),
        None => response
            .status()
            .canonical_reason()
            .unwrap_or_default()
            .to_string(),
    }
}

impl HttpTransport for ReqwestTransport {
    fn get(&self, url: &str) -> Result<HttpResponse, TransportError> {
        let response = self
            .client
            .get(url)
            .header(ACCEPT, "application/json")
            .send()
            .map_err(TransportError::Request)?;
        Self::read(response)
    }

    fn post(&self, url: &str, json_body: &str) -> Result<HttpResponse, TransportError> {
        let response = self
            .client
            .post(url)
            .header(ACCEPT, "application/json")
            .header(CONTENT_TYPE, "application/json; charset=utf-8")
            .body(json_body.to_owned())
            .send()
            .map_err(TransportError::Request)?;
        Self::read(response)
    }
}

impl<T: HttpTransport + ?Sized> HttpTransport for &T {
    fn get(&self, url: &str) -> Result<HttpResponse, TransportError> {
        (**self).get(url)
    }

    fn post(&self, url: &str, json_body: &str) -> Result<HttpResponse, TransportError> {
        (**self).post(url, json_body)
    }
}

impl<T: HttpTransport + ?Sized> HttpTransport for Box<T> {
    fn get(&self, url: &str) -> Result<HttpResponse, TransportError> {
        (**self).get(url)
    }

    fn post(&self, url: &str, json_body: &str) -> Result<HttpResponse, TransportError> {
        (**self).post(url, json_body)
    }
}

#[cfg(test)]
mod tests {
    use std::io::{BufRead, BufReader, Write};
    use std::net::TcpListener;
    use std::thread;

    use super::*;

    /// Serve one canned HTTP/1.1 answer on a loopback port.
    fn serve_once(status_line: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut reader = BufReader::new(stream.try_clone().unwrap());
            let mut line = String::new();
            while reader.read_line(&mut line).unwrap() > 0 && line != "\r\n" {
                line.clear();
            }
            let reply = format!(
                "{status_line}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            stream.write_all(reply.as_bytes()).unwrap();
        });
        format!("http://{addr}/domain/list")
    }

    #[test]
    fn builds_from_default_config() {
        assert!(ReqwestTransport::from_config(&ClientConfig::default()).is_ok());
    }

    #[test]
    fn custom_reason_phrase_is_kept() {
        let url = serve_once("HTTP/1.1 500 Ledger Database Down", "oops");
        let transport = ReqwestTransport::new(Duration::from_secs(5), "test").unwrap();
        let response = transport.get(&url).unwrap();
        assert_eq!(response.status, 500);
        assert_eq!(response.reason, "Ledger Database Down");
        assert_eq!(response.body, "oops");
    }

    #[test]
    fn standard_reason_phrase_is_filled_in() {
        let url = serve_once("HTTP/1.1 404 Not Found", "");
        let transport = ReqwestTransport::new(Duration::from_secs(5), "test").unwrap();
        let response = transport.get(&url).unwrap();
        assert_eq!(response.status, 404);
        assert_eq!(response.reason, "Not Found");
    }

    #[test]
    fn connection_refused_is_a_transport_error() {
        let transport = ReqwestTransport::new(Duration::from_secs(2), "test").unwrap();
        // Port 9 (discard) on loopback is closed on test machines.
        let err = transport.get("http://127.0.0.1:9/domain/list").unwrap_err();
        assert!(matches!(err, TransportError::Request(_)));
    }
}
