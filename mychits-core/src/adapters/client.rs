//! MyChits REST client
//!
//! Blocking HTTP client for the MyChits backend. Every request passes the
//! connectivity gate immediately before it is sent, so an offline device never
//! touches the network.
//!
//! A response counts as a success only when its status is 2xx and its content
//! type is JSON. Anything else becomes an API error carrying the server's
//! `message` field when there is one.

use std::time::Duration;

use anyhow::Context;
use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::header::CONTENT_TYPE;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value as JsonValue;
use tracing::{debug, warn};
use url::Url;
use uuid::Uuid;

use crate::domain::result::{Error, Result};
use crate::domain::{ChitGroup, EnrollmentRecord, LoginResponse, PaidSummary, PhoneNumber};
use crate::ports::{ChitsBackend, Registration};
use crate::state::NetworkGate;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

#[derive(Serialize)]
struct LoginRequest<'a> {
    phone_number: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct SignupRequest<'a> {
    full_name: &'a str,
    phone_number: &'a str,
    password: &'a str,
}

/// MyChits API client
#[derive(Debug, Clone)]
pub struct MyChitsClient {
    client: Client,
    base_url: Url,
    gate: NetworkGate,
    timeout: Duration,
}

impl MyChitsClient {
    pub fn new(base_url: &str, gate: NetworkGate, timeout: Duration) -> anyhow::Result<Self> {
        let base_url = Url::parse(base_url.trim())
            .with_context(|| format!("Invalid MyChits base URL: {}", base_url))?;
        if !matches!(base_url.scheme(), "http" | "https") {
            anyhow::bail!("MyChits base URL must be http or https: {}", base_url);
        }

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url,
            gate,
            timeout,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// `segments` are appended to the base path and percent-encoded
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| Error::Config(format!("Cannot build URLs from {}", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn get_json<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T> {
        let url = self.endpoint(segments)?;
        self.send(self.client.get(url))
    }

    fn post_json<B: Serialize, T: DeserializeOwned>(&self, segments: &[&str], body: &B) -> Result<T> {
        let url = self.endpoint(segments)?;
        self.send(self.client.post(url).json(body))
    }

    fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        self.gate.check()?;

        let request_id = Uuid::new_v4().to_string();
        let response = request
            .header(REQUEST_ID_HEADER, &request_id)
            .send()
            .map_err(|e| self.map_request_error(e))?;

        debug!(request_id = %request_id, status = response.status().as_u16(), url = %response.url(), "response received");
        self.read_response(response)
    }

    fn read_response<T: DeserializeOwned>(&self, response: Response) -> Result<T> {
        let status = response.status();
        let is_json = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.to_ascii_lowercase().contains("json"))
            .unwrap_or(false);
        let body = response.text().map_err(|e| self.map_request_error(e))?;

        let parsed: Option<JsonValue> = if is_json {
            serde_json::from_str(&body).ok()
        } else {
            None
        };

        if !status.is_success() || !is_json {
            let message = parsed
                .as_ref()
                .and_then(|v| v.get("message"))
                .and_then(JsonValue::as_str)
                .map(str::to_string);
            warn!(status = status.as_u16(), json = is_json, "request failed");
            return Err(Error::api(status.as_u16(), message));
        }

        let Some(value) = parsed else {
            warn!(status = status.as_u16(), "malformed JSON body");
            return Err(Error::api(status.as_u16(), None));
        };

        serde_json::from_value(unwrap_data(value)).map_err(|e| {
            warn!(status = status.as_u16(), error = %e, "unexpected response shape");
            Error::api(status.as_u16(), None)
        })
    }

    /// Map reqwest errors to user-friendly messages
    fn map_request_error(&self, error: reqwest::Error) -> Error {
        warn!(error = %error, "request did not complete");
        if error.is_timeout() {
            Error::transport(format!(
                "Connection timed out after {} seconds",
                self.timeout.as_secs()
            ))
        } else if error.is_connect() {
            Error::transport("Unable to connect to MyChits servers")
        } else {
            Error::transport(format!("MyChits request failed: {}", error))
        }
    }
}

/// Some endpoints wrap their payload as `{ "data": ... }`
fn unwrap_data(value: JsonValue) -> JsonValue {
    match value {
        JsonValue::Object(mut map)
            if matches!(map.get("data"), Some(JsonValue::Array(_) | JsonValue::Object(_))) =>
        {
            map.remove("data").unwrap_or(JsonValue::Null)
        }
        other => other,
    }
}

impl ChitsBackend for MyChitsClient {
    fn login(&self, phone: &PhoneNumber, password: &str) -> Result<LoginResponse> {
        self.post_json(
            &["user", "login-user"],
            &LoginRequest {
                phone_number: phone.as_str(),
                password,
            },
        )
    }

    fn register(&self, registration: &Registration) -> Result<LoginResponse> {
        self.post_json(
            &["user", "signup-user"],
            &SignupRequest {
                full_name: &registration.full_name,
                phone_number: registration.phone.as_str(),
                password: &registration.password,
            },
        )
    }

    fn groups(&self) -> Result<Vec<ChitGroup>> {
        self.get_json(&["group", "get-group"])
    }

    fn enrollments(&self, user_id: &str) -> Result<Vec<EnrollmentRecord>> {
        self.get_json(&["enroll", "get-user-enrolled", user_id])
    }

    fn paid_summary(&self, user_id: &str, group_id: &str) -> Result<PaidSummary> {
        self.get_json(&["payment", "get-paid-summary", user_id, group_id])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock_backend::{MockBackendConfig, MockBackendServer};
    use crate::domain::result::GENERIC_API_MESSAGE;
    use crate::domain::{ConnectivitySnapshot, CurrencyAmount};
    use crate::state::ConnectivityStore;

    fn client_for(server: &MockBackendServer, store: &ConnectivityStore) -> MyChitsClient {
        MyChitsClient::new(
            &server.base_url(),
            NetworkGate::new(store.clone()),
            Duration::from_secs(5),
        )
        .unwrap()
    }

    fn phone() -> PhoneNumber {
        PhoneNumber::parse("9876543210").unwrap()
    }

    #[test]
    fn test_rejects_bad_base_url() {
        let gate = NetworkGate::new(ConnectivityStore::new());
        assert!(MyChitsClient::new("not a url", gate.clone(), Duration::from_secs(1)).is_err());
        assert!(MyChitsClient::new("ftp://example.com", gate, Duration::from_secs(1)).is_err());
    }

    #[test]
    fn test_endpoint_keeps_base_path() {
        let gate = NetworkGate::new(ConnectivityStore::new());
        let client =
            MyChitsClient::new("https://api.example.com/api/", gate, Duration::from_secs(1)).unwrap();
        let url = client.endpoint(&["enroll", "get-user-enrolled", "a b"]).unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.example.com/api/enroll/get-user-enrolled/a%20b"
        );
    }

    #[test]
    fn test_login_success() {
        let server = MockBackendServer::start(MockBackendConfig::default()).unwrap();
        let client = client_for(&server, &ConnectivityStore::new());

        let response = client.login(&phone(), "secret").unwrap();
        assert_eq!(response.user_id, "abc123");

        let request = server.last_request().unwrap();
        assert_eq!(request.path, "/api/user/login-user");
        assert!(request.request_id.is_some());
        assert_eq!(request.body["phone_number"], "9876543210");
    }

    #[test]
    fn test_login_failure_uses_server_message() {
        let server = MockBackendServer::start(MockBackendConfig::default()).unwrap();
        let client = client_for(&server, &ConnectivityStore::new());

        match client.login(&phone(), "wrong") {
            Err(Error::Api { status, message }) => {
                assert_eq!(status, 401);
                assert_eq!(message, "Invalid phone number or password");
            }
            other => panic!("expected API error, got {:?}", other),
        }
    }

    #[test]
    fn test_non_json_success_is_failure() {
        let server = MockBackendServer::start(MockBackendConfig {
            html_groups: true,
            ..Default::default()
        })
        .unwrap();
        let client = client_for(&server, &ConnectivityStore::new());

        match client.groups() {
            Err(Error::Api { status, message }) => {
                assert_eq!(status, 200);
                assert_eq!(message, GENERIC_API_MESSAGE);
            }
            other => panic!("expected API error, got {:?}", other),
        }
    }

    #[test]
    fn test_enrollments_and_summary() {
        let server = MockBackendServer::start(MockBackendConfig::default()).unwrap();
        let client = client_for(&server, &ConnectivityStore::new());

        let groups = client.groups().unwrap();
        assert_eq!(groups.len(), 3);

        let enrolled = client.enrollments("abc123").unwrap();
        assert_eq!(enrolled.len(), 2);
        assert_eq!(enrolled[0].ticket_numbers, vec!["1".to_string()]);

        let summary = client.paid_summary("abc123", &enrolled[0].group.id).unwrap();
        assert_eq!(summary.total_paid, CurrencyAmount::from(25000));
    }

    #[test]
    fn test_offline_gate_sends_nothing() {
        let server = MockBackendServer::start(MockBackendConfig::default()).unwrap();
        let store = ConnectivityStore::with_snapshot(ConnectivitySnapshot::OFFLINE);
        let client = client_for(&server, &store);

        assert!(matches!(client.groups(), Err(Error::Offline)));
        assert!(matches!(client.login(&phone(), "secret"), Err(Error::Offline)));
        assert_eq!(server.hits(), 0);
    }

    #[test]
    fn test_connection_refused_is_transport_error() {
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let gate = NetworkGate::new(ConnectivityStore::new());
        let client = MyChitsClient::new(
            &format!("http://127.0.0.1:{}/api", port),
            gate,
            Duration::from_secs(2),
        )
        .unwrap();

        assert!(matches!(client.groups(), Err(Error::Transport(_))));
    }

    #[test]
    fn test_slow_server_times_out() {
        let server = MockBackendServer::start(MockBackendConfig {
            delay_ms: 1_000,
            ..Default::default()
        })
        .unwrap();
        let gate = NetworkGate::new(ConnectivityStore::new());
        let client =
            MyChitsClient::new(&server.base_url(), gate, Duration::from_millis(200)).unwrap();

        match client.groups() {
            Err(Error::Transport(message)) => assert!(message.contains("timed out"), "{}", message),
            other => panic!("expected timeout, got {:?}", other),
        }
        assert_eq!(server.hits(), 1);
    }
}
