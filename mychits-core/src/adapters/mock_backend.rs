//! Mock MyChits backend for testing
//!
//! A small HTTP server that answers the same routes as the real backend,
//! under an `/api` prefix:
//! - POST /user/login-user returns { userId, message }
//! - POST /user/signup-user returns { data: { _id } }
//! - GET /group/get-group returns a bare array of groups
//! - GET /enroll/get-user-enrolled/{user} returns { data: [...] }
//! - GET /payment/get-paid-summary/{user}/{group} returns { totalPaid }
//! - HEAD on any path returns 204 (reachability probes)
//!
//! Every request is recorded so tests can assert what reached the network.

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use serde_json::{json, Value as JsonValue};

/// Mock backend server
pub struct MockBackendServer {
    port: u16,
    running: Arc<AtomicBool>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    thread_handle: Option<thread::JoinHandle<()>>,
}

/// Behaviour of the mock
#[derive(Debug, Clone)]
pub struct MockBackendConfig {
    /// Phone and password accepted by login
    pub phone: String,
    pub password: String,
    /// Id returned on successful login
    pub user_id: String,
    /// Number of groups listed (ids `g1`, `g2`, ...)
    pub num_groups: usize,
    /// Groups `user_id` is enrolled in
    pub enrolled: Vec<String>,
    /// Groups whose paid summary answers 500
    pub failing_summaries: Vec<String>,
    /// Answer the group list with an HTML page
    pub html_groups: bool,
    /// Delay in milliseconds before responding
    pub delay_ms: u64,
}

impl Default for MockBackendConfig {
    fn default() -> Self {
        Self {
            phone: "9876543210".to_string(),
            password: "secret".to_string(),
            user_id: "abc123".to_string(),
            num_groups: 3,
            enrolled: vec!["g1".to_string(), "g2".to_string()],
            failing_summaries: Vec::new(),
            html_groups: false,
            delay_ms: 0,
        }
    }
}

/// A request as seen by the mock
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub request_id: Option<String>,
    pub body: JsonValue,
}

struct MockResponse {
    status: u16,
    content_type: &'static str,
    body: String,
}

impl MockResponse {
    fn json(status: u16, body: JsonValue) -> Self {
        Self {
            status,
            content_type: "application/json; charset=utf-8",
            body: body.to_string(),
        }
    }

    fn message(status: u16, message: &str) -> Self {
        Self::json(status, json!({ "message": message }))
    }
}

impl MockBackendServer {
    /// Start on a random available port
    pub fn start(config: MockBackendConfig) -> std::io::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0")?;
        let port = listener.local_addr()?.port();
        let running = Arc::new(AtomicBool::new(true));
        let requests = Arc::new(Mutex::new(Vec::new()));

        // Non-blocking so the accept loop can see the stop flag
        listener.set_nonblocking(true)?;

        let running_clone = Arc::clone(&running);
        let requests_clone = Arc::clone(&requests);
        let thread_handle = thread::spawn(move || {
            while running_clone.load(Ordering::SeqCst) {
                match listener.accept() {
                    Ok((stream, _)) => {
                        let cfg = config.clone();
                        let log = Arc::clone(&requests_clone);
                        thread::spawn(move || handle_connection(stream, &cfg, &log));
                    }
                    Err(ref e) if e.kind() == std::io::ErrorKind::WouldBlock => {
                        thread::sleep(Duration::from_millis(5));
                    }
                    Err(_) => break,
                }
            }
        });

        Ok(Self {
            port,
            running,
            requests,
            thread_handle: Some(thread_handle),
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// API base URL, including the `/api` prefix
    pub fn base_url(&self) -> String {
        format!("http://127.0.0.1:{}/api", self.port)
    }

    /// Number of requests received so far
    pub fn hits(&self) -> usize {
        self.requests.lock().map(|r| r.len()).unwrap_or(0)
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().map(|r| r.clone()).unwrap_or_default()
    }

    pub fn last_request(&self) -> Option<RecordedRequest> {
        self.requests().pop()
    }

    pub fn stop(&mut self) {
        self.running.store(false, Ordering::SeqCst);
        if let Some(handle) = self.thread_handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for MockBackendServer {
    fn drop(&mut self) {
        self.stop();
    }
}

struct ParsedRequest {
    method: String,
    path: String,
    headers: Vec<(String, String)>,
    body: Vec<u8>,
}

impl ParsedRequest {
    fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

fn read_request(stream: &mut TcpStream) -> Option<ParsedRequest> {
    let mut data = Vec::new();
    let mut buffer = [0; 4096];

    let header_end = loop {
        let n = stream.read(&mut buffer).ok()?;
        if n == 0 {
            return None;
        }
        data.extend_from_slice(&buffer[..n]);
        if let Some(pos) = data.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos;
        }
    };

    let head = String::from_utf8_lossy(&data[..header_end]).into_owned();
    let mut lines = head.split("\r\n");
    let mut request_line = lines.next()?.split_whitespace();
    let method = request_line.next()?.to_string();
    let path = request_line.next()?.to_string();
    let headers: Vec<(String, String)> = lines
        .filter_map(|line| line.split_once(':'))
        .map(|(k, v)| (k.trim().to_string(), v.trim().to_string()))
        .collect();

    let content_length = headers
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case("content-length"))
        .and_then(|(_, v)| v.parse::<usize>().ok())
        .unwrap_or(0);

    let mut body = data[header_end + 4..].to_vec();
    while body.len() < content_length {
        let n = stream.read(&mut buffer).ok()?;
        if n == 0 {
            break;
        }
        body.extend_from_slice(&buffer[..n]);
    }

    Some(ParsedRequest {
        method,
        path,
        headers,
        body,
    })
}

fn handle_connection(
    mut stream: TcpStream,
    config: &MockBackendConfig,
    log: &Mutex<Vec<RecordedRequest>>,
) {
    // Accepted sockets may inherit non-blocking mode on some platforms
    let _ = stream.set_nonblocking(false);
    let _ = stream.set_read_timeout(Some(Duration::from_secs(5)));

    let Some(request) = read_request(&mut stream) else {
        return;
    };

    let body: JsonValue = serde_json::from_slice(&request.body).unwrap_or(JsonValue::Null);
    if let Ok(mut log) = log.lock() {
        log.push(RecordedRequest {
            method: request.method.clone(),
            path: request.path.clone(),
            request_id: request.header("x-request-id").map(str::to_string),
            body: body.clone(),
        });
    }

    if config.delay_ms > 0 {
        thread::sleep(Duration::from_millis(config.delay_ms));
    }

    let response = route(&request.method, &request.path, &body, config);
    send_response(&mut stream, &request.method, response);
}

fn route(method: &str, path: &str, body: &JsonValue, config: &MockBackendConfig) -> MockResponse {
    if method == "HEAD" {
        return MockResponse {
            status: 204,
            content_type: "text/plain",
            body: String::new(),
        };
    }

    let path = path.split('?').next().unwrap_or(path);
    let segments: Vec<&str> = path
        .trim_start_matches("/api")
        .split('/')
        .filter(|s| !s.is_empty())
        .collect();

    match (method, segments.as_slice()) {
        ("POST", ["user", "login-user"]) => {
            let phone = body["phone_number"].as_str().unwrap_or_default();
            let password = body["password"].as_str().unwrap_or_default();
            if phone == config.phone && password == config.password {
                MockResponse::json(
                    200,
                    json!({ "userId": config.user_id, "message": "Login successful" }),
                )
            } else {
                MockResponse::message(401, "Invalid phone number or password")
            }
        }
        ("POST", ["user", "signup-user"]) => {
            let phone = body["phone_number"].as_str().unwrap_or_default();
            let name = body["full_name"].as_str().unwrap_or_default();
            if name.trim().is_empty() {
                MockResponse::message(400, "Full name is required")
            } else if phone == config.phone {
                MockResponse::message(409, "Phone number already registered")
            } else {
                MockResponse::json(201, json!({ "data": { "_id": format!("u-{}", phone) } }))
            }
        }
        ("GET", ["group", "get-group"]) => {
            if config.html_groups {
                return MockResponse {
                    status: 200,
                    content_type: "text/html",
                    body: "<html><body>Maintenance</body></html>".to_string(),
                };
            }
            let groups: Vec<JsonValue> = (1..=config.num_groups).map(mock_group).collect();
            MockResponse::json(200, JsonValue::Array(groups))
        }
        ("GET", ["enroll", "get-user-enrolled", user_id]) => {
            let enrolled: Vec<JsonValue> = if *user_id == config.user_id {
                config
                    .enrolled
                    .iter()
                    .enumerate()
                    .map(|(i, id)| {
                        json!({
                            "group_id": mock_group(group_index(id)),
                            "tickets": i + 1,
                        })
                    })
                    .collect()
            } else {
                Vec::new()
            };
            MockResponse::json(200, json!({ "data": enrolled }))
        }
        ("GET", ["payment", "get-paid-summary", _user_id, group_id]) => {
            if config.failing_summaries.iter().any(|g| g.as_str() == *group_id) {
                MockResponse::message(500, "Summary unavailable")
            } else {
                MockResponse::json(
                    200,
                    json!({ "totalPaid": 25000 * group_index(group_id) as u64 }),
                )
            }
        }
        _ => MockResponse::message(404, "Endpoint not found"),
    }
}

/// `g7` -> 7
fn group_index(id: &str) -> usize {
    id.trim_start_matches('g').parse().unwrap_or(1)
}

fn mock_group(index: usize) -> JsonValue {
    let names = ["Gold", "Silver", "Platinum", "Diamond"];
    let value = 100_000 * index as u64;
    json!({
        "_id": format!("g{}", index),
        "group_name": format!("{} {}L", names[index.saturating_sub(1) % names.len()], index),
        "group_value": value,
        "group_install": value / 20,
        "group_members": 20,
        "group_duration": 20,
        "start_date": "2024-03-05T00:00:00.000Z",
    })
}

fn status_text(status: u16) -> &'static str {
    match status {
        200 => "OK",
        201 => "Created",
        204 => "No Content",
        400 => "Bad Request",
        401 => "Unauthorized",
        404 => "Not Found",
        409 => "Conflict",
        500 => "Internal Server Error",
        _ => "Unknown",
    }
}

fn send_response(stream: &mut TcpStream, method: &str, response: MockResponse) {
    let body = if method == "HEAD" { "" } else { response.body.as_str() };
    let raw = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        response.status,
        status_text(response.status),
        response.content_type,
        body.len(),
        body
    );
    let _ = stream.write_all(raw.as_bytes());
    let _ = stream.flush();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_server_starts() {
        let server = MockBackendServer::start(MockBackendConfig::default()).unwrap();
        assert!(server.port() > 0);
        assert_eq!(server.hits(), 0);
        assert!(server.base_url().ends_with("/api"));
    }

    #[test]
    fn test_routes() {
        let config = MockBackendConfig::default();
        let groups = route("GET", "/api/group/get-group", &JsonValue::Null, &config);
        assert_eq!(groups.status, 200);

        let missing = route("GET", "/api/nope", &JsonValue::Null, &config);
        assert_eq!(missing.status, 404);

        let login = route(
            "POST",
            "/api/user/login-user",
            &json!({ "phone_number": "9876543210", "password": "secret" }),
            &config,
        );
        assert!(login.body.contains("abc123"));
    }
}
