#![allow(dead_code)]

use std::collections::VecDeque;
use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use async_trait::async_trait;
use translation_gateway::TranslationGateway;
use translation_gateway::core::error::ProviderError;
use translation_gateway::core::traits::{ProviderFactory, TranslationProvider};
use translation_gateway::core::types::{Detection, ProviderId};
use translation_gateway::server;

/// Starts the real HTTP server on an ephemeral port and returns its base URL.
pub async fn spawn_gateway(gateway: TranslationGateway) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind gateway listener");
    let addr = listener.local_addr().expect("gateway addr");

    tokio::spawn(server::serve(
        listener,
        Arc::new(gateway),
        std::future::pending(),
    ));

    format!("http://{addr}")
}

pub type Outcome<T> = Result<T, String>;

#[derive(Default)]
struct Script {
    detect: VecDeque<Outcome<Detection>>,
    translate: VecDeque<Outcome<String>>,
    detect_calls: usize,
    translate_calls: Vec<(String, String, String)>,
}

/// In-memory backend whose answers are queued up front.
#[derive(Clone, Default)]
pub struct ScriptedProvider {
    script: Arc<Mutex<Script>>,
}

impl ScriptedProvider {
    pub fn detect_ok(self, language: &str, confidence: Option<f64>) -> Self {
        self.lock().detect.push_back(Ok(Detection {
            language: language.to_string(),
            confidence,
        }));
        self
    }

    pub fn detect_err(self, message: &str) -> Self {
        self.lock().detect.push_back(Err(message.to_string()));
        self
    }

    pub fn translate_ok(self, text: &str) -> Self {
        self.lock().translate.push_back(Ok(text.to_string()));
        self
    }

    pub fn translate_err(self, message: &str) -> Self {
        self.lock().translate.push_back(Err(message.to_string()));
        self
    }

    pub fn detect_calls(&self) -> usize {
        self.lock().detect_calls
    }

    pub fn translate_calls(&self) -> Vec<(String, String, String)> {
        self.lock().translate_calls.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Script> {
        self.script.lock().expect("script lock")
    }

    fn failure(message: String) -> ProviderError {
        ProviderError::Transport {
            provider: ProviderId::Custom("scripted".to_string()),
            request_id: None,
            message,
        }
    }
}

#[async_trait]
impl TranslationProvider for ScriptedProvider {
    fn id(&self) -> ProviderId {
        ProviderId::Custom("scripted".to_string())
    }

    async fn detect(&self, _text: &str) -> Result<Detection, ProviderError> {
        let mut script = self.lock();
        script.detect_calls += 1;
        script
            .detect
            .pop_front()
            .unwrap_or_else(|| Err("unscripted detect".to_string()))
            .map_err(Self::failure)
    }

    async fn translate(
        &self,
        text: &str,
        source: &str,
        target: &str,
    ) -> Result<String, ProviderError> {
        let mut script = self.lock();
        script
            .translate_calls
            .push((text.to_string(), source.to_string(), target.to_string()));
        script
            .translate
            .pop_front()
            .unwrap_or_else(|| Err("unscripted translate".to_string()))
            .map_err(Self::failure)
    }
}

impl ProviderFactory for ScriptedProvider {
    fn id(&self) -> ProviderId {
        ProviderId::Custom("scripted".to_string())
    }

    fn create(&self) -> Result<Arc<dyn TranslationProvider>, ProviderError> {
        Ok(Arc::new(self.clone()))
    }
}

#[derive(Debug, Clone)]
pub struct MockResponse {
    pub status_code: u16,
    pub body: String,
}

impl MockResponse {
    pub fn json(body: &str) -> Self {
        Self {
            status_code: 200,
            body: body.to_string(),
        }
    }

    pub fn status(status_code: u16, body: &str) -> Self {
        Self {
            status_code,
            body: body.to_string(),
        }
    }
}

/// Blocking upstream stub that answers queued responses in order.
pub struct MockServer {
    addr: std::net::SocketAddr,
    captured_requests: Arc<Mutex<Vec<String>>>,
    handle: Option<thread::JoinHandle<()>>,
}

impl MockServer {
    pub fn start(responses: Vec<MockResponse>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind test listener");
        let addr = listener.local_addr().expect("listener addr");

        let queue = Arc::new(Mutex::new(VecDeque::from(responses)));
        let captured_requests = Arc::new(Mutex::new(Vec::new()));

        let queue_clone = Arc::clone(&queue);
        let captured_clone = Arc::clone(&captured_requests);

        let handle = thread::spawn(move || {
            loop {
                let next_response = {
                    let mut queue = queue_clone.lock().expect("queue lock");
                    queue.pop_front()
                };

                let Some(response) = next_response else {
                    break;
                };

                let (mut stream, _) = listener.accept().expect("accept connection");
                stream
                    .set_read_timeout(Some(Duration::from_secs(3)))
                    .expect("set stream timeout");

                let request = read_http_request_with_body(&mut stream);
                captured_clone.lock().expect("capture lock").push(request);

                let response_text = build_http_response(response.status_code, &response.body);
                stream
                    .write_all(response_text.as_bytes())
                    .expect("write response");
                stream.flush().expect("flush response");
            }
        });

        Self {
            addr,
            captured_requests,
            handle: Some(handle),
        }
    }

    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn captured_requests(&self) -> Vec<String> {
        self.captured_requests.lock().expect("capture lock").clone()
    }

    pub fn captured_request_targets(&self) -> Vec<String> {
        self.captured_requests()
            .iter()
            .map(|raw_request| {
                raw_request
                    .lines()
                    .next()
                    .unwrap_or_default()
                    .split_whitespace()
                    .nth(1)
                    .unwrap_or_default()
                    .to_string()
            })
            .collect()
    }

    pub fn captured_bodies(&self) -> Vec<serde_json::Value> {
        self.captured_requests()
            .iter()
            .filter_map(|raw_request| raw_request.split_once("\r\n\r\n"))
            .map(|(_, body)| serde_json::from_str(body).unwrap_or(serde_json::Value::Null))
            .collect()
    }

    pub fn shutdown(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.join().expect("join mock server");
        }
    }
}

impl Drop for MockServer {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn read_http_request_with_body(stream: &mut std::net::TcpStream) -> String {
    let mut request = Vec::new();
    let mut chunk = [0_u8; 1024];

    loop {
        match stream.read(&mut chunk) {
            Ok(0) => break,
            Ok(bytes_read) => {
                request.extend_from_slice(&chunk[..bytes_read]);

                if let Some(header_end) =
                    request.windows(4).position(|window| window == b"\r\n\r\n")
                {
                    let headers = String::from_utf8_lossy(&request[..header_end]).to_string();
                    let content_length = headers
                        .lines()
                        .find_map(|line| {
                            let (name, value) = line.split_once(':')?;
                            if name.eq_ignore_ascii_case("content-length") {
                                value.trim().parse::<usize>().ok()
                            } else {
                                None
                            }
                        })
                        .unwrap_or(0);
                    if request.len() >= header_end + 4 + content_length {
                        break;
                    }
                }
            }
            Err(error)
                if error.kind() == std::io::ErrorKind::WouldBlock
                    || error.kind() == std::io::ErrorKind::TimedOut =>
            {
                break;
            }
            Err(error) => panic!("failed reading request: {error}"),
        }
    }

    String::from_utf8_lossy(&request).to_string()
}

fn build_http_response(status_code: u16, body: &str) -> String {
    format!(
        "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status_code,
        status_reason(status_code),
        body.len(),
        body,
    )
}

fn status_reason(status_code: u16) -> &'static str {
    match status_code {
        200 => "OK",
        400 => "Bad Request",
        429 => "Too Many Requests",
        500 => "Internal Server Error",
        _ => "Unknown",
    }
}
