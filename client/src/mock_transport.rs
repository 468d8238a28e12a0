use crate::api::{Completion, HttpRequest, HttpResponse, Method, Transport};
use std::sync::{Arc, Mutex};

type Responder = Box<dyn Fn(&HttpRequest) -> Result<HttpResponse, String> + Send + Sync>;

/// Answers synchronously and remembers every request it saw
pub struct MockTransport {
    responder: Responder,
    requests: Mutex<Vec<HttpRequest>>,
}

impl MockTransport {
    pub fn new<R>(responder: R) -> Arc<Self>
    where
        R: Fn(&HttpRequest) -> Result<HttpResponse, String> + Send + Sync + 'static,
    {
        Arc::new(Self {
            responder: Box::new(responder),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn json(status: u16, value: serde_json::Value) -> HttpResponse {
        Self::text(status, &value.to_string())
    }

    pub fn text(status: u16, body: &str) -> HttpResponse {
        let status_text = match status {
            200 => "OK",
            201 => "Created",
            400 => "Bad Request",
            404 => "Not Found",
            409 => "Conflict",
            _ => "Internal Server Error",
        };
        HttpResponse {
            status,
            status_text: status_text.to_string(),
            bytes: body.as_bytes().to_vec(),
        }
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn count(&self, method: Method, path: &str) -> usize {
        self.requests()
            .iter()
            .filter(|r| r.method == method && r.url.ends_with(path))
            .count()
    }

    pub fn clear(&self) {
        self.requests.lock().unwrap().clear();
    }

    pub fn body_of(request: &HttpRequest) -> Option<serde_json::Value> {
        request
            .body
            .as_ref()
            .and_then(|bytes| serde_json::from_slice(bytes).ok())
    }
}

impl Transport for MockTransport {
    fn send(&self, request: HttpRequest, on_done: Completion) {
        let response = (self.responder)(&request);
        self.requests.lock().unwrap().push(request);
        on_done(response)
    }
}
