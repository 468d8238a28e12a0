use common::packets::s2c::ErrorBody;
use log::debug;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Patch,
    Delete,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    /// json encoded
    pub body: Option<Vec<u8>>,
}

#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub status_text: String,
    pub bytes: Vec<u8>,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Err means no response at all
pub type Completion = Box<dyn FnOnce(Result<HttpResponse, String>) + Send>;

/// Whatever actually moves the bytes. The callback may run on another thread.
pub trait Transport: Send + Sync {
    fn send(&self, request: HttpRequest, on_done: Completion);
}

/// Browser fetch on wasm, a background thread per request on native
pub struct EhttpTransport;

impl Transport for EhttpTransport {
    fn send(&self, request: HttpRequest, on_done: Completion) {
        let HttpRequest { method, url, body } = request;
        let mut request = ehttp::Request::get(url);
        request.method = method.as_str().to_string();
        if let Some(body) = body {
            request.body = body;
            request.headers = ehttp::Headers::new(&[
                ("Accept", "application/json"),
                ("Content-Type", "application/json"),
            ]);
        }

        ehttp::fetch(request, move |response| {
            on_done(response.map(|response| HttpResponse {
                status: response.status,
                status_text: response.status_text,
                bytes: response.bytes,
            }))
        });
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    #[error("server answered {status} {status_text}")]
    Status {
        status: u16,
        status_text: String,
        /// validation messages, when the body carried any
        messages: Option<Vec<String>>,
    },
    #[error("no response from the server: {0}")]
    Network(String),
    #[error("unreadable response body: {0}")]
    Decode(String),
    #[error("could not encode the request body: {0}")]
    Encode(String),
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// A request built by a form, ready to be sent as is
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    pub method: Method,
    pub path: String,
    pub body: serde_json::Value,
}

impl Submission {
    pub fn json<B: serde::Serialize>(
        method: Method,
        path: impl Into<String>,
        body: &B,
    ) -> Result<Self, ApiError> {
        let body = serde_json::to_value(body).map_err(|e| ApiError::Encode(e.to_string()))?;
        Ok(Self {
            method,
            path: path.into(),
            body,
        })
    }
}

#[derive(Clone)]
pub struct ApiClient {
    root: String,
    transport: Arc<dyn Transport>,
}

impl ApiClient {
    pub fn new(root: impl Into<String>, transport: Arc<dyn Transport>) -> Self {
        Self {
            root: root.into(),
            transport,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.root.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    pub fn get<T, F>(&self, path: &str, on_done: F)
    where
        T: DeserializeOwned,
        F: FnOnce(Result<T, ApiError>) + Send + 'static,
    {
        self.send(Method::Get, path, None, move |result| {
            on_done(result.and_then(decode))
        });
    }

    pub fn post<B, T, F>(&self, path: &str, body: &B, on_done: F)
    where
        B: serde::Serialize,
        T: DeserializeOwned,
        F: FnOnce(Result<T, ApiError>) + Send + 'static,
    {
        match Submission::json(Method::Post, path, body) {
            Ok(submission) => self.submit(&submission, on_done),
            Err(e) => on_done(Err(e)),
        }
    }

    /// the answer body is not read
    pub fn patch<B, F>(&self, path: &str, body: &B, on_done: F)
    where
        B: serde::Serialize,
        F: FnOnce(Result<(), ApiError>) + Send + 'static,
    {
        let bytes = match serde_json::to_vec(body) {
            Ok(bytes) => bytes,
            Err(e) => return on_done(Err(ApiError::Encode(e.to_string()))),
        };
        self.send(Method::Patch, path, Some(bytes), move |result| {
            on_done(result.map(|_| ()))
        });
    }

    pub fn delete<F>(&self, path: &str, on_done: F)
    where
        F: FnOnce(Result<(), ApiError>) + Send + 'static,
    {
        self.send(Method::Delete, path, None, move |result| {
            on_done(result.map(|_| ()))
        });
    }

    /// send what a form prepared and decode the answer
    pub fn submit<T, F>(&self, submission: &Submission, on_done: F)
    where
        T: DeserializeOwned,
        F: FnOnce(Result<T, ApiError>) + Send + 'static,
    {
        let bytes = match serde_json::to_vec(&submission.body) {
            Ok(bytes) => bytes,
            Err(e) => return on_done(Err(ApiError::Encode(e.to_string()))),
        };
        self.send(submission.method, &submission.path, Some(bytes), move |result| {
            on_done(result.and_then(decode))
        });
    }

    fn send<F>(&self, method: Method, path: &str, body: Option<Vec<u8>>, on_done: F)
    where
        F: FnOnce(Result<HttpResponse, ApiError>) + Send + 'static,
    {
        let url = self.url(path);
        debug!("{} {}", method.as_str(), url);
        let request = HttpRequest { method, url, body };
        self.transport.send(
            request,
            Box::new(move |result| {
                let result = match result {
                    Err(e) => Err(ApiError::Network(e)),
                    Ok(response) if response.is_success() => Ok(response),
                    Ok(response) => Err(ApiError::Status {
                        status: response.status,
                        messages: ErrorBody::parse(&response.bytes),
                        status_text: response.status_text,
                    }),
                };
                on_done(result)
            }),
        );
    }
}

fn decode<T: DeserializeOwned>(response: HttpResponse) -> Result<T, ApiError> {
    serde_json::from_slice(&response.bytes).map_err(|e| ApiError::Decode(e.to_string()))
}
