use crate::core::errors::{Error, Result};
use log::{debug, trace};
use reqwest::header::CONTENT_TYPE;
use serde::de::DeserializeOwned;
use std::borrow::Cow;
use std::fmt;
use std::time::Duration;

/*-------------------------------------------------------------------------------------------------
  Transport
-------------------------------------------------------------------------------------------------*/

/// HTTP method of a service request.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

/// The authenticated channel the [crate::Client] sends its requests through.
///
/// `path` is relative to the API root and already escaped (`ip/10.0.0.0%2F24/reverse`). An
/// implementation returns every HTTP answer as a [Response], whatever its status; only failures
/// to obtain an answer at all are errors.
pub trait Transport {
    fn call(&self, method: Method, path: &str, body: Option<Vec<u8>>) -> Result<Response>;

    fn get(&self, path: &str) -> Result<Response> {
        self.call(Method::Get, path, None)
    }

    fn post(&self, path: &str, body: Vec<u8>) -> Result<Response> {
        self.call(Method::Post, path, Some(body))
    }

    fn put(&self, path: &str, body: Vec<u8>) -> Result<Response> {
        self.call(Method::Put, path, Some(body))
    }

    fn delete(&self, path: &str) -> Result<Response> {
        self.call(Method::Delete, path, None)
    }
}

impl<T: Transport + ?Sized> Transport for &T {
    fn call(&self, method: Method, path: &str, body: Option<Vec<u8>>) -> Result<Response> {
        (**self).call(method, path, body)
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn call(&self, method: Method, path: &str, body: Option<Vec<u8>>) -> Result<Response> {
        (**self).call(method, path, body)
    }
}

/*-------------------------------------------------------------------------------------------------
  Response
-------------------------------------------------------------------------------------------------*/

/// Status and raw body of a service answer.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Response {
    pub status: u16,
    pub body: Vec<u8>,
}

impl Response {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Strict status handling: any status outside `expected` becomes [Error::Status].
    pub fn expect_status(self, expected: &[u16]) -> Result<Self> {
        if expected.contains(&self.status) {
            Ok(self)
        } else {
            Err(Error::Status {
                status: self.status,
                body: self.text().into_owned(),
            })
        }
    }

    /// Decode the JSON body.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_slice(&self.body).map_err(Error::Decode)
    }

    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }
}

/*-------------------------------------------------------------------------------------------------
  HTTP Transport
-------------------------------------------------------------------------------------------------*/

/// Blocking HTTPS [Transport] authenticating with a bearer token.
#[derive(Clone)]
pub struct HttpTransport {
    client: reqwest::blocking::Client,
    endpoint: String,
    token: Option<String>,
}

impl HttpTransport {
    pub fn new(endpoint: &str, token: Option<&str>, timeout: Duration) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(Error::transport)?;

        Ok(Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            token: token.map(str::to_string),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.endpoint, path.trim_start_matches('/'))
    }
}

impl Transport for HttpTransport {
    fn call(&self, method: Method, path: &str, body: Option<Vec<u8>>) -> Result<Response> {
        let url = self.url(path);
        debug!("{method} {url}");

        let mut request = self.client.request(method.into(), &url);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.header(CONTENT_TYPE, "application/json").body(body);
        }

        let response = request.send().map_err(Error::transport)?;
        let status = response.status().as_u16();
        debug!("{method} {url}: {status}");

        let body = response.bytes().map_err(Error::transport)?.to_vec();
        trace!("Response body: {}", String::from_utf8_lossy(&body));

        Ok(Response { status, body })
    }
}

impl fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpTransport")
            .field("endpoint", &self.endpoint)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/*-------------------------------------------------------------------------------------------------
  Unit Tests
-------------------------------------------------------------------------------------------------*/

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::core::errors::log_error;
    use std::cell::RefCell;
    use std::collections::VecDeque;
    use test_log::test;

    /*----------------------------------------------------------------------------------
      Mock Transport
    ----------------------------------------------------------------------------------*/

    /// A request as seen by the [MockTransport].
    #[derive(Clone, Debug, PartialEq)]
    pub(crate) struct Request {
        pub method: Method,
        pub path: String,
        pub body: Option<serde_json::Value>,
    }

    /// Records every request and answers from a queue of canned responses.
    #[derive(Default)]
    pub(crate) struct MockTransport {
        requests: RefCell<Vec<Request>>,
        responses: RefCell<VecDeque<Result<Response>>>,
    }

    impl MockTransport {
        pub(crate) fn new() -> Self {
            Self::default()
        }

        pub(crate) fn respond(self, status: u16, body: &str) -> Self {
            self.responses
                .borrow_mut()
                .push_back(Ok(Response::new(status, body)));
            self
        }

        pub(crate) fn respond_json(self, status: u16, body: serde_json::Value) -> Self {
            self.respond(status, &body.to_string())
        }

        pub(crate) fn fail(self, error: Error) -> Self {
            self.responses.borrow_mut().push_back(Err(error));
            self
        }

        pub(crate) fn requests(&self) -> Vec<Request> {
            self.requests.borrow().clone()
        }

        pub(crate) fn only_request(&self) -> Request {
            let requests = self.requests();
            assert_eq!(requests.len(), 1, "expected exactly one request: {requests:?}");
            requests[0].clone()
        }
    }

    impl Transport for MockTransport {
        fn call(&self, method: Method, path: &str, body: Option<Vec<u8>>) -> Result<Response> {
            let body = body.map(|body| serde_json::from_slice(&body).unwrap());
            self.requests.borrow_mut().push(Request {
                method,
                path: path.to_string(),
                body,
            });
            self.responses
                .borrow_mut()
                .pop_front()
                .unwrap_or_else(|| panic!("unexpected request: {method} {path}"))
        }
    }

    /*----------------------------------------------------------------------------------
      Response
    ----------------------------------------------------------------------------------*/

    #[test]
    fn test_expect_status_accepts_listed_status() {
        let response = Response::new(200, "null").expect_status(&[200]);
        assert!(response.is_ok());
    }

    #[test]
    fn test_expect_status_rejects_other_status() {
        let body = r#"{"message":"This service does not exist"}"#;
        let error = Response::new(404, body).expect_status(&[200]).unwrap_err();
        match error {
            Error::Status { status, body: error_body } => {
                assert_eq!(status, 404);
                assert_eq!(error_body, body);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_json_decode_error() {
        let result = Response::new(200, "<html>").json::<Vec<String>>();
        assert!(matches!(result, Err(Error::Decode(_))));
    }

    #[test]
    fn test_provided_methods_route_through_call() {
        let transport = MockTransport::new()
            .respond(200, "[]")
            .respond(200, "{}")
            .respond(200, "null")
            .respond(200, "null");

        transport.get("ip").unwrap();
        transport.post("ip/a/reverse", b"{}".to_vec()).unwrap();
        transport.put("ip/a", b"{}".to_vec()).unwrap();
        transport.delete("ip/a/firewall/b").unwrap();

        let methods: Vec<Method> = transport.requests().iter().map(|r| r.method).collect();
        assert_eq!(
            methods,
            [Method::Get, Method::Post, Method::Put, Method::Delete]
        );
    }

    /*----------------------------------------------------------------------------------
      HTTP Transport
    ----------------------------------------------------------------------------------*/

    #[test]
    fn test_http_transport_url() {
        let transport =
            HttpTransport::new("https://api.example.net/1.0/", None, Duration::from_secs(1))
                .unwrap();
        assert_eq!(transport.endpoint(), "https://api.example.net/1.0");
        assert_eq!(transport.url("ip"), "https://api.example.net/1.0/ip");
        assert_eq!(transport.url("/ip"), "https://api.example.net/1.0/ip");
    }

    #[test]
    fn test_http_transport_debug_redacts_token() {
        let transport = HttpTransport::new(
            "https://api.example.net/1.0",
            Some("secret-token"),
            Duration::from_secs(1),
        )
        .unwrap();
        let debug = format!("{transport:?}");
        assert!(!debug.contains("secret-token"));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    fn test_http_transport_connection_failure() {
        let transport =
            HttpTransport::new("http://127.0.0.1:1", None, Duration::from_secs(2)).unwrap();
        let result = transport.get("ip").inspect_err(log_error);
        assert!(matches!(result, Err(Error::Transport(_))));
    }
}
