//! Request descriptors and response shapes.
//!
//! An [`ApiRequest`] is plain data: HTTP method, URL template, path and query
//! parameters, headers, and at most one kind of body. The façades build one
//! per call and hand it to [`ApiClient::request`](super::ApiClient::request),
//! which is the only place that touches the network. Keeping request
//! construction pure means every façade method can be tested without a server.

use std::io::{self, Read};
use std::marker::PhantomData;

use reqwest::Method;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::ApiError;

/// Everything needed to issue one HTTP call.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    /// Path template relative to the base URL, e.g. `/pet/{petId}`.
    pub url: &'static str,
    pub path_params: Vec<(&'static str, String)>,
    pub query_params: Vec<(&'static str, String)>,
    pub headers: Vec<(String, String)>,
    pub json: Option<Value>,
    /// Form fields; sent urlencoded unless `files` is present.
    pub data: Option<Vec<(String, String)>>,
    /// File parts; their presence (even empty) makes the body multipart.
    pub files: Option<Vec<(String, FilePart)>>,
}

impl ApiRequest {
    pub fn new(method: Method, url: &'static str) -> Self {
        Self {
            method,
            url,
            path_params: Vec::new(),
            query_params: Vec::new(),
            headers: Vec::new(),
            json: None,
            data: None,
            files: None,
        }
    }

    pub fn path_param(mut self, name: &'static str, value: impl ToString) -> Self {
        self.path_params.push((name, value.to_string()));
        self
    }

    pub fn query_param(mut self, name: &'static str, value: impl ToString) -> Self {
        self.query_params.push((name, value.to_string()));
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn json(mut self, body: Value) -> Self {
        self.json = Some(body);
        self
    }

    pub fn form(mut self, data: Vec<(String, String)>) -> Self {
        self.data = Some(data);
        self
    }

    pub fn files(mut self, files: Vec<(String, FilePart)>) -> Self {
        self.files = Some(files);
        self
    }

    /// The URL template with each `{name}` replaced by its percent-encoded value.
    pub fn resolved_path(&self) -> String {
        self.path_params
            .iter()
            .fold(self.url.to_string(), |path, (name, value)| {
                path.replace(&format!("{{{name}}}"), &urlencoding::encode(value))
            })
    }
}

/// Upload content for a multipart file field.
///
/// The bytes are supplied by the caller; the client never opens or closes
/// files itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePart {
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl FilePart {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            file_name: None,
            content_type: None,
            bytes: bytes.into(),
        }
    }

    /// Reads the remaining content of `reader`. The reader stays with the caller.
    pub fn from_reader<R: Read + ?Sized>(reader: &mut R) -> io::Result<Self> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        Ok(Self::new(bytes))
    }

    pub fn file_name(mut self, name: impl Into<String>) -> Self {
        self.file_name = Some(name.into());
        self
    }

    pub fn content_type(mut self, mime: impl Into<String>) -> Self {
        self.content_type = Some(mime.into());
        self
    }

    pub(crate) fn into_part(self, field: &str) -> Result<reqwest::multipart::Part, ApiError> {
        let mut part = reqwest::multipart::Part::bytes(self.bytes);
        if let Some(name) = self.file_name {
            part = part.file_name(name);
        }
        if let Some(mime) = self.content_type {
            part = part.mime_str(&mime).map_err(|e| ApiError::Multipart {
                field: field.to_string(),
                message: e.to_string(),
            })?;
        }
        Ok(part)
    }
}

/// How a response body is turned into the operation's result.
pub trait ResponseType {
    type Output;

    fn parse(body: String) -> Result<Self::Output, ApiError>;
}

/// The body is ignored.
#[derive(Debug)]
pub enum NoContent {}

impl ResponseType for NoContent {
    type Output = ();

    fn parse(_body: String) -> Result<(), ApiError> {
        Ok(())
    }
}

/// The raw body, unmodified.
#[derive(Debug)]
pub enum Text {}

impl ResponseType for Text {
    type Output = String;

    fn parse(body: String) -> Result<String, ApiError> {
        Ok(body)
    }
}

/// The body decoded from JSON into `T`.
#[derive(Debug)]
pub struct Json<T>(PhantomData<T>);

impl<T: DeserializeOwned> ResponseType for Json<T> {
    type Output = T;

    fn parse(body: String) -> Result<T, ApiError> {
        serde_json::from_str(&body).map_err(ApiError::Decode)
    }
}

/// Renders a list parameter the way the server expects it: `['a', 'b']`.
pub fn list_literal<S: AsRef<str>>(items: &[S]) -> String {
    let quoted: Vec<String> = items.iter().map(|s| quote(s.as_ref())).collect();
    format!("[{}]", quoted.join(", "))
}

fn quote(s: &str) -> String {
    let delimiter = if s.contains('\'') && !s.contains('"') { '"' } else { '\'' };
    let mut out = String::with_capacity(s.len() + 2);
    out.push(delimiter);
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c == delimiter => {
                out.push('\\');
                out.push(c);
            }
            c => out.push(c),
        }
    }
    out.push(delimiter);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_literal_quotes_each_item() {
        assert_eq!(list_literal(&["available", "sold"]), "['available', 'sold']");
        assert_eq!(list_literal::<&str>(&[]), "[]");
    }

    #[test]
    fn list_literal_switches_quotes_around_apostrophes() {
        assert_eq!(list_literal(&["rex's"]), "[\"rex's\"]");
        assert_eq!(list_literal(&["a'\"b"]), "['a\\'\"b']");
    }

    #[test]
    fn resolved_path_substitutes_and_escapes() {
        let request = ApiRequest::new(Method::GET, "/user/{username}")
            .path_param("username", "john doe/1");
        assert_eq!(request.resolved_path(), "/user/john%20doe%2F1");
    }

    #[test]
    fn file_part_reads_from_caller_reader() {
        let mut reader = io::Cursor::new(b"PNG".to_vec());
        let part = FilePart::from_reader(&mut reader)
            .unwrap()
            .file_name("dog.png")
            .content_type("image/png");
        assert_eq!(part.bytes, b"PNG");
        assert_eq!(part.file_name.as_deref(), Some("dog.png"));
        assert_eq!(reader.position(), 3);
    }

    #[test]
    fn json_shape_reports_decode_errors() {
        let err = Json::<Vec<i32>>::parse("not json".into()).unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
        assert_eq!(Text::parse("token".into()).unwrap(), "token");
    }
}
