//! Decoded multipart form handed over by the HTTP layer.
//!
//! Parts are keyed by their form name. Each [`FormPart`] owns its body as a
//! stream of byte chunks; reading consumes the part, and dropping the form
//! drops every stream that was never read. Nothing is left open once the
//! form goes out of scope, whichever path the caller took.
use std::collections::HashMap;
use std::fmt;
use std::io;

use bytes::{Bytes, BytesMut};
use futures::stream::{self, BoxStream, StreamExt, TryStreamExt};

/// Body of one part: chunks in arrival order, or the I/O error that cut it short.
pub type PartStream = BoxStream<'static, Result<Bytes, io::Error>>;

/// One named section of a multipart submission.
pub struct FormPart {
    file_name: Option<String>,
    content_type: Option<String>,
    body: PartStream,
}

impl FormPart {
    pub fn new(file_name: Option<String>, content_type: Option<String>, body: PartStream) -> Self {
        Self {
            file_name,
            content_type,
            body,
        }
    }

    /// Part whose body is already fully buffered.
    pub fn from_bytes(
        file_name: Option<String>,
        content_type: Option<String>,
        data: impl Into<Bytes>,
    ) -> Self {
        let data = data.into();
        Self::new(file_name, content_type, stream::once(async move { Ok(data) }).boxed())
    }

    /// Part whose body failed before it could be read.
    pub fn failed(file_name: Option<String>, content_type: Option<String>, err: io::Error) -> Self {
        Self::new(file_name, content_type, stream::once(async move { Err(err) }).boxed())
    }

    pub fn file_name(&self) -> Option<&str> {
        self.file_name.as_deref()
    }

    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    /// Drain the body stream. Stops at the first error.
    pub async fn read_to_end(mut self) -> io::Result<Bytes> {
        let mut buf = BytesMut::new();
        while let Some(chunk) = self.body.try_next().await? {
            buf.extend_from_slice(&chunk);
        }
        Ok(buf.freeze())
    }
}

impl fmt::Debug for FormPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormPart")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .finish_non_exhaustive()
    }
}

/// Parts of one submission, grouped by form name in arrival order.
#[derive(Debug, Default)]
pub struct MultipartForm {
    parts: HashMap<String, Vec<FormPart>>,
}

impl MultipartForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, name: impl Into<String>, part: FormPart) {
        self.parts.entry(name.into()).or_default().push(part);
    }

    pub fn with_part(mut self, name: impl Into<String>, part: FormPart) -> Self {
        self.push(name, part);
        self
    }

    pub fn contains(&self, name: &str) -> bool {
        self.parts.get(name).is_some_and(|parts| !parts.is_empty())
    }

    /// Remove the parts posted under `name` and return the first one.
    /// Later duplicates are dropped unread.
    pub fn take(&mut self, name: &str) -> Option<FormPart> {
        self.parts
            .remove(name)
            .and_then(|parts| parts.into_iter().next())
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }
}
