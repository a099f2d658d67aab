use std::error::Error;
use std::fmt;
use std::io;

use super::{Class, ErrorKind};

type BoxError = Box<dyn Error + Send + Sync>;

/// A response that knows which request produced it.
///
/// This is the only capability [`RequestError`] needs from a response: when an
/// error is built from a response alone, the request is recovered through it.
pub trait ResponseContext<Req> {
    fn request(&self) -> Option<&Req>;
}

/// The pipeline stores the prepared request in the response extensions.
impl<B, Req: Send + Sync + 'static> ResponseContext<Req> for http::Response<B> {
    fn request(&self) -> Option<&Req> {
        self.extensions().get::<Req>()
    }
}

impl<Req: Send + Sync + 'static> ResponseContext<Req> for http::response::Parts {
    fn request(&self) -> Option<&Req> {
        self.extensions.get::<Req>()
    }
}

/// An error raised while handling a request.
///
/// The error borrows the request and the response it was raised for, their
/// lifetime stays with the pipeline that raised it. Once built the error is
/// immutable.
#[derive(Debug)]
pub struct RequestError<'a, Req = http::request::Parts, Resp = http::Response<()>> {
    kind: ErrorKind,
    message: String,
    request: Option<&'a Req>,
    response: Option<&'a Resp>,
    source: Option<BoxError>,
}

/// Builder for [`RequestError`], see [`RequestError::builder`].
#[derive(Debug)]
pub struct RequestErrorBuilder<'a, Req, Resp> {
    kind: ErrorKind,
    message: Option<String>,
    request: Option<&'a Req>,
    response: Option<&'a Resp>,
    source: Option<BoxError>,
}

impl<'a, Req, Resp> RequestError<'a, Req, Resp> {
    /// Creates an error without request or response context.
    pub fn new<S: ToString>(kind: ErrorKind, message: S) -> Self {
        Self { kind, message: message.to_string(), request: None, response: None, source: None }
    }

    pub fn builder(kind: ErrorKind) -> RequestErrorBuilder<'a, Req, Resp> {
        RequestErrorBuilder { kind, message: None, request: None, response: None, source: None }
    }

    pub fn connection<S: ToString>(message: S) -> Self {
        Self::new(ErrorKind::Connection, message)
    }

    pub fn timeout<S: ToString>(message: S) -> Self {
        Self::new(ErrorKind::Timeout, message)
    }

    pub fn invalid_url<S: ToString>(message: S) -> Self {
        Self::new(ErrorKind::InvalidUrl, message)
    }

    pub fn invalid_header<S: ToString>(message: S) -> Self {
        Self::new(ErrorKind::InvalidHeader, message)
    }

    #[inline]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The request this error was raised for, if known.
    #[inline]
    pub fn request(&self) -> Option<&'a Req> {
        self.request
    }

    #[inline]
    pub fn response(&self) -> Option<&'a Resp> {
        self.response
    }

    /// Returns true if the error kind belongs to `class`, see [`ErrorKind::is_a`].
    #[inline]
    pub fn is_a(&self, class: Class) -> bool {
        self.kind.is_a(class)
    }

    pub fn is_transport(&self) -> bool {
        self.is_a(Class::Transport)
    }

    pub fn is_timeout(&self) -> bool {
        self.is_a(Class::Timeout)
    }

    pub fn is_usage(&self) -> bool {
        self.is_a(Class::Usage)
    }

    /// The same failure seen as an [`io::Error`].
    pub fn to_io_error(&self) -> io::Error {
        io::Error::new(self.kind.io_kind(), format!("{}: {}", self.kind, self.message))
    }
}

impl<'a, Req, Resp> RequestErrorBuilder<'a, Req, Resp> {
    pub fn message<S: ToString>(mut self, message: S) -> Self {
        self.message = Some(message.to_string());
        self
    }

    pub fn request(mut self, request: &'a Req) -> Self {
        self.request = Some(request);
        self
    }

    pub fn response(mut self, response: &'a Resp) -> Self {
        self.response = Some(response);
        self
    }

    pub fn source<E: Into<BoxError>>(mut self, source: E) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Builds the error.
    ///
    /// An explicit request always wins, otherwise the request is taken from the
    /// response when it carries one.
    pub fn build(self) -> RequestError<'a, Req, Resp>
    where
        Resp: ResponseContext<Req>,
    {
        let request = self.request.or_else(|| self.response.and_then(|response| response.request()));

        RequestError {
            kind: self.kind,
            message: self.message.unwrap_or_else(|| self.kind.description().to_string()),
            request,
            response: self.response,
            source: self.source,
        }
    }
}

impl<Req, Resp> fmt::Display for RequestError<'_, Req, Resp> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl<Req: fmt::Debug, Resp: fmt::Debug> Error for RequestError<'_, Req, Resp> {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.source.as_ref().map(|source| &**source as &(dyn Error + 'static))
    }
}
