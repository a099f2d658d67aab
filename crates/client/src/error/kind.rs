use std::fmt;
use std::io;

/// The closed set of failures a request pipeline can report.
///
/// A kind belongs to zero or more [`Class`]es at the same time. Callers usually
/// match on the class they care about (every transport failure, every timeout)
/// rather than on the exact kind, see [`ErrorKind::is_a`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// An HTTP level error, e.g. an error status code
    Http,
    /// The connection to the remote server failed
    Connection,
    /// The proxy refused or broke the connection
    Proxy,
    /// The TLS handshake or session failed
    Tls,
    /// The request timed out
    Timeout,
    /// The request timed out while trying to connect to the remote server
    ConnectTimeout,
    /// The server did not send any data in the allotted amount of time
    ReadTimeout,
    /// A request was attempted without an url
    UrlRequired,
    /// The redirect limit was exceeded
    TooManyRedirects,
    /// The url has no scheme
    MissingSchema,
    /// The url scheme is not supported
    InvalidSchema,
    /// The url could not be understood
    InvalidUrl,
    /// A header name or value is invalid
    InvalidHeader,
    /// The proxy url could not be understood
    InvalidProxyUrl,
    /// The server declared chunked encoding but sent an invalid chunk
    ChunkedEncoding,
    /// The response content could not be decoded
    ContentDecoding,
    /// The response body was already consumed
    StreamConsumed,
    /// The retry policy gave up
    RetryExhausted,
    /// A request body could not be rewound for a resend
    UnrewindableBody,
}

/// A classification axis shared by several [`ErrorKind`]s.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Class {
    /// Failures of the underlying connection: connect, proxy, tls
    Transport,
    /// Connect and read timeouts
    Timeout,
    /// Invalid arguments supplied by the caller
    Usage,
    /// Malformed urls, including proxy urls
    InvalidUrl,
    /// An object was used in a state that does not allow the operation
    Type,
    /// Errors that also belong to the base protocol layer the client sits on
    Protocol,
}

impl ErrorKind {
    pub const ALL: [ErrorKind; 19] = [
        ErrorKind::Http,
        ErrorKind::Connection,
        ErrorKind::Proxy,
        ErrorKind::Tls,
        ErrorKind::Timeout,
        ErrorKind::ConnectTimeout,
        ErrorKind::ReadTimeout,
        ErrorKind::UrlRequired,
        ErrorKind::TooManyRedirects,
        ErrorKind::MissingSchema,
        ErrorKind::InvalidSchema,
        ErrorKind::InvalidUrl,
        ErrorKind::InvalidHeader,
        ErrorKind::InvalidProxyUrl,
        ErrorKind::ChunkedEncoding,
        ErrorKind::ContentDecoding,
        ErrorKind::StreamConsumed,
        ErrorKind::RetryExhausted,
        ErrorKind::UnrewindableBody,
    ];

    /// The classes this kind belongs to.
    pub const fn classes(self) -> &'static [Class] {
        use Class::{InvalidUrl, Protocol, Timeout, Transport, Type, Usage};

        match self {
            ErrorKind::Connection | ErrorKind::Proxy | ErrorKind::Tls => &[Transport],
            ErrorKind::Timeout | ErrorKind::ReadTimeout => &[Timeout],
            ErrorKind::ConnectTimeout => &[Transport, Timeout],
            ErrorKind::MissingSchema | ErrorKind::InvalidSchema | ErrorKind::InvalidHeader => &[Usage],
            ErrorKind::InvalidUrl | ErrorKind::InvalidProxyUrl => &[Usage, InvalidUrl],
            ErrorKind::StreamConsumed => &[Usage, Type],
            ErrorKind::ContentDecoding => &[Protocol],
            ErrorKind::Http
            | ErrorKind::UrlRequired
            | ErrorKind::TooManyRedirects
            | ErrorKind::ChunkedEncoding
            | ErrorKind::RetryExhausted
            | ErrorKind::UnrewindableBody => &[],
        }
    }

    /// Returns true if this kind belongs to `class`.
    ///
    /// ```
    /// use micro_client::error::{Class, ErrorKind};
    ///
    /// assert!(ErrorKind::ConnectTimeout.is_a(Class::Transport));
    /// assert!(ErrorKind::ConnectTimeout.is_a(Class::Timeout));
    /// assert!(!ErrorKind::ReadTimeout.is_a(Class::Transport));
    /// ```
    #[inline]
    pub fn is_a(self, class: Class) -> bool {
        self.classes().contains(&class)
    }

    /// Default message for errors created without one.
    pub const fn description(self) -> &'static str {
        match self {
            ErrorKind::Http => "an http error occurred",
            ErrorKind::Connection => "a connection error occurred",
            ErrorKind::Proxy => "a proxy error occurred",
            ErrorKind::Tls => "a tls error occurred",
            ErrorKind::Timeout => "the request timed out",
            ErrorKind::ConnectTimeout => "the request timed out while trying to connect to the remote server",
            ErrorKind::ReadTimeout => "the server did not send any data in the allotted amount of time",
            ErrorKind::UrlRequired => "a valid url is required to make a request",
            ErrorKind::TooManyRedirects => "too many redirects",
            ErrorKind::MissingSchema => "the url scheme (e.g. http or https) is missing",
            ErrorKind::InvalidSchema => "the url scheme is not supported",
            ErrorKind::InvalidUrl => "the url provided was somehow invalid",
            ErrorKind::InvalidHeader => "the header value provided was somehow invalid",
            ErrorKind::InvalidProxyUrl => "the proxy url provided is invalid",
            ErrorKind::ChunkedEncoding => "the server declared chunked encoding but sent an invalid chunk",
            ErrorKind::ContentDecoding => "failed to decode response content",
            ErrorKind::StreamConsumed => "the content for this response was already consumed",
            ErrorKind::RetryExhausted => "custom retries logic failed",
            ErrorKind::UnrewindableBody => "failed to rewind the request body",
        }
    }

    /// The closest [`io::ErrorKind`], every request error being an I/O error as well.
    pub fn io_kind(self) -> io::ErrorKind {
        if self.is_a(Class::Timeout) {
            io::ErrorKind::TimedOut
        } else if self.is_a(Class::Usage) {
            io::ErrorKind::InvalidInput
        } else if self.is_a(Class::Transport) {
            io::ErrorKind::ConnectionAborted
        } else {
            io::ErrorKind::Other
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

impl Class {
    pub const ALL: [Class; 6] = [Class::Transport, Class::Timeout, Class::Usage, Class::InvalidUrl, Class::Type, Class::Protocol];

    /// Every kind that belongs to this class.
    pub fn kinds(self) -> impl Iterator<Item = ErrorKind> {
        ErrorKind::ALL.into_iter().filter(move |kind| kind.is_a(self))
    }
}
