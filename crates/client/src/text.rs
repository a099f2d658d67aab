//! Conversions to the client's native string.
//!
//! The native string is UTF-8 text (`str`). Header values and url parts may
//! arrive as raw bytes, [`to_native_string`] decodes them with a given
//! [`Encoding`] and hands text through untouched. Conversion only goes from
//! bytes to text.

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use bytes::Bytes;
use http::HeaderValue;
use thiserror::Error;

/// Byte encodings understood by [`to_native_string`].
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub enum Encoding {
    #[default]
    Ascii,
    /// ISO-8859-1, every byte maps to the code point of the same value
    Latin1,
    Utf8,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum TextError {
    #[error("can't decode byte at position {position} with {encoding}")]
    Decode { encoding: Encoding, position: usize },

    #[error("unknown encoding: {label}")]
    UnknownEncoding { label: String },
}

impl TextError {
    pub fn decode(encoding: Encoding, position: usize) -> Self {
        Self::Decode { encoding, position }
    }

    pub fn unknown_encoding<S: ToString>(str: S) -> Self {
        Self::UnknownEncoding { label: str.to_string() }
    }
}

impl Encoding {
    pub const fn name(self) -> &'static str {
        match self {
            Encoding::Ascii => "ascii",
            Encoding::Latin1 => "latin-1",
            Encoding::Utf8 => "utf-8",
        }
    }

    /// Decodes `bytes` into text, borrowing when no conversion is needed.
    pub fn decode(self, bytes: &[u8]) -> Result<Cow<'_, str>, TextError> {
        match self {
            Encoding::Ascii => match bytes.iter().position(|b| !b.is_ascii()) {
                Some(position) => Err(TextError::decode(self, position)),
                // ascii is valid utf-8
                None => std::str::from_utf8(bytes).map(Cow::Borrowed).map_err(|e| TextError::decode(self, e.valid_up_to())),
            },
            Encoding::Latin1 => {
                if bytes.is_ascii() {
                    Encoding::Ascii.decode(bytes)
                } else {
                    Ok(Cow::Owned(bytes.iter().copied().map(char::from).collect()))
                }
            }
            Encoding::Utf8 => std::str::from_utf8(bytes).map(Cow::Borrowed).map_err(|e| TextError::decode(self, e.valid_up_to())),
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Encoding {
    type Err = TextError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ascii" | "us-ascii" => Ok(Encoding::Ascii),
            "latin-1" | "latin1" | "iso-8859-1" => Ok(Encoding::Latin1),
            "utf-8" | "utf8" => Ok(Encoding::Utf8),
            _ => Err(TextError::unknown_encoding(s)),
        }
    }
}

/// Values that can be turned into the native string.
pub trait ToNativeString {
    fn to_native_string(&self, encoding: Encoding) -> Result<Cow<'_, str>, TextError>;
}

impl ToNativeString for str {
    /// Text is already native, the encoding is not used.
    #[inline]
    fn to_native_string(&self, _encoding: Encoding) -> Result<Cow<'_, str>, TextError> {
        Ok(Cow::Borrowed(self))
    }
}

impl ToNativeString for String {
    #[inline]
    fn to_native_string(&self, encoding: Encoding) -> Result<Cow<'_, str>, TextError> {
        self.as_str().to_native_string(encoding)
    }
}

impl ToNativeString for Cow<'_, str> {
    #[inline]
    fn to_native_string(&self, encoding: Encoding) -> Result<Cow<'_, str>, TextError> {
        self.as_ref().to_native_string(encoding)
    }
}

impl ToNativeString for [u8] {
    fn to_native_string(&self, encoding: Encoding) -> Result<Cow<'_, str>, TextError> {
        encoding.decode(self)
    }
}

impl ToNativeString for Vec<u8> {
    fn to_native_string(&self, encoding: Encoding) -> Result<Cow<'_, str>, TextError> {
        encoding.decode(self)
    }
}

impl ToNativeString for Bytes {
    fn to_native_string(&self, encoding: Encoding) -> Result<Cow<'_, str>, TextError> {
        encoding.decode(self)
    }
}

impl ToNativeString for HeaderValue {
    fn to_native_string(&self, encoding: Encoding) -> Result<Cow<'_, str>, TextError> {
        encoding.decode(self.as_bytes())
    }
}

/// Returns `value` as native text, decoding bytes with `encoding` when needed.
///
/// ```
/// use micro_client::text::{to_native_string, Encoding};
///
/// assert_eq!(to_native_string("text", Encoding::Ascii).unwrap(), "text");
/// assert_eq!(to_native_string(&b"bytes"[..], Encoding::Ascii).unwrap(), "bytes");
/// assert!(to_native_string(&b"caf\xe9"[..], Encoding::Ascii).is_err());
/// assert_eq!(to_native_string(&b"caf\xe9"[..], Encoding::Latin1).unwrap(), "café");
/// ```
pub fn to_native_string<S: ToNativeString + ?Sized>(value: &S, encoding: Encoding) -> Result<Cow<'_, str>, TextError> {
    value.to_native_string(encoding)
}

/// Returns true if `text` only contains ASCII characters.
///
/// Non ASCII text is not an error, it simply yields `false`.
#[inline]
pub fn is_ascii_only(text: &str) -> bool {
    text.is_ascii()
}
