use std::fmt;
use tracing::warn;

/// Advisory notices raised by the client.
///
/// Warnings never abort a request, they are reported through `tracing` at
/// `WARN` level with the category attached as a field.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum WarningKind {
    /// A generic client warning
    Generic,
    /// A file was opened in text mode but its binary length was used.
    /// Also a deprecation notice.
    FileMode,
    /// A dependency does not match the expected version range
    DependencyVersion,
}

impl WarningKind {
    pub const fn name(self) -> &'static str {
        match self {
            WarningKind::Generic => "generic",
            WarningKind::FileMode => "file_mode",
            WarningKind::DependencyVersion => "dependency_version",
        }
    }

    #[inline]
    pub const fn is_deprecation(self) -> bool {
        matches!(self, WarningKind::FileMode)
    }
}

impl fmt::Display for WarningKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Reports a warning of the given kind.
pub fn warn<M: fmt::Display>(kind: WarningKind, message: M) {
    warn!(category = kind.name(), deprecation = kind.is_deprecation(), "{message}");
}
