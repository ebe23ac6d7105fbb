//! API credentials and the auth header scheme.

use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Classification of an API credential.
///
/// The kind selects the `Authorization` header scheme and determines the
/// privilege level the server grants the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Public token: access to public surfaces only.
    Public,
    /// Private token: full member-scoped access.
    Private,
}

impl TokenKind {
    /// Header scheme string for this kind.
    pub fn scheme(self) -> &'static str {
        match self {
            TokenKind::Public => "Public",
            TokenKind::Private => "Private",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.scheme())
    }
}

impl FromStr for TokenKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "public" => Ok(TokenKind::Public),
            "private" => Ok(TokenKind::Private),
            other => Err(Error::Config(format!(
                "unknown token kind '{}' (expected 'public' or 'private')",
                other
            ))),
        }
    }
}

/// An API credential: a kind plus the secret itself.
///
/// Immutable once constructed. The secret is kept out of `Debug` output and
/// the type has no serde implementations; the only way it leaves the process
/// is as the `Authorization` header the transport attaches.
#[derive(Clone)]
pub struct AuthToken {
    kind: TokenKind,
    secret: String,
}

impl AuthToken {
    /// Create a token from a kind and secret.
    ///
    /// Never fails. An empty secret is accepted here and rejected by the
    /// server through a failure envelope.
    pub fn new(kind: TokenKind, secret: impl Into<String>) -> Self {
        Self {
            kind,
            secret: secret.into(),
        }
    }

    /// The credential kind.
    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    /// Render the `Authorization` header value: `<scheme> <secret>`.
    pub(crate) fn header_value(&self) -> String {
        format!("{} {}", self.kind.scheme(), self.secret)
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthToken")
            .field("kind", &self.kind)
            .field("secret", &"<redacted>")
            .finish()
    }
}
