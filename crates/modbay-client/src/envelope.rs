//! The generic response envelope and its error model.
//!
//! Every API response arrives as an envelope: a `result` discriminant plus
//! either a typed payload (`data`) or a structured error (`error`), never
//! both. The invariant is enforced when a wire body is converted into an
//! [`Envelope`], so a malformed response is a parse failure rather than a
//! value with a defaulted payload.

use std::fmt;

use serde::ser::SerializeStruct;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

// ─────────────────────────────────────────────────────────────────────────────
// Envelope
// ─────────────────────────────────────────────────────────────────────────────

/// Outcome of an API call as reported by the server.
///
/// `Success` carries the typed payload, `Failure` the server's error detail.
/// Exactly one of the two exists by construction; callers branch on the
/// variant rather than inspecting payload values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Envelope<T> {
    /// The server processed the request and returned a payload.
    Success {
        /// The typed payload.
        data: T,
    },
    /// The server processed the request and reported a failure.
    Failure {
        /// The server's failure description.
        error: ErrorDetail,
    },
}

impl<T> Envelope<T> {
    /// Check whether this is a success envelope.
    pub fn is_success(&self) -> bool {
        matches!(self, Envelope::Success { .. })
    }

    /// Check whether this is a failure envelope.
    pub fn is_failure(&self) -> bool {
        matches!(self, Envelope::Failure { .. })
    }

    /// The payload, if this is a success envelope.
    pub fn data(&self) -> Option<&T> {
        match self {
            Envelope::Success { data } => Some(data),
            Envelope::Failure { .. } => None,
        }
    }

    /// The error detail, if this is a failure envelope.
    pub fn error(&self) -> Option<&ErrorDetail> {
        match self {
            Envelope::Success { .. } => None,
            Envelope::Failure { error } => Some(error),
        }
    }

    /// Convert into a `Result`, for callers who want `?` on API failures.
    pub fn into_result(self) -> Result<T, ErrorDetail> {
        match self {
            Envelope::Success { data } => Ok(data),
            Envelope::Failure { error } => Err(error),
        }
    }

    /// Strict conversion from the wire shape: a success envelope must carry
    /// a data payload.
    pub(crate) fn from_raw(raw: RawEnvelope<T>) -> Result<Self, EnvelopeError> {
        match (raw.result, raw.data, raw.error) {
            (Status::Success, Some(data), None) => Ok(Envelope::Success { data }),
            (Status::Success, _, Some(_)) => Err(EnvelopeError::ErrorOnSuccess),
            (Status::Success, None, None) => Err(EnvelopeError::MissingData),
            (Status::Failure, None, Some(error)) => Ok(Envelope::Failure { error }),
            (Status::Failure, Some(_), _) => Err(EnvelopeError::DataOnFailure),
            (Status::Failure, None, None) => Err(EnvelopeError::MissingError),
        }
    }

    /// Conversion that tolerates an absent or `null` payload on success,
    /// substituting `T::default()`.
    ///
    /// Used for endpoints whose success carries no payload (write
    /// acknowledgements) or where the server may send `null` for an empty
    /// sequence. Failure envelopes are validated exactly as in [`from_raw`].
    ///
    /// [`from_raw`]: Envelope::from_raw
    pub(crate) fn from_raw_or_default(raw: RawEnvelope<T>) -> Result<Self, EnvelopeError>
    where
        T: Default,
    {
        match (raw.result, raw.data, raw.error) {
            (Status::Success, data, None) => Ok(Envelope::Success {
                data: data.unwrap_or_default(),
            }),
            (Status::Success, _, Some(_)) => Err(EnvelopeError::ErrorOnSuccess),
            (Status::Failure, None, Some(error)) => Ok(Envelope::Failure { error }),
            (Status::Failure, Some(_), _) => Err(EnvelopeError::DataOnFailure),
            (Status::Failure, None, None) => Err(EnvelopeError::MissingError),
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Envelope<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = RawEnvelope::<T>::deserialize(deserializer)?;
        Envelope::from_raw(raw).map_err(serde::de::Error::custom)
    }
}

impl<T: Serialize> Serialize for Envelope<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("Envelope", 2)?;
        match self {
            Envelope::Success { data } => {
                state.serialize_field("result", "success")?;
                state.serialize_field("data", data)?;
            }
            Envelope::Failure { error } => {
                state.serialize_field("result", "failure")?;
                state.serialize_field("error", error)?;
            }
        }
        state.end()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Wire shape
// ─────────────────────────────────────────────────────────────────────────────

/// Outcome discriminant on the wire. Unrecognized values fail to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
enum Status {
    Success,
    Failure,
}

/// Raw wire mirror of an envelope, before invariant validation.
///
/// The `Option` fields parse to `None` when absent, keeping the payload
/// type free of `Default` bounds.
#[derive(Debug, Deserialize)]
pub(crate) struct RawEnvelope<T> {
    result: Status,
    error: Option<ErrorDetail>,
    data: Option<T>,
}

/// Violation of the envelope success/failure invariant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EnvelopeError {
    /// `result` was `"success"` but no data payload was present.
    #[error("success envelope without a data payload")]
    MissingData,
    /// `result` was `"failure"` but no error detail was present.
    #[error("failure envelope without an error detail")]
    MissingError,
    /// `result` was `"success"` but an error detail was present.
    #[error("success envelope carrying an error detail")]
    ErrorOnSuccess,
    /// `result` was `"failure"` but a data payload was present.
    #[error("failure envelope carrying a data payload")]
    DataOnFailure,
}

// ─────────────────────────────────────────────────────────────────────────────
// Error detail
// ─────────────────────────────────────────────────────────────────────────────

/// Structured failure description inside a failure envelope.
///
/// Always fully populated when present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorDetail {
    /// Machine-readable code.
    pub code: ErrorCode,
    /// Human-readable message.
    pub message: String,
}

impl fmt::Display for ErrorDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for ErrorDetail {}

/// Error code as reported by the API: numeric or symbolic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ErrorCode {
    /// Numeric code.
    Number(i64),
    /// Symbolic code.
    Text(String),
}

impl ErrorCode {
    /// The numeric value, if this is a numeric code.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            ErrorCode::Number(n) => Some(*n),
            ErrorCode::Text(_) => None,
        }
    }

    /// The symbolic value, if this is a symbolic code.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ErrorCode::Number(_) => None,
            ErrorCode::Text(s) => Some(s.as_str()),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorCode::Number(n) => write!(f, "{}", n),
            ErrorCode::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for ErrorCode {
    fn from(n: i64) -> Self {
        ErrorCode::Number(n)
    }
}

impl From<&str> for ErrorCode {
    fn from(s: &str) -> Self {
        ErrorCode::Text(s.to_string())
    }
}
