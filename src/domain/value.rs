use std::fmt;

use crate::domain::validation::ValidationError;

use phonenumber::country;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// BulkSMS account username.
///
/// Invariant: non-empty after trimming.
pub struct Username(String);

impl Username {
    /// Form field name used by the gateway (`username`).
    pub const FIELD: &'static str = "username";

    /// Create a validated [`Username`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated username.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Clone, PartialEq, Eq, Hash)]
/// BulkSMS account password.
///
/// Invariant: must not be empty (whitespace is preserved and allowed).
pub struct Password(String);

impl Password {
    /// Form field name used by the gateway (`password`).
    pub const FIELD: &'static str = "password";

    /// Create a validated [`Password`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(value))
    }

    /// Borrow the password as provided.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(***)")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Sender id registered with the account.
///
/// Invariant: non-empty after trimming. It identifies the client but is not
/// sent with any request.
pub struct SenderId(String);

impl SenderId {
    /// Create a validated [`SenderId`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: "sender" });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated sender id.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// SMS message text (`message`).
///
/// Invariant: non-empty after trimming. The original value (including whitespace) is preserved.
pub struct MessageText(String);

impl MessageText {
    /// Form field name used by the gateway (`message`).
    pub const FIELD: &'static str = "message";

    /// Create validated message text.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(value))
    }

    /// Borrow the message text as provided.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Unvalidated recipient address as sent to the gateway (`msisdn`).
///
/// Invariant: non-empty after trimming and free of commas, since recipients
/// travel comma-joined in a single parameter. This type does not normalize; if
/// you want E.164 normalization, parse into [`PhoneNumber`] and convert it.
pub struct Msisdn(String);

impl Msisdn {
    /// Form field name used by the gateway (`msisdn`).
    pub const FIELD: &'static str = "msisdn";

    /// Create a validated recipient address.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        if trimmed.contains(',') {
            return Err(ValidationError::InvalidRecipient {
                input: trimmed.to_owned(),
            });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Raw (trimmed) value as sent to the gateway.
    pub fn raw(&self) -> &str {
        &self.0
    }
}

impl From<PhoneNumber> for Msisdn {
    fn from(value: PhoneNumber) -> Self {
        Self(value.e164)
    }
}

#[derive(Debug, Clone)]
/// Parsed phone number with an E.164 representation.
///
/// Equality and hashing are based on the E.164 form.
pub struct PhoneNumber {
    raw: String,
    e164: String,
    parsed: phonenumber::PhoneNumber,
}

impl PhoneNumber {
    /// Parse and normalize a phone number into E.164.
    ///
    /// `default_region` is used when the input does not contain an explicit country prefix.
    pub fn parse(
        default_region: Option<country::Id>,
        input: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let input = input.into();
        let raw = input.trim().to_owned();
        if raw.is_empty() {
            return Err(ValidationError::Empty {
                field: Msisdn::FIELD,
            });
        }

        let parsed = phonenumber::parse(default_region, &raw)
            .map_err(|_| ValidationError::InvalidPhoneNumber { input: raw.clone() })?;

        let e164 = phonenumber::format(&parsed)
            .mode(phonenumber::Mode::E164)
            .to_string();

        Ok(Self { raw, e164, parsed })
    }

    /// Raw input after trimming.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Normalized E.164 representation.
    pub fn e164(&self) -> &str {
        &self.e164
    }

    /// The parsed phone number from the `phonenumber` crate.
    pub fn parsed(&self) -> &phonenumber::PhoneNumber {
        &self.parsed
    }
}

impl PartialEq for PhoneNumber {
    fn eq(&self, other: &Self) -> bool {
        self.e164 == other.e164
    }
}

impl Eq for PhoneNumber {}

impl std::hash::Hash for PhoneNumber {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.e164.hash(state);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Batch identifier assigned by the gateway to a submission.
pub struct BatchId(i64);

impl BatchId {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn value(self) -> i64 {
        self.0
    }
}

impl fmt::Display for BatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Gateway status code.
///
/// `0` means success for every operation; anything else is a gateway-defined
/// error. The value is preserved as-is even when the code is unknown to this crate.
pub struct StatusCode(i32);

impl StatusCode {
    /// The code the gateway uses for a successful call.
    pub const SUCCESS: Self = Self(0);

    /// Construct a status code from its integer representation.
    pub fn new(code: i32) -> Self {
        Self(code)
    }

    /// Get the integer code as provided by the gateway.
    pub fn as_i32(self) -> i32 {
        self.0
    }

    pub fn is_success(self) -> bool {
        self == Self::SUCCESS
    }

    /// Map this code to a known status code variant, if one exists.
    pub fn known(self) -> Option<KnownStatusCode> {
        KnownStatusCode::from_code(self.0)
    }

    /// Returns `true` if this status code is considered retryable by the crate.
    pub fn is_retryable(self) -> bool {
        matches!(self.known(), Some(kind) if kind.is_retryable())
    }

    /// Returns `true` if this status code represents an authentication failure.
    pub fn is_auth_error(self) -> bool {
        matches!(self.known(), Some(kind) if kind.is_auth_error())
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
/// Status codes documented by the BulkSMS EAPI.
///
/// Unknown codes are preserved as [`StatusCode`] and return `None` from [`KnownStatusCode::from_code`].
pub enum KnownStatusCode {
    InProgress,
    Scheduled,
    InternalFatalError,
    AuthenticationFailure,
    DataValidationFailed,
    InsufficientCredits,
    UpstreamCreditsUnavailable,
    DailyQuotaExceeded,
    UpstreamQuotaExceeded,
    TemporarilyUnavailable,
    MaximumBatchSizeExceeded,
}

impl KnownStatusCode {
    /// Convert a raw integer code into a known variant.
    pub fn from_code(code: i32) -> Option<Self> {
        Some(match code {
            0 => Self::InProgress,
            1 => Self::Scheduled,
            22 => Self::InternalFatalError,
            23 => Self::AuthenticationFailure,
            24 => Self::DataValidationFailed,
            25 => Self::InsufficientCredits,
            26 => Self::UpstreamCreditsUnavailable,
            27 => Self::DailyQuotaExceeded,
            28 => Self::UpstreamQuotaExceeded,
            40 => Self::TemporarilyUnavailable,
            201 => Self::MaximumBatchSizeExceeded,
            _ => return None,
        })
    }

    /// Whether this status is likely transient and can be retried.
    pub fn is_retryable(self) -> bool {
        matches!(
            self,
            Self::TemporarilyUnavailable
                | Self::UpstreamCreditsUnavailable
                | Self::UpstreamQuotaExceeded
        )
    }

    /// Whether this status indicates invalid credentials.
    pub fn is_auth_error(self) -> bool {
        matches!(self, Self::AuthenticationFailure)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_newtypes_trim_or_validate() {
        let username = Username::new(" user ").unwrap();
        assert_eq!(username.as_str(), "user");
        assert!(Username::new("  ").is_err());

        let password = Password::new(" secret ").unwrap();
        assert_eq!(password.as_str(), " secret ");
        assert!(Password::new("").is_err());

        let sender = SenderId::new(" ACME ").unwrap();
        assert_eq!(sender.as_str(), "ACME");
        assert!(SenderId::new(" ").is_err());

        let msg = MessageText::new(" hi ").unwrap();
        assert_eq!(msg.as_str(), " hi ");
        assert!(MessageText::new("  ").is_err());
    }

    #[test]
    fn password_debug_is_redacted() {
        let password = Password::new("hunter2").unwrap();
        assert_eq!(format!("{password:?}"), "Password(***)");
    }

    #[test]
    fn msisdn_trims_and_rejects_commas() {
        let raw = Msisdn::new(" +100 ").unwrap();
        assert_eq!(raw.raw(), "+100");
        assert!(Msisdn::new("").is_err());
        assert_eq!(
            Msisdn::new("+100,+200").unwrap_err(),
            ValidationError::InvalidRecipient {
                input: "+100,+200".to_owned()
            }
        );
    }

    #[test]
    fn phone_number_parsing_and_equality_use_e164() {
        let p1 = PhoneNumber::parse(None, "+4915112345678").unwrap();
        let p2 = PhoneNumber::parse(None, "+49 151 1234-5678").unwrap();
        assert_eq!(p1, p2);
        assert_eq!(p1.e164(), "+4915112345678");
        assert_eq!(p2.raw(), "+49 151 1234-5678");

        let msisdn: Msisdn = p2.into();
        assert_eq!(msisdn.raw(), "+4915112345678");
        assert!(PhoneNumber::parse(None, "not-a-number").is_err());
        assert!(PhoneNumber::parse(None, "   ").is_err());
    }

    #[test]
    fn status_code_knows_retryable_and_auth_errors() {
        assert!(StatusCode::new(0).is_success());
        assert!(!StatusCode::new(22).is_success());

        let retryable = StatusCode::new(40);
        assert!(retryable.is_retryable());
        assert!(!retryable.is_auth_error());

        let auth = StatusCode::new(23);
        assert!(auth.is_auth_error());
        assert!(!auth.is_retryable());

        let unknown = StatusCode::new(9999);
        assert!(unknown.known().is_none());
        assert!(!unknown.is_retryable());
        assert!(!unknown.is_auth_error());
    }

    #[test]
    fn status_code_known_mapping() {
        assert_eq!(
            StatusCode::new(25).known(),
            Some(KnownStatusCode::InsufficientCredits)
        );
        assert_eq!(
            StatusCode::new(201).known(),
            Some(KnownStatusCode::MaximumBatchSizeExceeded)
        );
    }
}
