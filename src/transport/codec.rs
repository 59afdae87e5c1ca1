//! Wire codec: form encoding for requests, pipe splitting for replies.

use std::num::{ParseFloatError, ParseIntError};
use std::str::FromStr;

/// A gateway reply that does not have the expected shape.
#[derive(Debug, thiserror::Error)]
pub enum ReplyError {
    #[error("reply body is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),

    #[error("reply is missing field {index} ({name})")]
    MissingField { index: usize, name: &'static str },

    #[error("reply field {name} is not an integer: {value:?}")]
    InvalidInteger {
        name: &'static str,
        value: String,
        #[source]
        source: ParseIntError,
    },

    #[error("reply field {name} is not a number: {value:?}")]
    InvalidFloat {
        name: &'static str,
        value: String,
        #[source]
        source: ParseFloatError,
    },
}

pub fn encode_form(params: &[(String, String)]) -> String {
    url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(params)
        .finish()
}

pub fn body_text(body: &[u8]) -> Result<&str, ReplyError> {
    Ok(std::str::from_utf8(body)?)
}

/// Positional fields of a pipe-delimited reply.
///
/// Surrounding whitespace is trimmed before splitting and empty fields are kept,
/// so `"0|OK|"` has three fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplyFields(Vec<String>);

impl ReplyFields {
    pub fn decode(body: &str) -> Self {
        Self(body.trim().split('|').map(str::to_owned).collect())
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.0.get(index).map(String::as_str)
    }

    pub fn required(&self, index: usize, name: &'static str) -> Result<&str, ReplyError> {
        self.get(index)
            .ok_or(ReplyError::MissingField { index, name })
    }

    pub fn integer<T>(&self, index: usize, name: &'static str) -> Result<T, ReplyError>
    where
        T: FromStr<Err = ParseIntError>,
    {
        let value = self.required(index, name)?;
        value.parse().map_err(|source| ReplyError::InvalidInteger {
            name,
            value: value.to_owned(),
            source,
        })
    }

    pub fn float(&self, index: usize, name: &'static str) -> Result<f64, ReplyError> {
        let value = self.required(index, name)?;
        value.parse().map_err(|source| ReplyError::InvalidFloat {
            name,
            value: value.to_owned(),
            source,
        })
    }

    #[cfg(test)]
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_trims_and_keeps_empty_trailing_field() {
        let fields = ReplyFields::decode("  0|OK|\r\n");
        assert_eq!(fields.as_slice(), ["0", "OK", ""]);
    }

    #[test]
    fn decode_keeps_inner_empty_fields() {
        let fields = ReplyFields::decode("22||77");
        assert_eq!(fields.as_slice(), ["22", "", "77"]);
        assert_eq!(ReplyFields::decode("").as_slice(), [""]);
    }

    #[test]
    fn typed_field_access() {
        let fields = ReplyFields::decode("0|42.5|x");
        assert_eq!(fields.integer::<i32>(0, "status").unwrap(), 0);
        assert_eq!(fields.float(1, "credits").unwrap(), 42.5);
        assert!(matches!(
            fields.integer::<i64>(2, "batch_id"),
            Err(ReplyError::InvalidInteger { name: "batch_id", .. })
        ));
        assert!(matches!(
            fields.required(3, "extra"),
            Err(ReplyError::MissingField { index: 3, name: "extra" })
        ));
    }

    #[test]
    fn encode_form_escapes_values() {
        let params = vec![
            ("message".to_owned(), "Hello world & co".to_owned()),
            ("msisdn".to_owned(), "+100,+200".to_owned()),
        ];
        assert_eq!(
            encode_form(&params),
            "message=Hello+world+%26+co&msisdn=%2B100%2C%2B200"
        );
    }

    #[test]
    fn encode_form_keeps_repeated_names() {
        let params = vec![
            ("msisdn".to_owned(), "1".to_owned()),
            ("msisdn".to_owned(), "2".to_owned()),
        ];
        assert_eq!(encode_form(&params), "msisdn=1&msisdn=2");
    }

    #[test]
    fn body_text_rejects_invalid_utf8() {
        assert_eq!(body_text(b"0|OK").unwrap(), "0|OK");
        assert!(matches!(
            body_text(&[0xff, 0xfe]),
            Err(ReplyError::InvalidUtf8(_))
        ));
    }
}
