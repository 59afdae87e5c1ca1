//! Domain layer: strong types with validation and invariants (no I/O).

mod message;
mod request;
mod validation;
mod value;

pub use message::{Message, SendState};
pub use request::{RoutingGroup, TestingMode};
pub use validation::ValidationError;
pub use value::{
    BatchId, KnownStatusCode, MessageText, Msisdn, Password, PhoneNumber, SenderId, StatusCode,
    Username,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn username_rejects_empty() {
        assert!(matches!(
            Username::new("   "),
            Err(ValidationError::Empty {
                field: Username::FIELD
            })
        ));
    }

    #[test]
    fn password_rejects_empty() {
        assert!(matches!(
            Password::new(""),
            Err(ValidationError::Empty {
                field: Password::FIELD
            })
        ));
    }

    #[test]
    fn phone_number_parses_with_region_and_trims() {
        let pn = PhoneNumber::parse(Some(phonenumber::country::Id::DE), " 0151 1234 5678 ").unwrap();
        assert_eq!(pn.raw(), "0151 1234 5678");
        assert_eq!(pn.e164(), "+4915112345678");
    }

    #[test]
    fn message_accepts_parsed_phone_numbers() {
        let pn = PhoneNumber::parse(Some(phonenumber::country::Id::DE), "015112345678").unwrap();
        let text = MessageText::new("hi").unwrap();
        let message = Message::from_parts(text, vec![pn.into()]).unwrap();
        assert_eq!(message.recipients()[0].raw(), "+4915112345678");
    }
}
