use super::codec::{ReplyError, ReplyFields};
use crate::domain::{BatchId, Message, MessageText, Msisdn, RoutingGroup, StatusCode};

pub const SEND_SMS_PATH: &str = "/eapi/submission/send_sms/2/2.0";

pub fn encode_send_sms_form(message: &Message) -> Vec<(String, String)> {
    let mut params = Vec::<(String, String)>::new();

    params.push((
        MessageText::FIELD.to_owned(),
        message.text().as_str().to_owned(),
    ));
    let msisdn = message
        .recipients()
        .iter()
        .map(Msisdn::raw)
        .collect::<Vec<_>>()
        .join(",");
    params.push((Msisdn::FIELD.to_owned(), msisdn));

    let routing_group = message.routing_group();
    if !routing_group.is_default() {
        params.push((
            RoutingGroup::FIELD.to_owned(),
            routing_group.as_u8().to_string(),
        ));
    }

    params
}

/// Reply of a send: `status|description|batch_id?`.
///
/// Fields are decoded on access so the caller can record each one as soon as it
/// is known to be well-formed.
#[derive(Debug, Clone)]
pub struct SendSmsReply {
    fields: ReplyFields,
}

impl SendSmsReply {
    pub fn decode(body: &str) -> Self {
        Self {
            fields: ReplyFields::decode(body),
        }
    }

    pub fn description(&self) -> Result<&str, ReplyError> {
        self.fields.required(1, "description")
    }

    pub fn status_code(&self) -> Result<StatusCode, ReplyError> {
        Ok(StatusCode::new(self.fields.integer(0, "status_code")?))
    }

    /// The batch id, or `None` when the third field is absent or empty.
    pub fn batch_id(&self) -> Result<Option<BatchId>, ReplyError> {
        match self.fields.get(2) {
            None | Some("") => Ok(None),
            Some(_) => Ok(Some(BatchId::new(self.fields.integer(2, "batch_id")?))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_joins_recipients_and_omits_default_routing() {
        let message = Message::new("Hello", ["+100", "+200", "+300"]).unwrap();
        let params = encode_send_sms_form(&message);

        assert_eq!(
            params,
            vec![
                ("message".to_owned(), "Hello".to_owned()),
                ("msisdn".to_owned(), "+100,+200,+300".to_owned()),
            ]
        );
    }

    #[test]
    fn encode_includes_non_default_routing_group() {
        let message = Message::new("Hello", ["+100"])
            .unwrap()
            .with_routing_group(RoutingGroup::Premium);
        let params = encode_send_sms_form(&message);

        assert!(params.contains(&("routing_group".to_owned(), "3".to_owned())));

        let economy = message.with_routing_group(RoutingGroup::Economy);
        let params = encode_send_sms_form(&economy);
        assert!(params.contains(&("routing_group".to_owned(), "1".to_owned())));
    }

    #[test]
    fn decode_success_reply() {
        let reply = SendSmsReply::decode("0|IN_PROGRESS|1234567\n");
        assert_eq!(reply.status_code().unwrap(), StatusCode::new(0));
        assert_eq!(reply.description().unwrap(), "IN_PROGRESS");
        assert_eq!(reply.batch_id().unwrap(), Some(BatchId::new(1_234_567)));
    }

    #[test]
    fn decode_treats_empty_or_missing_batch_id_as_absent() {
        assert_eq!(SendSmsReply::decode("0|OK|").batch_id().unwrap(), None);
        assert_eq!(SendSmsReply::decode("0|OK").batch_id().unwrap(), None);
    }

    #[test]
    fn decode_reports_malformed_fields() {
        let reply = SendSmsReply::decode("x|Broken|y");
        assert_eq!(reply.description().unwrap(), "Broken");
        assert!(matches!(
            reply.status_code(),
            Err(ReplyError::InvalidInteger {
                name: "status_code",
                ..
            })
        ));
        assert!(matches!(
            reply.batch_id(),
            Err(ReplyError::InvalidInteger {
                name: "batch_id",
                ..
            })
        ));
        assert!(matches!(
            SendSmsReply::decode("0").description(),
            Err(ReplyError::MissingField { index: 1, .. })
        ));
    }
}
