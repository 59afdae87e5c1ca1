use std::fmt;

use crate::domain::request::RoutingGroup;
use crate::domain::validation::ValidationError;
use crate::domain::value::{BatchId, MessageText, Msisdn, StatusCode};

/// Outcome of the last send attempt recorded on a [`Message`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SendState {
    /// No send has completed yet.
    #[default]
    Unsent,
    /// The gateway answered with this status code (`0` on success).
    Completed(StatusCode),
}

impl fmt::Display for SendState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unsent => f.write_str("unsent"),
            Self::Completed(code) => write!(f, "{code}"),
        }
    }
}

/// One outbound SMS together with the result of the last send.
///
/// The addressing fields are set by the caller; the result fields are written
/// by [`GatewayClient::send`](crate::GatewayClient::send) and are read-only
/// from the outside. Sending the same message again submits a new message and
/// overwrites the result fields.
#[derive(Debug, Clone)]
pub struct Message {
    text: MessageText,
    recipients: Vec<Msisdn>,
    routing_group: RoutingGroup,
    state: SendState,
    status_description: Option<String>,
    batch_id: Option<BatchId>,
}

impl Message {
    /// Build a message from raw text and recipient strings.
    ///
    /// Fails if the text is blank, the recipient list is empty, or a recipient is invalid.
    pub fn new<I>(text: impl Into<String>, recipients: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let text = MessageText::new(text)?;
        let recipients = recipients
            .into_iter()
            .map(Msisdn::new)
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_parts(text, recipients)
    }

    /// Build a message from already validated parts.
    pub fn from_parts(text: MessageText, recipients: Vec<Msisdn>) -> Result<Self, ValidationError> {
        if recipients.is_empty() {
            return Err(ValidationError::Empty {
                field: Msisdn::FIELD,
            });
        }
        Ok(Self {
            text,
            recipients,
            routing_group: RoutingGroup::Default,
            state: SendState::Unsent,
            status_description: None,
            batch_id: None,
        })
    }

    pub fn text(&self) -> &MessageText {
        &self.text
    }

    pub fn recipients(&self) -> &[Msisdn] {
        &self.recipients
    }

    pub fn routing_group(&self) -> RoutingGroup {
        self.routing_group
    }

    pub fn set_routing_group(&mut self, routing_group: RoutingGroup) {
        self.routing_group = routing_group;
    }

    /// Builder-style variant of [`Message::set_routing_group`].
    pub fn with_routing_group(mut self, routing_group: RoutingGroup) -> Self {
        self.routing_group = routing_group;
        self
    }

    pub fn state(&self) -> SendState {
        self.state
    }

    /// Status code of the last completed send, `None` while unsent.
    pub fn status_code(&self) -> Option<StatusCode> {
        match self.state {
            SendState::Unsent => None,
            SendState::Completed(code) => Some(code),
        }
    }

    /// Description supplied by the gateway with the last reply.
    pub fn status_description(&self) -> Option<&str> {
        self.status_description.as_deref()
    }

    /// Batch id supplied by the gateway with the last reply, if any.
    pub fn batch_id(&self) -> Option<BatchId> {
        self.batch_id
    }

    /// Human-readable status, e.g. `"IN_PROGRESS (0)"` or `" (unsent)"`.
    pub fn status_report(&self) -> String {
        format!(
            "{} ({})",
            self.status_description.as_deref().unwrap_or_default(),
            self.state
        )
    }

    /// Start recording a new gateway reply; clears the batch id of any previous send.
    pub(crate) fn record_description(&mut self, description: String) {
        self.status_description = Some(description);
        self.batch_id = None;
    }

    pub(crate) fn record_status(&mut self, code: StatusCode) {
        self.state = SendState::Completed(code);
    }

    pub(crate) fn record_batch_id(&mut self, batch_id: BatchId) {
        self.batch_id = Some(batch_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_message_is_unsent_with_default_routing() {
        let message = Message::new("Hello", ["+100", "+200"]).unwrap();
        assert_eq!(message.text().as_str(), "Hello");
        assert_eq!(message.recipients().len(), 2);
        assert_eq!(message.routing_group(), RoutingGroup::Default);
        assert_eq!(message.state(), SendState::Unsent);
        assert_eq!(message.status_code(), None);
        assert_eq!(message.status_description(), None);
        assert_eq!(message.batch_id(), None);
        assert_eq!(message.status_report(), " (unsent)");
    }

    #[test]
    fn new_message_rejects_empty_inputs() {
        let empty: [&str; 0] = [];
        assert_eq!(
            Message::new("Hello", empty).unwrap_err(),
            ValidationError::Empty {
                field: Msisdn::FIELD
            }
        );
        assert_eq!(
            Message::new("   ", ["+100"]).unwrap_err(),
            ValidationError::Empty {
                field: MessageText::FIELD
            }
        );
        assert!(Message::new("Hello", ["+100", " "]).is_err());
    }

    #[test]
    fn routing_group_can_be_set_before_send() {
        let mut message = Message::new("Hello", ["+100"]).unwrap();
        message.set_routing_group(RoutingGroup::Economy);
        assert_eq!(message.routing_group(), RoutingGroup::Economy);

        let message = message.with_routing_group(RoutingGroup::Premium);
        assert_eq!(message.routing_group(), RoutingGroup::Premium);
    }

    #[test]
    fn recorded_reply_is_reported() {
        let mut message = Message::new("Hello", ["+100"]).unwrap();
        message.record_description("Rejected".to_owned());
        message.record_status(StatusCode::new(22));
        message.record_batch_id(BatchId::new(77));

        assert_eq!(message.status_code(), Some(StatusCode::new(22)));
        assert_eq!(message.batch_id(), Some(BatchId::new(77)));
        assert_eq!(message.status_report(), "Rejected (22)");

        message.record_description("IN_PROGRESS".to_owned());
        assert_eq!(message.batch_id(), None);
    }
}
