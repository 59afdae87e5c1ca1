use super::codec::{ReplyError, ReplyFields};
use crate::domain::StatusCode;

pub const CREDITS_PATH: &str = "/eapi/user/get_credits/1/1.1";

/// Decoded reply of the credits query: `status|credits` or `status|description`.
#[derive(Debug, Clone, PartialEq)]
pub enum CreditsReply {
    Balance(f64),
    Rejected {
        status_code: StatusCode,
        description: String,
    },
}

pub fn decode_credits_reply(body: &str) -> Result<CreditsReply, ReplyError> {
    let fields = ReplyFields::decode(body);
    let status_code = StatusCode::new(fields.integer(0, "status_code")?);

    if status_code.is_success() {
        return Ok(CreditsReply::Balance(fields.float(1, "credits")?));
    }

    Ok(CreditsReply::Rejected {
        status_code,
        description: fields.get(1).unwrap_or_default().to_owned(),
    })
}
