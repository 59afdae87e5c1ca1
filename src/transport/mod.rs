//! Transport layer: wire-format details of the gateway's form requests and pipe-delimited replies.

mod codec;
mod credits;
mod send_sms;

pub use codec::{ReplyError, body_text, encode_form};
pub use credits::{CREDITS_PATH, CreditsReply, decode_credits_reply};
pub use send_sms::{SEND_SMS_PATH, SendSmsReply, encode_send_sms_form};
