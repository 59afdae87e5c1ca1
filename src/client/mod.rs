//! Client layer: orchestrates transport calls and maps transport ↔ domain.

use std::error::Error as StdError;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use tracing::{debug, trace};

use crate::domain::{
    Message, Password, SenderId, StatusCode, TestingMode, Username, ValidationError,
};
use crate::transport::{self, CreditsReply, ReplyError, SendSmsReply};

const DEFAULT_BASE_URL: &str = "http://bulksms.de:5567";

type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

trait HttpTransport: Send + Sync {
    /// POST `params` form-encoded to `url` and return the raw response body.
    fn post_form<'a>(
        &'a self,
        url: &'a str,
        params: Vec<(String, String)>,
    ) -> BoxFuture<'a, Result<Vec<u8>, Box<dyn StdError + Send + Sync>>>;
}

#[derive(Debug, Clone)]
struct ReqwestTransport {
    client: reqwest::Client,
}

impl HttpTransport for ReqwestTransport {
    fn post_form<'a>(
        &'a self,
        url: &'a str,
        params: Vec<(String, String)>,
    ) -> BoxFuture<'a, Result<Vec<u8>, Box<dyn StdError + Send + Sync>>> {
        Box::pin(async move {
            let response = self
                .client
                .post(url)
                .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(transport::encode_form(&params))
                .send()
                .await?;
            // The gateway reports failures in the body; the HTTP status is not inspected.
            let body = response.bytes().await?;
            Ok(body.to_vec())
        })
    }
}

#[derive(Debug, Clone)]
/// Account credentials attached to every gateway call.
///
/// The optional sender id identifies the account's registered sender; it is
/// kept with the credentials but not transmitted.
pub struct Credentials {
    username: Username,
    password: Password,
    sender: Option<SenderId>,
}

impl Credentials {
    /// Validate that both username and password are non-empty.
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            username: Username::new(username)?,
            password: Password::new(password)?,
            sender: None,
        })
    }

    /// Attach a validated sender id.
    pub fn with_sender(mut self, sender: impl Into<String>) -> Result<Self, ValidationError> {
        self.sender = Some(SenderId::new(sender)?);
        Ok(self)
    }

    pub fn username(&self) -> &Username {
        &self.username
    }

    pub fn sender(&self) -> Option<&SenderId> {
        self.sender.as_ref()
    }

    fn push_form_params(&self, params: &mut Vec<(String, String)>) {
        params.push((Username::FIELD.to_owned(), self.username.as_str().to_owned()));
        params.push((Password::FIELD.to_owned(), self.password.as_str().to_owned()));
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{description} ({status_code})")]
/// Non-zero status reported by the gateway, with its own description.
pub struct GatewayError {
    status_code: StatusCode,
    description: String,
}

impl GatewayError {
    pub fn new(status_code: StatusCode, description: impl Into<String>) -> Self {
        Self {
            status_code,
            description: description.into(),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        self.status_code
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// See [`StatusCode::is_retryable`].
    pub fn is_retryable(&self) -> bool {
        self.status_code.is_retryable()
    }

    /// See [`StatusCode::is_auth_error`].
    pub fn is_auth_error(&self) -> bool {
        self.status_code.is_auth_error()
    }
}

#[derive(Debug, thiserror::Error)]
/// Errors returned by [`GatewayClient`].
///
/// None of them are retried by the client; retry policy is left to the caller.
pub enum BulkSmsError {
    /// HTTP client / transport failure (DNS, TLS, connection refused, timeouts, unreadable body).
    #[error("transport error: {0}")]
    Transport(#[source] Box<dyn StdError + Send + Sync>),

    /// The reply body did not have the expected positional fields.
    #[error("parse error: {0}")]
    Parse(#[from] ReplyError),

    /// The gateway answered with a non-zero status code.
    #[error("gateway error: {0}")]
    Gateway(#[from] GatewayError),

    /// One of the domain constructors rejected an invalid value.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// A configured endpoint is not a valid URL.
    #[error("invalid endpoint URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

#[derive(Debug, Clone)]
/// Builder for [`GatewayClient`].
///
/// Use this when you need to customize endpoints, testing mode, timeout, or user-agent.
pub struct GatewayClientBuilder {
    credentials: Credentials,
    base_url: String,
    credits_endpoint: Option<String>,
    send_endpoint: Option<String>,
    testing: TestingMode,
    timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl GatewayClientBuilder {
    /// Create a builder with the default base URL and no overrides.
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            base_url: DEFAULT_BASE_URL.to_owned(),
            credits_endpoint: None,
            send_endpoint: None,
            testing: TestingMode::None,
            timeout: None,
            user_agent: None,
        }
    }

    /// Override the scheme/host/port both endpoint paths are joined onto.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Override the full URL of the credits query.
    pub fn credits_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.credits_endpoint = Some(endpoint.into());
        self
    }

    /// Override the full URL of the send call.
    pub fn send_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.send_endpoint = Some(endpoint.into());
        self
    }

    pub fn testing_mode(mut self, testing: TestingMode) -> Self {
        self.testing = testing;
        self
    }

    /// Set an HTTP client timeout applied to the entire request.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Override the HTTP `User-Agent` header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    fn resolve_endpoints(&self) -> Result<(String, String), BulkSmsError> {
        let base = url::Url::parse(&self.base_url)?;
        let resolve = |endpoint: &Option<String>, path: &str| -> Result<String, BulkSmsError> {
            let url = match endpoint {
                Some(endpoint) => url::Url::parse(endpoint)?,
                None => base.join(path)?,
            };
            Ok(url.into())
        };
        Ok((
            resolve(&self.credits_endpoint, transport::CREDITS_PATH)?,
            resolve(&self.send_endpoint, transport::SEND_SMS_PATH)?,
        ))
    }

    /// Build a [`GatewayClient`].
    pub fn build(self) -> Result<GatewayClient, BulkSmsError> {
        let (credits_endpoint, send_endpoint) = self.resolve_endpoints()?;

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(user_agent) = self.user_agent {
            builder = builder.user_agent(user_agent);
        }

        let client = builder
            .build()
            .map_err(|err| BulkSmsError::Transport(Box::new(err)))?;

        Ok(GatewayClient {
            credentials: self.credentials,
            testing: self.testing,
            credits_endpoint,
            send_endpoint,
            http: Arc::new(ReqwestTransport { client }),
        })
    }
}

#[derive(Clone)]
/// High-level BulkSMS gateway client.
///
/// Every call performs exactly one HTTP POST and returns once the gateway has
/// answered or the transport has failed. By default it uses:
/// - `http://bulksms.de:5567/eapi/user/get_credits/1/1.1` for the credit balance
/// - `http://bulksms.de:5567/eapi/submission/send_sms/2/2.0` for sending messages
pub struct GatewayClient {
    credentials: Credentials,
    testing: TestingMode,
    credits_endpoint: String,
    send_endpoint: String,
    http: Arc<dyn HttpTransport>,
}

impl fmt::Debug for GatewayClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GatewayClient")
            .field("credentials", &self.credentials)
            .field("testing", &self.testing)
            .field("credits_endpoint", &self.credits_endpoint)
            .field("send_endpoint", &self.send_endpoint)
            .finish_non_exhaustive()
    }
}

impl GatewayClient {
    /// Create a client using the default endpoints.
    ///
    /// For more customization, use [`GatewayClient::builder`].
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            testing: TestingMode::None,
            credits_endpoint: format!("{DEFAULT_BASE_URL}{}", transport::CREDITS_PATH),
            send_endpoint: format!("{DEFAULT_BASE_URL}{}", transport::SEND_SMS_PATH),
            http: Arc::new(ReqwestTransport {
                client: reqwest::Client::new(),
            }),
        }
    }

    /// Start building a client with custom settings.
    pub fn builder(credentials: Credentials) -> GatewayClientBuilder {
        GatewayClientBuilder::new(credentials)
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub fn testing_mode(&self) -> TestingMode {
        self.testing
    }

    /// Change the testing mode for all subsequent calls.
    pub fn set_testing_mode(&mut self, testing: TestingMode) {
        self.testing = testing;
    }

    fn base_params(&self) -> Vec<(String, String)> {
        let mut params = Vec::<(String, String)>::new();
        self.credentials.push_form_params(&mut params);
        if let Some((name, value)) = self.testing.form_param() {
            params.push((name.to_owned(), value.to_owned()));
        }
        params
    }

    async fn post(
        &self,
        endpoint: &str,
        params: Vec<(String, String)>,
    ) -> Result<Vec<u8>, BulkSmsError> {
        debug!(endpoint, testing = ?self.testing, "calling gateway");
        self.http
            .post_form(endpoint, params)
            .await
            .map_err(BulkSmsError::Transport)
    }

    /// Query the account's credit balance.
    ///
    /// Errors:
    /// - [`BulkSmsError::Transport`] when the HTTP exchange fails,
    /// - [`BulkSmsError::Parse`] when the reply is not `status|credits`,
    /// - [`BulkSmsError::Gateway`] when the gateway reports a non-zero status.
    pub async fn get_credits(&self) -> Result<f64, BulkSmsError> {
        let body = self.post(&self.credits_endpoint, self.base_params()).await?;
        match transport::decode_credits_reply(transport::body_text(&body)?)? {
            CreditsReply::Balance(credits) => {
                trace!(credits, "credit balance received");
                Ok(credits)
            }
            CreditsReply::Rejected {
                status_code,
                description,
            } => {
                debug!(%status_code, "credits query rejected");
                Err(GatewayError::new(status_code, description).into())
            }
        }
    }

    /// Submit `message` and record the gateway's answer on it.
    ///
    /// The description, status code and batch id are written into `message`
    /// as each reply field is decoded, so a reply that breaks off halfway
    /// leaves the fields decoded before it in place:
    /// - a non-integer status code leaves the previous state but the new description,
    /// - a non-integer batch id on a rejected message leaves the new status
    ///   code and description and reports [`BulkSmsError::Parse`].
    ///
    /// An accepted message (status `0`) always returns `Ok`; its batch id is
    /// recorded when the third field parses and skipped otherwise.
    ///
    /// A transport failure leaves `message` untouched.
    ///
    /// Errors:
    /// - [`BulkSmsError::Transport`] when the HTTP exchange fails,
    /// - [`BulkSmsError::Parse`] when a reply field is missing or malformed,
    /// - [`BulkSmsError::Gateway`] when the gateway reports a non-zero status.
    pub async fn send(&self, message: &mut Message) -> Result<(), BulkSmsError> {
        let mut params = self.base_params();
        params.extend(transport::encode_send_sms_form(message));

        debug!(
            recipients = message.recipients().len(),
            routing_group = ?message.routing_group(),
            "submitting message"
        );
        let body = self.post(&self.send_endpoint, params).await?;
        let reply = SendSmsReply::decode(transport::body_text(&body)?);

        let description = reply.description()?;
        message.record_description(description.to_owned());

        let status_code = reply.status_code()?;
        message.record_status(status_code);

        if status_code.is_success() {
            // An accepted message is never reported as failed over its batch id.
            match reply.batch_id() {
                Ok(Some(batch_id)) => {
                    trace!(%batch_id, "batch id assigned");
                    message.record_batch_id(batch_id);
                }
                Ok(None) => {}
                Err(err) => debug!(%err, "ignoring malformed batch id on accepted message"),
            }
            return Ok(());
        }

        if let Some(batch_id) = reply.batch_id()? {
            trace!(%batch_id, "batch id assigned");
            message.record_batch_id(batch_id);
        }
        debug!(%status_code, "message rejected");
        Err(GatewayError::new(status_code, description).into())
    }
}
