//! HTTP client for the account backend.
//!
//! Every call is a single attempt; retries are left to the user.

use std::time::Duration;

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::{FlowError, FlowResult};
use crate::store::StoredUser;

const VERIFY_OTP_PATH: &str = "/user/verifyOTP";
const RESEND_OTP_PATH: &str = "/user/resendOTPVerificationCode";
const SIGN_IN_PATH: &str = "/user/signin";

const STATUS_VERIFIED: &str = "VERIFIED";
const STATUS_SUCCESS: &str = "SUCCESS";

#[derive(Debug, Clone)]
pub struct BackendClient {
    http: reqwest::Client,
    base_url: String,
}

/// Result of a successful password sign-in.
#[derive(Debug, Clone, PartialEq)]
pub struct SignIn {
    pub message: String,
    pub user: StoredUser,
}

impl BackendClient {
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(&config.api_base_url(), config.request_timeout())
    }

    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self> {
        url::Url::parse(base_url).with_context(|| format!("Invalid backend URL: {base_url}"))?;

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().context("Failed to build HTTP client")?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Submits an OTP. `Ok(())` means the backend answered `VERIFIED`.
    pub async fn verify_otp(&self, user_id: &str, otp: &str) -> FlowResult<()> {
        let request = VerifyOtpRequest { user_id, otp };
        let response: StatusResponse = self.post_json(VERIFY_OTP_PATH, &request).await?;

        if response.status == STATUS_VERIFIED {
            debug!(user_id, "otp verified");
            Ok(())
        } else {
            debug!(user_id, status = %response.status, "otp rejected");
            Err(FlowError::application(
                response
                    .message
                    .unwrap_or_else(|| "Verification failed".to_string()),
            ))
        }
    }

    /// Asks the backend to email a fresh code. Any 2xx counts as sent.
    pub async fn resend_otp(&self, email: &str, user_id: &str) -> FlowResult<()> {
        let request = ResendOtpRequest { email, user_id };
        let response = self.send(RESEND_OTP_PATH, &request).await?;
        let status = response.status();
        if status.is_success() {
            debug!(user_id, "verification code resent");
            Ok(())
        } else {
            warn!(user_id, status = status.as_u16(), "resend rejected");
            Err(FlowError::http_status(status.as_u16()))
        }
    }

    pub async fn sign_in(&self, email: &str, password: &str) -> FlowResult<SignIn> {
        let request = SignInRequest { email, password };
        let response: SignInResponse = self.post_json(SIGN_IN_PATH, &request).await?;

        let message = response.message.unwrap_or_default();
        if response.status != STATUS_SUCCESS {
            return Err(FlowError::application(if message.is_empty() {
                response.status
            } else {
                message
            }));
        }

        let user = response
            .data
            .into_iter()
            .next()
            .ok_or_else(|| FlowError::application("Sign-in response did not include a user"))?;
        let user = serde_json::from_value(user)
            .map_err(|e| FlowError::application(format!("Unexpected user record: {e}")))?;

        Ok(SignIn { message, user })
    }

    async fn send<B: Serialize>(&self, path: &str, body: &B) -> FlowResult<reqwest::Response> {
        let url = format!("{}{}", self.base_url, path);
        debug!(%url, "POST");
        self.http
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| {
                warn!(%url, error = %e, "request failed");
                FlowError::from_transport(&e)
            })
    }

    /// Posts JSON and decodes a `{status, message}`-style body.
    ///
    /// Non-2xx responses still yield an application error when the body
    /// carries a message; otherwise they map to a network error.
    async fn post_json<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> FlowResult<T> {
        let response = self.send(path, body).await?;
        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| FlowError::from_transport(&e))?;

        if !status.is_success() {
            let message = serde_json::from_slice::<StatusResponse>(&bytes)
                .ok()
                .and_then(|body| body.message)
                .filter(|message| !message.trim().is_empty());
            return Err(match message {
                Some(message) => FlowError::application(message),
                None => FlowError::http_status(status.as_u16()),
            });
        }

        serde_json::from_slice(&bytes)
            .map_err(|e| FlowError::Network(format!("Failed to decode response: {e}")))
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct VerifyOtpRequest<'a> {
    user_id: &'a str,
    otp: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ResendOtpRequest<'a> {
    email: &'a str,
    user_id: &'a str,
}

#[derive(Debug, Serialize)]
struct SignInRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Deserialize)]
struct StatusResponse {
    #[serde(default)]
    status: String,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SignInResponse {
    #[serde(default)]
    status: String,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    data: Vec<serde_json::Value>,
}
