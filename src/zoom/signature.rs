use std::fmt;

use base64::{engine::general_purpose::STANDARD, Engine};
use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::config::{Config, ConfigError};
use crate::error::{AppError, Result, ValidationError};
use crate::models::{JoinCredentials, MeetingDetails, Role, SignedMeeting};
use crate::security::ct_eq;

type HmacSha256 = Hmac<Sha256>;

/// Issues Meeting SDK join signatures.
///
/// The HMAC key is set up once in the constructor and cloned per call, so
/// signing itself never fails.
#[derive(Clone)]
pub struct SignatureGenerator {
    api_key: String,
    mac: HmacSha256,
    clock_skew_seconds: i64,
    max_age_seconds: i64,
}

impl fmt::Debug for SignatureGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignatureGenerator")
            .field("api_key", &self.api_key)
            .field("api_secret", &"[REDACTED]")
            .field("clock_skew_seconds", &self.clock_skew_seconds)
            .field("max_age_seconds", &self.max_age_seconds)
            .finish()
    }
}

impl SignatureGenerator {
    /// Build a generator with the default skew and signature lifetime.
    pub fn new(api_key: &str, api_secret: &str) -> std::result::Result<Self, ConfigError> {
        let api_key = api_key.trim();
        if api_key.is_empty() {
            return Err(ConfigError::InvalidCredential("API key is empty"));
        }
        if api_secret.trim().is_empty() {
            return Err(ConfigError::InvalidCredential("API secret is empty"));
        }

        let mac = HmacSha256::new_from_slice(api_secret.as_bytes())
            .map_err(|_| ConfigError::InvalidCredential("API secret rejected as HMAC key"))?;

        Ok(Self {
            api_key: api_key.to_string(),
            mac,
            clock_skew_seconds: crate::config::DEFAULT_CLOCK_SKEW_SECONDS,
            max_age_seconds: crate::config::DEFAULT_MAX_SIGNATURE_AGE_SECONDS,
        })
    }

    pub fn from_config(config: &Config) -> std::result::Result<Self, ConfigError> {
        Ok(Self::new(&config.zoom_api_key, &config.zoom_api_secret)?
            .with_clock_skew(config.clock_skew_seconds)
            .with_max_age(config.max_signature_age_seconds))
    }

    pub fn with_clock_skew(mut self, seconds: i64) -> Self {
        self.clock_skew_seconds = seconds;
        self
    }

    pub fn with_max_age(mut self, seconds: i64) -> Self {
        self.max_age_seconds = seconds;
        self
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// base64(HMAC-SHA256(secret, base64(key + meeting + timestamp + role)))
    fn hash(&self, meeting_number: &str, role: i64, timestamp: i64) -> String {
        let payload = STANDARD.encode(format!(
            "{}{}{}{}",
            self.api_key, meeting_number, timestamp, role
        ));

        let mut mac = self.mac.clone();
        mac.update(payload.as_bytes());
        STANDARD.encode(mac.finalize().into_bytes())
    }

    /// Produce the token the client SDK expects:
    /// base64("key.meeting.timestamp.role.hash").
    pub fn generate_signature(&self, meeting_number: &str, role: Role, timestamp: i64) -> String {
        let role = role.as_i64();
        let hash = self.hash(meeting_number, role, timestamp);

        STANDARD.encode(format!(
            "{}.{}.{}.{}.{}",
            self.api_key, meeting_number, timestamp, role, hash
        ))
    }

    /// Sign for `details` using the current time.
    pub async fn initialize_meeting(&self, details: &MeetingDetails) -> Result<JoinCredentials> {
        self.initialize_meeting_at(details, Utc::now())
    }

    /// Sign for `details` as of `now`, backdated by the configured skew.
    pub fn initialize_meeting_at(
        &self,
        details: &MeetingDetails,
        now: DateTime<Utc>,
    ) -> Result<JoinCredentials> {
        if details.meeting_number.trim().is_empty() {
            return Err(ValidationError::MissingMeetingNumber.into());
        }
        let role = details.resolved_role()?;
        let timestamp = now.timestamp().saturating_sub(self.clock_skew_seconds);

        let signature = self.generate_signature(&details.meeting_number, role, timestamp);

        tracing::info!(
            meeting_number = %details.meeting_number,
            role = ?role,
            timestamp,
            "Meeting signature issued"
        );

        Ok(JoinCredentials {
            user_name: details.user_name.clone(),
            user_email: details.user_email.clone(),
            signature,
            api_key: self.api_key.clone(),
        })
    }

    /// Check a signature issued with this key pair and recover its fields.
    ///
    /// Fields are split from the right, so meeting numbers containing `.`
    /// are recovered intact.
    pub fn verify_signature(&self, signature: &str, now: DateTime<Utc>) -> Result<SignedMeeting> {
        let decoded = STANDARD.decode(signature.trim())?;
        let text = String::from_utf8(decoded)
            .map_err(|_| AppError::Unauthorized("Malformed signature".to_string()))?;

        let rest = text
            .strip_prefix(self.api_key.as_str())
            .and_then(|r| r.strip_prefix('.'))
            .ok_or_else(|| {
                AppError::Unauthorized("Signature was issued for a different API key".to_string())
            })?;

        let mut parts = rest.rsplitn(4, '.');
        let (hash, role, timestamp, meeting_number) =
            match (parts.next(), parts.next(), parts.next(), parts.next()) {
                (Some(h), Some(r), Some(t), Some(m)) if !m.is_empty() => (h, r, t, m),
                _ => return Err(AppError::Unauthorized("Malformed signature".to_string())),
            };

        let role = role
            .parse::<i64>()
            .ok()
            .and_then(|r| Role::try_from(r).ok())
            .ok_or_else(|| AppError::Unauthorized("Malformed signature role".to_string()))?;
        let timestamp: i64 = timestamp
            .parse()
            .map_err(|_| AppError::Unauthorized("Malformed signature timestamp".to_string()))?;

        let expected = self.hash(meeting_number, role.as_i64(), timestamp);
        if !ct_eq(hash, &expected) {
            tracing::warn!(meeting_number = %meeting_number, "Signature hash mismatch");
            return Err(AppError::Unauthorized("Invalid signature".to_string()));
        }

        let now = now.timestamp();
        if now.saturating_sub(timestamp) > self.max_age_seconds {
            return Err(AppError::Unauthorized("Signature expired".to_string()));
        }
        if timestamp.saturating_sub(now) > self.clock_skew_seconds {
            return Err(AppError::Unauthorized(
                "Signature timestamp is in the future".to_string(),
            ));
        }

        Ok(SignedMeeting {
            meeting_number: meeting_number.to_string(),
            role,
            timestamp,
        })
    }
}
