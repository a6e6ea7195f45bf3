use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Join privilege level understood by the meeting SDK.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum Role {
    Attendee,
    Host,
}

impl Role {
    pub fn as_i64(self) -> i64 {
        match self {
            Role::Attendee => 0,
            Role::Host => 1,
        }
    }
}

impl TryFrom<i64> for Role {
    type Error = ValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Role::Attendee),
            1 => Ok(Role::Host),
            other => Err(ValidationError::InvalidRole(other)),
        }
    }
}

impl From<Role> for i64 {
    fn from(role: Role) -> Self {
        role.as_i64()
    }
}

/// What the front-end sends for each join attempt.
///
/// `role` stays a raw integer so out-of-range values reach validation
/// instead of failing deserialization. An empty `password` means the
/// meeting has no passcode.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MeetingDetails {
    pub meeting_number: String,
    pub user_name: String,
    pub user_email: String,
    pub password: String,
    pub role: i64,
}

impl MeetingDetails {
    pub fn resolved_role(&self) -> Result<Role, ValidationError> {
        Role::try_from(self.role)
    }
}

/// Blank form state used by the join page.
pub fn get_default_meeting_details() -> MeetingDetails {
    MeetingDetails::default()
}

/// Stops at the first failing field: meeting number, user name, user email, role.
pub fn validate_meeting_details(details: &MeetingDetails) -> Result<(), ValidationError> {
    if details.meeting_number.trim().is_empty() {
        return Err(ValidationError::MissingMeetingNumber);
    }
    if details.user_name.trim().is_empty() {
        return Err(ValidationError::MissingUserName);
    }
    if details.user_email.trim().is_empty() {
        return Err(ValidationError::MissingUserEmail);
    }
    details.resolved_role()?;
    Ok(())
}

/// Bundle handed verbatim to the client SDK.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinCredentials {
    pub user_name: String,
    pub user_email: String,
    pub signature: String,
    pub api_key: String,
}

/// Fields recovered from a signature that passed verification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignedMeeting {
    pub meeting_number: String,
    pub role: Role,
    pub timestamp: i64,
}

/// Full SDK init config as assembled by the client. Every field may be absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ZoomClientConfig {
    pub meeting_number: Option<String>,
    pub user_name: Option<String>,
    pub user_email: Option<String>,
    pub role: Option<i64>,
    pub signature: Option<String>,
    pub api_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl ZoomClientConfig {
    pub fn assemble(details: &MeetingDetails, credentials: &JoinCredentials) -> Self {
        Self {
            meeting_number: Some(details.meeting_number.clone()),
            user_name: Some(credentials.user_name.clone()),
            user_email: Some(credentials.user_email.clone()),
            role: Some(details.role),
            signature: Some(credentials.signature.clone()),
            api_key: Some(credentials.api_key.clone()),
            password: Some(details.password.clone()).filter(|p| !p.is_empty()),
        }
    }
}

fn present(field: &Option<String>) -> bool {
    field.as_deref().is_some_and(|v| !v.is_empty())
}

/// True when every field the SDK needs is present. Attendee (`0`) is a
/// present role.
pub fn validate_zoom_config(config: &ZoomClientConfig) -> bool {
    let role_present = config
        .role
        .is_some_and(|role| Role::try_from(role).is_ok());

    present(&config.meeting_number)
        && present(&config.user_name)
        && present(&config.user_email)
        && role_present
        && present(&config.signature)
        && present(&config.api_key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn details() -> MeetingDetails {
        MeetingDetails {
            meeting_number: "123456789".to_string(),
            user_name: "Ada".to_string(),
            user_email: "ada@example.com".to_string(),
            password: String::new(),
            role: 0,
        }
    }

    fn full_config() -> ZoomClientConfig {
        ZoomClientConfig {
            meeting_number: Some("123456789".to_string()),
            user_name: Some("Ada".to_string()),
            user_email: Some("ada@example.com".to_string()),
            role: Some(0),
            signature: Some("c2ln".to_string()),
            api_key: Some("AK".to_string()),
            password: None,
        }
    }

    #[test]
    fn test_default_meeting_details_exact() {
        let defaults = get_default_meeting_details();
        assert_eq!(
            serde_json::to_value(&defaults).unwrap(),
            serde_json::json!({
                "meetingNumber": "",
                "userName": "",
                "userEmail": "",
                "password": "",
                "role": 0
            })
        );
    }

    #[test]
    fn test_valid_details_pass() {
        assert_eq!(validate_meeting_details(&details()), Ok(()));
    }

    #[test]
    fn test_missing_meeting_number() {
        let mut d = details();
        d.meeting_number = String::new();
        assert_eq!(
            validate_meeting_details(&d),
            Err(ValidationError::MissingMeetingNumber)
        );
    }

    #[test]
    fn test_missing_user_name() {
        let mut d = details();
        d.user_name = String::new();
        assert_eq!(
            validate_meeting_details(&d),
            Err(ValidationError::MissingUserName)
        );

        d.user_name = "  ".to_string();
        assert_eq!(
            validate_meeting_details(&d),
            Err(ValidationError::MissingUserName)
        );
    }

    #[test]
    fn test_missing_user_email() {
        let mut d = details();
        d.user_email = String::new();
        assert_eq!(
            validate_meeting_details(&d),
            Err(ValidationError::MissingUserEmail)
        );
    }

    #[test]
    fn test_invalid_role() {
        let mut d = details();
        d.role = 2;
        assert_eq!(
            validate_meeting_details(&d),
            Err(ValidationError::InvalidRole(2))
        );
    }

    #[test]
    fn test_reports_first_violation_only() {
        let d = MeetingDetails {
            role: 7,
            ..MeetingDetails::default()
        };
        assert_eq!(
            validate_meeting_details(&d),
            Err(ValidationError::MissingMeetingNumber)
        );
    }

    #[test]
    fn test_details_deserialize_with_missing_fields() {
        let d: MeetingDetails =
            serde_json::from_str(r#"{"meetingNumber":"42","role":1}"#).unwrap();
        assert_eq!(d.meeting_number, "42");
        assert_eq!(d.user_name, "");
        assert_eq!(d.resolved_role(), Ok(Role::Host));
    }

    #[test]
    fn test_role_serializes_as_integer() {
        assert_eq!(serde_json::to_string(&Role::Host).unwrap(), "1");
        let role: Role = serde_json::from_str("0").unwrap();
        assert_eq!(role, Role::Attendee);
        assert!(serde_json::from_str::<Role>("3").is_err());
    }

    #[test]
    fn test_zoom_config_attendee_role_counts_as_present() {
        assert!(validate_zoom_config(&full_config()));
    }

    #[test]
    fn test_zoom_config_host_role() {
        let mut config = full_config();
        config.role = Some(1);
        assert!(validate_zoom_config(&config));
    }

    #[test]
    fn test_zoom_config_missing_meeting_number() {
        let mut config = full_config();
        config.meeting_number = None;
        assert!(!validate_zoom_config(&config));
    }

    #[test]
    fn test_zoom_config_missing_user_name() {
        let mut config = full_config();
        config.user_name = Some(String::new());
        assert!(!validate_zoom_config(&config));
    }

    #[test]
    fn test_zoom_config_missing_user_email() {
        let mut config = full_config();
        config.user_email = None;
        assert!(!validate_zoom_config(&config));
    }

    #[test]
    fn test_zoom_config_missing_role() {
        let mut config = full_config();
        config.role = None;
        assert!(!validate_zoom_config(&config));
    }

    #[test]
    fn test_zoom_config_missing_signature() {
        let mut config = full_config();
        config.signature = None;
        assert!(!validate_zoom_config(&config));
    }

    #[test]
    fn test_zoom_config_missing_api_key() {
        let mut config = full_config();
        config.api_key = Some(String::new());
        assert!(!validate_zoom_config(&config));
    }

    #[test]
    fn test_zoom_config_password_optional() {
        let mut config = full_config();
        config.password = Some("secret".to_string());
        assert!(validate_zoom_config(&config));
    }

    #[test]
    fn test_assemble_is_valid() {
        let credentials = JoinCredentials {
            user_name: "Ada".to_string(),
            user_email: "ada@example.com".to_string(),
            signature: "c2ln".to_string(),
            api_key: "AK".to_string(),
        };
        let config = ZoomClientConfig::assemble(&details(), &credentials);

        assert!(validate_zoom_config(&config));
        assert_eq!(config.password, None);
        assert_eq!(config.role, Some(0));
    }
}
