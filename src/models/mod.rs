pub mod meeting;

pub use meeting::{
    get_default_meeting_details, validate_meeting_details, validate_zoom_config, JoinCredentials,
    MeetingDetails, Role, SignedMeeting, ZoomClientConfig,
};
