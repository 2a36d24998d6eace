use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use time::{OffsetDateTime, UtcOffset, format_description::FormatItem, macros::format_description};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
    #[serde(skip)]
    pub created_at: Option<OffsetDateTime>,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
            created_at: None,
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
            created_at: Some(OffsetDateTime::now_utc()),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
            created_at: Some(OffsetDateTime::now_utc()),
        }
    }
}

const MESSAGE_TIME_FORMAT: &[FormatItem<'static>] =
    format_description!("[hour repr:12 padding:zero]:[minute padding:zero] [period case:upper]");

static LOCAL_OFFSET: OnceCell<UtcOffset> = OnceCell::new();

/// Record the local UTC offset. On Unix the offset can only be read while the
/// process is single-threaded, so call this before starting the runtime.
pub fn capture_local_offset() -> Option<UtcOffset> {
    if let Some(offset) = LOCAL_OFFSET.get() {
        return Some(*offset);
    }
    let offset = UtcOffset::current_local_offset().ok()?;
    Some(*LOCAL_OFFSET.get_or_init(|| offset))
}

/// Renders `hh:mm AM/PM` in the captured local offset, or UTC when none is known.
pub fn format_timestamp(timestamp: Option<OffsetDateTime>) -> Option<String> {
    let mut datetime = timestamp?;
    if let Some(offset) = capture_local_offset() {
        datetime = datetime.to_offset(offset);
    }
    datetime.format(MESSAGE_TIME_FORMAT).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn serializes_role_lowercase_without_timestamp() {
        let msg = ChatMessage::user("hello");
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json, serde_json::json!({"role": "user", "content": "hello"}));
    }

    #[test]
    fn formats_missing_timestamp_as_none() {
        assert_eq!(format_timestamp(None), None);
    }

    #[test]
    fn captured_offset_is_stable() {
        let first = capture_local_offset();
        if first.is_some() {
            assert_eq!(capture_local_offset(), first);
        }
    }

    #[test]
    fn formats_twelve_hour_clock() {
        let formatted = format_timestamp(Some(datetime!(2024-05-01 13:07 UTC))).unwrap();
        assert!(formatted.ends_with("AM") || formatted.ends_with("PM"));
        assert_eq!(formatted.len(), "01:07 PM".len());
    }
}
