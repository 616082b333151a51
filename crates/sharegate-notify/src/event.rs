//! The change event delivered to subscribers.

use serde::{Deserialize, Serialize};

use sharegate_core::FileId;

/// An event published to every live subscriber after a committed grant
/// mutation.
///
/// The JSON shape is the only wire contract this core defines:
///
/// ```json
/// { "type": "permission_update", "fileId": 42 }
/// ```
///
/// No other fields are guaranteed, and no ordering between events for
/// different files is guaranteed. The enum is internally tagged so further
/// event kinds can be added without breaking consumers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChangeEvent {
    /// Sharing state of a file changed: a grant was created, updated, or
    /// revoked. Consumers re-fetch to learn the details.
    PermissionUpdate {
        #[serde(rename = "fileId")]
        file_id: FileId,
    },
}

impl ChangeEvent {
    /// The event for a permission change on `file_id`.
    pub fn permission_update(file_id: FileId) -> Self {
        Self::PermissionUpdate { file_id }
    }

    /// The file this event concerns.
    pub fn file_id(&self) -> FileId {
        match self {
            Self::PermissionUpdate { file_id } => *file_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_shape() {
        let event = ChangeEvent::permission_update(FileId::new(42));
        let value = serde_json::to_value(event).unwrap();

        assert_eq!(
            value,
            serde_json::json!({ "type": "permission_update", "fileId": 42 })
        );
    }

    #[test]
    fn test_wire_roundtrip() {
        let json = r#"{"type":"permission_update","fileId":7}"#;
        let event: ChangeEvent = serde_json::from_str(json).unwrap();
        assert_eq!(event.file_id(), FileId::new(7));
    }
}
