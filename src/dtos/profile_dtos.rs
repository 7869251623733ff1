use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::user::User;

#[derive(Debug, Serialize, Deserialize)]
pub struct ProfileOut {
    pub ok: bool,
    pub profile: User,
}

/// Profile update payload. Every field is optional and applied on its own;
/// empty strings count as absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileIn {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_id: Option<Uuid>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateProfileOut {
    pub ok: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn avatar_id_travels_camel_cased() {
        let id = Uuid::new_v4();
        let update = UpdateProfileIn {
            name: Some("yena".into()),
            avatar_id: Some(id),
            ..Default::default()
        };

        let value = serde_json::to_value(&update).unwrap();
        assert_eq!(value["avatarId"], serde_json::json!(id));
        assert_eq!(value["name"], "yena");
        // omitted fields are omitted on the wire, not sent as null
        assert!(value.get("email").is_none());
        assert!(value.get("phone").is_none());
    }

    #[test]
    fn update_out_hides_absent_error() {
        let ok = serde_json::to_value(UpdateProfileOut { ok: true, error: None }).unwrap();
        assert_eq!(ok, serde_json::json!({"ok": true}));

        let failed: UpdateProfileOut =
            serde_json::from_value(serde_json::json!({"ok": false, "error": "Email is already in use."}))
                .unwrap();
        assert_eq!(failed.error.as_deref(), Some("Email is already in use."));
    }
}
