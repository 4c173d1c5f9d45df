use mongodb::bson::{oid::ObjectId, DateTime as BsonDateTime, Document};
use serde::{Deserialize, Serialize};

/// Binary account status. An absent `status` field on a stored document
/// is treated as active.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum AccountStatus {
    Active,
    Blocked,
}

impl AccountStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountStatus::Active => "active",
            AccountStatus::Blocked => "blocked",
        }
    }
}

/// Account document as stored in the `users` collection.
///
/// The collection is schemaless: clients may register with any extra
/// fields, which land in `extra` and are persisted verbatim alongside
/// the typed core.
#[derive(Debug, Serialize, Deserialize, Clone, utoipa::ToSchema)]
pub struct Account {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>)]
    pub id: Option<ObjectId>,
    pub email: String,
    // Stored verbatim as supplied at registration. Known weakness,
    // kept for round-trip fidelity with existing fixtures.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<AccountStatus>,
    #[serde(rename = "lastLogin", skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>)]
    pub last_login: Option<BsonDateTime>,
    #[serde(flatten)]
    #[schema(value_type = Object)]
    pub extra: Document,
}

impl Account {
    pub fn is_blocked(&self) -> bool {
        self.status == Some(AccountStatus::Blocked)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_serializes_lowercase() {
        let active = serde_json::to_value(AccountStatus::Active).unwrap();
        let blocked = serde_json::to_value(AccountStatus::Blocked).unwrap();
        assert_eq!(active, "active");
        assert_eq!(blocked, "blocked");
    }

    #[test]
    fn missing_status_means_active() {
        let account: Account = serde_json::from_value(serde_json::json!({
            "email": "a@x.com",
            "password": "p"
        }))
        .unwrap();
        assert!(account.status.is_none());
        assert!(!account.is_blocked());
    }

    #[test]
    fn extra_fields_survive_a_round_trip() {
        let account: Account = serde_json::from_value(serde_json::json!({
            "email": "a@x.com",
            "password": "p",
            "name": "A",
            "role": "admin",
            "age": 30
        }))
        .unwrap();

        assert_eq!(account.email, "a@x.com");
        assert_eq!(account.extra.get_str("role").unwrap(), "admin");

        let value = serde_json::to_value(&account).unwrap();
        assert_eq!(value["role"], "admin");
        assert_eq!(value["age"], 30);
        // Absent optional fields stay absent on the wire
        assert!(value.get("_id").is_none());
        assert!(value.get("status").is_none());
        assert!(value.get("lastLogin").is_none());
    }

    #[test]
    fn blocked_status_round_trips() {
        let account: Account = serde_json::from_value(serde_json::json!({
            "email": "b@x.com",
            "status": "blocked"
        }))
        .unwrap();
        assert!(account.is_blocked());
        let value = serde_json::to_value(&account).unwrap();
        assert_eq!(value["status"], "blocked");
    }
}
