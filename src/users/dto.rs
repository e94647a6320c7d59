use serde::{Deserialize, Serialize};

use super::repo::User;
use crate::assignments::service::AssignmentFailure;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Full-record payload shared by signup and profile update.
#[derive(Debug, Deserialize)]
pub struct UserPayload {
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
}

/// Signup response: the stored user plus the outcome of the catalog
/// bulk-assignment that follows user creation.
#[derive(Debug, Serialize)]
pub struct SignupResponse {
    #[serde(flatten)]
    pub user: User,
    pub assigned_products: usize,
    pub assignment_failures: Vec<AssignmentFailure>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_tolerates_missing_optional_fields() {
        let payload: UserPayload =
            serde_json::from_str(r#"{"username": "marc", "password": "hunter2"}"#).unwrap();
        assert_eq!(payload.username, "marc");
        assert!(payload.email.is_none());
        assert!(payload.address.is_none());
    }

    #[test]
    fn signup_response_flattens_user_fields() {
        let user = User {
            id: "client1".into(),
            username: "marc".into(),
            password: "hunter2".into(),
            role: "client".into(),
            email: None,
            name: Some("Marc".into()),
            phone: None,
            address: None,
            created_at: time::OffsetDateTime::UNIX_EPOCH,
        };
        let json = serde_json::to_value(SignupResponse {
            user,
            assigned_products: 3,
            assignment_failures: vec![],
        })
        .unwrap();
        assert_eq!(json["id"], "client1");
        assert_eq!(json["assigned_products"], 3);
    }
}
