//! User Model

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use shared::client::UserInfo;
use surrealdb::RecordId;

/// User ID type
pub type UserId = RecordId;

/// User role
///
/// Admin 与 Registrar 为管理类角色（跨记录权限），Student 仅能操作
/// 自己的记录，Teacher 登录后仅能查询到空集。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Admin,
    Registrar,
    Teacher,
    #[default]
    Student,
}

impl UserRole {
    /// 管理类角色：拥有跨记录权限
    pub fn is_admin_like(&self) -> bool {
        matches!(self, UserRole::Admin | UserRole::Registrar)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Admin => "admin",
            UserRole::Registrar => "registrar",
            UserRole::Teacher => "teacher",
            UserRole::Student => "student",
        }
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(UserRole::Admin),
            "registrar" => Ok(UserRole::Registrar),
            "teacher" => Ok(UserRole::Teacher),
            "student" => Ok(UserRole::Student),
            other => Err(format!("unknown role: {other}")),
        }
    }
}

/// User model matching the SurrealDB schema
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<UserId>,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub hash_pass: String,
    #[serde(default)]
    pub role: UserRole,
    #[serde(default, deserialize_with = "serde_helpers::bool_false")]
    pub is_admin: bool,
    #[serde(default, deserialize_with = "serde_helpers::bool_false")]
    pub is_active: bool,
    #[serde(default)]
    pub created_at: i64,
    #[serde(default)]
    pub last_login_date: i64,
}

/// Create user payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserCreate {
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub role: Option<UserRole>,
    #[serde(default)]
    pub is_admin: Option<bool>,
    #[serde(default)]
    pub is_active: Option<bool>,
}

/// Update user payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<UserRole>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_admin: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

impl UserUpdate {
    /// 是否触碰了仅管理类会话可修改的字段
    pub fn touches_privileged_fields(&self) -> bool {
        self.role.is_some() || self.is_admin.is_some() || self.is_active.is_some()
    }
}

impl User {
    /// Verify password using argon2
    pub fn verify_password(&self, password: &str) -> Result<bool, argon2::password_hash::Error> {
        use argon2::{
            Argon2,
            password_hash::{PasswordHash, PasswordVerifier},
        };

        let parsed_hash = PasswordHash::new(&self.hash_pass)?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }

    /// Hash password using argon2
    pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
        use argon2::{
            Argon2,
            password_hash::{PasswordHasher, SaltString, rand_core::OsRng},
        };

        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();
        let password_hash = argon2.hash_password(password.as_bytes(), &salt)?;
        Ok(password_hash.to_string())
    }

    /// Record id as "user:xxx" string (empty if not yet persisted)
    pub fn id_string(&self) -> String {
        self.id.as_ref().map(|t| t.to_string()).unwrap_or_default()
    }

    /// API payload (never carries the password hash)
    pub fn to_info(&self) -> UserInfo {
        UserInfo {
            id: self.id_string(),
            name: self.name.clone(),
            email: self.email.clone(),
            role: self.role.to_string(),
            is_admin: self.is_admin,
            is_active: self.is_active,
            created_at: self.created_at,
            last_login_date: self.last_login_date,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trip() {
        for role in [
            UserRole::Admin,
            UserRole::Registrar,
            UserRole::Teacher,
            UserRole::Student,
        ] {
            let parsed: UserRole = role.as_str().parse().unwrap();
            assert_eq!(parsed, role);
        }
        assert!("principal".parse::<UserRole>().is_err());
    }

    #[test]
    fn test_admin_like_roles() {
        assert!(UserRole::Admin.is_admin_like());
        assert!(UserRole::Registrar.is_admin_like());
        assert!(!UserRole::Teacher.is_admin_like());
        assert!(!UserRole::Student.is_admin_like());
    }

    #[test]
    fn test_serialized_user_has_no_password_hash() {
        let user = User {
            id: None,
            name: "Jane".to_string(),
            email: "jane@example.edu".to_string(),
            hash_pass: "$argon2$secret".to_string(),
            role: UserRole::Student,
            is_admin: false,
            is_active: true,
            created_at: 0,
            last_login_date: 0,
        };
        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("hash_pass").is_none());
        assert_eq!(json["email"], "jane@example.edu");
    }
}
