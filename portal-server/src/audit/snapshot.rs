//! 审计快照序列化
//!
//! 将变更前后的用户记录序列化为 JSON 快照，剥离敏感字段。

use serde::Serialize;
use serde_json::{Value, json};

/// 快照中剥离的字段
///
/// `hash_pass` 在模型上已标记 skip_serializing；这里再过滤一次，
/// 保证任意输入（包括测试替身）都不会把哈希写进日志。
const EXCLUDE_FIELDS: &[&str] = &["hash_pass"];

/// 序列化一份审计快照
pub fn snapshot<T: Serialize>(value: &T) -> Value {
    match serde_json::to_value(value) {
        Ok(mut json) => {
            if let Value::Object(obj) = &mut json {
                for field in EXCLUDE_FIELDS {
                    obj.remove(*field);
                }
            }
            json
        }
        Err(e) => {
            tracing::error!("Failed to serialize audit snapshot: {:?}", e);
            json!({"error": "serialization_failed"})
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;

    #[derive(Serialize)]
    struct TestUser {
        id: String,
        name: String,
        email: String,
        hash_pass: String,
    }

    #[test]
    fn test_snapshot_strips_password_hash() {
        let user = TestUser {
            id: "user:1".to_string(),
            name: "Jane".to_string(),
            email: "jane@example.edu".to_string(),
            hash_pass: "$argon2$secret".to_string(),
        };

        let snap = snapshot(&user);
        let obj = snap.as_object().unwrap();

        assert!(obj.contains_key("name"));
        assert!(obj.contains_key("email"));
        assert!(!obj.contains_key("hash_pass"));
    }

    #[test]
    fn test_snapshot_keeps_record_id() {
        let user = TestUser {
            id: "user:1".to_string(),
            name: "Jane".to_string(),
            email: "jane@example.edu".to_string(),
            hash_pass: String::new(),
        };

        // 快照保留 id，便于核对日志行指向的记录
        assert_eq!(snapshot(&user)["id"], "user:1");
    }
}
