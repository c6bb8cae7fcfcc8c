//! 访问策略评估
//!
//! 纯函数：将 (会话, 目标记录) 映射为允许/拒绝/过滤决策，无任何副作用。
//! 按操作粒度分为三层，处理器必须依次评估：
//!
//! - **operation**: 粗粒度检查（本操作对该会话是否可能被允许）
//! - **filter**: 查询结果的行级过滤（[`QueryScope`]）
//! - **item**: 针对具体记录的二次检查（update/delete）
//!
//! ## 会话分类
//!
//! | 分类 | 判定 | 权限 |
//! |------|------|------|
//! | 管理类 | `is_admin` 标志或 Admin/Registrar 角色 | 跨记录读写 |
//! | 自助类 | Student 角色 | 仅自己的记录 |
//! | 其他 | 其余已登录会话 (如 Teacher) | 查询结果为空 |
//! | 未登录 | 无会话 | 全部拒绝 |

use crate::auth::CurrentUser;

/// 查询结果的行级过滤
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryScope {
    /// 所有行（管理类会话）
    All,
    /// 仅 id 等于该值的行（自助会话）
    OwnOnly(String),
    /// 空集（其他已登录会话）
    None,
}

/// 是否已登录
pub fn is_signed_in(session: Option<&CurrentUser>) -> bool {
    session.is_some()
}

/// 是否管理类会话
pub fn is_admin_like(session: Option<&CurrentUser>) -> bool {
    session.is_some_and(CurrentUser::is_admin_like)
}

/// 是否自助（学生）会话
pub fn is_student(session: Option<&CurrentUser>) -> bool {
    session.is_some_and(CurrentUser::is_student)
}

// ── User: operation 层 ──────────────────────────────────────────────

/// query: 登录即可（行级过滤见 [`query_scope`]）
pub fn can_query(session: Option<&CurrentUser>) -> bool {
    is_signed_in(session)
}

/// create: 仅管理类会话
pub fn can_create(session: Option<&CurrentUser>) -> bool {
    is_admin_like(session)
}

/// update: 管理类或自助会话（具体记录再经 [`can_update_item`] 检查）
pub fn can_update(session: Option<&CurrentUser>) -> bool {
    is_admin_like(session) || is_student(session)
}

/// delete: 仅管理类会话
pub fn can_delete(session: Option<&CurrentUser>) -> bool {
    is_admin_like(session)
}

// ── User: filter 层 ─────────────────────────────────────────────────

/// 查询结果过滤：管理类看全部，自助只看自己，其余为空
pub fn query_scope(session: Option<&CurrentUser>) -> QueryScope {
    match session {
        Some(s) if s.is_admin_like() => QueryScope::All,
        Some(s) if s.is_student() => QueryScope::OwnOnly(s.id.clone()),
        _ => QueryScope::None,
    }
}

// ── User: item 层 ───────────────────────────────────────────────────

/// update 的记录级检查：管理类，或目标记录 id 等于会话 id
///
/// 自助会话即使通过了 operation 层检查，修改他人记录也必须在这里被拒绝。
pub fn can_update_item(session: Option<&CurrentUser>, item_id: &str) -> bool {
    match session {
        Some(s) => s.is_admin_like() || s.id == item_id,
        None => false,
    }
}

/// delete 的记录级检查：与 operation 层相同，仅管理类
pub fn can_delete_item(session: Option<&CurrentUser>, _item_id: &str) -> bool {
    is_admin_like(session)
}

// ── UserLog ─────────────────────────────────────────────────────────

/// user_log query: 仅 `is_admin` 标志（角色不参与判定）
pub fn can_query_logs(session: Option<&CurrentUser>) -> bool {
    session.is_some_and(|s| s.is_admin)
}

/// user_log create/update/delete: 对任何会话恒为拒绝
///
/// 日志行只由操作钩子在策略层之下写入。
pub fn can_mutate_logs(_session: Option<&CurrentUser>) -> bool {
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::models::UserRole;

    fn session(id: &str, role: UserRole, is_admin: bool) -> CurrentUser {
        CurrentUser {
            id: id.to_string(),
            name: "Test".to_string(),
            email: "test@example.edu".to_string(),
            role,
            is_admin,
        }
    }

    #[test]
    fn test_admin_flag_permits_every_operation() {
        // is_admin 为 true 时角色无关紧要
        let u = session("user:x", UserRole::Student, true);
        let s = Some(&u);
        assert!(can_query(s));
        assert!(can_create(s));
        assert!(can_update(s));
        assert!(can_delete(s));
        assert!(can_update_item(s, "user:someone-else"));
        assert!(can_delete_item(s, "user:someone-else"));
        assert_eq!(query_scope(s), QueryScope::All);
    }

    #[test]
    fn test_admin_like_roles_see_all() {
        for role in [UserRole::Admin, UserRole::Registrar] {
            let u = session("user:a", role, false);
            let s = Some(&u);
            assert!(can_create(s));
            assert!(can_delete(s));
            assert_eq!(query_scope(s), QueryScope::All);
        }
    }

    #[test]
    fn test_student_sees_only_own_row() {
        let u = session("user:stu", UserRole::Student, false);
        let s = Some(&u);
        assert!(can_query(s));
        assert_eq!(query_scope(s), QueryScope::OwnOnly("user:stu".to_string()));
    }

    #[test]
    fn test_student_updates_own_record_only() {
        let u = session("user:stu", UserRole::Student, false);
        let s = Some(&u);
        // operation 层通过
        assert!(can_update(s));
        // item 层：自己的记录可以，他人的必须拒绝
        assert!(can_update_item(s, "user:stu"));
        assert!(!can_update_item(s, "user:other"));
    }

    #[test]
    fn test_student_never_creates_or_deletes() {
        let u = session("user:stu", UserRole::Student, false);
        let s = Some(&u);
        assert!(!can_create(s));
        assert!(!can_delete(s));
        assert!(!can_delete_item(s, "user:stu")); // 连自己的也不行
    }

    #[test]
    fn test_teacher_queries_empty_scope() {
        let u = session("user:t", UserRole::Teacher, false);
        let s = Some(&u);
        assert!(can_query(s)); // 登录即可查询
        assert_eq!(query_scope(s), QueryScope::None); // 但结果为空
        assert!(!can_update(s));
        assert!(!can_update_item(s, "user:t"));
    }

    #[test]
    fn test_signed_out_denied_everything() {
        assert!(!can_query(None));
        assert!(!can_create(None));
        assert!(!can_update(None));
        assert!(!can_delete(None));
        assert!(!can_update_item(None, "user:x"));
        assert!(!can_delete_item(None, "user:x"));
        assert_eq!(query_scope(None), QueryScope::None);
    }

    #[test]
    fn test_log_query_requires_admin_flag_not_role() {
        // Admin 角色但无 is_admin 标志 → 拒绝（与原始语义一致）
        let role_only = session("user:a", UserRole::Admin, false);
        assert!(!can_query_logs(Some(&role_only)));

        let flagged = session("user:b", UserRole::Student, true);
        assert!(can_query_logs(Some(&flagged)));

        assert!(!can_query_logs(None));
    }

    #[test]
    fn test_logs_immutable_for_every_session() {
        let admin = session("user:a", UserRole::Admin, true);
        let student = session("user:s", UserRole::Student, false);
        assert!(!can_mutate_logs(Some(&admin)));
        assert!(!can_mutate_logs(Some(&student)));
        assert!(!can_mutate_logs(None));
    }
}
