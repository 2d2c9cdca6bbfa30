use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

// =========================================================
// 会话 (Session)
// =========================================================

/// 后端返回的用户资料（`{ user, token }` 中的 `user`）
///
/// 后端可能附带其他字段（如密码哈希），这里只保留需要的部分。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct UserProfile {
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub role: String,
}

/// `/login` 与 `/register` 的成功响应
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub user: UserProfile,
    #[serde(default)]
    pub token: String,
}

/// 已认证的用户
///
/// 令牌为空的会话等同于未登录。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub token: String,
}

impl Session {
    pub fn has_token(&self) -> bool {
        !self.token.is_empty()
    }
}

impl From<AuthResponse> for Session {
    fn from(resp: AuthResponse) -> Self {
        let UserProfile {
            id,
            email,
            name,
            role,
        } = resp.user;
        Self {
            id,
            email,
            name,
            role,
            token: resp.token,
        }
    }
}

// =========================================================
// 部门 (Department)
// =========================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Department {
    #[serde(rename = "_id")]
    pub id: String,
    pub dept_name: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "createdAt", default)]
    pub created_at: String,
}

impl Department {
    /// 解析创建时间（RFC 3339），无法解析时返回 `None`
    pub fn created_at_parsed(&self) -> Option<DateTime<FixedOffset>> {
        DateTime::parse_from_rfc3339(&self.created_at).ok()
    }

    /// 列表卡片中显示的日期
    pub fn created_date(&self) -> String {
        self.created_at_parsed()
            .map(|dt| dt.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| self.created_at.clone())
    }

    /// 详情弹窗中显示的完整时间
    pub fn created_timestamp(&self) -> String {
        self.created_at_parsed()
            .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_else(|| self.created_at.clone())
    }
}

/// `/departments` 的响应：`{ departments: [...] }` 或直接返回数组
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DepartmentList {
    Wrapped { departments: Vec<Department> },
    Bare(Vec<Department>),
}

impl DepartmentList {
    pub fn into_vec(self) -> Vec<Department> {
        match self {
            DepartmentList::Wrapped { departments } => departments,
            DepartmentList::Bare(departments) => departments,
        }
    }
}

/// `/department/{id}` 的响应：`{ department }` 或直接返回记录
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DepartmentDetail {
    Wrapped { department: Department },
    Bare(Department),
}

impl DepartmentDetail {
    pub fn into_department(self) -> Department {
        match self {
            DepartmentDetail::Wrapped { department } => department,
            DepartmentDetail::Bare(department) => department,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEPT: &str = r#"{"_id":"d1","dept_name":"Finance","description":"Money matters","createdAt":"2024-03-05T10:20:30.000Z","__v":0}"#;

    #[test]
    fn session_is_built_from_auth_response() {
        let resp: AuthResponse = serde_json::from_str(
            r#"{"user":{"_id":"u1","email":"a@b.co","name":"Ann","password":"hash","role":"admin"},"token":"tok"}"#,
        )
        .unwrap();
        let session = Session::from(resp);
        assert_eq!(session.id, "u1");
        assert_eq!(session.email, "a@b.co");
        assert_eq!(session.name, "Ann");
        assert_eq!(session.role, "admin");
        assert_eq!(session.token, "tok");
        assert!(session.has_token());
    }

    #[test]
    fn session_without_token_is_not_authenticated() {
        let resp: AuthResponse = serde_json::from_str(r#"{"user":{"_id":"u1"}}"#).unwrap();
        let session = Session::from(resp);
        assert!(!session.has_token());
        assert_eq!(session.role, "");
    }

    #[test]
    fn session_uses_wire_id_key() {
        let session = Session {
            id: "u1".into(),
            email: "a@b.co".into(),
            name: "Ann".into(),
            role: "user".into(),
            token: "tok".into(),
        };
        let json = serde_json::to_value(&session).unwrap();
        assert_eq!(json["_id"], "u1");
        assert!(json.get("id").is_none());
    }

    #[test]
    fn department_list_accepts_both_shapes() {
        let wrapped: DepartmentList =
            serde_json::from_str(&format!(r#"{{"departments":[{}]}}"#, DEPT)).unwrap();
        let bare: DepartmentList = serde_json::from_str(&format!("[{}]", DEPT)).unwrap();
        assert_eq!(wrapped.into_vec(), bare.into_vec());

        let empty: DepartmentList = serde_json::from_str(r#"{"departments":[]}"#).unwrap();
        assert!(empty.into_vec().is_empty());
    }

    #[test]
    fn department_detail_accepts_both_shapes() {
        let wrapped: DepartmentDetail =
            serde_json::from_str(&format!(r#"{{"department":{}}}"#, DEPT)).unwrap();
        let bare: DepartmentDetail = serde_json::from_str(DEPT).unwrap();
        let dept = wrapped.into_department();
        assert_eq!(dept, bare.into_department());
        assert_eq!(dept.id, "d1");
        assert_eq!(dept.dept_name, "Finance");
    }

    #[test]
    fn created_at_formats_and_falls_back() {
        let dept: Department = serde_json::from_str(DEPT).unwrap();
        assert_eq!(dept.created_date(), "2024-03-05");
        assert_eq!(dept.created_timestamp(), "2024-03-05 10:20:30");

        let odd = Department {
            created_at: "yesterday".into(),
            ..dept
        };
        assert!(odd.created_at_parsed().is_none());
        assert_eq!(odd.created_date(), "yesterday");
    }
}
