pub mod model;
pub mod protocol;
pub mod validation;

pub use model::{AuthResponse, Department, DepartmentDetail, DepartmentList, Session, UserProfile};
pub use validation::{DepartmentForm, Field, FieldError, FormErrors, FormKind, LoginForm, RegistrationForm};

// =========================================================
// 常量定义 (Constants)
// =========================================================

/// 携带会话令牌的请求头（值为令牌原文，不带 `Bearer` 前缀）
pub const HEADER_AUTHORIZATION: &str = "Authorization";
