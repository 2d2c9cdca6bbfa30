//! 表单校验
//!
//! 纯函数：同样的输入总是得到同样的 [`FormErrors`]，没有副作用。
//! 每种表单只产生自身字段的条目，每个条目要么是错误，要么明确为 `None`。

use std::collections::BTreeMap;
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::protocol::{CreateDepartmentRequest, LoginRequest, RegisterRequest};

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is a valid regex")
});

const MIN_NAME_CHARS: usize = 2;
const MIN_PASSWORD_CHARS: usize = 6;
const MIN_DESCRIPTION_CHARS: usize = 10;

// =========================================================
// 字段与错误
// =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    /// 注册时的用户名
    Name,
    Email,
    Password,
    /// 部门名称
    DeptName,
    Description,
}

impl Field {
    pub fn label(&self) -> &'static str {
        match self {
            Field::Name => "Name",
            Field::Email => "Email",
            Field::Password => "Password",
            Field::DeptName => "Department name",
            Field::Description => "Description",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldError {
    Required,
    TooShort { min: usize },
    InvalidFormat,
}

impl FieldError {
    /// 面向用户的提示文案
    pub fn message(&self, field: Field) -> String {
        match self {
            FieldError::Required => format!("{} is required.", field.label()),
            FieldError::TooShort { min } => {
                format!("{} must be at least {} characters.", field.label(), min)
            }
            FieldError::InvalidFormat => format!("Invalid {} format.", field.label().to_lowercase()),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldError::Required => write!(f, "required"),
            FieldError::TooShort { .. } => write!(f, "too short"),
            FieldError::InvalidFormat => write!(f, "invalid format"),
        }
    }
}

// =========================================================
// 表单类型与错误集合
// =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormKind {
    Login,
    Registration,
    Department,
}

impl FormKind {
    pub fn fields(&self) -> &'static [Field] {
        match self {
            FormKind::Login => &[Field::Email, Field::Password],
            FormKind::Registration => &[Field::Name, Field::Email, Field::Password],
            FormKind::Department => &[Field::DeptName, Field::Description],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormErrors {
    entries: BTreeMap<Field, Option<FieldError>>,
}

impl FormErrors {
    /// 所有字段均无错误的集合（表单初始状态）
    pub fn clean(kind: FormKind) -> Self {
        Self {
            entries: kind.fields().iter().map(|f| (*f, None)).collect(),
        }
    }

    /// 字段不属于该表单时同样返回 `None`
    pub fn get(&self, field: Field) -> Option<FieldError> {
        self.entries.get(&field).copied().flatten()
    }

    pub fn message(&self, field: Field) -> Option<String> {
        self.get(field).map(|e| e.message(field))
    }

    pub fn has_errors(&self) -> bool {
        self.entries.values().any(Option::is_some)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, Option<FieldError>)> + '_ {
        self.entries.iter().map(|(f, e)| (*f, *e))
    }
}

// =========================================================
// 校验规则
// =========================================================

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// 单个字段的校验，按规则顺序返回第一个失败项
pub fn validate_field(field: Field, value: &str) -> Option<FieldError> {
    if is_blank(value) {
        return Some(FieldError::Required);
    }
    match field {
        Field::Name | Field::DeptName => min_len(value.trim(), MIN_NAME_CHARS),
        Field::Email => (!EMAIL_PATTERN.is_match(value)).then_some(FieldError::InvalidFormat),
        Field::Password => min_len(value, MIN_PASSWORD_CHARS),
        Field::Description => min_len(value.trim(), MIN_DESCRIPTION_CHARS),
    }
}

/// 长度按 UTF-16 code unit 计算，与浏览器中字符串的 `length` 一致
fn min_len(value: &str, min: usize) -> Option<FieldError> {
    (value.encode_utf16().count() < min).then_some(FieldError::TooShort { min })
}

/// 按表单类型校验一组原始输入，缺失的字段视为空字符串
pub fn validate(kind: FormKind, values: &BTreeMap<Field, &str>) -> FormErrors {
    let entries = kind
        .fields()
        .iter()
        .map(|field| {
            let value = values.get(field).copied().unwrap_or_default();
            (*field, validate_field(*field, value))
        })
        .collect();
    FormErrors { entries }
}

// =========================================================
// 具体表单
// =========================================================

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    pub fn errors(&self) -> FormErrors {
        let values = BTreeMap::from([
            (Field::Email, self.email.as_str()),
            (Field::Password, self.password.as_str()),
        ]);
        validate(FormKind::Login, &values)
    }

    pub fn validate(&self) -> Result<LoginRequest, FormErrors> {
        let errors = self.errors();
        if errors.has_errors() {
            return Err(errors);
        }
        Ok(LoginRequest {
            email: self.email.clone(),
            password: self.password.clone(),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistrationForm {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl RegistrationForm {
    pub fn errors(&self) -> FormErrors {
        let values = BTreeMap::from([
            (Field::Name, self.name.as_str()),
            (Field::Email, self.email.as_str()),
            (Field::Password, self.password.as_str()),
        ]);
        validate(FormKind::Registration, &values)
    }

    pub fn validate(&self) -> Result<RegisterRequest, FormErrors> {
        let errors = self.errors();
        if errors.has_errors() {
            return Err(errors);
        }
        Ok(RegisterRequest {
            name: self.name.clone(),
            email: self.email.clone(),
            password: self.password.clone(),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DepartmentForm {
    pub dept_name: String,
    pub description: String,
}

impl DepartmentForm {
    pub fn errors(&self) -> FormErrors {
        let values = BTreeMap::from([
            (Field::DeptName, self.dept_name.as_str()),
            (Field::Description, self.description.as_str()),
        ]);
        validate(FormKind::Department, &values)
    }

    pub fn validate(&self) -> Result<CreateDepartmentRequest, FormErrors> {
        let errors = self.errors();
        if errors.has_errors() {
            return Err(errors);
        }
        Ok(CreateDepartmentRequest {
            dept_name: self.dept_name.clone(),
            description: self.description.clone(),
        })
    }
}
