use crate::model::{AuthResponse, DepartmentDetail, DepartmentList};
use serde::de::{DeserializeOwned, IgnoredAny};
use serde::{Deserialize, Serialize};

/// HTTP Methods for API Requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HttpMethod {
    Get,
    Post,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Delete => "DELETE",
        }
    }

    /// Only `POST` requests carry a JSON body.
    pub fn has_body(&self) -> bool {
        matches!(self, HttpMethod::Post)
    }
}

/// A trait that defines the request-response relationship and metadata for an API endpoint.
pub trait ApiRequest: Serialize {
    /// The response type returned by this request.
    type Response: DeserializeOwned;
    /// The HTTP method.
    const METHOD: HttpMethod;
    /// The URL path relative to the API base.
    fn path(&self) -> String;
}

// =========================================================
// Authentication
// =========================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl ApiRequest for RegisterRequest {
    type Response = AuthResponse;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        "/register".to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl ApiRequest for LoginRequest {
    type Response = AuthResponse;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        "/login".to_string()
    }
}

// =========================================================
// Departments
// =========================================================

/// List all departments
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListDepartmentsRequest;

impl ApiRequest for ListDepartmentsRequest {
    type Response = DepartmentList;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        "/departments".to_string()
    }
}

/// Create a department. The created record is not used: the list is re-fetched afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateDepartmentRequest {
    pub dept_name: String,
    pub description: String,
}

impl ApiRequest for CreateDepartmentRequest {
    type Response = IgnoredAny;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        "/add-department".to_string()
    }
}

/// Fetch a single department
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetDepartmentRequest {
    pub id: String,
}

impl ApiRequest for GetDepartmentRequest {
    type Response = DepartmentDetail;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        format!("/department/{}", self.id)
    }
}

/// Delete a department
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteDepartmentRequest {
    pub id: String,
}

impl ApiRequest for DeleteDepartmentRequest {
    type Response = IgnoredAny;
    const METHOD: HttpMethod = HttpMethod::Delete;

    fn path(&self) -> String {
        format!("/delete-department/{}", self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_match_backend_routes() {
        let get = GetDepartmentRequest { id: "abc".into() };
        let delete = DeleteDepartmentRequest { id: "abc".into() };
        assert_eq!(get.path(), "/department/abc");
        assert_eq!(delete.path(), "/delete-department/abc");
        assert_eq!(ListDepartmentsRequest.path(), "/departments");
        assert_eq!(<DeleteDepartmentRequest as ApiRequest>::METHOD, HttpMethod::Delete);
        assert!(!<GetDepartmentRequest as ApiRequest>::METHOD.has_body());
        assert!(<CreateDepartmentRequest as ApiRequest>::METHOD.has_body());
    }

    #[test]
    fn create_body_uses_backend_field_names() {
        let req = CreateDepartmentRequest {
            dept_name: "Finance".into(),
            description: "Handles the money".into(),
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["dept_name"], "Finance");
        assert_eq!(json["description"], "Handles the money");
    }
}
