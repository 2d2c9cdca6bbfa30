use deptdesk_shared::HEADER_AUTHORIZATION;
use deptdesk_shared::protocol::ApiRequest;

use crate::request::{HttpClient, HttpError, HttpRequest, HttpResponse};
use crate::session::SessionStore;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Transport(#[from] HttpError),
    #[error("request failed with status {status}")]
    Status { status: u16, body: String },
    #[error("failed to encode request body: {0}")]
    Encode(serde_json::Error),
    #[error("unexpected response body: {0}")]
    Decode(serde_json::Error),
}

impl ApiError {
    /// 面向用户的简短描述：优先取后端返回的 `message` 字段
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Status { status, body } => serde_json::from_str::<serde_json::Value>(body)
                .ok()
                .and_then(|v| v.get("message")?.as_str().map(str::to_string))
                .unwrap_or_else(|| format!("Request failed ({})", status)),
            ApiError::Transport(_) => "Unable to reach the server.".to_string(),
            ApiError::Encode(_) | ApiError::Decode(_) => {
                "Unexpected response from the server.".to_string()
            }
        }
    }
}

/// 绑定到单个后端地址的 API 客户端
///
/// 每个请求发出前都会读取当前会话，存在时附带令牌。
#[derive(Clone)]
pub struct ApiClient<C> {
    base_url: String,
    session: SessionStore,
    http: C,
}

impl<C: HttpClient> ApiClient<C> {
    pub fn new(base_url: &str, session: SessionStore, http: C) -> Self {
        let base_url = base_url.trim_end_matches('/').to_string();
        Self {
            base_url,
            session,
            http,
        }
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    /// 附加认证头后原样发送，响应与传输错误都不做处理
    pub async fn execute(&self, req: HttpRequest) -> Result<HttpResponse, HttpError> {
        let req = match self.session.current() {
            Some(session) => req.with_header(HEADER_AUTHORIZATION, &session.token),
            None => req,
        };
        log::debug!("{} {}", req.method.as_str(), req.url);
        self.http.send(req).await
    }

    /// 调用类型化的端点
    pub async fn call<R: ApiRequest>(&self, endpoint: &R) -> Result<R::Response, ApiError> {
        let mut req = HttpRequest::new(&self.url(&endpoint.path()), R::METHOD);
        if R::METHOD.has_body() {
            let body = serde_json::to_string(endpoint).map_err(ApiError::Encode)?;
            req = req
                .with_header("Content-Type", "application/json")
                .with_body(body);
        }

        let resp = self.execute(req).await?;
        if !resp.ok() {
            return Err(ApiError::Status {
                status: resp.status,
                body: resp.body,
            });
        }

        let body = if resp.body.trim().is_empty() {
            "null"
        } else {
            resp.body.as_str()
        };
        serde_json::from_str(body).map_err(ApiError::Decode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::mock::MockHttpClient;
    use crate::session::{MemoryPersistence, sample_session};
    use deptdesk_shared::protocol::{
        DeleteDepartmentRequest, HttpMethod, ListDepartmentsRequest, LoginRequest,
    };
    use std::sync::Arc;

    const BASE: &str = "https://api.test/emp/";

    fn client() -> (ApiClient<MockHttpClient>, MockHttpClient, SessionStore) {
        let store = SessionStore::load(Arc::new(MemoryPersistence::default()));
        let http = MockHttpClient::new();
        (ApiClient::new(BASE, store.clone(), http.clone()), http, store)
    }

    #[tokio::test]
    async fn attaches_raw_token_when_logged_in() {
        let (api, http, store) = client();
        http.respond(HttpMethod::Get, "/departments", 200, "[]");
        store.set(Some(sample_session("secret-token")));

        api.call(&ListDepartmentsRequest).await.unwrap();

        let sent = http.requests();
        assert_eq!(sent[0].url, "https://api.test/emp/departments");
        assert_eq!(sent[0].header("Authorization"), Some("secret-token"));
    }

    #[tokio::test]
    async fn sends_unauthenticated_without_session() {
        let (api, http, store) = client();
        http.respond(HttpMethod::Get, "/departments", 200, "[]");

        api.call(&ListDepartmentsRequest).await.unwrap();
        store.set(Some(sample_session("")));
        api.call(&ListDepartmentsRequest).await.unwrap();

        assert!(http.requests().iter().all(|r| r.header("Authorization").is_none()));
    }

    #[tokio::test]
    async fn post_carries_json_body() {
        let (api, http, _) = client();
        http.respond(
            HttpMethod::Post,
            "/login",
            200,
            r#"{"user":{"_id":"u1"},"token":"t"}"#,
        );
        let req = LoginRequest {
            email: "a@b.co".into(),
            password: "123456".into(),
        };

        let resp = api.call(&req).await.unwrap();
        assert_eq!(resp.token, "t");

        let sent = &http.requests()[0];
        assert_eq!(sent.header("Content-Type"), Some("application/json"));
        let body: serde_json::Value = serde_json::from_str(sent.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["email"], "a@b.co");
        assert_eq!(body["password"], "123456");
    }

    #[tokio::test]
    async fn empty_delete_response_is_accepted() {
        let (api, http, _) = client();
        http.respond(HttpMethod::Delete, "/delete-department/d1", 204, "");

        let req = DeleteDepartmentRequest { id: "d1".into() };
        assert!(api.call(&req).await.is_ok());
        assert!(http.requests()[0].body.is_none());
    }

    #[tokio::test]
    async fn errors_are_passed_through() {
        let (api, http, _) = client();
        http.respond(
            HttpMethod::Post,
            "/login",
            401,
            r#"{"message":"Invalid credentials"}"#,
        );
        let req = LoginRequest {
            email: "a@b.co".into(),
            password: "wrong-pass".into(),
        };
        let err = api.call(&req).await.unwrap_err();
        assert!(matches!(err, ApiError::Status { status: 401, .. }));
        assert_eq!(err.user_message(), "Invalid credentials");

        http.fail(
            HttpMethod::Get,
            "/departments",
            HttpError::NetworkError("offline".into()),
        );
        let err = api.call(&ListDepartmentsRequest).await.unwrap_err();
        assert!(matches!(err, ApiError::Transport(HttpError::NetworkError(_))));
        assert_eq!(http.requests().len(), 2);
    }

    #[tokio::test]
    async fn malformed_body_is_a_decode_error() {
        let (api, http, _) = client();
        http.respond(HttpMethod::Get, "/departments", 200, "<html>");
        let err = api.call(&ListDepartmentsRequest).await.unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }
}
