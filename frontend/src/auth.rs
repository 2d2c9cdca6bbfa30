//! 认证模块
//!
//! - [`AuthService`]：登录、注册、注销流程，只依赖 API 客户端与会话存储，可在测试中直接驱动。
//! - [`AuthContext`]：把会话存储镜像为信号，通过 Context 在组件间共享。
//!   路由服务通过注入的认证信号来检查认证状态，与本模块解耦。

use std::sync::Arc;

use deptdesk_shared::protocol::{ApiRequest, LoginRequest, RegisterRequest};
use deptdesk_shared::{AuthResponse, LoginForm, RegistrationForm, Session};
use leptos::prelude::*;

use crate::api::{ApiClient, ApiError};
use crate::config::AppConfig;
use crate::phase::{PhaseSlot, SubmitError, submit};
use crate::request::HttpClient;
use crate::session::SessionStore;
use crate::web::{BrowserStorage, FetchHttpClient};


// =========================================================
// 认证流程
// =========================================================

#[derive(Clone)]
pub struct AuthService<C> {
    api: ApiClient<C>,
}

impl<C: HttpClient> AuthService<C> {
    pub fn new(api: ApiClient<C>) -> Self {
        Self { api }
    }

    /// 登录；成功后会话写入存储，失败时存储保持不变
    pub async fn login(&self, req: &LoginRequest) -> Result<Session, ApiError> {
        self.authenticate(req, "login").await
    }

    /// 注册；成功后直接视为已登录
    pub async fn register(&self, req: &RegisterRequest) -> Result<Session, ApiError> {
        self.authenticate(req, "register").await
    }

    /// 登录表单提交：校验失败或正在提交时不发请求
    pub async fn submit_login(
        &self,
        form: &LoginForm,
        phase: &impl PhaseSlot,
    ) -> Result<Session, SubmitError> {
        submit(phase, form.validate(), |req| async move { self.login(&req).await }).await
    }

    pub async fn submit_register(
        &self,
        form: &RegistrationForm,
        phase: &impl PhaseSlot,
    ) -> Result<Session, SubmitError> {
        submit(phase, form.validate(), |req| async move { self.register(&req).await }).await
    }

    async fn authenticate<R>(&self, req: &R, action: &str) -> Result<Session, ApiError>
    where
        R: ApiRequest<Response = AuthResponse>,
    {
        match self.api.call(req).await {
            Ok(resp) => {
                let session = Session::from(resp);
                log::info!("{} succeeded for {}", action, session.email);
                self.api.session().set(Some(session.clone()));
                Ok(session)
            }
            Err(e) => {
                log::error!("{} failed: {}", action, e);
                Err(e)
            }
        }
    }

    /// 注销，仅清除本地会话
    pub fn logout(&self) {
        self.api.session().clear();
        log::info!("logged out");
    }
}

// =========================================================
// 认证上下文
// =========================================================

/// 认证上下文
///
/// `session` 是会话存储的响应式镜像，每次认证状态变化后通过 [`AuthContext::sync`] 刷新。
#[derive(Clone, Copy)]
pub struct AuthContext {
    session: RwSignal<Option<Session>>,
    api: StoredValue<ApiClient<FetchHttpClient>>,
}

impl AuthContext {
    /// 创建认证上下文，并从 LocalStorage 恢复会话
    pub fn new(config: &AppConfig) -> Self {
        let storage = BrowserStorage::new(&config.session_key);
        let store = SessionStore::load(Arc::new(storage));
        let session = RwSignal::new(store.current());
        let api = ApiClient::new(&config.api_base, store, FetchHttpClient);

        Self {
            session,
            api: StoredValue::new(api),
        }
    }

    /// 当前会话（响应式）
    pub fn session(&self) -> Option<Session> {
        self.session.get()
    }

    /// 获取认证状态信号（用于路由服务注入）
    pub fn is_authenticated_signal(&self) -> Signal<bool> {
        let session = self.session;
        Signal::derive(move || session.with(|s| s.as_ref().is_some_and(Session::has_token)))
    }

    pub fn api(&self) -> ApiClient<FetchHttpClient> {
        self.api.get_value()
    }

    pub fn auth_service(&self) -> AuthService<FetchHttpClient> {
        AuthService::new(self.api())
    }

    /// 将会话存储的最新状态同步到信号
    pub fn sync(&self) {
        let current = self.api.with_value(|api| api.session().current());
        self.session.set(current);
    }

    /// 注销并清除状态
    ///
    /// 导航将由路由服务的认证状态监听自动处理。
    pub fn logout(&self) {
        self.auth_service().logout();
        self.sync();
    }
}

/// 从 Context 获取认证上下文
pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().expect("AuthContext should be provided")
}
