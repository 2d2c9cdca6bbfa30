//! Department Desk 前端应用
//!
//! 采用 Context-Driven 的高内聚低耦合架构：
//! - `session`: 会话存储（唯一写入者为认证流程）
//! - `api`: 自动附带令牌的 API 客户端
//! - `auth` / `departments`: 页面背后的业务流程，不依赖 DOM，可直接测试
//! - `web::route`: 路由定义与守卫（领域模型）
//! - `web::router`: 路由服务（核心引擎）
//! - `components`: UI 组件层

pub mod api;
pub mod auth;
pub mod config;
pub mod departments;
pub mod logging;
pub mod phase;
pub mod request;
pub mod session;

mod components {
    mod department_detail;
    mod department_form;
    mod field;
    pub mod home;
    mod icons;
    pub mod login;
    pub mod register;
}

// 原生 Web API 封装模块
// 此模块提供对浏览器原生 API 的轻量级封装，替代 gloo-* 系列 crate，
// 以减小 WASM 二进制体积。
pub mod web {
    mod dialog;
    mod http;
    pub mod route;
    pub mod router;
    mod storage;

    pub use dialog::BrowserConfirm;
    pub use http::FetchHttpClient;
    pub use storage::BrowserStorage;
}

use crate::auth::AuthContext;
use crate::components::home::HomePage;
use crate::components::login::LoginPage;
use crate::components::register::RegisterPage;
use crate::config::AppConfig;

use leptos::prelude::*;

use web::route::AppRoute;
use web::router::{Router, RouterOutlet};

/// 路由匹配函数
///
/// 根据 AppRoute 枚举返回对应的视图组件。
fn route_matcher(route: AppRoute) -> AnyView {
    match route {
        AppRoute::Home => view! { <HomePage /> }.into_any(),
        AppRoute::Login => view! { <LoginPage /> }.into_any(),
        AppRoute::Register => view! { <RegisterPage /> }.into_any(),
    }
}

#[component]
pub fn App() -> impl IntoView {
    let config = AppConfig::from_build_env();
    logging::init(config.log_level);
    log::debug!("api base: {}", config.api_base);

    // 1. 创建认证上下文（从 LocalStorage 恢复会话）
    let auth_ctx = AuthContext::new(&config);
    provide_context(auth_ctx);

    // 2. 获取认证状态信号，用于注入路由服务（解耦！）
    let is_authenticated = auth_ctx.is_authenticated_signal();

    view! {
        // 3. 路由器组件：注入认证信号实现守卫
        <Router is_authenticated=is_authenticated>
            <RouterOutlet matcher=route_matcher />
        </Router>
    }
}
