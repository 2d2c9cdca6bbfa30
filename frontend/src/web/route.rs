//! 路由定义模块 - 领域模型
//!
//! 这是纯粹的业务逻辑层，不依赖于 DOM 或 web_sys。
//! 定义了应用的所有路由及其守卫规则。

use std::fmt::Display;

/// 应用路由枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppRoute {
    /// 部门管理首页 (需要认证)
    #[default]
    Home,
    /// 登录页面 (仅限未认证)
    Login,
    /// 注册页面 (仅限未认证)
    Register,
}

/// 守卫的裁决结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Navigation {
    /// 最终渲染的路由
    pub route: AppRoute,
    /// 是否偏离了请求的目标（需要替换浏览器地址）
    pub redirected: bool,
}

impl AppRoute {
    /// 将 URL path 解析为路由枚举，未知路径返回 `None`
    pub fn from_path(path: &str) -> Option<Self> {
        match path {
            "/" => Some(Self::Home),
            "/login" => Some(Self::Login),
            "/register" => Some(Self::Register),
            _ => None,
        }
    }

    /// 获取路由对应的 URL path
    pub fn to_path(&self) -> &'static str {
        match self {
            Self::Home => "/",
            Self::Login => "/login",
            Self::Register => "/register",
        }
    }

    /// **核心守卫逻辑：定义该路由是否需要认证**
    pub fn requires_auth(&self) -> bool {
        matches!(self, Self::Home)
    }

    /// 定义已认证用户是否应该离开此路由（如登录页）
    pub fn should_redirect_when_authenticated(&self) -> bool {
        matches!(self, Self::Login | Self::Register)
    }

    /// 获取认证失败时的重定向目标
    pub fn auth_failure_redirect() -> Self {
        Self::Login
    }

    /// 获取已认证用户访问公开页面时的重定向目标
    pub fn auth_success_redirect() -> Self {
        Self::Home
    }

    /// 未知路径的重定向目标
    pub fn fallback() -> Self {
        Self::Home
    }
}

/// 对一次导航执行守卫
///
/// 未知路径先落到首页，再对首页套用认证规则。
pub fn resolve(target: Option<AppRoute>, is_authenticated: bool) -> Navigation {
    let requested = target.unwrap_or_else(AppRoute::fallback);

    let route = if requested.requires_auth() && !is_authenticated {
        AppRoute::auth_failure_redirect()
    } else if requested.should_redirect_when_authenticated() && is_authenticated {
        AppRoute::auth_success_redirect()
    } else {
        requested
    };

    Navigation {
        route,
        redirected: target != Some(route),
    }
}

impl Display for AppRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_path())
    }
}
