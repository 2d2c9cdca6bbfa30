//! 应用配置
//!
//! 静态站点没有运行时环境变量，配置在构建时通过 `option_env!` 注入，
//! 读不到就使用默认值。

use log::LevelFilter;

/// 这些是默认值，如果构建时没有设置对应的环境变量，则使用这些值
const DEFAULT_API_BASE: &str = "https://employee-react.onrender.com/emp";
const DEFAULT_SESSION_KEY: &str = "user";
const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::Info;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// 后端 API 地址（含路径前缀）
    pub api_base: String,
    /// LocalStorage 中保存会话的键
    pub session_key: String,
    pub log_level: LevelFilter,
}

impl AppConfig {
    /// 读取构建时配置
    ///
    /// - `DEPTDESK_API_BASE`
    /// - `DEPTDESK_SESSION_KEY`
    /// - `DEPTDESK_LOG`（`error` / `warn` / `info` / `debug` / `trace` / `off`）
    pub fn from_build_env() -> Self {
        Self::from_values(
            option_env!("DEPTDESK_API_BASE"),
            option_env!("DEPTDESK_SESSION_KEY"),
            option_env!("DEPTDESK_LOG"),
        )
    }

    fn from_values(api_base: Option<&str>, session_key: Option<&str>, log: Option<&str>) -> Self {
        Self {
            api_base: non_empty(api_base)
                .unwrap_or(DEFAULT_API_BASE)
                .trim_end_matches('/')
                .to_string(),
            session_key: non_empty(session_key)
                .unwrap_or(DEFAULT_SESSION_KEY)
                .to_string(),
            log_level: non_empty(log)
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_LOG_LEVEL),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_values(None, None, None)
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_the_hosted_backend() {
        let config = AppConfig::default();
        assert_eq!(config.api_base, "https://employee-react.onrender.com/emp");
        assert_eq!(config.session_key, "user");
        assert_eq!(config.log_level, LevelFilter::Info);
    }

    #[test]
    fn overrides_are_normalised() {
        let config =
            AppConfig::from_values(Some("http://localhost:4000/emp/"), Some(" "), Some("debug"));
        assert_eq!(config.api_base, "http://localhost:4000/emp");
        assert_eq!(config.session_key, "user");
        assert_eq!(config.log_level, LevelFilter::Debug);
    }

    #[test]
    fn unknown_log_level_falls_back() {
        let config = AppConfig::from_values(None, None, Some("loud"));
        assert_eq!(config.log_level, LevelFilter::Info);
    }
}
