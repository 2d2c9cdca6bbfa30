//! LocalStorage 封装模块
//!
//! 使用 `web_sys::Storage` 实现会话持久化。

use crate::session::SessionPersistence;

/// 绑定到单个键的浏览器 LocalStorage
#[derive(Debug, Clone)]
pub struct BrowserStorage {
    key: String,
}

impl BrowserStorage {
    pub fn new(key: &str) -> Self {
        Self {
            key: key.to_string(),
        }
    }

    /// 获取 LocalStorage 实例
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok()?
    }
}

impl SessionPersistence for BrowserStorage {
    /// 键不存在或发生错误时返回 `None`
    fn load(&self) -> Option<String> {
        Self::storage()?.get_item(&self.key).ok()?
    }

    fn save(&self, raw: &str) {
        let saved = Self::storage()
            .and_then(|s| s.set_item(&self.key, raw).ok())
            .is_some();
        if !saved {
            log::warn!("failed to persist session under {}", self.key);
        }
    }

    fn clear(&self) {
        let removed = Self::storage()
            .and_then(|s| s.remove_item(&self.key).ok())
            .is_some();
        if !removed {
            log::warn!("failed to remove session under {}", self.key);
        }
    }
}
