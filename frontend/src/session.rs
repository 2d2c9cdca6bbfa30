//! 会话存储
//!
//! 唯一持有当前会话的地方。API 客户端与路由守卫只读取，
//! 只有认证流程（登录、注册、注销）会写入。
//! 持久化通过 [`SessionPersistence`] 注入，浏览器中是 LocalStorage，测试中是内存。

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use deptdesk_shared::Session;

/// 会话的持久化接口
pub trait SessionPersistence: Send + Sync {
    /// 读取已保存的原始值
    fn load(&self) -> Option<String>;
    fn save(&self, raw: &str);
    fn clear(&self);
}

/// 会话存储句柄
///
/// 克隆开销很小，所有克隆共享同一份状态。
#[derive(Clone)]
pub struct SessionStore {
    current: Arc<RwLock<Option<Session>>>,
    persistence: Arc<dyn SessionPersistence>,
}

impl SessionStore {
    /// 从持久化中恢复会话
    ///
    /// 无法解析的值视为损坏：删除并以未登录状态启动，不向调用方报错。
    pub fn load(persistence: Arc<dyn SessionPersistence>) -> Self {
        let current = match persistence.load() {
            Some(raw) => match serde_json::from_str::<Session>(&raw) {
                Ok(session) => {
                    log::debug!("restored session for {}", session.email);
                    Some(session)
                }
                Err(e) => {
                    log::warn!("discarding unreadable stored session: {}", e);
                    persistence.clear();
                    None
                }
            },
            None => None,
        };

        Self {
            current: Arc::new(RwLock::new(current)),
            persistence,
        }
    }

    /// 当前会话；令牌为空的会话视为未登录
    pub fn current(&self) -> Option<Session> {
        self.read().as_ref().filter(|s| s.has_token()).cloned()
    }

    pub fn is_authenticated(&self) -> bool {
        self.read().as_ref().is_some_and(Session::has_token)
    }

    /// 替换当前会话并同步到持久化
    pub fn set(&self, session: Option<Session>) {
        match &session {
            Some(s) => match serde_json::to_string(s) {
                Ok(raw) => self.persistence.save(&raw),
                Err(e) => log::error!("failed to serialize session: {}", e),
            },
            None => self.persistence.clear(),
        }
        *self.write() = session;
    }

    pub fn clear(&self) {
        self.set(None);
    }

    fn read(&self) -> RwLockReadGuard<'_, Option<Session>> {
        self.current.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Option<Session>> {
        self.current.write().unwrap_or_else(|e| e.into_inner())
    }
}

/// 内存持久化，用于测试
#[cfg(test)]
#[derive(Default)]
pub struct MemoryPersistence {
    value: std::sync::Mutex<Option<String>>,
}

#[cfg(test)]
impl MemoryPersistence {
    pub fn with_value(raw: &str) -> Self {
        Self {
            value: std::sync::Mutex::new(Some(raw.to_string())),
        }
    }

    pub fn raw(&self) -> Option<String> {
        self.value.lock().unwrap().clone()
    }
}

#[cfg(test)]
impl SessionPersistence for MemoryPersistence {
    fn load(&self) -> Option<String> {
        self.raw()
    }

    fn save(&self, raw: &str) {
        *self.value.lock().unwrap() = Some(raw.to_string());
    }

    fn clear(&self) {
        *self.value.lock().unwrap() = None;
    }
}

#[cfg(test)]
pub fn sample_session(token: &str) -> Session {
    Session {
        id: "u1".into(),
        email: "ann@example.com".into(),
        name: "Ann".into(),
        role: "user".into(),
        token: token.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_then_fresh_load_round_trips() {
        let disk = Arc::new(MemoryPersistence::default());
        let store = SessionStore::load(disk.clone());
        assert!(store.current().is_none());

        store.set(Some(sample_session("tok")));
        assert_eq!(store.current(), Some(sample_session("tok")));

        let reloaded = SessionStore::load(disk.clone());
        assert_eq!(reloaded.current(), Some(sample_session("tok")));
    }

    #[test]
    fn clearing_removes_persisted_value() {
        let disk = Arc::new(MemoryPersistence::default());
        let store = SessionStore::load(disk.clone());
        store.set(Some(sample_session("tok")));
        store.clear();

        assert!(store.current().is_none());
        assert!(disk.raw().is_none());
        assert!(SessionStore::load(disk).current().is_none());
    }

    #[test]
    fn corrupt_value_is_discarded() {
        let disk = Arc::new(MemoryPersistence::with_value("{not json"));
        let store = SessionStore::load(disk.clone());
        assert!(store.current().is_none());
        assert!(disk.raw().is_none());
    }

    #[test]
    fn empty_token_reads_as_logged_out() {
        let disk = Arc::new(MemoryPersistence::default());
        let store = SessionStore::load(disk.clone());
        store.set(Some(sample_session("")));
        assert!(store.current().is_none());
        assert!(!store.is_authenticated());
    }

    #[test]
    fn clones_share_state() {
        let store = SessionStore::load(Arc::new(MemoryPersistence::default()));
        let reader = store.clone();
        store.set(Some(sample_session("tok")));
        assert!(reader.is_authenticated());
        store.clear();
        assert!(!reader.is_authenticated());
    }

    #[test]
    fn stored_json_uses_wire_keys() {
        let disk = Arc::new(MemoryPersistence::with_value(
            r#"{"_id":"u9","email":"x@y.io","name":"X","role":"admin","token":"abc"}"#,
        ));
        let session = SessionStore::load(disk).current().unwrap();
        assert_eq!(session.id, "u9");
        assert_eq!(session.token, "abc");
    }
}
