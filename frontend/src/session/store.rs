//! 持久化的会话存储
//!
//! 所有对 `token` / `user` 两个存储项的读写都集中在这里。
//! 不变式：存在令牌 ⇔ 存在用户信息；任何一方缺失或损坏时整体清除。

use tenant_manager_shared::{Identity, STORAGE_TOKEN_KEY, STORAGE_USER_KEY, UserProfile};

use crate::web::storage::{KeyValueStore, LocalStorage};

#[derive(Debug, Clone, Default)]
pub struct SessionStore<S = LocalStorage> {
    storage: S,
}

impl<S: KeyValueStore> SessionStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// 读取持久化的身份
    ///
    /// 用户信息解析失败或令牌缺失时清空存储并返回 None。
    pub fn load(&self) -> Option<Identity> {
        let raw = self.storage.get(STORAGE_USER_KEY)?;
        let user = match serde_json::from_str::<UserProfile>(&raw) {
            Ok(user) => user,
            Err(e) => {
                log_warn!("[Session] Stored user is malformed ({}), clearing session.", e);
                self.clear();
                return None;
            }
        };
        self.pair_with_token(user)
    }

    /// 采用导航状态传入的用户信息并持久化
    pub fn adopt_user(&self, user: &UserProfile) -> Option<Identity> {
        self.save_user(user);
        self.pair_with_token(user.clone())
    }

    fn pair_with_token(&self, user: UserProfile) -> Option<Identity> {
        match self.token() {
            Some(token) => Some(Identity::new(user, token)),
            None => {
                log_warn!("[Session] User present without token, clearing session.");
                self.clear();
                None
            }
        }
    }

    pub fn token(&self) -> Option<String> {
        self.storage
            .get(STORAGE_TOKEN_KEY)
            .filter(|t| !t.trim().is_empty())
    }

    pub fn save(&self, identity: &Identity) {
        self.storage.set(STORAGE_TOKEN_KEY, &identity.token);
        self.save_user(&identity.user);
    }

    pub fn save_user(&self, user: &UserProfile) {
        match serde_json::to_string(user) {
            Ok(json) => {
                self.storage.set(STORAGE_USER_KEY, &json);
            }
            Err(e) => log_error!("[Session] Failed to serialize user: {}", e),
        }
    }

    pub fn clear(&self) {
        self.storage.delete(STORAGE_TOKEN_KEY);
        self.storage.delete(STORAGE_USER_KEY);
    }
}
