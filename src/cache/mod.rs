//! 对象缓存
//!
//! 认证中间件用它缓存 `user:{token}` → 用户 JSON，避免每个请求都查库。

mod moka;

pub use self::moka::MokaCacheWrapper;

use async_trait::async_trait;

#[derive(Debug, Clone, PartialEq)]
pub enum CacheResult<T> {
    Found(T),
    NotFound,
}

#[async_trait]
pub trait ObjectCache: Send + Sync {
    async fn get_raw(&self, key: &str) -> CacheResult<String>;
    async fn insert_raw(&self, key: String, value: String, ttl: u64);
    async fn remove(&self, key: &str);
}
