//! 服务（Service）
//!
//! 框架内服务的最小公共接口：每个服务持有构造时注入的服务容器，
//! 并以只读方式对外暴露。
//!
use crate::container::ServiceContainer;
use std::sync::Arc;

/// 服务：持有（并只读暴露）构造时注入的服务容器
pub trait Service: Send + Sync {
    fn container(&self) -> &Arc<ServiceContainer>;
}
