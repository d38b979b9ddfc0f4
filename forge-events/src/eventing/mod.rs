//! 事件子系统（eventing）
//!
//! 提供进程内事件订阅与分发：
//! - `EventSubscriber`：订阅者协议，闭包经 `FnSubscriber` 适配；
//! - `Subscription`：订阅句柄，按身份退订；
//! - `EventService`：按优先级顺序逐个等待订阅者的登记表与分发器；
//! - `EventServiceConfig`：失败策略与默认优先级。
//!
//! 该模块不涉及任何传输与持久化，事件只在当前进程内分发。
//!
pub mod config;
pub mod service;
pub mod subscriber;
pub mod subscription;

pub use config::{DispatchPolicy, EventServiceConfig};
pub use service::{EventService, JsonEventService};
pub use subscriber::{EventSubscriber, FnSubscriber};
pub use subscription::Subscription;
