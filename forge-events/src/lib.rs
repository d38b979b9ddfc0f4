//! 进程内事件服务（forge-events）
//!
//! 组件按事件名登记订阅，发布方按优先级依次通知全部订阅者：
//! - 订阅与分发（`eventing`）：登记表、订阅句柄、分发策略；
//! - 服务容器（`container`）：以类型为键的共享服务，作为显式配置传入；
//! - 统一错误（`error`）。
//!
//! 典型用法：
//! ```rust
//! use forge_events::eventing::EventService;
//!
//! # async fn run() -> anyhow::Result<()> {
//! let events = EventService::<String>::new();
//! let audit = events.subscribe_with_priority("user.created", |name| async move {
//!     println!("audit: {name}");
//!     Ok(())
//! }, 10);
//!
//! events.publish("user.created", "alice".to_string()).await?;
//! assert!(events.unsubscribe(&audit));
//! # Ok(())
//! # }
//! ```
//!
pub mod container;
pub mod error;
pub mod eventing;
pub mod service;

pub use container::ServiceContainer;
pub use error::{EventError, EventResult, SubscriberFailure};
pub use eventing::{
    DispatchPolicy, EventService, EventServiceConfig, EventSubscriber, FnSubscriber,
    JsonEventService, Subscription,
};
pub use service::Service;
