//! 事件服务（EventService）
//!
//! 进程内的事件登记与分发：
//! - 按事件名保存订阅，序列内按优先级降序排列，同优先级保持登记顺序；
//! - `publish` 依次调用并等待每个订阅者完成，不做并发扇出；
//! - 订阅者失败时按 `DispatchPolicy` 中止或汇总。
//!
//! 每次发布在开始时对订阅序列做快照，分发过程中订阅者对登记表的修改
//! （包括退订自身或尚未执行的订阅者）只影响之后的发布。
//!
use super::config::{DispatchPolicy, EventServiceConfig};
use super::subscriber::{EventSubscriber, FnSubscriber};
use super::subscription::Subscription;
use crate::container::ServiceContainer;
use crate::error::{EventError, SubscriberFailure};
use crate::service::Service;
use bon::Builder;
use dashmap::DashMap;
use std::cmp::Reverse;
use std::fmt;
use std::future::Future;
use std::sync::Arc;
use tracing::{debug, trace, warn};

/// 以 JSON 值作为载荷的事件服务
pub type JsonEventService = EventService<serde_json::Value>;

/// EventService：
/// - 维护事件名到有序订阅序列的映射
/// - 按优先级顺序逐个等待订阅者完成
#[derive(Builder)]
pub struct EventService<E> {
    #[builder(default)]
    container: Arc<ServiceContainer>,
    #[builder(default)]
    config: EventServiceConfig,
    #[builder(skip)]
    subscribers: DashMap<String, Vec<Subscription<E>>>,
}

impl<E> Default for EventService<E> {
    fn default() -> Self {
        Self {
            container: Arc::default(),
            config: EventServiceConfig::default(),
            subscribers: DashMap::new(),
        }
    }
}

impl<E> EventService<E>
where
    E: Clone + Send + Sync + 'static,
{
    pub fn new() -> Self {
        Self::default()
    }

    pub fn config(&self) -> &EventServiceConfig {
        &self.config
    }

    /// 以默认优先级订阅事件
    pub fn subscribe<F, Fut>(&self, event_name: impl Into<String>, callback: F) -> Subscription<E>
    where
        F: Fn(E) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
    {
        self.subscribe_with_priority(event_name, callback, self.config.default_priority)
    }

    /// 以指定优先级订阅事件，优先级越高越先被调用
    pub fn subscribe_with_priority<F, Fut>(
        &self,
        event_name: impl Into<String>,
        callback: F,
        priority: i32,
    ) -> Subscription<E>
    where
        F: Fn(E) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
    {
        self.subscribe_handler(event_name, Arc::new(FnSubscriber::new(callback)), priority)
    }

    /// 登记实现了 `EventSubscriber` 的订阅者
    pub fn subscribe_handler(
        &self,
        event_name: impl Into<String>,
        callback: Arc<dyn EventSubscriber<E>>,
        priority: i32,
    ) -> Subscription<E> {
        let subscription = Subscription::new(event_name, callback, priority);

        let mut list = self
            .subscribers
            .entry(subscription.event_name().to_owned())
            .or_default();
        list.push(subscription.clone());
        // 稳定排序：同优先级保持登记顺序
        list.sort_by_key(|s| Reverse(s.priority()));

        debug!(
            event_name = subscription.event_name(),
            priority,
            subscribers = list.len(),
            "subscribed"
        );

        subscription
    }

    /// 退订；订阅不存在（已退订或已清空）时返回 false
    pub fn unsubscribe(&self, subscription: &Subscription<E>) -> bool {
        let event_name = subscription.event_name();

        {
            let Some(mut list) = self.subscribers.get_mut(event_name) else {
                return false;
            };
            let Some(position) = list.iter().position(|s| s == subscription) else {
                return false;
            };
            list.remove(position);
        }

        // 空序列与从未订阅等价，顺手回收
        self.subscribers.remove_if(event_name, |_, list| list.is_empty());

        debug!(
            event_name,
            priority = subscription.priority(),
            "unsubscribed"
        );
        true
    }

    /// 发布事件：按优先级依次调用订阅者，每个完成后才调用下一个
    pub async fn publish(&self, event_name: &str, event_data: E) -> anyhow::Result<()> {
        let subscribers = self.get_subscribers(event_name);
        if subscribers.is_empty() {
            trace!(event_name, "no subscribers, skip publish");
            return Ok(());
        }

        trace!(event_name, subscribers = subscribers.len(), "publishing");

        match self.config.dispatch_policy {
            DispatchPolicy::AbortOnFirstError => {
                for (position, subscriber) in subscribers.iter().enumerate() {
                    trace!(event_name, position, priority = subscriber.priority(), "invoking");
                    if let Err(err) = subscriber.invoke(&event_data).await {
                        warn!(
                            event_name,
                            position,
                            priority = subscriber.priority(),
                            error = %err,
                            "subscriber failed, dispatch aborted"
                        );
                        return Err(err);
                    }
                }
                Ok(())
            }
            DispatchPolicy::CollectErrors => {
                let mut failures = Vec::new();
                for (position, subscriber) in subscribers.iter().enumerate() {
                    trace!(event_name, position, priority = subscriber.priority(), "invoking");
                    if let Err(source) = subscriber.invoke(&event_data).await {
                        warn!(
                            event_name,
                            position,
                            priority = subscriber.priority(),
                            error = %source,
                            "subscriber failed"
                        );
                        failures.push(SubscriberFailure {
                            position,
                            priority: subscriber.priority(),
                            source,
                        });
                    }
                }

                if failures.is_empty() {
                    Ok(())
                } else {
                    Err(EventError::dispatch(event_name, failures).into())
                }
            }
        }
    }

    /// 以载荷类型的默认值发布事件（如 JSON 的 `null`）
    pub async fn publish_default(&self, event_name: &str) -> anyhow::Result<()>
    where
        E: Default,
    {
        self.publish(event_name, E::default()).await
    }

    /// 获取事件的订阅者（按调用顺序）；返回的是快照
    pub fn get_subscribers(&self, event_name: &str) -> Vec<Subscription<E>> {
        self.subscribers
            .get(event_name)
            .map(|list| list.clone())
            .unwrap_or_default()
    }

    pub fn has_subscribers(&self, event_name: &str) -> bool {
        self.subscriber_count(event_name) > 0
    }

    pub fn subscriber_count(&self, event_name: &str) -> usize {
        self.subscribers
            .get(event_name)
            .map(|list| list.len())
            .unwrap_or(0)
    }

    /// 获取存在订阅者的事件名列表（按字典序）
    pub fn registered_events(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .subscribers
            .iter()
            .filter(|e| !e.value().is_empty())
            .map(|e| e.key().clone())
            .collect();
        names.sort_unstable();
        names
    }

    /// 清空全部事件与订阅
    pub fn clear(&self) {
        let events = self.subscribers.len();
        self.subscribers.clear();
        debug!(events, "cleared all subscribers");
    }
}

impl<E> Service for EventService<E>
where
    E: Send + Sync,
{
    fn container(&self) -> &Arc<ServiceContainer> {
        &self.container
    }
}

impl<E> fmt::Debug for EventService<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventService")
            .field("container", &self.container)
            .field("config", &self.config)
            .field("events", &self.subscribers.len())
            .finish()
    }
}
