//! 订阅（Subscription）
//!
//! 一次对某事件名的订阅登记：回调、事件名与优先级。
//! 句柄可廉价克隆，克隆得到的仍是同一个订阅；相等性按分配身份比较，
//! 而不是按事件名与回调比较。
//!
use super::subscriber::EventSubscriber;
use std::fmt;
use std::sync::Arc;

struct Inner<E> {
    callback: Arc<dyn EventSubscriber<E>>,
    event_name: String,
    priority: i32,
}

/// 订阅句柄：由 `EventService::subscribe*` 创建，调用方保留以便退订
pub struct Subscription<E> {
    inner: Arc<Inner<E>>,
}

impl<E> Subscription<E>
where
    E: Send + Sync + 'static,
{
    pub(crate) fn new(
        event_name: impl Into<String>,
        callback: Arc<dyn EventSubscriber<E>>,
        priority: i32,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                callback,
                event_name: event_name.into(),
                priority,
            }),
        }
    }

    pub fn event_name(&self) -> &str {
        &self.inner.event_name
    }

    /// 优先级：数值越大越先被调用
    pub fn priority(&self) -> i32 {
        self.inner.priority
    }

    pub fn callback(&self) -> &Arc<dyn EventSubscriber<E>> {
        &self.inner.callback
    }

    /// 以事件载荷调用订阅者
    pub async fn invoke(&self, event_data: &E) -> anyhow::Result<()> {
        self.inner.callback.call(event_data).await
    }
}

impl<E> Clone for Subscription<E> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<E> PartialEq for Subscription<E> {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl<E> Eq for Subscription<E> {}

impl<E> fmt::Debug for Subscription<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("event_name", &self.inner.event_name)
            .field("priority", &self.inner.priority)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eventing::FnSubscriber;

    fn noop() -> Arc<dyn EventSubscriber<()>> {
        Arc::new(FnSubscriber::new(|_: ()| async { Ok(()) }))
    }

    #[test]
    fn identity_is_by_allocation() {
        let callback = noop();
        let a = Subscription::new("user.created", callback.clone(), 1);
        let b = Subscription::new("user.created", callback, 1);

        assert_eq!(a, a.clone());
        assert_ne!(a, b);
    }

    #[test]
    fn exposes_name_and_priority() {
        let s = Subscription::new("order.paid", noop(), -3);
        assert_eq!(s.event_name(), "order.paid");
        assert_eq!(s.priority(), -3);
    }
}
