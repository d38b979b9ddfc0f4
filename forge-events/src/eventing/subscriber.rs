//! 事件订阅者（EventSubscriber）
//!
//! 定义“接收一个事件载荷并异步完成”的调用能力；
//! 闭包通过 `FnSubscriber` 适配为订阅者。
//!
use async_trait::async_trait;
use futures_util::future::BoxFuture;
use std::fmt;
use std::future::Future;

/// 事件订阅者：处理某一事件名下发布的载荷
#[async_trait]
pub trait EventSubscriber<E>: Send + Sync {
    /// 处理事件载荷
    async fn call(&self, event_data: &E) -> anyhow::Result<()>;
}

type SubscriberFn<E> = Box<dyn Fn(E) -> BoxFuture<'static, anyhow::Result<()>> + Send + Sync>;

/// 闭包订阅者：每次调用时克隆一份载荷交给闭包
pub struct FnSubscriber<E> {
    f: SubscriberFn<E>,
}

impl<E> FnSubscriber<E>
where
    E: Clone + Send + Sync + 'static,
{
    pub fn new<F, Fut>(f: F) -> Self
    where
        F: Fn(E) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
    {
        let f: SubscriberFn<E> =
            Box::new(move |event_data: E| -> BoxFuture<'static, anyhow::Result<()>> {
                Box::pin(f(event_data))
            });
        Self { f }
    }
}

#[async_trait]
impl<E> EventSubscriber<E> for FnSubscriber<E>
where
    E: Clone + Send + Sync + 'static,
{
    async fn call(&self, event_data: &E) -> anyhow::Result<()> {
        (self.f)(event_data.clone()).await
    }
}

impl<E> fmt::Debug for FnSubscriber<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnSubscriber").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test]
    async fn closure_receives_a_copy_of_the_payload() {
        let total = Arc::new(AtomicUsize::new(0));
        let sub = FnSubscriber::new({
            let total = total.clone();
            move |n: usize| {
                let total = total.clone();
                async move {
                    total.fetch_add(n, Ordering::SeqCst);
                    Ok(())
                }
            }
        });

        sub.call(&3).await.unwrap();
        sub.call(&4).await.unwrap();
        assert_eq!(total.load(Ordering::SeqCst), 7);
    }

    #[tokio::test]
    async fn closure_error_is_returned_as_is() {
        let sub = FnSubscriber::new(|_: ()| async { Err(anyhow::anyhow!("boom")) });
        let err = sub.call(&()).await.unwrap_err();
        assert_eq!(err.to_string(), "boom");
    }
}
