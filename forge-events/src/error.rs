//! 事件服务统一错误定义
//!
//! 订阅者自身的失败以 `anyhow::Error` 原样向上传递，不做包装；
//! 此处仅收敛容器解析与“收集全部失败”分发策略所需的错误类型。
//!
use thiserror::Error;

/// 统一错误类型
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum EventError {
    // --- 服务容器 ---
    #[error("service not found: {service}")]
    ServiceNotFound { service: &'static str },
    #[error("type mismatch: expected={expected}, found={found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },

    // --- 事件分发 ---
    #[error("dispatch failed: event={event_name}, failures={}", .failures.len())]
    Dispatch {
        event_name: String,
        failures: Vec<SubscriberFailure>,
    },
}

/// 单个订阅者的失败记录（仅在 `DispatchPolicy::CollectErrors` 下产生）
#[derive(Debug, Error)]
#[error("subscriber #{position} (priority={priority}) failed: {source}")]
pub struct SubscriberFailure {
    /// 该订阅者在本次分发快照中的位置（从 0 开始）
    pub position: usize,
    pub priority: i32,
    #[source]
    pub source: anyhow::Error,
}

impl EventError {
    pub fn dispatch(event_name: impl Into<String>, failures: Vec<SubscriberFailure>) -> Self {
        EventError::Dispatch {
            event_name: event_name.into(),
            failures,
        }
    }
}

/// 统一 Result 类型别名
pub type EventResult<T> = Result<T, EventError>;
