use bon::Builder;
use serde::{Deserialize, Serialize};

/// 订阅者失败时的分发策略
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DispatchPolicy {
    /// 首个失败即中止本次发布，原样返回该订阅者的错误
    #[default]
    AbortOnFirstError,
    /// 依次调用全部订阅者，结束后汇总返回所有失败
    CollectErrors,
}

/// 事件服务配置
#[derive(Builder, Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EventServiceConfig {
    /// 订阅者失败时的处理方式
    #[builder(default)]
    pub dispatch_policy: DispatchPolicy,
    /// 未显式指定优先级时使用的默认优先级
    #[builder(default)]
    pub default_priority: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_aborts_on_first_error() {
        let config = EventServiceConfig::default();
        assert_eq!(config.dispatch_policy, DispatchPolicy::AbortOnFirstError);
        assert_eq!(config.default_priority, 0);
    }

    #[test]
    fn deserializes_from_partial_json() {
        let config: EventServiceConfig =
            serde_json::from_value(serde_json::json!({ "dispatch_policy": "collect_errors" }))
                .unwrap();
        assert_eq!(config.dispatch_policy, DispatchPolicy::CollectErrors);
        assert_eq!(config.default_priority, 0);
    }

    #[test]
    fn builder_sets_fields() {
        let config = EventServiceConfig::builder()
            .dispatch_policy(DispatchPolicy::CollectErrors)
            .default_priority(5)
            .build();
        assert_eq!(config.dispatch_policy, DispatchPolicy::CollectErrors);
        assert_eq!(config.default_priority, 5);
    }
}
