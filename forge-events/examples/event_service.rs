/// 事件服务示例
/// 展示按优先级分发、订阅者失败中止与退订
use anyhow::Result as AnyResult;
use forge_events::container::ServiceContainer;
use forge_events::eventing::{EventSubscriber, JsonEventService};
use forge_events::service::Service;
use serde_json::{Value, json};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

// ============================================================================
// 结构体订阅者
// ============================================================================

struct Greeting {
    prefix: &'static str,
}

struct Mailer {
    greeting: Arc<Greeting>,
}

#[async_trait::async_trait]
impl EventSubscriber<Value> for Mailer {
    async fn call(&self, event_data: &Value) -> AnyResult<()> {
        let Some(email) = event_data["email"].as_str() else {
            anyhow::bail!("missing email in {event_data}");
        };
        println!("[mailer] {} {email}", self.greeting.prefix);
        Ok(())
    }
}

#[tokio::main]
async fn main() -> AnyResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "debug".into()))
        .init();

    let container = Arc::new(ServiceContainer::new());
    container.register(Greeting { prefix: "welcome" });

    let events = JsonEventService::builder()
        .container(container)
        .build();

    // 审计优先级最高，最先执行
    events.subscribe_with_priority(
        "user.registered",
        |data: Value| async move {
            println!("[audit] user registered: {data}");
            Ok(())
        },
        100,
    );

    let mailer = Mailer {
        greeting: events.container().resolve::<Greeting>()?,
    };
    let mailer = events.subscribe_handler("user.registered", Arc::new(mailer), 0);

    events
        .publish("user.registered", json!({ "email": "alice@example.com" }))
        .await?;

    // 缺少 email：mailer 失败，错误原样返回给发布方
    if let Err(err) = events.publish("user.registered", json!({ "name": "bob" })).await {
        println!("[main] publish failed: {err}");
    }

    println!(
        "[main] subscribers before unsubscribe: {}",
        events.subscriber_count("user.registered")
    );
    events.unsubscribe(&mailer);
    println!(
        "[main] subscribers after unsubscribe: {}",
        events.subscriber_count("user.registered")
    );

    // 无订阅者的事件直接返回
    events.publish_default("user.deleted").await?;

    Ok(())
}
