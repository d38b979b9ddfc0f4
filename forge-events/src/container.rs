//! 服务容器（ServiceContainer）
//!
//! 以类型为键保存共享服务实例，作为显式配置在构造服务时传入，
//! 而非全局的服务定位器。事件服务本身不依赖容器中的任何内容。
//!
use crate::error::{EventError, EventResult};
use dashmap::DashMap;
use std::any::{Any, TypeId, type_name};
use std::fmt;
use std::sync::Arc;

type BoxAnyService = Arc<dyn Any + Send + Sync>;

/// 基于内存的服务容器
/// - 通过 TypeId 注册不同类型的服务实例
/// - 解析时以类型擦除方式取出并还原为 `Arc<T>`
#[derive(Default)]
pub struct ServiceContainer {
    services: DashMap<TypeId, (&'static str, BoxAnyService)>,
}

impl ServiceContainer {
    pub fn new() -> Self {
        Self::default()
    }

    /// 注册服务实例；同一类型重复注册时后者覆盖前者
    pub fn register<T>(&self, service: T)
    where
        T: Send + Sync + 'static,
    {
        self.register_arc(Arc::new(service));
    }

    /// 注册已共享的服务实例
    pub fn register_arc<T>(&self, service: Arc<T>)
    where
        T: Send + Sync + 'static,
    {
        self.services
            .insert(TypeId::of::<T>(), (type_name::<T>(), service as BoxAnyService));
    }

    /// 解析服务实例
    pub fn resolve<T>(&self) -> EventResult<Arc<T>>
    where
        T: Send + Sync + 'static,
    {
        let Some((name, service)) = self.services.get(&TypeId::of::<T>()).map(|s| s.clone()) else {
            return Err(EventError::ServiceNotFound {
                service: type_name::<T>(),
            });
        };

        service.downcast::<T>().map_err(|_| EventError::TypeMismatch {
            expected: type_name::<T>(),
            found: name,
        })
    }

    pub fn contains<T>(&self) -> bool
    where
        T: Send + Sync + 'static,
    {
        self.services.contains_key(&TypeId::of::<T>())
    }

    pub fn len(&self) -> usize {
        self.services.len()
    }

    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }

    /// 获取已注册的服务类型名列表（只读视图）
    pub fn registered_services(&self) -> Vec<&'static str> {
        self.services.iter().map(|e| e.value().0).collect()
    }
}

impl fmt::Debug for ServiceContainer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceContainer")
            .field("services", &self.registered_services())
            .finish()
    }
}
