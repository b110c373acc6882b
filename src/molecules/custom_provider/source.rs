// 节点来源：静态列表或异步获取

use crate::error::ProviderError;
use async_trait::async_trait;
use serde_json::{Map, Value};
use std::fmt;
use std::future::Future;
use std::sync::Arc;

// 透传给动态来源的参数
pub type CustomParams = Map<String, Value>;

// 动态节点来源，每次获取节点列表时调用一次，不做缓存
#[async_trait]
pub trait NodeSupplier: Send + Sync {
    async fn supply(&self, params: CustomParams) -> anyhow::Result<Vec<Value>>;
}

#[async_trait]
impl<F, Fut> NodeSupplier for F
where
    F: Fn(CustomParams) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = anyhow::Result<Vec<Value>>> + Send + 'static,
{
    async fn supply(&self, params: CustomParams) -> anyhow::Result<Vec<Value>> {
        (self)(params).await
    }
}

#[derive(Clone)]
pub enum NodeSource {
    Static(Vec<Value>),
    Dynamic(Arc<dyn NodeSupplier>),
}

impl NodeSource {
    pub fn dynamic(supplier: impl NodeSupplier + 'static) -> Self {
        NodeSource::Dynamic(Arc::new(supplier))
    }

    pub fn is_dynamic(&self) -> bool {
        matches!(self, NodeSource::Dynamic(_))
    }

    // 取得本次要处理的描述列表，动态来源的错误原样返回
    pub async fn resolve(&self, params: Option<CustomParams>) -> Result<Vec<Value>, ProviderError> {
        match self {
            NodeSource::Static(nodes) => {
                log::debug!("使用静态节点列表，共 {} 个描述", nodes.len());
                Ok(nodes.clone())
            }
            NodeSource::Dynamic(supplier) => {
                let nodes = supplier.supply(params.unwrap_or_default()).await?;
                log::debug!("动态来源返回 {} 个描述", nodes.len());
                Ok(nodes)
            }
        }
    }
}

impl fmt::Debug for NodeSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeSource::Static(nodes) => f.debug_tuple("Static").field(&nodes.len()).finish(),
            NodeSource::Dynamic(_) => f.write_str("Dynamic"),
        }
    }
}

impl From<Vec<Value>> for NodeSource {
    fn from(nodes: Vec<Value>) -> Self {
        NodeSource::Static(nodes)
    }
}
