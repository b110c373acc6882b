// Custom Provider
//
// 将调用方提供的松散节点描述（静态列表或异步获取）转换为按协议校验过的强类型节点配置：
// 1. 解码旧版 ss:// / vmess:// 链接
// 2. 拒绝已废弃字段
// 3. 按 type 分发到对应协议的 schema
// 4. 填充默认 underlyingProxy，处理 Vmess 特有字段
//
// 单个节点出错只会丢弃该节点，不影响同批次的其他节点。

pub mod atoms;
pub mod error;
pub mod logger;
pub mod molecules;

pub use atoms::{NodeConfig, NodeType, RawDescriptor};
pub use error::{ConfigError, NodeError, ProviderError, SchemaError};
pub use molecules::{
    CustomParams, CustomProvider, NodeFailure, NodeListReport, NodeSource, NodeSupplier,
    Provider, ProviderConfig,
};
