// 分子模块：类型分发、Vmess 字段整理、批处理流水线、Provider

pub mod custom_provider;
pub mod node_dispatcher;
pub mod node_pipeline;
pub mod vmess_fixup;

pub use custom_provider::{
    CustomParams, CustomProvider, NodeSource, NodeSupplier, Provider, ProviderConfig,
};
pub use node_pipeline::{NodeFailure, NodeListReport};
