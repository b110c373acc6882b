// 原子模块：节点描述、类型标签、旧版链接解码、废弃字段检查、各协议 schema

pub mod deprecated_fields;
pub mod descriptor;
pub mod legacy_uri;
pub mod node_schema;
pub mod node_type;

pub use descriptor::RawDescriptor;
pub use node_schema::{NodeCommon, NodeConfig, NodeSchema};
pub use node_type::NodeType;
