// 废弃字段检查
//
// 出现任意一个废弃字段即视为该节点配置错误，需要迁移到新字段名

use crate::atoms::RawDescriptor;
use crate::error::NodeError;

// (废弃字段, 替代字段)
pub const DEPRECATED_FIELDS: &[(&str, &str)] = &[
    ("udp-relay", "udpRelay"),
    ("obfs-host", "obfsHost"),
    ("obfs-uri", "obfsUri"),
];

pub fn ensure_no_deprecated(descriptor: &RawDescriptor) -> Result<(), NodeError> {
    match DEPRECATED_FIELDS
        .iter()
        .find(|(field, _)| descriptor.contains_key(field))
    {
        Some(&(field, replacement)) => Err(NodeError::DeprecatedField { field, replacement }),
        None => Ok(()),
    }
}
