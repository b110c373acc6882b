// 节点处理流水线
//
// 单个描述：旧版链接展开 → 废弃字段检查 → 类型分发 → 默认 underlyingProxy → Vmess 整理
// 批处理：逐个处理，失败只记录索引并跳过，成功的节点保持输入顺序

use super::node_dispatcher::dispatch;
use super::vmess_fixup;
use crate::atoms::deprecated_fields::ensure_no_deprecated;
use crate::atoms::legacy_uri;
use crate::atoms::{NodeConfig, RawDescriptor};
use crate::error::NodeError;
use serde_json::Value;

// 处理失败的节点
#[derive(Debug)]
pub struct NodeFailure {
    // 在本次获取到的描述列表中的位置（从 0 开始）
    pub index: usize,
    pub error: NodeError,
}

// 一次批处理的结果
#[derive(Debug, Default)]
pub struct NodeListReport {
    pub nodes: Vec<NodeConfig>,
    pub failures: Vec<NodeFailure>,
}

impl NodeListReport {
    pub fn total(&self) -> usize {
        self.nodes.len() + self.failures.len()
    }

    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

pub fn process_descriptor(
    value: Value,
    default_underlying_proxy: Option<&str>,
) -> Result<NodeConfig, NodeError> {
    let descriptor = legacy_uri::expand(RawDescriptor::try_from(value)?)?;
    ensure_no_deprecated(&descriptor)?;

    let node = dispatch(descriptor)?.with_default_underlying_proxy(default_underlying_proxy);

    match node {
        NodeConfig::Vmess(vmess) => vmess_fixup::normalize(vmess).map(NodeConfig::Vmess),
        other => Ok(other),
    }
}

pub fn process_batch(
    provider: &str,
    descriptors: Vec<Value>,
    default_underlying_proxy: Option<&str>,
) -> NodeListReport {
    let report = descriptors.into_iter().enumerate().fold(
        NodeListReport::default(),
        |mut report, (index, value)| {
            match process_descriptor(value, default_underlying_proxy) {
                Ok(node) => report.nodes.push(node),
                Err(error) => {
                    log::warn!("[{}] 第 {} 个节点无效，已跳过：{}", provider, index, error);
                    report.failures.push(NodeFailure { index, error });
                }
            }
            report
        },
    );

    log::info!(
        "[{}] 节点解析完成：{}/{} 个有效",
        provider,
        report.nodes.len(),
        report.total()
    );

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::atoms::NodeType;
    use base64::Engine;
    use base64::engine::general_purpose::STANDARD;
    use serde_json::json;

    fn http(name: &str) -> Value {
        json!({
            "type": "http",
            "nodeName": name,
            "hostname": "proxy.example.com",
            "port": 8080,
        })
    }

    fn names(report: &NodeListReport) -> Vec<&str> {
        report.nodes.iter().map(NodeConfig::node_name).collect()
    }

    #[test]
    fn test_legacy_shadowsocks_descriptor() {
        let uri = format!("ss://{}", STANDARD.encode("aes-256-gcm:secret@example.com:8388"));
        let result = process_descriptor(json!({ "nodeName": "ss", "uri": uri }), None);

        match result {
            Ok(NodeConfig::Shadowsocks(node)) => {
                assert_eq!(node.protocol.hostname, "example.com");
                assert_eq!(node.protocol.port, 8388);
                assert_eq!(node.protocol.password, "secret");
                match serde_json::to_value(node.protocol.method) {
                    Ok(method) => assert_eq!(method, json!("aes-256-gcm")),
                    Err(e) => panic!("{}", e),
                }
            }
            other => panic!("{:?}", other),
        }
    }

    #[test]
    fn test_non_object_descriptor() {
        let result = process_descriptor(json!("ss://abc"), None);
        assert!(matches!(result, Err(NodeError::NotAnObject)));
    }

    #[test]
    fn test_deprecated_field_checked_after_expansion() {
        let mut value = http("web");
        value["obfs-host"] = json!("www.bing.com");
        match process_descriptor(value, None) {
            Err(NodeError::DeprecatedField { field, replacement }) => {
                assert_eq!(field, "obfs-host");
                assert_eq!(replacement, "obfsHost");
            }
            other => panic!("{:?}", other),
        }
    }

    #[test]
    fn test_default_underlying_proxy_applied() {
        match process_descriptor(http("web"), Some("relay")) {
            Ok(node) => assert_eq!(node.underlying_proxy(), Some("relay")),
            Err(e) => panic!("{}", e),
        }
    }

    #[test]
    fn test_vmess_goes_through_fixup() {
        let result = process_descriptor(
            json!({
                "type": "vmess",
                "nodeName": "vmess",
                "hostname": "v.example.com",
                "port": 443,
                "uuid": "1386f85e-657b-4d6e-9d56-78badb75e1fd",
                "host": "a.example.com",
            }),
            None,
        );
        match result {
            Ok(NodeConfig::Vmess(node)) => {
                assert_eq!(node.protocol.sni.as_deref(), Some("a.example.com"))
            }
            other => panic!("{:?}", other),
        }
    }

    #[test]
    fn test_batch_keeps_order_and_isolates_failures() {
        let descriptors = vec![
            http("first"),
            json!({ "nodeName": "untyped", "hostname": "a.example.com", "port": 1 }),
            http("second"),
            json!({ "type": "http", "nodeName": "old", "hostname": "a.example.com", "port": 1, "udp-relay": true }),
            json!(null),
            http("third"),
        ];

        let report = process_batch("test", descriptors, None);

        assert_eq!(names(&report), vec!["first", "second", "third"]);
        assert_eq!(report.total(), 6);
        assert!(!report.is_complete());

        let failed: Vec<usize> = report.failures.iter().map(|f| f.index).collect();
        assert_eq!(failed, vec![1, 3, 4]);
        assert!(matches!(
            report.failures[0].error,
            NodeError::UnknownNodeType(None)
        ));
        assert!(matches!(
            report.failures[1].error,
            NodeError::DeprecatedField {
                field: "udp-relay",
                ..
            }
        ));
        assert!(matches!(report.failures[2].error, NodeError::NotAnObject));
    }

    #[test]
    fn test_empty_batch() {
        let report = process_batch("test", Vec::new(), Some("relay"));
        assert!(report.nodes.is_empty());
        assert!(report.is_complete());
    }

    #[test]
    fn test_batch_mixed_protocols() {
        let descriptors = vec![
            json!({
                "type": "snell", "nodeName": "snell", "hostname": "s.example.com",
                "port": 44046, "psk": "psk",
            }),
            json!({
                "type": "vless", "nodeName": "vless", "hostname": "v.example.com",
                "port": 443, "uuid": "1386f85e-657b-4d6e-9d56-78badb75e1fd",
            }),
        ];

        let report = process_batch("test", descriptors, None);
        let types: Vec<NodeType> = report.nodes.iter().map(NodeConfig::node_type).collect();
        assert_eq!(types, vec![NodeType::Snell, NodeType::Vless]);
    }
}
