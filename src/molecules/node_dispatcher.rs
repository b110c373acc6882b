// 按 type 标签选择协议 schema

use crate::atoms::node_schema::Node;
use crate::atoms::{NodeConfig, NodeSchema, NodeType, RawDescriptor};
use crate::error::NodeError;
use serde_json::Value;

pub const TYPE_FIELD: &str = "type";

pub fn dispatch(descriptor: RawDescriptor) -> Result<NodeConfig, NodeError> {
    let node_type = match descriptor.get(TYPE_FIELD) {
        None | Some(Value::Null) => return Err(NodeError::UnknownNodeType(None)),
        Some(Value::String(tag)) => NodeType::from_tag(tag)
            .ok_or_else(|| NodeError::UnknownNodeType(Some(tag.clone())))?,
        Some(other) => return Err(NodeError::UnknownNodeType(Some(other.to_string()))),
    };

    let value = Value::Object(descriptor.into_map());

    let config = match node_type {
        NodeType::Shadowsocks => NodeConfig::Shadowsocks(validate(&value)?),
        NodeType::Shadowsocksr => NodeConfig::Shadowsocksr(validate(&value)?),
        NodeType::Vmess => NodeConfig::Vmess(validate(&value)?),
        NodeType::Trojan => NodeConfig::Trojan(validate(&value)?),
        NodeType::Socks5 => NodeConfig::Socks5(validate(&value)?),
        NodeType::Http => NodeConfig::Http(validate(&value)?),
        NodeType::Https => NodeConfig::Https(validate(&value)?),
        NodeType::Snell => NodeConfig::Snell(validate(&value)?),
        NodeType::Tuic => NodeConfig::Tuic(validate(&value)?),
        NodeType::Wireguard => NodeConfig::Wireguard(validate(&value)?),
        NodeType::Hysteria2 => NodeConfig::Hysteria2(validate(&value)?),
        NodeType::Vless => NodeConfig::Vless(validate(&value)?),
    };

    Ok(config)
}

fn validate<T: NodeSchema>(value: &Value) -> Result<Node<T>, NodeError> {
    Node::<T>::from_value(value).map_err(|source| NodeError::Schema {
        node_type: T::NODE_TYPE,
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn descriptor(value: Value) -> RawDescriptor {
        match RawDescriptor::try_from(value) {
            Ok(descriptor) => descriptor,
            Err(e) => panic!("{}", e),
        }
    }

    #[test]
    fn test_dispatch_selects_schema_by_tag() {
        let cases = [
            (
                json!({
                    "type": "shadowsocks", "nodeName": "ss", "hostname": "a.example.com",
                    "port": 8388, "method": "aes-256-gcm", "password": "pw",
                }),
                NodeType::Shadowsocks,
            ),
            (
                json!({
                    "type": "trojan", "nodeName": "trojan", "hostname": "a.example.com",
                    "port": 443, "password": "pw",
                }),
                NodeType::Trojan,
            ),
            (
                json!({
                    "type": "socks5", "nodeName": "socks", "hostname": "127.0.0.1", "port": 1080,
                }),
                NodeType::Socks5,
            ),
            (
                json!({
                    "type": "https", "nodeName": "https", "hostname": "a.example.com", "port": 443,
                }),
                NodeType::Https,
            ),
            (
                json!({
                    "type": "hysteria2", "nodeName": "hy2", "hostname": "a.example.com",
                    "port": 443, "password": "pw",
                }),
                NodeType::Hysteria2,
            ),
        ];

        for (value, expected) in cases {
            match dispatch(descriptor(value)) {
                Ok(node) => assert_eq!(node.node_type(), expected),
                Err(e) => panic!("{}: {}", expected, e),
            }
        }
    }

    #[test]
    fn test_missing_tag() {
        let result = dispatch(descriptor(json!({ "nodeName": "x" })));
        assert!(matches!(result, Err(NodeError::UnknownNodeType(None))));

        let result = dispatch(descriptor(json!({ "type": null, "nodeName": "x" })));
        assert!(matches!(result, Err(NodeError::UnknownNodeType(None))));
    }

    #[test]
    fn test_unknown_tag() {
        match dispatch(descriptor(json!({ "type": "hysteria", "nodeName": "x" }))) {
            Err(NodeError::UnknownNodeType(Some(tag))) => assert_eq!(tag, "hysteria"),
            other => panic!("{:?}", other),
        }

        match dispatch(descriptor(json!({ "type": 7, "nodeName": "x" }))) {
            Err(NodeError::UnknownNodeType(Some(tag))) => assert_eq!(tag, "7"),
            other => panic!("{:?}", other),
        }
    }

    #[test]
    fn test_schema_failure_names_type_and_field() {
        let result = dispatch(descriptor(json!({
            "type": "http",
            "nodeName": "web",
            "hostname": "proxy.example.com",
            "port": 70000,
        })));
        match result {
            Err(NodeError::Schema { node_type, source }) => {
                assert_eq!(node_type, NodeType::Http);
                assert_eq!(source.field_path(), Some("port"));
            }
            other => panic!("{:?}", other),
        }
    }
}
