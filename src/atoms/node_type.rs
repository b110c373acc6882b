// 节点类型标签

use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeType {
    Shadowsocks,
    Shadowsocksr,
    Vmess,
    Trojan,
    Socks5,
    Http,
    Https,
    Snell,
    Tuic,
    Wireguard,
    Hysteria2,
    Vless,
}

impl NodeType {
    pub const ALL: [NodeType; 12] = [
        NodeType::Shadowsocks,
        NodeType::Shadowsocksr,
        NodeType::Vmess,
        NodeType::Trojan,
        NodeType::Socks5,
        NodeType::Http,
        NodeType::Https,
        NodeType::Snell,
        NodeType::Tuic,
        NodeType::Wireguard,
        NodeType::Hysteria2,
        NodeType::Vless,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            NodeType::Shadowsocks => "shadowsocks",
            NodeType::Shadowsocksr => "shadowsocksr",
            NodeType::Vmess => "vmess",
            NodeType::Trojan => "trojan",
            NodeType::Socks5 => "socks5",
            NodeType::Http => "http",
            NodeType::Https => "https",
            NodeType::Snell => "snell",
            NodeType::Tuic => "tuic",
            NodeType::Wireguard => "wireguard",
            NodeType::Hysteria2 => "hysteria2",
            NodeType::Vless => "vless",
        }
    }

    pub fn from_tag(tag: &str) -> Option<NodeType> {
        Self::ALL.into_iter().find(|node_type| node_type.as_str() == tag)
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
