// 旧版节点链接解码
//
// 节点描述中的 uri 字段可以携带旧格式链接：
// - ss://base64(method:password@hostname:port)#name
// - vmess://base64(...)（暂不解析字段，仅接受）
//
// 解码出的字段会覆盖描述中的同名字段，uri 字段本身在解码后移除。

use crate::atoms::RawDescriptor;
use crate::atoms::node_type::NodeType;
use crate::error::NodeError;
use base64::Engine;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

pub const LEGACY_URI_FIELD: &str = "uri";

// 订阅里常见不带 = 补齐的链接
const PAYLOAD_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

static LEGACY_URI_REGEX: Lazy<Result<Regex, String>> = Lazy::new(|| {
    Regex::new(r"^(ss|vmess)://([A-Za-z0-9+/=]+)(#.*)?$")
        .map_err(|e| format!("正则表达式创建失败：{}", e))
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegacyScheme {
    Shadowsocks,
    Vmess,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegacyUri {
    pub scheme: LegacyScheme,
    pub payload: String,
    pub fragment: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShadowsocksFields {
    pub method: String,
    pub password: String,
    pub hostname: String,
    pub port: u16,
}

impl LegacyUri {
    pub fn parse(uri: &str) -> Result<Self, NodeError> {
        let regex = LEGACY_URI_REGEX
            .as_ref()
            .map_err(|e| NodeError::InvalidLegacyUri(e.clone()))?;

        let captures = regex
            .captures(uri)
            .ok_or_else(|| NodeError::InvalidLegacyUri(preview(uri)))?;

        let scheme = match captures.get(1).map(|m| m.as_str()) {
            Some("ss") => LegacyScheme::Shadowsocks,
            Some("vmess") => LegacyScheme::Vmess,
            _ => return Err(NodeError::InvalidLegacyUri(preview(uri))),
        };

        let payload = captures
            .get(2)
            .map(|m| m.as_str().to_string())
            .ok_or_else(|| NodeError::InvalidLegacyUri(preview(uri)))?;

        // 去掉开头的 #，并做 URL 解码
        let fragment = captures
            .get(3)
            .map(|m| urlencoding::decode(&m.as_str()[1..]).unwrap_or_default().to_string())
            .filter(|name| !name.trim().is_empty());

        Ok(Self {
            scheme,
            payload,
            fragment,
        })
    }

    pub fn decode_payload(&self) -> Result<String, NodeError> {
        let bytes = PAYLOAD_ENGINE
            .decode(self.payload.as_bytes())
            .map_err(|e| NodeError::InvalidLegacyUri(format!("Base64 解码失败：{}", e)))?;
        String::from_utf8(bytes)
            .map_err(|e| NodeError::InvalidLegacyUri(format!("UTF-8 转换失败：{}", e)))
    }

    // 解析 ss 载荷：method:password@hostname:port
    pub fn shadowsocks_fields(&self) -> Result<ShadowsocksFields, NodeError> {
        let decoded = self.decode_payload()?;

        let (auth_part, server_part) = decoded
            .split_once('@')
            .ok_or_else(|| NodeError::InvalidLegacyUri("SS 链接格式错误：缺少 @".to_string()))?;

        let (method, password) = auth_part
            .split_once(':')
            .ok_or_else(|| NodeError::InvalidLegacyUri("SS 认证格式错误".to_string()))?;

        let (hostname, port_str) = server_part
            .rsplit_once(':')
            .ok_or_else(|| NodeError::InvalidLegacyUri("SS 链接格式错误：缺少端口".to_string()))?;

        let port = port_str
            .trim()
            .parse::<u16>()
            .map_err(|_| NodeError::InvalidLegacyUri(format!("端口解析失败：{}", port_str)))?;

        Ok(ShadowsocksFields {
            method: method.to_string(),
            password: password.to_string(),
            hostname: hostname.to_string(),
            port,
        })
    }
}

// 展开描述中的旧版链接
pub fn expand(descriptor: RawDescriptor) -> Result<RawDescriptor, NodeError> {
    let (descriptor, envelope) = descriptor.take(LEGACY_URI_FIELD);

    let uri = match envelope {
        None | Some(Value::Null) => return Ok(descriptor),
        Some(Value::String(uri)) => uri,
        Some(_) => {
            return Err(NodeError::InvalidLegacyUri(format!(
                "{} 必须是字符串",
                LEGACY_URI_FIELD
            )));
        }
    };

    let legacy = LegacyUri::parse(uri.trim())?;

    match legacy.scheme {
        LegacyScheme::Shadowsocks => {
            let fields = legacy.shadowsocks_fields()?;
            log::debug!(
                "已展开 ss 链接：{}:{}（{}）",
                fields.hostname,
                fields.port,
                fields.method
            );

            let descriptor = descriptor
                .with("type", NodeType::Shadowsocks.as_str())
                .with("method", fields.method)
                .with("password", fields.password)
                .with("hostname", fields.hostname)
                .with("port", fields.port);

            Ok(match legacy.fragment {
                Some(name) if !descriptor.contains_key("nodeName") => {
                    descriptor.with("nodeName", name)
                }
                _ => descriptor,
            })
        }
        LegacyScheme::Vmess => {
            log::warn!("暂不支持解析 vmess 链接，将只使用节点中已有的字段");
            Ok(descriptor)
        }
    }
}

// 错误信息中只保留链接前 50 个字符
fn preview(uri: &str) -> String {
    uri.chars().take(50).collect()
}
