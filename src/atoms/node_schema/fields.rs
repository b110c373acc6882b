// 通用字段解析与校验

use crate::error::SchemaError;
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

// 端口：数字或数字字符串，范围 1-65535
pub fn de_port<'de, D>(deserializer: D) -> Result<u16, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    parse_port(&value).map_err(D::Error::custom)
}

pub fn parse_port(value: &Value) -> Result<u16, String> {
    let port = match value {
        Value::Number(n) => n
            .as_u64()
            .ok_or_else(|| format!("端口必须是正整数：{}", n))?,
        Value::String(s) => s
            .trim()
            .parse::<u64>()
            .map_err(|_| format!("端口必须是数字：{}", s))?,
        other => return Err(format!("端口类型无效：{}", other)),
    };

    if !(1..=65535).contains(&port) {
        return Err(format!("端口超出有效范围：{}", port));
    }

    Ok(port as u16)
}

// 非负整数，兼容字符串写法（例如 alterId: "0"）
pub fn de_lenient_u32<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    match &value {
        Value::Number(n) => n
            .as_u64()
            .and_then(|n| u32::try_from(n).ok())
            .ok_or_else(|| D::Error::custom(format!("必须是非负整数：{}", n))),
        Value::String(s) => s
            .trim()
            .parse::<u32>()
            .map_err(|_| D::Error::custom(format!("必须是非负整数：{}", s))),
        other => Err(D::Error::custom(format!("类型无效：{}", other))),
    }
}

pub fn check_not_blank(field: &str, value: &str) -> Result<(), SchemaError> {
    if value.trim().is_empty() {
        return Err(SchemaError::field(field, "不能为空"));
    }
    Ok(())
}

// 主机名或 IP：非空，不含空白和 URL 分隔符
pub fn check_hostname(field: &str, value: &str) -> Result<(), SchemaError> {
    check_not_blank(field, value)?;

    if value.len() > 253 {
        return Err(SchemaError::field(field, "长度超过 253"));
    }

    if let Some(c) = value
        .chars()
        .find(|c| c.is_whitespace() || matches!(c, '/' | '@' | '#' | '?'))
    {
        return Err(SchemaError::field(
            field,
            format!("包含非法字符 {:?}：{}", c, value),
        ));
    }

    Ok(())
}

pub fn check_uuid(field: &str, value: &str) -> Result<(), SchemaError> {
    uuid::Uuid::parse_str(value.trim())
        .map(|_| ())
        .map_err(|e| SchemaError::field(field, format!("不是有效的 UUID：{}", e)))
}

pub fn check_one_of(field: &str, value: &str, allowed: &[&str]) -> Result<(), SchemaError> {
    if !allowed.contains(&value) {
        return Err(SchemaError::field(
            field,
            format!("不支持的取值 {}，可选：{}", value, allowed.join(", ")),
        ));
    }
    Ok(())
}

// Base64 编码的密钥，解码后长度必须在 lengths 之中
pub fn check_base64_key(field: &str, value: &str, lengths: &[usize]) -> Result<(), SchemaError> {
    let bytes = BASE64
        .decode(value.trim().as_bytes())
        .map_err(|e| SchemaError::field(field, format!("Base64 解码失败：{}", e)))?;

    if !lengths.contains(&bytes.len()) {
        return Err(SchemaError::field(
            field,
            format!("密钥长度 {} 字节无效", bytes.len()),
        ));
    }

    Ok(())
}

// 用户名和密码必须同时设置或同时留空
pub fn check_credentials(
    username: Option<&str>,
    password: Option<&str>,
) -> Result<(), SchemaError> {
    match (username, password) {
        (Some(_), None) => Err(SchemaError::field("password", "设置了 username 时必须设置")),
        (None, Some(_)) => Err(SchemaError::field("username", "设置了 password 时必须设置")),
        _ => Ok(()),
    }
}

// 端口跳跃：例如 "5000-6000,7000"
pub fn check_port_hopping(field: &str, value: &str) -> Result<(), SchemaError> {
    check_not_blank(field, value)?;

    for segment in value.split(',') {
        let segment = segment.trim();
        let (start, end) = segment.split_once('-').unwrap_or((segment, segment));

        let parse = |s: &str| {
            parse_port(&Value::String(s.to_string()))
                .map_err(|reason| SchemaError::field(field, reason))
        };
        let (start, end) = (parse(start)?, parse(end)?);

        if start > end {
            return Err(SchemaError::field(
                field,
                format!("端口范围起点大于终点：{}", segment),
            ));
        }
    }

    Ok(())
}

pub fn check_endpoint(field: &str, value: &str) -> Result<(), SchemaError> {
    let (host, port) = value
        .rsplit_once(':')
        .ok_or_else(|| SchemaError::field(field, format!("缺少端口：{}", value)))?;

    let host = host.trim_start_matches('[').trim_end_matches(']');
    check_hostname(field, host)?;
    parse_port(&Value::String(port.to_string()))
        .map(|_| ())
        .map_err(|reason| SchemaError::field(field, reason))
}
