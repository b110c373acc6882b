// TUIC
//
// v5 使用 uuid + password 认证，v4 使用 token

use super::{NodeSchema, fields};
use crate::atoms::NodeType;
use crate::error::SchemaError;
use serde::{Deserialize, Serialize};

const CONGESTION_CONTROLS: &[&str] = &["cubic", "new_reno", "bbr"];

fn default_version() -> u8 {
    5
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TuicConfig {
    pub hostname: String,
    #[serde(deserialize_with = "fields::de_port")]
    pub port: u16,
    #[serde(default = "default_version")]
    pub version: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sni: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skip_cert_verify: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alpn: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub congestion_control: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port_hopping: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port_hopping_interval: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub udp_relay: Option<bool>,
}

impl NodeSchema for TuicConfig {
    const NODE_TYPE: NodeType = NodeType::Tuic;

    fn validate(&self) -> Result<(), SchemaError> {
        fields::check_hostname("hostname", &self.hostname)?;

        match self.version {
            5 => {
                let uuid = self
                    .uuid
                    .as_deref()
                    .ok_or_else(|| SchemaError::field("uuid", "TUIC v5 必须设置"))?;
                fields::check_uuid("uuid", uuid)?;

                let password = self
                    .password
                    .as_deref()
                    .ok_or_else(|| SchemaError::field("password", "TUIC v5 必须设置"))?;
                fields::check_not_blank("password", password)?;
            }
            4 => {
                let token = self
                    .token
                    .as_deref()
                    .ok_or_else(|| SchemaError::field("token", "TUIC v4 必须设置"))?;
                fields::check_not_blank("token", token)?;
            }
            other => {
                return Err(SchemaError::field(
                    "version",
                    format!("只支持 4 或 5：{}", other),
                ));
            }
        }

        if let Some(congestion_control) = &self.congestion_control {
            fields::check_one_of("congestionControl", congestion_control, CONGESTION_CONTROLS)?;
        }

        if let Some(port_hopping) = &self.port_hopping {
            fields::check_port_hopping("portHopping", port_hopping)?;
        }

        if self.port_hopping_interval.is_some() && self.port_hopping.is_none() {
            return Err(SchemaError::field(
                "portHoppingInterval",
                "需要同时设置 portHopping",
            ));
        }

        Ok(())
    }
}
