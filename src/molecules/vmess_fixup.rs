// Vmess 旧版字段整理
//
// 按顺序处理：
// 1. host 补全 sni
// 2. wsHeaders 迁移到 wsOpts.headers
// 3. ws / h2 / http 传输下不允许残留顶层 path
//
// ws 传输下新建 wsOpts 时顶层 path 一并迁入并移除，因此第 3 步只会拦截未迁移的 path。

use crate::atoms::NodeType;
use crate::atoms::node_schema::transport::default_path;
use crate::atoms::node_schema::{Network, Node, VmessConfig, WsOpts};
use crate::error::NodeError;

pub fn normalize(node: Node<VmessConfig>) -> Result<Node<VmessConfig>, NodeError> {
    let Node { common, protocol } = node;

    let protocol = relocate_ws_headers(fill_sni_from_host(protocol))?;
    ensure_no_top_level_path(&protocol)?;

    Ok(Node { common, protocol })
}

fn fill_sni_from_host(mut config: VmessConfig) -> VmessConfig {
    if config.sni.is_none()
        && let Some(host) = &config.host
    {
        config.sni = Some(host.clone());
    }
    config
}

fn relocate_ws_headers(mut config: VmessConfig) -> Result<VmessConfig, NodeError> {
    let Some(headers) = config.ws_headers.take() else {
        return Ok(config);
    };

    let ws_opts = match config.ws_opts.take() {
        None => {
            // 只有 ws 传输才迁入顶层 path，h2 / http 的 path 留给后续检查
            let path = match config.network {
                Network::Ws => config.path.take(),
                _ => None,
            };
            let ws_opts = WsOpts {
                path: path.unwrap_or_else(default_path),
                headers: Some(headers),
            };
            ws_opts.validate().map_err(|source| NodeError::Schema {
                node_type: NodeType::Vmess,
                source,
            })?;
            ws_opts
        }
        Some(WsOpts {
            headers: Some(_), ..
        }) => {
            return Err(NodeError::VmessConflict(
                "wsHeaders 与 wsOpts.headers 不能同时设置，请只保留 wsOpts.headers".to_string(),
            ));
        }
        Some(existing) => WsOpts {
            headers: Some(headers),
            ..existing
        },
    };

    config.ws_opts = Some(ws_opts);
    Ok(config)
}

fn ensure_no_top_level_path(config: &VmessConfig) -> Result<(), NodeError> {
    let replacement = match config.network {
        Network::Ws => "wsOpts.path",
        Network::H2 => "h2Opts.path",
        Network::Http => "httpOpts.path",
        _ => return Ok(()),
    };

    if config.path.is_some() {
        return Err(NodeError::VmessConflict(format!(
            "network 为 {} 时不能使用顶层 path，请改用 {}",
            config.network.as_str(),
            replacement
        )));
    }

    Ok(())
}
