// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use url::{ParseError, Url};

/// 租户查询参数名，与原有页面保持一致
pub const TENANT_QUERY_PARAM: &str = "practice_id";

/// 校验运行的根URL
///
/// 根URL必须是可解析的绝对URL，且协议为http或https
pub fn parse_base_url(base_url: &str) -> Result<Url, ParseError> {
    let url = Url::parse(base_url)?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        _ => Err(ParseError::RelativeUrlWithoutBase),
    }
}

/// 将页面路径解析为完整的目标URL，并注入租户参数
///
/// 页面路径可以携带查询串（如 `/x?tab=y`）。如果目标URL尚未携带
/// 租户参数，则追加 `practice_id=<tenant_id>`。
pub fn build_target_url(base_url: &Url, page_path: &str, tenant_id: &str) -> Result<Url, ParseError> {
    let mut target = base_url.join(page_path)?;

    let has_tenant = target
        .query_pairs()
        .any(|(key, _)| key == TENANT_QUERY_PARAM);
    if !has_tenant {
        target
            .query_pairs_mut()
            .append_pair(TENANT_QUERY_PARAM, tenant_id);
    }

    Ok(target)
}
