//! Turns an adapter plus a caller's network config into a concrete URL.

use std::collections::BTreeMap;

use crate::app::{FeedbricksError, Result};
use crate::config::{NetworkConfig, Security};
use crate::domain::NetworkKind;
use crate::network::NetworkAdapter;
use crate::template;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestDescriptor {
    pub network: NetworkKind,
    pub url: String,
}

/// Resolve the parameter set for one request.
///
/// Order: adapter defaults, then caller parameters, then `protocol` from the
/// security preference. Prepare transforms run on the keys that are present,
/// after which every required parameter must exist.
pub fn resolve_params(
    adapter: &NetworkAdapter,
    network: &NetworkConfig,
    security: Security,
) -> Result<BTreeMap<String, String>> {
    let mut params: BTreeMap<String, String> = adapter
        .defaults
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

    for (key, value) in &network.params {
        params.insert(key.clone(), value.to_string());
    }

    params.insert("protocol".to_string(), security.protocol().to_string());

    for (key, prepare) in adapter.prepare {
        if let Some(value) = params.get_mut(*key) {
            *value = prepare(value);
        }
    }

    if let Some(missing) = adapter.required.iter().find(|k| !params.contains_key(**k)) {
        return Err(FeedbricksError::MissingRequiredParam {
            network: adapter.kind.to_string(),
            param: missing.to_string(),
        });
    }

    Ok(params)
}

pub fn build(
    adapter: &NetworkAdapter,
    network: &NetworkConfig,
    security: Security,
) -> Result<RequestDescriptor> {
    let params = resolve_params(adapter, network, security)?;
    let url = template::render(adapter.url_template, &params);

    tracing::debug!("Built {} request: {}", adapter.kind, url);

    Ok(RequestDescriptor {
        network: adapter.kind,
        url,
    })
}
