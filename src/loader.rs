use std::collections::{BTreeMap, HashMap};

use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::credentials::Credentials;
use crate::error::ConnectorError;
use crate::host::{HttpHelper, HttpRequest};

/// Backend discovery endpoint, relative to the credential's API endpoint.
pub const DISCOVERY_PATH: &str = "system/commands-events-per-entity";

/// One selectable entry for the collection parameter: the backend-reported
/// entity name and its path.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct EntityOption {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Deserialize)]
struct EntityCapabilities {
    path: String,
    // The per-entity command/event lists are irrelevant to option loading.
}

/// Fetch the backend capability map and turn its keys into collection options.
/// Called by the host while populating the form, possibly many times; nothing
/// is cached. Failures propagate unmodified to the host's option-resolution
/// layer (continue-on-failure does not apply here).
pub async fn load_entity_options(
    helper: &dyn HttpHelper,
    credentials: &Credentials,
) -> Result<Vec<EntityOption>, ConnectorError> {
    let request = HttpRequest {
        method: Method::GET,
        uri: format!("{}/{}", credentials.base_url(), DISCOVERY_PATH),
        headers: vec![credentials.bearer_header()],
        qs: HashMap::new(),
        body: None,
    };

    tracing::debug!(uri = %request.uri, "loading Fractal Forge entity options");
    let response = helper.request(request).await?;

    // Key order is whatever the map enumeration yields; callers must not rely
    // on it.
    let entities: BTreeMap<String, EntityCapabilities> = serde_json::from_value(response)
        .map_err(|e| ConnectorError::Api {
            message: format!("unexpected discovery payload: {}", e),
            status: None,
            payload: None,
        })?;

    Ok(entities
        .into_iter()
        .map(|(name, caps)| EntityOption {
            name,
            value: caps.path,
        })
        .collect())
}
