//! Backend Gateway
//!
//! Boundary to the actinia processing backend. The driver only needs three
//! capabilities from it: resolving a dataset name into backend addressing
//! components, fetching raw layer metadata, and fetching mapset metadata
//! (which carries the native projection). Everything is returned as the
//! backend's flat string-keyed metadata maps; typing happens in the
//! collection service.

use std::collections::HashMap;

use async_trait::async_trait;
use openeo_core::domain::collection::Datatype;

/// Backend addressing components of a dataset name
#[derive(Debug, Clone)]
pub struct LayerAddress {
    pub location: String,
    pub mapset: String,
    pub datatype: Datatype,
    pub layer: String,
}

/// Gateway failure modes
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("unable to resolve dataset name <{0}>: expected location.mapset.datatype.layer")]
    Resolution(String),
    #[error("backend request failed with status {status}: {message}")]
    Backend { status: u16, message: String },
    #[error("backend transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("backend returned an unreadable metadata document: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Parse a dataset name of the form `location.mapset.datatype.layer`
pub fn parse_layer_address(name: &str) -> Result<LayerAddress, GatewayError> {
    let parts: Vec<&str> = name.split('.').collect();
    let [location, mapset, datatype, layer] = parts.as_slice() else {
        return Err(GatewayError::Resolution(name.to_string()));
    };

    if location.is_empty() || mapset.is_empty() || datatype.is_empty() || layer.is_empty() {
        return Err(GatewayError::Resolution(name.to_string()));
    }

    Ok(LayerAddress {
        location: (*location).to_string(),
        mapset: (*mapset).to_string(),
        datatype: Datatype::parse(datatype),
        layer: (*layer).to_string(),
    })
}

/// Capabilities the driver consumes from the processing backend
#[async_trait]
pub trait BackendGateway: Send + Sync {
    /// Resolve a dataset name into its backend addressing components.
    fn resolve(&self, name: &str) -> Result<LayerAddress, GatewayError> {
        parse_layer_address(name)
    }

    /// Fetch raw metadata for the named layer.
    async fn layer_info(&self, name: &str) -> Result<HashMap<String, String>, GatewayError>;

    /// Fetch metadata for a mapset; includes the `projection` descriptor.
    async fn mapset_info(
        &self,
        location: &str,
        mapset: &str,
    ) -> Result<HashMap<String, String>, GatewayError>;
}

/// HTTP gateway to a running actinia instance
#[derive(Debug, Clone)]
pub struct ActiniaGateway {
    base_url: String,
    user: String,
    password: String,
    client: reqwest::Client,
}

impl ActiniaGateway {
    pub fn new(
        base_url: impl Into<String>,
        user: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            user: user.into(),
            password: password.into(),
            client: reqwest::Client::new(),
        }
    }

    /// Perform an authenticated GET and return the flattened metadata map.
    async fn fetch_info(&self, url: String) -> Result<HashMap<String, String>, GatewayError> {
        let response = self
            .client
            .get(&url)
            .basic_auth(&self.user, Some(&self.password))
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.text().await?;

        interpret_response(status, &body)
    }

    fn layer_url(&self, address: &LayerAddress) -> String {
        let kind = match address.datatype {
            Datatype::Strds => "strds",
            Datatype::Vector => "vector_layers",
            Datatype::Raster | Datatype::Unknown(_) => "raster_layers",
        };
        format!(
            "{}/locations/{}/mapsets/{}/{}/{}",
            self.base_url, address.location, address.mapset, kind, address.layer
        )
    }
}

#[async_trait]
impl BackendGateway for ActiniaGateway {
    async fn layer_info(&self, name: &str) -> Result<HashMap<String, String>, GatewayError> {
        let address = self.resolve(name)?;
        self.fetch_info(self.layer_url(&address)).await
    }

    async fn mapset_info(
        &self,
        location: &str,
        mapset: &str,
    ) -> Result<HashMap<String, String>, GatewayError> {
        let url = format!(
            "{}/locations/{}/mapsets/{}/info",
            self.base_url, location, mapset
        );
        self.fetch_info(url).await
    }
}

/// Decide success or failure from an already-captured status and body.
///
/// Error bodies are not guaranteed to be JSON (a proxy in front of the
/// backend may answer with plain text or HTML), so the backend's status is
/// preserved either way; the raw body serves as the message when no
/// `message` field can be extracted.
fn interpret_response(status: u16, body: &str) -> Result<HashMap<String, String>, GatewayError> {
    if status != 200 {
        let parsed: Option<serde_json::Value> = serde_json::from_str(body).ok();
        let message = parsed
            .as_ref()
            .and_then(|v| v.get("message"))
            .and_then(|m| m.as_str())
            .map(str::to_string)
            .unwrap_or_else(|| {
                let raw = body.trim();
                if raw.is_empty() {
                    "no error message reported".to_string()
                } else {
                    raw.to_string()
                }
            });
        return Err(GatewayError::Backend { status, message });
    }

    let body: serde_json::Value = serde_json::from_str(body)?;
    Ok(flatten_metadata(&body))
}

/// Flatten a backend metadata document into string key/value pairs.
///
/// Actinia wraps layer metadata in `process_results`; values arrive as JSON
/// strings or numbers depending on the layer kind.
fn flatten_metadata(body: &serde_json::Value) -> HashMap<String, String> {
    let object = body
        .get("process_results")
        .and_then(|r| r.as_object())
        .or_else(|| body.as_object());

    let mut metadata = HashMap::new();
    if let Some(object) = object {
        for (key, value) in object {
            let value = match value {
                serde_json::Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            metadata.insert(key.clone(), value);
        }
    }
    metadata
}
