use serde::{Deserialize, Serialize};

/// Credential type name the host stores these values under.
pub const CREDENTIAL_NAME: &str = "fractalForgeApi";

pub const DEFAULT_API_ENDPOINT: &str = "http://127.0.0.1:8000";

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CredentialProperty {
    pub name: String,
    pub label: String,
    #[serde(rename = "type")]
    pub property_type: String, // text, password
    pub required: bool,
    pub default: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CredentialDefinition {
    pub name: String,
    pub label: String,
    pub description: String,
    pub properties: Vec<CredentialProperty>,
}

/// The form the host renders when the user creates a Fractal Forge credential.
/// The host enforces the `required` flags; nothing else is validated here.
pub fn credential_definition() -> CredentialDefinition {
    CredentialDefinition {
        name: CREDENTIAL_NAME.to_string(),
        label: "Fractal Forge API".to_string(),
        description: "Connect to a Fractal Forge application".to_string(),
        properties: vec![
            CredentialProperty {
                name: "apiKey".to_string(),
                label: "API Key".to_string(),
                property_type: "password".to_string(),
                required: true,
                default: None,
                description: Some("Enter your Fractal Forge application API Key".to_string()),
            },
            CredentialProperty {
                name: "apiEndpoint".to_string(),
                label: "API Endpoint".to_string(),
                property_type: "text".to_string(),
                required: true,
                default: Some(DEFAULT_API_ENDPOINT.to_string()),
                description: None,
            },
            CredentialProperty {
                name: "label".to_string(),
                label: "Label".to_string(),
                property_type: "text".to_string(),
                required: false,
                default: Some("My Fractal Forge Application".to_string()),
                description: None,
            },
        ],
    }
}

/// Credential values as persisted by the host. Read-only to this crate.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Credentials {
    pub api_key: String,
    #[serde(default = "default_endpoint")]
    pub api_endpoint: String,
    #[serde(default)]
    pub label: String,
}

fn default_endpoint() -> String {
    DEFAULT_API_ENDPOINT.to_string()
}

impl Credentials {
    pub fn new(api_key: impl Into<String>, api_endpoint: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_endpoint: api_endpoint.into(),
            label: String::new(),
        }
    }

    /// Endpoint with a trailing slash stripped, ready for path composition.
    pub fn base_url(&self) -> &str {
        self.api_endpoint
            .strip_suffix('/')
            .unwrap_or(&self.api_endpoint)
    }

    /// The single authentication rule: `Authorization: Bearer <apiKey>` on
    /// every outbound request.
    pub fn bearer_header(&self) -> (String, String) {
        (
            "Authorization".to_string(),
            format!("Bearer {}", self.api_key),
        )
    }
}
