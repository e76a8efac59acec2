use serde::{Deserialize, Serialize};

use crate::credentials::CREDENTIAL_NAME;

/// Name of the load-options method the host calls to populate the collection
/// parameter (see `loader::load_entity_options`).
pub const LOAD_ENTITIES_METHOD: &str = "get_fractal_entities";

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PropertyOption {
    pub name: String,
    pub value: String,
}

/// Conditions under which the host shows a property. Empty lists mean "always".
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct DisplayWhen {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub resource: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub operation: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct NodeProperty {
    pub name: String,
    pub label: String,
    #[serde(rename = "type")]
    pub property_type: String, // text, options, json, collection
    pub options: Option<Vec<PropertyOption>>,
    /// Set when the option list comes from a dynamic loader instead of `options`.
    pub load_options_method: Option<String>,
    pub default: Option<String>,
    pub required: bool,
    pub display_when: Option<DisplayWhen>,
    pub description: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct NodeDescriptor {
    pub id: String,
    pub label: String,
    pub category: String, // Trigger, Action, Logic, Integration
    pub description: Option<String>,
    pub credentials: Vec<String>,
    pub properties: Vec<NodeProperty>,
}

/// The Fractal Forge node form: resource/operation selectors, the dynamically
/// loaded collection, and the operation-specific parameters. Display rules are
/// data; the host interprets them when rendering.
pub fn node_descriptor() -> NodeDescriptor {
    NodeDescriptor {
        id: "fractal_forge".to_string(),
        label: "Fractal Forge".to_string(),
        category: "Integration".to_string(),
        description: Some("Run commands and queries against a Fractal Forge API".to_string()),
        credentials: vec![CREDENTIAL_NAME.to_string()],
        properties: vec![
            NodeProperty {
                name: "resource".to_string(),
                label: "Resource".to_string(),
                property_type: "options".to_string(),
                options: Some(vec![
                    PropertyOption { name: "Command".to_string(), value: "command".to_string() },
                    PropertyOption { name: "Query".to_string(), value: "query".to_string() },
                ]),
                load_options_method: None,
                default: Some("query".to_string()),
                required: true,
                display_when: None,
                description: None,
            },
            // Operation list for commands (mutating)
            NodeProperty {
                name: "operation".to_string(),
                label: "Operation".to_string(),
                property_type: "options".to_string(),
                options: Some(vec![
                    PropertyOption { name: "Create".to_string(), value: "create".to_string() },
                    PropertyOption { name: "Update".to_string(), value: "update".to_string() },
                    PropertyOption { name: "Delete".to_string(), value: "delete".to_string() },
                    PropertyOption {
                        name: "Custom (Collection)".to_string(),
                        value: "custom_collection_command".to_string(),
                    },
                    PropertyOption {
                        name: "Custom (Object)".to_string(),
                        value: "custom_object_command".to_string(),
                    },
                ]),
                load_options_method: None,
                default: Some("create".to_string()),
                required: true,
                display_when: Some(DisplayWhen {
                    resource: vec!["command".to_string()],
                    operation: vec![],
                }),
                description: None,
            },
            // Operation list for queries (read-only)
            NodeProperty {
                name: "operation".to_string(),
                label: "Operation".to_string(),
                property_type: "options".to_string(),
                options: Some(vec![
                    PropertyOption { name: "List".to_string(), value: "list".to_string() },
                    PropertyOption { name: "Get".to_string(), value: "get".to_string() },
                    PropertyOption {
                        name: "Custom (Collection)".to_string(),
                        value: "custom_collection_query".to_string(),
                    },
                    PropertyOption {
                        name: "Custom (Object)".to_string(),
                        value: "custom_object_query".to_string(),
                    },
                ]),
                load_options_method: None,
                default: Some("get".to_string()),
                required: true,
                display_when: Some(DisplayWhen {
                    resource: vec!["query".to_string()],
                    operation: vec![],
                }),
                description: None,
            },
            NodeProperty {
                name: "collection".to_string(),
                label: "Entity Collection".to_string(),
                property_type: "options".to_string(),
                options: None,
                load_options_method: Some(LOAD_ENTITIES_METHOD.to_string()),
                default: None,
                required: true,
                display_when: None,
                description: Some("Select an entity collection discovered from the backend".to_string()),
            },
            // objectId is optional for create (blank falls back to the bare
            // collection endpoint) and required everywhere else it appears.
            NodeProperty {
                name: "objectId".to_string(),
                label: "Object ID".to_string(),
                property_type: "text".to_string(),
                options: None,
                load_options_method: None,
                default: None,
                required: false,
                display_when: Some(DisplayWhen {
                    resource: vec!["command".to_string()],
                    operation: vec!["create".to_string()],
                }),
                description: Some("The ID of the object".to_string()),
            },
            NodeProperty {
                name: "objectId".to_string(),
                label: "Object ID".to_string(),
                property_type: "text".to_string(),
                options: None,
                load_options_method: None,
                default: None,
                required: true,
                display_when: Some(DisplayWhen {
                    resource: vec!["command".to_string(), "query".to_string()],
                    operation: vec![
                        "update".to_string(),
                        "delete".to_string(),
                        "get".to_string(),
                        "custom_object_command".to_string(),
                        "custom_object_query".to_string(),
                    ],
                }),
                description: Some("The ID of the object".to_string()),
            },
            NodeProperty {
                name: "customCommand".to_string(),
                label: "Custom Command".to_string(),
                property_type: "text".to_string(),
                options: None,
                load_options_method: None,
                default: None,
                required: true,
                display_when: Some(DisplayWhen {
                    resource: vec!["command".to_string()],
                    operation: vec![
                        "custom_object_command".to_string(),
                        "custom_collection_command".to_string(),
                    ],
                }),
                description: Some("The name of the custom command".to_string()),
            },
            NodeProperty {
                name: "customQuery".to_string(),
                label: "Custom Query".to_string(),
                property_type: "text".to_string(),
                options: None,
                load_options_method: None,
                default: None,
                required: true,
                display_when: Some(DisplayWhen {
                    resource: vec!["query".to_string()],
                    operation: vec![
                        "custom_object_query".to_string(),
                        "custom_collection_query".to_string(),
                    ],
                }),
                description: Some("The name of the custom query".to_string()),
            },
            NodeProperty {
                name: "jsonBody".to_string(),
                label: "JSON".to_string(),
                property_type: "json".to_string(),
                options: None,
                load_options_method: None,
                default: None,
                required: false,
                display_when: Some(DisplayWhen {
                    resource: vec!["command".to_string()],
                    operation: vec!["create".to_string(), "update".to_string()],
                }),
                description: Some("Request body, sent verbatim".to_string()),
            },
            NodeProperty {
                name: "properties".to_string(),
                label: "Properties".to_string(),
                property_type: "collection".to_string(),
                options: None,
                load_options_method: None,
                default: None,
                required: false,
                display_when: Some(DisplayWhen {
                    resource: vec!["command".to_string()],
                    operation: vec![],
                }),
                description: Some("Extra query-string filters, including ad-hoc name/value pairs".to_string()),
            },
        ],
    }
}
