use std::collections::HashMap;

use reqwest::Method;
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::ConnectorError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Command,
    Query,
}

impl Resource {
    pub fn parse(raw: &str, item_index: usize) -> Result<Self, ConnectorError> {
        match raw {
            "command" => Ok(Resource::Command),
            "query" => Ok(Resource::Query),
            other => Err(ConnectorError::UnknownResource {
                resource: other.to_string(),
                item_index,
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    // command
    Create,
    Update,
    Delete,
    CustomObjectCommand,
    CustomCollectionCommand,
    // query
    List,
    Get,
    CustomCollectionQuery,
    CustomObjectQuery,
}

impl Operation {
    /// Operations are scoped to their resource; `create` under `query` is as
    /// unknown as a typo.
    pub fn parse(resource: Resource, raw: &str, item_index: usize) -> Result<Self, ConnectorError> {
        let op = match (resource, raw) {
            (Resource::Command, "create") => Operation::Create,
            (Resource::Command, "update") => Operation::Update,
            (Resource::Command, "delete") => Operation::Delete,
            (Resource::Command, "custom_object_command") => Operation::CustomObjectCommand,
            (Resource::Command, "custom_collection_command") => Operation::CustomCollectionCommand,
            (Resource::Query, "list") => Operation::List,
            (Resource::Query, "get") => Operation::Get,
            (Resource::Query, "custom_collection_query") => Operation::CustomCollectionQuery,
            (Resource::Query, "custom_object_query") => Operation::CustomObjectQuery,
            (_, other) => {
                return Err(ConnectorError::UnknownOperation {
                    operation: other.to_string(),
                    item_index,
                })
            }
        };
        Ok(op)
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct CustomProperty {
    pub name: String,
    pub value: Value,
}

/// The optional structured `properties` parameter: well-known keys pass
/// straight through into the query string, `customProperties` is an explicit
/// name/value list for ad-hoc filters.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertiesBlock {
    pub custom: Vec<CustomProperty>,
    pub extra: Map<String, Value>,
}

impl PropertiesBlock {
    pub fn parse(raw: &Value, item_index: usize) -> Result<Self, ConnectorError> {
        if raw.is_null() {
            return Ok(Self::default());
        }
        let obj = raw.as_object().ok_or_else(|| ConnectorError::BadProperties {
            item_index,
            reason: "expected an object".to_string(),
        })?;

        let mut block = PropertiesBlock::default();
        for (key, value) in obj {
            if key == "customProperties" {
                // Accept either a bare list or the host form's nested
                // { "property": [...] } shape.
                let list = match value {
                    Value::Array(_) => value.clone(),
                    Value::Object(inner) => {
                        inner.get("property").cloned().unwrap_or(Value::Array(vec![]))
                    }
                    _ => {
                        return Err(ConnectorError::BadProperties {
                            item_index,
                            reason: "customProperties must be a list of name/value pairs"
                                .to_string(),
                        })
                    }
                };
                block.custom = serde_json::from_value(list).map_err(|e| {
                    ConnectorError::BadProperties {
                        item_index,
                        reason: e.to_string(),
                    }
                })?;
            } else {
                block.extra.insert(key.clone(), value.clone());
            }
        }
        Ok(block)
    }

    pub fn flatten_into(&self, qs: &mut HashMap<String, Value>) {
        for (key, value) in &self.extra {
            qs.insert(key.clone(), value.clone());
        }
        for prop in &self.custom {
            qs.insert(prop.name.clone(), prop.value.clone());
        }
    }
}

/// Method, relative endpoint, query string and body for one outbound call.
/// Built fresh per input item, never shared or persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestDescriptor {
    pub method: Method,
    pub endpoint: String,
    pub qs: HashMap<String, Value>,
    pub body: Option<Value>,
}

fn str_param<'a>(params: &'a Value, name: &str) -> &'a str {
    params.get(name).and_then(|v| v.as_str()).unwrap_or("")
}

fn parse_json_body(params: &Value, item_index: usize) -> Result<Value, ConnectorError> {
    let raw = str_param(params, "jsonBody");
    serde_json::from_str(raw).map_err(|source| ConnectorError::BadJsonBody { item_index, source })
}

fn properties_qs(
    params: &Value,
    item_index: usize,
    qs: &mut HashMap<String, Value>,
) -> Result<(), ConnectorError> {
    let raw = params.get("properties").cloned().unwrap_or(Value::Null);
    let block = PropertiesBlock::parse(&raw, item_index)?;
    block.flatten_into(qs);
    Ok(())
}

/// Map one item's parameters to a request descriptor. Pure: the same
/// parameters always yield the same descriptor.
pub fn build_request(params: &Value, item_index: usize) -> Result<RequestDescriptor, ConnectorError> {
    let resource = Resource::parse(str_param(params, "resource"), item_index)?;
    let operation = Operation::parse(resource, str_param(params, "operation"), item_index)?;
    let collection = str_param(params, "collection");

    let mut qs: HashMap<String, Value> = HashMap::new();
    let mut body = None;
    let method;
    let mut endpoint;

    match operation {
        Operation::List | Operation::CustomCollectionQuery => {
            method = Method::GET;
            endpoint = collection.to_string();

            let custom_query = str_param(params, "customQuery");
            if !custom_query.is_empty() {
                endpoint = format!("{}/{}", endpoint, custom_query);
            }
        }
        Operation::Get | Operation::CustomObjectQuery => {
            method = Method::GET;
            endpoint = format!("{}/{}", collection, str_param(params, "objectId"));

            let custom_query = str_param(params, "customQuery");
            if !custom_query.is_empty() {
                endpoint = format!("{}/{}", endpoint, custom_query);
            }
        }
        Operation::Create => {
            method = Method::POST;
            body = Some(parse_json_body(params, item_index)?);
            properties_qs(params, item_index, &mut qs)?;

            // A blank id falls back to the bare collection endpoint. The other
            // id-taking operations interpolate the id verbatim, blank or not.
            let object_id = str_param(params, "objectId");
            endpoint = if object_id.trim().is_empty() {
                collection.to_string()
            } else {
                format!("{}/{}", collection, object_id)
            };
        }
        Operation::Update => {
            method = Method::PUT;
            body = Some(parse_json_body(params, item_index)?);
            properties_qs(params, item_index, &mut qs)?;

            endpoint = format!("{}/{}", collection, str_param(params, "objectId"));
        }
        Operation::Delete => {
            method = Method::DELETE;
            properties_qs(params, item_index, &mut qs)?;

            endpoint = format!("{}/{}", collection, str_param(params, "objectId"));
        }
        Operation::CustomObjectCommand | Operation::CustomCollectionCommand => {
            method = Method::POST;
            properties_qs(params, item_index, &mut qs)?;

            endpoint = collection.to_string();
            if operation == Operation::CustomObjectCommand {
                endpoint = format!("{}/{}", endpoint, str_param(params, "objectId"));
            }
            let custom_command = str_param(params, "customCommand");
            if !custom_command.is_empty() {
                endpoint = format!("{}/{}", endpoint, custom_command);
            }
        }
    }

    Ok(RequestDescriptor {
        method,
        endpoint,
        qs,
        body,
    })
}
