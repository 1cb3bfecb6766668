//! Descriptor configuration: services, the resources built from them, and
//! default build options.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::debug;

use crate::descriptor::{OperationDescriptor, ServiceDescriptor};
use crate::error::DocumentError;
use crate::resource::ResourceDocument;
use crate::types::{BuildOptions, ResourceType};

/// One resource to document: which service, what kind, where, and with
/// which operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceConfig {
    pub service: String,
    #[serde(rename = "type")]
    pub resource_type: ResourceType,
    pub uri: String,
    #[serde(default)]
    pub operations: Vec<OperationDescriptor>,
}

/// Parsed descriptor configuration.
///
/// Resources naming the same service share its field descriptors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default)]
    pub services: BTreeMap<String, ServiceDescriptor>,
    #[serde(default)]
    pub resources: Vec<ResourceConfig>,
    #[serde(default)]
    pub options: BuildOptions,
}

/// Every resource document of a configuration, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiDocument<'a> {
    pub resources: Vec<ResourceDocument<'a>>,
}

impl ApiConfig {
    /// Ensure every resource names a declared service.
    ///
    /// # Errors
    ///
    /// Returns `DocumentError::UnknownService` for the first dangling reference.
    pub fn check_references(&self) -> Result<(), DocumentError> {
        for (index, resource) in self.resources.iter().enumerate() {
            if !self.services.contains_key(&resource.service) {
                return Err(DocumentError::UnknownService {
                    index,
                    uri: resource.uri.clone(),
                    service: resource.service.clone(),
                });
            }
        }
        Ok(())
    }

    /// Build a document for every resource.
    ///
    /// Fills missing operation descriptions in place, and under
    /// [`crate::FieldOwnership::Shared`] clears required flags of fields
    /// documented by PATCH actions on the shared service descriptors.
    ///
    /// # Errors
    ///
    /// Returns `DocumentError::UnknownService` before building anything if a
    /// resource names an undeclared service.
    pub fn build(&mut self, options: &BuildOptions) -> Result<ApiDocument<'_>, DocumentError> {
        self.check_references()?;

        let Self {
            services,
            resources,
            ..
        } = self;

        let mut documents = Vec::with_capacity(resources.len());
        for (index, resource) in resources.iter_mut().enumerate() {
            let service =
                services
                    .get(&resource.service)
                    .ok_or_else(|| DocumentError::UnknownService {
                        index,
                        uri: resource.uri.clone(),
                        service: resource.service.clone(),
                    })?;
            documents.push(ResourceDocument::build(
                service,
                &mut resource.operations,
                &resource.uri,
                resource.resource_type,
                options,
            ));
        }

        debug!(resources = documents.len(), "built api document");
        Ok(ApiDocument {
            resources: documents,
        })
    }
}

/// JSON Schema every configuration document must satisfy.
pub fn config_schema() -> Value {
    json!({
        "$schema": "https://json-schema.org/draft/2020-12/schema",
        "type": "object",
        "additionalProperties": false,
        "required": ["services", "resources"],
        "properties": {
            "services": {
                "type": "object",
                "additionalProperties": { "$ref": "#/$defs/service" }
            },
            "resources": {
                "type": "array",
                "items": { "$ref": "#/$defs/resource" }
            },
            "options": { "$ref": "#/$defs/options" }
        },
        "$defs": {
            "optional_string": { "type": ["string", "null"] },
            "method": { "type": "string" },
            "field": {
                "type": "object",
                "additionalProperties": false,
                "required": ["name"],
                "properties": {
                    "name": { "type": "string" },
                    "type": { "$ref": "#/$defs/optional_string" },
                    "description": { "$ref": "#/$defs/optional_string" },
                    "required": { "type": "boolean" }
                }
            },
            "service": {
                "type": "object",
                "additionalProperties": false,
                "required": ["name"],
                "properties": {
                    "name": { "type": "string" },
                    "route_identifier_name": { "$ref": "#/$defs/optional_string" },
                    "operations_name": { "$ref": "#/$defs/optional_string" },
                    "entity_operations_name": { "$ref": "#/$defs/optional_string" },
                    "fields": {
                        "type": "object",
                        "additionalProperties": {
                            "type": "array",
                            "items": { "$ref": "#/$defs/field" }
                        }
                    }
                }
            },
            "operation": {
                "type": "object",
                "additionalProperties": false,
                "required": ["method"],
                "properties": {
                    "method": { "$ref": "#/$defs/method" },
                    "description": { "$ref": "#/$defs/optional_string" },
                    "request_description": { "$ref": "#/$defs/optional_string" },
                    "response_description": { "$ref": "#/$defs/optional_string" },
                    "requires_authorization": { "type": "boolean" },
                    "response_status_codes": {
                        "type": "array",
                        "items": {
                            "type": "object",
                            "additionalProperties": false,
                            "required": ["code"],
                            "properties": {
                                "code": { "type": "integer", "minimum": 100, "maximum": 599 },
                                "message": { "type": "string" }
                            }
                        }
                    }
                }
            },
            "resource": {
                "type": "object",
                "additionalProperties": false,
                "required": ["service", "type", "uri"],
                "properties": {
                    "service": { "type": "string" },
                    "type": { "type": "string" },
                    "uri": { "type": "string" },
                    "operations": {
                        "type": "array",
                        "items": { "$ref": "#/$defs/operation" }
                    }
                }
            },
            "options": {
                "type": "object",
                "additionalProperties": false,
                "properties": {
                    "body_properties": { "enum": ["all_fields", "required_only"] },
                    "field_ownership": { "enum": ["shared", "detached"] }
                }
            }
        }
    })
}
