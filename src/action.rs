//! Documented actions - one per operation of a resource.

use serde::Serialize;
use tracing::trace;

use crate::descriptor::{
    FieldDescriptor, OperationDescriptor, OperationDetails, ServiceDescriptor,
};
use crate::types::{
    BodyPropertyPolicy, BuildOptions, FieldOwnership, FieldSource, HttpMethod, ResourceType,
};

/// One HTTP operation as documented on a resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionDocument<'a> {
    method: HttpMethod,
    description: String,
    allows_changing_entity: bool,
    body_properties: Vec<FieldDescriptor>,
    #[serde(flatten)]
    details: &'a OperationDetails,
    #[serde(skip)]
    operation: &'a OperationDescriptor,
}

impl<'a> ActionDocument<'a> {
    /// Wrap an operation. Body properties start empty.
    pub fn new(operation: &'a OperationDescriptor) -> Self {
        let method = operation.http_method();
        Self {
            method,
            description: operation.description().unwrap_or_default().to_string(),
            allows_changing_entity: method.is_mutating(),
            body_properties: Vec::new(),
            details: operation.details(),
            operation,
        }
    }

    pub fn operation(&self) -> &'a OperationDescriptor {
        self.operation
    }

    pub fn http_method(&self) -> HttpMethod {
        self.method
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// True if the method's request body changes the entity (POST, PATCH, PUT).
    pub fn allows_changing_entity(&self) -> bool {
        self.allows_changing_entity
    }

    pub fn body_properties(&self) -> &[FieldDescriptor] {
        &self.body_properties
    }

    /// Select the fields this action documents as its request body.
    ///
    /// Mutating actions take the service's input filter, replaced outright by
    /// a method-specific collection when the service declares one. Other
    /// actions take the documentation fields. PATCH then clears the required
    /// flag of every selected field; with [`FieldOwnership::Shared`] that write
    /// lands on the service's own descriptors.
    ///
    /// [`BodyPropertyPolicy::RequiredOnly`] filters on the flag each field was
    /// declared with, so an earlier PATCH never empties a later body.
    pub fn resolve_body_properties(
        &mut self,
        resource_type: ResourceType,
        service: &ServiceDescriptor,
        options: &BuildOptions,
    ) {
        let source = self.field_source(service);
        let selected = service.fields(source);

        let mut fields: Vec<FieldDescriptor> = match options.body_properties {
            BodyPropertyPolicy::RequiredOnly if self.allows_changing_entity => selected
                .iter()
                .filter(|field| field.is_declared_required())
                .cloned()
                .collect(),
            BodyPropertyPolicy::RequiredOnly | BodyPropertyPolicy::AllFields => selected.to_vec(),
        };

        if options.field_ownership == FieldOwnership::Detached {
            fields = fields.iter().map(FieldDescriptor::detach).collect();
        }

        if self.method == HttpMethod::Patch {
            for field in &fields {
                field.set_required(false);
            }
        }

        trace!(
            resource_type = %resource_type,
            method = %self.method,
            source = source.key(),
            available = selected.len(),
            documented = fields.len(),
            "resolved body properties"
        );

        self.body_properties = fields;
    }

    fn field_source(&self, service: &ServiceDescriptor) -> FieldSource {
        if !self.allows_changing_entity {
            return FieldSource::Documentation;
        }
        let by_method = FieldSource::Method(self.method);
        if service.has_fields(by_method) {
            by_method
        } else {
            FieldSource::InputFilter
        }
    }
}
