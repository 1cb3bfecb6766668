//! Service, operation and field descriptors consumed by the builders.
//!
//! Descriptors arrive already parsed. The builders read them, fill in
//! missing operation descriptions, and may clear the required flag of
//! fields documented for PATCH actions.

use std::cell::{Ref, RefCell};
use std::collections::BTreeMap;
use std::rc::Rc;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::types::{FieldSource, HttpMethod};

/// Documented field of a service's input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub field_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub required: bool,
}

impl Field {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            field_type: None,
            description: None,
            required: false,
        }
    }

    pub fn field_type(mut self, field_type: impl Into<String>) -> Self {
        self.field_type = Some(field_type.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }
}

/// Shared handle to a [`Field`].
///
/// Cloning the handle shares the field: a required flag cleared through one
/// handle is seen through every other. The flag the field was declared with
/// is kept apart and never changes. Use [`FieldDescriptor::detach`] for an
/// independent copy. The handle is not `Send`.
#[derive(Debug, Clone)]
pub struct FieldDescriptor(Rc<SharedField>);

#[derive(Debug)]
struct SharedField {
    declared_required: bool,
    field: RefCell<Field>,
}

impl FieldDescriptor {
    pub fn new(field: Field) -> Self {
        Self(Rc::new(SharedField {
            declared_required: field.required,
            field: RefCell::new(field),
        }))
    }

    /// Borrow the underlying field.
    pub fn field(&self) -> Ref<'_, Field> {
        self.0.field.borrow()
    }

    pub fn name(&self) -> String {
        self.0.field.borrow().name.clone()
    }

    pub fn is_required(&self) -> bool {
        self.0.field.borrow().required
    }

    /// Required flag as declared, before any override.
    pub fn is_declared_required(&self) -> bool {
        self.0.declared_required
    }

    /// Set the required flag on the shared field.
    pub fn set_required(&self, required: bool) {
        self.0.field.borrow_mut().required = required;
    }

    /// Copy the field into a new, unshared handle that keeps the declared flag.
    pub fn detach(&self) -> Self {
        Self(Rc::new(SharedField {
            declared_required: self.0.declared_required,
            field: RefCell::new(self.0.field.borrow().clone()),
        }))
    }

    /// True if both handles point at the same field.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl From<Field> for FieldDescriptor {
    fn from(field: Field) -> Self {
        Self::new(field)
    }
}

// Compares field contents, not identity.
impl PartialEq for FieldDescriptor {
    fn eq(&self, other: &Self) -> bool {
        self.0.declared_required == other.0.declared_required
            && *self.0.field.borrow() == *other.0.field.borrow()
    }
}

impl Eq for FieldDescriptor {}

impl Serialize for FieldDescriptor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.field.borrow().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for FieldDescriptor {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Field::deserialize(deserializer).map(Self::new)
    }
}

/// Backend service a resource is documented from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceDescriptor {
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    route_identifier_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    operations_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    entity_operations_name: Option<String>,
    #[serde(default)]
    fields: BTreeMap<String, Vec<FieldDescriptor>>,
}

impl ServiceDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Set the route parameter naming a single entity (e.g. `status_id`).
    pub fn route_identifier_name(mut self, name: impl Into<String>) -> Self {
        self.route_identifier_name = Some(name.into());
        self
    }

    /// Set the display name of the collection resource.
    pub fn operations_name(mut self, name: impl Into<String>) -> Self {
        self.operations_name = Some(name.into());
        self
    }

    /// Set the display name of the entity resource.
    pub fn entity_operations_name(mut self, name: impl Into<String>) -> Self {
        self.entity_operations_name = Some(name.into());
        self
    }

    /// Register the field collection for a source, replacing any previous one.
    pub fn fields_for(mut self, source: FieldSource, fields: Vec<FieldDescriptor>) -> Self {
        self.fields.insert(source.key().to_string(), fields);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn route_identifier(&self) -> Option<&str> {
        non_empty(&self.route_identifier_name)
    }

    pub fn collection_name(&self) -> Option<&str> {
        non_empty(&self.operations_name)
    }

    pub fn entity_name(&self) -> Option<&str> {
        non_empty(&self.entity_operations_name)
    }

    /// Fields of a source, in declaration order. Unknown sources are empty.
    pub fn fields(&self, source: FieldSource) -> &[FieldDescriptor] {
        self.fields
            .get(source.key())
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// True if the service declares a collection for the source, even an empty one.
    pub fn has_fields(&self, source: FieldSource) -> bool {
        self.fields.contains_key(source.key())
    }
}

/// Documented response status of an operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCode {
    pub code: u16,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub message: String,
}

/// Operation data passed through to renderers untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    request_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    response_description: Option<String>,
    #[serde(default)]
    requires_authorization: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    response_status_codes: Vec<StatusCode>,
}

impl OperationDetails {
    pub fn request_description(&self) -> Option<&str> {
        non_empty(&self.request_description)
    }

    pub fn response_description(&self) -> Option<&str> {
        non_empty(&self.response_description)
    }

    pub fn requires_authorization(&self) -> bool {
        self.requires_authorization
    }

    pub fn response_status_codes(&self) -> &[StatusCode] {
        &self.response_status_codes
    }
}

/// One HTTP operation exposed by a service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationDescriptor {
    method: HttpMethod,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(flatten)]
    details: OperationDetails,
}

impl OperationDescriptor {
    pub fn new(method: HttpMethod) -> Self {
        Self {
            method,
            description: None,
            details: OperationDetails::default(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_requires_authorization(mut self, requires: bool) -> Self {
        self.details.requires_authorization = requires;
        self
    }

    pub fn with_status_code(mut self, code: u16, message: impl Into<String>) -> Self {
        self.details.response_status_codes.push(StatusCode {
            code,
            message: message.into(),
        });
        self
    }

    pub fn http_method(&self) -> HttpMethod {
        self.method
    }

    /// Description, or `None` when missing or empty.
    pub fn description(&self) -> Option<&str> {
        non_empty(&self.description)
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = Some(description.into());
    }

    pub fn details(&self) -> &OperationDetails {
        &self.details
    }

    pub fn request_description(&self) -> Option<&str> {
        self.details.request_description()
    }

    pub fn response_description(&self) -> Option<&str> {
        self.details.response_description()
    }

    pub fn requires_authorization(&self) -> bool {
        self.details.requires_authorization()
    }

    pub fn response_status_codes(&self) -> &[StatusCode] {
        self.details.response_status_codes()
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}
