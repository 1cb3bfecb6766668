//! Resource documents - name, URI template and actions of one resource.

use serde::Serialize;
use tracing::debug;

use crate::action::ActionDocument;
use crate::descriptor::{FieldDescriptor, OperationDescriptor, ServiceDescriptor};
use crate::types::{BuildOptions, FieldSource, ResourceType, COLLECTION_QUERY_TEMPLATE};

/// Documentation model of one resource of a service.
///
/// Borrows the operations it was built from; they must outlive it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResourceDocument<'a> {
    name: String,
    uri: String,
    #[serde(rename = "type")]
    resource_type: ResourceType,
    #[serde(skip_serializing_if = "Option::is_none")]
    parameter: Option<String>,
    body_properties: Vec<FieldDescriptor>,
    actions: Vec<ActionDocument<'a>>,
}

impl<'a> ResourceDocument<'a> {
    /// Build the document for a service's operations under `base_uri`.
    ///
    /// Operations without a description receive the default verb phrase of
    /// `resource_type` (or an empty description when there is none). Actions
    /// keep the order of `operations`.
    pub fn build(
        service: &ServiceDescriptor,
        operations: &'a mut [OperationDescriptor],
        base_uri: &str,
        resource_type: ResourceType,
        options: &BuildOptions,
    ) -> Self {
        let name = resource_name(service, resource_type).to_string();
        let uri = uri_template(service, base_uri, resource_type);

        fill_default_descriptions(operations, resource_type);

        let operations: &'a [OperationDescriptor] = operations;
        let actions: Vec<ActionDocument<'a>> = operations
            .iter()
            .map(|operation| {
                let mut action = ActionDocument::new(operation);
                action.resolve_body_properties(resource_type, service, options);
                action
            })
            .collect();

        debug!(
            service = service.name(),
            resource = %name,
            uri = %uri,
            resource_type = %resource_type,
            actions = actions.len(),
            "built resource document"
        );

        Self {
            name,
            uri,
            resource_type,
            parameter: service.route_identifier().map(str::to_string),
            body_properties: service.fields(FieldSource::InputFilter).to_vec(),
            actions,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }

    pub fn resource_type(&self) -> ResourceType {
        self.resource_type
    }

    /// Route identifier name of the service, if it declares one.
    pub fn parameter(&self) -> Option<&str> {
        self.parameter.as_deref()
    }

    /// The service's input filter fields, whatever the resource type.
    ///
    /// Same handles as the service holds, so a shared PATCH override shows here.
    pub fn body_properties(&self) -> &[FieldDescriptor] {
        &self.body_properties
    }

    pub fn actions(&self) -> &[ActionDocument<'a>] {
        &self.actions
    }
}

/// Display name: the service's override for the type, then the type label,
/// then the service name. First non-empty wins.
fn resource_name(service: &ServiceDescriptor, resource_type: ResourceType) -> &str {
    let override_name = match resource_type {
        ResourceType::Collection => service.collection_name(),
        ResourceType::Entity => service.entity_name(),
        ResourceType::RemoteProcedure => None,
    };

    [override_name, Some(resource_type.label()), Some(service.name())]
        .into_iter()
        .flatten()
        .find(|name| !name.is_empty())
        .unwrap_or_default()
}

/// Paged collections get the page/limit/filter/order-by query expansion.
fn uri_template(service: &ServiceDescriptor, base_uri: &str, resource_type: ResourceType) -> String {
    match resource_type {
        ResourceType::Collection if service.route_identifier().is_some() => {
            format!("{}{}", base_uri, COLLECTION_QUERY_TEMPLATE)
        }
        ResourceType::Collection | ResourceType::Entity | ResourceType::RemoteProcedure => {
            base_uri.to_string()
        }
    }
}

fn fill_default_descriptions(operations: &mut [OperationDescriptor], resource_type: ResourceType) {
    let phrases = resource_type.verb_phrases();
    for operation in operations.iter_mut() {
        if operation.description().is_some() {
            continue;
        }
        let phrase = phrases
            .phrase_for(operation.http_method())
            .unwrap_or_default();
        operation.set_description(phrase);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::{Field, FieldDescriptor};
    use crate::types::{FieldSource, HttpMethod};

    fn ops(methods: &[HttpMethod]) -> Vec<OperationDescriptor> {
        methods.iter().copied().map(OperationDescriptor::new).collect()
    }

    #[test]
    fn collection_name_prefers_override() {
        let service = ServiceDescriptor::new("Status").operations_name("Widgets");
        assert_eq!(resource_name(&service, ResourceType::Collection), "Widgets");
    }

    #[test]
    fn collection_name_falls_back_to_label() {
        let service = ServiceDescriptor::new("Status").operations_name("");
        assert_eq!(resource_name(&service, ResourceType::Collection), "Collection");
    }

    #[test]
    fn entity_name_prefers_entity_override() {
        let service = ServiceDescriptor::new("Status")
            .operations_name("Statuses")
            .entity_operations_name("Status Item");
        assert_eq!(resource_name(&service, ResourceType::Entity), "Status Item");

        let service = ServiceDescriptor::new("Status").operations_name("Statuses");
        assert_eq!(resource_name(&service, ResourceType::Entity), "Entity");
    }

    #[test]
    fn rpc_name_ignores_overrides() {
        let service = ServiceDescriptor::new("Ping")
            .operations_name("Pings")
            .entity_operations_name("Ping");
        assert_eq!(
            resource_name(&service, ResourceType::RemoteProcedure),
            "Procedure"
        );
    }

    #[test]
    fn collection_uri_with_route_identifier_gets_query() {
        let service = ServiceDescriptor::new("Status").route_identifier_name("status_id");
        assert_eq!(
            uri_template(&service, "/status", ResourceType::Collection),
            "/status{?page,limit,filter,order%2Dby}"
        );
    }

    #[test]
    fn uri_unchanged_without_route_identifier_or_collection() {
        let bare = ServiceDescriptor::new("Status");
        assert_eq!(
            uri_template(&bare, "/status", ResourceType::Collection),
            "/status"
        );

        let service = ServiceDescriptor::new("Status").route_identifier_name("status_id");
        assert_eq!(
            uri_template(&service, "/status/{status_id}", ResourceType::Entity),
            "/status/{status_id}"
        );
        assert_eq!(
            uri_template(&service, "/ping", ResourceType::RemoteProcedure),
            "/ping"
        );
    }

    #[test]
    fn default_descriptions_by_type_and_method() {
        let mut operations = ops(&[
            HttpMethod::Get,
            HttpMethod::Patch,
            HttpMethod::Delete,
            HttpMethod::Put,
        ]);
        fill_default_descriptions(&mut operations, ResourceType::Entity);
        let descriptions: Vec<_> = operations.iter().map(|o| o.description()).collect();
        assert_eq!(
            descriptions,
            [Some("Fetch"), Some("Update"), Some("Delete"), None]
        );

        let mut operations = ops(&[HttpMethod::Get, HttpMethod::Post]);
        fill_default_descriptions(&mut operations, ResourceType::Collection);
        assert_eq!(operations[0].description(), Some("Fetch all"));
        assert_eq!(operations[1].description(), Some("Create"));

        let mut operations = ops(&[HttpMethod::Get, HttpMethod::Post]);
        fill_default_descriptions(&mut operations, ResourceType::RemoteProcedure);
        assert!(operations
            .iter()
            .all(|o| o.description() == Some("Procedure")));
    }

    #[test]
    fn existing_descriptions_are_kept() {
        let mut operations =
            vec![OperationDescriptor::new(HttpMethod::Get).with_description("List every status")];
        fill_default_descriptions(&mut operations, ResourceType::Collection);
        assert_eq!(operations[0].description(), Some("List every status"));
    }

    #[test]
    fn build_keeps_operation_order() {
        let service = ServiceDescriptor::new("Status");
        let mut operations = ops(&[HttpMethod::Post, HttpMethod::Get, HttpMethod::Post]);
        let doc = ResourceDocument::build(
            &service,
            &mut operations,
            "/status",
            ResourceType::Collection,
            &BuildOptions::new(),
        );

        let methods: Vec<_> = doc.actions().iter().map(|a| a.http_method()).collect();
        assert_eq!(methods, [HttpMethod::Post, HttpMethod::Get, HttpMethod::Post]);
        assert_eq!(doc.actions()[1].description(), "Fetch all");
    }

    #[test]
    fn build_with_no_operations() {
        let service = ServiceDescriptor::new("Status");
        let mut operations = Vec::new();
        let doc = ResourceDocument::build(
            &service,
            &mut operations,
            "/status",
            ResourceType::Entity,
            &BuildOptions::new(),
        );
        assert!(doc.actions().is_empty());
        assert_eq!(doc.name(), "Entity");
        assert_eq!(doc.resource_type(), ResourceType::Entity);
        assert_eq!(doc.parameter(), None);
        assert!(doc.body_properties().is_empty());
    }

    #[test]
    fn build_resolves_body_properties() {
        let service = ServiceDescriptor::new("Status").fields_for(
            FieldSource::InputFilter,
            vec![FieldDescriptor::from(Field::new("message").required(true))],
        );
        let mut operations = ops(&[HttpMethod::Post, HttpMethod::Get]);
        let doc = ResourceDocument::build(
            &service,
            &mut operations,
            "/status",
            ResourceType::Collection,
            &BuildOptions::new(),
        );

        assert_eq!(doc.actions()[0].body_properties().len(), 1);
        assert!(doc.actions()[1].body_properties().is_empty());
    }
}
