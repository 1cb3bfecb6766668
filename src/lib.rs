//! API Blueprint resource model
//!
//! Derives the documentation model of an API Blueprint resource from a
//! service descriptor: display name, URI template, and one documented action
//! per operation with its verb description and request body properties.
//!
//! Rendering the model into markup is left to the caller.
//!
//! # Example
//!
//! ```
//! use apiblueprint_model::{
//!     BuildOptions, Field, FieldSource, HttpMethod, OperationDescriptor, ResourceDocument,
//!     ResourceType, ServiceDescriptor,
//! };
//!
//! let service = ServiceDescriptor::new("Status")
//!     .route_identifier_name("status_id")
//!     .fields_for(
//!         FieldSource::InputFilter,
//!         vec![Field::new("message").required(true).into()],
//!     );
//! let mut operations = vec![
//!     OperationDescriptor::new(HttpMethod::Get),
//!     OperationDescriptor::new(HttpMethod::Post),
//! ];
//!
//! let resource = ResourceDocument::build(
//!     &service,
//!     &mut operations,
//!     "/status",
//!     ResourceType::Collection,
//!     &BuildOptions::default(),
//! );
//!
//! assert_eq!(resource.name(), "Collection");
//! assert_eq!(resource.parameter(), Some("status_id"));
//! assert_eq!(resource.uri(), "/status{?page,limit,filter,order%2Dby}");
//! assert_eq!(resource.actions()[0].description(), "Fetch all");
//! assert_eq!(resource.actions()[1].body_properties()[0].name(), "message");
//! ```
//!
//! # Body Properties
//!
//! | Method | Field source | Required flags |
//! |--------|--------------|----------------|
//! | `POST`, `PUT` | method-specific collection if declared, else `input_filter` | kept |
//! | `PATCH` | method-specific collection if declared, else `input_filter` | cleared |
//! | anything else | `documentation` | kept |
//!
//! # Default Descriptions
//!
//! | Resource type | Phrase |
//! |---------------|--------|
//! | `entity` | `GET` Fetch, `PATCH` Update, `DELETE` Delete |
//! | `collection` | `GET` Fetch all, `POST` Create |
//! | `rpc` | Procedure |

mod action;
mod config;
mod descriptor;
mod error;
mod loader;
mod resource;
mod types;
mod validator;

pub use action::ActionDocument;
pub use config::{config_schema, ApiConfig, ApiDocument, ResourceConfig};
pub use descriptor::{
    Field, FieldDescriptor, OperationDescriptor, OperationDetails, ServiceDescriptor, StatusCode,
};
pub use error::{ConfigError, DocumentError, SchemaError};
pub use loader::{is_url, load_config, load_config_auto, load_config_str};
pub use resource::ResourceDocument;
pub use types::{
    BodyPropertyPolicy, BuildOptions, FieldOwnership, FieldSource, HttpMethod, ResourceType,
    VerbPhrases, COLLECTION_QUERY_TEMPLATE,
};
pub use validator::validate_config;

#[cfg(feature = "remote")]
pub use loader::load_config_url;
