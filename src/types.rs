//! Core types for resource document derivation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DocumentError;

/// Query expansion appended to paged collection URIs.
///
/// RFC 6570 variable names cannot contain `-`, so `order-by` is percent-encoded.
pub const COLLECTION_QUERY_TEMPLATE: &str = "{?page,limit,filter,order%2Dby}";

/// HTTP methods an operation can be documented under.
///
/// Deserializes through [`FromStr`], so `"post"` and `"POST"` are the same method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE", try_from = "String")]
pub enum HttpMethod {
    Get,
    Head,
    Post,
    Put,
    Patch,
    Delete,
    Options,
    Trace,
    Connect,
}

impl HttpMethod {
    /// Methods whose request body changes the addressed entity.
    pub const MUTATING: [HttpMethod; 3] = [HttpMethod::Post, HttpMethod::Patch, HttpMethod::Put];

    /// Parse a method name, ignoring case.
    ///
    /// Returns `None` for unknown methods (caller should error).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Some(HttpMethod::Get),
            "HEAD" => Some(HttpMethod::Head),
            "POST" => Some(HttpMethod::Post),
            "PUT" => Some(HttpMethod::Put),
            "PATCH" => Some(HttpMethod::Patch),
            "DELETE" => Some(HttpMethod::Delete),
            "OPTIONS" => Some(HttpMethod::Options),
            "TRACE" => Some(HttpMethod::Trace),
            "CONNECT" => Some(HttpMethod::Connect),
            _ => None,
        }
    }

    /// Canonical upper-case name, also used as the method-specific field source key.
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Head => "HEAD",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Options => "OPTIONS",
            HttpMethod::Trace => "TRACE",
            HttpMethod::Connect => "CONNECT",
        }
    }

    /// True for POST, PATCH and PUT.
    pub fn is_mutating(&self) -> bool {
        Self::MUTATING.contains(self)
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HttpMethod {
    type Err = DocumentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| DocumentError::UnknownHttpMethod {
            value: s.to_string(),
        })
    }
}

impl TryFrom<String> for HttpMethod {
    type Error = DocumentError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Kind of resource being documented.
///
/// Drives naming, default verb phrases and the URI template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum ResourceType {
    Entity,
    Collection,
    #[serde(rename = "rpc")]
    RemoteProcedure,
}

impl ResourceType {
    /// Parse a resource type tag (`entity`, `collection` or `rpc`).
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "entity" => Some(ResourceType::Entity),
            "collection" => Some(ResourceType::Collection),
            "rpc" => Some(ResourceType::RemoteProcedure),
            _ => None,
        }
    }

    /// Wire tag of this resource type.
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceType::Entity => "entity",
            ResourceType::Collection => "collection",
            ResourceType::RemoteProcedure => "rpc",
        }
    }

    /// Display label used when the service has no override name.
    pub fn label(&self) -> &'static str {
        match self {
            ResourceType::Entity => "Entity",
            ResourceType::Collection => "Collection",
            ResourceType::RemoteProcedure => "Procedure",
        }
    }

    /// Default verb phrases for operations without a description.
    pub fn verb_phrases(&self) -> VerbPhrases {
        match self {
            ResourceType::Entity => VerbPhrases::ByMethod(&[
                (HttpMethod::Get, "Fetch"),
                (HttpMethod::Patch, "Update"),
                (HttpMethod::Delete, "Delete"),
            ]),
            ResourceType::Collection => VerbPhrases::ByMethod(&[
                (HttpMethod::Get, "Fetch all"),
                (HttpMethod::Post, "Create"),
            ]),
            ResourceType::RemoteProcedure => VerbPhrases::Fixed("Procedure"),
        }
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResourceType {
    type Err = DocumentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| DocumentError::InvalidResourceType {
            value: s.to_string(),
        })
    }
}

impl TryFrom<String> for ResourceType {
    type Error = DocumentError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Default verb phrase table of a resource type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerbPhrases {
    /// One phrase per HTTP method; unlisted methods have none.
    ByMethod(&'static [(HttpMethod, &'static str)]),
    /// Same phrase whatever the method.
    Fixed(&'static str),
}

impl VerbPhrases {
    /// Look up the phrase for a method.
    pub fn phrase_for(&self, method: HttpMethod) -> Option<&'static str> {
        match self {
            VerbPhrases::ByMethod(table) => table
                .iter()
                .find(|(m, _)| *m == method)
                .map(|(_, phrase)| *phrase),
            VerbPhrases::Fixed(phrase) => Some(*phrase),
        }
    }
}

/// Named field collection on a service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldSource {
    /// Generic input filter shared by all mutating methods.
    InputFilter,
    /// Input filter dedicated to one HTTP method.
    Method(HttpMethod),
    /// Fields documented for non-mutating actions.
    Documentation,
}

impl FieldSource {
    pub const INPUT_FILTER_KEY: &'static str = "input_filter";
    pub const DOCUMENTATION_KEY: &'static str = "documentation";

    /// Key of this source in a service's field map.
    pub fn key(&self) -> &'static str {
        match self {
            FieldSource::InputFilter => Self::INPUT_FILTER_KEY,
            FieldSource::Method(method) => method.as_str(),
            FieldSource::Documentation => Self::DOCUMENTATION_KEY,
        }
    }
}

/// Which fields a mutating action documents as body properties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BodyPropertyPolicy {
    /// Every field of the selected source.
    #[default]
    AllFields,
    /// Only fields that are required before resolution.
    RequiredOnly,
}

/// How the PATCH required-flag override reaches field descriptors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldOwnership {
    /// Write through to the service's descriptors; every holder sees the change.
    #[default]
    Shared,
    /// Give each action its own copy of the fields it documents.
    Detached,
}

/// Options for building resource documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildOptions {
    pub body_properties: BodyPropertyPolicy,
    pub field_ownership: FieldOwnership,
}

impl BuildOptions {
    /// All fields, shared descriptors.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the body property policy.
    pub fn body_properties(mut self, policy: BodyPropertyPolicy) -> Self {
        self.body_properties = policy;
        self
    }

    /// Set how fields are owned by actions.
    pub fn field_ownership(mut self, ownership: FieldOwnership) -> Self {
        self.field_ownership = ownership;
        self
    }
}
