//! Every Artifactory operation this client speaks, as data.

use artifactory_rest_core::{Endpoint, FallbackPolicy, Method, QueryParam};

const ITEM: &str = "/api/storage/{repoKey}/{itemPath}";
const ARTIFACT: &str = "/{repoKey}/{itemPath}";
const RECURSIVE: &[QueryParam] = &[QueryParam::Pair("recursive", "1")];

/// Set properties on an item (and its children).
pub static SET_ITEM_PROPERTIES: Endpoint =
    Endpoint::new("storage:set-item-properties", Method::Put, ITEM)
        .with_query(RECURSIVE)
        .with_fallback(FallbackPolicy::BooleanFalseOnAbsence);

/// Read the properties of an item.
pub static GET_ITEM_PROPERTIES: Endpoint =
    Endpoint::new("storage:get-item-properties", Method::Get, ITEM)
        .with_query(&[QueryParam::Key("properties")])
        .with_fallback(FallbackPolicy::EmptyMappingOnAbsence)
        .with_selector("properties");

/// Remove properties from an item (and its children).
pub static DELETE_ITEM_PROPERTIES: Endpoint =
    Endpoint::new("storage:delete-item-properties", Method::Delete, ITEM)
        .with_query(RECURSIVE)
        .with_fallback(FallbackPolicy::BooleanFalseOnAbsence);

/// Storage summary of the whole instance.
pub static STORAGE_INFO: Endpoint = Endpoint::new("storage:info", Method::Get, "/api/storageinfo");

/// List the files under a folder.
pub static FILE_LIST: Endpoint = Endpoint::new("storage:file-list", Method::Get, ITEM)
    .with_query(&[QueryParam::Pair("list", "true")]);

/// Metadata of a single file.
pub static FILE_INFO: Endpoint = Endpoint::new("storage:file-info", Method::Get, ITEM)
    .with_fallback(FallbackPolicy::NullOnAbsence);

/// Upload an artifact.
pub static DEPLOY_ARTIFACT: Endpoint = Endpoint::new("artifact:deploy", Method::Put, ARTIFACT);

/// Download an artifact.
pub static RETRIEVE_ARTIFACT: Endpoint =
    Endpoint::new("artifact:retrieve", Method::Get, ARTIFACT)
        .with_fallback(FallbackPolicy::NullOnAbsence);

/// Delete an artifact or folder.
pub static DELETE_ARTIFACT: Endpoint = Endpoint::new("artifact:delete", Method::Delete, ARTIFACT)
    .with_fallback(FallbackPolicy::BooleanFalseOnAbsence);

/// Run an AQL query.
pub static AQL_SEARCH: Endpoint = Endpoint::new("search:aql", Method::Post, "/api/search/aql");

/// Server version and enabled add-ons.
pub static SYSTEM_VERSION: Endpoint =
    Endpoint::new("system:version", Method::Get, "/api/system/version");

/// The whole catalogue, in declaration order.
pub static ALL: &[&Endpoint] = &[
    &SET_ITEM_PROPERTIES,
    &GET_ITEM_PROPERTIES,
    &DELETE_ITEM_PROPERTIES,
    &STORAGE_INFO,
    &FILE_LIST,
    &FILE_INFO,
    &DEPLOY_ARTIFACT,
    &RETRIEVE_ARTIFACT,
    &DELETE_ARTIFACT,
    &AQL_SEARCH,
    &SYSTEM_VERSION,
];
