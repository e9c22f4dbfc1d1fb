//! Storage API against a wiremock Artifactory.

use std::sync::{Arc, Mutex};

use artifactory_rest::domain::FileListOptions;
use artifactory_rest::{ArtifactoryClient, Error, Properties, PropertyList, PropertyMap};
use assert2::{check, let_assert};
use wiremock::{
    Mock, MockServer, Respond, ResponseTemplate,
    matchers::{method, path, query_param, query_param_is_missing},
};

const REPO: &str = "libs-release-local";
const ITEM_PATH: &str = "/artifactory/api/storage/libs-release-local/org/acme/app/1.0";

fn client(server: &MockServer) -> ArtifactoryClient {
    ArtifactoryClient::builder()
        .endpoint(format!("{}/artifactory", server.uri()))
        .build()
        .expect("client")
}

#[tokio::test]
async fn set_item_properties_sends_one_parameter_per_key() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path(ITEM_PATH))
        .and(query_param("recursive", "1"))
        .and(query_param("build.name", "app"))
        .and(query_param("os", "linux,macos"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let properties = PropertyMap::from_iter([
        (" build.name ", vec!["app"]),
        ("os", vec!["linux", "macos"]),
        ("   ", vec!["dropped"]),
    ]);

    let_assert!(
        Ok(true) = client(&server)
            .storage()
            .set_item_properties(REPO, "org/acme/app/1.0", properties)
            .await
    );
}

#[tokio::test]
async fn set_item_properties_escapes_spaces() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path(ITEM_PATH))
        .and(query_param("build name", "nightly build"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let properties = PropertyMap::from_iter([("build name", vec!["nightly build"])]);
    let_assert!(
        Ok(true) = client(&server)
            .storage()
            .set_item_properties(REPO, "org/acme/app/1.0", properties)
            .await
    );

    let requests = server.received_requests().await.expect("recorded requests");
    let query = requests
        .first()
        .and_then(|request| request.url.query().map(str::to_string));
    check!(query.as_deref() == Some("recursive=1&build%20name=nightly%20build"));
}

#[tokio::test]
async fn set_item_properties_on_missing_item_is_false() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path(ITEM_PATH))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let properties = PropertyMap::from_iter([("qa", vec!["passed"])]);
    let_assert!(
        Ok(false) = client(&server)
            .storage()
            .set_item_properties(REPO, "org/acme/app/1.0", properties)
            .await
    );
}

#[tokio::test]
async fn bad_property_input_is_rejected_before_sending() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(204))
        .expect(0)
        .mount(&server)
        .await;

    let client = client(&server);

    let_assert!(
        Err(Error::EmptyInput(_)) = client
            .storage()
            .set_item_properties(REPO, "org/acme/app/1.0", PropertyMap::new())
            .await
    );

    let list = PropertyList::from_iter(["qa"]);
    let_assert!(
        Err(Error::InvalidInput(_)) = client
            .storage()
            .set_item_properties(REPO, "org/acme/app/1.0", list)
            .await
    );

    let_assert!(Err(Error::InvalidInput(msg)) = Properties::try_from(serde_json::json!("qa=passed")));
    check!(msg.contains("expected a property map or list"));
}

#[tokio::test]
async fn get_item_properties_selects_properties_field() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(ITEM_PATH))
        .and(query_param("properties", ""))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "uri": format!("{}{ITEM_PATH}", server.uri()),
            "properties": {"qa": ["passed"], "os": ["linux", "macos"]}
        })))
        .mount(&server)
        .await;

    let_assert!(Ok(properties) = client(&server).storage().get_item_properties(REPO, "org/acme/app/1.0").await);
    check!(properties.len() == 2);
    check!(properties.get("os") == Some(&["linux".to_string(), "macos".to_string()][..]));
}

#[tokio::test]
async fn get_item_properties_absent_reads_as_empty() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(ITEM_PATH))
        .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
            "errors": [{"status": 404, "message": "No properties could be found."}]
        })))
        .mount(&server)
        .await;

    let_assert!(Ok(properties) = client(&server).storage().get_item_properties(REPO, "org/acme/app/1.0").await);
    check!(properties.is_empty());
}

#[tokio::test]
async fn get_item_properties_empty_body_reads_as_empty() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(ITEM_PATH))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let_assert!(Ok(properties) = client(&server).storage().get_item_properties(REPO, "org/acme/app/1.0").await);
    check!(properties.is_empty());
}

#[tokio::test]
async fn delete_item_properties_sends_key_list() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path(ITEM_PATH))
        .and(query_param("recursive", "1"))
        .and(query_param("properties", "qa,os"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let keys = PropertyList::from_iter(["qa", " os ", ""]);
    let_assert!(
        Ok(true) = client(&server)
            .storage()
            .delete_item_properties(REPO, "org/acme/app/1.0", keys)
            .await
    );
}

#[tokio::test]
async fn delete_item_properties_rejects_a_map() {
    let server = MockServer::start().await;

    let map = PropertyMap::from_iter([("qa", vec!["passed"])]);
    let_assert!(
        Err(Error::InvalidInput(_)) = client(&server)
            .storage()
            .delete_item_properties(REPO, "org/acme/app/1.0", map)
            .await
    );
    check!(server.received_requests().await.is_some_and(|requests| requests.is_empty()));
}

#[tokio::test]
async fn delete_item_properties_on_missing_item_is_false() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path(ITEM_PATH))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let_assert!(
        Ok(false) = client(&server)
            .storage()
            .delete_item_properties(REPO, "org/acme/app/1.0", PropertyList::from_iter(["qa"]))
            .await
    );
}

/// In-memory property store standing in for an Artifactory item.
#[derive(Clone, Default)]
struct PropertyStore(Arc<Mutex<Vec<(String, Vec<String>)>>>);

impl Respond for PropertyStore {
    fn respond(&self, request: &wiremock::Request) -> ResponseTemplate {
        let mut store = self.0.lock().expect("store lock");
        match request.method.as_str() {
            "PUT" => {
                for (key, value) in request.url.query_pairs() {
                    if key == "recursive" {
                        continue;
                    }
                    store.retain(|(existing, _)| existing.as_str() != key.as_ref());
                    store.push((key.into_owned(), value.split(',').map(str::to_string).collect()));
                }
                ResponseTemplate::new(204)
            }
            "GET" => {
                let properties: serde_json::Map<String, serde_json::Value> = store
                    .iter()
                    .map(|(key, values)| (key.clone(), serde_json::json!(values)))
                    .collect();
                ResponseTemplate::new(200).set_body_json(serde_json::json!({
                    "uri": request.url.to_string(),
                    "properties": properties,
                }))
            }
            _ => ResponseTemplate::new(405),
        }
    }
}

#[tokio::test]
async fn set_then_get_round_trip() {
    let server = MockServer::start().await;

    Mock::given(path(ITEM_PATH))
        .and(query_param_is_missing("list"))
        .respond_with(PropertyStore::default())
        .mount(&server)
        .await;

    let client = client(&server);
    let properties = PropertyMap::from_iter([
        ("zeta", vec!["z"]),
        ("key1", vec!["value1", "value2"]),
        ("build.name", vec!["app"]),
    ]);

    let_assert!(Ok(true) = client.storage().set_item_properties(REPO, "org/acme/app/1.0", properties).await);
    let_assert!(Ok(read) = client.storage().get_item_properties(REPO, "org/acme/app/1.0").await);

    check!(read.keys().collect::<Vec<_>>() == vec!["zeta", "key1", "build.name"]);
    check!(read.get("key1") == Some(&["value1".to_string(), "value2".to_string()][..]));
}

#[tokio::test]
async fn storage_info() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/artifactory/api/storageinfo"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "binariesSummary": {"binariesCount": "125,726", "binariesSize": "3.48 GB"},
            "fileStoreSummary": {"storageType": "filesystem"},
            "repositoriesSummaryList": [{"repoKey": "TOTAL", "repoType": "NA", "foldersCount": 3, "filesCount": 9, "itemsCount": 12}]
        })))
        .mount(&server)
        .await;

    let_assert!(Ok(info) = client(&server).storage().storage_info().await);
    check!(info.binaries_summary.binaries_size.as_deref() == Some("3.48 GB"));
    check!(info.repositories_summary_list.first().map(|repo| repo.files_count) == Some(9));
}

#[tokio::test]
async fn file_list_with_options() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/artifactory/api/storage/libs-release-local/org"))
        .and(query_param("list", "true"))
        .and(query_param("deep", "1"))
        .and(query_param("depth", "3"))
        .and(query_param("listFolders", "1"))
        .and(query_param_is_missing("includeRootPath"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "uri": format!("{}/artifactory/api/storage/libs-release-local/org", server.uri()),
            "created": "2024-03-11T10:15:30.000Z",
            "files": [
                {"uri": "/acme", "size": -1, "lastModified": "2024-03-11T10:15:30.000Z", "folder": true},
                {"uri": "/acme/app/1.0/app-1.0.jar", "size": 1024, "lastModified": "2024-03-11T10:15:30.000Z", "folder": false, "sha1": "da39a3ee"}
            ]
        })))
        .mount(&server)
        .await;

    let options = FileListOptions::deep(3).with_folders();
    let_assert!(Ok(list) = client(&server).storage().file_list(REPO, "org", &options).await);

    check!(list.files.len() == 2);
    check!(list.files.iter().filter(|entry| entry.folder).count() == 1);
}

#[tokio::test]
async fn file_list_on_missing_folder_fails() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
            "errors": [{"status": 404, "message": "Unable to find item"}]
        })))
        .mount(&server)
        .await;

    let result = client(&server)
        .storage()
        .file_list(REPO, "missing", &FileListOptions::default())
        .await;

    let_assert!(Err(Error::RequestFailed(err)) = result);
    check!(err.status() == 404);
    check!(err.messages() == ["Unable to find item".to_string()]);
}

#[tokio::test]
async fn file_info_found_and_absent() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/artifactory/api/storage/libs-release-local/org/acme/app.jar"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "repo": REPO,
            "path": "/org/acme/app.jar",
            "created": "2024-03-11T10:15:30.000Z",
            "size": "2048",
            "checksums": {"sha1": "da39a3ee", "md5": "d41d8cd9"}
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/artifactory/api/storage/libs-release-local/org/acme/missing.jar"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let client = client(&server);

    let_assert!(Ok(Some(artifact)) = client.storage().file_info(REPO, "org/acme/app.jar").await);
    check!(artifact.size == 2048);
    check!(artifact.path == "/org/acme/app.jar");

    let_assert!(Ok(None) = client.storage().file_info(REPO, "org/acme/missing.jar").await);
}

#[tokio::test]
async fn server_errors_keep_messages_in_order() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500).set_body_json(serde_json::json!({
            "errors": [{"status": 500, "message": "x"}, {"status": 500, "message": "y"}]
        })))
        .mount(&server)
        .await;

    let_assert!(Err(err) = client(&server).storage().get_item_properties(REPO, "org").await);
    check!(err.is_server_error());
    check!(err.messages() == ["x".to_string(), "y".to_string()]);
}

#[tokio::test]
async fn unparseable_error_body_gives_status_message() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"))
        .mount(&server)
        .await;

    let_assert!(Err(err) = client(&server).storage().storage_info().await);
    check!(err.status() == Some(502));
    check!(err.messages() == ["HTTP 502 Bad Gateway".to_string()]);
}
