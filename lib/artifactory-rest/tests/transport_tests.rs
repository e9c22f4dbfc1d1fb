//! The hyper transport on its own: every HTTP answer is a response.

use std::time::Duration;

use artifactory_rest::{DEFAULT_USER_AGENT, Error, HttpClient, HyperClient, Method, Request};
use assert2::{check, let_assert};
use bytes::Bytes;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_string, header, method, path},
};

fn url(server: &MockServer, route: &str) -> url::Url {
    url::Url::parse(&format!("{}{route}", server.uri())).expect("url")
}

#[tokio::test]
async fn get_returns_status_headers_and_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/artifactory/api/storageinfo"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("X-Artifactory-Id", "a1b2c3")
                .set_body_string(r#"{"repositoriesSummaryList":[]}"#),
        )
        .mount(&server)
        .await;

    let request = Request::builder(Method::Get, url(&server, "/artifactory/api/storageinfo")).build();
    let_assert!(Ok(response) = HyperClient::new().execute(request).await);

    check!(response.status() == 200);
    check!(response.header("x-artifactory-id") == Some("a1b2c3"));
    check!(response.text_lossy() == r#"{"repositoriesSummaryList":[]}"#);
}

#[tokio::test]
async fn put_sends_body() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/artifactory/libs-release-local/notes.txt"))
        .and(header("Content-Type", "text/plain"))
        .and(body_string("release notes"))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let request = Request::<Bytes>::builder(Method::Put, url(&server, "/artifactory/libs-release-local/notes.txt"))
        .text("release notes")
        .build();
    let_assert!(Ok(response) = HyperClient::new().execute(request).await);
    check!(response.status() == 201);
}

#[tokio::test]
async fn error_statuses_are_not_transport_errors() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404).set_body_string("not here"))
        .mount(&server)
        .await;

    let request = Request::builder(Method::Get, url(&server, "/missing")).build();
    let_assert!(Ok(response) = HyperClient::new().execute(request).await);

    check!(response.is_not_found());
    check!(response.body() == &Bytes::from_static(b"not here"));
}

#[tokio::test]
async fn sends_default_user_agent() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(header("User-Agent", DEFAULT_USER_AGENT))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let request = Request::builder(Method::Get, url(&server, "/")).build();
    let_assert!(Ok(_) = HyperClient::new().execute(request).await);
}

#[tokio::test]
async fn explicit_user_agent_wins() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(header("User-Agent", "release-bot/2.0"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let request = Request::<Bytes>::builder(Method::Get, url(&server, "/"))
        .header("user-agent", "release-bot/2.0")
        .build();
    let_assert!(Ok(_) = HyperClient::new().execute(request).await);
}

#[tokio::test]
async fn slow_server_times_out() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
        .mount(&server)
        .await;

    let client = HyperClient::builder().timeout(Duration::from_millis(100)).build();
    let request = Request::builder(Method::Get, url(&server, "/slow")).build();

    let_assert!(Err(err) = client.execute(request).await);
    check!(err.is_timeout());
}

#[tokio::test]
async fn refused_connection_is_a_connection_error() {
    let request = Request::builder(
        Method::Get,
        url::Url::parse("http://127.0.0.1:1/artifactory/api/system/version").expect("url"),
    )
    .build();

    let_assert!(Err(Error::Connection(_)) = HyperClient::new().execute(request).await);
}
