//! Reachability checks against stub servers.

use teamcity::{TeamCityClient, TeamCityError, Transport};
use wiremock::matchers::{basic_auth, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SERVER_PATH: &str = "/httpAuth/app/rest/server";

fn client(address: &str) -> TeamCityClient {
    TeamCityClient::with_address(
        "admin",
        "secret",
        address,
        Transport::new(reqwest::Client::new()),
    )
    .unwrap()
}

async fn server_answering(status: u16, body: &str) -> MockServer {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(SERVER_PATH))
        .respond_with(ResponseTemplate::new(status).set_body_string(body))
        .expect(1)
        .mount(&mock_server)
        .await;
    mock_server
}

#[tokio::test]
async fn test_validate_ok() {
    let mock_server = server_answering(200, r#"{"version":"2024.12"}"#).await;
    let valid = client(&mock_server.uri()).validate().await.unwrap();
    assert!(valid);
}

#[tokio::test]
async fn test_validate_forbidden_counts_as_valid() {
    let mock_server = server_answering(403, "Access denied").await;
    let valid = client(&mock_server.uri()).validate().await.unwrap();
    assert!(valid);
}

#[tokio::test]
async fn test_validate_server_error() {
    let mock_server = server_answering(500, "boom").await;
    let err = client(&mock_server.uri()).validate().await.unwrap_err();

    assert!(matches!(err, TeamCityError::Api { .. }));
    assert_eq!(err.status_code(), Some(500));
    let msg = err.to_string();
    assert!(msg.contains("500"), "{msg}");
    assert!(msg.contains("boom"), "{msg}");
}

#[tokio::test]
async fn test_validate_unauthorized_is_an_error() {
    let mock_server = server_answering(401, "Authentication required").await;
    let err = client(&mock_server.uri()).validate().await.unwrap_err();
    assert_eq!(err.status_code(), Some(401));
}

#[tokio::test]
async fn test_validate_sends_auth_and_accept() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(SERVER_PATH))
        .and(basic_auth("admin", "secret"))
        .and(header("accept", "application/json"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    assert!(client(&mock_server.uri()).validate().await.unwrap());
}

#[tokio::test]
async fn test_validate_connection_refused() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let address = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);

    let err = client(&address).validate().await.unwrap_err();
    assert!(matches!(err, TeamCityError::Transport(_)), "{err:?}");
}
