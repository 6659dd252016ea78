//! Client construction tests.
//!
//! The only test in this binary that touches `TEAMCITY_ADDR`, so mutating
//! the process environment cannot race with other tests.

use std::env;

use teamcity::{Service, TeamCityClient, TeamCityError, Transport, ADDRESS_ENV_VAR};

fn transport() -> Transport {
    Transport::new(reqwest::Client::new())
}

#[test]
fn test_constructors_reject_empty_address() {
    let err = TeamCityClient::with_address("admin", "secret", "", transport()).unwrap_err();
    assert!(matches!(err, TeamCityError::Configuration(_)));

    env::remove_var(ADDRESS_ENV_VAR);
    let err = TeamCityClient::from_env("admin", "secret", transport()).unwrap_err();
    match err {
        TeamCityError::Configuration(msg) => assert!(msg.contains(ADDRESS_ENV_VAR)),
        other => panic!("expected configuration error, got {other:?}"),
    }

    env::set_var(ADDRESS_ENV_VAR, "");
    let err = TeamCityClient::from_env("admin", "secret", transport()).unwrap_err();
    assert!(matches!(err, TeamCityError::Configuration(_)));

    // Nothing listens here; construction performs no I/O so it still succeeds.
    env::set_var(ADDRESS_ENV_VAR, "http://127.0.0.1:9");
    let client = TeamCityClient::from_env("admin", "secret", transport()).unwrap();
    assert_eq!(client.config().address(), "http://127.0.0.1:9");
    assert_eq!(
        client.projects.base_path(),
        "http://127.0.0.1:9/httpAuth/app/rest/"
    );

    env::remove_var(ADDRESS_ENV_VAR);
}
