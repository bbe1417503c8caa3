use httpmock::prelude::*;
use pulse_oximeter::core::{Config, DeviceServer};
use pulse_oximeter::domains::directory::{
    HttpDirectoryClient, RegistrarState, RegistrationOutcome, RegistrationStep,
};
use std::time::Duration;

const HEARTRATE_BODY: &str =
    r#"</pulseoximeter/heartrate>;ct=41;rt="Heartrate Resource";if="sensor""#;
const OXYGEN_BODY: &str =
    r#"</pulseoximeter/oxygen-saturation>;ct=41;rt="Oxygen Saturation Resource";if="sensor""#;

fn device(directory_url: &str) -> DeviceServer {
    let mut config = Config::default();
    config.directory.base_url = Some(directory_url.to_string());
    config.directory.timeout_secs = 2;
    DeviceServer::new(config).unwrap()
}

#[tokio::test]
async fn test_full_registration_against_mock_directory() {
    let directory = MockServer::start_async().await;

    let discovery = directory
        .mock_async(|when, then| {
            when.method(GET).path("/.well-known/core");
            then.status(200)
                .header("content-type", "application/link-format")
                .body(r#"</rd>;rt="core.rd";ct=40,</rd-lookup/ep>;rt="core.rd-lookup-ep""#);
        })
        .await;

    let heartrate = directory
        .mock_async(|when, then| {
            when.method(POST)
                .path("/rd")
                .query_param("ep", "pulseoximeter/heartrate/")
                .header("content-type", "application/link-format")
                .body(HEARTRATE_BODY);
            then.status(201).header("location", "/rd/4521");
        })
        .await;

    let oxygen = directory
        .mock_async(|when, then| {
            when.method(POST)
                .path("/rd")
                .query_param("ep", "pulseoximeter/oxygen-saturation/")
                .header("content-type", "application/link-format")
                .body(OXYGEN_BODY);
            then.status(201).header("location", "/rd/4522");
        })
        .await;

    let server = device(&directory.base_url());
    let client = server.directory_client().unwrap().unwrap();
    let report = server.register_with(client).await;

    assert_eq!(report.state, RegistrarState::Done);
    assert!(report.faults.is_empty());

    discovery.assert_hits_async(2).await;
    heartrate.assert_async().await;
    oxygen.assert_async().await;

    let endpoints: Vec<_> = report.registrations.iter().map(|r| r.endpoint.as_str()).collect();
    assert_eq!(
        endpoints,
        vec!["pulseoximeter/heartrate/", "pulseoximeter/oxygen-saturation/"]
    );
    assert_eq!(
        report.registrations[0].outcome,
        RegistrationOutcome::Registered {
            status: 201,
            location: Some("/rd/4521".to_string()),
        }
    );
    assert_eq!(report.initial_listing.as_ref().map(Vec::len), Some(2));
}

#[tokio::test]
async fn test_rejected_registration_continues() {
    let directory = MockServer::start_async().await;

    directory
        .mock_async(|when, then| {
            when.method(GET).path("/.well-known/core");
            then.status(200).body("");
        })
        .await;

    let heartrate = directory
        .mock_async(|when, then| {
            when.method(POST)
                .path("/rd")
                .query_param("ep", "pulseoximeter/heartrate/");
            then.status(400);
        })
        .await;

    let oxygen = directory
        .mock_async(|when, then| {
            when.method(POST)
                .path("/rd")
                .query_param("ep", "pulseoximeter/oxygen-saturation/");
            then.status(201).header("location", "/rd/7");
        })
        .await;

    let server = device(&directory.base_url());
    let report = server
        .register_with(server.directory_client().unwrap().unwrap())
        .await;

    heartrate.assert_async().await;
    oxygen.assert_async().await;
    assert_eq!(
        report.registrations[0].outcome,
        RegistrationOutcome::Rejected { status: 400 }
    );
    assert_eq!(report.registered_count(), 1);
    assert_eq!(report.state, RegistrarState::Done);
}

#[tokio::test]
async fn test_heartrate_transport_failure_still_registers_oxygen() {
    let directory = MockServer::start_async().await;

    directory
        .mock_async(|when, then| {
            when.method(GET).path("/.well-known/core");
            then.status(200).body(r#"</rd>;rt="core.rd""#);
        })
        .await;

    // Outlives the client timeout, so the exchange fails at the transport level.
    directory
        .mock_async(|when, then| {
            when.method(POST)
                .path("/rd")
                .query_param("ep", "pulseoximeter/heartrate/");
            then.status(201).delay(Duration::from_secs(3));
        })
        .await;

    let oxygen = directory
        .mock_async(|when, then| {
            when.method(POST)
                .path("/rd")
                .query_param("ep", "pulseoximeter/oxygen-saturation/");
            then.status(201).header("location", "/rd/8");
        })
        .await;

    let client = HttpDirectoryClient::new(&directory.base_url(), Duration::from_millis(500)).unwrap();
    let report = device(&directory.base_url()).register_with(client).await;

    oxygen.assert_async().await;
    assert!(matches!(
        report.registrations[0].outcome,
        RegistrationOutcome::Failed { .. }
    ));
    assert!(report.registrations[1].is_registered());
    assert!(matches!(
        report.state,
        RegistrarState::Failed {
            step: RegistrationStep::Registering(0),
            ..
        }
    ));
}

#[tokio::test]
async fn test_unreachable_directory() {
    // Nothing listens on port 1.
    let server = device("http://127.0.0.1:1");
    let report = server
        .register_with(server.directory_client().unwrap().unwrap())
        .await;

    assert_eq!(report.registrations.len(), 2);
    assert_eq!(report.registered_count(), 0);
    assert_eq!(report.faults.len(), 4);
    assert!(
        report.faults[0].cause.starts_with("Directory unreachable"),
        "{}",
        report.faults[0].cause
    );
    assert!(matches!(
        report.state,
        RegistrarState::Failed {
            step: RegistrationStep::Discovering,
            ..
        }
    ));

    // Serving is unaffected.
    assert!(server.read("/pulseoximeter/heartrate").is_ok());
}

#[tokio::test]
async fn test_discovery_error_status_is_a_warning() {
    let directory = MockServer::start_async().await;

    let discovery = directory
        .mock_async(|when, then| {
            when.method(GET).path("/.well-known/core");
            then.status(404);
        })
        .await;
    directory
        .mock_async(|when, then| {
            when.method(POST).path("/rd");
            then.status(201);
        })
        .await;

    let server = device(&directory.base_url());
    let report = server
        .register_with(server.directory_client().unwrap().unwrap())
        .await;

    discovery.assert_hits_async(2).await;
    assert_eq!(report.registered_count(), 2);
    assert!(report.faults.is_empty());
    assert_eq!(report.state, RegistrarState::Done);

    let steps: Vec<_> = report.warnings.iter().map(|w| w.step).collect();
    assert_eq!(
        steps,
        vec![RegistrationStep::Discovering, RegistrationStep::Verifying]
    );
    assert!(report.warnings[0].message.contains("404"));
}

#[tokio::test]
async fn test_unparsable_listing_is_a_fault() {
    let directory = MockServer::start_async().await;

    directory
        .mock_async(|when, then| {
            when.method(GET).path("/.well-known/core");
            then.status(200).body("this is not link format");
        })
        .await;
    directory
        .mock_async(|when, then| {
            when.method(POST).path("/rd");
            then.status(201);
        })
        .await;

    let server = device(&directory.base_url());
    let report = server
        .register_with(server.directory_client().unwrap().unwrap())
        .await;

    assert_eq!(report.registered_count(), 2);
    assert!(report.faults[0].cause.starts_with("Malformed response"));
    assert!(matches!(
        report.state,
        RegistrarState::Failed {
            step: RegistrationStep::Discovering,
            ..
        }
    ));
}
