//! End-to-end tests for the scripts service against a stub server.

mod common;

use common::with_client;
use paperspace::{CreateScriptRequest, Error, ScriptId};
use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test(flavor = "multi_thread")]
async fn create_reports_server_error_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/scripts/createScript"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream exploded"))
        .expect(1)
        .mount(&server)
        .await;

    let result = with_client(&server, |client| {
        client
            .scripts()
            .create(&CreateScriptRequest::inline("boot", "echo hi"))
    })
    .await;

    let err = result.expect_err("a 500 must not yield a script");
    assert_eq!(err.status(), Some(500));
    assert!(err.to_string().contains("500"));
}

#[tokio::test(flavor = "multi_thread")]
async fn create_returns_script() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/scripts/createScript"))
        .and(body_json(json!({
            "scriptName": "boot",
            "scriptText": "apt-get update",
            "isEnabled": true,
            "machineId": "ps1"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "scr1",
            "name": "boot",
            "ownerType": "user",
            "ownerId": "u1",
            "dtCreated": "2018-02-03T04:05:06.000Z",
            "isEnabled": true,
            "runOnce": false
        })))
        .expect(1)
        .mount(&server)
        .await;

    let script = with_client(&server, |client| {
        let request = CreateScriptRequest {
            is_enabled: Some(true),
            machine_id: Some("ps1".into()),
            ..CreateScriptRequest::inline("boot", "apt-get update")
        };
        client.scripts().create(&request)
    })
    .await
    .unwrap();

    assert_eq!(script.id, Some(ScriptId::new("scr1")));
    assert_eq!(script.is_enabled, Some(true));
    assert_eq!(script.run_once, Some(false));
}

#[tokio::test(flavor = "multi_thread")]
async fn list_returns_all_scripts() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/scripts/getScripts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": "scr1", "name": "boot"},
            {"id": "scr2", "name": "cleanup", "description": null}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let scripts = with_client(&server, |client| client.scripts().list())
        .await
        .unwrap();
    let names: Vec<_> = scripts.iter().filter_map(|s| s.name.as_deref()).collect();
    assert_eq!(names, ["boot", "cleanup"]);
}

#[tokio::test(flavor = "multi_thread")]
async fn show_and_destroy_use_script_id() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/scripts/getScript"))
        .and(query_param("scriptId", "scr1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "scr1"})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/scripts/scr1/destroy"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    with_client(&server, |client| {
        let id = ScriptId::new("scr1");
        let script = client.scripts().show(&id)?;
        assert_eq!(script.id.as_ref(), Some(&id));
        client.scripts().destroy(&id)?;
        Ok::<(), Error>(())
    })
    .await
    .unwrap();
}

#[tokio::test(flavor = "multi_thread")]
async fn malformed_body_is_a_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/scripts/getScripts"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{\"id\": \"scr1\"}"))
        .mount(&server)
        .await;

    let err = with_client(&server, |client| client.scripts().list())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Deserialization(_)));
}

#[tokio::test(flavor = "multi_thread")]
async fn unsafe_script_ids_never_reach_server() {
    let server = MockServer::start().await;
    Mock::given(wiremock::matchers::any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    with_client(&server, |client| {
        for raw in ["", "scr1?x=1", "../machines/ps1", "scr 1"] {
            let id = ScriptId::new(raw);
            let destroyed = client.scripts().destroy(&id);
            assert!(matches!(destroyed, Err(Error::InvalidId(_))), "{raw:?}");
            let shown = client.scripts().show(&id);
            assert!(matches!(shown, Err(Error::InvalidId(_))), "{raw:?}");
        }
    })
    .await;
}
