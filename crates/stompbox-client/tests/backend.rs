//! Request shapes and response decoding of the backend client.

mod common;

use common::{Call, ScriptedTransport, url};
use serde_json::json;
use stompbox_chain::{ChainRequest, ChainStep};
use stompbox_client::{BackendClient, BackendMode, ProbeError, TransportError};

#[test]
fn test_base_url_trailing_slash_is_dropped() {
    let client = BackendClient::new(
        "http://fx.test/",
        ScriptedTransport::new().reply(json!({"status": "ok", "mode": "s3"})),
    );

    assert_eq!(client.base_url(), "http://fx.test");
    assert_eq!(client.probe_mode().unwrap(), BackendMode::ObjectStorage);
    assert_eq!(client.transport().calls(), vec![Call::Get(url("health"))]);
}

#[test]
fn test_probe_errors() {
    let client = common::client(
        ScriptedTransport::new()
            .reply(json!({"status": "ok", "mode": "ftp"}))
            .reply(json!({"status": "ok"}))
            .fail(TransportError::Network("Connection refused".to_string())),
    );

    assert_eq!(
        client.probe_mode(),
        Err(ProbeError::UnknownMode("ftp".to_string()))
    );
    assert!(matches!(
        client.probe_mode(),
        Err(ProbeError::Transport(TransportError::Decode(_)))
    ));
    assert!(matches!(
        client.probe_mode(),
        Err(ProbeError::Transport(TransportError::Network(_)))
    ));
}

#[test]
fn test_process_local_request_shape() {
    let client = common::client(ScriptedTransport::new().reply(json!({
        "output_file": "processed_guitar.wav",
        "download_url": "/api/audio/processed_guitar.wav",
        "effects_applied": ["Booster_Preamp", "Blues Driver"],
        "input_normalized": "norm_in.wav",
        "output_normalized": "norm_out.wav",
    })));
    let chain = ChainRequest::from(vec![
        ChainStep::new("Booster_Preamp").with_param("gain_db", 6.0),
        ChainStep::new("Blues Driver").with_param("drive_db", 10.0),
    ]);

    let response = client.process_local("guitar.wav", &chain).unwrap();

    assert_eq!(response.output_file, "processed_guitar.wav");
    assert_eq!(response.effects_applied, ["Booster_Preamp", "Blues Driver"]);
    assert_eq!(
        client.transport().calls(),
        vec![Call::Post(
            url("process"),
            json!({
                "input_file": "guitar.wav",
                "effect_chain": [
                    {"name": "Booster_Preamp", "params": {"gain_db": 6.0}},
                    {"name": "Blues Driver", "params": {"drive_db": 10.0}},
                ],
            })
        )]
    );
}

#[test]
fn test_list_available_effects() {
    let client = common::client(ScriptedTransport::new().reply(json!({
        "effects": [
            {"name": "Chorus", "default_params": {"rate_hz": 1.0, "depth": 0.25}, "class_name": "Chorus"},
            {"name": "Reverb", "default_params": {"room_size": 0.5}, "class_name": "Reverb"},
        ]
    })));

    let effects = client.list_available_effects().unwrap();

    assert_eq!(effects.len(), 2);
    assert_eq!(effects[1].name, "Reverb");
    assert_eq!(effects[1].default_params.get("room_size"), Some(&0.5));
    assert_eq!(client.transport().calls(), vec![Call::Get(url("effects"))]);
}

#[test]
fn test_download_url_keeps_key_path() {
    let client = common::client(
        ScriptedTransport::new().reply(json!({"download_url": "https://bucket.test/x?sig=9"})),
    );

    let link = client.download_url("output/x.wav").unwrap();

    assert_eq!(link, "https://bucket.test/x?sig=9");
    assert_eq!(
        client.transport().calls(),
        vec![Call::Get(url("download-url/output/x.wav"))]
    );
}

#[test]
fn test_unexpected_body_is_decode_error() {
    let client = common::client(ScriptedTransport::new().reply(json!({"files": "guitar.wav"})));

    let err = client.list_input_files().unwrap_err();

    assert!(matches!(err, TransportError::Decode(_)), "got: {err:?}");
}

#[test]
fn test_status_errors_pass_through() {
    let client = common::client(ScriptedTransport::new().fail(TransportError::from_status(
        400,
        r#"{"detail":"Unknown effect: Wah"}"#,
    )));
    let chain = ChainRequest::from(vec![ChainStep::new("Wah")]);

    let err = client.process_object_storage("input/a.wav", &chain).unwrap_err();

    assert_eq!(err.user_message(), "Unknown effect: Wah");
}
