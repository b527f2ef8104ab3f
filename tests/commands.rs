mod common;

use common::*;
use serde_json::json;
use thetacam_lib_rs::{
    ThetaError,
    cam::StaticAddress,
    options::{OptionName, Options},
    settings::*,
    transport::{HttpReply, TransportError},
};

#[tokio::test]
async fn set_bluetooth_device_returns_device_name() {
    let (cam, transport) = cam(None);
    transport.push_json(
        200,
        json!({"name": "camera._setBluetoothDevice", "state": "done", "results": {"deviceName": "X"}}),
    );

    let name = cam
        .set_bluetooth_device("00000000-0000-0000-0000-000000000000")
        .await
        .unwrap();

    assert_eq!(name, "X");

    let requests = transport.requests();
    assert_eq!(requests[0].path, "osc/commands/execute");
    assert_eq!(requests[0].command(), Some("camera._setBluetoothDevice"));
    assert_eq!(
        requests[0].parameters(),
        &json!({"uuid": "00000000-0000-0000-0000-000000000000"})
    );
}

#[tokio::test]
async fn non_json_success_body_is_a_protocol_error() {
    let (cam, transport) = cam(None);
    transport.push(HttpReply {
        status: 200,
        body: "<html>not json</html>".to_string(),
    });

    let err = cam.get_info().await.unwrap_err();

    let ThetaError::WebApi(message) = err else {
        panic!("unexpected error {err:?}");
    };
    let message = message.to_lowercase();
    assert!(message.contains("json") || message.contains("illegal"), "{message}");
}

#[tokio::test]
async fn non_json_error_status_is_a_protocol_error_with_status() {
    let (cam, transport) = cam(None);
    transport.push(HttpReply {
        status: 503,
        body: "Service Unavailable".to_string(),
    });

    let err = cam.reset().await.unwrap_err();

    assert!(matches!(err, ThetaError::WebApi(_)));
    assert!(err.to_string().contains("503"));
}

#[tokio::test]
async fn timeout_is_not_connected() {
    let (cam, transport) = cam(None);
    transport.push_error(TransportError::Timeout(
        "operation timed out".to_string(),
    ));

    let err = cam.get_state().await.unwrap_err();

    let ThetaError::NotConnected(message) = err else {
        panic!("unexpected error {err:?}");
    };
    assert!(message.to_lowercase().contains("time"), "{message}");
}

#[tokio::test]
async fn error_envelope_carries_device_message() {
    let (cam, transport) = cam(None);
    transport.push_json(
        400,
        error("camera.delete", "invalidParameterValue", "Specified file does not exist"),
    );

    let err = cam
        .delete_files(&["http://192.168.1.1/files/abc/R0010001.JPG".to_string()])
        .await
        .unwrap_err();

    let ThetaError::WebApi(message) = err else {
        panic!("unexpected error {err:?}");
    };
    assert!(message.contains("Specified file does not exist"));
}

#[tokio::test]
async fn get_info_maps_every_field() {
    let (cam, transport) = cam(None);
    transport.push_json(200, info("RICOH THETA Z1", "2.10.3"));

    let info = cam.get_info().await.unwrap();

    assert_eq!(info.model, "RICOH THETA Z1");
    assert_eq!(info.firmware_version, "2.10.3");
    assert_eq!(info.serial_number, "00105377");
    assert!(info.has_gyro);
    assert!(!info.has_gps);
    assert_eq!(info.http_port, 80);
    assert_eq!(info.api_level, vec![1, 2]);
    assert_eq!(transport.requests()[0].method, "GET");
    assert_eq!(transport.requests()[0].path, "osc/info");
}

#[tokio::test]
async fn get_state_posts_to_state_path() {
    let (cam, transport) = cam(None);
    transport.push_json(200, state(2));

    let state = cam.get_state().await.unwrap();

    assert_eq!(state.api_version, Some(2));
    assert_eq!(state.charging_state, Some(ChargingState::NotCharging));
    assert_eq!(state.capture_status, Some(CaptureStatus::Idle));

    let request = &transport.requests()[0];
    assert_eq!(request.method, "POST");
    assert_eq!(request.path, "osc/state");
}

#[tokio::test]
async fn list_files_truncates_date_time() {
    let (cam, transport) = cam(None);
    transport.push_json(
        200,
        done(
            "camera.listFiles",
            json!({
                "entries": [
                    {
                        "name": "R0010015.JPG",
                        "fileUrl": "http://192.168.1.1/files/abc/100RICOH/R0010015.JPG",
                        "size": 4051440,
                        "dateTimeZone": "2015:07:10 11:05:18+09:00",
                        "lat": 50.5,
                        "lng": 14.25,
                        "width": 5376,
                        "height": 2688
                    },
                    {
                        "name": "R0010016.MP4",
                        "fileUrl": "http://192.168.1.1/files/abc/100RICOH/R0010016.MP4",
                        "size": 18000000,
                        "dateTimeZone": "2015:07:10 11:06:00+09:00",
                        "width": 1920,
                        "height": 960,
                        "_recordTime": 12
                    }
                ],
                "totalEntries": 10
            }),
        ),
    );

    let (files, total) = cam.list_files(FileType::All, 0, 2).await.unwrap();

    assert_eq!(total, 10);
    assert_eq!(files.len(), 2);
    assert_eq!(files[0].date_time, "2015:07:10 11:05");
    assert_eq!(files[0].latitude, Some(50.5));
    assert_eq!(files[1].date_time, "2015:07:10 11:06");
    assert_eq!(files[1].record_time, Some(12));

    let parameters = transport.requests()[0].parameters().clone();
    assert_eq!(parameters["fileType"], "all");
    assert_eq!(parameters["startPosition"], 0);
    assert_eq!(parameters["entryCount"], 2);
}

#[tokio::test]
async fn delete_all_variants_send_type_keywords() {
    let (cam, transport) = cam(None);
    for _ in 0..3 {
        transport.push_json(200, done_empty("camera.delete"));
    }

    cam.delete_all_files().await.unwrap();
    cam.delete_all_image_files().await.unwrap();
    cam.delete_all_video_files().await.unwrap();

    let urls: Vec<_> = transport
        .requests()
        .iter()
        .map(|request| request.parameters()["fileUrls"].clone())
        .collect();
    assert_eq!(urls, vec![json!(["all"]), json!(["image"]), json!(["video"])]);
}

#[tokio::test]
async fn get_options_requests_wire_keys_and_maps_values() {
    let (cam, transport) = cam(None);
    transport.push_json(
        200,
        done(
            "camera.getOptions",
            json!({"options": {"iso": 400, "whiteBalance": "daylight", "_filter": "Some Future Filter"}}),
        ),
    );

    let options = cam
        .get_options(&[OptionName::Iso, OptionName::WhiteBalance, OptionName::Filter])
        .await
        .unwrap();

    assert_eq!(options.iso, Some(IsoSpeed::Iso400));
    assert_eq!(options.white_balance, Some(WhiteBalance::Daylight));
    assert_eq!(options.filter, None);
    assert_eq!(
        transport.requests()[0].parameters()["optionNames"],
        json!(["iso", "whiteBalance", "_filter"])
    );
}

#[tokio::test]
async fn set_options_sends_only_set_fields() {
    let (cam, transport) = cam(None);
    transport.push_json(200, done_empty("camera.setOptions"));

    let options = Options {
        exposure_program: Some(ExposureProgram::IsoPriority),
        off_delay: Some(OffDelay::Seconds(1234)),
        ..Default::default()
    };
    cam.set_options(&options).await.unwrap();

    assert_eq!(
        transport.requests()[0].parameters(),
        &json!({"options": {"exposureProgram": 9, "offDelay": 1234}})
    );
}

#[tokio::test]
async fn access_points_are_listed_and_set() {
    let (cam, transport) = cam(None);
    transport
        .push_json(
            200,
            done(
                "camera._listAccessPoints",
                json!({"accessPoints": [
                    {"ssid": "home", "ssidStealth": false, "security": "WPA/WPA2 PSK",
                     "connectionPriority": 1, "ipAddressAllocation": "dynamic"},
                    {"ssid": "lab", "ssidStealth": true, "security": "none",
                     "connectionPriority": 3, "ipAddressAllocation": "static",
                     "ipAddress": "10.0.0.5", "subnetMask": "255.0.0.0", "defaultGateway": "10.0.0.1"}
                ]}),
            ),
        )
        .push_json(200, done_empty("camera._setAccessPoint"))
        .push_json(200, done_empty("camera._setAccessPoint"))
        .push_json(200, done_empty("camera._deleteAccessPoint"));

    let access_points = cam.list_access_points().await.unwrap();
    assert_eq!(access_points.len(), 2);
    assert!(access_points[0].using_dhcp);
    assert_eq!(access_points[0].auth_mode, AuthMode::WpaWpa2Psk);
    assert!(!access_points[1].using_dhcp);
    assert_eq!(access_points[1].default_gateway.as_deref(), Some("10.0.0.1"));

    cam.set_access_point_dynamically("home", false, AuthMode::WpaWpa2Psk, Some("hunter22"), 1)
        .await
        .unwrap();
    cam.set_access_point_statically(
        "lab",
        true,
        AuthMode::None,
        None,
        3,
        StaticAddress {
            ip_address: "10.0.0.5".to_string(),
            subnet_mask: "255.0.0.0".to_string(),
            default_gateway: "10.0.0.1".to_string(),
        },
    )
    .await
    .unwrap();
    cam.delete_access_point("lab").await.unwrap();

    let requests = transport.requests();
    let dynamic = requests[1].parameters();
    assert_eq!(dynamic["ipAddressAllocation"], "dynamic");
    assert_eq!(dynamic["security"], "WPA/WPA2 PSK");
    assert_eq!(dynamic["password"], "hunter22");
    assert!(dynamic.get("ipAddress").is_none());

    let fixed = requests[2].parameters();
    assert_eq!(fixed["ipAddressAllocation"], "static");
    assert_eq!(fixed["subnetMask"], "255.0.0.0");
    assert!(fixed.get("password").is_none());

    assert_eq!(requests[3].parameters(), &json!({"ssid": "lab"}));
}

#[tokio::test]
async fn simple_commands_use_their_names() {
    let (cam, transport) = cam(None);
    for name in [
        "camera._stopSelfTimer",
        "camera._finishWlan",
        "camera.reset",
        "camera._cancelVideoConvert",
    ] {
        transport.push_json(200, done_empty(name));
    }

    cam.stop_self_timer().await.unwrap();
    cam.finish_wlan().await.unwrap();
    cam.reset().await.unwrap();
    cam.cancel_video_convert().await.unwrap();

    assert_eq!(
        transport.commands(),
        vec![
            "camera._stopSelfTimer",
            "camera._finishWlan",
            "camera.reset",
            "camera._cancelVideoConvert"
        ]
    );
    assert!(
        transport
            .requests()
            .iter()
            .all(|request| request.parameters() == &json!({}))
    );
}

#[tokio::test]
async fn nothing_is_retried() {
    let (cam, transport) = cam(None);
    transport
        .push_error(TransportError::Connect("connection refused".to_string()))
        .push_json(200, done_empty("camera.reset"));

    assert!(matches!(cam.reset().await, Err(ThetaError::NotConnected(_))));
    assert_eq!(transport.requests().len(), 1);
    assert_eq!(transport.remaining_replies(), 1);
}
