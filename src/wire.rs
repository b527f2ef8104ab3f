use serde::{Deserialize, Serialize};

/// Body of a `/osc/commands/execute` request.
#[derive(Debug, Clone, Serialize)]
pub struct CommandRequest<P> {
    pub name: &'static str,
    pub parameters: P,
}

/// Body of a `/osc/commands/status` request.
#[derive(Debug, Clone, Serialize)]
pub struct StatusRequest<'a> {
    pub id: &'a str,
}

/// Empty parameter object, serialized as `{}`.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct NoParams {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Represents the `state` field of a command response.
pub enum CommandState {
    Done,
    InProgress,
    Error,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CommandErrorBody {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CommandProgress {
    pub completion: Option<f64>,
}

/// Envelope wrapping the response of every command and status query.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandResponse<R> {
    #[serde(default)]
    pub name: String,
    pub state: CommandState,
    pub id: Option<String>,
    pub results: Option<R>,
    pub error: Option<CommandErrorBody>,
    pub progress: Option<CommandProgress>,
}

/// Any JSON object carrying an `error` member. Used to salvage a message from non-envelope error bodies.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorOnlyBody {
    pub error: Option<CommandErrorBody>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FileFormatWire {
    #[serde(rename = "type")]
    pub kind: String,
    pub width: u32,
    pub height: u32,
    #[serde(rename = "_codec", skip_serializing_if = "Option::is_none")]
    pub codec: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GpsInfoWire {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lng: Option<f64>,
    #[serde(rename = "_altitude", skip_serializing_if = "Option::is_none")]
    pub altitude: Option<f64>,
    #[serde(rename = "_dateTimeZone", skip_serializing_if = "Option::is_none")]
    pub date_time_zone: Option<String>,
    #[serde(rename = "_datum", skip_serializing_if = "Option::is_none")]
    pub datum: Option<String>,
}

/// Sparse options object. Only fields which are `Some` are serialized.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionsWire {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aperture: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capture_mode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_version: Option<u32>,
    #[serde(rename = "_colorTemperature", skip_serializing_if = "Option::is_none")]
    pub color_temperature: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_time_zone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exposure_compensation: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exposure_delay: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exposure_program: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_format: Option<FileFormatWire>,
    #[serde(rename = "_filter", skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gps_info: Option<GpsInfoWire>,
    #[serde(rename = "_gpsTagRecording", skip_serializing_if = "Option::is_none")]
    pub gps_tag_recording: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iso: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iso_auto_high_limit: Option<u32>,
    #[serde(rename = "_language", skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(rename = "_maxRecordableTime", skip_serializing_if = "Option::is_none")]
    pub max_recordable_time: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub off_delay: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sleep_delay: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remaining_pictures: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remaining_video_seconds: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remaining_space: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_space: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shutter_speed: Option<f64>,
    #[serde(rename = "_shutterVolume", skip_serializing_if = "Option::is_none")]
    pub shutter_volume: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub white_balance: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SetOptionsParams<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<&'a str>,
    pub options: &'a OptionsWire,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GetOptionsParams {
    pub option_names: Vec<&'static str>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OptionsResults {
    #[serde(default)]
    pub options: OptionsWire,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartSessionResults {
    pub session_id: String,
    #[serde(default)]
    pub timeout: u32,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EndpointsWire {
    #[serde(default)]
    pub http_port: u16,
    #[serde(default)]
    pub http_updates_port: u16,
}

/// Body of `GET /osc/info`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InfoWire {
    #[serde(default)]
    pub manufacturer: String,
    pub model: String,
    #[serde(default)]
    pub serial_number: String,
    pub firmware_version: String,
    #[serde(default)]
    pub support_url: String,
    #[serde(default)]
    pub gps: bool,
    #[serde(default)]
    pub gyro: bool,
    #[serde(default)]
    pub uptime: u64,
    #[serde(default)]
    pub api: Vec<String>,
    #[serde(default)]
    pub endpoints: EndpointsWire,
    #[serde(default)]
    pub api_level: Vec<u32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CameraStateWire {
    #[serde(default)]
    pub battery_level: f64,
    pub storage_uri: Option<String>,
    #[serde(rename = "_apiVersion")]
    pub api_version: Option<u32>,
    #[serde(rename = "_batteryState")]
    pub battery_state: Option<String>,
    #[serde(rename = "_captureStatus")]
    pub capture_status: Option<String>,
    #[serde(rename = "_recordedTime")]
    pub recorded_time: Option<u32>,
    #[serde(rename = "_recordableTime")]
    pub recordable_time: Option<u32>,
    #[serde(rename = "_latestFileUrl")]
    pub latest_file_url: Option<String>,
    #[serde(rename = "_cameraError", default)]
    pub camera_error: Vec<String>,
}

/// Body of `POST /osc/state`.
#[derive(Debug, Clone, Deserialize)]
pub struct StateWire {
    #[serde(default)]
    pub fingerprint: String,
    #[serde(default)]
    pub state: CameraStateWire,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListFilesParams {
    pub file_type: String,
    pub start_position: u32,
    pub entry_count: u32,
    pub max_thumb_size: u32,
    #[serde(rename = "_detail")]
    pub detail: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileEntryWire {
    pub name: String,
    pub file_url: String,
    #[serde(default)]
    pub size: u64,
    #[serde(default)]
    pub date_time_zone: String,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    #[serde(rename = "_thumbSize")]
    pub thumb_size: Option<u64>,
    #[serde(rename = "_recordTime")]
    pub record_time: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListFilesResults {
    #[serde(default)]
    pub entries: Vec<FileEntryWire>,
    #[serde(default)]
    pub total_entries: u32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteParams<'a> {
    pub file_urls: &'a [String],
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileUrlResults {
    pub file_url: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConvertVideoFormatsParams<'a> {
    pub file_url: &'a str,
    pub size: &'static str,
    pub projection_type: &'static str,
    pub codec: &'static str,
    pub top_bottom_correction: &'static str,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessPointWire {
    pub ssid: String,
    #[serde(default)]
    pub ssid_stealth: bool,
    #[serde(default)]
    pub security: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(default)]
    pub connection_priority: u32,
    #[serde(default)]
    pub ip_address_allocation: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subnet_mask: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_gateway: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListAccessPointsResults {
    #[serde(default)]
    pub access_points: Vec<AccessPointWire>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DeleteAccessPointParams<'a> {
    pub ssid: &'a str,
}

#[derive(Debug, Clone, Serialize)]
pub struct SetBluetoothDeviceParams<'a> {
    pub uuid: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetBluetoothDeviceResults {
    pub device_name: String,
}
