use std::time::Duration;

/// Address of the camera when connected to its own access point.
pub const DEFAULT_ENDPOINT: &str = "http://192.168.1.1";

/// Default timeout for establishing the TCP connection.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_millis(5000);

/// Default timeout for one command request, including reading the response body.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_millis(30000);

/// Interval between two status queries of an `inProgress` command.
pub const STATUS_POLL_INTERVAL: Duration = Duration::from_millis(1000);

/// Oldest THETA S firmware supported. Compared as a plain string.
pub const MIN_THETA_S_FIRMWARE: &str = "01.62";

/// Value of `_apiVersion` in the camera state when the legacy command dialect is active.
pub const LEGACY_API_VERSION: u32 = 1;

/// `clientVersion` option value selecting the OSC 2.x command dialect.
pub const CLIENT_VERSION_2: u32 = 2;

/// Length of the `yyyy:MM:dd HH:mm` prefix kept from file timestamps.
pub const FILE_DATE_TIME_LEN: usize = 16;

/// Contains the HTTP paths of the OSC API, relative to the endpoint.
pub mod paths {
    pub const INFO: &str = "osc/info";
    pub const STATE: &str = "osc/state";
    pub const COMMANDS_EXECUTE: &str = "osc/commands/execute";
    pub const COMMANDS_STATUS: &str = "osc/commands/status";
}

/// Contains the names of the commands sent to `/osc/commands/execute`.
pub mod commands {
    pub const START_SESSION: &str = "camera.startSession";
    pub const SET_OPTIONS: &str = "camera.setOptions";
    pub const GET_OPTIONS: &str = "camera.getOptions";
    pub const TAKE_PICTURE: &str = "camera.takePicture";
    pub const START_CAPTURE: &str = "camera.startCapture";
    pub const STOP_CAPTURE: &str = "camera.stopCapture";
    pub const LIST_FILES: &str = "camera.listFiles";
    pub const DELETE: &str = "camera.delete";
    pub const RESET: &str = "camera.reset";
    pub const GET_LIVE_PREVIEW: &str = "camera.getLivePreview";

    pub const STOP_SELF_TIMER: &str = "camera._stopSelfTimer";
    pub const CONVERT_VIDEO_FORMATS: &str = "camera._convertVideoFormats";
    pub const CANCEL_VIDEO_CONVERT: &str = "camera._cancelVideoConvert";
    pub const FINISH_WLAN: &str = "camera._finishWlan";
    pub const LIST_ACCESS_POINTS: &str = "camera._listAccessPoints";
    pub const SET_ACCESS_POINT: &str = "camera._setAccessPoint";
    pub const DELETE_ACCESS_POINT: &str = "camera._deleteAccessPoint";
    pub const SET_BLUETOOTH_DEVICE: &str = "camera._setBluetoothDevice";
}

/// Parameter values of `camera._convertVideoFormats`.
pub mod convert {
    pub const SIZE_LOW: &str = "1920x960";
    pub const SIZE_HIGH: &str = "3840x1920";
    pub const PROJECTION_EQUIRECTANGULAR: &str = "Equirectangular";
    pub const CODEC_H264: &str = "H.264/MPEG-4 AVC";
    pub const TOP_BOTTOM_APPLY: &str = "Apply";
    pub const TOP_BOTTOM_DISAPPLY: &str = "DisapplyAutoCorrection";
}
