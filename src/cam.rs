use bytes::Bytes;
use futures::StreamExt as _;
use log::*;
use serde::de::IgnoredAny;
use std::time::Duration;

use crate::{
    ThetaResult,
    capture::{PhotoCaptureBuilder, VideoCaptureBuilder},
    command::CommandExecutor,
    consts::{self, commands, paths},
    model::{Capabilities, ThetaModel},
    options::{Config, OptionName, Options},
    preview::{self, FrameStream},
    settings::*,
    transport::{HttpTransport, Transport},
    wire::{
        AccessPointWire, ConvertVideoFormatsParams, DeleteAccessPointParams, DeleteParams,
        FileEntryWire, FileUrlResults, GetOptionsParams, InfoWire, ListAccessPointsResults,
        ListFilesParams, ListFilesResults, NoParams, OptionsResults, OptionsWire,
        SetBluetoothDeviceParams, SetBluetoothDeviceResults, StartSessionResults, StateWire,
    },
};

#[derive(Debug, Clone, PartialEq)]
/// Static information about the camera, from `GET /osc/info`.
pub struct ThetaInfo {
    pub manufacturer: String,
    /// Model string, such as `RICOH THETA Z1`.
    pub model: String,
    pub serial_number: String,
    pub firmware_version: String,
    pub support_url: String,
    pub has_gps: bool,
    pub has_gyro: bool,
    /// Seconds since the camera was turned on.
    pub uptime: u64,
    /// Paths of the supported API endpoints.
    pub api: Vec<String>,
    pub http_port: u16,
    pub http_updates_port: u16,
    /// Supported API levels (1 and/or 2).
    pub api_level: Vec<u32>,
}

impl ThetaInfo {
    /// Gets the camera generation, or `None` for a model this crate doesn't know.
    pub fn theta_model(&self) -> Option<ThetaModel> {
        ThetaModel::get(&self.model)
    }
}

impl From<InfoWire> for ThetaInfo {
    fn from(wire: InfoWire) -> Self {
        Self {
            manufacturer: wire.manufacturer,
            model: wire.model,
            serial_number: wire.serial_number,
            firmware_version: wire.firmware_version,
            support_url: wire.support_url,
            has_gps: wire.gps,
            has_gyro: wire.gyro,
            uptime: wire.uptime,
            api: wire.api,
            http_port: wire.endpoints.http_port,
            http_updates_port: wire.endpoints.http_updates_port,
            api_level: wire.api_level,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
/// Mutable state of the camera, from `POST /osc/state`.
pub struct ThetaState {
    /// Changes whenever the state changes.
    pub fingerprint: String,
    /// 0.0 - 1.0
    pub battery_level: f64,
    pub storage_uri: Option<String>,
    /// Active API level, only reported by models which can switch levels.
    pub api_version: Option<u32>,
    pub charging_state: Option<ChargingState>,
    pub capture_status: Option<CaptureStatus>,
    /// Seconds recorded so far by the running video capture.
    pub recorded_time: Option<u32>,
    /// Seconds the running video capture can still record.
    pub recordable_time: Option<u32>,
    pub latest_file_url: Option<String>,
    pub camera_error: Vec<String>,
}

impl From<StateWire> for ThetaState {
    fn from(wire: StateWire) -> Self {
        let state = wire.state;

        Self {
            fingerprint: wire.fingerprint,
            battery_level: state.battery_level,
            storage_uri: state.storage_uri,
            api_version: state.api_version,
            charging_state: state.battery_state.as_ref().and_then(ChargingState::get),
            capture_status: state.capture_status.as_ref().and_then(CaptureStatus::get),
            recorded_time: state.recorded_time,
            recordable_time: state.recordable_time,
            latest_file_url: state.latest_file_url.filter(|url| !url.is_empty()),
            camera_error: state.camera_error,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
/// A file stored on the camera.
pub struct FileInfo {
    pub name: String,
    /// URL for downloading the file.
    pub file_url: String,
    /// Size in bytes.
    pub size: u64,
    /// `yyyy:MM:dd HH:mm`, without seconds or time zone.
    pub date_time: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    /// URL for downloading the thumbnail.
    pub thumbnail_url: String,
    /// Length of a video in seconds.
    pub record_time: Option<u32>,
}

impl From<FileEntryWire> for FileInfo {
    fn from(wire: FileEntryWire) -> Self {
        let date_time = wire
            .date_time_zone
            .chars()
            .take(consts::FILE_DATE_TIME_LEN)
            .collect();
        let thumbnail_url = format!("{}?type=thumb", wire.file_url);

        Self {
            name: wire.name,
            file_url: wire.file_url,
            size: wire.size,
            date_time,
            latitude: wire.lat,
            longitude: wire.lng,
            width: wire.width,
            height: wire.height,
            thumbnail_url,
            record_time: wire.record_time,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
/// A wireless access point the camera connects to in client mode.
pub struct AccessPoint {
    pub ssid: String,
    pub ssid_stealth: bool,
    pub auth_mode: AuthMode,
    /// 1 - 5, higher is tried first.
    pub connection_priority: u32,
    pub using_dhcp: bool,
    pub ip_address: Option<String>,
    pub subnet_mask: Option<String>,
    pub default_gateway: Option<String>,
}

impl From<AccessPointWire> for AccessPoint {
    fn from(wire: AccessPointWire) -> Self {
        Self {
            auth_mode: AuthMode::get(&wire.security).unwrap_or_default(),
            using_dhcp: wire.ip_address_allocation == "dynamic",
            ssid: wire.ssid,
            ssid_stealth: wire.ssid_stealth,
            connection_priority: wire.connection_priority,
            ip_address: wire.ip_address,
            subnet_mask: wire.subnet_mask,
            default_gateway: wire.default_gateway,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Fixed addressing of an access point configured with `set_access_point_statically`.
pub struct StaticAddress {
    pub ip_address: String,
    pub subnet_mask: String,
    pub default_gateway: String,
}

/// Struct for interacting with the camera.
///
/// Owns the camera endpoint and the state gathered by [`ThetaCam::initialize`]:
/// the model, its capabilities and the configuration snapshots.
pub struct ThetaCam<T = HttpTransport> {
    executor: CommandExecutor<T>,
    model: Option<ThetaModel>,
    capabilities: Capabilities,
    init_config: Option<Config>,
    restore_config: Option<Config>,
}

impl ThetaCam<HttpTransport> {
    /// Creates the client with default parameters.
    ///
    /// Nothing is sent to the camera yet, the caller should then use the `initialize` function.
    ///
    /// * `endpoint` - Base URL of the camera, usually `consts::DEFAULT_ENDPOINT`.
    pub fn new(endpoint: &str) -> ThetaResult<Self> {
        Ok(Self::with_transport(HttpTransport::new(endpoint)?, None))
    }

    /// Creates the client with custom parameters.
    ///
    /// * `endpoint` - Base URL of the camera.
    /// * `init_config` - Configuration applied by `initialize`.
    /// * `request_timeout` - Timeout of one command, including reading the response.
    pub fn new_custom(
        endpoint: &str,
        init_config: Option<Config>,
        request_timeout: Duration,
    ) -> ThetaResult<Self> {
        let transport = HttpTransport::new_custom(endpoint, request_timeout)?;

        Ok(Self::with_transport(transport, init_config))
    }
}

impl<T: Transport> ThetaCam<T> {
    /// Creates the client on top of any transport.
    pub fn with_transport(transport: T, init_config: Option<Config>) -> Self {
        Self {
            executor: CommandExecutor::new(transport),
            model: None,
            capabilities: Capabilities::default(),
            init_config,
            restore_config: None,
        }
    }

    /// Overrides the interval between two status queries of a long-running command.
    pub fn set_poll_interval(&mut self, interval: Duration) {
        self.executor.set_poll_interval(interval);
    }

    pub fn transport(&self) -> &T {
        self.executor.transport()
    }

    /// Gets the model detected by `initialize`.
    pub fn camera_model(&self) -> Option<ThetaModel> {
        self.model
    }

    pub fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    pub fn init_config(&self) -> Option<&Config> {
        self.init_config.as_ref()
    }

    /// Gets the configuration read from the camera by `initialize`, which `restore_settings` puts back.
    pub fn restore_config(&self) -> Option<&Config> {
        self.restore_config.as_ref()
    }

    /// Prepares the camera for use. Must be called once before the other commands.
    ///
    /// Detects the model, switches older models to API level 2, rejects unsupported firmware,
    /// stores the current configuration for `restore_settings` and applies the initial configuration.
    /// Steps which already ran are not rolled back when a later one fails.
    pub async fn initialize(&mut self) -> ThetaResult<()> {
        let info = self.get_info().await?;

        self.model = info.theta_model();
        self.capabilities = Capabilities::for_model(self.model);

        match self.model {
            Some(model) => info!("Detected {model:?} with firmware {}", info.firmware_version),
            None => warn!(
                "Unknown camera model {}, assuming current protocol behavior",
                info.model
            ),
        }

        if self.capabilities.needs_session_upgrade {
            let state = self.get_state().await?;

            if state.api_version == Some(consts::LEGACY_API_VERSION) {
                self.upgrade_to_api_2().await?;
            }
        }

        self.capabilities.check_firmware(&info.firmware_version)?;

        let names = Config::option_names(self.capabilities.supports_language);
        let current = self.get_options(&names).await?;
        self.restore_config = Some(Config::from(&current));

        info!("Stored the camera configuration for restoring");

        if let Some(config) = self.init_config.clone() {
            self.apply_config(&config).await?;

            info!("Applied the initial configuration");
        }

        Ok(())
    }

    /// Opens a session and selects API level 2 in it.
    async fn upgrade_to_api_2(&self) -> ThetaResult<()> {
        let session: StartSessionResults = self
            .executor
            .execute_results(commands::START_SESSION, NoParams {})
            .await?;

        let options = OptionsWire {
            client_version: Some(consts::CLIENT_VERSION_2),
            ..Default::default()
        };

        self.executor
            .set_options(&options, Some(&session.session_id))
            .await?;

        info!("Switched to API level 2 (session {})", session.session_id);

        Ok(())
    }

    /// Writes a configuration. The date and time go first in a call of their own,
    /// some models reject them together with other options.
    async fn apply_config(&self, config: &Config) -> ThetaResult<()> {
        let mut options = config.to_options();

        if !self.capabilities.supports_language {
            options.language = None;
        }

        if let Some(date_time) = options.date_time_zone.take() {
            let date_time_only = Options {
                date_time_zone: Some(date_time),
                ..Default::default()
            };

            self.executor
                .set_options(&date_time_only.to_wire(), None)
                .await?;
        }

        if options != Options::default() {
            self.executor.set_options(&options.to_wire(), None).await?;
        }

        Ok(())
    }

    /// Gets the static camera information.
    pub async fn get_info(&self) -> ThetaResult<ThetaInfo> {
        let info: InfoWire = self.executor.get(paths::INFO).await?;

        Ok(info.into())
    }

    /// Gets the current camera state.
    pub async fn get_state(&self) -> ThetaResult<ThetaState> {
        let state: StateWire = self.executor.post(paths::STATE, &NoParams {}).await?;

        Ok(state.into())
    }

    /// Lists the files on the camera.
    ///
    /// * `file_type` - Which files to list.
    /// * `start_position` - Index of the first listed file.
    /// * `entry_count` - Maximum number of files returned.
    ///
    /// Returns the files and the total number of files of the type.
    pub async fn list_files(
        &self,
        file_type: FileType,
        start_position: u32,
        entry_count: u32,
    ) -> ThetaResult<(Vec<FileInfo>, u32)> {
        let params = ListFilesParams {
            file_type: file_type.wire(),
            start_position,
            entry_count,
            max_thumb_size: 0,
            detail: true,
        };

        let results: ListFilesResults = self
            .executor
            .execute_results(commands::LIST_FILES, params)
            .await?;

        let files = results.entries.into_iter().map(FileInfo::from).collect();

        Ok((files, results.total_entries))
    }

    /// Deletes files by their URLs.
    pub async fn delete_files(&self, file_urls: &[String]) -> ThetaResult<()> {
        self.executor
            .execute_done::<_, IgnoredAny>(commands::DELETE, DeleteParams { file_urls })
            .await?;

        Ok(())
    }

    pub async fn delete_all_files(&self) -> ThetaResult<()> {
        self.delete_files(&[FileType::All.wire()]).await
    }

    pub async fn delete_all_image_files(&self) -> ThetaResult<()> {
        self.delete_files(&[FileType::Image.wire()]).await
    }

    pub async fn delete_all_video_files(&self) -> ThetaResult<()> {
        self.delete_files(&[FileType::Video.wire()]).await
    }

    /// Reads options from the camera. `_language` is skipped on models without it.
    pub async fn get_options(&self, names: &[OptionName]) -> ThetaResult<Options> {
        let option_names = names
            .iter()
            .filter(|name| self.capabilities.supports_language || **name != OptionName::Language)
            .map(OptionName::wire_key)
            .collect();

        let results: OptionsResults = self
            .executor
            .execute_results(commands::GET_OPTIONS, GetOptionsParams { option_names })
            .await?;

        Ok(Options::from_wire(&results.options))
    }

    /// Writes the options which are set. `_language` is skipped on models without it.
    pub async fn set_options(&self, options: &Options) -> ThetaResult<()> {
        let mut wire = options.to_wire();

        if !self.capabilities.supports_language && wire.language.take().is_some() {
            debug!("Skipping the language option, {:?} doesn't support it", self.model);
        }

        self.executor.set_options(&wire, None).await
    }

    /// Puts back the configuration stored by `initialize`.
    pub async fn restore_settings(&self) -> ThetaResult<()> {
        let Some(config) = &self.restore_config else {
            warn!("No configuration stored to restore, was the camera initialized?");
            return Ok(());
        };

        self.apply_config(config).await
    }

    /// Stops a running self-timer countdown.
    pub async fn stop_self_timer(&self) -> ThetaResult<()> {
        self.executor
            .execute_done::<_, IgnoredAny>(commands::STOP_SELF_TIMER, NoParams {})
            .await?;

        Ok(())
    }

    /// Converts a video to an equirectangular H.264 file and waits until the conversion finishes.
    ///
    /// * `file_url` - URL of the video on the camera.
    /// * `to_low_resolution` - Converts to 1920x960 instead of 3840x1920.
    /// * `apply_top_bottom_correction` - Levels the horizon.
    ///
    /// Returns the URL of the converted file.
    pub async fn convert_video_formats(
        &self,
        file_url: &str,
        to_low_resolution: bool,
        apply_top_bottom_correction: bool,
    ) -> ThetaResult<String> {
        let params = ConvertVideoFormatsParams {
            file_url,
            size: if to_low_resolution {
                consts::convert::SIZE_LOW
            } else {
                consts::convert::SIZE_HIGH
            },
            projection_type: consts::convert::PROJECTION_EQUIRECTANGULAR,
            codec: consts::convert::CODEC_H264,
            top_bottom_correction: if apply_top_bottom_correction {
                consts::convert::TOP_BOTTOM_APPLY
            } else {
                consts::convert::TOP_BOTTOM_DISAPPLY
            },
        };

        let results: FileUrlResults = self
            .executor
            .execute_until_done(commands::CONVERT_VIDEO_FORMATS, params)
            .await?;

        Ok(results.file_url)
    }

    /// Cancels a running video conversion. A pending `convert_video_formats` then ends with an error.
    pub async fn cancel_video_convert(&self) -> ThetaResult<()> {
        self.executor
            .execute_done::<_, IgnoredAny>(commands::CANCEL_VIDEO_CONVERT, NoParams {})
            .await?;

        Ok(())
    }

    /// Turns the wireless LAN off.
    pub async fn finish_wlan(&self) -> ThetaResult<()> {
        self.executor
            .execute_done::<_, IgnoredAny>(commands::FINISH_WLAN, NoParams {})
            .await?;

        Ok(())
    }

    pub async fn list_access_points(&self) -> ThetaResult<Vec<AccessPoint>> {
        let results: ListAccessPointsResults = self
            .executor
            .execute_results(commands::LIST_ACCESS_POINTS, NoParams {})
            .await?;

        Ok(results
            .access_points
            .into_iter()
            .map(AccessPoint::from)
            .collect())
    }

    /// Registers an access point which assigns the camera's address through DHCP.
    pub async fn set_access_point_dynamically(
        &self,
        ssid: &str,
        ssid_stealth: bool,
        auth_mode: AuthMode,
        password: Option<&str>,
        connection_priority: u32,
    ) -> ThetaResult<()> {
        let access_point = Self::access_point_wire(
            ssid,
            ssid_stealth,
            auth_mode,
            password,
            connection_priority,
            None,
        );

        self.set_access_point(access_point).await
    }

    /// Registers an access point with a fixed address for the camera.
    pub async fn set_access_point_statically(
        &self,
        ssid: &str,
        ssid_stealth: bool,
        auth_mode: AuthMode,
        password: Option<&str>,
        connection_priority: u32,
        address: StaticAddress,
    ) -> ThetaResult<()> {
        let access_point = Self::access_point_wire(
            ssid,
            ssid_stealth,
            auth_mode,
            password,
            connection_priority,
            Some(address),
        );

        self.set_access_point(access_point).await
    }

    fn access_point_wire(
        ssid: &str,
        ssid_stealth: bool,
        auth_mode: AuthMode,
        password: Option<&str>,
        connection_priority: u32,
        address: Option<StaticAddress>,
    ) -> AccessPointWire {
        let allocation = if address.is_some() { "static" } else { "dynamic" };

        let (ip_address, subnet_mask, default_gateway) = match address {
            Some(address) => (
                Some(address.ip_address),
                Some(address.subnet_mask),
                Some(address.default_gateway),
            ),
            None => (None, None, None),
        };

        AccessPointWire {
            ssid: ssid.to_string(),
            ssid_stealth,
            security: auth_mode.wire(),
            // The camera rejects a password for open networks.
            password: password
                .filter(|_| auth_mode != AuthMode::None)
                .map(String::from),
            connection_priority,
            ip_address_allocation: allocation.to_string(),
            ip_address,
            subnet_mask,
            default_gateway,
        }
    }

    async fn set_access_point(&self, access_point: AccessPointWire) -> ThetaResult<()> {
        self.executor
            .execute_done::<_, IgnoredAny>(commands::SET_ACCESS_POINT, access_point)
            .await?;

        Ok(())
    }

    pub async fn delete_access_point(&self, ssid: &str) -> ThetaResult<()> {
        self.executor
            .execute_done::<_, IgnoredAny>(
                commands::DELETE_ACCESS_POINT,
                DeleteAccessPointParams { ssid },
            )
            .await?;

        Ok(())
    }

    /// Pairs the camera with a Bluetooth device. Returns the camera's Bluetooth device name.
    pub async fn set_bluetooth_device(&self, uuid: &str) -> ThetaResult<String> {
        let results: SetBluetoothDeviceResults = self
            .executor
            .execute_results(
                commands::SET_BLUETOOTH_DEVICE,
                SetBluetoothDeviceParams { uuid },
            )
            .await?;

        Ok(results.device_name)
    }

    /// Resets all camera settings to their factory values.
    pub async fn reset(&self) -> ThetaResult<()> {
        self.executor
            .execute_done::<_, IgnoredAny>(commands::RESET, NoParams {})
            .await?;

        Ok(())
    }

    pub fn get_photo_capture_builder(&self) -> PhotoCaptureBuilder<'_, T> {
        PhotoCaptureBuilder::new(&self.executor)
    }

    pub fn get_video_capture_builder(&self) -> VideoCaptureBuilder<'_, T> {
        VideoCaptureBuilder::new(&self.executor)
    }

    /// Starts the live preview. Dropping the returned stream closes the connection.
    pub async fn get_live_preview(&self) -> ThetaResult<FrameStream> {
        let body = self
            .executor
            .execute_stream(commands::GET_LIVE_PREVIEW)
            .await?;

        Ok(preview::frames(body))
    }

    /// Runs the live preview, calling `on_frame` with every JPEG frame
    /// until it returns `false` or the camera ends the stream.
    pub async fn get_live_preview_with(
        &self,
        mut on_frame: impl FnMut(Bytes) -> bool + Send,
    ) -> ThetaResult<()> {
        let mut frames = self.get_live_preview().await?;

        while let Some(frame) = frames.next().await {
            if !on_frame(frame?) {
                debug!("Live preview stopped by the caller");
                break;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_entry_conversion() {
        let wire: FileEntryWire = serde_json::from_str(
            r#"{
                "name": "R0010015.JPG",
                "fileUrl": "http://192.168.1.1/files/150100525831424d42075b53ce68c300/100RICOH/R0010015.JPG",
                "size": 4051440,
                "dateTimeZone": "2015:07:10 11:05:18+09:00",
                "width": 5376,
                "height": 2688
            }"#,
        )
        .unwrap();

        let file = FileInfo::from(wire);
        assert_eq!(file.date_time, "2015:07:10 11:05");
        assert_eq!(
            file.thumbnail_url,
            "http://192.168.1.1/files/150100525831424d42075b53ce68c300/100RICOH/R0010015.JPG?type=thumb"
        );
        assert_eq!(file.width, Some(5376));
        assert_eq!(file.latitude, None);
        assert_eq!(file.record_time, None);
    }

    #[test]
    fn short_date_time_is_kept() {
        let wire: FileEntryWire = serde_json::from_str(
            r#"{"name": "a.MP4", "fileUrl": "http://x/a.MP4", "dateTimeZone": "2015:07:10"}"#,
        )
        .unwrap();

        assert_eq!(FileInfo::from(wire).date_time, "2015:07:10");
    }

    #[test]
    fn state_conversion() {
        let wire: StateWire = serde_json::from_str(
            r#"{
                "fingerprint": "FIG_0006",
                "state": {
                    "batteryLevel": 0.8,
                    "storageUri": "http://192.168.1.1/files/abc/",
                    "_apiVersion": 2,
                    "_batteryState": "charging",
                    "_captureStatus": "idle",
                    "_latestFileUrl": "",
                    "_cameraError": ["COMPASS_CALIBRATION"],
                    "_unknownField": true
                }
            }"#,
        )
        .unwrap();

        let state = ThetaState::from(wire);
        assert_eq!(state.api_version, Some(2));
        assert_eq!(state.charging_state, Some(ChargingState::Charging));
        assert_eq!(state.capture_status, Some(CaptureStatus::Idle));
        assert_eq!(state.latest_file_url, None);
        assert_eq!(state.camera_error, vec!["COMPASS_CALIBRATION".to_string()]);
    }

    #[test]
    fn access_point_conversion() {
        let wire: AccessPointWire = serde_json::from_str(
            r#"{"ssid": "home", "ssidStealth": false, "security": "WPA/WPA2 PSK",
                "connectionPriority": 2, "ipAddressAllocation": "dynamic"}"#,
        )
        .unwrap();

        let access_point = AccessPoint::from(wire);
        assert_eq!(access_point.auth_mode, AuthMode::WpaWpa2Psk);
        assert!(access_point.using_dhcp);
        assert_eq!(access_point.ip_address, None);
    }

    #[test]
    fn open_access_point_drops_password() {
        let wire = ThetaCam::<HttpTransport>::access_point_wire(
            "cafe",
            false,
            AuthMode::None,
            Some("secret"),
            1,
            Some(StaticAddress {
                ip_address: "192.168.0.10".to_string(),
                subnet_mask: "255.255.255.0".to_string(),
                default_gateway: "192.168.0.1".to_string(),
            }),
        );

        assert_eq!(wire.password, None);
        assert_eq!(wire.ip_address_allocation, "static");
        assert_eq!(wire.ip_address.as_deref(), Some("192.168.0.10"));
    }
}
