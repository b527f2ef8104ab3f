use crate::{
    ThetaError, ThetaResult,
    settings::*,
    wire::OptionsWire,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Identifies one camera option.
pub enum OptionName {
    Aperture,
    CaptureMode,
    ColorTemperature,
    DateTimeZone,
    ExposureCompensation,
    ExposureDelay,
    ExposureProgram,
    FileFormat,
    Filter,
    GpsInfo,
    GpsTagRecording,
    Iso,
    IsoAutoHighLimit,
    Language,
    MaxRecordableTime,
    OffDelay,
    SleepDelay,
    RemainingPictures,
    RemainingVideoSeconds,
    RemainingSpace,
    TotalSpace,
    ShutterSpeed,
    ShutterVolume,
    WhiteBalance,
}

impl OptionName {
    pub const ALL: [OptionName; 24] = [
        Self::Aperture,
        Self::CaptureMode,
        Self::ColorTemperature,
        Self::DateTimeZone,
        Self::ExposureCompensation,
        Self::ExposureDelay,
        Self::ExposureProgram,
        Self::FileFormat,
        Self::Filter,
        Self::GpsInfo,
        Self::GpsTagRecording,
        Self::Iso,
        Self::IsoAutoHighLimit,
        Self::Language,
        Self::MaxRecordableTime,
        Self::OffDelay,
        Self::SleepDelay,
        Self::RemainingPictures,
        Self::RemainingVideoSeconds,
        Self::RemainingSpace,
        Self::TotalSpace,
        Self::ShutterSpeed,
        Self::ShutterVolume,
        Self::WhiteBalance,
    ];

    /// Gets the key of the option in `camera.getOptions` / `camera.setOptions`.
    pub fn wire_key(&self) -> &'static str {
        match self {
            Self::Aperture => "aperture",
            Self::CaptureMode => "captureMode",
            Self::ColorTemperature => "_colorTemperature",
            Self::DateTimeZone => "dateTimeZone",
            Self::ExposureCompensation => "exposureCompensation",
            Self::ExposureDelay => "exposureDelay",
            Self::ExposureProgram => "exposureProgram",
            Self::FileFormat => "fileFormat",
            Self::Filter => "_filter",
            Self::GpsInfo => "gpsInfo",
            Self::GpsTagRecording => "_gpsTagRecording",
            Self::Iso => "iso",
            Self::IsoAutoHighLimit => "isoAutoHighLimit",
            Self::Language => "_language",
            Self::MaxRecordableTime => "_maxRecordableTime",
            Self::OffDelay => "offDelay",
            Self::SleepDelay => "sleepDelay",
            Self::RemainingPictures => "remainingPictures",
            Self::RemainingVideoSeconds => "remainingVideoSeconds",
            Self::RemainingSpace => "remainingSpace",
            Self::TotalSpace => "totalSpace",
            Self::ShutterSpeed => "shutterSpeed",
            Self::ShutterVolume => "_shutterVolume",
            Self::WhiteBalance => "whiteBalance",
        }
    }
}

/// Implemented by every type an option can hold; extracts it from an [`OptionValue`].
pub trait FromOptionValue: Sized {
    fn from_option_value(value: OptionValue) -> Option<Self>;
}

/// Declares `OptionValue` with one variant per value shape, plus the conversions from and to it.
macro_rules! option_values {
    ($($variant:ident($ty:ty)),+ $(,)?) => {
        #[derive(Debug, Clone, PartialEq)]
        /// A value of any option. The variant is the value's shape, several options may share one.
        pub enum OptionValue {
            $($variant($ty)),+
        }

        impl OptionValue {
            /// Gets the name of the value's shape.
            pub fn shape(&self) -> &'static str {
                match self {
                    $(Self::$variant(_) => stringify!($variant)),+
                }
            }
        }

        $(
            impl From<$ty> for OptionValue {
                fn from(value: $ty) -> Self {
                    Self::$variant(value)
                }
            }

            impl FromOptionValue for $ty {
                fn from_option_value(value: OptionValue) -> Option<Self> {
                    match value {
                        OptionValue::$variant(inner) => Some(inner),
                        #[allow(unreachable_patterns)]
                        _ => None,
                    }
                }
            }
        )+
    };
}

option_values! {
    Aperture(Aperture),
    CaptureMode(CaptureMode),
    Number(u32),
    Size(u64),
    Text(String),
    ExposureCompensation(ExposureCompensation),
    ExposureDelay(ExposureDelay),
    ExposureProgram(ExposureProgram),
    FileFormat(FileFormat),
    Filter(Filter),
    GpsInfo(GpsInfo),
    GpsTagRecording(GpsTagRecording),
    Iso(IsoSpeed),
    Language(Language),
    MaxRecordableTime(MaxRecordableTime),
    OffDelay(OffDelay),
    SleepDelay(SleepDelay),
    ShutterSpeed(ShutterSpeed),
    WhiteBalance(WhiteBalance),
}

/// Camera options. `None` means "unspecified", such a field is neither sent nor changed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Options {
    pub aperture: Option<Aperture>,
    pub capture_mode: Option<CaptureMode>,
    /// Color temperature in Kelvin, used with `WhiteBalance::ColorTemperature`.
    pub color_temperature: Option<u32>,
    /// `yyyy:MM:dd HH:mm:ss+hh:mm`
    pub date_time_zone: Option<String>,
    pub exposure_compensation: Option<ExposureCompensation>,
    pub exposure_delay: Option<ExposureDelay>,
    pub exposure_program: Option<ExposureProgram>,
    pub file_format: Option<FileFormat>,
    pub filter: Option<Filter>,
    pub gps_info: Option<GpsInfo>,
    pub gps_tag_recording: Option<GpsTagRecording>,
    pub iso: Option<IsoSpeed>,
    pub iso_auto_high_limit: Option<IsoSpeed>,
    pub language: Option<Language>,
    pub max_recordable_time: Option<MaxRecordableTime>,
    pub off_delay: Option<OffDelay>,
    pub sleep_delay: Option<SleepDelay>,
    /// Read-only.
    pub remaining_pictures: Option<u32>,
    /// Read-only.
    pub remaining_video_seconds: Option<u32>,
    /// Read-only, in bytes.
    pub remaining_space: Option<u64>,
    /// Read-only, in bytes.
    pub total_space: Option<u64>,
    pub shutter_speed: Option<ShutterSpeed>,
    /// 0 - 100
    pub shutter_volume: Option<u32>,
    pub white_balance: Option<WhiteBalance>,
}

fn take<T: FromOptionValue>(name: OptionName, value: OptionValue) -> ThetaResult<T> {
    let found = value.shape();

    T::from_option_value(value).ok_or(ThetaError::InvalidOption { name, found })
}

impl Options {
    /// Gets the value of one option, or `None` if it isn't set.
    pub fn get_value(&self, name: OptionName) -> Option<OptionValue> {
        match name {
            OptionName::Aperture => self.aperture.map(Into::into),
            OptionName::CaptureMode => self.capture_mode.map(Into::into),
            OptionName::ColorTemperature => self.color_temperature.map(Into::into),
            OptionName::DateTimeZone => self.date_time_zone.clone().map(Into::into),
            OptionName::ExposureCompensation => self.exposure_compensation.map(Into::into),
            OptionName::ExposureDelay => self.exposure_delay.map(Into::into),
            OptionName::ExposureProgram => self.exposure_program.map(Into::into),
            OptionName::FileFormat => self.file_format.map(Into::into),
            OptionName::Filter => self.filter.map(Into::into),
            OptionName::GpsInfo => self.gps_info.clone().map(Into::into),
            OptionName::GpsTagRecording => self.gps_tag_recording.map(Into::into),
            OptionName::Iso => self.iso.map(Into::into),
            OptionName::IsoAutoHighLimit => self.iso_auto_high_limit.map(Into::into),
            OptionName::Language => self.language.map(Into::into),
            OptionName::MaxRecordableTime => self.max_recordable_time.map(Into::into),
            OptionName::OffDelay => self.off_delay.map(Into::into),
            OptionName::SleepDelay => self.sleep_delay.map(Into::into),
            OptionName::RemainingPictures => self.remaining_pictures.map(Into::into),
            OptionName::RemainingVideoSeconds => self.remaining_video_seconds.map(Into::into),
            OptionName::RemainingSpace => self.remaining_space.map(Into::into),
            OptionName::TotalSpace => self.total_space.map(Into::into),
            OptionName::ShutterSpeed => self.shutter_speed.map(Into::into),
            OptionName::ShutterVolume => self.shutter_volume.map(Into::into),
            OptionName::WhiteBalance => self.white_balance.map(Into::into),
        }
    }

    /// Sets the value of one option.
    ///
    /// Fails with [`ThetaError::InvalidOption`] and leaves the options untouched
    /// if the value's shape doesn't belong to the option.
    pub fn set_value(&mut self, name: OptionName, value: impl Into<OptionValue>) -> ThetaResult<()> {
        let value = value.into();

        match name {
            OptionName::Aperture => self.aperture = Some(take(name, value)?),
            OptionName::CaptureMode => self.capture_mode = Some(take(name, value)?),
            OptionName::ColorTemperature => self.color_temperature = Some(take(name, value)?),
            OptionName::DateTimeZone => self.date_time_zone = Some(take(name, value)?),
            OptionName::ExposureCompensation => {
                self.exposure_compensation = Some(take(name, value)?)
            }
            OptionName::ExposureDelay => self.exposure_delay = Some(take(name, value)?),
            OptionName::ExposureProgram => self.exposure_program = Some(take(name, value)?),
            OptionName::FileFormat => self.file_format = Some(take(name, value)?),
            OptionName::Filter => self.filter = Some(take(name, value)?),
            OptionName::GpsInfo => self.gps_info = Some(take(name, value)?),
            OptionName::GpsTagRecording => self.gps_tag_recording = Some(take(name, value)?),
            OptionName::Iso => self.iso = Some(take(name, value)?),
            OptionName::IsoAutoHighLimit => self.iso_auto_high_limit = Some(take(name, value)?),
            OptionName::Language => self.language = Some(take(name, value)?),
            OptionName::MaxRecordableTime => self.max_recordable_time = Some(take(name, value)?),
            OptionName::OffDelay => self.off_delay = Some(take(name, value)?),
            OptionName::SleepDelay => self.sleep_delay = Some(take(name, value)?),
            OptionName::RemainingPictures => self.remaining_pictures = Some(take(name, value)?),
            OptionName::RemainingVideoSeconds => {
                self.remaining_video_seconds = Some(take(name, value)?)
            }
            OptionName::RemainingSpace => self.remaining_space = Some(take(name, value)?),
            OptionName::TotalSpace => self.total_space = Some(take(name, value)?),
            OptionName::ShutterSpeed => self.shutter_speed = Some(take(name, value)?),
            OptionName::ShutterVolume => self.shutter_volume = Some(take(name, value)?),
            OptionName::WhiteBalance => self.white_balance = Some(take(name, value)?),
        }

        Ok(())
    }

    /// Converts the options to the wire object. Unset options are left out.
    pub fn to_wire(&self) -> OptionsWire {
        OptionsWire {
            aperture: self.aperture.map(|v| v.wire()),
            capture_mode: self.capture_mode.map(|v| v.wire()),
            client_version: None,
            color_temperature: self.color_temperature,
            date_time_zone: self.date_time_zone.clone(),
            exposure_compensation: self.exposure_compensation.map(|v| v.wire()),
            exposure_delay: self.exposure_delay.map(|v| v.wire()),
            exposure_program: self.exposure_program.map(|v| v.wire()),
            file_format: self.file_format.map(|v| v.wire()),
            filter: self.filter.map(|v| v.wire()),
            gps_info: self.gps_info.as_ref().map(GpsInfo::to_wire),
            gps_tag_recording: self.gps_tag_recording.map(|v| v.wire()),
            iso: self.iso.map(|v| v.wire()),
            iso_auto_high_limit: self.iso_auto_high_limit.map(|v| v.wire()),
            language: self.language.map(|v| v.wire()),
            max_recordable_time: self.max_recordable_time.map(|v| v.wire()),
            off_delay: self.off_delay.map(|v| v.wire()),
            sleep_delay: self.sleep_delay.map(|v| v.wire()),
            remaining_pictures: self.remaining_pictures,
            remaining_video_seconds: self.remaining_video_seconds,
            remaining_space: self.remaining_space,
            total_space: self.total_space,
            shutter_speed: self.shutter_speed.map(|v| v.wire()),
            shutter_volume: self.shutter_volume,
            white_balance: self.white_balance.map(|v| v.wire()),
        }
    }

    /// Converts a wire object to options. Values unknown to the mapping tables are left unset.
    pub fn from_wire(wire: &OptionsWire) -> Self {
        Self {
            aperture: wire.aperture.as_ref().and_then(Aperture::get),
            capture_mode: wire.capture_mode.as_ref().and_then(CaptureMode::get),
            color_temperature: wire.color_temperature,
            date_time_zone: wire.date_time_zone.clone(),
            exposure_compensation: wire
                .exposure_compensation
                .as_ref()
                .and_then(ExposureCompensation::get),
            exposure_delay: wire.exposure_delay.as_ref().and_then(ExposureDelay::get),
            exposure_program: wire.exposure_program.as_ref().and_then(ExposureProgram::get),
            file_format: wire.file_format.as_ref().and_then(FileFormat::get),
            filter: wire.filter.as_ref().and_then(Filter::get),
            gps_info: wire.gps_info.as_ref().map(GpsInfo::from_wire),
            gps_tag_recording: wire.gps_tag_recording.as_ref().and_then(GpsTagRecording::get),
            iso: wire.iso.as_ref().and_then(IsoSpeed::get),
            iso_auto_high_limit: wire.iso_auto_high_limit.as_ref().and_then(IsoSpeed::get),
            language: wire.language.as_ref().and_then(Language::get),
            max_recordable_time: wire.max_recordable_time.as_ref().and_then(MaxRecordableTime::get),
            off_delay: wire.off_delay.as_ref().and_then(OffDelay::get),
            sleep_delay: wire.sleep_delay.as_ref().and_then(SleepDelay::get),
            remaining_pictures: wire.remaining_pictures,
            remaining_video_seconds: wire.remaining_video_seconds,
            remaining_space: wire.remaining_space,
            total_space: wire.total_space,
            shutter_speed: wire.shutter_speed.as_ref().and_then(ShutterSpeed::get),
            shutter_volume: wire.shutter_volume,
            white_balance: wire.white_balance.as_ref().and_then(WhiteBalance::get),
        }
    }
}

/// Restorable device configuration: the subset of [`Options`] a client puts back after it is done.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Config {
    /// `yyyy:MM:dd HH:mm:ss+hh:mm`
    pub date_time: Option<String>,
    pub language: Option<Language>,
    pub off_delay: Option<OffDelay>,
    pub sleep_delay: Option<SleepDelay>,
    /// 0 - 100
    pub shutter_volume: Option<u32>,
}

impl Config {
    /// Options read from the camera to build a restore snapshot.
    pub(crate) fn option_names(with_language: bool) -> Vec<OptionName> {
        let mut names = vec![OptionName::DateTimeZone];

        if with_language {
            names.push(OptionName::Language);
        }

        names.extend([
            OptionName::OffDelay,
            OptionName::SleepDelay,
            OptionName::ShutterVolume,
        ]);

        names
    }

    pub fn to_options(&self) -> Options {
        Options {
            date_time_zone: self.date_time.clone(),
            language: self.language,
            off_delay: self.off_delay,
            sleep_delay: self.sleep_delay,
            shutter_volume: self.shutter_volume,
            ..Default::default()
        }
    }
}

impl From<&Options> for Config {
    fn from(options: &Options) -> Self {
        Self {
            date_time: options.date_time_zone.clone(),
            language: options.language,
            off_delay: options.off_delay,
            sleep_delay: options.sleep_delay,
            shutter_volume: options.shutter_volume,
        }
    }
}
