use log::*;
use serde::de::IgnoredAny;

use crate::{
    ThetaResult,
    command::CommandExecutor,
    consts::commands,
    options::Options,
    settings::*,
    transport::Transport,
    wire::{FileUrlResults, NoParams},
};

/// Setters shared by the photo and video capture builders.
///
/// Every setter stores one option; nothing is sent to the camera before `build`.
pub trait CaptureBuilder: Sized {
    fn options_mut(&mut self) -> &mut Options;

    fn set_aperture(mut self, aperture: Aperture) -> Self {
        self.options_mut().aperture = Some(aperture);
        self
    }

    /// * `kelvin` - 2500 - 10000, used with `WhiteBalance::ColorTemperature`.
    fn set_color_temperature(mut self, kelvin: u32) -> Self {
        self.options_mut().color_temperature = Some(kelvin);
        self
    }

    fn set_exposure_compensation(mut self, compensation: ExposureCompensation) -> Self {
        self.options_mut().exposure_compensation = Some(compensation);
        self
    }

    fn set_exposure_delay(mut self, delay: ExposureDelay) -> Self {
        self.options_mut().exposure_delay = Some(delay);
        self
    }

    fn set_exposure_program(mut self, program: ExposureProgram) -> Self {
        self.options_mut().exposure_program = Some(program);
        self
    }

    fn set_filter(mut self, filter: Filter) -> Self {
        self.options_mut().filter = Some(filter);
        self
    }

    fn set_gps_info(mut self, gps_info: GpsInfo) -> Self {
        self.options_mut().gps_info = Some(gps_info);
        self
    }

    fn set_gps_tag_recording(mut self, recording: GpsTagRecording) -> Self {
        self.options_mut().gps_tag_recording = Some(recording);
        self
    }

    fn set_iso(mut self, iso: IsoSpeed) -> Self {
        self.options_mut().iso = Some(iso);
        self
    }

    fn set_iso_auto_high_limit(mut self, limit: IsoSpeed) -> Self {
        self.options_mut().iso_auto_high_limit = Some(limit);
        self
    }

    fn set_shutter_speed(mut self, shutter_speed: ShutterSpeed) -> Self {
        self.options_mut().shutter_speed = Some(shutter_speed);
        self
    }

    fn set_white_balance(mut self, white_balance: WhiteBalance) -> Self {
        self.options_mut().white_balance = Some(white_balance);
        self
    }
}

/// Collects the options of a photo capture.
pub struct PhotoCaptureBuilder<'a, T> {
    executor: &'a CommandExecutor<T>,
    options: Options,
}

impl<'a, T: Transport> PhotoCaptureBuilder<'a, T> {
    pub(crate) fn new(executor: &'a CommandExecutor<T>) -> Self {
        Self {
            executor,
            options: Options::default(),
        }
    }

    pub fn set_file_format(mut self, file_format: PhotoFileFormat) -> Self {
        self.options.file_format = Some(file_format.into());
        self
    }

    /// Switches the camera to image mode and sends all options in one call.
    pub async fn build(mut self) -> ThetaResult<PhotoCapture<'a, T>> {
        self.options.capture_mode = Some(CaptureMode::Image);

        self.executor
            .set_options(&self.options.to_wire(), None)
            .await?;

        Ok(PhotoCapture {
            executor: self.executor,
            file_format: self.options.file_format,
        })
    }
}

impl<T> CaptureBuilder for PhotoCaptureBuilder<'_, T> {
    fn options_mut(&mut self) -> &mut Options {
        &mut self.options
    }
}

/// Takes pictures with the options sent by [`PhotoCaptureBuilder::build`].
pub struct PhotoCapture<'a, T> {
    executor: &'a CommandExecutor<T>,
    file_format: Option<FileFormat>,
}

impl<T: Transport> PhotoCapture<'_, T> {
    /// Gets the file format set by the builder. `None` keeps whatever the camera had.
    pub fn file_format(&self) -> Option<FileFormat> {
        self.file_format
    }

    /// Takes a picture and waits until it is stored.
    ///
    /// Returns the URL of the picture.
    pub async fn take_picture(&self) -> ThetaResult<String> {
        let results: FileUrlResults = self
            .executor
            .execute_until_done(commands::TAKE_PICTURE, NoParams {})
            .await?;

        info!("Picture stored as {}", results.file_url);

        Ok(results.file_url)
    }
}

/// Collects the options of a video capture.
pub struct VideoCaptureBuilder<'a, T> {
    executor: &'a CommandExecutor<T>,
    options: Options,
}

impl<'a, T: Transport> VideoCaptureBuilder<'a, T> {
    pub(crate) fn new(executor: &'a CommandExecutor<T>) -> Self {
        Self {
            executor,
            options: Options::default(),
        }
    }

    pub fn set_file_format(mut self, file_format: VideoFileFormat) -> Self {
        self.options.file_format = Some(file_format.into());
        self
    }

    pub fn set_max_recordable_time(mut self, max_recordable_time: MaxRecordableTime) -> Self {
        self.options.max_recordable_time = Some(max_recordable_time);
        self
    }

    /// Switches the camera to video mode and sends all options in one call.
    pub async fn build(mut self) -> ThetaResult<VideoCapture<'a, T>> {
        self.options.capture_mode = Some(CaptureMode::Video);

        self.executor
            .set_options(&self.options.to_wire(), None)
            .await?;

        Ok(VideoCapture {
            executor: self.executor,
            file_format: self.options.file_format,
        })
    }
}

impl<T> CaptureBuilder for VideoCaptureBuilder<'_, T> {
    fn options_mut(&mut self) -> &mut Options {
        &mut self.options
    }
}

/// Records videos with the options sent by [`VideoCaptureBuilder::build`].
pub struct VideoCapture<'a, T> {
    executor: &'a CommandExecutor<T>,
    file_format: Option<FileFormat>,
}

impl<'a, T: Transport> VideoCapture<'a, T> {
    /// Gets the file format set by the builder. `None` keeps whatever the camera had.
    pub fn file_format(&self) -> Option<FileFormat> {
        self.file_format
    }

    /// Starts recording. The returned handle stops it.
    pub async fn start_capture(&self) -> ThetaResult<VideoCapturing<'a, T>> {
        self.executor
            .execute_done::<_, IgnoredAny>(commands::START_CAPTURE, NoParams {})
            .await?;

        info!("Video capture started");

        Ok(VideoCapturing {
            executor: self.executor,
        })
    }
}

/// A running video capture.
pub struct VideoCapturing<'a, T> {
    executor: &'a CommandExecutor<T>,
}

impl<T: Transport> VideoCapturing<'_, T> {
    /// Stops recording. The camera keeps writing the file afterwards, this doesn't wait for it.
    pub async fn stop_capture(self) -> ThetaResult<()> {
        self.executor
            .execute_done::<_, IgnoredAny>(commands::STOP_CAPTURE, NoParams {})
            .await?;

        info!("Video capture stopped");

        Ok(())
    }
}
