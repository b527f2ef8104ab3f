use chrono::{DateTime, Local, TimeZone};
use std::future::Future;

use crate::{ThetaResult, cam::ThetaCam, options::Options, transport::Transport};

/// Formats a point in time the way the camera's `dateTimeZone` option expects it,
/// e.g. `2024:05:01 10:00:00+09:00`.
pub fn format_date_time<Tz: TimeZone>(date_time: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    date_time.format("%Y:%m:%d %H:%M:%S%:z").to_string()
}

/// This trait provides convenience functions for the `ThetaCam` struct.
pub trait CamUtil {
    /// Sets the camera clock to the local time of this machine.
    fn sync_date_time(&self) -> impl Future<Output = ThetaResult<()>> + Send;

    /// Convenience method for taking a picture with the current camera options.
    ///
    /// Returns the URL of the picture.
    fn take_picture_now(&self) -> impl Future<Output = ThetaResult<String>> + Send;
}

impl<T: Transport> CamUtil for ThetaCam<T> {
    async fn sync_date_time(&self) -> ThetaResult<()> {
        let options = Options {
            date_time_zone: Some(format_date_time(&Local::now())),
            ..Default::default()
        };

        self.set_options(&options).await
    }

    async fn take_picture_now(&self) -> ThetaResult<String> {
        let capture = self.get_photo_capture_builder().build().await?;

        capture.take_picture().await
    }
}
