use std::time::Duration;
use thetacam_lib_rs::{
    cam::ThetaCam,
    consts::DEFAULT_ENDPOINT,
    settings::{FileType, MaxRecordableTime, Resolution as _, VideoFileFormat},
};

#[tokio::main]
/// This example records a 5-second video and lists the newest video on the camera.
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let mut cam = ThetaCam::new(DEFAULT_ENDPOINT)?;

    cam.initialize().await?;

    let format = VideoFileFormat::Video2K;

    let capture = cam
        .get_video_capture_builder()
        .set_file_format(format)
        .set_max_recordable_time(MaxRecordableTime::Sec300)
        .build()
        .await?;

    let capturing = capture.start_capture().await?;

    println!("Recording {}x{}...", format.w(), format.h());

    tokio::time::sleep(Duration::from_secs(5)).await;

    capturing.stop_capture().await?;

    // The file shows up once the camera has finished writing it.
    tokio::time::sleep(Duration::from_secs(2)).await;

    let (files, total) = cam.list_files(FileType::Video, 0, 1).await?;

    println!("{total} videos on the camera");

    if let Some(file) = files.first() {
        println!("Newest: {} ({} bytes, {})", file.file_url, file.size, file.date_time);
    }

    Ok(())
}
