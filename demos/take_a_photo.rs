use thetacam_lib_rs::{
    cam::ThetaCam,
    capture::CaptureBuilder as _,
    consts::DEFAULT_ENDPOINT,
    settings::{ExposureProgram, IsoSpeed, PhotoFileFormat},
};

#[tokio::main]
/// This example takes a photo and prints where the camera stored it.
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let mut cam = ThetaCam::new(DEFAULT_ENDPOINT)?;

    cam.initialize().await?;

    let capture = cam
        .get_photo_capture_builder()
        .set_file_format(PhotoFileFormat::Image5K)
        .set_exposure_program(ExposureProgram::IsoPriority)
        .set_iso(IsoSpeed::Iso200)
        .build()
        .await?;

    let file_url = capture.take_picture().await?;

    println!("Picture taken! Download it from {file_url}");

    cam.restore_settings().await?;

    Ok(())
}
