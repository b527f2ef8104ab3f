use thetacam_lib_rs::{cam::ThetaCam, consts::DEFAULT_ENDPOINT, settings::FileType};

#[tokio::main]
/// This example converts the newest video on the camera to a low resolution equirectangular file.
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let mut cam = ThetaCam::new(DEFAULT_ENDPOINT)?;

    cam.initialize().await?;

    let (files, _) = cam.list_files(FileType::Video, 0, 1).await?;

    let Some(video) = files.first() else {
        println!("No videos on the camera");
        return Ok(());
    };

    println!("Converting {}...", video.name);

    let converted = cam.convert_video_formats(&video.file_url, true, true).await?;

    println!("Converted video: {converted}");

    Ok(())
}
