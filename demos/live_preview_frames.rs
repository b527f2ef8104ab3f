use futures::StreamExt as _;
use image::GenericImageView as _;
use std::{fs::File, io::Write as _};
use thetacam_lib_rs::{cam::ThetaCam, consts::DEFAULT_ENDPOINT};

#[tokio::main]
/// This example saves a few live preview frames as JPG images.
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let mut cam = ThetaCam::new(DEFAULT_ENDPOINT)?;

    cam.initialize().await?;

    let mut frames = cam.get_live_preview().await?.take(4);

    let mut frame_cnt = 0;

    while let Some(frame) = frames.next().await {
        let frame = frame?;

        let (w, h) = image::load_from_memory(&frame)?.dimensions();

        println!("Frame {frame_cnt}: {w}x{h}, {} bytes", frame.len());

        File::create(format!("frame-{frame_cnt}.jpg"))?.write_all(&frame)?;

        frame_cnt += 1;
    }

    // Dropping the stream closes the preview connection.
    drop(frames);

    let mut seen = 0;

    cam.get_live_preview_with(|_| {
        seen += 1;
        seen < 30
    })
    .await?;

    println!("Watched {seen} more frames");

    Ok(())
}
