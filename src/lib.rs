//! An async Rust client for RICOH THETA 360° cameras, speaking the Open Spherical Camera (OSC) HTTP API.
//!
//! The camera is controlled through JSON commands posted to `/osc/commands/execute`.
//! This crate maps those commands and the camera options onto typed Rust values, performs the
//! session handshake older models need, and polls long-running commands until they finish.
//! HTTP is done with [reqwest].
//!
//! [reqwest]: https://github.com/seanmonstar/reqwest
//!
//! ## Example
//!
//! More examples are provided in the `demos/` folder.
//!
//! ```no_run
//! use thetacam_lib_rs::{cam::ThetaCam, capture::CaptureBuilder as _, settings::IsoSpeed};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut cam = ThetaCam::new("http://192.168.1.1")?;
//!
//!     cam.initialize().await?;
//!
//!     println!("Camera info: {:#?}", cam.get_info().await?);
//!
//!     let capture = cam
//!         .get_photo_capture_builder()
//!         .set_iso(IsoSpeed::Iso200)
//!         .build()
//!         .await?;
//!
//!     println!("Saved as {}", capture.take_picture().await?);
//!
//!     Ok(())
//! }
//! ```

/// Contains the API paths, command names and default values.
pub mod consts;

/// Contains the serde shapes of every request and response body.
pub mod wire;

/// Contains the enums and structs for the camera settings and their wire values.
pub mod settings;

/// Contains the option aggregate and the restorable configuration.
pub mod options;

/// Contains the camera models and their protocol differences.
pub mod model;

/// Contains the HTTP transport.
pub mod transport;

/// Contains the command executor and the status poller.
pub mod command;

/// Contains the main camera struct.
pub mod cam;

/// Contains the photo and video capture builders.
pub mod capture;

/// Contains the live preview stream.
pub mod preview;

/// Contains various convenience methods for interacting with the camera.
pub mod util;

/// Crate-specific error enum.
/// Every function interacting with the camera returns a Result enum with this error type.
#[derive(thiserror::Error, Debug)]
pub enum ThetaError {
    /// The camera answered, but rejected the request or sent something unreadable.
    #[error("Camera returned an error: {0}")]
    WebApi(String),

    /// The camera couldn't be reached.
    #[error("Not connected to the camera: {0}")]
    NotConnected(String),

    #[error("Option {name:?} does not accept a value of shape {found}")]
    InvalidOption {
        name: options::OptionName,
        found: &'static str,
    },
}

impl From<transport::TransportError> for ThetaError {
    fn from(err: transport::TransportError) -> Self {
        Self::NotConnected(err.to_string())
    }
}

pub type ThetaResult<T> = Result<T, ThetaError>;
