//! Scoped camera capture
//!
//! [`Camera::open`] acquires a [`MediaStream`]. The stream owns its tracks
//! and stops every one of them when it is dropped, so a capture, a cancel,
//! or an early return can never leave the device held. [`CaptureSession`]
//! is the form-facing handle: it ends in exactly one of
//! [`CaptureSession::capture`] or [`CaptureSession::cancel`] (or a drop).

use std::io::Cursor;
use std::path::PathBuf;

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use image::{DynamicImage, ImageFormat};

use crate::error::{MeetlogError, Result};

/// One live track of a media stream.
pub trait VideoTrack: Send {
    /// Reads the current frame.
    fn grab_frame(&mut self) -> Result<DynamicImage>;

    /// Releases the underlying device. Must be idempotent.
    fn stop(&mut self);
}

/// A set of acquired tracks, released on drop.
pub struct MediaStream {
    tracks: Vec<Box<dyn VideoTrack>>,
}

impl MediaStream {
    pub fn new(tracks: Vec<Box<dyn VideoTrack>>) -> Self {
        Self { tracks }
    }

    fn grab_frame(&mut self) -> Result<DynamicImage> {
        let track = self
            .tracks
            .first_mut()
            .ok_or_else(|| MeetlogError::DeviceAccess("stream has no video track".to_string()))?;
        track.grab_frame()
    }

    fn stop_all(&mut self) {
        for track in &mut self.tracks {
            track.stop();
        }
        self.tracks.clear();
    }
}

impl Drop for MediaStream {
    fn drop(&mut self) {
        self.stop_all();
    }
}

/// A camera device.
#[async_trait]
pub trait Camera: Send + Sync {
    /// Acquires the device.
    ///
    /// # Errors
    ///
    /// Returns [`MeetlogError::DeviceAccess`] when access is denied or no
    /// camera exists.
    async fn open(&self) -> Result<MediaStream>;
}

/// An open camera waiting for the user to capture or cancel.
pub struct CaptureSession {
    stream: MediaStream,
}

impl CaptureSession {
    /// Opens `camera` and wraps the stream.
    pub async fn start(camera: &dyn Camera) -> Result<Self> {
        let stream = camera.open().await?;
        tracing::debug!("Camera stream opened");
        Ok(Self { stream })
    }

    /// Takes one frame as a JPEG `data:` URL and releases the camera.
    ///
    /// The camera is released whether or not encoding succeeds.
    pub fn capture(mut self) -> Result<String> {
        let frame = self.stream.grab_frame();
        self.stream.stop_all();
        encode_jpeg_data_url(&frame?)
    }

    /// Releases the camera without taking a photo.
    pub fn cancel(mut self) {
        self.stream.stop_all();
        tracing::debug!("Camera capture cancelled");
    }
}

/// Encodes a frame the way a canvas exports `image/jpeg`.
pub fn encode_jpeg_data_url(frame: &DynamicImage) -> Result<String> {
    let rgb = DynamicImage::ImageRgb8(frame.to_rgb8());
    let mut buffer = Cursor::new(Vec::new());
    rgb.write_to(&mut buffer, ImageFormat::Jpeg)
        .map_err(|e| MeetlogError::DeviceAccess(format!("failed to encode frame: {}", e)))?;
    Ok(format!(
        "data:image/jpeg;base64,{}",
        STANDARD.encode(buffer.into_inner())
    ))
}

// ---------------------------------------------------------------------------
// Implementations
// ---------------------------------------------------------------------------

/// Treats an image file as the camera's only frame.
#[derive(Debug, Clone)]
pub struct FileCamera {
    path: PathBuf,
}

impl FileCamera {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }
}

struct FileTrack {
    path: PathBuf,
    live: bool,
}

impl VideoTrack for FileTrack {
    fn grab_frame(&mut self) -> Result<DynamicImage> {
        if !self.live {
            return Err(MeetlogError::DeviceAccess("track already stopped".to_string()).into());
        }
        image::open(&self.path).map_err(|e| {
            MeetlogError::DeviceAccess(format!("cannot read {}: {}", self.path.display(), e)).into()
        })
    }

    fn stop(&mut self) {
        self.live = false;
    }
}

#[async_trait]
impl Camera for FileCamera {
    async fn open(&self) -> Result<MediaStream> {
        if !self.path.is_file() {
            return Err(MeetlogError::DeviceAccess(format!(
                "Camera is not available: {} does not exist",
                self.path.display()
            ))
            .into());
        }
        Ok(MediaStream::new(vec![Box::new(FileTrack {
            path: self.path.clone(),
            live: true,
        })]))
    }
}

/// A platform without a camera.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCamera;

#[async_trait]
impl Camera for NoCamera {
    async fn open(&self) -> Result<MediaStream> {
        Err(MeetlogError::DeviceAccess("Camera is not supported on this device".to_string()).into())
    }
}
