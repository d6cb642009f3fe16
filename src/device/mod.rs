//! Thin wrappers over platform devices
//!
//! - [`location`] -- position fixes with a timeout, described as text
//! - [`camera`]   -- scoped camera streams that always release their tracks

pub mod camera;
pub mod location;

pub use camera::{Camera, CaptureSession, FileCamera, NoCamera};
pub use location::{
    Coordinates, FixedPositionSource, LocationService, PositionOptions, PositionSource,
    UnavailablePositionSource,
};
