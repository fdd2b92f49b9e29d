//! Error types for petalfield.
//!
//! The particle core itself never fails: a field with unusable dimensions is
//! simply inert. Errors only surface at the edges of the crate, when loading
//! configuration, exporting frames, or bringing up a window and GPU device.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read or write a config file.
    #[error("failed to access config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Config file is not valid JSON for the expected schema.
    #[error("malformed config: {0}")]
    Json(#[from] serde_json::Error),
    /// A sampling range has `min > max` or a non-finite bound.
    #[error("invalid range for `{name}`: {min}..={max}")]
    InvalidRange { name: &'static str, min: f32, max: f32 },
    /// A scalar parameter is out of its allowed domain.
    #[error("invalid value for `{name}`: {value}")]
    InvalidValue { name: &'static str, value: f32 },
    /// A colour string could not be parsed.
    #[error("unrecognised colour `{0}`")]
    Color(String),
    /// A day name did not match any of the eight days.
    #[error("unknown day `{0}`")]
    UnknownDay(String),
}

/// Errors raised while writing rendered frames to disk.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Failed to create the output directory or a frame file.
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The image encoder rejected the frame.
    #[error("failed to encode frame: {0}")]
    Image(#[from] image::ImageError),
    /// Canvas buffer did not match its declared dimensions.
    #[error("canvas buffer does not match {width}x{height}")]
    BufferSize { width: u32, height: u32 },
}

/// Errors that can occur during GPU initialization.
#[derive(Debug, Error)]
pub enum GpuError {
    /// Failed to create a surface for rendering.
    #[error("failed to create GPU surface: {0}")]
    SurfaceCreation(#[from] wgpu::CreateSurfaceError),
    /// No compatible GPU adapter found.
    #[error("no compatible GPU adapter found; ensure your system supports Vulkan, Metal, DX12 or WebGPU")]
    NoAdapter,
    /// Failed to create GPU device.
    #[error("failed to create GPU device: {0}")]
    DeviceCreation(#[from] wgpu::RequestDeviceError),
    /// The surface reports no usable texture format.
    #[error("surface has no supported texture format")]
    NoSurfaceFormat,
    /// The surface ran out of memory while acquiring a frame.
    #[error("out of GPU memory")]
    OutOfMemory,
}

/// Errors raised while opening an audio output.
#[derive(Debug, Error)]
pub enum SoundError {
    /// No default output device, or it could not be opened.
    #[error("no audio output: {0}")]
    Stream(#[from] rodio::StreamError),
}

/// Errors that can occur when running the windowed storybook.
#[derive(Debug, Error)]
pub enum AppError {
    /// Failed to create or run the event loop.
    #[error("event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
    /// Failed to create the window.
    #[error("failed to create window: {0}")]
    Window(#[from] winit::error::OsError),
    /// GPU initialization failed.
    #[error("GPU error: {0}")]
    Gpu(#[from] GpuError),
    /// Configuration was rejected.
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
}
