// SPDX-License-Identifier: GPL-3.0-only

//! Error types for the camera screen

use std::fmt;

/// Result type alias using AppError
pub type AppResult<T> = Result<T, AppError>;

/// Main application error type
#[derive(Debug, Clone)]
pub enum AppError {
    /// Camera-related errors
    Camera(CameraError),
    /// Photo storage errors
    Storage(StorageError),
    /// Configuration errors
    Config(String),
    /// Replay script errors
    Replay(String),
    /// Terminal I/O errors
    Terminal(String),
}

/// Camera-specific errors
#[derive(Debug, Clone)]
pub enum CameraError {
    /// Photo directory could not be prepared
    PhotoDirectory(String),
    /// Photo file could not be created
    CaptureFailed(String),
    /// Encoding the captured image failed
    EncodingFailed(String),
}

/// Photo storage errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// Index file could not be read
    ReadFailed(String),
    /// Index file could not be written
    WriteFailed(String),
    /// Index file is not valid JSON
    Corrupt(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Camera(e) => write!(f, "Camera error: {}", e),
            AppError::Storage(e) => write!(f, "Storage error: {}", e),
            AppError::Config(msg) => write!(f, "Configuration error: {}", msg),
            AppError::Replay(msg) => write!(f, "Replay error: {}", msg),
            AppError::Terminal(msg) => write!(f, "Terminal error: {}", msg),
        }
    }
}

impl fmt::Display for CameraError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CameraError::PhotoDirectory(msg) => write!(f, "Photo directory unavailable: {}", msg),
            CameraError::CaptureFailed(msg) => write!(f, "Capture failed: {}", msg),
            CameraError::EncodingFailed(msg) => write!(f, "Encoding failed: {}", msg),
        }
    }
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::ReadFailed(msg) => write!(f, "Failed to read photo index: {}", msg),
            StorageError::WriteFailed(msg) => write!(f, "Failed to write photo index: {}", msg),
            StorageError::Corrupt(msg) => write!(f, "Photo index is corrupt: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}
impl std::error::Error for CameraError {}
impl std::error::Error for StorageError {}

impl From<CameraError> for AppError {
    fn from(err: CameraError) -> Self {
        AppError::Camera(err)
    }
}

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        AppError::Storage(err)
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Terminal(err.to_string())
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        StorageError::Corrupt(err.to_string())
    }
}

impl From<image::ImageError> for CameraError {
    fn from(err: image::ImageError) -> Self {
        CameraError::EncodingFailed(err.to_string())
    }
}
