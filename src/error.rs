//! Error handling

use axum::response::IntoResponse;

/// definitions for the promptimg application.
#[derive(Debug)]
pub enum PromptImgError {
    /// Filesystem operations failed
    Io(std::io::Error),
    /// Encoding or writing an image failed
    Image(image::ImageError),
    /// A generated image name didn't follow the naming scheme
    InvalidFilename(String),
    /// A font file was read but could not be parsed
    InvalidFont(String),
    /// When an internal server error occurs
    InternalServerError(String),
}

impl std::fmt::Display for PromptImgError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "I/O error: {err}"),
            Self::Image(err) => write!(f, "Image error: {err}"),
            Self::InvalidFilename(name) => write!(f, "Invalid generated file name: {name}"),
            Self::InvalidFont(message) => write!(f, "Invalid font: {message}"),
            Self::InternalServerError(message) => write!(f, "Internal server error: {message}"),
        }
    }
}

impl std::error::Error for PromptImgError {}

impl From<std::io::Error> for PromptImgError {
    fn from(err: std::io::Error) -> Self {
        PromptImgError::Io(err)
    }
}

impl From<image::ImageError> for PromptImgError {
    fn from(err: image::ImageError) -> Self {
        PromptImgError::Image(err)
    }
}

impl From<ab_glyph::InvalidFont> for PromptImgError {
    fn from(err: ab_glyph::InvalidFont) -> Self {
        PromptImgError::InvalidFont(err.to_string())
    }
}

impl From<tokio::task::JoinError> for PromptImgError {
    fn from(err: tokio::task::JoinError) -> Self {
        PromptImgError::InternalServerError(err.to_string())
    }
}

impl IntoResponse for PromptImgError {
    fn into_response(self) -> axum::response::Response {
        match &self {
            PromptImgError::Io(_)
            | PromptImgError::Image(_)
            | PromptImgError::InvalidFilename(_) => {
                tracing::error!("Failed to store generated image: {}", self);
            }
            PromptImgError::InvalidFont(_) | PromptImgError::InternalServerError(_) => {
                tracing::error!("{}", self);
            }
        }
        let mut response =
            axum::response::Response::new(axum::body::Body::from("Internal server error"));
        *response.status_mut() = axum::http::StatusCode::INTERNAL_SERVER_ERROR;
        response
    }
}
