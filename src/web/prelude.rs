pub(crate) use crate::error::PromptImgError;
pub(crate) use crate::render::render_prompt;
pub(crate) use crate::web::AppState;
pub(crate) use askama::Template;
pub(crate) use askama_web::WebTemplate;
pub(crate) use axum::extract::{Form, State};
pub(crate) use serde::Deserialize;
pub(crate) use std::sync::Arc;
pub(crate) use tracing::{debug, info};
