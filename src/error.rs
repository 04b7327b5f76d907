use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Error: Could not parse the date string. Check the format. Details: {0}")]
    DateParse(String),

    #[error("invalid layout signature: {0}")]
    Layout(String),

    #[error("template file not found: {}", .0.display())]
    TemplateNotFound(PathBuf),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("endpoint {url} answered {status}")]
    Endpoint { url: String, status: u16 },

    #[error("no endpoint configured for the {0} form")]
    EndpointNotConfigured(&'static str),

    #[error("config error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
