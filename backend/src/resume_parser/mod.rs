//! Client for the external résumé parsing API
//!
//! The parser is a black box: the raw file is posted as
//! `application/octet-stream` with an `apikey` header, and the JSON reply is
//! reduced to skills, education, experience and phone. One attempt per
//! upload; failures are terminal for that request.

use crate::config::ResumeParserConfig;
use anyhow::Result;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

const PDF: &str = "application/pdf";
const DOCX: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

#[derive(Debug, Error)]
pub enum ParserError {
    #[error("Resume file should be a pdf or docx")]
    UnsupportedType,

    #[error("resume parser API key is not configured")]
    NotConfigured,

    #[error("resume parser request failed: {0}")]
    Upstream(String),

    #[error("resume parser returned an unexpected shape: {0}")]
    UpstreamShape(String),
}

impl From<reqwest::Error> for ParserError {
    fn from(err: reqwest::Error) -> Self {
        ParserError::Upstream(err.to_string())
    }
}

/// Accepted résumé formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResumeFormat {
    Pdf,
    Docx,
}

impl ResumeFormat {
    /// Classify an upload by its declared content type
    pub fn from_content_type(content_type: Option<&str>) -> Result<Self, ParserError> {
        let essence = content_type
            .and_then(|ct| ct.split(';').next())
            .map(|ct| ct.trim().to_ascii_lowercase());

        match essence.as_deref() {
            Some(PDF) => Ok(ResumeFormat::Pdf),
            Some(DOCX) => Ok(ResumeFormat::Docx),
            _ => Err(ParserError::UnsupportedType),
        }
    }
}

/// Fields kept from a parser reply
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedResume {
    pub skills: Value,
    pub education: Value,
    pub experience: Value,
    pub phone: String,
}

impl ParsedResume {
    /// Extract the fields we store.
    ///
    /// Skills, education and experience are kept as opaque JSON (null when
    /// absent). Phone must be present and a string.
    pub fn from_value(mut value: Value) -> Result<Self, ParserError> {
        let obj = value
            .as_object_mut()
            .ok_or_else(|| ParserError::UpstreamShape("reply is not a JSON object".to_string()))?;

        let phone = match obj.remove("phone") {
            Some(Value::String(phone)) => phone,
            Some(_) => {
                return Err(ParserError::UpstreamShape("phone is not a string".to_string()))
            }
            None => return Err(ParserError::UpstreamShape("phone is missing".to_string())),
        };

        Ok(Self {
            skills: obj.remove("skills").unwrap_or(Value::Null),
            education: obj.remove("education").unwrap_or(Value::Null),
            experience: obj.remove("experience").unwrap_or(Value::Null),
            phone,
        })
    }
}

/// HTTP client for the résumé parser
#[derive(Clone)]
pub struct ResumeParserClient {
    client: Client,
    url: String,
    api_key: Option<Arc<SecretString>>,
}

impl ResumeParserClient {
    pub fn new(config: &ResumeParserConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        let api_key = config
            .api_key
            .as_ref()
            .filter(|k| !k.trim().is_empty())
            .map(|k| Arc::new(SecretString::new(k.clone())));

        if api_key.is_none() {
            warn!("Resume parser API key is not set; resume uploads will fail");
        }

        Ok(Self {
            client,
            url: config.url.clone(),
            api_key,
        })
    }

    /// Whether an API key is available
    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    /// Send a résumé to the parser and extract the stored fields
    pub async fn parse(&self, file: Vec<u8>) -> Result<ParsedResume, ParserError> {
        let api_key = self.api_key.as_ref().ok_or(ParserError::NotConfigured)?;

        debug!(bytes = file.len(), "Sending resume to parser");

        let response = self
            .client
            .post(&self.url)
            .header(reqwest::header::CONTENT_TYPE, "application/octet-stream")
            .header("apikey", api_key.expose_secret().as_str())
            .body(file)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ParserError::Upstream(format!(
                "status {}: {}",
                status.as_u16(),
                body.chars().take(200).collect::<String>()
            )));
        }

        let value: Value = response
            .json()
            .await
            .map_err(|e| ParserError::Upstream(format!("invalid JSON reply: {}", e)))?;

        ParsedResume::from_value(value)
    }
}
