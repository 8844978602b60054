//! Hugeicons HTTP API client
//!
//! Fetches the icon catalog and per-icon glyph metadata.

use super::provider::IconSource;
use super::types::{ApiEnvelope, Glyph, GlyphList, GlyphPair, IconRecord, IconStyle, IconsResponse};
use crate::config::ServerConfig;
use crate::error::AppError;
use reqwest::{header, Client, StatusCode};
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

/// Client for the catalog endpoint and the glyph API
#[derive(Debug, Clone)]
pub struct HugeiconsClient {
    client: Client,
    catalog_url: Url,
    api_base: Url,
}

impl HugeiconsClient {
    pub fn new(config: &ServerConfig) -> Result<Self, AppError> {
        let catalog_url = parse_url("catalog URL", &config.catalog_url)?;
        let api_base = parse_url("API base URL", &config.api_base)?;
        if api_base.cannot_be_a_base() {
            return Err(AppError::InvalidInput(format!(
                "API base URL cannot carry a path: {}",
                config.api_base
            )));
        }

        let client = crate::http::client_with_timeout(config.request_timeout())?;
        Ok(Self {
            client,
            catalog_url,
            api_base,
        })
    }

    /// `{api_base}/icon/{name}/{leaf}` with each segment percent-encoded
    fn icon_url(&self, icon_name: &str, leaf: &str) -> Url {
        let mut url = self.api_base.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().extend(["icon", icon_name, leaf]);
        }
        url
    }

    /// Download the full icon catalog
    pub async fn fetch_icons(&self) -> Result<Vec<IconRecord>, AppError> {
        debug!("Fetching icon catalog from {}", self.catalog_url);

        let response = self
            .client
            .get(self.catalog_url.clone())
            .header(header::ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::ApiError(format!(
                "Failed to load icons data: HTTP {}",
                status
            )));
        }

        let body: IconsResponse = response.json().await?;
        debug!("Catalog returned {} icons", body.icons.len());
        Ok(body.icons)
    }

    /// Every glyph of `icon_name`, across all styles
    pub async fn get_glyphs(&self, icon_name: &str) -> Result<Vec<Glyph>, AppError> {
        let url = self.icon_url(icon_name, "glyphs");
        debug!("Fetching glyphs: {}", url);

        let response = self
            .client
            .get(url)
            .header(header::ACCEPT, "application/json")
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(AppError::NotFound(format!("Icon '{}' not found", icon_name)));
        }

        let list: GlyphList = read_envelope(response, "Failed to fetch glyphs").await?;
        Ok(list.glyphs)
    }

    /// The glyph pair of `icon_name` in one style
    pub async fn get_glyph_by_style(
        &self,
        icon_name: &str,
        style: IconStyle,
    ) -> Result<GlyphPair, AppError> {
        let mut url = self.icon_url(icon_name, "glyph");
        url.query_pairs_mut().append_pair("style", style.as_str());
        debug!("Fetching glyph: {}", url);

        let response = self
            .client
            .get(url)
            .header(header::ACCEPT, "application/json")
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(AppError::NotFound(format!(
                "Icon '{}' with style '{}' not found",
                icon_name, style
            )));
        }

        read_envelope(response, "Failed to fetch glyph").await
    }
}

impl IconSource for HugeiconsClient {
    fn source_url(&self) -> &str {
        self.catalog_url.as_str()
    }

    async fn fetch_icons(&self) -> Result<Vec<IconRecord>, AppError> {
        HugeiconsClient::fetch_icons(self).await
    }
}

fn parse_url(what: &str, value: &str) -> Result<Url, AppError> {
    Url::parse(value.trim())
        .map_err(|e| AppError::InvalidInput(format!("Invalid {} '{}': {}", what, value, e)))
}

/// Unwrap `{success, message, data}`, turning API-level failures into `ApiError`
async fn read_envelope<T: DeserializeOwned>(
    response: reqwest::Response,
    failure: &str,
) -> Result<T, AppError> {
    let status = response.status();
    let text = response.text().await?;

    let envelope: ApiEnvelope<T> = match serde_json::from_str(&text) {
        Ok(envelope) => envelope,
        Err(_) if !status.is_success() => {
            return Err(AppError::ApiError(format!("{}: HTTP {}", failure, status)));
        }
        Err(e) => return Err(AppError::ParseError(format!("{}: {}", failure, e))),
    };

    if !envelope.success || !status.is_success() {
        let message = envelope
            .message
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| failure.to_string());
        return Err(AppError::ApiError(message));
    }

    envelope
        .data
        .ok_or_else(|| AppError::ApiError(format!("{}: response has no data", failure)))
}
