//! Client for the portal's admin carpeta endpoint.
//!
//! A single GET against `/admin/get-carpetas-por-numeral/` with the numeral
//! id and the admin application tag as query parameters. Records come back
//! in the server's order and are kept that way.

use std::time::Duration;

use anyhow::Result;
use serde::Deserialize;

/// One carpeta record as the portal serves it.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Carpeta {
    pub id: u64,
    pub nombre: String,
    /// Full hierarchical path, e.g. "2024 / Enero / Actas".
    pub ruta_completa: String,
    /// Depth: 0 = root (year), 1 = month, ...
    pub nivel: u32,
}

#[derive(Debug, Deserialize)]
struct CarpetasResponse {
    carpetas: Vec<Carpeta>,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: String,
}

pub struct ApiClient {
    http: reqwest::blocking::Client,
    base_url: String,
    app: String,
}

impl ApiClient {
    pub fn new(server: &str, app: &str, timeout_secs: u64) -> Result<Self> {
        let http = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;
        Ok(ApiClient {
            http,
            base_url: server.trim_end_matches('/').to_string(),
            app: app.to_string(),
        })
    }

    pub fn app(&self) -> &str {
        &self.app
    }

    /// Fetch the carpetas registered under a numeral, in server order.
    pub fn carpetas_por_numeral(&self, numeral_id: u32) -> Result<Vec<Carpeta>> {
        let url = endpoint_url(&self.base_url, numeral_id, &self.app);
        let resp = self
            .http
            .get(&url)
            .send()
            .map_err(|e| anyhow::anyhow!("failed to reach the portal: {}", e))?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().unwrap_or_default();
            // The view returns {"error": "..."} with a 400 status.
            let detail = serde_json::from_str::<ErrorResponse>(&text)
                .map(|e| e.error)
                .unwrap_or(text);
            anyhow::bail!("fetch failed ({}): {}", status, detail);
        }

        let data: CarpetasResponse = resp.json()?;
        Ok(data.carpetas)
    }
}

fn endpoint_url(base_url: &str, numeral_id: u32, app: &str) -> String {
    format!(
        "{}/admin/get-carpetas-por-numeral/?numeral_id={}&app={}",
        base_url, numeral_id, app
    )
}
