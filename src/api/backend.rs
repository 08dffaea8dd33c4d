use crate::config::BackendConfig;
use crate::domain::{Plantation, PlantationDraft};
use anyhow::{Context, Result, bail};
use reqwest::StatusCode;
use reqwest::blocking::{Client, RequestBuilder, Response};
use std::time::Duration;

const USER_AGENT: &str = concat!("fieldfence/", env!("CARGO_PKG_VERSION"));

/// Blocking client for the plantation endpoints of the farm backend
pub struct BackendClient {
    client: Client,
    config: BackendConfig,
}

impl BackendClient {
    pub fn new(config: BackendConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client, config })
    }

    /// GET a single plantation record
    pub fn fetch_plantation(&self, id: &str) -> Result<Plantation> {
        let url = self.plantation_url(Some(id));
        let response = self.send_with_retry(|| self.client.get(&url))?;

        response
            .json()
            .context("Failed to parse plantation JSON response")
    }

    /// POST a new plantation, returning the stored record
    pub fn create_plantation(&self, draft: &PlantationDraft) -> Result<Plantation> {
        let url = self.plantation_url(None);
        let response = self.send_with_retry(|| self.client.post(&url).json(draft))?;
        parse_stored(response, draft)
    }

    /// PUT an updated boundary over an existing plantation
    pub fn update_plantation(&self, id: &str, draft: &PlantationDraft) -> Result<Plantation> {
        let url = self.plantation_url(Some(id));
        let response = self.send_with_retry(|| self.client.put(&url).json(draft))?;
        parse_stored(response, draft)
    }

    fn plantation_url(&self, id: Option<&str>) -> String {
        let base = self.config.base_url.trim_end_matches('/');
        let path = self.config.plantations_path.trim_matches('/');
        match id {
            Some(id) => format!("{}/{}/{}", base, path, id),
            None => format!("{}/{}", base, path),
        }
    }

    /// Send a request, retrying on statuses that mean "try again later"
    fn send_with_retry<F>(&self, build: F) -> Result<Response>
    where
        F: Fn() -> RequestBuilder,
    {
        let max_retries = self.config.max_retries.max(1);
        let mut last_error = None;

        for attempt in 0..max_retries {
            if attempt > 0 {
                let wait_secs = self.config.retry_backoff_secs * attempt as u64;
                log::warn!(
                    "Backend busy, retrying in {} seconds (attempt {}/{})",
                    wait_secs,
                    attempt + 1,
                    max_retries
                );
                std::thread::sleep(Duration::from_secs(wait_secs));
            }

            let mut request = build();
            if let Some(token) = &self.config.auth_token {
                request = request.bearer_auth(token);
            }

            let response = request
                .send()
                .context("Failed to send request to backend")?;

            let status = response.status();
            if status.is_success() {
                return Ok(response);
            }
            if is_retriable(status) {
                last_error = Some(format!(
                    "Backend returned status {} (attempt {})",
                    status,
                    attempt + 1
                ));
                continue;
            }
            bail!("Backend returned error status: {}", status);
        }

        bail!(
            "Backend failed after {} attempts: {}",
            max_retries,
            last_error.unwrap_or_else(|| "Unknown error".to_string())
        )
    }
}

fn is_retriable(status: StatusCode) -> bool {
    matches!(status.as_u16(), 429 | 502 | 503 | 504)
}

/// Some deployments answer writes with an empty body; fall back to the draft
fn parse_stored(response: Response, draft: &PlantationDraft) -> Result<Plantation> {
    let body = response.text().context("Failed to read backend response")?;
    if body.trim().is_empty() {
        return Ok(plantation_from_draft(draft));
    }
    serde_json::from_str(&body).context("Failed to parse plantation JSON response")
}

fn plantation_from_draft(draft: &PlantationDraft) -> Plantation {
    Plantation {
        id: None,
        name: draft.name.clone(),
        crop_type: draft.crop_type.clone(),
        pontosx: draft.pontosx.iter().map(|&x| x.into()).collect(),
        pontosy: draft.pontosy.iter().map(|&y| y.into()).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base_url: &str, path: &str) -> BackendClient {
        BackendClient::new(BackendConfig {
            base_url: base_url.to_string(),
            plantations_path: path.to_string(),
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn test_plantation_url() {
        let c = client("https://farm.example.com/api/", "/plantacoes/");
        assert_eq!(
            c.plantation_url(None),
            "https://farm.example.com/api/plantacoes"
        );
        assert_eq!(
            c.plantation_url(Some("42")),
            "https://farm.example.com/api/plantacoes/42"
        );
    }

    #[test]
    fn test_retriable_statuses() {
        assert!(is_retriable(StatusCode::TOO_MANY_REQUESTS));
        assert!(is_retriable(StatusCode::GATEWAY_TIMEOUT));
        assert!(is_retriable(StatusCode::SERVICE_UNAVAILABLE));
        assert!(!is_retriable(StatusCode::NOT_FOUND));
        assert!(!is_retriable(StatusCode::UNPROCESSABLE_ENTITY));
    }

    #[test]
    fn test_plantation_from_draft() {
        let draft = PlantationDraft::new(
            "Talhao 1",
            "Milho",
            vec![-22.0, -22.0, -21.9],
            vec![-47.0, -46.9, -47.0],
        )
        .unwrap();
        let plantation = plantation_from_draft(&draft);

        assert_eq!(plantation.name, "Talhao 1");
        assert_eq!(plantation.boundary_points().len(), 3);
    }
}
