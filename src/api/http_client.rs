use crate::{
    api::traits::WorkflowApi,
    config::StudioConfig,
    error::{Result, StudioError},
    logger,
    models::{
        GenerationRequest, GenerationResult, HealthStatus, WorkflowDefinition,
        WorkflowDetailResponse, WorkflowListResponse, WorkflowSummary,
    },
};
use async_trait::async_trait;
use reqwest::{
    header::{HeaderMap, HeaderValue, ACCEPT},
    Client, Response, Url,
};
use serde::de::DeserializeOwned;
use uuid::Uuid;

const REQUEST_ID_HEADER: &str = "x-request-id";

#[derive(Clone)]
pub struct HttpWorkflowApi {
    client: Client,
    base_url: String,
}

impl HttpWorkflowApi {
    pub fn new(config: &StudioConfig) -> Result<Self> {
        config.validate()?;

        let mut builder = Client::builder().default_headers(Self::build_headers());
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| StudioError::ConfigError(format!("HTTP client setup failed: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.api_root().to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn build_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn workflow_url(&self, id: &str) -> Result<Url> {
        let mut url = Url::parse(&self.endpoint("/api/workflows"))
            .map_err(|e| StudioError::UrlError(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| StudioError::UrlError(format!("{} cannot be a base URL", self.base_url)))?
            .push(id);
        Ok(url)
    }

    /// Resolves a result path like `/generated/a.png` against the server.
    /// Absolute URLs are returned unchanged.
    pub fn resolve(&self, path: &str) -> Result<Url> {
        let base = Url::parse(&format!("{}/", self.base_url))
            .map_err(|e| StudioError::UrlError(e.to_string()))?;
        base.join(path)
            .map_err(|e| StudioError::UrlError(format!("{}: {}", path, e)))
    }

    /// Downloads a generated image.
    pub async fn fetch_image(&self, path: &str) -> Result<Vec<u8>> {
        let url = self.resolve(path)?;
        let _timer = logger::timer(&format!("GET {}", url.path()));

        let response = self
            .client
            .get(url.clone())
            .header(ACCEPT, "image/*")
            .send()
            .await
            .map_err(|e| StudioError::RequestError(format!("image download failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(StudioError::ResponseError(format!(
                "image download from {} returned {}",
                url,
                response.status()
            )));
        }

        let bytes = response.bytes().await?;
        log::debug!("Fetched {} bytes from {}", bytes.len(), url);
        Ok(bytes.to_vec())
    }

    /// JSON bodies are accepted whatever the status; a page script would parse
    /// a 500 carrying `{"success": false, ...}` just the same. Only an
    /// unparseable body is an error.
    async fn read_json<T: DeserializeOwned>(response: Response, what: &str) -> Result<T> {
        let status = response.status();
        let body = response.text().await?;

        match serde_json::from_str::<T>(&body) {
            Ok(parsed) => {
                if !status.is_success() {
                    log::warn!("{} returned {} with a JSON body", what, status);
                }
                Ok(parsed)
            }
            Err(e) if status.is_success() => Err(StudioError::SerializationError(format!(
                "{} returned malformed JSON: {}",
                what, e
            ))),
            Err(_) => Err(StudioError::ResponseError(format!(
                "{} returned {}: {}",
                what,
                status,
                body.chars().take(200).collect::<String>()
            ))),
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url, what: &str) -> Result<T> {
        let request_id = Uuid::new_v4().to_string();
        let _timer = logger::timer(what);
        log::debug!("{} [req:{}]", what, request_id);

        let response = self
            .client
            .get(url)
            .header(REQUEST_ID_HEADER, request_id.as_str())
            .send()
            .await
            .map_err(|e| StudioError::RequestError(format!("{} failed: {}", what, e)))?;

        Self::read_json(response, what).await
    }
}

#[async_trait]
impl WorkflowApi for HttpWorkflowApi {
    async fn list_workflows(&self) -> Result<Vec<WorkflowSummary>> {
        let url = Url::parse(&self.endpoint("/api/workflows"))
            .map_err(|e| StudioError::UrlError(e.to_string()))?;

        let listing: WorkflowListResponse = self.get_json(url, "GET /api/workflows").await?;
        log::info!("Loaded {} workflows", listing.workflows.len());
        Ok(listing.workflows)
    }

    async fn get_workflow(&self, id: &str) -> Result<WorkflowDefinition> {
        let url = self.workflow_url(id)?;
        let what = format!("GET /api/workflows/{}", id);

        let detail: WorkflowDetailResponse = self.get_json(url, &what).await?;
        detail.into_definition().ok_or_else(|| {
            StudioError::ResponseError(format!("no workflow definition returned for {}", id))
        })
    }

    async fn generate(&self, request: &GenerationRequest) -> Result<GenerationResult> {
        let request_id = Uuid::new_v4().to_string();
        let _timer = logger::timer("POST /api/image-generation");
        log::info!("Submitting generation request [req:{}]", request_id);

        let response = self
            .client
            .post(self.endpoint("/api/image-generation"))
            .header(REQUEST_ID_HEADER, request_id.as_str())
            .json(request)
            .send()
            .await
            .map_err(|e| StudioError::RequestError(format!("image generation failed: {}", e)))?;

        let result: GenerationResult =
            Self::read_json(response, "POST /api/image-generation").await?;
        log::debug!(
            "Generation finished [req:{}]: success={} images={}",
            request_id,
            result.success,
            result.image_paths.len()
        );
        Ok(result)
    }

    async fn health_check(&self) -> Result<bool> {
        let url = Url::parse(&self.endpoint("/api/health"))
            .map_err(|e| StudioError::UrlError(e.to_string()))?;

        let health: HealthStatus = self.get_json(url, "GET /api/health").await?;
        Ok(health.is_healthy())
    }
}
