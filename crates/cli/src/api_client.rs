use anyhow::{Context, Result};
use reqwest::Url;
use serde::{Deserialize, Serialize, de::DeserializeOwned};

#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url).context("invalid server URL")?;
        Ok(Self {
            http: reqwest::Client::new(),
            base_url,
        })
    }

    fn url(&self, path: &str) -> Result<Url> {
        self.base_url.join(path).context("failed to build API URL")
    }

    async fn send_json<T: DeserializeOwned>(&self, req: reqwest::RequestBuilder) -> Result<T> {
        let response = req.send().await?;
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        if !status.is_success() {
            anyhow::bail!("API error ({}): {}", status, body);
        }
        Ok(serde_json::from_str(&body)?)
    }

    pub async fn health(&self) -> Result<HealthResponse> {
        let url = self.url("/v1/health")?;
        self.send_json(self.http.get(url)).await
    }

    pub async fn submit(
        &self,
        file_name: &str,
        data: Vec<u8>,
        copies: u32,
        priority: Option<&str>,
    ) -> Result<JobResponse> {
        let url = self.url("/v1/jobs")?;

        let part = reqwest::multipart::Part::bytes(data).file_name(file_name.to_string());
        let mut form = reqwest::multipart::Form::new()
            .part("file", part)
            .text("copies", copies.to_string());
        if let Some(priority) = priority {
            form = form.text("priority", priority.to_string());
        }

        self.send_json(self.http.post(url).multipart(form)).await
    }

    pub async fn list_queue(&self) -> Result<Vec<QueueEntryResponse>> {
        let url = self.url("/v1/queue")?;
        let response: QueueListResponse = self.send_json(self.http.get(url)).await?;
        Ok(response.entries)
    }

    pub async fn next_job(&self) -> Result<Option<QueueEntryResponse>> {
        let url = self.url("/v1/queue/next")?;
        let response: NextJobResponse = self.send_json(self.http.get(url)).await?;
        Ok(response.entry)
    }

    pub async fn update_status(
        &self,
        id: &str,
        status: &str,
        message: Option<&str>,
    ) -> Result<JobResponse> {
        let url = self.url(&format!("/v1/jobs/{id}/status"))?;
        let req = StatusUpdateRequest {
            status: status.to_string(),
            message: message.map(str::to_string),
        };
        self.send_json(self.http.post(url).json(&req)).await
    }

    pub async fn complete(&self, id: &str) -> Result<JobResponse> {
        let url = self.url(&format!("/v1/queue/{id}"))?;
        self.send_json(self.http.delete(url)).await
    }

    pub async fn track(&self, id: &str) -> Result<JobResponse> {
        let url = self.url(&format!("/v1/jobs/{id}"))?;
        self.send_json(self.http.get(url)).await
    }

    pub async fn download(&self, file_name: &str) -> Result<Vec<u8>> {
        let url = self.url(&format!("/v1/files/{file_name}"))?;
        let response = self.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("API error ({}): {}", status, body);
        }
        Ok(response.bytes().await?.to_vec())
    }

    pub async fn stats(&self) -> Result<StatsResponse> {
        let url = self.url("/v1/stats")?;
        self.send_json(self.http.get(url)).await
    }
}

#[derive(Debug, Serialize)]
pub struct StatusUpdateRequest {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

#[derive(Debug, Deserialize)]
pub struct JobResponse {
    pub id: String,
    pub file_name: String,
    pub copies: u32,
    pub priority: String,
    pub status: String,
    pub submitted_at: String,
    #[serde(default)]
    pub updated_at: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct QueueEntryResponse {
    pub id: String,
    pub file_name: String,
    pub copies: u32,
    pub priority: String,
    pub submitted_at: String,
}

#[derive(Debug, Deserialize)]
struct QueueListResponse {
    entries: Vec<QueueEntryResponse>,
}

#[derive(Debug, Deserialize)]
struct NextJobResponse {
    entry: Option<QueueEntryResponse>,
}

#[derive(Debug, Deserialize)]
pub struct JobCounts {
    pub total: u64,
    pub pending: u64,
    pub processing: u64,
    pub completed: u64,
}

#[derive(Debug, Deserialize)]
pub struct StatsResponse {
    pub jobs: JobCounts,
    pub queue_depth: u64,
    pub stored_files: u64,
}
