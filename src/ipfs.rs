//! Best-effort upload to a content-addressed file store.
//!
//! Single multipart POST against the IPFS HTTP API; one attempt, no
//! pinning, no retries. The returned CID is the only output.

use std::path::Path;

use serde::Deserialize;
use url::Url;

use crate::error::CliError;

#[derive(Debug, Deserialize)]
struct AddResponse {
    #[serde(rename = "Hash")]
    hash: String,
}

/// Upload one file and return its CID.
pub async fn upload(api: &Url, path: &Path) -> Result<String, CliError> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| CliError::Upload(format!("cannot read {}: {}", path.display(), e)))?;

    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "file".to_string());
    let form = reqwest::multipart::Form::new()
        .part("file", reqwest::multipart::Part::bytes(bytes).file_name(file_name));

    let endpoint = api
        .join("/api/v0/add")
        .map_err(|e| CliError::Upload(format!("bad store endpoint: {}", e)))?;

    let response = reqwest::Client::new()
        .post(endpoint)
        .multipart(form)
        .send()
        .await
        .map_err(|e| CliError::Upload(e.to_string()))?;

    if !response.status().is_success() {
        return Err(CliError::Upload(format!(
            "store returned status {}",
            response.status()
        )));
    }

    let body: AddResponse = response
        .json()
        .await
        .map_err(|e| CliError::Upload(format!("unexpected store response: {}", e)))?;

    tracing::info!(path = %path.display(), cid = %body.hash, "File uploaded");
    Ok(body.hash)
}
