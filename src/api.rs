use serde::de::DeserializeOwned;
use tracing::{debug, trace};
use ureq::{Agent, AgentBuilder};

use crate::{
    error::FetchError,
    model::{ApiResponse, FileData, FilesRequest, ModLoaderInfo},
};

pub const CURSEFORGE_API: &str = "https://api.curseforge.com";
const HEADER_API_KEY: &str = "x-api-key";

/// Blocking client for the few CurseForge endpoints a modpack download needs
///
/// No timeouts are configured, a stalled request blocks until the server gives up
#[derive(Debug, Clone)]
pub struct CurseClient {
    agent: Agent,
    base_url: String,
    api_key: String,
}

impl CurseClient {
    pub fn with_base_url(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            agent: AgentBuilder::new().build(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Look up the installer artifact for a mod loader version, e.g. `forge-47.2.0`
    ///
    /// # Errors
    /// * Network errors or an error status from the API
    /// * Unexpected response format
    pub fn get_mod_loader(&self, version: &str) -> Result<ModLoaderInfo, FetchError> {
        let url = format!("{}/v1/minecraft/modloader/{}", self.base_url, version);
        debug!("Requesting mod loader {version}");
        let res = self
            .agent
            .get(&url)
            .set("Accept", "application/json")
            .set(HEADER_API_KEY, &self.api_key)
            .call()?;

        decode::<ModLoaderInfo>(res)
    }

    /// Resolve download metadata for a batch of file ids
    ///
    /// Ids the API doesn't know about are simply missing from the result
    ///
    /// # Errors
    /// * Network errors or an error status from the API
    /// * Unexpected response format
    pub fn get_files(&self, file_ids: &[u32]) -> Result<Vec<FileData>, FetchError> {
        let url = format!("{}/v1/mods/files", self.base_url);
        let body = serde_json::to_string(&FilesRequest {
            file_ids: file_ids.to_vec(),
        })?;
        debug!("Requesting metadata for {} files", file_ids.len());
        trace!("Request body: {body}");
        let res = self
            .agent
            .post(&url)
            .set("Content-Type", "application/json")
            .set("Accept", "application/json")
            .set(HEADER_API_KEY, &self.api_key)
            .send_string(&body)?;

        decode::<Vec<FileData>>(res)
    }
}

fn decode<T: DeserializeOwned>(res: ureq::Response) -> Result<T, FetchError> {
    let raw = res.into_string()?;
    trace!("Response body: {raw}");
    let parsed: ApiResponse<T> = serde_json::from_str(&raw)?;

    Ok(parsed.data)
}
