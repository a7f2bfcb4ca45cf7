use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::{
    api::{CurseClient, CURSEFORGE_API},
    error::FetchError,
    model::{FileData, Manifest},
};

use super::{
    manage::{download_file, DownloadStatus},
    report::Summary,
};

/// Where things are read from and written to for a single run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub api_url: String,
    pub manifest: PathBuf,
    pub mods_dir: PathBuf,
    pub loader_dir: PathBuf,
    ///Replace existing files without asking
    pub overrode: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_url: CURSEFORGE_API.to_string(),
            manifest: PathBuf::from("manifest.json"),
            mods_dir: PathBuf::from("mods"),
            loader_dir: PathBuf::from("forge"),
            overrode: false,
        }
    }
}

/// Download the installer of the manifest's primary mod loader into `settings.loader_dir`
///
/// Returns `None` without touching the API when no mod loader is marked primary
///
/// # Errors
/// * The lookup fails or returns no download URL
/// * The download itself fails
pub fn install_mod_loader<F>(
    client: &CurseClient,
    manifest: &Manifest,
    settings: &Settings,
    confirm: F,
) -> Result<Option<DownloadStatus>, FetchError>
where
    F: FnOnce(&Path) -> bool,
{
    let Some(loader) = manifest.primary_mod_loader() else {
        warn!("Manifest has no primary mod loader, skipping");
        return Ok(None);
    };
    let info = client.get_mod_loader(&loader.id)?;
    println!("Download URL: {}", info.download_url);

    if info.download_url.is_empty() {
        return Err(FetchError::MiscError(format!(
            "No download URL for mod loader {}",
            loader.id
        )));
    }

    download_file(
        &info.download_url,
        &info.filename,
        &settings.loader_dir,
        settings.overrode,
        confirm,
    )
    .map(Some)
}

/// Resolve every required file of the manifest and download it into `settings.mods_dir`
///
/// Individual download failures are tallied in the returned `Summary`, only a failed
/// batch lookup is returned as an error
pub fn download_mods<F>(
    client: &CurseClient,
    manifest: &Manifest,
    settings: &Settings,
    mut confirm: F,
) -> Result<Summary, FetchError>
where
    F: FnMut(&Path) -> bool,
{
    let mut summary = Summary::default();
    let ids = manifest.required_file_ids();
    if ids.is_empty() {
        info!("Manifest has no required files");
        return Ok(summary);
    }

    let files = client.get_files(&ids)?;
    if files.len() < ids.len() {
        warn!(
            "API resolved {} of {} requested files",
            files.len(),
            ids.len()
        );
    }

    for file in &files {
        println!("Завантаження файлу: {}", file.file_name);
        let res = fetch_one(file, settings, &mut confirm);
        if let Err(e) = &res {
            println!("Помилка завантаження файлу: {e}");
        }
        summary.record(&file.file_name, &res);
    }

    Ok(summary)
}

fn fetch_one<F>(
    file: &FileData,
    settings: &Settings,
    confirm: F,
) -> Result<DownloadStatus, FetchError>
where
    F: FnOnce(&Path) -> bool,
{
    debug!(
        "{} [{}] {}",
        file.display_name,
        file.id,
        file.file_size_string()
    );
    let url = file
        .download_url
        .as_deref()
        .filter(|u| !u.is_empty())
        .ok_or_else(|| FetchError::MiscError(format!("No download URL for {}", file.file_name)))?;

    download_file(url, &file.file_name, &settings.mods_dir, settings.overrode, confirm)
}
