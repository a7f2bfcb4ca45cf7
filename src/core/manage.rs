use std::{
    ffi::OsStr,
    fs::{self, OpenOptions},
    io,
    path::Path,
};

use tracing::{debug, trace};

use crate::error::FetchError;

/// What happened to a single file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DownloadStatus {
    /// The file was fetched and written to disk
    Saved,
    /// The file already existed and the user chose to keep it
    Declined,
}

/// Download a file into a directory
/// # Params
/// * url - URL to download from
/// * filename - name of the file inside `directory`
/// * directory - created, along with its parents, if missing
/// * overrode - replace an existing file without asking
/// * confirm - asked whether to replace an existing file when `overrode` is false
///
/// The body is written as received, nothing is checked against the advertised size or hashes
pub fn download_file<F>(
    url: &str,
    filename: &str,
    directory: impl AsRef<Path>,
    overrode: bool,
    confirm: F,
) -> Result<DownloadStatus, FetchError>
where
    F: FnOnce(&Path) -> bool,
{
    let directory = directory.as_ref();
    //names come from the API, keep them inside `directory`
    if filename.is_empty() || Path::new(filename).file_name() != Some(OsStr::new(filename)) {
        return Err(FetchError::MiscError(format!(
            "Refusing to write file with unsafe name {filename:?}"
        )));
    }
    let file_path = directory.join(filename);

    //anything other than a clean "not found" counts as existing
    if file_path.try_exists().unwrap_or(true) {
        if overrode {
            debug!("Overwriting {}", file_path.display());
        } else if !confirm(&file_path) {
            println!("Завантаження скасовано.");
            return Ok(DownloadStatus::Declined);
        }
    }

    debug!("Starting download from {}", url);
    let res = ureq::get(url).call()?;

    trace!("Creating dir at {}", directory.display());
    fs::create_dir_all(directory)?;

    trace!("Open file {} for writing", file_path.display());
    let mut outfile = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(&file_path)?;
    let written = io::copy(&mut res.into_reader(), &mut outfile)?;
    debug!(
        "Finished download to {} ({written} bytes)",
        file_path.display()
    );

    println!(
        "Файл {} успішно завантажено в директорію {}!",
        filename,
        directory.display()
    );
    Ok(DownloadStatus::Saved)
}
