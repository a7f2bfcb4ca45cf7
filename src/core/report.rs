use std::fmt;

use crate::error::FetchError;

use super::manage::DownloadStatus;

/// Running tally of a batch of downloads
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Summary {
    pub downloaded: usize,
    ///Names of files that failed or were declined, in the order they were processed
    pub failed: Vec<String>,
}

impl Summary {
    /// Anything but a saved file counts as a failure
    pub fn record(&mut self, file_name: &str, outcome: &Result<DownloadStatus, FetchError>) {
        match outcome {
            Ok(DownloadStatus::Saved) => self.downloaded += 1,
            Ok(DownloadStatus::Declined) | Err(_) => self.failed.push(file_name.to_string()),
        }
    }

    pub fn failed_count(&self) -> usize {
        self.failed.len()
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Завантажено файлів: {}", self.downloaded)?;
        writeln!(f, "Помилок завантаження: {}", self.failed_count())?;
        if !self.failed.is_empty() {
            writeln!(f, "Список файлів, які не вдалося завантажити:")?;
            for name in &self.failed {
                writeln!(f, "{name}")?;
            }
        }
        Ok(())
    }
}
