pub mod credentials;
pub mod manage;
pub mod modpack;
pub mod report;
pub mod utils;

pub use credentials::resolve_api_key;
pub use manage::{download_file, DownloadStatus};
pub use modpack::{download_mods, install_mod_loader, Settings};
pub use report::Summary;
pub use utils::ask_for_overwrite;
