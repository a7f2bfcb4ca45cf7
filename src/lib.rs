
pub mod api;
pub mod core;
pub mod error;
pub mod model;

// Important functions and structs
pub use crate::api::CurseClient;
pub use crate::core::{download_file, download_mods, install_mod_loader, resolve_api_key};
pub use crate::model::{FileData, Manifest, ModLoaderInfo};

pub mod prelude {
    pub use crate::api::{CurseClient, CURSEFORGE_API};
    pub use crate::core::credentials::{mask_key, resolve_api_key, API_KEY_VAR};
    pub use crate::core::{
        ask_for_overwrite, download_file, download_mods, install_mod_loader, DownloadStatus,
        Settings, Summary,
    };
    pub use crate::error::{tolerate, FetchError};
    pub use crate::model::{FileData, Manifest, ModLoader, ModLoaderInfo};
}
