use serde::{Deserialize, Deserializer, Serialize};
use std::{fs, path::Path};
use tracing::debug;

use crate::error::FetchError;

// manifest.json

/// A CurseForge modpack manifest
///
/// Every field falls back to its zero value when missing from the file
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Manifest {
    pub minecraft: Minecraft,
    pub manifest_type: String,
    pub manifest_version: u32,
    pub name: String,
    pub version: String,
    pub author: String,
    pub files: Vec<ManifestFile>,
    pub overrides: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Minecraft {
    pub version: String,
    pub mod_loaders: Vec<ModLoader>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct ModLoader {
    pub id: String,
    pub primary: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct ManifestFile {
    #[serde(rename = "projectID")]
    pub project_id: u32,
    #[serde(rename = "fileID")]
    pub file_id: u32,
    pub required: bool,
}

impl Manifest {
    /// Read and parse a manifest file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, FetchError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| FetchError::ManifestRead {
            path: path.to_path_buf(),
            source,
        })?;
        let manifest: Manifest =
            serde_json::from_str(&raw).map_err(|source| FetchError::ManifestParse {
                path: path.to_path_buf(),
                source,
            })?;
        debug!(
            "Loaded manifest '{}' with {} files",
            manifest.name,
            manifest.files.len()
        );

        Ok(manifest)
    }

    /// Returns the primary mod loader entry
    ///
    /// # Warning
    /// If several entries are marked primary the last one wins
    pub fn primary_mod_loader(&self) -> Option<&ModLoader> {
        self.minecraft
            .mod_loaders
            .iter()
            .filter(|l| l.primary)
            .last()
    }

    /// File ids of every required entry, in manifest order
    pub fn required_file_ids(&self) -> Vec<u32> {
        self.files
            .iter()
            .filter(|f| f.required)
            .map(|f| f.file_id)
            .collect()
    }
}

// API payloads

/// Envelope every CurseForge response is wrapped in
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct ApiResponse<T> {
    pub data: T,
}

/// Body of `POST /v1/mods/files`
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FilesRequest {
    pub file_ids: Vec<u32>,
}

/// API records may carry an explicit `null` where a value is expected, treat it as missing
fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct FileHash {
    #[serde(deserialize_with = "nullable")]
    pub value: String,
    #[serde(deserialize_with = "nullable")]
    pub algo: u32,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct SortableGameVersion {
    #[serde(deserialize_with = "nullable")]
    pub game_version_name: String,
    #[serde(deserialize_with = "nullable")]
    pub game_version_padded: String,
    #[serde(deserialize_with = "nullable")]
    pub game_version: String,
    #[serde(deserialize_with = "nullable")]
    pub game_version_release_date: String,
    #[serde(deserialize_with = "nullable")]
    pub game_version_type_id: u32,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct FileDependency {
    #[serde(deserialize_with = "nullable")]
    pub mod_id: u32,
    #[serde(deserialize_with = "nullable")]
    pub relation_type: u32,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct FileModule {
    #[serde(deserialize_with = "nullable")]
    pub name: String,
    #[serde(deserialize_with = "nullable")]
    pub fingerprint: u64,
}

/// A mod file as resolved by the API
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct FileData {
    #[serde(deserialize_with = "nullable")]
    pub id: u32,
    #[serde(deserialize_with = "nullable")]
    pub game_id: u32,
    #[serde(deserialize_with = "nullable")]
    pub mod_id: u32,
    #[serde(deserialize_with = "nullable")]
    pub is_available: bool,
    #[serde(deserialize_with = "nullable")]
    pub display_name: String,
    #[serde(deserialize_with = "nullable")]
    pub file_name: String,
    #[serde(deserialize_with = "nullable")]
    pub release_type: u32,
    #[serde(deserialize_with = "nullable")]
    pub file_status: u32,
    #[serde(deserialize_with = "nullable")]
    pub hashes: Vec<FileHash>,
    #[serde(deserialize_with = "nullable")]
    pub file_date: String,
    #[serde(deserialize_with = "nullable")]
    pub file_length: u64,
    #[serde(deserialize_with = "nullable")]
    pub download_count: u64,
    pub file_size_on_disk: Option<u64>,
    ///Missing when the author has disabled third party distribution
    pub download_url: Option<String>,
    #[serde(deserialize_with = "nullable")]
    pub game_versions: Vec<String>,
    #[serde(deserialize_with = "nullable")]
    pub sortable_game_versions: Vec<SortableGameVersion>,
    #[serde(deserialize_with = "nullable")]
    pub dependencies: Vec<FileDependency>,
    pub expose_as_alternative: Option<bool>,
    pub parent_project_file_id: Option<u32>,
    pub alternate_file_id: Option<u32>,
    pub is_server_pack: Option<bool>,
    pub server_pack_file_id: Option<u32>,
    pub is_early_access_content: Option<bool>,
    pub early_access_end_date: Option<String>,
    #[serde(deserialize_with = "nullable")]
    pub file_fingerprint: u64,
    #[serde(deserialize_with = "nullable")]
    pub modules: Vec<FileModule>,
}

impl FileData {
    pub fn file_size_string(&self) -> String {
        if self.file_length / 1_000_000 >= 1 {
            let size = self.file_length as f64 / 1_048_576f64;

            format!("{size:.2} MB")
        } else {
            let size = self.file_length as f64 / 1024f64;
            format!("{size:.2} KB")
        }
    }
}

/// Installer artifact for one mod loader version
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct ModLoaderInfo {
    #[serde(deserialize_with = "nullable")]
    pub id: u32,
    #[serde(deserialize_with = "nullable")]
    pub game_version_id: u32,
    #[serde(deserialize_with = "nullable")]
    pub minecraft_game_version_id: u32,
    #[serde(deserialize_with = "nullable")]
    pub forge_version: String,
    #[serde(deserialize_with = "nullable")]
    pub name: String,
    #[serde(rename = "type", deserialize_with = "nullable")]
    pub loader_type: u32,
    #[serde(deserialize_with = "nullable")]
    pub download_url: String,
    #[serde(deserialize_with = "nullable")]
    pub filename: String,
    #[serde(deserialize_with = "nullable")]
    pub install_method: u32,
    #[serde(deserialize_with = "nullable")]
    pub latest: bool,
    #[serde(deserialize_with = "nullable")]
    pub recommended: bool,
    #[serde(deserialize_with = "nullable")]
    pub approved: bool,
    #[serde(deserialize_with = "nullable")]
    pub date_modified: String,
    #[serde(deserialize_with = "nullable")]
    pub maven_version_string: String,
    #[serde(deserialize_with = "nullable")]
    pub version_json: String,
    #[serde(deserialize_with = "nullable")]
    pub libraries_install_location: String,
    #[serde(deserialize_with = "nullable")]
    pub minecraft_version: String,
    pub additional_files_json: Option<String>,
    #[serde(deserialize_with = "nullable")]
    pub mod_loader_game_version_id: u32,
    #[serde(deserialize_with = "nullable")]
    pub mod_loader_game_version_type_id: u32,
    #[serde(deserialize_with = "nullable")]
    pub mod_loader_game_version_status: u32,
    #[serde(deserialize_with = "nullable")]
    pub mod_loader_game_version_type_status: u32,
    #[serde(deserialize_with = "nullable")]
    pub mc_game_version_id: u32,
    #[serde(deserialize_with = "nullable")]
    pub mc_game_version_type_id: u32,
    #[serde(deserialize_with = "nullable")]
    pub mc_game_version_status: u32,
    #[serde(deserialize_with = "nullable")]
    pub mc_game_version_type_status: u32,
    #[serde(deserialize_with = "nullable")]
    pub install_profile_json: String,
}

#[cfg(test)]
mod test {
    use std::fs;

    use crate::error::FetchError;

    use super::{FileData, Manifest, ManifestFile, Minecraft, ModLoader, ModLoaderInfo};

    fn file(file_id: u32, required: bool) -> ManifestFile {
        ManifestFile {
            project_id: file_id * 100,
            file_id,
            required,
        }
    }

    #[test]
    fn parse_curseforge_manifest() {
        let raw = r#"{
            "minecraft": {
                "version": "1.20.1",
                "modLoaders": [{ "id": "forge-47.2.0", "primary": true }]
            },
            "manifestType": "minecraftModpack",
            "manifestVersion": 1,
            "name": "Test Pack",
            "version": "1.0.0",
            "author": "someone",
            "files": [
                { "projectID": 238222, "fileID": 4712866, "required": true },
                { "projectID": 32274, "fileID": 3872, "required": false }
            ],
            "overrides": "overrides"
        }"#;

        let manifest: Manifest = serde_json::from_str(raw).expect("valid manifest");
        assert_eq!(manifest.name, "Test Pack");
        assert_eq!(manifest.minecraft.version, "1.20.1");
        assert_eq!(manifest.minecraft.mod_loaders[0].id, "forge-47.2.0");
        assert_eq!(manifest.files.len(), 2);
        assert_eq!(manifest.files[0].project_id, 238222);
        assert_eq!(manifest.overrides, "overrides");
    }

    #[test]
    fn missing_fields_default_to_zero_values() {
        let manifest: Manifest =
            serde_json::from_str(r#"{ "name": "Bare" }"#).expect("valid manifest");

        assert_eq!(manifest.name, "Bare");
        assert_eq!(manifest.manifest_version, 0);
        assert!(manifest.files.is_empty());
        assert!(manifest.minecraft.mod_loaders.is_empty());
        assert!(manifest.primary_mod_loader().is_none());
    }

    #[test]
    fn required_ids_keep_manifest_order() {
        let manifest = Manifest {
            files: vec![
                file(30, true),
                file(5, false),
                file(10, true),
                file(7, false),
                file(20, true),
            ],
            ..Default::default()
        };

        assert_eq!(manifest.required_file_ids(), vec![30, 10, 20]);
    }

    #[test]
    fn last_primary_loader_wins() {
        let manifest = Manifest {
            minecraft: Minecraft {
                version: "1.20.1".into(),
                mod_loaders: vec![
                    ModLoader {
                        id: "forge-1".into(),
                        primary: true,
                    },
                    ModLoader {
                        id: "forge-2".into(),
                        primary: false,
                    },
                    ModLoader {
                        id: "forge-3".into(),
                        primary: true,
                    },
                ],
            },
            ..Default::default()
        };

        let loader = manifest.primary_mod_loader().expect("primary loader");
        assert_eq!(loader.id, "forge-3");
    }

    #[test]
    fn load_reports_read_and_parse_errors() {
        let dir = tempfile::tempdir().expect("temp dir");

        let missing = Manifest::load(dir.path().join("manifest.json"));
        assert!(matches!(missing, Err(FetchError::ManifestRead { .. })));

        let broken = dir.path().join("broken.json");
        fs::write(&broken, "{ not json").expect("write manifest");
        assert!(matches!(
            Manifest::load(&broken),
            Err(FetchError::ManifestParse { .. })
        ));

        let good = dir.path().join("good.json");
        fs::write(&good, r#"{ "name": "Good", "files": [] }"#).expect("write manifest");
        assert_eq!(Manifest::load(&good).expect("loads").name, "Good");
    }

    #[test]
    fn null_fields_decode_to_zero_values() {
        let info: ModLoaderInfo = serde_json::from_str(
            r#"{
                "name": "forge-47.2.0",
                "downloadUrl": "https://example.invalid/forge-installer.jar",
                "filename": "forge-installer.jar",
                "installProfileJson": null,
                "versionJson": null,
                "type": null,
                "latest": null
            }"#,
        )
        .expect("mod loader record");
        assert_eq!(info.filename, "forge-installer.jar");
        assert_eq!(
            info.download_url,
            "https://example.invalid/forge-installer.jar"
        );
        assert_eq!(info.install_profile_json, "");
        assert_eq!(info.loader_type, 0);
        assert!(!info.latest);

        let file: FileData = serde_json::from_str(
            r#"{
                "id": 10,
                "fileName": "ten.jar",
                "downloadUrl": "https://example.invalid/ten.jar",
                "fileDate": null,
                "hashes": null,
                "sortableGameVersions": [{ "gameVersionName": null, "gameVersionTypeId": 1 }],
                "modules": [{ "name": "META-INF", "fingerprint": null }]
            }"#,
        )
        .expect("file record");
        assert_eq!(file.file_name, "ten.jar");
        assert_eq!(
            file.download_url.as_deref(),
            Some("https://example.invalid/ten.jar")
        );
        assert!(file.hashes.is_empty());
        assert_eq!(file.sortable_game_versions[0].game_version_type_id, 1);
        assert_eq!(file.modules[0].fingerprint, 0);
    }

    #[test]
    fn file_size_string_picks_unit() {
        let small = FileData {
            file_length: 2048,
            ..Default::default()
        };
        let large = FileData {
            file_length: 3 * 1_048_576,
            ..Default::default()
        };

        assert_eq!(small.file_size_string(), "2.00 KB");
        assert_eq!(large.file_size_string(), "3.00 MB");
    }
}
