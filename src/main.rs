use std::{path::PathBuf, process::ExitCode};

use clap::Parser;
use packfetch::prelude::*;
use tracing::{debug, error, Level};
use tracing_subscriber::FmtSubscriber;

/// Завантажує Forge та моди, перелічені у manifest.json, через CurseForge API
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// API Key для доступу до API
    #[arg(short = 'k', long)]
    api_key: Option<String>,
    /// Завантажити Forge
    #[arg(short, long)]
    forge: bool,
    /// Не завантажувати файли
    #[arg(short, long)]
    no_download: bool,
    /// Використати змінні середовища для API Key (API_KEY)
    #[arg(long)]
    env: bool,
    /// Перезаписати файли
    #[arg(short, long)]
    overrode: bool,
    /// Шлях до маніфесту
    #[arg(long, default_value = "manifest.json")]
    manifest: PathBuf,
    /// Адреса API
    #[arg(long, default_value = CURSEFORGE_API)]
    api_url: String,
    /// Докладний журнал
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn settings(&self) -> Settings {
        Settings {
            api_url: self.api_url.clone(),
            manifest: self.manifest.clone(),
            overrode: self.overrode,
            ..Default::default()
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

/// Only fatal errors make it out of here, every other step logs and moves on
fn run(cli: &Cli) -> Result<(), FetchError> {
    let settings = cli.settings();

    let manifest = Manifest::load(&settings.manifest)?;
    println!("Manifest Name: {}", manifest.name);

    let api_key = match resolve_api_key(cli.api_key.as_deref(), cli.env) {
        Ok(key) => key,
        Err(e) => {
            println!("{e}");
            return Ok(());
        }
    };
    debug!("API Key: {}", mask_key(&api_key));
    let client = CurseClient::with_base_url(&settings.api_url, api_key);
    debug!("Using API at {}", client.base_url());

    if cli.forge {
        tolerate(
            "Error downloading mod loader",
            install_mod_loader(&client, &manifest, &settings, ask_for_overwrite),
        )?;
    }

    if cli.no_download {
        println!("Завантаження файлів вимкнено.");
        return Ok(());
    }

    if let Some(summary) = tolerate(
        "Error resolving mod files",
        download_mods(&client, &manifest, &settings, ask_for_overwrite),
    )? {
        print!("{summary}");
    }

    Ok(())
}
