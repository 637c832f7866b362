use anyhow::{Context, Result, anyhow};
use manga_reader_ui::{bindings, config};
use std::path::{Path, PathBuf};
use tracing::{error, info};

const DEFAULT_OUT_DIR: &str = "ui/src/generated";
const CONFIG_PATH_ENV: &str = "MANGA_READER_CONFIG_PATH";

fn main() {
    #[cfg(not(target_arch = "wasm32"))]
    let reload_handle = manga_reader_ui::logging::init_tracing(config::LogLevel::default());

    let config_path = std::env::var_os(CONFIG_PATH_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("conf/config.toml"));
    let config = config::load_config(&config_path);

    #[cfg(not(target_arch = "wasm32"))]
    if let Some(handle) = &reload_handle {
        manga_reader_ui::logging::set_log_level(handle, config.log_level);
    }
    #[cfg(target_arch = "wasm32")]
    let _ = config;

    if let Err(err) = run() {
        error!("{err:?}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let out_dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUT_DIR));
    export(&out_dir)?;
    info!(out_dir = %out_dir.display(), "Exported TS bindings");
    println!("exported TS bindings to {}", out_dir.display());
    Ok(())
}

fn export(out_dir: &Path) -> Result<()> {
    bindings::export_ts_bindings(out_dir)
        .map_err(|err| anyhow!(err))
        .with_context(|| format!("failed to export TS bindings to {}", out_dir.display()))
}
