use crate::config::Config;
use crate::fsops::{ensure_directory, ensure_directory_all, file_size};
use crate::models::{Args, Commands};
use crate::paths::build_path;
use anyhow::{Context, Result};
use clap::Parser;
use std::fs::File;
use std::path::{Path, PathBuf};

/// Main CLI entry point
pub fn run() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);
    execute(args)
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

/// Run a parsed command
pub fn execute(args: Args) -> Result<()> {
    let config = Config::discover(args.config.as_deref())?;

    match args.command {
        Commands::Dir { create } => {
            let dir = cache_dir(&config)?;
            if create {
                ensure_directory(&dir)?;
            }
            println!("{}", dir.display());
        }
        Commands::Path { name, dir } => {
            let dir = match dir {
                Some(dir) => dir,
                None => cache_dir(&config)?,
            };
            let path = build_path(&dir, name.as_bytes())
                .with_context(|| format!("Failed to build path for: {name}"))?;
            println!("{path}");
        }
        Commands::Mkdir { path, parents } => {
            if parents {
                ensure_directory_all(&path)?;
            } else {
                ensure_directory(&path)?;
            }
            log::debug!("Directory ready: {}", path.display());
        }
        Commands::Size { file } => {
            println!("{}", size_of(&file)?);
        }
    }

    Ok(())
}

fn cache_dir(config: &Config) -> Result<PathBuf> {
    let buf = config
        .resolve_cache_dir()
        .context("Failed to resolve cache directory")?;
    Ok(buf.as_path().to_path_buf())
}

/// Open `path` read-only and report its size
pub fn size_of(path: &Path) -> Result<u64> {
    let file =
        File::open(path).with_context(|| format!("Failed to open file: {}", path.display()))?;
    let size = file_size(&file)
        .with_context(|| format!("Failed to get file size: {}", path.display()))?;
    Ok(size)
}
