// SPDX-License-Identifier: MPL-2.0
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use vitrine::config::{self, Config};
use vitrine::error::{Error, Result};
use vitrine::web::{self, AppState};

const HELP: &str = "\
vitrine - localized portfolio website

USAGE:
  vitrine [OPTIONS]

OPTIONS:
  --config <FILE>         Read settings from FILE instead of the config directory
  --host <HOST>           Listen host
  --port <PORT>           Listen port (also read from $PORT)
  --locales-dir <DIR>     Load <tag>.ftl translations from DIR
  --projects-file <FILE>  Load the project list from FILE
  --write-config          Save the effective settings (to --config FILE if given) and exit
  -h, --help              Print this help
";

struct Flags {
    config: Option<PathBuf>,
    host: Option<String>,
    port: Option<u16>,
    locales_dir: Option<PathBuf>,
    projects_file: Option<PathBuf>,
    write_config: bool,
}

fn parse_flags() -> std::result::Result<Option<Flags>, pico_args::Error> {
    let mut args = pico_args::Arguments::from_env();
    if args.contains(["-h", "--help"]) {
        print!("{}", HELP);
        return Ok(None);
    }

    let flags = Flags {
        config: args.opt_value_from_str("--config")?,
        host: args.opt_value_from_str("--host")?,
        port: args.opt_value_from_str("--port")?,
        locales_dir: args.opt_value_from_str("--locales-dir")?,
        projects_file: args.opt_value_from_str("--projects-file")?,
        write_config: args.contains("--write-config"),
    };

    let remaining = args.finish();
    if !remaining.is_empty() {
        tracing::warn!(?remaining, "ignoring unexpected arguments");
    }
    Ok(Some(flags))
}

fn load_config(flags: &Flags) -> Result<Config> {
    let mut config = match &flags.config {
        Some(path) => config::load_from_path(path)?,
        None => {
            let (config, warning) = config::load();
            if let Some(warning) = warning {
                tracing::warn!("{}, using defaults", warning);
            }
            config
        }
    };

    config.apply_env_overrides();

    if let Some(host) = &flags.host {
        config.server.host = host.clone();
    }
    if let Some(port) = flags.port {
        config.server.port = port;
    }
    if let Some(dir) = &flags.locales_dir {
        config.content.locales_dir = Some(dir.clone());
    }
    if let Some(file) = &flags.projects_file {
        config.content.projects_file = Some(file.clone());
    }
    Ok(config)
}

async fn run(flags: Flags) -> Result<()> {
    let config = load_config(&flags)?;

    if flags.write_config {
        config::save_to(&config, flags.config.as_deref())?;
        tracing::info!("Settings saved");
        return Ok(());
    }

    let state = AppState::from_config(&config)?;
    web::serve(Arc::new(state), &config.listen_address()).await
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("vitrine=info")),
        )
        .init();

    let flags = match parse_flags() {
        Ok(Some(flags)) => flags,
        Ok(None) => return ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{}", Error::Config(err.to_string()));
            eprint!("{}", HELP);
            return ExitCode::from(2);
        }
    };

    match run(flags).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{}", err);
            ExitCode::FAILURE
        }
    }
}
