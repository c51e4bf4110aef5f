use std::io::Write;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use pdfpeek_core::config_file::{self, ConfigFile};
use pdfpeek_mupdf::MupdfBackend;

mod output;
mod settings;

use output::ColorMode;
use settings::Overrides;

/// pdfpeek - print a text preview of each PDF in a batch
#[derive(Parser, Debug)]
#[command(version, about, long_about = None, args_conflicts_with_subcommands = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    #[command(flatten)]
    run: RunArgs,
}

#[derive(Args, Debug)]
struct RunArgs {
    /// File names, relative to the base directory, in processing order
    files: Vec<String>,

    /// Directory the file names are resolved against
    #[arg(short = 'd', long)]
    base_dir: Option<PathBuf>,

    /// Config file to use instead of the platform and ./.pdfpeek.toml lookup
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Characters to print per document (0 = no limit)
    #[arg(short = 'n', long)]
    limit: Option<usize>,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write a template config file
    InitConfig {
        /// Where to write it (default: the platform config path)
        path: Option<PathBuf>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Some(Command::InitConfig { path, force }) => init_config(path, force),
        None => run(cli.run),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(args: RunArgs) -> anyhow::Result<()> {
    let file = match &args.config {
        Some(path) => config_file::load_strict(path)?,
        None => config_file::load_config(),
    };

    let overrides = Overrides {
        base_dir: args.base_dir,
        files: args.files,
        preview_limit: args.limit,
    }
    .with_env();
    let config = settings::resolve(overrides, &file);
    let color = ColorMode(settings::use_color(args.no_color, &file));

    if config.files.is_empty() {
        anyhow::bail!(
            "No files to process. Pass file names, or list them under [batch] files in {} or {}",
            config_file::LOCAL_CONFIG_NAME,
            config_file::config_path()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "the platform config file".to_string())
        );
    }
    tracing::debug!(base_dir = %config.base_dir.display(), files = config.files.len(), "starting batch");

    let backend = MupdfBackend::new();
    let stdout = std::io::stdout();
    let mut writer = stdout.lock();
    let mut write_error = None;

    pdfpeek_core::run_batch(&config, &backend, |report| {
        if write_error.is_some() {
            return;
        }
        if let Err(e) = output::print_report(&mut writer, report, &config, color) {
            write_error = Some(e);
        }
    });

    if let Some(e) = write_error {
        return Err(e.into());
    }
    writer.flush()?;
    Ok(())
}

fn init_config(path: Option<PathBuf>, force: bool) -> anyhow::Result<()> {
    let path = match path {
        Some(p) => p,
        None => config_file::config_path().ok_or(config_file::ConfigError::NoConfigDir)?,
    };
    if path.exists() && !force {
        anyhow::bail!(
            "{} already exists. Re-run with --force to overwrite it",
            path.display()
        );
    }

    let template: ConfigFile = config_file::template();
    config_file::save_config(&template, &path)?;
    println!("Wrote config to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_files_and_flags() {
        let cli = Cli::try_parse_from([
            "pdfpeek", "-d", "/docs", "-n", "500", "--no-color", "a.pdf", "b.pdf",
        ])
        .unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.run.base_dir, Some(PathBuf::from("/docs")));
        assert_eq!(cli.run.limit, Some(500));
        assert!(cli.run.no_color);
        assert_eq!(cli.run.files, vec!["a.pdf".to_string(), "b.pdf".to_string()]);
    }

    #[test]
    fn parses_init_config() {
        let cli = Cli::try_parse_from(["pdfpeek", "init-config", "/tmp/x.toml", "--force"]).unwrap();
        match cli.command {
            Some(Command::InitConfig { path, force }) => {
                assert_eq!(path, Some(PathBuf::from("/tmp/x.toml")));
                assert!(force);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn init_config_refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "").unwrap();

        assert!(init_config(Some(path.clone()), false).is_err());
        init_config(Some(path.clone()), true).unwrap();
        assert_eq!(
            config_file::load_strict(&path).unwrap(),
            config_file::template()
        );
    }
}
