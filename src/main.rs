//! avfs-open - open archives as directories through AVFS.
//!
//! Usage:
//!   avfs-open                      # browse the current directory
//!   avfs-open browse ~/Downloads   # browse elsewhere; `m` opens the menu
//!   avfs-open open book.cbr        # mount ~/.avfs and open the archive
//!   avfs-open path data.tar.gz     # print the virtual path only
//!
//! `open` fits a file manager's "custom action" slot when the host has no
//! native extension support.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use avfs_open::{
    config::Config,
    fs::{DetectedFile, FileInfo},
    menu::{AvfsMenuProvider, MenuProvider},
    ui,
};

#[derive(Parser, Debug)]
#[command(name = "avfs-open")]
#[command(about = "Mount archives with AVFS and open them as directories")]
struct Args {
    /// Config file (default: <config dir>/avfs-open/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// AVFS mount root (default: ~/.avfs)
    #[arg(long, global = true)]
    mount_root: Option<String>,

    /// Command that mounts AVFS (default: mountavfs). Split on whitespace;
    /// put arguments containing spaces in the config file's `mount_command` list
    #[arg(long, global = true, value_name = "CMD")]
    mount_command: Option<String>,

    /// File manager to open the virtual directory with (default: nautilus).
    /// Split on whitespace; put arguments containing spaces in the config
    /// file's `file_manager` list
    #[arg(long, global = true, value_name = "CMD")]
    file_manager: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Browse a directory and open archives from the context menu
    Browse {
        /// Directory to start in
        #[arg(default_value = ".")]
        dir: PathBuf,
    },
    /// Mount AVFS if needed and open FILE in a new file manager window
    Open {
        file: PathBuf,
        /// Open even when the file type has no handler (generic `#` mount)
        #[arg(long)]
        force: bool,
    },
    /// Print FILE's path under the AVFS mount root
    Path { file: PathBuf },
    /// Print the menu items offered for a selection
    Menu {
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// List the MIME type to handler table
    Handlers,
}

impl Args {
    fn config(&self) -> Result<Config> {
        let mut config = Config::load_or_default(self.config.as_deref())?;
        if let Some(root) = &self.mount_root {
            config.mount_root = Some(root.clone());
        }
        if let Some(cmd) = &self.mount_command {
            config.mount_command = split_argv(cmd);
        }
        if let Some(cmd) = &self.file_manager {
            config.file_manager = split_argv(cmd);
        }
        Ok(config)
    }
}

/// Split a command-line override into an argv. No shell quoting: the config
/// file's argv lists cover arguments with spaces.
fn split_argv(cmd: &str) -> Vec<String> {
    cmd.split_whitespace().map(str::to_string).collect()
}

fn init_tracing(browsing: bool) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let filter =
        || EnvFilter::try_from_default_env().unwrap_or_else(|_| "avfs_open=info,warn".into());

    if browsing {
        // The terminal belongs to the UI: log to a file instead
        let log_dir = dirs::cache_dir()
            .unwrap_or_else(std::env::temp_dir)
            .join("avfs-open");
        let file_appender = tracing_appender::rolling::never(&log_dir, "avfs-open.log");
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
        tracing_subscriber::registry()
            .with(filter())
            .with(fmt::layer().with_writer(non_blocking).with_ansi(false))
            .init();
        Some(guard)
    } else {
        tracing_subscriber::registry()
            .with(filter())
            .with(fmt::layer().with_writer(std::io::stderr))
            .init();
        None
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    let browsing = matches!(args.command, None | Some(Command::Browse { .. }));
    let _guard = init_tracing(browsing);

    let config = args.config()?;
    tracing::debug!(?config, "configuration");
    let provider = AvfsMenuProvider::from_config(&config)?;

    match args.command {
        None => ui::run(PathBuf::from("."), provider),
        Some(Command::Browse { dir }) => ui::run(dir, provider),
        Some(Command::Open { file, force }) => {
            let file = DetectedFile::detect(&file)
                .with_context(|| format!("cannot read {}", file.display()))?;
            let activation = match provider.file_items(std::slice::from_ref(&file)).first() {
                Some(item) => provider.activate(item)?,
                None if force => provider.activate_file(&file)?,
                None => bail!(
                    "{} ({}) is not a supported archive; use --force to try a generic mount",
                    file.path().display(),
                    file.file_type().mime
                ),
            };
            println!("{}", activation.virtual_path.display());
            Ok(())
        }
        Some(Command::Path { file }) => {
            let file = DetectedFile::detect(&file)
                .with_context(|| format!("cannot read {}", file.display()))?;
            println!("{}", provider.virtual_path_for(&file).display());
            Ok(())
        }
        Some(Command::Menu { files }) => {
            let selection = files
                .iter()
                .map(|p| {
                    DetectedFile::detect(p).with_context(|| format!("cannot read {}", p.display()))
                })
                .collect::<Result<Vec<_>>>()?;
            for item in provider.file_items(&selection) {
                println!("{}\t{}\t{}\t{}", item.name, item.display_label(), item.icon, item.tip);
            }
            Ok(())
        }
        Some(Command::Handlers) => {
            for entry in provider.handlers().entries() {
                println!("{:<40} {}", entry.mime, entry.suffix);
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrides_split_on_whitespace() {
        assert_eq!(split_argv("  nautilus   --new-window "), vec!["nautilus", "--new-window"]);
        assert!(split_argv("   ").is_empty());
    }

    #[test]
    fn command_line_overrides_replace_config_argv() {
        let args = Args::parse_from([
            "avfs-open",
            "--config",
            "/nonexistent/avfs-open.toml",
            "--mount-command",
            "mountavfs -o allow_other",
            "--file-manager",
            "thunar",
            "handlers",
        ]);
        let config = args.config().unwrap();
        assert_eq!(config.mount_command, vec!["mountavfs", "-o", "allow_other"]);
        assert_eq!(config.file_manager, vec!["thunar"]);
    }

    #[test]
    fn help_explains_whitespace_splitting() {
        use clap::CommandFactory;
        let help = Args::command().render_long_help().to_string();
        assert!(help.contains("Split on whitespace"));
    }
}
