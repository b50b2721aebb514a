use clap::Parser;
use std::path::PathBuf;

/// carpetas – pick a transparency-portal carpeta by numeral, copy its id to clipboard
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Portal base URL (e.g. https://portal.example.gt). Overrides the config file.
    #[arg(long, value_name = "URL")]
    pub server: Option<String>,

    /// Admin application the carpetas belong to
    /// (transparencia, comude, rendicion_cuentas, informes_congreso).
    #[arg(long, value_name = "TAG")]
    pub app: Option<String>,

    /// Numeral (1-29) to preselect. The carpeta list is fetched immediately,
    /// the same as opening an existing record for editing.
    #[arg(long, value_name = "N")]
    pub numeral: Option<u32>,

    /// Previously saved carpeta id. Re-selected after the fetch if the
    /// carpeta still exists under the chosen numeral.
    #[arg(long, value_name = "ID")]
    pub carpeta: Option<u64>,

    /// Run without the TUI: fetch the carpetas for --numeral and print them.
    /// Requires --numeral to be specified.
    #[arg(long)]
    pub headless: bool,

    /// Print the confirmed selection instead of copying it to the clipboard.
    #[arg(long)]
    pub dry_run: bool,

    /// Alternate config file (defaults to ~/.carpetas/config.toml).
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// HTTP timeout in seconds.
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,
}
