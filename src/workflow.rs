use crate::{api, cli, clipboard, config, numerales, tui};
use anyhow::Result;
use std::sync::Arc;

// Main orchestrator for the carpetas picker.
pub fn run_carpetas(cli_args: cli::Cli) -> Result<()> {
    // Step 1: Effective settings = config file overridden by CLI flags.
    let config_path = cli_args
        .config
        .clone()
        .unwrap_or_else(config::PickerConfig::default_path);
    let file_config = config::PickerConfig::load(&config_path)?;
    let settings = config::Settings::merge(&file_config, &cli_args)?;

    if let Some(numeral) = cli_args.numeral {
        if !numerales::is_valid(numeral) {
            anyhow::bail!(
                "Numeral {} is out of range ({}-{}).",
                numeral,
                numerales::NUMERAL_MIN,
                numerales::NUMERAL_MAX
            );
        }
    }

    // Step 2: One client for the portal's admin endpoint.
    let client = api::ApiClient::new(&settings.server, &settings.app, settings.timeout_secs)?;

    // Step 3: Dispatch to headless mode or the interactive TUI.
    if cli_args.headless {
        run_headless_mode(&client, &cli_args)
    } else {
        run_interactive_mode(client, &cli_args)
    }
}

// Fetch once and print the carpeta table; no TUI, no clipboard.
fn run_headless_mode(client: &api::ApiClient, cli_args: &cli::Cli) -> Result<()> {
    let numeral = cli_args
        .numeral
        .ok_or_else(|| anyhow::anyhow!("--headless requires --numeral to be specified."))?;

    let carpetas = client.carpetas_por_numeral(numeral)?;
    if carpetas.is_empty() {
        println!(
            "(No carpetas registered under numeral {} for app '{}')",
            numeral,
            client.app()
        );
        return Ok(());
    }

    // Server order, one row per carpeta.
    for carpeta in &carpetas {
        println!(
            "{}\t{}\t{}\t{}",
            carpeta.id, carpeta.nivel, carpeta.nombre, carpeta.ruta_completa
        );
    }
    Ok(())
}

fn run_interactive_mode(client: api::ApiClient, cli_args: &cli::Cli) -> Result<()> {
    let app = tui::TuiApp::new(cli_args.numeral, cli_args.carpeta);

    match tui::run_tui(app, Arc::new(client))? {
        tui::TuiOutcome::Cancelled => {
            println!("Selection cancelled. Exiting.");
            Ok(())
        }
        tui::TuiOutcome::Confirmed(None) => {
            println!("No carpeta was selected. Nothing copied.");
            std::process::exit(1);
        }
        tui::TuiOutcome::Confirmed(Some(carpeta)) => {
            perform_final_action(&carpeta, cli_args.dry_run)
        }
    }
}

// Final action: print for dry-run, otherwise hand the id to the clipboard.
fn perform_final_action(carpeta: &api::Carpeta, is_dry_run: bool) -> Result<()> {
    let payload = format!("{}\t{}", carpeta.id, carpeta.ruta_completa);
    if is_dry_run {
        println!("{}", payload);
        println!("(Dry run: clipboard not affected.)");
    } else {
        clipboard::copy_text_to_clipboard(payload)?;
        println!(
            "✅ Copied carpeta {} ({}) to the clipboard.",
            carpeta.id, carpeta.ruta_completa
        );
    }
    Ok(())
}
