//! RebuildLab - console front end
//!
//! # Overview
//!
//! This binary drives the library headlessly. It initializes:
//! - Settings ([`ConfigManager`] - `RebuildLab Data/RebuildLab Settings.yaml` + `REBUILDLAB_*` env)
//! - Logging infrastructure (daily-rotated file + optional console output)
//! - The parameter store ([`ReactiveConfigStore`])
//! - The controller ([`LabController`]) over an in-memory tab container ([`TextTabs`])
//!
//! # Execution Flow
//!
//! 1. Load settings
//! 2. Initialize logging → `<log_dir>/rebuildlab.<date>`
//! 3. Build the store from the declared parameters
//! 4. Create the controller (Configuration + Buttons tabs)
//! 5. Read commands from stdin until EOF or `quit`
//! 6. Persist committed values as new defaults (if `persist_values` is set)

use anyhow::{Context, Result};
use rebuildlab::ui::console::HELP;
use rebuildlab::ui::{Command, CommandParser, LabController, TextTabs};
use rebuildlab::{APP_NAME, ConfigManager, ReactiveConfigStore, VERSION};
use std::io::{self, BufRead, Write};
use std::rc::Rc;

const CONFIG_DIR: &str = "RebuildLab Data";

fn main() -> Result<()> {
    let config_manager = ConfigManager::new(CONFIG_DIR)?;
    let settings = config_manager.load_settings()?;

    // Held until exit so buffered log lines are flushed
    let _log_guard = rebuildlab::logging::setup_logging(
        &settings.log_dir,
        APP_NAME,
        settings.debug_mode,
        settings.console_log,
    )?;

    tracing::info!("Starting {} v{}", APP_NAME, VERSION);

    let store = Rc::new(
        ReactiveConfigStore::from_specs(settings.parameters.clone())
            .context("Invalid parameter declarations in settings")?,
    );
    let controller = LabController::new(Rc::clone(&store), TextTabs::new())
        .context("Cannot build the button pane from the declared parameters")?;

    println!("{} v{} - type 'help' for commands", APP_NAME, VERSION);
    println!("{}", controller.host().render_all());

    run_console(&controller)?;

    if settings.persist_values {
        config_manager.save_settings(&settings.with_current_values(&store.snapshot()))?;
    }

    tracing::info!(
        "Shutdown complete after {} button pane rebuilds",
        controller.rebuild_count()
    );
    Ok(())
}

/// Read and execute commands until EOF or `quit`.
fn run_console(controller: &LabController<TextTabs>) -> Result<()> {
    let parser = CommandParser::new();
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("> ");
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }

        let command = match parser.parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                println!("{e}");
                continue;
            }
        };

        if command == Command::Quit {
            break;
        }
        execute(controller, command);
    }

    Ok(())
}

fn execute(controller: &LabController<TextTabs>, command: Command) {
    match command {
        Command::Edit { name, text } => {
            if let Err(e) = controller.set_text(&name, text) {
                println!("{e}");
            }
        }
        Command::Reconfigure => match controller.reconfigure() {
            Ok(changes) if changes.is_empty() => println!("Nothing changed"),
            Ok(changes) => {
                for change in changes {
                    println!("{}: {} -> {}", change.name, change.old, change.new);
                }
            }
            Err(e) => println!("Not applied: {e}"),
        },
        Command::Reset => {
            let changes = controller.reset();
            println!("Reset {} parameters", changes.len());
        }
        Command::Click(index) => match controller.click(index) {
            Some(count) => println!("Button {index}: {count}"),
            None => println!("No button {index} (pane has {})", controller.buttons().len()),
        },
        Command::Tick => controller.tick(),
        Command::Show(None) => println!("{}", controller.host().render_all()),
        Command::Show(Some(tab)) => match controller.host().content(&tab) {
            Some(content) => println!("{content}"),
            None => println!("No tab '{tab}'"),
        },
        Command::Params => {
            for param in controller.store().parameters() {
                println!("{} = {} (default {})", param.name, param.value, param.default);
            }
        }
        Command::Help => println!("{HELP}"),
        Command::Quit => {}
    }
}
