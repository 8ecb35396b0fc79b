use std::path::Path;

use color_eyre::eyre::{eyre, Result, WrapErr};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use lot_focus::action::ShortcutAction;
use lot_focus::cli::Cli;
use lot_focus::config::{read_shortcuts, ConfigManager};
use lot_focus::locator::ElementLocator;
use lot_focus::nav::FocusRouter;
use lot_focus::replay::replay;
use lot_focus::surface::{Surface, SurfaceLayout};

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse_args();

    let config = match &cli.config_dir {
        Some(dir) => ConfigManager::with_dir(dir),
        None => ConfigManager::new()?,
    };
    let general = &config.app_config().general;
    let level = cli.log_level.as_deref().unwrap_or(&general.log_level);
    let _guard = init_logging(level, general.log_file.as_deref())?;

    if cli.init_config {
        config.write_default_configs()?;
        println!("Wrote default config to {}", config.config_dir().display());
        return Ok(());
    }

    let shortcuts = match &cli.shortcuts {
        Some(path) => read_shortcuts(path)?,
        None => config.shortcuts().clone(),
    };
    shortcuts.warn_conflicts();
    let mut router = FocusRouter::new(shortcuts);

    if cli.labels {
        for action in ShortcutAction::ALL {
            println!("{:<22} Alt+{}", action.as_str(), router.label(*action));
        }
        return Ok(());
    }

    let mut layout = SurfaceLayout::docked(cli.lots, cli.principal_rows, cli.solo_rows);
    if let Some(menu) = &cli.menu {
        layout.open_type_menu(menu.lot, menu.block.clone(), menu.options);
    }
    let mut surface = Surface::new(layout);
    if let Some(start) = &cli.start {
        surface.focus(start);
        if !surface.focused().is_managed() {
            tracing::warn!("Start location {} is not on the surface", start);
        }
    }

    tracing::info!(
        "Replaying {} keys over {} lots ({} + {} rows)",
        cli.keys.len(),
        cli.lots,
        cli.principal_rows,
        cli.solo_rows
    );

    for line in replay(&mut router, &mut surface, &cli.keys) {
        if cli.json {
            println!("{}", serde_json::to_string(&line)?);
        } else {
            println!("{}", line);
        }
    }

    Ok(())
}

/// Install the global subscriber. Logs go to stderr unless a log file is
/// configured; the returned guard flushes the file writer on drop.
fn init_logging(level: &str, log_file: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_new(level).wrap_err_with(|| format!("Invalid log level {:?}", level))?;

    let Some(path) = log_file else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
        return Ok(None);
    };

    let file_name = path
        .file_name()
        .ok_or_else(|| eyre!("Log file path has no file name: {}", path.display()))?;
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let (writer, guard) = tracing_appender::non_blocking(tracing_appender::rolling::never(dir, file_name));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .init();
    Ok(Some(guard))
}
