use clap::Parser;
use std::path::PathBuf;

use crate::error::NavError;
use crate::input::focus::{BlockTag, GridCoordinate, Tactical, Target};
use crate::input::key::KeyStroke;

/// Lot-focus: replay key strokes through the focus router over a docked
/// workspace and print where focus lands.
#[derive(Parser, Debug, Clone)]
#[command(name = "lot-focus")]
#[command(version)]
#[command(about = "Keyboard focus router for multi-lot production grids", long_about = None)]
pub struct Cli {
    /// Number of docked lots
    #[arg(long, default_value_t = 3)]
    pub lots: usize,

    /// Rows in each lot's principal block (0 leaves the block out)
    #[arg(long, default_value_t = 3)]
    pub principal_rows: usize,

    /// Rows in each lot's solo block (0 leaves the block out)
    #[arg(long, default_value_t = 2)]
    pub solo_rows: usize,

    /// Where focus starts: cell:L:R:C, toolbar:I, header:L:S, jump:I,
    /// add:L:TAG, trigger:L:TAG, trash:L:TAG:R or option:L:I
    #[arg(long, value_name = "LOCATION", value_parser = parse_location)]
    pub start: Option<Target>,

    /// Open a type menu before replaying: L:TAG:OPTIONS
    #[arg(long, value_name = "MENU", value_parser = parse_menu)]
    pub menu: Option<MenuSpec>,

    /// Space separated key strokes, e.g. "right S-tab A-n esc"
    #[arg(long, value_delimiter = ' ', num_args = 1..)]
    pub keys: Vec<KeyStroke>,

    /// Print one JSON object per key instead of text
    #[arg(long, default_value_t = false)]
    pub json: bool,

    /// Print the effective shortcut labels and exit
    #[arg(long, default_value_t = false)]
    pub labels: bool,

    /// Write default config files into the config directory and exit
    #[arg(long, default_value_t = false)]
    pub init_config: bool,

    /// Config directory (defaults to the platform config dir)
    #[arg(long, value_name = "DIR")]
    pub config_dir: Option<PathBuf>,

    /// Shortcut overrides file; replaces shortcuts.toml from the config dir
    #[arg(long, value_name = "FILE")]
    pub shortcuts: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error). Overrides config.
    #[arg(long)]
    pub log_level: Option<String>,
}

/// A type menu to render open under `block`'s trigger in `lot`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuSpec {
    pub lot: usize,
    pub block: BlockTag,
    pub options: usize,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

fn invalid(s: &str) -> NavError {
    NavError::InvalidLocation(s.to_string())
}

fn index(part: Option<&str>, whole: &str) -> Result<usize, NavError> {
    part.and_then(|p| p.parse().ok()).ok_or_else(|| invalid(whole))
}

fn tag(part: Option<&str>, whole: &str) -> Result<BlockTag, NavError> {
    part.filter(|p| !p.is_empty())
        .map(BlockTag::new)
        .ok_or_else(|| invalid(whole))
}

pub fn parse_location(s: &str) -> Result<Target, NavError> {
    let mut parts = s.split(':');
    let kind = parts.next().unwrap_or_default();

    let target = match kind {
        "cell" => {
            let (lot, row, cell) = (index(parts.next(), s)?, index(parts.next(), s)?, index(parts.next(), s)?);
            if cell >= GridCoordinate::CELLS_PER_ROW {
                return Err(invalid(s));
            }
            Target::Cell(GridCoordinate::new(lot, row, cell))
        }
        "toolbar" => Tactical::Toolbar { index: index(parts.next(), s)? }.into(),
        "header" => Tactical::Header {
            lot: index(parts.next(), s)?,
            slot: index(parts.next(), s)?,
        }
        .into(),
        "jump" => {
            let i = index(parts.next(), s)?;
            Tactical::JumpBar { index: i, lot: i }.into()
        }
        "option" => Tactical::TypeOption {
            lot: index(parts.next(), s)?,
            index: index(parts.next(), s)?,
        }
        .into(),
        "add" | "trigger" | "trash" => {
            let lot = index(parts.next(), s)?;
            let block = tag(parts.next(), s)?;
            match kind {
                "add" => Tactical::AddSize { lot, block }.into(),
                // Flags are refreshed from the rendered surface on focus.
                "trigger" => Tactical::TypeTrigger {
                    lot,
                    block,
                    principal: false,
                    expanded: false,
                }
                .into(),
                _ => Tactical::Trash {
                    lot,
                    block,
                    row: index(parts.next(), s)?,
                }
                .into(),
            }
        }
        _ => return Err(invalid(s)),
    };

    if parts.next().is_some() {
        return Err(invalid(s));
    }
    Ok(target)
}

pub fn parse_menu(s: &str) -> Result<MenuSpec, NavError> {
    let mut parts = s.split(':');
    let lot = index(parts.next(), s)?;
    let block = tag(parts.next(), s)?;
    let options = index(parts.next(), s)?;
    if parts.next().is_some() {
        return Err(invalid(s));
    }
    Ok(MenuSpec { lot, block, options })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::key::NavKey;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["lot-focus"]);
        assert_eq!(cli.lots, 3);
        assert_eq!(cli.principal_rows, 3);
        assert_eq!(cli.solo_rows, 2);
        assert!(cli.start.is_none());
        assert!(cli.keys.is_empty());
        assert!(!cli.json);
        assert!(cli.log_level.is_none());
    }

    #[test]
    fn test_keys_flag() {
        let cli = Cli::parse_from(["lot-focus", "--keys", "right S-tab A-n"]);
        assert_eq!(
            cli.keys,
            vec![
                KeyStroke::new(NavKey::Right),
                KeyStroke::shifted(NavKey::Tab),
                KeyStroke::alt('n'),
            ]
        );
    }

    #[test]
    fn test_bad_key_is_rejected() {
        assert!(Cli::try_parse_from(["lot-focus", "--keys", "pagedown"]).is_err());
    }

    #[test]
    fn test_config_dir_flag() {
        let cli = Cli::parse_from(["lot-focus", "--config-dir", "/tmp/test", "--json"]);
        assert_eq!(cli.config_dir, Some(PathBuf::from("/tmp/test")));
        assert!(cli.json);
    }

    #[rstest]
    #[case("cell:1:2:2", Target::Cell(GridCoordinate::new(1, 2, 2)))]
    #[case("toolbar:2", Tactical::Toolbar { index: 2 }.into())]
    #[case("header:2:0", Tactical::Header { lot: 2, slot: 0 }.into())]
    #[case("jump:1", Tactical::JumpBar { index: 1, lot: 1 }.into())]
    #[case("add:0:bulk", Tactical::AddSize { lot: 0, block: BlockTag::new("bulk") }.into())]
    #[case("trash:1:solo:4", Tactical::Trash { lot: 1, block: BlockTag::new("solo"), row: 4 }.into())]
    #[case("option:0:3", Tactical::TypeOption { lot: 0, index: 3 }.into())]
    fn test_parse_location(#[case] input: &str, #[case] expected: Target) {
        assert_eq!(parse_location(input).unwrap(), expected);
    }

    #[rstest]
    #[case("cell:1:2")]
    #[case("cell:0:0:3")]
    #[case("header:x:0")]
    #[case("add:0:")]
    #[case("toolbar:1:2")]
    #[case("sidebar:0")]
    fn test_parse_location_rejects(#[case] input: &str) {
        assert!(matches!(parse_location(input), Err(NavError::InvalidLocation(_))));
    }

    #[test]
    fn test_parse_menu() {
        assert_eq!(
            parse_menu("1:bulk:4").unwrap(),
            MenuSpec {
                lot: 1,
                block: BlockTag::new("bulk"),
                options: 4,
            }
        );
        assert!(parse_menu("1:bulk").is_err());
    }
}
