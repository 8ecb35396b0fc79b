// Key replay over an in-memory surface, one trace line per stroke.

use serde::Serialize;
use std::fmt;

use crate::input::key::KeyStroke;
use crate::nav::{FocusRouter, Outcome};
use crate::surface::Surface;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TraceLine {
    pub key: String,
    pub consumed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stage: Option<&'static str>,
    /// Focus after the stroke (and after any menu-close refocus).
    pub focus: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refocused: Option<String>,
}

impl fmt::Display for TraceLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status = match (self.consumed, self.stage) {
            (true, Some(stage)) => stage,
            (true, None) => "consumed",
            (false, _) => "pass",
        };
        write!(
            f,
            "{:<8} {:<9} {}",
            self.key,
            status,
            self.focus.as_deref().unwrap_or("-")
        )?;
        if let Some(trigger) = &self.refocused {
            write!(f, "  (menu closed, back to {})", trigger)?;
        }
        Ok(())
    }
}

/// Feed `keys` through `router`, committing menu closes between strokes
/// the way a host would after its next render.
pub fn replay(router: &mut FocusRouter, surface: &mut Surface, keys: &[KeyStroke]) -> Vec<TraceLine> {
    keys.iter()
        .map(|stroke| {
            let outcome = router.handle_key(*stroke, surface);
            let refocused = if surface.commit_menu_close() {
                router.menu_closed(surface)
            } else {
                None
            };
            let stage = match &outcome {
                Outcome::Consumed { stage, .. } => Some(stage.as_str()),
                Outcome::PassThrough => None,
            };
            TraceLine {
                key: stroke.to_notation(),
                consumed: outcome.is_consumed(),
                stage,
                focus: surface.focused_target().map(ToString::to_string),
                refocused: refocused.map(|t| t.to_string()),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::focus::{BlockTag, GridCoordinate, Tactical, Target};
    use crate::input::key::NavKey;
    use crate::locator::ElementLocator;
    use crate::surface::SurfaceLayout;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_replay_grid_moves() {
        let mut surface = Surface::new(SurfaceLayout::docked(3, 3, 2));
        surface.focus(&Target::Cell(GridCoordinate::new(1, 2, 2)));
        let mut router = FocusRouter::default();

        let lines = replay(
            &mut router,
            &mut surface,
            &[KeyStroke::new(NavKey::Right), KeyStroke::new(NavKey::Char('4'))],
        );
        assert_eq!(
            lines[0],
            TraceLine {
                key: "right".to_string(),
                consumed: true,
                stage: Some("arrow"),
                focus: Some("cell(lot 2, row 2, cell 0)".to_string()),
                refocused: None,
            }
        );
        assert!(!lines[1].consumed);
        assert_eq!(lines[1].to_string(), "4        pass      cell(lot 2, row 2, cell 0)");
    }

    #[test]
    fn test_replay_commits_menu_close() {
        let mut layout = SurfaceLayout::docked(1, 2, 0);
        layout.open_type_menu(0, BlockTag::new("bulk"), 3);
        let mut surface = Surface::new(layout);
        surface.focus(&Target::Tactical(Tactical::TypeOption { lot: 0, index: 0 }));
        let mut router = FocusRouter::default();

        let lines = replay(&mut router, &mut surface, &[KeyStroke::new(NavKey::Escape)]);
        assert_eq!(lines[0].stage, Some("escape"));
        assert_eq!(
            lines[0].refocused.as_deref(),
            Some("type-trigger(lot 0, bulk, principal)")
        );
        assert!(surface.layout().open_menu.is_none());
    }

    #[test]
    fn test_trace_line_json() {
        let line = TraceLine {
            key: "tab".to_string(),
            consumed: false,
            stage: None,
            focus: None,
            refocused: None,
        };
        assert_eq!(
            serde_json::to_string(&line).unwrap(),
            r#"{"key":"tab","consumed":false,"focus":null}"#
        );
    }
}
