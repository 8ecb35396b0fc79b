use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::fmt;
use std::str::FromStr;

use crate::error::NavError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NavKey {
    Up,
    Down,
    Left,
    Right,
    Enter,
    Tab,
    Escape,
    Char(char),
    Other,
}

impl NavKey {
    pub fn is_arrow(&self) -> bool {
        matches!(self, NavKey::Up | NavKey::Down | NavKey::Left | NavKey::Right)
    }
}

/// A key press as the router sees it: the key plus the two modifiers that
/// matter for navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyStroke {
    pub key: NavKey,
    pub shift: bool,
    pub alt: bool,
}

impl KeyStroke {
    pub fn new(key: NavKey) -> Self {
        Self {
            key,
            shift: false,
            alt: false,
        }
    }

    pub fn shifted(key: NavKey) -> Self {
        Self {
            key,
            shift: true,
            alt: false,
        }
    }

    pub fn alt(c: char) -> Self {
        Self {
            key: NavKey::Char(c),
            shift: false,
            alt: true,
        }
    }

    /// Parse `A-z`, `S-tab`, `right`, `ret` style notation.
    pub fn from_notation(s: &str) -> Option<Self> {
        let s = s.trim();
        if s.is_empty() {
            return None;
        }

        let mut shift = false;
        let mut alt = false;
        let mut remaining = s;
        loop {
            if let Some(rest) = remaining.strip_prefix("A-") {
                alt = true;
                remaining = rest;
            } else if let Some(rest) = remaining.strip_prefix("S-") {
                shift = true;
                remaining = rest;
            } else {
                break;
            }
        }

        let key = Self::parse_key_name(remaining)?;
        Some(Self { key, shift, alt })
    }

    fn parse_key_name(name: &str) -> Option<NavKey> {
        if name.chars().count() == 1 {
            return name.chars().next().map(NavKey::Char);
        }
        match name.to_lowercase().as_str() {
            "space" => Some(NavKey::Char(' ')),
            "tab" => Some(NavKey::Tab),
            "enter" | "ret" | "return" => Some(NavKey::Enter),
            "esc" | "escape" => Some(NavKey::Escape),
            "up" => Some(NavKey::Up),
            "down" => Some(NavKey::Down),
            "left" => Some(NavKey::Left),
            "right" => Some(NavKey::Right),
            _ => None,
        }
    }

    pub fn to_notation(&self) -> String {
        let mut result = String::new();
        if self.alt {
            result.push_str("A-");
        }
        if self.shift {
            result.push_str("S-");
        }

        let key_name = match self.key {
            NavKey::Char(' ') => "space".to_string(),
            NavKey::Char(c) => c.to_string(),
            NavKey::Tab => "tab".to_string(),
            NavKey::Enter => "ret".to_string(),
            NavKey::Escape => "esc".to_string(),
            NavKey::Up => "up".to_string(),
            NavKey::Down => "down".to_string(),
            NavKey::Left => "left".to_string(),
            NavKey::Right => "right".to_string(),
            NavKey::Other => "?".to_string(),
        };
        result.push_str(&key_name);
        result
    }
}

impl From<KeyEvent> for KeyStroke {
    fn from(event: KeyEvent) -> Self {
        let mut shift = event.modifiers.contains(KeyModifiers::SHIFT);
        let alt = event.modifiers.contains(KeyModifiers::ALT);
        let key = match event.code {
            KeyCode::Up => NavKey::Up,
            KeyCode::Down => NavKey::Down,
            KeyCode::Left => NavKey::Left,
            KeyCode::Right => NavKey::Right,
            KeyCode::Enter => NavKey::Enter,
            KeyCode::Tab => NavKey::Tab,
            KeyCode::BackTab => {
                shift = true;
                NavKey::Tab
            }
            KeyCode::Esc => NavKey::Escape,
            KeyCode::Char(c) => {
                if c.is_uppercase() {
                    shift = true;
                }
                NavKey::Char(c)
            }
            _ => NavKey::Other,
        };
        Self { key, shift, alt }
    }
}

impl FromStr for KeyStroke {
    type Err = NavError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_notation(s).ok_or_else(|| NavError::InvalidKey(s.to_string()))
    }
}

impl fmt::Display for KeyStroke {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_notation())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_notation() {
        let stroke = KeyStroke::from_notation("A-z").unwrap();
        assert_eq!(stroke.key, NavKey::Char('z'));
        assert!(stroke.alt);
        assert!(!stroke.shift);

        let stroke = KeyStroke::from_notation("S-tab").unwrap();
        assert_eq!(stroke.key, NavKey::Tab);
        assert!(stroke.shift);

        let stroke = KeyStroke::from_notation("ret").unwrap();
        assert_eq!(stroke.key, NavKey::Enter);

        let stroke = KeyStroke::from_notation("A-S-n").unwrap();
        assert!(stroke.alt && stroke.shift);
    }

    #[test]
    fn test_invalid_notation() {
        assert!(KeyStroke::from_notation("").is_none());
        assert!(matches!(
            "pagedown".parse::<KeyStroke>(),
            Err(NavError::InvalidKey(_))
        ));
    }

    #[test]
    fn test_notation_roundtrip() {
        for text in ["A-n", "S-tab", "right", "esc", "S-ret", "space"] {
            let stroke: KeyStroke = text.parse().unwrap();
            assert_eq!(stroke.to_notation(), text);
        }
    }

    #[test]
    fn test_backtab_becomes_shift_tab() {
        let event = KeyEvent::new(KeyCode::BackTab, KeyModifiers::SHIFT);
        assert_eq!(KeyStroke::from(event), KeyStroke::shifted(NavKey::Tab));
    }

    #[test]
    fn test_alt_char_event() {
        let event = KeyEvent::new(KeyCode::Char('N'), KeyModifiers::ALT | KeyModifiers::SHIFT);
        let stroke = KeyStroke::from(event);
        assert_eq!(stroke.key, NavKey::Char('N'));
        assert!(stroke.alt);
        assert!(stroke.shift);
    }
}
