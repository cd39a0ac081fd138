//! Keybinding configuration: parse `keybinds.conf`, provide defaults, and map keys to actions.
//!
//! Only normal-mode keys are configurable. Text entry in the search prompt and
//! in dialogs always uses the literal keys typed.

use std::collections::HashMap;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Semantic keyboard actions that can be bound to key combinations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum KeyAction {
    Quit,
    /// Focus the search prompt.
    StartSearch,
    /// Drop the current search term.
    ClearSearch,
    NewDriver,
    EditSelection,
    DeleteSelection,
    MoveUp,
    MoveDown,
    PrevPage,
    NextPage,
    /// Step through the offered page sizes.
    CyclePageSize,
    OpenHelp,
    ToggleKeybindsPane,
    Ignore,
}

/// Config-file names, also used for display.
const ACTION_NAMES: [(KeyAction, &str); 14] = [
    (KeyAction::Quit, "Quit"),
    (KeyAction::StartSearch, "StartSearch"),
    (KeyAction::ClearSearch, "ClearSearch"),
    (KeyAction::NewDriver, "NewDriver"),
    (KeyAction::EditSelection, "EditSelection"),
    (KeyAction::DeleteSelection, "DeleteSelection"),
    (KeyAction::MoveUp, "MoveUp"),
    (KeyAction::MoveDown, "MoveDown"),
    (KeyAction::PrevPage, "PrevPage"),
    (KeyAction::NextPage, "NextPage"),
    (KeyAction::CyclePageSize, "CyclePageSize"),
    (KeyAction::OpenHelp, "OpenHelp"),
    (KeyAction::ToggleKeybindsPane, "ToggleKeybindsPane"),
    (KeyAction::Ignore, "Ignore"),
];

/// Named keys understood in a KeySpec besides single characters.
const KEY_NAMES: [(KeyCode, &str); 13] = [
    (KeyCode::Enter, "Enter"),
    (KeyCode::Delete, "Delete"),
    (KeyCode::Esc, "Esc"),
    (KeyCode::Tab, "Tab"),
    (KeyCode::BackTab, "BackTab"),
    (KeyCode::Up, "Up"),
    (KeyCode::Down, "Down"),
    (KeyCode::Left, "Left"),
    (KeyCode::Right, "Right"),
    (KeyCode::PageUp, "PageUp"),
    (KeyCode::PageDown, "PageDown"),
    (KeyCode::Home, "Home"),
    (KeyCode::End, "End"),
];

/// Canonical mapping from `(KeyModifiers, KeyCode)` pairs to [`KeyAction`]s.
#[derive(Clone, Debug)]
pub struct Keymap {
    bindings: HashMap<(KeyModifiers, KeyCode), KeyAction>,
}

impl Keymap {
    /// Arrow keys plus vim-style hjkl for movement, single letters for actions.
    pub fn new_defaults() -> Self {
        use KeyCode::*;
        use KeyModifiers as M;
        let defaults = [
            ((M::NONE, Char('q')), KeyAction::Quit),
            ((M::CONTROL, Char('c')), KeyAction::Quit),
            ((M::NONE, Char('/')), KeyAction::StartSearch),
            ((M::NONE, Esc), KeyAction::ClearSearch),
            ((M::NONE, Char('n')), KeyAction::NewDriver),
            ((M::NONE, Char('e')), KeyAction::EditSelection),
            ((M::NONE, Enter), KeyAction::EditSelection),
            ((M::NONE, Char('d')), KeyAction::DeleteSelection),
            ((M::NONE, Delete), KeyAction::DeleteSelection),
            ((M::NONE, Up), KeyAction::MoveUp),
            ((M::NONE, Char('k')), KeyAction::MoveUp),
            ((M::NONE, Down), KeyAction::MoveDown),
            ((M::NONE, Char('j')), KeyAction::MoveDown),
            ((M::NONE, Left), KeyAction::PrevPage),
            ((M::NONE, Char('h')), KeyAction::PrevPage),
            ((M::NONE, PageUp), KeyAction::PrevPage),
            ((M::NONE, Right), KeyAction::NextPage),
            ((M::NONE, Char('l')), KeyAction::NextPage),
            ((M::NONE, PageDown), KeyAction::NextPage),
            ((M::NONE, Char('p')), KeyAction::CyclePageSize),
            ((M::NONE, Char('?')), KeyAction::OpenHelp),
            // Terminals disagree on whether Shift is reported with uppercase letters
            ((M::NONE, Char('K')), KeyAction::ToggleKeybindsPane),
            ((M::SHIFT, Char('K')), KeyAction::ToggleKeybindsPane),
        ];
        Self {
            bindings: defaults.into_iter().collect(),
        }
    }

    /// Load `path`, or write the defaults there if it does not exist.
    pub fn load_or_init(path: &str) -> Self {
        if std::path::Path::new(path).exists() {
            return Self::from_file(path).unwrap_or_default();
        }
        let km = Self::default();
        if let Err(e) = km.write_file(path) {
            tracing::warn!(path, error = %e, "could not write default keybindings");
        }
        km
    }

    pub fn from_file(path: &str) -> Option<Self> {
        std::fs::read_to_string(path).ok().map(|c| Self::parse(&c))
    }

    /// Apply `<Action> = <KeySpec>` lines on top of the defaults.
    pub fn parse(contents: &str) -> Self {
        let mut map = Self::default();
        for raw in contents.lines() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((lhs, rhs)) = line.split_once('=') else {
                continue;
            };
            if let (Some(action), Some(key)) = (parse_action(lhs), parse_key(rhs)) {
                map.bindings.insert(key, action);
            } else {
                tracing::warn!(line, "ignoring unrecognised keybinding");
            }
        }
        map
    }

    /// Export every binding, grouped by action, with a short header.
    pub fn write_file(&self, path: &str) -> std::io::Result<()> {
        use std::fmt::Write as _;
        let mut buf = String::new();
        buf.push_str("# driver-manager keybindings\n");
        buf.push_str("# Format: <Action> = <KeySpec>\n");
        buf.push_str("# KeySpec: a single character, Ctrl+<key>, Shift+<key>, or one of Enter, Esc, Tab, BackTab, Up, Down, Left, Right, PageUp, PageDown, Home, End, Delete\n");
        let names: Vec<&str> = ACTION_NAMES.iter().map(|(_, n)| *n).collect();
        let _ = writeln!(&mut buf, "# Actions: {}\n", names.join(", "));

        let mut all = self.all_bindings();
        all.sort_by(|a, b| {
            a.1.cmp(&b.1)
                .then_with(|| Self::format_key(a.0.0, a.0.1).cmp(&Self::format_key(b.0.0, b.0.1)))
        });
        for ((mods, code), action) in all {
            let _ = writeln!(&mut buf, "{} = {}", format_action(action), Self::format_key(mods, code));
        }
        std::fs::write(path, buf)
    }

    pub fn resolve(&self, key: &KeyEvent) -> Option<KeyAction> {
        self.bindings.get(&(key.modifiers, key.code)).copied()
    }

    pub fn all_bindings(&self) -> Vec<((KeyModifiers, KeyCode), KeyAction)> {
        self.bindings.iter().map(|(k, v)| (*k, *v)).collect()
    }

    /// Keys bound to `action`, formatted and sorted, for help screens.
    pub fn keys_for(&self, action: KeyAction) -> Vec<String> {
        let mut keys: Vec<String> = self
            .bindings
            .iter()
            .filter(|(_, a)| **a == action)
            .map(|((m, c), _)| Self::format_key(*m, *c))
            .collect();
        keys.sort();
        keys.dedup();
        keys
    }

    /// Human-readable spec like "Ctrl+c", "PageDown", "K".
    pub fn format_key(mods: KeyModifiers, code: KeyCode) -> String {
        let base = KEY_NAMES
            .iter()
            .find(|(c, _)| *c == code)
            .map(|(_, n)| n.to_string())
            .unwrap_or_else(|| match code {
                KeyCode::Char(c) => c.to_string(),
                other => format!("{:?}", other),
            });
        if mods.contains(KeyModifiers::CONTROL) {
            format!("Ctrl+{}", base)
        } else if mods.contains(KeyModifiers::SHIFT) && !matches!(code, KeyCode::Char(_)) {
            format!("Shift+{}", base)
        } else {
            base
        }
    }
}

impl Default for Keymap {
    fn default() -> Self {
        Self::new_defaults()
    }
}

fn parse_key(spec: &str) -> Option<(KeyModifiers, KeyCode)> {
    let mut rest = spec.trim();
    let mut mods = KeyModifiers::NONE;
    loop {
        if let Some(after) = rest.strip_prefix("Ctrl+") {
            mods |= KeyModifiers::CONTROL;
            rest = after;
        } else if let Some(after) = rest.strip_prefix("Shift+") {
            mods |= KeyModifiers::SHIFT;
            rest = after;
        } else {
            break;
        }
    }
    if let Some((code, _)) = KEY_NAMES.iter().find(|(_, n)| *n == rest) {
        return Some((mods, *code));
    }
    if rest == "Escape" {
        return Some((mods, KeyCode::Esc));
    }
    let mut chars = rest.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some((mods, KeyCode::Char(c))),
        _ => None,
    }
}

fn parse_action(s: &str) -> Option<KeyAction> {
    let s = s.trim();
    ACTION_NAMES
        .iter()
        .find(|(_, name)| *name == s)
        .map(|(action, _)| *action)
}

pub fn format_action(a: KeyAction) -> &'static str {
    ACTION_NAMES
        .iter()
        .find(|(action, _)| *action == a)
        .map(|(_, name)| *name)
        .unwrap_or("Ignore")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(mods: KeyModifiers, code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, mods)
    }

    #[test]
    fn defaults_cover_core_actions() {
        let km = Keymap::default();
        assert_eq!(km.resolve(&key(KeyModifiers::NONE, KeyCode::Char('n'))), Some(KeyAction::NewDriver));
        assert_eq!(km.resolve(&key(KeyModifiers::NONE, KeyCode::Delete)), Some(KeyAction::DeleteSelection));
        assert_eq!(km.resolve(&key(KeyModifiers::CONTROL, KeyCode::Char('c'))), Some(KeyAction::Quit));
        assert_eq!(km.resolve(&key(KeyModifiers::NONE, KeyCode::Char('z'))), None);
    }

    #[test]
    fn parse_overrides_and_skips_garbage() {
        let km = Keymap::parse("# mine\nQuit = Ctrl+x\nNewDriver = a\nNope = b\nMoveUp = NotAKey\n");
        assert_eq!(km.resolve(&key(KeyModifiers::CONTROL, KeyCode::Char('x'))), Some(KeyAction::Quit));
        assert_eq!(km.resolve(&key(KeyModifiers::NONE, KeyCode::Char('a'))), Some(KeyAction::NewDriver));
        assert_eq!(km.resolve(&key(KeyModifiers::NONE, KeyCode::Char('b'))), None);
        // defaults survive
        assert_eq!(km.resolve(&key(KeyModifiers::NONE, KeyCode::Char('q'))), Some(KeyAction::Quit));
    }

    #[test]
    fn key_spec_roundtrip() {
        for spec in ["Ctrl+c", "PageDown", "Esc", "/", "K", "Shift+Tab"] {
            let (m, c) = parse_key(spec).unwrap();
            assert_eq!(Keymap::format_key(m, c), spec);
        }
        assert_eq!(parse_key("Escape"), Some((KeyModifiers::NONE, KeyCode::Esc)));
        assert_eq!(parse_key("ab"), None);
    }

    #[test]
    fn action_names_are_unique() {
        for (a, name) in ACTION_NAMES {
            assert_eq!(parse_action(name), Some(a));
            assert_eq!(format_action(a), name);
        }
    }

    #[test]
    fn keys_for_lists_all_bindings() {
        let keys = Keymap::default().keys_for(KeyAction::NextPage);
        assert_eq!(keys, vec!["PageDown", "Right", "l"]);
    }
}
