use serde::Deserialize;

/// `backend` key: which backend the terminal controller should use.
/// `Auto` probes for a raw-capable tty; `Test` never touches a real
/// terminal and is meant for harnesses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    #[default]
    Auto,
    Raw,
    Cooked,
    Test,
}

/// `character_set` / `fallback_character_set`: which glyph set the widget
/// layer may draw box-drawing characters from. The core never reads this
/// itself — it is carried through so a layout collaborator can.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CharacterSet {
    Unicode,
    Ascii,
}

impl Default for CharacterSet {
    fn default() -> Self {
        CharacterSet::Unicode
    }
}

/// `mouse_tracking`: initial mouse mode, `none` meaning tracking is off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MouseTracking {
    #[default]
    None,
    Click,
    Drag,
    All,
}

/// The recognized configuration keys (§6 "Configuration (process start)"),
/// deserialized directly from TOML. Every field has a default so a partial
/// or absent file still produces a usable [`crate::Config`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ConfigFile {
    pub backend: Backend,
    pub character_set: CharacterSet,
    pub fallback_character_set: CharacterSet,
    pub fps: u32,
    pub alternate_screen: bool,
    pub hide_cursor: bool,
    pub mouse_tracking: MouseTracking,
    pub render_buffer_threshold: usize,
    pub message_queue_cap: usize,
}

impl Default for ConfigFile {
    fn default() -> Self {
        ConfigFile {
            backend: Backend::default(),
            character_set: CharacterSet::Unicode,
            fallback_character_set: CharacterSet::Ascii,
            fps: 60,
            alternate_screen: true,
            hide_cursor: true,
            mouse_tracking: MouseTracking::default(),
            render_buffer_threshold: 4096,
            message_queue_cap: 1000,
        }
    }
}
