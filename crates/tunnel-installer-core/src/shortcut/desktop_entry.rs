//! Desktop entry (.desktop file) rendering.
//!
//! Implements the subset of the XDG Desktop Entry Specification needed for a
//! menu launcher that is also used as an autostart entry.

use std::fmt;
use std::fmt::Write as FmtWrite;
use std::path::Path;

use crate::config::{AppConfig, EntryConfig};

/// A desktop entry representation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DesktopEntry {
    /// Entry name (shown in menus).
    pub name: String,
    /// Comment/description.
    pub comment: Option<String>,
    /// Executable command.
    pub exec: String,
    /// Icon name or path.
    pub icon: String,
    /// Whether to run in a terminal.
    pub terminal: bool,
    /// Entry type (usually "Application").
    pub entry_type: String,
    /// Categories, written semicolon-separated in order.
    pub categories: Vec<String>,
    /// `StartupNotify`; omitted when `None`.
    pub startup_notify: Option<bool>,
    /// `X-GNOME-Autostart-enabled`; omitted when `None`.
    pub autostart_enabled: Option<bool>,
}

impl Default for DesktopEntry {
    fn default() -> Self {
        Self {
            name: String::new(),
            comment: None,
            exec: String::new(),
            icon: String::new(),
            terminal: false,
            entry_type: "Application".to_string(),
            categories: Vec::new(),
            startup_notify: None,
            autostart_enabled: None,
        }
    }
}

impl DesktopEntry {
    /// Create a new desktop entry builder.
    pub fn builder() -> DesktopEntryBuilder {
        DesktopEntryBuilder::new()
    }

    /// The SSH Tunnel Manager entry, launching the script inside `script_dir`.
    ///
    /// `script_dir` should already be resolved; it is used as given.
    pub fn ssh_tunnel_manager(script_dir: &Path) -> Self {
        let launcher = script_dir.join(EntryConfig::LAUNCHER_SCRIPT);

        Self::builder()
            .name(AppConfig::APP_NAME)
            .comment(AppConfig::COMMENT)
            .exec(exec_path(&launcher))
            .icon(AppConfig::ICON)
            .terminal(false)
            .categories(AppConfig::CATEGORIES.iter().map(|c| c.to_string()).collect())
            .startup_notify(false)
            .autostart_enabled(true)
            .build()
    }

    /// Generate the .desktop file content.
    pub fn render(&self) -> String {
        let mut content = String::new();
        // Writing into a String cannot fail.
        let _ = self.write_into(&mut content);
        content
    }

    fn write_into(&self, out: &mut impl FmtWrite) -> fmt::Result {
        writeln!(out, "[Desktop Entry]")?;
        writeln!(out, "Name={}", self.name)?;

        if let Some(ref comment) = self.comment {
            writeln!(out, "Comment={}", comment)?;
        }

        writeln!(out, "Exec={}", self.exec)?;
        writeln!(out, "Icon={}", self.icon)?;
        writeln!(out, "Terminal={}", self.terminal)?;
        writeln!(out, "Type={}", self.entry_type)?;

        if !self.categories.is_empty() {
            writeln!(out, "Categories={};", self.categories.join(";"))?;
        }

        if let Some(notify) = self.startup_notify {
            writeln!(out, "StartupNotify={}", notify)?;
        }

        if let Some(enabled) = self.autostart_enabled {
            writeln!(out, "X-GNOME-Autostart-enabled={}", enabled)?;
        }

        Ok(())
    }
}

impl fmt::Display for DesktopEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_into(f)
    }
}

/// Characters that force an `Exec` argument to be quoted.
const EXEC_RESERVED: &[char] = &[
    ' ', '\t', '\n', '"', '\'', '\\', '>', '<', '~', '|', '&', ';', '$', '*', '?', '#', '(',
    ')', '`',
];

/// Format a program path for the `Exec` key.
///
/// Three encoding layers apply, innermost first:
/// 1. Argument quoting: a path containing a reserved character is wrapped in
///    double quotes, with `"`, `` ` ``, `$` and `\` backslash-escaped inside.
/// 2. Field codes: every `%` is doubled so it is not read as `%f`, `%u`, ...
/// 3. Key-file string escapes: `\` becomes `\\` and newline, tab and
///    carriage return become `\n`, `\t`, `\r`, keeping the value on one line.
///
/// Plain paths come out unchanged.
pub fn exec_path(path: &Path) -> String {
    let raw = path.to_string_lossy();

    let mut argument = String::with_capacity(raw.len() + 2);
    if raw.contains(EXEC_RESERVED) {
        argument.push('"');
        for c in raw.chars() {
            if matches!(c, '"' | '`' | '$' | '\\') {
                argument.push('\\');
            }
            argument.push(c);
        }
        argument.push('"');
    } else {
        argument.push_str(&raw);
    }

    let mut value = String::with_capacity(argument.len());
    for c in argument.chars() {
        match c {
            '%' => value.push_str("%%"),
            '\\' => value.push_str("\\\\"),
            '\n' => value.push_str("\\n"),
            '\t' => value.push_str("\\t"),
            '\r' => value.push_str("\\r"),
            other => value.push(other),
        }
    }
    value
}

/// Builder for desktop entries.
pub struct DesktopEntryBuilder {
    entry: DesktopEntry,
}

impl DesktopEntryBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            entry: DesktopEntry::default(),
        }
    }

    /// Set the entry name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.entry.name = name.into();
        self
    }

    /// Set the comment.
    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        self.entry.comment = Some(comment.into());
        self
    }

    /// Set the executable command.
    pub fn exec(mut self, exec: impl Into<String>) -> Self {
        self.entry.exec = exec.into();
        self
    }

    /// Set the icon.
    pub fn icon(mut self, icon: impl Into<String>) -> Self {
        self.entry.icon = icon.into();
        self
    }

    /// Set whether to run in terminal.
    pub fn terminal(mut self, terminal: bool) -> Self {
        self.entry.terminal = terminal;
        self
    }

    /// Set categories.
    pub fn categories(mut self, categories: Vec<String>) -> Self {
        self.entry.categories = categories;
        self
    }

    /// Add a category.
    pub fn add_category(mut self, category: impl Into<String>) -> Self {
        self.entry.categories.push(category.into());
        self
    }

    pub fn startup_notify(mut self, notify: bool) -> Self {
        self.entry.startup_notify = Some(notify);
        self
    }

    pub fn autostart_enabled(mut self, enabled: bool) -> Self {
        self.entry.autostart_enabled = Some(enabled);
        self
    }

    /// Build the desktop entry.
    pub fn build(self) -> DesktopEntry {
        self.entry
    }
}

impl Default for DesktopEntryBuilder {
    fn default() -> Self {
        Self::new()
    }
}
