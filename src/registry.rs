//! Fixed command table: names, help text, and the typed action each one maps to.

/// Which action a command entry dispatches to. Actions live on the `App`; the
/// registry only names them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CommandKind {
    About,
    Links,
    Help,
    Speed,
    Party,
    Pulse,
    Hack,
    Troll,
    Sudo,
    Guess,
    Rps,
    Ping,
    Font,
    Theme,
    Clear,
    Emblem,
}

/// One registered command. Immutable after startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct CommandEntry {
    pub name: &'static str,
    pub args_hint: &'static str,
    pub description: &'static str,
    pub kind: CommandKind,
}

const ENTRIES: &[CommandEntry] = &[
    CommandEntry {
        name: "about",
        args_hint: "",
        description: "Displays info about this terminal.",
        kind: CommandKind::About,
    },
    CommandEntry {
        name: "links",
        args_hint: "",
        description: "Shows links to the project repositories.",
        kind: CommandKind::Links,
    },
    CommandEntry {
        name: "help",
        args_hint: "[command]",
        description: "Displays help information for available commands.",
        kind: CommandKind::Help,
    },
    CommandEntry {
        name: "speed",
        args_hint: "[value]",
        description: "Sets the speed of the rain effect.",
        kind: CommandKind::Speed,
    },
    CommandEntry {
        name: "party",
        args_hint: "[duration_s]",
        description: "Activates party mode.",
        kind: CommandKind::Party,
    },
    CommandEntry {
        name: "pulse",
        args_hint: "[duration_s] [flash_count]",
        description: "Triggers a colorful pulse across the screen.",
        kind: CommandKind::Pulse,
    },
    CommandEntry {
        name: "hack",
        args_hint: "",
        description: "Flashes the rain glyphs quickly.",
        kind: CommandKind::Hack,
    },
    CommandEntry {
        name: "troll",
        args_hint: "",
        description: "Displays a series of random glitch lines.",
        kind: CommandKind::Troll,
    },
    CommandEntry {
        name: "sudo",
        args_hint: "",
        description: "Simulates superuser access (just for fun).",
        kind: CommandKind::Sudo,
    },
    CommandEntry {
        name: "guess",
        args_hint: "[max_attempts]",
        description: "Starts a number guessing game.",
        kind: CommandKind::Guess,
    },
    CommandEntry {
        name: "rps",
        args_hint: "",
        description: "Starts a Rock-Paper-Scissors game.",
        kind: CommandKind::Rps,
    },
    CommandEntry {
        name: "ping",
        args_hint: "",
        description: "Simulates a network ping.",
        kind: CommandKind::Ping,
    },
    CommandEntry {
        name: "font",
        args_hint: "[font_name]",
        description: "Switches the rain glyph style.",
        kind: CommandKind::Font,
    },
    CommandEntry {
        name: "theme",
        args_hint: "[1-12]",
        description: "Changes background/text colors.",
        kind: CommandKind::Theme,
    },
    CommandEntry {
        name: "clear",
        args_hint: "",
        description: "Clears the terminal screen.",
        kind: CommandKind::Clear,
    },
    CommandEntry {
        name: "emblem",
        args_hint: "",
        description: "Shows a neat picture :D",
        kind: CommandKind::Emblem,
    },
];

/// Read-only name-to-behavior mapping, in declaration order.
#[derive(Debug, Clone, Copy)]
pub(crate) struct CommandRegistry {
    entries: &'static [CommandEntry],
}

impl CommandRegistry {
    pub(crate) fn new() -> Self {
        debug_assert!(
            ENTRIES
                .iter()
                .enumerate()
                .all(|(i, a)| ENTRIES[i + 1..].iter().all(|b| a.name != b.name)),
            "duplicate command name registered"
        );
        Self { entries: ENTRIES }
    }

    /// Exact-match lookup. Callers lower-case the name first.
    pub(crate) fn lookup(&self, name: &str) -> Option<&'static CommandEntry> {
        self.entries.iter().find(|entry| entry.name == name)
    }

    pub(crate) fn entries(&self) -> &'static [CommandEntry] {
        self.entries
    }

    /// One formatted help line for a known command, or a not-found notice.
    pub(crate) fn describe(&self, name: &str) -> String {
        match self.lookup(name) {
            Some(entry) => format_entry(entry),
            None => format!("❌ Command '{name}' not found."),
        }
    }

    /// The full listing in declaration order, framed by header and usage hint.
    pub(crate) fn describe_all(&self) -> Vec<String> {
        let mut lines = Vec::with_capacity(self.entries.len() + 2);
        lines.push("📄 Available commands:".to_string());
        lines.extend(self.entries.iter().map(format_entry));
        lines.push("💡 Type 'help <command>' for detailed info on a specific command.".to_string());
        lines
    }
}

fn format_entry(entry: &CommandEntry) -> String {
    if entry.args_hint.is_empty() {
        format!("{} - {}", entry.name, entry.description)
    } else {
        format!("{} {} - {}", entry.name, entry.args_hint, entry.description)
    }
}
