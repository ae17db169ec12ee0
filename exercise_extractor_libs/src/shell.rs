use itertools::Itertools;
use std::fmt;

/// A single line of the generated POSIX shell script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    InitRepository,
    MakeDirectory(String),
    WriteFile { path: String, content: String },
    Stage(String),
    /// Commits the staged changes, overriding both author and committer date.
    Commit { message: String, date: String },
    Echo(String),
    /// Emitted verbatim, without any quoting.
    Raw(String),
}

/// Wraps `text` in single quotes so the shell reads it literally.
pub fn quote(text: &str) -> String {
    format!("'{}'", text.replace('\'', r"'\''"))
}

impl fmt::Display for ShellCommand {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ShellCommand::InitRepository => write!(f, "git init"),
            ShellCommand::MakeDirectory(path) => write!(f, "mkdir -p {}", quote(path)),
            ShellCommand::WriteFile { path, content } => {
                write!(f, "printf '%s\\n' {} > {}", quote(content), quote(path))
            }
            ShellCommand::Stage(pathspec) => write!(f, "git add {}", quote(pathspec)),
            ShellCommand::Commit { message, date } => write!(
                f,
                "GIT_COMMITTER_DATE={} git commit -m {} --date={}",
                quote(date),
                quote(message),
                quote(date)
            ),
            ShellCommand::Echo(text) => write!(f, "echo {}", quote(text)),
            ShellCommand::Raw(line) => write!(f, "{}", line),
        }
    }
}

/// Serializes the commands into a newline terminated script.
pub fn render(commands: &[ShellCommand]) -> String {
    if commands.is_empty() {
        return String::new();
    }
    format!("{}\n", commands.iter().join("\n"))
}
