//! Typed command vectors.
//!
//! Planned commands are argv token lists. Processes are spawned from the
//! tokens directly, never through a shell; shell quoting exists only in the
//! `Display` form used when a plan is printed.

use std::fmt;

/// One executable command: a program name plus its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    tokens: Vec<String>,
}

impl CommandLine {
    /// Start a command vector with the program name.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            tokens: vec![program.into()],
        }
    }

    /// Append one argument token.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.tokens.push(arg.into());
        self
    }

    /// Append several argument tokens.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tokens.extend(args.into_iter().map(Into::into));
        self
    }

    /// The program name (first token).
    pub fn program(&self) -> &str {
        &self.tokens[0]
    }

    /// All tokens, program first.
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// Build the process invocation for this vector. Arguments are passed
    /// through as-is; no shell is involved.
    pub fn to_command(&self) -> std::process::Command {
        let mut cmd = std::process::Command::new(&self.tokens[0]);
        cmd.args(&self.tokens[1..]);
        cmd
    }
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", shell_words::join(&self.tokens))
    }
}
