//! Error taxonomy shared by the grammar compiler and the resolution pipeline.
//!
//! Every failure in the crate family is one of a closed set of kinds
//! ([`ErrorKind`]): grammar errors and configuration errors are raised once,
//! at declaration time, while flag and argument errors are raised per
//! invocation. The CLI bootstrap that sits above these crates turns an
//! [`Error`] into console output and a process exit code; nothing in here
//! writes to a stream or terminates the process.

use thiserror::Error;

/// Broad classification of an [`Error`].
///
/// # Examples
///
/// ```
/// use usagekit_core::{Error, ErrorKind};
///
/// let err = Error::UnknownOptions { flags: vec!["-x".into()] };
/// assert_eq!(err.kind(), ErrorKind::Flag);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed usage grammar (declaration time).
    Grammar,
    /// Structurally invalid command tree or CLI config (declaration time).
    Config,
    /// Unknown flag, or a flag value that is missing or failed coercion.
    Flag,
    /// Positional arguments that do not satisfy the declared arity.
    Argument,
    /// A broken internal contract, e.g. reading past the end of input.
    Internal,
}

/// Errors raised while compiling usage grammars or resolving argv.
///
/// Grammar variants embed a two-line source frame (the usage text plus a
/// caret underline) in their `Display` output; invocation variants name the
/// offending flag or the command's full path so the message is actionable
/// without additional context.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Malformed usage string. `frame` is the pre-rendered source frame.
    #[error("{message}\n\n{frame}")]
    Grammar { message: String, frame: String },

    /// Structurally invalid command declaration. `path` is the dotted
    /// config path of the offending node or field.
    #[error("{message}\n  At: {path}")]
    Config { path: String, message: String },

    /// Flags that matched no declared option. All unknown flags from one
    /// invocation are collected before this is raised.
    #[error("unknown options: {}", .flags.join(", "))]
    UnknownOptions { flags: Vec<String> },

    /// A recognized flag whose value failed its coercion function.
    #[error("invalid value at {flag}: {message}")]
    InvalidValue { flag: String, message: String },

    /// A recognized flag with a required argument but no value to consume.
    #[error("missing value at {flag}: expected argument <{argument}>")]
    MissingValue { flag: String, argument: String },

    /// Positional arguments were supplied to a command that declares none.
    #[error("\"{command}\" doesn't take arguments")]
    UnexpectedArguments { command: String },

    /// More positional arguments than the declared maximum.
    #[error(
        "\"{command}\" was given too many arguments: at most {max} allowed, but {given} given"
    )]
    TooManyArguments {
        command: String,
        max: usize,
        given: usize,
    },

    /// Fewer positional arguments than required; `argument` is the raw form
    /// of the first missing one (e.g. `<branch>`).
    #[error("\"{command}\" requires the {argument} argument")]
    MissingArgument { command: String, argument: String },

    /// A bug, not a user error. Callers are expected to check `eof()`
    /// before reading; this is what they get when they don't.
    #[error("internal parser error: {0}")]
    Internal(String),
}

impl Error {
    /// The kind bucket this error belongs to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Grammar { .. } => ErrorKind::Grammar,
            Error::Config { .. } => ErrorKind::Config,
            Error::UnknownOptions { .. }
            | Error::InvalidValue { .. }
            | Error::MissingValue { .. } => ErrorKind::Flag,
            Error::UnexpectedArguments { .. }
            | Error::TooManyArguments { .. }
            | Error::MissingArgument { .. } => ErrorKind::Argument,
            Error::Internal(_) => ErrorKind::Internal,
        }
    }

    /// Process exit code a CLI front end should report for this error.
    pub fn exit_code(&self) -> i32 {
        1
    }
}
