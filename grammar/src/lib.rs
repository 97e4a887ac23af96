//! Compiler for compact CLI usage grammars.
//!
//! This crate turns the textual usage strings of a command declaration into
//! the structured descriptors defined in `usagekit-core`:
//!
//! - [`parse_option_usage`] — `"-p, --port <number>"` → an
//!   [`OptionUsage`](usagekit_core::OptionUsage) with short/long flags and
//!   an optional scalar argument.
//! - [`parse_command_usage`] — `"<dir> [type...]"` → an ordered
//!   [`Argument`](usagekit_core::Argument) list with arity invariants
//!   enforced.
//! - [`parse_argument`] — a single `<name>` / `[name...]` token.
//!
//! Parsing happens once, eagerly, when a CLI is declared; malformed usage
//! grammar fails immediately with a source-located error:
//!
//! ```
//! use usagekit_grammar::parse_option_usage;
//!
//! let err = parse_option_usage("-q --quiet").unwrap_err();
//! // Expected a comma before "--quiet".
//! //
//! //   -q --quiet
//! //      ^^^^^^^
//! assert!(err.to_string().contains("^^^^^^^"));
//! ```

mod argument;
mod cursor;
mod lexer;
mod option;

pub use argument::{parse_argument, parse_command_usage};
pub use cursor::{ErrorReport, Loc, SourceCursor};
pub use lexer::{Token, TokenKind, UsageLexer};
pub use option::parse_option_usage;
