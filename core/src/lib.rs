//! Grammar-driven command line parsing.
//!
//! A grammar is an immutable tree of option nodes: prefixed flags with burst
//! support, enable/disable switches, unprefixed commands, `-Dkey=value`
//! properties, anonymous value arguments, and groups with cardinality
//! bounds. A [`Parser`] borrows the tree and matches argument vectors
//! against it, producing a queryable [`CommandLine`] or a structured
//! [`ParseError`].
//!
//! ```
//! use argtree_core::{Argument, Flag, Group, Parser};
//!
//! let grammar = Group::new("options")
//!     .with_option(Flag::new(Some("-v"), Some("--verbose")))
//!     .with_option(
//!         Flag::new(Some("-f"), Some("--file"))
//!             .with_argument(Argument::new("path").with_minimum(1).with_maximum(1)),
//!     )
//!     .with_option(Argument::new("targets"));
//!
//! let line = Parser::new(&grammar)
//!     .parse(["-v", "--file", "notes.txt", "clean", "build"])
//!     .unwrap();
//!
//! assert!(line.has_option("--verbose"));
//! assert_eq!(line.value("-f").unwrap().unwrap().to_string(), "notes.txt");
//! assert_eq!(line.values("targets").len(), 2);
//! ```

pub mod commandline;
pub mod error;
pub mod option;
pub mod parser;
pub mod summary;
pub mod tokens;
pub mod validation;
pub mod value;

pub use commandline::CommandLine;
pub use error::{ParseError, Result};
pub use option::{Argument, Command, Flag, Group, OptionId, OptionNode, PropertyOption, Switch};
pub use parser::Parser;
pub use summary::ParseSummary;
pub use tokens::{Cursor, Mark};
pub use value::Value;
