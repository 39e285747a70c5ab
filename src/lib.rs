//! A step-wise beta-reduction engine for the untyped lambda calculus.
//!
//! Terms are parsed from a compact surface syntax (`\x.xy`, `λx.xy`), carried
//! in either of two variable encodings (single-letter [`Name`]s or De Bruijn
//! [`Index`]es), and reduced one leftmost-outermost beta step at a time
//! through a lazy [`Steps`] sequence. Reduction walks the term with an
//! explicit-stack zipper ([`Traverser`]), so deeply nested terms never
//! overflow the call stack, and diverging terms like `(\x.xx)(\x.xx)` simply
//! yield steps forever instead of hanging.
//!
//! # Examples
//! ```
//! use betastep::{evaluate, parse, to_indices, to_names};
//!
//! let term = to_indices(&parse("(\\x.\\y.x)ab").unwrap()).unwrap();
//! let normal = to_names(&evaluate(&term)).unwrap();
//! assert_eq!(normal.to_string(), "a");
//! ```
//!
//! Or, pulling individual steps:
//! ```
//! use betastep::{evaluate_steps, parse, to_indices, to_names};
//!
//! let term = to_indices(&parse("(\\x.x)((\\y.y)z)").unwrap()).unwrap();
//! let steps: Vec<String> = evaluate_steps(&term)
//!     .map(|t| to_names(&t).unwrap().to_string())
//!     .collect();
//! assert_eq!(steps, ["(\\x.x)((\\y.y)z)", "(\\y.y)z", "z"]);
//! ```

pub mod convert;
pub mod engine;
pub mod lexer;
pub mod parser;
pub mod term;
pub mod traverse;

pub use convert::{to_indices, to_names};
pub use engine::{EvaluationError, Steps, bind, evaluate, evaluate_limited, evaluate_steps};
pub use parser::{ParseError, Parser};
pub use term::{Index, Name, Term, add, constant, numeral, succ};
pub use traverse::{Branch, Traverser};

/// Parses a lambda calculus term from its surface syntax.
///
/// # Errors
/// Returns a [`ParseError`] on malformed input or unknown constants.
///
/// # Examples
/// ```
/// use betastep::parse;
///
/// let term = parse("\\xy.xy").unwrap();
/// assert_eq!(term.to_string(), "\\x.\\y.xy");
/// ```
pub fn parse(input: &str) -> Result<Term<Name>, ParseError> {
    Parser::parse(input)
}

/// Parses, evaluates with a step budget, and renders the result back into
/// the name encoding.
///
/// # Errors
/// Fails on malformed input, on terms that do not normalize within
/// `max_steps` reductions, or on results whose free variables fall outside
/// the printable alphabet.
///
/// # Examples
/// ```
/// use betastep::interpret;
///
/// assert_eq!(interpret("(\\x.x)y", 100).unwrap().to_string(), "y");
/// assert_eq!(interpret("Succ 0", 100).unwrap().to_string(), "\\y.\\x.yx");
/// assert!(interpret("(\\x.xx)(\\x.xx)", 100).is_err());
/// ```
pub fn interpret(input: &str, max_steps: usize) -> anyhow::Result<Term<Name>> {
    let term = to_indices(&parse(input)?)?;
    to_names(&evaluate_limited(&term, max_steps)?)
}
