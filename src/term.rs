use std::fmt;

/// Human-readable variable encoding: a single lowercase letter.
pub type Name = char;

/// Canonical variable encoding: a De Bruijn index. For a bound occurrence,
/// the number of abstraction boundaries strictly between the occurrence and
/// its binder (0 = innermost). For a free occurrence, the letter's alphabet
/// position plus the binding depth at the occurrence.
pub type Index = usize;

/// A lambda calculus term, parameterized over the variable encoding.
///
/// The binder of an abstraction is always a [`Name`], even when the body
/// uses index-encoded variables; the letter is needed for printing and for
/// round-tripping between the two encodings.
///
/// # Examples
/// ```
/// use betastep::{Name, Term};
///
/// // \x.x
/// let id: Term<Name> = Term::abs('x', Term::var('x'));
/// assert_eq!(id.to_string(), "\\x.x");
/// ```
#[derive(Debug, Hash, Clone, PartialEq, Eq)]
pub enum Term<V> {
    /// A binding occurrence or free reference.
    Var(V),
    /// Abstraction: binder letter and body.
    Abs(Name, Box<Term<V>>),
    /// Application: function and argument.
    App(Box<Term<V>>, Box<Term<V>>),
}

impl<V> Term<V> {
    /// Creates a variable term.
    #[must_use]
    pub const fn var(variable: V) -> Self {
        Self::Var(variable)
    }

    /// Creates an abstraction with the given binder letter and body.
    #[must_use]
    pub fn abs(binder: Name, body: Self) -> Self {
        Self::Abs(binder, Box::new(body))
    }

    /// Creates an application of `function` to `argument`.
    #[must_use]
    pub fn app(function: Self, argument: Self) -> Self {
        Self::App(Box::new(function), Box::new(argument))
    }
}

impl<V: Default> Default for Term<V> {
    fn default() -> Self {
        Self::Var(V::default())
    }
}

impl Term<Index> {
    /// Structural equality ignoring binder letters.
    ///
    /// Index-encoded terms are alpha-comparable: two terms that differ only
    /// in the (cosmetic) letters attached to their binders encode the same
    /// lambda term.
    #[must_use]
    pub fn alpha_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Var(a), Self::Var(b)) => a == b,
            (Self::Abs(_, a), Self::Abs(_, b)) => a.alpha_eq(b),
            (Self::App(f, x), Self::App(g, y)) => f.alpha_eq(g) && x.alpha_eq(y),
            _ => false,
        }
    }
}

impl<V: fmt::Display> fmt::Display for Term<V> {
    /// Prints the surface syntax: `\x.body` for abstractions, juxtaposition
    /// for applications with any non-variable child parenthesized.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Var(v) => write!(f, "{v}"),
            Self::Abs(binder, body) => write!(f, "\\{binder}.{body}"),
            Self::App(function, argument) => {
                match function.as_ref() {
                    Self::Var(v) => write!(f, "{v}")?,
                    other => write!(f, "({other})")?,
                }
                match argument.as_ref() {
                    Self::Var(v) => write!(f, "{v}"),
                    other => write!(f, "({other})"),
                }
            }
        }
    }
}

/// Builds the Church encoding of `n`: `\s.\z.s(s(...z...))` with `n`
/// applications of `s`.
#[must_use]
pub fn numeral(n: u64) -> Term<Name> {
    let mut body = Term::var('z');
    for _ in 0..n {
        body = Term::app(Term::var('s'), body);
    }
    Term::abs('s', Term::abs('z', body))
}

/// The successor combinator, `Succ = \w.\y.\x.y(wyx)`.
#[must_use]
pub fn succ() -> Term<Name> {
    Term::abs(
        'w',
        Term::abs(
            'y',
            Term::abs(
                'x',
                Term::app(
                    Term::var('y'),
                    Term::app(Term::app(Term::var('w'), Term::var('y')), Term::var('x')),
                ),
            ),
        ),
    )
}

/// The addition combinator, `Add = \a.\b.(a Succ) b`.
#[must_use]
pub fn add() -> Term<Name> {
    Term::abs(
        'a',
        Term::abs(
            'b',
            Term::app(Term::app(Term::var('a'), succ()), Term::var('b')),
        ),
    )
}

/// Resolves a named constant against the fixed symbol table.
///
/// The table is consulted only during parsing; reduction never re-resolves
/// names.
#[must_use]
pub fn constant(name: &str) -> Option<Term<Name>> {
    match name {
        "Succ" => Some(succ()),
        "Add" => Some(add()),
        _ => None,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_var_display() {
        assert_eq!(Term::var('x').to_string(), "x");
        assert_eq!(Term::<Index>::var(3).to_string(), "3");
    }

    #[test]
    fn test_abs_display() {
        let id = Term::abs('x', Term::var('x'));
        assert_eq!(id.to_string(), "\\x.x");

        let nested = Term::abs('x', Term::abs('y', Term::var('x')));
        assert_eq!(nested.to_string(), "\\x.\\y.x");
    }

    #[test]
    fn test_app_display_parenthesizes_non_variables() {
        // (\x.x)y
        let term = Term::app(Term::abs('x', Term::var('x')), Term::var('y'));
        assert_eq!(term.to_string(), "(\\x.x)y");

        // y(\x.x)
        let term = Term::app(Term::var('y'), Term::abs('x', Term::var('x')));
        assert_eq!(term.to_string(), "y(\\x.x)");

        // (y(\x.x))y -- left-nested application keeps its parentheses
        let term = Term::app(
            Term::app(Term::var('y'), Term::abs('x', Term::var('x'))),
            Term::var('y'),
        );
        assert_eq!(term.to_string(), "(y(\\x.x))y");
    }

    #[test]
    fn test_numeral_zero() {
        assert_eq!(numeral(0), Term::abs('s', Term::abs('z', Term::var('z'))));
        assert_eq!(numeral(0).to_string(), "\\s.\\z.z");
    }

    #[test]
    fn test_numeral_builds_nested_applications() {
        assert_eq!(numeral(1).to_string(), "\\s.\\z.sz");
        assert_eq!(numeral(3).to_string(), "\\s.\\z.s(s(sz))");
    }

    #[test]
    fn test_constant_lookup() {
        assert_eq!(constant("Succ"), Some(succ()));
        assert_eq!(constant("Add"), Some(add()));
        assert_eq!(constant("Mul"), None);
        assert_eq!(constant(""), None);
    }

    #[test]
    fn test_succ_shape() {
        assert_eq!(succ().to_string(), "\\w.\\y.\\x.y((wy)x)");
    }

    #[test]
    fn test_alpha_eq_ignores_binders() {
        let a = Term::<Index>::abs('x', Term::var(0));
        let b = Term::<Index>::abs('y', Term::var(0));
        assert!(a.alpha_eq(&b));
        assert_ne!(a, b);

        let c = Term::<Index>::abs('x', Term::var(1));
        assert!(!a.alpha_eq(&c));
    }

    #[test]
    fn test_alpha_eq_structure() {
        let a = Term::app(Term::<Index>::var(0), Term::var(1));
        let b = Term::app(Term::<Index>::var(0), Term::var(1));
        let c = Term::<Index>::abs('x', Term::var(0));
        assert!(a.alpha_eq(&b));
        assert!(!a.alpha_eq(&c));
    }
}
