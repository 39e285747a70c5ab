use anyhow::{Result, bail};

use crate::term::{Index, Name, Term};

/// The letters a variable name may use, in index order.
pub(crate) const ALPHABET: &str = "abcdefghijklmnopqrstuvwxyz";

/// Position of a lowercase ASCII letter within [`ALPHABET`].
pub(crate) fn alphabet_position(letter: Name) -> Option<usize> {
    letter
        .is_ascii_lowercase()
        .then(|| letter as usize - 'a' as usize)
}

/// Letter at a given [`ALPHABET`] position.
pub(crate) fn alphabet_letter(index: Index) -> Option<Name> {
    u8::try_from(index)
        .ok()
        .filter(|&i| i < 26)
        .map(|i| (b'a' + i) as char)
}

/// Rewrites every variable of a name-encoded term as a De Bruijn index.
///
/// A bound occurrence becomes the number of abstraction boundaries strictly
/// between it and its binder. A free letter becomes its alphabet position
/// plus the binding depth at the occurrence, so distinct free letters stay
/// distinct at every depth and [`to_names`] can invert the encoding.
///
/// # Errors
/// Fails on a free variable outside `a..=z`; bound occurrences always
/// resolve by construction.
///
/// # Examples
/// ```
/// use betastep::{Term, parse, to_indices};
///
/// let term = to_indices(&parse("\\x.a").unwrap()).unwrap();
/// assert_eq!(term, Term::abs('x', Term::var(1)));
/// ```
pub fn to_indices(term: &Term<Name>) -> Result<Term<Index>> {
    fn go(term: &Term<Name>, bindings: &mut Vec<Name>) -> Result<Term<Index>> {
        match term {
            Term::Var(name) => {
                if let Some(inner) = bindings.iter().rposition(|binder| binder == name) {
                    return Ok(Term::Var(bindings.len() - 1 - inner));
                }
                match alphabet_position(*name) {
                    Some(position) => Ok(Term::Var(position + bindings.len())),
                    None => bail!("variable '{name}' is not a lowercase letter"),
                }
            }
            Term::Abs(binder, body) => {
                bindings.push(*binder);
                let body = go(body, bindings);
                bindings.pop();
                Ok(Term::Abs(*binder, Box::new(body?)))
            }
            Term::App(function, argument) => Ok(Term::App(
                Box::new(go(function, bindings)?),
                Box::new(go(argument, bindings)?),
            )),
        }
    }
    go(term, &mut Vec::new())
}

/// Rewrites every variable of an index-encoded term as a letter, using the
/// binder letters recorded on the abstractions. Inverse of [`to_indices`]
/// for terms produced by it.
///
/// # Errors
/// Fails when a free index maps beyond `z`; such terms can arise from
/// hand-built index terms but never from [`to_indices`].
pub fn to_names(term: &Term<Index>) -> Result<Term<Name>> {
    fn go(term: &Term<Index>, bindings: &mut Vec<Name>) -> Result<Term<Name>> {
        match term {
            Term::Var(index) => {
                if *index < bindings.len() {
                    return Ok(Term::Var(bindings[bindings.len() - 1 - index]));
                }
                match alphabet_letter(index - bindings.len()) {
                    Some(letter) => Ok(Term::Var(letter)),
                    None => bail!("free index {index} has no letter at depth {}", bindings.len()),
                }
            }
            Term::Abs(binder, body) => {
                bindings.push(*binder);
                let body = go(body, bindings);
                bindings.pop();
                Ok(Term::Abs(*binder, Box::new(body?)))
            }
            Term::App(function, argument) => Ok(Term::App(
                Box::new(go(function, bindings)?),
                Box::new(go(argument, bindings)?),
            )),
        }
    }
    go(term, &mut Vec::new())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::parser::Parser;

    fn indexed(input: &str) -> Term<Index> {
        to_indices(&Parser::parse(input).unwrap()).unwrap()
    }

    #[test]
    fn test_alphabet_position() {
        assert_eq!(alphabet_position('a'), Some(0));
        assert_eq!(alphabet_position('z'), Some(25));
        assert_eq!(alphabet_position('A'), None);
        assert_eq!(alphabet_position('λ'), None);
    }

    #[test]
    fn test_alphabet_letter() {
        assert_eq!(alphabet_letter(0), Some('a'));
        assert_eq!(alphabet_letter(25), Some('z'));
        assert_eq!(alphabet_letter(26), None);
    }

    #[test]
    fn test_free_variables_use_alphabet_positions() {
        // abc == (ab)c with a=0, b=1, c=2 at depth 0
        assert_eq!(
            indexed("abc"),
            Term::app(Term::app(Term::var(0), Term::var(1)), Term::var(2))
        );
    }

    #[test]
    fn test_free_variable_raised_by_depth() {
        // Under one binder, free `a` sits at 0 + 1.
        assert_eq!(indexed("\\x.a"), Term::abs('x', Term::var(1)));
    }

    #[test]
    fn test_bound_variable_counts_intervening_binders() {
        // (\x.ax)b: inside the abstraction `a` is free (0+1) and `x` bound (0);
        // outside, `b` is free (1).
        assert_eq!(
            indexed("(\\x.ax)b"),
            Term::app(
                Term::abs('x', Term::app(Term::var(1), Term::var(0))),
                Term::var(1)
            )
        );
    }

    #[test]
    fn test_nested_binders_and_deep_free_variables() {
        // (\xy.zx(\u.ux))(\x.wx):
        //   z under x,y -> 25+2 = 27; x under x,y -> 1; u -> 0; x under x,y,u -> 2
        //   w under x -> 22+1 = 23; x -> 0
        let left = Term::abs(
            'x',
            Term::abs(
                'y',
                Term::app(
                    Term::app(Term::var(27), Term::var(1)),
                    Term::abs('u', Term::app(Term::var(0), Term::var(2))),
                ),
            ),
        );
        let right = Term::abs('x', Term::app(Term::var(23), Term::var(0)));
        assert_eq!(indexed("(\\xy.zx(\\u.ux))(\\x.wx)"), Term::app(left, right));
    }

    #[test]
    fn test_shadowing_resolves_to_innermost_binder() {
        // In \x.\x.x the variable refers to the inner binder.
        assert_eq!(
            indexed("\\x.\\x.x"),
            Term::abs('x', Term::abs('x', Term::var(0)))
        );
    }

    #[test]
    fn test_round_trip_identity() {
        for input in [
            "x",
            "abc",
            "\\x.x",
            "\\x.a",
            "(\\x.ax)b",
            "(\\xy.zx(\\u.ux))(\\x.wx)",
            "\\x.(xz)(\\y.xy)",
        ] {
            let named = Parser::parse(input).unwrap();
            let round_tripped = to_names(&to_indices(&named).unwrap()).unwrap();
            assert_eq!(round_tripped, named, "input: {input}");
        }
    }

    #[test]
    fn test_to_names_rejects_out_of_alphabet_index() {
        assert!(to_names(&Term::var(26)).is_err());
        assert!(to_names(&Term::abs('x', Term::var(27))).is_err());
    }
}
