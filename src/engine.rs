use anyhow::{Result, bail};
use thiserror::Error;

use crate::{
    convert::{ALPHABET, alphabet_position},
    term::{Index, Name, Term},
    traverse::Traverser,
};

/// Errors from the optional bounded evaluation wrappers. The step sequence
/// itself has no error conditions; non-termination shows up as a sequence
/// that never ends.
#[derive(Debug, Clone, Error)]
pub enum EvaluationError {
    /// Evaluation exceeded the maximum number of reduction steps.
    #[error("Reduction limit of {0} steps exceeded")]
    ReductionLimitExceeded(usize),
}

/// Replaces every occurrence of the abstraction's binder in its body with
/// `argument`, renumbering indices so that nothing is captured.
///
/// # Errors
/// Fails when the first term is not an abstraction; this is a contract
/// violation, not an expected runtime condition.
///
/// # Examples
/// ```
/// use betastep::{bind, parse, to_indices, to_names};
///
/// let abstraction = to_indices(&parse("\\x.x(\\x.x)x").unwrap()).unwrap();
/// let argument = to_indices(&parse("y").unwrap()).unwrap();
/// let bound = bind(&abstraction, &argument).unwrap();
/// assert_eq!(to_names(&bound).unwrap().to_string(), "(y(\\x.x))y");
/// ```
pub fn bind(abstraction: &Term<Index>, argument: &Term<Index>) -> Result<Term<Index>> {
    match abstraction {
        Term::Abs(_, body) => Ok(substitute(body.as_ref().clone(), 0, argument)),
        other => bail!("cannot bind argument into non-abstraction term '{other}'"),
    }
}

/// The one depth-threading traversal substitution is allowed to be.
///
/// At nesting depth `d` (abstractions crossed since the eliminated binder),
/// an occurrence with index `i` is:
/// - `i == d`: the binder being eliminated; replaced by `argument` with its
///   free indices raised by `d`, keeping them free at the insertion point.
/// - `i > d`: free relative to the abstraction; decremented, one enclosing
///   binder is gone.
/// - `i < d`: bound by an inner abstraction; untouched.
fn substitute(term: Term<Index>, depth: Index, argument: &Term<Index>) -> Term<Index> {
    match term {
        Term::Var(i) if i == depth => raise_free(argument.clone(), depth),
        Term::Var(i) if i > depth => Term::Var(i - 1),
        variable @ Term::Var(_) => variable,
        Term::Abs(binder, body) => Term::Abs(binder, Box::new(substitute(*body, depth + 1, argument))),
        Term::App(function, arg) => Term::App(
            Box::new(substitute(*function, depth, argument)),
            Box::new(substitute(*arg, depth, argument)),
        ),
    }
}

/// Raises every index that is free relative to `term` by `amount`.
fn raise_free(term: Term<Index>, amount: Index) -> Term<Index> {
    fn go(term: Term<Index>, depth: Index, amount: Index) -> Term<Index> {
        match term {
            Term::Var(i) if i >= depth => Term::Var(i + amount),
            variable @ Term::Var(_) => variable,
            Term::Abs(binder, body) => Term::Abs(binder, Box::new(go(*body, depth + 1, amount))),
            Term::App(function, argument) => Term::App(
                Box::new(go(*function, depth, amount)),
                Box::new(go(*argument, depth, amount)),
            ),
        }
    }
    go(term, 0, amount)
}

/// Picks a binder letter for a freshly reduced abstraction: the current one
/// if no variable free in the body already reads as that letter at this
/// depth, otherwise the first alphabet letter that doesn't. Purely cosmetic;
/// reduction itself only ever looks at indices.
fn rename_binder(binder: Name, body: &Term<Index>) -> Name {
    if !reads_as_free(body, binder) {
        return binder;
    }
    ALPHABET
        .chars()
        .find(|&letter| !reads_as_free(body, letter))
        .unwrap_or(binder)
}

/// Whether some variable in `body` would print as a free occurrence of
/// `letter` under the abstraction's own binder.
fn reads_as_free(body: &Term<Index>, letter: Name) -> bool {
    fn go(term: &Term<Index>, free_index: usize, depth: usize) -> bool {
        match term {
            Term::Var(i) => *i == free_index + depth,
            Term::Abs(_, body) => go(body, free_index, depth + 1),
            Term::App(function, argument) => {
                go(function, free_index, depth) || go(argument, free_index, depth)
            }
        }
    }
    // +1 for the binder of the abstraction whose body this is.
    alphabet_position(letter).is_some_and(|position| go(body, position + 1, 0))
}

/// The lazy beta-reduction step sequence; see [`evaluate_steps`].
#[derive(Debug)]
pub struct Steps {
    traverser: Traverser<Index>,
    yielded_input: bool,
    done: bool,
}

impl Iterator for Steps {
    type Item = Term<Index>;

    fn next(&mut self) -> Option<Self::Item> {
        if !self.yielded_input {
            self.yielded_input = true;
            return Some(self.traverser.snapshot());
        }
        while !self.done {
            if matches!(self.traverser.focus(), Term::Abs(..)) {
                if self.traverser.right_sibling().is_some() {
                    self.traverser.rewrite_redex(|_, body, argument| {
                        match substitute(body, 0, &argument) {
                            // The surviving binder's letter may now collide
                            // with something free in the body.
                            Term::Abs(head, reduced) => {
                                Term::Abs(rename_binder(head, &reduced), reduced)
                            }
                            other => other,
                        }
                    });
                    return Some(self.traverser.snapshot());
                }
                // Unapplied lambdas are still explored; their bodies may
                // contain redexes of their own.
                self.traverser.enter_scope();
            } else {
                self.done = self.traverser.forward();
            }
        }
        None
    }
}

/// Produces the lazy sequence of reduction steps for `term`.
///
/// The first element is the input unchanged; every later element is the
/// whole term after exactly one leftmost-outermost beta reduction. The
/// sequence ends exactly when a full depth-first pass finds no redex. For
/// diverging terms it never ends, so callers must bound how many elements
/// they pull. The iterator owns a private working copy; the caller's term is
/// never mutated.
///
/// # Examples
/// ```
/// use betastep::{evaluate_steps, parse, to_indices};
///
/// let term = to_indices(&parse("(\\x.xx)(\\x.xx)").unwrap()).unwrap();
/// // Omega never reaches normal form, but each step is still a complete term.
/// assert_eq!(evaluate_steps(&term).take(10).count(), 10);
/// ```
#[must_use]
pub fn evaluate_steps(term: &Term<Index>) -> Steps {
    Steps {
        traverser: Traverser::new(term.clone()),
        yielded_input: false,
        done: false,
    }
}

/// Pulls the step sequence to exhaustion and returns the normal form.
///
/// Unsuitable for diverging terms: this never returns on them. Use
/// [`evaluate_steps`] or [`evaluate_limited`] when termination is not known.
#[must_use]
pub fn evaluate(term: &Term<Index>) -> Term<Index> {
    evaluate_steps(term)
        .last()
        .unwrap_or_else(|| term.clone())
}

/// Like [`evaluate`], but gives up after `max_steps` reductions.
///
/// # Errors
/// Returns [`EvaluationError::ReductionLimitExceeded`] if the term has not
/// reached normal form within the budget.
pub fn evaluate_limited(term: &Term<Index>, max_steps: usize) -> Result<Term<Index>> {
    let mut current = term.clone();
    let mut reductions = 0;
    for next in evaluate_steps(term).skip(1) {
        if reductions == max_steps {
            bail!(EvaluationError::ReductionLimitExceeded(max_steps));
        }
        reductions += 1;
        current = next;
    }
    Ok(current)
}
