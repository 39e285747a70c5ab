use std::mem;

use crate::term::{Name, Term};

/// Which child of an application the traversal descended into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Branch {
    Left,
    Right,
}

/// One ancestor application: the branch taken and the sibling left behind.
#[derive(Debug, Clone)]
struct Frame<V> {
    sibling: Term<V>,
    branch: Branch,
}

/// One entered abstraction: its binder and the path that was live outside it.
#[derive(Debug, Clone)]
struct Scope<V> {
    binder: Name,
    path: Vec<Frame<V>>,
}

/// An explicit-stack cursor over an owned term.
///
/// The focus is the subterm currently being visited. Descending into an
/// application detaches the focused child and records the sibling in a path
/// frame; ascending writes the focus back by reconstructing the parent, so
/// siblings stay consistent without a full rebuild. Entering an abstraction
/// body pushes the live path onto a scope stack and starts a fresh one, which
/// is what lets a whole traversal be suspended after any single step and
/// resumed exactly where it left off; no operation here recurses on the call
/// stack.
///
/// Movement operations return `false` (and leave the cursor untouched) when
/// they do not apply to the current focus.
#[derive(Debug, Clone)]
pub struct Traverser<V> {
    focus: Term<V>,
    path: Vec<Frame<V>>,
    scopes: Vec<Scope<V>>,
}

impl<V: Clone + Default> Traverser<V> {
    #[must_use]
    pub fn new(term: Term<V>) -> Self {
        Self {
            focus: term,
            path: Vec::new(),
            scopes: Vec::new(),
        }
    }

    /// The subterm under the cursor.
    #[must_use]
    pub const fn focus(&self) -> &Term<V> {
        &self.focus
    }

    /// Number of abstraction bodies the cursor is currently inside.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    /// Binder of the innermost entered abstraction, if any.
    #[must_use]
    pub fn innermost_binder(&self) -> Option<Name> {
        self.scopes.last().map(|scope| scope.binder)
    }

    /// Descends into the function position of an application.
    pub fn left(&mut self) -> bool {
        match mem::take(&mut self.focus) {
            Term::App(function, argument) => {
                self.path.push(Frame {
                    sibling: *argument,
                    branch: Branch::Left,
                });
                self.focus = *function;
                true
            }
            other => {
                self.focus = other;
                false
            }
        }
    }

    /// Descends into the argument position of an application.
    pub fn right(&mut self) -> bool {
        match mem::take(&mut self.focus) {
            Term::App(function, argument) => {
                self.path.push(Frame {
                    sibling: *function,
                    branch: Branch::Right,
                });
                self.focus = *argument;
                true
            }
            other => {
                self.focus = other;
                false
            }
        }
    }

    /// Ascends one application, writing the focus back into the branch it
    /// came from.
    pub fn up(&mut self) -> bool {
        let Some(frame) = self.path.pop() else {
            return false;
        };
        let child = mem::take(&mut self.focus);
        self.focus = match frame.branch {
            Branch::Left => Term::App(Box::new(child), Box::new(frame.sibling)),
            Branch::Right => Term::App(Box::new(frame.sibling), Box::new(child)),
        };
        true
    }

    /// Enters the body of the focused abstraction, opening a new lexical
    /// scope with an empty path.
    pub fn enter_scope(&mut self) -> bool {
        match mem::take(&mut self.focus) {
            Term::Abs(binder, body) => {
                self.scopes.push(Scope {
                    binder,
                    path: mem::take(&mut self.path),
                });
                self.focus = *body;
                true
            }
            other => {
                self.focus = other;
                false
            }
        }
    }

    /// Leaves the current scope, writing the focus back as the abstraction's
    /// body. Only meaningful once the traversal has climbed back to the top
    /// of the scope (empty path).
    pub fn exit_scope(&mut self) -> bool {
        if !self.path.is_empty() {
            return false;
        }
        let Some(scope) = self.scopes.pop() else {
            return false;
        };
        let body = mem::take(&mut self.focus);
        self.focus = Term::Abs(scope.binder, Box::new(body));
        self.path = scope.path;
        true
    }

    /// The pending argument of the parent application, when the cursor sits
    /// in its function position. A focused abstraction with a right sibling
    /// is a ready beta-redex.
    #[must_use]
    pub fn right_sibling(&self) -> Option<&Term<V>> {
        match self.path.last() {
            Some(Frame {
                branch: Branch::Left,
                sibling,
            }) => Some(sibling),
            _ => None,
        }
    }

    /// When the focus is an abstraction applied to a pending argument, pops
    /// the application frame and replaces the whole redex with
    /// `rewrite(binder, body, argument)`. Returns `false` (without calling
    /// `rewrite`) when the focus is not a ready redex.
    pub fn rewrite_redex<F>(&mut self, rewrite: F) -> bool
    where
        F: FnOnce(Name, Term<V>, Term<V>) -> Term<V>,
    {
        if self.right_sibling().is_none() {
            return false;
        }
        match mem::take(&mut self.focus) {
            Term::Abs(binder, body) => {
                let Some(frame) = self.path.pop() else {
                    return false;
                };
                self.focus = rewrite(binder, *body, frame.sibling);
                true
            }
            other => {
                self.focus = other;
                false
            }
        }
    }

    /// Advances the cursor in depth-first order: descend into the function
    /// position of an application, otherwise climb to the next unvisited
    /// argument branch, exiting scopes as they are exhausted. Returns `true`
    /// when the whole traversal is complete.
    ///
    /// Scope bodies are not entered implicitly; callers decide when to
    /// descend into an abstraction via [`Self::enter_scope`].
    pub fn forward(&mut self) -> bool {
        if matches!(self.focus, Term::App(..)) {
            self.left();
            return false;
        }
        self.next_branch()
    }

    /// Climbs to the nearest ancestor with an unvisited argument branch and
    /// descends into it. Returns `true` when no such branch remains in any
    /// open scope.
    pub fn next_branch(&mut self) -> bool {
        loop {
            while matches!(
                self.path.last(),
                Some(Frame {
                    branch: Branch::Right,
                    ..
                })
            ) {
                self.up();
            }
            if matches!(
                self.path.last(),
                Some(Frame {
                    branch: Branch::Left,
                    ..
                })
            ) {
                self.up();
                self.right();
                return false;
            }
            // Top of the current scope; leave it and keep climbing outside.
            if !self.exit_scope() {
                return true;
            }
        }
    }

    /// Reconstructs the whole term from any cursor position, without moving
    /// the cursor.
    #[must_use]
    pub fn snapshot(&self) -> Term<V> {
        let mut term = rebuild(self.focus.clone(), &self.path);
        for scope in self.scopes.iter().rev() {
            term = Term::Abs(scope.binder, Box::new(term));
            term = rebuild(term, &scope.path);
        }
        term
    }

    /// Consumes the cursor, reconstructing the whole term.
    #[must_use]
    pub fn into_term(mut self) -> Term<V> {
        loop {
            while self.up() {}
            if !self.exit_scope() {
                return self.focus;
            }
        }
    }
}

fn rebuild<V: Clone>(mut term: Term<V>, path: &[Frame<V>]) -> Term<V> {
    for frame in path.iter().rev() {
        term = match frame.branch {
            Branch::Left => Term::App(Box::new(term), Box::new(frame.sibling.clone())),
            Branch::Right => Term::App(Box::new(frame.sibling.clone()), Box::new(term)),
        };
    }
    term
}
