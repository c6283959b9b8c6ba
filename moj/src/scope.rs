//! Lifetime scopes for mounted views.
//!
//! A [`Scope`] is the cancellation token of everything a view starts while it
//! is mounted: effects, event listeners, in-flight requests. Disposing it runs
//! the registered cleanups once, in reverse registration order, and flips
//! [`Scope::is_alive`] to false so that late async completions can tell they
//! must not touch state anymore.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use crate::signal::{self, EffectId};

type Cleanup = Box<dyn FnOnce()>;

struct ScopeInner {
    alive: Cell<bool>,
    cleanups: RefCell<Vec<Cleanup>>,
    children: RefCell<Vec<Scope>>,
}

#[derive(Clone)]
pub struct Scope {
    inner: Rc<ScopeInner>,
}

impl Scope {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(ScopeInner {
                alive: Cell::new(true),
                cleanups: RefCell::new(Vec::new()),
                children: RefCell::new(Vec::new()),
            }),
        }
    }

    pub fn is_alive(&self) -> bool {
        self.inner.alive.get()
    }

    /// Create a scope that is disposed together with this one.
    ///
    /// A child created from an already disposed scope starts out disposed.
    pub fn child(&self) -> Scope {
        let child = Scope::new();

        if self.is_alive() {
            self.inner.children.borrow_mut().push(child.clone());
        } else {
            child.dispose();
        }

        child
    }

    /// Register a cleanup. On a disposed scope it runs immediately.
    pub fn on_dispose<F: FnOnce() + 'static>(&self, f: F) {
        if self.is_alive() {
            self.inner.cleanups.borrow_mut().push(Box::new(f));
        } else {
            f();
        }
    }

    /// Tie an effect to this scope.
    pub fn own_effect(&self, effect_id: EffectId) {
        self.on_dispose(move || {
            signal::dispose_effect(effect_id);
        });
    }

    pub fn dispose(&self) {
        if !self.inner.alive.replace(false) {
            return;
        }

        let children = std::mem::take(&mut *self.inner.children.borrow_mut());
        for child in children.iter().rev() {
            child.dispose();
        }

        let cleanups = std::mem::take(&mut *self.inner.cleanups.borrow_mut());
        for cleanup in cleanups.into_iter().rev() {
            cleanup();
        }
    }
}

impl Default for Scope {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scope")
            .field("alive", &self.is_alive())
            .field("cleanups", &self.inner.cleanups.borrow().len())
            .field("children", &self.inner.children.borrow().len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{effect, signal};

    #[test]
    fn dispose_runs_cleanups_once_in_reverse_order() {
        let scope = Scope::new();
        let log = Rc::new(RefCell::new(Vec::new()));

        for name in ["listener", "request"] {
            let log = log.clone();
            scope.on_dispose(move || log.borrow_mut().push(name));
        }

        scope.dispose();
        scope.dispose();

        assert!(!scope.is_alive());
        assert_eq!(*log.borrow(), vec!["request", "listener"]);
    }

    #[test]
    fn cleanup_on_disposed_scope_runs_immediately() {
        let scope = Scope::new();
        scope.dispose();

        let ran = Rc::new(Cell::new(false));
        let flag = ran.clone();
        scope.on_dispose(move || flag.set(true));

        assert!(ran.get());
    }

    #[test]
    fn children_are_disposed_with_parent() {
        let root = Scope::new();
        let users = root.child();
        let jokes = root.child();

        root.dispose();

        assert!(!users.is_alive());
        assert!(!jokes.is_alive());
        assert!(!root.child().is_alive());
    }

    #[test]
    fn owned_effects_stop_after_dispose() {
        let scope = Scope::new();
        let count = signal!(None::<u64>);
        let seen = Rc::new(Cell::new(None));

        let id = {
            let count = count.clone();
            let seen = seen.clone();
            effect!(seen.set(count.get()))
        };
        scope.own_effect(id);

        count.set(Some(3));
        assert_eq!(seen.get(), Some(3));

        scope.dispose();
        count.set(Some(4));
        assert_eq!(seen.get(), Some(3));
    }
}
