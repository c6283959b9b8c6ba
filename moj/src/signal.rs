use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::rc::Rc;

/// Identifier handed out by [`effect`].
pub type EffectId = usize;

#[derive(Default)]
struct Runtime {
    effects: HashMap<EffectId, Rc<dyn Fn()>>,
    next_id: EffectId,
    current: Option<EffectId>,
}

thread_local! {
    static RUNTIME: RefCell<Runtime> = RefCell::new(Runtime::default());
}

/// A reactive signal holding a value of type T.
///
/// Cloning a signal clones the handle, not the value: every clone reads and
/// writes the same cell and notifies the same subscribers.
#[derive(Clone)]
pub struct Signal<T: 'static + Clone> {
    value: Rc<RefCell<T>>,
    listeners: Rc<RefCell<HashSet<EffectId>>>,
}

impl<T: 'static + Clone> Signal<T> {
    pub fn new(value: T) -> Self {
        Self {
            value: Rc::new(RefCell::new(value)),
            listeners: Rc::new(RefCell::new(HashSet::new())),
        }
    }

    /// Read the value, subscribing the running effect (if any).
    pub fn get(&self) -> T {
        if let Some(effect_id) = RUNTIME.with(|rt| rt.borrow().current) {
            self.subscribe_effect(effect_id);
        }

        self.value.borrow().clone()
    }

    /// Read the value without subscribing anything.
    pub fn peek(&self) -> T {
        self.value.borrow().clone()
    }

    /// Apply `f` to the current value without cloning it or subscribing.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.value.borrow())
    }

    pub fn set(&self, new_value: T) {
        *self.value.borrow_mut() = new_value;
        self.notify();
    }

    pub fn update<F: FnOnce(&T) -> T>(&self, f: F) {
        let new_value = f(&self.value.borrow());
        *self.value.borrow_mut() = new_value;
        self.notify();
    }

    pub fn subscribe_effect(&self, effect_id: EffectId) {
        self.listeners.borrow_mut().insert(effect_id);
    }

    fn notify(&self) {
        // Drop ids whose effect was disposed, then run the rest outside of any borrow.
        let listeners: Vec<EffectId> = {
            let mut listeners = self.listeners.borrow_mut();
            listeners.retain(|id| effect_exists(*id));
            listeners.iter().copied().collect()
        };

        for id in listeners {
            run_effect_by_id(id);
        }
    }

    /// Create a signal whose value follows `f` applied to this one.
    ///
    /// Returns the derived signal together with the id of the effect keeping it
    /// in sync, so that the caller can dispose of it with the owning scope.
    pub fn derive<U: 'static + Clone, F: Fn(&T) -> U + 'static>(
        &self,
        f: F,
    ) -> (Signal<U>, EffectId) {
        let derived = Signal::new(self.with(&f));
        let this = self.clone();
        let target = derived.clone();

        let effect_id = effect(move || {
            let value = f(&this.get());
            target.set(value);
        });

        run_tracked_effect(effect_id, || run_effect_by_id(effect_id));

        (derived, effect_id)
    }
}

impl<T: Clone + fmt::Debug + 'static> fmt::Debug for Signal<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Signal").field(&*self.value.borrow()).finish()
    }
}

impl<T: Clone + fmt::Display + 'static> fmt::Display for Signal<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.peek().fmt(f)
    }
}

impl<T: Clone + Default + 'static> Default for Signal<T> {
    fn default() -> Self {
        Signal::new(T::default())
    }
}

/// Register an effect. It runs whenever a signal it subscribed to changes.
pub fn effect<F: Fn() + 'static>(f: F) -> EffectId {
    RUNTIME.with(|rt| {
        let mut rt = rt.borrow_mut();
        rt.next_id += 1;
        let id = rt.next_id;
        rt.effects.insert(id, Rc::new(f));
        id
    })
}

/// Run `f` with `effect_id` marked as the current effect, so that every
/// signal read inside subscribes it.
pub fn run_tracked_effect<F: FnOnce()>(effect_id: EffectId, f: F) {
    let previous = RUNTIME.with(|rt| rt.borrow_mut().current.replace(effect_id));

    f();

    RUNTIME.with(|rt| rt.borrow_mut().current = previous);
}

pub fn run_effect_by_id(effect_id: EffectId) {
    let effect = RUNTIME.with(|rt| rt.borrow().effects.get(&effect_id).cloned());

    if let Some(effect) = effect {
        (effect)();
    }
}

/// Remove an effect. Signals drop the id lazily on their next notification.
pub fn dispose_effect(effect_id: EffectId) -> bool {
    RUNTIME.with(|rt| rt.borrow_mut().effects.remove(&effect_id).is_some())
}

pub fn effect_exists(effect_id: EffectId) -> bool {
    RUNTIME.with(|rt| rt.borrow().effects.contains_key(&effect_id))
}

/// Macro for ergonomic signal creation: signal!(value)
#[macro_export]
macro_rules! signal {
    ($val:expr) => {
        $crate::signal::Signal::new($val)
    };
}

/// Register an effect, run it once with tracking, and evaluate to its id.
#[macro_export]
macro_rules! effect {
    ($body:expr) => {{
        let effect_fn = move || $body;
        let effect_id = $crate::signal::effect(effect_fn);

        $crate::signal::run_tracked_effect(effect_id, || {
            $crate::signal::run_effect_by_id(effect_id);
        });

        effect_id
    }};
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn count_signal_starts_unset_and_takes_a_value() {
        let count = signal!(None::<u64>);
        assert_eq!(count.get(), None);

        count.set(Some(42));
        assert_eq!(count.get(), Some(42));

        count.update(|prev| prev.map(|n| n + 1));
        assert_eq!(count.peek(), Some(43));
    }

    #[test]
    fn effect_macro_tracks_reads() {
        let count = signal!(None::<u64>);
        let rendered = Rc::new(RefCell::new(String::new()));

        let id = {
            let count = count.clone();
            let rendered = rendered.clone();
            effect!({
                *rendered.borrow_mut() = match count.get() {
                    Some(n) => n.to_string(),
                    None => "Loading...".to_owned(),
                };
            })
        };

        assert_eq!(*rendered.borrow(), "Loading...");

        count.set(Some(7));
        assert_eq!(*rendered.borrow(), "7");

        assert!(dispose_effect(id));
    }

    #[test]
    fn disposed_effect_stops_running() {
        let count = signal!(0u64);
        let runs = Rc::new(Cell::new(0));

        let id = {
            let count = count.clone();
            let runs = runs.clone();
            effect!({
                count.get();
                runs.set(runs.get() + 1);
            })
        };
        assert_eq!(runs.get(), 1);

        count.set(1);
        assert_eq!(runs.get(), 2);

        assert!(dispose_effect(id));
        assert!(!dispose_effect(id));

        count.set(2);
        assert_eq!(runs.get(), 2);
        assert!(!effect_exists(id));
    }

    #[test]
    fn peek_does_not_subscribe() {
        let count = signal!(1u64);
        let runs = Rc::new(Cell::new(0));

        let id = {
            let count = count.clone();
            let runs = runs.clone();
            effect!({
                count.peek();
                runs.set(runs.get() + 1);
            })
        };

        count.set(5);
        assert_eq!(runs.get(), 1);
        dispose_effect(id);
    }

    #[test]
    fn derive_follows_source() {
        let count = signal!(None::<u64>);
        let (text, id) = count.derive(|c| c.map_or_else(|| "Loading...".to_owned(), |n| n.to_string()));

        assert_eq!(text.get(), "Loading...");

        count.set(Some(42));
        assert_eq!(text.get(), "42");

        dispose_effect(id);
        count.set(Some(1));
        assert_eq!(text.get(), "42");
    }

    #[test]
    fn nested_tracking_restores_outer_effect() {
        let a = signal!(1u64);
        let b = signal!(2u64);
        let sum = Rc::new(Cell::new(0));

        let outer = {
            let (a, b, sum) = (a.clone(), b.clone(), sum.clone());
            effect!({
                let (_inner, inner_id) = a.derive(|v| v * 10);
                dispose_effect(inner_id);
                // Still tracked by the outer effect after the inner derive returned.
                sum.set(a.peek() + b.get());
            })
        };
        assert_eq!(sum.get(), 3);

        b.set(5);
        assert_eq!(sum.get(), 6);
        dispose_effect(outer);
    }
}
