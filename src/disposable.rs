//! Disposal state tracking for objects that own a host resource.
//!
//! Every wrapper in this crate owns exactly one native handle. The handle becomes invalid the
//! moment the wrapper is disposed (and some hosts recycle handle values), so every read of the
//! handle goes through a [DependsOnDisposedState] guard that fails loudly when the owner has
//! already been disposed:
//!
//! ```
//! use webgl_handles::{DependsOnDisposedState, DisposedFlag};
//!
//! let flag = DisposedFlag::new();
//! let guarded = DependsOnDisposedState::valid_before_disposed(&flag, 7);
//!
//! assert_eq!(guarded.get().ok(), Some(&7));
//!
//! flag.set();
//!
//! assert!(guarded.get().is_err());
//! ```
use std::cell::Cell;
use std::rc::Rc;

use crate::error::{GlError, InvalidState};

/// Implemented by objects that own a host resource that must be released explicitly.
///
/// Once [dispose] has run, [is_disposed] must return `true` forever after. Calling [dispose] more
/// than once must be a no-op and it must never panic.
pub trait Disposable {
    fn is_disposed(&self) -> bool;

    fn dispose(&self);
}

/// The disposed flag of a single owner.
///
/// Clones share the same underlying flag: the owner keeps one clone and hands others to the
/// [DependsOnDisposedState] values whose validity depends on it.
#[derive(Clone, Default, Debug)]
pub struct DisposedFlag {
    disposed: Rc<Cell<bool>>,
}

impl DisposedFlag {
    pub fn new() -> Self {
        DisposedFlag::default()
    }

    pub fn is_set(&self) -> bool {
        self.disposed.get()
    }

    /// Marks the owner as disposed. There is no way to clear the flag again.
    pub fn set(&self) {
        self.disposed.set(true);
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum ValidWhen {
    BeforeDisposed,
    AfterDisposed,
}

/// A value that may only be accessed while its owner is in a particular disposal state.
///
/// The validity window is fixed at construction by choosing either [valid_before_disposed] or
/// [valid_after_disposed].
#[derive(Debug)]
pub struct DependsOnDisposedState<T> {
    owner: DisposedFlag,
    valid_when: ValidWhen,
    value: T,
}

impl<T> DependsOnDisposedState<T> {
    /// Access to `value` is permitted only until `owner` is disposed.
    pub fn valid_before_disposed(owner: &DisposedFlag, value: T) -> Self {
        DependsOnDisposedState {
            owner: owner.clone(),
            valid_when: ValidWhen::BeforeDisposed,
            value,
        }
    }

    /// Access to `value` is permitted only once `owner` has been disposed.
    pub fn valid_after_disposed(owner: &DisposedFlag, value: T) -> Self {
        DependsOnDisposedState {
            owner: owner.clone(),
            valid_when: ValidWhen::AfterDisposed,
            value,
        }
    }

    pub fn get(&self) -> Result<&T, GlError> {
        self.ensure_valid()?;

        Ok(&self.value)
    }

    pub fn set(&mut self, value: T) -> Result<(), GlError> {
        self.ensure_valid()?;

        self.value = value;

        Ok(())
    }

    fn ensure_valid(&self) -> Result<(), InvalidState> {
        match self.valid_when {
            ValidWhen::BeforeDisposed if self.owner.is_set() => Err(InvalidState::AlreadyDisposed),
            ValidWhen::AfterDisposed if !self.owner.is_set() => Err(InvalidState::NotDisposed),
            _ => Ok(()),
        }
    }
}

/// Runs `f`, then disposes every object in `disposables` in reverse order.
///
/// The objects are disposed regardless of how `f` exits: when it returns (an `Ok` or an `Err`)
/// and when it unwinds. The outcome of `f` is returned unchanged.
pub fn using_disposables<F, R>(disposables: &[&dyn Disposable], f: F) -> R
where
    F: FnOnce() -> R,
{
    let _guard = DisposeOnExit { disposables };

    f()
}

struct DisposeOnExit<'a, 'b> {
    disposables: &'a [&'b dyn Disposable],
}

impl Drop for DisposeOnExit<'_, '_> {
    fn drop(&mut self) {
        for disposable in self.disposables.iter().rev() {
            disposable.dispose();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::cell::RefCell;
    use std::panic::{self, AssertUnwindSafe};

    struct Tracked<'a> {
        id: usize,
        flag: DisposedFlag,
        log: &'a RefCell<Vec<usize>>,
    }

    impl<'a> Tracked<'a> {
        fn new(id: usize, log: &'a RefCell<Vec<usize>>) -> Self {
            Tracked {
                id,
                flag: DisposedFlag::new(),
                log,
            }
        }
    }

    impl Disposable for Tracked<'_> {
        fn is_disposed(&self) -> bool {
            self.flag.is_set()
        }

        fn dispose(&self) {
            if !self.flag.is_set() {
                self.log.borrow_mut().push(self.id);
                self.flag.set();
            }
        }
    }

    #[test]
    fn test_valid_before_disposed() {
        let flag = DisposedFlag::new();
        let mut guarded = DependsOnDisposedState::valid_before_disposed(&flag, 1);

        assert_eq!(guarded.get(), Ok(&1));
        assert_eq!(guarded.set(2), Ok(()));
        assert_eq!(guarded.get(), Ok(&2));

        flag.set();

        assert_eq!(
            guarded.get(),
            Err(GlError::InvalidState(InvalidState::AlreadyDisposed))
        );
        assert_eq!(
            guarded.set(3),
            Err(GlError::InvalidState(InvalidState::AlreadyDisposed))
        );
    }

    #[test]
    fn test_valid_after_disposed() {
        let flag = DisposedFlag::new();
        let mut guarded = DependsOnDisposedState::valid_after_disposed(&flag, "report");

        assert_eq!(
            guarded.get(),
            Err(GlError::InvalidState(InvalidState::NotDisposed))
        );
        assert!(guarded.set("other").is_err());

        flag.set();

        assert_eq!(guarded.get(), Ok(&"report"));
    }

    #[test]
    fn test_rejected_set_leaves_value_untouched() {
        let flag = DisposedFlag::new();
        let mut guarded = DependsOnDisposedState::valid_after_disposed(&flag, 10);

        assert!(guarded.set(20).is_err());

        flag.set();

        assert_eq!(guarded.get(), Ok(&10));
    }

    #[test]
    fn test_invalid_state_messages() {
        let flag = DisposedFlag::new();
        let guarded = DependsOnDisposedState::valid_before_disposed(&flag, ());

        flag.set();

        let message = guarded.get().unwrap_err().to_string();

        assert_eq!(message, "Invalid state: Already disposed");
        assert_eq!(
            GlError::from(InvalidState::NotDisposed).to_string(),
            "Invalid state: Not disposed"
        );
    }

    #[test]
    fn test_using_disposables_reverse_order() {
        let log = RefCell::new(Vec::new());
        let a = Tracked::new(0, &log);
        let b = Tracked::new(1, &log);
        let c = Tracked::new(2, &log);

        let result = using_disposables(&[&a, &b, &c], || {
            assert!(log.borrow().is_empty());

            42
        });

        assert_eq!(result, 42);
        assert_eq!(*log.borrow(), vec![2, 1, 0]);
        assert!(a.is_disposed() && b.is_disposed() && c.is_disposed());
    }

    #[test]
    fn test_using_disposables_propagates_error() {
        let log = RefCell::new(Vec::new());
        let a = Tracked::new(0, &log);
        let b = Tracked::new(1, &log);

        let result: Result<(), &str> = using_disposables(&[&a, &b], || Err("failed"));

        assert_eq!(result, Err("failed"));
        assert_eq!(*log.borrow(), vec![1, 0]);
    }

    #[test]
    fn test_using_disposables_on_unwind() {
        let log = RefCell::new(Vec::new());
        let a = Tracked::new(0, &log);
        let b = Tracked::new(1, &log);

        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            using_disposables(&[&a, &b], || panic!("work failed"))
        }));

        assert!(outcome.is_err());
        assert_eq!(*log.borrow(), vec![1, 0]);
    }
}
