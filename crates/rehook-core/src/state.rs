use std::cell::RefCell;
use std::fmt;
use std::marker::PhantomData;
use std::rc::{Rc, Weak};

use crate::error::HookError;
use crate::runtime::{Rerender, current_pass};
use crate::store::HookStore;
use crate::value::HookValue;

/// Order-based state: the Nth `use_state` call of a pass always owns slot N.
///
/// Returns the slot's current value together with a [`Setter`] bound to that
/// slot. `initial` is only used the first time the slot is populated.
pub fn use_state<T>(initial: T) -> Result<(T, Setter<T>), HookError>
where
    T: HookValue + Clone,
{
    use_state_named("use_state", || initial)
}

/// Like [`use_state`], but only builds the initial value when it is needed.
pub fn use_state_with<T>(init: impl FnOnce() -> T) -> Result<(T, Setter<T>), HookError>
where
    T: HookValue + Clone,
{
    use_state_named("use_state_with", init)
}

fn use_state_named<T>(
    hook: &'static str,
    init: impl FnOnce() -> T,
) -> Result<(T, Setter<T>), HookError>
where
    T: HookValue + Clone,
{
    let cx = current_pass().ok_or(HookError::NoActiveRender { hook })?;

    let (index, value) = {
        let mut store = cx.store.borrow_mut();
        let index = store.advance();
        (index, store.state_or_insert_with(index, init))
    };
    log::trace!("{hook}: slot {index} = {value:?}");

    let setter = Setter {
        index,
        store: Rc::downgrade(&cx.store),
        renderer: cx.renderer,
        _marker: PhantomData,
    };
    Ok((value, setter))
}

/// Writes one state slot and re-renders the owning component.
///
/// The slot index is fixed when the setter is created, so a setter handed out
/// by an old instance still targets the right slot after any number of
/// re-renders.
pub struct Setter<T> {
    index: usize,
    store: Weak<RefCell<HookStore>>,
    renderer: Weak<dyn Rerender>,
    _marker: PhantomData<fn(T)>,
}

impl<T> Clone for Setter<T> {
    fn clone(&self) -> Self {
        Self {
            index: self.index,
            store: self.store.clone(),
            renderer: self.renderer.clone(),
            _marker: PhantomData,
        }
    }
}

impl<T> fmt::Debug for Setter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Setter").field("index", &self.index).finish()
    }
}

impl<T: HookValue + Clone> Setter<T> {
    pub fn index(&self) -> usize {
        self.index
    }

    /// Stores `value` and runs a full synchronous re-render, even when
    /// `value` equals what the slot already holds.
    pub fn set(&self, value: T) -> Result<(), HookError> {
        let dropped = HookError::RendererDropped { index: self.index };
        let store = self.store.upgrade().ok_or(dropped.clone())?;
        let renderer = self.renderer.upgrade().ok_or(dropped)?;

        log::trace!("setter: slot {} <- {:?}", self.index, value);
        store.borrow_mut().write_state(self.index, value);
        drop(store);

        renderer.rerender()
    }

    /// Computes the next value from what the slot holds now, then behaves
    /// like [`Setter::set`].
    pub fn update(&self, f: impl FnOnce(&T) -> T) -> Result<(), HookError> {
        let store = self
            .store
            .upgrade()
            .ok_or(HookError::RendererDropped { index: self.index })?;
        let current = store.borrow().read_state::<T>(self.index);
        drop(store);

        match current {
            Some(current) => self.set(f(&current)),
            None => Err(HookError::SlotTypeMismatch { index: self.index }),
        }
    }
}
