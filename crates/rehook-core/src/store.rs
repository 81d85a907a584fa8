use std::fmt;

use crate::value::{Deps, HookValue};

/// One persisted position in a component's slot sequence.
pub enum Slot {
    State(Box<dyn HookValue>),
    /// Dependencies recorded by the last run of an effect. `None` when the
    /// effect was declared without a dependency list.
    Effect(Option<Deps>),
}

impl fmt::Debug for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Slot::State(value) => fmt::Debug::fmt(value, f),
            Slot::Effect(Some(deps)) => fmt::Debug::fmt(deps, f),
            Slot::Effect(None) => f.write_str("_"),
        }
    }
}

/// What an effect finds in its slot when it runs.
pub(crate) enum PreviousDeps<'a> {
    Unset,
    Absent,
    Recorded(&'a Deps),
}

/// Cursor and pass number of a pass interrupted by a nested one.
pub(crate) struct Resume {
    cursor: usize,
    pass: u64,
}

/// Slot sequence for a single component, plus the cursor of the pass that is
/// currently running.
#[derive(Default)]
pub struct HookStore {
    slots: Vec<Slot>,
    /// Start number of the pass that last wrote each slot.
    written_by: Vec<u64>,
    cursor: usize,
    pass: u64,
    last_pass_len: Option<usize>,
}

impl HookStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn slot(&self, index: usize) -> Option<&Slot> {
        self.slots.get(index)
    }

    /// Resets the cursor for pass number `pass` and hands back the state of
    /// the pass being interrupted, if any.
    pub(crate) fn begin_pass(&mut self, pass: u64) -> Resume {
        Resume {
            cursor: std::mem::replace(&mut self.cursor, 0),
            pass: std::mem::replace(&mut self.pass, pass),
        }
    }

    /// Closes a pass, restoring the interrupted one. Returns the number of
    /// hooks this pass and the previous completed pass used, when they differ.
    pub(crate) fn end_pass(&mut self, resume: Resume) -> Option<(usize, usize)> {
        let used = std::mem::replace(&mut self.cursor, resume.cursor);
        self.pass = resume.pass;
        let previous = self.last_pass_len.replace(used);
        previous.filter(|&p| p != used).map(|p| (p, used))
    }

    /// Claims the slot under the cursor and moves the cursor on.
    pub(crate) fn advance(&mut self) -> usize {
        let index = self.cursor;
        self.cursor += 1;
        index
    }

    /// Returns the state stored at `index`, populating it with `init()` first
    /// if the slot is new or holds something other than a `T`.
    pub(crate) fn state_or_insert_with<T>(&mut self, index: usize, init: impl FnOnce() -> T) -> T
    where
        T: HookValue + Clone,
    {
        if let Some(Slot::State(value)) = self.slots.get(index)
            && let Some(value) = value.as_any().downcast_ref::<T>()
        {
            return value.clone();
        }

        if index < self.slots.len() {
            log::warn!(
                "use_state: slot {} held {:?}; replacing. \
                 Hooks must be called in the same order on every render.",
                index,
                self.slots[index]
            );
        }
        let value = init();
        self.put(index, Slot::State(Box::new(value.clone())));
        value
    }

    /// Overwrites the state at `index`.
    pub(crate) fn write_state<T: HookValue>(&mut self, index: usize, value: T) {
        self.put(index, Slot::State(Box::new(value)));
    }

    pub(crate) fn read_state<T: HookValue + Clone>(&self, index: usize) -> Option<T> {
        match self.slots.get(index) {
            Some(Slot::State(value)) => value.as_any().downcast_ref::<T>().cloned(),
            _ => None,
        }
    }

    pub(crate) fn previous_deps(&self, index: usize) -> PreviousDeps<'_> {
        match self.slots.get(index) {
            None => PreviousDeps::Unset,
            Some(Slot::Effect(None)) => PreviousDeps::Absent,
            Some(Slot::Effect(Some(deps))) => PreviousDeps::Recorded(deps),
            Some(other) => {
                log::warn!(
                    "use_effect: slot {} held state {:?}; treating as a first run.",
                    index,
                    other
                );
                PreviousDeps::Unset
            }
        }
    }

    /// Records an effect's dependencies, unless a pass that started after
    /// the running one already recorded newer ones while the callback ran.
    /// Returns whether the slot was written.
    pub(crate) fn record_deps(&mut self, index: usize, deps: Option<Deps>) -> bool {
        if self.written_by.get(index).is_some_and(|&by| by > self.pass) {
            return false;
        }
        self.put(index, Slot::Effect(deps));
        true
    }

    fn put(&mut self, index: usize, slot: Slot) {
        if index < self.slots.len() {
            self.slots[index] = slot;
            self.written_by[index] = self.pass;
        } else {
            // Slots are claimed in order, so a new one always lands at the end.
            debug_assert_eq!(index, self.slots.len());
            self.slots.push(slot);
            self.written_by.push(self.pass);
        }
    }
}

/// Renders the slot sequence as `[0, "", [0, ""], []]`.
impl fmt::Display for HookStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, slot) in self.slots.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{slot:?}")?;
        }
        f.write_str("]")
    }
}
