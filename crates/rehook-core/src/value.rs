use std::any::Any;
use std::fmt;

use smallvec::SmallVec;

/// Anything that can live in a hook slot or be listed as an effect dependency.
///
/// `same_value` is the comparison effects use to decide whether a dependency
/// moved: both sides must have the same concrete type and compare equal.
///
/// Equality is `PartialEq`, so a float dependency holding `NAN` never equals
/// itself and its effect runs on every pass.
pub trait HookValue: Any + fmt::Debug {
    fn as_any(&self) -> &dyn Any;
    fn same_value(&self, other: &dyn HookValue) -> bool;
}

impl<T: Any + fmt::Debug + PartialEq> HookValue for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn same_value(&self, other: &dyn HookValue) -> bool {
        other
            .as_any()
            .downcast_ref::<T>()
            .is_some_and(|other| self == other)
    }
}

/// Ordered dependency list recorded by one `use_effect` call.
#[derive(Default)]
pub struct Deps(SmallVec<[Box<dyn HookValue>; 4]>);

impl Deps {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push<T: HookValue>(&mut self, value: T) {
        self.0.push(Box::new(value));
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&dyn HookValue> {
        self.0.get(index).map(|v| &**v)
    }

    /// True when any entry of `self` differs from the entry at the same
    /// position in `previous`. Entries past the end of `previous` count as
    /// changed; entries `previous` has beyond `self` are ignored.
    pub fn changed_since(&self, previous: &Deps) -> bool {
        self.0
            .iter()
            .enumerate()
            .any(|(i, dep)| previous.get(i).is_none_or(|old| !dep.same_value(old)))
    }
}

impl fmt::Debug for Deps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.0.iter()).finish()
    }
}

/// Builds a [`Deps`] list: `deps![count, word.clone()]`, or `deps![]`.
#[macro_export]
macro_rules! deps {
    ($($dep:expr),* $(,)?) => {{
        #[allow(unused_mut)]
        let mut deps = $crate::Deps::new();
        $( deps.push($dep); )*
        deps
    }};
}
