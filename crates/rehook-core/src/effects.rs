use crate::error::HookError;
use crate::runtime::current_pass;
use crate::store::PreviousDeps;
use crate::value::Deps;

/// Runs `callback` on the first pass and again whenever an entry of `deps`
/// differs from the list recorded by the previous pass. `deps![]` runs once.
pub fn use_effect(callback: impl FnOnce(), deps: Deps) -> Result<(), HookError> {
    run_effect("use_effect", callback, Some(deps))
}

/// Effect without a dependency list: runs on every pass.
pub fn use_effect_each_render(callback: impl FnOnce()) -> Result<(), HookError> {
    run_effect("use_effect_each_render", callback, None)
}

fn run_effect(
    hook: &'static str,
    callback: impl FnOnce(),
    deps: Option<Deps>,
) -> Result<(), HookError> {
    let cx = current_pass().ok_or(HookError::NoActiveRender { hook })?;

    let (index, changed) = {
        let mut store = cx.store.borrow_mut();
        let index = store.advance();
        let changed = match (store.previous_deps(index), &deps) {
            (PreviousDeps::Unset | PreviousDeps::Absent, _) | (_, None) => true,
            (PreviousDeps::Recorded(old), Some(new)) => new.changed_since(old),
        };
        (index, changed)
    };
    log::trace!("{hook}: slot {index} deps {deps:?} changed={changed}");

    // The store is not borrowed here: the callback may call setters.
    if changed {
        callback();
    }

    if !cx.store.borrow_mut().record_deps(index, deps) {
        log::trace!("{hook}: slot {index} already recorded by a newer pass");
    }
    Ok(())
}
