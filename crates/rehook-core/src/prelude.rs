pub use crate::deps;
pub use crate::effects::{use_effect, use_effect_each_render};
pub use crate::error::HookError;
pub use crate::runtime::{
    Component, Handle, Instance, RenderStats, Renderer, RendererConfig, render,
};
pub use crate::store::{HookStore, Slot};
pub use crate::state::{Setter, use_state, use_state_with};
pub use crate::value::{Deps, HookValue};
