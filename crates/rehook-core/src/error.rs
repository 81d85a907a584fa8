use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HookError {
    /// A hook ran while no render pass was active on this thread.
    #[error("`{hook}` called outside of an active render pass")]
    NoActiveRender { hook: &'static str },

    /// A setter outlived the renderer that handed it out.
    #[error("setter for slot {index} outlived its renderer")]
    RendererDropped { index: usize },

    /// The slot a setter targets now holds a value of another type.
    #[error("slot {index} no longer holds the setter's state type")]
    SlotTypeMismatch { index: usize },

    /// State updates made during render kept scheduling nested passes.
    #[error("re-render nested deeper than {limit} passes")]
    RenderLoop { limit: usize },
}
