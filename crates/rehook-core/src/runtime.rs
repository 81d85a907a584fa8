use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use web_time::{Duration, Instant};

use crate::error::HookError;
use crate::store::HookStore;

thread_local! {
    static CURRENT_PASS: RefCell<Option<PassContext>> = const { RefCell::new(None) };
}

/// What a component constructor returns: a render step plus whatever action
/// methods the concrete type adds.
pub trait Instance: 'static {
    fn render(&self);
}

pub type Component<I> = Rc<dyn Fn() -> Result<I, HookError>>;

/// Re-render entry point used by setters, erased over the instance type.
pub(crate) trait Rerender {
    fn rerender(self: Rc<Self>) -> Result<(), HookError>;
}

/// Hooks reach the running renderer through this while a pass is active.
#[derive(Clone)]
pub(crate) struct PassContext {
    pub store: Rc<RefCell<HookStore>>,
    pub renderer: Weak<dyn Rerender>,
}

pub(crate) fn current_pass() -> Option<PassContext> {
    CURRENT_PASS.with(|cur| cur.borrow().clone())
}

/// Installs a pass context for the duration of a constructor call and puts
/// back whatever was there before, so nested passes unwind cleanly.
struct PassGuard {
    prev: Option<PassContext>,
}

impl PassGuard {
    fn enter(cx: PassContext) -> Self {
        let prev = CURRENT_PASS.with(|cur| cur.borrow_mut().replace(cx));
        PassGuard { prev }
    }
}

impl Drop for PassGuard {
    fn drop(&mut self) {
        let prev = self.prev.take();
        CURRENT_PASS.with(|cur| *cur.borrow_mut() = prev);
    }
}

#[derive(Clone, Debug)]
pub struct RendererConfig {
    /// How deep re-renders triggered from inside a pass may nest.
    pub max_render_depth: usize,
    /// Log a warning when a pass calls a different number of hooks than the
    /// one before it.
    pub warn_on_hook_count_change: bool,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            max_render_depth: 32,
            warn_on_hook_count_change: true,
        }
    }
}

impl RendererConfig {
    pub fn with_max_render_depth(mut self, depth: usize) -> Self {
        self.max_render_depth = depth;
        self
    }

    pub fn with_hook_count_warnings(mut self, enabled: bool) -> Self {
        self.warn_on_hook_count_change = enabled;
        self
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// Completed render passes, nested ones included.
    pub passes: u64,
    pub slots: usize,
    pub last_pass: Duration,
}

struct RendererInner<I: Instance> {
    config: RendererConfig,
    store: Rc<RefCell<HookStore>>,
    component: RefCell<Option<Component<I>>>,
    instance: RefCell<Option<Rc<I>>>,
    /// Start sequence of the pass whose instance is currently published.
    published: Cell<Option<u64>>,
    started: Cell<u64>,
    depth: Cell<usize>,
    stats: Cell<RenderStats>,
}

impl<I: Instance> RendererInner<I> {
    fn run_pass(self: &Rc<Self>) -> Result<(), HookError> {
        let Some(component) = self.component.borrow().clone() else {
            return Ok(());
        };

        let depth = self.depth.get() + 1;
        if depth > self.config.max_render_depth {
            log::error!(
                "render: nested {} passes deep; giving up",
                self.config.max_render_depth
            );
            return Err(HookError::RenderLoop {
                limit: self.config.max_render_depth,
            });
        }
        self.depth.set(depth);

        let seq = self.started.get();
        self.started.set(seq + 1);
        let t0 = Instant::now();

        let resume = self.store.borrow_mut().begin_pass(seq);
        let renderer: Weak<dyn Rerender> = Rc::downgrade(self) as Weak<dyn Rerender>;
        let built = {
            let _guard = PassGuard::enter(PassContext {
                store: self.store.clone(),
                renderer,
            });
            component()
        };
        let changed = self.store.borrow_mut().end_pass(resume);
        self.depth.set(depth - 1);

        if let Some((before, now)) = changed
            && self.config.warn_on_hook_count_change
        {
            log::warn!(
                "render: pass {} called {} hooks, previous pass called {}. \
                 Hooks must not be called conditionally.",
                seq,
                now,
                before
            );
        }

        let instance = Rc::new(built?);
        instance.render();

        // A nested pass that finished while this one was suspended built its
        // instance from newer state; keep that one.
        if self.published.get().is_none_or(|p| p < seq) {
            self.published.set(Some(seq));
            *self.instance.borrow_mut() = Some(instance);
        }

        let mut stats = self.stats.get();
        stats.passes += 1;
        stats.slots = self.store.borrow().len();
        stats.last_pass = t0.elapsed();
        self.stats.set(stats);

        log::debug!(
            "render: pass {} done (depth {}, {} slots) in {:?}",
            seq,
            depth,
            stats.slots,
            stats.last_pass
        );
        Ok(())
    }
}

impl<I: Instance> Rerender for RendererInner<I> {
    fn rerender(self: Rc<Self>) -> Result<(), HookError> {
        self.run_pass()
    }
}

/// Owns the slot sequence and component handle for one component.
pub struct Renderer<I: Instance> {
    inner: Rc<RendererInner<I>>,
}

impl<I: Instance> Clone for Renderer<I> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<I: Instance> Default for Renderer<I> {
    fn default() -> Self {
        Self::new(RendererConfig::default())
    }
}

impl<I: Instance> Renderer<I> {
    pub fn new(config: RendererConfig) -> Self {
        Self {
            inner: Rc::new(RendererInner {
                config,
                store: Rc::new(RefCell::new(HookStore::new())),
                component: RefCell::new(None),
                instance: RefCell::new(None),
                published: Cell::new(None),
                started: Cell::new(0),
                depth: Cell::new(0),
                stats: Cell::new(RenderStats::default()),
            }),
        }
    }

    /// Stores `component`, runs one pass over it and returns the handle
    /// through which its latest instance can be reached.
    pub fn render<F>(&self, component: F) -> Result<Handle<I>, HookError>
    where
        F: Fn() -> Result<I, HookError> + 'static,
    {
        *self.inner.component.borrow_mut() = Some(Rc::new(component));
        self.inner.run_pass()?;
        Ok(self.handle())
    }

    fn handle(&self) -> Handle<I> {
        Handle {
            inner: self.inner.clone(),
        }
    }

    pub fn config(&self) -> &RendererConfig {
        &self.inner.config
    }
}

/// Renders `component` on a fresh renderer with default settings.
pub fn render<I, F>(component: F) -> Result<Handle<I>, HookError>
where
    I: Instance,
    F: Fn() -> Result<I, HookError> + 'static,
{
    Renderer::default().render(component)
}

/// Component handle: the stored constructor plus the latest instance.
pub struct Handle<I: Instance> {
    inner: Rc<RendererInner<I>>,
}

impl<I: Instance> Clone for Handle<I> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<I: Instance> Handle<I> {
    /// Most recently published instance.
    pub fn instance(&self) -> Rc<I> {
        self.inner
            .instance
            .borrow()
            .clone()
            .expect("a handle is only created after a successful pass")
    }

    /// Runs the stored component again, as a setter would.
    pub fn rerender(&self) -> Result<(), HookError> {
        self.inner.run_pass()
    }

    /// Slot sequence in `[0, "", [0, ""], []]` form.
    pub fn snapshot(&self) -> String {
        self.inner.store.borrow().to_string()
    }

    pub fn stats(&self) -> RenderStats {
        self.inner.stats.get()
    }

    pub fn with_store<R>(&self, f: impl FnOnce(&HookStore) -> R) -> R {
        f(&self.inner.store.borrow())
    }
}
