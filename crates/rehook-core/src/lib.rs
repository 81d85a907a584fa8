//! # Hooks, slots, and re-renders
//!
//! rehook runs a component function over and over and lets it keep state
//! between runs. There are three main pieces:
//!
//! - `Renderer` / `render` — runs the component and keeps its latest instance.
//! - `use_state` — a value that survives re-renders, plus a `Setter` for it.
//! - `use_effect` — a side effect that only re-runs when its dependencies move.
//!
//! ## Components
//!
//! A component is a plain function that calls hooks and returns something
//! implementing [`Instance`]:
//!
//! ```rust
//! use rehook_core::*;
//!
//! struct Counter {
//!     count: i32,
//!     set_count: Setter<i32>,
//! }
//!
//! impl Instance for Counter {
//!     fn render(&self) {
//!         println!("Count is: {}", self.count);
//!     }
//! }
//!
//! impl Counter {
//!     fn increment(&self) -> Result<(), HookError> {
//!         self.set_count.set(self.count + 1)
//!     }
//! }
//!
//! fn counter() -> Result<Counter, HookError> {
//!     let (count, set_count) = use_state(0)?;
//!     Ok(Counter { count, set_count })
//! }
//!
//! let handle = render(counter)?;
//! handle.instance().increment()?;
//! assert_eq!(handle.instance().count, 1);
//! # Ok::<(), HookError>(())
//! ```
//!
//! ## Slots
//!
//! Hooks are order-based: the Nth hook call in a pass always refers to the Nth
//! stored slot. Calling hooks conditionally, in loops with a changing count,
//! or after an early return breaks that mapping. Mismatches are logged, not
//! prevented.
//!
//! Each setter remembers the slot it was created for, so setters captured by
//! an old instance keep working after the component has re-rendered.
//!
//! ## Effects
//!
//! ```rust
//! use rehook_core::*;
//!
//! struct Title;
//! impl Instance for Title {
//!     fn render(&self) {}
//! }
//!
//! fn title() -> Result<Title, HookError> {
//!     let (name, _set_name) = use_state(String::from("rehook"))?;
//!     use_effect(|| log::info!("name is now {name}"), deps![name.clone()])?;
//!     use_effect(|| log::info!("mounted"), deps![])?;
//!     Ok(Title)
//! }
//!
//! render(title)?;
//! # Ok::<(), HookError>(())
//! ```
//!
//! - with `deps![a, b]` the callback runs on the first pass and whenever `a` or
//!   `b` differs from the previous pass;
//! - with `deps![]` it runs once;
//! - `use_effect_each_render` runs it on every pass.

pub mod effects;
pub mod error;
pub mod prelude;
pub mod runtime;
pub mod state;
pub mod store;
pub mod value;

pub use prelude::*;
