//! Component trait system for the TUI
//!
//! Instead of App knowing how to render, scroll and copy for every panel,
//! components declare their own capabilities through traits.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                         App                                 │
//! │   (routes keys, owns orchestrator, applies outcomes)        │
//! └─────────────────────────────────────────────────────────────┘
//!                    │                     │
//!                    ▼                     ▼
//!             ┌────────────┐        ┌────────────┐
//!             │   Input    │        │  Results   │
//!             │   Panel    │        │   Panel    │
//!             └────────────┘        └────────────┘
//!                    │                     │
//!                    └──────────┬──────────┘
//!                               │
//!                      Implements traits:
//!                    Component, Interactive,
//!                   Scrollable, Copyable
//! ```
//!
//! - [`Component`] - Base trait: render + identity
//! - [`Scrollable`] - Components with scrollable content
//! - [`Selectable`] - Scrollable content with a selected item
//! - [`Copyable`] - Components that provide clipboard content
//! - [`Interactive`] - Components that handle keyboard input

mod component;
mod copyable;
mod interactive;
mod scrollable;

pub use component::{Component, ComponentId, RenderContext};
pub use copyable::{Copyable, CopyResult};
pub use interactive::{Handled, Interactive, ScrollableInteractive};
pub use scrollable::{Scrollable, Selectable};
