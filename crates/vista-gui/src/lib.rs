//! Vista GUI - the overlay panel contract
//!
//! Overlay components never talk to a concrete widget library. They build and
//! update their widgets through [`PanelToolkit`], which the host passes in
//! explicitly. [`PanelTree`] is a retained, in-memory implementation of that
//! contract: it resolves box layouts, routes injected input to subscribed
//! widgets and queues typed [`UiEvent`]s for the host to drain.

pub mod element;
pub mod event;
pub mod layout;
pub mod toolkit;
pub mod tree;

pub use element::{Align, BoxLayout, Icon, LayoutParams, ListItem, Orientation, Widget, WidgetId, WidgetKind};
pub use event::{Dispatcher, EventKind, UiEvent};
pub use toolkit::PanelToolkit;
pub use tree::PanelTree;
