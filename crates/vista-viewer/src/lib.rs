//! Vista Viewer - host side of the overlay
//!
//! Wires a [`DirectoryBrowser`](vista_overlay::DirectoryBrowser) and an
//! [`AlertDialog`](vista_overlay::AlertDialog) into a viewer: menu actions,
//! confirm/cancel/dismiss handling, model loading, directory watching, and an
//! egui painter that draws the panel tree over the 3D surface.

pub mod host;
pub mod loader;
pub mod painter;
pub mod watch;

pub use host::{MenuAction, ViewerHost, ViewerState};
pub use loader::{ExtensionLoader, LoadedModel, ModelFormat, ModelLoader};
pub use painter::OverlayPainter;
pub use watch::DirectoryWatcher;
