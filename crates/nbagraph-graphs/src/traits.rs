//! Graph renderer trait definitions for polymorphic graph types.

use nbagraph_common::Result;
use std::path::Path;

/// Trait for graph renderers that turn one aggregate into a PNG.
///
/// Renderers hold only styling; every call is an independent
/// input-to-file transform. The parent directory of `path` is created when
/// missing, and an empty dataset still yields a valid image.
pub trait GraphRenderer: Send + Sync {
    /// The aggregate this renderer draws.
    type Data;

    /// Renders `data` as a PNG at `path`.
    fn render_to_file(&self, data: &Self::Data, path: &Path) -> Result<()>;

    /// Gets the name of this graph type.
    fn name(&self) -> &'static str;

    /// Gets the description of this graph type.
    fn description(&self) -> &'static str;
}
