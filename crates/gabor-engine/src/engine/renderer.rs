use crate::RasterImage;

/// Turns synthesized patches into something a front end can show.
///
/// The engine only produces [`RasterImage`]s; terminals, image files and
/// test probes each provide their own renderer.
pub trait Renderer {
    type Output;

    fn render(&mut self, image: &RasterImage) -> Self::Output;
}

/// Output of rendering every patch of the current round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedRound<T> {
    /// Reference patch; only present in target selection.
    pub target: Option<T>,
    /// One entry per grid slot, in slot order.
    pub slots: Vec<T>,
}
