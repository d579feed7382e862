use thiserror::Error;

/// Unrecoverable inconsistencies detected while rendering.
///
/// Geometric edge cases (degenerate directions, missed intersections,
/// exhausted recursion depth) are normal outcomes and never surface
/// here.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    /// A refraction exit event found no enclosing medium to return to.
    /// The index-of-refraction stack always carries the scene's ambient
    /// index at the bottom, so an underflow means entry/exit events are
    /// unbalanced.
    #[error("refraction index stack underflow on a medium exit")]
    IorStackUnderflow,
}
