//! Text synthesis seam.

use girgen_ir::Declaration;

use crate::GenerationContext;

/// Turns one declaration into generated source text.
///
/// Implementations must be free of side effects: they are called
/// concurrently from every category task and only get read access to the
/// frozen [`GenerationContext`]. An empty string means the declaration
/// produces no output.
pub trait Synthesizer: Send + Sync {
    fn synthesize(&self, decl: &Declaration, ctx: &GenerationContext) -> String;
}

impl<F> Synthesizer for F
where
    F: Fn(&Declaration, &GenerationContext) -> String + Send + Sync,
{
    fn synthesize(&self, decl: &Declaration, ctx: &GenerationContext) -> String {
        self(decl, ctx)
    }
}
