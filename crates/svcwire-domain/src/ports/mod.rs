//! Domain Port Interfaces
//!
//! Boundary contracts between the engine and the host. The host implements
//! [`CatalogFeed`] to hand over its declarations; the engine never reaches
//! into host state beyond what these ports return.

use crate::value_objects::AssemblyFact;

/// Source of declaration facts for one compilation
///
/// Assemblies and the types inside them must be yielded in stable
/// declaration order; candidate order follows it.
pub trait CatalogFeed: Send + Sync {
    /// Name of the assembly being compiled
    fn current_assembly(&self) -> &str;

    /// Every assembly visible to the compilation, current one included
    fn assemblies(&self) -> &[AssemblyFact];
}
