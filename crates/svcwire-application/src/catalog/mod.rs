//! Type Catalog
//!
//! Builds the immutable, per-compilation view of every declared type from
//! a [`CatalogFeed`]. Descriptors are memoized by identity so that the
//! interface and base-type closure of a type is derived once per pass, no
//! matter how many queries or paths reach it.

mod builder;
mod index;

use std::sync::Arc;

use svcwire_domain::error::{Error, Result};
use svcwire_domain::ports::CatalogFeed;
use svcwire_domain::value_objects::{
    EngineConfig, TypeArguments, TypeDescriptor, TypeRef,
};
use tracing::{debug, warn};

use builder::{DescriptorBuilder, DescriptorMap};
use index::FactIndex;

/// Types of the selected assemblies in declaration order
#[derive(Debug, Clone, Default)]
pub struct CatalogView {
    types: Vec<Arc<TypeDescriptor>>,
}

impl CatalogView {
    /// Iterate types in declaration order
    pub fn iter(&self) -> impl Iterator<Item = &Arc<TypeDescriptor>> {
        self.types.iter()
    }

    /// Number of types
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Whether the view holds no types
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl IntoIterator for CatalogView {
    type Item = Arc<TypeDescriptor>;
    type IntoIter = std::vec::IntoIter<Arc<TypeDescriptor>>;

    fn into_iter(self) -> Self::IntoIter {
        self.types.into_iter()
    }
}

/// One assembly and its successfully built types
#[derive(Debug, Clone)]
struct AssemblyTypes {
    name: String,
    types: Vec<Arc<TypeDescriptor>>,
}

/// Immutable catalog of one compilation pass
pub struct TypeCatalog {
    current_assembly: String,
    assemblies: Vec<AssemblyTypes>,
    descriptors: DescriptorMap,
    index: FactIndex,
    config: EngineConfig,
    skipped: Vec<String>,
}

impl std::fmt::Debug for TypeCatalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TypeCatalog")
            .field("current_assembly", &self.current_assembly)
            .field("assemblies", &self.assemblies.len())
            .field("descriptors", &self.descriptors.len())
            .field("skipped", &self.skipped)
            .finish_non_exhaustive()
    }
}

// Construction
impl TypeCatalog {
    /// Build descriptors for every type the feed declares
    ///
    /// Cyclic or over-deep types are skipped with a warning; the rest of the
    /// catalog is still built.
    pub fn build(feed: &dyn CatalogFeed, config: &EngineConfig) -> Self {
        let index = FactIndex::from_feed(feed);
        let mut skipped = Vec::new();

        let (descriptors, assemblies) = {
            let mut builder = DescriptorBuilder::new(&index, config, None);
            let mut assemblies = Vec::with_capacity(index.assemblies().len());
            let mut ordered: Vec<(String, Vec<String>)> = Vec::new();

            for (assembly, keys) in index.assemblies() {
                let mut built_keys = Vec::with_capacity(keys.len());
                for key in keys {
                    match builder.declared(key, 0) {
                        Ok(_) => built_keys.push(key.clone()),
                        Err(e) => {
                            warn!(type_name = %key, assembly = %assembly, error = %e, "skipping malformed type");
                            builder.reset();
                            skipped.push(key.clone());
                        }
                    }
                }
                ordered.push((assembly.clone(), built_keys));
            }

            let descriptors = builder.into_built();
            for (assembly, keys) in ordered {
                let types = keys
                    .iter()
                    .filter_map(|key| descriptors.get(key).cloned())
                    .collect();
                assemblies.push(AssemblyTypes {
                    name: assembly,
                    types,
                });
            }
            (descriptors, assemblies)
        };

        debug!(
            assemblies = assemblies.len(),
            descriptors = descriptors.len(),
            skipped = skipped.len(),
            "type catalog built"
        );

        Self {
            current_assembly: feed.current_assembly().to_string(),
            assemblies,
            descriptors,
            index,
            config: config.clone(),
            skipped,
        }
    }
}

// Queries over the catalog
impl TypeCatalog {
    /// Name of the assembly being compiled
    pub fn current_assembly(&self) -> &str {
        &self.current_assembly
    }

    /// Assembly names in feed order
    pub fn assembly_names(&self) -> impl Iterator<Item = &str> {
        self.assemblies.iter().map(|a| a.name.as_str())
    }

    /// Lookup names of types skipped as malformed
    pub fn skipped_types(&self) -> &[String] {
        &self.skipped
    }

    /// Engine settings the catalog was built with
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Every type declared in the given assemblies, in declaration order
    ///
    /// Assemblies are visited in the order given.
    pub fn build_catalog<S: AsRef<str>>(&self, assemblies: &[S]) -> CatalogView {
        let types = assemblies
            .iter()
            .filter_map(|name| self.assemblies.iter().find(|a| a.name == name.as_ref()))
            .flat_map(|a| a.types.iter().cloned())
            .collect();
        CatalogView { types }
    }

    /// Flattened interface set of `ty`, deny-list already applied
    ///
    /// The set is derived once when the descriptor is memoized; every
    /// descriptor reachable from this catalog shares it.
    pub fn flatten_interfaces<'t>(&self, ty: &'t TypeDescriptor) -> &'t [Arc<TypeDescriptor>] {
        &ty.all_interfaces
    }

    /// Descriptor by lookup name (declared types) or display name (instances)
    pub fn get(&self, key: &str) -> Option<&Arc<TypeDescriptor>> {
        self.descriptors.get(key)
    }

    /// Resolve a type reference written in a query
    ///
    /// Returns `Ok(None)` when the catalog knows no such type.
    pub fn resolve(&self, reference: &TypeRef) -> Result<Option<Arc<TypeDescriptor>>> {
        match &reference.arguments {
            TypeArguments::None | TypeArguments::Unbound(_) => {
                Ok(self.descriptors.get(&reference.metadata_name()).cloned())
            }
            TypeArguments::Bound(arguments) => {
                if let Some(existing) = self.descriptors.get(&reference.display()) {
                    return Ok(Some(Arc::clone(existing)));
                }
                match self.descriptors.get(&reference.metadata_name()) {
                    Some(definition) => self.construct(definition, arguments).map(Some),
                    None => Ok(None),
                }
            }
        }
    }

    /// Close an open generic definition over `arguments`
    pub fn construct(
        &self,
        definition: &TypeDescriptor,
        arguments: &[TypeRef],
    ) -> Result<Arc<TypeDescriptor>> {
        let unbound = TypeRef::parse(&definition.unbound_generic_name)?;
        if !definition.is_open_definition() || unbound.arity() != arguments.len() {
            return Err(Error::invalid_type_reference(
                &definition.display_name,
                format!(
                    "cannot close over {} type arguments",
                    arguments.len()
                ),
            ));
        }

        let reference = TypeRef::generic(unbound.name, arguments.to_vec());
        if let Some(existing) = self.descriptors.get(&reference.display()) {
            return Ok(Arc::clone(existing));
        }

        let mut builder = DescriptorBuilder::new(&self.index, &self.config, Some(&self.descriptors));
        builder.reference(&reference, definition.kind, 0)
    }

    /// Number of memoized descriptors
    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    /// Whether the catalog holds no descriptors
    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }
}
