//! Memoized, depth-capped descriptor construction.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use svcwire_domain::error::{Error, Result};
use svcwire_domain::value_objects::{
    EngineConfig, TypeArguments, TypeDescriptor, TypeKind, TypeRef,
};

use super::index::{FactIndex, IndexedType};

pub(crate) type DescriptorMap = HashMap<String, Arc<TypeDescriptor>>;

/// Builds descriptors for declared and referenced types
///
/// Descriptors are keyed by lookup name for declared types and definitions,
/// and by display name for constructed instances. Entries are only stored
/// once fully built, so a failed build leaves no partial descriptors behind.
///
/// The depth ceiling applies to each descriptor's `inheritance_depth`, so a
/// type is accepted or rejected the same way whichever path reaches it
/// first. The recursion depth is checked as well to bound the stack; it can
/// only exceed the ceiling when the root's inheritance depth does.
pub(crate) struct DescriptorBuilder<'a> {
    index: &'a FactIndex,
    config: &'a EngineConfig,
    base: Option<&'a DescriptorMap>,
    built: DescriptorMap,
    in_progress: HashSet<String>,
}

impl<'a> DescriptorBuilder<'a> {
    pub fn new(index: &'a FactIndex, config: &'a EngineConfig, base: Option<&'a DescriptorMap>) -> Self {
        Self {
            index,
            config,
            base,
            built: HashMap::new(),
            in_progress: HashSet::new(),
        }
    }

    pub fn into_built(self) -> DescriptorMap {
        self.built
    }

    /// Forget in-flight keys after a failed build
    pub fn reset(&mut self) {
        self.in_progress.clear();
    }

    fn lookup(&self, key: &str) -> Option<Arc<TypeDescriptor>> {
        self.built
            .get(key)
            .or_else(|| self.base.and_then(|base| base.get(key)))
            .cloned()
    }

    fn enter(&mut self, key: &str, display: &str, depth: usize) -> Result<()> {
        if depth > self.config.max_type_depth {
            return Err(Error::depth_exceeded(display, self.config.max_type_depth));
        }
        if !self.in_progress.insert(key.to_string()) {
            return Err(Error::cyclic_inheritance(display));
        }
        Ok(())
    }

    /// Inheritance depth of `display` given the depths of its direct edges
    fn inheritance_depth<I>(&self, display: &str, edges: I) -> Result<usize>
    where
        I: IntoIterator<Item = usize>,
    {
        let depth = edges.into_iter().map(|d| d + 1).max().unwrap_or(0);
        if depth > self.config.max_type_depth {
            return Err(Error::depth_exceeded(display, self.config.max_type_depth));
        }
        Ok(depth)
    }

    fn store(&mut self, key: &str, descriptor: TypeDescriptor) -> Arc<TypeDescriptor> {
        self.in_progress.remove(key);
        let descriptor = Arc::new(descriptor);
        self.built.insert(key.to_string(), Arc::clone(&descriptor));
        descriptor
    }

    /// Descriptor of a declared type; the definition itself for generics
    pub fn declared(&mut self, key: &str, depth: usize) -> Result<Arc<TypeDescriptor>> {
        if let Some(existing) = self.lookup(key) {
            return Ok(existing);
        }
        let index = self.index;
        let entry = index.get(key).ok_or_else(|| Error::unresolved_type(key))?;

        self.enter(key, &entry.full_name, depth)?;
        let parameters: Vec<TypeRef> = entry
            .fact
            .type_parameters
            .iter()
            .map(TypeRef::named)
            .collect();
        let descriptor = self.assemble(entry, &parameters, true, depth)?;
        Ok(self.store(key, descriptor))
    }

    /// Descriptor of any reference, creating leaves for types outside the feed
    pub fn reference(&mut self, reference: &TypeRef, hint: TypeKind, depth: usize) -> Result<Arc<TypeDescriptor>> {
        match &reference.arguments {
            TypeArguments::None | TypeArguments::Unbound(_) => {
                let key = reference.metadata_name();
                if self.index.contains(&key) {
                    return self.declared(&key, depth);
                }
                if let Some(existing) = self.lookup(&key) {
                    return Ok(existing);
                }
                let mut leaf = TypeDescriptor::external(reference.unbound_display(), hint);
                if reference.is_unbound() {
                    leaf.is_generic = true;
                    leaf.is_unbound_generic = true;
                    leaf.fingerprint = leaf.compute_fingerprint();
                }
                Ok(self.store(&key, leaf))
            }
            TypeArguments::Bound(arguments) => {
                let key = reference.display();
                if let Some(existing) = self.lookup(&key) {
                    return Ok(existing);
                }
                let index = self.index;
                let Some(entry) = index.get(&reference.metadata_name()) else {
                    return self.external_instance(reference, arguments, hint, depth);
                };

                self.enter(&key, &key, depth)?;
                let descriptor = self.assemble(entry, arguments, false, depth)?;
                Ok(self.store(&key, descriptor))
            }
        }
    }

    fn external_instance(
        &mut self,
        reference: &TypeRef,
        arguments: &[TypeRef],
        hint: TypeKind,
        depth: usize,
    ) -> Result<Arc<TypeDescriptor>> {
        let definition = self.reference(
            &TypeRef::unbound(reference.name.clone(), arguments.len()),
            hint,
            depth + 1,
        )?;
        let mut leaf = TypeDescriptor::external(reference.display(), hint);
        leaf.inheritance_depth =
            self.inheritance_depth(&leaf.display_name, [definition.inheritance_depth])?;
        leaf.is_generic = true;
        leaf.unbound_generic_name = reference.unbound_display();
        leaf.type_arguments = arguments.iter().map(TypeRef::display).collect();
        leaf.original_definition = Some(definition);
        leaf.fingerprint = leaf.compute_fingerprint();
        Ok(self.store(&reference.display(), leaf))
    }

    /// Copy the facts of `entry` into a descriptor, substituting `arguments`
    fn assemble(
        &mut self,
        entry: &IndexedType,
        arguments: &[TypeRef],
        is_definition: bool,
        depth: usize,
    ) -> Result<TypeDescriptor> {
        let fact = &entry.fact;
        let parameters = &fact.type_parameters;
        if arguments.len() != parameters.len() {
            return Err(Error::invalid_type_reference(
                &entry.full_name,
                format!(
                    "expected {} type arguments, found {}",
                    parameters.len(),
                    arguments.len()
                ),
            ));
        }

        let is_generic = !parameters.is_empty();
        let own_ref = TypeRef::generic(entry.full_name.clone(), arguments.to_vec());
        let display_name = own_ref.display();

        let base_type = match &fact.base_type {
            Some(base) => Some(self.reference(
                &base.substitute(parameters, arguments),
                TypeKind::Class,
                depth + 1,
            )?),
            None => None,
        };

        let interfaces: Vec<TypeRef> = fact
            .interfaces
            .iter()
            .map(|i| i.substitute(parameters, arguments))
            .collect();
        let (all_interfaces, deepest_interface) = self.flatten(&interfaces, base_type.as_ref(), depth)?;

        let original_definition = if is_generic && !is_definition {
            let key = own_ref.metadata_name();
            Some(self.declared(&key, depth + 1)?)
        } else {
            None
        };

        let inheritance_depth = self.inheritance_depth(
            &display_name,
            base_type
                .iter()
                .chain(original_definition.iter())
                .map(|ty| ty.inheritance_depth)
                .chain(deepest_interface),
        )?;

        let mut descriptor = TypeDescriptor {
            is_abstract: fact.is_abstract,
            is_static: fact.is_static,
            kind: fact.kind,
            can_be_referenced_by_name: fact.can_be_referenced_by_name,
            unbound_generic_name: own_ref.unbound_display(),
            display_name,
            is_generic,
            is_unbound_generic: is_generic && is_definition,
            type_arguments: arguments.iter().map(TypeRef::display).collect(),
            all_interfaces,
            base_type,
            original_definition,
            declared_attributes: fact.attributes.clone(),
            owning_assembly: entry.assembly.clone(),
            inheritance_depth,
            fingerprint: String::new(),
        };
        descriptor.fingerprint = descriptor.compute_fingerprint();
        Ok(descriptor)
    }

    /// Transitive interface set: declared interfaces with their own sets,
    /// then whatever the base type brings. Deny-listed interfaces are dropped.
    ///
    /// Also returns the deepest inheritance depth among the declared
    /// interfaces, deny-listed ones included.
    fn flatten(
        &mut self,
        interfaces: &[TypeRef],
        base_type: Option<&Arc<TypeDescriptor>>,
        depth: usize,
    ) -> Result<(Vec<Arc<TypeDescriptor>>, Option<usize>)> {
        let mut declared = Vec::with_capacity(interfaces.len());
        for interface in interfaces {
            declared.push(self.reference(interface, TypeKind::Interface, depth + 1)?);
        }

        let deepest = declared.iter().map(|i| i.inheritance_depth).max();
        let config = self.config;
        let mut all = Vec::new();
        let mut seen = HashSet::new();
        let mut push = |candidate: &Arc<TypeDescriptor>, all: &mut Vec<Arc<TypeDescriptor>>| {
            if !config.is_excluded_interface(&candidate.display_name)
                && seen.insert(candidate.display_name.clone())
            {
                all.push(Arc::clone(candidate));
            }
        };

        for interface in &declared {
            push(interface, &mut all);
            for inherited in &interface.all_interfaces {
                push(inherited, &mut all);
            }
        }
        if let Some(base) = base_type {
            for inherited in &base.all_interfaces {
                push(inherited, &mut all);
            }
        }
        Ok((all, deepest))
    }
}
