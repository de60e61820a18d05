//! Fact index: every declared type keyed by lookup name, plus per-assembly
//! declaration order.

use std::collections::HashMap;

use svcwire_domain::ports::CatalogFeed;
use svcwire_domain::value_objects::{NamespaceFact, TypeFact, metadata_name};
use tracing::debug;

/// One declared type with its resolved full name
#[derive(Debug, Clone)]
pub(crate) struct IndexedType {
    pub fact: TypeFact,
    pub full_name: String,
    pub assembly: String,
}

#[derive(Debug, Default)]
pub(crate) struct FactIndex {
    types: HashMap<String, IndexedType>,
    assemblies: Vec<(String, Vec<String>)>,
}

impl FactIndex {
    pub fn from_feed(feed: &dyn CatalogFeed) -> Self {
        let mut index = Self::default();
        for assembly in feed.assemblies() {
            let mut order = Vec::new();
            index.visit_namespace(&assembly.name, &assembly.root, "", &mut order);
            index.assemblies.push((assembly.name.clone(), order));
        }
        index
    }

    fn visit_namespace(
        &mut self,
        assembly: &str,
        namespace: &NamespaceFact,
        prefix: &str,
        order: &mut Vec<String>,
    ) {
        let prefix = join(prefix, &namespace.name);
        for fact in &namespace.types {
            self.visit_type(assembly, fact, &prefix, order);
        }
        for child in &namespace.namespaces {
            self.visit_namespace(assembly, child, &prefix, order);
        }
    }

    fn visit_type(&mut self, assembly: &str, fact: &TypeFact, prefix: &str, order: &mut Vec<String>) {
        let full_name = join(prefix, &fact.name);
        let key = metadata_name(&full_name, fact.type_parameters.len());

        if self.types.contains_key(&key) {
            // partial declarations: first occurrence wins
            debug!(type_name = %key, assembly, "duplicate declaration ignored");
        } else {
            let mut stored = fact.clone();
            stored.nested_types.clear();
            self.types.insert(
                key.clone(),
                IndexedType {
                    fact: stored,
                    full_name: full_name.clone(),
                    assembly: assembly.to_string(),
                },
            );
            order.push(key);
        }

        for nested in &fact.nested_types {
            self.visit_type(assembly, nested, &full_name, order);
        }
    }

    pub fn get(&self, key: &str) -> Option<&IndexedType> {
        self.types.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.types.contains_key(key)
    }

    /// Assemblies with their type keys in declaration order
    pub fn assemblies(&self) -> &[(String, Vec<String>)] {
        &self.assemblies
    }
}

fn join(prefix: &str, name: &str) -> String {
    match (prefix.is_empty(), name.is_empty()) {
        (_, true) => prefix.to_string(),
        (true, false) => name.to_string(),
        (false, false) => format!("{prefix}.{name}"),
    }
}
