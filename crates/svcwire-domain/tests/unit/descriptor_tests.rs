//! Unit tests for type descriptors

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use svcwire_domain::value_objects::{TypeDescriptor, TypeKind};

    #[test]
    fn test_equality_is_by_display_name() {
        let a = TypeDescriptor::external("App.IService", TypeKind::Interface);
        let mut b = TypeDescriptor::external("App.IService", TypeKind::Interface);
        b.declared_attributes.push("App.Marker".into());

        assert_eq!(a, b);
        assert_ne!(a, TypeDescriptor::external("App.IOther", TypeKind::Interface));
    }

    #[test]
    fn test_fingerprint_tracks_facts() {
        let plain = TypeDescriptor::external("App.Service", TypeKind::Class);
        let mut marked = plain.clone();
        marked.declared_attributes.push("App.Marker".into());

        assert_eq!(plain.fingerprint, plain.compute_fingerprint());
        assert_ne!(plain.compute_fingerprint(), marked.compute_fingerprint());
        assert_eq!(plain.fingerprint.len(), 64);
    }

    #[test]
    fn test_base_chain_nearest_first() {
        let root = Arc::new(TypeDescriptor::external("System.Object", TypeKind::Class));
        let mut middle = TypeDescriptor::external("App.Base", TypeKind::Class);
        middle.base_type = Some(root);
        let mut leaf = TypeDescriptor::external("App.Leaf", TypeKind::Class);
        leaf.base_type = Some(Arc::new(middle));

        let chain: Vec<_> = leaf.base_chain().map(|t| t.display_name.as_str()).collect();
        assert_eq!(chain, ["App.Base", "System.Object"]);
    }

    #[test]
    fn test_external_leaf_is_not_generic() {
        let leaf = TypeDescriptor::external("System.IDisposable", TypeKind::Interface);

        assert!(!leaf.is_open_definition());
        assert!(leaf.owning_assembly.is_empty());
        assert!(leaf.all_interfaces.is_empty());
        assert_eq!(leaf.unbound_generic_name, "System.IDisposable");
    }
}
