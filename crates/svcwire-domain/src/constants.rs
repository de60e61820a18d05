//! Domain layer constants

// ============================================================================
// ENGINE DEFAULTS
// ============================================================================

/// Maximum inheritance / interface nesting followed while building descriptors
pub const DEFAULT_MAX_TYPE_DEPTH: usize = 64;

/// Interfaces never registered by "implemented interfaces" queries
pub const DEFAULT_EXCLUDED_INTERFACES: [&str; 2] = ["System.IDisposable", "System.IAsyncDisposable"];

/// Container type that regular insertion points receive and return
pub const DEFAULT_SERVICE_COLLECTION_TYPE: &str =
    "Microsoft.Extensions.DependencyInjection.IServiceCollection";

/// Parameter type of non-generic key selector methods
pub const DEFAULT_TYPE_PARAMETER_TYPE: &str = "System.Type";

// ============================================================================
// LIFETIME ENCODING
// ============================================================================

/// Raw attribute value for singleton lifetime
pub const LIFETIME_SINGLETON: i64 = 0;

/// Raw attribute value for scoped lifetime
pub const LIFETIME_SCOPED: i64 = 1;

// ============================================================================
// QUERY ATTRIBUTE ARGUMENT NAMES
// ============================================================================

/// Named argument: assembly containing the given type
pub const ARG_FROM_ASSEMBLY_OF: &str = "FromAssemblyOf";
/// Named argument: assembly name wildcard
pub const ARG_ASSEMBLY_NAME_FILTER: &str = "AssemblyNameFilter";
/// Named argument: assignable-to type
pub const ARG_ASSIGNABLE_TO: &str = "AssignableTo";
/// Named argument: excluded assignable-to type
pub const ARG_EXCLUDE_ASSIGNABLE_TO: &str = "ExcludeAssignableTo";
/// Named argument: lifetime enum value
pub const ARG_LIFETIME: &str = "Lifetime";
/// Named argument: register as implemented interfaces
pub const ARG_AS_IMPLEMENTED_INTERFACES: &str = "AsImplementedInterfaces";
/// Named argument: register as self
pub const ARG_AS_SELF: &str = "AsSelf";
/// Named argument: type name wildcard
pub const ARG_TYPE_NAME_FILTER: &str = "TypeNameFilter";
/// Named argument: excluded type name wildcard
pub const ARG_EXCLUDE_BY_TYPE_NAME: &str = "ExcludeByTypeName";
/// Named argument: required attribute type
pub const ARG_ATTRIBUTE_FILTER: &str = "AttributeFilter";
/// Named argument: excluded attribute type
pub const ARG_EXCLUDE_BY_ATTRIBUTE: &str = "ExcludeByAttribute";
/// Named argument: key selector member
pub const ARG_KEY_SELECTOR: &str = "KeySelector";
/// Named argument: custom handler method
pub const ARG_CUSTOM_HANDLER: &str = "CustomHandler";
