/// Reverse index of which versions contain which objects
pub mod changes;
/// Data root access: version keys, on-disk layout, and ordered collections
pub mod data;
/// Generic display descriptors for any supported object kind
pub mod descriptor;
/// Cross-referencing pilot talents against the pilots that grant them
pub mod enrich;
/// Error definitions
pub mod error;
/// Filtering, sorting, and grouping of collections for list pages
pub mod list;
/// Localization keys and the text lookup interface
pub mod localization;
/// Game object collections, record shapes, and the object store accessor
pub mod objects;
/// Generic wrapper for values that may or may not match a known variant.
pub mod recognized;
/// Stat value formatting helpers for talents and modules
pub mod stat;
/// The version catalog (`versions.json`)
pub mod versions;

#[cfg(feature = "arc")]
pub type Rc<T> = std::sync::Arc<T>;

#[cfg(not(feature = "arc"))]
pub type Rc<T> = std::rc::Rc<T>;
