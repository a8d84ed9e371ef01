//! Object Namespace (ob)
//!
//! Walks the object manager namespace and prints what it finds:
//!
//! - **Directories**: enumerated entry by entry and walked recursively
//! - **Symbolic Links**: resolved to their target path
//! - **Devices and Disks**: handed to the I/O side (`crate::io`)
//! - **Everything else**: listed with its type tag
//!
//! # Namespace Access
//!
//! All access goes through the [`ObjectNamespace`] trait, the handful of
//! object manager and I/O manager services the walker needs. Names are
//! passed as [`ObjectAttributes`], relative to an open directory handle
//! wherever the walker has one.
//!
//! # Key Structures
//!
//! - `ObjectAttributes`: name, root directory, OBJ_* flags
//! - `TypeTag`: 4-character object type pool tag
//! - `NamespaceWalker`: one walk's budget, output and counters

// Submodules
pub mod attributes;
pub mod namespace;
pub mod probe;
pub mod symlink;
pub mod type_tag;
pub mod walker;

// Re-exports for convenience
pub use attributes::{ObjAttributes, ObjectAttributes, MAX_PATH, OBJ_NAME_PATH_SEPARATOR};
pub use namespace::{
    FileDirectoryInformation, Handle, ObjectDirectoryInformation, ObjectNamespace, NULL_HANDLE,
};
pub use probe::query_object_type;
pub use type_tag::{ObjectKind, TypeTag, TAG_PLACEHOLDER};
pub use walker::{walk_namespace, NamespaceWalker, WalkStats};
