//! Object Attributes
//!
//! Describes the object an open call should target: a name, attribute
//! flags, and an optional root directory handle the name is relative to.
//!
//! Every walker frame owns its attributes. Descending into an entry derives
//! a new value (`child`, `with_suffix`) instead of rewriting a shared name
//! buffer, so a caller's view of its own path never changes underneath it.

use alloc::string::String;
use super::namespace::Handle;

/// Maximum path length accepted by the namespace
pub const MAX_PATH: usize = 260;

/// Path separator of the object namespace
pub const OBJ_NAME_PATH_SEPARATOR: &str = "\\";

bitflags::bitflags! {
    /// OBJ_* attribute flags
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct ObjAttributes: u32 {
        /// Handle is inherited by child processes
        const INHERIT = 0x00000002;
        /// Object survives its last handle
        const PERMANENT = 0x00000010;
        /// Exclusive access
        const EXCLUSIVE = 0x00000020;
        /// Case-insensitive name lookup
        const CASE_INSENSITIVE = 0x00000040;
        /// Open if it already exists
        const OPENIF = 0x00000080;
        /// Open the link itself rather than its target
        const OPENLINK = 0x00000100;
    }
}

/// OBJECT_ATTRIBUTES
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectAttributes {
    /// Directory the name is relative to; `None` for absolute names
    pub root_directory: Option<Handle>,
    /// Object name
    pub object_name: String,
    /// OBJ_* flags
    pub attributes: ObjAttributes,
}

impl ObjectAttributes {
    /// InitializeObjectAttributes
    pub fn new(name: &str, attributes: ObjAttributes, root_directory: Option<Handle>) -> Self {
        Self {
            root_directory,
            object_name: String::from(name),
            attributes,
        }
    }

    /// Attributes naming the namespace root (`\`)
    pub fn root() -> Self {
        Self::new(OBJ_NAME_PATH_SEPARATOR, ObjAttributes::CASE_INSENSITIVE, None)
    }

    /// Attributes for an entry of the directory opened as `root`
    pub fn child(&self, root: Handle, name: &str) -> Self {
        Self::new(name, self.attributes, Some(root))
    }

    /// Same base, with `suffix` appended to the name
    pub fn with_suffix(&self, suffix: &str) -> Self {
        let mut object_name = String::with_capacity(self.object_name.len() + suffix.len());
        object_name.push_str(&self.object_name);
        object_name.push_str(suffix);
        Self {
            root_directory: self.root_directory,
            object_name,
            attributes: self.attributes,
        }
    }

    /// Object name
    #[inline]
    pub fn name(&self) -> &str {
        &self.object_name
    }

    /// Name length in bytes, as the counted string would report it
    #[inline]
    pub fn name_len(&self) -> usize {
        self.object_name.len()
    }

    pub fn is_case_insensitive(&self) -> bool {
        self.attributes.contains(ObjAttributes::CASE_INSENSITIVE)
    }
}
