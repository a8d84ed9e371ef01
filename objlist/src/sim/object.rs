//! Simulated Objects
//!
//! Objects live in an arena owned by the namespace; object 0 is the root
//! directory (`\`). Directories hold their entries in insertion order and
//! cache a case-insensitive hash of each name so lookups only compare
//! strings on a hash match.
//!
//! # Object Bodies
//! - Directory: named entries
//! - SymbolicLink: target path
//! - Device: optional volume (no volume = unformatted / not ready)
//! - Disk: numbered partition objects, reachable only as `PartitionN`
//! - Other: events, mutants, semaphores, types... listed only

use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;
use crate::ob::type_tag::TypeTag;
use crate::status::NtStatus;
use super::volume::Volume;

/// Index of an object in the namespace arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObjectId(pub(crate) usize);

/// The root directory
pub const ROOT_DIRECTORY: ObjectId = ObjectId(0);

/// Prefix of partition object names below a disk
pub const PARTITION_PREFIX: &str = "Partition";

/// Directory entry
#[derive(Debug, Clone, Copy)]
pub struct DirectoryEntry {
    /// Object in the arena
    pub object: ObjectId,
    /// Hash of name (for faster lookup)
    pub name_hash: u32,
}

/// Object directory
#[derive(Debug, Clone, Default)]
pub struct ObjectDirectory {
    entries: Vec<DirectoryEntry>,
    /// Enumeration fails with this status when the cursor reaches the index
    pub(crate) query_failure: Option<(u32, NtStatus)>,
}

impl ObjectDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Simple hash function for names
    fn hash_name(name: &str) -> u32 {
        let mut hash: u32 = 0;
        for byte in name.bytes() {
            // Case-insensitive hash (convert to uppercase)
            hash = hash.wrapping_mul(31).wrapping_add(byte.to_ascii_uppercase() as u32);
        }
        hash
    }

    /// Look up an entry by name
    pub fn lookup(
        &self,
        objects: &[SimObject],
        name: &str,
        case_insensitive: bool,
    ) -> Option<ObjectId> {
        let hash = Self::hash_name(name);
        self.entries
            .iter()
            .filter(|entry| entry.name_hash == hash)
            .map(|entry| entry.object)
            .find(|object| {
                let candidate = &objects[object.0].name;
                if case_insensitive {
                    candidate.eq_ignore_ascii_case(name)
                } else {
                    candidate == name
                }
            })
    }

    /// Insert a named object; the caller checks for collisions
    pub fn insert(&mut self, object: ObjectId, name: &str) {
        self.entries.push(DirectoryEntry {
            object,
            name_hash: Self::hash_name(name),
        });
    }

    /// Entry at enumeration position `index`
    pub fn entry(&self, index: u32) -> Option<ObjectId> {
        self.entries.get(index as usize).map(|entry| entry.object)
    }

    /// Get number of entries
    #[inline]
    pub fn count(&self) -> usize {
        self.entries.len()
    }
}

/// Type-specific object data
#[derive(Debug, Clone)]
pub enum ObjectBody {
    Directory(ObjectDirectory),
    SymbolicLink { target: String },
    Device { volume: Option<Volume> },
    Disk { partitions: BTreeMap<u32, ObjectId> },
    Other,
}

/// A named object
#[derive(Debug, Clone)]
pub struct SimObject {
    pub name: String,
    pub type_tag: TypeTag,
    pub body: ObjectBody,
    /// Every open of this object (or a file below it) fails with this status
    pub open_status: Option<NtStatus>,
}

impl SimObject {
    pub fn new(name: &str, type_tag: TypeTag, body: ObjectBody) -> Self {
        Self {
            name: String::from(name),
            type_tag,
            body,
            open_status: None,
        }
    }

    pub fn directory(name: &str) -> Self {
        Self::new(name, TypeTag::DIRECTORY, ObjectBody::Directory(ObjectDirectory::new()))
    }

    pub fn as_directory(&self) -> Option<&ObjectDirectory> {
        match &self.body {
            ObjectBody::Directory(directory) => Some(directory),
            _ => None,
        }
    }

    pub fn as_directory_mut(&mut self) -> Option<&mut ObjectDirectory> {
        match &mut self.body {
            ObjectBody::Directory(directory) => Some(directory),
            _ => None,
        }
    }
}

/// Slot number of a `PartitionN` name
pub fn parse_partition_name(name: &str) -> Option<u32> {
    let prefix = name.get(..PARTITION_PREFIX.len())?;
    if !prefix.eq_ignore_ascii_case(PARTITION_PREFIX) {
        return None;
    }
    let digits = &name[PARTITION_PREFIX.len()..];
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}
