//! Object Type Tags
//!
//! Each object type carries a 4-byte pool tag that names its kind. The
//! directory query returns it as a little-endian `u32`, so the tag of a
//! directory object reads `Dire` when its bytes are printed in memory order.
//!
//! # Display
//! Tags are printed as four characters. Any byte outside `[A-Za-z]` is
//! replaced by `?`, so a missing tag (0) prints as `????`.
//!
//! # Classification
//! The walker only acts on four kinds of object. Everything else is listed
//! but not expanded:
//! - `Dire` - object directory, recursed into
//! - `Symb` - symbolic link, target resolved
//! - `Devi` - device, its filesystem listed
//! - `Disk` - disk, its partitions probed

use core::fmt;

/// Replacement for non-alphabetic tag bytes
pub const TAG_PLACEHOLDER: u8 = b'?';

/// Packed 4-byte object type tag
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TypeTag(pub u32);

impl TypeTag {
    /// Object directory
    pub const DIRECTORY: TypeTag = TypeTag::from_bytes(*b"Dire");
    /// Device object
    pub const DEVICE: TypeTag = TypeTag::from_bytes(*b"Devi");
    /// Symbolic link object
    pub const SYMBOLIC_LINK: TypeTag = TypeTag::from_bytes(*b"Symb");
    /// Disk object
    pub const DISK: TypeTag = TypeTag::from_bytes(*b"Disk");
    /// No tag available
    pub const UNKNOWN: TypeTag = TypeTag(0);

    /// Build a tag from its bytes in memory order
    pub const fn from_bytes(bytes: [u8; 4]) -> Self {
        TypeTag(u32::from_le_bytes(bytes))
    }

    /// Raw bytes in memory order
    pub const fn to_bytes(self) -> [u8; 4] {
        self.0.to_le_bytes()
    }

    /// Decode for display, substituting [`TAG_PLACEHOLDER`] for
    /// non-alphabetic bytes
    pub fn validate(self) -> [u8; 4] {
        let mut tag = self.to_bytes();
        for byte in tag.iter_mut() {
            if !byte.is_ascii_alphabetic() {
                *byte = TAG_PLACEHOLDER;
            }
        }
        tag
    }

    /// Classify into the kinds the walker dispatches on
    pub fn kind(self) -> ObjectKind {
        ObjectKind::classify(self)
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in self.validate() {
            write!(f, "{}", byte as char)?;
        }
        Ok(())
    }
}

impl fmt::Debug for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeTag(\"{}\")", self)
    }
}

/// Object kind as seen by the walker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectKind {
    Directory,
    Device,
    SymbolicLink,
    Disk,
    /// Listed but never expanded
    Other(TypeTag),
}

impl ObjectKind {
    /// Map a raw tag to its kind
    pub fn classify(tag: TypeTag) -> Self {
        match tag {
            TypeTag::DIRECTORY => ObjectKind::Directory,
            TypeTag::DEVICE => ObjectKind::Device,
            TypeTag::SYMBOLIC_LINK => ObjectKind::SymbolicLink,
            TypeTag::DISK => ObjectKind::Disk,
            other => ObjectKind::Other(other),
        }
    }

    /// Tag carried by objects of this kind
    pub fn tag(self) -> TypeTag {
        match self {
            ObjectKind::Directory => TypeTag::DIRECTORY,
            ObjectKind::Device => TypeTag::DEVICE,
            ObjectKind::SymbolicLink => TypeTag::SYMBOLIC_LINK,
            ObjectKind::Disk => TypeTag::DISK,
            ObjectKind::Other(tag) => tag,
        }
    }
}

impl From<TypeTag> for ObjectKind {
    fn from(tag: TypeTag) -> Self {
        ObjectKind::classify(tag)
    }
}
