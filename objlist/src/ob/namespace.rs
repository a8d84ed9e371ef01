//! Namespace Primitives
//!
//! The walker never touches objects directly. Everything goes through the
//! [`ObjectNamespace`] trait, which mirrors the object manager and I/O
//! manager services the tool needs:
//!
//! - NtOpenDirectoryObject / NtQueryDirectoryObject
//! - ObOpenObjectByName / ObReferenceObjectByHandle
//! - NtOpenSymbolicLinkObject / NtQuerySymbolicLinkObject
//! - NtOpenFile / NtQueryDirectoryFile
//! - NtClose
//!
//! A platform backend forwards these to the kernel; [`crate::sim`] provides
//! an in-memory namespace for tests and the demo binary.

use alloc::string::String;
use crate::io::file::{AccessMask, CreateOptions, FileAttributes, ShareAccess};
use crate::status::NtStatus;
use super::attributes::ObjectAttributes;
use super::type_tag::TypeTag;

/// Handle type (unsigned 32-bit, like an NT HANDLE)
pub type Handle = u32;

/// Null handle, never returned by a successful open
pub const NULL_HANDLE: Handle = 0;

/// OBJECT_DIRECTORY_INFORMATION
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectDirectoryInformation {
    /// Entry name, without separators
    pub name: String,
    /// Type tag of the entry's object type
    pub type_tag: TypeTag,
}

/// FILE_DIRECTORY_INFORMATION
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDirectoryInformation {
    /// File name, without separators
    pub file_name: String,
    /// Attributes, when the filesystem reports them
    pub file_attributes: Option<FileAttributes>,
}

impl FileDirectoryInformation {
    /// Whether the entry is a directory, if the attributes say so
    pub fn is_directory(&self) -> Option<bool> {
        self.file_attributes
            .map(|attributes| attributes.contains(FileAttributes::DIRECTORY))
    }
}

/// Object manager and I/O manager services used by the walker
pub trait ObjectNamespace {
    /// Open an object directory
    fn open_directory_object(&self, attributes: &ObjectAttributes) -> Result<Handle, NtStatus>;

    /// Return the entry at `context` and advance it.
    ///
    /// Fails with `STATUS_NO_MORE_ENTRIES` once the directory is exhausted.
    fn query_directory_object(
        &self,
        directory: Handle,
        context: &mut u32,
    ) -> Result<ObjectDirectoryInformation, NtStatus>;

    /// Open any named object without type checking
    fn open_object_by_name(&self, attributes: &ObjectAttributes) -> Result<Handle, NtStatus>;

    /// Reference the object behind `handle` and return its type's tag
    fn reference_object_type(&self, handle: Handle) -> Result<TypeTag, NtStatus>;

    /// Open a symbolic link object
    fn open_symbolic_link_object(&self, attributes: &ObjectAttributes) -> Result<Handle, NtStatus>;

    /// Read a link's target. Fails with `STATUS_BUFFER_TOO_SMALL` when the
    /// target is longer than `maximum_length` bytes.
    fn query_symbolic_link_object(
        &self,
        link: Handle,
        maximum_length: usize,
    ) -> Result<String, NtStatus>;

    /// Open a file, directory or raw device
    fn open_file(
        &self,
        attributes: &ObjectAttributes,
        desired_access: AccessMask,
        share_access: ShareAccess,
        open_options: CreateOptions,
    ) -> Result<Handle, NtStatus>;

    /// Return the next entry of a filesystem directory.
    ///
    /// `restart_scan` rewinds to the first entry. Fails with
    /// `STATUS_NO_MORE_FILES` once the directory is exhausted.
    fn query_directory_file(
        &self,
        directory: Handle,
        restart_scan: bool,
    ) -> Result<FileDirectoryInformation, NtStatus>;

    /// Release a handle
    fn close(&self, handle: Handle) -> Result<(), NtStatus>;
}
