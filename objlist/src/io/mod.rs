//! Filesystem Side (io)
//!
//! What the walker does once it reaches a device or a disk:
//!
//! - **Devices**: the volume behind the device is listed (`dirlist`)
//! - **Disks**: partition slots are probed and each volume found is listed
//!   (`partition`)
//!
//! # Key Structures
//!
//! - `AccessMask`, `ShareAccess`, `CreateOptions`: NtOpenFile parameters
//! - `FileAttributes`: returned with each directory entry

pub mod dirlist;
pub mod file;
pub mod partition;

// Re-export main structures and types
pub use file::{
    AccessMask, CreateOptions, FileAttributes, ShareAccess,
    LIST_DIRECTORY_ACCESS, LIST_DIRECTORY_OPTIONS,
    RAW_PROBE_ACCESS, RAW_PROBE_OPTIONS, RAW_PROBE_SHARE,
};
pub use partition::partition_suffix;
