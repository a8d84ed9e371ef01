//! File Open Parameters
//!
//! Access masks, share modes, create options and file attributes passed to
//! `open_file` and returned by `query_directory_file`. Values match the NT
//! definitions so a platform backend can hand them straight to NtOpenFile.

bitflags::bitflags! {
    /// Requested access rights
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct AccessMask: u32 {
        /// Read data (files)
        const FILE_READ_DATA = 0x00000001;
        /// List directory (directories)
        const FILE_LIST_DIRECTORY = 0x00000001;
        /// Write data
        const FILE_WRITE_DATA = 0x00000002;
        /// Traverse (directories)
        const FILE_TRAVERSE = 0x00000020;
        /// Read attributes
        const FILE_READ_ATTRIBUTES = 0x00000080;
        /// Wait on the handle for synchronous I/O
        const SYNCHRONIZE = 0x00100000;
        /// Generic read
        const GENERIC_READ = 0x80000000;
        /// Generic write
        const GENERIC_WRITE = 0x40000000;
    }
}

bitflags::bitflags! {
    /// Share modes granted to other openers
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct ShareAccess: u32 {
        /// Share read
        const READ = 0x00000001;
        /// Share write
        const WRITE = 0x00000002;
        /// Share delete
        const DELETE = 0x00000004;
    }
}

bitflags::bitflags! {
    /// Create/open options
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct CreateOptions: u32 {
        /// Target must be a directory
        const DIRECTORY_FILE = 0x00000001;
        /// Write through
        const WRITE_THROUGH = 0x00000002;
        /// Sequential access only
        const SEQUENTIAL_ONLY = 0x00000004;
        /// No intermediate buffering (raw volume access)
        const NO_INTERMEDIATE_BUFFERING = 0x00000008;
        /// Synchronous I/O, alertable
        const SYNCHRONOUS_IO_ALERT = 0x00000010;
        /// Synchronous I/O, not alertable
        const SYNCHRONOUS_IO_NONALERT = 0x00000020;
        /// Target must not be a directory
        const NON_DIRECTORY_FILE = 0x00000040;
    }
}

bitflags::bitflags! {
    /// File attributes reported by directory enumeration
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct FileAttributes: u32 {
        const READONLY = 0x00000001;
        const HIDDEN = 0x00000002;
        const SYSTEM = 0x00000004;
        const DIRECTORY = 0x00000010;
        const ARCHIVE = 0x00000020;
        const NORMAL = 0x00000080;
    }
}

/// Access used to list a filesystem directory
pub const LIST_DIRECTORY_ACCESS: AccessMask =
    AccessMask::FILE_LIST_DIRECTORY.union(AccessMask::SYNCHRONIZE);

/// Options used to list a filesystem directory
pub const LIST_DIRECTORY_OPTIONS: CreateOptions =
    CreateOptions::DIRECTORY_FILE.union(CreateOptions::SYNCHRONOUS_IO_NONALERT);

/// Access used to probe a raw partition
pub const RAW_PROBE_ACCESS: AccessMask = AccessMask::GENERIC_READ.union(AccessMask::SYNCHRONIZE);

/// Share mode used to probe a raw partition
pub const RAW_PROBE_SHARE: ShareAccess = ShareAccess::READ.union(ShareAccess::WRITE);

/// Options used to probe a raw partition
pub const RAW_PROBE_OPTIONS: CreateOptions =
    CreateOptions::SYNCHRONOUS_IO_NONALERT.union(CreateOptions::NO_INTERMEDIATE_BUFFERING);
