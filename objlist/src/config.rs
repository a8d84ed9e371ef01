//! Walk Configuration
//!
//! Depth limits and traversal policies. The defaults reproduce the listing
//! the tool has always produced: three levels of object directories, one
//! level of files below each device, and partition slots 0-27 on each disk.

/// Levels of object directories to list
pub const DEFAULT_OBJECT_DIRECTORY_LIMIT: u32 = 3;

/// Levels of filesystem directories to list below a device or partition.
/// 0 inherits the object directory budget remaining at that point.
pub const DEFAULT_FS_DIRECTORY_LIMIT: u32 = 1;

/// Partition slots probed on each disk. 20 hard disk slots plus 8 memory
/// unit slots is a guess; nothing queries the real number.
pub const DEFAULT_PARTITION_PROBE_LIMIT: u32 = 28;

/// How the file walker decides whether an entry is a directory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContainerDetection {
    /// Trust the entry's attributes when the filesystem reports them and
    /// fall back to probing otherwise
    #[default]
    Attributes,
    /// Always try to open the entry as a directory; failure means file
    ProbeByOpen,
}

/// What a failed branch does to the rest of the walk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorPolicy {
    /// Count the failure and keep listing siblings
    #[default]
    Continue,
    /// Stop the walk and return the failing status
    Abort,
}

/// Walk configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WalkConfig {
    /// Object directory recursion budget
    pub object_directory_limit: u32,
    /// Filesystem recursion budget (0 = inherit)
    pub fs_directory_limit: u32,
    /// Number of `PartitionN` slots probed per disk
    pub partition_probe_limit: u32,
    /// Directory detection for filesystem entries
    pub container_detection: ContainerDetection,
    /// Print the object type of every file entry. Filesystems rarely expose
    /// one, so this mostly prints `????`.
    pub probe_file_types: bool,
    /// Branch failure handling
    pub error_policy: ErrorPolicy,
}

impl WalkConfig {
    pub const fn new() -> Self {
        Self {
            object_directory_limit: DEFAULT_OBJECT_DIRECTORY_LIMIT,
            fs_directory_limit: DEFAULT_FS_DIRECTORY_LIMIT,
            partition_probe_limit: DEFAULT_PARTITION_PROBE_LIMIT,
            container_detection: ContainerDetection::Attributes,
            probe_file_types: false,
            error_policy: ErrorPolicy::Continue,
        }
    }

    pub const fn with_object_directory_limit(mut self, limit: u32) -> Self {
        self.object_directory_limit = limit;
        self
    }

    pub const fn with_fs_directory_limit(mut self, limit: u32) -> Self {
        self.fs_directory_limit = limit;
        self
    }

    pub const fn with_partition_probe_limit(mut self, limit: u32) -> Self {
        self.partition_probe_limit = limit;
        self
    }

    pub const fn with_container_detection(mut self, detection: ContainerDetection) -> Self {
        self.container_detection = detection;
        self
    }

    pub const fn with_probe_file_types(mut self, enabled: bool) -> Self {
        self.probe_file_types = enabled;
        self
    }

    pub const fn with_error_policy(mut self, policy: ErrorPolicy) -> Self {
        self.error_policy = policy;
        self
    }

    /// Budget for a filesystem reached with `remaining` object directory
    /// levels left
    #[inline]
    pub fn fs_budget(&self, remaining: u32) -> u32 {
        if self.fs_directory_limit != 0 {
            self.fs_directory_limit
        } else {
            remaining
        }
    }
}

impl Default for WalkConfig {
    fn default() -> Self {
        Self::new()
    }
}
