//! Object Directory Walker
//!
//! Lists the object namespace depth-first, starting at `\`. Each directory
//! entry is printed as `\<Name> - Type = <tag>` and then expanded according
//! to its kind:
//!
//! - **Symbolic link**: target printed one column further in
//! - **Device**: its filesystem listed (`io::dirlist`)
//! - **Disk**: its partitions probed (`io::partition`)
//! - **Directory**: walked recursively
//! - anything else: listed only
//!
//! # Budgets
//! Every descent into an object directory costs one level of
//! `object_directory_limit`; a walk entered with 0 levels left prints
//! nothing and opens nothing. Filesystems reached from a device or partition
//! get `fs_directory_limit` levels of their own, or whatever object
//! directory levels remain when that limit is 0.
//!
//! # Indentation
//! Entries of a directory are indented by the directory's own indent plus
//! its name length plus one, so each entry lines up under the character
//! after its parent's name.

use core::fmt;
use crate::config::{ErrorPolicy, WalkConfig};
use crate::report::{self, ReportSink};
use crate::status::NtStatus;
use super::attributes::{ObjectAttributes, OBJ_NAME_PATH_SEPARATOR};
use super::namespace::{Handle, ObjectDirectoryInformation, ObjectNamespace};
use super::type_tag::ObjectKind;

/// Counters gathered during a walk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WalkStats {
    /// Object directory entries of type Directory
    pub directories: u32,
    /// Symbolic links listed
    pub symbolic_links: u32,
    /// Devices listed
    pub devices: u32,
    /// Disks listed
    pub disks: u32,
    /// Partitions found by probing
    pub partitions: u32,
    /// Filesystem entries listed
    pub files: u32,
    /// Object directory entries of any other type
    pub other_objects: u32,
    /// Branches that failed and were skipped
    pub errors: u32,
}

impl WalkStats {
    /// Total lines describing namespace objects and files
    pub fn entries(&self) -> u32 {
        self.directories
            + self.symbolic_links
            + self.devices
            + self.disks
            + self.partitions
            + self.files
            + self.other_objects
    }
}

/// Namespace walker state for one run
pub struct NamespaceWalker<'a, N: ObjectNamespace + ?Sized, S: ReportSink + ?Sized> {
    pub(crate) namespace: &'a N,
    pub(crate) sink: &'a mut S,
    pub(crate) config: &'a WalkConfig,
    pub(crate) stats: WalkStats,
}

impl<'a, N: ObjectNamespace + ?Sized, S: ReportSink + ?Sized> NamespaceWalker<'a, N, S> {
    pub fn new(namespace: &'a N, sink: &'a mut S, config: &'a WalkConfig) -> Self {
        Self {
            namespace,
            sink,
            config,
            stats: WalkStats::default(),
        }
    }

    /// Counters so far
    pub fn stats(&self) -> &WalkStats {
        &self.stats
    }

    /// Walk the whole namespace from `\`
    pub fn walk(mut self) -> Result<WalkStats, NtStatus> {
        log::info!(
            "[OB] Listing object namespace (object limit {}, fs limit {}, {} partition slots)",
            self.config.object_directory_limit,
            self.config.fs_directory_limit,
            self.config.partition_probe_limit,
        );

        let root = ObjectAttributes::root();
        let result = self.walk_directory(&root, self.config.object_directory_limit, 0);
        self.sink.flush();
        self.settle(result)?;

        log::info!(
            "[OB] Listed {} entries ({} errors)",
            self.stats.entries(),
            self.stats.errors
        );
        Ok(self.stats)
    }

    /// List one object directory and expand its entries
    pub fn walk_directory(
        &mut self,
        attributes: &ObjectAttributes,
        limit: u32,
        indent: usize,
    ) -> Result<(), NtStatus> {
        if limit == 0 {
            return Ok(());
        }
        let limit = limit - 1;

        let directory = match self.namespace.open_directory_object(attributes) {
            Ok(handle) => handle,
            Err(status) => {
                self.emit(
                    indent + 1,
                    format_args!("ERROR: {} | Unable to open \"{}\"", status, attributes.name()),
                );
                return Err(status);
            }
        };
        log::trace!("[OB] Opened directory \"{}\" as {:#x}", attributes.name(), directory);

        let indent = indent + attributes.name_len() + 1;
        let mut context = 0u32;
        let result = loop {
            match self.namespace.query_directory_object(directory, &mut context) {
                Ok(entry) => {
                    let expanded = self.expand_entry(attributes, directory, &entry, limit, indent);
                    if let Err(status) = expanded {
                        break Err(status);
                    }
                }
                Err(NtStatus::NO_MORE_ENTRIES) => break Ok(()),
                Err(status) => {
                    self.emit(indent + 1, format_args!("NtQueryDirectoryObject return {}", status));
                    break Err(status);
                }
            }
        };

        self.close_handle(directory);
        result
    }

    /// Print one directory entry and dispatch on its kind
    fn expand_entry(
        &mut self,
        parent: &ObjectAttributes,
        directory: Handle,
        entry: &ObjectDirectoryInformation,
        limit: u32,
        indent: usize,
    ) -> Result<(), NtStatus> {
        self.emit(indent, format_args!("\\{} - Type = {}", entry.name, entry.type_tag));

        let child = parent.child(directory, &entry.name);
        let result = match ObjectKind::classify(entry.type_tag) {
            ObjectKind::SymbolicLink => {
                self.stats.symbolic_links += 1;
                self.resolve_symbolic_link(&child, indent + 1)
            }
            ObjectKind::Device => {
                self.stats.devices += 1;
                let volume = child.with_suffix(OBJ_NAME_PATH_SEPARATOR);
                let budget = self.config.fs_budget(limit);
                self.walk_file_directory(&volume, budget, indent + volume.name_len())
            }
            ObjectKind::Disk => {
                self.stats.disks += 1;
                self.probe_disk_partitions(&child, limit, indent)
            }
            ObjectKind::Directory => {
                self.stats.directories += 1;
                self.walk_directory(&child, limit, indent)
            }
            ObjectKind::Other(_) => {
                self.stats.other_objects += 1;
                Ok(())
            }
        };

        self.settle(result)
    }

    /// Apply the error policy to a finished branch
    pub(crate) fn settle(&mut self, result: Result<(), NtStatus>) -> Result<(), NtStatus> {
        match (result, self.config.error_policy) {
            (Ok(()), _) => Ok(()),
            (Err(status), ErrorPolicy::Continue) => {
                self.stats.errors += 1;
                log::debug!("[OB] Branch failed with {:?}, continuing", status);
                Ok(())
            }
            (Err(status), ErrorPolicy::Abort) => Err(status),
        }
    }

    pub(crate) fn emit(&mut self, indent: usize, args: fmt::Arguments<'_>) {
        report::emit(&mut *self.sink, indent, args);
    }

    pub(crate) fn close_handle(&self, handle: Handle) {
        if let Err(status) = self.namespace.close(handle) {
            log::warn!("[OB] NtClose({:#x}) failed: {:?}", handle, status);
        }
    }
}

/// Walk `namespace` from `\` into `sink`
pub fn walk_namespace<N, S>(
    namespace: &N,
    sink: &mut S,
    config: &WalkConfig,
) -> Result<WalkStats, NtStatus>
where
    N: ObjectNamespace + ?Sized,
    S: ReportSink + ?Sized,
{
    NamespaceWalker::new(namespace, sink, config).walk()
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;
    use crate::config::ErrorPolicy;
    use crate::ob::type_tag::TypeTag;
    use crate::report::{indent_of, MemorySink};
    use crate::sim::{SimNamespace, Volume};

    fn run(
        namespace: &SimNamespace,
        config: &WalkConfig,
    ) -> (MemorySink, Result<WalkStats, NtStatus>) {
        let mut sink = MemorySink::new();
        let result = walk_namespace(namespace, &mut sink, config);
        (sink, result)
    }

    /// Keeps lines and counts flushes
    #[derive(Default)]
    struct FlushCounter {
        lines: MemorySink,
        flushes: u32,
    }

    impl ReportSink for FlushCounter {
        fn write_line(&mut self, line: &str) {
            self.lines.write_line(line);
        }

        fn flush(&mut self) {
            self.flushes += 1;
        }
    }

    /// \L1\L2\L3\L4, each holding the next
    fn nested_directories() -> SimNamespace {
        let mut ns = SimNamespace::new();
        ns.create_directory("\\L1").unwrap();
        ns.create_directory("\\L1\\L2").unwrap();
        ns.create_directory("\\L1\\L2\\L3").unwrap();
        ns.create_directory("\\L1\\L2\\L3\\L4").unwrap();
        ns
    }

    #[test]
    fn test_end_to_end_directory_device_file() {
        let mut ns = SimNamespace::new();
        ns.create_directory("\\A").unwrap();
        ns.create_device("\\A\\B", Some(Volume::from_paths(&["c.txt"]))).unwrap();

        let config = WalkConfig::new()
            .with_object_directory_limit(2)
            .with_fs_directory_limit(1);
        let (sink, result) = run(&ns, &config);
        result.unwrap();

        assert_eq!(
            sink.trimmed(),
            ["\\A - Type = Dire", "\\B - Type = Devi", "\\c.txt"]
        );
        let indents: Vec<usize> = sink.lines().iter().map(|line| indent_of(line)).collect();
        assert_eq!(indents, [2, 4, 6]);
        assert_eq!(ns.open_handle_count(), 0);
    }

    #[test]
    fn test_zero_budget_prints_and_opens_nothing() {
        let ns = nested_directories();
        let config = WalkConfig::new().with_object_directory_limit(0);
        let (sink, result) = run(&ns, &config);

        assert_eq!(result.unwrap(), WalkStats::default());
        assert!(sink.is_empty());
        assert_eq!(ns.total_opens(), 0);
    }

    #[test]
    fn test_budget_bounds_depth() {
        let ns = nested_directories();

        for limit in 1..=4u32 {
            let config = WalkConfig::new().with_object_directory_limit(limit);
            let (sink, result) = run(&ns, &config);
            result.unwrap();

            // Level n is printed by the walk of level n-1, which needs n budget
            let expected: Vec<alloc::string::String> = (1..=limit)
                .map(|level| alloc::format!("\\L{} - Type = Dire", level))
                .collect();
            assert_eq!(sink.trimmed(), expected, "limit {}", limit);
        }
    }

    #[test]
    fn test_root_open_failure_prints_one_line() {
        let mut ns = nested_directories();
        ns.fail_open("\\", NtStatus::ACCESS_DENIED).unwrap();

        let (sink, result) = run(&ns, &WalkConfig::new());
        let stats = result.unwrap();

        assert_eq!(sink.lines(), [" ERROR: C0000022 | Unable to open \"\\\""]);
        assert_eq!(stats.errors, 1);
        assert_eq!(ns.open_handle_count(), 0);
    }

    #[test]
    fn test_subdirectory_open_failure_skips_enumeration() {
        let mut ns = nested_directories();
        ns.create_directory("\\Other").unwrap();
        ns.fail_open("\\L1", NtStatus::ACCESS_DENIED).unwrap();

        let (sink, result) = run(&ns, &WalkConfig::new());
        let stats = result.unwrap();

        assert_eq!(
            sink.trimmed(),
            [
                "\\L1 - Type = Dire",
                "ERROR: C0000022 | Unable to open \"L1\"",
                "\\Other - Type = Dire",
            ]
        );
        assert_eq!(indent_of(&sink.lines()[1]), 3);
        assert_eq!(stats.errors, 1);
        assert!(!ns.open_log().iter().any(|path| path.contains("L2")));
    }

    #[test]
    fn test_enumeration_error_is_reported() {
        let mut ns = nested_directories();
        ns.create_directory("\\Second").unwrap();
        ns.fail_directory_query("\\", 1, NtStatus::INSUFFICIENT_RESOURCES).unwrap();

        let config = WalkConfig::new().with_object_directory_limit(1);
        let (sink, result) = run(&ns, &config);
        let stats = result.unwrap();

        assert_eq!(
            sink.lines(),
            ["  \\L1 - Type = Dire", "   NtQueryDirectoryObject return C000009A"]
        );
        assert_eq!(stats.errors, 1);
        assert_eq!(ns.open_handle_count(), 0);
    }

    #[test]
    fn test_abort_policy_stops_the_walk() {
        let mut ns = nested_directories();
        ns.create_directory("\\Other").unwrap();
        ns.fail_open("\\L1", NtStatus::ACCESS_DENIED).unwrap();

        let config = WalkConfig::new().with_error_policy(ErrorPolicy::Abort);
        let (sink, result) = run(&ns, &config);

        assert_eq!(result, Err(NtStatus::ACCESS_DENIED));
        assert!(!sink.trimmed().contains(&"\\Other - Type = Dire"));
        assert_eq!(ns.open_handle_count(), 0);
    }

    #[test]
    fn test_sink_is_flushed_when_the_walk_aborts() {
        let mut ns = nested_directories();
        ns.fail_open("\\L1", NtStatus::ACCESS_DENIED).unwrap();

        let config = WalkConfig::new().with_error_policy(ErrorPolicy::Abort);
        let mut sink = FlushCounter::default();
        let result = walk_namespace(&ns, &mut sink, &config);

        assert_eq!(result, Err(NtStatus::ACCESS_DENIED));
        assert_eq!(sink.flushes, 1);
        assert_eq!(
            sink.lines.trimmed(),
            ["\\L1 - Type = Dire", "ERROR: C0000022 | Unable to open \"L1\""]
        );

        let mut sink = FlushCounter::default();
        walk_namespace(&ns, &mut sink, &WalkConfig::new()).unwrap();
        assert_eq!(sink.flushes, 1);
    }

    #[test]
    fn test_other_objects_are_listed_not_expanded() {
        let mut ns = SimNamespace::new();
        ns.create_directory("\\BaseNamedObjects").unwrap();
        ns.create_object("\\BaseNamedObjects\\Ready", TypeTag::from_bytes(*b"Even")).unwrap();

        let (sink, result) = run(&ns, &WalkConfig::new());
        let stats = result.unwrap();

        assert_eq!(
            sink.trimmed(),
            ["\\BaseNamedObjects - Type = Dire", "\\Ready - Type = Even"]
        );
        assert_eq!(stats.other_objects, 1);
        assert_eq!(stats.directories, 1);
    }

    #[test]
    fn test_device_budget_uses_fs_limit_or_inherits() {
        let mut ns = SimNamespace::new();
        ns.create_device(
            "\\Cd",
            Some(Volume::from_paths(&[
                "a\\",
                "a\\b\\",
                "a\\b\\c\\",
                "a\\b\\c\\d\\",
                "a\\b\\c\\d\\e.txt",
            ])),
        )
        .unwrap();

        // Root walk consumes one level, leaving 4 to inherit
        let inherit = WalkConfig::new()
            .with_object_directory_limit(5)
            .with_fs_directory_limit(0);
        let (sink, result) = run(&ns, &inherit);
        result.unwrap();
        assert_eq!(
            sink.trimmed(),
            ["\\Cd - Type = Devi", "\\a", "\\b", "\\c", "\\d"]
        );

        let own = inherit.with_fs_directory_limit(2);
        let (sink, result) = run(&ns, &own);
        result.unwrap();
        assert_eq!(sink.trimmed(), ["\\Cd - Type = Devi", "\\a", "\\b"]);
        assert_eq!(ns.open_handle_count(), 0);
    }

    #[test]
    fn test_device_without_volume_lists_nothing() {
        let mut ns = SimNamespace::new();
        ns.create_device("\\Video", None).unwrap();

        let (sink, result) = run(&ns, &WalkConfig::new());
        let stats = result.unwrap();
        assert_eq!(sink.trimmed(), ["\\Video - Type = Devi"]);
        assert_eq!(stats.devices, 1);
        assert_eq!(stats.errors, 1);
    }

    #[test]
    fn test_stats_count_every_kind() {
        let mut ns = SimNamespace::new();
        ns.create_directory("\\Device").unwrap();
        ns.create_device("\\Device\\CdRom0", Some(Volume::from_paths(&["default.xbe"]))).unwrap();
        ns.create_disk("\\Device\\Harddisk0").unwrap();
        ns.add_partition("\\Device\\Harddisk0", 1, Some(Volume::new())).unwrap();
        ns.create_directory("\\??").unwrap();
        ns.create_symbolic_link("\\??\\D:", "\\Device\\CdRom0").unwrap();

        let (_, result) = run(&ns, &WalkConfig::new());
        let stats = result.unwrap();
        assert_eq!(
            stats,
            WalkStats {
                directories: 2,
                symbolic_links: 1,
                devices: 1,
                disks: 1,
                partitions: 1,
                files: 1,
                other_objects: 0,
                errors: 0,
            }
        );
        assert_eq!(stats.entries(), 7);
    }
}
