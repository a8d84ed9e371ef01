//! Filesystem Directory Listing
//!
//! Lists the files below a device or partition. A directory is opened for
//! listing and queried one entry at a time; the first query restarts the
//! scan and later ones continue it. Each entry is printed as `\<name>` and
//! then, if it is a directory, listed in turn one level deeper.
//!
//! # Directory Detection
//! Filesystems that report attributes say which entries are directories.
//! When they don't, or when [`ContainerDetection::ProbeByOpen`] is set, every
//! entry is opened as a directory and `STATUS_NOT_A_DIRECTORY` marks a plain
//! file. Either way a plain file produces no further output.
//!
//! Open and enumeration failures never print anything here; they are
//! returned to the caller.

use crate::config::ContainerDetection;
use crate::ob::attributes::ObjectAttributes;
use crate::ob::namespace::{FileDirectoryInformation, ObjectNamespace};
use crate::ob::probe::query_object_type;
use crate::ob::walker::NamespaceWalker;
use crate::report::ReportSink;
use crate::status::NtStatus;
use super::file::{ShareAccess, LIST_DIRECTORY_ACCESS, LIST_DIRECTORY_OPTIONS};

impl<'a, N: ObjectNamespace + ?Sized, S: ReportSink + ?Sized> NamespaceWalker<'a, N, S> {
    /// List the filesystem directory named by `attributes`
    pub fn walk_file_directory(
        &mut self,
        attributes: &ObjectAttributes,
        limit: u32,
        indent: usize,
    ) -> Result<(), NtStatus> {
        if limit == 0 {
            return Ok(());
        }
        let limit = limit - 1;

        let directory = self.namespace.open_file(
            attributes,
            LIST_DIRECTORY_ACCESS,
            ShareAccess::READ,
            LIST_DIRECTORY_OPTIONS,
        )?;
        log::trace!("[IO] Opened file directory \"{}\" as {:#x}", attributes.name(), directory);

        let mut restart_scan = true;
        let result = loop {
            let entry = match self.namespace.query_directory_file(directory, restart_scan) {
                Ok(entry) => entry,
                Err(status) if status.is_end_of_enumeration() => break Ok(()),
                Err(status) => {
                    log::debug!(
                        "[IO] NtQueryDirectoryFile(\"{}\") failed: {:?}",
                        attributes.name(),
                        status
                    );
                    break Err(status);
                }
            };
            restart_scan = false;
            self.stats.files += 1;

            let child = attributes.child(directory, &entry.file_name);
            if self.config.probe_file_types {
                let tag = query_object_type(self.namespace, &child);
                self.emit(indent, format_args!("\\{} - Type = {}", entry.file_name, tag));
            } else {
                self.emit(indent, format_args!("\\{}", entry.file_name));
            }

            let child_indent = indent + entry.file_name.len() + 1;
            if let Err(status) = self.descend_file_entry(&child, &entry, limit, child_indent) {
                break Err(status);
            }
        };

        self.close_handle(directory);
        result
    }

    /// Recurse into `entry` if it is (or might be) a directory
    fn descend_file_entry(
        &mut self,
        child: &ObjectAttributes,
        entry: &FileDirectoryInformation,
        limit: u32,
        indent: usize,
    ) -> Result<(), NtStatus> {
        let known = match self.config.container_detection {
            ContainerDetection::Attributes => entry.is_directory(),
            ContainerDetection::ProbeByOpen => None,
        };

        let result = match known {
            Some(false) => Ok(()),
            Some(true) => self.walk_file_directory(child, limit, indent),
            None => match self.walk_file_directory(child, limit, indent) {
                Err(NtStatus::NOT_A_DIRECTORY) => Ok(()),
                other => other,
            },
        };
        self.settle(result)
    }
}
