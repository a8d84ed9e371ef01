//! Disk Partition Probing
//!
//! Disk objects don't enumerate their partitions, so the walker guesses:
//! it tries to open `<disk>\Partition0` through
//! `<disk>\Partition{partition_probe_limit - 1}` as raw volumes. Every slot
//! that opens is printed with its object type and its filesystem listed:
//!
//! ```text
//!    \Harddisk0 - Type = Disk
//!              \Partition1 - Type = Devi
//!                         \TDATA
//! ```
//!
//! A slot that fails to open is a gap, not an error, and probing goes on.

use alloc::format;
use crate::ob::attributes::{ObjectAttributes, OBJ_NAME_PATH_SEPARATOR};
use crate::ob::namespace::ObjectNamespace;
use crate::ob::probe::query_object_type;
use crate::ob::walker::NamespaceWalker;
use crate::report::ReportSink;
use crate::status::NtStatus;
use super::file::{RAW_PROBE_ACCESS, RAW_PROBE_OPTIONS, RAW_PROBE_SHARE};

/// Name of partition slot `number` below a disk
pub fn partition_suffix(number: u32) -> alloc::string::String {
    format!("{}Partition{}", OBJ_NAME_PATH_SEPARATOR, number)
}

impl<'a, N: ObjectNamespace + ?Sized, S: ReportSink + ?Sized> NamespaceWalker<'a, N, S> {
    /// Probe and list the partitions of the disk named by `disk`
    pub fn probe_disk_partitions(
        &mut self,
        disk: &ObjectAttributes,
        limit: u32,
        indent: usize,
    ) -> Result<(), NtStatus> {
        if limit == 0 {
            return Ok(());
        }
        let limit = limit - 1;
        let indent = indent + disk.name_len() + 1;

        for number in 0..self.config.partition_probe_limit {
            let suffix = partition_suffix(number);
            let partition = disk.with_suffix(&suffix);

            let probe = match self.namespace.open_file(
                &partition,
                RAW_PROBE_ACCESS,
                RAW_PROBE_SHARE,
                RAW_PROBE_OPTIONS,
            ) {
                Ok(handle) => handle,
                Err(status) => {
                    log::trace!("[IO] No partition at \"{}\": {:?}", partition.name(), status);
                    continue;
                }
            };
            self.close_handle(probe);
            self.stats.partitions += 1;

            let tag = query_object_type(self.namespace, &partition);
            self.emit(indent, format_args!("{} - Type = {}", suffix, tag));

            let volume = partition.with_suffix(OBJ_NAME_PATH_SEPARATOR);
            let budget = self.config.fs_budget(limit);
            let result = self.walk_file_directory(&volume, budget, indent + suffix.len());
            self.settle(result)?;
        }

        Ok(())
    }
}
