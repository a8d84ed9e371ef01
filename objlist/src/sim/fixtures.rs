//! Sample Namespace
//!
//! A namespace shaped like a retail console's: the CD-ROM and hard disk
//! devices, DOS drive letters, and a few named synchronization objects.
//! The binary lists this when run without a platform backend.

use alloc::format;
use crate::ob::type_tag::TypeTag;
use crate::status::NtStatus;
use super::{SimNamespace, Volume};

/// Hard disk partitions and the files on each
const HARDDISK_PARTITIONS: &[(u32, &[&str])] = &[
    (1, &["TDATA\\", "UDATA\\", "TDATA\\fffe0000\\music\\ST.DB"]),
    (2, &["xboxdash.xbe", "xodash\\", "xodash\\xonlinedash.xbe", "xodash\\audio\\click.wav"]),
    (3, &["Cache0\\"]),
    (4, &["Cache1\\"]),
    (5, &["Cache2\\"]),
];

/// Build the sample namespace
pub fn xbox_namespace() -> SimNamespace {
    match build() {
        Ok(namespace) => namespace,
        Err(status) => {
            // Only reachable if the tables above name the same object twice
            log::error!("[SIM] Sample namespace is inconsistent: {:?}", status);
            SimNamespace::new()
        }
    }
}

fn build() -> Result<SimNamespace, NtStatus> {
    let mut ns = SimNamespace::new();

    ns.create_directory("\\ObjectTypes")?;
    for name in ["Directory", "SymbolicLink", "Device", "Event", "Mutant", "Semaphore"] {
        ns.create_object(&format!("\\ObjectTypes\\{}", name), TypeTag::from_bytes(*b"Type"))?;
    }

    ns.create_directory("\\Device")?;
    ns.create_device(
        "\\Device\\CdRom0",
        Some(Volume::from_paths(&["default.xbe", "media\\", "media\\intro.xmv"])),
    )?;
    ns.create_disk("\\Device\\Harddisk0")?;
    // Partition 0 is the raw configuration area and has no filesystem
    ns.add_partition("\\Device\\Harddisk0", 0, None)?;
    for &(number, files) in HARDDISK_PARTITIONS {
        ns.add_partition("\\Device\\Harddisk0", number, Some(Volume::from_paths(files)))?;
    }
    ns.create_device("\\Device\\Video", None)?;

    ns.create_directory("\\??")?;
    ns.create_symbolic_link("\\??\\C:", "\\Device\\Harddisk0\\Partition2")?;
    ns.create_symbolic_link("\\??\\D:", "\\Device\\CdRom0")?;
    ns.create_symbolic_link("\\??\\E:", "\\Device\\Harddisk0\\Partition1")?;

    ns.create_directory("\\Win32NamedObjects")?;
    ns.create_object(
        "\\Win32NamedObjects\\TestMutexObjectName",
        TypeTag::from_bytes(*b"Muta"),
    )?;
    ns.create_object(
        "\\Win32NamedObjects\\TestSemaphoreObjectName",
        TypeTag::from_bytes(*b"Sema"),
    )?;

    Ok(ns)
}
