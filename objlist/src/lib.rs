//! Object Directory List
//!
//! Walks an NT-style object namespace from `\` and prints an indented
//! listing of everything it reaches, following the NT model:
//!
//! - **ob** - Object namespace: directories, symbolic links, type tags, the walker
//! - **io** - Filesystem side: volume listing below devices, partition probing
//! - **sim** - In-memory namespace backing the binary and the tests
//! - **config** - Depth budgets and traversal policies
//! - **report** - Line sinks the listing is written to
//! - **status** - NTSTATUS values
//!
//! # Output
//!
//! ```text
//!   \Device - Type = Dire
//!          \CdRom0 - Type = Devi
//!                 \default.xbe
//!          \Harddisk0 - Type = Disk
//!                    \Partition1 - Type = Devi
//!                               \TDATA
//! ```

#![no_std]

extern crate alloc;

pub mod config;
pub mod io;
pub mod ob;
pub mod report;
pub mod sim;
pub mod status;

pub use config::{ContainerDetection, ErrorPolicy, WalkConfig};
pub use ob::{walk_namespace, NamespaceWalker, ObjectNamespace, WalkStats};
pub use report::{LogSink, MemorySink, ReportSink, TeeSink};
pub use status::NtStatus;
