//! `objlist` - list the object namespace
//!
//! Prints the sample namespace to stdout and, with `--output`, appends the
//! same lines to a log file.

use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;
use objlist::config::{
    ContainerDetection, ErrorPolicy, WalkConfig, DEFAULT_FS_DIRECTORY_LIMIT,
    DEFAULT_OBJECT_DIRECTORY_LIMIT, DEFAULT_PARTITION_PROBE_LIMIT,
};
use objlist::report::{ReportSink, TeeSink};
use objlist::sim::xbox_namespace;
use objlist::walk_namespace;

/// List the object directory tree
#[derive(Parser, Debug)]
#[command(name = "objlist", about = "List the object directory namespace", version)]
struct Args {
    /// Levels of object directories to list
    #[arg(long, default_value_t = DEFAULT_OBJECT_DIRECTORY_LIMIT)]
    object_limit: u32,

    /// Levels of files to list below each device (0 = inherit)
    #[arg(long, default_value_t = DEFAULT_FS_DIRECTORY_LIMIT)]
    fs_limit: u32,

    /// Partition slots to probe on each disk
    #[arg(long, default_value_t = DEFAULT_PARTITION_PROBE_LIMIT)]
    partition_limit: u32,

    /// Open every file entry to find directories instead of trusting attributes
    #[arg(long)]
    probe_by_open: bool,

    /// Print the object type of every file entry
    #[arg(long)]
    probe_file_types: bool,

    /// Stop at the first failing branch
    #[arg(long)]
    abort_on_error: bool,

    /// Append the listing to this file as well
    #[arg(short, long)]
    output: Option<PathBuf>,
}

impl Args {
    fn walk_config(&self) -> WalkConfig {
        let detection = if self.probe_by_open {
            ContainerDetection::ProbeByOpen
        } else {
            ContainerDetection::Attributes
        };
        let policy = if self.abort_on_error {
            ErrorPolicy::Abort
        } else {
            ErrorPolicy::Continue
        };
        WalkConfig::new()
            .with_object_directory_limit(self.object_limit)
            .with_fs_directory_limit(self.fs_limit)
            .with_partition_probe_limit(self.partition_limit)
            .with_container_detection(detection)
            .with_probe_file_types(self.probe_file_types)
            .with_error_policy(policy)
    }
}

/// Lines to stdout
struct ConsoleSink {
    out: io::Stdout,
}

impl ReportSink for ConsoleSink {
    fn write_line(&mut self, line: &str) {
        let mut out = self.out.lock();
        if let Err(err) = writeln!(out, "{}", line) {
            log::warn!("stdout write failed: {}", err);
        }
    }

    fn flush(&mut self) {
        if let Err(err) = self.out.flush() {
            log::warn!("stdout flush failed: {}", err);
        }
    }
}

/// Lines appended to a log file
struct FileSink {
    writer: BufWriter<File>,
}

impl FileSink {
    fn open(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self { writer: BufWriter::new(file) })
    }
}

impl ReportSink for FileSink {
    fn write_line(&mut self, line: &str) {
        if let Err(err) = writeln!(self.writer, "{}", line) {
            log::warn!("log file write failed: {}", err);
        }
    }

    fn flush(&mut self) {
        if let Err(err) = self.writer.flush() {
            log::warn!("log file flush failed: {}", err);
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();
    let config = args.walk_config();

    let file = match args.output.as_deref().map(FileSink::open).transpose() {
        Ok(file) => file,
        Err(err) => {
            log::error!("cannot open output file: {}", err);
            process::exit(1);
        }
    };
    let mut sink = TeeSink::new(ConsoleSink { out: io::stdout() }, file);

    let namespace = xbox_namespace();
    match walk_namespace(&namespace, &mut sink, &config) {
        Ok(stats) => log::info!(
            "{} directories, {} links, {} devices, {} disks, {} partitions, {} files, \
             {} other, {} errors",
            stats.directories,
            stats.symbolic_links,
            stats.devices,
            stats.disks,
            stats.partitions,
            stats.files,
            stats.other_objects,
            stats.errors
        ),
        Err(status) => {
            log::error!("walk aborted: {:?}", status);
            process::exit(1);
        }
    }
}
