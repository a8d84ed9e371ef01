//! In-Memory Object Namespace
//!
//! A self-contained [`ObjectNamespace`] used by the `objlist` binary and by
//! the tests. It models just enough of the object manager and the I/O
//! manager to exercise the walker:
//!
//! - object directories, symbolic links, devices, disks and plain objects
//! - volumes behind devices and disk partitions ([`Volume`])
//! - a handle table with per-handle enumeration cursors
//! - injected open and enumeration failures
//!
//! # Name Resolution
//! Absolute names start at `\`; relative names start at the object or file
//! their root handle was opened on. A trailing `\` after a device enters its
//! volume. Below a disk only `PartitionN` resolves. Object directory lookups
//! honor `OBJ_CASE_INSENSITIVE`; volume lookups are always case-insensitive.
//!
//! # Observation
//! Every attempted open is recorded as a full path ([`SimNamespace::open_log`])
//! and handles still open can be counted, so tests can check which names a
//! walk touched and that it released everything it opened.

pub mod fixtures;
pub mod handle;
pub mod object;
pub mod volume;

pub use fixtures::xbox_namespace;
pub use volume::Volume;

use alloc::collections::BTreeMap;
use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;
use spin::Mutex;
use crate::io::file::{AccessMask, CreateOptions, FileAttributes, ShareAccess};
use crate::ob::attributes::{ObjAttributes, ObjectAttributes};
use crate::ob::namespace::{
    FileDirectoryInformation, Handle, ObjectDirectoryInformation, ObjectNamespace,
};
use crate::ob::type_tag::TypeTag;
use crate::status::NtStatus;
use handle::{HandleTable, HandleTableEntry, HandleTarget};
use object::{
    parse_partition_name, ObjectBody, ObjectDirectory, ObjectId, SimObject, ROOT_DIRECTORY,
};
use volume::{NodeId, ROOT_NODE};

/// Namespace state behind the lock
struct SimState {
    /// Object arena; index 0 is `\`
    objects: Vec<SimObject>,
    handles: HandleTable,
    open_log: Vec<String>,
    total_opens: usize,
    reports_file_attributes: bool,
    /// Volume directories whose enumeration fails at an entry index
    file_query_failures: Vec<FileQueryFailure>,
}

/// Injected `query_directory_file` failure
#[derive(Debug, Clone, Copy)]
struct FileQueryFailure {
    device: ObjectId,
    node: NodeId,
    at_index: u32,
    status: NtStatus,
}

/// In-memory object namespace
pub struct SimNamespace {
    state: Mutex<SimState>,
}

impl SimNamespace {
    /// Namespace holding only the root directory
    pub fn new() -> Self {
        Self {
            state: Mutex::new(SimState {
                objects: alloc::vec![SimObject::directory("")],
                handles: HandleTable::new(),
                open_log: Vec::new(),
                total_opens: 0,
                reports_file_attributes: true,
                file_query_failures: Vec::new(),
            }),
        }
    }

    /// Whether file enumeration reports attributes (default true).
    /// Without them the walker has to probe each entry.
    pub fn set_reports_file_attributes(&mut self, reports: bool) {
        self.state.get_mut().reports_file_attributes = reports;
    }

    /// Create an object directory
    pub fn create_directory(&mut self, path: &str) -> Result<ObjectId, NtStatus> {
        self.state.get_mut().insert_object(path, |name| SimObject::directory(name))
    }

    /// Create a symbolic link to `target`
    pub fn create_symbolic_link(&mut self, path: &str, target: &str) -> Result<ObjectId, NtStatus> {
        self.state.get_mut().insert_object(path, |name| {
            SimObject::new(
                name,
                TypeTag::SYMBOLIC_LINK,
                ObjectBody::SymbolicLink { target: String::from(target) },
            )
        })
    }

    /// Create a device; `None` behaves as an unformatted device
    pub fn create_device(
        &mut self,
        path: &str,
        volume: Option<Volume>,
    ) -> Result<ObjectId, NtStatus> {
        self.state.get_mut().insert_object(path, |name| {
            SimObject::new(name, TypeTag::DEVICE, ObjectBody::Device { volume })
        })
    }

    /// Create a disk with no partitions
    pub fn create_disk(&mut self, path: &str) -> Result<ObjectId, NtStatus> {
        self.state.get_mut().insert_object(path, |name| {
            SimObject::new(name, TypeTag::DISK, ObjectBody::Disk { partitions: BTreeMap::new() })
        })
    }

    /// Create a plain object of any type
    pub fn create_object(&mut self, path: &str, type_tag: TypeTag) -> Result<ObjectId, NtStatus> {
        self.state.get_mut().insert_object(path, |name| {
            SimObject::new(name, type_tag, ObjectBody::Other)
        })
    }

    /// Populate partition slot `number` of the disk at `disk_path`
    pub fn add_partition(
        &mut self,
        disk_path: &str,
        number: u32,
        volume: Option<Volume>,
    ) -> Result<ObjectId, NtStatus> {
        let state = self.state.get_mut();
        let disk = state.lookup_object(disk_path)?;
        let id = ObjectId(state.objects.len());

        let partitions = match &mut state.objects[disk.0].body {
            ObjectBody::Disk { partitions } => partitions,
            _ => return Err(NtStatus::OBJECT_TYPE_MISMATCH),
        };
        if partitions.contains_key(&number) {
            return Err(NtStatus::OBJECT_NAME_COLLISION);
        }
        partitions.insert(number, id);

        let name = format!("Partition{}", number);
        state.objects.push(SimObject::new(&name, TypeTag::DEVICE, ObjectBody::Device { volume }));
        Ok(id)
    }

    /// Make every open of `path` (and of files below it) fail with `status`
    pub fn fail_open(&mut self, path: &str, status: NtStatus) -> Result<(), NtStatus> {
        let state = self.state.get_mut();
        let id = state.lookup_object(path)?;
        state.objects[id.0].open_status = Some(status);
        Ok(())
    }

    /// Make enumeration of the directory at `path` fail with `status` when
    /// it reaches entry `at_index`
    pub fn fail_directory_query(
        &mut self,
        path: &str,
        at_index: u32,
        status: NtStatus,
    ) -> Result<(), NtStatus> {
        let state = self.state.get_mut();
        let id = state.lookup_object(path)?;
        let directory = state.objects[id.0]
            .as_directory_mut()
            .ok_or(NtStatus::OBJECT_TYPE_MISMATCH)?;
        directory.query_failure = Some((at_index, status));
        Ok(())
    }

    /// Make enumeration of the volume directory at `path` (for example
    /// `\Device\CdRom0\` or `\Device\CdRom0\media`) fail with `status`
    /// when it reaches entry `at_index`
    pub fn fail_file_query(
        &mut self,
        path: &str,
        at_index: u32,
        status: NtStatus,
    ) -> Result<(), NtStatus> {
        let state = self.state.get_mut();
        let attributes = ObjectAttributes::new(path, ObjAttributes::CASE_INSENSITIVE, None);
        let (device, node) = match state.resolve(&attributes)? {
            HandleTarget::File { device, node } => (device, node),
            HandleTarget::Object(_) => return Err(NtStatus::OBJECT_TYPE_MISMATCH),
        };
        let directory = state
            .volume(device)?
            .node(node)
            .map(|node| node.directory)
            .unwrap_or(false);
        if !directory {
            return Err(NtStatus::NOT_A_DIRECTORY);
        }

        state
            .file_query_failures
            .retain(|failure| (failure.device, failure.node) != (device, node));
        state.file_query_failures.push(FileQueryFailure { device, node, at_index, status });
        Ok(())
    }

    /// Handles currently open
    pub fn open_handle_count(&self) -> usize {
        self.state.lock().handles.len()
    }

    /// Successful opens so far
    pub fn total_opens(&self) -> usize {
        self.state.lock().total_opens
    }

    /// Full path of every open attempted so far, in order
    pub fn open_log(&self) -> Vec<String> {
        self.state.lock().open_log.clone()
    }

    pub fn clear_open_log(&mut self) {
        self.state.get_mut().open_log.clear();
    }
}

impl Default for SimNamespace {
    fn default() -> Self {
        Self::new()
    }
}

impl SimState {
    /// Add an object at absolute `path`, built by `make` from its name
    fn insert_object<F>(&mut self, path: &str, make: F) -> Result<ObjectId, NtStatus>
    where
        F: FnOnce(&str) -> SimObject,
    {
        let (parent_path, name) = path
            .rsplit_once('\\')
            .ok_or(NtStatus::OBJECT_PATH_SYNTAX_BAD)?;
        if name.is_empty() {
            return Err(NtStatus::OBJECT_NAME_INVALID);
        }
        let parent = if parent_path.is_empty() {
            ROOT_DIRECTORY
        } else {
            self.lookup_object(parent_path)?
        };

        let id = ObjectId(self.objects.len());
        let directory = self.objects[parent.0]
            .as_directory()
            .ok_or(NtStatus::OBJECT_TYPE_MISMATCH)?;
        if directory.lookup(&self.objects, name, true).is_some() {
            return Err(NtStatus::OBJECT_NAME_COLLISION);
        }

        self.objects.push(make(name));
        if let Some(directory) = self.objects[parent.0].as_directory_mut() {
            directory.insert(id, name);
        }
        Ok(id)
    }

    /// Object at absolute `path`, ignoring injected failures
    fn lookup_object(&self, path: &str) -> Result<ObjectId, NtStatus> {
        let attributes = ObjectAttributes::new(path, ObjAttributes::CASE_INSENSITIVE, None);
        match self.resolve(&attributes)? {
            HandleTarget::Object(id) => Ok(id),
            HandleTarget::File { .. } => Err(NtStatus::OBJECT_TYPE_MISMATCH),
        }
    }

    /// Full path an open of `attributes` refers to
    fn display_path(&self, attributes: &ObjectAttributes) -> String {
        let base = attributes
            .root_directory
            .and_then(|handle| self.handles.get(handle).ok());
        match base {
            None => String::from(attributes.name()),
            Some(entry) if entry.path.ends_with('\\') => {
                format!("{}{}", entry.path, attributes.name())
            }
            Some(entry) => format!("{}\\{}", entry.path, attributes.name()),
        }
    }

    fn volume(&self, device: ObjectId) -> Result<&Volume, NtStatus> {
        match &self.objects[device.0].body {
            ObjectBody::Device { volume: Some(volume) } => Ok(volume),
            ObjectBody::Device { volume: None } => Err(NtStatus::UNRECOGNIZED_VOLUME),
            _ => Err(NtStatus::OBJECT_TYPE_MISMATCH),
        }
    }

    /// Resolve a name to its target without checking injected failures
    fn resolve(&self, attributes: &ObjectAttributes) -> Result<HandleTarget, NtStatus> {
        let name = attributes.name();
        let (start, path) = match attributes.root_directory {
            None => match name.strip_prefix('\\') {
                Some(rest) => (HandleTarget::Object(ROOT_DIRECTORY), rest),
                None => return Err(NtStatus::OBJECT_PATH_SYNTAX_BAD),
            },
            Some(root) => {
                if name.starts_with('\\') {
                    return Err(NtStatus::OBJECT_PATH_SYNTAX_BAD);
                }
                (self.handles.get(root)?.target, name)
            }
        };

        let case_insensitive = attributes.is_case_insensitive();
        let mut current = start;
        let mut components = path.split('\\').peekable();
        while let Some(component) = components.next() {
            let last = components.peek().is_none();
            if component.is_empty() {
                if !last {
                    return Err(NtStatus::OBJECT_NAME_INVALID);
                }
                current = self.enter_volume(current)?;
                break;
            }
            current = self.step(current, component, last, case_insensitive)?;
        }
        Ok(current)
    }

    /// Trailing separator: a device opens as the root of its volume
    fn enter_volume(&self, target: HandleTarget) -> Result<HandleTarget, NtStatus> {
        let is_device = |id: ObjectId| matches!(self.objects[id.0].body, ObjectBody::Device { .. });
        match target {
            HandleTarget::Object(id) if is_device(id) => {
                self.volume(id)?;
                Ok(HandleTarget::File { device: id, node: ROOT_NODE })
            }
            other => Ok(other),
        }
    }

    /// Follow one path component
    fn step(
        &self,
        current: HandleTarget,
        component: &str,
        last: bool,
        case_insensitive: bool,
    ) -> Result<HandleTarget, NtStatus> {
        let not_found = if last {
            NtStatus::OBJECT_NAME_NOT_FOUND
        } else {
            NtStatus::OBJECT_PATH_NOT_FOUND
        };

        match current {
            HandleTarget::Object(id) => match &self.objects[id.0].body {
                ObjectBody::Directory(directory) => directory
                    .lookup(&self.objects, component, case_insensitive)
                    .map(HandleTarget::Object)
                    .ok_or(not_found),
                ObjectBody::Device { .. } => {
                    let node = self.volume(id)?.step(ROOT_NODE, component, last)?;
                    Ok(HandleTarget::File { device: id, node })
                }
                ObjectBody::Disk { partitions } => parse_partition_name(component)
                    .and_then(|number| partitions.get(&number))
                    .map(|&partition| HandleTarget::Object(partition))
                    .ok_or(not_found),
                ObjectBody::SymbolicLink { .. } | ObjectBody::Other => {
                    Err(NtStatus::OBJECT_PATH_NOT_FOUND)
                }
            },
            HandleTarget::File { device, node } => {
                let node = self.volume(device)?.step(node, component, last)?;
                Ok(HandleTarget::File { device, node })
            }
        }
    }

    /// Resolve for an open: record the attempt and apply injected failures
    fn resolve_for_open(
        &mut self,
        attributes: &ObjectAttributes,
    ) -> Result<(HandleTarget, String), NtStatus> {
        let path = self.display_path(attributes);
        self.open_log.push(path.clone());

        let target = self.resolve(attributes)?;
        let owner = match target {
            HandleTarget::Object(id) => id,
            HandleTarget::File { device, .. } => device,
        };
        if let Some(status) = self.objects[owner.0].open_status {
            return Err(status);
        }
        Ok((target, path))
    }

    fn insert_handle(&mut self, target: HandleTarget, path: String) -> Result<Handle, NtStatus> {
        log::trace!("[SIM] Open \"{}\"", path);
        let handle = self.handles.insert(HandleTableEntry { target, path, cursor: 0 })?;
        self.total_opens += 1;
        Ok(handle)
    }

    fn object_of(&self, handle: Handle) -> Result<&SimObject, NtStatus> {
        match self.handles.get(handle)?.target {
            HandleTarget::Object(id) => Ok(&self.objects[id.0]),
            HandleTarget::File { .. } => Err(NtStatus::OBJECT_TYPE_MISMATCH),
        }
    }

    fn open_file(
        &mut self,
        attributes: &ObjectAttributes,
        options: CreateOptions,
    ) -> Result<Handle, NtStatus> {
        if options.contains(CreateOptions::DIRECTORY_FILE | CreateOptions::NON_DIRECTORY_FILE) {
            return Err(NtStatus::INVALID_PARAMETER);
        }
        let (target, path) = self.resolve_for_open(attributes)?;

        let target = match target {
            HandleTarget::File { device, node } => {
                let directory = self
                    .volume(device)?
                    .node(node)
                    .map(|node| node.directory)
                    .ok_or(NtStatus::INVALID_HANDLE)?;
                if options.contains(CreateOptions::DIRECTORY_FILE) && !directory {
                    return Err(NtStatus::NOT_A_DIRECTORY);
                }
                if options.contains(CreateOptions::NON_DIRECTORY_FILE) && directory {
                    return Err(NtStatus::FILE_IS_A_DIRECTORY);
                }
                target
            }
            HandleTarget::Object(id) => match self.objects[id.0].body {
                // Raw device, or its volume root when a directory is asked for
                ObjectBody::Device { .. } if options.contains(CreateOptions::DIRECTORY_FILE) => {
                    self.enter_volume(target)?
                }
                ObjectBody::Device { .. } => target,
                _ => return Err(NtStatus::OBJECT_TYPE_MISMATCH),
            },
        };
        self.insert_handle(target, path)
    }

    fn query_directory_file(
        &mut self,
        directory: Handle,
        restart_scan: bool,
    ) -> Result<FileDirectoryInformation, NtStatus> {
        let SimState {
            objects,
            handles,
            reports_file_attributes,
            file_query_failures,
            ..
        } = self;
        let entry = handles.get_mut(directory)?;
        let (device, node_id) = match entry.target {
            HandleTarget::File { device, node } => (device, node),
            HandleTarget::Object(_) => return Err(NtStatus::INVALID_PARAMETER),
        };
        let volume = match &objects[device.0].body {
            ObjectBody::Device { volume: Some(volume) } => volume,
            _ => return Err(NtStatus::UNRECOGNIZED_VOLUME),
        };
        let node = volume.node(node_id).ok_or(NtStatus::INVALID_HANDLE)?;
        if !node.directory {
            return Err(NtStatus::INVALID_PARAMETER);
        }

        if restart_scan {
            entry.cursor = 0;
        }
        let failure = file_query_failures.iter().find(|failure| {
            failure.device == device && failure.node == node_id && failure.at_index == entry.cursor
        });
        if let Some(failure) = failure {
            return Err(failure.status);
        }
        let child = node
            .children
            .get(entry.cursor as usize)
            .and_then(|&child| volume.node(child))
            .ok_or(NtStatus::NO_MORE_FILES)?;
        entry.cursor += 1;

        let file_attributes = reports_file_attributes.then(|| {
            if child.directory {
                FileAttributes::DIRECTORY
            } else {
                FileAttributes::NORMAL
            }
        });
        Ok(FileDirectoryInformation {
            file_name: child.name.clone(),
            file_attributes,
        })
    }
}

impl ObjectNamespace for SimNamespace {
    fn open_directory_object(&self, attributes: &ObjectAttributes) -> Result<Handle, NtStatus> {
        let mut state = self.state.lock();
        let (target, path) = state.resolve_for_open(attributes)?;
        match target {
            HandleTarget::Object(id) if state.objects[id.0].as_directory().is_some() => {
                state.insert_handle(target, path)
            }
            _ => Err(NtStatus::OBJECT_TYPE_MISMATCH),
        }
    }

    fn query_directory_object(
        &self,
        directory: Handle,
        context: &mut u32,
    ) -> Result<ObjectDirectoryInformation, NtStatus> {
        let state = self.state.lock();
        let object: &ObjectDirectory = state
            .object_of(directory)?
            .as_directory()
            .ok_or(NtStatus::OBJECT_TYPE_MISMATCH)?;

        if let Some((at_index, status)) = object.query_failure {
            if *context == at_index {
                return Err(status);
            }
        }
        let entry = object.entry(*context).ok_or(NtStatus::NO_MORE_ENTRIES)?;
        *context += 1;

        let entry = &state.objects[entry.0];
        Ok(ObjectDirectoryInformation {
            name: entry.name.clone(),
            type_tag: entry.type_tag,
        })
    }

    fn open_object_by_name(&self, attributes: &ObjectAttributes) -> Result<Handle, NtStatus> {
        let mut state = self.state.lock();
        let (target, path) = state.resolve_for_open(attributes)?;
        state.insert_handle(target, path)
    }

    fn reference_object_type(&self, handle: Handle) -> Result<TypeTag, NtStatus> {
        let state = self.state.lock();
        state.object_of(handle).map(|object| object.type_tag)
    }

    fn open_symbolic_link_object(&self, attributes: &ObjectAttributes) -> Result<Handle, NtStatus> {
        let mut state = self.state.lock();
        let (target, path) = state.resolve_for_open(attributes)?;
        match target {
            HandleTarget::Object(id)
                if matches!(state.objects[id.0].body, ObjectBody::SymbolicLink { .. }) =>
            {
                state.insert_handle(target, path)
            }
            _ => Err(NtStatus::OBJECT_TYPE_MISMATCH),
        }
    }

    fn query_symbolic_link_object(
        &self,
        link: Handle,
        maximum_length: usize,
    ) -> Result<String, NtStatus> {
        let state = self.state.lock();
        match &state.object_of(link)?.body {
            ObjectBody::SymbolicLink { target } if target.len() > maximum_length => {
                Err(NtStatus::BUFFER_TOO_SMALL)
            }
            ObjectBody::SymbolicLink { target } => Ok(target.clone()),
            _ => Err(NtStatus::OBJECT_TYPE_MISMATCH),
        }
    }

    fn open_file(
        &self,
        attributes: &ObjectAttributes,
        desired_access: AccessMask,
        share_access: ShareAccess,
        open_options: CreateOptions,
    ) -> Result<Handle, NtStatus> {
        log::trace!(
            "[SIM] NtOpenFile(\"{}\", access {:#x}, share {:#x}, options {:#x})",
            attributes.name(),
            desired_access.bits(),
            share_access.bits(),
            open_options.bits()
        );
        self.state.lock().open_file(attributes, open_options)
    }

    fn query_directory_file(
        &self,
        directory: Handle,
        restart_scan: bool,
    ) -> Result<FileDirectoryInformation, NtStatus> {
        self.state.lock().query_directory_file(directory, restart_scan)
    }

    fn close(&self, handle: Handle) -> Result<(), NtStatus> {
        let entry = self.state.lock().handles.remove(handle)?;
        log::trace!("[SIM] Close \"{}\"", entry.path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use crate::io::file::{
        LIST_DIRECTORY_ACCESS, LIST_DIRECTORY_OPTIONS, RAW_PROBE_ACCESS, RAW_PROBE_OPTIONS,
        RAW_PROBE_SHARE,
    };

    fn absolute(path: &str) -> ObjectAttributes {
        ObjectAttributes::new(path, ObjAttributes::CASE_INSENSITIVE, None)
    }

    /// Open `path` for listing, as the file walker does
    fn open_listing(ns: &SimNamespace, path: &str) -> Result<Handle, NtStatus> {
        ns.open_file(
            &absolute(path),
            LIST_DIRECTORY_ACCESS,
            ShareAccess::READ,
            LIST_DIRECTORY_OPTIONS,
        )
    }

    /// Open `path` as a raw device, as the partition prober does
    fn open_raw(ns: &SimNamespace, path: &str) -> Result<Handle, NtStatus> {
        ns.open_file(&absolute(path), RAW_PROBE_ACCESS, RAW_PROBE_SHARE, RAW_PROBE_OPTIONS)
    }

    fn sample() -> SimNamespace {
        let mut ns = SimNamespace::new();
        ns.create_directory("\\Device").unwrap();
        let cd = Volume::from_paths(&["default.xbe", "media\\"]);
        ns.create_device("\\Device\\CdRom0", Some(cd)).unwrap();
        ns.create_disk("\\Device\\Harddisk0").unwrap();
        ns.add_partition("\\Device\\Harddisk0", 1, Some(Volume::from_paths(&["TDATA\\"]))).unwrap();
        ns.create_directory("\\??").unwrap();
        ns.create_symbolic_link("\\??\\D:", "\\Device\\CdRom0").unwrap();
        ns
    }

    #[test]
    fn test_builder_errors() {
        let mut ns = sample();
        assert_eq!(ns.create_directory("\\Device"), Err(NtStatus::OBJECT_NAME_COLLISION));
        assert_eq!(ns.create_directory("\\DEVICE"), Err(NtStatus::OBJECT_NAME_COLLISION));
        assert_eq!(ns.create_directory("\\Missing\\X"), Err(NtStatus::OBJECT_NAME_NOT_FOUND));
        assert_eq!(ns.create_directory("\\??\\D:\\X"), Err(NtStatus::OBJECT_TYPE_MISMATCH));
        assert_eq!(ns.create_directory("Relative"), Err(NtStatus::OBJECT_PATH_SYNTAX_BAD));
        assert_eq!(ns.create_directory("\\Device\\"), Err(NtStatus::OBJECT_NAME_INVALID));
        assert_eq!(
            ns.add_partition("\\Device\\Harddisk0", 1, None),
            Err(NtStatus::OBJECT_NAME_COLLISION)
        );
        assert_eq!(
            ns.add_partition("\\Device\\CdRom0", 1, None),
            Err(NtStatus::OBJECT_TYPE_MISMATCH)
        );
    }

    #[test]
    fn test_directory_enumeration() {
        let ns = sample();
        let root = ns.open_directory_object(&ObjectAttributes::root()).unwrap();

        let mut context = 0;
        let first = ns.query_directory_object(root, &mut context).unwrap();
        assert_eq!(first.name, "Device");
        assert_eq!(first.type_tag, TypeTag::DIRECTORY);
        let second = ns.query_directory_object(root, &mut context).unwrap();
        assert_eq!(second.name, "??");
        assert_eq!(
            ns.query_directory_object(root, &mut context),
            Err(NtStatus::NO_MORE_ENTRIES)
        );
        assert_eq!(context, 2);

        ns.close(root).unwrap();
        assert_eq!(ns.open_handle_count(), 0);
    }

    #[test]
    fn test_relative_open_and_log() {
        let ns = sample();
        let device = ns.open_directory_object(&absolute("\\Device")).unwrap();
        let child = ObjectAttributes::root().child(device, "CdRom0");
        let handle = ns.open_object_by_name(&child).unwrap();
        assert_eq!(ns.reference_object_type(handle), Ok(TypeTag::DEVICE));

        assert_eq!(ns.open_log(), ["\\Device", "\\Device\\CdRom0"]);
        ns.close(handle).unwrap();
        ns.close(device).unwrap();
        assert_eq!(ns.total_opens(), 2);
    }

    #[test]
    fn test_case_sensitivity_follows_attributes() {
        let ns = sample();
        let exact = ObjectAttributes::new("\\DEVICE", ObjAttributes::empty(), None);
        assert_eq!(ns.open_directory_object(&exact), Err(NtStatus::OBJECT_NAME_NOT_FOUND));
        let handle = ns.open_directory_object(&absolute("\\DEVICE")).unwrap();
        ns.close(handle).unwrap();
    }

    #[test]
    fn test_open_type_checks() {
        let ns = sample();
        assert_eq!(
            ns.open_directory_object(&absolute("\\??\\D:")),
            Err(NtStatus::OBJECT_TYPE_MISMATCH)
        );
        assert_eq!(
            ns.open_symbolic_link_object(&absolute("\\Device")),
            Err(NtStatus::OBJECT_TYPE_MISMATCH)
        );
        assert_eq!(
            ns.open_directory_object(&absolute("\\Device\\Missing\\X")),
            Err(NtStatus::OBJECT_PATH_NOT_FOUND)
        );
        assert_eq!(
            ns.open_directory_object(&absolute("Device")),
            Err(NtStatus::OBJECT_PATH_SYNTAX_BAD)
        );
        assert_eq!(
            ns.open_directory_object(&absolute("\\Device\\\\CdRom0")),
            Err(NtStatus::OBJECT_NAME_INVALID)
        );
        assert_eq!(ns.open_handle_count(), 0);
    }

    #[test]
    fn test_symbolic_link_target_length() {
        let ns = sample();
        let link = ns.open_symbolic_link_object(&absolute("\\??\\d:")).unwrap();
        assert_eq!(ns.query_symbolic_link_object(link, 260), Ok(String::from("\\Device\\CdRom0")));
        assert_eq!(ns.query_symbolic_link_object(link, 4), Err(NtStatus::BUFFER_TOO_SMALL));
        ns.close(link).unwrap();
    }

    #[test]
    fn test_file_enumeration_and_restart() {
        let ns = sample();
        let volume = open_listing(&ns, "\\Device\\CdRom0\\").unwrap();

        let first = ns.query_directory_file(volume, true).unwrap();
        assert_eq!(first.file_name, "default.xbe");
        assert_eq!(first.is_directory(), Some(false));
        let second = ns.query_directory_file(volume, false).unwrap();
        assert_eq!(second.file_name, "media");
        assert_eq!(second.is_directory(), Some(true));
        assert_eq!(ns.query_directory_file(volume, false), Err(NtStatus::NO_MORE_FILES));

        let again = ns.query_directory_file(volume, true).unwrap();
        assert_eq!(again.file_name, "default.xbe");
        ns.close(volume).unwrap();
    }

    #[test]
    fn test_file_open_checks() {
        let ns = sample();
        let file = absolute("\\Device\\CdRom0\\default.xbe");
        assert_eq!(
            ns.open_file(&file, LIST_DIRECTORY_ACCESS, ShareAccess::READ, LIST_DIRECTORY_OPTIONS),
            Err(NtStatus::NOT_A_DIRECTORY)
        );
        assert_eq!(
            ns.open_file(
                &absolute("\\Device\\CdRom0\\media"),
                AccessMask::FILE_READ_DATA,
                ShareAccess::READ,
                CreateOptions::NON_DIRECTORY_FILE
            ),
            Err(NtStatus::FILE_IS_A_DIRECTORY)
        );
        assert_eq!(
            open_listing(&ns, "\\Device"),
            Err(NtStatus::OBJECT_TYPE_MISMATCH)
        );
        assert_eq!(
            ns.open_file(
                &absolute("\\Device\\CdRom0\\missing.xbe"),
                AccessMask::FILE_READ_DATA,
                ShareAccess::READ,
                CreateOptions::empty()
            ),
            Err(NtStatus::OBJECT_NAME_NOT_FOUND)
        );
        assert_eq!(ns.open_handle_count(), 0);
    }

    #[test]
    fn test_partitions_open_raw_and_as_volumes() {
        let ns = sample();
        let raw = open_raw(&ns, "\\Device\\Harddisk0\\Partition1").unwrap();
        assert_eq!(ns.reference_object_type(raw), Ok(TypeTag::DEVICE));
        ns.close(raw).unwrap();

        assert_eq!(
            open_raw(&ns, "\\Device\\Harddisk0\\Partition2"),
            Err(NtStatus::OBJECT_NAME_NOT_FOUND)
        );
        assert_eq!(
            ns.open_object_by_name(&absolute("\\Device\\Harddisk0\\Volume1")),
            Err(NtStatus::OBJECT_NAME_NOT_FOUND)
        );

        let volume = open_listing(&ns, "\\Device\\Harddisk0\\Partition1\\").unwrap();
        assert_eq!(ns.query_directory_file(volume, true).unwrap().file_name, "TDATA");
        ns.close(volume).unwrap();
    }

    #[test]
    fn test_injected_open_failure_covers_files() {
        let mut ns = sample();
        ns.fail_open("\\Device\\CdRom0", NtStatus::DEVICE_NOT_READY).unwrap();
        assert_eq!(
            ns.open_object_by_name(&absolute("\\Device\\CdRom0\\default.xbe")),
            Err(NtStatus::DEVICE_NOT_READY)
        );
        // Opens are logged even when they fail
        assert_eq!(ns.open_log(), vec![String::from("\\Device\\CdRom0\\default.xbe")]);
        assert_eq!(ns.total_opens(), 0);

        ns.clear_open_log();
        assert!(ns.open_log().is_empty());
    }

    #[test]
    fn test_close_unknown_handle() {
        let ns = sample();
        assert_eq!(ns.close(4), Err(NtStatus::INVALID_HANDLE));
    }

    #[test]
    fn test_injected_file_query_failure() {
        let mut ns = sample();
        assert_eq!(
            ns.fail_file_query("\\Device\\CdRom0\\default.xbe", 0, NtStatus::ACCESS_DENIED),
            Err(NtStatus::NOT_A_DIRECTORY)
        );
        assert_eq!(
            ns.fail_file_query("\\Device", 0, NtStatus::ACCESS_DENIED),
            Err(NtStatus::OBJECT_TYPE_MISMATCH)
        );
        ns.fail_file_query("\\Device\\CdRom0\\", 1, NtStatus::ACCESS_DENIED).unwrap();

        let volume = ns
            .open_file(
                &absolute("\\Device\\CdRom0\\"),
                LIST_DIRECTORY_ACCESS,
                ShareAccess::READ,
                LIST_DIRECTORY_OPTIONS,
            )
            .unwrap();
        assert_eq!(ns.query_directory_file(volume, true).unwrap().file_name, "default.xbe");
        assert_eq!(ns.query_directory_file(volume, false), Err(NtStatus::ACCESS_DENIED));
        // A restarted scan fails at the same entry again
        assert!(ns.query_directory_file(volume, true).is_ok());
        assert_eq!(ns.query_directory_file(volume, false), Err(NtStatus::ACCESS_DENIED));
        ns.close(volume).unwrap();
    }
}
