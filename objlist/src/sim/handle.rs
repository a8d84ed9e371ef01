//! Simulated Handle Table
//!
//! Maps handles to what they were opened on. Handles are multiples of 4
//! starting at 4, and a closed slot is reused by the next open, as in the
//! kernel's flat handle table.

use alloc::string::String;
use alloc::vec::Vec;
use crate::ob::namespace::{Handle, NULL_HANDLE};
use crate::status::NtStatus;
use super::object::ObjectId;
use super::volume::NodeId;

/// Handle increment (handles are multiples of 4)
pub const HANDLE_INCREMENT: Handle = 4;

/// Maximum open handles
pub const MAX_HANDLES: usize = 1024;

/// What a handle refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandleTarget {
    /// A namespace object
    Object(ObjectId),
    /// A file or directory on the volume of `device`
    File { device: ObjectId, node: NodeId },
}

/// Handle table entry
#[derive(Debug, Clone)]
pub struct HandleTableEntry {
    pub target: HandleTarget,
    /// Path the handle was opened with, for relative opens and logging
    pub path: String,
    /// Enumeration position for file directory queries
    pub cursor: u32,
}

/// Flat handle table
#[derive(Debug, Default)]
pub struct HandleTable {
    entries: Vec<Option<HandleTableEntry>>,
    count: usize,
}

impl HandleTable {
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
            count: 0,
        }
    }

    fn slot(handle: Handle) -> Option<usize> {
        if handle == NULL_HANDLE || handle % HANDLE_INCREMENT != 0 {
            return None;
        }
        Some((handle / HANDLE_INCREMENT) as usize - 1)
    }

    fn handle_for(slot: usize) -> Handle {
        (slot as Handle + 1) * HANDLE_INCREMENT
    }

    /// Store `entry` in the lowest free slot
    pub fn insert(&mut self, entry: HandleTableEntry) -> Result<Handle, NtStatus> {
        let slot = match self.entries.iter().position(Option::is_none) {
            Some(slot) => slot,
            None if self.entries.len() < MAX_HANDLES => {
                self.entries.push(None);
                self.entries.len() - 1
            }
            None => return Err(NtStatus::INSUFFICIENT_RESOURCES),
        };
        self.entries[slot] = Some(entry);
        self.count += 1;
        Ok(Self::handle_for(slot))
    }

    pub fn get(&self, handle: Handle) -> Result<&HandleTableEntry, NtStatus> {
        Self::slot(handle)
            .and_then(|slot| self.entries.get(slot))
            .and_then(Option::as_ref)
            .ok_or(NtStatus::INVALID_HANDLE)
    }

    pub fn get_mut(&mut self, handle: Handle) -> Result<&mut HandleTableEntry, NtStatus> {
        Self::slot(handle)
            .and_then(|slot| self.entries.get_mut(slot))
            .and_then(Option::as_mut)
            .ok_or(NtStatus::INVALID_HANDLE)
    }

    pub fn remove(&mut self, handle: Handle) -> Result<HandleTableEntry, NtStatus> {
        let entry = Self::slot(handle)
            .and_then(|slot| self.entries.get_mut(slot))
            .and_then(Option::take)
            .ok_or(NtStatus::INVALID_HANDLE)?;
        self.count -= 1;
        Ok(entry)
    }

    /// Open handles
    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}
