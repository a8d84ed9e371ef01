//! Symbolic Link Resolution
//!
//! Prints the target of a symbolic link object found during the walk:
//!
//! ```text
//!   \D: - Type = Symb
//!    full path = \Device\CdRom0
//! ```
//!
//! Exactly one line is written per link, either the target or the status
//! of whichever call failed.

use crate::report::ReportSink;
use crate::status::NtStatus;
use super::attributes::{ObjectAttributes, MAX_PATH};
use super::namespace::ObjectNamespace;
use super::walker::NamespaceWalker;

impl<'a, N: ObjectNamespace + ?Sized, S: ReportSink + ?Sized> NamespaceWalker<'a, N, S> {
    /// Print the target of the link named by `attributes`
    pub fn resolve_symbolic_link(
        &mut self,
        attributes: &ObjectAttributes,
        indent: usize,
    ) -> Result<(), NtStatus> {
        let link = match self.namespace.open_symbolic_link_object(attributes) {
            Ok(handle) => handle,
            Err(status) => {
                self.emit(indent, format_args!("NtOpenSymbolicLinkObject error: {}", status));
                return Err(status);
            }
        };

        let result = match self.namespace.query_symbolic_link_object(link, MAX_PATH) {
            Ok(target) => {
                self.emit(indent, format_args!("full path = {}", target));
                Ok(())
            }
            Err(status) => {
                self.emit(indent, format_args!("NtQuerySymbolicLinkObject error: {}", status));
                Err(status)
            }
        };

        self.close_handle(link);
        result
    }
}
