//! NT Status Codes
//!
//! Every namespace primitive reports its outcome as an NTSTATUS value.
//! The two high bits carry the severity:
//!
//! - `00` success, `01` informational: the value is non-negative
//! - `10` warning (e.g. STATUS_NO_MORE_ENTRIES), `11` error: negative
//!
//! Only the first two count as success (`NT_SUCCESS`). End-of-enumeration
//! codes are warnings, so enumeration loops stop on them like on errors and
//! then tell the two apart.

use core::fmt;

/// NTSTATUS value
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct NtStatus(pub i32);

impl NtStatus {
    pub const SUCCESS: NtStatus = NtStatus(0x00000000);
    pub const BUFFER_OVERFLOW: NtStatus = NtStatus::from_u32(0x80000005);
    pub const NO_MORE_FILES: NtStatus = NtStatus::from_u32(0x80000006);
    pub const NO_MORE_ENTRIES: NtStatus = NtStatus::from_u32(0x8000001A);
    pub const INVALID_HANDLE: NtStatus = NtStatus::from_u32(0xC0000008);
    pub const INVALID_PARAMETER: NtStatus = NtStatus::from_u32(0xC000000D);
    pub const NO_SUCH_DEVICE: NtStatus = NtStatus::from_u32(0xC000000E);
    pub const ACCESS_DENIED: NtStatus = NtStatus::from_u32(0xC0000022);
    pub const BUFFER_TOO_SMALL: NtStatus = NtStatus::from_u32(0xC0000023);
    pub const OBJECT_TYPE_MISMATCH: NtStatus = NtStatus::from_u32(0xC0000024);
    pub const OBJECT_NAME_INVALID: NtStatus = NtStatus::from_u32(0xC0000033);
    pub const OBJECT_NAME_NOT_FOUND: NtStatus = NtStatus::from_u32(0xC0000034);
    pub const OBJECT_NAME_COLLISION: NtStatus = NtStatus::from_u32(0xC0000035);
    pub const OBJECT_PATH_NOT_FOUND: NtStatus = NtStatus::from_u32(0xC000003A);
    pub const OBJECT_PATH_SYNTAX_BAD: NtStatus = NtStatus::from_u32(0xC000003B);
    pub const INSUFFICIENT_RESOURCES: NtStatus = NtStatus::from_u32(0xC000009A);
    pub const DEVICE_NOT_READY: NtStatus = NtStatus::from_u32(0xC00000A3);
    pub const FILE_IS_A_DIRECTORY: NtStatus = NtStatus::from_u32(0xC00000BA);
    pub const NOT_A_DIRECTORY: NtStatus = NtStatus::from_u32(0xC0000103);
    pub const UNRECOGNIZED_VOLUME: NtStatus = NtStatus::from_u32(0xC000014F);

    /// Build a status from its unsigned (documented) form
    pub const fn from_u32(value: u32) -> Self {
        NtStatus(value as i32)
    }

    /// Unsigned form, as printed in hex
    pub const fn as_u32(self) -> u32 {
        self.0 as u32
    }

    /// NT_SUCCESS: success or informational severity
    #[inline]
    pub const fn is_success(self) -> bool {
        self.0 >= 0
    }

    /// True for the codes that terminate a directory enumeration normally
    pub fn is_end_of_enumeration(self) -> bool {
        self == NtStatus::NO_MORE_ENTRIES || self == NtStatus::NO_MORE_FILES
    }

    /// Convert to a `Result`, keeping informational codes as success
    pub fn into_result(self) -> Result<(), NtStatus> {
        if self.is_success() {
            Ok(())
        } else {
            Err(self)
        }
    }

    /// Symbolic name for the codes this crate produces
    pub fn name(self) -> Option<&'static str> {
        let name = match self {
            NtStatus::SUCCESS => "STATUS_SUCCESS",
            NtStatus::BUFFER_OVERFLOW => "STATUS_BUFFER_OVERFLOW",
            NtStatus::NO_MORE_FILES => "STATUS_NO_MORE_FILES",
            NtStatus::NO_MORE_ENTRIES => "STATUS_NO_MORE_ENTRIES",
            NtStatus::INVALID_HANDLE => "STATUS_INVALID_HANDLE",
            NtStatus::INVALID_PARAMETER => "STATUS_INVALID_PARAMETER",
            NtStatus::NO_SUCH_DEVICE => "STATUS_NO_SUCH_DEVICE",
            NtStatus::ACCESS_DENIED => "STATUS_ACCESS_DENIED",
            NtStatus::BUFFER_TOO_SMALL => "STATUS_BUFFER_TOO_SMALL",
            NtStatus::OBJECT_TYPE_MISMATCH => "STATUS_OBJECT_TYPE_MISMATCH",
            NtStatus::OBJECT_NAME_INVALID => "STATUS_OBJECT_NAME_INVALID",
            NtStatus::OBJECT_NAME_NOT_FOUND => "STATUS_OBJECT_NAME_NOT_FOUND",
            NtStatus::OBJECT_NAME_COLLISION => "STATUS_OBJECT_NAME_COLLISION",
            NtStatus::OBJECT_PATH_NOT_FOUND => "STATUS_OBJECT_PATH_NOT_FOUND",
            NtStatus::OBJECT_PATH_SYNTAX_BAD => "STATUS_OBJECT_PATH_SYNTAX_BAD",
            NtStatus::INSUFFICIENT_RESOURCES => "STATUS_INSUFFICIENT_RESOURCES",
            NtStatus::DEVICE_NOT_READY => "STATUS_DEVICE_NOT_READY",
            NtStatus::FILE_IS_A_DIRECTORY => "STATUS_FILE_IS_A_DIRECTORY",
            NtStatus::NOT_A_DIRECTORY => "STATUS_NOT_A_DIRECTORY",
            NtStatus::UNRECOGNIZED_VOLUME => "STATUS_UNRECOGNIZED_VOLUME",
            _ => return None,
        };
        Some(name)
    }
}

/// Eight upper-case hex digits, the way the kernel debugger prints them
impl fmt::Display for NtStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:08X}", self.as_u32())
    }
}

impl fmt::Debug for NtStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "{} ({:#010x})", name, self.as_u32()),
            None => write!(f, "NtStatus({:#010x})", self.as_u32()),
        }
    }
}
