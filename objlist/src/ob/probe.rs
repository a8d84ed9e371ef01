//! Object Type Probe
//!
//! Opens any named object generically and reads the pool tag of its object
//! type. Used where the enumeration that found the name carries no type:
//! probed disk partitions and, optionally, filesystem entries.
//!
//! The probe is informational. Any failure yields [`TypeTag::UNKNOWN`],
//! which prints as `????`.

use super::attributes::ObjectAttributes;
use super::namespace::ObjectNamespace;
use super::type_tag::TypeTag;

/// Type tag of the object named by `attributes`, or `????`
pub fn query_object_type<N: ObjectNamespace + ?Sized>(
    namespace: &N,
    attributes: &ObjectAttributes,
) -> TypeTag {
    let handle = match namespace.open_object_by_name(attributes) {
        Ok(handle) => handle,
        Err(status) => {
            log::debug!("[OB] ObOpenObjectByName(\"{}\") failed: {:?}", attributes.name(), status);
            return TypeTag::UNKNOWN;
        }
    };

    let tag = namespace.reference_object_type(handle).unwrap_or_else(|status| {
        log::debug!("[OB] ObReferenceObjectByHandle({:#x}) failed: {:?}", handle, status);
        TypeTag::UNKNOWN
    });

    if let Err(status) = namespace.close(handle) {
        log::warn!("[OB] NtClose({:#x}) failed: {:?}", handle, status);
    }
    tag
}
