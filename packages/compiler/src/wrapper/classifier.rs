//! Member Classifier
//!
//! Decides how a member has to be adapted. Computed once per member; every
//! later stage matches on the result instead of re-inspecting modifiers.

use crate::model::{MemberDeclaration, Modifiers, TypeRef};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemberKind {
    /// Suspending function; exposed through an asynchronous-operation handle.
    AsyncOperation,
    /// Function or property returning the stream type; exposed through a
    /// stream handle.
    StreamOperation,
    SyncOperation,
    SyncProperty,
}

impl fmt::Display for MemberKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MemberKind::AsyncOperation => "async operation",
            MemberKind::StreamOperation => "stream operation",
            MemberKind::SyncOperation => "sync operation",
            MemberKind::SyncProperty => "sync property",
        };
        f.write_str(name)
    }
}

/// Suspend wins over a stream return type; the stream type is matched by its
/// qualified name only. A nullable stream is forwarded as a plain value.
pub fn classify(member: &MemberDeclaration, stream_type: &TypeRef) -> MemberKind {
    let return_type = &member.return_type;
    if member.modifiers.contains(Modifiers::SUSPEND) {
        MemberKind::AsyncOperation
    } else if !return_type.nullable && return_type.is_same_raw(stream_type) {
        MemberKind::StreamOperation
    } else if member.is_property() {
        MemberKind::SyncProperty
    } else {
        MemberKind::SyncOperation
    }
}
