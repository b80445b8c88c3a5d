//! Marker functions that tag members with contract flags.
//!
//! Each function consumes a member and hands back a fresh one carrying the flag;
//! name and documentation are preserved for later error messages.
use crate::store::{Body, Member, MemberKind, Markers};

/// Marks a member as required by its interface.
///
/// The body is replaced by `Body::Sentinel`, so calling a member that was never
/// overridden fails with `MissingRequiredAttribute` carrying its documentation.
pub fn require(member: Member) -> Member {
    Member {
        body: Body::Sentinel,
        markers: Markers { required: true, ..member.markers },
        ..member
    }
}

/// Marks a member as a required classmethod.
pub fn require_classmethod(member: Member) -> Member {
    let member = require(member);
    Member {
        kind: MemberKind::ClassMethod,
        markers: Markers { required_classmethod: true, ..member.markers },
        ..member
    }
}

/// Marks a member as final: no type further down the chain may redefine it.
pub fn final_method(member: Member) -> Member {
    Member {
        markers: Markers { final_: true, ..member.markers },
        ..member
    }
}
