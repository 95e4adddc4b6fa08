//! Authorization checks for org pages

use orgweb_registry::{Org, OrgMember};

/// Whether a member's role grants admin rights (any role mentioning "admin")
pub fn is_admin_role(member: &OrgMember) -> bool {
    member
        .role
        .as_deref()
        .is_some_and(|role| role.contains("admin"))
}

/// Whether `user` is listed as an admin of `org`
pub fn is_org_admin(org: &Org, user: Option<&str>) -> bool {
    let Some(user) = user else {
        return false;
    };

    org.users
        .iter()
        .filter(|member| is_admin_role(member))
        .any(|admin| admin.name == user)
}
