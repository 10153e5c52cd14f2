//! `sharing`: user and member identities referenced by Paper sharing routes.

use crate::DeclError;
use crate::namespace::Namespace;
use crate::types::{AliasDef, DataType, Field, StructDef, UnionDef, Variant};

pub const NAMESPACE: &str = "sharing";

pub fn namespace() -> Result<Namespace, DeclError> {
    let mut ns = Namespace::new(NAMESPACE)
        .with_doc("Subset of the sharing namespace referenced by Paper document sharing.");

    ns.declare(
        AliasDef::new("AccountId", DataType::string_with(Some(40), Some(40), None))
            .doc("Identifier of a Dropbox account."),
    )?;

    ns.declare(
        AliasDef::new("EmailAddress", DataType::string_with(None, Some(255), Some(
            r"^['#&A-Za-z0-9._%+-]+@[A-Za-z0-9-][A-Za-z0-9.-]*\.[A-Za-z]{2,15}$",
        )))
        .doc("An email address."),
    )?;

    ns.declare(
        StructDef::new("UserInfo")
            .doc("Basic information about a user. Use users.get_account and users.get_account_batch to obtain more detailed information.")
            .field(Field::new("account_id", DataType::named("AccountId")).doc("The account ID of the user."))
            .field(Field::new("email", DataType::string()).doc("Email address of user."))
            .field(Field::new("display_name", DataType::string()).doc("The display name of the user."))
            .field(Field::new("same_team", DataType::boolean()).doc("If the user is in the same team as current user."))
            .field(Field::new("team_member_id", DataType::string().nullable()).doc("The team member ID of the shared folder member. Only present if same_team is true.")),
    )?;

    ns.declare(
        UnionDef::open("InviteeInfo")
            .doc("Information about the recipient of a sharing invitation.")
            .variant(Variant::with("email", DataType::named("EmailAddress")).doc("Email address of invited user.")),
    )?;

    ns.declare(
        UnionDef::open("MemberSelector")
            .doc("Includes different ways to identify a member of a shared item.")
            .variant(Variant::with("dropbox_id", DataType::string_with(Some(1), None, None)).doc("Dropbox account, team member, or group ID of member."))
            .variant(Variant::with("email", DataType::named("EmailAddress")).doc("Email address of member.")),
    )?;

    Ok(ns)
}
