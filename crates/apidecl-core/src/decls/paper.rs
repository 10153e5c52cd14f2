//! `paper`: collaborative document operations.
//!
//! Document updates use optimistic concurrency: the caller sends the revision
//! it last saw, and a mismatch with the head revision comes back as
//! `revision_mismatch`.

use crate::DeclError;
use crate::namespace::Namespace;
use crate::route::{Host, Route, RouteStyle};
use crate::types::{AliasDef, DataType, DefaultValue, Field, IntKind, StructDef, UnionDef, Variant};

pub const NAMESPACE: &str = "paper";

const OWNER: &str = "paper-eng";
const SCOPE_READ: &str = "files.content.read";
const SCOPE_WRITE: &str = "files.content.write";
const SCOPE_SHARING_READ: &str = "sharing.read";
const SCOPE_SHARING_WRITE: &str = "sharing.write";

/// Upper bound for paged listings.
const PAGE_LIMIT: i64 = 1000;

pub fn namespace() -> Result<Namespace, DeclError> {
    let mut ns = Namespace::new(NAMESPACE).with_doc(
        "This namespace contains endpoints and data types for managing docs and folders in Dropbox Paper.",
    );

    declare_common(&mut ns)?;
    declare_listing(&mut ns)?;
    declare_documents(&mut ns)?;
    declare_sharing(&mut ns)?;
    declare_folders(&mut ns)?;
    declare_routes(&mut ns)?;

    Ok(ns)
}

fn page_limit(doc: &str) -> Field {
    Field::new("limit", DataType::int_bounded(IntKind::Int32, Some(1), Some(PAGE_LIMIT)))
        .doc(doc)
        .default(DefaultValue::Int(PAGE_LIMIT))
}

fn declare_common(ns: &mut Namespace) -> Result<(), DeclError> {
    ns.declare(AliasDef::new("PaperDocId", DataType::string()).doc("Identifier of a Paper doc."))?;

    ns.declare(
        StructDef::new("RefPaperDoc").field(Field::new("doc_id", DataType::named("PaperDocId"))),
    )?;

    ns.declare(
        StructDef::new("Cursor")
            .field(
                Field::new("value", DataType::string())
                    .doc("The actual cursor value."),
            )
            .field(
                Field::new("expiration", DataType::timestamp().nullable())
                    .doc("Expiration time of value. Some cursors might have expiration time assigned. This is a UTC value after which the cursor is no longer valid and the API starts returning an error. If cursor expires a new one needs to be obtained and pagination needs to be restarted. Some cursors might be short-lived some cursors might be long-lived. This really depends on the sorting type and order."),
            ),
    )?;

    ns.declare(
        UnionDef::open("PaperApiBaseError")
            .variant(Variant::void("insufficient_permissions").doc("Your account does not have permissions to perform this action. This may be due to it only having access to Paper as files in the Dropbox filesystem.")),
    )?;

    ns.declare(
        UnionDef::open("DocLookupError")
            .extends("PaperApiBaseError")
            .variant(Variant::void("doc_not_found").doc("The required doc was not found.")),
    )?;

    ns.declare(
        UnionDef::open("PaperApiCursorError")
            .variant(Variant::void("expired_cursor").doc("The provided cursor is expired."))
            .variant(Variant::void("invalid_cursor").doc("The provided cursor is invalid."))
            .variant(Variant::void("wrong_user_in_cursor").doc("The provided cursor contains invalid user."))
            .variant(Variant::void("reset").doc("Indicates that the cursor has been invalidated. Call the corresponding non-continue endpoint to obtain a new cursor.")),
    )?;

    ns.declare(
        UnionDef::open("ListDocsCursorError")
            .variant(Variant::with("cursor_error", DataType::named("PaperApiCursorError"))),
    )?;

    Ok(())
}

fn declare_listing(ns: &mut Namespace) -> Result<(), DeclError> {
    ns.declare(
        UnionDef::open("ListPaperDocsFilterBy")
            .variant(Variant::void("docs_accessed").doc("Fetches all Paper doc IDs that the user has ever accessed."))
            .variant(Variant::void("docs_created").doc("Fetches only the Paper doc IDs that the user has created.")),
    )?;

    ns.declare(
        UnionDef::open("ListPaperDocsSortBy")
            .variant(Variant::void("accessed").doc("Sorts the Paper docs by the time they were last accessed."))
            .variant(Variant::void("modified").doc("Sorts the Paper docs by the time they were last modified."))
            .variant(Variant::void("created").doc("Sorts the Paper docs by the creation time.")),
    )?;

    ns.declare(
        UnionDef::open("ListPaperDocsSortOrder")
            .variant(Variant::void("ascending").doc("Sorts the search result in ascending order."))
            .variant(Variant::void("descending").doc("Sorts the search result in descending order.")),
    )?;

    ns.declare(
        StructDef::new("ListPaperDocsArgs")
            .field(
                Field::new("filter_by", DataType::named("ListPaperDocsFilterBy"))
                    .doc("Allows user to specify how the Paper docs should be filtered.")
                    .default(DefaultValue::Tag("docs_accessed".to_string())),
            )
            .field(
                Field::new("sort_by", DataType::named("ListPaperDocsSortBy"))
                    .doc("Allows user to specify how the Paper docs should be sorted.")
                    .default(DefaultValue::Tag("accessed".to_string())),
            )
            .field(
                Field::new("sort_order", DataType::named("ListPaperDocsSortOrder"))
                    .doc("Allows user to specify the sort order of the result.")
                    .default(DefaultValue::Tag("ascending".to_string())),
            )
            .field(page_limit("Size limit per batch. The maximum number of docs that can be retrieved per batch is 1000. Higher value results in invalid arguments error.")),
    )?;

    ns.declare(
        StructDef::new("ListPaperDocsContinueArgs").field(
            Field::new("cursor", DataType::string())
                .doc("The cursor obtained from docs/list or docs/list/continue. Allows for pagination."),
        ),
    )?;

    ns.declare(
        StructDef::new("ListPaperDocsResponse")
            .field(Field::new("doc_ids", DataType::list(DataType::named("PaperDocId"))).doc("The list of Paper doc IDs that can be used to access the given Paper docs or supplied to other API methods. The list is sorted in the order specified by the initial call to docs/list."))
            .field(Field::new("cursor", DataType::named("Cursor")).doc("Pass the cursor into docs/list/continue to paginate through all files. The cursor preserves all properties as specified in the original call to docs/list."))
            .field(Field::new("has_more", DataType::boolean()).doc("Will be set to True if a subsequent call with the provided cursor to docs/list/continue returns immediately with some results. If set to False please allow some delay before making another call to docs/list/continue.")),
    )?;

    Ok(())
}

fn declare_documents(ns: &mut Namespace) -> Result<(), DeclError> {
    ns.declare(UnionDef::open("ExportFormat").doc("The desired export format of the Paper doc.").variant(Variant::void("html").doc("The HTML export format.")).variant(Variant::void("markdown").doc("The markdown export format.")))?;

    ns.declare(
        UnionDef::open("ImportFormat")
            .doc("The import format of the incoming data.")
            .variant(Variant::void("html").doc("The provided data is interpreted as standard HTML."))
            .variant(Variant::void("markdown").doc("The provided data is interpreted as markdown. The first line of the provided document will be used as the doc title."))
            .variant(Variant::void("plain_text").doc("The provided data is interpreted as plain text. The first line of the provided document will be used as the doc title.")),
    )?;

    ns.declare(
        StructDef::new("PaperDocExport")
            .extends("RefPaperDoc")
            .field(Field::new("export_format", DataType::named("ExportFormat"))),
    )?;

    ns.declare(
        StructDef::new("PaperDocExportResult")
            .field(Field::new("owner", DataType::string()).doc("The Paper doc owner's email address."))
            .field(Field::new("title", DataType::string()).doc("The Paper doc title."))
            .field(Field::new("revision", DataType::int(IntKind::Int64)).doc("The Paper doc revision. Simply an ever increasing number."))
            .field(Field::new("mime_type", DataType::string()).doc("MIME type of the export. This corresponds to ExportFormat specified in the request.")),
    )?;

    ns.declare(
        StructDef::new("PaperDocCreateArgs")
            .field(
                Field::new("import_format", DataType::named("ImportFormat"))
                    .doc("The format of provided data."),
            )
            .field(
                Field::new("parent_folder_id", DataType::string().nullable())
                    .doc("The Paper folder ID where the Paper document should be created. The API user has to have write access to this folder or error is thrown."),
            ),
    )?;

    ns.declare(
        StructDef::new("PaperDocCreateUpdateResult")
            .field(Field::new("doc_id", DataType::string()).doc("Doc ID of the newly created doc."))
            .field(Field::new("revision", DataType::int(IntKind::Int64)).doc("The Paper doc revision. Simply an ever increasing number."))
            .field(Field::new("title", DataType::string()).doc("The Paper doc title.")),
    )?;

    ns.declare(
        UnionDef::open("PaperDocCreateError")
            .extends("PaperApiBaseError")
            .variant(Variant::void("content_malformed").doc("The provided content was malformed and cannot be imported to Paper."))
            .variant(Variant::void("folder_not_found").doc("The specified Paper folder is cannot be found."))
            .variant(Variant::void("doc_length_exceeded").doc("The newly created Paper doc would be too large. Please split the content into multiple docs."))
            .variant(Variant::void("image_size_exceeded").doc("The imported document contains an image that is too large. The current limit is 1MB. This only applies to HTML with data URI.")),
    )?;

    ns.declare(
        UnionDef::open("PaperDocUpdatePolicy")
            .variant(Variant::void("append").doc("The content will be appended to the doc."))
            .variant(Variant::void("prepend").doc("The content will be prepended to the doc. The doc title will not be affected."))
            .variant(Variant::void("overwrite_all").doc("The document will be overwitten at the head with the provided content.")),
    )?;

    ns.declare(
        StructDef::new("PaperDocUpdateArgs")
            .extends("RefPaperDoc")
            .field(Field::new("doc_update_policy", DataType::named("PaperDocUpdatePolicy")).doc("The policy used for the current update call."))
            .field(Field::new("revision", DataType::int(IntKind::Int64)).doc("The latest doc revision. This value must match the head revision or an error code will be returned. This is to prevent colliding writes."))
            .field(Field::new("import_format", DataType::named("ImportFormat")).doc("The format of provided data.")),
    )?;

    ns.declare(
        UnionDef::open("PaperDocUpdateError")
            .extends("DocLookupError")
            .variant(Variant::void("content_malformed").doc("The provided content was malformed and cannot be imported to Paper."))
            .variant(Variant::void("revision_mismatch").doc("The provided revision does not match the document head."))
            .variant(Variant::void("doc_length_exceeded").doc("The newly created Paper doc would be too large, split the content into multiple docs."))
            .variant(Variant::void("image_size_exceeded").doc("The imported document contains an image that is too large. The current limit is 1MB. This only applies to HTML with data URI."))
            .variant(Variant::void("doc_archived").doc("This operation is not allowed on archived Paper docs."))
            .variant(Variant::void("doc_deleted").doc("This operation is not allowed on deleted Paper docs.")),
    )?;

    Ok(())
}

fn declare_sharing(ns: &mut Namespace) -> Result<(), DeclError> {
    ns.declare(
        UnionDef::closed("SharingTeamPolicyType")
            .doc("The sharing policy type of the Paper doc.")
            .variant(Variant::void("people_with_link_can_edit").doc("Users who have a link to this doc can edit it."))
            .variant(Variant::void("people_with_link_can_view_and_comment").doc("Users who have a link to this doc can view and comment on it."))
            .variant(Variant::void("invite_only").doc("Users must be explicitly invited to this doc.")),
    )?;

    ns.declare(
        UnionDef::closed("SharingPublicPolicyType")
            .extends("SharingTeamPolicyType")
            .variant(Variant::void("disabled").doc("Value used to indicate that doc sharing is enabled only within team.")),
    )?;

    ns.declare(
        StructDef::new("SharingPolicy")
            .doc("Sharing policy of Paper doc.")
            .field(Field::new("public_sharing_policy", DataType::named("SharingPublicPolicyType").nullable()).doc("This value applies to the non-team members."))
            .field(Field::new("team_sharing_policy", DataType::named("SharingTeamPolicyType").nullable()).doc("This value applies to the team members only. The value is null for all personal accounts.")),
    )?;

    ns.declare(
        StructDef::new("PaperDocSharingPolicy")
            .extends("RefPaperDoc")
            .field(Field::new("sharing_policy", DataType::named("SharingPolicy")).doc("The default sharing policy to be set for the Paper doc.")),
    )?;

    ns.declare(
        UnionDef::open("PaperDocPermissionLevel")
            .variant(Variant::void("edit").doc("User will be granted edit permissions."))
            .variant(Variant::void("view_and_comment").doc("User will be granted view and comment permissions.")),
    )?;

    ns.declare(
        StructDef::new("AddMember")
            .field(
                Field::new("member", DataType::named("sharing.MemberSelector"))
                    .doc("User which should be added to the Paper doc. Specify only email address or Dropbox account ID."),
            )
            .field(
                Field::new("permission_level", DataType::named("PaperDocPermissionLevel"))
                    .doc("Permission for the user.")
                    .default(DefaultValue::Tag("edit".to_string())),
            ),
    )?;

    ns.declare(
        StructDef::new("AddPaperDocUser")
            .extends("RefPaperDoc")
            .field(
                Field::new("members", DataType::list_bounded(DataType::named("AddMember"), None, Some(20)))
                    .doc("User which should be added to the Paper doc. Specify only email address or Dropbox account ID."),
            )
            .field(Field::new("custom_message", DataType::string().nullable()).doc("A personal message that will be emailed to each successfully added member."))
            .field(
                Field::new("quiet", DataType::boolean())
                    .doc("Clients should set this to true if no email message shall be sent to added users.")
                    .default(DefaultValue::Bool(false)),
            ),
    )?;

    ns.declare(
        UnionDef::open("AddPaperDocUserResult")
            .variant(Variant::void("success").doc("User was successfully added to the Paper doc."))
            .variant(Variant::void("unknown_error").doc("Something unexpected happened when trying to add the user to the Paper doc."))
            .variant(Variant::void("sharing_outside_team_disabled").doc("The Paper doc can be shared only with team members."))
            .variant(Variant::void("daily_limit_reached").doc("The daily limit of how many users can be added to the Paper doc was reached."))
            .variant(Variant::void("user_is_owner").doc("Owner's permissions cannot be changed."))
            .variant(Variant::void("failed_user_data_retrieval").doc("User data could not be retrieved. Clients should retry."))
            .variant(Variant::void("permission_already_granted").doc("This user already has the correct permission to the Paper doc.")),
    )?;

    ns.declare(
        StructDef::new("AddPaperDocUserMemberResult")
            .doc("Per-member result for docs/users/add.")
            .field(Field::new("member", DataType::named("sharing.MemberSelector")).doc("One of specified input members."))
            .field(Field::new("result", DataType::named("AddPaperDocUserResult")).doc("The outcome of the action on this member.")),
    )?;

    ns.declare(
        StructDef::new("RemovePaperDocUser")
            .extends("RefPaperDoc")
            .field(Field::new("member", DataType::named("sharing.MemberSelector")).doc("User which should be removed from the Paper doc. Specify only email address or Dropbox account ID.")),
    )?;

    ns.declare(
        UnionDef::open("UserOnPaperDocFilter")
            .variant(Variant::void("visited").doc("all users who have visited the Paper doc."))
            .variant(Variant::void("shared").doc("All uses who are shared on the Paper doc. This includes all users who have visited the Paper doc as well as those who have not.")),
    )?;

    ns.declare(
        StructDef::new("ListUsersOnPaperDocArgs")
            .extends("RefPaperDoc")
            .field(page_limit("Size limit per batch. The maximum number of users that can be retrieved per batch is 1000. Higher value results in invalid arguments error."))
            .field(
                Field::new("filter_by", DataType::named("UserOnPaperDocFilter"))
                    .doc("Specify this attribute if you want to obtain users that have already accessed the Paper doc.")
                    .default(DefaultValue::Tag("shared".to_string())),
            ),
    )?;

    ns.declare(
        StructDef::new("ListUsersOnPaperDocContinueArgs")
            .extends("RefPaperDoc")
            .field(Field::new("cursor", DataType::string()).doc("The cursor obtained from docs/users/list or docs/users/list/continue. Allows for pagination.")),
    )?;

    ns.declare(
        StructDef::new("InviteeInfoWithPermissionLevel")
            .field(Field::new("invitee", DataType::named("sharing.InviteeInfo")).doc("Email address invited to the Paper doc."))
            .field(Field::new("permission_level", DataType::named("PaperDocPermissionLevel")).doc("Permission level for the invitee.")),
    )?;

    ns.declare(
        StructDef::new("UserInfoWithPermissionLevel")
            .field(Field::new("user", DataType::named("sharing.UserInfo")).doc("User shared on the Paper doc."))
            .field(Field::new("permission_level", DataType::named("PaperDocPermissionLevel")).doc("Permission level for the user.")),
    )?;

    ns.declare(
        StructDef::new("ListUsersOnPaperDocResponse")
            .field(Field::new("invitees", DataType::list(DataType::named("InviteeInfoWithPermissionLevel"))).doc("List of email addresses with their respective permission levels that are invited on the Paper doc."))
            .field(Field::new("users", DataType::list(DataType::named("UserInfoWithPermissionLevel"))).doc("List of users with their respective permission levels that are invited on the Paper folder."))
            .field(Field::new("doc_owner", DataType::named("sharing.UserInfo")).doc("The Paper doc owner. This field is populated on every single response."))
            .field(Field::new("cursor", DataType::named("Cursor")).doc("Pass the cursor into docs/users/list/continue to paginate through all users. The cursor preserves all properties as specified in the original call to docs/users/list."))
            .field(Field::new("has_more", DataType::boolean()).doc("Will be set to True if a subsequent call with the provided cursor to docs/users/list/continue returns immediately with some results. If set to False please allow some delay before making another call to docs/users/list/continue.")),
    )?;

    ns.declare(
        UnionDef::open("ListUsersCursorError")
            .extends("PaperApiBaseError")
            .variant(Variant::void("doc_not_found").doc("The required doc was not found."))
            .variant(Variant::with("cursor_error", DataType::named("PaperApiCursorError"))),
    )?;

    Ok(())
}

fn declare_folders(ns: &mut Namespace) -> Result<(), DeclError> {
    ns.declare(
        UnionDef::closed("FolderSharingPolicyType")
            .doc("The sharing policy of a Paper folder. The sharing policy of subfolders is inherited from the root folder.")
            .variant(Variant::void("team").doc("Everyone in your team and anyone directly invited can access this folder."))
            .variant(Variant::void("invite_only").doc("Only people directly invited can access this folder.")),
    )?;

    ns.declare(
        StructDef::new("Folder")
            .doc("Data structure representing a Paper folder.")
            .field(Field::new("id", DataType::string()).doc("Paper folder ID. This ID uniquely identifies the folder."))
            .field(Field::new("name", DataType::string()).doc("Paper folder name.")),
    )?;

    ns.declare(
        StructDef::new("FoldersContainingPaperDoc")
            .doc("Metadata about Paper folders containing the specififed Paper doc.")
            .field(Field::new("folder_sharing_policy_type", DataType::named("FolderSharingPolicyType").nullable()).doc("The sharing policy of the folder containing the Paper doc."))
            .field(Field::new("folders", DataType::list(DataType::named("Folder")).nullable()).doc("The folder path. If present the first folder is the root folder.")),
    )?;

    ns.declare(
        StructDef::new("ListUsersOnFolderArgs")
            .extends("RefPaperDoc")
            .field(page_limit("Size limit per batch. The maximum number of users that can be retrieved per batch is 1000. Higher value results in invalid arguments error.")),
    )?;

    ns.declare(
        StructDef::new("ListUsersOnFolderContinueArgs")
            .extends("RefPaperDoc")
            .field(Field::new("cursor", DataType::string()).doc("The cursor obtained from docs/folder_users/list or docs/folder_users/list/continue. Allows for pagination.")),
    )?;

    ns.declare(
        StructDef::new("ListUsersOnFolderResponse")
            .field(Field::new("invitees", DataType::list(DataType::named("sharing.InviteeInfo"))).doc("List of email addresses that are invited on the Paper folder."))
            .field(Field::new("users", DataType::list(DataType::named("sharing.UserInfo"))).doc("List of users that are invited on the Paper folder."))
            .field(Field::new("cursor", DataType::named("Cursor")).doc("Pass the cursor into docs/folder_users/list/continue to paginate through all users. The cursor preserves all properties as specified in the original call to docs/folder_users/list."))
            .field(Field::new("has_more", DataType::boolean()).doc("Will be set to True if a subsequent call with the provided cursor to docs/folder_users/list/continue returns immediately with some results. If set to False please allow some delay before making another call to docs/folder_users/list/continue.")),
    )?;

    ns.declare(
        StructDef::new("PaperFolderCreateArg")
            .field(Field::new("name", DataType::string()).doc("The name of the new Paper folder."))
            .field(Field::new("parent_folder_id", DataType::string().nullable()).doc("The encrypted Paper folder Id where the new Paper folder should be created. The API user has to have write access to this folder or error is thrown. If not supplied, the new folder will be created at top level."))
            .field(Field::new("is_team_folder", DataType::boolean().nullable()).doc("Whether the folder to be created should be a team folder. This value will be ignored if parent_folder_id is supplied, as the new folder will inherit the type (private or team folder) from its parent. We will by default create a top-level private folder if both parent_folder_id and is_team_folder are not supplied.")),
    )?;

    ns.declare(
        StructDef::new("PaperFolderCreateResult")
            .field(Field::new("folder_id", DataType::string()).doc("Folder ID of the newly created folder.")),
    )?;

    ns.declare(
        UnionDef::open("PaperFolderCreateError")
            .extends("PaperApiBaseError")
            .variant(Variant::void("folder_not_found").doc("The specified parent Paper folder cannot be found."))
            .variant(Variant::void("invalid_folder_id").doc("The folder id cannot be decrypted to valid folder id.")),
    )?;

    Ok(())
}

fn declare_routes(ns: &mut Namespace) -> Result<(), DeclError> {
    let route = |name: &str, arg: &str, result: DataType, error: &str, scope: &str| {
        Route::new(name, DataType::named(arg), result, DataType::named(error))
            .owner(OWNER)
            .scope(scope)
    };
    let named = DataType::named;

    ns.route(
        route("docs/archive", "RefPaperDoc", DataType::Void, "DocLookupError", SCOPE_WRITE)
            .doc("Marks the given Paper doc as archived. This action can be performed or undone by anyone with edit permissions to the doc."),
    )?;

    ns.route(
        route("docs/create", "PaperDocCreateArgs", named("PaperDocCreateUpdateResult"), "PaperDocCreateError", SCOPE_WRITE)
            .style(RouteStyle::Upload)
            .host(Host::Content)
            .doc("Creates a new Paper doc with the provided content."),
    )?;

    ns.route(
        route("docs/download", "PaperDocExport", named("PaperDocExportResult"), "DocLookupError", SCOPE_READ)
            .style(RouteStyle::Download)
            .host(Host::Content)
            .doc("Exports and downloads Paper doc either as HTML or markdown."),
    )?;

    ns.route(
        route("docs/folder_users/list", "ListUsersOnFolderArgs", named("ListUsersOnFolderResponse"), "DocLookupError", SCOPE_SHARING_READ)
            .doc("Lists the users who are explicitly invited to the Paper folder in which the Paper doc is contained. For private folders all users (including owner) shared on the folder are listed and for team folders all non-team users shared on the folder are returned."),
    )?;

    ns.route(
        route(
            "docs/folder_users/list/continue",
            "ListUsersOnFolderContinueArgs",
            named("ListUsersOnFolderResponse"),
            "ListUsersCursorError",
            SCOPE_SHARING_READ,
        )
        .doc("Once a cursor has been retrieved from docs/folder_users/list, use this to paginate through all users on the Paper folder."),
    )?;

    ns.route(
        route("docs/get_folder_info", "RefPaperDoc", named("FoldersContainingPaperDoc"), "DocLookupError", SCOPE_SHARING_READ)
            .doc("Retrieves folder information for the given Paper doc. This includes: folder sharing policy; permissions for subfolders are set by the top-level folder; full 'filepath', i.e. the list of folders (both folderId and folderName) from the root folder to the folder directly containing the Paper doc."),
    )?;

    ns.route(
        route("docs/list", "ListPaperDocsArgs", named("ListPaperDocsResponse"), "ListDocsCursorError", SCOPE_READ)
            .doc("Return the list of all Paper docs according to the argument specifications. To iterate over through the full pagination, pass the cursor to docs/list/continue."),
    )?;

    ns.route(
        route("docs/list/continue", "ListPaperDocsContinueArgs", named("ListPaperDocsResponse"), "ListDocsCursorError", SCOPE_READ)
            .doc("Once a cursor has been retrieved from docs/list, use this to paginate through all Paper doc."),
    )?;

    ns.route(
        route("docs/permanently_delete", "RefPaperDoc", DataType::Void, "DocLookupError", SCOPE_WRITE)
            .doc("Permanently deletes the given Paper doc. This operation is final as the doc cannot be recovered. This action can be performed only by the doc owner."),
    )?;

    ns.route(
        route("docs/sharing_policy/get", "RefPaperDoc", named("SharingPolicy"), "DocLookupError", SCOPE_SHARING_READ)
            .doc("Gets the default sharing policy for the given Paper doc."),
    )?;

    ns.route(
        route("docs/sharing_policy/set", "PaperDocSharingPolicy", DataType::Void, "DocLookupError", SCOPE_SHARING_WRITE)
            .doc("Sets the default sharing policy for the given Paper doc. The default 'team_sharing_policy' can be changed only by teams, omit this field for personal accounts. The 'public_sharing_policy' policy can't be set to the value 'disabled' because this setting can be changed only via the team admin console."),
    )?;

    ns.route(
        route("docs/update", "PaperDocUpdateArgs", named("PaperDocCreateUpdateResult"), "PaperDocUpdateError", SCOPE_WRITE)
            .style(RouteStyle::Upload)
            .host(Host::Content)
            .doc("Updates an existing Paper doc with the provided content."),
    )?;

    ns.route(
        route(
            "docs/users/add",
            "AddPaperDocUser",
            DataType::list(named("AddPaperDocUserMemberResult")),
            "DocLookupError",
            SCOPE_SHARING_WRITE,
        )
        .doc("Allows an owner or editor to add users to a Paper doc or change their permissions using their email address or Dropbox account ID. The doc owner's permissions cannot be changed."),
    )?;

    ns.route(
        route("docs/users/list", "ListUsersOnPaperDocArgs", named("ListUsersOnPaperDocResponse"), "DocLookupError", SCOPE_SHARING_READ)
            .doc("Lists all users who visited the Paper doc or users with explicit access. This call excludes users who have been removed. The list is sorted by the date of the visit or the share date. The list will include both users, the explicitly shared ones as well as those who came in using the Paper url link."),
    )?;

    ns.route(
        route(
            "docs/users/list/continue",
            "ListUsersOnPaperDocContinueArgs",
            named("ListUsersOnPaperDocResponse"),
            "ListUsersCursorError",
            SCOPE_SHARING_READ,
        )
        .doc("Once a cursor has been retrieved from docs/users/list, use this to paginate through all users on the Paper doc."),
    )?;

    ns.route(
        route("docs/users/remove", "RemovePaperDocUser", DataType::Void, "DocLookupError", SCOPE_SHARING_WRITE)
            .doc("Allows an owner or editor to remove users from a Paper doc using their email address or Dropbox account ID. The doc owner cannot be removed."),
    )?;

    ns.route(
        route("folders/create", "PaperFolderCreateArg", named("PaperFolderCreateResult"), "PaperFolderCreateError", SCOPE_WRITE)
            .style(RouteStyle::Upload)
            .host(Host::Content)
            .doc("Create a new Paper folder with the provided info."),
    )?;

    Ok(())
}
