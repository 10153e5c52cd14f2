//! Paper bindings (`paper/...`): doc listing, updates and sharing policy.

use super::{Endpoint, NoArg, Paginated, timestamp};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

const NAMESPACE: &str = "paper";

pub const PAGE_LIMIT: i32 = 1000;

// =============================================================================
// DOCS AND CURSORS
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefPaperDoc {
    pub doc_id: String,
}

impl RefPaperDoc {
    #[must_use]
    pub fn new(doc_id: impl Into<String>) -> Self {
        Self { doc_id: doc_id.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cursor {
    pub value: String,
    #[serde(default, with = "timestamp::option")]
    pub expiration: Option<DateTime<Utc>>,
}

impl Cursor {
    /// A cursor without expiration never expires.
    #[must_use]
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expiration.is_some_and(|e| now >= e)
    }
}

// =============================================================================
// LISTING
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = ".tag", rename_all = "snake_case")]
pub enum ListPaperDocsFilterBy {
    #[default]
    DocsAccessed,
    DocsCreated,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = ".tag", rename_all = "snake_case")]
pub enum ListPaperDocsSortBy {
    #[default]
    Accessed,
    Modified,
    Created,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = ".tag", rename_all = "snake_case")]
pub enum ListPaperDocsSortOrder {
    #[default]
    Ascending,
    Descending,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListPaperDocsArgs {
    #[serde(default)]
    pub filter_by: ListPaperDocsFilterBy,
    #[serde(default)]
    pub sort_by: ListPaperDocsSortBy,
    #[serde(default)]
    pub sort_order: ListPaperDocsSortOrder,
    #[serde(default = "default_limit")]
    pub limit: i32,
}

fn default_limit() -> i32 {
    PAGE_LIMIT
}

impl Default for ListPaperDocsArgs {
    fn default() -> Self {
        Self {
            filter_by: ListPaperDocsFilterBy::default(),
            sort_by: ListPaperDocsSortBy::default(),
            sort_order: ListPaperDocsSortOrder::default(),
            limit: PAGE_LIMIT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListPaperDocsContinueArgs {
    pub cursor: String,
}

impl ListPaperDocsContinueArgs {
    /// Continue from the cursor of a previous page.
    #[must_use]
    pub fn after(page: &ListPaperDocsResponse) -> Self {
        Self {
            cursor: page.cursor.value.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListPaperDocsResponse {
    pub doc_ids: Vec<String>,
    pub cursor: Cursor,
    pub has_more: bool,
}

impl Paginated for ListPaperDocsResponse {
    type Item = String;

    fn items(&self) -> &[String] {
        &self.doc_ids
    }

    fn cursor(&self) -> &str {
        &self.cursor.value
    }

    fn has_more(&self) -> bool {
        self.has_more
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = ".tag", rename_all = "snake_case")]
pub enum PaperApiCursorError {
    ExpiredCursor,
    InvalidCursor,
    WrongUserInCursor,
    Reset,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = ".tag", rename_all = "snake_case")]
pub enum ListDocsCursorError {
    CursorError { cursor_error: PaperApiCursorError },
    #[serde(other)]
    Other,
}

// =============================================================================
// CREATE AND UPDATE
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = ".tag", rename_all = "snake_case")]
pub enum ImportFormat {
    Html,
    Markdown,
    PlainText,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = ".tag", rename_all = "snake_case")]
pub enum PaperDocUpdatePolicy {
    Append,
    Prepend,
    OverwriteAll,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaperDocCreateArgs {
    pub import_format: ImportFormat,
    #[serde(default)]
    pub parent_folder_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaperDocUpdateArgs {
    pub doc_id: String,
    pub doc_update_policy: PaperDocUpdatePolicy,
    /// Must equal the head revision of the doc.
    pub revision: i64,
    pub import_format: ImportFormat,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaperDocCreateUpdateResult {
    pub doc_id: String,
    pub revision: i64,
    pub title: String,
}

impl PaperDocUpdateArgs {
    /// The update to send after `previous`, carrying its revision forward.
    #[must_use]
    pub fn following(
        previous: &PaperDocCreateUpdateResult,
        doc_update_policy: PaperDocUpdatePolicy,
        import_format: ImportFormat,
    ) -> Self {
        Self {
            doc_id: previous.doc_id.clone(),
            doc_update_policy,
            revision: previous.revision,
            import_format,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = ".tag", rename_all = "snake_case")]
pub enum PaperDocCreateError {
    InsufficientPermissions,
    ContentMalformed,
    FolderNotFound,
    DocLengthExceeded,
    ImageSizeExceeded,
    #[serde(other)]
    Other,
}

/// `DocLookupError` and its `PaperApiBaseError` parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = ".tag", rename_all = "snake_case")]
pub enum DocLookupError {
    InsufficientPermissions,
    DocNotFound,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = ".tag", rename_all = "snake_case")]
pub enum PaperDocUpdateError {
    InsufficientPermissions,
    DocNotFound,
    ContentMalformed,
    RevisionMismatch,
    DocLengthExceeded,
    ImageSizeExceeded,
    DocArchived,
    DocDeleted,
    #[serde(other)]
    Other,
}

impl PaperDocUpdateError {
    /// Whether re-reading the doc and retrying with its head revision can succeed.
    #[must_use]
    pub fn is_stale_revision(&self) -> bool {
        matches!(self, Self::RevisionMismatch)
    }
}

// =============================================================================
// SHARING POLICY
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = ".tag", rename_all = "snake_case")]
pub enum SharingTeamPolicyType {
    PeopleWithLinkCanEdit,
    PeopleWithLinkCanViewAndComment,
    InviteOnly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = ".tag", rename_all = "snake_case")]
pub enum SharingPublicPolicyType {
    PeopleWithLinkCanEdit,
    PeopleWithLinkCanViewAndComment,
    InviteOnly,
    Disabled,
}

impl From<SharingTeamPolicyType> for SharingPublicPolicyType {
    fn from(value: SharingTeamPolicyType) -> Self {
        match value {
            SharingTeamPolicyType::PeopleWithLinkCanEdit => Self::PeopleWithLinkCanEdit,
            SharingTeamPolicyType::PeopleWithLinkCanViewAndComment => Self::PeopleWithLinkCanViewAndComment,
            SharingTeamPolicyType::InviteOnly => Self::InviteOnly,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SharingPolicy {
    #[serde(default)]
    pub public_sharing_policy: Option<SharingPublicPolicyType>,
    #[serde(default)]
    pub team_sharing_policy: Option<SharingTeamPolicyType>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaperDocSharingPolicy {
    pub doc_id: String,
    pub sharing_policy: SharingPolicy,
}

// =============================================================================
// MEMBERS
// =============================================================================

/// `sharing.MemberSelector`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = ".tag", rename_all = "snake_case")]
pub enum MemberSelector {
    DropboxId { dropbox_id: String },
    Email { email: String },
    #[serde(other)]
    Other,
}

impl MemberSelector {
    #[must_use]
    pub fn email(address: impl Into<String>) -> Self {
        Self::Email { email: address.into() }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = ".tag", rename_all = "snake_case")]
pub enum PaperDocPermissionLevel {
    #[default]
    Edit,
    ViewAndComment,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddMember {
    pub member: MemberSelector,
    #[serde(default)]
    pub permission_level: PaperDocPermissionLevel,
}

/// At most 20 members per call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddPaperDocUser {
    pub doc_id: String,
    pub members: Vec<AddMember>,
    #[serde(default)]
    pub custom_message: Option<String>,
    #[serde(default)]
    pub quiet: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = ".tag", rename_all = "snake_case")]
pub enum AddPaperDocUserResult {
    Success,
    UnknownError,
    SharingOutsideTeamDisabled,
    DailyLimitReached,
    UserIsOwner,
    FailedUserDataRetrieval,
    PermissionAlreadyGranted,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddPaperDocUserMemberResult {
    pub member: MemberSelector,
    pub result: AddPaperDocUserResult,
}

impl AddPaperDocUserMemberResult {
    /// Granted now or already held.
    #[must_use]
    pub fn has_access(&self) -> bool {
        matches!(
            self.result,
            AddPaperDocUserResult::Success | AddPaperDocUserResult::PermissionAlreadyGranted
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemovePaperDocUser {
    pub doc_id: String,
    pub member: MemberSelector,
}

/// `sharing.UserInfo`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInfo {
    pub account_id: String,
    pub email: String,
    pub display_name: String,
    pub same_team: bool,
    #[serde(default)]
    pub team_member_id: Option<String>,
}

/// `sharing.InviteeInfo`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = ".tag", rename_all = "snake_case")]
pub enum InviteeInfo {
    Email { email: String },
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InviteeInfoWithPermissionLevel {
    pub invitee: InviteeInfo,
    pub permission_level: PaperDocPermissionLevel,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInfoWithPermissionLevel {
    pub user: UserInfo,
    pub permission_level: PaperDocPermissionLevel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = ".tag", rename_all = "snake_case")]
pub enum UserOnPaperDocFilter {
    Visited,
    #[default]
    Shared,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListUsersOnPaperDocArgs {
    pub doc_id: String,
    #[serde(default = "default_limit")]
    pub limit: i32,
    #[serde(default)]
    pub filter_by: UserOnPaperDocFilter,
}

impl ListUsersOnPaperDocArgs {
    #[must_use]
    pub fn for_doc(doc_id: impl Into<String>) -> Self {
        Self {
            doc_id: doc_id.into(),
            limit: PAGE_LIMIT,
            filter_by: UserOnPaperDocFilter::default(),
        }
    }
}

/// Continue arg of both user listings; the cursor is bound to `doc_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListUsersContinueArgs {
    pub doc_id: String,
    pub cursor: String,
}

impl ListUsersContinueArgs {
    #[must_use]
    pub fn after(doc_id: impl Into<String>, page: &impl Paginated) -> Self {
        Self {
            doc_id: doc_id.into(),
            cursor: page.cursor().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListUsersOnPaperDocResponse {
    pub invitees: Vec<InviteeInfoWithPermissionLevel>,
    pub users: Vec<UserInfoWithPermissionLevel>,
    pub doc_owner: UserInfo,
    pub cursor: Cursor,
    pub has_more: bool,
}

impl Paginated for ListUsersOnPaperDocResponse {
    type Item = UserInfoWithPermissionLevel;

    fn items(&self) -> &[UserInfoWithPermissionLevel] {
        &self.users
    }

    fn cursor(&self) -> &str {
        &self.cursor.value
    }

    fn has_more(&self) -> bool {
        self.has_more
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListUsersOnFolderArgs {
    pub doc_id: String,
    #[serde(default = "default_limit")]
    pub limit: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListUsersOnFolderResponse {
    pub invitees: Vec<InviteeInfo>,
    pub users: Vec<UserInfo>,
    pub cursor: Cursor,
    pub has_more: bool,
}

impl Paginated for ListUsersOnFolderResponse {
    type Item = UserInfo;

    fn items(&self) -> &[UserInfo] {
        &self.users
    }

    fn cursor(&self) -> &str {
        &self.cursor.value
    }

    fn has_more(&self) -> bool {
        self.has_more
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = ".tag", rename_all = "snake_case")]
pub enum ListUsersCursorError {
    InsufficientPermissions,
    DocNotFound,
    CursorError { cursor_error: PaperApiCursorError },
    #[serde(other)]
    Other,
}

// =============================================================================
// EXPORT
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = ".tag", rename_all = "snake_case")]
pub enum ExportFormat {
    Html,
    Markdown,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaperDocExport {
    pub doc_id: String,
    pub export_format: ExportFormat,
}

/// Metadata returned alongside the exported content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaperDocExportResult {
    pub owner: String,
    pub title: String,
    pub revision: i64,
    pub mime_type: String,
}

// =============================================================================
// FOLDERS
// =============================================================================

/// Closed: inherited from the root folder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = ".tag", rename_all = "snake_case")]
pub enum FolderSharingPolicyType {
    Team,
    InviteOnly,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Folder {
    pub id: String,
    pub name: String,
}

/// `folders` runs from the root folder down to the doc's parent.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FoldersContainingPaperDoc {
    #[serde(default)]
    pub folder_sharing_policy_type: Option<FolderSharingPolicyType>,
    #[serde(default)]
    pub folders: Option<Vec<Folder>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PaperFolderCreateArg {
    pub name: String,
    #[serde(default)]
    pub parent_folder_id: Option<String>,
    #[serde(default)]
    pub is_team_folder: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaperFolderCreateResult {
    pub folder_id: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = ".tag", rename_all = "snake_case")]
pub enum PaperFolderCreateError {
    InsufficientPermissions,
    FolderNotFound,
    InvalidFolderId,
    #[serde(other)]
    Other,
}

// =============================================================================
// ENDPOINTS
// =============================================================================

endpoint!(Archive, "docs/archive", RefPaperDoc, NoArg, DocLookupError);
endpoint!(Create, "docs/create", PaperDocCreateArgs, PaperDocCreateUpdateResult, PaperDocCreateError);
endpoint!(List, "docs/list", ListPaperDocsArgs, ListPaperDocsResponse, ListDocsCursorError);
endpoint!(
    ListContinue,
    "docs/list/continue",
    ListPaperDocsContinueArgs,
    ListPaperDocsResponse,
    ListDocsCursorError
);
endpoint!(PermanentlyDelete, "docs/permanently_delete", RefPaperDoc, NoArg, DocLookupError);
endpoint!(GetFolderInfo, "docs/get_folder_info", RefPaperDoc, FoldersContainingPaperDoc, DocLookupError);
endpoint!(UsersAdd, "docs/users/add", AddPaperDocUser, Vec<AddPaperDocUserMemberResult>, DocLookupError);
endpoint!(UsersRemove, "docs/users/remove", RemovePaperDocUser, NoArg, DocLookupError);
endpoint!(Download, "docs/download", PaperDocExport, PaperDocExportResult, DocLookupError);
endpoint!(UsersList, "docs/users/list", ListUsersOnPaperDocArgs, ListUsersOnPaperDocResponse, DocLookupError);
endpoint!(
    UsersListContinue,
    "docs/users/list/continue",
    ListUsersContinueArgs,
    ListUsersOnPaperDocResponse,
    ListUsersCursorError
);
endpoint!(FolderUsersList, "docs/folder_users/list", ListUsersOnFolderArgs, ListUsersOnFolderResponse, DocLookupError);
endpoint!(
    FolderUsersListContinue,
    "docs/folder_users/list/continue",
    ListUsersContinueArgs,
    ListUsersOnFolderResponse,
    ListUsersCursorError
);
endpoint!(GetSharingPolicy, "docs/sharing_policy/get", RefPaperDoc, SharingPolicy, DocLookupError);
endpoint!(SetSharingPolicy, "docs/sharing_policy/set", PaperDocSharingPolicy, NoArg, DocLookupError);
endpoint!(Update, "docs/update", PaperDocUpdateArgs, PaperDocCreateUpdateResult, PaperDocUpdateError);
endpoint!(CreateFolder, "folders/create", PaperFolderCreateArg, PaperFolderCreateResult, PaperFolderCreateError);

// =============================================================================
// TESTS
// =============================================================================
