//! File request bindings (`file_requests/...`).

use super::{Endpoint, NoArg, Paginated, timestamp};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

const NAMESPACE: &str = "file_requests";

pub const DEFAULT_LIST_LIMIT: u64 = 1000;

// =============================================================================
// ENTITIES
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = ".tag", rename_all = "snake_case")]
pub enum GracePeriod {
    OneDay,
    TwoDays,
    SevenDays,
    ThirtyDays,
    Always,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRequestDeadline {
    #[serde(with = "timestamp")]
    pub deadline: DateTime<Utc>,
    #[serde(default)]
    pub allow_late_uploads: Option<GracePeriod>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRequest {
    pub id: String,
    pub url: String,
    pub title: String,
    #[serde(with = "timestamp")]
    pub created: DateTime<Utc>,
    pub is_open: bool,
    pub file_count: i64,
    #[serde(default)]
    pub destination: Option<String>,
    #[serde(default)]
    pub deadline: Option<FileRequestDeadline>,
    #[serde(default)]
    pub description: Option<String>,
}

impl FileRequest {
    /// Whether uploads are still accepted at `now`.
    #[must_use]
    pub fn accepts_uploads_at(&self, now: DateTime<Utc>) -> bool {
        if !self.is_open {
            return false;
        }
        match &self.deadline {
            None => true,
            Some(d) => now <= d.deadline || d.allow_late_uploads.is_some(),
        }
    }
}

// =============================================================================
// ARGUMENTS AND RESULTS
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateFileRequestArgs {
    pub title: String,
    pub destination: String,
    #[serde(default)]
    pub deadline: Option<FileRequestDeadline>,
    #[serde(default = "default_open")]
    pub open: bool,
    #[serde(default)]
    pub description: Option<String>,
}

fn default_open() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetFileRequestArgs {
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = ".tag", rename_all = "snake_case")]
pub enum UpdateFileRequestDeadline {
    #[default]
    NoUpdate,
    Update(FileRequestDeadline),
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateFileRequestArgs {
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub destination: Option<String>,
    #[serde(default)]
    pub deadline: UpdateFileRequestDeadline,
    #[serde(default)]
    pub open: Option<bool>,
    #[serde(default)]
    pub description: Option<String>,
}

impl UpdateFileRequestArgs {
    /// An update that changes nothing but can be built upon.
    #[must_use]
    pub fn for_id(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: None,
            destination: None,
            deadline: UpdateFileRequestDeadline::NoUpdate,
            open: None,
            description: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteFileRequestArgs {
    pub ids: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteFileRequestsResult {
    pub file_requests: Vec<FileRequest>,
}

pub type DeleteAllClosedFileRequestsResult = DeleteFileRequestsResult;

/// Unpaginated result of the deprecated v1 `list`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListFileRequestsResult {
    pub file_requests: Vec<FileRequest>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountFileRequestsResult {
    pub file_request_count: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListFileRequestsArg {
    #[serde(default = "default_limit")]
    pub limit: u64,
}

fn default_limit() -> u64 {
    DEFAULT_LIST_LIMIT
}

impl Default for ListFileRequestsArg {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIST_LIMIT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListFileRequestsContinueArg {
    pub cursor: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListFileRequestsV2Result {
    pub file_requests: Vec<FileRequest>,
    pub cursor: String,
    pub has_more: bool,
}

impl Paginated for ListFileRequestsV2Result {
    type Item = FileRequest;

    fn items(&self) -> &[FileRequest] {
        &self.file_requests
    }

    fn cursor(&self) -> &str {
        &self.cursor
    }

    fn has_more(&self) -> bool {
        self.has_more
    }
}

// =============================================================================
// ERRORS
// =============================================================================

/// The tags of `FileRequestError` and its parent `GeneralFileRequestsError`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = ".tag", rename_all = "snake_case")]
pub enum FileRequestError {
    DisabledForTeam,
    NotFound,
    NotAFolder,
    AppLacksAccess,
    NoPermission,
    EmailUnverified,
    ValidationError,
    #[serde(other)]
    Other,
}

pub type GetFileRequestError = FileRequestError;
pub type UpdateFileRequestError = FileRequestError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = ".tag", rename_all = "snake_case")]
pub enum CreateFileRequestError {
    DisabledForTeam,
    NotFound,
    NotAFolder,
    AppLacksAccess,
    NoPermission,
    EmailUnverified,
    ValidationError,
    InvalidLocation,
    RateLimit,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = ".tag", rename_all = "snake_case")]
pub enum DeleteFileRequestError {
    DisabledForTeam,
    NotFound,
    NotAFolder,
    AppLacksAccess,
    NoPermission,
    EmailUnverified,
    ValidationError,
    FileRequestOpen,
    #[serde(other)]
    Other,
}

/// The tags of `GeneralFileRequestsError`, used by count and list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = ".tag", rename_all = "snake_case")]
pub enum GeneralFileRequestsError {
    DisabledForTeam,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = ".tag", rename_all = "snake_case")]
pub enum ListFileRequestsContinueError {
    DisabledForTeam,
    InvalidCursor,
    #[serde(other)]
    Other,
}

// =============================================================================
// ENDPOINTS
// =============================================================================

endpoint!(Count, "count", NoArg, CountFileRequestsResult, GeneralFileRequestsError);
endpoint!(Create, "create", CreateFileRequestArgs, FileRequest, CreateFileRequestError);
endpoint!(Delete, "delete", DeleteFileRequestArgs, DeleteFileRequestsResult, DeleteFileRequestError);
endpoint!(
    DeleteAllClosed,
    "delete_all_closed",
    NoArg,
    DeleteAllClosedFileRequestsResult,
    FileRequestError
);
endpoint!(Get, "get", GetFileRequestArgs, FileRequest, GetFileRequestError);
endpoint!(
    /// Deprecated by [`ListV2`].
    List,
    "list",
    NoArg,
    ListFileRequestsResult,
    GeneralFileRequestsError
);
endpoint!(ListV2, "list:2", ListFileRequestsArg, ListFileRequestsV2Result, GeneralFileRequestsError);
endpoint!(
    ListContinue,
    "list/continue",
    ListFileRequestsContinueArg,
    ListFileRequestsV2Result,
    ListFileRequestsContinueError
);
endpoint!(Update, "update", UpdateFileRequestArgs, FileRequest, UpdateFileRequestError);

// =============================================================================
// TESTS
// =============================================================================
