//! Team folder bindings (`team/team_folder/...`).

use super::async_job::{LaunchResult, PollArg, PollError};
use super::{Endpoint, Paginated};
use serde::{Deserialize, Serialize};

const NAMESPACE: &str = "team";

/// Page size used when a list request does not set one.
pub const DEFAULT_LIST_LIMIT: u32 = 1000;

// =============================================================================
// ENTITIES
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = ".tag", rename_all = "snake_case")]
pub enum TeamFolderStatus {
    Active,
    Archived,
    ArchiveInProgress,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = ".tag", rename_all = "snake_case")]
pub enum SyncSetting {
    Default,
    NotSynced,
    NotSyncedInactive,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = ".tag", rename_all = "snake_case")]
pub enum SyncSettingArg {
    Default,
    NotSynced,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentSyncSetting {
    pub id: String,
    pub sync_setting: SyncSetting,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamFolderMetadata {
    pub team_folder_id: String,
    pub name: String,
    pub status: TeamFolderStatus,
    pub is_team_shared_dropbox: bool,
    pub sync_setting: SyncSetting,
    pub content_sync_settings: Vec<ContentSyncSetting>,
}

impl TeamFolderMetadata {
    #[must_use]
    pub fn is_archived(&self) -> bool {
        matches!(self.status, TeamFolderStatus::Archived)
    }
}

// =============================================================================
// ARGUMENTS AND RESULTS
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamFolderCreateArg {
    pub name: String,
    #[serde(default)]
    pub sync_setting: Option<SyncSettingArg>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamFolderIdArg {
    pub team_folder_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamFolderIdListArg {
    pub team_folder_ids: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamFolderRenameArg {
    pub team_folder_id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentSyncSettingArg {
    pub id: String,
    pub sync_setting: SyncSettingArg,
}

/// Absent settings are left unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamFolderUpdateSyncSettingsArg {
    pub team_folder_id: String,
    #[serde(default)]
    pub sync_setting: Option<SyncSettingArg>,
    #[serde(default)]
    pub content_sync_settings: Option<Vec<ContentSyncSettingArg>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamFolderArchiveArg {
    pub team_folder_id: String,
    #[serde(default)]
    pub force_async_off: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamFolderListArg {
    #[serde(default = "default_limit")]
    pub limit: u32,
}

fn default_limit() -> u32 {
    DEFAULT_LIST_LIMIT
}

impl Default for TeamFolderListArg {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIST_LIMIT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamFolderListContinueArg {
    pub cursor: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamFolderListResult {
    pub team_folders: Vec<TeamFolderMetadata>,
    pub cursor: String,
    pub has_more: bool,
}

impl Paginated for TeamFolderListResult {
    type Item = TeamFolderMetadata;

    fn items(&self) -> &[TeamFolderMetadata] {
        &self.team_folders
    }

    fn cursor(&self) -> &str {
        &self.cursor
    }

    fn has_more(&self) -> bool {
        self.has_more
    }
}

/// Closed: every item is one of the two.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = ".tag", rename_all = "snake_case")]
pub enum TeamFolderGetInfoItem {
    IdNotFound { id_not_found: String },
    TeamFolderMetadata(TeamFolderMetadata),
}

pub type TeamFolderArchiveLaunch = LaunchResult<TeamFolderMetadata>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = ".tag", rename_all = "snake_case")]
pub enum TeamFolderArchiveJobStatus {
    InProgress,
    Complete(TeamFolderMetadata),
    Failed { failed: TeamFolderArchiveError },
    #[serde(other)]
    Other,
}

// =============================================================================
// ERRORS
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = ".tag", rename_all = "snake_case")]
pub enum TeamFolderAccessError {
    InvalidTeamFolderId,
    NoAccess,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = ".tag", rename_all = "snake_case")]
pub enum TeamFolderInvalidStatusError {
    Active,
    Archived,
    ArchiveInProgress,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = ".tag", rename_all = "snake_case")]
pub enum TeamFolderTeamSharedDropboxError {
    Disallowed,
    #[serde(other)]
    Other,
}

/// The tags of `BaseTeamFolderError`, shared by activate, archive and
/// permanently-delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = ".tag", rename_all = "snake_case")]
pub enum TeamFolderArchiveError {
    AccessError { access_error: TeamFolderAccessError },
    StatusError { status_error: TeamFolderInvalidStatusError },
    TeamSharedDropboxError { team_shared_dropbox_error: TeamFolderTeamSharedDropboxError },
    #[serde(other)]
    Other,
}

pub type TeamFolderActivateError = TeamFolderArchiveError;
pub type TeamFolderPermanentlyDeleteError = TeamFolderArchiveError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = ".tag", rename_all = "snake_case")]
pub enum TeamFolderCreateError {
    InvalidFolderName,
    FolderNameAlreadyUsed,
    FolderNameReserved,
    SyncSettingsError { sync_settings_error: SyncSettingsError },
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = ".tag", rename_all = "snake_case")]
pub enum TeamFolderRenameError {
    AccessError { access_error: TeamFolderAccessError },
    StatusError { status_error: TeamFolderInvalidStatusError },
    TeamSharedDropboxError { team_shared_dropbox_error: TeamFolderTeamSharedDropboxError },
    InvalidFolderName,
    FolderNameAlreadyUsed,
    FolderNameReserved,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = ".tag", rename_all = "snake_case")]
pub enum TeamFolderUpdateSyncSettingsError {
    AccessError { access_error: TeamFolderAccessError },
    StatusError { status_error: TeamFolderInvalidStatusError },
    TeamSharedDropboxError { team_shared_dropbox_error: TeamFolderTeamSharedDropboxError },
    SyncSettingsError { sync_settings_error: SyncSettingsError },
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = ".tag", rename_all = "snake_case")]
pub enum SyncSettingsError {
    UnsupportedCombination,
    UnsupportedConfiguration,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamFolderListError {
    pub access_error: TeamFolderAccessError,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = ".tag", rename_all = "snake_case")]
pub enum TeamFolderListContinueError {
    InvalidCursor,
    #[serde(other)]
    Other,
}

// =============================================================================
// ENDPOINTS
// =============================================================================

endpoint!(Create, "team_folder/create", TeamFolderCreateArg, TeamFolderMetadata, TeamFolderCreateError);
endpoint!(Activate, "team_folder/activate", TeamFolderIdArg, TeamFolderMetadata, TeamFolderActivateError);
endpoint!(
    /// May finish synchronously; otherwise poll with [`ArchiveCheck`].
    Archive,
    "team_folder/archive",
    TeamFolderArchiveArg,
    TeamFolderArchiveLaunch,
    TeamFolderArchiveError
);
endpoint!(ArchiveCheck, "team_folder/archive/check", PollArg, TeamFolderArchiveJobStatus, PollError);
endpoint!(PermanentlyDelete, "team_folder/permanently_delete", TeamFolderIdArg, (), TeamFolderPermanentlyDeleteError);
endpoint!(Rename, "team_folder/rename", TeamFolderRenameArg, TeamFolderMetadata, TeamFolderRenameError);
endpoint!(
    /// Unknown IDs come back as `id_not_found` items rather than an error.
    GetInfo,
    "team_folder/get_info",
    TeamFolderIdListArg,
    Vec<TeamFolderGetInfoItem>,
    ()
);
endpoint!(
    UpdateSyncSettings,
    "team_folder/update_sync_settings",
    TeamFolderUpdateSyncSettingsArg,
    TeamFolderMetadata,
    TeamFolderUpdateSyncSettingsError
);
endpoint!(List, "team_folder/list", TeamFolderListArg, TeamFolderListResult, TeamFolderListError);
endpoint!(
    ListContinue,
    "team_folder/list/continue",
    TeamFolderListContinueArg,
    TeamFolderListResult,
    TeamFolderListContinueError
);

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::conformance::assert_conforms;
    use crate::wire::RoutePart;
    use serde_json::json;

    fn metadata(id: &str) -> TeamFolderMetadata {
        TeamFolderMetadata {
            team_folder_id: id.to_string(),
            name: "Marketing".to_string(),
            status: TeamFolderStatus::Active,
            is_team_shared_dropbox: false,
            sync_setting: SyncSetting::Default,
            content_sync_settings: vec![ContentSyncSetting {
                id: "id:a4ayc_80_OEAAAAAAAAAXw".to_string(),
                sync_setting: SyncSetting::NotSynced,
            }],
        }
    }

    #[test]
    fn create_conforms() {
        let arg = TeamFolderCreateArg {
            name: "Marketing".to_string(),
            sync_setting: Some(SyncSettingArg::NotSynced),
        };
        assert_conforms::<Create, _>(RoutePart::Arg, &arg);
        assert_conforms::<Create, _>(RoutePart::Result, &metadata("123456789"));
        assert_conforms::<Create, _>(RoutePart::Error, &TeamFolderCreateError::FolderNameReserved);
        assert_conforms::<Create, _>(
            RoutePart::Error,
            &TeamFolderCreateError::SyncSettingsError {
                sync_settings_error: SyncSettingsError::UnsupportedCombination,
            },
        );
    }

    #[test]
    fn list_conforms_and_paginates() {
        let page = TeamFolderListResult {
            team_folders: vec![metadata("1"), metadata("2")],
            cursor: "ZtkX9_EHj3x7PMkVuFIhwKYXEpwpLwyxp9vMKomUhllil9q7eWiAu".to_string(),
            has_more: true,
        };
        assert_conforms::<List, _>(RoutePart::Arg, &TeamFolderListArg::default());
        assert_conforms::<List, _>(RoutePart::Result, &page);
        assert_conforms::<ListContinue, _>(RoutePart::Result, &page);
        assert_eq!(page.items().len(), 2);
        assert!(page.has_more());
        assert!(page.cursor().starts_with("ZtkX9"));
    }

    #[test]
    fn archive_launch_and_poll_conform() {
        assert_conforms::<Archive, _>(
            RoutePart::Result,
            &TeamFolderArchiveLaunch::AsyncJobId {
                async_job_id: "dbjid:AAAAAAAAAA".to_string(),
            },
        );
        assert_conforms::<Archive, _>(RoutePart::Result, &TeamFolderArchiveLaunch::Complete(metadata("7")));
        assert_conforms::<ArchiveCheck, _>(RoutePart::Arg, &PollArg::new("dbjid:AAAAAAAAAA"));
        assert_conforms::<ArchiveCheck, _>(RoutePart::Result, &TeamFolderArchiveJobStatus::InProgress);
        assert_conforms::<ArchiveCheck, _>(
            RoutePart::Result,
            &TeamFolderArchiveJobStatus::Failed {
                failed: TeamFolderArchiveError::StatusError {
                    status_error: TeamFolderInvalidStatusError::Archived,
                },
            },
        );
        assert_conforms::<ArchiveCheck, _>(RoutePart::Error, &PollError::InvalidAsyncJobId);
    }

    #[test]
    fn get_info_items_are_closed() {
        let items = vec![
            TeamFolderGetInfoItem::IdNotFound {
                id_not_found: "999".to_string(),
            },
            TeamFolderGetInfoItem::TeamFolderMetadata(metadata("1")),
        ];
        let json = serde_json::to_value(&items).expect("serializes");
        assert_eq!(json[0], json!({".tag": "id_not_found", "id_not_found": "999"}));
        assert_eq!(json[1][".tag"], "team_folder_metadata");
        assert_eq!(json[1]["team_folder_id"], "1");

        let unknown = json!([{".tag": "archived_elsewhere"}]);
        assert!(serde_json::from_value::<Vec<TeamFolderGetInfoItem>>(unknown).is_err());
    }

    #[test]
    fn rename_and_sync_settings_conform() {
        let rename = TeamFolderRenameArg {
            team_folder_id: "123456789".to_string(),
            name: "Sales".to_string(),
        };
        assert_conforms::<Rename, _>(RoutePart::Arg, &rename);
        assert_conforms::<Rename, _>(RoutePart::Error, &TeamFolderRenameError::FolderNameAlreadyUsed);
        assert_conforms::<Rename, _>(
            RoutePart::Error,
            &TeamFolderRenameError::AccessError {
                access_error: TeamFolderAccessError::NoAccess,
            },
        );

        let update = TeamFolderUpdateSyncSettingsArg {
            team_folder_id: "123456789".to_string(),
            sync_setting: None,
            content_sync_settings: Some(vec![ContentSyncSettingArg {
                id: "id:a4ayc_80_OEAAAAAAAAAXw".to_string(),
                sync_setting: SyncSettingArg::NotSynced,
            }]),
        };
        assert_conforms::<UpdateSyncSettings, _>(RoutePart::Arg, &update);
        assert_conforms::<UpdateSyncSettings, _>(RoutePart::Result, &metadata("123456789"));
        assert_conforms::<UpdateSyncSettings, _>(
            RoutePart::Error,
            &TeamFolderUpdateSyncSettingsError::SyncSettingsError {
                sync_settings_error: SyncSettingsError::UnsupportedConfiguration,
            },
        );
    }

    #[test]
    fn get_info_conforms() {
        let arg = TeamFolderIdListArg {
            team_folder_ids: vec!["1".to_string(), "999".to_string()],
        };
        let items = vec![
            TeamFolderGetInfoItem::TeamFolderMetadata(metadata("1")),
            TeamFolderGetInfoItem::IdNotFound {
                id_not_found: "999".to_string(),
            },
        ];
        assert_conforms::<GetInfo, _>(RoutePart::Arg, &arg);
        assert_conforms::<GetInfo, _>(RoutePart::Result, &items);
    }

    #[test]
    fn unknown_status_becomes_other() {
        let status: TeamFolderStatus =
            serde_json::from_value(json!({".tag": "frozen"})).expect("open union");
        assert_eq!(status, TeamFolderStatus::Other);
    }

    #[test]
    fn list_arg_limit_defaults() {
        let arg: TeamFolderListArg = serde_json::from_value(json!({})).expect("default");
        assert_eq!(arg.limit, DEFAULT_LIST_LIMIT);
    }

    #[test]
    fn endpoint_paths() {
        assert_eq!(ArchiveCheck::path(), "team/team_folder/archive/check");
        assert_eq!(PermanentlyDelete::path(), "team/team_folder/permanently_delete");
        assert_eq!(GetInfo::path(), "team/team_folder/get_info");
    }
}
