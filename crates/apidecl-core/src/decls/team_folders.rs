//! `team`: team folder management routes (`team_folder/...`).
//!
//! Status transitions (active -> archived, archived -> active) are enacted by
//! the server. The declarations only name the states and the errors raised
//! when a request does not fit the current state.

use crate::DeclError;
use crate::namespace::Namespace;
use crate::route::{AuthMode, Route};
use crate::types::{AliasDef, DataType, DefaultValue, Field, IntKind, StructDef, UnionDef, Variant};

pub const NAMESPACE: &str = "team";

const OWNER: &str = "team-admin-actions";
const SCOPE_READ: &str = "team_data.team_space";
const SCOPE_WRITE: &str = "team_data.content.write";

fn team_route(name: &str, arg: &str, result: DataType, error: DataType) -> Route {
    Route::new(name, DataType::named(arg), result, error)
        .auth(AuthMode::Team)
        .owner(OWNER)
}

pub fn namespace() -> Result<Namespace, DeclError> {
    let mut ns = Namespace::new(NAMESPACE).with_doc("Team folder management for team administrators.");

    declare_types(&mut ns)?;
    declare_errors(&mut ns)?;
    declare_routes(&mut ns)?;

    Ok(ns)
}

fn declare_types(ns: &mut Namespace) -> Result<(), DeclError> {
    ns.declare(
        AliasDef::new("SharedFolderId", DataType::string_with(None, None, Some("[-_0-9a-zA-Z:]+")))
            .doc("Identifier of a shared folder; team folders are shared folders."),
    )?;

    ns.declare(
        UnionDef::open("TeamFolderStatus")
            .variant(Variant::void("active").doc("The team folder and sub-folders are available to all members."))
            .variant(Variant::void("archived").doc("The team folder is not accessible outside of the team folder manager."))
            .variant(Variant::void("archive_in_progress").doc("The team folder is not accessible outside of the team folder manager.")),
    )?;

    ns.declare(
        StructDef::new("TeamFolderMetadata")
            .doc("Properties of a team folder.")
            .field(Field::new("team_folder_id", DataType::named("SharedFolderId")).doc("The ID of the team folder."))
            .field(Field::new("name", DataType::string()).doc("The name of the team folder."))
            .field(Field::new("status", DataType::named("TeamFolderStatus")).doc("The status of the team folder."))
            .field(Field::new("is_team_shared_dropbox", DataType::boolean()).doc("True if this team folder is a shared team root."))
            .field(Field::new("sync_setting", DataType::named("files.SyncSetting")).doc("The sync setting applied to this team folder."))
            .field(
                Field::new("content_sync_settings", DataType::list(DataType::named("files.ContentSyncSetting")))
                    .doc("Sync settings applied to contents of this team folder."),
            ),
    )?;

    ns.declare(
        StructDef::new("TeamFolderCreateArg")
            .field(Field::new("name", DataType::string()).doc("Name for the new team folder."))
            .field(
                Field::new("sync_setting", DataType::named("files.SyncSettingArg").nullable())
                    .doc("The sync setting to apply to this team folder. Only permitted if the team has team selective sync enabled."),
            ),
    )?;

    ns.declare(
        StructDef::new("TeamFolderIdArg")
            .field(Field::new("team_folder_id", DataType::named("SharedFolderId")).doc("The ID of the team folder.")),
    )?;

    ns.declare(
        StructDef::new("TeamFolderIdListArg").field(
            Field::new("team_folder_ids", DataType::list_bounded(DataType::named("SharedFolderId"), Some(1), None))
                .doc("The list of team folder IDs."),
        ),
    )?;

    ns.declare(
        StructDef::new("TeamFolderArchiveArg")
            .extends("TeamFolderIdArg")
            .field(
                Field::new("force_async_off", DataType::boolean())
                    .doc("Whether to force the archive to happen synchronously.")
                    .default(DefaultValue::Bool(false)),
            ),
    )?;

    ns.declare(
        StructDef::new("TeamFolderRenameArg")
            .extends("TeamFolderIdArg")
            .field(Field::new("name", DataType::string()).doc("New team folder name.")),
    )?;

    ns.declare(
        StructDef::new("TeamFolderUpdateSyncSettingsArg")
            .extends("TeamFolderIdArg")
            .field(
                Field::new("sync_setting", DataType::named("files.SyncSettingArg").nullable())
                    .doc("Sync setting to apply to the team folder itself. Only meaningful if the team folder is not a shared team root."),
            )
            .field(
                Field::new("content_sync_settings", DataType::list(DataType::named("files.ContentSyncSettingArg")).nullable())
                    .doc("Sync settings to apply to contents of this team folder."),
            ),
    )?;

    ns.declare(
        StructDef::new("TeamFolderListArg").field(
            Field::new("limit", DataType::int_bounded(IntKind::UInt32, Some(1), Some(1000)))
                .doc("The maximum number of results to return per request.")
                .default(DefaultValue::UInt(1000)),
        ),
    )?;

    ns.declare(
        StructDef::new("TeamFolderListContinueArg").field(
            Field::new("cursor", DataType::string())
                .doc("Indicates from what point to get the next set of team folders."),
        ),
    )?;

    ns.declare(
        StructDef::new("TeamFolderListResult")
            .doc("Result for team_folder/list and team_folder/list/continue.")
            .field(Field::new("team_folders", DataType::list(DataType::named("TeamFolderMetadata"))).doc("List of all team folders in the authenticated team."))
            .field(Field::new("cursor", DataType::string()).doc("Pass the cursor into team_folder/list/continue to obtain additional team folders."))
            .field(Field::new("has_more", DataType::boolean()).doc("Is true if there are additional team folders that have not been returned yet. An additional call to team_folder/list/continue can retrieve them.")),
    )?;

    ns.declare(
        UnionDef::closed("TeamFolderGetInfoItem")
            .doc("Describes a team folder or a missing identifier.")
            .variant(
                Variant::with("id_not_found", DataType::string())
                    .doc("An ID that was provided as a parameter to team_folder/get_info did not match any of the team's team folders."),
            )
            .variant(
                Variant::with("team_folder_metadata", DataType::named("TeamFolderMetadata"))
                    .doc("Properties of a team folder."),
            ),
    )?;

    ns.declare(
        UnionDef::open("TeamFolderArchiveLaunch")
            .extends("async.LaunchResultBase")
            .variant(Variant::with("complete", DataType::named("TeamFolderMetadata"))),
    )?;

    ns.declare(
        UnionDef::open("TeamFolderArchiveJobStatus")
            .extends("async.PollResultBase")
            .variant(
                Variant::with("complete", DataType::named("TeamFolderMetadata"))
                    .doc("The archive job has finished. The value is the metadata for the resulting team folder."),
            )
            .variant(
                Variant::with("failed", DataType::named("TeamFolderArchiveError"))
                    .doc("Error occurred while performing an asynchronous job from team_folder/archive."),
            ),
    )?;

    Ok(())
}

fn declare_errors(ns: &mut Namespace) -> Result<(), DeclError> {
    ns.declare(
        UnionDef::open("TeamFolderAccessError")
            .variant(Variant::void("invalid_team_folder_id").doc("The team folder ID is invalid."))
            .variant(Variant::void("no_access").doc("The authenticated app does not have permission to manage that team folder.")),
    )?;

    ns.declare(
        UnionDef::open("TeamFolderInvalidStatusError")
            .variant(Variant::void("active").doc("The folder is active and the operation did not succeed."))
            .variant(Variant::void("archived").doc("The folder is archived and the operation did not succeed."))
            .variant(Variant::void("archive_in_progress").doc("The folder is being archived and the operation did not succeed.")),
    )?;

    ns.declare(
        UnionDef::open("TeamFolderTeamSharedDropboxError")
            .variant(Variant::void("disallowed").doc("This action is not allowed for a shared team root.")),
    )?;

    ns.declare(
        UnionDef::open("BaseTeamFolderError")
            .doc("Base error that all errors for existing team folders should extend.")
            .variant(Variant::with("access_error", DataType::named("TeamFolderAccessError")))
            .variant(Variant::with("status_error", DataType::named("TeamFolderInvalidStatusError")))
            .variant(Variant::with("team_shared_dropbox_error", DataType::named("TeamFolderTeamSharedDropboxError"))),
    )?;

    ns.declare(
        UnionDef::open("TeamFolderCreateError")
            .variant(Variant::void("invalid_folder_name").doc("The provided name cannot be used."))
            .variant(Variant::void("folder_name_already_used").doc("There is already a team folder with the provided name."))
            .variant(Variant::void("folder_name_reserved").doc("The provided name cannot be used because it is reserved."))
            .variant(Variant::with("sync_settings_error", DataType::named("files.SyncSettingsError")).doc("An error occurred setting the sync settings.")),
    )?;

    ns.declare(UnionDef::open("TeamFolderActivateError").extends("BaseTeamFolderError"))?;
    ns.declare(UnionDef::open("TeamFolderArchiveError").extends("BaseTeamFolderError"))?;
    ns.declare(UnionDef::open("TeamFolderPermanentlyDeleteError").extends("BaseTeamFolderError"))?;

    ns.declare(
        UnionDef::open("TeamFolderRenameError")
            .extends("BaseTeamFolderError")
            .variant(Variant::void("invalid_folder_name").doc("The provided folder name cannot be used."))
            .variant(Variant::void("folder_name_already_used").doc("There is already a team folder with the same name."))
            .variant(Variant::void("folder_name_reserved").doc("The provided name cannot be used because it is reserved.")),
    )?;

    ns.declare(
        UnionDef::open("TeamFolderUpdateSyncSettingsError")
            .extends("BaseTeamFolderError")
            .variant(Variant::with("sync_settings_error", DataType::named("files.SyncSettingsError")).doc("An error occurred setting the sync settings.")),
    )?;

    ns.declare(
        StructDef::new("TeamFolderListError")
            .field(Field::new("access_error", DataType::named("TeamFolderAccessError"))),
    )?;

    ns.declare(
        UnionDef::open("TeamFolderListContinueError")
            .variant(Variant::void("invalid_cursor").doc("The cursor is invalid.")),
    )?;

    Ok(())
}

fn declare_routes(ns: &mut Namespace) -> Result<(), DeclError> {
    let metadata = || DataType::named("TeamFolderMetadata");

    ns.route(
        team_route("team_folder/create", "TeamFolderCreateArg", metadata(), DataType::named("TeamFolderCreateError"))
            .doc("Creates a new, active, team folder with no members. This endpoint can only be used for teams that do not already have a shared team space.")
            .scope(SCOPE_WRITE),
    )?;

    ns.route(
        team_route("team_folder/rename", "TeamFolderRenameArg", metadata(), DataType::named("TeamFolderRenameError"))
            .doc("Changes an active team folder's name.")
            .scope(SCOPE_WRITE),
    )?;

    ns.route(
        team_route("team_folder/list", "TeamFolderListArg", DataType::named("TeamFolderListResult"), DataType::named("TeamFolderListError"))
            .doc("Lists all team folders.")
            .scope(SCOPE_READ),
    )?;

    ns.route(
        team_route(
            "team_folder/list/continue",
            "TeamFolderListContinueArg",
            DataType::named("TeamFolderListResult"),
            DataType::named("TeamFolderListContinueError"),
        )
        .doc("Once a cursor has been retrieved from team_folder/list, use this to paginate through all team folders.")
        .scope(SCOPE_READ),
    )?;

    ns.route(
        team_route("team_folder/get_info", "TeamFolderIdListArg", DataType::list(DataType::named("TeamFolderGetInfoItem")), DataType::Void)
            .doc("Retrieves metadata for team folders.")
            .scope(SCOPE_READ),
    )?;

    ns.route(
        team_route("team_folder/activate", "TeamFolderIdArg", metadata(), DataType::named("TeamFolderActivateError"))
            .doc("Sets an archived team folder's status to active.")
            .scope(SCOPE_WRITE),
    )?;

    ns.route(
        team_route(
            "team_folder/archive",
            "TeamFolderArchiveArg",
            DataType::named("TeamFolderArchiveLaunch"),
            DataType::named("TeamFolderArchiveError"),
        )
        .doc("Sets an active team folder's status to archived and removes all folder and file members. This endpoint cannot be used for teams that have a shared team space.")
        .scope(SCOPE_WRITE),
    )?;

    ns.route(
        Route::new(
            "team_folder/archive/check",
            DataType::named("async.PollArg"),
            DataType::named("TeamFolderArchiveJobStatus"),
            DataType::named("async.PollError"),
        )
        .auth(AuthMode::Team)
        .owner(OWNER)
        .doc("Returns the status of an asynchronous job for archiving a team folder.")
        .scope(SCOPE_WRITE),
    )?;

    ns.route(
        team_route("team_folder/permanently_delete", "TeamFolderIdArg", DataType::Void, DataType::named("TeamFolderPermanentlyDeleteError"))
            .doc("Permanently deletes an archived team folder. This endpoint cannot be used for teams that have a shared team space.")
            .scope(SCOPE_WRITE),
    )?;

    ns.route(
        team_route(
            "team_folder/update_sync_settings",
            "TeamFolderUpdateSyncSettingsArg",
            metadata(),
            DataType::named("TeamFolderUpdateSyncSettingsError"),
        )
        .doc("Updates the sync settings on a team folder or its contents. Use of this endpoint requires that the team has team selective sync enabled.")
        .scope(SCOPE_WRITE),
    )?;

    Ok(())
}
