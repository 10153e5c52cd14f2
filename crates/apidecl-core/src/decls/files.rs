//! `files`: the sync-setting and path types team folders and file requests refer to.

use crate::DeclError;
use crate::namespace::Namespace;
use crate::types::{AliasDef, DataType, Field, StructDef, UnionDef, Variant};

pub const NAMESPACE: &str = "files";

/// Path pattern accepted for file request destinations.
pub const PATH_PATTERN: &str = r"/(.|[\r\n])*";

pub fn namespace() -> Result<Namespace, DeclError> {
    let mut ns = Namespace::new(NAMESPACE)
        .with_doc("Subset of the file operations namespace referenced by team folders and file requests.");

    ns.declare(
        AliasDef::new("Path", DataType::string_with(None, None, Some(PATH_PATTERN)))
            .doc("An absolute path in the user's Dropbox."),
    )?;

    ns.declare(
        AliasDef::new("FileId", DataType::string_with(Some(4), None, Some("id:.+")))
            .doc("Identifier of a file or folder."),
    )?;

    ns.declare(
        UnionDef::open("SyncSetting")
            .variant(Variant::void("default").doc("On first sync to members' computers, the specified folder will follow its parent folder's setting or otherwise follow default sync behavior."))
            .variant(Variant::void("not_synced").doc("On first sync to members' computers, the specified folder will be set to not sync with selective sync."))
            .variant(Variant::void("not_synced_inactive").doc("The specified folder's not_synced setting is inactive due to its location or other configuration changes. It will follow its parent folder's setting.")),
    )?;

    ns.declare(
        UnionDef::open("SyncSettingArg")
            .variant(Variant::void("default").doc("On first sync to members' computers, the specified folder will follow its parent folder's setting or otherwise follow default sync behavior."))
            .variant(Variant::void("not_synced").doc("On first sync to members' computers, the specified folder will be set to not sync with selective sync.")),
    )?;

    ns.declare(
        StructDef::new("ContentSyncSetting")
            .field(Field::new("id", DataType::named("FileId")).doc("Id of the item this setting is applied to."))
            .field(Field::new("sync_setting", DataType::named("SyncSetting")).doc("Setting for this item.")),
    )?;

    ns.declare(
        StructDef::new("ContentSyncSettingArg")
            .field(Field::new("id", DataType::named("FileId")).doc("Id of the item this setting is applied to."))
            .field(Field::new("sync_setting", DataType::named("SyncSettingArg")).doc("Setting for this item.")),
    )?;

    ns.declare(
        UnionDef::open("SyncSettingsError")
            .variant(Variant::void("unsupported_combination").doc("Setting this combination of sync settings simultaneously is not supported."))
            .variant(Variant::void("unsupported_configuration").doc("The specified configuration is not supported.")),
    )?;

    Ok(ns)
}
