//! `file_requests`: collecting files from other people into a folder.

use crate::DeclError;
use crate::namespace::Namespace;
use crate::route::Route;
use crate::types::{AliasDef, DataType, DefaultValue, Field, IntKind, StructDef, UnionDef, Variant};

pub const NAMESPACE: &str = "file_requests";

const OWNER: &str = "dropbox-core-services";
const SCOPE_READ: &str = "file_requests.read";
const SCOPE_WRITE: &str = "file_requests.write";

pub fn namespace() -> Result<Namespace, DeclError> {
    let mut ns = Namespace::new(NAMESPACE).with_doc(
        "This namespace contains endpoints and data types for file request operations.",
    );

    declare_types(&mut ns)?;
    declare_errors(&mut ns)?;
    declare_routes(&mut ns)?;

    Ok(ns)
}

fn declare_types(ns: &mut Namespace) -> Result<(), DeclError> {
    ns.declare(
        AliasDef::new("FileRequestId", DataType::string_with(Some(1), None, Some("[-_0-9a-zA-Z]+")))
            .doc("A unique identifier for a file request."),
    )?;

    ns.declare(
        AliasDef::new("FileRequestValidationError", DataType::string().nullable())
            .doc("Reason a file request argument failed validation."),
    )?;

    ns.declare(UnionDef::open("GracePeriod").tags(&[
        "one_day",
        "two_days",
        "seven_days",
        "thirty_days",
        "always",
    ]))?;

    ns.declare(
        StructDef::new("FileRequestDeadline")
            .field(Field::new("deadline", DataType::timestamp()).doc("The deadline for this file request."))
            .field(
                Field::new("allow_late_uploads", DataType::named("GracePeriod").nullable())
                    .doc("If set, allow uploads after the deadline has passed. These uploads will be marked overdue."),
            ),
    )?;

    ns.declare(
        StructDef::new("FileRequest")
            .doc("A file request for receiving files into the user's Dropbox account.")
            .field(Field::new("id", DataType::named("FileRequestId")).doc("The ID of the file request."))
            .field(Field::new("url", DataType::string_with(Some(1), None, None)).doc("The URL of the file request."))
            .field(Field::new("title", DataType::string_with(Some(1), None, None)).doc("The title of the file request."))
            .field(Field::new("created", DataType::timestamp()).doc("When this file request was created."))
            .field(Field::new("is_open", DataType::boolean()).doc("Whether this file request is open. If closed, people will not be able to upload files to this file request."))
            .field(Field::new("file_count", DataType::int(IntKind::Int64)).doc("The number of files this file request has received."))
            .field(
                Field::new("destination", DataType::named("files.Path").nullable())
                    .doc("The path of the folder in the Dropbox where uploaded files will be sent. This can be None if the destination was removed. For apps with the app folder permission, this will be relative to the app folder."),
            )
            .field(Field::new("deadline", DataType::named("FileRequestDeadline").nullable()).doc("The deadline for this file request. Only set if the request has a deadline."))
            .field(Field::new("description", DataType::string().nullable()).doc("A description of the file request.")),
    )?;

    ns.declare(
        StructDef::new("CreateFileRequestArgs")
            .doc("Arguments for create.")
            .field(Field::new("title", DataType::string_with(Some(1), None, None)).doc("The title of the file request. Must not be empty."))
            .field(
                Field::new("destination", DataType::named("files.Path"))
                    .doc("The path of the folder in the Dropbox where uploaded files will be sent. For apps with the app folder permission, this will be relative to the app folder."),
            )
            .field(
                Field::new("deadline", DataType::named("FileRequestDeadline").nullable())
                    .doc("The deadline for the file request. Deadlines can only be set by Professional and Business accounts."),
            )
            .field(
                Field::new("open", DataType::boolean())
                    .doc("Whether or not the file request should be open. If the file request is closed, it will not accept any file submissions, but it can be opened later.")
                    .default(DefaultValue::Bool(true)),
            )
            .field(Field::new("description", DataType::string().nullable()).doc("A description of the file request.")),
    )?;

    ns.declare(
        StructDef::new("GetFileRequestArgs")
            .doc("Arguments for get.")
            .field(Field::new("id", DataType::named("FileRequestId")).doc("The ID of the file request to retrieve.")),
    )?;

    ns.declare(
        UnionDef::open("UpdateFileRequestDeadline")
            .variant(Variant::void("no_update").doc("Do not change the file request's deadline."))
            .variant(
                Variant::with("update", DataType::named("FileRequestDeadline").nullable())
                    .doc("If None, the file request's deadline is cleared."),
            ),
    )?;

    ns.declare(
        StructDef::new("UpdateFileRequestArgs")
            .doc("Arguments for update.")
            .field(Field::new("id", DataType::named("FileRequestId")).doc("The ID of the file request to update."))
            .field(Field::new("title", DataType::string_with(Some(1), None, None).nullable()).doc("The new title of the file request. Must not be empty."))
            .field(
                Field::new("destination", DataType::named("files.Path").nullable())
                    .doc("The new path of the folder in the Dropbox where uploaded files will be sent. For apps with the app folder permission, this will be relative to the app folder."),
            )
            .field(
                Field::new("deadline", DataType::named("UpdateFileRequestDeadline"))
                    .doc("The new deadline for the file request. Deadlines can only be set by Professional and Business accounts.")
                    .default(DefaultValue::Tag("no_update".to_string())),
            )
            .field(Field::new("open", DataType::boolean().nullable()).doc("Whether to set this file request as open or closed."))
            .field(Field::new("description", DataType::string().nullable()).doc("The description of the file request.")),
    )?;

    ns.declare(
        StructDef::new("DeleteFileRequestArgs")
            .doc("Arguments for delete.")
            .field(Field::new("ids", DataType::list(DataType::named("FileRequestId"))).doc("List IDs of the file requests to delete.")),
    )?;

    ns.declare(
        StructDef::new("DeleteFileRequestsResult")
            .doc("Result for delete.")
            .field(Field::new("file_requests", DataType::list(DataType::named("FileRequest"))).doc("The file requests deleted by the request.")),
    )?;

    ns.declare(
        StructDef::new("DeleteAllClosedFileRequestsResult")
            .doc("Result for delete_all_closed.")
            .field(Field::new("file_requests", DataType::list(DataType::named("FileRequest"))).doc("The file requests deleted for this user.")),
    )?;

    ns.declare(
        StructDef::new("CountFileRequestsResult")
            .doc("Result for count.")
            .field(Field::new("file_request_count", DataType::int(IntKind::UInt64)).doc("The number file requests owner by this user.")),
    )?;

    ns.declare(
        StructDef::new("ListFileRequestsArg")
            .doc("Arguments for list:2.")
            .field(
                Field::new("limit", DataType::int(IntKind::UInt64))
                    .doc("The maximum number of file requests that should be returned per request.")
                    .default(DefaultValue::UInt(1000)),
            ),
    )?;

    ns.declare(
        StructDef::new("ListFileRequestsResult")
            .doc("Result for list.")
            .field(Field::new("file_requests", DataType::list(DataType::named("FileRequest"))).doc("The file requests owned by this user. Apps with the app folder permission will only see file requests in their app folder.")),
    )?;

    ns.declare(
        StructDef::new("ListFileRequestsV2Result")
            .doc("Result for list:2 and list/continue.")
            .field(Field::new("file_requests", DataType::list(DataType::named("FileRequest"))).doc("The file requests owned by this user. Apps with the app folder permission will only see file requests in their app folder."))
            .field(Field::new("cursor", DataType::string()).doc("Pass the cursor into list/continue to obtain additional file requests."))
            .field(Field::new("has_more", DataType::boolean()).doc("Is true if there are additional file requests that have not been returned yet. An additional call to list/continue can retrieve them.")),
    )?;

    ns.declare(
        StructDef::new("ListFileRequestsContinueArg").field(
            Field::new("cursor", DataType::string())
                .doc("The cursor returned by the previous API call specified in the endpoint description."),
        ),
    )?;

    Ok(())
}

fn declare_errors(ns: &mut Namespace) -> Result<(), DeclError> {
    ns.declare(
        UnionDef::open("GeneralFileRequestsError")
            .doc("There is an error accessing the file requests functionality.")
            .variant(Variant::void("disabled_for_team").doc("This user's Dropbox Business team doesn't allow file requests.")),
    )?;

    ns.declare(
        UnionDef::open("FileRequestError")
            .extends("GeneralFileRequestsError")
            .doc("There is an error with the file request.")
            .variant(Variant::void("not_found").doc("This file request ID was not found."))
            .variant(Variant::void("not_a_folder").doc("The specified path is not a folder."))
            .variant(Variant::void("app_lacks_access").doc("This file request is not accessible to this app. Apps with the app folder permission can only access file requests in their app folder."))
            .variant(Variant::void("no_permission").doc("This user doesn't have permission to access or modify this file request."))
            .variant(Variant::void("email_unverified").doc("This user's email address is not verified. File requests are only available on accounts with a verified email address. Users can verify their email address here."))
            .variant(Variant::void("validation_error").doc("There was an error validating the request. For example, the title was invalid, or there were disallowed characters in the destination path.")),
    )?;

    ns.declare(
        UnionDef::open("CreateFileRequestError")
            .extends("FileRequestError")
            .doc("There was an error creating the file request.")
            .variant(Variant::void("invalid_location").doc("File requests are not available on the specified folder."))
            .variant(Variant::void("rate_limit").doc("The user has reached the rate limit for creating file requests. The limit is currently 4000 file requests total.")),
    )?;

    ns.declare(
        UnionDef::open("GetFileRequestError")
            .extends("FileRequestError")
            .doc("There was an error retrieving the specified file request."),
    )?;

    ns.declare(
        UnionDef::open("UpdateFileRequestError")
            .extends("FileRequestError")
            .doc("There is an error updating the file request."),
    )?;

    ns.declare(
        UnionDef::open("DeleteFileRequestError")
            .extends("FileRequestError")
            .doc("There was an error deleting these file requests.")
            .variant(Variant::void("file_request_open").doc("One or more file requests currently open.")),
    )?;

    ns.declare(
        UnionDef::open("DeleteAllClosedFileRequestsError")
            .extends("FileRequestError")
            .doc("There was an error deleting all closed file requests."),
    )?;

    ns.declare(
        UnionDef::open("CountFileRequestsError")
            .extends("GeneralFileRequestsError")
            .doc("There was an error counting the file requests."),
    )?;

    ns.declare(
        UnionDef::open("ListFileRequestsError")
            .extends("GeneralFileRequestsError")
            .doc("There was an error retrieving the file requests."),
    )?;

    ns.declare(
        UnionDef::open("ListFileRequestsContinueError")
            .extends("GeneralFileRequestsError")
            .doc("There was an error retrieving the file requests.")
            .variant(Variant::void("invalid_cursor").doc("The cursor is invalid.")),
    )?;

    Ok(())
}

fn declare_routes(ns: &mut Namespace) -> Result<(), DeclError> {
    let route = |name: &str, arg: DataType, result: &str, error: &str, scope: &str| {
        Route::new(name, arg, DataType::named(result), DataType::named(error))
            .owner(OWNER)
            .scope(scope)
    };

    ns.route(
        route("count", DataType::Void, "CountFileRequestsResult", "CountFileRequestsError", SCOPE_READ)
            .doc("Returns the total number of file requests owned by this user. Includes both open and closed file requests."),
    )?;

    ns.route(
        route("create", DataType::named("CreateFileRequestArgs"), "FileRequest", "CreateFileRequestError", SCOPE_WRITE)
            .doc("Creates a file request for this user."),
    )?;

    ns.route(
        route("delete", DataType::named("DeleteFileRequestArgs"), "DeleteFileRequestsResult", "DeleteFileRequestError", SCOPE_WRITE)
            .doc("Delete a batch of closed file requests."),
    )?;

    ns.route(
        route("delete_all_closed", DataType::Void, "DeleteAllClosedFileRequestsResult", "DeleteAllClosedFileRequestsError", SCOPE_WRITE)
            .doc("Delete all closed file requests owned by this user."),
    )?;

    ns.route(
        route("get", DataType::named("GetFileRequestArgs"), "FileRequest", "GetFileRequestError", SCOPE_READ)
            .doc("Returns the specified file request."),
    )?;

    ns.route(
        route("list", DataType::named("ListFileRequestsArg"), "ListFileRequestsV2Result", "ListFileRequestsError", SCOPE_READ)
            .version(2)
            .doc("Returns a list of file requests owned by this user. For apps with the app folder permission, this will only return file requests with destinations in the app folder."),
    )?;

    ns.route(
        route("list", DataType::Void, "ListFileRequestsResult", "ListFileRequestsError", SCOPE_READ)
            .doc("Returns a list of file requests owned by this user. For apps with the app folder permission, this will only return file requests with destinations in the app folder.")
            .deprecated_by(Some("list:2")),
    )?;

    ns.route(
        route(
            "list/continue",
            DataType::named("ListFileRequestsContinueArg"),
            "ListFileRequestsV2Result",
            "ListFileRequestsContinueError",
            SCOPE_READ,
        )
        .doc("Once a cursor has been retrieved from list:2, use this to paginate through all file requests. The cursor must come from a previous call to list:2 or list/continue."),
    )?;

    ns.route(
        route("update", DataType::named("UpdateFileRequestArgs"), "FileRequest", "UpdateFileRequestError", SCOPE_WRITE)
            .doc("Update a file request."),
    )?;

    Ok(())
}
