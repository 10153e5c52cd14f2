//! `async`: launch/poll building blocks shared by long-running routes.

use crate::DeclError;
use crate::namespace::Namespace;
use crate::types::{AliasDef, DataType, Field, StructDef, UnionDef, Variant};

pub const NAMESPACE: &str = "async";

pub fn namespace() -> Result<Namespace, DeclError> {
    let mut ns = Namespace::new(NAMESPACE).with_doc(
        "Shared types for operations that may complete later. A launch route returns \
         either a completed result or a job identifier; a paired poll route reports on \
         the job.",
    );

    ns.declare(
        AliasDef::new("AsyncJobId", DataType::string_with(Some(1), None, None))
            .doc("Identifier of an asynchronous job."),
    )?;

    ns.declare(
        UnionDef::open("LaunchResultBase")
            .doc(
                "Result returned by methods that launch an asynchronous job. Subtypes add \
                 a tag for the case where the job finished synchronously.",
            )
            .variant(
                Variant::with("async_job_id", DataType::named("AsyncJobId"))
                    .doc("This response indicates that the processing is asynchronous. The string is an id that can be used to obtain the status of the asynchronous job."),
            ),
    )?;

    ns.declare(
        UnionDef::open("LaunchEmptyResult")
            .extends("LaunchResultBase")
            .doc("Result returned by methods that may either launch an asynchronous job or complete synchronously. Upon synchronous completion of the job, no additional information is returned.")
            .variant(Variant::void("complete").doc("The job finished synchronously and successfully.")),
    )?;

    ns.declare(
        StructDef::new("PollArg")
            .doc("Arguments for methods that poll the status of an asynchronous job.")
            .field(
                Field::new("async_job_id", DataType::named("AsyncJobId"))
                    .doc("Id of the asynchronous job. This is the value of a response returned from the method that launched the job."),
            ),
    )?;

    ns.declare(
        UnionDef::open("PollResultBase")
            .doc("Result returned by methods that poll for the status of an asynchronous job. Subtypes add a tag for the completed state.")
            .variant(Variant::void("in_progress").doc("The asynchronous job is still in progress.")),
    )?;

    ns.declare(
        UnionDef::open("PollEmptyResult")
            .extends("PollResultBase")
            .doc("Result returned by methods that poll for the status of an asynchronous job. Upon completion of the job, no additional information is returned.")
            .variant(Variant::void("complete").doc("The asynchronous job has completed successfully.")),
    )?;

    ns.declare(
        UnionDef::open("PollError")
            .doc("Error returned by methods for polling the status of asynchronous job.")
            .variant(Variant::void("invalid_async_job_id").doc("The job ID is invalid."))
            .variant(Variant::void("internal_error").doc("Something went wrong with the job on Dropbox's end. You'll need to verify that the action you were taking succeeded, and if not, try again. This should happen very rarely.")),
    )?;

    Ok(ns)
}
