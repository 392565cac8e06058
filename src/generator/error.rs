use super::markdown::FrontMatterError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort a build.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("output directory `{}` is empty after the build", .0.display())]
    EmptyOutput(PathBuf),

    #[error("generator `{0}` not found on PATH")]
    GeneratorNotFound(String),

    #[error("build interrupted")]
    Interrupted,

    #[error("invalid document `{}`", .path.display())]
    InvalidDocument {
        path: PathBuf,
        #[source]
        source: FrontMatterError,
    },

    #[error(
        "`{}` and `{}` both render to `{}`",
        .first.display(),
        .second.display(),
        .output.display()
    )]
    OutputConflict {
        output: PathBuf,
        first: PathBuf,
        second: PathBuf,
    },
}
