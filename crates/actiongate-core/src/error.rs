use thiserror::Error;

#[derive(Debug, Error)]
pub enum GateError {
    #[error("not initialized: run 'actiongate init'")]
    NotInitialized,

    #[error("unknown record kind: {0}")]
    UnknownRecordKind(String),

    #[error("invalid record name '{0}': must be alphanumeric with '.', '_' or '-'")]
    InvalidName(String),

    #[error("record not found: {kind} '{name}'")]
    RecordNotFound { kind: String, name: String },

    #[error("record already exists: {kind} '{name}'")]
    RecordExists { kind: String, name: String },

    #[error("action '{action}' is not available for {kind} '{name}'")]
    ActionUnavailable {
        kind: String,
        name: String,
        action: String,
    },

    #[error("procedure not found: {kind}.{procedure}")]
    ProcedureNotFound { kind: String, procedure: String },

    #[error("cannot {procedure} with status '{status}'")]
    InvalidTransition { procedure: String, status: String },

    #[error("remote procedure '{procedure}' failed: {message}")]
    RemoteProcedure { procedure: String, message: String },

    #[error("procedure '{procedure}' succeeded but reloading the record failed")]
    ReloadFailed {
        procedure: String,
        #[source]
        source: Box<GateError>,
    },

    #[error("navigation failed: {0}")]
    Navigation(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}

impl GateError {
    /// True for errors raised by the procedure side of an invocation, as
    /// opposed to local I/O or lookup failures in the host.
    pub fn is_remote(&self) -> bool {
        matches!(
            self,
            GateError::ProcedureNotFound { .. }
                | GateError::InvalidTransition { .. }
                | GateError::RemoteProcedure { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, GateError>;
