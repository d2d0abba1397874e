use derive_more::From;
use serde::Serialize;

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug, From)]
pub enum Error {
    // -- Input
    MissingDomain,
    InvalidDomainFormat(String),

    // -- Usage
    Config(String),
    CliUsage(String),

    // -- Infrastructure
    ResolverUnavailable(String),

    #[from]
    Resolve(hickory_resolver::error::ResolveError),

    #[from]
    SystemTime(std::time::SystemTimeError),

    #[from]
    File(std::io::Error),

    #[from]
    Json(serde_json::Error),

    #[from]
    Fmt(std::fmt::Error),

    #[from]
    TimeFormat(time::error::Format),

    #[from]
    Tracing(tracing::subscriber::SetGlobalDefaultError),
}

impl Error {
    /// Errors caused by the caller's input rather than by the resolver or the host.
    pub fn is_client_fault(&self) -> bool {
        matches!(
            self,
            Error::MissingDomain
                | Error::InvalidDomainFormat(_)
                | Error::Config(_)
                | Error::CliUsage(_)
        )
    }

    pub fn message(&self) -> String {
        match self {
            Error::MissingDomain => "Domain is required".to_string(),
            Error::InvalidDomainFormat(_) => "Invalid domain format".to_string(),
            Error::Config(msg) | Error::CliUsage(msg) => msg.clone(),
            Error::ResolverUnavailable(reason) => format!("DNS resolver unavailable: {reason}"),
            other => other.to_string(),
        }
    }
}

/// Body emitted at the outer boundary when a request fails.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl From<&Error> for ErrorResponse {
    fn from(err: &Error) -> Self {
        Self {
            error: err.message(),
        }
    }
}

// region:    --- Error Boilerplate

impl core::fmt::Display for Error {
    fn fmt(&self, fmt: &mut core::fmt::Formatter) -> core::result::Result<(), core::fmt::Error> {
        write!(fmt, "{self:?}")
    }
}

impl std::error::Error for Error {}

// endregion: --- Error Boilerplate

#[cfg(test)]
mod tests {
    use super::{Error, ErrorResponse};

    #[test]
    fn input_errors_are_client_faults() {
        assert!(Error::MissingDomain.is_client_fault());
        assert!(Error::InvalidDomainFormat("bad..name".into()).is_client_fault());
        assert!(!Error::ResolverUnavailable("no route".into()).is_client_fault());
    }

    #[test]
    fn error_response_body() {
        let body = ErrorResponse::from(&Error::InvalidDomainFormat("x".into()));
        let json = serde_json::to_string(&body).unwrap();
        assert_eq!(json, r#"{"error":"Invalid domain format"}"#);
    }
}
