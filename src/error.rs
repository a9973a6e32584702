/// Errors raised while parsing or evaluating a query.
#[derive(Debug)]
pub enum Error {
    /// Malformed query text: a grammar position's expected token was absent.
    /// Aborts the whole parse with no partial result.
    Syntax(String),

    /// The right-hand side of a LIKE did not compile as a regular
    /// expression. Surfaces at evaluation time, not parse time.
    Pattern(regex::Error),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Syntax(msg) => write!(f, "syntax error: {}", msg),
            Error::Pattern(e) => write!(f, "invalid LIKE pattern: {}", e),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Pattern(e) => Some(e),
            Error::Syntax(_) => None,
        }
    }
}
