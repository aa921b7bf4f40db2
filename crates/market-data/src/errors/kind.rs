use std::fmt;

/// Classification of a fetch failure.
///
/// The fetch pipeline does not retry, so this only decides how a failure is
/// reported. Every error raised while fetching or persisting one symbol maps
/// onto exactly one of these.
///
/// | Kind | Raised by |
/// |------|-----------|
/// | `Network` | catalog or provider unreachable, timeout, non-success HTTP status |
/// | `Parse` | malformed catalog or provider payload |
/// | `Persistence` | store write failure |
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum FailureKind {
    Network,
    Parse,
    Persistence,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::Network => write!(f, "network"),
            FailureKind::Parse => write!(f, "parse"),
            FailureKind::Persistence => write!(f, "persistence"),
        }
    }
}
