use std::fmt;
use std::io;

/// Errors surfaced by the codec.
///
/// Every variant carries enough context to locate the failure: the offending
/// token for input errors, byte offsets for stream and container errors,
/// entity ids (in the message) for registry errors. Nothing is recovered
/// silently; callers discard partial output on error.
#[derive(Debug)]
pub enum Error {
    /// The IAST input contains something outside the supported alphabet.
    Input { token: String, position: usize },
    /// An algebra operation was applied to a byte outside its domain.
    Domain { op: &'static str, byte: u8 },
    /// Malformed container framing (magic, version, flags, chunk lengths).
    Container { offset: usize, reason: String },
    /// Malformed span inside a chunk payload (SAṄKHYĀ, NUM, META).
    Span { offset: usize, reason: String },
    /// Registry load, merge, or reference resolution failure.
    Registry(String),
    /// The decoder reached a transition that cannot occur. Always a bug.
    Invariant(&'static str),
    /// Underlying I/O failure.
    Io(io::Error),
}

impl Error {
    /// Process exit code for this error when surfaced by the CLI.
    ///
    /// 1 = user error, 2 = format error, 3 = I/O error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Input { .. } | Error::Domain { .. } => 1,
            Error::Container { .. }
            | Error::Span { .. }
            | Error::Registry(_)
            | Error::Invariant(_) => 2,
            Error::Io(_) => 3,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Input { token, position } => {
                write!(f, "unrecognized input '{}' at character {}", token, position)
            }
            Error::Domain { op, byte } => {
                write!(f, "{} is not defined for byte 0x{:02X}", op, byte)
            }
            Error::Container { offset, reason } => {
                write!(f, "container error at offset {}: {}", offset, reason)
            }
            Error::Span { offset, reason } => {
                write!(f, "stream error at offset {}: {}", offset, reason)
            }
            Error::Registry(reason) => write!(f, "registry error: {}", reason),
            Error::Invariant(what) => write!(f, "internal invariant violated: {}", what),
            Error::Io(err) => write!(f, "i/o error: {}", err),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::Io(err)
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        let input = Error::Input {
            token: "x".into(),
            position: 0,
        };
        assert_eq!(input.exit_code(), 1);

        let container = Error::Container {
            offset: 0,
            reason: "bad magic".into(),
        };
        assert_eq!(container.exit_code(), 2);

        let io = Error::Io(io::Error::new(io::ErrorKind::NotFound, "gone"));
        assert_eq!(io.exit_code(), 3);
    }

    #[test]
    fn test_display_carries_offset() {
        let err = Error::Span {
            offset: 42,
            reason: "unterminated digit-pada".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("42"));
        assert!(msg.contains("unterminated"));
    }
}
