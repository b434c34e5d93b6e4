use std::path::PathBuf;

/// Errors surfaced by the core engine.
///
/// Transient OS-call failures arrive here as [`Error::Native`] and are
/// normally logged and swallowed by the caller. Precondition refusals are
/// never errors; they are typed return values.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("{}: {source}", path.display())]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("{}: {source}", path.display())]
    TomlWrite {
        path: PathBuf,
        #[source]
        source: toml::ser::Error,
    },

    #[error("could not determine the config directory")]
    NoConfigDir,

    #[error("invalid favorite: {0}")]
    InvalidFavorite(String),

    #[error("{}: file failed to load earlier, fix or delete it before saving", path.display())]
    UnreadableFavorites { path: PathBuf },

    #[error("{call} failed: {message}")]
    Native { call: &'static str, message: String },
}

impl Error {
    /// Builds an I/O error tagged with the file it concerns.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Builds a native-call error from anything printable.
    pub fn native(call: &'static str, message: impl ToString) -> Self {
        Self::Native {
            call,
            message: message.to_string(),
        }
    }

    /// Returns true if this is an I/O "not found" error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Io { source, .. } if source.kind() == std::io::ErrorKind::NotFound)
    }
}

pub type Result<T> = std::result::Result<T, Error>;
