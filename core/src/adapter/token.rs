use async_trait::async_trait;
use camino::Utf8PathBuf as PathBuf;
use enum_dispatch::enum_dispatch;
use tracing::instrument;

/// Supplies the bearer credential the asset store requires.
#[async_trait]
#[enum_dispatch(Credentials)]
pub trait TokenSource {
    async fn bearer(&self) -> Option<String>;
}

#[enum_dispatch]
#[derive(Debug, Clone)]
pub enum Credentials {
    StaticToken,
    TokenFile,
}

#[derive(Debug, Clone, Default)]
pub struct StaticToken(pub Option<String>);

/// Token kept in a file by whatever signs the operator in. Read on every request
/// so a refreshed token is picked up without restarting.
#[derive(Debug, Clone)]
pub struct TokenFile {
    path: PathBuf,
}

impl TokenFile {
    pub fn new(path: PathBuf) -> TokenFile {
        TokenFile { path }
    }
}

#[async_trait]
impl TokenSource for StaticToken {
    async fn bearer(&self) -> Option<String> {
        self.0.clone().filter(|token| !token.is_empty())
    }
}

#[async_trait]
impl TokenSource for TokenFile {
    #[instrument(skip(self), level = "debug")]
    async fn bearer(&self) -> Option<String> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => {
                let token = contents.trim();
                (!token.is_empty()).then(|| token.to_owned())
            }
            Err(err) => {
                tracing::warn!(path = %self.path, %err, "could not read token file");
                None
            }
        }
    }
}

#[cfg(test)]
mod test {
    use std::io::Write;

    use super::*;

    #[tokio::test]
    async fn token_file_is_trimmed() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "  abc.def  ").unwrap();
        let path = PathBuf::from_path_buf(file.path().to_owned()).unwrap();
        let credentials: Credentials = TokenFile::new(path).into();
        assert_eq!(credentials.bearer().await, Some("abc.def".to_owned()));
    }

    #[tokio::test]
    async fn missing_or_empty_token_is_none() {
        let credentials: Credentials = TokenFile::new(PathBuf::from("/does/not/exist")).into();
        assert_eq!(credentials.bearer().await, None);
        let credentials: Credentials = StaticToken(Some(String::new())).into();
        assert_eq!(credentials.bearer().await, None);
    }
}
