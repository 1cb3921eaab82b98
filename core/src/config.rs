use camino::{Utf8Path as Path, Utf8PathBuf as PathBuf};
use color_eyre::eyre::{bail, Context, Result};
use serde::Deserialize;

use crate::model::{ActorContext, Department, Role};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
struct TomlApi {
    base_url: String,
    upload_url: Option<String>,
    library_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
struct TomlActor {
    role: String,
    department: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
struct TomlAuth {
    token: Option<String>,
    token_file: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
struct TomlConfig {
    #[serde(rename = "Api")]
    pub api: TomlApi,
    #[serde(rename = "Actor")]
    pub actor: TomlActor,
    #[serde(rename = "Auth")]
    pub auth: Option<TomlAuth>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub base_url: String,
    pub upload_url: String,
    pub library_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthConfig {
    None,
    Token(String),
    /// Absolute, or resolved against the directory containing the config file
    TokenFile(PathBuf),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub api: ApiConfig,
    pub actor: ActorContext,
    pub auth: AuthConfig,
}

pub async fn read_config(path: &Path) -> Result<Config> {
    let toml_str = tokio::fs::read_to_string(path)
        .await
        .context(format!("Error reading config file {}", path))?;
    let config_dir = path.parent().unwrap_or_else(|| Path::new("."));
    parse_config(&toml_str, config_dir)
}

pub fn parse_config(toml_str: &str, config_dir: &Path) -> Result<Config> {
    let toml_config: TomlConfig = toml::from_str(toml_str).context("Error parsing config file")?;
    let base_url = toml_config.api.base_url.trim_end_matches('/').to_owned();
    if base_url.is_empty() {
        bail!("Api.base_url can not be empty");
    }
    let api = ApiConfig {
        upload_url: toml_config
            .api
            .upload_url
            .unwrap_or_else(|| format!("{}/upload", base_url)),
        library_url: toml_config
            .api
            .library_url
            .unwrap_or_else(|| format!("{}/upload/list", base_url)),
        base_url,
    };
    let role: Role = toml_config
        .actor
        .role
        .parse()
        .context(format!("Unknown role '{}'", toml_config.actor.role))?;
    let department = toml_config
        .actor
        .department
        .filter(|department| !department.is_empty())
        .map(Department::from);
    let actor = ActorContext::new(role, department).context("Invalid Actor section")?;
    let auth = match toml_config.auth {
        None => AuthConfig::None,
        Some(TomlAuth {
            token: Some(_),
            token_file: Some(_),
        }) => bail!("Auth.token and Auth.token_file are mutually exclusive"),
        Some(TomlAuth {
            token: Some(token),
            token_file: None,
        }) => AuthConfig::Token(token),
        Some(TomlAuth {
            token: None,
            token_file: Some(token_file),
        }) => {
            let token_file = PathBuf::from(token_file);
            if token_file.is_absolute() {
                AuthConfig::TokenFile(token_file)
            } else {
                AuthConfig::TokenFile(config_dir.join(token_file))
            }
        }
        Some(TomlAuth {
            token: None,
            token_file: None,
        }) => AuthConfig::None,
    };
    Ok(Config { api, actor, auth })
}

#[cfg(test)]
mod test {
    use claims::assert_err;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn defaults_asset_urls_from_base() {
        let config = parse_config(
            r#"
[Api]
base_url = "http://localhost:5000/api/"

[Actor]
role = "department_admin"
department = "CSE"

[Auth]
token_file = "token"
"#,
            Path::new("/etc/curator"),
        )
        .unwrap();
        assert_eq!(
            config.api,
            ApiConfig {
                base_url: "http://localhost:5000/api".to_owned(),
                upload_url: "http://localhost:5000/api/upload".to_owned(),
                library_url: "http://localhost:5000/api/upload/list".to_owned(),
            }
        );
        assert_eq!(config.actor, ActorContext::department_admin("CSE"));
        assert_eq!(
            config.auth,
            AuthConfig::TokenFile(PathBuf::from("/etc/curator/token"))
        );
    }

    #[test]
    fn department_admin_without_department_is_rejected() {
        assert_err!(parse_config(
            r#"
[Api]
base_url = "http://localhost:5000/api"

[Actor]
role = "department_admin"
"#,
            Path::new("."),
        ));
    }

    #[test]
    fn unknown_role_is_rejected() {
        assert_err!(parse_config(
            r#"
[Api]
base_url = "http://localhost:5000/api"

[Actor]
role = "janitor"
"#,
            Path::new("."),
        ));
    }

    #[tokio::test]
    async fn read_config_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = PathBuf::from_path_buf(dir.path().join("curator.toml")).unwrap();
        tokio::fs::write(
            &path,
            r#"
[Api]
base_url = "https://cms.example.edu/api"
upload_url = "https://assets.example.edu/upload"

[Actor]
role = "super_admin"

[Auth]
token = "secret"
"#,
        )
        .await
        .unwrap();
        let config = read_config(&path).await.unwrap();
        assert_eq!(config.api.upload_url, "https://assets.example.edu/upload");
        assert_eq!(config.actor.restricted_department(), None);
        assert_eq!(config.auth, AuthConfig::Token("secret".to_owned()));
    }
}
