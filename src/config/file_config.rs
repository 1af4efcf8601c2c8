use crate::domain::credentials::CredentialPool;
use crate::utils::error::{ApollonatorError, Result};
use crate::utils::validation::{
    validate_non_empty_string, validate_required_field, validate_url, Validate,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_ENDPOINT: &str = "https://api.apollo.io/v1/people/match";

/// 設定檔最外層只有一個 `apollonator` 區塊
#[derive(Debug, Clone, Deserialize)]
struct ConfigFile {
    apollonator: Option<ApollonatorConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApollonatorConfig {
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub api_keys: Vec<String>,
    #[serde(default)]
    pub organization: String,
    /// 為 true 時，沒有查到 email 的人不寫入結果
    #[serde(default)]
    pub email: bool,
    /// Reserved: read but not used for filtering.
    #[serde(default)]
    pub title: bool,
    #[serde(default)]
    pub endpoint: Option<String>,
}

enum ConfigFormat {
    Yaml,
    Toml,
}

impl ConfigFormat {
    fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => ConfigFormat::Toml,
            _ => ConfigFormat::Yaml,
        }
    }
}

impl ApollonatorConfig {
    /// 從檔案載入並驗證配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let display = path.display().to_string();
        let content =
            std::fs::read_to_string(path).map_err(|source| ApollonatorError::ConfigReadError {
                path: display.clone(),
                source,
            })?;

        let config = match ConfigFormat::from_path(path) {
            ConfigFormat::Yaml => Self::from_yaml_str(&content),
            ConfigFormat::Toml => Self::from_toml_str(&content),
        }
        .map_err(|e| match e {
            ApollonatorError::ConfigParseError { message, .. } => {
                ApollonatorError::ConfigParseError {
                    path: display.clone(),
                    message,
                }
            }
            other => other,
        })?;

        config.validate()?;
        Ok(config)
    }

    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let processed_content = substitute_env_vars(content)?;
        let file: ConfigFile =
            serde_yaml::from_str(&processed_content).map_err(|e| {
                ApollonatorError::ConfigParseError {
                    path: "<inline>".to_string(),
                    message: format!("YAML parsing error: {}", e),
                }
            })?;
        Self::unwrap_section(file)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = substitute_env_vars(content)?;
        let file: ConfigFile =
            toml::from_str(&processed_content).map_err(|e| ApollonatorError::ConfigParseError {
                path: "<inline>".to_string(),
                message: format!("TOML parsing error: {}", e),
            })?;
        Self::unwrap_section(file)
    }

    fn unwrap_section(file: ConfigFile) -> Result<Self> {
        validate_required_field("apollonator", &file.apollonator).cloned()
    }

    /// `api_key` 在前，`api_keys` 依序在後；空字串與重複的 key 會被略過
    pub fn credentials(&self) -> Vec<String> {
        let mut keys: Vec<String> = Vec::new();
        for key in self.api_key.iter().chain(self.api_keys.iter()) {
            let key = key.trim();
            if !key.is_empty() && !keys.iter().any(|k| k == key) {
                keys.push(key.to_string());
            }
        }
        keys
    }

    pub fn credential_pool(&self) -> CredentialPool {
        CredentialPool::new(self.credentials())
    }

    pub fn endpoint(&self) -> &str {
        self.endpoint.as_deref().unwrap_or(DEFAULT_ENDPOINT)
    }
}

impl Validate for ApollonatorConfig {
    fn validate(&self) -> Result<()> {
        if self.credentials().is_empty() {
            return Err(ApollonatorError::MissingConfigError {
                field: "api_key".to_string(),
            });
        }

        validate_non_empty_string("organization", &self.organization)?;

        if let Some(endpoint) = &self.endpoint {
            validate_url("endpoint", endpoint)?;
        }

        Ok(())
    }
}

/// 替換環境變數 (例如 ${APOLLO_API_KEY})；找不到的變數保留原樣
fn substitute_env_vars(content: &str) -> Result<String> {
    use regex::Regex;
    let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| ApollonatorError::ConfigParseError {
        path: "<inline>".to_string(),
        message: e.to_string(),
    })?;

    let result = re.replace_all(content, |caps: &regex::Captures| {
        let var_name = &caps[1];
        std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
    });

    Ok(result.to_string())
}
