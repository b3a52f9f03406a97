use crate::config::ArchiveConfig;
use crate::utils::error::{Result, StormError};
use crate::utils::validation::{
    validate_non_empty_string, validate_positive_number, validate_range, validate_url, Validate,
};
use regex::{Captures, Regex};
use std::path::Path;

impl ArchiveConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置（未設定的欄位使用預設值）
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| StormError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${ARCHIVE_ROOT})，找不到的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| StormError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.into_owned())
    }
}

impl Validate for ArchiveConfig {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("http.user_agent", &self.http.user_agent)?;
        if let Some(timeout) = self.http.timeout_seconds {
            validate_positive_number("http.timeout_seconds", timeout, 1)?;
        }

        validate_url("nhc.index_url", &self.nhc.index_url)?;
        validate_url("nhc.archive_root", &self.nhc.archive_root)?;
        validate_url("nhc.current_forecast_root", &self.nhc.current_forecast_root)?;
        validate_url(
            "nhc.current_best_track_root",
            &self.nhc.current_best_track_root,
        )?;

        validate_url("spc.climo_root", &self.spc.climo_root)?;
        validate_url("spc.bulk_urls.tornado", &self.spc.bulk_urls.tornado)?;
        validate_url("spc.bulk_urls.hail", &self.spc.bulk_urls.hail)?;
        validate_url("spc.bulk_urls.wind", &self.spc.bulk_urls.wind)?;
        validate_range(
            "spc.era_boundary_year",
            self.spc.era_boundary_year,
            1950,
            2100,
        )?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_ERA_BOUNDARY_YEAR;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults_are_valid() {
        let config = ArchiveConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.spc.era_boundary_year, DEFAULT_ERA_BOUNDARY_YEAR);
        assert!(config.spc.bulk_urls.tornado.ends_with("1950-2017_torn.csv"));
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let toml_content = r#"
[nhc]
archive_root = "http://localhost:9000/archive"
current_season = 2019

[spc]
era_boundary_year = 2018
"#;

        let config = ArchiveConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.nhc.archive_root, "http://localhost:9000/archive");
        assert_eq!(config.nhc.current_season(), 2019);
        assert_eq!(config.spc.era_boundary_year, 2018);
        assert_eq!(
            config.nhc.index_url,
            "https://ftp.nhc.noaa.gov/atcf/index/storm_list.txt"
        );
        assert_eq!(config.http, crate::config::HttpConfig::default());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("STORMFETCH_TEST_CLIMO_ROOT", "https://mirror.example.com/reports");

        let toml_content = r#"
[spc]
climo_root = "${STORMFETCH_TEST_CLIMO_ROOT}"
"#;

        let config = ArchiveConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.spc.climo_root, "https://mirror.example.com/reports");

        std::env::remove_var("STORMFETCH_TEST_CLIMO_ROOT");
    }

    #[test]
    fn test_config_validation() {
        let toml_content = r#"
[spc.bulk_urls]
hail = "not-a-url"
"#;

        let config = ArchiveConfig::from_toml_str(toml_content).unwrap();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("spc.bulk_urls.hail"));
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let result = ArchiveConfig::from_toml_str("[nhc\nindex_url = 1");
        assert!(matches!(result, Err(StormError::ConfigError { .. })));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();

        let toml_content = r#"
[http]
user_agent = "storm-research/1.0"
timeout_seconds = 45
"#;

        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let config = ArchiveConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.http.user_agent, "storm-research/1.0");
        assert_eq!(config.http.timeout_seconds, Some(45));
    }
}
