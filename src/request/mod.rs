pub mod types;
pub mod validation;

pub use types::{Industry, Stage, ValuationInput, ValuationRequest};
pub use validation::validate_request;

use anyhow::{Context, Result};
use std::io::Read;
use std::path::Path;

/// Load a valuation request from a YAML or JSON file.
///
/// `-` reads from stdin. Files ending in `.json` are parsed with serde_json;
/// everything else is treated as YAML.
pub fn load_request(path: &Path) -> Result<ValuationRequest> {
    if path.as_os_str() == "-" {
        let mut content = String::new();
        std::io::stdin()
            .read_to_string(&mut content)
            .context("Failed to read request from stdin")?;
        return parse_request(&content, false).context("Failed to parse request from stdin");
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read request file at {}", path.display()))?;
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    parse_request(&content, is_json)
        .with_context(|| format!("Failed to parse request in {}", path.display()))
}

/// Parse request text as JSON or YAML.
pub fn parse_request(content: &str, is_json: bool) -> Result<ValuationRequest> {
    if is_json {
        Ok(serde_json::from_str(content)?)
    } else {
        Ok(serde_saphyr::from_str(content)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    #[test]
    fn test_parse_json_request() {
        let json = r#"{"companyName":"Acme","industry":"biotech","stage":"idea","teamSize":2}"#;
        let request = parse_request(json, true).unwrap();
        assert_eq!(request.company_name.as_deref(), Some("Acme"));
        assert_eq!(request.stage.as_deref(), Some("idea"));
        assert_eq!(request.team_size, Some(2));
    }

    #[test]
    fn test_parse_json_wrong_type_fails() {
        let json = r#"{"teamSize":"many"}"#;
        assert!(parse_request(json, true).is_err());
    }

    #[test]
    fn test_load_request_from_yaml_file() {
        let path = env::temp_dir().join("startup_valuator_test_request.yaml");
        std::fs::write(
            &path,
            "companyName: Acme\nstage: growth\nfundingGoal: 5000\nmarketSize: \"500M\"\n",
        )
        .unwrap();

        let request = load_request(&path).unwrap();
        assert_eq!(request.market_size.as_deref(), Some("500M"));
        assert_eq!(request.funding_goal, Some(5000.0));

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_load_missing_file_fails() {
        let path = env::temp_dir().join("startup_valuator_test_no_such_request.yaml");
        let _ = std::fs::remove_file(&path);
        assert!(load_request(&path).is_err());
    }
}
