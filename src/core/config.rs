use std::path::Path;

use crate::error::{Error, Result};
use crate::target::Target;

/// Parse a target definition from a JSON spec.
pub fn parse_target(json_spec: &str) -> Result<Target> {
    serde_json::from_str(json_spec)
        .map_err(|e| Error::validation_invalid_json(e, Some("target definition".to_string())))
}

/// Load a target definition from a JSON file.
pub fn load_target(path: &Path) -> Result<Target> {
    let contents = std::fs::read_to_string(path).map_err(|e| {
        Error::internal_io(
            e.to_string(),
            Some(format!("read target definition {}", path.display())),
        )
    })?;

    serde_json::from_str(&contents)
        .map_err(|e| Error::config_invalid_json(path.display().to_string(), e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_target_reads_camel_case_fields() {
        let target = parse_target(
            r#"{
                "isLocal": false,
                "host": "web01.example.com",
                "credentials": { "username": "deploy", "password": "pw" },
                "encryptionSecret": "s3cret"
            }"#,
        )
        .unwrap();

        assert!(!target.is_local);
        assert_eq!(target.host.as_deref(), Some("web01.example.com"));
        assert!(target.has_credentials());
        assert!(target.has_encryption_secret());
    }

    #[test]
    fn parse_target_defaults_to_local() {
        let target = parse_target("{}").unwrap();
        assert!(target.is_local);
        assert!(!target.has_credentials());
    }

    #[test]
    fn parse_target_rejects_invalid_json() {
        let err = parse_target("{not json").unwrap_err();
        assert_eq!(err.code, crate::error::ErrorCode::ValidationInvalidJson);
    }
}
