//! Value parsers for CLI arguments

use std::fs;
use std::net::IpAddr;
use std::path::PathBuf;

/// Upper bound for `migrate --rollback`
pub const MAX_ROLLBACK_STEPS: u32 = 100;

/// Port number between 1 and 65535
pub fn validate_port(port_str: &str) -> Result<u16, String> {
    let port: u16 = port_str.parse().map_err(|_| {
        format!(
            "Port must be a valid number between 1 and 65535, got: '{}'",
            port_str
        )
    })?;
    if port == 0 {
        return Err("Port must be between 1 and 65535. Port 0 is not allowed.".to_string());
    }
    Ok(port)
}

/// Existing, readable regular file
pub fn validate_config_file_path(path_str: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(path_str);
    if !path.exists() {
        return Err(format!("Configuration file does not exist: '{}'", path_str));
    }
    if !path.is_file() {
        return Err(format!("Configuration path is not a file: '{}'", path_str));
    }
    fs::File::open(&path)
        .map(|_| path)
        .map_err(|e| format!("Cannot read configuration file '{}': {}", path_str, e))
}

/// Rollback steps between 1 and [`MAX_ROLLBACK_STEPS`]
pub fn validate_rollback_steps(steps_str: &str) -> Result<u32, String> {
    let steps: u32 = steps_str.parse().map_err(|_| {
        format!(
            "Rollback steps must be a valid positive number, got: '{}'",
            steps_str
        )
    })?;
    if steps == 0 {
        return Err("Rollback steps must be greater than 0".to_string());
    }
    if steps > MAX_ROLLBACK_STEPS {
        return Err(format!(
            "Rollback steps cannot exceed {} for safety reasons",
            MAX_ROLLBACK_STEPS
        ));
    }
    Ok(steps)
}

/// IP address or hostname
pub fn validate_host_address(host_str: &str) -> Result<String, String> {
    let host = host_str.trim();
    if host.is_empty() {
        return Err("Host address cannot be empty".to_string());
    }
    if host.parse::<IpAddr>().is_ok() {
        return Ok(host.to_string());
    }
    // Dotted digits that did not parse as an address are a malformed IPv4.
    if host.chars().all(|c| c.is_ascii_digit() || c == '.') {
        return Err(format!("Invalid IPv4 address format: '{}'", host_str));
    }
    if host.len() > 253 {
        return Err("Host address is too long (maximum 253 characters)".to_string());
    }
    let valid_label = |label: &str| {
        !label.is_empty()
            && label.len() <= 63
            && !label.starts_with('-')
            && !label.ends_with('-')
            && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
    };
    if !host.split('.').all(valid_label) {
        return Err(format!("Invalid hostname: '{}'", host_str));
    }
    Ok(host.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_port_validation() {
        assert_eq!(validate_port("1"), Ok(1));
        assert_eq!(validate_port("8080"), Ok(8080));
        assert_eq!(validate_port("65535"), Ok(65535));
        assert!(validate_port("0").is_err());
        assert!(validate_port("65536").is_err());
        assert!(validate_port("http").is_err());
    }

    #[test]
    fn test_host_validation_valid_hosts() {
        for host in ["localhost", "0.0.0.0", "127.0.0.1", "::1", "api.ledger.internal"] {
            assert_eq!(validate_host_address(host), Ok(host.to_string()), "{host}");
        }
        assert_eq!(validate_host_address("  localhost "), Ok("localhost".to_string()));
    }

    #[test]
    fn test_host_validation_invalid_hosts() {
        for host in ["", "   ", "256.1.1.1", "1.2.3", "bad host", "-edge.example"] {
            assert!(validate_host_address(host).is_err(), "{host}");
        }
    }

    #[test]
    fn test_rollback_steps_validation() {
        assert_eq!(validate_rollback_steps("1"), Ok(1));
        assert_eq!(validate_rollback_steps("100"), Ok(100));
        assert!(validate_rollback_steps("0").is_err());
        assert!(validate_rollback_steps("101").is_err());
        assert!(validate_rollback_steps("-3").is_err());
    }

    #[test]
    fn test_config_file_path_validation() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[server]\nport = 3000").unwrap();
        let path = file.path().to_str().unwrap();
        assert_eq!(validate_config_file_path(path), Ok(PathBuf::from(path)));

        let dir = tempfile::tempdir().unwrap();
        assert!(validate_config_file_path(dir.path().to_str().unwrap()).is_err());
        assert!(validate_config_file_path("/definitely/not/here.toml").is_err());
    }
}
