//! Configuration commands.

use std::io::Write;
use std::path::Path;

use crate::config::CliConfig;
use crate::error::CliResult;

/// Dumps the effective configuration as TOML.
pub fn dump(config: &CliConfig, path: &Path, out: &mut impl Write) -> CliResult<()> {
    let toml_str = config.to_toml()?;
    writeln!(out, "# config.toml ({})", path.display())?;
    writeln!(out, "{}", toml_str)?;
    Ok(())
}

/// Validates the configuration.
pub fn validate(config: &CliConfig, out: &mut impl Write) -> CliResult<()> {
    config.validate()?;
    writeln!(out, "Configuration is valid.")?;
    Ok(())
}

/// Shows the configuration file path.
pub fn path(path: &Path, out: &mut impl Write) -> CliResult<()> {
    writeln!(out, "config: {}", path.display())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CliError;

    #[test]
    fn dump_prints_both_tables() {
        let mut out = Vec::new();
        dump(&CliConfig::default(), Path::new("/tmp/maxxfan.toml"), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.starts_with("# config.toml (/tmp/maxxfan.toml)"));
        assert!(text.contains("repeat_count = 4"));
        assert!(text.contains("protocol = \"maxxfan\""));
        assert!(text.contains("fan_speed = 10"));
    }

    #[test]
    fn validate_reports_invalid_command() {
        let config: CliConfig = toml::from_str("[command]\nauto_temperature = 10\n").unwrap();
        let mut out = Vec::new();
        let err = validate(&config, &mut out).unwrap_err();
        assert!(matches!(err, CliError::Command(_)));
        assert!(out.is_empty());
    }

    #[test]
    fn path_prints_location() {
        let mut out = Vec::new();
        path(Path::new("/etc/maxxfan.toml"), &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "config: /etc/maxxfan.toml\n");
    }
}
