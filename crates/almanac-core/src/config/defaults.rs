//! Default configuration values

/// Default configuration file name (TOML)
pub const DEFAULT_CONFIG_TOML: &str = "almanac.toml";

/// Default configuration file name (YAML)
pub const DEFAULT_CONFIG_YAML: &str = "almanac.yaml";

/// Get list of config file names to search for
pub fn config_file_names() -> Vec<&'static str> {
    vec![
        DEFAULT_CONFIG_TOML,
        DEFAULT_CONFIG_YAML,
        "almanac.yml",
        ".almanac.toml",
        ".almanac.yaml",
    ]
}

/// Default configuration template
pub const DEFAULT_CONFIG_TEMPLATE: &str = r#"# Almanac Configuration

[parser]
mode = "loose"

[changelog]
tag_prefixes = ["v"]
include_types = ["feat", "fix"]
"#;
