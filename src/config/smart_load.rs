use figment::providers::{Format, Json, Toml, Yaml};
use std::path::Path;

/// Configuration file loader that chooses the format from the file extension.
/// Returns a provider that can be directly used with figment.merge()
pub fn auto<P: AsRef<Path>>(path: P) -> impl figment::Provider {
    let path = path.as_ref();
    let extension = path.extension().and_then(|ext| ext.to_str()).unwrap_or("");

    match extension.to_lowercase().as_str() {
        "toml" => SmartProvider::Toml(Toml::file(path)),
        "json" => SmartProvider::Json(Json::file(path)),
        "yaml" | "yml" => SmartProvider::Yaml(Yaml::file(path)),
        _ => {
            let format = std::fs::read_to_string(path)
                .ok()
                .and_then(|content| detect_format_from_content(&content));
            tracing::debug!(
                "Config {} has no known extension, using {}",
                path.display(),
                format.unwrap_or("toml")
            );
            match format {
                Some("json") => SmartProvider::Json(Json::file(path)),
                Some("yaml") => SmartProvider::Yaml(Yaml::file(path)),
                _ => SmartProvider::Toml(Toml::file(path)),
            }
        }
    }
}

/// Wrapper enum to handle different provider types
enum SmartProvider {
    Toml(figment::providers::Data<Toml>),
    Json(figment::providers::Data<Json>),
    Yaml(figment::providers::Data<Yaml>),
}

impl figment::Provider for SmartProvider {
    fn metadata(&self) -> figment::Metadata {
        match self {
            SmartProvider::Toml(p) => p.metadata(),
            SmartProvider::Json(p) => p.metadata(),
            SmartProvider::Yaml(p) => p.metadata(),
        }
    }

    fn data(
        &self,
    ) -> Result<figment::value::Map<figment::Profile, figment::value::Dict>, figment::Error> {
        match self {
            SmartProvider::Toml(p) => p.data(),
            SmartProvider::Json(p) => p.data(),
            SmartProvider::Yaml(p) => p.data(),
        }
    }
}

/// Attempt to detect configuration format from file content
fn detect_format_from_content(content: &str) -> Option<&'static str> {
    let trimmed = content.trim();

    if (trimmed.starts_with('{') && trimmed.ends_with('}'))
        || (trimmed.starts_with('[') && trimmed.ends_with(']') && !trimmed.contains('='))
    {
        return Some("json");
    }

    // TOML: [section] headers or key = value
    if trimmed.lines().any(|line| {
        let line = line.trim();
        (line.starts_with('[') && line.ends_with(']')) || (line.contains('=') && !line.contains(':'))
    }) {
        return Some("toml");
    }

    // YAML: document separator or key: value
    if trimmed.contains("---") || trimmed.lines().any(|line| line.trim().contains(':')) {
        return Some("yaml");
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_detection() {
        assert_eq!(detect_format_from_content(r#"{"scan": {"field": 2}}"#), Some("json"));
        assert_eq!(detect_format_from_content("scan:\n  field: 2"), Some("yaml"));
        assert_eq!(detect_format_from_content("[scan]\nfield = 2"), Some("toml"));
        assert_eq!(detect_format_from_content("field = 2"), Some("toml"));
        assert_eq!(detect_format_from_content(""), None);
    }
}
