use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment, File};
use serde::Deserialize;

use crate::error::Result;
use crate::forms::FormEndpoints;
use crate::parser::Layout;

/// Runtime settings: `agenda.toml` (optional) overridden by `AGENDA__*` env vars,
/// e.g. `AGENDA__FORMS__SPEAKER_URL` or `AGENDA__LAYOUT__TABLE_CELLPADDING`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub layout: Layout,
    pub forms: FormEndpoints,
}

fn env() -> Environment {
    Environment::with_prefix("AGENDA").separator("__")
}

impl Settings {
    pub fn load() -> Result<Self> {
        Self::from_builder(
            Config::builder()
                .add_source(File::with_name("agenda").required(false))
                .add_source(env()),
        )
    }

    pub fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<Self> {
        Ok(builder.build()?.try_deserialize()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::{FileFormat, Map};

    fn from_toml(toml: &str) -> Settings {
        Settings::from_builder(Config::builder().add_source(File::from_str(toml, FileFormat::Toml)))
            .unwrap()
    }

    #[test]
    fn empty_source_gives_defaults() {
        let s = from_toml("");
        assert_eq!(s.layout, Layout::default());
        assert_eq!(s.forms, FormEndpoints::default());
    }

    #[test]
    fn partial_override_keeps_other_defaults() {
        let s = from_toml(
            r#"
            [layout]
            table_cellpadding = "4"

            [forms]
            speaker_url = "https://forms.example/speaker"
            retries = 5
            "#,
        );
        assert_eq!(s.layout.table_cellpadding, "4");
        assert_eq!(s.layout.table_border, "0");
        assert_eq!(s.forms.speaker_url.as_deref(), Some("https://forms.example/speaker"));
        assert_eq!(s.forms.retries, 5);
        assert_eq!(s.forms.backoff_ms, 500);
        assert!(s.forms.feedback_url.is_none());
    }

    #[test]
    fn environment_overrides_file() {
        let vars: Map<String, String> = [
            ("AGENDA__FORMS__SPEAKER_URL", "https://forms.example/env-speaker"),
            ("AGENDA__FORMS__RETRIES", "7"),
            ("AGENDA__LAYOUT__TABLE_CELLPADDING", "6"),
            ("OTHER__FORMS__RETRIES", "1"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        let s = Settings::from_builder(
            Config::builder()
                .add_source(File::from_str(
                    "[forms]\nspeaker_url = \"https://forms.example/file\"\nretries = 2\n",
                    FileFormat::Toml,
                ))
                .add_source(env().source(Some(vars))),
        )
        .unwrap();
        assert_eq!(s.forms.speaker_url.as_deref(), Some("https://forms.example/env-speaker"));
        assert_eq!(s.forms.retries, 7);
        assert_eq!(s.layout.table_cellpadding, "6");
        assert_eq!(s.layout.table_border, "0");
    }
}
