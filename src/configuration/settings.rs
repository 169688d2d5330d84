use crate::configuration::constants::common::{
    DEFAULT_MODULE_KEYWORDS, DEFAULT_OUTPUT, DEFAULT_TEST_CASE_PATTERN, ENV_PREFIX,
};
use crate::report::{Extractor, ExtractorConfig, ModuleClassifier, Strategy};
use crate::xml::SQUISH_XML3_NAMESPACE;
use config::{Config, ConfigError, Environment, File};
use derivative::*;
use regex::Regex;
use serde_derive::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum TraversalMode {
    Nested,
    Flat,
}

#[derive(Debug, Deserialize, Derivative)]
#[derivative(Default)]
#[serde(default)]
pub struct Settings {
    pub include_all_logs: bool,
    #[serde(with = "crate::configuration::deserialize::keywords")]
    #[derivative(Default(value = "default_keywords()"))]
    pub module_keywords: Vec<String>,
    #[derivative(Default(value = "TraversalMode::Nested"))]
    pub strategy: TraversalMode,
    #[serde(with = "serde_regex")]
    #[derivative(Default(value = "default_test_case_pattern()"))]
    pub test_case_pattern: Regex,
    /// Empty string matches elements of any namespace.
    #[derivative(Default(value = "Some(SQUISH_XML3_NAMESPACE.to_owned())"))]
    pub namespace: Option<String>,
    #[derivative(Default(value = "PathBuf::from(DEFAULT_OUTPUT)"))]
    pub output: PathBuf,
}

fn default_keywords() -> Vec<String> {
    DEFAULT_MODULE_KEYWORDS.iter().map(|k| k.to_string()).collect()
}

fn default_test_case_pattern() -> Regex {
    Regex::new(DEFAULT_TEST_CASE_PATTERN).expect("Regex compilation error")
}

impl Settings {
    /// Reads settings from `file` (YAML, JSON, TOML, HJSON) when given, then
    /// lets `SQUISH_REPORT_*` environment variables override them.
    pub fn load(file: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = Config::new();
        if let Some(file) = file {
            config.merge(File::from(file))?;
        }
        config.merge(Environment::with_prefix(ENV_PREFIX))?;
        config.try_into()
    }

    pub fn strategy(&self) -> Strategy {
        match self.strategy {
            TraversalMode::Nested => Strategy::NestedByContainerAndSection,
            TraversalMode::Flat => Strategy::FlatByNamePattern(self.test_case_pattern.clone()),
        }
    }

    pub fn extractor(&self) -> Extractor {
        let config = ExtractorConfig {
            include_all_logs: self.include_all_logs,
            classifier: ModuleClassifier::new(&self.module_keywords),
            namespace: self.namespace.clone().filter(|ns| !ns.trim().is_empty()),
        };
        Extractor::new(config, self.strategy())
    }
}
