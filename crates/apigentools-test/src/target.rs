//! Test targets derived from configuration.

use std::path::{Path, PathBuf};

use apigentools_core::LanguageConfig;

/// Prefix shared by all test image tags.
pub const TEST_IMAGE_PREFIX: &str = "apigentools-test";

/// One (language, spec version) pair under test.
///
/// Derived per iteration from the configuration; never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestTarget {
    /// Language identifier.
    pub language: String,

    /// Spec version identifier.
    pub version: String,

    /// Expected test Dockerfile, `Dockerfile.test.<version>` inside the
    /// generated language directory.
    pub dockerfile: PathBuf,
}

impl TestTarget {
    /// Derive the target for one (language, version) pair.
    pub fn new(
        language: &str,
        version: &str,
        lang_config: &LanguageConfig,
        generated_code_dir: &Path,
    ) -> Self {
        let dockerfile = lang_config
            .generated_lang_dir(language, generated_code_dir)
            .join(format!("Dockerfile.test.{version}"));
        Self {
            language: language.to_string(),
            version: version.to_string(),
            dockerfile,
        }
    }

    /// Tag for the image built from this target's Dockerfile.
    pub fn image_name(&self) -> String {
        format!("{TEST_IMAGE_PREFIX}-{}-{}", self.language, self.version)
    }

    /// Build context directory (the Dockerfile's parent).
    pub fn context_dir(&self) -> &Path {
        self.dockerfile.parent().unwrap_or_else(|| Path::new("."))
    }
}
