//! Shared configuration loader for the lesson toolchain.
//!
//! `defaults/lessons.default.toml` is embedded into every binary so that docs
//! and runtime behavior stay in sync. Applications layer user-specific files
//! on top of those defaults via [`Loader`] before deserializing into
//! [`LessonsConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use lesson_extract::{BoundaryMode, ExtractOptions, Track};
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../defaults/lessons.default.toml");

/// Top-level configuration consumed by lesson applications.
#[derive(Debug, Clone, Deserialize)]
pub struct LessonsConfig {
    pub pipeline: PipelineConfig,
    pub tracks: TracksConfig,
}

/// Pipeline knobs mirrored onto [`ExtractOptions`].
#[derive(Debug, Clone, Deserialize)]
pub struct PipelineConfig {
    pub lenient: bool,
    /// Seed for the synthesis rng; unset means a fresh entropy seed per run.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl From<&PipelineConfig> for ExtractOptions {
    fn from(config: &PipelineConfig) -> Self {
        ExtractOptions {
            boundary_mode: if config.lenient {
                BoundaryMode::Lenient
            } else {
                BoundaryMode::Strict
            },
        }
    }
}

impl From<PipelineConfig> for ExtractOptions {
    fn from(config: PipelineConfig) -> Self {
        ExtractOptions::from(&config)
    }
}

/// Source documents for the two course tracks.
#[derive(Debug, Clone, Deserialize)]
pub struct TracksConfig {
    pub premed: TrackConfig,
    pub med: TrackConfig,
}

impl TracksConfig {
    pub fn for_track(&self, track: Track) -> &TrackConfig {
        match track {
            Track::PreMed => &self.premed,
            Track::Med => &self.med,
        }
    }

    /// Both tracks with their identities, in seed order.
    pub fn all(&self) -> [(Track, &TrackConfig); 2] {
        [(Track::PreMed, &self.premed), (Track::Med, &self.med)]
    }
}

/// One track's source document and expected lesson count.
#[derive(Debug, Clone, Deserialize)]
pub struct TrackConfig {
    pub label: String,
    pub file: String,
    pub lessons: usize,
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override (useful for CLI settings).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<LessonsConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<LessonsConfig, ConfigError> {
    Loader::new().build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_default_config() {
        let config = load_defaults().expect("defaults to deserialize");
        assert!(!config.pipeline.lenient);
        assert_eq!(config.pipeline.seed, None);
        assert_eq!(config.tracks.premed.label, "Pre-Med");
        assert_eq!(config.tracks.premed.lessons, 28);
        assert_eq!(config.tracks.med.file, "med.rtf");
        assert_eq!(config.tracks.med.lessons, 18);
    }

    #[test]
    fn supports_overrides() {
        let config = Loader::new()
            .set_override("pipeline.lenient", true)
            .expect("override to apply")
            .set_override("tracks.med.lessons", 5)
            .expect("override to apply")
            .build()
            .expect("config to build");
        assert!(config.pipeline.lenient);
        assert_eq!(config.tracks.med.lessons, 5);
    }

    #[test]
    fn pipeline_config_converts_to_extract_options() {
        let config = load_defaults().expect("defaults to deserialize");
        let options: ExtractOptions = (&config.pipeline).into();
        assert_eq!(options.boundary_mode, BoundaryMode::Strict);

        let lenient = PipelineConfig {
            lenient: true,
            seed: Some(7),
        };
        let options: ExtractOptions = lenient.into();
        assert_eq!(options.boundary_mode, BoundaryMode::Lenient);
    }

    #[test]
    fn tracks_are_addressable_by_identity() {
        let config = load_defaults().expect("defaults to deserialize");
        assert_eq!(config.tracks.for_track(Track::Med).label, "Med");
        let all = config.tracks.all();
        assert_eq!(all[0].0, Track::PreMed);
        assert_eq!(all[1].0, Track::Med);
    }
}
