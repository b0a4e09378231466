// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Collection configuration, read from `mnemo.toml` in the collection
//! directory. Every field is optional.

use std::fs::read_to_string;
use std::path::Path;

use mnemo_core::ErrorReport;
use mnemo_core::Fallible;
use mnemo_core::GradeMapping;
use serde::Deserialize;

pub const CONFIG_FILE: &str = "mnemo.toml";

pub const DEFAULT_DATABASE: &str = "mnemo.db";

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Path to the database file, relative to the collection directory.
    pub database: String,
    /// How correct/incorrect answers map onto grades.
    pub grading: GradeMapping,
    pub queue: QueueConfig,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct QueueConfig {
    /// Maximum number of due items to list.
    pub limit: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: DEFAULT_DATABASE.to_string(),
            grading: GradeMapping::default(),
            queue: QueueConfig::default(),
        }
    }
}

impl Config {
    /// Loads the configuration for a collection directory. A missing file
    /// yields the defaults.
    pub fn load(directory: &Path) -> Fallible<Self> {
        let path = directory.join(CONFIG_FILE);
        if !path.exists() {
            log::debug!("no {CONFIG_FILE} in {}, using defaults", directory.display());
            return Ok(Config::default());
        }
        let text = read_to_string(&path)?;
        Config::parse(&text)
    }

    pub fn parse(text: &str) -> Fallible<Self> {
        toml::from_str(text).map_err(|e| ErrorReport::new(format!("invalid {CONFIG_FILE}: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use std::fs::write;

    use mnemo_core::Answer;
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_empty_config_is_default() -> Fallible<()> {
        assert_eq!(Config::parse("")?, Config::default());
        Ok(())
    }

    #[test]
    fn test_full_config() -> Fallible<()> {
        let config = Config::parse(
            r#"
database = "cards.sqlite3"

[grading]
correct = 4
incorrect = 0

[queue]
limit = 20
"#,
        )?;
        assert_eq!(config.database, "cards.sqlite3");
        assert_eq!(config.grading.quality(Answer::Correct).value(), 4);
        assert_eq!(config.grading.quality(Answer::Incorrect).value(), 0);
        assert_eq!(config.queue.limit, Some(20));
        Ok(())
    }

    #[test]
    fn test_partial_grading() -> Fallible<()> {
        let config = Config::parse("[grading]\nincorrect = 2\n")?;
        assert_eq!(config.grading.quality(Answer::Correct).value(), 5);
        assert_eq!(config.grading.quality(Answer::Incorrect).value(), 2);
        Ok(())
    }

    #[test]
    fn test_out_of_range_grade_rejected() {
        assert!(Config::parse("[grading]\ncorrect = 6\n").is_err());
    }

    #[test]
    fn test_unknown_key_rejected() {
        let err = Config::parse("srs_v2 = true\n").unwrap_err();
        assert!(err.to_string().starts_with("error: invalid mnemo.toml"));
    }

    #[test]
    fn test_load_missing_file() -> Fallible<()> {
        let dir = tempdir()?;
        assert_eq!(Config::load(dir.path())?, Config::default());
        Ok(())
    }

    #[test]
    fn test_load_file() -> Fallible<()> {
        let dir = tempdir()?;
        write(dir.path().join(CONFIG_FILE), "[queue]\nlimit = 3\n")?;
        assert_eq!(Config::load(dir.path())?.queue.limit, Some(3));
        Ok(())
    }
}
