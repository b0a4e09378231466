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

use std::env::current_dir;
use std::path::PathBuf;

use mnemo_core::Fallible;
use mnemo_core::fail;

use crate::config::Config;
use crate::db::Database;

/// A collection directory: its configuration and its database.
pub struct Collection {
    pub directory: PathBuf,
    pub config: Config,
    pub db: Database,
}

impl Collection {
    /// Opens the collection in `directory`, or in the current working
    /// directory if none is given.
    pub fn new(directory: Option<String>) -> Fallible<Self> {
        let directory: PathBuf = match directory {
            Some(dir) => PathBuf::from(dir),
            None => current_dir()?,
        };
        if !directory.exists() {
            return fail("directory does not exist.");
        }
        let directory = directory.canonicalize()?;
        let config = Config::load(&directory)?;
        let db_path = directory.join(&config.database);
        log::debug!("opening database {}", db_path.display());
        let db = Database::new(&db_path)?;
        Ok(Self {
            directory,
            config,
            db,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::fs::write;

    use super::*;
    use crate::helper::create_tmp_collection;

    #[test]
    fn test_non_existent_directory() {
        let result = Collection::new(Some("./derpherp".to_string()));
        let err = result.err().unwrap();
        assert_eq!(err.to_string(), "error: directory does not exist.");
    }

    #[test]
    fn test_creates_database() -> Fallible<()> {
        let (_guard, dir) = create_tmp_collection()?;
        let collection = Collection::new(Some(dir))?;
        assert!(collection.directory.join("mnemo.db").exists());
        Ok(())
    }

    #[test]
    fn test_database_path_from_config() -> Fallible<()> {
        let (_guard, dir) = create_tmp_collection()?;
        write(
            PathBuf::from(&dir).join("mnemo.toml"),
            "database = \"words.sqlite3\"\n",
        )?;
        let collection = Collection::new(Some(dir))?;
        assert_eq!(collection.config.database, "words.sqlite3");
        assert!(collection.directory.join("words.sqlite3").exists());
        Ok(())
    }
}
