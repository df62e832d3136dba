//! Process environment isolation for tests that load layered settings.
#![allow(dead_code)]

use std::env;
use std::ffi::OsString;
use std::fs;
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard};

use tempfile::TempDir;

pub const RELTREE_VARS: [&str; 3] = [
    "RELTREE_MAX_ITERATIONS",
    "RELTREE_STYLE__SHAPE",
    "RELTREE_STYLE__COLOR",
];

static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Holds the environment lock, points `XDG_CONFIG_HOME` at a fresh directory
/// and clears `RELTREE_*`. The previous values come back on drop.
pub struct IsolatedEnv {
    pub config_home: TempDir,
    saved: Vec<(&'static str, Option<OsString>)>,
    _lock: MutexGuard<'static, ()>,
}

impl IsolatedEnv {
    pub fn new() -> Self {
        let lock = ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        let config_home = TempDir::new().unwrap();

        let saved = std::iter::once("XDG_CONFIG_HOME")
            .chain(RELTREE_VARS)
            .map(|key| (key, env::var_os(key)))
            .collect();

        env::set_var("XDG_CONFIG_HOME", config_home.path());
        for key in RELTREE_VARS {
            env::remove_var(key);
        }

        Self {
            config_home,
            saved,
            _lock: lock,
        }
    }

    pub fn set(&self, key: &str, value: &str) {
        assert!(RELTREE_VARS.contains(&key), "not an isolated variable: {key}");
        env::set_var(key, value);
    }

    /// Location `Settings::load` reads the global config from.
    pub fn global_config_path(&self) -> PathBuf {
        self.config_home.path().join("reltree").join("reltree.toml")
    }

    pub fn write_global_config(&self, content: &str) -> PathBuf {
        let path = self.global_config_path();
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, content).unwrap();
        path
    }
}

impl Drop for IsolatedEnv {
    fn drop(&mut self) {
        for (key, value) in &self.saved {
            match value {
                Some(v) => env::set_var(key, v),
                None => env::remove_var(key),
            }
        }
    }
}
