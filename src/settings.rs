use anyhow::*;
use std::env;
use std::path::PathBuf;

use crate::store::{ColumnRole, LoaderSettings};

#[derive(Debug)]
pub struct Settings {
    pub resources_dir: PathBuf,
    pub static_dir: PathBuf,
    pub bind_address: String,
    pub port: u16,
    pub loader: LoaderSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            resources_dir: PathBuf::from("resources"),
            static_dir: PathBuf::from("static"),
            bind_address: "127.0.0.1".to_owned(),
            port: 8000,
            loader: LoaderSettings::default(),
        }
    }
}

impl Settings {
    pub fn from_env() -> Result<Settings> {
        Settings::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Settings>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = Settings::default();
        if let Some(dir) = lookup("QUIZ_RESOURCES_DIR") {
            settings.resources_dir = dir.into();
        }
        if let Some(dir) = lookup("QUIZ_STATIC_DIR") {
            settings.static_dir = dir.into();
        }
        if let Some(address) = lookup("QUIZ_BIND_ADDRESS") {
            settings.bind_address = address;
        }
        if let Some(port) = lookup("QUIZ_PORT") {
            settings.port = port
                .trim()
                .parse()
                .with_context(|| format!("Invalid QUIZ_PORT {:?}", port))?;
        }
        if let Some(delimiter) = lookup("QUIZ_DELIMITER") {
            settings.loader.delimiter = parse_delimiter(&delimiter)?;
        }
        if let Some(role) = lookup("QUIZ_QUESTION_COLUMN") {
            settings.loader.question_column = role
                .parse::<ColumnRole>()
                .map_err(|e| anyhow!(e))
                .context("Invalid QUIZ_QUESTION_COLUMN")?;
        }
        Ok(settings)
    }
}

fn parse_delimiter(value: &str) -> Result<u8> {
    match value.as_bytes() {
        [byte] if byte.is_ascii() => Ok(*byte),
        _ => Err(anyhow!(
            "Invalid QUIZ_DELIMITER {:?}, expected a single ASCII character",
            value
        )),
    }
}
