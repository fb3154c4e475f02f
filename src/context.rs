use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use log::info;
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Context {
    pub article_dir: PathBuf,
    pub out_path: PathBuf,

    pub site_url: String,
    pub site_title: String,
    pub site_description: String,
    pub author_email: String,
}

impl Default for Context {
    fn default() -> Self {
        Self {
            article_dir: PathBuf::from("logs"),
            out_path: PathBuf::from("feed.xml"),
            site_url: "https://example.com".to_string(),
            site_title: "Developer Logs".to_string(),
            site_description: "Technical notes, tutorials, and insights.".to_string(),
            author_email: "author@example.com".to_string(),
        }
    }
}

/// Optional overrides read from the JSON config file.
#[derive(Deserialize, Debug, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub(crate) struct ConfigFile {
    pub article_dir: Option<PathBuf>,
    pub out_path: Option<PathBuf>,
    pub site_url: Option<String>,
    pub site_title: Option<String>,
    pub site_description: Option<String>,
    pub author_email: Option<String>,
}

impl Context {
    /// Site URL without a trailing slash, so joined paths are never doubled.
    pub fn base_url(&self) -> &str {
        self.site_url.trim_end_matches('/')
    }

    pub fn post_link(&self, filename: &str) -> String {
        format!("{}/logs/viewer.html?post={}", self.base_url(), filename)
    }

    pub fn feed_url(&self) -> String {
        format!("{}/feed.xml", self.base_url())
    }

    pub fn apply(&mut self, file: ConfigFile) {
        if let Some(v) = file.article_dir {
            self.article_dir = v;
        }
        if let Some(v) = file.out_path {
            self.out_path = v;
        }
        if let Some(v) = file.site_url {
            self.site_url = v;
        }
        if let Some(v) = file.site_title {
            self.site_title = v;
        }
        if let Some(v) = file.site_description {
            self.site_description = v;
        }
        if let Some(v) = file.author_email {
            self.author_email = v;
        }
    }
}

/// Reads the config file. A missing file is only an error when it was named explicitly.
pub(crate) fn load_config(config_path: &Path, required: bool) -> anyhow::Result<ConfigFile> {
    if config_path.exists() {
        let fd = File::open(config_path)
            .with_context(|| format!("while opening config {config_path:?}"))?;
        let reader = BufReader::new(fd);
        serde_json::from_reader(reader)
            .with_context(|| format!("while parsing config {config_path:?}"))
    } else if required {
        anyhow::bail!("config file {config_path:?} does not exist.")
    } else {
        info!("Config file({config_path:?}) does not exist. using defaults...");
        Ok(ConfigFile::default())
    }
}
