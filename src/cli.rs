use clap::Parser;

use crate::error::ConfigError;

#[derive(Parser)]
#[command(name = "commenters")]
#[command(about = "Rank a GitHub repository's commenters over a trailing period")]
#[command(version)]
pub struct Cli {
    #[arg(help = "Repository in owner/name form")]
    pub repo: String,

    #[arg(
        long,
        default_value = "0d",
        help = "Trailing period to count comments for, in days (e.g. 30d; 0d means all history)"
    )]
    pub period: String,

    #[arg(long, default_value_t = 100, help = "Results requested per API page")]
    pub page_size: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoId {
    pub owner: String,
    pub name: String,
}

impl RepoId {
    pub fn parse(spec: &str) -> Result<Self, ConfigError> {
        match spec.split_once('/') {
            Some((owner, name)) if !owner.is_empty() && !name.is_empty() && !name.contains('/') => {
                Ok(Self {
                    owner: owner.to_string(),
                    name: name.to_string(),
                })
            }
            _ => Err(ConfigError::InvalidRepo(spec.to_string())),
        }
    }
}
