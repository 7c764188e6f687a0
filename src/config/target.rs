//! Crawl target definitions.

use std::fmt;

/// What the discovery layer crawled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// A user's submitted posts.
    User(String),
    /// A subreddit's front page.
    Subreddit(String),
}

impl Target {
    /// Bare name, used as the output folder.
    pub fn name(&self) -> &str {
        match self {
            Target::User(name) | Target::Subreddit(name) => name,
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::User(name) => write!(f, "u/{}", name),
            Target::Subreddit(name) => write!(f, "r/{}", name),
        }
    }
}
