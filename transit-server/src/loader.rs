//! Loading network descriptions.
//!
//! Two formats are accepted. The plain text format is a stop count, a
//! route count, then one `from to cost distance` line per route:
//!
//! ```text
//! 9
//! 8
//! 1 2 2 3
//! 1 4 1 4
//! ...
//! ```
//!
//! The JSON format carries the same data:
//! `{"stop_count": 9, "routes": [{"from": 1, "to": 2, "cost": 2, "distance": 3}]}`.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::{StopId, Weight};
use crate::graph::Route;

/// Error from loading a network description.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The file could not be read
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed JSON description
    #[error("invalid JSON network description: {0}")]
    Json(#[from] serde_json::Error),

    /// Malformed text description
    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },
}

/// A network description: stop count and routes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkSpec {
    pub stop_count: u32,
    pub routes: Vec<Route>,
}

impl NetworkSpec {
    /// Read a description from disk. `.json` files are parsed as JSON,
    /// anything else as the text format.
    pub fn load(path: &Path) -> Result<Self, LoadError> {
        let content = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            Self::from_json(&content)
        } else {
            Self::from_text(&content)
        }
    }

    /// Parse the JSON format.
    pub fn from_json(content: &str) -> Result<Self, LoadError> {
        Ok(serde_json::from_str(content)?)
    }

    /// Parse the whitespace-separated text format.
    pub fn from_text(content: &str) -> Result<Self, LoadError> {
        let mut tokens = Tokens::new(content);

        let stop_count: u32 = tokens.next_number("stop count")?;
        let route_count: usize = tokens.next_number("route count")?;

        // The count is untrusted; a route line is at least eight bytes
        let mut routes = Vec::with_capacity(route_count.min(content.len() / 8));
        for _ in 0..route_count {
            let from = tokens.next_stop()?;
            let to = tokens.next_stop()?;
            let cost: Weight = tokens.next_number("cost")?;
            let distance: Weight = tokens.next_number("distance")?;
            routes.push(Route::new(from, to, cost, distance));
        }

        if let Some((line, token)) = tokens.next_raw() {
            return Err(LoadError::Parse {
                line,
                message: format!("unexpected trailing input `{token}`"),
            });
        }

        Ok(Self { stop_count, routes })
    }
}

impl FromStr for NetworkSpec {
    type Err = LoadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_text(s)
    }
}

/// Whitespace tokens tagged with their 1-based line number.
struct Tokens<'a> {
    inner: Box<dyn Iterator<Item = (usize, &'a str)> + 'a>,
    last_line: usize,
}

impl<'a> Tokens<'a> {
    fn new(content: &'a str) -> Self {
        let inner = content
            .lines()
            .enumerate()
            .flat_map(|(idx, line)| line.split_whitespace().map(move |tok| (idx + 1, tok)));
        Self {
            inner: Box::new(inner),
            last_line: 1,
        }
    }

    fn next_raw(&mut self) -> Option<(usize, &'a str)> {
        let (line, token) = self.inner.next()?;
        self.last_line = line;
        Some((line, token))
    }

    fn next_number<T: FromStr>(&mut self, what: &str) -> Result<T, LoadError> {
        let Some((line, token)) = self.next_raw() else {
            return Err(LoadError::Parse {
                line: self.last_line,
                message: format!("unexpected end of input, expected {what}"),
            });
        };
        token.parse().map_err(|_| LoadError::Parse {
            line,
            message: format!("expected {what} as a non-negative integer, found `{token}`"),
        })
    }

    fn next_stop(&mut self) -> Result<StopId, LoadError> {
        let raw: u32 = self.next_number("stop id")?;
        StopId::new(raw).map_err(|e| LoadError::Parse {
            line: self.last_line,
            message: e.to_string(),
        })
    }
}
