use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Board section a post belongs to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Category {
    Notice,
    Qna,
    #[default]
    Free,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Notice, Category::Qna, Category::Free];

    /// Wire representation (`"NOTICE"`, `"QNA"`, `"FREE"`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Notice => "NOTICE",
            Category::Qna => "QNA",
            Category::Free => "FREE",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown category: {s}"))
    }
}
