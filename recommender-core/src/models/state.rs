use crate::models::errors::ParseGroupModeError;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GroupMode {
    #[default]
    None,
    ByYear,
    ByRating,
    ByFirstLetter,
    ByAuthor,
}

impl GroupMode {
    pub const ALL: [GroupMode; 5] = [
        GroupMode::None,
        GroupMode::ByYear,
        GroupMode::ByRating,
        GroupMode::ByFirstLetter,
        GroupMode::ByAuthor,
    ];

    pub fn label(self) -> &'static str {
        match self {
            GroupMode::None => "No Grouping",
            GroupMode::ByYear => "Group by Year",
            GroupMode::ByRating => "Group by Rating",
            GroupMode::ByFirstLetter => "Group by First Letter",
            GroupMode::ByAuthor => "Group by Author",
        }
    }

    fn short_name(self) -> &'static str {
        match self {
            GroupMode::None => "none",
            GroupMode::ByYear => "year",
            GroupMode::ByRating => "rating",
            GroupMode::ByFirstLetter => "letter",
            GroupMode::ByAuthor => "author",
        }
    }
}

impl fmt::Display for GroupMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for GroupMode {
    type Err = ParseGroupModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        GroupMode::ALL
            .into_iter()
            .find(|mode| {
                mode.label().eq_ignore_ascii_case(wanted)
                    || mode.short_name().eq_ignore_ascii_case(wanted)
            })
            .ok_or_else(|| ParseGroupModeError(wanted.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayFlags {
    pub show_date: bool,
    pub show_rating: bool,
}

impl Default for DisplayFlags {
    fn default() -> Self {
        Self {
            show_date: true,
            show_rating: true,
        }
    }
}

/// Snapshot of everything needed to replay a search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchState {
    pub query: String,
    pub group_mode: GroupMode,
    pub show_date: bool,
    pub show_rating: bool,
}

impl SearchState {
    pub fn new(query: impl Into<String>, group_mode: GroupMode) -> Self {
        Self {
            query: query.into(),
            group_mode,
            ..Self::default()
        }
    }

    pub fn with_query(&self, query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..self.clone()
        }
    }

    pub fn with_group_mode(&self, group_mode: GroupMode) -> Self {
        Self {
            group_mode,
            ..self.clone()
        }
    }

    pub fn with_flags(&self, flags: DisplayFlags) -> Self {
        Self {
            show_date: flags.show_date,
            show_rating: flags.show_rating,
            ..self.clone()
        }
    }

    pub fn flags(&self) -> DisplayFlags {
        DisplayFlags {
            show_date: self.show_date,
            show_rating: self.show_rating,
        }
    }

    pub fn trimmed_query(&self) -> &str {
        self.query.trim()
    }

    pub fn has_query(&self) -> bool {
        !self.trimmed_query().is_empty()
    }
}

impl Default for SearchState {
    fn default() -> Self {
        let flags = DisplayFlags::default();
        Self {
            query: String::new(),
            group_mode: GroupMode::None,
            show_date: flags.show_date,
            show_rating: flags.show_rating,
        }
    }
}

impl fmt::Display for SearchState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "\"{}\" [{}, date {}, rating {}]",
            self.query,
            self.group_mode,
            if self.show_date { "on" } else { "off" },
            if self.show_rating { "on" } else { "off" }
        )
    }
}
