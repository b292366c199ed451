//! # Common Types
//!
//! This module contains the records fetched from the GitHub API and the
//! derived tables the dashboard charts are drawn from.

use chrono::{DateTime, NaiveDate, Utc};
use serde::de::{Deserializer, MapAccess, Visitor};
use serde::Deserialize;
use std::fmt;

/// One repository owned by the inspected account.
///
/// The API returns many more fields; only the name is needed, both as the
/// dropdown label and as the key for the commit and language requests.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct RepositorySummary {
    pub name: String,
}

impl RepositorySummary {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// One commit of the selected repository, reduced to its author timestamp.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CommitRecord {
    pub authored_at: DateTime<Utc>,
}

impl CommitRecord {
    pub fn new(authored_at: DateTime<Utc>) -> Self {
        Self { authored_at }
    }
}

/// Wire shape of a commit object: `{"commit": {"author": {"date": ...}}}`.
#[derive(Deserialize)]
struct CommitEnvelope {
    commit: CommitBody,
}

#[derive(Deserialize)]
struct CommitBody {
    author: CommitAuthor,
}

#[derive(Deserialize)]
struct CommitAuthor {
    date: DateTime<Utc>,
}

impl<'de> Deserialize<'de> for CommitRecord {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let envelope = CommitEnvelope::deserialize(deserializer)?;
        Ok(Self::new(envelope.commit.author.date))
    }
}

/// Bytes of source per language, in the order the API listed them.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LanguageBytes(pub Vec<(String, u64)>);

impl LanguageBytes {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.0.iter().map(|(language, bytes)| (language.as_str(), *bytes))
    }
}

impl<S: Into<String>> FromIterator<(S, u64)> for LanguageBytes {
    fn from_iter<I: IntoIterator<Item = (S, u64)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(language, bytes)| (language.into(), bytes)).collect())
    }
}

struct LanguageBytesVisitor;

impl<'de> Visitor<'de> for LanguageBytesVisitor {
    type Value = LanguageBytes;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("an object mapping language names to byte counts")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
        while let Some((language, bytes)) = access.next_entry::<String, u64>()? {
            entries.push((language, bytes));
        }
        Ok(LanguageBytes(entries))
    }
}

impl<'de> Deserialize<'de> for LanguageBytes {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(LanguageBytesVisitor)
    }
}

/// Number of commits authored on one calendar day (UTC).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DailyCount {
    pub date: NaiveDate,
    pub count: usize,
}

/// Number of commits authored during one hour of the day (UTC, 0-23).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HourlyCount {
    pub hour: u32,
    pub count: usize,
}

/// One slice of the language pie.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LanguageShare {
    pub language: String,
    pub bytes: u64,
}

/// Headline figures shown above the commit charts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ActivitySummary {
    /// Total number of commits fetched
    pub total_commits: usize,
    /// Number of distinct days with at least one commit
    pub active_days: usize,
    /// Day with the most commits, earliest on ties
    pub busiest_day: Option<DailyCount>,
    /// Hour with the most commits, earliest on ties
    pub busiest_hour: Option<HourlyCount>,
}

/// Commit-derived tables for the selected repository.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CommitActivity {
    pub daily: Vec<DailyCount>,
    pub hourly: Vec<HourlyCount>,
    pub summary: ActivitySummary,
}

/// Severity of an inline status message.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Warning,
    Error,
}

/// A message shown inline in the dashboard.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatusMessage {
    pub level: StatusLevel,
    pub text: String,
}

impl StatusMessage {
    pub fn info(text: impl Into<String>) -> Self {
        Self { level: StatusLevel::Info, text: text.into() }
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Self { level: StatusLevel::Warning, text: text.into() }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self { level: StatusLevel::Error, text: text.into() }
    }
}

/// The result of one interaction cycle.
///
/// A dashboard is produced by exactly one cycle and replaced wholesale by
/// the next one, so its tables always come from the same set of fetches.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Dashboard {
    /// The account the cycle ran for
    pub account: String,
    /// Repositories listed for the account
    pub repositories: Vec<RepositorySummary>,
    /// The repository the charts belong to
    pub selected: Option<String>,
    /// Daily and hourly tables, present once commits were fetched
    pub activity: Option<CommitActivity>,
    /// Language rows, present once languages were fetched
    pub languages: Option<Vec<LanguageShare>>,
    /// Prompts, warnings and errors to display
    pub messages: Vec<StatusMessage>,
}

impl Dashboard {
    pub fn repository_names(&self) -> impl Iterator<Item = &str> {
        self.repositories.iter().map(|repo| repo.name.as_str())
    }

    pub fn has_errors(&self) -> bool {
        self.messages.iter().any(|m| m.level == StatusLevel::Error)
    }
}
