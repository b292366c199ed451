use chrono::{NaiveDate, Timelike};
use std::collections::BTreeMap;

use crate::types::{
    ActivitySummary, CommitActivity, CommitRecord, DailyCount, HourlyCount, LanguageBytes,
    LanguageShare,
};

/// Count commits per UTC calendar day, ascending by date.
pub fn daily_counts(commits: &[CommitRecord]) -> Vec<DailyCount> {
    let mut by_date: BTreeMap<NaiveDate, usize> = BTreeMap::new();
    for commit in commits {
        *by_date.entry(commit.authored_at.date_naive()).or_insert(0) += 1;
    }

    by_date
        .into_iter()
        .map(|(date, count)| DailyCount { date, count })
        .collect()
}

/// Count commits per UTC hour of day, ascending by hour.
///
/// Hours without commits are left out rather than reported as zero.
pub fn hourly_counts(commits: &[CommitRecord]) -> Vec<HourlyCount> {
    let mut by_hour: BTreeMap<u32, usize> = BTreeMap::new();
    for commit in commits {
        *by_hour.entry(commit.authored_at.hour()).or_insert(0) += 1;
    }

    by_hour
        .into_iter()
        .map(|(hour, count)| HourlyCount { hour, count })
        .collect()
}

/// Relabel the language map into pie rows, keeping the API's order.
pub fn language_shares(languages: &LanguageBytes) -> Vec<LanguageShare> {
    languages
        .iter()
        .map(|(language, bytes)| LanguageShare {
            language: language.to_string(),
            bytes,
        })
        .collect()
}

/// Headline figures from already aggregated tables.
pub fn summarize(daily: &[DailyCount], hourly: &[HourlyCount]) -> ActivitySummary {
    // Strict `>` keeps the earliest entry on ties
    let busiest_day = daily
        .iter()
        .copied()
        .reduce(|best, day| if day.count > best.count { day } else { best });
    let busiest_hour = hourly
        .iter()
        .copied()
        .reduce(|best, hour| if hour.count > best.count { hour } else { best });

    ActivitySummary {
        total_commits: daily.iter().map(|d| d.count).sum(),
        active_days: daily.len(),
        busiest_day,
        busiest_hour,
    }
}

/// Build every commit-derived table for one fetch.
pub fn commit_activity(commits: &[CommitRecord]) -> CommitActivity {
    let daily = daily_counts(commits);
    let hourly = hourly_counts(commits);
    let summary = summarize(&daily, &hourly);
    CommitActivity {
        daily,
        hourly,
        summary,
    }
}
