mod activity;


pub use activity::{commit_activity, daily_counts, hourly_counts, language_shares, summarize};
