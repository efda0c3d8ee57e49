//! Dashboard statistics: reporting periods and plain-text rendering for the `stats` command.

use std::fmt::Write;
use std::str::FromStr;

use anyhow::Result;
use storage::{DailyActivity, MessageStats, MessageStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    Week,
    Month,
    Quarter,
}

impl Period {
    pub fn days(&self) -> u32 {
        match self {
            Period::Week => 7,
            Period::Month => 30,
            Period::Quarter => 90,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Period::Week => "7d",
            Period::Month => "30d",
            Period::Quarter => "3m",
        }
    }
}

impl FromStr for Period {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "7d" => Ok(Period::Week),
            "30d" => Ok(Period::Month),
            "3m" => Ok(Period::Quarter),
            other => anyhow::bail!("invalid period '{}': expected 7d, 30d or 3m", other),
        }
    }
}

pub struct StatsReport {
    pub period: Period,
    pub totals: MessageStats,
    pub daily: Vec<DailyActivity>,
}

pub async fn collect(store: &dyn MessageStore, period: Period) -> Result<StatsReport> {
    let totals = store.stats().await?;
    let daily = store.daily_activity(period.days()).await?;
    Ok(StatsReport {
        period,
        totals,
        daily,
    })
}

impl StatsReport {
    pub fn render(&self) -> String {
        let t = &self.totals;
        let period_messages: i64 = self.daily.iter().map(|d| d.total_messages).sum();
        let mut out = String::new();

        let _ = writeln!(out, "Messages:        {}", t.total_messages);
        let _ = writeln!(out, "  from users:    {}", t.user_messages);
        let _ = writeln!(out, "  from bot:      {}", t.assistant_messages);
        let _ = writeln!(out, "  deleted:       {}", t.deleted_messages);
        let _ = writeln!(out, "Unique users:    {}", t.unique_users);
        let _ = writeln!(out, "Unique chats:    {}", t.unique_chats);
        if let (Some(first), Some(last)) = (t.first_message, t.last_message) {
            let _ = writeln!(
                out,
                "Active between:  {} .. {}",
                first.format("%Y-%m-%d %H:%M"),
                last.format("%Y-%m-%d %H:%M")
            );
        }
        let _ = writeln!(
            out,
            "\nLast {} ({} messages):",
            self.period.label(),
            period_messages
        );
        for day in &self.daily {
            let _ = writeln!(
                out,
                "  {}  {:>6} messages  {:>4} users",
                day.date, day.total_messages, day.active_users
            );
        }
        out
    }
}
