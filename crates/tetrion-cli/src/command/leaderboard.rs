use std::{
    io,
    path::PathBuf,
};

use anyhow::Context;

use crate::leaderboard::{JsonLeaderboard, LeaderboardRecord, MAX_ENTRIES};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct LeaderboardArg {
    /// Path of the leaderboard file
    #[clap(long, default_value = super::DEFAULT_LEADERBOARD_PATH)]
    pub(crate) leaderboard: PathBuf,
    /// Number of scores to print
    #[clap(long, default_value_t = MAX_ENTRIES)]
    pub(crate) limit: usize,
}

pub(crate) fn run(arg: &LeaderboardArg) -> anyhow::Result<()> {
    let LeaderboardArg { leaderboard, limit } = arg;

    let records = JsonLeaderboard::new(leaderboard).load()?;
    let mut stdout = io::stdout().lock();
    write_table(&mut stdout, &records[..records.len().min(*limit)])
        .context("Failed to write leaderboard to stdout")?;
    Ok(())
}

fn write_table<W>(writer: &mut W, records: &[LeaderboardRecord]) -> io::Result<()>
where
    W: io::Write,
{
    if records.is_empty() {
        writeln!(writer, "No scores yet")?;
        return Ok(());
    }
    writeln!(writer, "{:>4}  {:<20}  {:>8}  SAVED AT", "RANK", "NAME", "SCORE")?;
    for (rank, record) in records.iter().enumerate() {
        writeln!(
            writer,
            "{:>4}  {:<20}  {:>8}  {}",
            rank + 1,
            record.name,
            record.score,
            record.timestamp.format("%Y-%m-%d %H:%M:%S")
        )?;
    }
    writer.flush()
}
