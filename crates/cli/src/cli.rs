use std::path::PathBuf;

use buddybot::TargetCount;
use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "buddybot")]
#[command(about = "Automated mutual-buddy requests for Naver Blog")]
#[command(version)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Naver account identifier
    #[arg(long = "id", value_name = "ID")]
    pub identifier: String,

    /// Naver account password
    #[arg(long = "pw", value_name = "PASSWORD")]
    pub secret: String,

    /// Search keyword used to discover candidate blogs
    #[arg(long)]
    pub keyword: String,

    /// Message attached to each request
    #[arg(long)]
    pub message: String,

    /// How many requests to send at most
    #[arg(long, default_value = "30", value_parser = parse_target, value_name = "30|50|100")]
    pub target: TargetCount,

    /// Blog ids to skip, comma or newline delimited
    #[arg(long, value_name = "LIST", conflicts_with = "exclude_file")]
    pub exclude: Option<String>,

    /// File with blog ids to skip, one per line
    #[arg(long, value_name = "FILE")]
    pub exclude_file: Option<PathBuf>,

    /// WebDriver endpoint to drive
    #[arg(long, default_value = "http://localhost:9515", value_name = "URL")]
    pub webdriver: String,

    /// Run the browser headless
    #[arg(long)]
    pub headless: bool,

    /// Emit events as NDJSON instead of colored text
    #[arg(long)]
    pub json: bool,
}

fn parse_target(s: &str) -> Result<TargetCount, String> {
    s.parse().map_err(|err: buddybot::config::InvalidTargetCount| err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_invocation_parses() {
        let cli = Cli::try_parse_from([
            "buddybot",
            "--id", "me",
            "--pw", "secret",
            "--keyword", "cooking",
            "--message", "hello",
        ])
        .unwrap();
        assert_eq!(cli.target, TargetCount::Thirty);
        assert!(!cli.headless);
        assert!(cli.exclude.is_none());
    }

    #[test]
    fn target_rejects_values_outside_the_set() {
        let result = Cli::try_parse_from([
            "buddybot",
            "--id", "me",
            "--pw", "secret",
            "--keyword", "k",
            "--message", "m",
            "--target", "42",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn inline_and_file_exclusions_conflict() {
        let result = Cli::try_parse_from([
            "buddybot",
            "--id", "me",
            "--pw", "secret",
            "--keyword", "k",
            "--message", "m",
            "--exclude", "a,b",
            "--exclude-file", "skip.txt",
        ]);
        assert!(result.is_err());
    }
}
