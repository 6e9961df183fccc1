use std::ffi::OsString;
use std::num::NonZeroUsize;
use std::path::PathBuf;

use clap::{ArgAction, Parser};

/// Long options that may also be spelled with a single dash (`-addrs`).
const LONG_FLAGS: &[&str] = &["addrs", "output", "concurrency", "log-file", "verbose"];

#[derive(Debug, Parser)]
#[command(
    name = "favicon-harvester",
    version,
    about = "Download the favicons referenced by a list of web pages"
)]
pub struct Cli {
    /// Text file with one page URL per line (required)
    #[arg(long, value_name = "PATH")]
    pub addrs: Option<PathBuf>,

    /// Directory the icons are written to
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub output: PathBuf,

    /// Maximum number of pages processed at once; unlimited when omitted
    #[arg(long, value_name = "N")]
    pub concurrency: Option<NonZeroUsize>,

    /// Also write the log to this file
    #[arg(long = "log-file", value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// More log output on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    pub fn try_parse_args<I>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = OsString>,
    {
        Self::try_parse_from(normalize_args(args))
    }
}

/// Rewrites `-addrs x` style options to `--addrs x`. Short flags and
/// everything after `--` are left alone.
pub fn normalize_args<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    let mut passthrough = false;
    args.into_iter()
        .map(|arg| {
            if passthrough {
                return arg;
            }
            let Some(text) = arg.to_str() else {
                return arg;
            };
            if text == "--" {
                passthrough = true;
                return arg;
            }
            match text.strip_prefix('-') {
                Some(rest) if !rest.starts_with('-') && is_long_flag(rest) => {
                    OsString::from(format!("-{text}"))
                }
                _ => arg,
            }
        })
        .collect()
}

fn is_long_flag(arg: &str) -> bool {
    let name = arg.split_once('=').map_or(arg, |(name, _)| name);
    LONG_FLAGS.contains(&name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<OsString> {
        list.iter().map(OsString::from).collect()
    }

    #[test]
    fn single_dash_long_flags_are_rewritten() {
        let normalized = normalize_args(args(&[
            "favicon-harvester",
            "-addrs",
            "urls.txt",
            "-output=icons",
            "-vv",
            "--concurrency",
            "4",
        ]));
        assert_eq!(
            normalized,
            args(&[
                "favicon-harvester",
                "--addrs",
                "urls.txt",
                "--output=icons",
                "-vv",
                "--concurrency",
                "4",
            ])
        );
    }

    #[test]
    fn values_after_terminator_are_untouched() {
        let normalized = normalize_args(args(&["bin", "--", "-addrs"]));
        assert_eq!(normalized, args(&["bin", "--", "-addrs"]));
    }

    #[test]
    fn parses_go_style_invocation() {
        let cli = Cli::try_parse_args(args(&["bin", "-addrs", "list.txt", "-output", "out"]))
            .unwrap();
        assert_eq!(cli.addrs, Some(PathBuf::from("list.txt")));
        assert_eq!(cli.output, PathBuf::from("out"));
        assert_eq!(cli.concurrency, None);
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn defaults_apply_when_flags_are_missing() {
        let cli = Cli::try_parse_args(args(&["bin"])).unwrap();
        assert_eq!(cli.addrs, None);
        assert_eq!(cli.output, PathBuf::from("."));
        assert_eq!(cli.log_file, None);
    }

    #[test]
    fn zero_concurrency_is_rejected() {
        assert!(Cli::try_parse_args(args(&["bin", "-concurrency", "0"])).is_err());
    }
}
