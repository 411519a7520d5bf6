mod download_search;
mod output;
mod progress;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::ffi::OsString;
use std::process::ExitCode;

use output::{Output, Verbosity};

#[derive(Parser, Debug)]
#[command(name = "depsdownloader")]
#[command(about = "Fetch the classes.jar of an Android library from Maven Central into deps/")]
#[command(version)]
#[command(arg_required_else_help = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Increase output verbosity (-v, -vv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only print errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Do not print the banner
    #[arg(long, global = true)]
    no_banner: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Search Maven Central and install the library's classes.jar
    #[command(name = "downloadSearch")]
    DownloadSearch(download_search::DownloadSearchArgs),
}

/// The subcommand is matched case-insensitively.
fn normalize_args<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    args.into_iter()
        .enumerate()
        .map(|(i, arg)| match arg.to_str() {
            Some(s) if i == 1 && s.eq_ignore_ascii_case("downloadSearch") => OsString::from("downloadSearch"),
            _ => arg,
        })
        .collect()
}

fn init_logging(verbosity: Verbosity) {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(verbosity.log_filter()))
        .format_timestamp(None)
        .init();
}

fn run() -> Result<i32> {
    let cli = Cli::parse_from(normalize_args(std::env::args_os()));

    let verbosity = Verbosity::from_flags(cli.quiet, cli.verbose);
    init_logging(verbosity);

    let output = Output::new(verbosity);
    if !cli.no_banner {
        output.banner();
    }

    match cli.command {
        Commands::DownloadSearch(args) => download_search::execute(args, &output),
    }
}

fn main() -> ExitCode {
    match run() {
        Ok(code) => ExitCode::from(code as u8),
        Err(e) => {
            Output::default().error(&e.to_string());
            for cause in e.chain().skip(1) {
                eprintln!("  Caused by: {}", cause);
            }
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(normalize_args(args.iter().map(OsString::from)))
    }

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_download_search() {
        let cli = parse(&["depsdownloader", "downloadSearch", "--okhttp"]).unwrap();
        let Commands::DownloadSearch(args) = cli.command;
        assert_eq!(args.library_name(), Some("okhttp"));
        assert_eq!(args.timeout_ms, 5000);
        assert_eq!(args.entry, "classes.jar");
    }

    #[test]
    fn test_subcommand_is_case_insensitive() {
        let cli = parse(&["depsdownloader", "DOWNLOADSEARCH", "--appcompat"]).unwrap();
        let Commands::DownloadSearch(args) = cli.command;
        assert_eq!(args.library_name(), Some("appcompat"));
    }

    #[test]
    fn test_options_before_library() {
        let cli = parse(&[
            "depsdownloader",
            "downloadSearch",
            "--timeout-ms",
            "10000",
            "--deps-dir",
            "libs",
            "--okhttp",
        ])
        .unwrap();
        let Commands::DownloadSearch(args) = cli.command;
        assert_eq!(args.library_name(), Some("okhttp"));
        assert_eq!(args.timeout_ms, 10000);
        assert_eq!(args.pipeline_config().deps_dir, std::path::PathBuf::from("libs"));
    }

    #[test]
    fn test_library_option_for_colliding_names() {
        let cli = parse(&["depsdownloader", "downloadSearch", "--library", "quiet"]).unwrap();
        let Commands::DownloadSearch(args) = cli.command;
        assert_eq!(args.library_name(), Some("quiet"));

        // Without --library the name is taken as the global flag.
        assert!(parse(&["depsdownloader", "downloadSearch", "--quiet"]).is_err());
        assert!(parse(&["depsdownloader", "downloadSearch", "--library", "okhttp", "--retrofit"]).is_err());
    }

    #[test]
    fn test_malformed_invocations() {
        assert!(parse(&["depsdownloader"]).is_err());
        assert!(parse(&["depsdownloader", "downloadSearch"]).is_err());
        assert!(parse(&["depsdownloader", "download", "--okhttp"]).is_err());
        assert!(parse(&["depsdownloader", "downloadSearch", "okhttp"]).is_err());
        assert!(parse(&["depsdownloader", "downloadSearch", "--okhttp", "--retrofit"]).is_err());
    }
}
