use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use color_eyre::Result;
use tracing::Level;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::fmt::time::OffsetTime;

use crate::args::{DedupArgs, IcdArgs};
use crate::subcommands::{dedup, icd, list_haplotypes, list_markers};

#[derive(Parser, Debug)]
#[command(author, version, about, styles=get_styles())]
pub struct Arguments {
    #[command(subcommand)]
    pub cmd: SubCommand,
}

#[derive(Args, Debug, Clone)]
pub struct LogAndVerbosity {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count, default_value_t = 3)]
    pub verbosity: u8,

    /// A file path to save logs to
    #[arg(short, long)]
    pub log_file: Option<PathBuf>,

    /// Silence all warning and info messages
    #[arg(long)]
    pub silent: bool,
}

#[derive(Subcommand, Debug)]
pub enum SubCommand {
    /// Compute the information content difference of every marker
    Icd {
        #[command(flatten)]
        args: IcdArgs,

        #[command(flatten)]
        log_and_verbosity: LogAndVerbosity,
    },

    /// Remove near-duplicate haplotypes and output the rest one marker per line
    Dedup {
        file: PathBuf,

        #[command(flatten)]
        dedup: DedupArgs,

        /// Output file, "-" writes to stdout
        #[arg(short = 'o', long, default_value_os_t = PathBuf::from("-"))]
        output: PathBuf,

        #[command(flatten)]
        log_and_verbosity: LogAndVerbosity,
    },

    /// Output the marker labels of a haplotype file
    Markers {
        file: PathBuf,

        #[command(flatten)]
        log_and_verbosity: LogAndVerbosity,
    },

    /// Output the haplotypes of a haplotype file, one per row
    Haplotypes {
        file: PathBuf,

        /// Remove near-duplicate haplotypes first
        #[arg(long)]
        deduplicate: bool,

        #[command(flatten)]
        dedup: DedupArgs,

        #[command(flatten)]
        log_and_verbosity: LogAndVerbosity,
    },
}

impl SubCommand {
    #[rustfmt::skip]
    pub fn log_and_verbosity(&self) -> (u8, &Option<PathBuf>, bool) {
        match self {
            SubCommand::Icd { log_and_verbosity, .. }
            | SubCommand::Dedup { log_and_verbosity, .. }
            | SubCommand::Markers { log_and_verbosity, .. }
            | SubCommand::Haplotypes { log_and_verbosity, .. }
            => (log_and_verbosity.verbosity, &log_and_verbosity.log_file, log_and_verbosity.silent),
        }
    }
}

pub fn run_args(args: Arguments) -> Result<()> {
    let (verbosity, log_file, is_silent) = args.cmd.log_and_verbosity();

    let (level, wrtr, _guard) = init_tracing(verbosity, log_file, is_silent)?;

    let timer = time::format_description::parse("[hour]:[minute]:[second].[subsecond digits:3]")?;
    let time_offset = time::UtcOffset::current_local_offset().unwrap_or(time::UtcOffset::UTC);
    let timer = OffsetTime::new(time_offset, timer);

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(wrtr)
        .with_timer(timer)
        .init();

    run_cmd(args.cmd)?;

    Ok(())
}

#[rustfmt::skip]
pub fn run_cmd(cmd: SubCommand) -> Result<()> {
    match cmd {
        SubCommand::Icd { args, .. } => icd::run(args)?,
        SubCommand::Dedup { file, dedup, output, .. } => dedup::run(file, dedup, output)?,
        SubCommand::Markers { file, .. } => list_markers::run(file)?,
        SubCommand::Haplotypes { file, deduplicate, dedup, .. } => {
            list_haplotypes::run(file, deduplicate.then_some(dedup))?
        }
    };
    Ok(())
}

pub fn init_tracing(
    verbosity: u8,
    log_file: &Option<PathBuf>,
    is_silent: bool,
) -> Result<(Level, NonBlocking, WorkerGuard)> {
    let level = if is_silent {
        Level::ERROR
    } else {
        match verbosity {
            0 | 1 => Level::ERROR,
            2 => Level::WARN,
            3 => Level::INFO,
            4 => Level::DEBUG,
            5..=u8::MAX => Level::TRACE,
        }
    };

    // Write logs to stderr or file
    let (wrtr, _guard) = match log_file {
        Some(path) => {
            let file = std::fs::File::options()
                .create(true)
                .write(true)
                .truncate(true)
                .open(path)?;
            tracing_appender::non_blocking(file)
        }
        None => tracing_appender::non_blocking(std::io::stderr()),
    };

    Ok((level, wrtr, _guard))
}

pub fn get_styles() -> clap::builder::Styles {
    clap::builder::Styles::styled()
        .usage(
            anstyle::Style::new()
                .bold()
                .underline()
                .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
        )
        .header(
            anstyle::Style::new()
                .bold()
                .underline()
                .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
        )
        .literal(
            anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))),
        )
        .invalid(
            anstyle::Style::new()
                .bold()
                .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
        )
        .error(
            anstyle::Style::new()
                .bold()
                .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
        )
        .valid(
            anstyle::Style::new()
                .bold()
                .underline()
                .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))),
        )
        .placeholder(
            anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::White))),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_tracing() {
        let (level, _, _) = init_tracing(1, &None, false).unwrap();
        assert_eq!(Level::ERROR, level);
        let (level, _, _) = init_tracing(2, &None, false).unwrap();
        assert_eq!(Level::WARN, level);
        let (level, _, _) = init_tracing(3, &None, false).unwrap();
        assert_eq!(Level::INFO, level);
        let (level, _, _) = init_tracing(4, &None, false).unwrap();
        assert_eq!(Level::DEBUG, level);
        let (level, _, _) = init_tracing(5, &None, false).unwrap();
        assert_eq!(Level::TRACE, level);
        let (level, _, _) = init_tracing(5, &None, true).unwrap();
        assert_eq!(Level::ERROR, level);
    }

    #[test]
    fn test_parse_icd() {
        let args = Arguments::try_parse_from([
            "icdiff", "icd", "a.txt", "b.txt.gz", "-m", "5", "--unconstrained",
        ])
        .unwrap();

        match args.cmd {
            SubCommand::Icd { args, log_and_verbosity } => {
                assert_eq!(args.files, vec![PathBuf::from("a.txt"), PathBuf::from("b.txt.gz")]);
                assert_eq!(args.dedup.min_differences, 5);
                assert!(!args.constrain());
                assert_eq!(args.output, PathBuf::from("-"));
                assert_eq!(log_and_verbosity.verbosity, 3);
            }
            _ => panic!("expected the icd subcommand"),
        }
    }

    #[test]
    fn test_parse_defaults() {
        let args = Arguments::try_parse_from(["icdiff", "haplotypes", "a.txt"]).unwrap();

        match args.cmd {
            SubCommand::Haplotypes { deduplicate, dedup, .. } => {
                assert!(!deduplicate);
                assert_eq!(dedup, DedupArgs::default());
            }
            _ => panic!("expected the haplotypes subcommand"),
        }

        assert!(Arguments::try_parse_from(["icdiff", "icd"]).is_err());
    }

    #[test]
    fn test_log_and_verbosity() {
        let subcommand = SubCommand::Markers {
            file: PathBuf::new(),
            log_and_verbosity: LogAndVerbosity {
                verbosity: 4,
                log_file: None,
                silent: true,
            },
        };

        assert_eq!((4, &None, true), subcommand.log_and_verbosity());
    }
}
