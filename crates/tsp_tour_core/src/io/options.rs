use std::{env, fmt::Write as _, path::Path};

use log::LevelFilter;
use tsp_tour_derive::{CliOptions, CliValue, KvDisplay};

use crate::{Error, Result, SolveMode};

/// Runtime options for the command-line front end.
///
/// The per-mode point caps live here rather than in the planner: the planner
/// accepts any size, and it is this front end that keeps exact mode tractable.
#[derive(Clone, Debug, CliOptions, KvDisplay)]
pub struct SolverOptions {
    /// Tour engine to run.
    #[cli(
        long = "mode",
        parse_with = "SolveMode::parse",
        value = "<exact|approximate>"
    )]
    pub mode: SolveMode,
    /// Largest point count accepted in exact mode.
    #[cli(long = "max-exact-points")]
    pub max_exact_points: usize,
    /// Largest point count accepted in approximate mode.
    #[cli(long = "max-approx-points")]
    pub max_approx_points: usize,
    /// Generate this many random points instead of reading input. Zero reads input.
    #[cli(long = "random")]
    pub random: usize,
    /// Seed for random point generation.
    #[cli(long = "seed")]
    pub seed: u64,
    /// Side length of the square canvas random points are drawn on.
    #[cli(long = "canvas-size")]
    pub canvas_size: u32,
    /// Margin kept clear on every canvas edge.
    #[cli(long = "canvas-border")]
    pub canvas_border: u32,
    /// Logging level.
    #[cli(
        long = "log-level",
        parse_with = "LogLevel::parse",
        value = "<error|warn|info|debug|trace|off>"
    )]
    pub log_level: LogLevel,
    /// Logging output format.
    #[cli(
        long = "log-format",
        parse_with = "LogFormat::parse",
        value = "<compact|pretty>"
    )]
    pub log_format: LogFormat,
    /// Include timestamps in log lines.
    pub log_timestamp: bool,
    /// Log file path. Empty or `-` means stderr.
    #[cli(long = "log-output", value = "<path>")]
    pub log_output: String,
    /// Points file path. Empty or `-` means stdin.
    #[cli(long = "input", value = "<path>")]
    pub input: String,
    /// Tour output file path. Empty or `-` means stdout.
    #[cli(long = "output", value = "<path>")]
    pub output: String,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, CliValue)]
#[cli_value(option = "log-level")]
pub enum LogLevel {
    Error,
    #[cli(alias = "warning")]
    Warn,
    Info,
    Debug,
    Trace,
    Off,
}

impl LogLevel {
    pub fn to_filter(self) -> LevelFilter {
        match self {
            Self::Error => LevelFilter::Error,
            Self::Warn => LevelFilter::Warn,
            Self::Info => LevelFilter::Info,
            Self::Debug => LevelFilter::Debug,
            Self::Trace => LevelFilter::Trace,
            Self::Off => LevelFilter::Off,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, CliValue)]
#[cli_value(option = "log-format")]
pub enum LogFormat {
    Compact,
    Pretty,
}

impl Default for SolverOptions {
    fn default() -> Self {
        Self {
            mode: SolveMode::Exact,
            max_exact_points: 15,
            max_approx_points: 400,
            random: 0,
            seed: 1,
            canvas_size: 400,
            canvas_border: 5,
            log_level: LogLevel::Warn,
            log_format: LogFormat::Compact,
            log_timestamp: true,
            log_output: String::new(),
            input: String::new(),
            output: String::new(),
        }
    }
}

impl SolverOptions {
    pub fn from_args() -> Result<Self> {
        Self::parse_from_iter(env::args().skip(1))
    }

    fn parse_from_iter<I, S>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut options = Self::default();
        let mut args = args
            .into_iter()
            .map(|arg| arg.as_ref().to_owned())
            .peekable();

        while let Some(arg) = args.next() {
            if arg == "--help" || arg == "-h" {
                return Err(Error::invalid_input(Self::usage()));
            }

            let Some(raw_name) = arg.strip_prefix("--") else {
                return Err(Error::invalid_input(format!(
                    "Unexpected argument: {arg}\n\n{}",
                    Self::usage()
                )));
            };

            if raw_name.is_empty() {
                return Err(Error::invalid_input(format!(
                    "Invalid option name: {arg}\n\n{}",
                    Self::usage()
                )));
            }

            let (name, value) = Self::split_arg(raw_name, &mut args);

            if options.apply_cli_option(&name, value.clone())? {
                continue;
            }

            match name.as_str() {
                "log-timestamp" => {
                    options.log_timestamp = match value {
                        Some(v) => parse_bool(&name, &v)?,
                        None => true,
                    };
                }
                "no-log-timestamp" => {
                    if value.is_some() {
                        return Err(Error::invalid_input(format!(
                            "Flag --{name} does not take a value"
                        )));
                    }
                    options.log_timestamp = false;
                }
                _ => {
                    return Err(Error::invalid_input(format!(
                        "Unknown option: --{name}\n\n{}",
                        Self::usage()
                    )));
                }
            }
        }

        Ok(options)
    }

    pub fn usage() -> String {
        let mut out = String::from(concat!(
            "Usage:\n",
            "  tsp-tour [options] [--input points.txt]\n",
            "  tsp-tour [options] < points.txt\n",
            "  tsp-tour --random 200 --mode approximate\n\n",
            "Points are whitespace separated `x,y` tokens. The tour is written\n",
            "one `x,y` per line; the last point connects back to the first.\n\n",
            "Options:\n",
        ));

        let rows = Self::cli_help();
        let width = rows
            .iter()
            .map(|(long, hint, _)| long.len() + hint.len() + 3)
            .max()
            .unwrap_or(0);
        for (long, hint, doc) in rows {
            let flag = format!("--{long} {hint}");
            let _ = writeln!(out, "  {flag:<width$}  {doc}");
        }
        let _ = writeln!(
            out,
            "  {:<width$}  Include timestamps in log lines.",
            "--log-timestamp[=<bool>]"
        );
        let _ = writeln!(out, "  {:<width$}  Drop log timestamps.", "--no-log-timestamp");
        let _ = writeln!(out, "  {:<width$}  Show this message.", "--help");

        out.push_str(concat!(
            "\nExamples:\n",
            "  tsp-tour --input points.txt --output tour.txt\n",
            "  tsp-tour --mode=approx --log-level=info < points.txt\n",
            "  tsp-tour --random 15 --seed 7 --log-level=debug --log-format=pretty\n",
        ));
        out
    }

    /// Largest input the selected mode accepts.
    pub fn point_limit(&self) -> usize {
        match self.mode {
            SolveMode::Exact => self.max_exact_points,
            SolveMode::Approximate => self.max_approx_points,
        }
    }

    pub fn check_point_count(&self, n: usize) -> Result<()> {
        let limit = self.point_limit();
        if n > limit {
            return Err(Error::invalid_input(format!(
                "{n} points exceed the {} mode limit of {limit}; \
                 use --mode=approximate or raise --max-{}-points",
                self.mode,
                match self.mode {
                    SolveMode::Exact => "exact",
                    SolveMode::Approximate => "approx",
                }
            )));
        }
        Ok(())
    }

    pub fn log_output_path(&self) -> Option<&Path> {
        non_stdio_path(&self.log_output)
    }

    pub fn output_path(&self) -> Option<&Path> {
        non_stdio_path(&self.output)
    }

    pub fn input_path(&self) -> Option<&Path> {
        non_stdio_path(&self.input)
    }
}

fn non_stdio_path(raw: &str) -> Option<&Path> {
    let raw = raw.trim();
    if raw.is_empty() || raw == "-" {
        None
    } else {
        Some(Path::new(raw))
    }
}

fn parse_bool(name: &str, value: &str) -> Result<bool> {
    match value {
        "1" | "true" | "TRUE" | "True" | "yes" | "YES" | "on" | "ON" => Ok(true),
        "0" | "false" | "FALSE" | "False" | "no" | "NO" | "off" | "OFF" => Ok(false),
        _ => Err(Error::invalid_input(format!(
            "Invalid boolean for --{name}: {value} (expected true/false)"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use log::LevelFilter;

    use super::{LogFormat, LogLevel, SolverOptions, parse_bool};
    use crate::SolveMode;

    #[test]
    fn parse_bool_accepts_common_values() {
        assert!(parse_bool("x", "true").expect("parse"));
        assert!(parse_bool("x", "ON").expect("parse"));
        assert!(!parse_bool("x", "0").expect("parse"));
        assert!(!parse_bool("x", "no").expect("parse"));
    }

    #[test]
    fn parse_bool_rejects_unknown_values() {
        let err = parse_bool("log-timestamp", "maybe").expect_err("invalid bool should fail");
        assert!(
            err.to_string()
                .contains("Invalid boolean for --log-timestamp: maybe")
        );
    }

    #[test]
    fn log_level_maps_to_expected_filter() {
        assert_eq!(LogLevel::Error.to_filter(), LevelFilter::Error);
        assert_eq!(LogLevel::Warn.to_filter(), LevelFilter::Warn);
        assert_eq!(LogLevel::Info.to_filter(), LevelFilter::Info);
        assert_eq!(LogLevel::Debug.to_filter(), LevelFilter::Debug);
        assert_eq!(LogLevel::Trace.to_filter(), LevelFilter::Trace);
        assert_eq!(LogLevel::Off.to_filter(), LevelFilter::Off);
        assert_eq!(LogLevel::parse("warning").expect("alias"), LogLevel::Warn);
    }

    #[test]
    fn parse_from_iter_applies_known_cli_options() {
        let options = SolverOptions::parse_from_iter([
            "--mode=approximate",
            "--max-exact-points=12",
            "--max-approx-points",
            "1000",
            "--random=40",
            "--seed=77",
            "--canvas-size=800",
            "--canvas-border=10",
            "--log-level=debug",
            "--log-format=pretty",
            "--log-timestamp=false",
            "--log-output=run.log",
            "--input=points.txt",
            "--output=tour.txt",
        ])
        .expect("parse options");

        assert_eq!(options.mode, SolveMode::Approximate);
        assert_eq!(options.max_exact_points, 12);
        assert_eq!(options.max_approx_points, 1000);
        assert_eq!(options.random, 40);
        assert_eq!(options.seed, 77);
        assert_eq!(options.canvas_size, 800);
        assert_eq!(options.canvas_border, 10);
        assert_eq!(options.log_level, LogLevel::Debug);
        assert_eq!(options.log_format, LogFormat::Pretty);
        assert!(!options.log_timestamp);
        assert_eq!(options.log_output, "run.log");
        assert_eq!(options.input, "points.txt");
        assert_eq!(options.output, "tour.txt");
    }

    #[test]
    fn parse_from_iter_accepts_mode_alias() {
        let options = SolverOptions::parse_from_iter(["--mode", "approx"]).expect("parse");
        assert_eq!(options.mode, SolveMode::Approximate);
    }

    #[test]
    fn parse_from_iter_rejects_bad_numbers() {
        let err = SolverOptions::parse_from_iter(["--seed=abc"]).expect_err("bad seed");
        assert!(err.to_string().contains("Invalid value for --seed: abc"));
    }

    #[test]
    fn parse_from_iter_requires_value_for_mode() {
        let err = SolverOptions::parse_from_iter(["--mode"]).expect_err("missing value");
        assert!(err.to_string().contains("Missing value for --mode"));
    }

    #[test]
    fn parse_from_iter_accepts_no_log_timestamp_flag() {
        let options =
            SolverOptions::parse_from_iter(["--no-log-timestamp"]).expect("parse options");
        assert!(!options.log_timestamp);
    }

    #[test]
    fn parse_from_iter_rejects_no_log_timestamp_with_value() {
        let err = SolverOptions::parse_from_iter(["--no-log-timestamp=true"])
            .expect_err("expected flag value rejection");
        assert!(err.to_string().contains("does not take a value"));
    }

    #[test]
    fn parse_from_iter_rejects_unknown_option() {
        let err = SolverOptions::parse_from_iter(["--unknown-opt=1"])
            .expect_err("expected unknown option error");
        assert!(err.to_string().contains("Unknown option: --unknown-opt"));
    }

    #[test]
    fn parse_from_iter_rejects_unexpected_positional_argument() {
        let err =
            SolverOptions::parse_from_iter(["points.txt"]).expect_err("expected positional error");
        assert!(err.to_string().contains("Unexpected argument: points.txt"));
    }

    #[test]
    fn parse_from_iter_help_returns_usage_error() {
        let err = SolverOptions::parse_from_iter(["--help"]).expect_err("help should short-circuit");
        assert!(err.to_string().contains("Usage:"));
    }

    #[test]
    fn usage_lists_every_derived_option_with_its_doc() {
        let usage = SolverOptions::usage();
        for (long, hint, doc) in SolverOptions::cli_help() {
            assert!(usage.contains(&format!("--{long} {hint}")), "missing --{long}");
            assert!(usage.contains(doc), "missing doc for --{long}");
        }
        assert!(usage.contains("--mode <exact|approximate>"));
        assert!(usage.contains("--max-exact-points <usize>"));
    }

    #[test]
    fn defaults_match_canvas_and_mode_limits() {
        let options = SolverOptions::default();
        assert_eq!(options.mode, SolveMode::Exact);
        assert_eq!(options.point_limit(), 15);
        assert_eq!(options.canvas_size, 400);
        assert_eq!(options.canvas_border, 5);

        let approx = SolverOptions {
            mode: SolveMode::Approximate,
            ..SolverOptions::default()
        };
        assert_eq!(approx.point_limit(), 400);
    }

    #[test]
    fn check_point_count_enforces_mode_limit() {
        let options = SolverOptions::default();
        assert!(options.check_point_count(15).is_ok());
        let err = options.check_point_count(16).expect_err("over limit");
        assert!(err.to_string().contains("16 points exceed the exact mode limit of 15"));
        assert!(err.to_string().contains("--max-exact-points"));
    }

    #[test]
    fn paths_treat_empty_and_dash_as_stdio() {
        let options = SolverOptions::default();
        assert!(options.input_path().is_none());
        assert!(options.output_path().is_none());
        assert!(options.log_output_path().is_none());

        let options = SolverOptions {
            input: "-".to_string(),
            output: " - ".to_string(),
            log_output: "out/run.log".to_string(),
            ..SolverOptions::default()
        };
        assert!(options.input_path().is_none());
        assert!(options.output_path().is_none());
        assert_eq!(
            options.log_output_path().expect("path should exist"),
            std::path::Path::new("out/run.log")
        );
    }

    #[test]
    fn display_renders_key_value_pairs() {
        let rendered = SolverOptions::default().to_string();
        assert!(rendered.starts_with("mode=exact max_exact_points=15"));
        assert!(rendered.contains("log_level=warn"));
        assert!(rendered.contains("log_timestamp=true"));
    }
}
