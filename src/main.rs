mod app;
mod form;
mod help;
mod theme;
use crate::app::App;
use anyhow::Context;
use lexopt::{Arg, Parser, ValueExt};
use rangepick::{format_day, DateRange, DateRangePicker, Language, PickerConfig};
use ratatui::DefaultTerminal;
use std::fs::File;
use std::path::{Path, PathBuf};
use time::OffsetDateTime;

#[derive(Clone, Debug, Default, Eq, PartialEq)]
struct Options {
    config: Option<PathBuf>,
    language: Option<Language>,
    log_file: Option<PathBuf>,
    print: bool,
}

#[derive(Clone, Debug, Eq, PartialEq)]
enum Command {
    Run(Options),
    Help,
    Version,
}

impl Command {
    fn from_parser(mut parser: Parser) -> Result<Command, lexopt::Error> {
        let mut opts = Options::default();
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Short('h') | Arg::Long("help") => return Ok(Command::Help),
                Arg::Short('V') | Arg::Long("version") => return Ok(Command::Version),
                Arg::Short('c') | Arg::Long("config") => {
                    opts.config = Some(PathBuf::from(parser.value()?));
                }
                Arg::Short('l') | Arg::Long("lang") => {
                    opts.language = Some(parser.value()?.parse::<Language>()?);
                }
                Arg::Long("log-file") => {
                    opts.log_file = Some(PathBuf::from(parser.value()?));
                }
                Arg::Short('p') | Arg::Long("print") => opts.print = true,
                _ => return Err(arg.unexpected()),
            }
        }
        Ok(Command::Run(opts))
    }

    fn run(self) -> anyhow::Result<()> {
        match self {
            Command::Run(opts) => {
                if let Some(path) = &opts.log_file {
                    init_logging(path)?;
                }
                let mut config = match &opts.config {
                    Some(path) => PickerConfig::load(path)
                        .with_context(|| format!("failed to load {}", path.display()))?,
                    None => PickerConfig::default(),
                };
                if let Some(lang) = opts.language {
                    config.host_language = Some(lang);
                }
                let today = OffsetDateTime::now_local()
                    .context("failed to determine local date")?
                    .date();
                let mut picker = DateRangePicker::new(today, Vec::new());
                picker.initialize(config);
                let range = if opts.print {
                    picker.committed()
                } else {
                    with_terminal(|mut terminal| {
                        terminal.hide_cursor().context("failed to hide cursor")?;
                        let range = App::new(picker).run(terminal)?;
                        Ok(range)
                    })?
                };
                println!("{}", show_range(range));
                Ok(())
            }
            Command::Help => {
                println!("Usage: rangepick [<options>]");
                println!();
                println!("Pick a date range in the terminal");
                println!();
                println!("Options:");
                println!("  -c, --config <FILE>  Read picker settings from the given TOML file");
                println!("  -l, --lang <en|ar>   Display labels in the given language");
                println!("      --log-file <FILE>");
                println!("                       Write debug logs to the given file");
                println!("  -p, --print          Print the configured range without running the");
                println!("                       picker");
                println!("  -h, --help           Display this help message and exit");
                println!("  -V, --version        Show the program version and exit");
                Ok(())
            }
            Command::Version => {
                println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
                Ok(())
            }
        }
    }
}

fn main() -> anyhow::Result<()> {
    Command::from_parser(Parser::from_env())?.run()
}

fn with_terminal<F, T>(func: F) -> anyhow::Result<T>
where
    F: FnOnce(DefaultTerminal) -> anyhow::Result<T>,
{
    let terminal = ratatui::init();
    let r = func(terminal);
    ratatui::restore();
    r
}

// The terminal belongs to the UI, so logs only go to a file, and only when
// asked for
fn init_logging(path: &Path) -> anyhow::Result<()> {
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn show_range(range: DateRange) -> String {
    let show = |d: Option<time::Date>| d.map_or_else(|| String::from("-"), format_day);
    format!("{} {}", show(range.from), show(range.to))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsString;
    use time::macros::date;

    fn parse(args: &[&str]) -> Result<Command, lexopt::Error> {
        Command::from_parser(Parser::from_iter(
            std::iter::once("rangepick").chain(args.iter().copied()),
        ))
    }

    #[test]
    fn test_parse_no_args() {
        assert_eq!(parse(&[]).unwrap(), Command::Run(Options::default()));
    }

    #[test]
    fn test_parse_options() {
        let cmd = parse(&["--config", "picker.toml", "-l", "ar", "--print"]).unwrap();
        assert_eq!(
            cmd,
            Command::Run(Options {
                config: Some(PathBuf::from("picker.toml")),
                language: Some(Language::Ar),
                log_file: None,
                print: true,
            })
        );
    }

    #[test]
    fn test_parse_bad_language() {
        assert!(parse(&["--lang", "fr"]).is_err());
    }

    #[test]
    fn test_parse_help_wins() {
        assert_eq!(parse(&["--print", "-h"]).unwrap(), Command::Help);
    }

    #[test]
    fn test_parse_stray_value() {
        let r = Command::from_parser(Parser::from_args([OsString::from("extra")]));
        assert!(r.is_err());
    }

    #[test]
    fn test_show_range() {
        assert_eq!(show_range(DateRange::EMPTY), "- -");
        assert_eq!(
            show_range(DateRange::new(Some(date!(2024 - 01 - 05)), None)),
            "05/01/2024 -"
        );
    }
}
