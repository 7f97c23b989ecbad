use super::VERSION;
use clap::{App, Arg, ArgMatches};
use std::ffi::OsString;
use std::io;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// The options shared by both plotting apps
#[derive(Debug, Clone, PartialEq)]
pub struct PlotArgs {
    pub csvin: PathBuf,
    /// None means `<base>.png` in the working directory
    pub pngout: Option<PathBuf>,
    pub show: bool,
    pub verbose: bool,
}

impl PlotArgs {
    fn from_matches(cli_args: &ArgMatches) -> PlotArgs {
        PlotArgs {
            csvin: PathBuf::from(cli_args.value_of("input_csvfile").unwrap_or_default()),
            pngout: cli_args.value_of("output_pngfile").map(PathBuf::from),
            show: !cli_args.is_present("no_show"),
            verbose: cli_args.is_present("verbose"),
        }
    }
}

fn app(name: &str, about: &'static str) -> App<'static, 'static> {
    let arg_csvin = Arg::with_name("input_csvfile")
        .help("name of the csv file; first row holds the x and y labels")
        .required(true)
        .index(1);
    let arg_pngout = Arg::with_name("output_pngfile")
        .help("name of the output png file, defaults to <csv name without extension>.png")
        .short("o")
        .long("pngfile")
        .takes_value(true);
    let arg_no_show = Arg::with_name("no_show")
        .help("do not open the png once it is saved")
        .long("no-show")
        .takes_value(false);
    let arg_verbose = Arg::with_name("verbose")
        .help("print verbose information")
        .short("v")
        .long("verbose")
        .takes_value(false);
    App::new(name)
        .version(VERSION.unwrap_or("unknown"))
        .about(about)
        .arg(arg_csvin)
        .arg(arg_pngout)
        .arg(arg_no_show)
        .arg(arg_verbose)
}

/// Parses the process arguments, exiting with the usage on error.
pub fn parse_cli_with(name: &str, about: &'static str) -> PlotArgs {
    let cli_args = app(name, about).get_matches();
    PlotArgs::from_matches(&cli_args)
}

/// Parses the given arguments, the first one being the program name.
pub fn parse_cli_from<I, T>(name: &str, about: &'static str, args: I) -> Result<PlotArgs, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli_args = app(name, about).get_matches_from_safe(args)?;
    Ok(PlotArgs::from_matches(&cli_args))
}

/// stderr logging; RUST_LOG wins over the verbose flag
pub fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::ErrorKind;

    #[test]
    fn csv_path_is_required() {
        let err = parse_cli_from("csvplot_hist", "test", vec!["csvplot_hist"]).unwrap_err();
        assert_eq!(err.kind, ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn defaults() {
        let args = parse_cli_from("csvplot_line", "test", vec!["csvplot_line", "data/run.csv"])
            .unwrap();
        assert_eq!(
            args,
            PlotArgs {
                csvin: PathBuf::from("data/run.csv"),
                pngout: None,
                show: true,
                verbose: false,
            }
        );
    }

    #[test]
    fn all_options() {
        let args = parse_cli_from(
            "csvplot_line",
            "test",
            vec!["csvplot_line", "-v", "--no-show", "-o", "out/x.png", "run.csv"],
        )
        .unwrap();
        assert_eq!(args.csvin, PathBuf::from("run.csv"));
        assert_eq!(args.pngout, Some(PathBuf::from("out/x.png")));
        assert!(!args.show);
        assert!(args.verbose);
    }
}
