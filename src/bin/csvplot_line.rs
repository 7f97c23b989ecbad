use anyhow::Context;
use csvplot::cli::init_logging;
use csvplot::line::{figure, parse_cli};
use csvplot::show::show;
use tracing::warn;

fn main() -> anyhow::Result<()> {
    let args = parse_cli();
    init_logging(args.verbose);
    let pngout = csvplot::run(&args, figure)
        .with_context(|| format!("could not plot the lines of {}", args.csvin.display()))?;
    if args.show {
        if let Err(e) = show(&pngout) {
            warn!("could not open {}: {}", pngout.display(), e);
        }
    }
    Ok(())
}
