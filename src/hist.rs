use crate::cli::{parse_cli_with, PlotArgs};
use crate::edges::BinEdges;
use crate::{min_and_max, CsvTable, Figure, PlotError, PlotKind, HIST_BINS};

pub const NAME: &str = "csvplot_hist";
pub const ABOUT: &str = "cli app to plot every csv column as an overlaid histogram";

/// Takes the CLI arguments that control the histogram plot.
pub fn parse_cli() -> PlotArgs {
    parse_cli_with(NAME, ABOUT)
}

/// One histogram figure with a series per column, titled after the input file.
pub fn figure(table: &CsvTable, title: &str) -> Result<Figure, PlotError> {
    figure_with_bins(table, title, HIST_BINS)
}

/// Same as `figure`, with `bins` buckets per series
pub fn figure_with_bins(table: &CsvTable, title: &str, bins: usize) -> Result<Figure, PlotError> {
    let mut fig = Figure::new(
        PlotKind::Histogram { bins },
        title,
        table.x_label.as_str(),
        table.y_label.as_str(),
    );
    for s in table.columns()? {
        fig.add_series(s);
    }
    Ok(fig)
}

/// Bucket counts of one series over equal-width buckets
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    pub lo: f64,
    pub hi: f64,
    pub counts: Vec<usize>,
}

impl Histogram {
    /// (bucket start, bucket end, count) for each bucket
    pub fn bars(&self) -> impl Iterator<Item = (f64, f64, usize)> + '_ {
        BinEdges::new(self.lo, self.hi, self.counts.len() as u64)
            .zip(self.counts.iter())
            .map(|((x0, x1), &c)| (x0, x1, c))
    }
}

/// counts the values in `bins` equal buckets spanning their min..max,
/// the last bucket including the max; a constant series spans v-0.5..v+0.5
pub fn bin_counts(values: &[f64], bins: usize) -> Histogram {
    let (lo, hi) = match min_and_max(values) {
        Some((lo, hi)) if lo == hi => (lo - 0.5, hi + 0.5),
        Some((lo, hi)) => (lo, hi),
        None => (0., 1.),
    };
    let edges = BinEdges::new(lo, hi, bins as u64);
    let mut counts = vec![0usize; bins];
    for &v in values.iter() {
        if let Some(i) = edges.index_of(v) {
            counts[i] += 1;
        }
    }
    Histogram { lo, hi, counts }
}
