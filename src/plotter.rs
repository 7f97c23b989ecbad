use crate::{hist, line, CsvTable, PlotError, PlotKind};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// The data collected for one named plot
#[derive(Debug, Clone, PartialEq)]
struct NamedPlot {
    x_label: String,
    y_label: String,
    kind: PlotKind,
    rows: Vec<Vec<f64>>,
}

impl NamedPlot {
    fn kind_name(&self) -> &'static str {
        match self.kind {
            PlotKind::Histogram { .. } => "histogram",
            PlotKind::Line => "line",
        }
    }

    /// header with the two labels, then one comma separated row per datum
    fn to_csv(&self, w: &mut impl Write) -> std::io::Result<()> {
        w.write_all(format!("{},{}\n", self.x_label, self.y_label).as_bytes())?;
        for row in self.rows.iter() {
            let fields: Vec<String> = row.iter().map(|v| v.to_string()).collect();
            w.write_all(format!("{}\n", fields.join(",")).as_bytes())?;
        }
        Ok(())
    }
}

/// Collects data points for named plots, then writes every plot as `<name>.csv`
/// in the format read by `CsvTable` and renders it to `<name>.png`.
/// Plots are kept, and generated, in name order.
#[derive(Debug, Clone, Default)]
pub struct Plotter {
    plots: BTreeMap<String, NamedPlot>,
}

impl Plotter {
    pub fn new() -> Plotter {
        Plotter::default()
    }

    fn entry(
        &mut self,
        plot: &str,
        x_label: &str,
        y_label: &str,
        kind: PlotKind,
    ) -> Result<&mut NamedPlot, PlotError> {
        let named = self
            .plots
            .entry(plot.to_string())
            .or_insert_with(|| NamedPlot {
                x_label: x_label.to_string(),
                y_label: y_label.to_string(),
                kind,
                rows: Vec::new(),
            });
        let same_kind = match (named.kind, kind) {
            (PlotKind::Line, PlotKind::Line) => true,
            (PlotKind::Histogram { .. }, PlotKind::Histogram { .. }) => true,
            _ => false,
        };
        if !same_kind {
            return Err(PlotError::KindMismatch {
                plot: plot.to_string(),
                existing: named.kind_name(),
            });
        }
        Ok(named)
    }

    /// Adds a data point to a line plot, creating the plot on first use.
    /// Each value of the datum is a separate line; every datum of a plot
    /// must have the same number of values.
    pub fn add_line_datum(
        &mut self,
        plot: &str,
        datum: &[f64],
        x_label: &str,
        y_label: &str,
    ) -> Result<(), PlotError> {
        if datum.is_empty() {
            return Err(PlotError::EmptyDatum {
                plot: plot.to_string(),
            });
        }
        let named = self.entry(plot, x_label, y_label, PlotKind::Line)?;
        if let Some(first) = named.rows.first() {
            if first.len() != datum.len() {
                return Err(PlotError::DimensionMismatch {
                    plot: plot.to_string(),
                    expected: first.len(),
                    found: datum.len(),
                });
            }
        }
        named.rows.push(datum.to_vec());
        Ok(())
    }

    /// Adds a value to a histogram plot, creating the plot on first use.
    /// `bins` must be the same on every call for the same plot.
    pub fn add_histogram_datum(
        &mut self,
        plot: &str,
        datum: f64,
        x_label: &str,
        y_label: &str,
        bins: usize,
    ) -> Result<(), PlotError> {
        let named = self.entry(plot, x_label, y_label, PlotKind::Histogram { bins })?;
        if let PlotKind::Histogram { bins: expected } = named.kind {
            if expected != bins {
                return Err(PlotError::BinCountMismatch {
                    plot: plot.to_string(),
                    expected,
                    found: bins,
                });
            }
        }
        named.rows.push(vec![datum]);
        Ok(())
    }

    pub fn plot_names(&self) -> Vec<&str> {
        self.plots.keys().map(|k| k.as_str()).collect()
    }

    fn get(&self, plot: &str) -> Result<&NamedPlot, PlotError> {
        self.plots.get(plot).ok_or_else(|| PlotError::UnknownPlot {
            plot: plot.to_string(),
        })
    }

    /// the csv text of one plot
    pub fn to_csv_string(&self, plot: &str) -> Result<String, PlotError> {
        let mut buf: Vec<u8> = Vec::new();
        self.get(plot)?
            .to_csv(&mut buf)
            .map_err(|e| PlotError::Render(e.to_string()))?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }

    /// writes `<dir>/<plot>.csv`, replacing any existing file
    pub fn write_csv(&self, plot: &str, dir: &Path) -> Result<PathBuf, PlotError> {
        let named = self.get(plot)?;
        let fout = dir.join(format!("{}.csv", plot));
        let io_err = |source| PlotError::Io {
            path: fout.clone(),
            source,
        };
        let file = File::create(&fout).map_err(io_err)?;
        let mut buf = BufWriter::new(file);
        named.to_csv(&mut buf).map_err(io_err)?;
        buf.flush().map_err(io_err)?;
        debug!("wrote {} rows to {}", named.rows.len(), fout.display());
        Ok(fout)
    }

    /// Writes the csv of every plot into `dir` and renders it next to it,
    /// reading the csv back the same way the command line apps do.
    /// Returns the png paths, in plot name order.
    pub fn generate_all(&self, dir: &Path) -> Result<Vec<PathBuf>, PlotError> {
        let mut pngs = Vec::with_capacity(self.plots.len());
        for (name, named) in self.plots.iter() {
            info!("creating plot {}", name);
            let csv = self.write_csv(name, dir)?;
            let table = CsvTable::from_csv(&csv)?;
            let fig = match named.kind {
                PlotKind::Histogram { bins } => hist::figure_with_bins(&table, name, bins)?,
                PlotKind::Line => line::figure(&table, name)?,
            };
            let png = dir.join(format!("{}.png", name));
            fig.save_png(&png)?;
            pngs.push(png);
        }
        Ok(pngs)
    }
}
