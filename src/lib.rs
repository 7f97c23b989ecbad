use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
pub mod cli;
pub mod edges;
pub mod error;
pub mod figure;
pub mod hist;
pub mod line;
pub mod plotter;
pub mod show;

pub use cli::PlotArgs;
pub use error::PlotError;
pub use figure::{Figure, PlotKind};
pub use plotter::Plotter;

pub const VERSION: Option<&'static str> = option_env!("CARGO_PKG_VERSION");

/// number of buckets for each histogram
pub const HIST_BINS: usize = 50;

/// width and height of the saved png, in pixels
pub const PNG_SIZE: (u32, u32) = (1280, 720);

/// One csv column, named after its index
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub name: String,
    pub values: Vec<f64>,
}

impl Series {
    pub fn new(name: impl Into<String>, values: Vec<f64>) -> Series {
        Series {
            name: name.into(),
            values,
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }
}

/// The header labels and the raw data rows of a csv file
#[derive(Debug, Clone, PartialEq)]
pub struct CsvTable {
    pub x_label: String,
    pub y_label: String,
    /// (1-based line number in the file, raw row)
    rows: Vec<(usize, String)>,
}

impl CsvTable {
    /// Init a CsvTable from a csv file on disk
    pub fn from_csv(fin: &Path) -> Result<CsvTable, PlotError> {
        let text = fs::read_to_string(fin).map_err(|source| PlotError::Io {
            path: fin.to_path_buf(),
            source,
        })?;
        let table = CsvTable::parse(&text)?;
        debug!(
            "read {} data rows from {}, labels {:?} / {:?}",
            table.rows.len(),
            fin.display(),
            table.x_label,
            table.y_label
        );
        Ok(table)
    }

    /// The first line gives the x and y labels, any further header token is ignored.
    /// Every other line is a data row, except blank lines at the end of the file;
    /// the numbers are only parsed on column extraction.
    pub fn parse(text: &str) -> Result<CsvTable, PlotError> {
        let mut lines: Vec<(usize, &str)> = text
            .lines()
            .enumerate()
            .map(|(i, l)| (i + 1, l.trim()))
            .collect();
        while lines.last().map_or(false, |(_, l)| l.is_empty()) {
            lines.pop();
        }
        let mut lines = lines.into_iter();
        let (_, header) = lines.next().ok_or(PlotError::MissingHeader)?;
        let labels: Vec<&str> = header.split(',').map(str::trim).collect();
        if labels.len() < 2 {
            return Err(PlotError::IncompleteHeader {
                found: labels.len(),
            });
        }
        let rows: Vec<(usize, String)> = lines.map(|(n, l)| (n, l.to_string())).collect();
        if rows.is_empty() {
            return Err(PlotError::NoData);
        }
        Ok(CsvTable {
            x_label: labels[0].to_string(),
            y_label: labels[1].to_string(),
            rows,
        })
    }

    /// number of data rows
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// number of columns, as found in the first data row
    pub fn column_count(&self) -> usize {
        self.rows
            .first()
            .map(|(_, r)| r.split(',').count())
            .unwrap_or(0)
    }

    /// parses token `column` of every row, in file order; infinities and NAN are rejected
    pub fn column(&self, column: usize) -> Result<Series, PlotError> {
        let mut values = Vec::with_capacity(self.rows.len());
        for (line, row) in self.rows.iter() {
            let token = row
                .split(',')
                .nth(column)
                .ok_or(PlotError::MissingColumn {
                    line: *line,
                    column,
                })?
                .trim();
            let v: f64 = token.parse().map_err(|source| PlotError::ParseValue {
                line: *line,
                column,
                token: token.to_string(),
                source,
            })?;
            if !v.is_finite() {
                return Err(PlotError::NonFinite {
                    line: *line,
                    column,
                    token: token.to_string(),
                });
            }
            values.push(v);
        }
        Ok(Series::new(column.to_string(), values))
    }

    /// all the columns 0..column_count, stopping at the first bad value
    pub fn columns(&self) -> Result<Vec<Series>, PlotError> {
        (0..self.column_count()).map(|i| self.column(i)).collect()
    }
}

/// the input file name without its extension, used as title and output stem
pub fn base_name(fin: &Path) -> Result<String, PlotError> {
    fin.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| PlotError::NoBaseName {
            path: fin.to_path_buf(),
        })
}

/// `<base>.png` in the working directory
pub fn default_pngout(fin: &Path) -> Result<PathBuf, PlotError> {
    Ok(PathBuf::from(format!("{}.png", base_name(fin)?)))
}

/// min and max of the non-NAN values, None if there are none
pub fn min_and_max(s: &[f64]) -> Option<(f64, f64)> {
    let mut self_iter = s.iter().filter(|v| !v.is_nan());
    let (mut min, mut max) = match self_iter.next() {
        Some(v) => (*v, *v),
        None => return None,
    };
    for es in self_iter {
        if *es > max {
            max = *es
        }
        if *es < min {
            min = *es
        }
    }
    Some((min, max))
}

/// widens [min, max] by `frac` of its span on each side, or by 0.5 when the span is zero
pub fn padded_range(min: f64, max: f64, frac: f64) -> (f64, f64) {
    let span = max - min;
    if span == 0. {
        (min - 0.5, max + 0.5)
    } else {
        (min - span * frac, max + span * frac)
    }
}

/// Builds a figure of one plot variant from a parsed table and a title.
pub type FigureBuilder = fn(&CsvTable, &str) -> Result<Figure, PlotError>;

/// Reads the csv, builds the figure, and saves it; returns the png path.
/// All the values are parsed before the output file is created.
pub fn run(args: &PlotArgs, build: FigureBuilder) -> Result<PathBuf, PlotError> {
    let title = base_name(&args.csvin)?;
    let pngout = match &args.pngout {
        Some(p) => p.clone(),
        None => default_pngout(&args.csvin)?,
    };
    info!(
        "read data from {} and plot to {}",
        args.csvin.display(),
        pngout.display()
    );
    let table = CsvTable::from_csv(&args.csvin)?;
    let fig = build(&table, &title)?;
    fig.save_png(&pngout)?;
    info!(
        "saved {} series ({}) to {}",
        fig.series().len(),
        fig.legend_entries().join(", "),
        pngout.display()
    );
    Ok(pngout)
}
