use crate::hist::{bin_counts, Histogram};
use crate::{min_and_max, padded_range, PlotError, Series, PNG_SIZE};
use plotters::prelude::*;
use std::path::Path;
use tracing::debug;

/// How every series of a figure is drawn
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlotKind {
    /// overlaid histograms with the given number of buckets per series
    Histogram { bins: usize },
    /// one line per series, against the row index
    Line,
}

/// A chart under construction, owned by the caller.
/// Series are appended explicitly and keep their insertion order,
/// which is also the order of the legend.
#[derive(Debug, Clone, PartialEq)]
pub struct Figure {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub kind: PlotKind,
    series: Vec<Series>,
}

impl Figure {
    pub fn new(
        kind: PlotKind,
        title: impl Into<String>,
        x_label: impl Into<String>,
        y_label: impl Into<String>,
    ) -> Figure {
        Figure {
            title: title.into(),
            x_label: x_label.into(),
            y_label: y_label.into(),
            kind,
            series: Vec::new(),
        }
    }

    pub fn add_series(&mut self, series: Series) {
        debug!("adding series {} with {} values", series.name, series.len());
        self.series.push(series);
    }

    pub fn series(&self) -> &[Series] {
        &self.series
    }

    pub fn legend_entries(&self) -> Vec<&str> {
        self.series.iter().map(|s| s.name.as_str()).collect()
    }

    /// the (x, y) points of a line series, x being the 0-based row index
    pub fn line_points(series: &Series) -> Vec<(f64, f64)> {
        series
            .values
            .iter()
            .enumerate()
            .map(|(i, &y)| (i as f64, y))
            .collect()
    }

    /// bucket counts of every series, in series order; empty for line figures
    pub fn histograms(&self) -> Vec<Histogram> {
        match self.kind {
            PlotKind::Histogram { bins } => self
                .series
                .iter()
                .map(|s| bin_counts(&s.values, bins))
                .collect(),
            PlotKind::Line => Vec::new(),
        }
    }

    /// x and y ranges of the chart area, with margins
    pub fn ranges(&self) -> Result<((f64, f64), (f64, f64)), PlotError> {
        self.ranges_with(&self.histograms())
    }

    fn ranges_with(&self, hists: &[Histogram]) -> Result<((f64, f64), (f64, f64)), PlotError> {
        for s in self.series.iter() {
            if let Some((lo, hi)) = min_and_max(&s.values) {
                if !(hi - lo).is_finite() {
                    return Err(PlotError::RangeOverflow {
                        series: s.name.clone(),
                    });
                }
            }
        }
        let ranges = match self.kind {
            PlotKind::Histogram { .. } => {
                let mut xmin = f64::INFINITY;
                let mut xmax = f64::NEG_INFINITY;
                let mut cmax = 0usize;
                for h in hists.iter().filter(|h| h.counts.iter().any(|&c| c > 0)) {
                    xmin = xmin.min(h.lo);
                    xmax = xmax.max(h.hi);
                    cmax = cmax.max(h.counts.iter().copied().max().unwrap_or(0));
                }
                if xmin > xmax {
                    return Ok(((0., 1.), (0., 1.)));
                }
                (
                    padded_range(xmin, xmax, 0.02),
                    (0., (cmax.max(1) as f64) * 1.05),
                )
            }
            PlotKind::Line => {
                let n = self.series.iter().map(|s| s.len()).max().unwrap_or(0);
                let all: Vec<f64> = self
                    .series
                    .iter()
                    .flat_map(|s| s.values.iter().copied())
                    .collect();
                let (ymin, ymax) = min_and_max(&all).unwrap_or((0., 1.));
                let xmax = n.saturating_sub(1) as f64;
                (padded_range(0., xmax, 0.02), padded_range(ymin, ymax, 0.1))
            }
        };
        let ((xmin, xmax), (ymin, ymax)) = ranges;
        if !(xmax - xmin).is_finite() || !(ymax - ymin).is_finite() {
            return Err(PlotError::RangeOverflow {
                series: self.legend_entries().join(","),
            });
        }
        Ok(ranges)
    }

    /// draws all the series with the legend in the upper right and writes the png,
    /// replacing any existing file; nothing is written when the ranges cannot be drawn
    pub fn save_png(&self, fout: &Path) -> Result<(), PlotError> {
        let hists = self.histograms();
        let ranges = self.ranges_with(&hists)?;
        self.draw(fout, &hists, ranges)
            .map_err(|e| PlotError::Render(e.to_string()))
    }

    fn draw(
        &self,
        fout: &Path,
        hists: &[Histogram],
        ((xmin, xmax), (ymin, ymax)): ((f64, f64), (f64, f64)),
    ) -> Result<(), Box<dyn std::error::Error>> {
        let root = BitMapBackend::new(fout, PNG_SIZE).into_drawing_area();
        root.fill(&WHITE)?;
        let mut chart = ChartBuilder::on(&root)
            .caption(&self.title, ("sans-serif", 32))
            .margin(20)
            .x_label_area_size(60)
            .y_label_area_size(90)
            .build_cartesian_2d(xmin..xmax, ymin..ymax)?;
        chart
            .configure_mesh()
            .light_line_style(&TRANSPARENT)
            .bold_line_style(RGBColor(150, 150, 150).stroke_width(1))
            .label_style(("sans-serif", 18))
            .x_desc(self.x_label.as_str())
            .y_desc(self.y_label.as_str())
            .draw()?;

        for (i, s) in self.series.iter().enumerate() {
            let color = Palette99::pick(i).to_rgba();
            match self.kind {
                PlotKind::Histogram { .. } => {
                    let bars = hists[i].bars().map(move |(x0, x1, c)| {
                        Rectangle::new([(x0, 0.), (x1, c as f64)], color.mix(0.5).filled())
                    });
                    chart
                        .draw_series(bars)?
                        .label(s.name.as_str())
                        .legend(move |(x, y)| {
                            Rectangle::new([(x, y - 6), (x + 20, y + 6)], color.filled())
                        });
                }
                PlotKind::Line => {
                    chart
                        .draw_series(LineSeries::new(
                            Figure::line_points(s),
                            color.stroke_width(2),
                        ))?
                        .label(s.name.as_str())
                        .legend(move |(x, y)| {
                            PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2))
                        });
                }
            }
        }

        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .background_style(&WHITE.mix(0.8))
            .border_style(&BLACK)
            .label_font(("sans-serif", 18))
            .draw()?;
        root.present()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three_columns() -> Figure {
        let mut fig = Figure::new(PlotKind::Line, "run", "t", "v");
        fig.add_series(Series::new("0", vec![1., 2., 3., 4.]));
        fig.add_series(Series::new("1", vec![0., -1., 5., 2.]));
        fig.add_series(Series::new("2", vec![7., 7., 7., 7.]));
        fig
    }

    #[test]
    fn legend_keeps_insertion_order() {
        assert_eq!(three_columns().legend_entries(), vec!["0", "1", "2"]);
    }

    #[test]
    fn line_x_is_the_row_index() {
        let fig = three_columns();
        for s in fig.series() {
            let xs: Vec<f64> = Figure::line_points(s).iter().map(|p| p.0).collect();
            assert_eq!(xs, vec![0., 1., 2., 3.]);
        }
    }

    #[test]
    fn line_ranges_cover_all_series() {
        let ((xmin, xmax), (ymin, ymax)) = three_columns().ranges().unwrap();
        assert!(xmin < 0. && xmax > 3.);
        assert!(ymin < -1. && ymax > 7.);
    }

    #[test]
    fn histogram_ranges_cover_values_and_counts() {
        let mut fig = Figure::new(PlotKind::Histogram { bins: 4 }, "run", "t", "v");
        fig.add_series(Series::new("0", vec![0., 0., 0., 8.]));
        fig.add_series(Series::new("1", vec![10., 12.]));
        let ((xmin, xmax), (ymin, ymax)) = fig.ranges().unwrap();
        assert!(xmin < 0. && xmax > 12.);
        assert_eq!(ymin, 0.);
        assert!(ymax >= 3.);
    }

    #[test]
    fn histograms_are_one_per_series() {
        let mut fig = Figure::new(PlotKind::Histogram { bins: 7 }, "run", "t", "v");
        fig.add_series(Series::new("0", vec![1., 2.]));
        fig.add_series(Series::new("1", vec![3.]));
        let hists = fig.histograms();
        assert_eq!(hists.len(), 2);
        assert!(hists.iter().all(|h| h.counts.len() == 7));
        assert!(three_columns().histograms().is_empty());
    }

    #[test]
    fn overflowing_span_is_refused() {
        for kind in [PlotKind::Line, PlotKind::Histogram { bins: 50 }].iter() {
            let mut fig = Figure::new(*kind, "wide", "t", "v");
            fig.add_series(Series::new("0", vec![1e308, -1e308]));
            assert!(matches!(
                fig.ranges(),
                Err(PlotError::RangeOverflow { ref series }) if series == "0"
            ));
        }
    }

    #[test]
    fn overflow_across_series_is_refused() {
        let mut fig = Figure::new(PlotKind::Line, "wide", "t", "v");
        fig.add_series(Series::new("0", vec![1.7e308, 1.6e308]));
        fig.add_series(Series::new("1", vec![-1.7e308]));
        assert!(matches!(
            fig.ranges(),
            Err(PlotError::RangeOverflow { .. })
        ));
    }

    #[test]
    fn infinite_values_never_reach_the_backend() {
        let mut fig = Figure::new(PlotKind::Line, "inf", "t", "v");
        fig.add_series(Series::new("0", vec![1., f64::INFINITY]));
        let fout = std::env::temp_dir().join(format!("csvplot_inf_{}.png", std::process::id()));
        let _ = std::fs::remove_file(&fout);
        assert!(matches!(
            fig.save_png(&fout),
            Err(PlotError::RangeOverflow { .. })
        ));
        assert!(!fout.exists());
    }
}
