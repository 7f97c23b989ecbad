use crate::cli::{parse_cli_with, PlotArgs};
use crate::{CsvTable, Figure, PlotError, PlotKind};

pub const NAME: &str = "csvplot_line";
pub const ABOUT: &str = "cli app to plot every csv column as a line against the row index";

/// Takes the CLI arguments that control the line plot.
pub fn parse_cli() -> PlotArgs {
    parse_cli_with(NAME, ABOUT)
}

/// One line figure with a series per column.
/// The header x label only names the axis, x is always the row index.
pub fn figure(table: &CsvTable, title: &str) -> Result<Figure, PlotError> {
    let mut fig = Figure::new(
        PlotKind::Line,
        title,
        table.x_label.as_str(),
        table.y_label.as_str(),
    );
    for s in table.columns()? {
        fig.add_series(s);
    }
    Ok(fig)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn x_sequence_ignores_the_header_label() {
        let table = CsvTable::parse("seconds,volts\n10,1\n20,2\n30,3\n40,4\n").unwrap();
        let fig = figure(&table, "sweep").unwrap();
        assert_eq!(fig.legend_entries(), vec!["0", "1"]);
        assert_eq!(fig.x_label, "seconds");
        for s in fig.series() {
            let xs: Vec<f64> = Figure::line_points(s).into_iter().map(|(x, _)| x).collect();
            assert_eq!(xs, vec![0., 1., 2., 3.]);
        }
        let ys: Vec<f64> = Figure::line_points(&fig.series()[0])
            .into_iter()
            .map(|(_, y)| y)
            .collect();
        assert_eq!(ys, vec![10., 20., 30., 40.]);
    }

    #[test]
    fn bad_token_fails_the_whole_figure() {
        let table = CsvTable::parse("x,y\n1,2\n3,oops\n").unwrap();
        assert!(matches!(
            figure(&table, "bad"),
            Err(PlotError::ParseValue { line: 3, column: 1, .. })
        ));
    }
}
