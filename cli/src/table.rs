//! Weight grids as headerless CSV tables.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use comfig::{Grid, WeightGrid};
use tracing::debug;

use crate::error::TableError;

fn reader_builder() -> csv::ReaderBuilder {
    let mut builder = csv::ReaderBuilder::new();
    builder
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All);
    builder
}

/// Reads a table of numbers. Empty cells and cells missing from short rows
/// count as 0, as do explicit NaNs.
pub fn read_table<R: Read>(reader: R) -> Result<WeightGrid, TableError> {
    let mut reader = reader_builder().from_reader(reader);
    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let line = record.position().map_or(0, |p| p.line());
        let row = record
            .iter()
            .enumerate()
            .map(|(column, cell)| parse_cell(cell, line, column + 1))
            .collect::<Result<Vec<f64>, _>>()?;
        rows.push(row);
    }

    let grid = Grid::from_ragged_rows(rows, 0.0);
    if grid.is_empty() {
        return Err(TableError::Empty);
    }
    debug!(rows = grid.rows(), cols = grid.cols(), "loaded table");
    Ok(grid)
}

pub fn load_table(path: &Path) -> Result<WeightGrid, TableError> {
    let file = File::open(path).map_err(csv::Error::from)?;
    read_table(BufReader::new(file))
}

fn parse_cell(cell: &str, line: u64, column: usize) -> Result<f64, TableError> {
    if cell.is_empty() {
        return Ok(0.0);
    }
    match cell.parse::<f64>() {
        Ok(value) if value.is_nan() => Ok(0.0),
        Ok(value) => Ok(value),
        Err(_) => Err(TableError::NotANumber {
            line,
            column,
            value: cell.to_owned(),
        }),
    }
}

/// Writes `grid` as comma separated rows, no header.
pub fn write_table<W: Write>(grid: &WeightGrid, writer: W) -> csv::Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    for row in grid.iter_rows() {
        writer.write_record(row.iter().map(|value| value.to_string()))?;
    }
    writer.flush()?;
    Ok(())
}

pub fn save_table(grid: &WeightGrid, path: &Path) -> csv::Result<()> {
    let file = File::create(path)?;
    write_table(grid, BufWriter::new(file))
}

#[cfg(test)]
mod test {
    use comfig::Grid;

    use crate::error::TableError;
    use crate::table::{read_table, write_table};

    #[test]
    fn missing_cells_are_zero() {
        let grid = read_table("1,2,3\n4,,6\n7\n".as_bytes()).unwrap();
        assert_eq!((3, 3), grid.shape());
        assert_eq!(&[1.0, 2.0, 3.0, 4.0, 0.0, 6.0, 7.0, 0.0, 0.0], grid.cells());
    }

    #[test]
    fn first_row_is_data_not_header() {
        let grid = read_table(" 0.5 , 1e2\n".as_bytes()).unwrap();
        assert_eq!(&[0.5, 100.0], grid.cells());
    }

    #[test]
    fn nan_counts_as_missing() {
        let grid = read_table("NaN,2\n".as_bytes()).unwrap();
        assert_eq!(&[0.0, 2.0], grid.cells());
    }

    #[test]
    fn text_cells_are_rejected() {
        let err = read_table("1,2\n3,heavy\n".as_bytes()).unwrap_err();
        match err {
            TableError::NotANumber { line, column, value } => {
                assert_eq!(2, line);
                assert_eq!(2, column);
                assert_eq!("heavy", value);
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn empty_input_is_rejected() {
        assert!(matches!(read_table("".as_bytes()), Err(TableError::Empty)));
    }

    #[test]
    fn written_grid_reads_back() {
        let grid = Grid::from_vec(2, 3, vec![0.0, 1.5, 2.0, 0.1, 0.0, 1e-7]).unwrap();
        let mut out = Vec::new();
        write_table(&grid, &mut out).unwrap();
        assert_eq!("0,1.5,2\n0.1,0,0.0000001\n", String::from_utf8(out.clone()).unwrap());
        assert_eq!(grid, read_table(out.as_slice()).unwrap());
    }
}
