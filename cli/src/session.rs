//! One interactive run: pick a source, load it, ask for the scale (and the
//! color masses for images), then report the center of mass.

use std::path::{Path, PathBuf};

use clap::ValueEnum;
use image::{ImageError, ImageReader};
use comfig::{
    rasterize, Centroid, Console, ConsoleMassSource, Grid, Prompt, Rgb8, ScaleRatio, WeightGrid,
};
use tracing::info;

use crate::chart::save_chart;
use crate::error::AppError;
use crate::table::{load_table, save_table};

#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum SourceKind {
    /// Headerless CSV table of masses
    Csv,
    /// Color-coded raster image
    Image,
}

impl SourceKind {
    fn noun(self) -> &'static str {
        match self {
            SourceKind::Csv => "spreadsheet",
            SourceKind::Image => "image",
        }
    }
}

/// Answers known before the run starts; anything left `None` is asked.
#[derive(Debug, Clone, Default)]
pub struct SessionOptions {
    pub kind: Option<SourceKind>,
    pub input: Option<PathBuf>,
    pub scale: Option<ScaleRatio>,
    /// Where the image path stores its weight grid
    pub grid_out: Option<PathBuf>,
    pub chart: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub shape: (usize, usize),
    /// Center of mass in grid units
    pub raw: Centroid,
    /// Center of mass in physical units
    pub scaled: Centroid,
}

pub fn run<C: Console + ?Sized>(console: &mut C, options: &SessionOptions) -> Result<Report, AppError> {
    let kind = match options.kind {
        Some(kind) => kind,
        None => ask_kind(console)?,
    };
    let path = match &options.input {
        Some(path) => path.clone(),
        None => ask_path(console)?,
    };
    info!(?kind, path = %path.display(), "processing source");

    let (weights, scale) = match kind {
        SourceKind::Csv => {
            let weights = load_table(&path)?;
            let scale = scale_for(console, options, kind, weights.shape())?;
            (weights, scale)
        }
        SourceKind::Image => {
            let image = load_image(&path)?;
            let scale = scale_for(console, options, kind, image.shape())?;
            let (masses, weights) = rasterize(&image, &mut ConsoleMassSource::new(&mut *console))?;
            info!(colors = masses.len(), "masses assigned");
            (weights, scale)
        }
    };
    finish(console, options, kind, weights, scale)
}

/// Computes the center of mass, then writes the output files. Nothing is
/// written when the center is undefined.
fn finish<C: Console + ?Sized>(
    console: &mut C,
    options: &SessionOptions,
    kind: SourceKind,
    weights: WeightGrid,
    scale: ScaleRatio,
) -> Result<Report, AppError> {
    let raw = Centroid::of(&weights)?;
    let scaled = raw.scaled(scale);
    info!(row = raw.row, col = raw.col, %scale, "center of mass found");

    if let (SourceKind::Image, Some(grid_out)) = (kind, &options.grid_out) {
        save_table(&weights, grid_out).map_err(|source| AppError::GridWrite {
            path: grid_out.clone(),
            source,
        })?;
        info!(path = %grid_out.display(), "weight grid written");
    }

    console.notify(&format!("Center of mass is: {scaled}"))?;

    if let Some(chart) = &options.chart {
        save_chart(&weights, raw, scaled, chart).map_err(|source| AppError::ChartWrite {
            path: chart.clone(),
            source,
        })?;
        info!(path = %chart.display(), "chart written");
    }

    Ok(Report {
        shape: weights.shape(),
        raw,
        scaled,
    })
}

/// Decodes `path` into a pixel grid, dropping any alpha channel.
///
/// The format is sniffed from the file content, the extension is only a
/// fallback.
pub fn load_image(path: &Path) -> Result<Grid<Rgb8>, AppError> {
    let decoded = ImageReader::open(path)
        .and_then(ImageReader::with_guessed_format)
        .map_err(ImageError::from)
        .and_then(|reader| reader.decode())
        .map_err(|source| AppError::InvalidImage {
            path: path.to_path_buf(),
            source,
        })?;
    let rgb = decoded.to_rgb8();
    let (width, height) = rgb.dimensions();
    Ok(Grid::from_rgb_bytes(rgb.as_raw(), width as usize, height as usize)?)
}

fn ask_kind<C: Console + ?Sized>(console: &mut C) -> Result<SourceKind, AppError> {
    let kind = Prompt::new(
        "Select type of file:\n1 - CSV\n2 - PNG\n>>> ",
        "\nInvalid type.",
        |line: &str| match line.trim() {
            "1" => Some(SourceKind::Csv),
            "2" => Some(SourceKind::Image),
            _ => None,
        },
    )
    .run(console)?;
    Ok(kind)
}

fn ask_path<C: Console + ?Sized>(console: &mut C) -> Result<PathBuf, AppError> {
    let path = Prompt::new(
        "Type path to file:\n>>> ",
        "\nFile does not exist or is unreadable.",
        |line: &str| {
            let path = PathBuf::from(line.trim());
            path.is_file().then_some(path)
        },
    )
    .run(console)?;
    Ok(path)
}

fn scale_for<C: Console + ?Sized>(
    console: &mut C,
    options: &SessionOptions,
    kind: SourceKind,
    (rows, cols): (usize, usize),
) -> Result<ScaleRatio, AppError> {
    if let Some(scale) = options.scale {
        return Ok(scale);
    }
    let noun = kind.noun();
    let scale = Prompt::new(
        format!(
            "Your {noun} is of size ({rows}, {cols}). Type the scale of the {noun} (e.g. 2:1):\n>>> "
        ),
        "\nInvalid scale format...",
        |line: &str| line.parse::<ScaleRatio>().ok(),
    )
    .run(console)?;
    Ok(scale)
}

#[cfg(test)]
mod test {
    use std::fs;
    use std::io::Cursor;
    use std::path::PathBuf;

    use comfig::{Centroid, ConsoleIo, Error, Rgb8};
    use image::{ImageFormat, Rgb, RgbImage};

    use crate::error::AppError;
    use crate::session::{load_image, run, SessionOptions, SourceKind};
    use crate::table::load_table;

    fn scratch(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("comfig-session-{}-{name}", std::process::id()))
    }

    fn console(input: &str) -> ConsoleIo<Cursor<Vec<u8>>, Vec<u8>> {
        ConsoleIo::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    #[test]
    fn table_session_asks_kind_path_and_scale() {
        let table = scratch("table.csv");
        fs::write(&table, "0,0,0\n0,0,8\n").unwrap();

        let answers = format!("3\n1\n/definitely/not/here.csv\n{}\n2\n2:1\n", table.display());
        let mut io = console(&answers);
        let report = run(&mut io, &SessionOptions::default()).unwrap();
        fs::remove_file(&table).unwrap();

        assert_eq!((2, 3), report.shape);
        assert_eq!(Centroid { row: 1.0, col: 2.0 }, report.raw);
        assert_eq!(Centroid { row: 0.5, col: 1.0 }, report.scaled);

        let transcript = String::from_utf8(io.into_output()).unwrap();
        assert_eq!(1, transcript.matches("Invalid type.").count());
        assert_eq!(1, transcript.matches("File does not exist or is unreadable.").count());
        assert_eq!(1, transcript.matches("Invalid scale format...").count());
        assert!(transcript.contains("Your spreadsheet is of size (2, 3)."));
        assert!(transcript.contains("Center of mass is: (0.50, 1.00)"));
    }

    #[test]
    fn image_session_asks_each_color_once_and_writes_grid() {
        let png = scratch("shape.png");
        let grid_out = scratch("shape-grid.csv");
        let mut img = RgbImage::from_pixel(4, 2, Rgb([255, 255, 255]));
        img.put_pixel(0, 0, Rgb([255, 0, 0]));
        img.put_pixel(1, 0, Rgb([255, 0, 0]));
        img.put_pixel(3, 1, Rgb([0, 0, 255]));
        img.save(&png).unwrap();

        let options = SessionOptions {
            kind: Some(SourceKind::Image),
            input: Some(png.clone()),
            scale: None,
            grid_out: Some(grid_out.clone()),
            chart: None,
        };
        let mut io = console("1:1\nlots\n1\n2\n");
        let report = run(&mut io, &options).unwrap();
        let written = load_table(&grid_out).unwrap();
        fs::remove_file(&png).unwrap();
        fs::remove_file(&grid_out).unwrap();

        assert_eq!((2, 4), report.shape);
        assert_eq!(&[1.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 2.0], written.cells());
        // masses 1 at (0, 0), (0, 1) and 2 at (1, 3)
        assert!((report.raw.row - 0.5).abs() < 1e-12);
        assert!((report.raw.col - 1.75).abs() < 1e-12);

        let transcript = String::from_utf8(io.into_output()).unwrap();
        assert!(transcript.contains("Your image is of size (2, 4)."));
        assert_eq!(2, transcript.matches("Type mass for color [red]").count());
        assert_eq!(1, transcript.matches("Type mass for color [blue]").count());
        assert!(!transcript.contains("[white]"));
    }

    #[test]
    fn all_white_image_has_no_center_and_writes_nothing() {
        let png = scratch("blank.png");
        let grid_out = scratch("blank-grid.csv");
        let chart = scratch("blank-chart.png");
        RgbImage::from_pixel(3, 3, Rgb([255, 255, 255])).save(&png).unwrap();
        let options = SessionOptions {
            kind: Some(SourceKind::Image),
            input: Some(png.clone()),
            scale: Some("1:1".parse().unwrap()),
            grid_out: Some(grid_out.clone()),
            chart: Some(chart.clone()),
        };
        let err = run(&mut console(""), &options).unwrap_err();
        fs::remove_file(&png).unwrap();
        assert!(matches!(err, AppError::Core(Error::ZeroTotalMass)));
        assert!(!err.is_invalid_source());
        assert!(!grid_out.exists());
        assert!(!chart.exists());
    }

    #[test]
    fn image_format_comes_from_content_not_extension() {
        let mut img = RgbImage::from_pixel(2, 2, Rgb([255, 255, 255]));
        img.put_pixel(1, 0, Rgb([0, 0, 128]));
        for name in ["shape.img", "shape"] {
            let path = scratch(name);
            img.save_with_format(&path, ImageFormat::Png).unwrap();
            let grid = load_image(&path).unwrap();
            fs::remove_file(&path).unwrap();
            assert_eq!((2, 2), grid.shape());
            assert_eq!(Rgb8::from_hex(0x000080), grid[(0, 1)], "{name}");
        }
    }

    #[test]
    fn undecodable_image_is_an_invalid_source() {
        let bogus = scratch("bogus.png");
        fs::write(&bogus, b"not a png").unwrap();
        let options = SessionOptions {
            kind: Some(SourceKind::Image),
            input: Some(bogus.clone()),
            ..SessionOptions::default()
        };
        let err = run(&mut console(""), &options).unwrap_err();
        fs::remove_file(&bogus).unwrap();
        assert!(err.is_invalid_source());
        assert_eq!("Invalid image file", err.user_message());
    }
}
