//! End-to-end checks of the image path: raw pixels to scaled center of mass.

use std::io::Cursor;

use comfig::{
    centroid, normalize_weights, rasterize, ConsoleIo, ConsoleMassSource, Grid, Result, Rgb8,
    ScaleRatio,
};

const SIZE: usize = 1000;
const RED: Rgb8 = Rgb8::from_hex(0xFF0000);
const BLUE: Rgb8 = Rgb8::from_hex(0x0000FF);

/// White canvas with a red block at rows 100..300, cols 200..400 and a blue
/// block at rows 600..800, cols 600..900, as an interleaved RGBA buffer.
fn two_block_rgba() -> Vec<u8> {
    let mut bytes = Vec::with_capacity(SIZE * SIZE * 4);
    for row in 0..SIZE {
        for col in 0..SIZE {
            let color = if (100..300).contains(&row) && (200..400).contains(&col) {
                RED
            } else if (600..800).contains(&row) && (600..900).contains(&col) {
                BLUE
            } else {
                Rgb8::WHITE
            };
            let (r, g, b) = color.to_parts();
            bytes.extend_from_slice(&[r, g, b, 255]);
        }
    }
    bytes
}

#[test]
fn million_pixels_three_colors_two_prompts() {
    let image = Grid::from_rgba_bytes(&two_block_rgba(), SIZE, SIZE).unwrap();

    let mut asked = Vec::new();
    let (masses, weights) = rasterize(&image, &mut |name: &str| -> Result<f64> {
        asked.push(name.to_owned());
        Ok(if name == "red" { 1.0 } else { 2.0 })
    })
    .unwrap();

    assert_eq!(2, asked.len());
    assert!(asked.contains(&"red".to_owned()));
    assert!(asked.contains(&"blue".to_owned()));
    assert_eq!(3, masses.len());
    assert_eq!((SIZE, SIZE), weights.shape());

    for (row, col, color) in image.iter_indexed() {
        assert_eq!(masses.get(color).unwrap(), weights[(row, col)]);
    }

    // red: 40_000 kg around (199.5, 299.5); blue: 120_000 kg around (699.5, 749.5)
    let c = centroid(&weights, ScaleRatio::UNIT).unwrap();
    assert!((c.row - 574.5).abs() < 1e-6, "{c:?}");
    assert!((c.col - 637.0).abs() < 1e-6, "{c:?}");

    let scaled = centroid(&weights, "2:1".parse().unwrap()).unwrap();
    assert_eq!("(287.25, 318.50)", scaled.to_string());

    let normalized = normalize_weights(&weights);
    assert_eq!(3, comfig::index_count(&normalized));
}

#[test]
fn console_answers_drive_the_whole_path() {
    let cells = vec![Rgb8::WHITE, RED, RED, Rgb8::WHITE, BLUE, Rgb8::WHITE];
    let image = Grid::from_vec(2, 3, cells).unwrap();

    let mut console = ConsoleIo::new(Cursor::new(b"x\n3\n-1\n6\n".to_vec()), Vec::new());
    let (_, weights) = rasterize(&image, &mut ConsoleMassSource::new(&mut console)).unwrap();
    assert_eq!(&[0.0, 3.0, 3.0, 0.0, 6.0, 0.0], weights.cells());

    let transcript = String::from_utf8(console.into_output()).unwrap();
    assert_eq!(2, transcript.matches("Type mass for color [red]").count());
    assert_eq!(2, transcript.matches("Type mass for color [blue]").count());
    assert!(!transcript.contains("[white]"));

    // mass 3 at (0, 1) and (0, 2), mass 6 at (1, 1)
    let c = centroid(&weights, ScaleRatio::UNIT).unwrap();
    assert!((c.row - 0.5).abs() < 1e-12);
    assert!((c.col - 1.25).abs() < 1e-12);
}
