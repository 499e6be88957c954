//! SVG emission
//!
//! Writes one filled `<path>` per shape, painted back-to-front: shapes are
//! sorted by bounding-box area descending so large regions land first and
//! smaller overlapping regions paint on top. Equal areas keep scan order.
//! Color components are multiplied by 255 and written as floats, not
//! rounded to integers.

use crate::error::ScanResult;
use crate::scan::PixelScan;
use crate::shape::Shape;
use log::info;
use std::cmp::Reverse;
use std::io::Write;

impl PixelScan {
    /// Write the scan as an SVG document.
    ///
    /// Traces borders first if they are absent. Output is deterministic for
    /// a given scan.
    pub fn to_svg(&mut self, writer: &mut impl Write) -> ScanResult<()> {
        if !self.has_borders() {
            info!("scan has no borders yet, tracing them now");
            self.calculate_borders();
        }

        let mut sorted: Vec<&Shape> = self.shapes().iter().collect();
        sorted.sort_by_key(|shape| Reverse(shape.bounds().area()));

        let width = self.image_size.x as f32;
        let height = self.image_size.y as f32;
        writeln!(
            writer,
            "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"no\" ?>"
        )?;
        writeln!(
            writer,
            "<svg xmlns=\"http://www.w3.org/2000/svg\" xmlns:xlink=\"http://www.w3.org/1999/xlink\""
        )?;
        writeln!(
            writer,
            "     version=\"2\" width=\"{width}\" height=\"{height}\" viewport=\"0 0 {width} {height}\">"
        )?;

        for shape in sorted {
            let color = shape.color();
            write!(
                writer,
                "  <path fill=\"rgb({}, {}, {})\" d=\"",
                color.r * 255.0,
                color.g * 255.0,
                color.b * 255.0
            )?;
            let mut edges = shape.outer_edge().iter();
            if let Some(first) = edges.next() {
                write!(writer, "M {} {} ", first.x, first.y)?;
            }
            for edge in edges {
                write!(writer, " L {} {}", edge.x, edge.y)?;
            }
            writeln!(writer, " Z\" />")?;
        }

        writeln!(writer, "</svg>")?;
        Ok(())
    }
}
