use image::{GrayImage, Luma};

use super::QRCode;
use crate::common::metadata::Color;

// Render
//------------------------------------------------------------------------------

impl QRCode {
    /// Grayscale raster with `module_sz` pixels per module, quiet zone included.
    pub fn to_image(&self, module_sz: u32) -> GrayImage {
        let total_sz = self.width() as u32 * module_sz;
        GrayImage::from_fn(total_sz, total_sz, |x, y| {
            let clr = self.get((y / module_sz) as usize, (x / module_sz) as usize);
            Luma([clr.select(255, 0)])
        })
    }

    pub fn to_str(&self, module_sz: usize) -> String {
        let w = self.width() * module_sz;
        let mut canvas = String::with_capacity(w * (w + 1) * 3);
        for row in self.rows() {
            let mut line = String::with_capacity(w * 3);
            for clr in row {
                for _ in 0..module_sz {
                    line.push(clr.select('█', ' '));
                }
            }
            for _ in 0..module_sz {
                canvas.push_str(&line);
                canvas.push('\n');
            }
        }
        canvas
    }

    pub fn to_svg(&self, module_sz: usize) -> String {
        let total_sz = self.width() * module_sz;
        let mut svg = format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" version="1.1" width="{total_sz}" height="{total_sz}" viewBox="0 0 {total_sz} {total_sz}" shape-rendering="crispEdges">"#
        );
        svg.push_str(r##"<rect width="100%" height="100%" fill="#ffffff"/>"##);
        for (r, row) in self.rows().enumerate() {
            for (c, clr) in row.iter().enumerate() {
                if *clr == Color::Light {
                    continue;
                }
                let (x, y) = (c * module_sz, r * module_sz);
                svg.push_str(&format!(
                    r##"<rect x="{x}" y="{y}" width="{module_sz}" height="{module_sz}" fill="#000000"/>"##
                ));
            }
        }
        svg.push_str("</svg>");
        svg
    }
}
