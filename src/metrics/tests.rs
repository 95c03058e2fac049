// src/metrics/tests.rs

//! Unit tests for the font metrics probe: the central-figure scan and the
//! render -> export -> reload -> measure round trip, driven through a
//! synthetic renderer.

// Note: included via `mod tests;` in src/metrics/mod.rs

#[cfg(test)]
mod probe_tests {
    use crate::metrics::renderer::ReferenceRenderer;
    use crate::metrics::{central_figure_extent, measure_glyph, GlyphMetrics, MeasureError};
    use anyhow::Result;
    use image::{Rgb, RgbImage};

    /// Renderer that paints a solid dark box centered on a white canvas,
    /// standing in for a real rasterizer.
    struct BoxRenderer {
        ink_width: u32,
        ink_height: u32,
        margin: u32,
    }

    impl ReferenceRenderer for BoxRenderer {
        fn render(&self, _text: &str, _font: &str, _size_pt: f64) -> Result<RgbImage> {
            let w = self.ink_width + 2 * self.margin;
            let h = self.ink_height + 2 * self.margin;
            let mut canvas = RgbImage::from_pixel(w, h, Rgb([255, 255, 255]));
            for y in self.margin..self.margin + self.ink_height {
                for x in self.margin..self.margin + self.ink_width {
                    canvas.put_pixel(x, y, Rgb([0, 0, 0]));
                }
            }
            Ok(canvas)
        }
    }

    /// Renderer that never puts down any ink.
    struct BlankRenderer;

    impl ReferenceRenderer for BlankRenderer {
        fn render(&self, _text: &str, _font: &str, _size_pt: f64) -> Result<RgbImage> {
            Ok(RgbImage::from_pixel(30, 30, Rgb([255, 255, 255])))
        }
    }

    #[test_log::test]
    fn central_figure_framed_by_uniform_runs() {
        // prefix 3, middle 4, suffix 2: extent is L - s - p = 4
        let profile = [9, 9, 9, 1, 2, 3, 4, 9, 9];
        assert_eq!(central_figure_extent(&profile), 4);
    }

    #[test_log::test]
    fn central_figure_of_uniform_profile_is_zero() {
        assert_eq!(central_figure_extent(&[7; 12]), 0);
        assert_eq!(central_figure_extent(&[7]), 0);
        assert_eq!(central_figure_extent(&[]), 0);
    }

    #[test_log::test]
    fn central_figure_with_asymmetric_background_levels() {
        // Leading and trailing runs may sit at different background values.
        let profile = [3, 3, 8, 8, 8, 5, 5, 5, 5];
        assert_eq!(central_figure_extent(&profile), 3);
    }

    #[test_log::test]
    fn measured_width_is_one_third_of_the_ink_run() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("probe.png");
        let renderer = BoxRenderer {
            ink_width: 30,
            ink_height: 14,
            margin: 5,
        };
        let glyph = measure_glyph(&renderer, "AnyFont", 5.0, &path).unwrap();
        assert_eq!(
            glyph,
            GlyphMetrics {
                width_px: 10,
                height_px: 14
            }
        );
    }

    #[test_log::test]
    fn probe_canvas_is_exported_and_left_behind() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("probe.png");
        let renderer = BoxRenderer {
            ink_width: 9,
            ink_height: 9,
            margin: 3,
        };
        measure_glyph(&renderer, "AnyFont", 5.0, &path).unwrap();
        assert!(path.exists(), "probe export should stay on disk");
    }

    #[test_log::test]
    fn blank_canvas_fails_with_collapsed_measurement() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("probe.png");
        let err = measure_glyph(&BlankRenderer, "NoSuchFont", 5.0, &path).unwrap_err();
        assert!(
            matches!(
                err.downcast_ref::<MeasureError>(),
                Some(MeasureError::Collapsed { width_px: 0, height_px: 0, .. })
            ),
            "unexpected error: {err:#}"
        );
    }
}
