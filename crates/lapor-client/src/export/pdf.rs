use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::Serialize;

use crate::error::{ClientError, ClientResult};
use crate::images;

/// A4 portrait. The capture is scaled to the full page width; page height
/// is the printable band sliced out of the scaled image per page.
pub const PAGE_WIDTH_MM: f64 = 210.0;
pub const PAGE_HEIGHT_MM: f64 = 295.0;

/// A full-height PNG screenshot of the rendered report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RasterCapture {
    pub width_px: u32,
    pub height_px: u32,
    /// Data URI of the capture, placed on every page at its offset.
    pub image: String,
}

pub fn capture_from_png(bytes: &[u8]) -> ClientResult<RasterCapture> {
    let (width_px, height_px) = images::png_dimensions(bytes)
        .map_err(|detail| ClientError::export_capture_invalid(&detail))?;
    let payload = BASE64.encode(bytes);
    Ok(RasterCapture {
        width_px,
        height_px,
        image: format!("data:image/png;base64,{payload}"),
    })
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PdfPage {
    /// Vertical offset of the capture on this page, in millimeters.
    /// Zero on the first page, negative on every later page.
    pub image_offset_mm: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PdfPlan {
    pub page_width_mm: f64,
    pub page_height_mm: f64,
    pub image_width_mm: f64,
    pub image_height_mm: f64,
    pub pages: Vec<PdfPage>,
}

/// Slices the capture into A4 pages: the image is drawn once per page at a
/// rising negative offset, so each page windows the next band of the image.
pub fn plan_pages(capture: &RasterCapture) -> ClientResult<PdfPlan> {
    if capture.width_px == 0 || capture.height_px == 0 {
        return Err(ClientError::export_capture_invalid(
            "capture has a zero dimension",
        ));
    }

    let image_height_mm =
        (f64::from(capture.height_px) * PAGE_WIDTH_MM) / f64::from(capture.width_px);

    let mut pages = vec![PdfPage { image_offset_mm: 0.0 }];
    let mut height_left = image_height_mm - PAGE_HEIGHT_MM;
    while height_left > 0.0 {
        pages.push(PdfPage {
            image_offset_mm: height_left - image_height_mm,
        });
        height_left -= PAGE_HEIGHT_MM;
    }

    Ok(PdfPlan {
        page_width_mm: PAGE_WIDTH_MM,
        page_height_mm: PAGE_HEIGHT_MM,
        image_width_mm: PAGE_WIDTH_MM,
        image_height_mm,
        pages,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn capture(width_px: u32, height_px: u32) -> RasterCapture {
        RasterCapture {
            width_px,
            height_px,
            image: "data:image/png;base64,AAAA".to_string(),
        }
    }

    #[test]
    fn short_capture_fits_on_one_page() {
        // 794x1000 at 210mm wide scales to ~264mm tall, under one page.
        let plan = plan_pages(&capture(794, 1000)).unwrap();
        assert_eq!(plan.pages.len(), 1);
        assert_eq!(plan.pages[0].image_offset_mm, 0.0);
        assert!(plan.image_height_mm < PAGE_HEIGHT_MM);
    }

    #[test]
    fn tall_capture_slices_into_offset_pages() {
        // 794x4490 scales to ~1187mm, needing five 295mm pages.
        let plan = plan_pages(&capture(794, 4490)).unwrap();
        assert_eq!(plan.pages.len(), 5);
        assert_eq!(plan.pages[0].image_offset_mm, 0.0);

        // Page n shows the band starting at n * 295mm, so its offset is
        // -(n * 295) adjusted by the remainder on the final page.
        let second = plan.pages[1].image_offset_mm;
        let third = plan.pages[2].image_offset_mm;
        assert!(second < 0.0);
        assert!((third - (second - PAGE_HEIGHT_MM)).abs() < 1e-9);

        // Every offset keeps some of the image on the page.
        for page in &plan.pages {
            assert!(page.image_offset_mm > -plan.image_height_mm);
        }
    }

    #[test]
    fn exact_page_multiple_does_not_add_an_empty_page() {
        // Height chosen so the scaled image is exactly 2 * 295mm.
        // 210/794 * h = 590  =>  h = 590 * 794 / 210 = 2230.95..; use a
        // width that divides cleanly instead: 210px wide, 590px tall.
        let plan = plan_pages(&capture(210, 590)).unwrap();
        assert_eq!(plan.image_height_mm, 590.0);
        assert_eq!(plan.pages.len(), 2);
    }

    #[test]
    fn zero_width_capture_is_rejected() {
        let error = plan_pages(&capture(0, 100)).unwrap_err();
        assert_eq!(error.code, "export_capture_invalid");
    }

    #[test]
    fn capture_from_png_reads_dimensions() {
        let mut bytes = vec![0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
        bytes.extend_from_slice(&13u32.to_be_bytes());
        bytes.extend_from_slice(b"IHDR");
        bytes.extend_from_slice(&794u32.to_be_bytes());
        bytes.extend_from_slice(&2245u32.to_be_bytes());
        bytes.extend_from_slice(&[8, 6, 0, 0, 0]);

        let capture = capture_from_png(&bytes).unwrap();
        assert_eq!((capture.width_px, capture.height_px), (794, 2245));
        assert!(capture.image.starts_with("data:image/png;base64,"));
    }

    #[test]
    fn capture_from_garbage_is_rejected() {
        let error = capture_from_png(b"not a png").unwrap_err();
        assert_eq!(error.code, "export_capture_invalid");
    }
}
