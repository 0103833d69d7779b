//! Page slicing: splits a tall bitmap into page-sized horizontal bands.
//!
//! The bitmap is scaled uniformly so its width fills the page width. Each page then
//! holds `floor(page_height / ratio)` source rows; the last page holds whatever is left.
//! Slices tile the bitmap exactly: no row is skipped or drawn twice.

use crate::export::{ExportError, PageFormat};

/// Most pages a single export may produce.
pub const MAX_PAGES: u32 = 50;

/// One horizontal band of the source bitmap, drawn on its own page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSlice {
    pub page_index: usize,
    /// First source row (inclusive).
    pub source_y: u32,
    pub source_height: u32,
}

impl PageSlice {
    /// One past the last source row.
    pub fn source_end(&self) -> u32 {
        self.source_y + self.source_height
    }
}

/// Full pagination of one bitmap.
#[derive(Debug, Clone, PartialEq)]
pub struct PagePlan {
    /// Points per source pixel.
    pub ratio: f64,
    /// Source rows that fit on one page.
    pub page_source_height: u32,
    pub bitmap_width: u32,
    pub slices: Vec<PageSlice>,
}

impl PagePlan {
    /// Width of every drawn slice on the page, in points.
    pub fn draw_width_pt(&self) -> f64 {
        f64::from(self.bitmap_width) * self.ratio
    }

    /// Height of a drawn slice on the page, in points.
    pub fn draw_height_pt(&self, slice: &PageSlice) -> f64 {
        f64::from(slice.source_height) * self.ratio
    }
}

/// Computes the page plan for a `bitmap_width` × `bitmap_height` bitmap.
pub fn plan_pages(
    bitmap_width: u32,
    bitmap_height: u32,
    format: &PageFormat,
) -> Result<PagePlan, ExportError> {
    if bitmap_width == 0 || bitmap_height == 0 {
        return Err(ExportError::Raster(format!(
            "empty bitmap ({bitmap_width}x{bitmap_height})"
        )));
    }

    let ratio = f64::from(format.width_pt) / f64::from(bitmap_width);
    let page_source_height = (f64::from(format.height_pt) / ratio).floor() as u32;
    if page_source_height == 0 {
        return Err(ExportError::Raster(format!(
            "bitmap width {bitmap_width} is too narrow to paginate"
        )));
    }

    let page_count = bitmap_height.div_ceil(page_source_height);
    if page_count > MAX_PAGES {
        return Err(ExportError::Raster(format!(
            "{bitmap_width}x{bitmap_height} bitmap would need {page_count} pages (limit {MAX_PAGES})"
        )));
    }

    Ok(PagePlan {
        ratio,
        page_source_height,
        bitmap_width,
        slices: slice_rows(bitmap_height, page_source_height),
    })
}

/// Partitions `height` rows into consecutive bands of `page_source_height` rows.
///
/// Returns `ceil(height / page_source_height)` slices; the last may be shorter.
/// An exact multiple yields no trailing empty slice.
pub fn slice_rows(height: u32, page_source_height: u32) -> Vec<PageSlice> {
    if page_source_height == 0 {
        return Vec::new();
    }

    let mut slices = Vec::with_capacity(height.div_ceil(page_source_height) as usize);
    let mut y = 0;
    while y < height {
        let source_height = page_source_height.min(height - y);
        slices.push(PageSlice {
            page_index: slices.len(),
            source_y: y,
            source_height,
        });
        y += source_height;
    }
    slices
}

#[cfg(test)]
mod tests {
    use super::*;

    fn heights(slices: &[PageSlice]) -> Vec<u32> {
        slices.iter().map(|s| s.source_height).collect()
    }

    #[test]
    fn test_slice_rows_with_short_last_page() {
        let slices = slice_rows(1000, 400);
        assert_eq!(heights(&slices), vec![400, 400, 200]);
        assert_eq!(slices[2].source_y, 800);
    }

    #[test]
    fn test_slice_rows_exact_multiple_has_no_empty_tail() {
        let slices = slice_rows(800, 400);
        assert_eq!(heights(&slices), vec![400, 400]);
    }

    #[test]
    fn test_slice_rows_shorter_than_one_page() {
        assert_eq!(heights(&slice_rows(150, 400)), vec![150]);
    }

    #[test]
    fn test_slice_rows_zero_height() {
        assert!(slice_rows(0, 400).is_empty());
        assert!(slice_rows(400, 0).is_empty());
    }

    #[test]
    fn test_slices_tile_bitmap_exactly() {
        for height in 1..=300u32 {
            for page in [1u32, 7, 50, 100, 299, 300, 301] {
                let slices = slice_rows(height, page);
                assert_eq!(slices.len() as u32, height.div_ceil(page), "h={height} p={page}");

                let mut expected_y = 0;
                for (i, slice) in slices.iter().enumerate() {
                    assert_eq!(slice.page_index, i);
                    assert_eq!(slice.source_y, expected_y, "gap or overlap at page {i}");
                    assert!(slice.source_height > 0 && slice.source_height <= page);
                    expected_y = slice.source_end();
                }
                assert_eq!(expected_y, height);
            }
        }
    }

    #[test]
    fn test_plan_pages_a4_at_double_density() {
        // 595pt wide layout captured at 2x.
        let plan = plan_pages(1190, 4000, &PageFormat::a4_portrait()).unwrap();
        assert_eq!(plan.page_source_height, 1682);
        assert_eq!(heights(&plan.slices), vec![1682, 1682, 636]);
        assert!((plan.draw_width_pt() - 595.28).abs() < 1e-3);
        let first = plan.draw_height_pt(&plan.slices[0]);
        assert!(first <= 841.89 && first > 841.0);
    }

    #[test]
    fn test_plan_pages_unit_ratio() {
        let format = PageFormat {
            width_pt: 100.0,
            height_pt: 400.0,
        };
        let plan = plan_pages(100, 1000, &format).unwrap();
        assert!((plan.ratio - 1.0).abs() < 1e-9);
        assert_eq!(plan.page_source_height, 400);
        assert_eq!(heights(&plan.slices), vec![400, 400, 200]);
    }

    #[test]
    fn test_plan_pages_rejects_empty_bitmap() {
        let format = PageFormat::a4_portrait();
        assert!(matches!(plan_pages(0, 10, &format), Err(ExportError::Raster(_))));
        assert!(matches!(plan_pages(10, 0, &format), Err(ExportError::Raster(_))));
    }

    #[test]
    fn test_plan_pages_rejects_narrow_tall_bitmap() {
        // 2px wide: two source rows per A4 page, so 16000 rows would be 8000 pages.
        let err = plan_pages(2, 16_000, &PageFormat::a4_portrait()).unwrap_err();
        assert!(matches!(err, ExportError::Raster(_)));
    }

    #[test]
    fn test_plan_pages_accepts_page_limit_exactly() {
        let format = PageFormat {
            width_pt: 100.0,
            height_pt: 400.0,
        };
        let plan = plan_pages(100, 400 * MAX_PAGES, &format).unwrap();
        assert_eq!(plan.slices.len(), MAX_PAGES as usize);
        assert!(plan_pages(100, 400 * MAX_PAGES + 1, &format).is_err());
    }
}
