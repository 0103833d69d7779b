//! PDF assembly: one page per slice, each slice drawn as an image at the page's top-left.
//!
//! Slices are embedded as 8-bit DeviceRGB image XObjects, Flate-compressed. Transparent
//! pixels are flattened onto white, which is what a printed page would show.

use std::io::Write;

use flate2::write::ZlibEncoder;
use flate2::Compression;
use image::RgbaImage;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};

use crate::export::pagination::{PagePlan, PageSlice};
use crate::export::{ExportError, PageFormat};

/// Builds a multi-page document from a paginated bitmap.
pub trait DocumentAssembler: Send + Sync {
    fn assemble(
        &self,
        bitmap: &RgbaImage,
        plan: &PagePlan,
        format: &PageFormat,
    ) -> Result<Vec<u8>, ExportError>;
}

/// Writes the document with `lopdf`.
pub struct LopdfAssembler;

impl DocumentAssembler for LopdfAssembler {
    fn assemble(
        &self,
        bitmap: &RgbaImage,
        plan: &PagePlan,
        format: &PageFormat,
    ) -> Result<Vec<u8>, ExportError> {
        if plan.slices.is_empty() {
            return Err(ExportError::Assembly("nothing to paginate".to_string()));
        }

        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let mut kids: Vec<Object> = Vec::with_capacity(plan.slices.len());

        for slice in &plan.slices {
            let pixels = deflate(&slice_rgb(bitmap, slice))?;
            let image_id = doc.add_object(Stream::new(
                dictionary! {
                    "Type" => "XObject",
                    "Subtype" => "Image",
                    "Width" => i64::from(bitmap.width()),
                    "Height" => i64::from(slice.source_height),
                    "ColorSpace" => "DeviceRGB",
                    "BitsPerComponent" => 8_i64,
                    "Filter" => "FlateDecode",
                },
                pixels,
            ));

            let draw_width = plan.draw_width_pt() as f32;
            let draw_height = plan.draw_height_pt(slice) as f32;
            // PDF space grows upward; pin the slice to the top edge.
            let offset_y = format.height_pt - draw_height;

            let content = Content {
                operations: vec![
                    Operation::new("q", vec![]),
                    Operation::new(
                        "cm",
                        vec![
                            draw_width.into(),
                            Object::Integer(0),
                            Object::Integer(0),
                            draw_height.into(),
                            Object::Integer(0),
                            offset_y.into(),
                        ],
                    ),
                    Operation::new("Do", vec![Object::Name(b"Im0".to_vec())]),
                    Operation::new("Q", vec![]),
                ],
            };
            let encoded = content
                .encode()
                .map_err(|e| ExportError::Assembly(format!("content stream: {e}")))?;
            let content_id = doc.add_object(Stream::new(dictionary! {}, encoded));

            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
                "Resources" => dictionary! {
                    "XObject" => dictionary! {
                        "Im0" => image_id,
                    },
                },
                "MediaBox" => vec![
                    Object::Integer(0),
                    Object::Integer(0),
                    format.width_pt.into(),
                    format.height_pt.into(),
                ],
            });
            kids.push(page_id.into());
        }

        let page_count = kids.len() as i64;
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => page_count,
            }),
        );

        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut out = Vec::new();
        doc.save_to(&mut out)
            .map_err(|e| ExportError::Assembly(format!("write: {e}")))?;
        Ok(out)
    }
}

/// Copies the slice's rows out of `bitmap` as packed RGB, alpha flattened onto white.
pub fn slice_rgb(bitmap: &RgbaImage, slice: &PageSlice) -> Vec<u8> {
    let width = bitmap.width();
    let mut out = Vec::with_capacity(width as usize * slice.source_height as usize * 3);
    for y in slice.source_y..slice.source_end() {
        for x in 0..width {
            let [r, g, b, a] = bitmap.get_pixel(x, y).0;
            out.extend_from_slice(&[over_white(r, a), over_white(g, a), over_white(b, a)]);
        }
    }
    out
}

fn over_white(channel: u8, alpha: u8) -> u8 {
    let c = u16::from(channel);
    let a = u16::from(alpha);
    ((c * a + 255 * (255 - a) + 127) / 255) as u8
}

fn deflate(raw: &[u8]) -> Result<Vec<u8>, ExportError> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder
        .write_all(raw)
        .and_then(|_| encoder.finish())
        .map_err(|e| ExportError::Assembly(format!("compress: {e}")))
}
