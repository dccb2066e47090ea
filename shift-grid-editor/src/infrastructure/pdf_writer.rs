// --- 1ページPDFの書き出し ---
//
// ラスタ画像を DeviceRGB の画像XObjectとして1枚だけ貼る。
// 配置 (Placement) は左上原点のmmなので、PDFの左下原点ptに直して cm で置く

use grid_features::{PageSpec, Placement, PT_PER_MM};
use image::RgbaImage;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};
use tracing::debug;

use crate::error::ExportError;
use crate::infrastructure::rasterizer::to_rgb_bytes;

const IMAGE_NAME: &str = "Im1";

pub fn write_single_page(image: &RgbaImage, page: PageSpec, placement: Placement) -> Result<Vec<u8>, ExportError> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let image_id = doc.add_object(Stream::new(
        dictionary! {
            "Type" => "XObject",
            "Subtype" => "Image",
            "Width" => image.width() as i64,
            "Height" => image.height() as i64,
            "ColorSpace" => "DeviceRGB",
            "BitsPerComponent" => 8,
        },
        to_rgb_bytes(image),
    ));

    let resources_id = doc.add_object(dictionary! {
        "XObject" => dictionary! {
            IMAGE_NAME => image_id,
        },
    });

    let width_pt = (placement.width_mm * PT_PER_MM) as f32;
    let height_pt = (placement.height_mm * PT_PER_MM) as f32;
    let left_pt = (placement.x_mm * PT_PER_MM) as f32;
    // 上端からの距離 -> 下端からの距離
    let bottom_pt = (page.height_pt() - (placement.y_mm + placement.height_mm) * PT_PER_MM) as f32;

    let content = Content {
        operations: vec![
            Operation::new("q", vec![]),
            Operation::new(
                "cm",
                vec![
                    width_pt.into(),
                    0.into(),
                    0.into(),
                    height_pt.into(),
                    left_pt.into(),
                    bottom_pt.into(),
                ],
            ),
            Operation::new("Do", vec![Object::Name(IMAGE_NAME.as_bytes().to_vec())]),
            Operation::new("Q", vec![]),
        ],
    };
    let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));

    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
    });

    let pages = dictionary! {
        "Type" => "Pages",
        "Kids" => vec![page_id.into()],
        "Count" => 1,
        "Resources" => resources_id,
        "MediaBox" => vec![
            0.into(),
            0.into(),
            (page.width_pt() as f32).into(),
            (page.height_pt() as f32).into(),
        ],
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.compress();

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)?;
    debug!(size = bytes.len(), "PDF生成完了");
    Ok(bytes)
}
