//! Avatar data URL → egui texture, cached per data URL.

use eframe::egui;
use egui::TextureHandle;
use form_core::decode_data_url;

const PREVIEW_MAX_DIMENSION: u32 = 512;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewImage {
    pub width: usize,
    pub height: usize,
    pub rgba: Vec<u8>,
}

pub fn decode_preview_image(data_url: &str) -> Result<PreviewImage, String> {
    let (_, bytes) =
        decode_data_url(data_url).ok_or_else(|| "not an avatar data URL".to_string())?;
    let dynamic = image::load_from_memory(&bytes).map_err(|err| err.to_string())?;
    let resized = if dynamic.width() > PREVIEW_MAX_DIMENSION
        || dynamic.height() > PREVIEW_MAX_DIMENSION
    {
        dynamic.thumbnail(PREVIEW_MAX_DIMENSION, PREVIEW_MAX_DIMENSION)
    } else {
        dynamic
    }
    .to_rgba8();
    let width = resized.width() as usize;
    let height = resized.height() as usize;
    Ok(PreviewImage {
        width,
        height,
        rgba: resized.into_raw(),
    })
}

#[derive(Clone)]
pub enum CachedPreview {
    Ready(TextureHandle),
    /// The file passed the type and size checks but is not a decodable image.
    Failed(String),
}

#[derive(Default)]
pub struct AvatarTextureCache {
    cached: Option<(String, CachedPreview)>,
}

impl AvatarTextureCache {
    pub fn get(&mut self, ctx: &egui::Context, data_url: &str) -> &CachedPreview {
        let stale = self
            .cached
            .as_ref()
            .map(|(key, _)| key != data_url)
            .unwrap_or(true);
        if stale {
            self.cached = None;
        }
        let (_, preview) = self
            .cached
            .get_or_insert_with(|| (data_url.to_string(), load_preview(ctx, data_url)));
        preview
    }

    pub fn clear(&mut self) {
        self.cached = None;
    }
}

fn load_preview(ctx: &egui::Context, data_url: &str) -> CachedPreview {
    match decode_preview_image(data_url) {
        Ok(image) => {
            let color_image =
                egui::ColorImage::from_rgba_unmultiplied([image.width, image.height], &image.rgba);
            CachedPreview::Ready(ctx.load_texture(
                "avatar-preview",
                color_image,
                egui::TextureOptions::LINEAR,
            ))
        }
        Err(reason) => {
            tracing::debug!("avatar preview unavailable: {reason}");
            CachedPreview::Failed(reason)
        }
    }
}

#[cfg(test)]
mod tests {
    use form_core::encode_data_url;
    use shared::domain::AvatarMime;

    use super::*;

    fn encode_png(width: u32, height: u32) -> Vec<u8> {
        let image = image::RgbaImage::from_pixel(width, height, image::Rgba([245, 116, 99, 255]));
        let mut out = std::io::Cursor::new(Vec::new());
        image::DynamicImage::ImageRgba8(image)
            .write_to(&mut out, image::ImageFormat::Png)
            .expect("encode png");
        out.into_inner()
    }

    #[test]
    fn decodes_png_data_url_to_rgba() {
        let url = encode_data_url(AvatarMime::Png, &encode_png(3, 2));
        let preview = decode_preview_image(&url).expect("preview");
        assert_eq!((preview.width, preview.height), (3, 2));
        assert_eq!(preview.rgba.len(), 3 * 2 * 4);
        assert_eq!(&preview.rgba[..4], &[245, 116, 99, 255]);
    }

    #[test]
    fn large_images_are_scaled_down() {
        let url = encode_data_url(AvatarMime::Png, &encode_png(1024, 256));
        let preview = decode_preview_image(&url).expect("preview");
        assert_eq!(preview.width, 512);
        assert!(preview.height <= 128);
    }

    #[test]
    fn undecodable_payload_is_an_error() {
        let url = encode_data_url(AvatarMime::Jpeg, b"definitely not a jpeg");
        assert!(decode_preview_image(&url).is_err());
        assert!(decode_preview_image("data:text/plain;base64,aGk=").is_err());
    }

    #[test]
    fn cache_reuses_entry_until_data_url_changes() {
        let ctx = egui::Context::default();
        let mut cache = AvatarTextureCache::default();
        let first = encode_data_url(AvatarMime::Png, &encode_png(2, 2));

        let CachedPreview::Ready(texture) = cache.get(&ctx, &first).clone() else {
            panic!("expected texture");
        };
        let CachedPreview::Ready(again) = cache.get(&ctx, &first).clone() else {
            panic!("expected texture");
        };
        assert_eq!(texture.id(), again.id());

        let broken = encode_data_url(AvatarMime::Png, b"nope");
        assert!(matches!(cache.get(&ctx, &broken), CachedPreview::Failed(_)));
    }
}
