use eframe::egui::{self, Color32, ColorImage, TextureHandle};
use patcher::PatchProfile;

// Robe renders for the selectable tiers, in profile order.
static TIER_PNGS: [&[u8]; 3] = [
    include_bytes!("../assets/tier_2.png"),
    include_bytes!("../assets/tier_3.png"),
    include_bytes!("../assets/tier_4.png"),
];

// Stand-in swatch colors when a render fails to decode.
const SWATCH_COLORS: [Color32; 3] = [
    Color32::from_rgb(0x8c, 0x26, 0x1e),
    Color32::from_rgb(0xb0, 0x3a, 0x22),
    Color32::from_rgb(0xe6, 0xe2, 0xd4),
];

/// Uploads one thumbnail texture per tier in the profile.
pub(crate) fn load_tier_thumbnails(
    ctx: &egui::Context,
    profile: &PatchProfile,
) -> Vec<TextureHandle> {
    profile
        .tiers
        .iter()
        .enumerate()
        .map(|(i, tier)| {
            let image = TIER_PNGS
                .get(i)
                .and_then(|bytes| decode_png(bytes))
                .unwrap_or_else(|| {
                    swatch(SWATCH_COLORS.get(i).copied().unwrap_or(Color32::GRAY))
                });
            ctx.load_texture(
                format!("tier_{}", tier.value),
                image,
                egui::TextureOptions::LINEAR,
            )
        })
        .collect()
}

fn decode_png(bytes: &[u8]) -> Option<ColorImage> {
    let image = image::load_from_memory(bytes).ok()?;
    let rgba = image.to_rgba8();
    let (width, height) = rgba.dimensions();
    Some(ColorImage::from_rgba_unmultiplied(
        [width as usize, height as usize],
        rgba.as_flat_samples().as_slice(),
    ))
}

fn swatch(color: Color32) -> ColorImage {
    ColorImage::new([48, 48], color)
}
