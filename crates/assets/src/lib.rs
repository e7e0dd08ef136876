//! Image loading for the sprite sheet and level maps.
//!
//! Decoded images are exposed to the rest of the game as ARGB pixels through
//! [`PixelSource`]. Only 8-bit PNGs are accepted: RGB, RGBA, or an 8-bit
//! palette whose entries are always opaque.

use std::io::Cursor;
use std::path::Path;

use genesis_core::PixelSource;
use image::{DynamicImage, GenericImageView, ImageFormat};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("failed to read image: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to read PNG header: {0}")]
    Header(#[from] png::DecodingError),
    #[error("failed to decode image: {0}")]
    Decode(#[from] image::ImageError),
    #[error("unsupported bit depth {bit_depth}; expected 8")]
    UnsupportedBitDepth { bit_depth: u8 },
    #[error("unsupported pixel layout {layout:?}; expected 8-bit RGB, RGBA or palette")]
    UnsupportedLayout { layout: image::ColorType },
}

/// A decoded image held as ARGB pixels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedImage {
    width: u32,
    height: u32,
    pixels: Vec<u32>,
}

impl DecodedImage {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, AssetError> {
        let path = path.as_ref();
        let image = Self::from_bytes(&std::fs::read(path)?)?;
        tracing::debug!(
            path = %path.display(),
            width = image.width,
            height = image.height,
            "image loaded"
        );
        Ok(image)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, AssetError> {
        let palette = read_header(bytes)?;
        let decoded = image::load_from_memory_with_format(bytes, ImageFormat::Png)?;
        Self::from_dynamic(decoded, palette)
    }

    fn from_dynamic(decoded: DynamicImage, palette: bool) -> Result<Self, AssetError> {
        let (width, height) = decoded.dimensions();
        let pixels = match decoded {
            DynamicImage::ImageRgb8(buf) => buf
                .pixels()
                .map(|p| argb(p.0[0], p.0[1], p.0[2], 0xff))
                .collect(),
            // A tRNS chunk turns palette images into RGBA; palette entries stay opaque.
            DynamicImage::ImageRgba8(buf) if palette => buf
                .pixels()
                .map(|p| argb(p.0[0], p.0[1], p.0[2], 0xff))
                .collect(),
            DynamicImage::ImageRgba8(buf) => buf
                .pixels()
                .map(|p| argb(p.0[0], p.0[1], p.0[2], p.0[3]))
                .collect(),
            other => {
                return Err(AssetError::UnsupportedLayout {
                    layout: other.color(),
                })
            }
        };
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }
}

/// Check the stored bit depth before the decoder expands it. Returns whether
/// the image is palette based.
fn read_header(bytes: &[u8]) -> Result<bool, AssetError> {
    let mut decoder = png::Decoder::new(Cursor::new(bytes));
    let info = decoder.read_header_info()?;
    if info.bit_depth != png::BitDepth::Eight {
        return Err(AssetError::UnsupportedBitDepth {
            bit_depth: info.bit_depth as u8,
        });
    }
    Ok(info.color_type == png::ColorType::Indexed)
}

#[inline]
fn argb(r: u8, g: u8, b: u8, a: u8) -> u32 {
    u32::from_be_bytes([a, r, g, b])
}

impl PixelSource for DecodedImage {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn pixel(&self, x: u32, y: u32) -> u32 {
        self.pixels[(y as usize) * (self.width as usize) + (x as usize)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode_png(img: DynamicImage) -> Vec<u8> {
        let mut bytes = Vec::new();
        img.write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();
        bytes
    }

    fn encode_raw(
        width: u32,
        color: png::ColorType,
        depth: png::BitDepth,
        palette: Option<(&[u8], &[u8])>,
        data: &[u8],
    ) -> Vec<u8> {
        let mut bytes = Vec::new();
        {
            let mut encoder = png::Encoder::new(&mut bytes, width, 1);
            encoder.set_color(color);
            encoder.set_depth(depth);
            if let Some((rgb, trns)) = palette {
                encoder.set_palette(rgb.to_vec());
                if !trns.is_empty() {
                    encoder.set_trns(trns.to_vec());
                }
            }
            let mut writer = encoder.write_header().unwrap();
            writer.write_image_data(data).unwrap();
            writer.finish().unwrap();
        }
        bytes
    }

    const PALETTE: [u8; 6] = [0x44, 0xc4, 0xff, 0x15, 0x6b, 0x20];

    #[test]
    fn rgb_png_is_opaque_argb() {
        let mut rgb = image::RgbImage::new(2, 1);
        rgb.put_pixel(0, 0, image::Rgb([0x44, 0xc4, 0xff]));
        rgb.put_pixel(1, 0, image::Rgb([0x15, 0x6b, 0x20]));

        let decoded = DecodedImage::from_bytes(&encode_png(DynamicImage::ImageRgb8(rgb))).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (2, 1));
        assert_eq!(decoded.pixel(0, 0), 0xff44_c4ff);
        assert_eq!(decoded.pixel(1, 0), 0xff15_6b20);
    }

    #[test]
    fn rgba_png_keeps_alpha() {
        let mut rgba = image::RgbaImage::new(1, 2);
        rgba.put_pixel(0, 1, image::Rgba([0xff, 0x00, 0xff, 0x80]));

        let decoded =
            DecodedImage::from_bytes(&encode_png(DynamicImage::ImageRgba8(rgba))).unwrap();
        assert_eq!(decoded.pixel(0, 0), 0);
        assert_eq!(decoded.pixel(0, 1), 0x80ff_00ff);
    }

    #[test]
    fn eight_bit_palette_loads_opaque() {
        let bytes = encode_raw(
            2,
            png::ColorType::Indexed,
            png::BitDepth::Eight,
            Some((&PALETTE[..], &[0u8; 0][..])),
            &[1, 0],
        );
        let decoded = DecodedImage::from_bytes(&bytes).unwrap();
        assert_eq!(decoded.pixel(0, 0), 0xff15_6b20);
        assert_eq!(decoded.pixel(1, 0), 0xff44_c4ff);
    }

    #[test]
    fn palette_transparency_is_ignored() {
        let bytes = encode_raw(
            2,
            png::ColorType::Indexed,
            png::BitDepth::Eight,
            Some((&PALETTE[..], &[0u8, 0][..])),
            &[0, 1],
        );
        let decoded = DecodedImage::from_bytes(&bytes).unwrap();
        assert_eq!(decoded.pixel(0, 0), 0xff44_c4ff);
        assert_eq!(decoded.pixel(1, 0), 0xff15_6b20);
    }

    #[test]
    fn non_eight_bit_depths_are_rejected() {
        let four_bit = encode_raw(
            2,
            png::ColorType::Indexed,
            png::BitDepth::Four,
            Some((&PALETTE[..], &[0u8; 0][..])),
            &[0x10],
        );
        assert!(matches!(
            DecodedImage::from_bytes(&four_bit).unwrap_err(),
            AssetError::UnsupportedBitDepth { bit_depth: 4 }
        ));

        let sixteen_bit = encode_raw(1, png::ColorType::Rgb, png::BitDepth::Sixteen, None, &[0; 6]);
        assert!(matches!(
            DecodedImage::from_bytes(&sixteen_bit).unwrap_err(),
            AssetError::UnsupportedBitDepth { bit_depth: 16 }
        ));
    }

    #[test]
    fn grayscale_is_rejected() {
        let gray = image::GrayImage::new(4, 4);
        let err = DecodedImage::from_bytes(&encode_png(DynamicImage::ImageLuma8(gray))).unwrap_err();
        assert!(matches!(
            err,
            AssetError::UnsupportedLayout {
                layout: image::ColorType::L8
            }
        ));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = DecodedImage::open("does/not/exist.png").unwrap_err();
        assert!(matches!(err, AssetError::Io(_)));
    }

    #[test]
    fn garbage_is_header_error() {
        let err = DecodedImage::from_bytes(b"not an image").unwrap_err();
        assert!(matches!(err, AssetError::Header(_)));
    }
}
