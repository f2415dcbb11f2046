//=========================================================================
// Stock Asset Decoder
//
// The bundled `AssetDecoder` implementation. Turns raw archive entry
// bytes into CPU-side asset values:
//
//   texture — decoded to RGBA8 pixels via the `image` crate
//   font    — validated sfnt container, bytes kept for the rasterizer
//   sound   — validated, bytes kept for playback
//   music   — validated, bytes kept for streaming
//
// Audio validation runs through rodio when the `audio` feature is on
// (the default); without it a cheap container-magic sniff stands in so
// the pipeline still rejects garbage on audio-less builds.
//
//=========================================================================

//=== Standard Library Imports ============================================

#[cfg(feature = "audio")]
use std::io::Cursor;

//=== Internal Dependencies ===============================================

use crate::core::assets::{AssetDecoder, DecodeError};

//=== Texture =============================================================

/// A decoded image, as tightly packed RGBA8 rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Texture {
    pub width: u32,
    pub height: u32,
    /// `width * height * 4` bytes, row-major.
    pub pixels: Vec<u8>,
}

//=== FontFace ============================================================

/// A validated font file, kept as raw bytes for the text rasterizer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontFace {
    pub bytes: Vec<u8>,
}

//=== SoundBuffer =========================================================

/// A validated short sound effect, kept as raw encoded bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoundBuffer {
    pub bytes: Vec<u8>,
}

//=== MusicStream =========================================================

/// A validated music track, kept as raw encoded bytes for streaming.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MusicStream {
    pub bytes: Vec<u8>,
}

//=== StockDecoder ========================================================

/// Default decoder covering the four supported asset categories.
#[derive(Debug, Default, Clone, Copy)]
pub struct StockDecoder;

impl AssetDecoder for StockDecoder {
    type Texture = Texture;
    type Font = FontFace;
    type Sound = SoundBuffer;
    type Music = MusicStream;

    fn decode_texture(&self, bytes: &[u8]) -> Result<Texture, DecodeError> {
        let image = image::load_from_memory(bytes)
            .map_err(|e| DecodeError::new(format!("image decode failed: {}", e)))?;
        let rgba = image.to_rgba8();
        Ok(Texture {
            width: rgba.width(),
            height: rgba.height(),
            pixels: rgba.into_raw(),
        })
    }

    fn decode_font(&self, bytes: &[u8]) -> Result<FontFace, DecodeError> {
        if !has_sfnt_magic(bytes) {
            return Err(DecodeError::new("not an sfnt font container"));
        }
        Ok(FontFace {
            bytes: bytes.to_vec(),
        })
    }

    fn decode_sound(&self, bytes: &[u8]) -> Result<SoundBuffer, DecodeError> {
        validate_audio(bytes)?;
        Ok(SoundBuffer {
            bytes: bytes.to_vec(),
        })
    }

    fn decode_music(&self, bytes: &[u8]) -> Result<MusicStream, DecodeError> {
        validate_audio(bytes)?;
        Ok(MusicStream {
            bytes: bytes.to_vec(),
        })
    }
}

//=== Validation Helpers ==================================================

/// Recognizes the four sfnt container tags covering OTF/TTF/TTC files.
fn has_sfnt_magic(bytes: &[u8]) -> bool {
    matches!(
        bytes.get(..4),
        Some([0x00, 0x01, 0x00, 0x00]) | Some(b"OTTO") | Some(b"true") | Some(b"ttcf")
    )
}

#[cfg(feature = "audio")]
fn validate_audio(bytes: &[u8]) -> Result<(), DecodeError> {
    rodio::Decoder::new(Cursor::new(bytes.to_vec()))
        .map(|_| ())
        .map_err(|e| DecodeError::new(format!("audio decode failed: {}", e)))
}

#[cfg(not(feature = "audio"))]
fn validate_audio(bytes: &[u8]) -> Result<(), DecodeError> {
    let riff_wave = bytes.len() >= 12 && &bytes[..4] == b"RIFF" && &bytes[8..12] == b"WAVE";
    let ogg = matches!(bytes.get(..4), Some(b"OggS"));
    if riff_wave || ogg {
        Ok(())
    } else {
        Err(DecodeError::new("unrecognized audio container"))
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, RgbaImage};
    use std::io::Cursor;

    /// A 2x2 opaque red PNG, encoded in memory.
    fn red_png() -> Vec<u8> {
        let image = RgbaImage::from_pixel(2, 2, image::Rgba([255, 0, 0, 255]));
        let mut bytes = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .unwrap();
        bytes
    }

    /// Minimal valid WAV: one sample of 16-bit mono PCM at 8 kHz.
    fn tiny_wav() -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(b"RIFF");
        bytes.extend_from_slice(&38u32.to_le_bytes());
        bytes.extend_from_slice(b"WAVE");
        bytes.extend_from_slice(b"fmt ");
        bytes.extend_from_slice(&16u32.to_le_bytes());
        bytes.extend_from_slice(&1u16.to_le_bytes()); // PCM
        bytes.extend_from_slice(&1u16.to_le_bytes()); // mono
        bytes.extend_from_slice(&8000u32.to_le_bytes());
        bytes.extend_from_slice(&16000u32.to_le_bytes());
        bytes.extend_from_slice(&2u16.to_le_bytes());
        bytes.extend_from_slice(&16u16.to_le_bytes());
        bytes.extend_from_slice(b"data");
        bytes.extend_from_slice(&2u32.to_le_bytes());
        bytes.extend_from_slice(&0i16.to_le_bytes());
        bytes
    }

    #[test]
    fn texture_decodes_to_rgba_pixels() {
        let texture = StockDecoder.decode_texture(&red_png()).unwrap();
        assert_eq!(texture.width, 2);
        assert_eq!(texture.height, 2);
        assert_eq!(texture.pixels.len(), 16);
        assert_eq!(&texture.pixels[..4], &[255, 0, 0, 255]);
    }

    #[test]
    fn texture_rejects_garbage() {
        assert!(StockDecoder.decode_texture(b"not an image").is_err());
    }

    #[test]
    fn font_accepts_sfnt_containers() {
        for magic in [&[0x00u8, 0x01, 0x00, 0x00][..], &b"OTTO"[..], &b"true"[..], &b"ttcf"[..]] {
            let mut bytes = magic.to_vec();
            bytes.extend_from_slice(&[0; 12]);
            assert!(StockDecoder.decode_font(&bytes).is_ok(), "{:?}", magic);
        }
    }

    #[test]
    fn font_rejects_non_sfnt_bytes() {
        assert!(StockDecoder.decode_font(b"GIF89a").is_err());
        assert!(StockDecoder.decode_font(&[]).is_err());
    }

    #[test]
    fn sound_accepts_a_minimal_wav() {
        let sound = StockDecoder.decode_sound(&tiny_wav()).unwrap();
        assert_eq!(sound.bytes, tiny_wav());
    }

    #[test]
    fn music_rejects_garbage() {
        assert!(StockDecoder.decode_music(b"definitely not audio").is_err());
    }
}
