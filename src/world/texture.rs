// Format-agnostic repository of decoded textures. Asset decoding (PNG
// etc.) happens in the host; the engine sees raw RGBA8 and handles.

use std::collections::HashMap;

/// Runtime handle for a texture in the bank. Stable for the bank's
/// lifetime.
pub type TextureId = u16;

/// Handle of the magenta fallback. Always 0 because [`TextureBank::new`]
/// inserts it first.
pub const MISSING_TEXTURE: TextureId = 0;

/// CPU-side pixel storage: RGBA8, row-major, 4 bytes per texel.
#[derive(Clone, Debug, PartialEq)]
pub struct Texture {
    pub w: usize,
    pub h: usize,
    pub pixels: Vec<u8>,
}

impl Texture {
    /// Wrap a decoded RGBA8 buffer; the length must match `w * h * 4`.
    pub fn from_rgba8(w: usize, h: usize, pixels: Vec<u8>) -> Result<Self, TextureError> {
        if pixels.len() != w * h * 4 {
            return Err(TextureError::SizeMismatch {
                w,
                h,
                len: pixels.len(),
            });
        }
        Ok(Self { w, h, pixels })
    }

    /// Texel at `(x, y)`; callers clamp coordinates in range.
    #[inline]
    pub fn texel(&self, x: usize, y: usize) -> [u8; 4] {
        let i = (y * self.w + x) * 4;
        [
            self.pixels[i],
            self.pixels[i + 1],
            self.pixels[i + 2],
            self.pixels[i + 3],
        ]
    }
}

/// The stand-in for assets that failed to load: a 2x2 magenta/black
/// checker, ugly enough to spot and valid everywhere a texture is.
impl Default for Texture {
    fn default() -> Self {
        const M: [u8; 4] = [255, 0, 255, 255];
        const K: [u8; 4] = [0, 0, 0, 255];
        let mut pixels = Vec::with_capacity(16);
        for texel in [M, K, K, M] {
            pixels.extend_from_slice(&texel);
        }
        Texture { w: 2, h: 2, pixels }
    }
}

/// Things that can go wrong when filling the bank.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TextureError {
    #[error("texture name `{0}` already present in bank")]
    Duplicate(String),

    #[error("pixel buffer of {len} bytes does not match {w}x{h} RGBA8")]
    SizeMismatch { w: usize, h: usize, len: usize },
}

/// Name → id → pixels mapping with a reserved fallback at id 0.
///
/// Lookups never fail: unknown ids resolve to the fallback so the
/// renderer keeps going when an asset is missing.
pub struct TextureBank {
    by_name: HashMap<String, TextureId>,
    data: Vec<Texture>,
}

impl Default for TextureBank {
    fn default() -> Self {
        Self::new()
    }
}

impl TextureBank {
    pub fn new() -> Self {
        let mut by_name = HashMap::new();
        by_name.insert("MISSING".into(), MISSING_TEXTURE);
        Self {
            by_name,
            data: vec![Texture::default()],
        }
    }

    /// Number of textures stored, fallback included.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.len() == 1
    }

    /// Id for a loaded texture by name, `None` if unknown.
    pub fn id(&self, name: &str) -> Option<TextureId> {
        self.by_name.get(name).copied()
    }

    /// Borrow by id; out-of-range ids resolve to the magenta fallback.
    #[inline]
    pub fn texture(&self, id: TextureId) -> &Texture {
        self.data
            .get(id as usize)
            .unwrap_or(&self.data[MISSING_TEXTURE as usize])
    }

    /// Insert a texture under `name`, returning its new id.
    pub fn insert<S: Into<String>>(
        &mut self,
        name: S,
        tex: Texture,
    ) -> Result<TextureId, TextureError> {
        let name = name.into();
        if self.by_name.contains_key(&name) {
            return Err(TextureError::Duplicate(name));
        }
        let id = self.data.len() as TextureId;
        self.data.push(tex);
        self.by_name.insert(name, id);
        Ok(id)
    }
}

/*======================================================================*/
/*                               Tests                                  */
/*======================================================================*/
