//=========================================================================
// Asset System
//
// Typed asset storage plus the archive loading pipeline.
//
// Architecture:
//   AssetBank<D>
//     ├─ textures / fonts / sounds / music: HashMap<String, ...>
//     └─ progress counters (total_to_load, loaded_count, flags)
//
// Assets arrive in bulk from a compressed archive; entries are classified
// by file extension and decoded through an `AssetDecoder` collaborator.
// The bank never unloads or reloads (no hot-reload in this design).
//
// Error policy is two-tier: failure to open or read the archive is fatal
// (the screen is unusable without its bundle), everything else is
// absorbed — unsupported extensions are skipped, failed decodes are
// logged and dropped.
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::collections::HashMap;
use std::io;
use std::path::PathBuf;

//=== External Crates =====================================================

use log::warn;

//=== Module Declarations =================================================

mod archive;

pub use archive::{ArchiveEntry, ArchiveLoadJob};

//=== Exit Code ===========================================================

/// Process exit status used when an asset archive cannot be opened.
///
/// Distinguished from a generic failure so wrapper scripts can tell a
/// missing/corrupt asset bundle apart from other errors.
pub const ARCHIVE_FAILURE_EXIT_CODE: i32 = 99;

//=== AssetDecoder ========================================================

/// Decoding collaborator turning raw archive bytes into typed assets.
///
/// The engine treats decoding as external: it only routes bytes to the
/// right method based on the entry's extension. Implementations choose
/// the concrete asset representations via the associated types.
///
/// [`crate::StockDecoder`] is the bundled implementation; tests typically
/// substitute a stub.
pub trait AssetDecoder {
    type Texture;
    type Font;
    type Sound;
    type Music;

    /// Decodes an image (`png`, `jpg`, `jpeg`).
    fn decode_texture(&self, bytes: &[u8]) -> Result<Self::Texture, DecodeError>;

    /// Decodes a font face (`otf`).
    fn decode_font(&self, bytes: &[u8]) -> Result<Self::Font, DecodeError>;

    /// Decodes a short sound buffer (`wav`).
    fn decode_sound(&self, bytes: &[u8]) -> Result<Self::Sound, DecodeError>;

    /// Decodes streamed music (`ogg`).
    fn decode_music(&self, bytes: &[u8]) -> Result<Self::Music, DecodeError>;
}

//=== DecodeError =========================================================

/// A single asset failed to decode.
///
/// Decode failures are not fatal: the loader logs them and skips the
/// entry (the entry still counts toward `total_to_load`, see the counting
/// note on [`AssetBank`]).
#[derive(Debug)]
pub struct DecodeError {
    reason: String,
}

impl DecodeError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl std::fmt::Display for DecodeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "decode failed: {}", self.reason)
    }
}

impl std::error::Error for DecodeError {}

//=== ArchiveError ========================================================

/// Archive-level failures. These are the fatal tier of the error policy.
#[derive(Debug)]
pub enum ArchiveError {
    /// The archive file could not be opened.
    Open { path: PathBuf, source: io::Error },

    /// The file opened but is not a readable archive.
    Container {
        path: PathBuf,
        source: zip::result::ZipError,
    },

    /// An entry could not be located inside the archive.
    Entry {
        index: usize,
        source: zip::result::ZipError,
    },

    /// An entry's bytes could not be read out.
    EntryRead { name: String, source: io::Error },
}

impl std::fmt::Display for ArchiveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Open { path, source } => {
                write!(f, "cannot open archive {}: {}", path.display(), source)
            }
            Self::Container { path, source } => {
                write!(f, "{} is not a readable archive: {}", path.display(), source)
            }
            Self::Entry { index, source } => {
                write!(f, "archive entry #{} unavailable: {}", index, source)
            }
            Self::EntryRead { name, source } => {
                write!(f, "cannot read archive entry {}: {}", name, source)
            }
        }
    }
}

impl std::error::Error for ArchiveError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Open { source, .. } | Self::EntryRead { source, .. } => Some(source),
            Self::Container { source, .. } | Self::Entry { source, .. } => Some(source),
        }
    }
}

//=== AssetKind ===========================================================

/// Asset classification derived from an entry's file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum AssetKind {
    Texture,
    Font,
    Sound,
    Music,
}

impl AssetKind {
    /// Classifies a bare file name (no directory part) by the substring
    /// after its last `.`. Returns `None` for unsupported or missing
    /// extensions; those entries are never decoded.
    pub(crate) fn classify(file_name: &str) -> Option<Self> {
        let (stem, extension) = file_name.rsplit_once('.')?;
        if stem.is_empty() {
            return None;
        }
        match extension {
            "png" | "jpg" | "jpeg" => Some(Self::Texture),
            "otf" => Some(Self::Font),
            "wav" => Some(Self::Sound),
            "ogg" => Some(Self::Music),
            _ => None,
        }
    }
}

/// Logical asset key: the portion of the file name before the first `.`.
pub(crate) fn logical_key(file_name: &str) -> &str {
    file_name.split('.').next().unwrap_or(file_name)
}

/// Strips any directory part from an archive entry path.
///
/// Directory entries themselves (`assets/`) reduce to an empty name and
/// fall out of both counting and classification.
pub(crate) fn entry_file_name(entry_path: &str) -> &str {
    entry_path.rsplit('/').next().unwrap_or(entry_path)
}

//=== AssetBank ===========================================================

/// Typed asset storage for one screen, keyed by logical name.
///
/// Constructed empty, populated exactly once by
/// [`AssetBank::load_from_archive`] (or the background variant via
/// [`AssetBank::absorb`]).
///
/// # Counting note
///
/// `total_to_load` counts every archive entry whose file name contains a
/// `.` — including entries with unsupported extensions, which are later
/// skipped. `loaded_count` can therefore finish below `total_to_load`
/// when an archive carries stray files. This matches the behavior asset
/// bundles have always been authored against and is kept deliberately;
/// treat `is_loaded` (not counter equality) as the completion signal.
pub struct AssetBank<D: AssetDecoder> {
    textures: HashMap<String, D::Texture>,
    fonts: HashMap<String, D::Font>,
    sounds: HashMap<String, D::Sound>,
    music: HashMap<String, D::Music>,
    total_to_load: usize,
    loaded_count: usize,
    loading: bool,
    loaded: bool,
}

impl<D: AssetDecoder> AssetBank<D> {
    /// Creates an empty bank.
    pub fn new() -> Self {
        Self {
            textures: HashMap::new(),
            fonts: HashMap::new(),
            sounds: HashMap::new(),
            music: HashMap::new(),
            total_to_load: 0,
            loaded_count: 0,
            loading: false,
            loaded: false,
        }
    }

    //--- Lookup -----------------------------------------------------------

    pub fn texture(&self, name: &str) -> Option<&D::Texture> {
        self.textures.get(name)
    }

    pub fn font(&self, name: &str) -> Option<&D::Font> {
        self.fonts.get(name)
    }

    pub fn sound(&self, name: &str) -> Option<&D::Sound> {
        self.sounds.get(name)
    }

    pub fn music(&self, name: &str) -> Option<&D::Music> {
        self.music.get(name)
    }

    pub fn textures(&self) -> &HashMap<String, D::Texture> {
        &self.textures
    }

    pub fn fonts(&self) -> &HashMap<String, D::Font> {
        &self.fonts
    }

    pub fn sounds(&self) -> &HashMap<String, D::Sound> {
        &self.sounds
    }

    pub fn music_tracks(&self) -> &HashMap<String, D::Music> {
        &self.music
    }

    //--- Progress ---------------------------------------------------------

    /// Entries presumed loadable, computed before any decoding starts.
    pub fn total_to_load(&self) -> usize {
        self.total_to_load
    }

    /// Successfully decoded entries. Only ever incremented after a decode
    /// completes, so a sampled value reflects finished work.
    pub fn loaded_count(&self) -> usize {
        self.loaded_count
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    //--- Internal Helpers -------------------------------------------------

    pub(crate) fn begin_load(&mut self) {
        self.loading = true;
        self.loaded = false;
    }

    pub(crate) fn finish_load(&mut self) {
        self.loading = false;
        self.loaded = true;
    }

    pub(crate) fn set_total(&mut self, total: usize) {
        self.total_to_load = total;
    }

    /// Decodes one classified entry and stores it under `key`.
    ///
    /// Duplicate keys within one archive overwrite silently (archive
    /// contents are author-controlled). Decode failures are logged and
    /// skipped; the counter only moves on success.
    pub(crate) fn insert_decoded(&mut self, kind: AssetKind, key: String, bytes: &[u8], decoder: &D) {
        let inserted = match kind {
            AssetKind::Texture => match decoder.decode_texture(bytes) {
                Ok(texture) => {
                    self.textures.insert(key, texture);
                    true
                }
                Err(e) => {
                    warn!("skipping texture {:?}: {}", key, e);
                    false
                }
            },
            AssetKind::Font => match decoder.decode_font(bytes) {
                Ok(font) => {
                    self.fonts.insert(key, font);
                    true
                }
                Err(e) => {
                    warn!("skipping font {:?}: {}", key, e);
                    false
                }
            },
            AssetKind::Sound => match decoder.decode_sound(bytes) {
                Ok(sound) => {
                    self.sounds.insert(key, sound);
                    true
                }
                Err(e) => {
                    warn!("skipping sound {:?}: {}", key, e);
                    false
                }
            },
            AssetKind::Music => match decoder.decode_music(bytes) {
                Ok(track) => {
                    self.music.insert(key, track);
                    true
                }
                Err(e) => {
                    warn!("skipping music {:?}: {}", key, e);
                    false
                }
            },
        };

        if inserted {
            self.loaded_count += 1;
        }
    }
}

impl<D: AssetDecoder> Default for AssetBank<D> {
    fn default() -> Self {
        Self::new()
    }
}

//=== Test Support ========================================================

#[cfg(test)]
pub(crate) mod testing {
    use super::{AssetDecoder, DecodeError};

    /// Decoder that stores the raw bytes for every asset type.
    pub(crate) struct BytesDecoder;

    impl AssetDecoder for BytesDecoder {
        type Texture = Vec<u8>;
        type Font = Vec<u8>;
        type Sound = Vec<u8>;
        type Music = Vec<u8>;

        fn decode_texture(&self, bytes: &[u8]) -> Result<Vec<u8>, DecodeError> {
            Ok(bytes.to_vec())
        }

        fn decode_font(&self, bytes: &[u8]) -> Result<Vec<u8>, DecodeError> {
            Ok(bytes.to_vec())
        }

        fn decode_sound(&self, bytes: &[u8]) -> Result<Vec<u8>, DecodeError> {
            Ok(bytes.to_vec())
        }

        fn decode_music(&self, bytes: &[u8]) -> Result<Vec<u8>, DecodeError> {
            Ok(bytes.to_vec())
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
