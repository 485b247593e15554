//! Sprite and sound manifest
//!
//! Everything is loaded once at startup. A missing or undecodable asset is
//! fatal; the host logs the error and exits.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Sprites the scene can reference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpriteId {
    Background,
    Ball,
    Building,
    HowToPlay,
}

impl SpriteId {
    pub const ALL: [SpriteId; 4] = [
        SpriteId::Background,
        SpriteId::Ball,
        SpriteId::Building,
        SpriteId::HowToPlay,
    ];

    pub fn file_name(&self) -> &'static str {
        match self {
            SpriteId::Background => "table.png",
            SpriteId::Ball => "ball.png",
            SpriteId::Building => "building.png",
            SpriteId::HowToPlay => "howtoplay.png",
        }
    }

    /// Dense index for per-sprite tables
    pub fn index(&self) -> usize {
        *self as usize
    }

    fn embedded_bytes(&self) -> &'static [u8] {
        match self {
            SpriteId::Background => include_bytes!("../assets/table.png"),
            SpriteId::Ball => include_bytes!("../assets/ball.png"),
            SpriteId::Building => include_bytes!("../assets/building.png"),
            SpriteId::HowToPlay => include_bytes!("../assets/howtoplay.png"),
        }
    }
}

/// File name of the flap sound effect
pub const FLAP_SOUND: &str = "flap.wav";

/// Asset loading failures
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to decode {name}: {source}")]
    Decode {
        name: &'static str,
        #[source]
        source: image::ImageError,
    },
}

/// Decoded RGBA8 sprite
#[derive(Debug, Clone)]
pub struct SpriteImage {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl SpriteImage {
    fn decode(name: &'static str, bytes: &[u8]) -> Result<Self, AssetError> {
        let image = image::load_from_memory_with_format(bytes, image::ImageFormat::Png)
            .map_err(|source| AssetError::Decode { name, source })?
            .to_rgba8();
        Ok(Self {
            width: image.width(),
            height: image.height(),
            rgba: image.into_raw(),
        })
    }
}

/// Where the manifest is read from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetSource {
    /// Compiled into the binary (browser build)
    Embedded,
    /// Read from a directory on disk (desktop build)
    Directory(PathBuf),
}

impl AssetSource {
    /// `assets/` next to the running executable, if it exists
    pub fn beside_executable() -> Option<Self> {
        let exe = std::env::current_exe().ok()?;
        let dir = exe.parent()?.join("assets");
        dir.is_dir().then_some(AssetSource::Directory(dir))
    }

    fn read(&self, name: &'static str, embedded: &'static [u8]) -> Result<Vec<u8>, AssetError> {
        match self {
            AssetSource::Embedded => Ok(embedded.to_vec()),
            AssetSource::Directory(dir) => read_file(&dir.join(name)),
        }
    }
}

fn read_file(path: &Path) -> Result<Vec<u8>, AssetError> {
    std::fs::read(path).map_err(|source| AssetError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Every asset the game needs, decoded
#[derive(Debug, Clone)]
pub struct Assets {
    /// Indexed by `SpriteId::index`
    sprites: Vec<SpriteImage>,
    /// Encoded WAV bytes, decoded by the audio backend on play
    pub flap_sound: Vec<u8>,
}

impl Assets {
    /// Load the full manifest from `source`
    pub fn load(source: &AssetSource) -> Result<Self, AssetError> {
        let mut sprites = Vec::with_capacity(SpriteId::ALL.len());
        for id in SpriteId::ALL {
            let bytes = source.read(id.file_name(), id.embedded_bytes())?;
            let sprite = SpriteImage::decode(id.file_name(), &bytes)?;
            log::debug!("Loaded {} ({}x{})", id.file_name(), sprite.width, sprite.height);
            sprites.push(sprite);
        }

        let flap_sound = source.read(FLAP_SOUND, include_bytes!("../assets/flap.wav"))?;

        log::info!("Assets loaded from {:?}", source);
        Ok(Self { sprites, flap_sound })
    }

    pub fn sprite(&self, id: SpriteId) -> &SpriteImage {
        &self.sprites[id.index()]
    }
}
