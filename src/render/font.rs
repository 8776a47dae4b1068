use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};

use crate::foundation::error::{KinetypeError, KinetypeResult};

/// Environment variable naming a font file that overrides system lookup.
pub const FONT_ENV_VAR: &str = "KINETYPE_FONT";

/// Named families tried in order before falling back to the generic sans-serif face.
pub const FALLBACK_FAMILIES: [&str; 5] = [
    "Outfit",
    "Hiragino Kaku Gothic ProN",
    "Hiragino Sans",
    "Meiryo",
    "Noto Sans CJK JP",
];

/// Requested weight (black).
pub const DISPLAY_WEIGHT: u16 = 900;

/// Raw bytes of a single font face.
#[derive(Clone, Debug)]
pub struct FontFace {
    /// Family name for diagnostics.
    pub family: String,
    /// Font file bytes (may be a collection).
    pub data: Arc<Vec<u8>>,
    /// Face index within a collection.
    pub index: u32,
}

impl FontFace {
    /// Load the first face of a font file.
    pub fn from_path(path: &Path) -> KinetypeResult<Self> {
        let data = std::fs::read(path).map_err(|e| {
            KinetypeError::font(format!("failed to read font '{}': {e}", path.display()))
        })?;
        if data.is_empty() {
            return Err(KinetypeError::font(format!(
                "font file '{}' is empty",
                path.display()
            )));
        }
        let family = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("font")
            .to_owned();
        Ok(Self {
            family,
            data: Arc::new(data),
            index: 0,
        })
    }

    /// Resolve the display face.
    ///
    /// Order: `explicit` path, then `$KINETYPE_FONT`, then the system fallback chain (with
    /// `extra_dirs` scanned for `.ttf`/`.otf`/`.ttc` files first).
    pub fn resolve(explicit: Option<&Path>, extra_dirs: &[PathBuf]) -> KinetypeResult<Self> {
        if let Some(p) = explicit {
            return Self::from_path(p);
        }
        if let Some(p) = std::env::var_os(FONT_ENV_VAR).filter(|v| !v.is_empty()) {
            return Self::from_path(Path::new(&p));
        }
        if extra_dirs.is_empty() {
            return Self::system();
        }
        query_fallback_chain(&build_fontdb(extra_dirs))
    }

    /// System face from the fallback chain, looked up once per process.
    pub fn system() -> KinetypeResult<Self> {
        static SYSTEM: OnceLock<Result<FontFace, String>> = OnceLock::new();
        SYSTEM
            .get_or_init(|| query_fallback_chain(&build_fontdb(&[])).map_err(font_message))
            .clone()
            .map_err(KinetypeError::font)
    }
}

fn font_message(e: KinetypeError) -> String {
    match e {
        KinetypeError::Font(msg) => msg,
        other => other.to_string(),
    }
}

fn build_fontdb(extra_dirs: &[PathBuf]) -> usvg::fontdb::Database {
    let mut db = usvg::fontdb::Database::new();
    for dir in extra_dirs {
        load_fonts_from_dir(&mut db, dir);
    }
    db.load_system_fonts();
    db
}

fn load_fonts_from_dir(db: &mut usvg::fontdb::Database, dir: &Path) {
    let Ok(rd) = std::fs::read_dir(dir) else {
        return;
    };

    for entry in rd.flatten() {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(ext) = path.extension().and_then(|s| s.to_str()) else {
            continue;
        };
        let ext = ext.to_ascii_lowercase();
        if ext != "ttf" && ext != "otf" && ext != "ttc" {
            continue;
        }
        if let Err(e) = db.load_font_file(&path) {
            tracing::debug!(path = %path.display(), error = %e, "skipping unreadable font");
        }
    }
}

fn query_fallback_chain(db: &usvg::fontdb::Database) -> KinetypeResult<FontFace> {
    let mut families: Vec<usvg::fontdb::Family<'_>> = FALLBACK_FAMILIES
        .iter()
        .map(|&name| usvg::fontdb::Family::Name(name))
        .collect();
    families.push(usvg::fontdb::Family::SansSerif);

    let query = usvg::fontdb::Query {
        families: &families,
        weight: usvg::fontdb::Weight(DISPLAY_WEIGHT),
        stretch: usvg::fontdb::Stretch::Normal,
        style: usvg::fontdb::Style::Normal,
    };

    let id = db
        .query(&query)
        .or_else(|| {
            let id = nearest_display_face(db)?;
            tracing::debug!("no fallback family matched, using the nearest installed face");
            Some(id)
        })
        .ok_or_else(|| KinetypeError::font("no usable font face found on this system"))?;
    let family = db
        .face(id)
        .and_then(|f| f.families.first().map(|(name, _)| name.clone()))
        .unwrap_or_default();
    let (data, index) = db
        .with_face_data(id, |data, index| (data.to_vec(), index))
        .ok_or_else(|| KinetypeError::font(format!("failed to load font data for '{family}'")))?;

    tracing::debug!(%family, index, "resolved display font");
    Ok(FontFace {
        family,
        data: Arc::new(data),
        index,
    })
}

/// Upright, proportional face closest to the display weight; ties go to the family name.
fn nearest_display_face(db: &usvg::fontdb::Database) -> Option<usvg::fontdb::ID> {
    db.faces()
        .min_by_key(|f| {
            (
                f.style != usvg::fontdb::Style::Normal,
                f.monospaced,
                f.weight.0.abs_diff(DISPLAY_WEIGHT),
                f.families.first().map(|(name, _)| name.clone()),
            )
        })
        .map(|f| f.id)
}

#[cfg(test)]
#[path = "../../tests/unit/render/font.rs"]
mod tests;
