//! Hershey vector fonts, rendered by `vector-text`.
//!
//! The renderer emits one point list per string, where a point with the
//! pen up starts a new stroke. Glyph coordinates are integer font units
//! with the baseline near `y = 9` and cap height at `y = -12`, so capital
//! `R` spans 21 units.

use std::fmt;
use std::str::FromStr;

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;
use vector_text::{render_text, Point, VectorFont};

use super::StrokeFont;
use crate::error::{Error, Result};
use crate::model::Polyline;

/// A Hershey face, by its traditional file name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HersheyFace {
    /// Roman simplex, single stroke
    #[default]
    Futural,
    /// Roman duplex
    Futuram,
    /// Roman triplex
    Rowmant,
    /// Script simplex
    Scripts,
    /// Script complex
    Scriptc,
    /// English gothic
    GothicEng,
    /// German gothic
    GothicGer,
    /// Italian gothic
    GothicIta,
    /// Greek simplex
    Greek,
    /// Cyrillic complex
    Cyrillic,
}

impl HersheyFace {
    /// Every face, in declaration order.
    pub const ALL: [HersheyFace; 10] = [
        HersheyFace::Futural,
        HersheyFace::Futuram,
        HersheyFace::Rowmant,
        HersheyFace::Scripts,
        HersheyFace::Scriptc,
        HersheyFace::GothicEng,
        HersheyFace::GothicGer,
        HersheyFace::GothicIta,
        HersheyFace::Greek,
        HersheyFace::Cyrillic,
    ];

    /// File-style name, e.g. `"futural"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            HersheyFace::Futural => "futural",
            HersheyFace::Futuram => "futuram",
            HersheyFace::Rowmant => "rowmant",
            HersheyFace::Scripts => "scripts",
            HersheyFace::Scriptc => "scriptc",
            HersheyFace::GothicEng => "gothiceng",
            HersheyFace::GothicGer => "gothicger",
            HersheyFace::GothicIta => "gothicita",
            HersheyFace::Greek => "greek",
            HersheyFace::Cyrillic => "cyrillic",
        }
    }

    // The renderer consumes its font, so a fresh value is built per call.
    fn vector_font(&self) -> VectorFont {
        use vector_text::HersheyFont as Face;

        VectorFont::HersheyFont(match self {
            HersheyFace::Futural => Face::Romans,
            HersheyFace::Futuram => Face::Romand,
            HersheyFace::Rowmant => Face::Romant,
            HersheyFace::Scripts => Face::Scripts,
            HersheyFace::Scriptc => Face::Scriptc,
            HersheyFace::GothicEng => Face::Gotheng,
            HersheyFace::GothicGer => Face::Gothger,
            HersheyFace::GothicIta => Face::Gothita,
            HersheyFace::Greek => Face::Greeks,
            HersheyFace::Cyrillic => Face::Cyrilc,
        })
    }
}

impl fmt::Display for HersheyFace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HersheyFace {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_ascii_lowercase();
        HersheyFace::ALL
            .into_iter()
            .find(|face| face.as_str() == wanted)
            .ok_or_else(|| Error::Font(format!("Unknown Hershey face: {}", s)))
    }
}

/// A Hershey stroke font.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HersheyFont {
    face: HersheyFace,
}

impl HersheyFont {
    /// The futural (Roman simplex) face.
    pub fn futural() -> Self {
        Self::new(HersheyFace::Futural)
    }

    /// A font drawing with `face`.
    pub fn new(face: HersheyFace) -> Self {
        Self { face }
    }

    /// A font by face name, e.g. `"futural"` or `"scripts"`.
    pub fn named(name: &str) -> Result<Self> {
        Ok(Self::new(name.parse()?))
    }

    /// The face this font draws with.
    pub fn face(&self) -> HersheyFace {
        self.face
    }

    /// Whether the face has a glyph for `ch`.
    pub fn has_glyph(&self, ch: char) -> bool {
        let mut buf = [0u8; 4];
        !render_text(ch.encode_utf8(&mut buf), self.face.vector_font()).is_empty() || ch == ' '
    }
}

/// Split a rendered point list into strokes at every pen-up move.
fn strokes(points: &[Point]) -> Vec<Polyline> {
    let mut lines = Vec::new();
    let mut current: Polyline = Vec::new();
    for p in points {
        if !p.pen && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        current.push((f64::from(p.x), f64::from(p.y)));
    }
    lines.push(current);
    lines.retain(|stroke| stroke.len() > 1);
    lines
}

impl StrokeFont for HersheyFont {
    fn name(&self) -> &str {
        self.face.as_str()
    }

    fn lines_for_text(&self, text: &str) -> Vec<Polyline> {
        // Decompose so accented letters fall back to their base glyph.
        let plain: String = text.nfkd().filter(|c| !is_combining_mark(*c)).collect();
        if plain != text {
            log::debug!("Text {:?} drawn as {:?} in {}", text, plain, self.face);
        }
        strokes(&render_text(&plain, self.face.vector_font()))
    }
}
