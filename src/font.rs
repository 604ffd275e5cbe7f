use crate::error::{FormError, Result};
use crate::types::Pt;
use std::path::Path;
use std::sync::Arc;

/// The two fonts every render embeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StandardFont {
    Helvetica,
    HelveticaBold,
}

impl StandardFont {
    pub fn for_weight(bold: bool) -> Self {
        if bold {
            StandardFont::HelveticaBold
        } else {
            StandardFont::Helvetica
        }
    }

    pub fn base_font(&self) -> &'static str {
        match self {
            StandardFont::Helvetica => "Helvetica",
            StandardFont::HelveticaBold => "Helvetica-Bold",
        }
    }

    /// Resource name used in page content streams. Prefixed so it cannot
    /// collide with the template's own font resources.
    pub fn resource_name(&self) -> &'static str {
        match self {
            StandardFont::Helvetica => "FSHelv",
            StandardFont::HelveticaBold => "FSHelvB",
        }
    }

    pub fn from_base_font(name: &str) -> Option<Self> {
        let stripped = strip_subset_prefix(name);
        match stripped.to_ascii_lowercase().as_str() {
            "helvetica" | "arial" | "arialmt" => Some(StandardFont::Helvetica),
            "helvetica-bold" | "arial-bold" | "arial-boldmt" | "arial,bold" => {
                Some(StandardFont::HelveticaBold)
            }
            _ => None,
        }
    }

    pub fn is_bold(&self) -> bool {
        matches!(self, StandardFont::HelveticaBold)
    }

    fn widths(&self) -> &'static [u16; 95] {
        match self {
            StandardFont::Helvetica => &HELVETICA_WIDTHS,
            StandardFont::HelveticaBold => &HELVETICA_BOLD_WIDTHS,
        }
    }

    /// Advance width in 1/1000 em for a WinAnsi code.
    pub fn advance(&self, code: u8) -> u16 {
        match code {
            32..=126 => self.widths()[(code - 32) as usize],
            // Latin-1 letters share their base letter's advance closely enough
            // for alignment; everything else uses the digit width.
            _ => 556,
        }
    }

    /// Width of `text` at `font_size`, measured in the WinAnsi encoding the
    /// content stream uses.
    pub fn measure_text_width(&self, font_size: Pt, text: &str) -> Pt {
        let (encoded, _) = encode_winansi(text);
        let units: i32 = encoded.iter().map(|b| self.advance(*b) as i32).sum();
        if units <= 0 {
            return Pt::ZERO;
        }
        font_size.mul_ratio(units, 1000)
    }
}

fn strip_subset_prefix(name: &str) -> &str {
    match name.split_once('+') {
        Some((prefix, rest))
            if prefix.len() == 6 && prefix.chars().all(|c| c.is_ascii_uppercase()) =>
        {
            rest
        }
        _ => name,
    }
}

// Adobe Core 14 AFM advance widths, codes 32..=126, WinAnsi glyph names
// (code 39 is quotesingle, 96 is grave).
static HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // 32-47
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556, // 48-63
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778, // 64-79
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556, // 80-95
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556, // 96-111
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584, // 112-126
];

static HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278, // 32-47
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611, // 48-63
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778, // 64-79
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556, // 80-95
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611, // 96-111
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584, // 112-126
];

/// Encode text as WinAnsi (cp1252) bytes. Returns the bytes and the number of
/// characters replaced with `?`.
pub fn encode_winansi(input: &str) -> (Vec<u8>, usize) {
    let mut out = Vec::with_capacity(input.len());
    let mut replaced = 0usize;
    for ch in input.chars() {
        let byte = match ch {
            '\u{0020}'..='\u{007E}' => ch as u8,
            '\u{00A0}'..='\u{00FF}' => ch as u8,
            '\u{20AC}' => 0x80,
            '\u{201A}' => 0x82,
            '\u{0192}' => 0x83,
            '\u{201E}' => 0x84,
            '\u{2026}' => 0x85,
            '\u{2020}' => 0x86,
            '\u{2021}' => 0x87,
            '\u{02C6}' => 0x88,
            '\u{2030}' => 0x89,
            '\u{0160}' => 0x8A,
            '\u{2039}' => 0x8B,
            '\u{0152}' => 0x8C,
            '\u{017D}' => 0x8E,
            '\u{2018}' => 0x91,
            '\u{2019}' => 0x92,
            '\u{201C}' => 0x93,
            '\u{201D}' => 0x94,
            '\u{2022}' => 0x95,
            '\u{2013}' => 0x96,
            '\u{2014}' => 0x97,
            '\u{02DC}' => 0x98,
            '\u{2122}' => 0x99,
            '\u{0161}' => 0x9A,
            '\u{203A}' => 0x9B,
            '\u{0153}' => 0x9C,
            '\u{017E}' => 0x9E,
            '\u{0178}' => 0x9F,
            _ => {
                replaced += 1;
                b'?'
            }
        };
        out.push(byte);
    }
    (out, replaced)
}

pub fn decode_winansi(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| match *b {
            0x80 => '\u{20AC}',
            0x82 => '\u{201A}',
            0x83 => '\u{0192}',
            0x84 => '\u{201E}',
            0x85 => '\u{2026}',
            0x86 => '\u{2020}',
            0x87 => '\u{2021}',
            0x88 => '\u{02C6}',
            0x89 => '\u{2030}',
            0x8A => '\u{0160}',
            0x8B => '\u{2039}',
            0x8C => '\u{0152}',
            0x8E => '\u{017D}',
            0x91 => '\u{2018}',
            0x92 => '\u{2019}',
            0x93 => '\u{201C}',
            0x94 => '\u{201D}',
            0x95 => '\u{2022}',
            0x96 => '\u{2013}',
            0x97 => '\u{2014}',
            0x98 => '\u{02DC}',
            0x99 => '\u{2122}',
            0x9A => '\u{0161}',
            0x9B => '\u{203A}',
            0x9C => '\u{0153}',
            0x9E => '\u{017E}',
            0x9F => '\u{0178}',
            b => b as char,
        })
        .collect()
}

/// TrueType/OpenType programs used to draw glyph outlines in previews.
#[derive(Debug, Clone, Default)]
pub struct PreviewFonts {
    regular: Option<Arc<Vec<u8>>>,
    bold: Option<Arc<Vec<u8>>>,
}

impl PreviewFonts {
    pub fn from_bytes(regular: Vec<u8>, bold: Option<Vec<u8>>) -> Result<Self> {
        validate_font_program(&regular, "regular")?;
        if let Some(bold) = bold.as_ref() {
            validate_font_program(bold, "bold")?;
        }
        Ok(Self {
            regular: Some(Arc::new(regular)),
            bold: bold.map(Arc::new),
        })
    }

    pub fn from_files(regular: impl AsRef<Path>, bold: Option<&Path>) -> Result<Self> {
        let read = |path: &Path| {
            std::fs::read(path).map_err(|e| {
                FormError::InvalidConfiguration(format!(
                    "cannot read preview font {}: {e}",
                    path.display()
                ))
            })
        };
        let regular = read(regular.as_ref())?;
        let bold = match bold {
            Some(path) => Some(read(path)?),
            None => None,
        };
        Self::from_bytes(regular, bold)
    }

    /// Look for a Helvetica-metric sans in the usual system font folders.
    pub fn discover() -> Self {
        Self {
            regular: load_system_font(SYSTEM_REGULAR_CANDIDATES),
            bold: load_system_font(SYSTEM_BOLD_CANDIDATES),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.regular.is_none() && self.bold.is_none()
    }

    /// Font program for a weight; bold falls back to regular when only one
    /// program is available.
    pub fn program(&self, bold: bool) -> Option<Arc<Vec<u8>>> {
        if bold {
            self.bold.clone().or_else(|| self.regular.clone())
        } else {
            self.regular.clone().or_else(|| self.bold.clone())
        }
    }
}

fn validate_font_program(data: &[u8], label: &str) -> Result<()> {
    ttf_parser::Face::parse(data, 0).map(|_| ()).map_err(|e| {
        FormError::InvalidConfiguration(format!("{label} preview font is not a valid font: {e}"))
    })
}

const SYSTEM_REGULAR_CANDIDATES: &[&str] = &[
    "LiberationSans-Regular.ttf",
    "liberation/LiberationSans-Regular.ttf",
    "truetype/liberation/LiberationSans-Regular.ttf",
    "truetype/liberation2/LiberationSans-Regular.ttf",
    "Arial.ttf",
    "arial.ttf",
    "Supplemental/Arial.ttf",
    "truetype/dejavu/DejaVuSans.ttf",
    "DejaVuSans.ttf",
];

const SYSTEM_BOLD_CANDIDATES: &[&str] = &[
    "LiberationSans-Bold.ttf",
    "liberation/LiberationSans-Bold.ttf",
    "truetype/liberation/LiberationSans-Bold.ttf",
    "truetype/liberation2/LiberationSans-Bold.ttf",
    "Arial Bold.ttf",
    "arialbd.ttf",
    "Supplemental/Arial Bold.ttf",
    "truetype/dejavu/DejaVuSans-Bold.ttf",
    "DejaVuSans-Bold.ttf",
];

fn system_font_dirs() -> Vec<std::path::PathBuf> {
    let mut dirs = Vec::new();

    #[cfg(target_os = "windows")]
    {
        dirs.push(std::path::PathBuf::from(r"C:\Windows\Fonts"));
        if let Ok(windir) = std::env::var("WINDIR") {
            dirs.push(std::path::PathBuf::from(windir).join("Fonts"));
        }
    }

    #[cfg(target_os = "macos")]
    {
        dirs.push(std::path::PathBuf::from("/System/Library/Fonts"));
        dirs.push(std::path::PathBuf::from("/Library/Fonts"));
    }

    #[cfg(all(unix, not(target_os = "macos")))]
    {
        dirs.push(std::path::PathBuf::from("/usr/share/fonts"));
        dirs.push(std::path::PathBuf::from("/usr/local/share/fonts"));
    }

    dirs
}

fn load_system_font(candidates: &[&str]) -> Option<Arc<Vec<u8>>> {
    for dir in system_font_dirs() {
        for file_name in candidates {
            let path = dir.join(file_name);
            let Ok(bytes) = std::fs::read(&path) else {
                continue;
            };
            if ttf_parser::Face::parse(&bytes, 0).is_ok() {
                log::debug!("preview font resolved to {}", path.display());
                return Some(Arc::new(bytes));
            }
        }
    }
    None
}
