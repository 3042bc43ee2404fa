//! In-memory TrueType fonts for tests.
//!
//! [`TestFont`] compiles a minimal but well-formed sfnt (`cmap`, `glyf`,
//! `head`, `hhea`, `hmtx`, `loca`, `maxp`, `post`) whose glyphs are simple
//! polygons, so rasterization can be checked pixel by pixel without shipping
//! binary fonts.

use crate::provider::{FontAssets, MemoryProvider};

/// Codepoint of the fixture's square glyph.
pub const SQUARE: char = '\u{e001}';
/// Codepoint of the fixture's triangle glyph.
pub const TRIANGLE: char = '\u{e002}';
/// Codepoint of the fixture's glyph with no outline.
pub const BLANK: char = '\u{e003}';

/// Glyph map matching [`fixture_font`]. `unmapped` points at a codepoint the
/// font has no glyph for.
pub const FIXTURE_GLYPH_MAP: &str =
    r#"{"square": "e001", "triangle": "e002", "blank": "e003", "unmapped": "e0ff"}"#;

/// Outline of a test glyph, in font units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TestShape {
    /// Axis-aligned rectangle.
    Rect {
        x_min: i16,
        y_min: i16,
        x_max: i16,
        y_max: i16,
    },
    /// Triangle with its apex centered on the top edge.
    Triangle {
        x_min: i16,
        y_min: i16,
        x_max: i16,
        y_max: i16,
    },
    /// No outline at all.
    Empty,
}

impl TestShape {
    fn points(self) -> Vec<(i16, i16)> {
        match self {
            // Clockwise, as TrueType outer contours are.
            Self::Rect {
                x_min,
                y_min,
                x_max,
                y_max,
            } => vec![(x_min, y_min), (x_min, y_max), (x_max, y_max), (x_max, y_min)],
            Self::Triangle {
                x_min,
                y_min,
                x_max,
                y_max,
            } => vec![(x_min, y_min), ((x_min + x_max) / 2, y_max), (x_max, y_min)],
            Self::Empty => Vec::new(),
        }
    }
}

#[derive(Debug, Clone)]
struct TestGlyph {
    codepoint: char,
    name: String,
    shape: TestShape,
}

/// Builder for an in-memory TrueType font.
#[derive(Debug, Clone)]
pub struct TestFont {
    units_per_em: u16,
    ascender: i16,
    descender: i16,
    glyphs: Vec<TestGlyph>,
}

impl Default for TestFont {
    fn default() -> Self {
        Self::new()
    }
}

impl TestFont {
    /// A font with 1000 units per em, ascender 800 and descender -200.
    pub fn new() -> Self {
        Self {
            units_per_em: 1000,
            ascender: 800,
            descender: -200,
            glyphs: Vec::new(),
        }
    }

    /// Override the vertical metrics.
    #[must_use]
    pub fn with_metrics(mut self, units_per_em: u16, ascender: i16, descender: i16) -> Self {
        self.units_per_em = units_per_em;
        self.ascender = ascender;
        self.descender = descender;
        self
    }

    /// Add a glyph named `uniXXXX`.
    #[must_use]
    pub fn glyph(self, codepoint: char, shape: TestShape) -> Self {
        let name = format!("uni{:04X}", codepoint as u32);
        self.named_glyph(codepoint, name, shape)
    }

    /// Add a glyph with an explicit PostScript name.
    #[must_use]
    pub fn named_glyph(
        mut self,
        codepoint: char,
        name: impl Into<String>,
        shape: TestShape,
    ) -> Self {
        self.glyphs.push(TestGlyph {
            codepoint,
            name: name.into(),
            shape,
        });
        self
    }

    /// Compile the font.
    pub fn build(&self) -> Vec<u8> {
        let mut glyphs = self.glyphs.clone();
        glyphs.sort_by_key(|glyph| glyph.codepoint);
        let num_glyphs = glyphs.len() as u16 + 1;

        // Glyph 0 is an empty .notdef.
        let mut glyf = Vec::new();
        let mut loca = vec![0u16, 0u16];
        for glyph in &glyphs {
            glyf.extend(encode_simple_glyph(&glyph.shape.points()));
            if glyf.len() % 2 == 1 {
                glyf.push(0);
            }
            loca.push((glyf.len() / 2) as u16);
        }

        let tables: [(&[u8; 4], Vec<u8>); 8] = [
            (b"cmap", self.cmap(&glyphs)),
            (b"glyf", glyf),
            (b"head", self.head()),
            (b"hhea", self.hhea(num_glyphs)),
            (b"hmtx", self.hmtx(num_glyphs)),
            (b"loca", loca.iter().flat_map(|offset| offset.to_be_bytes()).collect()),
            (b"maxp", maxp(num_glyphs)),
            (b"post", post(&glyphs)),
        ];
        compile_sfnt(&tables)
    }

    fn head(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(54);
        put_u32(&mut out, 0x0001_0000); // version
        put_u32(&mut out, 0x0001_0000); // fontRevision
        put_u32(&mut out, 0); // checksumAdjustment
        put_u32(&mut out, 0x5F0F_3CF5); // magicNumber
        put_u16(&mut out, 0x000B); // flags
        put_u16(&mut out, self.units_per_em);
        out.extend_from_slice(&[0; 16]); // created, modified
        put_i16(&mut out, 0); // xMin
        put_i16(&mut out, self.descender); // yMin
        put_i16(&mut out, self.units_per_em as i16); // xMax
        put_i16(&mut out, self.ascender); // yMax
        put_u16(&mut out, 0); // macStyle
        put_u16(&mut out, 8); // lowestRecPPEM
        put_i16(&mut out, 2); // fontDirectionHint
        put_i16(&mut out, 0); // indexToLocFormat: short
        put_i16(&mut out, 0); // glyphDataFormat
        out
    }

    fn hhea(&self, num_glyphs: u16) -> Vec<u8> {
        let mut out = Vec::with_capacity(36);
        put_u32(&mut out, 0x0001_0000);
        put_i16(&mut out, self.ascender);
        put_i16(&mut out, self.descender);
        put_i16(&mut out, 0); // lineGap
        put_u16(&mut out, self.units_per_em); // advanceWidthMax
        put_i16(&mut out, 0); // minLeftSideBearing
        put_i16(&mut out, 0); // minRightSideBearing
        put_i16(&mut out, self.units_per_em as i16); // xMaxExtent
        put_i16(&mut out, 1); // caretSlopeRise
        put_i16(&mut out, 0); // caretSlopeRun
        put_i16(&mut out, 0); // caretOffset
        out.extend_from_slice(&[0; 8]); // reserved
        put_i16(&mut out, 0); // metricDataFormat
        put_u16(&mut out, num_glyphs);
        out
    }

    fn hmtx(&self, num_glyphs: u16) -> Vec<u8> {
        let mut out = Vec::with_capacity(usize::from(num_glyphs) * 4);
        for _ in 0..num_glyphs {
            put_u16(&mut out, self.units_per_em);
            put_i16(&mut out, 0);
        }
        out
    }

    fn cmap(&self, glyphs: &[TestGlyph]) -> Vec<u8> {
        let mut out = Vec::new();
        put_u16(&mut out, 0); // version
        put_u16(&mut out, 1); // numTables
        put_u16(&mut out, 3); // platformID: Windows
        put_u16(&mut out, 10); // encodingID: Unicode full repertoire
        put_u32(&mut out, 12); // subtable offset

        // Format 12, one group per glyph.
        put_u16(&mut out, 12);
        put_u16(&mut out, 0);
        put_u32(&mut out, 16 + 12 * glyphs.len() as u32);
        put_u32(&mut out, 0); // language
        put_u32(&mut out, glyphs.len() as u32);
        for (index, glyph) in glyphs.iter().enumerate() {
            let code = glyph.codepoint as u32;
            put_u32(&mut out, code);
            put_u32(&mut out, code);
            put_u32(&mut out, index as u32 + 1);
        }
        out
    }
}

fn maxp(num_glyphs: u16) -> Vec<u8> {
    let mut out = Vec::with_capacity(6);
    put_u32(&mut out, 0x0000_5000);
    put_u16(&mut out, num_glyphs);
    out
}

/// `post` version 2.0 carrying every glyph's name.
fn post(glyphs: &[TestGlyph]) -> Vec<u8> {
    let mut out = Vec::new();
    put_u32(&mut out, 0x0002_0000);
    out.extend_from_slice(&[0; 28]); // italicAngle through maxMemType1
    put_u16(&mut out, glyphs.len() as u16 + 1);
    put_u16(&mut out, 0); // .notdef, standard Macintosh name
    for index in 0..glyphs.len() {
        put_u16(&mut out, 258 + index as u16);
    }
    for glyph in glyphs {
        let name = glyph.name.as_bytes();
        out.push(name.len().min(255) as u8);
        out.extend_from_slice(&name[..name.len().min(255)]);
    }
    out
}

fn encode_simple_glyph(points: &[(i16, i16)]) -> Vec<u8> {
    if points.is_empty() {
        return Vec::new();
    }
    let x_min = points.iter().map(|p| p.0).min().unwrap_or(0);
    let y_min = points.iter().map(|p| p.1).min().unwrap_or(0);
    let x_max = points.iter().map(|p| p.0).max().unwrap_or(0);
    let y_max = points.iter().map(|p| p.1).max().unwrap_or(0);

    let mut out = Vec::new();
    put_i16(&mut out, 1); // numberOfContours
    put_i16(&mut out, x_min);
    put_i16(&mut out, y_min);
    put_i16(&mut out, x_max);
    put_i16(&mut out, y_max);
    put_u16(&mut out, points.len() as u16 - 1); // endPtsOfContours
    put_u16(&mut out, 0); // instructionLength
    // On-curve points with full 16-bit deltas.
    out.extend(std::iter::repeat_n(0x01u8, points.len()));
    let mut previous = 0i16;
    for &(x, _) in points {
        put_i16(&mut out, x - previous);
        previous = x;
    }
    previous = 0;
    for &(_, y) in points {
        put_i16(&mut out, y - previous);
        previous = y;
    }
    out
}

fn compile_sfnt(tables: &[(&[u8; 4], Vec<u8>)]) -> Vec<u8> {
    let num_tables = tables.len() as u16;
    let entry_selector = 15 - num_tables.leading_zeros() as u16;
    let search_range = (1u16 << entry_selector) * 16;

    let mut out = Vec::new();
    put_u32(&mut out, 0x0001_0000);
    put_u16(&mut out, num_tables);
    put_u16(&mut out, search_range);
    put_u16(&mut out, entry_selector);
    put_u16(&mut out, num_tables * 16 - search_range);

    let mut offset = 12 + 16 * tables.len() as u32;
    for (tag, table) in tables {
        out.extend_from_slice(&tag[..]);
        put_u32(&mut out, table_checksum(table));
        put_u32(&mut out, offset);
        put_u32(&mut out, table.len() as u32);
        offset += padded_len(table.len()) as u32;
    }
    for (_, table) in tables {
        out.extend_from_slice(table);
        out.resize(out.len() + padded_len(table.len()) - table.len(), 0);
    }
    out
}

fn table_checksum(table: &[u8]) -> u32 {
    table.chunks(4).fold(0u32, |sum, chunk| {
        let mut word = [0u8; 4];
        word[..chunk.len()].copy_from_slice(chunk);
        sum.wrapping_add(u32::from_be_bytes(word))
    })
}

fn padded_len(len: usize) -> usize {
    len.div_ceil(4) * 4
}

fn put_u16(out: &mut Vec<u8>, value: u16) {
    out.extend_from_slice(&value.to_be_bytes());
}

fn put_i16(out: &mut Vec<u8>, value: i16) {
    out.extend_from_slice(&value.to_be_bytes());
}

fn put_u32(out: &mut Vec<u8>, value: u32) {
    out.extend_from_slice(&value.to_be_bytes());
}

/// The standard fixture: a centered square, a triangle and an empty glyph.
pub fn fixture_font() -> Vec<u8> {
    TestFont::new()
        .named_glyph(
            SQUARE,
            "square",
            TestShape::Rect {
                x_min: 200,
                y_min: 0,
                x_max: 800,
                y_max: 600,
            },
        )
        .named_glyph(
            TRIANGLE,
            "triangle",
            TestShape::Triangle {
                x_min: 100,
                y_min: -100,
                x_max: 900,
                y_max: 700,
            },
        )
        .named_glyph(BLANK, "blank", TestShape::Empty)
        .build()
}

/// A single-style provider serving [`fixture_font`] and [`FIXTURE_GLYPH_MAP`].
pub fn fixture_provider(name: &str) -> MemoryProvider {
    MemoryProvider::new(name, FontAssets::new(fixture_font(), FIXTURE_GLYPH_MAP))
}
