//! Content stream interpretation.
//!
//! Walks a page's content stream and produces the text runs shown on the
//! page, each with its rendered font size and origin. Only the text and
//! graphics-state operators that affect placement and size are
//! interpreted:
//!
//! | Operator | Action |
//! |----------|--------|
//! | `q` `Q` `cm` | Save/restore graphics state, concatenate CTM |
//! | `BT` `ET` | Begin/end text object |
//! | `Tf` | Set font and size |
//! | `Tm` `Td` `TD` `T*` `TL` | Text positioning |
//! | `Tc` `Tw` `Tz` | Character/word spacing, horizontal scaling |
//! | `Tj` `TJ` `'` `"` | Show text |

use unicode_normalization::UnicodeNormalization;

use super::backend::{BackendFontInfo, ContentOp, PageId, PdfBackend, PdfValue};
use crate::error::Result;
use crate::model::TextRun;

/// Approximate glyph advance as a fraction of the font size.
const APPROX_CHAR_WIDTH_RATIO: f32 = 0.5;

/// TJ adjustment (thousandths of an em) above which a word space is assumed.
const TJ_SPACE_THRESHOLD: f32 = 200.0;

/// A 2x3 affine matrix `[a, b, c, d, e, f]`.
type Matrix = [f32; 6];

const IDENTITY: Matrix = [1.0, 0.0, 0.0, 1.0, 0.0, 0.0];

/// `m1 × m2` in PDF row-vector convention.
fn multiply(m1: &Matrix, m2: &Matrix) -> Matrix {
    [
        m1[0] * m2[0] + m1[1] * m2[2],
        m1[0] * m2[1] + m1[1] * m2[3],
        m1[2] * m2[0] + m1[3] * m2[2],
        m1[2] * m2[1] + m1[3] * m2[3],
        m1[4] * m2[0] + m1[5] * m2[2] + m2[4],
        m1[4] * m2[1] + m1[5] * m2[3] + m2[5],
    ]
}

/// Text state tracked while walking the content stream.
#[derive(Debug, Clone)]
struct TextState {
    font_key: Vec<u8>,
    font_name: String,
    font_size: f32,
    text_matrix: Matrix,
    line_matrix: Matrix,
    ctm: Matrix,
    horiz_scale: f32,
    char_spacing: f32,
    word_spacing: f32,
    leading: f32,
}

impl Default for TextState {
    fn default() -> Self {
        Self {
            font_key: Vec::new(),
            font_name: String::new(),
            font_size: 12.0,
            text_matrix: IDENTITY,
            line_matrix: IDENTITY,
            ctm: IDENTITY,
            horiz_scale: 1.0,
            char_spacing: 0.0,
            word_spacing: 0.0,
            leading: 0.0,
        }
    }
}

impl TextState {
    /// Text space to user space.
    fn rendering_matrix(&self) -> Matrix {
        multiply(&self.text_matrix, &self.ctm)
    }

    /// Rendered size: font size scaled by the length of the text-space y axis.
    fn effective_font_size(&self) -> f32 {
        let m = self.rendering_matrix();
        (self.font_size * (m[2] * m[2] + m[3] * m[3]).sqrt()).abs()
    }

    fn origin(&self) -> (f32, f32) {
        let m = self.rendering_matrix();
        (m[4], m[5])
    }

    fn horizontal_scale(&self) -> f32 {
        let m = self.rendering_matrix();
        (m[0] * m[0] + m[1] * m[1]).sqrt()
    }

    fn translate_line(&mut self, tx: f32, ty: f32) {
        self.line_matrix = multiply(&[1.0, 0.0, 0.0, 1.0, tx, ty], &self.line_matrix);
        self.text_matrix = self.line_matrix;
    }

    fn next_line(&mut self) {
        self.translate_line(0.0, -self.leading);
    }

    /// Move the text matrix right by `dx` text-space units.
    fn advance(&mut self, dx: f32) {
        self.text_matrix[4] += dx * self.text_matrix[0];
        self.text_matrix[5] += dx * self.text_matrix[1];
    }

    /// Advance past `text` and return the displacement in text space.
    fn advance_after_show(&mut self, text: &str) -> f32 {
        let mut dx = 0.0;
        for ch in text.chars() {
            dx += (self.font_size * APPROX_CHAR_WIDTH_RATIO + self.char_spacing)
                * self.horiz_scale;
            if ch == ' ' {
                dx += self.word_spacing * self.horiz_scale;
            }
        }
        self.advance(dx);
        dx
    }

    fn set_font(&mut self, key: &[u8], fonts: &[BackendFontInfo], size: f32) {
        self.font_key = key.to_vec();
        self.font_size = size;
        self.font_name = fonts
            .iter()
            .find(|f| f.name == key)
            .map(|f| f.base_font.clone())
            .unwrap_or_else(|| String::from_utf8_lossy(key).to_string());
    }
}

/// Interprets one page's content stream into text runs.
struct RunCollector<'a> {
    backend: &'a dyn PdfBackend,
    page_id: PageId,
    fonts: Vec<BackendFontInfo>,
    state: TextState,
    saved: Vec<TextState>,
    runs: Vec<TextRun>,
}

impl<'a> RunCollector<'a> {
    fn decode(&self, bytes: &[u8]) -> String {
        self.backend
            .decode_text(self.page_id, &self.state.font_key, bytes)
    }

    fn apply(&mut self, op: &ContentOp) {
        match op.operator.as_str() {
            "q" => self.saved.push(self.state.clone()),
            "Q" => {
                // Graphics state restore; the text object's matrices are kept
                if let Some(saved) = self.saved.pop() {
                    self.state = TextState {
                        text_matrix: self.state.text_matrix,
                        line_matrix: self.state.line_matrix,
                        ..saved
                    };
                }
            }
            "cm" => {
                if let Some(m) = matrix_operands(op) {
                    self.state.ctm = multiply(&m, &self.state.ctm);
                }
            }
            "BT" => {
                self.state.text_matrix = IDENTITY;
                self.state.line_matrix = IDENTITY;
            }
            // Font state survives ET; some producers reuse it across objects.
            "ET" => {}
            "Tf" => {
                if let (Some(PdfValue::Name(key)), Some(size)) = (op.operands.first(), op.number(1))
                {
                    let key = key.clone();
                    self.state.set_font(&key, &self.fonts, size);
                }
            }
            "Tm" => {
                if let Some(m) = matrix_operands(op) {
                    self.state.text_matrix = m;
                    self.state.line_matrix = m;
                }
            }
            "Td" => {
                if let (Some(tx), Some(ty)) = (op.number(0), op.number(1)) {
                    self.state.translate_line(tx, ty);
                }
            }
            "TD" => {
                if let (Some(tx), Some(ty)) = (op.number(0), op.number(1)) {
                    self.state.leading = -ty;
                    self.state.translate_line(tx, ty);
                }
            }
            "T*" => self.state.next_line(),
            "TL" => {
                if let Some(v) = op.number(0) {
                    self.state.leading = v;
                }
            }
            "Tc" => {
                if let Some(v) = op.number(0) {
                    self.state.char_spacing = v;
                }
            }
            "Tw" => {
                if let Some(v) = op.number(0) {
                    self.state.word_spacing = v;
                }
            }
            "Tz" => {
                if let Some(v) = op.number(0) {
                    self.state.horiz_scale = v / 100.0;
                }
            }
            "Tj" => {
                if let Some(PdfValue::Str(bytes)) = op.operands.first() {
                    let text = self.decode(bytes);
                    self.show(text, 0.0);
                }
            }
            "TJ" => {
                if let Some(PdfValue::Array(items)) = op.operands.first() {
                    self.show_array(items);
                }
            }
            "'" => {
                self.state.next_line();
                if let Some(PdfValue::Str(bytes)) = op.operands.first() {
                    let text = self.decode(bytes);
                    self.show(text, 0.0);
                }
            }
            "\"" => {
                if let (Some(aw), Some(ac)) = (op.number(0), op.number(1)) {
                    self.state.word_spacing = aw;
                    self.state.char_spacing = ac;
                }
                self.state.next_line();
                if let Some(PdfValue::Str(bytes)) = op.operands.get(2) {
                    let text = self.decode(bytes);
                    self.show(text, 0.0);
                }
            }
            _ => {}
        }
    }

    /// TJ: strings interleaved with kerning adjustments in thousandths of an em.
    fn show_array(&mut self, items: &[PdfValue]) {
        let mut combined = String::new();
        let mut extra = 0.0;

        for item in items {
            match item {
                PdfValue::Str(bytes) => combined.push_str(&self.decode(bytes)),
                PdfValue::Integer(_) | PdfValue::Real(_) => {
                    let adjustment = -super::backend::get_number_from_value(item).unwrap_or(0.0);
                    extra += adjustment / 1000.0 * self.state.font_size * self.state.horiz_scale;
                    if adjustment > TJ_SPACE_THRESHOLD
                        && !combined.is_empty()
                        && !combined.ends_with(' ')
                        && !combined.ends_with('\u{00A0}')
                    {
                        let spaceless = combined
                            .chars()
                            .last()
                            .map(is_spaceless_script_char)
                            .unwrap_or(false);
                        if !spaceless {
                            combined.push(' ');
                        }
                    }
                }
                _ => {}
            }
        }

        self.show(combined, extra);
    }

    fn show(&mut self, text: String, extra_advance: f32) {
        let (x, y) = self.state.origin();
        let size = self.state.effective_font_size();
        let dx = self.state.advance_after_show(&text) + extra_advance;
        if extra_advance != 0.0 {
            self.state.advance(extra_advance);
        }

        if text.trim().is_empty() || size <= 0.0 {
            return;
        }

        let width = dx * self.state.horizontal_scale();
        let text: String = text.nfkc().collect();
        self.runs.push(
            TextRun::new(text, size, x, y)
                .with_font(self.state.font_name.clone())
                .with_width(width),
        );
    }
}

fn matrix_operands(op: &ContentOp) -> Option<Matrix> {
    let mut m = IDENTITY;
    for (i, slot) in m.iter_mut().enumerate() {
        *slot = op.number(i)?;
    }
    Some(m)
}

/// Interpret a page's content stream and return its text runs in stream order.
pub fn extract_page_runs(backend: &dyn PdfBackend, page_id: PageId) -> Result<Vec<TextRun>> {
    let raw = backend.page_content(page_id)?;
    let ops = backend.decode_content(&raw)?;

    let mut collector = RunCollector {
        backend,
        page_id,
        fonts: backend.page_fonts(page_id).unwrap_or_default(),
        state: TextState::default(),
        saved: Vec::new(),
        runs: Vec::new(),
    };
    for op in &ops {
        collector.apply(op);
    }

    Ok(collector.runs)
}

/// Merge runs that directly continue each other on the same baseline in the
/// same font and size.
///
/// Producers often emit one show operator per word or glyph cluster; the
/// merged run is the "contiguous run of same-styled text" a heading span is
/// built from. Runs on different lines are never merged.
pub fn merge_adjacent_runs(runs: Vec<TextRun>) -> Vec<TextRun> {
    let mut merged: Vec<TextRun> = Vec::with_capacity(runs.len());

    for run in runs {
        if let Some(prev) = merged.last_mut() {
            if continues(prev, &run) {
                let gap = run.position.x - prev.right();
                let needs_space = gap > prev.font_size * 0.15
                    && !prev.text.ends_with(char::is_whitespace)
                    && !run.text.starts_with(char::is_whitespace)
                    && !(prev.text.chars().last().is_some_and(is_spaceless_script_char)
                        && run.text.chars().next().is_some_and(is_spaceless_script_char));
                if needs_space {
                    prev.text.push(' ');
                }
                prev.text.push_str(&run.text);
                prev.width = run.right() - prev.position.x;
                continue;
            }
        }
        merged.push(run);
    }

    merged
}

fn continues(prev: &TextRun, next: &TextRun) -> bool {
    let gap = next.position.x - prev.right();
    prev.font_name == next.font_name
        && (prev.font_size - next.font_size).abs() < 0.01
        && (prev.position.y - next.position.y).abs() < 0.5
        && next.position.x >= prev.position.x
        && gap <= prev.font_size * 1.5
}

/// Check if character is from a script that doesn't use word spaces.
/// Chinese and Japanese don't use spaces between words, but Korean does.
fn is_spaceless_script_char(c: char) -> bool {
    let code = c as u32;

    // CJK Unified Ideographs and Extension A
    (0x4E00..=0x9FFF).contains(&code)
    || (0x3400..=0x4DBF).contains(&code)
    // Extensions B-F
    || (0x20000..=0x2EBEF).contains(&code)
    // Hiragana, Katakana
    || (0x3040..=0x30FF).contains(&code)
    // CJK Symbols and Punctuation
    || (0x3000..=0x303F).contains(&code)
}
