//! Shared helpers for building small PDFs in memory.

#![allow(dead_code)]

use lopdf::{dictionary, Dictionary, Document, Object, Stream};

/// One line of text: content, font size, baseline y.
pub type Line<'a> = (&'a str, f32, f32);

/// Builds a PDF whose pages hold the given lines, one `BT` block each.
#[derive(Default)]
pub struct PdfBuilder<'a> {
    pages: Vec<Vec<Line<'a>>>,
    title: Option<&'a str>,
}

impl<'a> PdfBuilder<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a page of `(text, size, y)` lines, drawn at x = 72.
    pub fn page(mut self, lines: &[Line<'a>]) -> Self {
        self.pages.push(lines.to_vec());
        self
    }

    /// Set the Info dictionary title.
    pub fn title(mut self, title: &'a str) -> Self {
        self.title = Some(title);
        self
    }

    pub fn build(self) -> Vec<u8> {
        let mut doc = Document::with_version("1.5");

        let font_id = doc.add_object(helvetica());
        let fonts = dictionary! { "F1" => Object::Reference(font_id) };

        let contents: Vec<Vec<u8>> = self
            .pages
            .iter()
            .map(|lines| {
                lines
                    .iter()
                    .map(|(text, size, y)| {
                        format!("BT /F1 {size} Tf 72 {y} Td ({}) Tj ET\n", escape(text))
                    })
                    .collect::<String>()
                    .into_bytes()
            })
            .collect();

        finish(doc, fonts, contents, self.title)
    }
}

fn helvetica() -> Dictionary {
    dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    }
}

/// One page with Helvetica as `/F1` and `font` as `/F2`.
///
/// `to_unicode`, when given, is attached to `font` as its ToUnicode CMap.
pub fn font_pdf(mut font: Dictionary, to_unicode: Option<&str>, content: &str) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");

    let base_id = doc.add_object(helvetica());
    if let Some(cmap) = to_unicode {
        let cmap_id = doc.add_object(Stream::new(dictionary! {}, cmap.as_bytes().to_vec()));
        font.set("ToUnicode", Object::Reference(cmap_id));
    }
    let font_id = doc.add_object(font);
    let fonts = dictionary! {
        "F1" => Object::Reference(base_id),
        "F2" => Object::Reference(font_id),
    };

    finish(doc, fonts, vec![content.as_bytes().to_vec()], None)
}

/// A ToUnicode CMap mapping two-byte codes `0001`, `0002`, ... to `chars`.
pub fn to_unicode_cmap(chars: &str) -> String {
    let entries: String = chars
        .chars()
        .enumerate()
        .map(|(i, c)| format!("<{:04X}> <{:04X}>\n", i + 1, c as u32))
        .collect();
    format!(
        "/CIDInit /ProcSet findresource begin\n\
         12 dict begin\n\
         begincmap\n\
         /CMapName /Adobe-Identity-UCS def\n\
         /CMapType 2 def\n\
         1 begincodespacerange\n<0000> <FFFF>\nendcodespacerange\n\
         {} beginbfchar\n{}endbfchar\n\
         endcmap\n\
         CMapName currentdict /CMap defineresource pop\n\
         end\nend\n",
        chars.chars().count(),
        entries
    )
}

fn finish(
    mut doc: Document,
    fonts: Dictionary,
    contents: Vec<Vec<u8>>,
    title: Option<&str>,
) -> Vec<u8> {
    let media_box = vec![
        Object::Integer(0),
        Object::Integer(0),
        Object::Integer(612),
        Object::Integer(792),
    ];

    let mut page_ids = Vec::new();
    for content in contents {
        let content_id = doc.add_object(Stream::new(dictionary! {}, content));
        let page_dict = dictionary! {
            "Type" => "Page",
            "MediaBox" => media_box.clone(),
            "Contents" => Object::Reference(content_id),
            "Resources" => dictionary! { "Font" => fonts.clone() },
        };
        page_ids.push(doc.add_object(page_dict));
    }

    let kids: Vec<Object> = page_ids.iter().map(|id| Object::Reference(*id)).collect();
    let pages_id = doc.add_object(dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => Object::Integer(page_ids.len() as i64),
    });

    for &pid in &page_ids {
        if let Ok(page_obj) = doc.get_object_mut(pid) {
            if let Ok(dict) = page_obj.as_dict_mut() {
                dict.set("Parent", Object::Reference(pages_id));
            }
        }
    }

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => Object::Reference(pages_id),
    });
    doc.trailer.set("Root", Object::Reference(catalog_id));

    if let Some(title) = title {
        let info_id = doc.add_object(dictionary! {
            "Title" => Object::string_literal(title),
        });
        doc.trailer.set("Info", Object::Reference(info_id));
    }

    let mut buf = Vec::new();
    doc.save_to(&mut buf).expect("save PDF");
    buf
}

fn escape(text: &str) -> String {
    text.replace('\\', "\\\\")
        .replace('(', "\\(")
        .replace(')', "\\)")
}

/// A three-tier report: 24pt chapter titles, 18pt sections, 12pt body.
pub fn report_pdf() -> Vec<u8> {
    PdfBuilder::new()
        .page(&[
            ("Annual Operations Report", 24.0, 740.0),
            ("Executive Summary", 18.0, 700.0),
            ("Revenue grew steadily across regions.", 12.0, 680.0),
            ("1,234.56", 12.0, 660.0),
            ("Table of Contents:", 18.0, 640.0),
        ])
        .page(&[
            ("Market Analysis", 24.0, 740.0),
            ("Regional Trends", 18.0, 700.0),
            ("of", 18.0, 690.0),
            ("Demand remained strong in the north.", 12.0, 680.0),
            ("Regional Trends", 18.0, 660.0),
        ])
        .build()
}
