//! Minimal PDF 1.4 writer
//!
//! Writes just what the export needs: base-14 Helvetica fonts, positioned
//! single-line text, fill colours, and URI link annotations. Text is encoded
//! as WinAnsi so the bullet and en dash render without embedding a font.

use super::{DocumentLayout, PlacedLine};
use std::io::{self, Write};

const POINTS_PER_MM: f32 = 72.0 / 25.4;

/// Rough Helvetica advance width as a fraction of the font size
const AVG_GLYPH_WIDTH: f32 = 0.52;

const CATALOG_ID: usize = 1;
const PAGES_ID: usize = 2;
const FONT_REGULAR_ID: usize = 3;
const FONT_BOLD_ID: usize = 4;
const FIRST_PAGE_ID: usize = 5;

/// Object ids reserved for one page
struct PageObjects {
    page: usize,
    contents: usize,
    annots: Vec<usize>,
}

/// Byte buffer that records where each object starts
struct PdfBuffer {
    bytes: Vec<u8>,
    offsets: Vec<usize>,
}

impl PdfBuffer {
    fn new(object_count: usize) -> Self {
        Self {
            bytes: Vec::new(),
            // Index 0 is the free-list head
            offsets: vec![0; object_count + 1],
        }
    }

    fn begin_object(&mut self, id: usize) -> io::Result<()> {
        self.offsets[id] = self.bytes.len();
        write!(self.bytes, "{} 0 obj\n", id)
    }

    fn end_object(&mut self) -> io::Result<()> {
        self.bytes.write_all(b"\nendobj\n")
    }

    fn object(&mut self, id: usize, body: &str) -> io::Result<()> {
        self.begin_object(id)?;
        self.bytes.write_all(body.as_bytes())?;
        self.end_object()
    }

    fn stream(&mut self, id: usize, data: &[u8]) -> io::Result<()> {
        self.begin_object(id)?;
        write!(self.bytes, "<< /Length {} >>\nstream\n", data.len())?;
        self.bytes.write_all(data)?;
        self.bytes.write_all(b"\nendstream")?;
        self.end_object()
    }

    fn finish(mut self) -> io::Result<Vec<u8>> {
        let xref_offset = self.bytes.len();
        let size = self.offsets.len();

        write!(self.bytes, "xref\n0 {}\n0000000000 65535 f \n", size)?;
        for offset in &self.offsets[1..] {
            write!(self.bytes, "{:010} 00000 n \n", offset)?;
        }
        write!(
            self.bytes,
            "trailer\n<< /Size {} /Root {} 0 R >>\nstartxref\n{}\n%%EOF\n",
            size, CATALOG_ID, xref_offset
        )?;
        Ok(self.bytes)
    }
}

/// Serialize a paginated layout
pub fn render(layout: &DocumentLayout) -> io::Result<Vec<u8>> {
    let page_width = layout.format.width_mm * POINTS_PER_MM;
    let page_height = layout.format.height_mm * POINTS_PER_MM;

    // Allocate ids up front so the page tree can reference its kids
    let mut next_id = FIRST_PAGE_ID;
    let plan: Vec<PageObjects> = layout
        .pages
        .iter()
        .map(|page| {
            let page_id = next_id;
            let contents = next_id + 1;
            let link_count = page.lines.iter().filter(|l| l.link.is_some()).count();
            let annots = (contents + 1..contents + 1 + link_count).collect();
            next_id = contents + 1 + link_count;
            PageObjects {
                page: page_id,
                contents,
                annots,
            }
        })
        .collect();

    let mut pdf = PdfBuffer::new(next_id - 1);
    pdf.bytes.write_all(b"%PDF-1.4\n%\xE2\xE3\xCF\xD3\n")?;

    pdf.object(
        CATALOG_ID,
        &format!("<< /Type /Catalog /Pages {} 0 R >>", PAGES_ID),
    )?;

    let kids: Vec<String> = plan.iter().map(|p| format!("{} 0 R", p.page)).collect();
    pdf.object(
        PAGES_ID,
        &format!(
            "<< /Type /Pages /Kids [{}] /Count {} >>",
            kids.join(" "),
            plan.len()
        ),
    )?;

    pdf.object(FONT_REGULAR_ID, &font_dict("Helvetica"))?;
    pdf.object(FONT_BOLD_ID, &font_dict("Helvetica-Bold"))?;

    for (page, objects) in layout.pages.iter().zip(&plan) {
        let annots = if objects.annots.is_empty() {
            String::new()
        } else {
            let refs: Vec<String> = objects.annots.iter().map(|id| format!("{} 0 R", id)).collect();
            format!(" /Annots [{}]", refs.join(" "))
        };

        pdf.object(
            objects.page,
            &format!(
                "<< /Type /Page /Parent {} 0 R /MediaBox [0 0 {:.2} {:.2}] \
                 /Resources << /Font << /F1 {} 0 R /F2 {} 0 R >> >> /Contents {} 0 R{} >>",
                PAGES_ID,
                page_width,
                page_height,
                FONT_REGULAR_ID,
                FONT_BOLD_ID,
                objects.contents,
                annots
            ),
        )?;

        let mut content = Vec::new();
        for line in &page.lines {
            write_text(&mut content, line, page_height)?;
        }
        pdf.stream(objects.contents, &content)?;

        let links = page.lines.iter().filter_map(|l| l.link.as_ref().map(|url| (l, url)));
        for ((line, url), id) in links.zip(&objects.annots) {
            pdf.begin_object(*id)?;
            let (x1, y1, x2, y2) = link_rect(line, page_height);
            write!(
                pdf.bytes,
                "<< /Type /Annot /Subtype /Link /Rect [{:.2} {:.2} {:.2} {:.2}] \
                 /Border [0 0 0] /A << /Type /Action /S /URI /URI ",
                x1, y1, x2, y2
            )?;
            write_string(&mut pdf.bytes, url.bytes())?;
            pdf.bytes.write_all(b" >> >>")?;
            pdf.end_object()?;
        }
    }

    pdf.finish()
}

fn font_dict(base: &str) -> String {
    format!(
        "<< /Type /Font /Subtype /Type1 /BaseFont /{} /Encoding /WinAnsiEncoding >>",
        base
    )
}

fn write_text(out: &mut Vec<u8>, line: &PlacedLine, page_height: f32) -> io::Result<()> {
    let font = if line.style.bold() { "F2" } else { "F1" };
    let (r, g, b) = line.style.color();
    let x = line.x_mm * POINTS_PER_MM;
    let y = page_height - line.y_mm * POINTS_PER_MM;

    write!(
        out,
        "{:.3} {:.3} {:.3} rg\nBT /{} {:.1} Tf {:.2} {:.2} Td ",
        f32::from(r) / 255.0,
        f32::from(g) / 255.0,
        f32::from(b) / 255.0,
        font,
        line.style.size_pt(),
        x,
        y
    )?;
    write_string(out, line.text.chars().map(win_ansi))?;
    out.write_all(b" Tj ET\n")
}

/// Clickable area over a line, in PDF user space
fn link_rect(line: &PlacedLine, page_height: f32) -> (f32, f32, f32, f32) {
    let size = line.style.size_pt();
    let x = line.x_mm * POINTS_PER_MM;
    let baseline = page_height - line.y_mm * POINTS_PER_MM;
    let width = line.text.chars().count() as f32 * size * AVG_GLYPH_WIDTH;
    (x, baseline - size * 0.25, x + width, baseline + size)
}

/// Write a literal string, escaping delimiters
fn write_string(out: &mut Vec<u8>, bytes: impl Iterator<Item = u8>) -> io::Result<()> {
    out.push(b'(');
    for byte in bytes {
        if matches!(byte, b'(' | b')' | b'\\') {
            out.push(b'\\');
        }
        out.push(byte);
    }
    out.push(b')');
    Ok(())
}

/// Map a character to WinAnsiEncoding, `?` when unrepresentable
fn win_ansi(c: char) -> u8 {
    match c {
        ' '..='~' | '\u{a0}'..='\u{ff}' => c as u8,
        '€' => 0x80,
        '‚' => 0x82,
        'ƒ' => 0x83,
        '„' => 0x84,
        '…' => 0x85,
        '†' => 0x86,
        '‡' => 0x87,
        'ˆ' => 0x88,
        '‰' => 0x89,
        'Š' => 0x8a,
        '‹' => 0x8b,
        'Œ' => 0x8c,
        'Ž' => 0x8e,
        '‘' => 0x91,
        '’' => 0x92,
        '“' => 0x93,
        '”' => 0x94,
        '•' => 0x95,
        '–' => 0x96,
        '—' => 0x97,
        '˜' => 0x98,
        '™' => 0x99,
        'š' => 0x9a,
        '›' => 0x9b,
        'œ' => 0x9c,
        'ž' => 0x9e,
        'Ÿ' => 0x9f,
        c if c.is_whitespace() => b' ',
        _ => b'?',
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::{layout, PageFormat};
    use crate::model::Tier;
    use crate::view::{VisibleTopic, VisibleUnit};

    fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
        haystack.windows(needle.len()).position(|w| w == needle)
    }

    fn sample(link: Option<&str>) -> Vec<u8> {
        let units = vec![VisibleUnit {
            name: "Algebra (core)".to_string(),
            topics: vec![VisibleTopic {
                label: "Sets".to_string(),
                tier: Tier::Important,
                link: link.map(str::to_string),
            }],
        }];
        render(&layout(&units).unwrap()).unwrap()
    }

    #[test]
    fn test_document_framing() {
        let bytes = sample(None);
        assert!(bytes.starts_with(b"%PDF-1.4\n"));
        assert!(bytes.ends_with(b"%%EOF\n"));
        assert!(find(&bytes, b"/Count 1").is_some());
        assert!(find(&bytes, b"/BaseFont /Helvetica-Bold").is_some());
    }

    #[test]
    fn test_xref_offsets_point_at_objects() {
        let bytes = sample(Some("http://x"));
        let text = String::from_utf8_lossy(&bytes);

        let startxref = text.rfind("startxref\n").unwrap() + "startxref\n".len();
        let xref_offset: usize = text[startxref..].lines().next().unwrap().parse().unwrap();
        assert!(bytes[xref_offset..].starts_with(b"xref\n"));

        // The xref section is plain ASCII, unlike the body
        let table = String::from_utf8_lossy(&bytes[xref_offset..]);
        let entries: Vec<&str> = table.lines().skip(3).take_while(|l| l.ends_with(" n ")).collect();
        // catalog, pages, two fonts, page, contents, one annotation
        assert_eq!(entries.len(), 7);
        for (i, entry) in entries.iter().enumerate() {
            let offset: usize = entry[..10].parse().unwrap();
            let header = format!("{} 0 obj", i + 1);
            assert!(bytes[offset..].starts_with(header.as_bytes()), "object {}", i + 1);
        }
    }

    #[test]
    fn test_link_annotation_written() {
        let bytes = sample(Some("http://x"));
        assert!(find(&bytes, b"/Subtype /Link").is_some());
        assert!(find(&bytes, b"/URI (http://x)").is_some());
        assert!(find(&bytes, b"/Annots [7 0 R]").is_some());
        assert!(find(&bytes, b"0.145 0.388 0.922 rg").is_some());
    }

    #[test]
    fn test_no_annotations_without_links() {
        let bytes = sample(None);
        assert!(find(&bytes, b"/Annots").is_none());
    }

    #[test]
    fn test_text_is_escaped_and_win_ansi_encoded() {
        let bytes = sample(None);
        assert!(find(&bytes, b"(Algebra \\(core\\))").is_some());
        assert!(find(&bytes, b"(\x95 Sets)").is_some());
        assert!(find(&bytes, b"(Study Buddy \x96 Syllabus Analysis)").is_some());
    }

    #[test]
    fn test_win_ansi_fallback() {
        assert_eq!(win_ansi('A'), b'A');
        assert_eq!(win_ansi('é'), 0xe9);
        assert_eq!(win_ansi('\t'), b' ');
        assert_eq!(win_ansi('日'), b'?');
    }

    #[test]
    fn test_media_box_is_a4() {
        let bytes = sample(None);
        let expected = format!(
            "/MediaBox [0 0 {:.2} {:.2}]",
            PageFormat::A4.width_mm * POINTS_PER_MM,
            PageFormat::A4.height_mm * POINTS_PER_MM
        );
        assert!(find(&bytes, expected.as_bytes()).is_some());
    }
}
