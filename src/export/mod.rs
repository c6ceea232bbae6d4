//! Paginated PDF export
//!
//! Lays the currently visible units out on fixed A4 pages and writes them as
//! a PDF document. The layout pass is separate from serialization so the
//! flow rules can be checked without parsing PDF output.
//!
//! # Flow rules
//!
//! A single cursor `y` (mm from the page top) runs through the whole
//! document. Before a unit title the cursor must be within
//! `page height − 25`; before a topic or link line within
//! `page height − 20`. Otherwise a new page starts and `y` resets to the top
//! margin. Pages are append-only.

mod pdf;

use crate::view::VisibleUnit;
use std::fmt;
use std::path::{Path, PathBuf};

/// File name of the exported document
pub const EXPORT_FILE_NAME: &str = "study-buddy-syllabus.pdf";

/// Heading on the first page
pub const DOCUMENT_TITLE: &str = "Study Buddy – Syllabus Analysis";

/// Visible text of a topic's enrichment link
pub const LINK_TEXT: &str = "YouTube Playlist";

const MARGIN_X: f32 = 15.0;
const TOP_MARGIN: f32 = 18.0;
const DOCUMENT_TITLE_ADVANCE: f32 = 12.0;
const UNIT_TITLE_RESERVE: f32 = 25.0;
const UNIT_TITLE_ADVANCE: f32 = 8.0;
const TOPIC_RESERVE: f32 = 20.0;
const LINE_ADVANCE: f32 = 6.0;
const UNIT_SPACING: f32 = 6.0;
const TOPIC_INDENT: f32 = 2.0;
const LINK_INDENT: f32 = 8.0;

// ─────────────────────────────────────────────────────────────────────────────
// Errors
// ─────────────────────────────────────────────────────────────────────────────

/// Export failures
#[derive(Debug)]
pub enum ExportError {
    /// Nothing is rendered, so there is nothing to export
    Empty,
    /// Writing the document failed
    Io(std::io::Error),
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "No results to download"),
            Self::Io(e) => write!(f, "Failed to write PDF: {}", e),
        }
    }
}

impl std::error::Error for ExportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Empty => None,
            Self::Io(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for ExportError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Layout Types
// ─────────────────────────────────────────────────────────────────────────────

/// Physical page size in millimetres
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageFormat {
    pub width_mm: f32,
    pub height_mm: f32,
}

impl PageFormat {
    /// ISO A4 portrait
    pub const A4: PageFormat = PageFormat {
        width_mm: 210.0,
        height_mm: 297.0,
    };
}

/// Typographic role of a line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextStyle {
    DocumentTitle,
    UnitTitle,
    Topic,
    Link,
}

impl TextStyle {
    pub fn bold(&self) -> bool {
        matches!(self, Self::DocumentTitle | Self::UnitTitle)
    }

    pub fn size_pt(&self) -> f32 {
        match self {
            Self::DocumentTitle => 18.0,
            Self::UnitTitle => 13.0,
            Self::Topic | Self::Link => 11.0,
        }
    }

    /// Fill colour as 0-255 RGB
    pub fn color(&self) -> (u8, u8, u8) {
        match self {
            Self::Link => (37, 99, 235),
            _ => (0, 0, 0),
        }
    }
}

/// A line of text positioned on a page, `y_mm` is the baseline from the top
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedLine {
    pub x_mm: f32,
    pub y_mm: f32,
    pub text: String,
    pub style: TextStyle,
    /// Target of a clickable annotation over this line
    pub link: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    pub lines: Vec<PlacedLine>,
}

/// Fully paginated document, ready to serialize
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentLayout {
    pub format: PageFormat,
    pub pages: Vec<Page>,
}

impl DocumentLayout {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn lines(&self) -> impl Iterator<Item = (usize, &PlacedLine)> {
        self.pages
            .iter()
            .enumerate()
            .flat_map(|(i, page)| page.lines.iter().map(move |line| (i, line)))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Layout Pass
// ─────────────────────────────────────────────────────────────────────────────

/// Running write position across the page stack
struct Cursor {
    format: PageFormat,
    pages: Vec<Page>,
    y: f32,
}

impl Cursor {
    fn new(format: PageFormat) -> Self {
        Self {
            format,
            pages: vec![Page::default()],
            y: TOP_MARGIN,
        }
    }

    /// Start a new page if the cursor is below `height − reserve`
    fn ensure_room(&mut self, reserve: f32) {
        if self.y > self.format.height_mm - reserve {
            self.pages.push(Page::default());
            self.y = TOP_MARGIN;
        }
    }

    fn write(&mut self, x_mm: f32, text: String, style: TextStyle, link: Option<String>) {
        if let Some(page) = self.pages.last_mut() {
            page.lines.push(PlacedLine {
                x_mm,
                y_mm: self.y,
                text,
                style,
                link,
            });
        }
    }

    fn advance(&mut self, mm: f32) {
        self.y += mm;
    }

    fn finish(self) -> DocumentLayout {
        DocumentLayout {
            format: self.format,
            pages: self.pages,
        }
    }
}

/// Paginate visible units onto A4 pages
///
/// # Errors
/// `ExportError::Empty` when there are no units.
pub fn layout(units: &[VisibleUnit]) -> Result<DocumentLayout, ExportError> {
    layout_with_format(units, PageFormat::A4)
}

pub fn layout_with_format(
    units: &[VisibleUnit],
    format: PageFormat,
) -> Result<DocumentLayout, ExportError> {
    if units.is_empty() {
        return Err(ExportError::Empty);
    }

    let mut cursor = Cursor::new(format);
    cursor.write(
        MARGIN_X,
        DOCUMENT_TITLE.to_string(),
        TextStyle::DocumentTitle,
        None,
    );
    cursor.advance(DOCUMENT_TITLE_ADVANCE);

    for unit in units {
        cursor.ensure_room(UNIT_TITLE_RESERVE);
        cursor.write(MARGIN_X, unit.name.clone(), TextStyle::UnitTitle, None);
        cursor.advance(UNIT_TITLE_ADVANCE);

        for topic in &unit.topics {
            cursor.ensure_room(TOPIC_RESERVE);
            cursor.write(
                MARGIN_X + TOPIC_INDENT,
                format!("• {}", topic.label),
                TextStyle::Topic,
                None,
            );
            cursor.advance(LINE_ADVANCE);

            if let Some(url) = &topic.link {
                // The link line may land on the page after its topic
                cursor.ensure_room(TOPIC_RESERVE);
                cursor.write(
                    MARGIN_X + LINK_INDENT,
                    LINK_TEXT.to_string(),
                    TextStyle::Link,
                    Some(url.clone()),
                );
                cursor.advance(LINE_ADVANCE);
            }
        }

        cursor.advance(UNIT_SPACING);
    }

    Ok(cursor.finish())
}

/// Serialize a layout to PDF bytes
pub fn render_pdf(layout: &DocumentLayout) -> Result<Vec<u8>, ExportError> {
    Ok(pdf::render(layout)?)
}

/// Lay out, serialize, and write the export file into `dir`
///
/// Returns the path of the written document.
pub fn export_to(dir: &Path, units: &[VisibleUnit]) -> Result<PathBuf, ExportError> {
    let layout = layout(units)?;
    let bytes = render_pdf(&layout)?;

    std::fs::create_dir_all(dir)?;
    let path = dir.join(EXPORT_FILE_NAME);
    std::fs::write(&path, bytes)?;

    let links = layout.lines().filter(|(_, line)| line.link.is_some()).count();
    tracing::info!(
        "Exported {} unit(s) on {} page(s) with {} link(s) to {}",
        units.len(),
        layout.page_count(),
        links,
        path.display()
    );
    Ok(path)
}
