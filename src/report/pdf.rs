//! PDF rendering with the standard Helvetica faces. Layout is computed first
//! as positioned lines so page overflow can be checked without a PDF reader.

use super::document::{Block, Document};
use crate::error::{FolioError, Result};
use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Line, Mm, PdfDocument, PdfLayerReference, Point, Rgb,
};

pub const PAGE_WIDTH: f32 = 210.0;
pub const PAGE_HEIGHT: f32 = 297.0;
pub const MARGIN: f32 = 15.0;
const BOTTOM_LIMIT: f32 = 25.0;
const FOOTER_Y: f32 = 10.0;
const HEADER_SIZE: f32 = 20.0;
const BULLET_INDENT: f32 = 5.0;
const PT_TO_MM: f32 = 0.3528;
// Helvetica averages about half an em per glyph; a little extra keeps bold
// lines inside the margin.
const GLYPH_WIDTH_EM: f32 = 0.55;

const DARK_BLUE: (f32, f32, f32) = (44.0 / 255.0, 62.0 / 255.0, 80.0 / 255.0);
const ACCENT: (f32, f32, f32) = (231.0 / 255.0, 76.0 / 255.0, 60.0 / 255.0);
const SLATE: (f32, f32, f32) = (52.0 / 255.0, 73.0 / 255.0, 94.0 / 255.0);
const GRAY: (f32, f32, f32) = (0.5, 0.5, 0.5);
const BLACK: (f32, f32, f32) = (0.0, 0.0, 0.0);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Face {
    Regular,
    Bold,
    Italic,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlacedText {
    pub text: String,
    pub size: f32,
    pub face: Face,
    pub color: (f32, f32, f32),
    pub x: f32,
    pub y: f32,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SheetLayout {
    pub number: usize,
    pub texts: Vec<PlacedText>,
    /// Vertical positions of horizontal rules.
    pub rules: Vec<f32>,
}

#[derive(Debug, Clone, Copy)]
struct Style {
    size: f32,
    face: Face,
    color: (f32, f32, f32),
    space_before: f32,
    indent: f32,
}

fn style(block: &Block, on_cover: bool) -> Style {
    let base = Style {
        size: 11.0,
        face: Face::Regular,
        color: BLACK,
        space_before: 2.0,
        indent: 0.0,
    };
    match block {
        Block::Title(_) if on_cover => Style {
            size: 28.0,
            face: Face::Bold,
            color: DARK_BLUE,
            space_before: 30.0,
            ..base
        },
        Block::Title(_) => Style {
            size: 20.0,
            face: Face::Bold,
            color: DARK_BLUE,
            ..base
        },
        Block::Subtitle(_) => Style {
            size: 16.0,
            face: Face::Italic,
            color: SLATE,
            space_before: 5.0,
            ..base
        },
        Block::Caption(_) => Style {
            size: 12.0,
            color: GRAY,
            space_before: 20.0,
            ..base
        },
        Block::Label(_) if on_cover => Style {
            size: 14.0,
            face: Face::Bold,
            color: DARK_BLUE,
            space_before: 10.0,
            ..base
        },
        Block::Label(_) => Style {
            size: 24.0,
            face: Face::Bold,
            color: ACCENT,
            ..base
        },
        Block::Heading(_) => Style {
            size: 14.0,
            face: Face::Bold,
            color: DARK_BLUE,
            space_before: 5.0,
            ..base
        },
        Block::Bullet(_) => Style {
            size: 10.0,
            color: SLATE,
            space_before: 0.5,
            indent: BULLET_INDENT,
            ..base
        },
        Block::Paragraph(_) | Block::Rule => base,
    }
}

fn line_height(size: f32) -> f32 {
    size * PT_TO_MM * 1.4
}

fn text_width(text: &str, size: f32) -> f32 {
    text.chars().count() as f32 * size * PT_TO_MM * GLYPH_WIDTH_EM
}

/// Greedy word wrap to at most `max_chars` per line. Words longer than a line
/// are split.
pub fn wrap(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        let mut word = word.to_string();
        while word.chars().count() > max_chars {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            let head: String = word.chars().take(max_chars).collect();
            word = word.chars().skip(max_chars).collect();
            lines.push(head);
        }
        if word.is_empty() {
            continue;
        }
        let needed = if current.is_empty() {
            word.chars().count()
        } else {
            current.chars().count() + 1 + word.chars().count()
        };
        if needed > max_chars && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(&word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

struct Layouter<'a> {
    title: &'a str,
    sheets: Vec<SheetLayout>,
    cursor: f32,
}

impl Layouter<'_> {
    fn new_sheet(&mut self) {
        let number = self.sheets.len() + 1;
        let header = self.title.to_string();
        let mut sheet = SheetLayout {
            number,
            ..Default::default()
        };
        let top = PAGE_HEIGHT - MARGIN - line_height(HEADER_SIZE) * 0.7;
        sheet.texts.push(PlacedText {
            x: centered_x(&header, HEADER_SIZE),
            text: header,
            size: HEADER_SIZE,
            face: Face::Bold,
            color: DARK_BLUE,
            y: top,
        });
        let footer = format!("Page {number}");
        sheet.texts.push(PlacedText {
            x: centered_x(&footer, 8.0),
            text: footer,
            size: 8.0,
            face: Face::Italic,
            color: GRAY,
            y: FOOTER_Y,
        });
        self.cursor = top - line_height(HEADER_SIZE) * 0.6 - 5.0;
        self.sheets.push(sheet);
    }

    fn current(&mut self) -> &mut SheetLayout {
        if self.sheets.is_empty() {
            self.new_sheet();
        }
        let last = self.sheets.len() - 1;
        &mut self.sheets[last]
    }

    fn ensure_room(&mut self, height: f32) {
        if self.sheets.is_empty() || self.cursor - height < BOTTOM_LIMIT {
            self.new_sheet();
        }
    }

    fn place_block(&mut self, block: &Block, on_cover: bool) {
        let style = style(block, on_cover);
        let text = match block {
            Block::Title(text)
            | Block::Subtitle(text)
            | Block::Label(text)
            | Block::Heading(text)
            | Block::Paragraph(text)
            | Block::Caption(text) => text.clone(),
            Block::Bullet(text) => format!("* {text}"),
            Block::Rule => {
                self.ensure_room(4.0);
                let y = self.cursor - 1.0;
                self.current().rules.push(y);
                self.cursor -= 8.0;
                return;
            }
        };

        self.cursor -= style.space_before;
        let available = PAGE_WIDTH - 2.0 * MARGIN - style.indent;
        let max_chars = (available / (style.size * PT_TO_MM * GLYPH_WIDTH_EM)) as usize;
        let height = line_height(style.size);
        for line in wrap(&text, max_chars) {
            self.ensure_room(height);
            self.cursor -= height;
            let x = if on_cover {
                centered_x(&line, style.size)
            } else {
                MARGIN + style.indent
            };
            let y = self.cursor;
            self.current().texts.push(PlacedText {
                text: line,
                size: style.size,
                face: style.face,
                color: style.color,
                x,
                y,
            });
        }
    }
}

fn centered_x(text: &str, size: f32) -> f32 {
    ((PAGE_WIDTH - text_width(text, size)) / 2.0).max(MARGIN)
}

/// Position every block. Each document page starts a new sheet and long
/// pages continue onto further sheets; every sheet carries the header and a
/// `Page N` footer.
pub fn layout(document: &Document) -> Vec<SheetLayout> {
    let mut layouter = Layouter {
        title: &document.title,
        sheets: Vec::new(),
        cursor: 0.0,
    };
    for page in &document.pages {
        layouter.new_sheet();
        let on_cover = page.number == 1;
        for block in &page.blocks {
            layouter.place_block(block, on_cover);
        }
    }
    if layouter.sheets.is_empty() {
        layouter.new_sheet();
    }
    layouter.sheets
}

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    italic: IndirectFontRef,
}

impl Fonts {
    fn get(&self, face: Face) -> &IndirectFontRef {
        match face {
            Face::Regular => &self.regular,
            Face::Bold => &self.bold,
            Face::Italic => &self.italic,
        }
    }
}

fn pdf_error(e: printpdf::Error) -> FolioError {
    FolioError::Render(format!("{e:?}"))
}

fn rgb((r, g, b): (f32, f32, f32)) -> Color {
    Color::Rgb(Rgb::new(r, g, b, None))
}

fn draw(layer: &PdfLayerReference, sheet: &SheetLayout, fonts: &Fonts) {
    for text in &sheet.texts {
        layer.set_fill_color(rgb(text.color));
        layer.use_text(
            text.text.clone(),
            text.size,
            Mm(text.x),
            Mm(text.y),
            fonts.get(text.face),
        );
    }
    if !sheet.rules.is_empty() {
        layer.set_outline_color(rgb((52.0 / 255.0, 152.0 / 255.0, 219.0 / 255.0)));
        layer.set_outline_thickness(2.0);
        for y in &sheet.rules {
            layer.add_line(Line {
                points: vec![
                    (Point::new(Mm(MARGIN), Mm(*y)), false),
                    (Point::new(Mm(PAGE_WIDTH - MARGIN), Mm(*y)), false),
                ],
                is_closed: false,
            });
        }
    }
}

pub fn to_pdf(document: &Document) -> Result<Vec<u8>> {
    let sheets = layout(document);
    let (doc, first_page, first_layer) =
        PdfDocument::new(&document.title, Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Page 1");
    let fonts = Fonts {
        regular: doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(pdf_error)?,
        bold: doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(pdf_error)?,
        italic: doc
            .add_builtin_font(BuiltinFont::HelveticaOblique)
            .map_err(pdf_error)?,
    };

    let mut first = Some(doc.get_page(first_page).get_layer(first_layer));
    for sheet in &sheets {
        let layer = match first.take() {
            Some(layer) => layer,
            None => {
                let (page, layer) = doc.add_page(
                    Mm(PAGE_WIDTH),
                    Mm(PAGE_HEIGHT),
                    format!("Page {}", sheet.number),
                );
                doc.get_page(page).get_layer(layer)
            }
        };
        draw(&layer, sheet, &fonts);
    }

    tracing::debug!(sheets = sheets.len(), "pdf laid out");
    doc.save_to_bytes().map_err(pdf_error)
}
