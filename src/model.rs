//! Typed content model. Pure data: the engine consumes a [`Document`]
//! built entirely before layout begins and never mutates it.

/// A contiguous span of paragraph text in a single weight.
#[derive(Clone, Debug, PartialEq)]
pub struct TextRun {
    pub text: String,
    pub bold: bool,
}

impl TextRun {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bold: false,
        }
    }

    pub fn bold(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bold: true,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Heading {
    pub text: String,
    /// 1-based; levels deeper than 3 render at the level-3 size.
    pub level: u8,
}

/// Rendered as wrapped lines; each line is independently eligible for a
/// page break, so a paragraph may straddle a page boundary.
#[derive(Clone, Debug, Default)]
pub struct Paragraph {
    pub runs: Vec<TextRun>,
}

/// A rectangular grid of cell strings. The first row is the header row
/// (shaded, bold); every row must have the same column count as the header.
#[derive(Clone, Debug)]
pub struct Table {
    pub rows: Vec<Vec<String>>,
}

#[derive(Clone, Debug)]
pub enum BlockKind {
    Heading(Heading),
    Paragraph(Paragraph),
    Table(Table),
}

/// One semantic unit of document content, in reading order.
#[derive(Clone, Debug)]
pub struct Block {
    pub kind: BlockKind,
    /// The block must start at the top of a fresh page regardless of
    /// remaining space.
    pub force_page_break: bool,
}

impl Block {
    pub fn heading(level: u8, text: impl Into<String>) -> Self {
        Self {
            kind: BlockKind::Heading(Heading {
                text: text.into(),
                level,
            }),
            force_page_break: false,
        }
    }

    pub fn paragraph(runs: impl IntoIterator<Item = TextRun>) -> Self {
        Self {
            kind: BlockKind::Paragraph(Paragraph {
                runs: runs.into_iter().collect(),
            }),
            force_page_break: false,
        }
    }

    /// A paragraph holding a single plain run.
    pub fn text(text: impl Into<String>) -> Self {
        Self::paragraph([TextRun::plain(text)])
    }

    pub fn table(rows: Vec<Vec<String>>) -> Self {
        Self {
            kind: BlockKind::Table(Table { rows }),
            force_page_break: false,
        }
    }

    pub fn with_page_break(mut self) -> Self {
        self.force_page_break = true;
        self
    }
}

/// An ordered sequence of blocks plus the strings the finalizer stamps
/// into the reserved bands. Immutable during layout.
#[derive(Clone, Debug, Default)]
pub struct Document {
    pub blocks: Vec<Block>,
    /// Stamped left-aligned in the header band of every page.
    pub header_text: Option<String>,
    /// Stamped left-aligned in the footer band of every page.
    pub footer_text: Option<String>,
    /// Stamped centered in the footer band of the last page only.
    pub closing_caption: Option<String>,
}

impl Document {
    pub fn builder() -> DocumentBuilder {
        DocumentBuilder::default()
    }
}

/// Pure construction API for a [`Document`]. No I/O and no validation
/// beyond construction; malformed content surfaces during layout.
#[derive(Default)]
pub struct DocumentBuilder {
    doc: Document,
    pending_break: bool,
}

impl DocumentBuilder {
    pub fn block(mut self, mut block: Block) -> Self {
        if std::mem::take(&mut self.pending_break) {
            block.force_page_break = true;
        }
        self.doc.blocks.push(block);
        self
    }

    pub fn heading(self, level: u8, text: impl Into<String>) -> Self {
        self.block(Block::heading(level, text))
    }

    pub fn paragraph(self, runs: impl IntoIterator<Item = TextRun>) -> Self {
        self.block(Block::paragraph(runs))
    }

    pub fn text(self, text: impl Into<String>) -> Self {
        self.block(Block::text(text))
    }

    pub fn table(self, rows: Vec<Vec<String>>) -> Self {
        self.block(Block::table(rows))
    }

    /// The next block added starts on a fresh page.
    pub fn page_break(mut self) -> Self {
        self.pending_break = true;
        self
    }

    pub fn header_text(mut self, text: impl Into<String>) -> Self {
        self.doc.header_text = Some(text.into());
        self
    }

    pub fn footer_text(mut self, text: impl Into<String>) -> Self {
        self.doc.footer_text = Some(text.into());
        self
    }

    pub fn closing_caption(mut self, text: impl Into<String>) -> Self {
        self.doc.closing_caption = Some(text.into());
        self
    }

    pub fn build(self) -> Document {
        self.doc
    }
}
