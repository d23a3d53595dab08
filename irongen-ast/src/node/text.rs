//! Documentation text nodes.

use irongen_model::TypeId;

use crate::id::IdSlot;

/// Sequence of text nodes.
#[derive(Debug, Clone, Default)]
pub struct FreeTexts {
    /// Node id.
    pub id: IdSlot,
    /// Children.
    pub children: Vec<FreeTextNode>,
}

/// Inline text.
#[derive(Debug, Clone)]
pub struct FreeText {
    /// Node id.
    pub id: IdSlot,
    /// Text.
    pub text: String,
}

/// Text ending in a line break.
#[derive(Debug, Clone)]
pub struct FreeTextLine {
    /// Node id.
    pub id: IdSlot,
    /// Line content.
    pub child: Box<FreeTextNode>,
}

/// Paragraph.
#[derive(Debug, Clone)]
pub struct FreeTextParagraph {
    /// Node id.
    pub id: IdSlot,
    /// Paragraph content.
    pub child: Box<FreeTextNode>,
}

/// Titled section.
#[derive(Debug, Clone)]
pub struct FreeTextSection {
    /// Node id.
    pub id: IdSlot,
    /// Section header.
    pub header: Option<Box<FreeTextNode>>,
    /// Section content.
    pub content: Box<FreeTextNode>,
}

/// Bullet list.
#[derive(Debug, Clone, Default)]
pub struct FreeTextList {
    /// Node id.
    pub id: IdSlot,
    /// Items.
    pub children: Vec<FreeTextNode>,
}

/// Inline code.
#[derive(Debug, Clone)]
pub struct FreeTextCode {
    /// Node id.
    pub id: IdSlot,
    /// Code.
    pub text: String,
}

/// Code example block.
#[derive(Debug, Clone)]
pub struct FreeTextExample {
    /// Node id.
    pub id: IdSlot,
    /// Example code.
    pub text: String,
}

/// Link to a type.
#[derive(Debug, Clone)]
pub struct FreeTextTypeLink {
    /// Node id.
    pub id: IdSlot,
    /// Linked type.
    pub type_id: TypeId,
    /// Resolved display name.
    pub local_name: Option<String>,
}

/// Link to a property of a type.
#[derive(Debug, Clone)]
pub struct FreeTextPropertyLink {
    /// Node id.
    pub id: IdSlot,
    /// Owning type.
    pub type_id: TypeId,
    /// Property name.
    pub property_name: String,
}

/// Any documentation text node.
#[derive(Debug, Clone)]
pub enum FreeTextNode {
    /// Sequence.
    Texts(FreeTexts),
    /// Inline text.
    Text(FreeText),
    /// Line.
    Line(FreeTextLine),
    /// Paragraph.
    Paragraph(FreeTextParagraph),
    /// Section.
    Section(FreeTextSection),
    /// List.
    List(FreeTextList),
    /// Inline code.
    Code(FreeTextCode),
    /// Example.
    Example(FreeTextExample),
    /// Type link.
    TypeLink(FreeTextTypeLink),
    /// Property link.
    PropertyLink(FreeTextPropertyLink),
}

impl FreeTextNode {
    /// Plain inline text.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(FreeText {
            id: IdSlot::new(),
            text: text.into(),
        })
    }

    /// Splits text into one paragraph per non-empty line.
    #[must_use]
    pub fn paragraphs(text: &str) -> Self {
        let children = text
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(|l| {
                Self::Paragraph(FreeTextParagraph {
                    id: IdSlot::new(),
                    child: Box::new(Self::text(l)),
                })
            })
            .collect();
        Self::Texts(FreeTexts {
            id: IdSlot::new(),
            children,
        })
    }

    /// Id slot of the wrapped node.
    #[must_use]
    pub const fn id_slot(&self) -> &IdSlot {
        match self {
            Self::Texts(n) => &n.id,
            Self::Text(n) => &n.id,
            Self::Line(n) => &n.id,
            Self::Paragraph(n) => &n.id,
            Self::Section(n) => &n.id,
            Self::List(n) => &n.id,
            Self::Code(n) => &n.id,
            Self::Example(n) => &n.id,
            Self::TypeLink(n) => &n.id,
            Self::PropertyLink(n) => &n.id,
        }
    }

    /// Concatenated raw text, ignoring structure.
    #[must_use]
    pub fn plain_text(&self) -> String {
        match self {
            Self::Texts(n) => n
                .children
                .iter()
                .map(Self::plain_text)
                .collect::<Vec<_>>()
                .join("\n"),
            Self::List(n) => n
                .children
                .iter()
                .map(Self::plain_text)
                .collect::<Vec<_>>()
                .join("\n"),
            Self::Text(n) => n.text.clone(),
            Self::Code(n) => n.text.clone(),
            Self::Example(n) => n.text.clone(),
            Self::Line(n) => n.child.plain_text(),
            Self::Paragraph(n) => n.child.plain_text(),
            Self::Section(n) => match &n.header {
                Some(h) => format!("{}\n{}", h.plain_text(), n.content.plain_text()),
                None => n.content.plain_text(),
            },
            Self::TypeLink(n) => n.local_name.clone().unwrap_or_else(|| n.type_id.to_string()),
            Self::PropertyLink(n) => n.property_name.clone(),
        }
    }
}
