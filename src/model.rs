//! Data model for parsed documentation: format-agnostic.
//!
//! A [`Unit`] is built in one pass by the parser and handed to renderers
//! read-only afterwards.

use serde::Serialize;

/// One parsed source file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Unit {
    /// Module name: the file name without its extension (`myModule`)
    pub name: String,
    /// File name as found on disk (`myModule.dwl`)
    pub file_name: String,
    /// Root-relative path, `/`-separated (`dw/test/myModule.dwl`)
    pub path: String,
    /// Logical module path (`["dw", "test", "myModule"]`)
    pub module_path: Vec<String>,
    /// Comment preceding the `%dw` header
    pub comment: Comment,
    pub table: Option<AnnotationTable>,
    /// Documented functions and variables in file order
    pub declarations: Vec<Declaration>,
}

impl Unit {
    /// Module path joined the way DataWeave imports spell it (`dw::test::myModule`).
    pub fn qualified_name(&self) -> String {
        self.module_path.join("::")
    }

    pub fn functions(&self) -> impl Iterator<Item = &Function> {
        self.declarations.iter().filter_map(|d| match d {
            Declaration::Function(f) => Some(f),
            Declaration::Variable(_) => None,
        })
    }

    pub fn variables(&self) -> impl Iterator<Item = &Variable> {
        self.declarations.iter().filter_map(|d| match d {
            Declaration::Variable(v) => Some(v),
            Declaration::Function(_) => None,
        })
    }
}

/// A documented declaration inside a unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Declaration {
    Function(Function),
    Variable(Variable),
}

impl Declaration {
    pub fn name(&self) -> &str {
        match self {
            Declaration::Function(f) => &f.name,
            Declaration::Variable(v) => &v.name,
        }
    }

    pub fn comment(&self) -> &Comment {
        match self {
            Declaration::Function(f) => &f.comment,
            Declaration::Variable(v) => &v.comment,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Function {
    pub name: String,
    pub arguments: Vec<Argument>,
    pub comment: Comment,
    pub table: Option<AnnotationTable>,
}

impl Function {
    /// Arguments worth displaying. A declaration like `fun noop()` parses to a
    /// single argument with an empty name, which renders as nothing.
    pub fn visible_arguments(&self) -> impl Iterator<Item = &Argument> {
        self.arguments.iter().filter(|a| !a.name.is_empty())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Variable {
    pub name: String,
    pub comment: Comment,
    pub table: Option<AnnotationTable>,
}

/// One `name[: type]` entry of a function's argument list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Argument {
    pub name: String,
    /// Opaque type label; empty means untyped
    pub datatype: String,
}

impl Argument {
    pub fn new(name: impl Into<String>, datatype: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            datatype: datatype.into(),
        }
    }
}

/// Description text plus `@` annotations of one comment block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Comment {
    pub text: String,
    pub annotations: Vec<Annotation>,
}

impl Comment {
    pub fn is_empty(&self) -> bool {
        self.text.is_empty() && self.annotations.is_empty()
    }

    /// Annotations whose tag resolves to `kind`, in source order.
    pub fn annotations_of(&self, kind: TagKind) -> impl Iterator<Item = &Annotation> {
        self.annotations
            .iter()
            .filter(move |a| a.kind() == Some(kind))
    }
}

/// A single `@tag value` or `@tag key value` entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Annotation {
    /// Tag as written, without the `@`
    pub tag: String,
    /// Parameter name for `@p`/`@param`; empty otherwise
    pub key: String,
    pub value: String,
}

impl Annotation {
    pub fn kind(&self) -> Option<TagKind> {
        TagKind::resolve(&self.tag)
    }
}

/// Tags with behavior attached. Short and long spellings are synonyms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagKind {
    /// `@p` / `@param`
    Param,
    /// `@r` / `@return`
    Return,
    /// `@tbl` / `@table`
    Table,
    /// `@row`
    Row,
}

impl TagKind {
    /// Resolve a tag name, ignoring case.
    pub fn resolve(tag: &str) -> Option<TagKind> {
        match tag.to_ascii_lowercase().as_str() {
            "p" | "param" => Some(TagKind::Param),
            "r" | "return" => Some(TagKind::Return),
            "tbl" | "table" => Some(TagKind::Table),
            "row" => Some(TagKind::Row),
            _ => None,
        }
    }
}

/// Inline table declared with `@tbl` and `@row` annotations.
///
/// Row lengths are not checked against the column count.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AnnotationTable {
    pub columns: Vec<String>,
    pub rows: Vec<Row>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Row {
    pub fields: Vec<String>,
}
