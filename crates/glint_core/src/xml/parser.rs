//! Minimal XML reader.
//!
//! Produces an [`Element`] tree; text content is kept raw (entity-decoded)
//! and interpreted by the loader.

use thiserror::Error;

/// Errors that can occur during XML parsing.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("Unexpected end of file")]
    UnexpectedEof,

    #[error("Element <{name}> opened at line {line} is never closed")]
    UnclosedElement { name: String, line: usize },

    #[error("Elements nested deeper than {limit} levels at line {line}")]
    TooDeep { limit: usize, line: usize },

    #[error("Mismatched closing tag at line {line}: expected </{expected}>, found </{found}>")]
    MismatchedTag {
        expected: String,
        found: String,
        line: usize,
    },
}

/// Deepest element nesting the reader accepts. Scene files use four levels.
pub const MAX_NESTING: usize = 128;

/// Result type for parsing operations.
pub type ParseResult<T> = Result<T, ParseError>;

/// An XML element with its attributes, text and child elements.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Element {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    /// Concatenated text content, excluding children
    pub text: String,
    pub children: Vec<Element>,
    /// Line the opening tag starts on
    pub line: usize,
}

impl Element {
    fn new(name: String, line: usize) -> Self {
        Self {
            name,
            line,
            ..Default::default()
        }
    }

    /// First child element with the given name.
    pub fn child(&self, name: &str) -> Option<&Element> {
        self.children.iter().find(|c| c.name == name)
    }

    /// All child elements with the given name, in document order.
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.children.iter().filter(move |c| c.name == name)
    }

    /// Value of an attribute, if present.
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Text content with surrounding whitespace removed.
    pub fn trimmed_text(&self) -> &str {
        self.text.trim()
    }
}

/// XML document parser.
pub struct XmlParser<'a> {
    src: &'a str,
    pos: usize,
    line: usize,
    depth: usize,
}

impl<'a> XmlParser<'a> {
    /// Create a new parser over the document text.
    pub fn new(src: &'a str) -> Self {
        Self {
            src,
            pos: 0,
            line: 1,
            depth: 0,
        }
    }

    /// Parse the document and return its root element.
    pub fn parse(mut self) -> ParseResult<Element> {
        self.skip_misc()?;
        if self.rest().is_empty() {
            return Err(ParseError::UnexpectedEof);
        }
        let root = self.parse_nested()?;
        self.skip_misc()?;
        if !self.rest().is_empty() {
            return Err(self.error("content after the root element"));
        }
        Ok(root)
    }

    fn rest(&self) -> &'a str {
        &self.src[self.pos..]
    }

    fn advance(&mut self, n: usize) {
        let consumed = &self.src[self.pos..self.pos + n];
        self.line += consumed.matches('\n').count();
        self.pos += n;
    }

    fn error(&self, message: impl Into<String>) -> ParseError {
        ParseError::Parse {
            line: self.line,
            message: message.into(),
        }
    }

    fn skip_whitespace(&mut self) {
        let rest = self.rest();
        self.advance(rest.len() - rest.trim_start().len());
    }

    /// Skip past the next occurrence of `terminator`.
    fn skip_past(&mut self, terminator: &str) -> ParseResult<()> {
        match self.rest().find(terminator) {
            Some(i) => {
                self.advance(i + terminator.len());
                Ok(())
            }
            None => Err(ParseError::UnexpectedEof),
        }
    }

    /// Skip whitespace, comments, declarations and doctypes.
    fn skip_misc(&mut self) -> ParseResult<()> {
        loop {
            self.skip_whitespace();
            let rest = self.rest();
            if rest.starts_with("<?") {
                self.skip_past("?>")?;
            } else if rest.starts_with("<!--") {
                self.skip_past("-->")?;
            } else if rest.starts_with("<!") {
                self.skip_past(">")?;
            } else {
                return Ok(());
            }
        }
    }

    fn expect(&mut self, token: &str) -> ParseResult<()> {
        if self.rest().is_empty() {
            return Err(ParseError::UnexpectedEof);
        }
        if !self.rest().starts_with(token) {
            return Err(self.error(format!("expected '{}'", token)));
        }
        self.advance(token.len());
        Ok(())
    }

    fn parse_name(&mut self) -> ParseResult<String> {
        let rest = self.rest();
        let end = rest
            .find(|c: char| c.is_whitespace() || matches!(c, '>' | '/' | '=' | '<'))
            .unwrap_or(rest.len());
        if end == 0 {
            return Err(self.error("expected a name"));
        }
        self.advance(end);
        Ok(rest[..end].to_string())
    }

    fn parse_attribute(&mut self) -> ParseResult<(String, String)> {
        let key = self.parse_name()?;
        self.skip_whitespace();
        self.expect("=")?;
        self.skip_whitespace();

        let quote = match self.rest().chars().next() {
            Some(q @ ('"' | '\'')) => q,
            Some(_) => {
                return Err(self.error(format!("attribute '{}' value must be quoted", key)))
            }
            None => return Err(ParseError::UnexpectedEof),
        };
        self.advance(1);

        let rest = self.rest();
        let end = rest.find(quote).ok_or(ParseError::UnexpectedEof)?;
        let value = decode_entities(&rest[..end]);
        self.advance(end + 1);
        Ok((key, value))
    }

    fn parse_nested(&mut self) -> ParseResult<Element> {
        if self.depth == MAX_NESTING {
            return Err(ParseError::TooDeep {
                limit: MAX_NESTING,
                line: self.line,
            });
        }
        self.depth += 1;
        let element = self.parse_element();
        self.depth -= 1;
        element
    }

    fn parse_element(&mut self) -> ParseResult<Element> {
        let start_line = self.line;
        self.expect("<")?;
        let mut element = Element::new(self.parse_name()?, start_line);

        // Attributes
        loop {
            self.skip_whitespace();
            let rest = self.rest();
            if rest.is_empty() {
                return Err(ParseError::UnexpectedEof);
            } else if rest.starts_with("/>") {
                self.advance(2);
                return Ok(element);
            } else if rest.starts_with('>') {
                self.advance(1);
                break;
            }
            let attribute = self.parse_attribute()?;
            element.attributes.push(attribute);
        }

        // Content
        loop {
            let rest = self.rest();
            if rest.is_empty() {
                return Err(ParseError::UnclosedElement {
                    name: element.name,
                    line: start_line,
                });
            } else if rest.starts_with("</") {
                let close_line = self.line;
                self.advance(2);
                let closing = self.parse_name()?;
                self.skip_whitespace();
                self.expect(">")?;
                if closing != element.name {
                    return Err(ParseError::MismatchedTag {
                        expected: element.name,
                        found: closing,
                        line: close_line,
                    });
                }
                return Ok(element);
            } else if rest.starts_with("<!--") {
                self.skip_past("-->")?;
            } else if let Some(body) = rest.strip_prefix("<![CDATA[") {
                let end = body.find("]]>").ok_or(ParseError::UnexpectedEof)?;
                element.text.push_str(&body[..end]);
                self.advance("<![CDATA[".len() + end + "]]>".len());
            } else if rest.starts_with('<') {
                let child = self.parse_nested()?;
                element.children.push(child);
            } else {
                let end = rest.find('<').unwrap_or(rest.len());
                element.text.push_str(&decode_entities(&rest[..end]));
                self.advance(end);
            }
        }
    }
}

/// Replace the predefined XML entities.
fn decode_entities(raw: &str) -> String {
    if !raw.contains('&') {
        return raw.to_string();
    }
    raw.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}

/// Parse an XML document into its root element.
pub fn parse_xml(content: &str) -> ParseResult<Element> {
    XmlParser::new(content).parse()
}
