//! Forward-only cursor over a structured-text stream
//!
//! Wraps the quick-xml event reader behind a one-token peek buffer and a
//! simplified owned-token model, then layers the recursive tree builder
//! and the depth-counted subtree skip on top. Both the primary and the
//! supplementary reader share this machinery.
//!
//! Comments, processing instructions, and declarations never surface as
//! tokens. Whitespace-only text is dropped by the reader's trim config.

use super::property::Property;
use super::{ParseError, ParseResult};
use quick_xml::events::Event;
use quick_xml::Reader;
use std::future::Future;
use std::pin::Pin;
use tokio::io::AsyncBufRead;

/// The cursor's view of one structural token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Start { name: String, empty: bool },
    End { name: String },
    Text(String),
    Eof,
}

pub struct ExportCursor<R> {
    reader: Reader<R>,
    buf: Vec<u8>,
    peeked: Option<Token>,
}

impl<R: AsyncBufRead + Unpin> ExportCursor<R> {
    pub fn new(source: R) -> Self {
        let mut reader = Reader::from_reader(source);
        let config = reader.config_mut();
        config.trim_text_start = true;
        config.trim_text_end = true;
        Self {
            reader,
            buf: Vec::new(),
            peeked: None,
        }
    }

    /// Current token without consuming it.
    pub async fn peek(&mut self) -> ParseResult<&Token> {
        if self.peeked.is_none() {
            let token = self.read_token().await?;
            self.peeked = Some(token);
        }
        match self.peeked.as_ref() {
            Some(token) => Ok(token),
            None => Err(ParseError::structure("peek slot empty after fill")),
        }
    }

    /// Consume and return the current token.
    pub async fn next_token(&mut self) -> ParseResult<Token> {
        if let Some(token) = self.peeked.take() {
            return Ok(token);
        }
        self.read_token().await
    }

    async fn read_token(&mut self) -> ParseResult<Token> {
        loop {
            self.buf.clear();
            match self.reader.read_event_into_async(&mut self.buf).await? {
                Event::Start(e) => {
                    return Ok(Token::Start {
                        name: decode(e.name().as_ref()),
                        empty: false,
                    })
                }
                Event::Empty(e) => {
                    return Ok(Token::Start {
                        name: decode(e.name().as_ref()),
                        empty: true,
                    })
                }
                Event::End(e) => {
                    return Ok(Token::End {
                        name: decode(e.name().as_ref()),
                    })
                }
                Event::Text(t) => {
                    let raw = decode(t.as_ref());
                    let text = quick_xml::escape::unescape(&raw)
                        .map_err(|e| ParseError::structure(format!("bad entity reference: {e}")))?
                        .into_owned();
                    if text.is_empty() {
                        continue;
                    }
                    return Ok(Token::Text(text));
                }
                Event::CData(t) => return Ok(Token::Text(decode(t.as_ref()))),
                Event::Eof => return Ok(Token::Eof),
                // Declarations, comments, processing instructions, doctypes.
                _ => continue,
            }
        }
    }

    /// Parse one item's subtree into an ordered property list.
    ///
    /// Returns `None` at a section boundary (the end marker is left for
    /// the caller), a single synthetic leaf for a bare text node, and a
    /// property list for a composite item. The cursor is left immediately
    /// past the item's end marker.
    pub async fn parse_item(&mut self) -> ParseResult<Option<Vec<Property>>> {
        if matches!(self.peek().await?, Token::End { .. } | Token::Eof) {
            return Ok(None);
        }
        match self.next_token().await? {
            Token::Text(value) => Ok(Some(vec![Property::text(value)])),
            Token::Start { empty: true, .. } => Ok(Some(Vec::new())),
            Token::Start { name, empty: false } => {
                let mut properties = Vec::new();
                loop {
                    match self.peek().await? {
                        Token::End { name: end } if *end == name => {
                            self.next_token().await?;
                            break;
                        }
                        Token::End { name: end } => {
                            return Err(ParseError::structure(format!(
                                "mismatched end marker </{end}> inside <{name}>"
                            )))
                        }
                        Token::Eof => return Err(ParseError::UnexpectedEof),
                        _ => {
                            if let Some(property) = self.parse_property().await? {
                                properties.push(property);
                            }
                        }
                    }
                }
                Ok(Some(properties))
            }
            Token::End { .. } | Token::Eof => Ok(None),
        }
    }

    /// Parse one property element: empty element → no value, text-only →
    /// scalar value, element children → recursion into sub-properties.
    /// Stray text between properties is consumed and yields `None`.
    pub fn parse_property(&mut self) -> Pin<Box<dyn Future<Output = ParseResult<Option<Property>>> + '_>> {
        Box::pin(async move {
            match self.next_token().await? {
                Token::Start { name, empty: true } => Ok(Some(Property::empty(name))),
                Token::Start { name, empty: false } => {
                    let mut property = Property::empty(name.clone());
                    match self.peek().await? {
                        Token::Text(_) => {
                            if let Token::Text(value) = self.next_token().await? {
                                property.value = Some(value);
                            }
                            self.expect_end(&name).await?;
                        }
                        Token::Start { .. } => loop {
                            match self.peek().await? {
                                Token::End { name: end } if *end == name => {
                                    self.next_token().await?;
                                    break;
                                }
                                Token::End { name: end } => {
                                    return Err(ParseError::structure(format!(
                                        "mismatched end marker </{end}> inside <{name}>"
                                    )))
                                }
                                Token::Eof => return Err(ParseError::UnexpectedEof),
                                _ => {
                                    if let Some(sub) = self.parse_property().await? {
                                        property.sub_properties.push(sub);
                                    }
                                }
                            }
                        },
                        Token::End { .. } => self.expect_end(&name).await?,
                        Token::Eof => return Err(ParseError::UnexpectedEof),
                    }
                    Ok(Some(property))
                }
                Token::Text(_) => Ok(None),
                Token::End { name } => Err(ParseError::structure(format!(
                    "unexpected end marker </{name}> where a property was expected"
                ))),
                Token::Eof => Err(ParseError::UnexpectedEof),
            }
        })
    }

    /// Skip the subtree starting at the current element by depth counting:
    /// depth 1 on entry, +1 on non-empty starts, -1 on ends, stop at 0.
    /// Content is never materialized, so the cost is the subtree size.
    pub async fn skip_subtree(&mut self) -> ParseResult<()> {
        match self.next_token().await? {
            Token::Start { empty: true, .. } => return Ok(()),
            Token::Start { empty: false, .. } => {}
            other => {
                return Err(ParseError::structure(format!(
                    "cannot skip from token {other:?}"
                )))
            }
        }
        let mut depth = 1u32;
        while depth > 0 {
            match self.next_token().await? {
                Token::Start { empty: false, .. } => depth += 1,
                Token::End { .. } => depth -= 1,
                Token::Eof => return Err(ParseError::UnexpectedEof),
                _ => {}
            }
        }
        Ok(())
    }

    async fn expect_end(&mut self, name: &str) -> ParseResult<()> {
        match self.next_token().await? {
            Token::End { name: end } if end == name => Ok(()),
            other => Err(ParseError::structure(format!(
                "expected </{name}>, found {other:?}"
            ))),
        }
    }
}

fn decode(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}
