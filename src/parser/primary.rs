//! Primary reader: drives the whole ingestion
//!
//! Iterates the primary export's sections; for each item it invokes the
//! merge coordinator (which may pull the supplementary reader forward)
//! and then the materializer registry; when a section closes, the
//! resolver pass gated on that section runs.
//!
//! Both file handles are owned here and released when the `Ingestion`
//! is dropped, on every exit path including the fatal one. An abandoned
//! ingestion is discarded wholesale; no partially built World escapes.

use super::cursor::{ExportCursor, Token};
use super::filter::ControlFilter;
use super::section::Section;
use super::supplement::SupplementReader;
use super::{ParseError, ParseResult};
use crate::registry::MaterializerRegistry;
use crate::resolve;
use crate::world::World;
use std::io::ErrorKind;
use std::path::Path;
use tokio::fs::File;
use tokio::io::BufReader;
use tracing::info;

type ExportSource = BufReader<ControlFilter<File>>;

enum Step {
    Finished,
    Pass,
    SkipUnknown(String),
    SkipExcluded,
    Section(Section),
}

pub struct Ingestion {
    cursor: ExportCursor<ExportSource>,
    supplement: Option<SupplementReader<ExportSource>>,
    registry: MaterializerRegistry,
    world: World,
}

impl Ingestion {
    /// Open the primary export and, when present, the supplementary one.
    ///
    /// A missing supplementary file is not an error: ingestion proceeds
    /// primary-only with one informational note recorded.
    pub async fn open(primary: &Path, supplement: Option<&Path>) -> ParseResult<Self> {
        let file = File::open(primary).await?;
        let cursor = ExportCursor::new(BufReader::new(ControlFilter::new(file)));
        let mut world = World::new();

        let supplement = match supplement {
            None => {
                world
                    .diagnostics
                    .report("supplementary export not found; continuing primary-only");
                None
            }
            Some(path) => match File::open(path).await {
                Ok(file) => {
                    info!(target: "chronicler::ingest", "supplementary export found: {}", path.display());
                    Some(SupplementReader::new(BufReader::new(ControlFilter::new(
                        file,
                    ))))
                }
                Err(error) if error.kind() == ErrorKind::NotFound => {
                    world
                        .diagnostics
                        .report("supplementary export not found; continuing primary-only");
                    None
                }
                Err(error) => return Err(error.into()),
            },
        };

        Ok(Self {
            cursor,
            supplement,
            registry: MaterializerRegistry::with_defaults(),
            world,
        })
    }

    /// Consume both streams and return the completed World.
    pub async fn run(mut self) -> ParseResult<World> {
        loop {
            let step = match self.cursor.peek().await? {
                Token::Eof => Step::Finished,
                Token::Start { name, .. } => {
                    let section = Section::classify(name);
                    if section == Section::Junk {
                        Step::Pass
                    } else if section == Section::Unknown {
                        Step::SkipUnknown(name.clone())
                    } else if section.is_excluded() {
                        Step::SkipExcluded
                    } else {
                        Step::Section(section)
                    }
                }
                _ => Step::Pass,
            };
            match step {
                Step::Finished => break,
                Step::Pass => {
                    self.cursor.next_token().await?;
                }
                Step::SkipUnknown(name) => {
                    self.world
                        .diagnostics
                        .report(format!("unknown section: {name}"));
                    self.cursor.skip_subtree().await?;
                }
                Step::SkipExcluded => self.cursor.skip_subtree().await?,
                Step::Section(section) => self.parse_section(section).await?,
            }
        }
        info!(
            target: "chronicler::ingest",
            "ingestion complete: {} figures, {} sites, {} events, {} collections",
            self.world.figures.len(),
            self.world.sites.len(),
            self.world.events.len(),
            self.world.collections.len(),
        );
        Ok(self.world)
    }

    async fn parse_section(&mut self, section: Section) -> ParseResult<()> {
        match self.cursor.next_token().await? {
            // A self-closed section has no items; the resolver pass
            // still runs on the (empty) section.
            Token::Start { empty: true, .. } => {
                resolve::section_finished(&mut self.world, section);
                return Ok(());
            }
            Token::Start { .. } => {}
            other => {
                return Err(ParseError::structure(format!(
                    "expected section start, found {other:?}"
                )))
            }
        }
        loop {
            if matches!(self.cursor.peek().await?, Token::Eof) {
                return Err(ParseError::UnexpectedEof);
            }
            if matches!(self.cursor.peek().await?, Token::End { .. }) {
                self.cursor.next_token().await?;
                break;
            }
            if let Some(mut properties) = self.cursor.parse_item().await? {
                if let Some(supplement) = self.supplement.as_mut() {
                    supplement
                        .merge_into(section, &mut properties, &mut self.world, &self.registry)
                        .await?;
                }
                self.registry.materialize(&mut self.world, section, properties);
            }
        }
        resolve::section_finished(&mut self.world, section);
        Ok(())
    }
}

/// Ingest a primary export and an optional supplementary export into a
/// freshly built World.
pub async fn ingest(primary: impl AsRef<Path>, supplement: Option<&Path>) -> ParseResult<World> {
    Ingestion::open(primary.as_ref(), supplement).await?.run().await
}
