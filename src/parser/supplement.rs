//! Supplementary reader and merge coordinator
//!
//! The supplementary export carries the same sections in the same
//! canonical order as the primary, but may be missing entirely, may
//! hold a strict subset of items, and has no synchronization marker
//! beyond the pair (current section, item id). The reader buffers one
//! pending item and is advanced only by the merge protocol, never
//! independently.
//!
//! Per primary item the coordinator steps through four states:
//! ahead (supplement's section is later — wait), behind (commit pending
//! items until the sections meet), aligned (ids match — reconcile
//! fields), and divergent (ids fell out of step inside a section —
//! silently stop merging until the next section).

use super::cursor::{ExportCursor, Token};
use super::merge;
use super::property::{find_property, Property};
use super::section::Section;
use super::ParseResult;
use crate::registry::MaterializerRegistry;
use crate::world::World;
use std::cmp::Ordering;
use tokio::io::AsyncBufRead;

enum Step {
    Finished,
    Pass,
    Skip,
    Enter(Section, bool),
}

pub struct SupplementReader<R> {
    cursor: ExportCursor<R>,
    section: Section,
    in_section: bool,
    pending: Option<Vec<Property>>,
    done: bool,
    divergent_in: Option<Section>,
}

impl<R: AsyncBufRead + Unpin> SupplementReader<R> {
    pub fn new(source: R) -> Self {
        Self {
            cursor: ExportCursor::new(source),
            section: Section::Junk,
            in_section: false,
            pending: None,
            done: false,
            divergent_in: None,
        }
    }

    /// Advance until one pending item is buffered or the stream ends.
    async fn refill(&mut self) -> ParseResult<()> {
        while self.pending.is_none() && !self.done {
            if self.in_section {
                if matches!(self.cursor.peek().await?, Token::Eof) {
                    self.done = true;
                    continue;
                }
                if matches!(self.cursor.peek().await?, Token::End { .. }) {
                    self.cursor.next_token().await?;
                    self.in_section = false;
                    continue;
                }
                self.pending = self.cursor.parse_item().await?;
            } else {
                let step = match self.cursor.peek().await? {
                    Token::Eof => Step::Finished,
                    Token::Start { name, empty } => {
                        let section = Section::classify(name);
                        if section == Section::Junk {
                            Step::Pass
                        } else if section == Section::Unknown || section.is_excluded() {
                            Step::Skip
                        } else {
                            Step::Enter(section, *empty)
                        }
                    }
                    _ => Step::Pass,
                };
                match step {
                    Step::Finished => self.done = true,
                    Step::Pass => {
                        self.cursor.next_token().await?;
                    }
                    Step::Skip => self.cursor.skip_subtree().await?,
                    Step::Enter(section, empty) => {
                        self.section = section;
                        self.in_section = !empty;
                        self.cursor.next_token().await?;
                    }
                }
            }
        }
        Ok(())
    }

    /// The lock-step merge protocol, invoked once per primary item after
    /// its property list exists and before it materializes.
    pub async fn merge_into(
        &mut self,
        primary_section: Section,
        primary: &mut Vec<Property>,
        world: &mut World,
        registry: &MaterializerRegistry,
    ) -> ParseResult<()> {
        loop {
            if self.pending.is_none() {
                if self.done {
                    return Ok(());
                }
                self.refill().await?;
                if self.pending.is_none() {
                    return Ok(());
                }
            }

            match self.section.cmp(&primary_section) {
                // Supplement is ahead: nothing to do yet.
                Ordering::Greater => return Ok(()),
                // Supplement is behind: commit pending items to the graph
                // until its section catches up or the stream ends.
                Ordering::Less => {
                    if let Some(item) = self.pending.take() {
                        registry.materialize(world, self.section, item);
                    }
                }
                Ordering::Equal => {
                    if self.divergent_in == Some(primary_section) {
                        return Ok(());
                    }
                    let primary_id = find_property(primary, "id").and_then(|p| p.value_i32());
                    let pending_id = self
                        .pending
                        .as_deref()
                        .and_then(|item| find_property(item, "id"))
                        .and_then(|p| p.value_i32());
                    match (primary_id, pending_id) {
                        // Placeholder filler record: advance past and retry.
                        (_, Some(id)) if id < 0 => {
                            self.pending = None;
                        }
                        (Some(primary_id), Some(pending_id)) if pending_id == primary_id => {
                            if let Some(item) = self.pending.take() {
                                merge::reconcile(primary_section, primary, item);
                            }
                            self.refill().await?;
                            return Ok(());
                        }
                        // The pending id fell behind the primary id: the
                        // streams have diverged for this section. Stop
                        // merging its remainder; not an error.
                        (Some(primary_id), Some(pending_id)) if pending_id < primary_id => {
                            self.divergent_in = Some(primary_section);
                            return Ok(());
                        }
                        // Pending id is ahead within the section (strict
                        // subset), or an id is missing: wait.
                        _ => return Ok(()),
                    }
                }
            }
        }
    }
}
