//! Lessons split into capacity-sized chunks placed in a memory palace

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::flashcards::{Deck, DeckScheduler, Flashcard};

/// A location in a memory palace
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Locus {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// Ordered locations of a memory palace; the first is the entrance
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LociStructure {
    loci: Vec<Locus>,
}

impl LociStructure {
    pub fn new(loci: Vec<Locus>) -> Self {
        Self { loci }
    }

    /// `count` plain loci named `loci_1`..`loci_{count}`
    pub fn numbered(count: usize) -> Self {
        Self::new(
            (1..=count)
                .map(|n| Locus {
                    id: format!("loci_{}", n),
                    name: format!("Locus {}", n),
                    description: String::new(),
                })
                .collect(),
        )
    }

    pub fn loci(&self) -> &[Locus] {
        &self.loci
    }

    pub fn contains(&self, id: &str) -> bool {
        self.loci.iter().any(|l| l.id == id)
    }

    /// Route from the entrance to `target`
    pub fn path_to(&self, target: &str) -> Vec<String> {
        match self.loci.first() {
            Some(entrance) if self.contains(target) && entrance.id != target => {
                vec![entrance.id.clone(), target.to_string()]
            }
            _ => vec![target.to_string()],
        }
    }
}

/// Cards created for one chunk of a lesson
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LessonChunk {
    /// 1-based chunk number
    pub number: usize,
    pub loci_id: String,
    pub card_ids: Vec<Uuid>,
}

/// Add `items` to `deck` as cards, `capacity` cards per chunk.
///
/// Chunk `n` is placed at locus `loci_{n}`; every card is tagged with the
/// lesson name.
pub fn chunk_lesson(
    deck: &mut Deck,
    scheduler: &DeckScheduler,
    lesson_name: &str,
    items: &[(String, String)],
    capacity: u32,
    loci: &LociStructure,
    now: DateTime<Utc>,
) -> Vec<LessonChunk> {
    let chunk_size = capacity.max(1) as usize;
    let mut chunks = Vec::new();

    for (i, chunk_items) in items.chunks(chunk_size).enumerate() {
        let number = i + 1;
        let loci_id = format!("loci_{}", number);
        let memory_path = loci.path_to(&loci_id);

        let mut card_ids = Vec::with_capacity(chunk_items.len());
        for (front, back) in chunk_items {
            let mut card = Flashcard::new(
                deck.id,
                front.clone(),
                back.clone(),
                scheduler.initial_state(now),
                now,
            );
            card.loci_id = Some(loci_id.clone());
            card.memory_path = memory_path.clone();
            card.tags.push(lesson_name.to_string());
            card_ids.push(deck.push_card(card).id);
        }

        chunks.push(LessonChunk {
            number,
            loci_id,
            card_ids,
        });
    }

    deck.updated_at = now;
    log::info!(
        "Lesson '{}': {} items in {} chunks of up to {}",
        lesson_name,
        items.len(),
        chunks.len(),
        chunk_size
    );

    chunks
}
