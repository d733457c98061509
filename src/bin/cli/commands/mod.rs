pub mod add;
pub mod capacity;
pub mod decks;
pub mod delete_deck;
pub mod due;
pub mod intervals;
pub mod lesson;
pub mod new_deck;
pub mod review;
pub mod stats;
pub mod study;
