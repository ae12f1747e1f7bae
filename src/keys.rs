//! Composite keys used to rank songs by play count.
//!
//! Both keys compare lexicographically field by field, each field in its
//! own direction. Play count is compared in ascending order while the
//! identifiers are compared in descending order, so that among keys with
//! equal plays the one with the smaller identifier is the greater key.
//! Placed in a [RankTree](crate::RankTree) ranked in
//! [Order::Descending], rank 1 is the most played entry with ties going to
//! the smallest identifier.

use std::cmp::Ordering;

use crate::order::Order;

/// Key for songs within a single artist.
#[derive(Clone, Copy, Default, Debug, Eq, PartialEq, Hash)]
pub struct SongKey {
    plays: u32,
    song_id: u32,
}

impl SongKey {
    pub fn new(plays: u32, song_id: u32) -> SongKey {
        SongKey { plays, song_id }
    }

    #[inline]
    pub fn to_plays(&self) -> u32 {
        self.plays
    }

    #[inline]
    pub fn to_song_id(&self) -> u32 {
        self.song_id
    }
}

impl Ord for SongKey {
    fn cmp(&self, other: &SongKey) -> Ordering {
        Order::Ascending
            .cmp(&self.plays, &other.plays)
            .then_with(|| Order::Descending.cmp(&self.song_id, &other.song_id))
    }
}

impl PartialOrd for SongKey {
    fn partial_cmp(&self, other: &SongKey) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Key for songs across all artists.
#[derive(Clone, Copy, Default, Debug, Eq, PartialEq, Hash)]
pub struct ChartKey {
    plays: u32,
    artist_id: u32,
    song_id: u32,
}

impl ChartKey {
    pub fn new(plays: u32, artist_id: u32, song_id: u32) -> ChartKey {
        ChartKey {
            plays,
            artist_id,
            song_id,
        }
    }

    #[inline]
    pub fn to_plays(&self) -> u32 {
        self.plays
    }

    #[inline]
    pub fn to_artist_id(&self) -> u32 {
        self.artist_id
    }

    #[inline]
    pub fn to_song_id(&self) -> u32 {
        self.song_id
    }
}

impl Ord for ChartKey {
    fn cmp(&self, other: &ChartKey) -> Ordering {
        Order::Ascending
            .cmp(&self.plays, &other.plays)
            .then_with(|| Order::Descending.cmp(&self.artist_id, &other.artist_id))
            .then_with(|| Order::Descending.cmp(&self.song_id, &other.song_id))
    }
}

impl PartialOrd for ChartKey {
    fn partial_cmp(&self, other: &ChartKey) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[cfg(test)]
#[path = "keys_test.rs"]
mod keys_test;
