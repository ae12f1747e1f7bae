//! Module implement a record manager for artists and their songs.
//!
//! Artists are kept in a [HashTable] keyed by artist id. Every artist
//! indexes its songs twice, by song id and by play count, and the manager
//! ranks all songs across artists in a single chart. Play count indexes
//! and the chart are ranked in descending order so that rank 1 is always
//! the most played song, ties going to the smaller identifier.
//!
//! ```
//! use ranktree::MusicManager;
//!
//! let mut mm = MusicManager::new();
//! mm.add_artist(1).unwrap();
//! mm.add_song(1, 10).unwrap();
//! mm.add_song(1, 20).unwrap();
//! mm.add_to_song_count(1, 20, 5).unwrap();
//!
//! assert_eq!(mm.artist_best_song(1).unwrap(), 20);
//! assert_eq!(mm.recommended_song(2).unwrap(), (1, 10));
//! ```

use log::debug;

use std::convert::TryFrom;

use crate::{
    hash::HashTable,
    keys::{ChartKey, SongKey},
    order::Order,
    tree::RankTree,
    Error, Result,
};

/// A single song, owned by its [Artist].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Song {
    id: u32,
    artist_id: u32,
    plays: u32,
}

impl Song {
    #[inline]
    pub fn to_song_id(&self) -> u32 {
        self.id
    }

    #[inline]
    pub fn to_artist_id(&self) -> u32 {
        self.artist_id
    }

    #[inline]
    pub fn to_plays(&self) -> u32 {
        self.plays
    }

    fn to_song_key(&self) -> SongKey {
        SongKey::new(self.plays, self.id)
    }

    fn to_chart_key(&self) -> ChartKey {
        ChartKey::new(self.plays, self.artist_id, self.id)
    }
}

/// An artist and the indexes over its songs.
pub struct Artist {
    id: u32,
    songs: RankTree<u32, Song>,
    by_plays: RankTree<SongKey, ()>,
}

impl Artist {
    fn new(id: u32) -> Artist {
        Artist {
            id,
            songs: RankTree::new(),
            by_plays: RankTree::with_order(Order::Descending),
        }
    }

    #[inline]
    pub fn to_artist_id(&self) -> u32 {
        self.id
    }

    /// Return the number of songs by this artist.
    #[inline]
    pub fn len(&self) -> usize {
        self.songs.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.songs.is_empty()
    }

    pub fn get_song(&self, song_id: u32) -> Option<&Song> {
        self.songs.get(&song_id)
    }

    /// Return the most played song, ties going to the smallest song id.
    pub fn best_song(&self) -> Option<u32> {
        self.by_plays.find_by_rank(1).ok().map(SongKey::to_song_id)
    }

    /// Iterate over songs in ascending order of song id.
    pub fn iter(&self) -> impl Iterator<Item = &Song> {
        self.songs.iter().map(|(_, song)| song)
    }
}

/// Record manager for artists and songs.
///
/// All identifiers, counts and ranks are supplied as signed integers and
/// must be positive, else `InvalidInput` is returned and nothing is
/// changed.
pub struct MusicManager {
    artists: HashTable<Artist>,
    chart: RankTree<ChartKey, ()>,
}

impl Default for MusicManager {
    fn default() -> MusicManager {
        MusicManager::new()
    }
}

impl MusicManager {
    pub fn new() -> MusicManager {
        MusicManager {
            artists: HashTable::new(),
            chart: RankTree::with_order(Order::Descending),
        }
    }

    /// Return the number of artists.
    #[inline]
    pub fn n_artists(&self) -> usize {
        self.artists.len()
    }

    /// Return the number of songs, across all artists.
    #[inline]
    pub fn n_songs(&self) -> usize {
        self.chart.len()
    }

    pub fn get_artist(&self, artist_id: u32) -> Option<&Artist> {
        self.artists.get(artist_id)
    }

    pub fn add_artist(&mut self, artist_id: i32) -> Result<()> {
        let artist_id = to_positive("artist_id", artist_id)?;

        self.artists.insert(artist_id, Artist::new(artist_id))?;
        debug!("add_artist {}", artist_id);
        Ok(())
    }

    /// Remove an artist without songs, fails with `NotEmpty` otherwise.
    pub fn remove_artist(&mut self, artist_id: i32) -> Result<()> {
        let artist_id = to_positive("artist_id", artist_id)?;

        let n_songs = match self.artists.get(artist_id) {
            Some(artist) => artist.len(),
            None => return err_at!(KeyNotFound, msg: "artist {}", artist_id),
        };
        if n_songs > 0 {
            return err_at!(NotEmpty, msg: "artist {} has {} songs", artist_id, n_songs);
        }

        self.artists.remove(artist_id)?;
        debug!("remove_artist {}", artist_id);
        Ok(())
    }

    /// Add a song with zero plays.
    pub fn add_song(&mut self, artist_id: i32, song_id: i32) -> Result<()> {
        let artist_id = to_positive("artist_id", artist_id)?;
        let song_id = to_positive("song_id", song_id)?;

        let artist = match self.artists.get_mut(artist_id) {
            Some(artist) => artist,
            None => return err_at!(KeyNotFound, msg: "artist {}", artist_id),
        };
        let song = Song {
            id: song_id,
            artist_id,
            plays: 0,
        };
        let (song_key, chart_key) = (song.to_song_key(), song.to_chart_key());

        artist.songs.insert(song_id, song)?;
        artist.by_plays.insert(song_key, ())?;
        self.chart.insert(chart_key, ())?;
        debug!("add_song {}/{}", artist_id, song_id);
        Ok(())
    }

    pub fn remove_song(&mut self, artist_id: i32, song_id: i32) -> Result<()> {
        let artist_id = to_positive("artist_id", artist_id)?;
        let song_id = to_positive("song_id", song_id)?;

        let artist = match self.artists.get_mut(artist_id) {
            Some(artist) => artist,
            None => return err_at!(KeyNotFound, msg: "artist {}", artist_id),
        };
        let (_, song) = artist.songs.remove(&song_id)?;
        artist.by_plays.remove(&song.to_song_key())?;
        self.chart.remove(&song.to_chart_key())?;
        debug!("remove_song {}/{} plays:{}", artist_id, song_id, song.plays);
        Ok(())
    }

    /// Add `count` plays to a song, re-ranking it in its artist's index
    /// and in the chart.
    pub fn add_to_song_count(&mut self, artist_id: i32, song_id: i32, count: i32) -> Result<()> {
        let artist_id = to_positive("artist_id", artist_id)?;
        let song_id = to_positive("song_id", song_id)?;
        let count = to_positive("count", count)?;

        let artist = match self.artists.get_mut(artist_id) {
            Some(artist) => artist,
            None => return err_at!(KeyNotFound, msg: "artist {}", artist_id),
        };
        let song = match artist.songs.get_mut(&song_id) {
            Some(song) => song,
            None => return err_at!(KeyNotFound, msg: "song {}/{}", artist_id, song_id),
        };
        let plays = match song.plays.checked_add(count) {
            Some(plays) => plays,
            None => return err_at!(InvalidInput, msg: "plays overflow {}+{}", song.plays, count),
        };

        let (old_song, old_chart) = (song.to_song_key(), song.to_chart_key());
        song.plays = plays;
        let (new_song, new_chart) = (song.to_song_key(), song.to_chart_key());

        artist.by_plays.remove(&old_song)?;
        artist.by_plays.insert(new_song, ())?;
        self.chart.remove(&old_chart)?;
        self.chart.insert(new_chart, ())?;
        debug!("add_to_song_count {}/{} plays:{}", artist_id, song_id, plays);
        Ok(())
    }

    /// Return the most played song of an artist, ties going to the
    /// smallest song id.
    pub fn artist_best_song(&self, artist_id: i32) -> Result<u32> {
        let artist_id = to_positive("artist_id", artist_id)?;

        match self.artists.get(artist_id) {
            Some(artist) => match artist.best_song() {
                Some(song_id) => Ok(song_id),
                None => err_at!(KeyNotFound, msg: "artist {} has no songs", artist_id),
            },
            None => err_at!(KeyNotFound, msg: "artist {}", artist_id),
        }
    }

    /// Return `(artist_id, song_id)` of the song at `rank` in the chart,
    /// rank 1 being the most played song.
    pub fn recommended_song(&self, rank: i32) -> Result<(u32, u32)> {
        let rank = to_positive("rank", rank)?;

        let rank = err_at!(InvalidInput, usize::try_from(rank))?;
        let key = self.chart.find_by_rank(rank)?;
        Ok((key.to_artist_id(), key.to_song_id()))
    }

    /// Verify every index and their mutual consistency.
    pub fn validate(&self) -> Result<()> {
        self.chart.validate()?;

        let mut n_songs = 0;
        for (artist_id, artist) in self.artists.iter() {
            artist.songs.validate()?;
            artist.by_plays.validate()?;
            if artist.id != artist_id {
                return err_at!(Fatal, msg: "artist {} filed under {}", artist.id, artist_id);
            }
            if artist.songs.len() != artist.by_plays.len() {
                return err_at!(
                    Fatal, msg: "artist {} {} != {}",
                    artist_id, artist.songs.len(), artist.by_plays.len()
                );
            }
            for song in artist.iter() {
                if !artist.by_plays.contains_key(&song.to_song_key()) {
                    return err_at!(Fatal, msg: "missing plays index {:?}", song);
                }
                if !self.chart.contains_key(&song.to_chart_key()) {
                    return err_at!(Fatal, msg: "missing chart entry {:?}", song);
                }
            }
            n_songs += artist.len();
        }

        if n_songs != self.chart.len() {
            return err_at!(Fatal, msg: "chart {} != {} songs", self.chart.len(), n_songs);
        }
        Ok(())
    }
}

fn to_positive(name: &str, val: i32) -> Result<u32> {
    if val <= 0 {
        err_at!(InvalidInput, msg: "{} must be positive, got {}", name, val)
    } else {
        err_at!(InvalidInput, u32::try_from(val))
    }
}

#[cfg(test)]
#[path = "music_test.rs"]
mod music_test;
