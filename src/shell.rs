//! Line oriented command interpreter over [MusicManager].
//!
//! Every line is one command, a command name followed by its integer
//! arguments separated by white space:
//!
//! ```text
//! Init
//! AddArtist <artist>
//! RemoveArtist <artist>
//! AddSong <artist> <song>
//! RemoveSong <artist> <song>
//! AddToSongCount <artist> <song> <count>
//! GetArtistBestSong <artist>
//! GetRecommendedSongInPlace <rank>
//! Quit
//! # comment
//! ```
//!
//! Empty lines and unknown commands end the session, so do commands whose
//! arguments cannot be parsed. Commands issued before `Init`, or after
//! `Quit`, report `INVALID_INPUT`.

use log::{debug, warn};

use std::{io, str::FromStr};

use crate::{music::MusicManager, Error, Result};

/// Whether the session shall continue after a command.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Step {
    Continue,
    Stop,
}

/// Command interpreter, holds the manager between `Init` and `Quit`.
#[derive(Default)]
pub struct Shell {
    manager: Option<MusicManager>,
}

impl Shell {
    pub fn new() -> Shell {
        Shell::default()
    }

    /// Return the manager, if initialized.
    pub fn as_manager(&self) -> Option<&MusicManager> {
        self.manager.as_ref()
    }

    /// Execute a single command `line`, writing its response to `out`.
    /// Only failure to write is returned as error, command failures are
    /// reported on `out`.
    pub fn execute<W>(&mut self, line: &str, out: &mut W) -> Result<Step>
    where
        W: io::Write,
    {
        let line = line.trim_end_matches(&['\n', '\r'][..]);
        if line.starts_with('#') {
            if line.len() > 1 {
                err_at!(IOError, writeln!(out, "{}", line))?;
            }
            return Ok(Step::Continue);
        }

        let mut tokens = line.split_whitespace();
        let cmd = match tokens.next() {
            Some(cmd) => cmd,
            None => return Ok(Step::Stop),
        };
        let args: Vec<&str> = tokens.collect();
        debug!("execute {} {:?}", cmd, args);

        match cmd {
            "Init" if self.manager.is_some() => {
                err_at!(IOError, writeln!(out, "init was already called."))?;
            }
            "Init" => {
                self.manager = Some(MusicManager::new());
                err_at!(IOError, writeln!(out, "init done."))?;
            }
            "Quit" => {
                self.manager = None;
                err_at!(IOError, writeln!(out, "quit done."))?;
            }
            "AddArtist" => match parse_args::<1>(&args) {
                Some([a]) => {
                    let res = self.with_manager(|mm| mm.add_artist(a));
                    write_status(out, cmd, res)?;
                }
                None => return failed(out, cmd),
            },
            "RemoveArtist" => match parse_args::<1>(&args) {
                Some([a]) => {
                    let res = self.with_manager(|mm| mm.remove_artist(a));
                    write_status(out, cmd, res)?;
                }
                None => return failed(out, cmd),
            },
            "AddSong" => match parse_args::<2>(&args) {
                Some([a, s]) => {
                    let res = self.with_manager(|mm| mm.add_song(a, s));
                    write_status(out, cmd, res)?;
                }
                None => return failed(out, cmd),
            },
            "RemoveSong" => match parse_args::<2>(&args) {
                Some([a, s]) => {
                    let res = self.with_manager(|mm| mm.remove_song(a, s));
                    write_status(out, cmd, res)?;
                }
                None => return failed(out, cmd),
            },
            "AddToSongCount" => match parse_args::<3>(&args) {
                Some([a, s, c]) => {
                    let res = self.with_manager(|mm| mm.add_to_song_count(a, s, c));
                    write_status(out, cmd, res)?;
                }
                None => return failed(out, cmd),
            },
            "GetArtistBestSong" => match parse_args::<1>(&args) {
                Some([a]) => match self.with_manager(|mm| mm.artist_best_song(a)) {
                    Ok(song_id) => {
                        err_at!(IOError, writeln!(out, "{}: {}", cmd, song_id))?;
                    }
                    res => write_status(out, cmd, res)?,
                },
                None => return failed(out, cmd),
            },
            "GetRecommendedSongInPlace" => match parse_args::<1>(&args) {
                Some([r]) => match self.with_manager(|mm| mm.recommended_song(r)) {
                    Ok((a, s)) => {
                        err_at!(IOError, writeln!(out, "{}: Artist {} Song {}", cmd, a, s))?;
                    }
                    res => write_status(out, cmd, res)?,
                },
                None => return failed(out, cmd),
            },
            _ => {
                warn!("unknown command {:?}", cmd);
                return Ok(Step::Stop);
            }
        }

        Ok(Step::Continue)
    }

    fn with_manager<F, T>(&mut self, op: F) -> Result<T>
    where
        F: FnOnce(&mut MusicManager) -> Result<T>,
    {
        match self.manager.as_mut() {
            Some(mm) => op(mm),
            None => err_at!(InvalidInput, msg: "not initialized"),
        }
    }
}

// parse the leading N arguments, trailing ones are ignored.
fn parse_args<const N: usize>(args: &[&str]) -> Option<[i32; N]> {
    if args.len() < N {
        return None;
    }
    let mut vals = [0; N];
    for (val, arg) in vals.iter_mut().zip(args.iter()) {
        *val = i32::from_str(arg).ok()?;
    }
    Some(vals)
}

fn write_status<W, T>(out: &mut W, cmd: &str, res: Result<T>) -> Result<()>
where
    W: io::Write,
{
    let status = match res {
        Ok(_) => "SUCCESS",
        Err(Error::InvalidInput(_, _)) => "INVALID_INPUT",
        Err(err) => {
            debug!("{} {}", cmd, err);
            "FAILURE"
        }
    };
    err_at!(IOError, writeln!(out, "{}: {}", cmd, status))
}

fn failed<W>(out: &mut W, cmd: &str) -> Result<Step>
where
    W: io::Write,
{
    err_at!(IOError, writeln!(out, "{} failed.", cmd))?;
    Ok(Step::Stop)
}

#[cfg(test)]
#[path = "shell_test.rs"]
mod shell_test;
