//! Package implement an order-statistics AVL tree and a small in-memory
//! record manager indexed by it.
//!
//! [RankTree] is a height-balanced binary search tree where every node
//! additionally caches the size of its subtree. That makes the following
//! operations logarithmic:
//!
//! * insert, remove and lookup by key.
//! * select by rank, that is, find the k-th smallest (or largest) key.
//! * rank of a key.
//!
//! A tree can also be built in linear time from pre-sorted input, refer
//! to [RankTree::from_sorted] and [RankTree::with_shape].
//!
//! Single threaded use case
//! ------------------------
//!
//! - Parametrised over `key-type` and `value-type`, use `()` when no
//!   payload is needed.
//! - Keys are unique, inserting an existing key is rejected.
//! - Ranks are 1-based, in ascending or descending direction.
//! - Uses ownership model and borrow semantics, no parent pointers.
//! - No Durability guarantee.
//! - Not thread safe.
//!
//! ```
//! use ranktree::RankTree;
//!
//! let mut index: RankTree<u32, &str> = RankTree::new();
//! for key in [5, 3, 8, 1, 4, 7, 9].iter() {
//!     index.insert(*key, "payload").unwrap();
//! }
//! assert_eq!(index.len(), 7);
//! assert_eq!(*index.find_by_rank(1).unwrap(), 1);
//! assert_eq!(*index.find_by_rank(7).unwrap(), 9);
//!
//! index.remove(&5).unwrap();
//! assert_eq!(*index.find_by_rank(4).unwrap(), 7);
//! ```
//!
//! On top of the tree, [MusicManager] keeps artists in a [HashTable] and
//! ranks songs by play count using composite keys, and [Shell] drives it
//! from a line oriented command stream.

use std::{error, fmt, result};

// Short form to compose Error values.
//
// Here are few possible ways:
//
// ```ignore
// use crate::Error;
// err_at!(InvalidInput, msg: format!("bad argument"));
// ```
//
// ```ignore
// use crate::Error;
// err_at!(IOError, writeln!(out, "done"));
// ```
//
// ```ignore
// use crate::Error;
// err_at!(IOError, writeln!(out, "done"), "for command {}", cmd);
// ```
//
macro_rules! err_at {
    ($v:ident, msg: $($arg:expr),+) => {{
        let prefix = format!("{}:{}", file!(), line!());
        Err(Error::$v(prefix, format!($($arg),+)))
    }};
    ($v:ident, $e:expr) => {{
        match $e {
            Ok(val) => Ok(val),
            Err(err) => {
                let prefix = format!("{}:{}", file!(), line!());
                Err(Error::$v(prefix, format!("{}", err)))
            }
        }
    }};
    ($v:ident, $e:expr, $($arg:expr),+) => {{
        match $e {
            Ok(val) => Ok(val),
            Err(err) => {
                let prefix = format!("{}:{}", file!(), line!());
                let msg = format!($($arg),+);
                Err(Error::$v(prefix, format!("{} {}", err, msg)))
            }
        }
    }};
}

mod build;
mod hash;
mod keys;
pub mod logger;
mod music;
mod node;
mod order;
mod rotate;
mod shell;
mod tree;

pub use hash::{HashConfig, HashTable};
pub use keys::{ChartKey, SongKey};
pub use music::{Artist, MusicManager, Song};
pub use node::Node;
pub use order::Order;
pub use shell::{Shell, Step};
pub use tree::{Iter, RankTree};

/// Error variants that are returned by this package's API.
///
/// Each variant carries a prefix, typically identifying the
/// error location.
pub enum Error {
    Fatal(String, String),
    KeyAlreadyExists(String, String),
    KeyNotFound(String, String),
    RankOutOfRange(String, String),
    InvalidInput(String, String),
    NotEmpty(String, String),
    IOError(String, String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> result::Result<(), fmt::Error> {
        use Error::*;

        match self {
            Fatal(p, msg) => write!(f, "{} Fatal: {}", p, msg),
            KeyAlreadyExists(p, msg) => write!(f, "{} KeyAlreadyExists: {}", p, msg),
            KeyNotFound(p, msg) => write!(f, "{} KeyNotFound: {}", p, msg),
            RankOutOfRange(p, msg) => write!(f, "{} RankOutOfRange: {}", p, msg),
            InvalidInput(p, msg) => write!(f, "{} InvalidInput: {}", p, msg),
            NotEmpty(p, msg) => write!(f, "{} NotEmpty: {}", p, msg),
            IOError(p, msg) => write!(f, "{} IOError: {}", p, msg),
        }
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> result::Result<(), fmt::Error> {
        write!(f, "{}", self)
    }
}

impl error::Error for Error {}

/// Type alias for Result return type, used by this package.
pub type Result<T> = result::Result<T, Error>;
