use rand::{prelude::random, rngs::SmallRng, Rng, SeedableRng};
use structopt::StructOpt;

use std::time;

use ranktree::RankTree;

/// Command line options.
#[derive(Clone, StructOpt)]
pub struct Opt {
    #[structopt(long = "seed")]
    seed: Option<u64>,

    #[structopt(long = "loads", default_value = "1000000")] // default 1M
    loads: usize,

    #[structopt(long = "inserts", default_value = "0")]
    inserts: usize,

    #[structopt(long = "removes", default_value = "0")]
    removes: usize,

    #[structopt(long = "gets", default_value = "0")]
    gets: usize,

    #[structopt(long = "ranks", default_value = "0")]
    ranks: usize,
}

fn main() {
    let opts = Opt::from_args();
    let seed = opts.seed.unwrap_or_else(random);
    println!("seed {}", seed);
    let mut rng = SmallRng::seed_from_u64(seed);

    let mut index: RankTree<u64, u64> = RankTree::new();

    // initial load
    let start = time::Instant::now();
    for _i in 0..opts.loads {
        let (key, val): (u64, u64) = (rng.gen(), rng.gen());
        index.try_insert(key, val).ok();
    }
    println!(
        "loaded {} items in {:?} height:{}",
        index.len(),
        start.elapsed(),
        index.height()
    );

    // sorted load
    let start = time::Instant::now();
    let (keys, values): (Vec<u64>, Vec<u64>) = index.to_vec().into_iter().unzip();
    match RankTree::from_sorted(keys, values) {
        Ok(sorted) => println!(
            "from_sorted {} items in {:?} height:{}",
            sorted.len(),
            start.elapsed(),
            sorted.height()
        ),
        Err(err) => println!("from_sorted {}", err),
    }

    do_incremental(&mut rng, &opts, &mut index);

    let start = time::Instant::now();
    let mut n = 0;
    for _e in index.iter() {
        n += 1;
    }
    println!("iterating {} items, took {:?}", n, start.elapsed());

    let start = time::Instant::now();
    match index.validate() {
        Ok(()) => println!("validated {} items in {:?}", index.len(), start.elapsed()),
        Err(err) => println!("validate {}", err),
    }
}

fn do_incremental(rng: &mut SmallRng, opts: &Opt, index: &mut RankTree<u64, u64>) {
    let start = time::Instant::now();
    let total = opts.inserts + opts.removes + opts.gets + opts.ranks;
    let mut n = total;
    while n > 0 {
        let op = rng.gen::<usize>() % total;

        let key = rng.gen::<u64>();
        if op < opts.inserts {
            let val = rng.gen::<u64>();
            index.try_insert(key, val).ok();
        } else if op < (opts.inserts + opts.removes) {
            // pick a live key through its rank, random keys rarely hit.
            match index.len() {
                0 => (),
                len => {
                    let rank = (rng.gen::<usize>() % len) + 1;
                    if let Ok(key) = index.find_by_rank(rank).map(|k| *k) {
                        index.remove(&key).ok();
                    }
                }
            }
        } else if op < (opts.inserts + opts.removes + opts.gets) {
            index.get(&key);
        } else {
            match index.len() {
                0 => (),
                len => {
                    index.find_by_rank((rng.gen::<usize>() % len) + 1).ok();
                }
            }
        }
        n -= 1;
    }
    println!(
        "incremental for operations {}, took {:?} len:{}",
        total,
        start.elapsed(),
        index.len()
    );
}
