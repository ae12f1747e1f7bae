use structopt::StructOpt;

use std::{
    fs,
    io::{self, BufRead},
    path, process,
};

use ranktree::{logger, Shell, Step};

/// Command line options.
#[derive(Clone, StructOpt)]
pub struct Opt {
    /// Read commands from file, default is standard input.
    #[structopt(long = "input", parse(from_os_str))]
    input: Option<path::PathBuf>,

    #[structopt(short = "v", parse(from_occurrences))]
    verbose: u64,
}

fn main() {
    let opts = Opt::from_args();

    if let Err(err) = logger::init(logger::level_for(opts.verbose)) {
        eprintln!("{}", err);
        process::exit(1);
    }

    let res = match &opts.input {
        Some(loc) => match fs::File::open(loc) {
            Ok(fd) => run(io::BufReader::new(fd)),
            Err(err) => {
                eprintln!("{:?} {}", loc, err);
                process::exit(1);
            }
        },
        None => run(io::stdin().lock()),
    };

    if let Err(err) = res {
        eprintln!("{}", err);
        process::exit(1);
    }
}

fn run<R: BufRead>(input: R) -> ranktree::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut shell = Shell::new();

    for line in input.lines() {
        let line = match line {
            Ok(line) => line,
            Err(err) => {
                log::error!("reading input {}", err);
                break;
            }
        };
        if let Step::Stop = shell.execute(&line, &mut out)? {
            break;
        }
    }
    Ok(())
}
