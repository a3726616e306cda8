// Opt in to warnings about new 2018 idioms
#![warn(rust_2018_idioms)]
#![warn(trivial_casts)]
#![warn(trivial_numeric_casts)]
#![warn(unused)]
#![allow(unknown_lints)]
#![warn(clippy::all)]

use std::fmt::Display;
use std::process;
use std::str::FromStr;

use clap::{App, Arg, ArgMatches};

use sokoban_astar::config::SearchConfig;
use sokoban_astar::{LoadLevel, Outcome, Solve};

fn main() {
    env_logger::init();

    let matches = App::new("sokoban-astar")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Solves Sokoban levels in XSB format using A*")
        .arg(
            Arg::with_name("max-expanded")
                .long("max-expanded")
                .value_name("N")
                .takes_value(true)
                .help("give up after expanding N states"),
        )
        .arg(
            Arg::with_name("max-frontier")
                .long("max-frontier")
                .value_name("N")
                .takes_value(true)
                .help("give up when more than N states are waiting to be expanded"),
        )
        .arg(
            Arg::with_name("quiet")
                .short("q")
                .long("quiet")
                .help("don't print status while searching"),
        )
        .arg(
            Arg::with_name("steps")
                .short("s")
                .long("steps")
                .help("print the board after every move, not just after pushes"),
        )
        .arg(Arg::with_name("file").required(true))
        .get_matches();

    let mut config = SearchConfig::new().print_status(!matches.is_present("quiet"));
    if let Some(max) = parse_limit(&matches, "max-expanded") {
        config = config.max_expanded(max);
    }
    if let Some(max) = parse_limit(&matches, "max-frontier") {
        config = config.max_frontier(max);
    }
    let include_steps = matches.is_present("steps");

    // required so clap already made sure it's there
    let path = matches.value_of("file").unwrap();

    let level = path.load_level().unwrap_or_else(|err| {
        println!("Can't load level {}: {}", path, err);
        process::exit(1);
    });

    println!("Solving {}...", path);
    let solver_ok = level.solve(&config).unwrap_or_else(|err| {
        println!("Invalid level: {}", err);
        process::exit(1);
    });
    println!("{}", solver_ok.stats);

    match solver_ok.outcome {
        Outcome::Solved(ref moves) => {
            println!("Found solution:");
            print!("{}", level.xsb_solution(moves, include_steps));
            println!("{}", moves);
            println!("Moves: {}", moves.move_cnt());
            println!("Pushes: {}", moves.push_cnt());
        }
        Outcome::Unsolvable => println!("No solution"),
        Outcome::Inconclusive(reason) => println!("Search stopped: {}", reason),
    }
}

fn parse_limit<T>(matches: &ArgMatches<'_>, name: &str) -> Option<T>
where
    T: FromStr,
    T::Err: Display,
{
    matches.value_of(name).map(|value| {
        value.parse().unwrap_or_else(|err| {
            println!("Invalid value for --{}: {}", name, err);
            process::exit(1);
        })
    })
}
