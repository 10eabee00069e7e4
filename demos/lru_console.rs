//! Line-driven console front end for parity testing against the
//! reference protocol.
//!
//! Startup reads the cache capacity and a request count, then accepts
//! `SET <key> <value>` and `GET <key>` lines. Malformed or unknown lines
//! are rejected without consuming a request slot. Every accepted request
//! prints its result and the full recency order, front (MRU) first. A
//! miss reports the sentinel value -1.

use std::io::{self, BufRead, Write};
use std::process::ExitCode;

use lrukit::policy::lru::LruCache;

const MISS_SENTINEL: i64 = -1;

fn read_usize(lines: &mut impl Iterator<Item = io::Result<String>>, what: &str) -> Option<usize> {
    loop {
        print!("{}: ", what);
        let _ = io::stdout().flush();
        let line = match lines.next()? {
            Ok(line) => line,
            Err(_) => return None,
        };
        match line.trim().parse() {
            Ok(value) => return Some(value),
            Err(_) => eprintln!("expected an integer, got {:?}", line.trim()),
        }
    }
}

fn print_order(cache: &LruCache<i64, i64>) {
    let pairs: Vec<String> = cache
        .iter()
        .map(|(key, value)| format!("({}:{})", key, value))
        .collect();
    println!("order: {}", pairs.join(" "));
}

fn main() -> ExitCode {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    let Some(capacity) = read_usize(&mut lines, "cache capacity") else {
        return ExitCode::FAILURE;
    };
    let Some(requests) = read_usize(&mut lines, "number of requests") else {
        return ExitCode::FAILURE;
    };

    let mut cache = match LruCache::try_new(capacity) {
        Ok(cache) => cache,
        Err(err) => {
            eprintln!("invalid configuration: {}", err);
            return ExitCode::FAILURE;
        },
    };

    println!("enter requests (SET <key> <value> or GET <key>):");
    let mut served = 0usize;
    while served < requests {
        let line = match lines.next() {
            Some(Ok(line)) => line,
            _ => break,
        };
        let tokens: Vec<&str> = line.split_whitespace().collect();

        match tokens.as_slice() {
            ["SET", key, value] => {
                let (Ok(key), Ok(value)) = (key.parse::<i64>(), value.parse::<i64>()) else {
                    eprintln!("SET takes two integers; request not counted");
                    continue;
                };
                cache.insert(key, value);
                print!("SET {} {} : ", key, value);
                print_order(&cache);
                served += 1;
            },
            ["GET", key] => {
                let Ok(key) = key.parse::<i64>() else {
                    eprintln!("GET takes one integer; request not counted");
                    continue;
                };
                let value = cache.get(&key).copied().unwrap_or(MISS_SENTINEL);
                print!("GET {} : {} ", key, value);
                print_order(&cache);
                served += 1;
            },
            [] => {},
            [command, ..] => {
                eprintln!("unknown command {:?}; request not counted", command);
            },
        }
    }

    ExitCode::SUCCESS
}
