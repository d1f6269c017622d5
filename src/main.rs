use std::{env, fs, process, time::Instant};

use nero::{lexer::lexer::Lexer, parser::parser::parse};
use tracing_subscriber::EnvFilter;

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();

    let args: Vec<String> = env::args().collect();
    if args.len() != 2 {
        eprintln!("usage: nero <file>");
        process::exit(2);
    }

    let file_path = &args[1];
    let source = fs::read_to_string(file_path).expect("Failed to read file!");

    let start = Instant::now();
    let lexer = Lexer::new(&source);

    match parse(lexer) {
        Ok(tree) => {
            println!("Parsed in {:?}", start.elapsed());
            println!("{:#?}", tree);
        }
        Err(diagnostic) => {
            let lines: Vec<&str> = source.split('\n').collect();
            eprintln!("-> {}", file_path);
            eprintln!("{}", diagnostic.render(&lines));
            process::exit(1);
        }
    }
}
