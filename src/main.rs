use std::env;
use std::process::ExitCode;
use std::time::Instant;

use chess_core::agent::ai::{Engine, SearchProgress};
use chess_core::{ChessError, Difficulty, EngineConfig, GameState, Result};

const USAGE: &str = "\
usage: chess_core [options]

  --fen <fen>            start from this position (default: initial position)
  --depth <n>            search depth in plies
  --difficulty <level>   easy | medium | hard | expert
  --time <ms>            time limit per move
  --book <file>          first-move opening book
  --sequences <file>     opening lines book
  --seed <n>             seed for book move choice
  --selfplay <plies>     let the engine play against itself
  --perft <depth>        count leaf nodes and print the per-move split
  --help                 show this text";

#[derive(Debug, Default)]
struct Options {
    fen: Option<String>,
    config: EngineConfig,
    selfplay: Option<u32>,
    perft: Option<u32>,
    help: bool,
}

fn parse_args(args: impl IntoIterator<Item = String>) -> Result<Options> {
    let mut options = Options::default();
    let mut args = args.into_iter();

    while let Some(flag) = args.next() {
        if flag == "--help" || flag == "-h" {
            options.help = true;
            continue;
        }
        let value = args
            .next()
            .ok_or_else(|| ChessError::InvalidConfig(format!("{flag} needs a value")))?;
        match flag.as_str() {
            "--fen" => options.fen = Some(value),
            "--depth" => options.config = options.config.with_max_depth(number(&flag, &value)?),
            "--difficulty" => {
                let difficulty: Difficulty = value.parse()?;
                options.config.max_depth = difficulty.max_depth();
                options.config.time_limit_ms = difficulty.time_limit_ms();
            }
            "--time" => options.config.time_limit_ms = Some(number(&flag, &value)?),
            "--book" => options.config = options.config.with_book_moves(value),
            "--sequences" => options.config = options.config.with_book_sequences(value),
            "--seed" => options.config = options.config.with_seed(number(&flag, &value)?),
            "--selfplay" => options.selfplay = Some(number(&flag, &value)?),
            "--perft" => options.perft = Some(number(&flag, &value)?),
            _ => return Err(ChessError::InvalidConfig(format!("unknown option {flag}"))),
        }
    }
    Ok(options)
}

fn number<T: std::str::FromStr>(flag: &str, value: &str) -> Result<T> {
    value
        .parse()
        .map_err(|_| ChessError::InvalidConfig(format!("{flag}: '{value}' is not a number")))
}

fn run(options: Options) -> Result<()> {
    let state = match &options.fen {
        Some(fen) => GameState::from_fen(fen)?,
        None => GameState::initial(),
    };

    if let Some(depth) = options.perft {
        let start = Instant::now();
        let mut total = 0;
        for (mv, count) in state.divide(depth) {
            println!("{mv}: {count}");
            total += count;
        }
        println!("\nNodes searched: {total}");
        log::info!("perft {depth} took {} ms", start.elapsed().as_millis());
        return Ok(());
    }

    let mut engine = Engine::new(options.config.clone());
    match options.selfplay {
        Some(plies) => self_play(&mut engine, state, plies),
        None => {
            let result = engine.search_default(&state);
            match result.best_move {
                Some(mv) => println!("bestmove {mv} score {} depth {}", result.score, result.depth),
                None => println!("bestmove (none)"),
            }
            Ok(())
        }
    }
}

fn self_play(engine: &mut Engine, mut state: GameState, plies: u32) -> Result<()> {
    let depth = engine.config().max_depth;
    for _ in 0..plies {
        if state.is_game_over() {
            break;
        }
        let mut report = |event: &SearchProgress| log::info!("{event}");
        let Some(mv) = engine.choose_best_move(&state, depth, &mut report) else {
            break;
        };
        println!("{:>3}. {:?} {mv}", state.fullmove_number(), state.current_player());
        state.make_move(mv)?;
    }

    match state.result() {
        Some(result) => println!("{result}"),
        None => println!("Game unfinished"),
    }
    println!("{}", state.to_fen());
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let options = match parse_args(env::args().skip(1)) {
        Ok(options) => options,
        Err(err) => {
            eprintln!("{err}\n\n{USAGE}");
            return ExitCode::FAILURE;
        }
    };
    if options.help {
        println!("{USAGE}");
        return ExitCode::SUCCESS;
    }

    match run(options) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(text: &str) -> Vec<String> {
        text.split_whitespace().map(String::from).collect()
    }

    #[test]
    fn test_parse_flags() {
        let options = parse_args(args("--depth 3 --seed 9 --selfplay 10")).unwrap();
        assert_eq!(options.config.max_depth, 3);
        assert_eq!(options.config.seed, Some(9));
        assert_eq!(options.selfplay, Some(10));
        assert!(options.perft.is_none());
    }

    #[test]
    fn test_parse_difficulty() {
        let options = parse_args(args("--difficulty expert")).unwrap();
        assert_eq!(options.config.max_depth, 5);
        assert_eq!(options.config.time_limit_ms, Some(5000));
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse_args(args("--depth")).is_err());
        assert!(parse_args(args("--depth deep")).is_err());
        assert!(parse_args(args("--colour white")).is_err());
    }
}
