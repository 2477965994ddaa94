//! Interactive command loop over the move engine.
//!
//! Prints the legal moves and the board, then reads long algebraic moves,
//! `undo`, `random`, or `q`. An optional command-line argument supplies a
//! starting FEN.

use std::env;
use std::fs::File;
use std::io::{self, BufRead, Write};

use log::{info, warn, LevelFilter};
use rand::seq::IndexedRandom;
use simplelog::{Config, WriteLogger};

use damson_chess::game_state::chess_types::Color;
use damson_chess::game_state::game_state::GameState;
use damson_chess::utils::render_game_state::render_game_state;

fn init_logging() {
    // If the log file cannot be created, fall back to no logging.
    if let Ok(file) = File::create("damson.log") {
        let _ = WriteLogger::init(LevelFilter::Info, Config::default(), file);
        info!("logger initialized");
    }
}

fn main() {
    init_logging();

    let mut game = match env::args().nth(1) {
        Some(fen) => match GameState::from_fen(&fen) {
            Ok(game) => game,
            Err(err) => {
                eprintln!("{err}");
                return;
            }
        },
        None => GameState::new_game(),
    };

    let stdin = io::stdin();

    loop {
        let moves = game.legal_moves().to_vec();
        println!("Number of legal moves: {}", moves.len());
        for mv in &moves {
            println!("{}", mv.lan_str());
        }
        println!("{}", render_game_state(&game));

        let side = match game.turn {
            Color::White => "White",
            Color::Black => "Black",
        };
        print!("{side} to move (or 'undo', 'random', 'q'): ");
        io::stdout().flush().ok();

        let mut input = String::new();
        match stdin.lock().read_line(&mut input) {
            Ok(0) | Err(_) => break,
            Ok(_) => {}
        }
        let input = input.trim();
        if input.is_empty() {
            continue;
        }

        match input {
            "q" => break,
            "undo" => match game.undo_move() {
                Ok(()) => info!("undid last move"),
                Err(err) => println!("{err}"),
            },
            "random" => match moves.choose(&mut rand::rng()).copied() {
                Some(mv) => {
                    if game.make_move(&mv).is_ok() {
                        println!("Played {}", mv.lan_str());
                        info!("played random move {}", mv.lan_str());
                    }
                }
                None => println!("no legal moves available"),
            },
            _ => match game.make_move_lan(input) {
                Ok(()) => info!("played {input}"),
                Err(err) => {
                    warn!("rejected input '{input}': {err}");
                    println!("{err}");
                }
            },
        }
    }
}
