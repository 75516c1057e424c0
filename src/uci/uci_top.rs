//! UCI protocol front-end and command loop.
//!
//! A reader thread owns stdin and forwards lines over a channel. It raises
//! the shared stop flag itself when it sees `stop` or `quit`, so a search
//! running on the command thread notices at its next poll without ever
//! blocking on input.

use std::io::{self, BufRead, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Sender};
use std::sync::Arc;
use std::thread;

use crate::engines::engine_alpha_beta::AlphaBetaEngine;
use crate::engines::engine_trait::{Engine, GoParams};
use crate::errors::ChessError;
use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_apply::{apply_move, legal_moves};
use crate::move_generation::perft::perft_divide;
use crate::search::best_move_cache::DEFAULT_CACHE_MB;
use crate::search::iterative_deepening::{mate_in_moves, IterationReport};
use crate::utils::long_algebraic::{long_algebraic_to_move, move_to_long_algebraic};
use crate::utils::render_game_state::render_game_state;

const UCI_ENGINE_NAME: &str = "Quince Chess";
const UCI_ENGINE_AUTHOR: &str = "the Quince Chess developers";

pub fn run_stdio_loop() -> io::Result<()> {
    let stop_flag = Arc::new(AtomicBool::new(false));
    let (tx, rx) = mpsc::channel::<String>();

    let reader_flag = Arc::clone(&stop_flag);
    thread::spawn(move || forward_stdin(tx, reader_flag));

    let mut stdout = io::stdout();
    let mut uci = UciState::new(stop_flag);

    for line in rx {
        let should_quit = uci.handle_command(&line, &mut stdout)?;
        stdout.flush()?;
        if should_quit {
            break;
        }
    }

    Ok(())
}

fn forward_stdin(tx: Sender<String>, stop_flag: Arc<AtomicBool>) {
    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let Ok(line) = line else {
            break;
        };
        if matches!(line.trim(), "stop" | "quit") {
            stop_flag.store(true, Ordering::Relaxed);
        }
        if tx.send(line).is_err() {
            return;
        }
    }
    // End of input ends the session.
    let _ = tx.send("quit".to_owned());
}

struct UciState {
    game_state: GameState,
    engine: Box<dyn Engine>,
    stop_flag: Arc<AtomicBool>,
}

impl UciState {
    fn new(stop_flag: Arc<AtomicBool>) -> Self {
        let mut engine: Box<dyn Engine> = Box::new(AlphaBetaEngine::default());
        engine.set_stop_signal(Some(Arc::clone(&stop_flag)));
        Self {
            game_state: GameState::new_game(),
            engine,
            stop_flag,
        }
    }

    fn handle_command(&mut self, line: &str, out: &mut impl Write) -> io::Result<bool> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Ok(false);
        }

        let mut parts = trimmed.split_whitespace();
        let cmd = parts.next().unwrap_or_default();

        match cmd {
            "uci" => {
                writeln!(out, "id name {}", UCI_ENGINE_NAME)?;
                writeln!(out, "id author {}", UCI_ENGINE_AUTHOR)?;
                writeln!(
                    out,
                    "option name Hash type spin default {} min 1 max 1024",
                    DEFAULT_CACHE_MB
                )?;
                writeln!(out, "option name ClearHash type button")?;
                writeln!(out, "uciok")?;
            }
            "isready" => {
                writeln!(out, "readyok")?;
            }
            "setoption" => {
                if let Err(err) = self.handle_setoption(trimmed) {
                    log::warn!("rejected '{trimmed}': {err}");
                    writeln!(out, "info string setoption error: {}", err)?;
                }
            }
            "ucinewgame" => {
                self.game_state = GameState::new_game();
                self.engine.new_game();
            }
            "position" => {
                if let Err(err) = self.handle_position(trimmed) {
                    log::warn!("rejected '{trimmed}': {err}");
                    writeln!(out, "info string position error: {}", err)?;
                }
            }
            "go" => {
                self.handle_go(trimmed, out)?;
            }
            "stop" => {
                // The reader thread already raised the flag; the search has returned.
                self.stop_flag.store(false, Ordering::Relaxed);
            }
            "d" => {
                writeln!(out, "{}", render_game_state(&self.game_state))?;
            }
            "perft" => {
                match parts.next().map(str::parse::<u32>) {
                    Some(Ok(depth)) => self.handle_perft(depth, out)?,
                    _ => {
                        log::warn!("rejected '{trimmed}': perft needs a depth");
                        writeln!(out, "info string perft error: missing or invalid depth")?;
                    }
                }
            }
            "quit" => {
                return Ok(true);
            }
            _ => {
                log::warn!("ignoring unknown command '{trimmed}'");
            }
        }

        Ok(false)
    }

    fn handle_setoption(&mut self, line: &str) -> Result<(), ChessError> {
        let mut name_tokens = Vec::<&str>::new();
        let mut value_tokens = Vec::<&str>::new();
        let mut mode = "";

        for tok in line.split_whitespace().skip(1) {
            match tok {
                "name" => mode = "name",
                "value" => mode = "value",
                _ if mode == "name" => name_tokens.push(tok),
                _ if mode == "value" => value_tokens.push(tok),
                _ => {}
            }
        }

        if name_tokens.is_empty() {
            return Err(ChessError::MalformedCommand(line.to_owned()));
        }
        let name = name_tokens.join(" ");
        let value = value_tokens.join(" ");

        self.engine.set_option(&name, &value)?;
        log::info!("option {name} set to '{value}'");
        Ok(())
    }

    /// Replaces the current position only when the whole command is valid.
    fn handle_position(&mut self, line: &str) -> Result<(), ChessError> {
        let mut tokens = line.split_whitespace().skip(1).peekable();

        let mut base_state = match tokens.next() {
            Some("startpos") => GameState::new_game(),
            Some("fen") => {
                let mut fen_parts = Vec::<&str>::new();
                while let Some(&next) = tokens.peek() {
                    if next == "moves" {
                        break;
                    }
                    fen_parts.push(next);
                    tokens.next();
                }
                if fen_parts.is_empty() {
                    return Err(ChessError::MissingFenField("piece placement"));
                }
                GameState::from_fen(&fen_parts.join(" "))?
            }
            _ => return Err(ChessError::MalformedCommand(line.to_owned())),
        };

        if tokens.peek().copied() == Some("moves") {
            tokens.next();
            for lan in tokens {
                let mv = long_algebraic_to_move(lan, &mut base_state)?;
                if !apply_move(&mut base_state, mv) {
                    return Err(ChessError::IllegalMove(lan.to_owned()));
                }
            }
        }

        // Searches count ply from here; the history stays for repetition checks.
        base_state.ply = 0;
        self.game_state = base_state;
        Ok(())
    }

    fn handle_go(&mut self, line: &str, out: &mut impl Write) -> io::Result<()> {
        let params = parse_go_params(line);

        let mut on_iteration = |report: &IterationReport| {
            let line = format_info_line(report);
            if let Err(err) = writeln!(out, "{line}").and_then(|()| out.flush()) {
                log::warn!("failed to write search info: {err}");
            }
        };

        let best_move = match self
            .engine
            .choose_move(&self.game_state, &params, &mut on_iteration)
        {
            Ok(output) => output.best_move,
            Err(err) => {
                log::warn!("search failed: {err}");
                writeln!(out, "info string go error: {}", err)?;
                None
            }
        };

        // A stop that lands before the first iteration completes still owes a legal move.
        let best_move =
            best_move.or_else(|| legal_moves(&mut self.game_state.clone()).first().copied());

        match best_move {
            Some(mv) => writeln!(out, "bestmove {}", move_to_long_algebraic(mv))?,
            None => writeln!(out, "bestmove 0000")?,
        }
        Ok(())
    }

    fn handle_perft(&mut self, depth: u32, out: &mut impl Write) -> io::Result<()> {
        let mut probe = self.game_state.clone();
        let divide = perft_divide(&mut probe, depth);
        let total: u64 = divide.iter().map(|(_, nodes)| nodes).sum();

        for (lan, nodes) in &divide {
            writeln!(out, "{lan}: {nodes}")?;
        }
        writeln!(out)?;
        writeln!(out, "Nodes searched: {total}")?;
        log::info!("perft {depth}: {total} nodes");
        Ok(())
    }
}

fn format_info_line(report: &IterationReport) -> String {
    let score = match mate_in_moves(report.score) {
        Some(moves) => format!("mate {moves}"),
        None => format!("cp {}", report.score),
    };
    let mut line = format!(
        "info score {score} depth {} nodes {} time {}",
        report.depth, report.nodes, report.elapsed_ms
    );
    if !report.pv.is_empty() {
        line.push_str(" pv");
        for &mv in &report.pv {
            line.push(' ');
            line.push_str(&move_to_long_algebraic(mv));
        }
    }
    line
}

fn parse_go_params(line: &str) -> GoParams {
    let mut params = GoParams::default();
    let mut tokens = line.split_whitespace().skip(1);

    while let Some(token) = tokens.next() {
        match token {
            "depth" => params.depth = tokens.next().and_then(|x| x.parse::<u8>().ok()),
            "movetime" => params.movetime_ms = tokens.next().and_then(|x| x.parse::<u64>().ok()),
            "wtime" => params.wtime_ms = tokens.next().and_then(|x| x.parse::<u64>().ok()),
            "btime" => params.btime_ms = tokens.next().and_then(|x| x.parse::<u64>().ok()),
            "winc" => params.winc_ms = tokens.next().and_then(|x| x.parse::<u64>().ok()),
            "binc" => params.binc_ms = tokens.next().and_then(|x| x.parse::<u64>().ok()),
            "movestogo" => params.movestogo = tokens.next().and_then(|x| x.parse::<u16>().ok()),
            "infinite" => params.infinite = true,
            other => log::debug!("ignoring go argument '{other}'"),
        }
    }
    params
}
