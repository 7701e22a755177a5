use std::io::{self, BufRead, Write};

use tictactoe_engine::RandomSource;
use tictactoe_engine::tictactoe::{
    Board, EngineError, IllegalMoveReason, Mark, Outcome, SessionPhase, TicTacToeSession,
    winning_line,
};

use crate::config::Config;

#[derive(Debug)]
pub enum ConsoleError {
    Io(io::Error),
    Engine(EngineError),
}

impl std::fmt::Display for ConsoleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConsoleError::Io(e) => write!(f, "IO error: {}", e),
            ConsoleError::Engine(e) => write!(f, "Engine error: {}", e),
        }
    }
}

impl std::error::Error for ConsoleError {}

impl From<io::Error> for ConsoleError {
    fn from(e: io::Error) -> Self {
        ConsoleError::Io(e)
    }
}

impl From<EngineError> for ConsoleError {
    fn from(e: EngineError) -> Self {
        ConsoleError::Engine(e)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleExit {
    Finished,
    Quit,
    EndOfInput,
}

enum Input {
    Line(String),
    Quit,
    EndOfInput,
}

/// Empty cells show their 1-based number so the player knows what to type.
/// Cells of `highlight` are wrapped in brackets.
pub fn render_board(board: &Board, highlight: Option<[usize; 3]>) -> String {
    let mut out = String::new();
    for row in 0..3 {
        if row > 0 {
            out.push_str("---+---+---\n");
        }
        let cells: Vec<String> = (0..3)
            .map(|col| {
                let index = row * 3 + col;
                let symbol = match board.get(index) {
                    Some(Mark::Empty) | None => char::from(b'1' + index as u8),
                    Some(mark) => mark.symbol(),
                };
                if highlight.is_some_and(|line| line.contains(&index)) {
                    format!("[{}]", symbol)
                } else {
                    format!(" {} ", symbol)
                }
            })
            .collect();
        out.push_str(&cells.join("|"));
        out.push('\n');
    }
    out
}

pub struct ConsoleGame<'a, R: RandomSource, I: BufRead, O: Write> {
    session: &'a mut TicTacToeSession<R>,
    config: &'a Config,
    input: I,
    output: O,
}

impl<'a, R: RandomSource, I: BufRead, O: Write> ConsoleGame<'a, R, I, O> {
    pub fn new(session: &'a mut TicTacToeSession<R>, config: &'a Config, input: I, output: O) -> Self {
        Self {
            session,
            config,
            input,
            output,
        }
    }

    pub fn run(&mut self) -> Result<ConsoleExit, ConsoleError> {
        loop {
            match self.session.phase() {
                SessionPhase::SelectingRounds => {
                    if let Some(exit) = self.select_rounds()? {
                        return Ok(exit);
                    }
                }
                SessionPhase::RoundActive => {
                    if let Some(exit) = self.play_turn()? {
                        return Ok(exit);
                    }
                }
                SessionPhase::RoundResolved => {
                    if let Some(exit) = self.finish_round()? {
                        return Ok(exit);
                    }
                }
                SessionPhase::SeriesComplete => {
                    if let Some(exit) = self.finish_series()? {
                        return Ok(exit);
                    }
                }
            }
        }
    }

    fn read_input(&mut self) -> Result<Input, ConsoleError> {
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(Input::EndOfInput);
        }
        let line = line.trim().to_string();
        if line.eq_ignore_ascii_case("q") || line.eq_ignore_ascii_case("quit") {
            return Ok(Input::Quit);
        }
        Ok(Input::Line(line))
    }

    fn select_rounds(&mut self) -> Result<Option<ConsoleExit>, ConsoleError> {
        let rounds = match self.config.default_rounds {
            Some(rounds) => i64::from(rounds),
            None => {
                let choices: Vec<String> =
                    self.config.round_choices.iter().map(|c| c.to_string()).collect();
                write!(self.output, "How many rounds would you like to play? [{}]: ", choices.join("/"))?;
                match self.read_input()? {
                    Input::Quit => return Ok(Some(ConsoleExit::Quit)),
                    Input::EndOfInput => return Ok(Some(ConsoleExit::EndOfInput)),
                    Input::Line(line) => match line.parse::<i64>() {
                        Ok(rounds) => rounds,
                        Err(_) => {
                            writeln!(self.output, "Please enter a number of rounds.")?;
                            return Ok(None);
                        }
                    },
                }
            }
        };

        match self.session.select_rounds(rounds) {
            Ok(()) => {
                writeln!(
                    self.output,
                    "Starting {} round(s). You are {}, the computer is {}.",
                    self.session.total_rounds(),
                    self.session.human_mark(),
                    self.session.computer_mark()
                )?;
                Ok(None)
            }
            Err(EngineError::InvalidRoundCount(_)) if self.config.default_rounds.is_none() => {
                writeln!(self.output, "Pick at least 1 round.")?;
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    fn play_turn(&mut self) -> Result<Option<ConsoleExit>, ConsoleError> {
        let header = format!(
            "\nRound {}/{} | You {} - {} Computer | Draws {}",
            self.session.current_round(),
            self.session.total_rounds(),
            self.session.human_wins(),
            self.session.computer_wins(),
            self.session.draws()
        );
        writeln!(self.output, "{}", header)?;
        write!(self.output, "{}", render_board(self.session.board(), None))?;
        write!(self.output, "Your move (1-9, q to quit): ")?;

        let line = match self.read_input()? {
            Input::Quit => return Ok(Some(ConsoleExit::Quit)),
            Input::EndOfInput => return Ok(Some(ConsoleExit::EndOfInput)),
            Input::Line(line) => line,
        };

        let cell = match line.parse::<usize>() {
            Ok(n) if (1..=9).contains(&n) => n - 1,
            _ => {
                writeln!(self.output, "Type a cell number from 1 to 9.")?;
                return Ok(None);
            }
        };

        match self.session.apply_human_move(cell) {
            Ok(report) => {
                if let Some(reply) = report.computer_cell {
                    writeln!(self.output, "Computer plays {}.", reply + 1)?;
                }
                if report.outcome == Outcome::InProgress && self.config.show_encouragement {
                    let message = if report.human_open_lines > 0 {
                        "Great! You're building a winning position, keep going."
                    } else {
                        "Nice move, stay focused!"
                    };
                    writeln!(self.output, "{}", message)?;
                }
                Ok(None)
            }
            Err(EngineError::IllegalMove(IllegalMoveReason::CellOccupied(_))) => {
                writeln!(self.output, "That cell is already taken, pick another one.")?;
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    fn finish_round(&mut self) -> Result<Option<ConsoleExit>, ConsoleError> {
        let board = *self.session.board();
        let highlight = winning_line(&board).map(|line| line.cells);
        writeln!(self.output)?;
        write!(self.output, "{}", render_board(&board, highlight))?;

        let message = match self.session.last_outcome().and_then(|o| o.winner()) {
            Some(mark) if mark == self.session.human_mark() => "You win! Amazing move.",
            Some(_) => "Computer wins. Good practice, you learned something new.",
            None => "It's a draw. Nice work!",
        };
        writeln!(self.output, "{}", message)?;
        write!(self.output, "Press Enter to continue: ")?;

        match self.read_input()? {
            Input::Quit => return Ok(Some(ConsoleExit::Quit)),
            Input::EndOfInput => return Ok(Some(ConsoleExit::EndOfInput)),
            Input::Line(_) => {}
        }

        self.session.advance()?;
        Ok(None)
    }

    fn finish_series(&mut self) -> Result<Option<ConsoleExit>, ConsoleError> {
        let tally = self.session.final_tally().unwrap_or_default();
        writeln!(self.output, "\nSeries complete!")?;
        writeln!(
            self.output,
            "You won {}, the computer won {}, {} draw(s).",
            tally.human_wins, tally.computer_wins, tally.draws
        )?;
        let verdict = if tally.human_wins > tally.computer_wins {
            "You took the series!"
        } else if tally.human_wins < tally.computer_wins {
            "The computer took this one. Every game is practice."
        } else {
            "An even series. Well played."
        };
        writeln!(self.output, "{}", verdict)?;
        write!(self.output, "Play again? (y/n): ")?;

        match self.read_input()? {
            Input::Line(line) if line.eq_ignore_ascii_case("y") || line.eq_ignore_ascii_case("yes") => {
                self.session.play_again()?;
                Ok(None)
            }
            Input::EndOfInput => Ok(Some(ConsoleExit::EndOfInput)),
            _ => Ok(Some(ConsoleExit::Finished)),
        }
    }
}
