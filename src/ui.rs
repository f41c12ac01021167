#![cfg(feature = "std")]

use std::fmt::Write as _;
use std::thread;
use std::time::Duration;

use crate::{
    board::{BoardView, Cell},
    common::{Coordinate, ShotError, ShotOutcome},
    game::{Game, GameObserver, ShotReport, Side},
};

fn cell_char(cell: Cell) -> char {
    match cell {
        Cell::Empty => 'O',
        Cell::Ship => '■',
        Cell::Miss | Cell::Contour => '.',
        Cell::Hit => 'X',
        Cell::Sunk => '#',
    }
}

/// Render a board as a grid with 1-based row and column headers.
pub fn render_board(view: &BoardView<'_>) -> String {
    let n = view.size();
    let mut out = String::from("  |");
    for y in 0..n {
        let _ = write!(out, " {} |", y + 1);
    }
    for x in 0..n {
        let _ = write!(out, "\n{} |", x + 1);
        for y in 0..n {
            let _ = write!(out, " {} |", cell_char(view.cell(x, y)));
        }
    }
    out
}

/// Render two boards next to each other, each under its title.
pub fn render_side_by_side(
    left_title: &str,
    left: &BoardView<'_>,
    right_title: &str,
    right: &BoardView<'_>,
) -> String {
    let left_text = render_board(left);
    let width = left_text.lines().map(|l| l.chars().count()).max().unwrap_or(0);
    let gap = " ".repeat(left.size().max(4));
    let mut out = format!("{:<width$}{}{}", left_title, gap, right_title, width = width);
    for (l, r) in left_text.lines().zip(render_board(right).lines()) {
        let pad = width - l.chars().count();
        let _ = write!(out, "\n{}{}{}{}", l, " ".repeat(pad), gap, r);
    }
    out
}

/// One-line count of ships still afloat on each board.
pub fn fleet_status(own: &BoardView<'_>, enemy: &BoardView<'_>) -> String {
    format!(
        "Ships afloat: yours {}, computer's {}",
        own.ships_left(),
        enemy.ships_left()
    )
}

/// Welcome text explaining the input format.
pub fn greeting(size: usize) -> String {
    format!(
        "Welcome to Sea Battle!\n\
         Enter shots as two numbers: row then column, from 1 to {} (for example: 1 3).\n\
         A hit lets you shoot again.",
        size
    )
}

/// Announcement printed after a shot.
pub fn describe_outcome(outcome: ShotOutcome) -> &'static str {
    match outcome {
        ShotOutcome::Miss => "Miss!",
        ShotOutcome::Hit => "Hit! The ship is damaged.",
        ShotOutcome::Sunk => "Hit! The ship is destroyed!",
    }
}

/// Console presentation for a game between a person and the computer.
pub struct ConsoleObserver {
    human: Side,
    ai_delay: Duration,
}

impl ConsoleObserver {
    pub fn new(human: Side, ai_delay: Duration) -> Self {
        Self { human, ai_delay }
    }

    fn print_boards(&self, game: &Game) {
        let own = game.board(self.human).view(false);
        let enemy = game.board(self.human.opponent()).view(true);
        println!("{}", "-".repeat(own.size() * 10));
        println!(
            "{}",
            render_side_by_side("Your board:", &own, "Computer's board:", &enemy)
        );
        println!("{}", fleet_status(&own, &enemy));
    }
}

impl GameObserver for ConsoleObserver {
    fn on_turn(&mut self, game: &Game) {
        self.print_boards(game);
        if game.to_move() == self.human {
            println!("Your move!");
        } else {
            println!("Computer's move!");
        }
    }

    fn before_automated_shot(&mut self, _side: Side) {
        if !self.ai_delay.is_zero() {
            thread::sleep(self.ai_delay);
        }
    }

    fn on_shot(&mut self, _game: &Game, report: &ShotReport) {
        if report.shooter != self.human {
            println!("Computer fires at: {}", report.target);
        }
        println!("{}", describe_outcome(report.outcome));
    }

    fn on_rejected(&mut self, _side: Side, _coord: Coordinate, error: ShotError) {
        println!("Error: {}", error);
    }

    fn on_game_over(&mut self, game: &Game, winner: Side) {
        self.print_boards(game);
        if winner == self.human {
            println!("You win!");
        } else {
            println!("The computer wins!");
        }
    }
}
