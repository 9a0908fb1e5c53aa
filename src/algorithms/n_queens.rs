//! N-Queens by backtracking.
//!
//! Rows are filled top to bottom. Every candidate square is a step, marked
//! safe or attacked; complete boards bump `solutions_count`.

use serde::{Deserialize, Serialize};

use crate::engine::generator::{
    parse_arg, reject_unknown, AlgorithmInfo, Category, FrameView, ParamArgs, TraceGenerator,
};
use crate::engine::step::{Outcome, Trace, TraceRecorder};
use crate::error::VizResult;

/// N-Queens input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueensParams {
    /// Board side length.
    pub board_size: usize,
}

impl Default for QueensParams {
    fn default() -> Self {
        Self { board_size: 4 }
    }
}

/// N-Queens visualization state.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct QueensFrame {
    /// Board side length.
    pub board_size: usize,
    /// Queen column for each filled row.
    pub queens: Vec<usize>,
    /// Square under test as (row, column).
    pub probe: Option<(usize, usize)>,
    /// Whether the probed square is attacked.
    pub attacked: bool,
    /// Complete boards found so far.
    pub solutions_count: u64,
    /// Most recent complete board.
    pub last_solution: Option<Vec<usize>>,
}

impl FrameView for QueensFrame {
    fn render_lines(&self) -> Vec<String> {
        let mut lines: Vec<String> = (0..self.board_size)
            .map(|row| {
                (0..self.board_size)
                    .map(|col| {
                        if self.queens.get(row) == Some(&col) {
                            'Q'
                        } else if self.probe == Some((row, col)) {
                            if self.attacked {
                                'x'
                            } else {
                                '?'
                            }
                        } else {
                            '.'
                        }
                    })
                    .collect()
            })
            .collect();
        lines.push(format!("solutions {}", self.solutions_count));
        lines
    }
}

/// N-Queens generator.
#[derive(Debug, Clone)]
pub struct QueensGenerator {
    max_size: usize,
}

impl QueensGenerator {
    /// Create a generator accepting boards up to `max_size`.
    #[must_use]
    pub const fn new(max_size: usize) -> Self {
        Self { max_size }
    }
}

struct Board {
    size: usize,
    queens: Vec<usize>,
    solutions: u64,
    last_solution: Option<Vec<usize>>,
    rec: TraceRecorder<QueensFrame>,
}

impl Board {
    fn frame(&self, probe: Option<(usize, usize)>, attacked: bool) -> QueensFrame {
        QueensFrame {
            board_size: self.size,
            queens: self.queens.clone(),
            probe,
            attacked,
            solutions_count: self.solutions,
            last_solution: self.last_solution.clone(),
        }
    }

    fn is_attacked(&self, row: usize, col: usize) -> bool {
        self.queens
            .iter()
            .enumerate()
            .any(|(r, &c)| c == col || row - r == col.abs_diff(c))
    }

    fn place(&mut self, row: usize) {
        if row == self.size {
            self.solutions += 1;
            self.last_solution = Some(self.queens.clone());
            let frame = self.frame(None, false);
            self.rec
                .emit(format!("Solution #{} found", self.solutions), frame);
            return;
        }

        for col in 0..self.size {
            let attacked = self.is_attacked(row, col);
            let frame = self.frame(Some((row, col)), attacked);
            if attacked {
                self.rec
                    .emit(format!("Row {row}, column {col} is attacked"), frame);
                continue;
            }
            self.rec
                .emit(format!("Place queen at row {row}, column {col}"), frame);

            self.queens.push(col);
            self.place(row + 1);
            self.queens.pop();

            let frame = self.frame(None, false);
            self.rec
                .emit(format!("Backtrack: remove queen from row {row}"), frame);
        }
    }
}

impl TraceGenerator for QueensGenerator {
    type Params = QueensParams;
    type Frame = QueensFrame;

    fn info(&self) -> AlgorithmInfo {
        AlgorithmInfo {
            id: "n-queens",
            name: "N-Queens",
            category: Category::Backtracking,
            summary: "Place N queens so that no two attack each other",
            params: &["board_size"],
        }
    }

    fn generate(&self, params: &QueensParams) -> Trace<QueensFrame> {
        let size = params.board_size;
        if size == 0 || size > self.max_size {
            return Trace::invalid(
                format!("Board size must be between 1 and {}", self.max_size),
                QueensFrame::default(),
            );
        }

        let mut board = Board {
            size,
            queens: Vec::with_capacity(size),
            solutions: 0,
            last_solution: None,
            rec: TraceRecorder::new(),
        };
        let opening = board.frame(None, false);
        board.rec.emit_opening(
            *params == QueensParams::default(),
            format!("Press play to place {size} queens on a {size}x{size} board"),
            format!("Start on an empty {size}x{size} board at row 0"),
            opening,
        );

        board.place(0);

        let total = board.solutions;
        let last = board.frame(None, false);
        board.rec.finish(
            format!("{total} solutions for {size} queens"),
            last,
            Outcome::Count(total),
        )
    }

    fn apply_args(&self, current: &QueensParams, args: &ParamArgs) -> VizResult<QueensParams> {
        reject_unknown(args, &self.info())?;
        let mut next = current.clone();
        if let Some(size) = parse_arg(args, "board_size")? {
            next.board_size = size;
        }
        Ok(next)
    }
}
