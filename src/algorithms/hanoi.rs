//! Tower of Hanoi.
//!
//! One step per disk move. Each frame carries the three pegs, the move log
//! so far and the recursive call stack at the time of the move.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::engine::generator::{
    parse_arg, reject_unknown, AlgorithmInfo, Category, FrameView, ParamArgs, TraceGenerator,
};
use crate::engine::step::{Outcome, Trace, TraceRecorder};
use crate::error::VizResult;

/// Peg label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Peg {
    /// Source.
    A,
    /// Auxiliary.
    B,
    /// Target.
    C,
}

impl Peg {
    const fn slot(self) -> usize {
        match self {
            Self::A => 0,
            Self::B => 1,
            Self::C => 2,
        }
    }
}

impl fmt::Display for Peg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
        };
        f.write_str(label)
    }
}

/// One disk move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HanoiMove {
    /// Disk size, 1 is the smallest.
    pub disk: u32,
    /// Peg the disk left.
    pub from: Peg,
    /// Peg the disk landed on.
    pub to: Peg,
}

impl fmt::Display for HanoiMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}→{}", self.disk, self.from, self.to)
    }
}

/// Hanoi input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HanoiParams {
    /// Number of disks on peg A at the start.
    pub num_disks: u32,
}

impl Default for HanoiParams {
    fn default() -> Self {
        Self { num_disks: 3 }
    }
}

/// Hanoi visualization state.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HanoiFrame {
    /// Disks on A, B and C, bottom first.
    pub pegs: [Vec<u32>; 3],
    /// Every move made so far.
    pub moves: Vec<HanoiMove>,
    /// Active recursive calls, outermost first.
    pub call_stack: Vec<String>,
    /// Move made at this step.
    pub active: Option<HanoiMove>,
}

impl FrameView for HanoiFrame {
    fn render_lines(&self) -> Vec<String> {
        let mut lines: Vec<String> = [Peg::A, Peg::B, Peg::C]
            .iter()
            .map(|peg| {
                let disks: Vec<String> =
                    self.pegs[peg.slot()].iter().map(ToString::to_string).collect();
                format!("{peg} | {}", disks.join(" "))
            })
            .collect();
        let recent: Vec<String> = self.moves.iter().map(ToString::to_string).collect();
        lines.push(format!("moves ({}): {}", self.moves.len(), recent.join(", ")));
        if !self.call_stack.is_empty() {
            lines.push(format!("stack: {}", self.call_stack.join(" > ")));
        }
        lines
    }
}

/// Tower of Hanoi generator.
#[derive(Debug, Clone)]
pub struct HanoiGenerator {
    max_disks: usize,
}

impl HanoiGenerator {
    /// Create a generator accepting up to `max_disks` disks.
    #[must_use]
    pub const fn new(max_disks: usize) -> Self {
        Self { max_disks }
    }
}

struct Solver {
    pegs: [Vec<u32>; 3],
    moves: Vec<HanoiMove>,
    stack: Vec<String>,
    rec: TraceRecorder<HanoiFrame>,
}

impl Solver {
    fn frame(&self, active: Option<HanoiMove>) -> HanoiFrame {
        HanoiFrame {
            pegs: self.pegs.clone(),
            moves: self.moves.clone(),
            call_stack: self.stack.clone(),
            active,
        }
    }

    fn solve(&mut self, n: u32, from: Peg, to: Peg, via: Peg) {
        self.stack.push(format!("hanoi({n}, {from}→{to})"));
        if n == 1 {
            self.move_disk(from, to);
        } else {
            self.solve(n - 1, from, via, to);
            self.move_disk(from, to);
            self.solve(n - 1, via, to, from);
        }
        self.stack.pop();
    }

    fn move_disk(&mut self, from: Peg, to: Peg) {
        let Some(disk) = self.pegs[from.slot()].pop() else {
            return;
        };
        self.pegs[to.slot()].push(disk);
        let mv = HanoiMove { disk, from, to };
        self.moves.push(mv);
        let frame = self.frame(Some(mv));
        self.rec
            .emit(format!("Move disk {disk} from {from} to {to}"), frame);
    }
}

impl TraceGenerator for HanoiGenerator {
    type Params = HanoiParams;
    type Frame = HanoiFrame;

    fn info(&self) -> AlgorithmInfo {
        AlgorithmInfo {
            id: "hanoi",
            name: "Tower of Hanoi",
            category: Category::Recursion,
            summary: "Move a stack of disks from peg A to peg C, one disk at a time",
            params: &["num_disks"],
        }
    }

    fn generate(&self, params: &HanoiParams) -> Trace<HanoiFrame> {
        let n = params.num_disks;
        if n == 0 || n as usize > self.max_disks {
            return Trace::invalid(
                format!("Number of disks must be between 1 and {}", self.max_disks),
                HanoiFrame::default(),
            );
        }

        let mut solver = Solver {
            pegs: [(1..=n).rev().collect(), Vec::new(), Vec::new()],
            moves: Vec::new(),
            stack: Vec::new(),
            rec: TraceRecorder::new(),
        };
        let opening = solver.frame(None);
        solver.rec.emit_opening(
            *params == HanoiParams::default(),
            format!("Press play to move {n} disks from peg A to peg C"),
            format!("Call hanoi({n}, A→C) using B as the spare peg"),
            opening,
        );

        solver.solve(n, Peg::A, Peg::C, Peg::B);

        let total = solver.moves.len() as u64;
        let last = solver.frame(None);
        solver
            .rec
            .finish(format!("Solved in {total} moves"), last, Outcome::Count(total))
    }

    fn apply_args(&self, current: &HanoiParams, args: &ParamArgs) -> VizResult<HanoiParams> {
        reject_unknown(args, &self.info())?;
        let mut next = current.clone();
        if let Some(n) = parse_arg(args, "num_disks")? {
            next.num_disks = n;
        }
        Ok(next)
    }
}
