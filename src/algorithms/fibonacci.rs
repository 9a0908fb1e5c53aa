//! Memoized Fibonacci.
//!
//! Top-down recursion with a memo table. Steps mark calls, memo hits, base
//! cases and stores, so the table fills in the order the recursion reaches it.

use serde::{Deserialize, Serialize};

use crate::engine::generator::{
    parse_arg, reject_unknown, AlgorithmInfo, Category, FrameView, ParamArgs, TraceGenerator,
};
use crate::engine::step::{Outcome, Trace, TraceRecorder};
use crate::error::VizResult;

/// Fibonacci input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FibonacciParams {
    /// Index of the requested number.
    pub n: u32,
}

impl Default for FibonacciParams {
    fn default() -> Self {
        Self { n: 6 }
    }
}

/// What the current step did with the memo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemoEvent {
    /// Entered a call.
    Call,
    /// Answered from the memo.
    Hit,
    /// Answered by a base case.
    Base,
    /// Computed and stored.
    Store,
}

/// Fibonacci visualization state.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FibonacciFrame {
    /// `memo[k]` once `fib(k)` is known.
    pub memo: Vec<Option<u64>>,
    /// Active calls, outermost first.
    pub call_stack: Vec<u32>,
    /// Index the step is about.
    pub active: Option<u32>,
    /// Kind of step.
    pub event: Option<MemoEvent>,
}

impl FrameView for FibonacciFrame {
    fn render_lines(&self) -> Vec<String> {
        let cells: Vec<String> = self
            .memo
            .iter()
            .enumerate()
            .map(|(k, v)| match v {
                Some(v) => format!("{k}:{v}"),
                None => format!("{k}:-"),
            })
            .collect();
        let stack: Vec<String> = self.call_stack.iter().map(|k| format!("fib({k})")).collect();
        vec![
            format!("memo  {}", cells.join(" ")),
            format!("stack {}", stack.join(" > ")),
        ]
    }
}

/// Memoized Fibonacci generator.
#[derive(Debug, Clone)]
pub struct FibonacciGenerator {
    max_n: u32,
}

impl FibonacciGenerator {
    /// Create a generator accepting `n <= max_n`.
    #[must_use]
    pub const fn new(max_n: u32) -> Self {
        Self { max_n }
    }
}

struct Memo {
    memo: Vec<Option<u64>>,
    stack: Vec<u32>,
    rec: TraceRecorder<FibonacciFrame>,
}

impl Memo {
    fn emit(&mut self, message: String, k: u32, event: MemoEvent) {
        let frame = FibonacciFrame {
            memo: self.memo.clone(),
            call_stack: self.stack.clone(),
            active: Some(k),
            event: Some(event),
        };
        self.rec.emit(message, frame);
    }

    fn fib(&mut self, k: u32) -> u64 {
        let slot = k as usize;
        if let Some(v) = self.memo[slot] {
            self.emit(format!("fib({k}) found in memo: {v}"), k, MemoEvent::Hit);
            return v;
        }

        self.stack.push(k);
        let value = if k < 2 {
            let v = u64::from(k);
            self.memo[slot] = Some(v);
            self.emit(format!("Base case fib({k}) = {v}"), k, MemoEvent::Base);
            v
        } else {
            self.emit(format!("Call fib({k})"), k, MemoEvent::Call);
            let a = self.fib(k - 1);
            let b = self.fib(k - 2);
            let v = a + b;
            self.memo[slot] = Some(v);
            self.emit(
                format!("fib({k}) = fib({}) + fib({}) = {a} + {b} = {v}", k - 1, k - 2),
                k,
                MemoEvent::Store,
            );
            v
        };
        self.stack.pop();
        value
    }
}

impl TraceGenerator for FibonacciGenerator {
    type Params = FibonacciParams;
    type Frame = FibonacciFrame;

    fn info(&self) -> AlgorithmInfo {
        AlgorithmInfo {
            id: "fibonacci",
            name: "Fibonacci (memoized)",
            category: Category::Recursion,
            summary: "Top-down recursion that caches every fib(k) it computes",
            params: &["n"],
        }
    }

    fn generate(&self, params: &FibonacciParams) -> Trace<FibonacciFrame> {
        let n = params.n;
        if n > self.max_n {
            return Trace::invalid(
                format!("n must be between 0 and {}", self.max_n),
                FibonacciFrame::default(),
            );
        }

        let mut memo = Memo {
            memo: vec![None; n as usize + 1],
            stack: Vec::new(),
            rec: TraceRecorder::new(),
        };
        let opening = FibonacciFrame {
            memo: memo.memo.clone(),
            ..FibonacciFrame::default()
        };
        memo.rec.emit_opening(
            *params == FibonacciParams::default(),
            format!("Press play to compute fib({n}) with a memo table"),
            format!("Compute fib({n}) with an empty memo table"),
            opening,
        );

        let value = memo.fib(n);

        let last = FibonacciFrame {
            memo: memo.memo.clone(),
            call_stack: Vec::new(),
            active: Some(n),
            event: None,
        };
        // fib(92) is the largest that fits in i64; limits keep n far below.
        let value = i64::try_from(value).unwrap_or(i64::MAX);
        memo.rec
            .finish(format!("fib({n}) = {value}"), last, Outcome::Value(value))
    }

    fn apply_args(
        &self,
        current: &FibonacciParams,
        args: &ParamArgs,
    ) -> VizResult<FibonacciParams> {
        reject_unknown(args, &self.info())?;
        let mut next = current.clone();
        if let Some(n) = parse_arg(args, "n")? {
            next.n = n;
        }
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generator() -> FibonacciGenerator {
        FibonacciGenerator::new(20)
    }

    #[test]
    fn test_default_value() {
        let trace = generator().generate(&FibonacciParams::default());
        assert_eq!(trace.outcome(), Some(&Outcome::Value(8)));
        let memo = &trace.last().frame.memo;
        assert_eq!(memo, &vec![Some(0), Some(1), Some(1), Some(2), Some(3), Some(5), Some(8)]);
    }

    #[test]
    fn test_base_cases() {
        for (n, expected) in [(0, 0), (1, 1), (2, 1), (20, 6765)] {
            let trace = generator().generate(&FibonacciParams { n });
            assert_eq!(trace.outcome(), Some(&Outcome::Value(expected)));
        }
    }

    #[test]
    fn test_memo_hits_appear() {
        let trace = generator().generate(&FibonacciParams { n: 5 });
        let hits = trace
            .iter()
            .filter(|s| s.frame.event == Some(MemoEvent::Hit))
            .count();
        assert!(hits > 0);
    }

    #[test]
    fn test_linear_step_count() {
        // Memoization keeps the trace linear in n.
        let small = generator().generate(&FibonacciParams { n: 10 }).len();
        let large = generator().generate(&FibonacciParams { n: 20 }).len();
        assert!(large < small * 3);
    }

    #[test]
    fn test_rejects_large_n() {
        let trace = generator().generate(&FibonacciParams { n: 21 });
        assert_eq!(trace.len(), 1);
        assert!(trace.outcome().is_none());
    }

    #[test]
    fn test_opening_messages() {
        let idle = generator().generate(&FibonacciParams::default());
        assert!(idle.first().message.starts_with("Press play"));
        let busy = generator().generate(&FibonacciParams { n: 4 });
        assert_eq!(busy.first().message, "Compute fib(4) with an empty memo table");
    }
}
