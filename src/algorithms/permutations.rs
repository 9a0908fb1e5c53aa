//! Permutations by backtracking.
//!
//! Characters are sorted first; a repeated character is only picked when its
//! earlier twin is already in use, so duplicates never produce the same
//! permutation twice.

use serde::{Deserialize, Serialize};

use crate::engine::generator::{
    reject_unknown, text_arg, AlgorithmInfo, Category, FrameView, ParamArgs, TraceGenerator,
};
use crate::engine::step::{Outcome, Trace, TraceRecorder};
use crate::error::VizResult;

const RECENT: usize = 8;

/// Permutation input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermutationParams {
    /// Characters to permute.
    pub text: String,
}

impl Default for PermutationParams {
    fn default() -> Self {
        Self {
            text: "ABC".to_string(),
        }
    }
}

/// Permutation visualization state.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PermutationFrame {
    /// Sorted characters.
    pub chars: Vec<char>,
    /// `used[i]` while `chars[i]` is in the prefix.
    pub used: Vec<bool>,
    /// Prefix built so far.
    pub prefix: String,
    /// Completed permutations so far.
    pub found_count: usize,
    /// Most recent completions, oldest first.
    pub recent: Vec<String>,
}

impl FrameView for PermutationFrame {
    fn render_lines(&self) -> Vec<String> {
        let pool: String = self
            .chars
            .iter()
            .zip(&self.used)
            .map(|(c, used)| if *used { '_' } else { *c })
            .collect();
        vec![
            format!("pool   {pool}"),
            format!("prefix {}", self.prefix),
            format!("found ({}) {}", self.found_count, self.recent.join(" ")),
        ]
    }
}

/// Permutation generator.
#[derive(Debug, Clone)]
pub struct PermutationGenerator {
    max_len: usize,
}

impl PermutationGenerator {
    /// Create a generator accepting up to `max_len` characters.
    #[must_use]
    pub const fn new(max_len: usize) -> Self {
        Self { max_len }
    }
}

struct Search {
    chars: Vec<char>,
    used: Vec<bool>,
    prefix: Vec<char>,
    found: Vec<String>,
    rec: TraceRecorder<PermutationFrame>,
}

impl Search {
    fn frame(&self) -> PermutationFrame {
        let skip = self.found.len().saturating_sub(RECENT);
        PermutationFrame {
            chars: self.chars.clone(),
            used: self.used.clone(),
            prefix: self.prefix.iter().collect(),
            found_count: self.found.len(),
            recent: self.found[skip..].to_vec(),
        }
    }

    fn emit(&mut self, message: String) {
        let frame = self.frame();
        self.rec.emit(message, frame);
    }

    fn extend(&mut self) {
        if self.prefix.len() == self.chars.len() {
            let done: String = self.prefix.iter().collect();
            self.found.push(done.clone());
            self.emit(format!("Found permutation {done}"));
            return;
        }

        for i in 0..self.chars.len() {
            if self.used[i] || (i > 0 && self.chars[i] == self.chars[i - 1] && !self.used[i - 1]) {
                continue;
            }
            let c = self.chars[i];
            self.used[i] = true;
            self.prefix.push(c);
            self.emit(format!("Choose '{c}'"));

            self.extend();

            self.prefix.pop();
            self.used[i] = false;
            self.emit(format!("Backtrack: release '{c}'"));
        }
    }
}

impl TraceGenerator for PermutationGenerator {
    type Params = PermutationParams;
    type Frame = PermutationFrame;

    fn info(&self) -> AlgorithmInfo {
        AlgorithmInfo {
            id: "permutations",
            name: "Permutations",
            category: Category::Backtracking,
            summary: "List every ordering of a word by choosing and releasing characters",
            params: &["text"],
        }
    }

    fn generate(&self, params: &PermutationParams) -> Trace<PermutationFrame> {
        let mut chars: Vec<char> = params.text.trim().chars().collect();
        if chars.is_empty() {
            return Trace::invalid("Please enter some characters", PermutationFrame::default());
        }
        if chars.len() > self.max_len {
            return Trace::invalid(
                format!("Please enter at most {} characters", self.max_len),
                PermutationFrame::default(),
            );
        }
        chars.sort_unstable();

        let mut search = Search {
            used: vec![false; chars.len()],
            chars,
            prefix: Vec::new(),
            found: Vec::new(),
            rec: TraceRecorder::new(),
        };
        let word: String = search.chars.iter().collect();
        let opening = search.frame();
        search.rec.emit_opening(
            *params == PermutationParams::default(),
            format!("Press play to list every ordering of {word}"),
            format!("Sorted characters: {word}"),
            opening,
        );

        search.extend();

        let total = search.found.len() as u64;
        let last = search.frame();
        search.rec.finish(
            format!("{total} distinct permutations"),
            last,
            Outcome::Count(total),
        )
    }

    fn apply_args(
        &self,
        current: &PermutationParams,
        args: &ParamArgs,
    ) -> VizResult<PermutationParams> {
        reject_unknown(args, &self.info())?;
        let mut next = current.clone();
        if let Some(text) = text_arg(args, "text") {
            next.text = text;
        }
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generator() -> PermutationGenerator {
        PermutationGenerator::new(6)
    }

    fn run(text: &str) -> Trace<PermutationFrame> {
        generator().generate(&PermutationParams {
            text: text.to_string(),
        })
    }

    #[test]
    fn test_abc() {
        let trace = generator().generate(&PermutationParams::default());
        assert_eq!(trace.outcome(), Some(&Outcome::Count(6)));
        assert_eq!(
            trace.last().frame.recent,
            vec!["ABC", "ACB", "BAC", "BCA", "CAB", "CBA"]
        );
    }

    #[test]
    fn test_duplicates_are_skipped() {
        let trace = run("AAB");
        assert_eq!(trace.last().frame.recent, vec!["AAB", "ABA", "BAA"]);
    }

    #[test]
    fn test_recent_window() {
        let trace = run("ABCD");
        let last = &trace.last().frame;
        assert_eq!(last.found_count, 24);
        assert_eq!(last.recent.len(), RECENT);
        assert_eq!(last.recent.last().map(String::as_str), Some("DCBA"));
    }

    #[test]
    fn test_single_char() {
        let trace = run("Z");
        assert_eq!(trace.outcome(), Some(&Outcome::Count(1)));
        assert_eq!(trace.first().message, "Sorted characters: Z");
    }

    #[test]
    fn test_rejects_empty_and_long() {
        for text in ["", "   ", "ABCDEFG"] {
            let trace = run(text);
            assert_eq!(trace.len(), 1);
            assert!(trace.outcome().is_none());
        }
    }

    #[test]
    fn test_prefix_never_exceeds_word() {
        let trace = run("ABCD");
        assert!(trace.iter().all(|s| s.frame.prefix.len() <= 4));
        assert_eq!(trace.outcome(), Some(&Outcome::Count(24)));
    }
}
