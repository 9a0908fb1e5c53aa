//! Minimum-coin change.
//!
//! Bottom-up over amounts `1..=amount`. An amount that no coin combination
//! reaches stays unset; an unreachable target reports `-1`.

use serde::{Deserialize, Serialize};

use crate::algorithms::input::parse_bounded_list;
use crate::engine::generator::{
    parse_arg, reject_unknown, text_arg, AlgorithmInfo, Category, FrameView, ParamArgs,
    TraceGenerator,
};
use crate::engine::step::{Outcome, Trace, TraceRecorder};
use crate::error::VizResult;

/// Coin change input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoinChangeParams {
    /// Coin denominations, comma-separated.
    pub coins: String,
    /// Amount to make.
    pub amount: usize,
}

impl Default for CoinChangeParams {
    fn default() -> Self {
        Self {
            coins: "1, 2, 5".to_string(),
            amount: 11,
        }
    }
}

/// Coin change visualization state.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CoinChangeFrame {
    /// Denominations.
    pub coins: Vec<usize>,
    /// `dp[a]`: fewest coins making `a`, unset while unreachable.
    pub dp: Vec<Option<u32>>,
    /// Amount being filled.
    pub amount: Option<usize>,
    /// Coin being tried.
    pub coin: Option<usize>,
    /// Whether the coin improved `dp[amount]`.
    pub improved: bool,
    /// Coins of the optimal answer, once reconstructed.
    pub used: Vec<usize>,
}

impl FrameView for CoinChangeFrame {
    fn render_lines(&self) -> Vec<String> {
        let cells: Vec<String> = self
            .dp
            .iter()
            .enumerate()
            .map(|(a, v)| {
                let v = v.map_or_else(|| "∞".to_string(), |v| v.to_string());
                if self.amount == Some(a) {
                    format!("[{a}:{v}]")
                } else {
                    format!("{a}:{v}")
                }
            })
            .collect();
        let mut lines = vec![cells.join(" ")];
        if let Some(coin) = self.coin {
            lines.push(format!("trying coin {coin}"));
        }
        if !self.used.is_empty() {
            let used: Vec<String> = self.used.iter().map(ToString::to_string).collect();
            lines.push(format!("coins {}", used.join(" + ")));
        }
        lines
    }
}

/// Coin change generator.
#[derive(Debug, Clone)]
pub struct CoinChangeGenerator {
    max_coins: usize,
    max_amount: usize,
}

impl CoinChangeGenerator {
    /// Create a generator with coin-count and amount bounds.
    #[must_use]
    pub const fn new(max_coins: usize, max_amount: usize) -> Self {
        Self {
            max_coins,
            max_amount,
        }
    }

    fn validate(&self, params: &CoinChangeParams) -> Result<Vec<usize>, String> {
        let coins = parse_bounded_list(&params.coins, self.max_coins)?;
        let coins = coins
            .iter()
            .map(|&c| usize::try_from(c).ok().filter(|&c| c > 0))
            .collect::<Option<Vec<usize>>>()
            .ok_or_else(|| "Coins must be positive".to_string())?;
        if params.amount > self.max_amount {
            return Err(format!("Amount may be at most {}", self.max_amount));
        }
        Ok(coins)
    }
}

impl TraceGenerator for CoinChangeGenerator {
    type Params = CoinChangeParams;
    type Frame = CoinChangeFrame;

    fn info(&self) -> AlgorithmInfo {
        AlgorithmInfo {
            id: "coin-change",
            name: "Coin Change",
            category: Category::DynamicProgramming,
            summary: "Fewest coins that add up to an amount",
            params: &["coins", "amount"],
        }
    }

    fn generate(&self, params: &CoinChangeParams) -> Trace<CoinChangeFrame> {
        let coins = match self.validate(params) {
            Ok(coins) => coins,
            Err(message) => return Trace::invalid(message, CoinChangeFrame::default()),
        };

        let target = params.amount;
        let mut dp = vec![None; target + 1];
        dp[0] = Some(0);
        let mut frame = CoinChangeFrame {
            coins: coins.clone(),
            dp,
            ..CoinChangeFrame::default()
        };
        let mut last_coin = vec![0usize; target + 1];

        let shown: Vec<String> = coins.iter().map(ToString::to_string).collect();
        let mut rec = TraceRecorder::new();
        rec.emit_opening(
            *params == CoinChangeParams::default(),
            format!(
                "Press play to make {target} from coins [{}]",
                shown.join(", ")
            ),
            "dp[0] = 0: zero coins make 0",
            frame.clone(),
        );

        for a in 1..=target {
            for &c in &coins {
                let candidate = if c <= a {
                    frame.dp[a - c].map(|n| n + 1)
                } else {
                    None
                };
                let improved = match (candidate, frame.dp[a]) {
                    (Some(new), Some(old)) => new < old,
                    (Some(_), None) => true,
                    _ => false,
                };
                let message = match candidate {
                    _ if c > a => format!("Coin {c} is larger than {a}"),
                    None => format!("{} is unreachable, so coin {c} cannot make {a}", a - c),
                    Some(new) if improved => format!("dp[{a}] = dp[{}] + 1 = {new}", a - c),
                    Some(new) => format!("Coin {c} gives {new}, no better for {a}"),
                };
                if improved {
                    frame.dp[a] = candidate;
                    last_coin[a] = c;
                }
                frame.amount = Some(a);
                frame.coin = Some(c);
                frame.improved = improved;
                rec.emit(message, frame.clone());
            }
        }

        frame.amount = None;
        frame.coin = None;
        frame.improved = false;
        let (best, message) = match frame.dp[target] {
            Some(count) => {
                let mut a = target;
                while a > 0 {
                    frame.used.push(last_coin[a]);
                    a -= last_coin[a];
                }
                (i64::from(count), format!("{target} needs {count} coins"))
            }
            None => (-1, format!("{target} cannot be made from these coins")),
        };
        rec.finish(message, frame, Outcome::Value(best))
    }

    fn apply_args(
        &self,
        current: &CoinChangeParams,
        args: &ParamArgs,
    ) -> VizResult<CoinChangeParams> {
        reject_unknown(args, &self.info())?;
        let mut next = current.clone();
        if let Some(coins) = text_arg(args, "coins") {
            next.coins = coins;
        }
        if let Some(amount) = parse_arg(args, "amount")? {
            next.amount = amount;
        }
        Ok(next)
    }
}
