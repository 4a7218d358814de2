use serde::{Deserialize, Serialize};

/// The five DCA signal categories.
///
/// Always derived at render time from (rsi_14, ma200_dist_pct); never stored
/// as an independent fact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Signal {
    GreatBuy,
    OversoldBuy,
    NormalDca,
    Overvalued,
    SevereOverbought,
}

impl Signal {
    /// Human-readable suggested action shown next to the signal.
    pub fn action(&self) -> &'static str {
        match self {
            Signal::GreatBuy => "double DCA",
            Signal::OversoldBuy => "normal buy",
            Signal::NormalDca => "normal DCA",
            Signal::Overvalued => "reduce DCA",
            Signal::SevereOverbought => "pause buying",
        }
    }
}

impl std::fmt::Display for Signal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Signal::GreatBuy => "GREAT_BUY",
            Signal::OversoldBuy => "OVERSOLD_BUY",
            Signal::NormalDca => "NORMAL_DCA",
            Signal::Overvalued => "OVERVALUED",
            Signal::SevereOverbought => "SEVERE_OVERBOUGHT",
        };
        write!(f, "{}", name)
    }
}
