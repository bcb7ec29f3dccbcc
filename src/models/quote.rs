//! Stock quote model

use serde::{Deserialize, Serialize};

/// Latest quote for one tracked symbol
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockQuote {
    pub symbol: String,
    pub price: f64,
    /// Daily change in percent, e.g. `-0.42`
    pub change_percent: f64,
}

/// Direction of the daily move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trend {
    Up,
    Down,
}

impl Trend {
    #[must_use]
    pub fn arrow(self) -> &'static str {
        match self {
            Trend::Up => "▲",
            Trend::Down => "▼",
        }
    }

    /// CSS class used by the digest template
    #[must_use]
    pub fn css_class(self) -> &'static str {
        match self {
            Trend::Up => "up",
            Trend::Down => "down",
        }
    }
}

impl StockQuote {
    /// An unchanged price counts as down.
    #[must_use]
    pub fn trend(&self) -> Trend {
        if self.change_percent > 0.0 {
            Trend::Up
        } else {
            Trend::Down
        }
    }

    #[must_use]
    pub fn format_price(&self) -> String {
        format!("${:.2}", self.price)
    }

    #[must_use]
    pub fn format_change(&self) -> String {
        format!("{:+.2}%", self.change_percent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quote(change_percent: f64) -> StockQuote {
        StockQuote {
            symbol: "AAPL".to_string(),
            price: 189.5,
            change_percent,
        }
    }

    #[test]
    fn test_formatting() {
        let q = quote(1.25);
        assert_eq!(q.format_price(), "$189.50");
        assert_eq!(q.format_change(), "+1.25%");
        assert_eq!(quote(-0.4).format_change(), "-0.40%");
    }

    #[test]
    fn test_trend() {
        assert_eq!(quote(0.01).trend(), Trend::Up);
        assert_eq!(quote(-2.0).trend(), Trend::Down);
        assert_eq!(quote(0.0).trend().arrow(), "▼");
    }
}
