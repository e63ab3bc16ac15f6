//! Centralized snapshot validation logic
//!
//! Checks the structural invariants of an order book snapshot before it is
//! charted. An empty side is not a validation failure: the analyzer
//! degrades gracefully on it and the charts show "insufficient data".

use crate::core::Side;
use crate::orderbook::OrderBookSnapshot;

/// Validation error types
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    EmptySymbol,
    InvalidPrice {
        side: Side,
        level: usize,
        price: f64,
    },
    NegativeQuantity {
        side: Side,
        level: usize,
        quantity: f64,
    },
    Unsorted {
        side: Side,
        level: usize,
    },
    Crossed {
        bid: f64,
        ask: f64,
    },
    Locked {
        price: f64,
    },
    SpreadTooWide {
        spread_pct: f64,
        max_pct: f64,
    },
    TooFewLevels {
        side: Side,
        levels: usize,
        min_levels: usize,
    },
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::EmptySymbol => write!(f, "Snapshot symbol is empty"),
            ValidationError::InvalidPrice { side, level, price } => {
                write!(f, "Invalid {} price at level {}: {}", side, level, price)
            }
            ValidationError::NegativeQuantity {
                side,
                level,
                quantity,
            } => {
                write!(
                    f,
                    "Invalid {} quantity at level {}: {}",
                    side, level, quantity
                )
            }
            ValidationError::Unsorted { side, level } => {
                write!(f, "{} levels out of order at level {}", side, level)
            }
            ValidationError::Crossed { bid, ask } => {
                write!(f, "Orderbook crossed: bid={} >= ask={}", bid, ask)
            }
            ValidationError::Locked { price } => {
                write!(f, "Orderbook locked at price={}", price)
            }
            ValidationError::SpreadTooWide {
                spread_pct,
                max_pct,
            } => {
                write!(f, "Spread too wide: {:.3}% > max {:.3}%", spread_pct, max_pct)
            }
            ValidationError::TooFewLevels {
                side,
                levels,
                min_levels,
            } => {
                write!(
                    f,
                    "Too few {} levels: {} (min={})",
                    side, levels, min_levels
                )
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Validation configuration
#[derive(Debug, Clone)]
pub struct ValidationConfig {
    /// Maximum spread as a percentage of the best bid
    pub max_spread_pct: f64,

    /// Allow locked orderbook (bid == ask)
    pub allow_locked: bool,

    /// Require strict price ordering within each side
    pub check_ordering: bool,

    /// Minimum levels per non-empty side (0 disables the check)
    pub min_levels: usize,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            max_spread_pct: 10.0, // thin altcoin books can be wide
            allow_locked: true,
            check_ordering: true,
            min_levels: 0,
        }
    }
}

/// Centralized snapshot validator
///
/// Validates snapshots according to:
/// - Basic sanity checks (symbol, finite positive prices, non-negative quantities)
/// - Side ordering (bids descending, asks ascending)
/// - Orderbook integrity (not crossed, reasonable spread)
#[derive(Debug, Clone, Default)]
pub struct SnapshotValidator {
    config: ValidationConfig,
    snapshot_count: u64,
}

impl SnapshotValidator {
    /// Create a new validator with default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a validator with custom configuration
    pub fn with_config(config: ValidationConfig) -> Self {
        Self {
            config,
            snapshot_count: 0,
        }
    }

    pub fn config(&self) -> &ValidationConfig {
        &self.config
    }

    /// Number of snapshots that passed validation
    pub fn snapshot_count(&self) -> u64 {
        self.snapshot_count
    }

    /// Validate a snapshot
    ///
    /// # Returns
    /// - `Ok(())`: Snapshot is valid
    /// - `Err(ValidationError)`: first rule that failed
    pub fn validate(&mut self, snapshot: &OrderBookSnapshot) -> Result<(), ValidationError> {
        // 1. Basic sanity checks
        if snapshot.symbol.trim().is_empty() {
            return Err(ValidationError::EmptySymbol);
        }

        for side in [Side::Bid, Side::Ask] {
            // 2. Per-level values
            self.validate_levels(snapshot, side)?;

            // 3. Ordering
            if self.config.check_ordering {
                self.validate_ordering(snapshot, side)?;
            }
        }

        // 4. Orderbook integrity
        self.validate_touch(snapshot)?;

        self.snapshot_count += 1;
        Ok(())
    }

    fn validate_levels(&self, snapshot: &OrderBookSnapshot, side: Side) -> Result<(), ValidationError> {
        let levels = snapshot.levels(side);

        if self.config.min_levels > 0 && !levels.is_empty() && levels.len() < self.config.min_levels {
            return Err(ValidationError::TooFewLevels {
                side,
                levels: levels.len(),
                min_levels: self.config.min_levels,
            });
        }

        for (level, l) in levels.iter().enumerate() {
            if !l.price.is_finite() || l.price <= 0.0 {
                return Err(ValidationError::InvalidPrice {
                    side,
                    level,
                    price: l.price,
                });
            }
            if !l.has_valid_quantity() {
                return Err(ValidationError::NegativeQuantity {
                    side,
                    level,
                    quantity: l.quantity,
                });
            }
        }

        Ok(())
    }

    fn validate_ordering(&self, snapshot: &OrderBookSnapshot, side: Side) -> Result<(), ValidationError> {
        let levels = snapshot.levels(side);

        // Each level must be strictly worse than the one before it
        match levels
            .windows(2)
            .position(|w| !side.is_better(w[0].price, w[1].price))
        {
            Some(i) => Err(ValidationError::Unsorted { side, level: i + 1 }),
            None => Ok(()),
        }
    }

    fn validate_touch(&self, snapshot: &OrderBookSnapshot) -> Result<(), ValidationError> {
        let (bid, ask) = match (snapshot.best_bid(), snapshot.best_ask()) {
            (Some(bid), Some(ask)) => (bid.price, ask.price),
            // One-sided books pass; statistics fall back to zero spread
            _ => return Ok(()),
        };

        if snapshot.is_crossed() {
            if bid != ask {
                return Err(ValidationError::Crossed { bid, ask });
            }
            if !self.config.allow_locked {
                return Err(ValidationError::Locked { price: bid });
            }
            return Ok(());
        }

        let spread_pct = (ask - bid) / bid * 100.0;
        if spread_pct > self.config.max_spread_pct {
            return Err(ValidationError::SpreadTooWide {
                spread_pct,
                max_pct: self.config.max_spread_pct,
            });
        }

        Ok(())
    }
}
