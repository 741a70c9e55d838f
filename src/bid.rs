use std::fmt::{Display, Formatter};

use crate::keyed::Keyed;

/// A bid from a monthly sales export
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Bid {
    /// Unique identifier, a non-negative integer in decimal
    pub id: String,
    pub title: String,
    /// The fund the bid is accounted to
    pub fund: String,
    pub amount: f64,
}

impl Bid {
    /// Creates a bid
    ///
    /// # Arguments
    ///
    /// `id`: The bid's identifier
    ///
    /// `title`: The item's title
    ///
    /// `fund`: The fund the bid belongs to
    ///
    /// `amount`: The winning amount
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        fund: impl Into<String>,
        amount: f64,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            fund: fund.into(),
            amount,
        }
    }
}

impl Keyed for Bid {
    fn key(&self) -> &str {
        &self.id
    }
}

impl Display for Bid {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: {} | {} | {}",
            self.id, self.title, self.amount, self.fund
        )
    }
}
