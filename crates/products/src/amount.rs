//! Checked money arithmetic.
//!
//! Prices and quantities are unbounded on their own, so their products and
//! sums can exceed the range of `Decimal`. These helpers report that as a
//! `Validation` error instead of panicking.

use rust_decimal::Decimal;

use stockroom_core::{DomainError, DomainResult};

fn overflow() -> DomainError {
    DomainError::validation("amount overflow")
}

/// `price × quantity`.
pub fn line_amount(price: Decimal, quantity: i64) -> DomainResult<Decimal> {
    price.checked_mul(Decimal::from(quantity)).ok_or_else(overflow)
}

/// Sum of amounts, stopping at the first error.
pub fn sum_amounts<I>(amounts: I) -> DomainResult<Decimal>
where
    I: IntoIterator<Item = DomainResult<Decimal>>,
{
    amounts.into_iter().try_fold(Decimal::ZERO, |total, amount| {
        total.checked_add(amount?).ok_or_else(overflow)
    })
}
