//! Read-only projection of a selection against its event's prices.
//! Recomputed on demand, never stored.

use myticket_common::{EventId, Money, MyTicketError, TierLabel};

use crate::selection::{MissingPricePolicy, Selection};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineItem {
    pub label: TierLabel,
    pub quantity: u32,
    pub unit_price: Money,
    pub line_total: Money,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderSummary {
    pub event_id: EventId,
    pub line_items: Vec<LineItem>,
    pub total: Money,
}

impl OrderSummary {
    /// Project a selection against the event's tier prices. Zero-quantity
    /// tiers keep their line so the summary mirrors what the buyer saw.
    /// Invariant: line totals sum exactly to `total`.
    pub fn build(
        selection: &Selection,
        event: &myticket_common::Event,
        missing: MissingPricePolicy,
    ) -> Result<Self, MyTicketError> {
        let mut line_items = Vec::with_capacity(selection.quantities().len());
        let mut total = Money::ZERO;

        for (&label, &quantity) in selection.quantities() {
            let unit_price = match event.tier(label) {
                Some(tier) => tier.price,
                None => match missing {
                    MissingPricePolicy::TreatAsZero => Money::ZERO,
                    MissingPricePolicy::Reject => {
                        return Err(MyTicketError::UnknownTier {
                            event_id: selection.event_id().clone(),
                            tier: label,
                        })
                    }
                },
            };
            let line_total = unit_price
                .checked_mul(u64::from(quantity))
                .ok_or(MyTicketError::TotalOverflow)?;
            total = total
                .checked_add(line_total)
                .ok_or(MyTicketError::TotalOverflow)?;
            line_items.push(LineItem {
                label,
                quantity,
                unit_price,
                line_total,
            });
        }

        Ok(Self {
            event_id: selection.event_id().clone(),
            line_items,
            total,
        })
    }
}
