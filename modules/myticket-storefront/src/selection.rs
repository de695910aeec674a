//! Per-tier quantity counters for a single event, and the order total
//! derived from them.

use myticket_common::{Event, EventId, Money, MyTicketError, TierLabel, TierQuantities};

/// How a selection is seeded when the buyer opens the ticket screen.
/// The observed storefront starts every selection at one Regular ticket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionPolicy {
    pub default_seed: Option<(TierLabel, u32)>,
}

impl Default for SelectionPolicy {
    fn default() -> Self {
        Self {
            default_seed: Some((TierLabel::Regular, 1)),
        }
    }
}

impl SelectionPolicy {
    /// No pre-seeded quantity; every tier starts at zero.
    pub fn empty() -> Self {
        Self { default_seed: None }
    }
}

/// What `total` does with a selected tier the event no longer prices.
/// The observed storefront silently counts it as zero; `Reject` closes
/// that hole for callers that want it closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MissingPricePolicy {
    #[default]
    TreatAsZero,
    Reject,
}

/// A buyer's in-progress tier quantities for one event. Mutated only by
/// `increment`/`decrement`; discarded when the screen is left or checkout
/// completes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    event_id: EventId,
    quantities: TierQuantities,
}

impl Selection {
    /// Seed a selection from the event's tiers: zero everywhere, except
    /// the policy's default seed when the event actually has that tier.
    pub fn new(event: &Event, policy: &SelectionPolicy) -> Self {
        let mut quantities = TierQuantities::new();
        for tier in &event.tiers {
            quantities.insert(tier.label, 0);
        }
        if let Some((label, count)) = policy.default_seed {
            if let Some(quantity) = quantities.get_mut(&label) {
                *quantity = count;
            }
        }
        Self {
            event_id: event.id.clone(),
            quantities,
        }
    }

    pub fn event_id(&self) -> &EventId {
        &self.event_id
    }

    pub fn quantities(&self) -> &TierQuantities {
        &self.quantities
    }

    /// Quantity for a tier; zero for tiers outside the selection.
    pub fn quantity(&self, label: TierLabel) -> u32 {
        self.quantities.get(&label).copied().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.quantities.values().all(|&q| q == 0)
    }

    /// Add one ticket. Fails with `UnknownTier` when the label is not one
    /// of the event's tiers.
    pub fn increment(&mut self, label: TierLabel) -> Result<u32, MyTicketError> {
        match self.quantities.get_mut(&label) {
            Some(quantity) => {
                *quantity = quantity.saturating_add(1);
                Ok(*quantity)
            }
            None => Err(self.unknown_tier(label)),
        }
    }

    /// Remove one ticket, clamping at zero; a no-op on an already-zero
    /// tier. Fails with `UnknownTier` when the label is not one of the
    /// event's tiers.
    pub fn decrement(&mut self, label: TierLabel) -> Result<u32, MyTicketError> {
        match self.quantities.get_mut(&label) {
            Some(quantity) => {
                *quantity = quantity.saturating_sub(1);
                Ok(*quantity)
            }
            None => Err(self.unknown_tier(label)),
        }
    }

    /// Order total: sum of quantity × unit price over the event's tiers.
    pub fn total(
        &self,
        event: &Event,
        missing: MissingPricePolicy,
    ) -> Result<Money, MyTicketError> {
        let mut total = Money::ZERO;
        for (&label, &quantity) in &self.quantities {
            let Some(tier) = event.tier(label) else {
                match missing {
                    MissingPricePolicy::TreatAsZero => continue,
                    MissingPricePolicy::Reject => return Err(self.unknown_tier(label)),
                }
            };
            let line = tier
                .price
                .checked_mul(u64::from(quantity))
                .ok_or(MyTicketError::TotalOverflow)?;
            total = total
                .checked_add(line)
                .ok_or(MyTicketError::TotalOverflow)?;
        }
        Ok(total)
    }

    fn unknown_tier(&self, label: TierLabel) -> MyTicketError {
        MyTicketError::UnknownTier {
            event_id: self.event_id.clone(),
            tier: label,
        }
    }
}
