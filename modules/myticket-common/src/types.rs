use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// --- Money ---

/// An ETB amount in cents. All arithmetic is checked; the gateway wire
/// format is a two-decimal string produced by [`Money::to_amount_string`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
pub struct Money(u64);

impl Money {
    pub const ZERO: Money = Money(0);

    pub const fn from_cents(cents: u64) -> Self {
        Self(cents)
    }

    /// Whole-birr constructor. Returns `None` on overflow.
    pub const fn from_etb(birr: u64) -> Option<Self> {
        match birr.checked_mul(100) {
            Some(cents) => Some(Self(cents)),
            None => None,
        }
    }

    /// Parse a wire price (JSON number, e.g. `250` or `199.99`) into cents.
    /// Negative, non-finite, or overflowing values are rejected.
    pub fn from_etb_f64(birr: f64) -> Option<Self> {
        if !birr.is_finite() || birr < 0.0 {
            return None;
        }
        let cents = (birr * 100.0).round();
        if cents > u64::MAX as f64 {
            return None;
        }
        Some(Self(cents as u64))
    }

    pub const fn cents(&self) -> u64 {
        self.0
    }

    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub const fn checked_add(self, other: Self) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(cents) => Some(Self(cents)),
            None => None,
        }
    }

    pub const fn checked_mul(self, factor: u64) -> Option<Self> {
        match self.0.checked_mul(factor) {
            Some(cents) => Some(Self(cents)),
            None => None,
        }
    }

    /// Two-decimal amount string expected by the payment gateway,
    /// e.g. `450.00`.
    pub fn to_amount_string(&self) -> String {
        format!("{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

impl std::fmt::Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ETB", self.to_amount_string())
    }
}

// --- Ticket tiers ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TierLabel {
    Regular,
    #[serde(rename = "VIP")]
    Vip,
    #[serde(rename = "VVIP")]
    Vvip,
}

impl TierLabel {
    pub const ALL: [TierLabel; 3] = [TierLabel::Regular, TierLabel::Vip, TierLabel::Vvip];

    /// Parse the wire `ticket_type` value. Unknown labels are `None` so the
    /// catalog boundary can drop them instead of guessing.
    pub fn from_wire(s: &str) -> Option<Self> {
        match s.trim() {
            "Regular" | "regular" => Some(TierLabel::Regular),
            "VIP" | "vip" => Some(TierLabel::Vip),
            "VVIP" | "vvip" => Some(TierLabel::Vvip),
            _ => None,
        }
    }
}

impl std::fmt::Display for TierLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TierLabel::Regular => write!(f, "Regular"),
            TierLabel::Vip => write!(f, "VIP"),
            TierLabel::Vvip => write!(f, "VVIP"),
        }
    }
}

/// One priced ticket category on an event. At most one tier per label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketTier {
    pub label: TierLabel,
    pub price: Money,
}

// --- Events and places ---

/// Opaque event identifier. The wire value may be a JSON number or string;
/// both normalize to the string form.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EventId(pub String);

impl EventId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for EventId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for EventId {
    fn from(s: &str) -> Self {
        EventId(s.to_string())
    }
}

/// Home-screen slot for an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Placement {
    Top,
    Regular,
}

impl Placement {
    pub fn from_wire(s: &str) -> Self {
        match s {
            "top" => Placement::Top,
            _ => Placement::Regular,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub display_name: String,
    pub description: String,
    pub poster: String,
    pub location: String,
    pub date_time: DateTime<Utc>,
    pub placement: Placement,
    pub tiers: Vec<TicketTier>,
}

impl Event {
    pub fn tier(&self, label: TierLabel) -> Option<&TicketTier> {
        self.tiers.iter().find(|t| t.label == label)
    }

    pub fn has_tier(&self, label: TierLabel) -> bool {
        self.tier(label).is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub id: String,
    pub name: String,
    pub photo: String,
    pub description: String,
}

/// One catalog fetch worth of events and places. Immutable after the fetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Catalog {
    pub events: Vec<Event>,
    pub places: Vec<Place>,
}

impl Catalog {
    /// Exact-match lookup. `None` means the catalog loaded fine but has no
    /// such event, which callers must keep distinct from "still loading".
    pub fn event(&self, id: &EventId) -> Option<&Event> {
        self.events.iter().find(|e| &e.id == id)
    }

    pub fn top_events(&self) -> impl Iterator<Item = &Event> {
        self.events.iter().filter(|e| e.placement == Placement::Top)
    }

    pub fn regular_events(&self) -> impl Iterator<Item = &Event> {
        self.events
            .iter()
            .filter(|e| e.placement == Placement::Regular)
    }
}

// --- Identity ---

/// Opaque provider session, persisted between runs under the `user` key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub local_id: String,
    pub email: String,
    pub id_token: String,
    pub refresh_token: String,
}

// --- Checkout ---

/// Buyer contact fields attached to a checkout request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuyerContact {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
}

/// Per-tier quantities keyed by label. Kept ordered so summaries and logs
/// render deterministically.
pub type TierQuantities = BTreeMap<TierLabel, u32>;
