//! Wire types for the catalog endpoint and their validation into domain
//! types. Entries that fail validation are dropped with a warning rather
//! than propagated half-formed.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Deserialize;
use tracing::warn;

use myticket_common::{
    Catalog, Event, EventId, Money, Place, Placement, TicketTier, TierLabel,
};

/// Raw response shape. Entries stay as JSON values so one malformed event
/// cannot sink the whole catalog.
#[derive(Debug, Deserialize)]
pub struct RawCatalog {
    #[serde(default)]
    pub events: Vec<serde_json::Value>,
    #[serde(default)]
    pub places: Vec<serde_json::Value>,
}

/// Identifiers arrive as JSON numbers or strings depending on the row.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum WireId {
    Num(i64),
    Str(String),
}

impl WireId {
    fn into_string(self) -> String {
        match self {
            WireId::Num(n) => n.to_string(),
            WireId::Str(s) => s,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum WirePrice {
    Num(f64),
    Str(String),
}

impl WirePrice {
    fn into_money(self) -> Option<Money> {
        match self {
            WirePrice::Num(n) => Money::from_etb_f64(n),
            WirePrice::Str(s) => s.trim().parse::<f64>().ok().and_then(Money::from_etb_f64),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct WireTicket {
    pub ticket_type: String,
    pub price: WirePrice,
}

#[derive(Debug, Deserialize)]
pub struct WireEvent {
    pub event_id: WireId,
    pub display_name: String,
    #[serde(default)]
    pub event_description: String,
    #[serde(default)]
    pub poster: String,
    #[serde(default)]
    pub location: String,
    pub event_date_time: String,
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default)]
    pub tickets: Vec<WireTicket>,
}

#[derive(Debug, Deserialize)]
pub struct WirePlace {
    pub place_id: WireId,
    pub place_name: String,
    #[serde(default)]
    pub place_photo: String,
    #[serde(default)]
    pub description: String,
}

/// Validate a raw catalog into domain types, dropping malformed entries.
pub fn validate(raw: RawCatalog) -> Catalog {
    let mut events = Vec::with_capacity(raw.events.len());
    for value in raw.events {
        match serde_json::from_value::<WireEvent>(value) {
            Ok(wire) => {
                if let Some(event) = validate_event(wire) {
                    events.push(event);
                }
            }
            Err(err) => warn!(%err, "Dropping undecodable catalog event"),
        }
    }

    let mut places = Vec::with_capacity(raw.places.len());
    for value in raw.places {
        match serde_json::from_value::<WirePlace>(value) {
            Ok(wire) => places.push(Place {
                id: wire.place_id.into_string(),
                name: wire.place_name,
                photo: wire.place_photo,
                description: wire.description,
            }),
            Err(err) => warn!(%err, "Dropping undecodable catalog place"),
        }
    }

    Catalog { events, places }
}

fn validate_event(wire: WireEvent) -> Option<Event> {
    let id = EventId(wire.event_id.into_string());

    let Some(date_time) = parse_event_date(&wire.event_date_time) else {
        warn!(
            event_id = id.as_str(),
            raw = wire.event_date_time.as_str(),
            "Dropping event with unparseable date"
        );
        return None;
    };

    let mut tiers: Vec<TicketTier> = Vec::with_capacity(wire.tickets.len());
    for ticket in wire.tickets {
        let Some(label) = TierLabel::from_wire(&ticket.ticket_type) else {
            warn!(
                event_id = id.as_str(),
                ticket_type = ticket.ticket_type.as_str(),
                "Dropping ticket tier with unknown label"
            );
            continue;
        };
        let Some(price) = ticket.price.into_money() else {
            warn!(
                event_id = id.as_str(),
                %label,
                "Dropping ticket tier with invalid price"
            );
            continue;
        };
        // At most one tier per label per event; first occurrence wins.
        if tiers.iter().any(|t| t.label == label) {
            warn!(event_id = id.as_str(), %label, "Dropping duplicate ticket tier");
            continue;
        }
        tiers.push(TicketTier { label, price });
    }

    Some(Event {
        id,
        display_name: wire.display_name,
        description: wire.event_description,
        poster: wire.poster,
        location: wire.location,
        date_time,
        placement: Placement::from_wire(wire.position.as_deref().unwrap_or("regular")),
        tiers,
    })
}

/// The feed has been observed with both RFC 3339 and bare
/// `YYYY-MM-DD HH:MM:SS` timestamps.
fn parse_event_date(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }
    None
}
