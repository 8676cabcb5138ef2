//! Colour tiers used to emphasise CAP classifications.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Colour {
    Red,
    Orange,
    Yellow,
    Green,
    Teal,
    Black,
}

impl Colour {
    pub fn name(self) -> &'static str {
        match self {
            Colour::Red => "red",
            Colour::Orange => "orange",
            Colour::Yellow => "yellow",
            Colour::Green => "green",
            Colour::Teal => "teal",
            Colour::Black => "black",
        }
    }
}

pub fn urgency_colour(urgency: &str) -> Option<Colour> {
    match urgency {
        "Immediate" => Some(Colour::Red),
        "Expected" => Some(Colour::Orange),
        "Future" => Some(Colour::Yellow),
        "Past" => Some(Colour::Green),
        _ => None,
    }
}

pub fn severity_colour(severity: &str) -> Option<Colour> {
    match severity {
        "Extreme" => Some(Colour::Red),
        "Severe" => Some(Colour::Orange),
        "Moderate" => Some(Colour::Yellow),
        "Minor" => Some(Colour::Green),
        _ => None,
    }
}

pub fn certainty_colour(certainty: &str) -> Option<Colour> {
    match certainty {
        "Observed" => Some(Colour::Red),
        "Likely" => Some(Colour::Orange),
        "Possible" => Some(Colour::Yellow),
        "Unlikely" => Some(Colour::Green),
        _ => None,
    }
}

/// CAP `msgType` of the parent alert.
pub fn message_type_colour(msg_type: &str) -> Option<Colour> {
    match msg_type {
        "Alert" => Some(Colour::Red),
        "Update" => Some(Colour::Orange),
        "Cancel" => Some(Colour::Green),
        "Ack" => Some(Colour::Teal),
        "Error" => Some(Colour::Black),
        _ => None,
    }
}
