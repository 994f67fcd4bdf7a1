//! Event-type colors used for calendar dots and list badges.

use agenda_core::EventType;

/// `#RRGGBB` color for an event type.
pub fn color_hex(event_type: EventType) -> &'static str {
    match event_type {
        EventType::Health => "#F44336",
        EventType::Work => "#FFEB3B",
        EventType::Sleep => "#2196F3",
        EventType::School => "#FF9800",
        EventType::Leisure => "#4CAF50",
        EventType::Other => "#9E9E9E",
    }
}
