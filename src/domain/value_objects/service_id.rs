//! ServiceId value object - canonical identifier of a supported service

use serde::{Deserialize, Serialize};

/// Canonical identifier for a supported service
///
/// This is a closed set: every variant has exactly one `ServiceSpec` in the
/// catalog, enforced by an exhaustive `match`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceId {
    /// WhatsApp messaging (ported together with contacts)
    Whatsapp,
    /// Contacts
    Contacts,
    /// Google Calendar
    Calendar,
    /// Gmail
    Gmail,
    /// Device settings
    DeviceSettings,
    /// Media control
    MediaControl,
    /// Clock (alarms, timers)
    Clock,
    /// Generic reminders
    Reminders,
    /// Notes and lists
    Notes,
}

impl ServiceId {
    /// Every service, in catalog order
    pub const ALL: [ServiceId; 9] = [
        ServiceId::Whatsapp,
        ServiceId::Contacts,
        ServiceId::Calendar,
        ServiceId::Gmail,
        ServiceId::DeviceSettings,
        ServiceId::MediaControl,
        ServiceId::Clock,
        ServiceId::Reminders,
        ServiceId::Notes,
    ];

    /// Canonical string form (also the porting payload file stem)
    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceId::Whatsapp => "whatsapp",
            ServiceId::Contacts => "contacts",
            ServiceId::Calendar => "calendar",
            ServiceId::Gmail => "gmail",
            ServiceId::DeviceSettings => "device_settings",
            ServiceId::MediaControl => "media_control",
            ServiceId::Clock => "clock",
            ServiceId::Reminders => "reminders",
            ServiceId::Notes => "notes",
        }
    }

    /// Parse the canonical string form
    pub fn from_canonical(s: &str) -> Option<ServiceId> {
        Self::ALL.iter().copied().find(|id| id.as_str() == s)
    }

    /// Name of the row column holding this service's initial dataset
    pub fn initial_db_field(&self) -> String {
        format!("{}_initial_db", self.as_str())
    }
}

impl std::fmt::Display for ServiceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
