//! Service catalog - the immutable service table
//!
//! Built once at startup and passed by reference into every component.
//! `builtin_spec` is an exhaustive `match`, so adding a `ServiceId` without
//! a spec does not compile.

use std::collections::BTreeMap;

use crate::domain::value_objects::{Injection, PortingConvention, ServiceId};

/// Static record describing one service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceSpec {
    pub id: ServiceId,
    /// Runtime API package imported by the notebook
    pub package: &'static str,
    /// Services that must be ported alongside this one
    pub requires: &'static [ServiceId],
    /// Default dataset loaded before porting
    pub default_db: String,
    /// Row fields that must be present and non-blank
    pub required_inputs: &'static [&'static str],
    pub convention: PortingConvention,
}

impl ServiceSpec {
    /// Statement loading this service's default dataset
    pub fn default_load_statement(&self) -> String {
        format!(
            "{}.SimulationEngine.db.load_state(\"{}\")",
            self.package, self.default_db
        )
    }
}

const NOTES_AUX_IMPORTS: &[&str] = &[
    "from notes_and_lists.SimulationEngine.utils import update_title_index, update_content_index",
    "from typing import Dict, Any",
    "from datetime import timezone",
];

const WHATSAPP: PortingConvention = PortingConvention {
    injections: &[
        Injection::json_text("contacts_initial_db", "contacts_src_json"),
        Injection::json_text("whatsapp_initial_db", "whatsapp_src_json"),
    ],
    pre_call: &[
        "port_contact_db = contacts_src_json",
        "port_whatsapp_db = whatsapp_src_json",
    ],
    aux_imports: &[],
    call: "port_db_whatsapp_and_contacts(port_contact_db, port_whatsapp_db)",
};

const CONTACTS: PortingConvention = PortingConvention {
    injections: &[Injection::json_text("contacts_initial_db", "contacts_src_json")],
    pre_call: &[],
    aux_imports: &[],
    call: "port_db_contacts(contacts_src_json)",
};

// Native dict injection, but the porting function takes JSON text.
const CALENDAR: PortingConvention = PortingConvention {
    injections: &[Injection::native("calendar_initial_db", "port_calender_db")],
    pre_call: &[],
    aux_imports: &[],
    call: "port_calendar_db(json.dumps(port_calender_db, ensure_ascii=False))",
};

const GMAIL: PortingConvention = PortingConvention {
    injections: &[Injection::json_text("gmail_initial_db", "gmail_src_json")],
    pre_call: &["port_gmail_db_key = gmail_src_json"],
    aux_imports: &[],
    call: "port_gmail_db(port_gmail_db_key)",
};

const DEVICE_SETTINGS: PortingConvention = PortingConvention {
    injections: &[Injection::json_text(
        "device_settings_initial_db",
        "device_settings_src_json",
    )],
    pre_call: &[],
    aux_imports: &[],
    call: "port_device_setting_db(device_settings_src_json)",
};

const MEDIA_CONTROL: PortingConvention = PortingConvention {
    injections: &[Injection::json_text(
        "media_control_initial_db",
        "media_control_src_json",
    )],
    pre_call: &[],
    aux_imports: &[],
    call: "port_media_control_db(media_control_src_json)",
};

const CLOCK: PortingConvention = PortingConvention {
    injections: &[Injection::json_text("clock_initial_db", "clock_src_json")],
    pre_call: &[],
    aux_imports: &[],
    call: "port_clock_db(clock_src_json)",
};

const REMINDERS: PortingConvention = PortingConvention {
    injections: &[Injection::json_text("reminders_initial_db", "reminders_src_json")],
    pre_call: &[],
    aux_imports: &[],
    call: "port_generic_reminder_db(reminders_src_json)",
};

const NOTES: PortingConvention = PortingConvention {
    injections: &[Injection::json_text("notes_initial_db", "notes_src_json")],
    pre_call: &[],
    aux_imports: NOTES_AUX_IMPORTS,
    call: "port_notes_and_lists_initial_db(notes_src_json)",
};

fn builtin_spec(id: ServiceId) -> ServiceSpec {
    let (package, requires, default_db, required_inputs, convention): (
        &'static str,
        &'static [ServiceId],
        &'static str,
        &'static [&'static str],
        PortingConvention,
    ) = match id {
        ServiceId::Whatsapp => (
            "whatsapp",
            &[ServiceId::Contacts],
            "/content/DBs/WhatsAppDefaultDB.json",
            &["whatsapp_initial_db", "contacts_initial_db"],
            WHATSAPP,
        ),
        ServiceId::Contacts => (
            "contacts",
            &[],
            "/content/DBs/ContactsDefaultDB.json",
            &["contacts_initial_db"],
            CONTACTS,
        ),
        ServiceId::Calendar => (
            "google_calendar",
            &[],
            "/content/DBs/CalendarDefaultDB.json",
            &["calendar_initial_db"],
            CALENDAR,
        ),
        ServiceId::Gmail => (
            "gmail",
            &[],
            "/content/DBs/GmailDefaultDB.json",
            &["gmail_initial_db"],
            GMAIL,
        ),
        ServiceId::DeviceSettings => (
            "device_setting",
            &[],
            "/content/DBs/DeviceSettingDefaultDB.json",
            &["device_settings_initial_db"],
            DEVICE_SETTINGS,
        ),
        ServiceId::MediaControl => (
            "media_control",
            &[],
            "/content/DBs/MediaControlDefaultDB.json",
            &["media_control_initial_db"],
            MEDIA_CONTROL,
        ),
        ServiceId::Clock => (
            "clock",
            &[],
            "/content/DBs/ClockDefaultDB.json",
            &["clock_initial_db"],
            CLOCK,
        ),
        ServiceId::Reminders => (
            "generic_reminders",
            &[],
            "/content/DBs/GenericRemindersDefaultDB.json",
            &["reminders_initial_db"],
            REMINDERS,
        ),
        ServiceId::Notes => (
            "notes_and_lists",
            &[],
            "/content/DBs/NotesAndListsDefaultDB.json",
            &["notes_initial_db"],
            NOTES,
        ),
    };

    ServiceSpec {
        id,
        package,
        requires,
        default_db: default_db.to_string(),
        required_inputs,
        convention,
    }
}

/// Surface forms (already normalised) mapped to services
///
/// Normalisation lower-cases and turns `/ & - _` into spaces, so entries
/// here use single spaces only.
const SYNONYMS: &[(&str, ServiceId)] = &[
    ("whatsapp", ServiceId::Whatsapp),
    ("whats app", ServiceId::Whatsapp),
    ("whatsapp message", ServiceId::Whatsapp),
    ("whatsapp messages", ServiceId::Whatsapp),
    ("message", ServiceId::Whatsapp),
    ("messages", ServiceId::Whatsapp),
    ("messaging", ServiceId::Whatsapp),
    ("contacts", ServiceId::Contacts),
    ("contact", ServiceId::Contacts),
    ("google contacts", ServiceId::Contacts),
    ("calendar", ServiceId::Calendar),
    ("calendars", ServiceId::Calendar),
    ("google calendar", ServiceId::Calendar),
    ("calender", ServiceId::Calendar),
    ("gmail", ServiceId::Gmail),
    ("google mail", ServiceId::Gmail),
    ("email", ServiceId::Gmail),
    ("emails", ServiceId::Gmail),
    ("e mail", ServiceId::Gmail),
    ("device settings", ServiceId::DeviceSettings),
    ("device setting", ServiceId::DeviceSettings),
    ("media control", ServiceId::MediaControl),
    ("media controls", ServiceId::MediaControl),
    ("clock", ServiceId::Clock),
    ("alarm", ServiceId::Clock),
    ("alarms", ServiceId::Clock),
    ("timer", ServiceId::Clock),
    ("timers", ServiceId::Clock),
    ("reminders", ServiceId::Reminders),
    ("reminder", ServiceId::Reminders),
    ("generic reminders", ServiceId::Reminders),
    ("generic reminder", ServiceId::Reminders),
    ("notes", ServiceId::Notes),
    ("note", ServiceId::Notes),
    ("notes and lists", ServiceId::Notes),
];

/// Immutable service table plus synonym map
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceCatalog {
    specs: Vec<ServiceSpec>,
    synonyms: &'static [(&'static str, ServiceId)],
}

impl Default for ServiceCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl ServiceCatalog {
    /// Catalog with built-in specs and default-dataset paths
    pub fn builtin() -> Self {
        Self {
            specs: ServiceId::ALL.into_iter().map(builtin_spec).collect(),
            synonyms: SYNONYMS,
        }
    }

    /// Replace default-dataset paths for selected services
    pub fn with_default_db_overrides(mut self, overrides: &BTreeMap<ServiceId, String>) -> Self {
        for (id, path) in overrides {
            let idx = Self::index_of(*id);
            self.specs[idx].default_db = path.clone();
        }
        self
    }

    /// Replace a service's implicit dependencies (test fixtures only)
    #[cfg(test)]
    pub(crate) fn with_requires(mut self, id: ServiceId, requires: &'static [ServiceId]) -> Self {
        let idx = Self::index_of(id);
        self.specs[idx].requires = requires;
        self
    }

    fn index_of(id: ServiceId) -> usize {
        ServiceId::ALL
            .iter()
            .position(|s| *s == id)
            .unwrap_or_default()
    }

    /// Spec for a service (total over `ServiceId`)
    pub fn spec(&self, id: ServiceId) -> &ServiceSpec {
        &self.specs[Self::index_of(id)]
    }

    pub fn specs(&self) -> &[ServiceSpec] {
        &self.specs
    }

    /// Synonym table in priority order
    pub fn synonyms(&self) -> &[(&'static str, ServiceId)] {
        self.synonyms
    }

    /// Synonyms for one service
    pub fn synonyms_of(&self, id: ServiceId) -> Vec<&'static str> {
        self.synonyms
            .iter()
            .filter(|(_, s)| *s == id)
            .map(|(syn, _)| *syn)
            .collect()
    }
}
