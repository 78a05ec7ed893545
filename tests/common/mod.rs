//! Shared fixtures for CLI tests.
#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

pub const HEADERS: [&str; 7] = [
    "task_id",
    "query",
    "services_needed",
    "user_location",
    "calendar_initial_db",
    "whatsapp_initial_db",
    "contacts_initial_db",
];

pub const CALENDAR_DB: &str = r#"{"events":[{"title":"Standup","start":"09:00"}]}"#;
pub const WHATSAPP_DB: &str = r#"{"chats":[{"with":"Ana","messages":["hi"]}]}"#;
pub const CONTACTS_DB: &str = r#"{"contacts":[{"name":"Ana","phone":"+1 555 0100"}]}"#;

/// Temporary project with a tracker workbook and a payload directory
pub struct Workbook {
    pub dir: TempDir,
}

impl Workbook {
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let wb = Self { dir };
        wb.write_payloads();
        wb
    }

    /// Workbook with one valid row and one row naming an unknown service
    pub fn with_sample_rows() -> Self {
        let wb = Self::new();
        wb.write_rows(&[
            [
                "T1",
                "What is on my calendar?",
                "Calendar, WhatsApp",
                "Paris, FR",
                CALENDAR_DB,
                WHATSAPP_DB,
                CONTACTS_DB,
            ],
            ["T2", "Send a fax", "Fax machine", "", "", "", ""],
        ]);
        wb
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn tracker(&self) -> PathBuf {
        self.root().join("tracker")
    }

    pub fn payloads(&self) -> PathBuf {
        self.root().join("payloads")
    }

    pub fn out_dir(&self) -> PathBuf {
        self.tracker().join("generated_colabs")
    }

    pub fn summary(&self) -> PathBuf {
        self.tracker().join("Generated_Colabs.csv")
    }

    pub fn notebook(&self, task_id: &str) -> PathBuf {
        self.out_dir()
            .join(format!("Gemini_Apps_ID_Data_Port_{}.ipynb", task_id))
    }

    pub fn write_rows(&self, rows: &[[&str; 7]]) {
        std::fs::create_dir_all(self.tracker()).unwrap();
        let mut writer = csv::Writer::from_path(self.tracker().join("tasks.csv")).unwrap();
        writer.write_record(HEADERS).unwrap();
        for row in rows {
            writer.write_record(row).unwrap();
        }
        writer.flush().unwrap();
    }

    fn write_payloads(&self) {
        let root = self.payloads();
        std::fs::create_dir_all(root.join("static")).unwrap();
        std::fs::create_dir_all(root.join("porting")).unwrap();
        std::fs::write(
            root.join("static/setup_cell.py"),
            "import gdown\ngdown.download_folder(\"https://example.invalid/dbs\")\n",
        )
        .unwrap();
        std::fs::write(root.join("static/pipinstall_cell.py"), "!pip install -q apis\n").unwrap();
        for service in ["calendar", "whatsapp", "contacts"] {
            std::fs::write(
                root.join(format!("porting/{}.py", service)),
                format!("def port_{}(src):\n    print(\"porting {}\")\n", service, service),
            )
            .unwrap();
        }
    }

    /// `nbport` isolated from the caller's config and environment
    pub fn command(&self) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_nbport"));
        cmd.current_dir(self.root())
            .env("XDG_CONFIG_HOME", self.root().join("xdg"))
            .env_remove("RUST_LOG");
        for var in [
            "NBPORT_SOURCE",
            "NBPORT_SOURCE_SHEET",
            "NBPORT_SUMMARY_SHEET",
            "NBPORT_OUT_FOLDER",
            "NBPORT_NAMING_TEMPLATE",
            "NBPORT_PAYLOAD_DIR",
            "NBPORT_LOG_LEVEL",
        ] {
            cmd.env_remove(var);
        }
        cmd
    }

    /// Run a subcommand against this workbook's tracker and payloads
    pub fn run(&self, args: &[&str]) -> Output {
        let (command, rest) = args.split_first().unwrap();
        let tracker = self.tracker();
        let payloads = self.payloads();
        self.command()
            .arg(command)
            .arg("--source")
            .arg(&tracker)
            .arg("--payload-dir")
            .arg(&payloads)
            .args(rest)
            .output()
            .unwrap()
    }
}

pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

/// Parse NDJSON stdout into events
pub fn events(output: &Output) -> Vec<serde_json::Value> {
    stdout(output)
        .lines()
        .filter(|l| !l.trim().is_empty())
        .map(|l| serde_json::from_str(l).unwrap())
        .collect()
}

/// Summary sheet header and records
pub fn summary_rows(path: &Path) -> (csv::StringRecord, Vec<csv::StringRecord>) {
    let mut reader = csv::Reader::from_path(path).unwrap();
    let headers = reader.headers().unwrap().clone();
    let records = reader.records().map(|r| r.unwrap()).collect();
    (headers, records)
}
