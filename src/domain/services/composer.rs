//! Notebook composer
//!
//! Lays out the fixed block sequence of a generated notebook: metadata,
//! setup, dependency install, the import/port cell, then three empty
//! assertion/action sections.

use crate::domain::entities::{Artifact, Block, CodeBuilder, PayloadSet, Row};
use crate::domain::ports::StaticBlock;
use crate::domain::services::assembler::PortingFragment;

/// Section headings of the trailing rater placeholders
pub const PLACEHOLDER_SECTIONS: [&str; 3] = ["Initial Assertion", "Action", "Final Assertion"];

/// Build the metadata markdown cell
fn metadata_block(row: &Row, packages: &[&str]) -> Block {
    let query = row
        .query()
        .map(|q| format!(" {}", q.trim()))
        .unwrap_or_default();
    let apis: String = packages.iter().map(|p| format!("- {}\n", p)).collect();

    Block::Markdown(format!(
        "# Sample ID\n\n**Sample ID**: {}\n\n**Query**:{}\n\n**DB Type**: Base Case\n\n\
         **Case Description**:\n\n**Global/Context Variables:**\n\n**APIs:**\n{}\n**Databases:**",
        row.task_id(),
        query,
        apis
    ))
}

/// Build the import/port code cell
fn import_and_port_block(row: &Row, fragments: &[PortingFragment]) -> Block {
    let mut code = CodeBuilder::new();

    code.line("# Imports");
    code.lines(fragments.iter().map(|f| format!("import {}", f.package)));
    let mut aux: Vec<&str> = Vec::new();
    for line in fragments.iter().flat_map(|f| f.aux_imports.iter().copied()) {
        if !aux.contains(&line) {
            aux.push(line);
        }
    }
    code.lines(aux);
    code.line("import os, json, uuid");
    code.line("from datetime import datetime");
    code.blank();

    if let Some(location) = row.user_location() {
        let literal = serde_json::Value::String(location.trim().to_string()).to_string();
        code.line("# User location from sheet (environment variable for downstream code)");
        code.line(format!("os.environ[\"USER_LOCATION\"] = {}", literal));
        code.blank();
    }

    code.line("# Load default DBs");
    code.lines(fragments.iter().map(|f| f.default_load.clone()));
    code.blank();

    for fragment in fragments {
        for pair in fragment.injections.chunks(2) {
            code.lines(pair.iter().cloned());
            code.blank();
        }
        code.line(format!(
            "# ==== Porting code for service: {} ====",
            fragment.service
        ));
        code.payload(format!("porting/{}", fragment.service), fragment.body.clone());
        code.blank();
        if !fragment.pre_call.is_empty() {
            code.lines(fragment.pre_call.iter().copied());
            code.blank();
        }
    }

    if !fragments.is_empty() {
        code.line("# Execute porting");
        code.lines(fragments.iter().map(|f| f.call));
    }
    code.build()
}

/// Compose the full artifact for one row
///
/// `fragments` must already be in resolved-service order.
pub fn compose(row: &Row, fragments: &[PortingFragment], payloads: &PayloadSet) -> Artifact {
    let packages: Vec<&str> = fragments.iter().map(|f| f.package).collect();

    let mut blocks = vec![
        metadata_block(row, &packages),
        Block::Markdown("# Set Up".to_string()),
    ];
    for block in StaticBlock::ALL {
        blocks.push(Block::Markdown(block.heading().to_string()));
        blocks.push(Block::payload(
            block.file_name(),
            payloads.static_block(block),
        ));
    }
    blocks.push(Block::Markdown(
        "## Import APIs and initiate DBs".to_string(),
    ));
    blocks.push(import_and_port_block(row, fragments));
    for section in PLACEHOLDER_SECTIONS {
        blocks.push(Block::Markdown(format!("# {}", section)));
        blocks.push(Block::Placeholder);
    }

    Artifact::new(row.task_id(), blocks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::services::assembler::assemble;
    use crate::domain::services::catalog::ServiceCatalog;
    use crate::domain::value_objects::ServiceId;

    fn payloads() -> PayloadSet {
        PayloadSet::new("!wget -q db.zip\n", "!pip install -q apis\n")
            .with_porting(
                ServiceId::Calendar,
                "def port_calendar_db(src):\n    return src\n",
            )
            .with_porting(ServiceId::Notes, "def port_notes_and_lists_initial_db(s):\n    pass")
            .with_porting(ServiceId::Gmail, "def port_gmail_db(s):\n    print(\"a\nb\")")
    }

    fn fragments(row: &Row, services: &[ServiceId]) -> Vec<PortingFragment> {
        let catalog = ServiceCatalog::builtin();
        services
            .iter()
            .map(|s| assemble(*s, row, &catalog, &payloads()).unwrap())
            .collect()
    }

    #[test]
    fn block_sequence_is_fixed() {
        let row = Row::new(1, [("task_id", "T9"), ("calendar_initial_db", "{}")]);
        let artifact = compose(&row, &fragments(&row, &[ServiceId::Calendar]), &payloads());

        let kinds: Vec<&str> = artifact
            .blocks()
            .iter()
            .map(|b| match b {
                Block::Markdown(_) => "md",
                Block::Code(_) => "code",
                Block::Placeholder => "empty",
            })
            .collect();
        assert_eq!(
            kinds,
            vec![
                "md", "md", "md", "code", "md", "code", "md", "code", "md", "empty", "md", "empty",
                "md", "empty"
            ]
        );
        assert_eq!(artifact.task_id(), "T9");
        assert_eq!(artifact.blocks()[3].source(), "!wget -q db.zip\n");
        assert_eq!(
            artifact.blocks()[4],
            Block::Markdown("## Install Dependencies and Clone Repositories".to_string())
        );
        assert_eq!(artifact.blocks()[13], Block::Placeholder);
    }

    #[test]
    fn metadata_lists_packages_and_query() {
        let row = Row::new(
            1,
            [
                ("task_id", "T1"),
                ("query", "Move my 3pm"),
                ("calendar_initial_db", "{}"),
                ("gmail_initial_db", "{}"),
            ],
        );
        let artifact = compose(
            &row,
            &fragments(&row, &[ServiceId::Calendar, ServiceId::Gmail]),
            &payloads(),
        );
        let md = artifact.blocks()[0].source();
        assert!(md.starts_with("# Sample ID\n\n**Sample ID**: T1\n\n**Query**: Move my 3pm\n"));
        assert!(md.contains("**APIs:**\n- google_calendar\n- gmail\n\n**Databases:**"));
    }

    #[test]
    fn import_cell_snapshot() {
        let row = Row::new(
            1,
            [
                ("task_id", "T1"),
                ("calendar_initial_db", "{\"events\": {}}"),
                ("user_location", "Paris, FR"),
            ],
        );
        let artifact = compose(&row, &fragments(&row, &[ServiceId::Calendar]), &payloads());

        insta::assert_snapshot!(artifact.blocks()[7].source(), @r#"
# Imports
import google_calendar
import os, json, uuid
from datetime import datetime

# User location from sheet (environment variable for downstream code)
os.environ["USER_LOCATION"] = "Paris, FR"

# Load default DBs
google_calendar.SimulationEngine.db.load_state("/content/DBs/CalendarDefaultDB.json")

# port_calender_db from calendar_initial_db (dict)
port_calender_db = {'events': {}}

# ==== Porting code for service: calendar ====
def port_calendar_db(src):
    return src

# Execute porting
port_calendar_db(json.dumps(port_calender_db, ensure_ascii=False))
"#);
    }

    #[test]
    fn location_line_omitted_when_absent() {
        let row = Row::new(1, [("calendar_initial_db", "{}")]);
        let artifact = compose(&row, &fragments(&row, &[ServiceId::Calendar]), &payloads());
        assert!(!artifact.blocks()[7].source().contains("USER_LOCATION"));
    }

    #[test]
    fn aux_imports_follow_packages() {
        let row = Row::new(1, [("notes_initial_db", "{}"), ("calendar_initial_db", "{}")]);
        let artifact = compose(
            &row,
            &fragments(&row, &[ServiceId::Notes, ServiceId::Calendar]),
            &payloads(),
        );
        let src = artifact.blocks()[7].source();
        let lines: Vec<&str> = src.lines().collect();
        assert_eq!(lines[1], "import notes_and_lists");
        assert_eq!(lines[2], "import google_calendar");
        assert_eq!(
            lines[3],
            "from notes_and_lists.SimulationEngine.utils import update_title_index, update_content_index"
        );
        assert_eq!(src.matches("from typing import Dict, Any").count(), 1);
    }

    #[test]
    fn defaults_load_before_any_porting_body() {
        let row = Row::new(1, [("notes_initial_db", "{}"), ("gmail_initial_db", "{}")]);
        let artifact = compose(
            &row,
            &fragments(&row, &[ServiceId::Gmail, ServiceId::Notes]),
            &payloads(),
        );
        let src = artifact.blocks()[7].source();
        let last_load = src.rfind("load_state(").unwrap();
        let first_body = src.find("# ==== Porting code").unwrap();
        assert!(last_load < first_body);
        assert!(src.find("port_gmail_db_key = gmail_src_json").unwrap() < src.find("# Execute porting").unwrap());
    }

    #[test]
    fn empty_service_set_still_composes() {
        let row = Row::new(1, [("task_id", "T0")]);
        let artifact = compose(&row, &[], &payloads());
        let src = artifact.blocks()[7].source();
        assert!(src.starts_with("# Imports\nimport os, json, uuid\n"));
        assert!(!src.contains("# Execute porting"));
        assert!(artifact.blocks()[0].source().contains("**APIs:**\n\n**Databases:**"));
    }

    #[test]
    fn porting_body_is_escaped() {
        let row = Row::new(1, [("gmail_initial_db", "{}")]);
        let artifact = compose(&row, &fragments(&row, &[ServiceId::Gmail]), &payloads());
        assert!(artifact.blocks()[7].source().contains("print(\"a\\nb\")"));
    }
}
